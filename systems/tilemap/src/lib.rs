#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Expands 16x16 room definitions into padded game tilemaps.
//!
//! Rooms are authored as a flat row-major array of [`TileType`] codes. The
//! game renders them inside a larger grid so that doors sitting on the
//! outer ring can be pushed one cell outward, leaving a walkable
//! [`TileType::Path`] behind that still points at the original tile.

mod room;
mod triggers;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use underdark_core::{Direction, Position, TileType, TileTypeError, ROOM_SIDE, ROOM_TILE_COUNT};

pub use room::RoomTiles;
pub use triggers::{step_outcome, Hazard, StepOutcome};

const LAST_SOURCE_EDGE: usize = ROOM_SIDE - 1;

/// Errors raised while building tilemaps.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TilemapError {
    /// The room definition did not contain exactly 256 tiles.
    #[error("room definition holds {len} tiles, expected {ROOM_TILE_COUNT}")]
    MalformedTilemap {
        /// Number of tiles supplied.
        len: usize,
    },
    /// The grid size cannot host a padded 16x16 room.
    #[error("grid size {0} must be an even number of at least {min}", min = GridSize::MIN)]
    InvalidGridSize(u16),
    /// A tile code did not decode into a known tile type.
    #[error("tile {index} is invalid: {source}")]
    UnknownTile {
        /// Row-major index of the offending tile.
        index: usize,
        /// Decoding failure reported for the tile.
        source: TileTypeError,
    },
}

/// Side length of a square game tilemap.
///
/// The source room is centred with an equal `gap` on every side, and the gap
/// must leave room for relocated doors, so only even sizes of 18 or more
/// are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct GridSize(u16);

impl GridSize {
    /// Smallest accepted grid size.
    pub const MIN: u16 = ROOM_SIDE as u16 + 2;

    /// One cell of padding on every side.
    pub const EIGHTEEN: Self = Self(18);

    /// Two cells of padding on every side.
    pub const TWENTY: Self = Self(20);

    /// Validates a grid size.
    pub fn new(size: u16) -> Result<Self, TilemapError> {
        if size < Self::MIN || size % 2 != 0 {
            return Err(TilemapError::InvalidGridSize(size));
        }
        Ok(Self(size))
    }

    /// Side length in cells.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Padding added on each side of the source room.
    #[must_use]
    pub const fn gap(&self) -> u16 {
        (self.0 - ROOM_SIDE as u16) / 2
    }

    /// Number of cells in the expanded grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.0 as usize * self.0 as usize
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::EIGHTEEN
    }
}

impl TryFrom<u16> for GridSize {
    type Error = TilemapError;

    fn try_from(size: u16) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<GridSize> for u16 {
    fn from(size: GridSize) -> Self {
        size.0
    }
}

/// Signed cell offset within a game tilemap's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

/// Padded grid derived from a single room level.
///
/// Built once per room level and never mutated afterwards. Only the
/// expander constructs one, so it serializes but never deserializes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameTilemap {
    grid_size: GridSize,
    grid_origin: GridPoint,
    player_start: Option<Position>,
    tilemap: Vec<TileType>,
    tiles: Vec<Option<u8>>,
}

impl GameTilemap {
    /// Side length of the expanded grid.
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// Location of the expanded grid's first cell relative to the source room.
    #[must_use]
    pub const fn grid_origin(&self) -> GridPoint {
        self.grid_origin
    }

    /// Spawn position inferred from the room's Entry tile.
    #[must_use]
    pub const fn player_start(&self) -> Option<Position> {
        self.player_start
    }

    /// Expanded tile types in row-major order.
    #[must_use]
    pub fn tilemap(&self) -> &[TileType] {
        &self.tilemap
    }

    /// Source room index for each expanded cell, parallel to [`Self::tilemap`].
    #[must_use]
    pub fn tiles(&self) -> &[Option<u8>] {
        &self.tiles
    }

    /// Tile type at the expanded cell, `None` outside the grid.
    #[must_use]
    pub fn tile_at(&self, x: usize, y: usize) -> Option<TileType> {
        self.index(x, y)
            .and_then(|index| self.tilemap.get(index).copied())
    }

    /// Source room index behind the expanded cell, if any.
    #[must_use]
    pub fn source_index_at(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y)
            .and_then(|index| self.tiles.get(index).copied().flatten())
    }

    /// Iterator over the rows of the expanded grid.
    pub fn rows(&self) -> impl Iterator<Item = &[TileType]> {
        self.tilemap.chunks(usize::from(self.grid_size.get()))
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        let size = usize::from(self.grid_size.get());
        (x < size && y < size).then(|| y * size + x)
    }
}

/// Expands a flat 256-tile room definition into a padded game tilemap.
///
/// Fails with [`TilemapError::MalformedTilemap`] when `tilemap` does not
/// hold exactly 256 entries. A room without an Entry tile is still valid and
/// yields no player start.
pub fn expand_tilemap(tilemap: &[TileType], grid_size: GridSize) -> Result<GameTilemap, TilemapError> {
    RoomTiles::new(tilemap).map(|room| room.expand(grid_size))
}

pub(crate) fn expand(source: &[TileType; ROOM_TILE_COUNT], grid_size: GridSize) -> GameTilemap {
    let size = usize::from(grid_size.get());
    let gap = usize::from(grid_size.gap());
    let mut tilemap = vec![TileType::Void; grid_size.cell_count()];
    let mut tiles = vec![None; grid_size.cell_count()];
    let mut set = |x: usize, y: usize, tile: TileType, source: Option<u8>| {
        let index = y * size + x;
        tilemap[index] = tile;
        tiles[index] = source;
    };

    let mut player_start = None;
    let mut entry_count = 0_usize;

    for (index, &tile) in (0_u8..=u8::MAX).zip(source.iter()) {
        let x = usize::from(index) % ROOM_SIDE;
        let y = usize::from(index) / ROOM_SIDE;
        let (xx, yy) = (x + gap, y + gap);

        if tile == TileType::Entry {
            entry_count += 1;
            player_start = Some(spawn_position(index));
        }

        let outboard = if tile.is_door() {
            door_outboard(x, y, xx, yy)
        } else {
            None
        };

        match outboard {
            Some((ox, oy)) => {
                set(xx, yy, TileType::Path, Some(index));
                set(ox, oy, tile, None);
            }
            None => set(xx, yy, tile, Some(index)),
        }
    }

    if entry_count > 1 {
        tracing::warn!(
            entry_count,
            spawn = ?player_start,
            "room holds several Entry tiles; spawning at the last one"
        );
    }

    GameTilemap {
        grid_size,
        grid_origin: GridPoint {
            x: -i32::from(grid_size.gap()),
            y: -i32::from(grid_size.gap()),
        },
        player_start,
        tilemap,
        tiles,
    }
}

/// Cell one step beyond the door's translated position, for doors on the
/// outer ring. West and east edges win over north and south on corners.
fn door_outboard(x: usize, y: usize, xx: usize, yy: usize) -> Option<(usize, usize)> {
    if x == 0 {
        Some((xx - 1, yy))
    } else if x == LAST_SOURCE_EDGE {
        Some((xx + 1, yy))
    } else if y == 0 {
        Some((xx, yy - 1))
    } else if y == LAST_SOURCE_EDGE {
        Some((xx, yy + 1))
    } else {
        None
    }
}

/// Spawn heading for an Entry tile.
///
/// Row edges take precedence over column edges, and interior entries face
/// south on the western half and north on the eastern half.
#[must_use]
pub fn spawn_position(tile: u8) -> Position {
    let x = usize::from(tile) % ROOM_SIDE;
    let y = usize::from(tile) / ROOM_SIDE;
    let facing = if y == 0 {
        Direction::South
    } else if y == LAST_SOURCE_EDGE {
        Direction::North
    } else if x == 0 {
        Direction::East
    } else if x == LAST_SOURCE_EDGE {
        Direction::West
    } else if x < ROOM_SIDE / 2 {
        Direction::South
    } else {
        Direction::North
    };
    Position::new(tile, facing)
}
