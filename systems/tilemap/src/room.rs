//! Validated source room definitions.

use underdark_core::{TileType, ROOM_SIDE, ROOM_TILE_COUNT};

use crate::{expand, GameTilemap, GridSize, TilemapError};

/// 16x16 room definition holding exactly [`ROOM_TILE_COUNT`] tiles.
///
/// Tiles are addressed by their row-major index, which always fits a `u8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoomTiles {
    tiles: [TileType; ROOM_TILE_COUNT],
}

impl RoomTiles {
    /// Captures a room definition, rejecting anything but 256 tiles.
    pub fn new(tiles: &[TileType]) -> Result<Self, TilemapError> {
        let tiles = tiles.try_into().map_err(|_| {
            tracing::debug!(len = tiles.len(), "rejected malformed room definition");
            TilemapError::MalformedTilemap { len: tiles.len() }
        })?;
        Ok(Self { tiles })
    }

    /// Decodes a room definition from raw tile codes.
    pub fn from_codes(codes: &[u8]) -> Result<Self, TilemapError> {
        if codes.len() != ROOM_TILE_COUNT {
            return Err(TilemapError::MalformedTilemap { len: codes.len() });
        }
        let tiles = codes
            .iter()
            .enumerate()
            .map(|(index, &code)| {
                TileType::try_from(code).map_err(|source| TilemapError::UnknownTile { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&tiles)
    }

    /// Tile stored at the row-major index.
    #[must_use]
    pub fn get(&self, tile: u8) -> TileType {
        self.tiles[usize::from(tile)]
    }

    /// Tile at the given column and row, `None` outside the room.
    #[must_use]
    pub fn at(&self, column: usize, row: usize) -> Option<TileType> {
        (column < ROOM_SIDE && row < ROOM_SIDE).then(|| self.tiles[row * ROOM_SIDE + column])
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[TileType] {
        &self.tiles
    }

    /// Raw tile codes in row-major order.
    #[must_use]
    pub fn to_codes(&self) -> Vec<u8> {
        self.tiles.iter().map(|tile| tile.code()).collect()
    }

    /// Number of tiles of the given type.
    #[must_use]
    pub fn count(&self, kind: TileType) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }

    /// Reports whether an orthogonal neighbour of `tile` holds `kind`.
    ///
    /// Neighbours never wrap across row ends.
    #[must_use]
    pub fn is_around(&self, tile: u8, kind: TileType) -> bool {
        let column = usize::from(tile) % ROOM_SIDE;
        let row = usize::from(tile) / ROOM_SIDE;
        let neighbours = [
            column.checked_sub(1).map(|left| (left, row)),
            Some((column + 1, row)),
            row.checked_sub(1).map(|up| (column, up)),
            Some((column, row + 1)),
        ];
        neighbours
            .into_iter()
            .flatten()
            .any(|(column, row)| self.at(column, row) == Some(kind))
    }

    /// Expands the room into a padded game tilemap.
    #[must_use]
    pub fn expand(&self, grid_size: GridSize) -> GameTilemap {
        expand(&self.tiles, grid_size)
    }
}

impl Default for RoomTiles {
    fn default() -> Self {
        Self {
            tiles: [TileType::Void; ROOM_TILE_COUNT],
        }
    }
}
