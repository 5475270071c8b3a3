#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spatial addressing contracts shared across the Underdark crates.
//!
//! A dungeon position is described by a sparse [`Compass`] that counts steps
//! along each axis from a shared origin. Compasses pack into a single
//! fixed-width [`Coord`] that the rest of the system stores and transmits,
//! and render into a compact human-readable slug. Systems consume these
//! values together with the [`Direction`] and [`TileType`] enumerations that
//! describe room layouts.

mod compass;
mod coord;
mod slug;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use compass::{
    offset_compass, sanitize_compass, validate_compass, Compass, CompassError,
};
pub use coord::{
    compass_to_coord, coord_to_compass, offset_coord, Coord, CoordParseError, LANE_BITS,
    LANE_MASK,
};
pub use slug::{compass_to_slug, coord_to_slug, SlugSeparator};

/// Width and height of a source room definition, measured in tiles.
pub const ROOM_SIDE: usize = 16;

/// Number of tiles contained in a source room definition.
pub const ROOM_TILE_COUNT: usize = ROOM_SIDE * ROOM_SIDE;

/// Axes along which a position may move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North = 0,
    /// Movement toward increasing column indices.
    East = 1,
    /// Movement toward decreasing column indices.
    West = 2,
    /// Movement toward increasing row indices.
    South = 3,
    /// Movement up one level.
    Over = 4,
    /// Movement down one level.
    Under = 5,
}

impl Direction {
    /// Every direction ordered by wire code.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::Over,
        Direction::Under,
    ];

    /// Returns the direction pointing the opposite way along the same axis.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::South => Self::North,
            Self::Over => Self::Under,
            Self::Under => Self::Over,
        }
    }

    /// Reports whether the direction lies in the plane of a room.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }

    /// Reports whether the direction moves between levels.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Over | Self::Under)
    }

    /// Wire code of the direction.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Resolves a wire code back into a direction.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::North),
            1 => Some(Self::East),
            2 => Some(Self::West),
            3 => Some(Self::South),
            4 => Some(Self::Over),
            5 => Some(Self::Under),
            _ => None,
        }
    }

    /// Human-readable name of the direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::East => "East",
            Self::West => "West",
            Self::South => "South",
            Self::Over => "Over",
            Self::Under => "Under",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantics attached to a single room tile.
///
/// Codes below `0x10` are shared with the crawler SDK, the `0x1x` range is
/// specific to Underdark and `Empty`/`Path` only ever appear in expanded
/// game tilemaps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileType {
    /// Solid rock.
    #[default]
    Void = 0x00,
    /// Door the player enters the room through.
    Entry = 0x01,
    /// Door leading to the next level.
    Exit = 0x02,
    /// Exit that stays closed until unlocked.
    LockedExit = 0x03,
    /// Collectible gem.
    Gem = 0x04,
    /// Closed floor hatch.
    HatchClosed = 0x05,
    /// Open hatch leading down.
    HatchDown = 0x06,
    /// Open hatch leading up.
    HatchUp = 0x07,
    /// Monster occupying the tile.
    Monster = 0x10,
    /// Slender duck lurking on the tile.
    SlenderDuck = 0x11,
    /// Pool of dark tar.
    DarkTar = 0x12,
    /// Synthetic walkable marker.
    Empty = 0xfe,
    /// Synthetic path marker placed inboard of relocated doors.
    Path = 0xff,
}

impl TileType {
    /// Numeric code of the tile type.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Reports whether the tile is a door that expansion may relocate.
    #[must_use]
    pub const fn is_door(self) -> bool {
        matches!(self, Self::Entry | Self::Exit | Self::LockedExit)
    }

    /// Reports whether the tile only exists in expanded tilemaps.
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        matches!(self, Self::Empty | Self::Path)
    }
}

impl TryFrom<u8> for TileType {
    type Error = TileTypeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        let tile = match code {
            0x00 => Self::Void,
            0x01 => Self::Entry,
            0x02 => Self::Exit,
            0x03 => Self::LockedExit,
            0x04 => Self::Gem,
            0x05 => Self::HatchClosed,
            0x06 => Self::HatchDown,
            0x07 => Self::HatchUp,
            0x10 => Self::Monster,
            0x11 => Self::SlenderDuck,
            0x12 => Self::DarkTar,
            0xfe => Self::Empty,
            0xff => Self::Path,
            other => return Err(TileTypeError::UnknownCode(other)),
        };
        Ok(tile)
    }
}

/// Errors raised while decoding tile codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TileTypeError {
    /// The code does not correspond to any tile type.
    #[error("unknown tile code {0:#04x}")]
    UnknownCode(u8),
}

/// Location and heading of the player inside a source room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row-major index into the 16x16 source grid.
    pub tile: u8,
    /// Direction the player is facing.
    pub facing: Direction,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(tile: u8, facing: Direction) -> Self {
        Self { tile, facing }
    }

    /// Column of the tile within the source grid.
    #[must_use]
    pub const fn column(&self) -> u8 {
        self.tile % ROOM_SIDE as u8
    }

    /// Row of the tile within the source grid.
    #[must_use]
    pub const fn row(&self) -> u8 {
        self.tile / ROOM_SIDE as u8
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Position, TileType, TileTypeError};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn flip_pairs_opposite_axes() {
        assert_eq!(Direction::North.flip(), Direction::South);
        assert_eq!(Direction::East.flip(), Direction::West);
        assert_eq!(Direction::Over.flip(), Direction::Under);
        for direction in Direction::ALL {
            assert_eq!(direction.flip().flip(), direction);
        }
    }

    #[test]
    fn direction_codes_resolve_back() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_code(direction.code()), Some(direction));
        }
        assert_eq!(Direction::from_code(6), None);
        assert_eq!(Direction::West.code(), 2);
    }

    #[test]
    fn tile_codes_match_crawler_sdk() {
        assert_eq!(TileType::Monster.code(), 0x10);
        assert_eq!(TileType::Path.code(), 0xff);
        assert_eq!(TileType::try_from(0x12), Ok(TileType::DarkTar));
        assert_eq!(
            TileType::try_from(0x08),
            Err(TileTypeError::UnknownCode(0x08))
        );
    }

    #[test]
    fn only_entry_and_exits_are_doors() {
        assert!(TileType::Entry.is_door());
        assert!(TileType::LockedExit.is_door());
        assert!(!TileType::HatchDown.is_door());
        assert!(TileType::Path.is_synthetic());
        assert!(!TileType::Gem.is_synthetic());
    }

    #[test]
    fn position_splits_tile_into_column_and_row() {
        let position = Position::new(0x2f, Direction::West);
        assert_eq!(position.column(), 15);
        assert_eq!(position.row(), 2);
    }

    #[test]
    fn position_round_trips_through_bincode() {
        assert_round_trip(&Position::new(17, Direction::Under));
    }
}
