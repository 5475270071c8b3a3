//! Packed integer encoding of a [`Compass`].

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{Compass, CompassError, Direction};

/// Width of every lane in a packed coordinate.
pub const LANE_BITS: u32 = 16;

/// Mask isolating a single lane once shifted down to bit zero.
pub const LANE_MASK: u128 = 0xffff;

/// Single integer addressing a position across realms, rooms and levels.
///
/// Eight 16-bit lanes are packed most-significant first: realm, room, over,
/// under, north, east, west, south. The layout is persisted by consumers of
/// coordinates and must not change. [`Coord::EMPTY`] stands for "no valid
/// position".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord(u128);

impl Coord {
    /// Coordinate that addresses no position.
    pub const EMPTY: Self = Self(0);

    /// Wraps a raw packed value.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Raw packed value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Reports whether the coordinate is the empty sentinel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Decodes the coordinate, yielding `None` for out-of-invariant patterns.
    #[must_use]
    pub fn to_compass(self) -> Option<Compass> {
        let mut lanes = [0_u16; 8];
        for (index, lane) in lanes.iter_mut().enumerate() {
            let shift = lane_shift(index);
            // Masked to 16 bits, so the narrowing cannot lose information.
            *lane = ((self.0 >> shift) & LANE_MASK) as u16;
        }
        Compass::from_lanes(lanes).sanitized()
    }

    /// Moves the addressed position one step along `direction`.
    ///
    /// Returns [`Coord::EMPTY`] when the coordinate does not decode or the
    /// step leaves the valid range.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        match self.to_compass().and_then(|compass| compass.offset(direction)) {
            Some(compass) => compass.to_coord(),
            None => {
                tracing::debug!(coord = %self, %direction, "offset produced no valid position");
                Self::EMPTY
            }
        }
    }
}

impl Compass {
    /// Packs the compass into its coordinate, or [`Coord::EMPTY`] when invalid.
    #[must_use]
    pub fn to_coord(&self) -> Coord {
        let Some(compass) = self.sanitized() else {
            return Coord::EMPTY;
        };
        let packed = compass
            .lanes()
            .iter()
            .enumerate()
            .fold(0_u128, |packed, (index, &lane)| {
                packed | (u128::from(lane) << lane_shift(index))
            });
        Coord(packed)
    }
}

const fn lane_shift(index: usize) -> u32 {
    (7 - index as u32) * LANE_BITS
}

impl From<u128> for Coord {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Coord> for u128 {
    fn from(coord: Coord) -> Self {
        coord.0
    }
}

impl TryFrom<Coord> for Compass {
    type Error = CompassError;

    fn try_from(coord: Coord) -> Result<Self, Self::Error> {
        coord.to_compass().ok_or(CompassError::InvalidCoord(coord))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Errors that can occur while parsing coordinates from text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoordParseError {
    /// The input was empty or contained only whitespace.
    #[error("coordinate text was empty")]
    Empty,
    /// The input was not a decimal or `0x`-prefixed hexadecimal number.
    #[error("could not parse coordinate '{0}'")]
    InvalidNumber(String),
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoordParseError::Empty);
        }

        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u128::from_str_radix(hex, 16),
            None => trimmed.parse::<u128>(),
        };
        parsed
            .map(Self)
            .map_err(|_| CoordParseError::InvalidNumber(trimmed.to_owned()))
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Packs `compass`, yielding [`Coord::EMPTY`] when it is absent or invalid.
#[must_use]
pub fn compass_to_coord(compass: Option<&Compass>) -> Coord {
    compass.map_or(Coord::EMPTY, Compass::to_coord)
}

/// Decodes `coord` into a compass when it addresses a valid position.
#[must_use]
pub fn coord_to_compass(coord: Coord) -> Option<Compass> {
    coord.to_compass()
}

/// Moves `coord` one step along `direction`, [`Coord::EMPTY`] on failure.
#[must_use]
pub fn offset_coord(coord: Coord, direction: Direction) -> Coord {
    coord.offset(direction)
}
