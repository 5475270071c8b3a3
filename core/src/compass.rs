//! Sparse multi-axis position descriptor and the invariants guarding it.

use std::num::NonZeroU16;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coord, Direction};

/// Position relative to a shared origin, counted in steps along each axis.
///
/// Every field is optional and an absent field is the only way to express
/// zero, so no construction path can observe an explicit zero. A compass is
/// only a valid position when exactly one of `north`/`south` and exactly one
/// of `east`/`west` is present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compass {
    #[serde(default)]
    realm_id: Option<NonZeroU16>,
    #[serde(default)]
    room_id: Option<NonZeroU16>,
    #[serde(default)]
    over: Option<NonZeroU16>,
    #[serde(default)]
    under: Option<NonZeroU16>,
    #[serde(default)]
    north: Option<NonZeroU16>,
    #[serde(default)]
    east: Option<NonZeroU16>,
    #[serde(default)]
    west: Option<NonZeroU16>,
    #[serde(default)]
    south: Option<NonZeroU16>,
}

/// Errors reported by the `Result`-flavoured compass conversions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CompassError {
    /// North/south or east/west did not hold exactly one present field.
    #[error("compass must hold exactly one of north/south and exactly one of east/west")]
    InvalidAxes,
    /// The coordinate decoded into a compass that violates the axis rules.
    #[error("coordinate {0} does not describe a valid position")]
    InvalidCoord(Coord),
}

macro_rules! axis {
    ($field:ident, $with:ident, $doc:literal) => {
        #[doc = concat!("Steps ", $doc, ", or zero when absent.")]
        #[must_use]
        pub const fn $field(&self) -> u16 {
            match self.$field {
                Some(value) => value.get(),
                None => 0,
            }
        }

        #[doc = concat!("Sets the steps ", $doc, "; zero clears the field.")]
        #[must_use]
        pub const fn $with(mut self, value: u16) -> Self {
            self.$field = NonZeroU16::new(value);
            self
        }
    };
}

impl Compass {
    axis!(realm_id, with_realm_id, "identifying the realm");
    axis!(room_id, with_room_id, "identifying the room");
    axis!(over, with_over, "above the origin level");
    axis!(under, with_under, "below the origin level");
    axis!(north, with_north, "north of the origin");
    axis!(east, with_east, "east of the origin");
    axis!(west, with_west, "west of the origin");
    axis!(south, with_south, "south of the origin");

    /// Reports whether the compass satisfies the axis-exclusivity rules.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        exactly_one(self.north, self.south) && exactly_one(self.east, self.west)
    }

    /// Returns a canonical copy, or `None` when the compass is invalid.
    #[must_use]
    pub fn sanitized(&self) -> Option<Self> {
        if !self.is_valid() {
            tracing::debug!(compass = ?self, "rejected compass with invalid axes");
            return None;
        }
        Some(*self)
    }

    /// Like [`Compass::sanitized`], reporting failure as an error.
    pub fn validated(&self) -> Result<Self, CompassError> {
        self.sanitized().ok_or(CompassError::InvalidAxes)
    }

    /// Moves one step along `direction`.
    ///
    /// A step first consumes the opposing field on the same axis and only
    /// then grows the field facing `direction`, so the result never holds
    /// both senses. Leaving a unit opposing field crosses straight to one
    /// step on the other side since axes have no zero row. Returns `None`
    /// when `self` or the outcome is not a valid position, or a field would
    /// overflow its 16-bit lane.
    #[must_use]
    pub fn offset(&self, direction: Direction) -> Option<Self> {
        if !self.is_valid() {
            tracing::debug!(compass = ?self, %direction, "refusing to move an invalid compass");
            return None;
        }
        let mut result = *self;
        let stepped = match direction {
            Direction::North => step(&mut result.north, &mut result.south),
            Direction::South => step(&mut result.south, &mut result.north),
            Direction::East => step(&mut result.east, &mut result.west),
            Direction::West => step(&mut result.west, &mut result.east),
            Direction::Over => step(&mut result.over, &mut result.under),
            Direction::Under => step(&mut result.under, &mut result.over),
        };
        stepped?;
        result.sanitized()
    }

    pub(crate) const fn lanes(&self) -> [u16; 8] {
        [
            self.realm_id(),
            self.room_id(),
            self.over(),
            self.under(),
            self.north(),
            self.east(),
            self.west(),
            self.south(),
        ]
    }

    pub(crate) const fn from_lanes(lanes: [u16; 8]) -> Self {
        let [realm_id, room_id, over, under, north, east, west, south] = lanes;
        Self {
            realm_id: NonZeroU16::new(realm_id),
            room_id: NonZeroU16::new(room_id),
            over: NonZeroU16::new(over),
            under: NonZeroU16::new(under),
            north: NonZeroU16::new(north),
            east: NonZeroU16::new(east),
            west: NonZeroU16::new(west),
            south: NonZeroU16::new(south),
        }
    }
}

const fn exactly_one(a: Option<NonZeroU16>, b: Option<NonZeroU16>) -> bool {
    a.is_some() != b.is_some()
}

fn step(toward: &mut Option<NonZeroU16>, away: &mut Option<NonZeroU16>) -> Option<()> {
    match *away {
        Some(value) if value.get() > 1 => *away = NonZeroU16::new(value.get() - 1),
        _ => {
            *away = None;
            *toward = Some(match *toward {
                Some(value) => value.checked_add(1)?,
                None => NonZeroU16::MIN,
            });
        }
    }
    Some(())
}

/// Reports whether `compass` is present and satisfies the axis rules.
#[must_use]
pub fn validate_compass(compass: Option<&Compass>) -> bool {
    compass.is_some_and(Compass::is_valid)
}

/// Canonical copy of `compass`, or `None` when it is absent or invalid.
#[must_use]
pub fn sanitize_compass(compass: Option<&Compass>) -> Option<Compass> {
    compass.and_then(Compass::sanitized)
}

/// Moves `compass` one step along `direction`.
#[must_use]
pub fn offset_compass(compass: Option<&Compass>, direction: Direction) -> Option<Compass> {
    compass.and_then(|compass| compass.offset(direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn north_east(north: u16, east: u16) -> Compass {
        Compass::default().with_north(north).with_east(east)
    }

    #[test]
    fn zero_builders_leave_fields_absent() {
        let compass = north_east(3, 0).with_south(0);
        assert_eq!(compass.east(), 0);
        assert_eq!(compass, Compass::default().with_north(3));
    }

    #[test]
    fn validation_requires_one_field_per_axis() {
        assert!(north_east(1, 1).is_valid());
        assert!(Compass::default().with_south(2).with_west(9).is_valid());
        assert!(!north_east(1, 1).with_south(1).is_valid());
        assert!(!north_east(1, 1).with_west(4).is_valid());
        assert!(!Compass::default().with_north(1).is_valid());
        assert!(!Compass::default()
            .with_realm_id(1)
            .with_room_id(2)
            .with_under(3)
            .is_valid());
    }

    #[test]
    fn null_compass_never_validates() {
        assert!(!validate_compass(None));
        assert_eq!(sanitize_compass(None), None);
        assert_eq!(offset_compass(None, Direction::North), None);
    }

    #[test]
    fn validated_reports_invalid_axes() {
        assert_eq!(
            Compass::default().with_east(1).validated(),
            Err(CompassError::InvalidAxes)
        );
        assert_eq!(north_east(2, 2).validated(), Ok(north_east(2, 2)));
    }

    #[test]
    fn offset_grows_same_sense_field() {
        let moved = north_east(3, 7).offset(Direction::North).expect("valid");
        assert_eq!(moved, north_east(4, 7));
        let moved = north_east(3, 7).offset(Direction::Under).expect("valid");
        assert_eq!(moved.under(), 1);
        assert_eq!(moved.over(), 0);
    }

    #[test]
    fn offset_rejects_invalid_start() {
        let half = Compass::default().with_north(1);
        assert_eq!(half.offset(Direction::East), None);
        assert_eq!(offset_compass(Some(&half), Direction::East), None);
        assert_eq!(north_east(1, 1).with_south(2).offset(Direction::North), None);
    }

    #[test]
    fn offset_consumes_opposing_field_first() {
        let start = Compass::default().with_south(3).with_east(1);
        let moved = start.offset(Direction::North).expect("valid");
        assert_eq!(moved.south(), 2);
        assert_eq!(moved.north(), 0);
    }

    #[test]
    fn offset_crosses_from_unit_opposing_field() {
        let start = Compass::default().with_south(1).with_west(1);
        let moved = start.offset(Direction::North).expect("valid");
        assert_eq!(moved, Compass::default().with_north(1).with_west(1));
        let moved = moved.offset(Direction::East).expect("valid");
        assert_eq!(moved, north_east(1, 1));
    }

    #[test]
    fn offset_rejects_invalid_results() {
        assert_eq!(Compass::default().with_north(1).offset(Direction::North), None);
        assert_eq!(north_east(u16::MAX, 1).offset(Direction::North), None);
    }

    #[test]
    fn offset_keeps_room_and_realm() {
        let start = north_east(1, 1).with_realm_id(4).with_room_id(9);
        let moved = start.offset(Direction::West).expect("valid");
        assert_eq!(moved.realm_id(), 4);
        assert_eq!(moved.room_id(), 9);
        assert_eq!(moved.west(), 1);
        assert_eq!(moved.east(), 0);
    }
}
