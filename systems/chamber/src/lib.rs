#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Room identity helpers that address room levels within a realm.

use serde::{Deserialize, Serialize};
use underdark_core::{Compass, Coord};

const DEFAULT_REALM_ID: u16 = 1;

/// Reference point every room's chamber coordinate is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChamberOrigin {
    /// Realm that owns the rooms.
    pub realm_id: u16,
    /// Coordinate of the manor the rooms hang off.
    pub manor: Coord,
}

impl ChamberOrigin {
    /// Creates an origin from a realm and manor coordinate.
    #[must_use]
    pub const fn new(realm_id: u16, manor: Coord) -> Self {
        Self { realm_id, manor }
    }

    /// Coordinate of the requested room level.
    ///
    /// The manor's position is kept and tagged with the realm, the room and
    /// `level` steps under. Returns [`Coord::EMPTY`] when the manor
    /// coordinate is not a valid position.
    #[must_use]
    pub fn chamber_id(&self, room_id: u16, level: u16) -> Coord {
        let Some(manor) = self.manor.to_compass() else {
            tracing::debug!(manor = %self.manor, "manor coordinate is not a valid position");
            return Coord::EMPTY;
        };
        manor
            .with_realm_id(self.realm_id)
            .with_room_id(room_id)
            .with_under(level)
            .to_coord()
    }
}

impl Default for ChamberOrigin {
    fn default() -> Self {
        Self {
            realm_id: DEFAULT_REALM_ID,
            manor: Compass::default().with_north(1).with_east(1).to_coord(),
        }
    }
}

/// Display name of a room level.
#[must_use]
pub fn room_name(room_id: u16, level: u16) -> String {
    format!("Room #{room_id} Level {level}")
}

/// Client route of a room level; the first level has no level segment.
#[must_use]
pub fn room_url(room_id: u16, level: u16) -> String {
    if level > 1 {
        format!("/room/{room_id}/{level}")
    } else {
        format!("/room/{room_id}")
    }
}
