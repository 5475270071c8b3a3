//! Consequences of the player standing on a room tile.

use serde::{Deserialize, Serialize};
use underdark_core::{Direction, Position, TileType};

use crate::RoomTiles;

/// Danger triggered by the tile the player stands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hazard {
    /// The player stepped into dark tar.
    DarkTar,
    /// The player walked into a monster.
    MonsterHit,
    /// A monster occupies an orthogonally adjacent tile.
    MonsterNear,
}

/// Everything a single step onto a tile sets off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Hazard encountered on or next to the tile.
    pub hazard: Option<Hazard>,
    /// The player stands on the exit facing south, ready to descend.
    pub reached_exit: bool,
}

/// Evaluates the tile under `position`.
///
/// Hazards are checked in priority order: tar, then a monster on the tile,
/// then a monster next to it.
#[must_use]
pub fn step_outcome(room: &RoomTiles, position: Position) -> StepOutcome {
    let tile = room.get(position.tile);
    let hazard = match tile {
        TileType::DarkTar => Some(Hazard::DarkTar),
        TileType::Monster => Some(Hazard::MonsterHit),
        _ if room.is_around(position.tile, TileType::Monster) => Some(Hazard::MonsterNear),
        _ => None,
    };
    StepOutcome {
        hazard,
        reached_exit: tile == TileType::Exit && position.facing == Direction::South,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use underdark_core::ROOM_TILE_COUNT;

    fn room_with(placements: &[(usize, TileType)]) -> RoomTiles {
        let mut tiles = [TileType::Void; ROOM_TILE_COUNT];
        for &(index, tile) in placements {
            tiles[index] = tile;
        }
        RoomTiles::new(&tiles).expect("valid room")
    }

    #[test]
    fn tar_outranks_nearby_monsters() {
        let room = room_with(&[(20, TileType::DarkTar), (21, TileType::Monster)]);
        let outcome = step_outcome(&room, Position::new(20, Direction::East));
        assert_eq!(outcome.hazard, Some(Hazard::DarkTar));
    }

    #[test]
    fn monsters_hit_or_threaten() {
        let room = room_with(&[(21, TileType::Monster)]);
        assert_eq!(
            step_outcome(&room, Position::new(21, Direction::East)).hazard,
            Some(Hazard::MonsterHit)
        );
        assert_eq!(
            step_outcome(&room, Position::new(37, Direction::North)).hazard,
            Some(Hazard::MonsterNear)
        );
        assert_eq!(
            step_outcome(&room, Position::new(40, Direction::North)),
            StepOutcome::default()
        );
    }

    #[test]
    fn exit_requires_facing_south() {
        let room = room_with(&[(250, TileType::Exit), (251, TileType::Monster)]);
        let facing_south = step_outcome(&room, Position::new(250, Direction::South));
        assert!(facing_south.reached_exit);
        assert_eq!(facing_south.hazard, Some(Hazard::MonsterNear));
        assert!(!step_outcome(&room, Position::new(250, Direction::West)).reached_exit);
    }
}
