#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player heading rotation and the step proofs submitted when a level ends.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use underdark_core::Direction;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Rotates a heading a quarter turn clockwise.
///
/// Level directions have no heading in the plane and are returned unchanged.
#[must_use]
pub const fn turn_right(facing: Direction) -> Direction {
    match facing {
        Direction::North => Direction::East,
        Direction::East => Direction::South,
        Direction::South => Direction::West,
        Direction::West => Direction::North,
        Direction::Over | Direction::Under => facing,
    }
}

/// Rotates a heading a quarter turn counter-clockwise.
#[must_use]
pub const fn turn_left(facing: Direction) -> Direction {
    match facing {
        Direction::North => Direction::West,
        Direction::West => Direction::South,
        Direction::South => Direction::East,
        Direction::East => Direction::North,
        Direction::Over | Direction::Under => facing,
    }
}

/// Errors raised while recording steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StepProofError {
    /// The proof already holds [`StepProof::MAX_STEPS`] steps.
    #[error("step proof is full after {} steps", StepProof::MAX_STEPS)]
    Full,
}

/// Ordered record of the directions a player walked through a level.
///
/// The proof packs into an integer where step `i` occupies the four bits
/// starting at `i * 4`, so the first step is the least significant nibble.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Direction>", into = "Vec<Direction>")]
pub struct StepProof {
    steps: Vec<Direction>,
}

impl StepProof {
    /// Most steps a level allows before the player is caught.
    pub const MAX_STEPS: usize = 64;

    /// Creates an empty proof.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn push(&mut self, direction: Direction) -> Result<(), StepProofError> {
        if self.steps.len() >= Self::MAX_STEPS {
            return Err(StepProofError::Full);
        }
        self.steps.push(direction);
        Ok(())
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Reports whether no step was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Recorded steps in walking order.
    #[must_use]
    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    /// Packed proof as `0x`-prefixed hexadecimal without leading zeros.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let digits: String = self
            .steps
            .iter()
            .rev()
            .map(|step| char::from(HEX_DIGITS[usize::from(step.code())]))
            .skip_while(|&digit| digit == '0')
            .collect();
        if digits.is_empty() {
            "0x0".to_owned()
        } else {
            format!("0x{digits}")
        }
    }
}

impl TryFrom<Vec<Direction>> for StepProof {
    type Error = StepProofError;

    fn try_from(steps: Vec<Direction>) -> Result<Self, Self::Error> {
        if steps.len() > Self::MAX_STEPS {
            return Err(StepProofError::Full);
        }
        Ok(Self { steps })
    }
}

impl From<StepProof> for Vec<Direction> {
    fn from(proof: StepProof) -> Self {
        proof.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_cycles_through_compass_points() {
        let mut facing = Direction::North;
        for expected in [
            Direction::East,
            Direction::South,
            Direction::West,
            Direction::North,
        ] {
            facing = turn_right(facing);
            assert_eq!(facing, expected);
        }
        for direction in Direction::ALL {
            assert_eq!(turn_left(turn_right(direction)), direction);
        }
    }

    #[test]
    fn vertical_directions_do_not_turn() {
        assert_eq!(turn_right(Direction::Over), Direction::Over);
        assert_eq!(turn_left(Direction::Under), Direction::Under);
    }

    #[test]
    fn proof_packs_first_step_lowest() {
        let proof = StepProof::try_from(vec![Direction::North, Direction::East, Direction::South])
            .expect("within limit");
        assert_eq!(proof.to_hex(), "0x310");
        assert_eq!(proof.len(), 3);
    }

    #[test]
    fn north_only_proof_is_zero() {
        let proof = StepProof::try_from(vec![Direction::North; 5]).expect("within limit");
        assert_eq!(proof.to_hex(), "0x0");
        assert_eq!(StepProof::new().to_hex(), "0x0");
        assert!(StepProof::new().is_empty());
    }

    #[test]
    fn proof_refuses_steps_past_limit() {
        let mut proof = StepProof::new();
        for _ in 0..StepProof::MAX_STEPS {
            proof.push(Direction::West).expect("room for step");
        }
        assert_eq!(proof.push(Direction::West), Err(StepProofError::Full));
        assert_eq!(proof.to_hex().len(), 2 + StepProof::MAX_STEPS);
        assert_eq!(
            StepProof::try_from(vec![Direction::East; 65]),
            Err(StepProofError::Full)
        );
    }
}
