//! Dice abstraction.
//!
//! The engine never decides faces itself. It pulls them from a
//! [`DiceSource`], so a game can run on seeded randomness ([`GameRng`]),
//! on a fixed script ([`ScriptedDice`]) for replays and tests, or on any
//! consumer-supplied source.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::GameError;
use super::rng::{GameRng, GameRngState};

/// Faces on every die.
pub const DIE_FACES: u8 = 6;

/// Supplier of single die faces in `1..=DIE_FACES`.
pub trait DiceSource {
    /// Roll one die.
    fn roll_die(&mut self) -> u8;

    /// Stream position, for sources that can be resumed from a snapshot.
    fn checkpoint(&self) -> Option<GameRngState> {
        None
    }
}

impl DiceSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.roll_face(DIE_FACES)
    }

    fn checkpoint(&self) -> Option<GameRngState> {
        Some(self.state())
    }
}

/// Cycles through a fixed list of faces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// Script must be non-empty and every face in `1..=6`.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Result<Self, GameError> {
        let faces: Vec<u8> = faces.into_iter().collect();
        if faces.is_empty() || faces.iter().any(|f| !(1..=DIE_FACES).contains(f)) {
            return Err(GameError::InvalidScript(faces));
        }
        Ok(Self { faces, cursor: 0 })
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        let face = self.faces[self.cursor];
        self.cursor = (self.cursor + 1) % self.faces.len();
        face
    }
}

/// Faces of one roll, one entry per die.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    faces: SmallVec<[u8; 4]>,
}

impl DiceRoll {
    #[must_use]
    pub fn from_faces(faces: &[u8]) -> Self {
        Self {
            faces: SmallVec::from_slice(faces),
        }
    }

    #[must_use]
    pub fn faces(&self) -> &[u8] {
        &self.faces
    }

    /// Sum of all faces.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.faces.iter().map(|&f| u32::from(f)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// A fixed number of dice rolled together from one source.
#[derive(Clone, Debug)]
pub struct Dice<S> {
    count: usize,
    source: S,
}

impl<S: DiceSource> Dice<S> {
    pub fn new(count: usize, source: S) -> Result<Self, GameError> {
        if count == 0 {
            return Err(GameError::InvalidDiceCount(count));
        }
        Ok(Self { count, source })
    }

    /// Roll every die once.
    pub fn roll_each(&mut self) -> DiceRoll {
        let faces = (0..self.count).map(|_| self.source.roll_die()).collect();
        DiceRoll { faces }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn checkpoint(&self) -> Option<GameRngState> {
        self.source.checkpoint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_dice_cycle() {
        let mut dice = ScriptedDice::new([3, 6]).unwrap();
        let rolled: Vec<_> = (0..5).map(|_| dice.roll_die()).collect();
        assert_eq!(rolled, vec![3, 6, 3, 6, 3]);
    }

    #[test]
    fn test_scripted_dice_rejects_bad_faces() {
        assert_eq!(ScriptedDice::new(Vec::new()), Err(GameError::InvalidScript(vec![])));
        assert_eq!(ScriptedDice::new([0, 2]), Err(GameError::InvalidScript(vec![0, 2])));
        assert!(ScriptedDice::new([7]).is_err());
    }

    #[test]
    fn test_dice_roll_each_counts_dice() {
        let mut dice = Dice::new(2, ScriptedDice::new([6, 5]).unwrap()).unwrap();
        let roll = dice.roll_each();
        assert_eq!(roll.faces(), &[6, 5]);
        assert_eq!(roll.total(), 11);
        assert_eq!(roll.len(), 2);
    }

    #[test]
    fn test_dice_needs_one_die() {
        assert!(matches!(
            Dice::new(0, GameRng::new(1)),
            Err(GameError::InvalidDiceCount(0))
        ));
    }

    #[test]
    fn test_checkpoint_only_for_rng() {
        let rng_dice = Dice::new(1, GameRng::new(9)).unwrap();
        assert!(rng_dice.checkpoint().is_some());

        let scripted = Dice::new(1, ScriptedDice::new([1]).unwrap()).unwrap();
        assert!(scripted.checkpoint().is_none());
    }

    #[test]
    fn test_rng_dice_faces_in_range() {
        let mut dice = Dice::new(3, GameRng::new(11)).unwrap();
        for _ in 0..50 {
            let roll = dice.roll_each();
            assert_eq!(roll.len(), 3);
            assert!(roll.faces().iter().all(|f| (1..=DIE_FACES).contains(f)));
            assert!((3..=18).contains(&roll.total()));
        }
    }
}
