//! Player identification, profiles and per-player storage.
//!
//! ## PlayerId
//!
//! A player's seat in turn order. Seats are assigned once at game
//! construction, after sorting players by age (youngest first).
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec`, indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::GameError;

/// Seat of a player in turn order (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All seats of a game with `player_count` players, in turn order.
    ///
    /// ```
    /// use tileboard::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Cosmetic marker a player picks at setup. The engine never reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerIcon {
    #[default]
    TopHat,
    Cat,
    Dog,
    Car,
    Boat,
}

impl PlayerIcon {
    pub const ALL: [PlayerIcon; 5] = [
        PlayerIcon::TopHat,
        PlayerIcon::Cat,
        PlayerIcon::Dog,
        PlayerIcon::Car,
        PlayerIcon::Boat,
    ];

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            PlayerIcon::TopHat => "🎩",
            PlayerIcon::Cat => "🐱",
            PlayerIcon::Dog => "🐶",
            PlayerIcon::Car => "🚗",
            PlayerIcon::Boat => "⛵",
        }
    }
}

/// Who a player is, independent of any board.
///
/// `age` only seeds turn order: younger players move first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub age: u32,
    pub icon: PlayerIcon,
}

impl PlayerProfile {
    /// Create a profile. Blank names are rejected.
    pub fn new(name: impl Into<String>, age: u32) -> Result<Self, GameError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::BlankName);
        }
        Ok(Self {
            name,
            age,
            icon: PlayerIcon::default(),
        })
    }

    #[must_use]
    pub fn with_icon(mut self, icon: PlayerIcon) -> Self {
        self.icon = icon;
        self
    }
}

/// Sort items into turn order by age, youngest first.
///
/// The sort is stable: players of equal age keep their submitted order.
pub fn order_by_age<T>(mut players: Vec<T>, age: impl Fn(&T) -> u32) -> Vec<T> {
    players.sort_by_key(|p| age(p));
    players
}

/// Per-player data with O(1) access by `PlayerId`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat from a factory.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Take ownership of entries already in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Checked lookup for ids that come from outside the engine.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
