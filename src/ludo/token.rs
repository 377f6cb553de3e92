use std::fmt;

use serde::{Deserialize, Serialize};

use super::color::PlayerColor;
use crate::core::PlayerId;

/// Tokens each player owns.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Identifies one token: owner seat plus token id `0..4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub player: PlayerId,
    pub token: u8,
}

impl TokenRef {
    #[must_use]
    pub const fn new(player: PlayerId, token: u8) -> Self {
        Self { player, token }
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} token {}", self.player, self.token)
    }
}

/// A token and where it stands.
///
/// Positions are tile indices into the board arena. `home` is the HOME cell
/// the token returns to when captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: u8,
    pub owner: PlayerId,
    pub color: PlayerColor,
    pub home: usize,
    pub position: usize,
}

impl Token {
    #[must_use]
    pub fn token_ref(&self) -> TokenRef {
        TokenRef::new(self.owner, self.id)
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.position == self.home
    }
}

/// One player's full set of tokens.
pub type TokenSet = [Token; TOKENS_PER_PLAYER];
