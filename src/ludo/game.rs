//! Ludo turn scheduling.
//!
//! A Ludo turn is roll, select a token, move. The game never decides on its
//! own whether a roll has a legal move: [`LudoGame::movable_tokens`] lists
//! candidates, and the caller chooses what to do when there are none.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::board::{LudoBoard, LudoMoveLog};
use super::color::PlayerColor;
use super::token::{Token, TokenRef, TokenSet, TOKENS_PER_PLAYER};
use crate::core::{
    order_by_age, Dice, DiceRoll, DiceSource, GameError, GameRng, GameRngState, LudoConfig, PlayerId, PlayerMap,
    PlayerProfile, HOME_EXIT_ROLL,
};
use crate::events::{EventRecord, GameEvent, Observer, ObserverId};
use crate::rules::{BoardGame, TurnPhase, TurnScheduler};

const MIN_PLAYERS: usize = 2;
const MAX_PLAYERS: usize = 4;

/// A seat at the Ludo table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LudoPlayerSpec {
    pub profile: PlayerProfile,
    pub color: PlayerColor,
}

impl LudoPlayerSpec {
    pub fn new(profile: PlayerProfile, color: PlayerColor) -> Self {
        Self { profile, color }
    }
}

/// What one full `take_turn` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LudoTurnReport {
    pub player: PlayerId,
    pub roll: DiceRoll,
    /// `None` when no token was moved.
    pub log: Option<LudoMoveLog>,
    pub extra_turn: bool,
}

/// A Ludo game for 2 to 4 players on one die.
#[derive(Debug)]
pub struct LudoGame<D: DiceSource = GameRng> {
    board: LudoBoard,
    profiles: PlayerMap<PlayerProfile>,
    colors: PlayerMap<PlayerColor>,
    tokens: PlayerMap<TokenSet>,
    selected: Option<u8>,
    dice: Dice<D>,
    config: LudoConfig,
    turn: TurnScheduler,
}

impl LudoGame<GameRng> {
    pub fn new(players: Vec<LudoPlayerSpec>, config: LudoConfig) -> Result<Self, GameError> {
        let rng = GameRng::new(config.seed);
        Self::with_dice(players, config, rng)
    }

    /// Resume a snapshot, continuing its dice stream where it stopped.
    pub fn restore(snapshot: LudoSnapshot) -> Result<Self, GameError> {
        let rng = snapshot
            .dice
            .as_ref()
            .map_or_else(|| GameRng::new(snapshot.config.seed), GameRng::from_state);
        Self::resume(snapshot, rng)
    }
}

impl<D: DiceSource> LudoGame<D> {
    /// Seats players youngest first with all tokens at home.
    pub fn with_dice(players: Vec<LudoPlayerSpec>, config: LudoConfig, source: D) -> Result<Self, GameError> {
        check_seats(&players)?;
        let dice = Dice::new(1, source)?;
        let players = order_by_age(players, |p| p.profile.age);

        let mut board = LudoBoard::new(config.loop_size);
        let tokens: Vec<TokenSet> = players
            .iter()
            .enumerate()
            .map(|(seat, spec)| board.spawn_tokens(PlayerId::new(seat as u8), spec.color))
            .collect();

        let turn = TurnScheduler::new(players.len());
        let (profiles, colors): (Vec<_>, Vec<_>) = players.into_iter().map(|p| (p.profile, p.color)).unzip();
        Ok(Self {
            board,
            profiles: PlayerMap::from_vec(profiles),
            colors: PlayerMap::from_vec(colors),
            tokens: PlayerMap::from_vec(tokens),
            selected: None,
            dice,
            config,
            turn,
        })
    }

    /// Rebuild a game from a snapshot.
    pub fn resume(snapshot: LudoSnapshot, source: D) -> Result<Self, GameError> {
        check_seats(&snapshot.players)?;
        let count = snapshot.players.len();
        if snapshot.positions.len() != count {
            return Err(GameError::InvalidSnapshot(format!(
                "{} players but {} token sets",
                count,
                snapshot.positions.len()
            )));
        }
        let seated = |p: &PlayerId| p.index() < count;
        if !seated(&snapshot.current) || !snapshot.winner.iter().all(seated) {
            return Err(GameError::InvalidSnapshot("unknown player".to_string()));
        }
        if snapshot.selected.is_some_and(|t| usize::from(t) >= TOKENS_PER_PLAYER) {
            return Err(GameError::InvalidSnapshot("unknown selected token".to_string()));
        }

        let mut board = LudoBoard::new(snapshot.config.loop_size);
        let mut tokens = Vec::with_capacity(count);
        for (seat, (spec, positions)) in snapshot.players.iter().zip(&snapshot.positions).enumerate() {
            let owner = PlayerId::new(seat as u8);
            let mut set = board.spawn_tokens(owner, spec.color);
            for (token, &position) in set.iter_mut().zip(positions) {
                let on_path = board.path_position(spec.color, position).is_some();
                if position != token.home && !on_path {
                    return Err(GameError::InvalidSnapshot(format!(
                        "{} cannot stand on tile {}",
                        token.token_ref(),
                        position
                    )));
                }
                token.position = position;
            }
            tokens.push(set);
        }
        board.clear_occupants();
        for set in &tokens {
            for token in set {
                board.place(token.token_ref(), token.position);
            }
        }

        let dice = Dice::new(1, source)?;
        let turn = TurnScheduler::resume(count, snapshot.current, snapshot.turn_number, snapshot.winner);
        let (profiles, colors): (Vec<_>, Vec<_>) = snapshot.players.into_iter().map(|p| (p.profile, p.color)).unzip();
        Ok(Self {
            board,
            profiles: PlayerMap::from_vec(profiles),
            colors: PlayerMap::from_vec(colors),
            tokens: PlayerMap::from_vec(tokens),
            selected: snapshot.selected,
            dice,
            config: snapshot.config,
            turn,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> LudoSnapshot {
        LudoSnapshot {
            players: self
                .profiles
                .values()
                .zip(self.colors.values())
                .map(|(profile, &color)| LudoPlayerSpec::new(profile.clone(), color))
                .collect(),
            positions: self
                .tokens
                .values()
                .map(|set| set.map(|t| t.position))
                .collect(),
            current: self.turn.current_player(),
            turn_number: self.turn.turn_number(),
            winner: self.turn.winner(),
            selected: self.selected,
            config: self.config.clone(),
            dice: self.dice.checkpoint(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &LudoBoard {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &LudoConfig {
        &self.config
    }

    #[must_use]
    pub fn color(&self, player: PlayerId) -> Option<PlayerColor> {
        self.colors.get(player).copied()
    }

    #[must_use]
    pub fn tokens(&self, player: PlayerId) -> Option<&TokenSet> {
        self.tokens.get(player)
    }

    #[must_use]
    pub fn token(&self, token: TokenRef) -> Option<&Token> {
        self.tokens
            .get(token.player)
            .and_then(|set| set.get(usize::from(token.token)))
    }

    #[must_use]
    pub fn selected_token(&self) -> Option<TokenRef> {
        self.selected.map(|t| TokenRef::new(self.turn.current_player(), t))
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn.turn_number()
    }

    /// Choose which of the current player's tokens the next move applies to.
    pub fn select_token(&mut self, token: TokenRef) -> Result<(), GameError> {
        self.turn.ensure_active()?;
        let current = self.turn.current_player();
        if token.player != current {
            return Err(GameError::NotYourToken {
                owner: token.player,
                current,
            });
        }
        if usize::from(token.token) >= TOKENS_PER_PLAYER {
            return Err(GameError::UnknownToken {
                player: token.player,
                token: token.token,
            });
        }
        self.selected = Some(token.token);
        Ok(())
    }

    /// Current player's tokens that would actually move by `steps`.
    #[must_use]
    pub fn movable_tokens(&self, steps: u32) -> SmallVec<[u8; 4]> {
        let player = self.turn.current_player();
        self.tokens[player]
            .iter()
            .filter(|t| !self.board.is_home(t.position) || steps == HOME_EXIT_ROLL)
            .filter(|t| self.board.next_index(t, steps) != t.position)
            .map(|t| t.id)
            .collect()
    }

    /// Whether every token of `player` is on FINISH.
    #[must_use]
    pub fn has_finished(&self, player: PlayerId) -> bool {
        self.tokens
            .get(player)
            .is_some_and(|set| set.iter().all(|t| self.board.is_finished(t.position)))
    }

    /// Roll, let `choose` pick from the movable tokens, move it, then hand
    /// over the turn unless the roll grants another.
    ///
    /// A choice outside the movable set is treated as passing.
    pub fn take_turn(&mut self, choose: impl FnOnce(&[u8]) -> Option<u8>) -> Result<LudoTurnReport, GameError> {
        let player = self.turn.current_player();
        let roll = self.roll_individual()?;
        let movable = self.movable_tokens(roll.total());

        let log = match choose(&movable).filter(|id| movable.contains(id)) {
            Some(id) => {
                self.select_token(TokenRef::new(player, id))?;
                Some(self.move_current_player(roll.total())?)
            }
            None => {
                self.turn.clear_roll();
                None
            }
        };

        let extra_turn = !self.game_done() && self.player_gets_extra_turn(&roll);
        if !extra_turn && !self.game_done() {
            self.next_player()?;
        }

        Ok(LudoTurnReport {
            player,
            roll,
            log,
            extra_turn,
        })
    }

    fn emit_moves(&mut self, log: &LudoMoveLog) {
        self.turn.emit(GameEvent::PlayerMoved {
            player: log.token.player,
            from: log.from as u32,
            to: log.to as u32,
        });
        for capture in &log.captured {
            self.turn.emit(GameEvent::PlayerMoved {
                player: capture.token.player,
                from: capture.from as u32,
                to: capture.to as u32,
            });
        }
        self.turn.emit(GameEvent::RefreshPositions);
    }

    fn check_winner(&mut self) {
        let winner = PlayerId::all(self.tokens.player_count()).find(|&p| self.has_finished(p));
        if let Some(winner) = winner {
            self.turn.declare_winner(winner);
        }
    }
}

impl<D: DiceSource> BoardGame for LudoGame<D> {
    type MoveLog = LudoMoveLog;

    fn players(&self) -> &[PlayerProfile] {
        self.profiles.as_slice()
    }

    fn current_player(&self) -> PlayerId {
        self.turn.current_player()
    }

    fn roll_individual(&mut self) -> Result<DiceRoll, GameError> {
        self.turn.ensure_active()?;
        let roll = self.dice.roll_each();
        self.turn.record_roll(roll.clone());
        Ok(roll)
    }

    /// Move the selected token. A move that goes nowhere (blocked by a safe
    /// cell, or already on FINISH) is not an error; the log reports it.
    ///
    /// A resolved move consumes the selection.
    fn move_current_player(&mut self, steps: u32) -> Result<LudoMoveLog, GameError> {
        self.turn.ensure_active()?;
        if steps == 0 {
            return Err(GameError::ZeroSteps);
        }
        let id = self.selected.ok_or(GameError::NoTokenSelected)?;
        let player = self.turn.current_player();
        let token = self.tokens[player][usize::from(id)];
        if self.board.is_home(token.position) && steps != HOME_EXIT_ROLL {
            return Err(GameError::HomeExitRequiresSix {
                required: HOME_EXIT_ROLL,
                rolled: steps,
            });
        }

        let destination = self.board.next_index(&token, steps);
        self.turn.clear_roll();
        self.selected = None;
        if destination == token.position {
            return Ok(LudoMoveLog::stay(token.token_ref(), token.position));
        }

        let log = self.board.move_token(&mut self.tokens, token.token_ref(), destination);
        self.emit_moves(&log);
        self.check_winner();
        Ok(log)
    }

    /// A 6 grants another roll, whether or not it can be used.
    fn player_gets_extra_turn(&mut self, roll: &DiceRoll) -> bool {
        !self.turn.is_over() && roll.total() == HOME_EXIT_ROLL
    }

    fn next_player(&mut self) -> Result<PlayerId, GameError> {
        let next = self.turn.advance()?;
        self.selected = None;
        Ok(next)
    }

    fn winner(&self) -> Option<PlayerId> {
        self.turn.winner()
    }

    fn phase(&self) -> TurnPhase {
        let player = self.turn.current_player();
        if let Some(winner) = self.turn.winner() {
            return TurnPhase::GameOver { winner };
        }
        match (self.turn.last_roll(), self.selected) {
            (None, _) => TurnPhase::AwaitingRoll { player },
            (Some(roll), Some(_)) => TurnPhase::Resolving {
                player,
                steps: Some(roll.total()),
            },
            (Some(roll), None) => TurnPhase::TokenSelection {
                player,
                roll: roll.total(),
                movable: self.movable_tokens(roll.total()),
            },
        }
    }

    fn subscribe(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        self.turn.subscribe(observer)
    }

    fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.turn.unsubscribe(id)
    }

    fn events(&self) -> &Vector<EventRecord> {
        self.turn.history()
    }
}

fn check_seats(players: &[LudoPlayerSpec]) -> Result<(), GameError> {
    let got = players.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&got) {
        return Err(GameError::InvalidPlayerCount {
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
            got,
        });
    }
    for (i, spec) in players.iter().enumerate() {
        if players[..i].iter().any(|other| other.color == spec.color) {
            return Err(GameError::DuplicateColor(spec.color.name()));
        }
    }
    Ok(())
}

/// Serializable state of a [`LudoGame`] between turns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudoSnapshot {
    /// Seats in turn order.
    pub players: Vec<LudoPlayerSpec>,
    /// Arena index of every token, per seat.
    pub positions: Vec<[usize; TOKENS_PER_PLAYER]>,
    pub current: PlayerId,
    pub turn_number: u32,
    pub winner: Option<PlayerId>,
    pub selected: Option<u8>,
    pub config: LudoConfig,
    pub dice: Option<GameRngState>,
}
