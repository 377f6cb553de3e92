//! Snakes & Ladders turn scheduling.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board::{LinearBoard, MoveLog};
use super::pawn::Pawn;
use super::tile::TileId;
use crate::core::{
    order_by_age, Dice, DiceRoll, DiceSource, GameError, GameRng, GameRngState, PlayerId, PlayerMap,
    PlayerProfile, SnakesConfig,
};
use crate::events::{EventRecord, GameEvent, Observer, ObserverId};
use crate::rules::{BoardGame, TurnPhase, TurnScheduler};

const MIN_PLAYERS: usize = 2;
const MAX_PLAYERS: usize = u8::MAX as usize;

/// What one full `take_turn` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerId,
    pub roll: DiceRoll,
    pub log: MoveLog,
    /// The same player rolls again.
    pub extra_turn: bool,
}

/// A Snakes & Ladders game.
///
/// Players are seated youngest first and all start on tile 1. Dice come from
/// `D`; the default is a seeded [`GameRng`].
///
/// ```
/// use tileboard::core::{PlayerProfile, SnakesConfig};
/// use tileboard::linear::{LinearBoard, SnakesGame};
/// use tileboard::rules::BoardGame;
///
/// let board = LinearBoard::classic().unwrap();
/// let players = vec![
///     PlayerProfile::new("Ada", 31).unwrap(),
///     PlayerProfile::new("Bo", 9).unwrap(),
/// ];
/// let mut game = SnakesGame::new(board, players, SnakesConfig::new().with_seed(3)).unwrap();
///
/// assert_eq!(game.current_profile().name, "Bo");
/// while !game.game_done() {
///     game.take_turn().unwrap();
/// }
/// assert_eq!(game.position(game.winner().unwrap()), Some(90));
/// ```
#[derive(Debug)]
pub struct SnakesGame<D: DiceSource = GameRng> {
    board: LinearBoard,
    profiles: PlayerMap<PlayerProfile>,
    pawns: PlayerMap<Pawn>,
    dice: Dice<D>,
    config: SnakesConfig,
    turn: TurnScheduler,
}

impl SnakesGame<GameRng> {
    /// New game rolling seeded dice from `config.seed`.
    pub fn new(board: LinearBoard, players: Vec<PlayerProfile>, config: SnakesConfig) -> Result<Self, GameError> {
        let rng = GameRng::new(config.seed);
        Self::with_dice(board, players, config, rng)
    }

    /// Resume a snapshot, continuing its dice stream where it stopped.
    pub fn restore(board: LinearBoard, snapshot: SnakesSnapshot) -> Result<Self, GameError> {
        let rng = snapshot
            .dice
            .as_ref()
            .map_or_else(|| GameRng::new(snapshot.config.seed), GameRng::from_state);
        Self::resume(board, snapshot, rng)
    }
}

impl<D: DiceSource> SnakesGame<D> {
    pub fn with_dice(
        mut board: LinearBoard,
        players: Vec<PlayerProfile>,
        config: SnakesConfig,
        source: D,
    ) -> Result<Self, GameError> {
        check_player_count(players.len())?;
        let dice = Dice::new(config.dice_count, source)?;

        let profiles = PlayerMap::from_vec(order_by_age(players, |p| p.age));
        let pawns = PlayerMap::new(profiles.player_count(), |_| Pawn::at(1));

        board.clear_occupants();
        for (player, pawn) in pawns.iter() {
            board.place(player, pawn.tile);
        }

        let turn = TurnScheduler::new(profiles.player_count());
        Ok(Self {
            board,
            profiles,
            pawns,
            dice,
            config,
            turn,
        })
    }

    /// Rebuild a game from a snapshot taken on an equivalent board.
    ///
    /// Players keep their snapshot order; they are not re-sorted.
    pub fn resume(mut board: LinearBoard, snapshot: SnakesSnapshot, source: D) -> Result<Self, GameError> {
        let count = snapshot.players.len();
        check_player_count(count)?;
        if snapshot.pawns.len() != count {
            return Err(GameError::InvalidSnapshot(format!(
                "{} players but {} pawns",
                count,
                snapshot.pawns.len()
            )));
        }
        if let Some(pawn) = snapshot.pawns.iter().find(|p| !board.contains(p.tile)) {
            return Err(GameError::InvalidSnapshot(format!("no tile {} on this board", pawn.tile)));
        }
        let seated = |p: &PlayerId| p.index() < count;
        if !seated(&snapshot.current) || !snapshot.winner.iter().all(seated) {
            return Err(GameError::InvalidSnapshot("unknown player".to_string()));
        }
        let mut order = snapshot.placement.clone();
        order.sort_unstable();
        if !order.iter().copied().eq(PlayerId::all(count)) {
            return Err(GameError::InvalidSnapshot("placement must list every player once".to_string()));
        }

        let dice = Dice::new(snapshot.config.dice_count, source)?;
        let pawns = PlayerMap::from_vec(snapshot.pawns);

        board.clear_occupants();
        for &player in &snapshot.placement {
            board.place(player, pawns[player].tile);
        }

        let turn = TurnScheduler::resume(count, snapshot.current, snapshot.turn_number, snapshot.winner);
        Ok(Self {
            board,
            profiles: PlayerMap::from_vec(snapshot.players),
            pawns,
            dice,
            config: snapshot.config,
            turn,
        })
    }

    /// Everything needed to `resume` this game.
    #[must_use]
    pub fn snapshot(&self) -> SnakesSnapshot {
        SnakesSnapshot {
            players: self.profiles.as_slice().to_vec(),
            pawns: self.pawns.as_slice().to_vec(),
            placement: self.board.tiles().flat_map(|t| t.occupants().iter().copied()).collect(),
            current: self.turn.current_player(),
            turn_number: self.turn.turn_number(),
            winner: self.turn.winner(),
            config: self.config.clone(),
            dice: self.dice.checkpoint(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &LinearBoard {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &SnakesConfig {
        &self.config
    }

    #[must_use]
    pub fn pawn(&self, player: PlayerId) -> Option<&Pawn> {
        self.pawns.get(player)
    }

    #[must_use]
    pub fn position(&self, player: PlayerId) -> Option<TileId> {
        self.pawns.get(player).map(|p| p.tile)
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn.turn_number()
    }

    /// Roll, move by the total, then hand over the turn unless the roll or a
    /// bonus tile grants another.
    pub fn take_turn(&mut self) -> Result<TurnReport, GameError> {
        let player = self.turn.current_player();
        let roll = self.roll_individual()?;
        let log = self.move_current_player(roll.total())?;

        let extra_turn = !self.game_done() && self.player_gets_extra_turn(&roll);
        if !extra_turn && !self.game_done() {
            self.next_player()?;
        }

        Ok(TurnReport {
            player,
            roll,
            log,
            extra_turn,
        })
    }

    fn emit_moves(&mut self, log: &MoveLog) {
        let player = log.player;
        self.turn.emit(GameEvent::PlayerMoved {
            player,
            from: log.from,
            to: log.settled(),
        });
        if let Some(c) = log.collision {
            self.turn.emit(GameEvent::PlayerMoved {
                player,
                from: c.at,
                to: c.mover_to,
            });
            self.turn.emit(GameEvent::PlayerMoved {
                player: c.other,
                from: c.at,
                to: c.other_to,
            });
        }
        self.turn.emit(GameEvent::RefreshPositions);
    }

    fn check_winner(&mut self, log: &MoveLog) {
        let last = self.board.final_tile();
        let candidates = std::iter::once(log.player).chain(log.collision.map(|c| c.other));
        let winner = candidates.into_iter().find(|&p| self.pawns[p].tile == last);
        if let Some(winner) = winner {
            self.turn.declare_winner(winner);
        }
    }
}

impl<D: DiceSource> BoardGame for SnakesGame<D> {
    type MoveLog = MoveLog;

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

    fn move_current_player(&mut self, steps: u32) -> Result<MoveLog, GameError> {
        self.turn.ensure_active()?;
        if steps == 0 {
            return Err(GameError::ZeroSteps);
        }

        let player = self.turn.current_player();
        let log = self
            .board
            .move_player(player, &mut self.pawns, steps, self.config.collision_backup);
        self.turn.clear_roll();

        self.emit_moves(&log);
        self.check_winner(&log);
        Ok(log)
    }

    /// One die showing 1, or two dice both showing 6, or an unspent bonus.
    ///
    /// The bonus is only consumed when the dice did not already grant the turn.
    fn player_gets_extra_turn(&mut self, roll: &DiceRoll) -> bool {
        if self.turn.is_over() {
            return false;
        }
        match roll.faces() {
            [1] | [6, 6] => true,
            _ => {
                let player = self.turn.current_player();
                self.pawns[player].take_extra_turn()
            }
        }
    }

    fn next_player(&mut self) -> Result<PlayerId, GameError> {
        self.turn.advance()
    }

    fn winner(&self) -> Option<PlayerId> {
        self.turn.winner()
    }

    fn phase(&self) -> TurnPhase {
        let player = self.turn.current_player();
        if let Some(winner) = self.turn.winner() {
            return TurnPhase::GameOver { winner };
        }
        match self.turn.last_roll() {
            Some(roll) => TurnPhase::Resolving {
                player,
                steps: Some(roll.total()),
            },
            None => TurnPhase::AwaitingRoll { player },
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

fn check_player_count(got: usize) -> Result<(), GameError> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&got) {
        Ok(())
    } else {
        Err(GameError::InvalidPlayerCount {
            min: MIN_PLAYERS,
            max: MAX_PLAYERS,
            got,
        })
    }
}

/// Serializable state of a [`SnakesGame`] between turns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakesSnapshot {
    /// Profiles in turn order.
    pub players: Vec<PlayerProfile>,
    pub pawns: Vec<Pawn>,
    /// Every player, ordered so that re-placing them rebuilds each tile's
    /// arrival order.
    pub placement: Vec<PlayerId>,
    pub current: PlayerId,
    pub turn_number: u32,
    pub winner: Option<PlayerId>,
    pub config: SnakesConfig,
    pub dice: Option<GameRngState>,
}
