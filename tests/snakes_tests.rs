//! Snakes & Ladders scenarios through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use tileboard::core::{DiceRoll, GameError, PlayerId, PlayerProfile, ScriptedDice, SnakesConfig};
use tileboard::events::{EventLog, GameEvent, Observer};
use tileboard::linear::{ActionDescriptor, LinearBoard, SnakesGame, TileAction, TileSpec};
use tileboard::rules::{BoardGame, TurnPhase};

fn players(n: usize) -> Vec<PlayerProfile> {
    (0..n)
        .map(|i| PlayerProfile::new(format!("player{i}"), 20 + i as u32).unwrap())
        .collect()
}

fn scripted_game(board: LinearBoard, n: usize, faces: &[u8], config: SnakesConfig) -> SnakesGame<ScriptedDice> {
    let dice = ScriptedDice::new(faces.iter().copied()).unwrap();
    SnakesGame::with_dice(board, players(n), config, dice).unwrap()
}

/// Board description fed in as parsed tiles, the way a consumer's file
/// loader would hand it over.
#[test]
fn test_board_from_description() {
    let json = r#"[
        {"id": 1, "next": 2},
        {"id": 2, "next": 3, "action": {"kind": "bonus"}},
        {"id": 3, "next": 4},
        {"id": 4, "next": 5, "action": {"kind": "Ladder", "destination": 6}},
        {"id": 5, "next": 6},
        {"id": 6, "next": 7, "action": {"kind": "SNAKE", "destination": 3}},
        {"id": 7}
    ]"#;
    let specs: Vec<TileSpec> = serde_json::from_str(json).unwrap();
    let board = LinearBoard::from_tiles(specs).unwrap();

    assert_eq!(board.final_tile(), 7);
    assert_eq!(board.tile(2).unwrap().action(), Some(TileAction::Bonus));
    assert_eq!(board.tile(4).unwrap().action(), Some(TileAction::Ladder(6)));
    assert_eq!(board.tile(6).unwrap().action(), Some(TileAction::Snake(3)));
}

#[test]
fn test_unknown_action_fails_construction() {
    let specs = vec![
        TileSpec::new(1, 2).with_action(ActionDescriptor {
            kind: "teleport".to_string(),
            destination: Some(2),
        }),
        TileSpec::new(2, 0),
    ];
    assert!(matches!(
        LinearBoard::from_tiles(specs),
        Err(tileboard::BoardError::UnknownAction { tile: 1, .. })
    ));
}

/// Ladder 4 -> 14; a player on 1 rolling 3 ends on 14.
#[test]
fn test_ladder_from_one_with_three() {
    let mut game = scripted_game(LinearBoard::classic().unwrap(), 2, &[3], SnakesConfig::new());
    let report = game.take_turn().unwrap();

    assert_eq!(report.log.landed, 4);
    assert_eq!(report.log.to, 14);
    assert_eq!(game.position(PlayerId::new(0)), Some(14));
}

/// Chained actions are not followed: 4 -> 14 even though 14 -> 3.
#[test]
fn test_single_level_resolution() {
    let board = LinearBoard::builder(20).ladder(4, 14).snake(14, 3).build().unwrap();
    let mut game = scripted_game(board, 2, &[3], SnakesConfig::new());

    game.move_current_player(3).unwrap();
    assert_eq!(game.position(PlayerId::new(0)), Some(14));
}

#[test]
fn test_snake_slides_down() {
    let mut game = scripted_game(LinearBoard::classic().unwrap(), 2, &[3], SnakesConfig::new());
    // 1 -> 4 -> 14, then 14 + 3 = 17 -> 7.
    game.move_current_player(3).unwrap();
    let log = game.move_current_player(3).unwrap();
    assert_eq!(log.action, Some(TileAction::Snake(7)));
    assert_eq!(game.position(PlayerId::new(0)), Some(7));
}

#[test]
fn test_two_dice_extra_turn() {
    let config = SnakesConfig::new().with_dice(2);
    let mut game = scripted_game(LinearBoard::classic().unwrap(), 2, &[6, 6, 6, 5], config);

    let roll = game.roll_individual().unwrap();
    assert_eq!(roll.faces(), &[6, 6]);
    assert!(game.player_gets_extra_turn(&roll));

    let roll = game.roll_individual().unwrap();
    assert_eq!(roll.faces(), &[6, 5]);
    assert!(!game.player_gets_extra_turn(&roll));
}

#[test]
fn test_roll_dice_sums_faces() {
    let config = SnakesConfig::new().with_dice(3);
    let mut game = scripted_game(LinearBoard::classic().unwrap(), 2, &[1, 2, 4], config);
    assert_eq!(game.roll_dice(), Ok(7));
}

/// A on 6, B lands on 6: both end on max(1, 6 - K).
#[test]
fn test_collision_scenario() {
    for backup in [7, 8, 3] {
        let board = LinearBoard::builder(30).build().unwrap();
        let config = SnakesConfig::new().with_collision_backup(backup);
        let mut game = scripted_game(board, 2, &[5, 2], config);

        game.move_current_player(5).unwrap();
        game.next_player().unwrap();
        game.move_current_player(3).unwrap();
        game.move_current_player(2).unwrap();

        let expected = 6u32.saturating_sub(backup).max(1);
        assert_eq!(game.position(PlayerId::new(0)), Some(expected));
        assert_eq!(game.position(PlayerId::new(1)), Some(expected));
    }
}

/// The classic collision check: 15 tiles, one player on 3, the other moves
/// there from 1 and both end on tile 1.
#[test]
fn test_collision_near_start() {
    let board = LinearBoard::builder(15).build().unwrap();
    let mut game = scripted_game(board, 2, &[2], SnakesConfig::new());

    game.next_player().unwrap();
    game.move_current_player(2).unwrap();
    game.next_player().unwrap();
    let log = game.move_current_player(2).unwrap();

    let collision = log.collision.unwrap();
    assert_eq!(collision.other, PlayerId::new(1));
    assert_eq!(game.position(PlayerId::new(0)), Some(1));
    assert_eq!(game.position(PlayerId::new(1)), Some(1));
    assert!(log.to_string().contains("Collision! Player 0 and Player 1 collided!"));
}

#[test]
fn test_extra_turn_from_bonus_tile() {
    let board = LinearBoard::builder(20).bonus(4).build().unwrap();
    let mut game = scripted_game(board, 2, &[3, 2], SnakesConfig::new());

    let report = game.take_turn().unwrap();
    assert!(report.extra_turn);
    assert_eq!(game.current_player(), PlayerId::new(0));

    let report = game.take_turn().unwrap();
    assert!(!report.extra_turn);
    assert_eq!(game.current_player(), PlayerId::new(1));
}

#[test]
fn test_winner_by_overshoot() {
    let board = LinearBoard::builder(8).build().unwrap();
    let mut game = scripted_game(board, 3, &[2, 3, 4, 6], SnakesConfig::new());

    game.take_turn().unwrap();
    game.take_turn().unwrap();
    game.take_turn().unwrap();
    let report = game.take_turn().unwrap();

    assert_eq!(report.log.to, 8);
    assert_eq!(game.winner(), Some(PlayerId::new(0)));
    assert_eq!(game.take_turn(), Err(GameError::GameOver));
    assert_eq!(game.phase(), TurnPhase::GameOver { winner: PlayerId::new(0) });
}

#[test]
fn test_observer_sees_full_game() {
    struct Tally {
        rolls: usize,
        moves: usize,
        turns: usize,
        winner: Option<PlayerId>,
    }

    impl Observer for Tally {
        fn on_dice_rolled(&mut self, _player: PlayerId, _faces: &[u8]) {
            self.rolls += 1;
        }

        fn on_player_moved(&mut self, _player: PlayerId, _from: u32, _to: u32) {
            self.moves += 1;
        }

        fn on_next_player(&mut self, _next: PlayerId) {
            self.turns += 1;
        }

        fn on_game_over(&mut self, winner: PlayerId) {
            self.winner = Some(winner);
        }
    }

    let tally = Rc::new(RefCell::new(Tally {
        rolls: 0,
        moves: 0,
        turns: 0,
        winner: None,
    }));
    let mut game = SnakesGame::new(LinearBoard::classic().unwrap(), players(3), SnakesConfig::new().with_seed(8))
        .unwrap();
    game.subscribe(Box::new(tally.clone()));

    while !game.game_done() {
        game.take_turn().unwrap();
    }

    let tally = tally.borrow();
    assert_eq!(tally.winner, game.winner());
    assert!(tally.moves >= tally.rolls);
    let rolls = game
        .events()
        .iter()
        .filter(|r| matches!(r.event, GameEvent::DiceRolled { .. }))
        .count();
    assert_eq!(tally.rolls, rolls);
}

#[test]
fn test_unsubscribed_observer_goes_quiet() {
    let log = EventLog::shared();
    let mut game = scripted_game(LinearBoard::classic().unwrap(), 2, &[2], SnakesConfig::new());
    let id = game.subscribe(Box::new(log.clone()));

    game.take_turn().unwrap();
    let seen = log.borrow().events.len();
    assert!(game.unsubscribe(id));
    game.take_turn().unwrap();

    assert_eq!(log.borrow().events.len(), seen);
    assert!(game.events().len() > seen);
}

#[test]
fn test_extra_turn_is_consumed_once() {
    let board = LinearBoard::builder(20).bonus(3).build().unwrap();
    let mut game = scripted_game(board, 2, &[2], SnakesConfig::new());
    game.move_current_player(2).unwrap();

    assert!(game.player_gets_extra_turn(&DiceRoll::from_faces(&[3])));
    assert!(!game.player_gets_extra_turn(&DiceRoll::from_faces(&[3])));
}
