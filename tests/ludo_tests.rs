//! Ludo scenarios through the public API.

use tileboard::core::{GameError, LoopSize, LudoConfig, PlayerId, PlayerProfile, ScriptedDice};
use tileboard::events::{EventLog, GameEvent};
use tileboard::ludo::{LudoGame, LudoPlayerSpec, LudoTileType, PlayerColor, TokenRef};
use tileboard::rules::{BoardGame, TurnPhase};

fn seat(name: &str, age: u32, color: PlayerColor) -> LudoPlayerSpec {
    LudoPlayerSpec::new(PlayerProfile::new(name, age).unwrap(), color)
}

fn game(loop_size: LoopSize, seats: Vec<LudoPlayerSpec>) -> LudoGame<ScriptedDice> {
    let config = LudoConfig::new().with_loop_size(loop_size);
    LudoGame::with_dice(seats, config, ScriptedDice::new([6]).unwrap()).unwrap()
}

fn red_blue(loop_size: LoopSize) -> LudoGame<ScriptedDice> {
    game(
        loop_size,
        vec![seat("ann", 8, PlayerColor::Red), seat("ben", 9, PlayerColor::Blue)],
    )
}

/// Token at HOME with a 4: the next tile is the same HOME tile.
#[test]
fn test_home_token_stays_on_four() {
    let game = red_blue(LoopSize::Compact44);
    let token = game.tokens(PlayerId::new(0)).unwrap()[0];

    let next = game.board().get_next_tile(&token, 4);
    assert_eq!(next.index(), token.position);
    assert_eq!(next.kind(), LudoTileType::Home);
}

/// Landing on an opponent on a NORMAL tile sends it home.
#[test]
fn test_capture_on_normal_tile() {
    for loop_size in [LoopSize::Compact44, LoopSize::Classic52] {
        let mut game = red_blue(loop_size);
        let red = TokenRef::new(PlayerId::new(0), 0);
        let blue = TokenRef::new(PlayerId::new(1), 0);
        let blue_start = PlayerColor::Blue.start_index(loop_size);

        game.next_player().unwrap();
        game.select_token(blue).unwrap();
        game.move_current_player(6).unwrap();
        game.select_token(blue).unwrap();
        game.move_current_player(1).unwrap();
        let target = blue_start + 1;
        assert_eq!(game.board().tile(target).unwrap().kind(), LudoTileType::Normal);

        game.next_player().unwrap();
        game.select_token(red).unwrap();
        game.move_current_player(6).unwrap();
        game.select_token(red).unwrap();
        let log = game.move_current_player(target as u32).unwrap();

        assert_eq!(log.captured.len(), 1);
        let blue_token = game.token(blue).unwrap();
        assert_eq!(blue_token.position, blue_token.home);
        assert_eq!(game.board().tile(target).unwrap().occupants(), &[red]);
    }
}

#[test]
fn test_start_cell_captures() {
    let mut game = red_blue(LoopSize::Compact44);
    let red = TokenRef::new(PlayerId::new(0), 0);
    let blue = TokenRef::new(PlayerId::new(1), 3);

    // Red walks onto Blue's start cell, then Blue comes out on top of it.
    game.select_token(red).unwrap();
    game.move_current_player(6).unwrap();
    game.select_token(red).unwrap();
    game.move_current_player(11).unwrap();
    game.next_player().unwrap();
    game.select_token(blue).unwrap();
    let log = game.move_current_player(6).unwrap();

    assert_eq!(log.to, 11);
    assert_eq!(log.captured.len(), 1);
    assert_eq!(log.captured[0].token, red);
}

#[test]
fn test_safe_cell_shares() {
    let mut game = red_blue(LoopSize::Classic52);
    let red = TokenRef::new(PlayerId::new(0), 0);
    let red2 = TokenRef::new(PlayerId::new(0), 1);

    for token in [red, red2] {
        game.select_token(token).unwrap();
        game.move_current_player(6).unwrap();
        game.select_token(token).unwrap();
        game.move_current_player(8).unwrap();
    }

    let tile = game.board().tile(8).unwrap();
    assert_eq!(tile.kind(), LudoTileType::Safe);
    assert_eq!(tile.occupants(), &[red, red2]);
}

#[test]
fn test_token_enters_own_lane() {
    let mut game = red_blue(LoopSize::Compact44);
    let blue = TokenRef::new(PlayerId::new(1), 0);
    game.next_player().unwrap();
    game.select_token(blue).unwrap();
    game.move_current_player(6).unwrap();

    // 43 loop steps reach the finish entry, one more is the first lane cell.
    game.select_token(blue).unwrap();
    game.move_current_player(43).unwrap();
    assert_eq!(game.token(blue).unwrap().position, PlayerColor::Blue.finish_entry_index(LoopSize::Compact44));
    game.select_token(blue).unwrap();
    game.move_current_player(1).unwrap();
    let lane = game.board().finish_lane(PlayerColor::Blue);
    assert_eq!(game.token(blue).unwrap().position, lane.start);

    game.select_token(blue).unwrap();
    game.move_current_player(20).unwrap();
    assert_eq!(game.token(blue).unwrap().position, lane.end - 1);
    assert!(game.board().is_finished(lane.end - 1));
    assert!(game.movable_tokens(1).is_empty());
}

/// Each move needs its own selection, including the one after a 6.
#[test]
fn test_extra_roll_requires_new_selection() {
    let config = LudoConfig::new();
    let seats = vec![seat("ann", 8, PlayerColor::Red), seat("ben", 9, PlayerColor::Blue)];
    let mut game = LudoGame::with_dice(seats, config, ScriptedDice::new([6, 3]).unwrap()).unwrap();
    let player = PlayerId::new(0);
    let token = TokenRef::new(player, 0);

    let roll = game.roll_individual().unwrap();
    game.select_token(token).unwrap();
    game.move_current_player(roll.total()).unwrap();
    assert!(game.player_gets_extra_turn(&roll));

    let roll = game.roll_individual().unwrap();
    assert!(matches!(game.phase(), TurnPhase::TokenSelection { roll: 3, .. }));
    assert_eq!(game.move_current_player(roll.total()), Err(GameError::NoTokenSelected));

    game.select_token(token).unwrap();
    assert_eq!(game.move_current_player(roll.total()).unwrap().to, 3);
}

/// All 4 tokens on FINISH: the game is done and the owner wins.
#[test]
fn test_all_tokens_finished_wins() {
    let mut game = game(
        LoopSize::Classic52,
        vec![
            seat("ann", 8, PlayerColor::Red),
            seat("ben", 9, PlayerColor::Blue),
            seat("cat", 10, PlayerColor::Green),
        ],
    );
    let log = EventLog::shared();
    game.subscribe(Box::new(log.clone()));

    game.next_player().unwrap();
    let player = game.current_player();
    for id in 0..4 {
        assert!(!game.game_done());
        game.select_token(TokenRef::new(player, id)).unwrap();
        game.move_current_player(6).unwrap();
        game.select_token(TokenRef::new(player, id)).unwrap();
        game.move_current_player(100).unwrap();
    }

    assert!(game.game_done());
    assert_eq!(game.winner(), Some(player));
    assert_eq!(log.borrow().events.last(), Some(&GameEvent::GameOver { winner: player }));
    assert_eq!(game.roll_individual(), Err(GameError::GameOver));
}

#[test]
fn test_move_preconditions_leave_state() {
    let mut game = red_blue(LoopSize::Compact44);
    let before = game.snapshot();

    assert_eq!(game.move_current_player(6), Err(GameError::NoTokenSelected));
    assert!(matches!(
        game.select_token(TokenRef::new(PlayerId::new(1), 0)),
        Err(GameError::NotYourToken { .. })
    ));
    game.select_token(TokenRef::new(PlayerId::new(0), 0)).unwrap();
    assert!(matches!(
        game.move_current_player(5),
        Err(GameError::HomeExitRequiresSix { .. })
    ));
    assert_eq!(game.move_current_player(0), Err(GameError::ZeroSteps));
    assert_eq!(game.selected_token(), Some(TokenRef::new(PlayerId::new(0), 0)));

    let mut after = game.snapshot();
    after.selected = None;
    assert_eq!(after, before);
    assert!(game.events().is_empty());
}

#[test]
fn test_seeded_playout_finishes() {
    let seats = vec![
        seat("ann", 8, PlayerColor::Red),
        seat("ben", 9, PlayerColor::Blue),
        seat("cat", 10, PlayerColor::Green),
        seat("dan", 11, PlayerColor::Yellow),
    ];
    let mut game = LudoGame::new(seats, LudoConfig::new().with_seed(99)).unwrap();

    let mut turns = 0;
    while !game.game_done() && turns < 100_000 {
        game.take_turn(|movable| movable.first().copied()).unwrap();
        turns += 1;
    }

    let winner = game.winner().unwrap();
    assert!(game.has_finished(winner));
    let tokens = game.tokens(winner).unwrap();
    assert!(tokens.iter().all(|t| game.board().is_finished(t.position)));
}
