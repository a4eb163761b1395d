use snake_duel::color::Rgb;
use snake_duel::engine;
use snake_duel::error::Result;
use snake_duel::events::{GameEvent, Outcome};
use snake_duel::food::{Food, FoodKind};
use snake_duel::game::present;
use snake_duel::input::{Command, InputTranslator, KeyContext};
use snake_duel::render::{Frame, RenderSink, ScoreSink, Scoreboard};
use snake_duel::snake::{Direction, PlayerSlot};
use snake_duel::{Flow, GameConfig, GameSession, Mode, Screen};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingSink {
    frames: Vec<Frame>,
    boards: Vec<Scoreboard>,
    outcomes: Vec<Outcome>,
}

impl RenderSink for RecordingSink {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

impl ScoreSink for RecordingSink {
    fn scores(&mut self, board: &Scoreboard) -> Result<()> {
        self.boards.push(board.clone());
        Ok(())
    }

    fn outcome(&mut self, outcome: &Outcome) -> Result<()> {
        self.outcomes.push(*outcome);
        Ok(())
    }
}

fn config() -> GameConfig {
    GameConfig { seed: Some(2024), ..GameConfig::default() }
}

fn ten_point_food(pos: (u16, u16)) -> Food {
    Food::new(pos, &FoodKind::new("common", 10, 50, Rgb::new(0xff, 0xd7, 0x00)))
}

#[test]
fn three_steps_right_into_food() {
    let mut flow = Flow::new(config());
    let translator = InputTranslator::new();

    let start = translator.translate(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE), flow.key_context());
    assert_eq!(start, Some(Command::Start(Mode::Single)));
    flow.handle(Command::Start(Mode::Single));

    flow.session_mut().unwrap().set_food(vec![ten_point_food((8, 5))]);

    let mut eaten_on = None;
    for tick in 1..=3 {
        let key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        if let Some(cmd) = translator.translate(key, flow.key_context()) {
            flow.handle(cmd);
        }

        let report = flow.tick().unwrap();
        if report.events.iter().any(|e| matches!(e, GameEvent::FoodEaten { .. })) {
            eaten_on = Some(tick);
        }
    }

    let player = flow.session().unwrap().player(PlayerSlot::One).unwrap();
    assert_eq!(eaten_on, Some(3));
    assert_eq!(player.score(), 10);
    assert_eq!(player.len(), 2);
    assert_eq!(player.head(), (8, 5));
    assert_eq!(flow.screen(), Screen::Running);
}

#[test]
fn single_game_ends_exactly_when_the_player_dies() {
    let mut session = GameSession::with_rng(Mode::Single, config(), StdRng::seed_from_u64(8));
    session.set_food(vec![ten_point_food((6, 5))]);

    // eat once to get a neck, then turn around into it
    let report = engine::update(&mut session);
    assert!(report.game_over.is_none());
    session.set_food(vec![ten_point_food((0, 19))]);

    session.player_mut(PlayerSlot::One).unwrap().set_next_direction(Direction::Left);
    let report = engine::update(&mut session);

    assert!(!session.players()[0].is_alive());
    assert_eq!(report.game_over, Some(Outcome::Single { score: 10 }));
}

#[test]
fn multi_game_survives_one_death() {
    let mut flow = Flow::new(GameConfig { revive_spawn_chance: 0.0, ..config() });
    flow.handle(Command::Start(Mode::Multi));

    flow.session_mut().unwrap().set_food(vec![ten_point_food((0, 19))]);

    // player one runs right along row 5, player two left along row 15
    for _ in 0..5 {
        flow.tick();
    }
    assert_eq!(flow.screen(), Screen::Running);

    // grow player one, then reverse it into its neck
    {
        let session = flow.session_mut().unwrap();
        let ahead = next_cell(session, PlayerSlot::One);
        session.set_food(vec![ten_point_food(ahead)]);
    }
    flow.tick();
    flow.session_mut().unwrap().player_mut(PlayerSlot::One).unwrap().set_next_direction(Direction::Left);
    let report = flow.tick().unwrap();

    let session = flow.session().unwrap();
    assert!(!session.players()[0].is_alive());
    assert!(session.players()[1].is_alive());
    assert!(report.game_over.is_none());
    assert_eq!(flow.screen(), Screen::Running);
}

fn next_cell(session: &GameSession, slot: PlayerSlot) -> (u16, u16) {
    let p = session.player(slot).unwrap();
    session.grid().step(p.head(), p.next_direction())
}

#[test]
fn present_feeds_both_sinks() {
    let mut flow = Flow::new(config());
    let mut sink = RecordingSink::default();

    // nothing to show on the menu
    present(&flow, &mut sink).unwrap();
    assert!(sink.frames.is_empty());

    flow.handle(Command::Start(Mode::Multi));
    flow.tick();
    present(&flow, &mut sink).unwrap();

    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.frames[0].tick, 1);
    assert_eq!(sink.frames[0].snakes.len(), 2);
    assert_eq!(sink.boards[0].scores.len(), 2);
    assert!(!sink.boards[0].paused);

    flow.handle(Command::TogglePause);
    present(&flow, &mut sink).unwrap();
    assert!(sink.boards[1].paused);
    assert!(sink.outcomes.is_empty());
}

#[test]
fn steering_is_filtered_to_the_perpendicular_axis() {
    let mut flow = Flow::new(config());
    flow.handle(Command::Start(Mode::Multi));
    flow.session_mut().unwrap().set_food(vec![ten_point_food((0, 19))]);

    let translator = InputTranslator::new();
    let ctx = flow.key_context();
    assert_eq!(ctx, KeyContext::InGame(Mode::Multi));

    // player one heads right: 'a' would reverse it, 's' turns it down;
    // player two heads left: Right would reverse it
    for code in [KeyCode::Char('a'), KeyCode::Char('s'), KeyCode::Right].iter() {
        if let Some(cmd) = translator.translate(KeyEvent::new(*code, KeyModifiers::NONE), ctx) {
            flow.handle(cmd);
        }
    }
    flow.tick();

    let session = flow.session().unwrap();
    assert_eq!(session.players()[0].direction(), Direction::Down);
    assert_eq!(session.players()[0].head(), (5, 6));
    assert_eq!(session.players()[1].direction(), Direction::Left);
    assert_eq!(session.players()[1].head(), (24, 15));
}
