use std::collections::VecDeque;

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::engine;
use crate::events::{Outcome, TickReport};
use crate::input::{Command, KeyContext};
use crate::snake::{Direction, PlayerSlot};
use crate::state::{GameSession, Mode};

/// `Menu -> Running <-> Paused`, `Running -> GameOver -> Menu`, and restart
/// from any in-game screen back into a fresh `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Running,
    Paused,
    GameOver(Outcome),
}

/// Owns the current screen and session and applies commands to them.
///
/// Control commands take effect immediately. Steering is queued and applied
/// at the start of the next tick, in the order it arrived.
pub struct Flow {
    config: GameConfig,
    screen: Screen,
    session: Option<GameSession>,
    pending: VecDeque<(PlayerSlot, Direction)>,
    quit: bool,
}

impl Flow {
    pub fn new(config: GameConfig) -> Self {
        Flow {
            config,
            screen: Screen::Menu,
            session: None,
            pending: VecDeque::new(),
            quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn key_context(&self) -> KeyContext {
        match (self.screen, &self.session) {
            (Screen::Running, Some(s)) | (Screen::Paused, Some(s)) => KeyContext::InGame(s.mode()),
            (Screen::GameOver(_), _) => KeyContext::GameOver,
            _ => KeyContext::Menu,
        }
    }

    /// Applies a command. Commands that make no sense on the current screen
    /// are ignored; returns whether anything changed.
    pub fn handle(&mut self, cmd: Command) -> bool {
        match (cmd, self.screen) {
            (Command::Quit, _) => {
                self.quit = true;
                true
            }
            (Command::Start(mode), Screen::Menu) => {
                self.start(mode);
                true
            }
            (Command::Steer(slot, dir), Screen::Running) => {
                self.pending.push_back((slot, dir));
                true
            }
            (Command::TogglePause, Screen::Running) => {
                info!("paused");
                self.screen = Screen::Paused;
                true
            }
            (Command::TogglePause, Screen::Paused) => {
                info!("resumed");
                self.screen = Screen::Running;
                true
            }
            (Command::Restart, Screen::Running)
            | (Command::Restart, Screen::Paused)
            | (Command::Restart, Screen::GameOver(_)) => match self.session.as_ref().map(GameSession::mode) {
                Some(mode) => {
                    self.start(mode);
                    true
                }
                None => false,
            },
            (Command::ReturnToMenu, Screen::Running)
            | (Command::ReturnToMenu, Screen::Paused)
            | (Command::ReturnToMenu, Screen::GameOver(_)) => {
                info!("back to menu");
                self.session = None;
                self.pending.clear();
                self.screen = Screen::Menu;
                true
            }
            (cmd, screen) => {
                debug!(?cmd, ?screen, "command ignored");
                false
            }
        }
    }

    /// Runs one simulation step if a game is running.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.screen != Screen::Running {
            return None;
        }
        let session = self.session.as_mut()?;

        for (slot, dir) in self.pending.drain(..) {
            if let Some(player) = session.player_mut(slot) {
                player.steer(dir);
            }
        }

        let report = engine::update(session);
        if let Some(outcome) = report.game_over {
            self.screen = Screen::GameOver(outcome);
        }

        Some(report)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.screen {
            Screen::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    fn start(&mut self, mode: Mode) {
        info!(?mode, "starting game");
        self.session = Some(GameSession::new(mode, self.config.clone()));
        self.pending.clear();
        self.screen = Screen::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config() -> GameConfig {
        GameConfig { seed: Some(99), ..GameConfig::default() }
    }

    fn running(mode: Mode) -> Flow {
        let mut flow = Flow::new(seeded_config());
        assert!(flow.handle(Command::Start(mode)));
        flow
    }

    #[test]
    fn test_starts_on_menu() {
        let mut flow = Flow::new(seeded_config());
        assert_eq!(flow.screen(), Screen::Menu);
        assert!(flow.session().is_none());
        assert!(flow.tick().is_none());
        assert_eq!(flow.key_context(), KeyContext::Menu);
    }

    #[test]
    fn test_menu_ignores_in_game_commands() {
        let mut flow = Flow::new(seeded_config());
        assert!(!flow.handle(Command::TogglePause));
        assert!(!flow.handle(Command::Restart));
        assert!(!flow.handle(Command::Steer(PlayerSlot::One, Direction::Up)));
        assert_eq!(flow.screen(), Screen::Menu);
    }

    #[test]
    fn test_start_enters_running() {
        let flow = running(Mode::Multi);
        assert_eq!(flow.screen(), Screen::Running);
        assert_eq!(flow.key_context(), KeyContext::InGame(Mode::Multi));
        assert_eq!(flow.session().unwrap().players().len(), 2);
    }

    #[test]
    fn test_steering_applies_on_next_tick() {
        let mut flow = running(Mode::Single);
        flow.handle(Command::Steer(PlayerSlot::One, Direction::Down));

        let p = flow.session().unwrap().player(PlayerSlot::One).unwrap();
        assert_eq!(p.next_direction(), Direction::Right);

        flow.tick();
        let p = flow.session().unwrap().player(PlayerSlot::One).unwrap();
        assert_eq!(p.direction(), Direction::Down);
        assert_eq!(p.head(), (5, 6));
    }

    #[test]
    fn test_steering_for_absent_player_is_harmless() {
        let mut flow = running(Mode::Single);
        flow.handle(Command::Steer(PlayerSlot::Two, Direction::Up));
        assert!(flow.tick().is_some());
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut flow = running(Mode::Multi);
        flow.tick();
        let heads: Vec<_> = flow.session().unwrap().players().iter().map(|p| p.head()).collect();
        let tick = flow.session().unwrap().tick();

        flow.handle(Command::TogglePause);
        assert_eq!(flow.screen(), Screen::Paused);
        assert!(!flow.handle(Command::Steer(PlayerSlot::One, Direction::Up)));
        for _ in 0..5 {
            assert!(flow.tick().is_none());
        }

        let session = flow.session().unwrap();
        assert_eq!(session.tick(), tick);
        assert_eq!(session.players().iter().map(|p| p.head()).collect::<Vec<_>>(), heads);

        flow.handle(Command::TogglePause);
        assert_eq!(flow.screen(), Screen::Running);
        assert!(flow.tick().is_some());
        assert_eq!(flow.session().unwrap().tick(), tick + 1);
    }

    #[test]
    fn test_restart_gives_fresh_state() {
        let mut flow = running(Mode::Multi);
        for _ in 0..3 {
            flow.tick();
        }
        flow.handle(Command::TogglePause);

        assert!(flow.handle(Command::Restart));
        assert_eq!(flow.screen(), Screen::Running);
        let session = flow.session().unwrap();
        assert_eq!(session.tick(), 0);
        assert_eq!(session.mode(), Mode::Multi);
        assert_eq!(session.players()[0].head(), (5, 5));
    }

    #[test]
    fn test_game_over_then_menu() {
        let mut flow = running(Mode::Single);

        // grow to two segments, then reverse into the neck
        if let Some(session) = flow.session.as_mut() {
            let p = session.player_mut(PlayerSlot::One).unwrap();
            p.advance((6, 5), true);
            p.set_next_direction(Direction::Left);
        }

        let report = flow.tick().unwrap();
        assert!(report.game_over.is_some());
        assert!(matches!(flow.screen(), Screen::GameOver(Outcome::Single { score: 0 })));
        assert_eq!(flow.key_context(), KeyContext::GameOver);
        assert!(flow.tick().is_none());

        // no skipping from game-over straight into pause
        assert!(!flow.handle(Command::TogglePause));

        assert!(flow.handle(Command::ReturnToMenu));
        assert_eq!(flow.screen(), Screen::Menu);
        assert!(flow.session().is_none());
    }

    #[test]
    fn test_quit_from_anywhere() {
        let mut flow = running(Mode::Single);
        flow.handle(Command::TogglePause);
        assert!(flow.handle(Command::Quit));
        assert!(flow.should_quit());
    }
}
