use std::thread::sleep;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::Result;
use crate::events::{GameEvent, TickReport};
use crate::flow::{Flow, Screen};
use crate::input::{Command, InputTranslator};
use crate::render::{Frame, RenderSink, ScoreSink, Scoreboard};
use crate::state::Mode;
use crate::term::TermManager;

/// How often keys are polled between ticks.
const POLL_INTERVAL_MS: u64 = 5;

const MENU_LINES: &[&str] = &[
    "SNAKE DUEL",
    "",
    "1  single player",
    "2  two players",
    "Q  quit",
    "",
    "Single: arrows or WASD",
    "Two players: WASD vs arrows",
    "Space to pause, R restart, M menu",
];

const PAUSE_LINES: &[&str] = &["Paused", "Space to resume", "R to restart, M for menu"];

/// Terminal front-end: polls keys, ticks the flow at a fixed interval and
/// pushes every tick to the screen.
pub struct SnakeGame {
    flow: Flow,
    term: TermManager,
    translator: InputTranslator,
    tick_interval: Duration,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        let term = TermManager::new(config.width, config.height)?;
        let tick_interval = Duration::from_millis(config.tick_ms);

        Ok(SnakeGame { flow: Flow::new(config), term, translator: InputTranslator::new(), tick_interval })
    }

    /// Runs until the player quits. The terminal is restored even when the
    /// loop fails.
    pub fn run(&mut self, start: Option<Mode>) -> Result<()> {
        self.term.setup()?;

        if let Some(mode) = start {
            self.flow.handle(Command::Start(mode));
        }

        let res = self.main_loop();
        let restored = self.term.restore();
        res.and(restored)
    }

    fn main_loop(&mut self) -> Result<()> {
        self.show_screen()?;
        let mut last_tick = Instant::now();

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key in self.term.read_key_events_queue()? {
                let cmd = match self.translator.translate(key, self.flow.key_context()) {
                    Some(cmd) => cmd,
                    None => continue,
                };

                let before = self.flow.screen();
                if self.flow.handle(cmd) && needs_repaint(cmd, before, self.flow.screen()) {
                    self.show_screen()?;
                }
            }

            if self.flow.should_quit() {
                info!("quit requested");
                return Ok(());
            }

            if last_tick.elapsed() < self.tick_interval {
                continue;
            }
            last_tick = Instant::now();

            if let Some(report) = self.flow.tick() {
                log_events(&report);
                present(&self.flow, &mut self.term)?;

                if let Some(outcome) = report.game_over {
                    self.term.outcome(&outcome)?;
                }
            }
        }
    }

    fn show_screen(&mut self) -> Result<()> {
        match self.flow.screen() {
            Screen::Menu => {
                self.term.clear()?;
                self.term.show_message(MENU_LINES)
            }
            Screen::Running => {
                self.term.hide_message();
                present(&self.flow, &mut self.term)
            }
            Screen::Paused => {
                present(&self.flow, &mut self.term)?;
                self.term.show_message(PAUSE_LINES)
            }
            Screen::GameOver(outcome) => self.term.outcome(&outcome),
        }
    }
}

/// Pushes the current session, if any, to both sinks.
pub fn present<S: RenderSink + ScoreSink>(flow: &Flow, sink: &mut S) -> Result<()> {
    if let Some(session) = flow.session() {
        sink.draw(&Frame::capture(session))?;
        sink.scores(&Scoreboard::capture(session, flow.screen() == Screen::Paused))?;
    }
    Ok(())
}

fn needs_repaint(cmd: Command, before: Screen, after: Screen) -> bool {
    // a restart can go Running -> Running
    before != after || cmd == Command::Restart
}

fn log_events(report: &TickReport) {
    for event in &report.events {
        match event {
            GameEvent::PlayerDied { player, cause, .. } => {
                info!(player = player.number(), ?cause, "player died")
            }
            other => debug!(event = ?other),
        }
    }
}
