//! Read-only snapshots of a session for whatever draws it.
//!
//! `Frame::capture` does all color work (gradients, dimming, blinking), so a
//! sink only has to put the cells on screen.

use crate::color::{segment_color, Rgb};
use crate::error::Result;
use crate::events::Outcome;
use crate::snake::{Direction, PlayerSlot};
use crate::state::GameSession;
use crate::Coords;

/// Brightness of a dead snake.
pub const DEAD_DIM: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct FoodSprite {
    pub pos: Coords,
    pub color: Rgb,
    pub label: String,
    /// Short text drawn on the item: its score, or `+` for revive food
    pub text: String,
    pub revive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnakeSprite {
    pub slot: PlayerSlot,
    /// Head first, each with its gradient color
    pub segments: Vec<(Coords, Rgb)>,
    pub heading: Direction,
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub tick: u64,
    pub grid: Vec<(Coords, Rgb)>,
    pub food: Vec<FoodSprite>,
    pub snakes: Vec<SnakeSprite>,
}

impl Frame {
    pub fn capture(session: &GameSession) -> Frame {
        let grid_color = session.config().grid_color;
        let grid = session.grid().cells().map(|pos| (pos, grid_color)).collect();

        let mut food: Vec<FoodSprite> = session
            .food()
            .iter()
            .map(|f| FoodSprite {
                pos: f.pos,
                color: f.color,
                label: f.label.clone(),
                text: f.score.to_string(),
                revive: false,
            })
            .collect();

        let glow = pulse(session.tick());
        food.extend(session.revive_food().iter().map(|r| FoodSprite {
            pos: r.pos,
            color: r.color.dim(glow),
            label: r.label().to_string(),
            text: "+".to_string(),
            revive: true,
        }));

        let snakes = session
            .players()
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                let slot = PlayerSlot::from_index(i)?;
                let (start, end) = p.colors();
                let len = p.len();
                let segments = p
                    .body()
                    .iter()
                    .enumerate()
                    .map(|(idx, pos)| {
                        let color = segment_color(start, end, idx, len);
                        (*pos, if p.is_alive() { color } else { color.dim(DEAD_DIM) })
                    })
                    .collect();

                Some(SnakeSprite { slot, segments, heading: p.direction(), alive: p.is_alive() })
            })
            .collect();

        Frame {
            width: session.grid().width(),
            height: session.grid().height(),
            tick: session.tick(),
            grid,
            food,
            snakes,
        }
    }
}

/// Brightness for blinking revive food, cycling between 0.4 and 1.0.
pub fn pulse(tick: u64) -> f64 {
    (tick as f64 * 0.6).sin() * 0.3 + 0.7
}

/// Per-tick score line contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub scores: Vec<u32>,
    pub alive: Vec<bool>,
    pub paused: bool,
}

impl Scoreboard {
    pub fn capture(session: &GameSession, paused: bool) -> Scoreboard {
        Scoreboard {
            scores: session.scores(),
            alive: session.players().iter().map(|p| p.is_alive()).collect(),
            paused,
        }
    }
}

/// Consumes one frame per tick.
pub trait RenderSink {
    fn draw(&mut self, frame: &Frame) -> Result<()>;
}

/// Shows running scores and the final outcome.
pub trait ScoreSink {
    fn scores(&mut self, board: &Scoreboard) -> Result<()>;
    fn outcome(&mut self, outcome: &Outcome) -> Result<()>;
}
