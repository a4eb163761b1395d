use std::fmt::Display;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::color::Rgb;
use crate::error::{GameError, Result};
use crate::events::Outcome;
use crate::render::{Frame, RenderSink, ScoreSink, Scoreboard};
use crate::Coords;

/// Terminal columns per board cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;

const GRID_GLYPH: [char; 2] = ['·', ' '];
const DEAD_HEAD_GLYPH: [char; 2] = ['X', 'X'];

/// What one board cell looks like on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    chars: [char; 2],
    fg: Rgb,
    bg: Rgb,
}

/// Owns stdout while the game runs. The board sits inside a border at (1, 1)
/// with the score line underneath.
pub struct TermManager {
    width: u16,
    board: (u16, u16),
    stdout: Stdout,
    // last glyph drawn per board cell, `None` when the screen must be repainted
    screen: Vec<Option<Glyph>>,
    has_message: bool,
}

impl TermManager {
    pub fn new(board_width: u16, board_height: u16) -> Result<Self> {
        let (width, height) = terminal::size().map_err(term_err)?;
        let need_w = board_width * CELL_WIDTH + 2;
        let need_h = board_height + 3;

        if width < need_w || height < need_h {
            return Err(GameError::TerminalTooSmall { have_w: width, have_h: height, need_w, need_h });
        }

        Ok(TermManager {
            width,
            board: (board_width, board_height),
            stdout: stdout(),
            screen: vec![None; board_width as usize * board_height as usize],
            has_message: false,
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking).map_err(term_err)?;
        terminal::enable_raw_mode().map_err(term_err)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().map_err(term_err)?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .map_err(term_err)
    }

    /// Drains every key press that arrived since the last call without blocking.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).map_err(term_err)? {
            if let Event::Key(ev) = read().map_err(term_err)? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All)).map_err(term_err)?;
        self.invalidate();
        self.has_message = false;
        self.draw_borders()
    }

    /// Centered box over the board. Stays until the next `hide_message`.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let msg_height = lines.len() as u16 + 2;
        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 4;
        let center = ((self.board.0 * CELL_WIDTH + 2) / 2, (self.board.1 + 2) / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        queue!(self.stdout, SetForegroundColor(Color::White), SetBackgroundColor(Color::Black)).map_err(term_err)?;

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(top_left.0, *y), Print(&blank)).map_err(term_err)?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), Print(padded)).map_err(term_err)?;
        }

        self.has_message = true;
        self.flush()
    }

    /// Drops the message box; the next frame repaints what was under it.
    pub fn hide_message(&mut self) {
        if self.has_message {
            self.has_message = false;
            self.invalidate();
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().map_err(GameError::from)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn invalidate(&mut self) {
        for cell in self.screen.iter_mut() {
            *cell = None;
        }
    }

    fn draw_borders(&mut self) -> Result<()> {
        let width = self.board.0 * CELL_WIDTH + 2;
        let height = self.board.1 + 2;
        let (end_x, end_y) = (width - 1, height - 1);

        queue!(self.stdout, ResetColor).map_err(term_err)?;
        for x in 0..width {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_raw((x, 0), ch)?;
            self.print_raw((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_raw((0, y), '|')?;
            self.print_raw((end_x, y), '|')?;
        }

        self.flush()
    }

    fn print_raw(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(ch)).map_err(term_err)
    }

    /// Queues `glyph` at board cell `pos` unless it is already on screen.
    fn put(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        let idx = pos.1 as usize * self.board.0 as usize + pos.0 as usize;
        if self.screen.get(idx).copied().flatten() == Some(glyph) {
            return Ok(());
        }

        let text: String = glyph.chars.iter().collect();
        queue!(
            self.stdout,
            cursor::MoveTo(1 + pos.0 * CELL_WIDTH, 1 + pos.1),
            SetForegroundColor(color(glyph.fg)),
            SetBackgroundColor(color(glyph.bg)),
            Print(text)
        )
        .map_err(term_err)?;

        if let Some(slot) = self.screen.get_mut(idx) {
            *slot = Some(glyph);
        }
        Ok(())
    }

    fn status_line(&mut self, text: &str) -> Result<()> {
        let y = self.board.1 + 2;
        let width = (self.width as usize).min(self.board.0 as usize * CELL_WIDTH as usize + 2);
        queue!(
            self.stdout,
            ResetColor,
            cursor::MoveTo(0, y),
            Print(format!("{:<width$}", text, width = width))
        )
        .map_err(term_err)
    }
}

impl RenderSink for TermManager {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        // Later layers overwrite earlier ones: grid, food, then snakes.
        let mut layer: Vec<Option<Glyph>> = vec![None; self.screen.len()];
        let width = self.board.0 as usize;
        let mut set = |pos: Coords, glyph: Glyph| {
            if let Some(slot) = layer.get_mut(pos.1 as usize * width + pos.0 as usize) {
                *slot = Some(glyph);
            }
        };

        for (pos, c) in &frame.grid {
            set(*pos, Glyph { chars: GRID_GLYPH, fg: *c, bg: Rgb::BLACK });
        }

        for food in &frame.food {
            set(food.pos, Glyph { chars: cell_text(&food.text), fg: Rgb::WHITE, bg: food.color });
        }

        for snake in &frame.snakes {
            for (i, (pos, c)) in snake.segments.iter().enumerate() {
                let chars = match (i, snake.alive) {
                    (0, true) => [snake.heading.head_char(); 2],
                    (0, false) => DEAD_HEAD_GLYPH,
                    _ => [' ', ' '],
                };
                set(*pos, Glyph { chars, fg: Rgb::WHITE, bg: *c });
            }
        }

        if self.has_message {
            return Ok(());
        }

        for (idx, glyph) in layer.into_iter().enumerate() {
            if let Some(glyph) = glyph {
                let pos = ((idx % width) as u16, (idx / width) as u16);
                self.put(pos, glyph)?;
            }
        }

        queue!(self.stdout, ResetColor).map_err(term_err)?;
        self.flush()
    }
}

impl ScoreSink for TermManager {
    fn scores(&mut self, board: &Scoreboard) -> Result<()> {
        let mut text = board
            .scores
            .iter()
            .zip(&board.alive)
            .enumerate()
            .map(|(i, (score, alive))| {
                let mark = if *alive { "" } else { " (dead)" };
                format!("P{}: {}{}", i + 1, score, mark)
            })
            .collect::<Vec<_>>()
            .join("   ");

        if board.paused {
            text.push_str("   [paused]");
        }

        self.status_line(&text)?;
        self.flush()
    }

    fn outcome(&mut self, outcome: &Outcome) -> Result<()> {
        let headline = outcome.headline();
        let mut lines = vec![headline];

        match outcome {
            Outcome::Single { score } => lines.push(format!("Score: {}", score)),
            Outcome::Multi { scores, .. } => {
                lines.push(format!("Player 1: {}", scores[0]));
                lines.push(format!("Player 2: {}", scores[1]));
            }
        }

        lines.push(String::new());
        lines.push("R to play again, M for menu".to_string());
        lines.push("Q or CTRL+C to quit".to_string());

        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        self.show_message(&refs)
    }
}

/// Two-column label for a cell: short text is centered, long text is cut.
fn cell_text(text: &str) -> [char; 2] {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (None, _, _) => [' ', ' '],
        (Some(a), None, _) => [a, ' '],
        (Some(a), Some(b), None) => [a, b],
        (Some(_), Some(_), Some(_)) => ['*', '*'],
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

fn term_err<E: Display>(e: E) -> GameError {
    GameError::Terminal(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(""), [' ', ' ']);
        assert_eq!(cell_text("+"), ['+', ' ']);
        assert_eq!(cell_text("50"), ['5', '0']);
        assert_eq!(cell_text("120"), ['*', '*']);
    }
}
