use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::Coords;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }

    pub fn head_char(self) -> char {
        match self {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

/// Which of the two seats a snake occupies. Single mode only uses `One`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn from_index(i: usize) -> Option<PlayerSlot> {
        match i {
            0 => Some(PlayerSlot::One),
            1 => Some(PlayerSlot::Two),
            _ => None,
        }
    }

    pub fn other(self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Start cell, heading and gradient for one seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStyle {
    pub color_start: Rgb,
    pub color_end: Rgb,
    pub start: Coords,
    pub heading: Direction,
}

#[derive(Debug, Clone)]
pub struct Player {
    body: VecDeque<Coords>, // head first
    direction: Direction,
    next_direction: Direction,
    color_start: Rgb,
    color_end: Rgb,
    score: u32,
    alive: bool,
}

impl Player {
    pub fn new(style: &PlayerStyle) -> Self {
        let mut body = VecDeque::new();
        body.push_back(style.start);

        Player {
            body,
            direction: style.heading,
            next_direction: style.heading,
            color_start: style.color_start,
            color_end: style.color_end,
            score: 0,
            alive: true,
        }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn colors(&self) -> (Rgb, Rgb) {
        (self.color_start, self.color_end)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Queues a turn onto the perpendicular axis. Turns along the current axis
    /// (including a reversal) are ignored; returns whether the turn was queued.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir.is_horizontal() == self.direction.is_horizontal() {
            return false;
        }

        self.next_direction = dir;
        true
    }

    /// Sets the pending direction without the axis check.
    pub fn set_next_direction(&mut self, dir: Direction) {
        self.next_direction = dir;
    }

    pub(crate) fn commit_direction(&mut self) -> Direction {
        self.direction = self.next_direction;
        self.direction
    }

    /// Moves the head to `new_head`. Unless `grow` is set the tail cell is
    /// dropped and returned.
    pub(crate) fn advance(&mut self, new_head: Coords, grow: bool) -> Option<Coords> {
        self.body.push_front(new_head);

        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }

    pub(crate) fn add_score(&mut self, points: u32) -> u32 {
        self.score += points;
        self.score
    }

    pub(crate) fn kill(&mut self) {
        self.alive = false;
    }

    /// Brings a dead player back as a single segment at `pos`, heading right.
    pub(crate) fn revive_at(&mut self, pos: Coords) {
        self.body.clear();
        self.body.push_back(pos);
        self.direction = Right;
        self.next_direction = Right;
        self.alive = true;
    }

    #[cfg(test)]
    pub(crate) fn with_body(style: &PlayerStyle, body: &[Coords], direction: Direction) -> Self {
        let mut player = Player::new(style);
        player.body = body.iter().copied().collect();
        player.direction = direction;
        player.next_direction = direction;
        player
    }
}
