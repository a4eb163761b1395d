use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Rgb;
use crate::grid::Grid;
use crate::snake::Player;
use crate::Coords;

pub const REVIVE_LABEL: &str = "revive";

/// One row of the weighted food table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodKind {
    pub label: String,
    pub score: u32,
    pub weight: u32,
    pub color: Rgb,
}

impl FoodKind {
    pub fn new(label: &str, score: u32, weight: u32, color: Rgb) -> Self {
        FoodKind { label: label.to_string(), score, weight, color }
    }
}

/// Regular food. Stays on the board until eaten.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub pos: Coords,
    pub color: Rgb,
    pub score: u32,
    pub label: String,
}

impl Food {
    pub fn new(pos: Coords, kind: &FoodKind) -> Self {
        Food { pos, color: kind.color, score: kind.score, label: kind.label.clone() }
    }
}

/// Multiplayer-only pickup that brings the eater's partner back to life.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviveFood {
    pub pos: Coords,
    pub color: Rgb,
    pub ticks_left: u32,
}

impl ReviveFood {
    pub fn new(pos: Coords, color: Rgb, ticks_left: u32) -> Self {
        ReviveFood { pos, color, ticks_left }
    }

    pub fn label(&self) -> &'static str {
        REVIVE_LABEL
    }
}

/// Whether any snake, living or dead, covers `pos`.
pub fn is_occupied(players: &[Player], pos: Coords) -> bool {
    players.iter().any(|p| p.occupies(pos))
}

/// Weighted draw from the food table. `None` only for a table with no positive weight.
pub fn random_kind<'a, R: Rng + ?Sized>(kinds: &'a [FoodKind], rng: &mut R) -> Option<&'a FoodKind> {
    kinds.choose_weighted(rng, |k| k.weight).ok()
}

/// Places a regular food item on a cell no snake covers.
///
/// Cells are sampled uniformly and redrawn on collision. After as many
/// rejections as the board has cells, the remaining free cells are listed and
/// one is picked directly; a full board yields `None`.
pub fn spawn_food<R: Rng + ?Sized>(
    grid: &Grid,
    players: &[Player],
    kinds: &[FoodKind],
    rng: &mut R,
) -> Option<Food> {
    let kind = random_kind(kinds, rng)?;

    for _ in 0..grid.area() {
        let pos = grid.random_cell(rng);
        if !is_occupied(players, pos) {
            return Some(Food::new(pos, kind));
        }
    }

    let free: Vec<Coords> = grid.cells().filter(|pos| !is_occupied(players, *pos)).collect();
    match free.choose(rng) {
        Some(pos) => Some(Food::new(*pos, kind)),
        None => {
            warn!("board is full, no cell left for food");
            None
        }
    }
}

/// Samples up to `attempts` cells looking for one no snake covers. If every
/// sample collides the last one is returned anyway, so placement never stalls.
pub fn find_free_cell<R: Rng + ?Sized>(
    grid: &Grid,
    players: &[Player],
    attempts: u32,
    rng: &mut R,
) -> Coords {
    let mut pos = grid.random_cell(rng);

    for _ in 1..attempts {
        if !is_occupied(players, pos) {
            return pos;
        }
        pos = grid.random_cell(rng);
    }

    if is_occupied(players, pos) {
        warn!(?pos, attempts, "no free cell found, using an occupied one");
    }
    pos
}
