use rand::Rng;

use crate::snake::Direction;
use crate::Coords;

/// Toroidal board: stepping off one edge re-enters on the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        Grid { width, height }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, pos: Coords) -> bool {
        pos.0 < self.width && pos.1 < self.height
    }

    /// The cell one step from `pos` in `dir`, wrapped on both axes.
    pub fn step(&self, pos: Coords, dir: Direction) -> Coords {
        let (dx, dy) = dir.delta();
        let x = (pos.0 as i32 + dx).rem_euclid(self.width as i32);
        let y = (pos.1 as i32 + dy).rem_euclid(self.height as i32);
        (x as u16, y as u16)
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coords {
        (rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
    }
}
