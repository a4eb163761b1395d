use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::food::{self, Food, ReviveFood};
use crate::grid::Grid;
use crate::snake::{Player, PlayerSlot};

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    Single,
    Multi,
}

impl Mode {
    pub fn player_count(self) -> usize {
        match self {
            Mode::Single => 1,
            Mode::Multi => 2,
        }
    }
}

/// Everything one game mutates from tick to tick.
///
/// Owned by the front-end and handed by reference to `engine::update`; input
/// and ticks run on the same thread, so no locking is involved.
pub struct GameSession {
    pub(crate) mode: Mode,
    pub(crate) config: GameConfig,
    pub(crate) grid: Grid,
    pub(crate) players: Vec<Player>,
    pub(crate) food: Vec<Food>,
    pub(crate) revive_food: Vec<ReviveFood>,
    pub(crate) rng: StdRng,
    pub(crate) tick: u64,
}

impl GameSession {
    /// Fresh game: players at their start cells and one food item on the board.
    pub fn new(mode: Mode, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(mode, config, rng)
    }

    pub fn with_rng(mode: Mode, config: GameConfig, mut rng: StdRng) -> Self {
        let grid = Grid::new(config.width, config.height);
        let players: Vec<Player> = config.players[..mode.player_count()]
            .iter()
            .map(Player::new)
            .collect();

        let food = food::spawn_food(&grid, &players, &config.food_kinds, &mut rng)
            .into_iter()
            .collect();

        GameSession {
            mode,
            config,
            grid,
            players,
            food,
            revive_food: Vec::new(),
            rng,
            tick: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, slot: PlayerSlot) -> Option<&Player> {
        self.players.get(slot.index())
    }

    pub fn player_mut(&mut self, slot: PlayerSlot) -> Option<&mut Player> {
        self.players.get_mut(slot.index())
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    pub fn revive_food(&self) -> &[ReviveFood] {
        &self.revive_food
    }

    /// Replaces the regular food on the board, for scripted scenarios.
    pub fn set_food(&mut self, food: Vec<Food>) {
        self.food = food;
    }

    /// Scores in seat order.
    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(Player::score).collect()
    }

    pub fn any_dead(&self) -> bool {
        self.players.iter().any(|p| !p.is_alive())
    }

    /// Single mode ends with its only player; multi mode only once both are dead.
    pub fn is_over(&self) -> bool {
        self.players.iter().all(|p| !p.is_alive())
    }
}
