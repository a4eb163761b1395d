use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{GameError, Result};
use crate::food::FoodKind;
use crate::snake::{Direction, PlayerStyle};

/// Tuning for a game. Every field has a default, so a config file only
/// needs the keys it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in cells
    pub width: u16,
    /// Board height in cells
    pub height: u16,
    /// Milliseconds between simulation ticks
    pub tick_ms: u64,
    /// Fixed RNG seed; drawn from the OS when absent
    pub seed: Option<u64>,
    /// Per-tick chance of revive food appearing while someone is dead
    pub revive_spawn_chance: f64,
    /// Ticks revive food stays on the board
    pub revive_food_ticks: u32,
    /// Samples tried when placing revive food or a revived player
    pub placement_attempts: u32,
    pub revive_color: Rgb,
    pub grid_color: Rgb,
    pub food_kinds: Vec<FoodKind>,
    pub players: [PlayerStyle; 2],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 20,
            tick_ms: 150,
            seed: None,
            revive_spawn_chance: 0.02,
            revive_food_ticks: 100,
            placement_attempts: 50,
            revive_color: Rgb::new(0x00, 0xff, 0x00),
            grid_color: Rgb::new(0x1a, 0x1a, 0x1a),
            food_kinds: vec![
                FoodKind::new("common", 10, 50, Rgb::new(0xff, 0xd7, 0x00)),
                FoodKind::new("uncommon", 20, 30, Rgb::new(0xff, 0x45, 0x00)),
                FoodKind::new("rare", 50, 20, Rgb::new(0x94, 0x00, 0xd3)),
            ],
            players: [
                PlayerStyle {
                    color_start: Rgb::new(0x41, 0x69, 0xe1),
                    color_end: Rgb::new(0x8a, 0x2b, 0xe2),
                    start: (5, 5),
                    heading: Direction::Right,
                },
                PlayerStyle {
                    color_start: Rgb::new(0xff, 0x14, 0x93),
                    color_end: Rgb::new(0xff, 0x63, 0x47),
                    start: (25, 15),
                    heading: Direction::Left,
                },
            ],
        }
    }
}

impl GameConfig {
    /// Reads a TOML file and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid("board must be at least 1x1"));
        }
        if self.tick_ms == 0 {
            return Err(invalid("tick_ms must be positive"));
        }
        if self.placement_attempts == 0 {
            return Err(invalid("placement_attempts must be positive"));
        }
        if !(0.0..=1.0).contains(&self.revive_spawn_chance) {
            return Err(invalid("revive_spawn_chance must be within [0, 1]"));
        }
        if self.food_kinds.is_empty() {
            return Err(invalid("food_kinds must not be empty"));
        }
        if self.food_kinds.iter().all(|k| k.weight == 0) {
            return Err(invalid("at least one food kind needs a positive weight"));
        }

        for (i, style) in self.players.iter().enumerate() {
            if style.start.0 >= self.width || style.start.1 >= self.height {
                return Err(GameError::InvalidConfig(format!(
                    "player {} starts at {:?}, outside the {}x{} board",
                    i + 1, style.start, self.width, self.height
                )));
            }
        }
        if self.players[0].start == self.players[1].start {
            return Err(invalid("players must start on different cells"));
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> GameError {
    GameError::InvalidConfig(msg.to_string())
}
