//! What happened during a tick, reported back to the front-end.

use crate::snake::PlayerSlot;
use crate::state::GameSession;
use crate::Coords;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Ran into its own body
    SelfCollision,
    /// Ran into the other snake, alive or dead
    OpponentCollision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten {
        player: PlayerSlot,
        label: String,
        points: u32,
        new_score: u32,
    },
    PlayerDied {
        player: PlayerSlot,
        cause: DeathCause,
        at: Coords,
    },
    PlayerRevived {
        player: PlayerSlot,
        by: PlayerSlot,
        at: Coords,
    },
    /// Revive food eaten while the partner was alive
    ReviveFoodWasted {
        player: PlayerSlot,
    },
    ReviveFoodSpawned {
        at: Coords,
    },
    ReviveFoodExpired {
        at: Coords,
    },
    FoodSpawned {
        at: Coords,
        label: String,
    },
}

/// Final result shown on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Single {
        score: u32,
    },
    Multi {
        /// `None` is a tie
        winner: Option<PlayerSlot>,
        scores: [u32; 2],
    },
}

impl Outcome {
    /// A survivor wins outright; otherwise the higher score wins.
    pub fn from_session(session: &GameSession) -> Outcome {
        let players = session.players();

        if players.len() < 2 {
            let score = players.first().map(|p| p.score()).unwrap_or(0);
            return Outcome::Single { score };
        }

        let (p1, p2) = (&players[0], &players[1]);
        let winner = match (p1.is_alive(), p2.is_alive()) {
            (true, false) => Some(PlayerSlot::One),
            (false, true) => Some(PlayerSlot::Two),
            _ if p1.score() > p2.score() => Some(PlayerSlot::One),
            _ if p2.score() > p1.score() => Some(PlayerSlot::Two),
            _ => None,
        };

        Outcome::Multi { winner, scores: [p1.score(), p2.score()] }
    }

    pub fn headline(&self) -> String {
        match self {
            Outcome::Single { .. } => "Game over!".to_string(),
            Outcome::Multi { winner: Some(slot), .. } => format!("Player {} wins!", slot.number()),
            Outcome::Multi { winner: None, .. } => "It's a tie!".to_string(),
        }
    }
}

/// Everything one call to `engine::update` did.
#[derive(Debug, Default)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    /// Set on the tick that ended the game
    pub game_over: Option<Outcome>,
}
