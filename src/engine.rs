//! The per-tick state transition.
//!
//! Order within a tick:
//! 1. each living player (seat order) commits its queued direction, moves one
//!    cell with wraparound, and dies on hitting any snake body
//! 2. survivors eat regular food (grow, score) and, in multi mode, revive food
//! 3. revive food timers count down and expired items are removed
//! 4. revive food may appear while someone is dead (multi mode only)
//! 5. regular food is replenished when the board has none
//! 6. the game-over condition is checked

use rand::Rng;
use tracing::{debug, info};

use crate::events::{DeathCause, GameEvent, Outcome, TickReport};
use crate::food::{self, ReviveFood};
use crate::snake::PlayerSlot;
use crate::state::{GameSession, Mode};

/// Advances the session by one tick. A session that is already over is left
/// untouched and reports its outcome again.
pub fn update(session: &mut GameSession) -> TickReport {
    let mut report = TickReport::default();

    if session.is_over() {
        report.game_over = Some(Outcome::from_session(session));
        return report;
    }

    session.tick += 1;

    for i in 0..session.players.len() {
        if let Some(slot) = PlayerSlot::from_index(i) {
            update_player(session, slot, &mut report.events);
        }
    }

    update_revive_food(session, &mut report.events);
    maybe_spawn_revive_food(session, &mut report.events);

    if session.food.is_empty() {
        if let Some(item) = food::spawn_food(&session.grid, &session.players, &session.config.food_kinds, &mut session.rng) {
            report.events.push(GameEvent::FoodSpawned { at: item.pos, label: item.label.clone() });
            session.food.push(item);
        }
    }

    if session.is_over() {
        let outcome = Outcome::from_session(session);
        info!(tick = session.tick, ?outcome, "game over");
        report.game_over = Some(outcome);
    }

    report
}

fn update_player(session: &mut GameSession, slot: PlayerSlot, events: &mut Vec<GameEvent>) {
    let i = slot.index();
    let grid = session.grid;

    let new_head = {
        let player = &mut session.players[i];
        if !player.is_alive() {
            return;
        }
        let dir = player.commit_direction();
        grid.step(player.head(), dir)
    };

    // The tail still counts: it only moves after the head has landed.
    let cause = if session.players[i].occupies(new_head) {
        Some(DeathCause::SelfCollision)
    } else if session.mode == Mode::Multi
        && session.players.iter().enumerate().any(|(j, p)| j != i && p.occupies(new_head))
    {
        Some(DeathCause::OpponentCollision)
    } else {
        None
    };

    if let Some(cause) = cause {
        session.players[i].kill();
        debug!(player = slot.number(), ?cause, at = ?new_head, "player died");
        events.push(GameEvent::PlayerDied { player: slot, cause, at: new_head });
        return;
    }

    let eaten = session
        .food
        .iter()
        .rposition(|f| f.pos == new_head)
        .map(|idx| session.food.remove(idx));

    let player = &mut session.players[i];
    player.advance(new_head, eaten.is_some());

    if let Some(item) = eaten {
        let new_score = player.add_score(item.score);
        debug!(player = slot.number(), label = %item.label, points = item.score, new_score, "food eaten");
        events.push(GameEvent::FoodEaten {
            player: slot,
            label: item.label,
            points: item.score,
            new_score,
        });
    }

    if session.mode == Mode::Multi {
        if let Some(idx) = session.revive_food.iter().rposition(|r| r.pos == new_head) {
            session.revive_food.remove(idx);
            eat_revive_food(session, slot, events);
        }
    }
}

/// The pickup is consumed whether or not the partner needed it.
fn eat_revive_food(session: &mut GameSession, eater: PlayerSlot, events: &mut Vec<GameEvent>) {
    let partner = eater.other();
    let partner_dead = session.player(partner).map_or(false, |p| !p.is_alive());

    if !partner_dead {
        events.push(GameEvent::ReviveFoodWasted { player: eater });
        return;
    }

    let at = food::find_free_cell(
        &session.grid,
        &session.players,
        session.config.placement_attempts,
        &mut session.rng,
    );
    if let Some(player) = session.player_mut(partner) {
        player.revive_at(at);
    }

    info!(player = partner.number(), by = eater.number(), ?at, "player revived");
    events.push(GameEvent::PlayerRevived { player: partner, by: eater, at });
}

fn update_revive_food(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    for item in &mut session.revive_food {
        item.ticks_left = item.ticks_left.saturating_sub(1);
    }

    let (expired, live): (Vec<ReviveFood>, Vec<ReviveFood>) =
        session.revive_food.drain(..).partition(|item| item.ticks_left == 0);
    session.revive_food = live;

    for item in expired {
        debug!(at = ?item.pos, "revive food expired");
        events.push(GameEvent::ReviveFoodExpired { at: item.pos });
    }
}

fn maybe_spawn_revive_food(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    if session.mode != Mode::Multi || !session.any_dead() || !session.revive_food.is_empty() {
        return;
    }
    if !session.rng.gen_bool(session.config.revive_spawn_chance) {
        return;
    }

    let at = food::find_free_cell(
        &session.grid,
        &session.players,
        session.config.placement_attempts,
        &mut session.rng,
    );
    session
        .revive_food
        .push(ReviveFood::new(at, session.config.revive_color, session.config.revive_food_ticks));

    debug!(?at, "revive food spawned");
    events.push(GameEvent::ReviveFoodSpawned { at });
}
