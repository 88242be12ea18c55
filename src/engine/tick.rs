//! Phases of one simulation tick.

use rustc_hash::FxHashSet;

use crate::abilities::{dispatch, AbilityEvent};
use crate::combat::{resolve_projectiles, towers_attack, update_unit};
use crate::core::{EntityId, GameRng, GameState, MatchStatus, Team, TowerKind, UnitState};
use crate::{bot, economy};

use super::SimContext;

/// Upper bound on chained death waves (death abilities killing more units).
const MAX_DEATH_WAVES: usize = 8;

/// Advance `state` by `dt` seconds in place.
///
/// `dt` must already be clamped. The master RNG advances exactly once.
pub(super) fn advance(state: &mut GameState, ctx: SimContext<'_>, dt: f32) {
    let mut master = GameRng::from_state(&state.rng_state);
    let mut rng = master.fork();

    state.time += dt;
    let economy = &ctx.config.economy;
    economy::regenerate(&mut state.elixir, economy.elixir_regen, economy.elixir_max, dt);

    bot::run(state, ctx, &mut rng);

    let now = state.time;
    for unit in state.units.iter_mut() {
        unit.statuses.prune(now);
    }

    let roster: Vec<EntityId> = state.units.iter().filter(|u| u.is_alive()).map(|u| u.id).collect();
    for id in roster {
        if state.unit(id).is_none() {
            continue;
        }
        update_unit(state, ctx, &mut rng, id, dt);
        if state.unit(id).is_some() {
            dispatch(state, ctx, &mut rng, id, None, AbilityEvent::Tick, dt);
        }
    }

    resolve_projectiles(state, ctx, &mut rng, dt);
    towers_attack(state, ctx.config);

    resolve_deaths(state, ctx, &mut rng, dt);
    resolve_towers(state);
    clear_stale_references(state);
    check_timer(state, ctx);

    state.rng_state = master.state();
}

/// Fire death abilities, then drop every dead unit.
fn resolve_deaths(state: &mut GameState, ctx: SimContext<'_>, rng: &mut GameRng, dt: f32) {
    let mut handled: FxHashSet<EntityId> = FxHashSet::default();
    for _ in 0..MAX_DEATH_WAVES {
        let fallen: Vec<EntityId> = state
            .units
            .iter()
            .filter(|u| !u.is_alive() && !handled.contains(&u.id))
            .map(|u| u.id)
            .collect();
        if fallen.is_empty() {
            break;
        }
        for id in fallen {
            handled.insert(id);
            dispatch(state, ctx, rng, id, None, AbilityEvent::Death, dt);
        }
    }
    state.units.retain(|u| u.is_alive());
}

/// Remove destroyed towers and end the match if a king fell.
fn resolve_towers(state: &mut GameState) {
    let fallen_kings: Vec<Team> = state
        .towers
        .iter()
        .filter(|t| t.kind == TowerKind::King && !t.is_alive())
        .map(|t| t.team)
        .collect();
    state.towers.retain(|t| t.is_alive());

    if fallen_kings.is_empty() || state.is_game_over() {
        return;
    }
    let winner = match fallen_kings.as_slice() {
        [team] => Some(team.opponent()),
        _ => None,
    };
    finish(state, winner, "king tower destroyed");
}

/// Drop locks, child ids, and projectiles that point at removed entities.
fn clear_stale_references(state: &mut GameState) {
    let live: FxHashSet<EntityId> = state
        .towers
        .iter()
        .map(|t| t.id)
        .chain(state.units.iter().map(|u| u.id))
        .collect();

    for unit in state.units.iter_mut() {
        unit.spawned_units.retain(|child| live.contains(child));
        if unit.target_id.is_some_and(|t| !live.contains(&t)) {
            unit.target_id = None;
            unit.state = UnitState::Searching;
        }
    }
    state.projectiles.retain(|p| live.contains(&p.target_id));
}

/// At the buzzer: more towers wins, then more tower hp, else a draw.
fn check_timer(state: &mut GameState, ctx: SimContext<'_>) {
    if state.is_game_over() || state.time < ctx.config.match_duration {
        return;
    }
    let (blue, red) = (Team::Blue, Team::Red);
    let by_towers = state.tower_count(blue).cmp(&state.tower_count(red));
    let winner = match by_towers {
        std::cmp::Ordering::Greater => Some(blue),
        std::cmp::Ordering::Less => Some(red),
        std::cmp::Ordering::Equal => {
            let (blue_hp, red_hp) = (state.tower_hp(blue), state.tower_hp(red));
            if blue_hp > red_hp {
                Some(blue)
            } else if red_hp > blue_hp {
                Some(red)
            } else {
                None
            }
        }
    };
    finish(state, winner, "time expired");
}

fn finish(state: &mut GameState, winner: Option<Team>, reason: &str) {
    state.status = MatchStatus::GameOver;
    state.winner = winner;
    match winner {
        Some(team) => log::info!("match over at {:.1}s ({}): {} wins", state.time, reason, team),
        None => log::info!("match over at {:.1}s ({}): draw", state.time, reason),
    }
}
