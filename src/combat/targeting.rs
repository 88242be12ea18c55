//! Per-unit targeting and combat state machine.
//!
//! Each tick a unit runs, in order: validate lock, search, blocker
//! precedence, opportunistic retarget, then attack, chase, or advance. See
//! [`update_unit`].

use crate::abilities::{dispatch, Ability, AbilityEvent};
use crate::core::{edge_distance, EntityId, GameRng, GameState, TargetView, Unit, UnitState, Vec2};
use crate::engine::SimContext;
use crate::navigation;

use super::{can_target, launch, Shot};

/// How far inside attack range a chase ends.
const CHASE_MARGIN: f32 = 0.5;

/// Run one tick of the combat state machine for unit `id`.
///
/// Dead, stunned, frozen, and spell units are skipped.
pub fn update_unit(
    state: &mut GameState,
    ctx: SimContext<'_>,
    rng: &mut GameRng,
    id: EntityId,
    dt: f32,
) {
    let Some(unit) = state.unit(id).cloned() else {
        return;
    };
    if unit.is_spell() || unit.statuses.is_disabled() {
        return;
    }
    let config = ctx.config;
    let arena = &config.arena;

    let mut target = validate_lock(state, ctx, &unit);
    if target.is_none() {
        target = search(state, ctx, &unit);
    }
    if let Some(current) = target {
        target = Some(retarget(state, &unit, ctx, current));
    }
    if target.map(|t| t.id) != unit.target_id {
        if let Some(u) = state.unit_mut(id) {
            u.target_id = target.map(|t| t.id);
            u.state = if target.is_some() {
                UnitState::Attacking
            } else {
                UnitState::Searching
            };
        }
    }

    if let Some(target) = target {
        let gap = edge_distance(unit.position, unit.radius, target.position, target.radius);
        if gap <= unit.range {
            attack(state, ctx, rng, &unit, target, dt);
            return;
        }
    }

    // Chase the target or advance toward the enemy side.
    let speed = unit.statuses.effective_speed(unit.speed);
    if speed <= 0.0 {
        return;
    }
    let target_side = target.map(|t| arena.side_of(t.position));
    let waypoint =
        navigation::next_waypoint(arena, unit.position, unit.lane, unit.team, target_side);
    let (goal, stop_short) = match waypoint {
        Some(waypoint) => (waypoint, 0.0),
        None => match target.or_else(|| nearest_enemy_structure(state, &unit)) {
            Some(t) => (t.position, engage_distance(&unit, &t)),
            None => {
                let bank = arena.home_bank(unit.team.opponent());
                (Vec2::new(unit.position.x, bank), 0.0)
            }
        },
    };

    let distance = unit.position.distance(goal);
    let step = (speed * dt).min((distance - stop_short).max(0.0));
    let proposed = unit.position.move_toward(goal, step);
    let moved = navigation::constrain_move(arena, unit.lane, unit.position, proposed);

    if let Some(u) = state.unit_mut(id) {
        u.position = moved;
        u.state = UnitState::Moving;
        if arena.side_of(moved) != u.team.home_side() {
            u.crossed_river = true;
        }
    }
}

/// Centre distance at which a chase toward `target` stops.
///
/// Ends slightly inside attack range so rounding in the move cannot leave
/// the edge gap a hair above `range`.
fn engage_distance(unit: &Unit, target: &TargetView) -> f32 {
    target.radius + unit.radius + (unit.range - CHASE_MARGIN).max(0.0)
}

/// Keep the current lock if it is still alive, legal, and within the leash.
fn validate_lock(state: &GameState, ctx: SimContext<'_>, unit: &Unit) -> Option<TargetView> {
    let view = state.target_view(unit.target_id?)?;
    if !can_target(unit, &view, &ctx.config.arena) {
        return None;
    }
    if let Some(leash) = ctx.config.combat.leash_distance {
        if unit.position.distance(view.position) > leash {
            return None;
        }
    }
    Some(view)
}

/// Legal enemies of `unit`, paired with their edge distance.
fn legal_targets<'s>(
    state: &'s GameState,
    ctx: SimContext<'s>,
    unit: &'s Unit,
) -> impl Iterator<Item = (f32, TargetView)> + 's {
    state
        .targets_of(unit.team.opponent())
        .filter(move |t| can_target(unit, t, &ctx.config.arena))
        .map(move |t| (edge_distance(unit.position, unit.radius, t.position, t.radius), t))
}

fn nearest(candidates: impl Iterator<Item = (f32, TargetView)>) -> Option<TargetView> {
    candidates
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)))
        .map(|(_, t)| t)
}

/// Nearest legal enemy within aggro radius.
fn search(state: &GameState, ctx: SimContext<'_>, unit: &Unit) -> Option<TargetView> {
    let aggro = ctx.config.combat.aggro_radius(unit.range);
    nearest(legal_targets(state, ctx, unit).filter(|(gap, _)| *gap <= aggro))
}

/// Blocker precedence, then opportunistic retarget.
fn retarget(
    state: &GameState,
    unit: &Unit,
    ctx: SimContext<'_>,
    current: TargetView,
) -> TargetView {
    let in_range_units = || {
        legal_targets(state, ctx, unit)
            .filter(move |(gap, t)| !t.is_tower && *gap <= unit.range)
    };

    if current.is_tower {
        if let Some(blocker) = nearest(in_range_units()) {
            return blocker;
        }
        return current;
    }

    let gap = edge_distance(unit.position, unit.radius, current.position, current.radius);
    if gap > unit.range {
        if let Some(closer) = nearest(in_range_units()) {
            return closer;
        }
    }
    current
}

fn nearest_enemy_structure(state: &GameState, unit: &Unit) -> Option<TargetView> {
    nearest(
        state
            .targets_of(unit.team.opponent())
            .filter(|t| t.is_tower)
            .map(|t| (unit.position.distance(t.position), t)),
    )
}

/// In range: detonate, or hit on cooldown.
fn attack(
    state: &mut GameState,
    ctx: SimContext<'_>,
    rng: &mut GameRng,
    unit: &Unit,
    target: TargetView,
    dt: f32,
) {
    let card = ctx.catalog.get(unit.card_id);
    if card.is_some_and(|c| c.has_ability(|a| matches!(a, Ability::Detonate(_)))) {
        dispatch(state, ctx, rng, unit.id, Some(target.id), AbilityEvent::Collision, dt);
        return;
    }
    if unit.dps <= 0.0 {
        return;
    }

    let now = state.time;
    let combat = &ctx.config.combat;
    let base = unit.scratch.next_cooldown.unwrap_or(combat.hit_cooldown);
    let cooldown = unit.statuses.effective_cooldown(base);
    if unit.last_attack_time.is_some_and(|t| now - t < cooldown) {
        return;
    }
    if let Some(u) = state.unit_mut(unit.id) {
        u.last_attack_time = Some(now);
        u.state = UnitState::Attacking;
    }

    let damage = unit.dps * combat.hit_cooldown;
    if unit.range > combat.melee_range {
        let visuals = card.map(|c| c.visuals.clone()).unwrap_or_default();
        launch(
            state,
            Shot {
                owner: unit.id,
                team: unit.team,
                from: unit.position,
                target,
                speed: visuals.projectile_speed.unwrap_or(combat.projectile_speed),
                damage,
                visual: visuals.projectile,
                rotation_offset: visuals.rotation_offset,
            },
        );
    } else {
        state.apply_damage(target.id, damage);
        dispatch(state, ctx, rng, unit.id, Some(target.id), AbilityEvent::AttackHit, dt);
    }
}
