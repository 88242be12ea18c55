//! Ability handlers, one function per ability.

use std::f32::consts::{PI, TAU};

use rustc_hash::FxHashSet;

use crate::core::{TargetView, UnitState, Vec2};
use crate::error::AbilityError;
use crate::navigation;
use crate::status::StatusKind;

use super::params::*;
use super::scratch::{count_hit, interval_elapsed};
use super::{Ability, AbilityEvent, AbilityScope};

type HandlerResult = Result<(), AbilityError>;

pub(super) fn run(
    ability: &Ability,
    event: AbilityEvent,
    scope: &mut AbilityScope<'_>,
) -> HandlerResult {
    match ability {
        Ability::StealElixir(p) => steal_elixir(p, scope),
        Ability::SplashDamage(p) => splash_damage(p, scope),
        Ability::SlowOnHit(p) => slow_on_hit(p, scope),
        Ability::StunEveryN(p) => stun_every_n(p, scope),
        Ability::CoinflipSpawn(p) => coinflip_spawn(p, scope),
        Ability::BattleRam(p) => battle_ram(p, scope),
        Ability::DuoUnit(p) => duo_unit(p, scope),
        Ability::RandomAura(p) => random_aura(p, scope),
        Ability::SpawnMinions(p) => spawn_minions(p, scope),
        Ability::ChargeStrike(p) => match event {
            AbilityEvent::AttackHit => charge_strike_hit(p, scope),
            _ => charge_strike_tick(p, scope),
        },
        Ability::PierceLine(p) => pierce_line(p, scope),
        Ability::AuraSlow(p) => aura_slow(p, scope),
        Ability::ChainLightning(p) => chain_lightning(p, scope),
        Ability::Detonate(p) => detonate(p, scope),
        Ability::BurstFire(p) => burst_fire(p, scope),
        Ability::FreezePulse(p) => freeze_pulse(p, scope),
        Ability::RampingDamage(p) => ramping_damage(p, scope),
        Ability::GoblinBarrel(p) => goblin_barrel(p, scope),
        Ability::BarrelFuse(p) => match event {
            AbilityEvent::Spawn => barrel_fuse_arm(p, scope),
            AbilityEvent::Death => barrel_fuse_release(p, scope),
            _ => barrel_fuse_tick(scope),
        },
        Ability::Lifetime(p) => match event {
            AbilityEvent::Spawn => lifetime_arm(p, scope),
            _ => lifetime_tick(scope),
        },
        Ability::AreaDamage(p) => area_damage(p, scope),
    }
}

/// Primary target and where it stands, even if the hit just killed it.
fn primary(scope: &AbilityScope<'_>) -> Option<(crate::core::EntityId, Vec2)> {
    let id = scope.target?;
    Some((id, scope.entity_position(id)?))
}

fn steal_elixir(p: &StealElixirParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let team = scope.source_unit()?.team;
    if !count_hit(&mut scope.source_unit_mut()?.scratch.steal_hits, p.every_n_attacks) {
        return Ok(());
    }
    let max = scope.config().economy.elixir_max;
    let enemy = team.opponent();
    let stolen = p.amount.min(scope.state.elixir[enemy]).max(0.0);
    scope.state.elixir[enemy] -= stolen;
    scope.state.elixir[team] = (scope.state.elixir[team] + stolen).min(max);
    Ok(())
}

fn splash_damage(p: &SplashDamageParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let Some((primary_id, center)) = primary(scope) else {
        return Ok(());
    };
    let unit = scope.source_unit()?;
    let (team, hits_air) = (unit.team, unit.hits_air());
    let amount = scope.hit_damage(unit.dps) * p.damage_ratio;

    let splashed: Vec<TargetView> = scope
        .enemy_targets_near(team, center, p.radius)
        .into_iter()
        .filter(|t| t.id != primary_id && (hits_air || !t.flying))
        .collect();
    for target in splashed {
        scope.damage(target.id, amount);
    }
    Ok(())
}

fn slow_on_hit(p: &SlowOnHitParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    if let Some(target) = scope.target {
        scope.apply_status(target, StatusKind::Slow, p.magnitude, p.duration);
    }
    Ok(())
}

fn stun_every_n(p: &StunEveryNParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let team = scope.source_unit()?.team;
    if !count_hit(&mut scope.source_unit_mut()?.scratch.stun_hits, p.every_n_hits) {
        return Ok(());
    }
    let Some((_, center)) = primary(scope) else {
        return Ok(());
    };
    for target in scope.enemy_units_near(team, center, p.radius) {
        scope.apply_status(target.id, StatusKind::Stun, 1.0, p.duration);
    }
    Ok(())
}

fn coinflip_spawn(p: &CoinflipSpawnParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    if !scope.rng.gen_bool(f64::from(p.spawn_probability)) {
        let unit = scope.source_unit_mut()?;
        unit.hp = 0.0;
        log::debug!("{} lost its coinflip", unit.id);
    }
    Ok(())
}

fn battle_ram(p: &BattleRamParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let unit = scope.source_unit()?;
    if !unit.is_alive() || unit.state != UnitState::Moving {
        return Ok(());
    }
    let (team, origin, reach) = (unit.team, unit.position, unit.radius + p.contact_margin);

    let contacts: Vec<TargetView> = scope
        .enemy_units_near(team, origin, reach)
        .into_iter()
        .filter(|t| !t.is_building && !t.flying)
        .filter(|t| scope.gap_to(t).is_some_and(|gap| gap <= p.contact_margin))
        .collect();

    let arena = scope.config().arena.clone();
    for target in contacts {
        let mut push = (target.position - origin).normalize_or_zero();
        if push == Vec2::ZERO {
            push = Vec2::new(0.0, team.forward());
        }
        let to = target.position + push * p.knockback;
        if let Some(enemy) = scope.state.unit_mut(target.id) {
            enemy.position = navigation::constrain_move(&arena, enemy.lane, enemy.position, to);
        }
        scope.apply_status(target.id, StatusKind::Stun, 1.0, p.stun);
    }
    Ok(())
}

fn duo_unit(p: &DuoUnitParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let unit = scope.source_unit_mut()?;
    let base_hp = unit.max_hp;
    unit.max_hp = base_hp * p.front_hp_ratio;
    unit.hp = unit.max_hp;
    let (team, position) = (unit.team, unit.position);

    let behind = Vec2::new(position.x, position.y - team.forward() * p.offset);
    let partner = scope.spawn_token(&p.partner, behind, team)?;
    if let Some(back) = scope.state.unit_mut(partner) {
        back.max_hp = base_hp * p.back_hp_ratio;
        back.hp = back.max_hp;
    }
    Ok(())
}

fn random_aura(p: &RandomAuraParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let now = scope.now();
    let unit = scope.source_unit_mut()?;
    if !interval_elapsed(&mut unit.scratch.aura_last, now, p.interval) {
        return Ok(());
    }
    let (team, center) = (unit.team, unit.position);

    match scope.rng.gen_range(0..3) {
        0 => {
            for ally in scope.ally_units_near(team, center, p.radius) {
                scope.apply_status(ally, StatusKind::Rage, p.rage, p.duration);
            }
        }
        1 => {
            for ally in scope.ally_units_near(team, center, p.radius) {
                scope.apply_status(ally, StatusKind::Boost, p.boost, p.duration);
            }
        }
        _ => {
            for enemy in scope.enemy_units_near(team, center, p.radius) {
                scope.apply_status(enemy.id, StatusKind::Slow, p.slow, p.duration);
            }
        }
    }
    Ok(())
}

fn spawn_minions(p: &SpawnMinionsParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    if p.interval <= 0.0 {
        return Err(AbilityError::InvalidParam("interval"));
    }
    let now = scope.now();
    let unit = scope.source_unit_mut()?;
    if !interval_elapsed(&mut unit.scratch.spawn_last, now, p.interval) {
        return Ok(());
    }
    let (team, position) = (unit.team, unit.position);
    let children = unit.spawned_units.clone();
    let live: smallvec::SmallVec<[_; 4]> =
        children.into_iter().filter(|id| scope.state.unit(*id).is_some()).collect();

    let room = p.max_active.saturating_sub(live.len());
    let count = (p.count as usize).min(room);
    let mut spawned = live;
    for i in 0..count {
        let spread = (i as f32 - (count as f32 - 1.0) / 2.0) * p.spacing;
        let at = Vec2::new(position.x + spread, position.y - team.forward() * p.offset);
        spawned.push(scope.spawn_token(&p.token, at, team)?);
    }
    scope.source_unit_mut()?.spawned_units = spawned;
    Ok(())
}

fn charge_strike_tick(p: &ChargeStrikeParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let unit = scope.source_unit_mut()?;
    let scratch = &mut unit.scratch;
    if unit.state == UnitState::Moving {
        let origin = *scratch.charge_origin.get_or_insert(unit.position);
        if origin.distance(unit.position) >= p.min_distance {
            scratch.charged = true;
        }
    } else if !scratch.charged {
        scratch.charge_origin = None;
    }
    Ok(())
}

fn charge_strike_hit(p: &ChargeStrikeParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let unit = scope.source_unit_mut()?;
    if !unit.scratch.charged {
        return Ok(());
    }
    unit.scratch.charged = false;
    unit.scratch.charge_origin = None;
    let dps = unit.dps;

    if let Some(target) = scope.target {
        let bonus = scope.hit_damage(dps) * (p.multiplier - 1.0).max(0.0);
        scope.damage(target, bonus);
    }
    Ok(())
}

fn pierce_line(p: &PierceLineParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let Some((primary_id, target_pos)) = primary(scope) else {
        return Ok(());
    };
    let unit = scope.source_unit()?;
    let (team, origin, hits_air, reach) = (unit.team, unit.position, unit.hits_air(), unit.range);
    let amount = scope.hit_damage(unit.dps);

    let heading = (target_pos - origin).angle();
    let primary_distance = origin.distance(target_pos);
    let extra: Vec<TargetView> = scope
        .enemy_targets_near(team, origin, primary_distance + reach)
        .into_iter()
        .filter(|t| t.id != primary_id && (hits_air || !t.flying))
        .filter(|t| origin.distance(t.position) > primary_distance)
        .filter(|t| {
            let mut diff = (t.position - origin).angle() - heading;
            while diff > PI {
                diff -= TAU;
            }
            while diff < -PI {
                diff += TAU;
            }
            diff.abs() <= p.cone
        })
        .take(p.max_targets.saturating_sub(1))
        .collect();

    for target in extra {
        scope.damage(target.id, amount);
    }
    Ok(())
}

fn aura_slow(p: &AuraSlowParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let unit = scope.source_unit()?;
    let (team, center) = (unit.team, unit.position);
    for enemy in scope.enemy_units_near(team, center, p.radius) {
        scope.apply_status(enemy.id, StatusKind::Slow, p.magnitude, p.refresh);
    }
    Ok(())
}

fn chain_lightning(p: &ChainLightningParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let Some((primary_id, mut last)) = primary(scope) else {
        return Ok(());
    };
    let unit = scope.source_unit()?;
    let (team, hits_air) = (unit.team, unit.hits_air());
    let base = scope.hit_damage(unit.dps);

    let mut hit = FxHashSet::default();
    hit.insert(primary_id);
    for link in 1..p.max_targets {
        let next = scope
            .enemy_targets_near(team, last, p.radius)
            .into_iter()
            .find(|t| !hit.contains(&t.id) && (hits_air || !t.flying));
        let Some(next) = next else {
            break;
        };
        let ratio = p.falloff.get(link).or(p.falloff.last()).copied().unwrap_or(1.0);
        scope.damage(next.id, base * ratio);
        hit.insert(next.id);
        last = next.position;
    }
    Ok(())
}

fn detonate(p: &DetonateParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let team = scope.source_unit()?.team;
    if let Some((target_id, center)) = primary(scope) {
        scope.damage(target_id, p.damage);
        let splashed: Vec<TargetView> = scope
            .enemy_targets_near(team, center, p.splash_radius)
            .into_iter()
            .filter(|t| t.id != target_id)
            .collect();
        for target in splashed {
            scope.damage(target.id, p.damage * p.splash_ratio);
        }
    }
    scope.source_unit_mut()?.hp = 0.0;
    Ok(())
}

fn burst_fire(p: &BurstFireParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let scratch = &mut scope.source_unit_mut()?.scratch;
    let fired = scratch.burst_count.unwrap_or(0) + 1;
    if fired >= p.burst_size {
        scratch.burst_count = Some(0);
        scratch.next_cooldown = None;
    } else {
        scratch.burst_count = Some(fired);
        scratch.next_cooldown = Some(p.burst_cooldown);
    }
    Ok(())
}

fn freeze_pulse(p: &FreezePulseParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let now = scope.now();
    let unit = scope.source_unit_mut()?;
    if !interval_elapsed(&mut unit.scratch.pulse_last, now, p.interval) {
        return Ok(());
    }
    let (team, center) = (unit.team, unit.position);
    for enemy in scope.enemy_units_near(team, center, p.radius) {
        scope.apply_status(enemy.id, StatusKind::Freeze, 1.0, p.duration);
    }
    Ok(())
}

fn ramping_damage(p: &RampingDamageParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    if p.ramp_time <= 0.0 {
        return Err(AbilityError::InvalidParam("ramp_time"));
    }
    let dt = scope.dt;
    let unit = scope.source_unit_mut()?;
    let target = unit.target_id;
    let scratch = &mut unit.scratch;

    if target.is_none() || scratch.ramp_target != target {
        scratch.ramp_target = target;
        scratch.ramp_progress = Some(0.0);
    } else {
        *scratch.ramp_progress.get_or_insert(0.0) += dt;
    }
    let progress = (scratch.ramp_progress.unwrap_or(0.0) / p.ramp_time).min(1.0);
    unit.dps = p.min_dps + (p.max_dps - p.min_dps) * progress;
    Ok(())
}

fn goblin_barrel(p: &GoblinBarrelParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let unit = scope.source_unit()?;
    let (team, position) = (unit.team, unit.position);
    scope.spawn_token(&p.token, position, team)?;
    Ok(())
}

fn barrel_fuse_arm(p: &BarrelFuseParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let now = scope.now();
    scope.source_unit_mut()?.scratch.fuse_at = Some(now + p.fuse);
    Ok(())
}

fn barrel_fuse_tick(scope: &mut AbilityScope<'_>) -> HandlerResult {
    let now = scope.now();
    let unit = scope.source_unit_mut()?;
    if unit.scratch.fuse_at.is_some_and(|at| now >= at) {
        unit.hp = 0.0;
    }
    Ok(())
}

fn barrel_fuse_release(p: &BarrelFuseParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let unit = scope.source_unit()?;
    let (team, center) = (unit.team, unit.position);
    let count = p.count.max(1);
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32;
        let at = center + Vec2::new(angle.cos(), angle.sin()) * p.spread;
        scope.spawn_token(&p.token, at, team)?;
    }
    Ok(())
}

fn lifetime_arm(p: &LifetimeParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let now = scope.now();
    scope.source_unit_mut()?.scratch.expires_at = Some(now + p.seconds);
    Ok(())
}

fn lifetime_tick(scope: &mut AbilityScope<'_>) -> HandlerResult {
    let now = scope.now();
    let unit = scope.source_unit_mut()?;
    if unit.scratch.expires_at.is_some_and(|at| now >= at) {
        unit.hp = 0.0;
    }
    Ok(())
}

fn area_damage(p: &AreaDamageParams, scope: &mut AbilityScope<'_>) -> HandlerResult {
    let unit = scope.source_unit()?;
    let (team, center) = (unit.team, unit.position);
    for target in scope.enemy_targets_near(team, center, p.radius) {
        let amount = if target.is_tower { p.damage * p.tower_ratio } else { p.damage };
        scope.damage(target.id, amount);
    }
    Ok(())
}
