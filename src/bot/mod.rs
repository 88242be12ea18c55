//! Heuristic opponent.
//!
//! The bot wakes on a jittered cadence and makes at most one play:
//!
//! - **Defend** when an enemy unit on the bot's half is within
//!   `threat_radius` of a bot tower: the cheapest affordable card that can
//!   actually hit the threat, dropped between the threat and the tower.
//! - **Attack** otherwise: a buildings-only tank if one is affordable, else a
//!   mid-cost generalist, else the cheapest card that keeps one elixir in
//!   reserve, else the cheapest card. It goes behind the bot's own bank in
//!   the lane of the weaker enemy princess. Spells are never used to attack.
//!
//! Plays go through [`placement::place`], exactly like a human command. All
//! randomness comes from the tick RNG.

use crate::cards::{CardDefinition, CardId, CardKind};
use crate::core::{ArenaConfig, EntityId, GameRng, GameState, Lane, Side, Team, TowerKind, Vec2};
use crate::engine::SimContext;
use crate::placement;

/// Keeps placement points off the exact river edge.
const BANK_MARGIN: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Defend,
    Attack,
}

/// A play the bot wants to make.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BotDecision {
    pub card_id: CardId,
    pub position: Vec2,
    pub intent: Intent,
}

/// An enemy unit pressing one of the bot's towers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threat {
    pub unit: EntityId,
    pub position: Vec2,
    pub flying: bool,
    pub is_building: bool,
    pub tower_position: Vec2,
    pub distance: f32,
}

/// Run the bot if its cadence has elapsed. Returns the placed unit, if any.
pub fn run(state: &mut GameState, ctx: SimContext<'_>, rng: &mut GameRng) -> Option<EntityId> {
    if !state.bot.enabled || state.is_game_over() {
        return None;
    }
    let now = state.time;
    if now - state.bot.last_think_time < state.bot.next_think_delay {
        return None;
    }
    let bot = &ctx.config.bot;
    state.bot.last_think_time = now;
    state.bot.next_think_delay = rng.gen_range_f32(bot.think_min, bot.think_max);

    let decision = think(state, ctx, rng)?;
    log::trace!(
        "bot {:?}: {} at ({:.0}, {:.0})",
        decision.intent,
        decision.card_id,
        decision.position.x,
        decision.position.y
    );
    match placement::place(state, ctx, rng, decision.card_id, decision.position, bot.team) {
        Ok(id) => Some(id),
        Err(err) => {
            log::debug!("bot play rejected: {}", err);
            None
        }
    }
}

/// Choose a play without applying it.
pub fn think(state: &GameState, ctx: SimContext<'_>, rng: &mut GameRng) -> Option<BotDecision> {
    let team = ctx.config.bot.team;
    let elixir = state.elixir[team];
    let hand: Vec<&CardDefinition> = state.deck[team]
        .hand
        .iter()
        .filter_map(|id| ctx.catalog.get(*id))
        .filter(|c| (c.cost as f32) <= elixir + f32::EPSILON)
        .collect();
    if hand.is_empty() {
        return None;
    }

    if let Some(threat) = find_threat(state, ctx, team) {
        if let Some(card) = pick_defense(&hand, &threat) {
            let position = defense_point(ctx, team, card, &threat, rng);
            return Some(BotDecision { card_id: card.id, position, intent: Intent::Defend });
        }
    }

    let card = pick_attack(ctx, &hand, elixir)?;
    let position = attack_point(state, ctx, team, rng);
    Some(BotDecision { card_id: card.id, position, intent: Intent::Attack })
}

/// Nearest enemy unit on the bot's half within `threat_radius` of a bot tower.
#[must_use]
pub fn find_threat(state: &GameState, ctx: SimContext<'_>, team: Team) -> Option<Threat> {
    let arena = &ctx.config.arena;
    let radius = ctx.config.bot.threat_radius;
    let towers: Vec<Vec2> = state
        .towers
        .iter()
        .filter(|t| t.team == team && t.is_alive())
        .map(|t| t.position)
        .collect();
    let towers = &towers;

    state
        .targets_of(team.opponent())
        .filter(|t| !t.is_tower && arena.side_of(t.position) == team.home_side())
        .flat_map(move |t| {
            towers.iter().map(move |tower| Threat {
                unit: t.id,
                position: t.position,
                flying: t.flying,
                is_building: t.is_building,
                tower_position: *tower,
                distance: t.position.distance(*tower),
            })
        })
        .filter(|threat| threat.distance < radius)
        .min_by(|a, b| a.distance.total_cmp(&b.distance).then(a.unit.cmp(&b.unit)))
}

/// Cheapest card that can hit the threat.
fn pick_defense<'c>(hand: &[&'c CardDefinition], threat: &Threat) -> Option<&'c CardDefinition> {
    let mut candidates: Vec<&CardDefinition> = hand
        .iter()
        .copied()
        .filter(|c| !c.targets.is_empty() && (c.dps > 0.0 || c.kind == CardKind::Spell))
        .filter(|c| !(c.buildings_only() && !threat.is_building))
        .filter(|c| !(threat.flying && !c.hits_air()))
        .collect();
    candidates.sort_by_key(|c| c.cost);
    candidates.first().copied()
}

fn pick_attack<'c>(
    ctx: SimContext<'_>,
    hand: &[&'c CardDefinition],
    elixir: f32,
) -> Option<&'c CardDefinition> {
    let bot = &ctx.config.bot;
    let troops: Vec<&CardDefinition> = hand
        .iter()
        .copied()
        .filter(|c| c.kind != CardKind::Spell)
        .collect();

    if let Some(tank) = troops.iter().find(|c| c.buildings_only() && c.hp >= bot.tank_hp) {
        return Some(tank);
    }
    if let Some(mid) = troops
        .iter()
        .find(|c| (bot.mid_cost_min..=bot.mid_cost_max).contains(&c.cost))
    {
        return Some(mid);
    }
    let mut by_cost = troops;
    by_cost.sort_by_key(|c| c.cost);
    by_cost
        .iter()
        .find(|c| elixir - c.cost as f32 >= 1.0)
        .or(by_cost.first())
        .copied()
}

fn defense_point(
    ctx: SimContext<'_>,
    team: Team,
    card: &CardDefinition,
    threat: &Threat,
    rng: &mut GameRng,
) -> Vec2 {
    let jitter = ctx.config.bot.placement_jitter;
    let base = if card.kind == CardKind::Spell {
        threat.position
    } else {
        threat.position.midpoint(threat.tower_position)
    };
    let point = Vec2::new(base.x + rng.jitter(jitter), base.y + rng.jitter(jitter));
    clamp_to_half(&ctx.config.arena, team, point)
}

fn attack_point(state: &GameState, ctx: SimContext<'_>, team: Team, rng: &mut GameRng) -> Vec2 {
    let arena = &ctx.config.arena;
    let bot = &ctx.config.bot;

    let lane = state
        .towers
        .iter()
        .filter(|t| t.team == team.opponent() && t.kind == TowerKind::Princess && t.is_alive())
        .min_by(|a, b| a.hp.total_cmp(&b.hp).then(a.id.cmp(&b.id)))
        .map_or(Lane::Left, |t| arena.lane_for_x(t.position.x));

    let behind = match team.home_side() {
        Side::North => arena.river_top - bot.attack_depth,
        Side::South => arena.river_bottom + bot.attack_depth,
    };
    let point = Vec2::new(
        arena.bridge_x(lane) + rng.jitter(bot.placement_jitter),
        behind + rng.jitter(bot.placement_jitter),
    );
    clamp_to_half(arena, team, point)
}

/// Clamp into the part of the team's half where troops may be placed.
#[must_use]
pub fn clamp_to_half(arena: &ArenaConfig, team: Team, point: Vec2) -> Vec2 {
    let (lo, hi) = match team.home_side() {
        Side::North => (0.0, arena.river_top - BANK_MARGIN),
        Side::South => (arena.river_bottom + BANK_MARGIN, arena.height),
    };
    Vec2::new(point.x.clamp(0.0, arena.width), point.y.clamp(lo, hi))
}
