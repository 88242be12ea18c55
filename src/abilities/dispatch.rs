//! Event dispatch with per-handler rollback.

use crate::cards::CardDefinition;
use crate::core::{
    edge_distance, EngineConfig, EntityId, GameRng, GameState, Team, TargetView, Unit, Vec2,
};
use crate::engine::SimContext;
use crate::error::AbilityError;
use crate::navigation;
use crate::status::{StatusEffect, StatusKind};

use super::{handlers, AbilityEvent, DeclaredAbility};

/// Mutable view handed to one ability handler.
///
/// `state` is a private copy of the snapshot. It is committed only if the
/// handler returns `Ok`.
pub struct AbilityScope<'a> {
    pub state: &'a mut GameState,
    pub ctx: SimContext<'a>,
    pub rng: &'a mut GameRng,
    /// Unit that owns the ability.
    pub source: EntityId,
    /// Entity hit or collided with, for `AttackHit` and `Collision`.
    pub target: Option<EntityId>,
    pub dt: f32,
}

impl AbilityScope<'_> {
    #[must_use]
    pub fn now(&self) -> f32 {
        self.state.time
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.ctx.config
    }

    /// The owning unit, alive or not. Death handlers run on dead units.
    pub fn source_unit(&self) -> Result<&Unit, AbilityError> {
        self.state
            .units
            .iter()
            .find(|u| u.id == self.source)
            .ok_or(AbilityError::MissingSource(self.source))
    }

    pub fn source_unit_mut(&mut self) -> Result<&mut Unit, AbilityError> {
        let source = self.source;
        self.state.unit_mut(source).ok_or(AbilityError::MissingSource(source))
    }

    /// Position of any unit or tower, including one that just died.
    #[must_use]
    pub fn entity_position(&self, id: EntityId) -> Option<Vec2> {
        self.state
            .towers
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.position)
            .or_else(|| self.state.units.iter().find(|u| u.id == id).map(|u| u.position))
    }

    /// Live attackable enemies of `team` whose body overlaps the circle,
    /// nearest first.
    #[must_use]
    pub fn enemy_targets_near(&self, team: Team, center: Vec2, radius: f32) -> Vec<TargetView> {
        let mut found: Vec<(f32, TargetView)> = self
            .state
            .targets_of(team.opponent())
            .filter_map(|t| {
                let d = t.position.distance(center);
                (d <= radius + t.radius).then_some((d, t))
            })
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)));
        found.into_iter().map(|(_, t)| t).collect()
    }

    /// Like [`enemy_targets_near`](Self::enemy_targets_near) without towers.
    #[must_use]
    pub fn enemy_units_near(&self, team: Team, center: Vec2, radius: f32) -> Vec<TargetView> {
        let mut targets = self.enemy_targets_near(team, center, radius);
        targets.retain(|t| !t.is_tower);
        targets
    }

    /// Live, non-spell units of `team` overlapping the circle, in id order.
    #[must_use]
    pub fn ally_units_near(&self, team: Team, center: Vec2, radius: f32) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .state
            .units_of(team)
            .filter(|u| !u.is_spell() && u.position.distance(center) <= radius + u.radius)
            .map(|u| u.id)
            .collect();
        ids.sort();
        ids
    }

    /// Edge-to-edge gap between the source and another entity.
    #[must_use]
    pub fn gap_to(&self, target: &TargetView) -> Option<f32> {
        let unit = self.source_unit().ok()?;
        Some(edge_distance(unit.position, unit.radius, target.position, target.radius))
    }

    pub fn damage(&mut self, id: EntityId, amount: f32) -> bool {
        self.state.apply_damage(id, amount)
    }

    /// Apply a timed status to a live unit. Towers are immune.
    pub fn apply_status(&mut self, id: EntityId, kind: StatusKind, magnitude: f32, duration: f32) {
        let expires_at = self.now() + duration;
        let source = self.source;
        if let Some(unit) = self.state.unit_mut(id) {
            if unit.is_alive() {
                let effect = StatusEffect::new(kind, magnitude, expires_at).with_source(source);
                unit.statuses.apply(effect);
            }
        }
    }

    /// Damage of one regular hit at `dps`.
    #[must_use]
    pub fn hit_damage(&self, dps: f32) -> f32 {
        dps * self.config().combat.hit_cooldown
    }

    /// Spawn a unit of the token card `name` and fire its spawn abilities.
    pub fn spawn_token(
        &mut self,
        name: &str,
        position: Vec2,
        team: Team,
    ) -> Result<EntityId, AbilityError> {
        let ctx = self.ctx;
        let card: &CardDefinition = ctx
            .catalog
            .by_name(name)
            .ok_or_else(|| AbilityError::MissingToken(name.to_string()))?;
        let position = navigation::settle(&ctx.config.arena, position);
        let id = self.state.alloc_id();
        let unit = Unit::from_card(id, card, team, position, ctx.config, self.state.time);
        self.state.units.push_back(unit);
        dispatch(self.state, ctx, self.rng, id, None, AbilityEvent::Spawn, 0.0);
        Ok(id)
    }
}

/// Run every ability of `source` registered for `event`.
///
/// The source is looked up regardless of liveness, so death handlers and
/// transient spell units work. Each handler runs on a copy of `state`; a
/// failing handler leaves `state` and `rng` exactly as they were.
pub fn dispatch(
    state: &mut GameState,
    ctx: SimContext<'_>,
    rng: &mut GameRng,
    source: EntityId,
    target: Option<EntityId>,
    event: AbilityEvent,
    dt: f32,
) {
    let Some(card_id) = state.units.iter().find(|u| u.id == source).map(|u| u.card_id) else {
        return;
    };
    let Some(card) = ctx.catalog.get(card_id) else {
        log::warn!("{} references unknown {}", source, card_id);
        return;
    };

    for declared in &card.abilities {
        let ability = match declared {
            DeclaredAbility::Known(ability) if ability.handles(event) => ability,
            DeclaredAbility::Known(_) => continue,
            DeclaredAbility::Unknown { key, .. } => {
                if event == AbilityEvent::Spawn {
                    log::warn!("card `{}` declares unknown ability `{}`; ignored", card.name, key);
                }
                continue;
            }
        };

        let mut working = state.clone();
        let checkpoint = rng.clone();
        let result = {
            let mut scope = AbilityScope {
                state: &mut working,
                ctx,
                rng: &mut *rng,
                source,
                target,
                dt,
            };
            handlers::run(ability, event, &mut scope)
        };

        match result {
            Ok(()) => *state = working,
            Err(err) => {
                *rng = checkpoint;
                log::warn!(
                    "ability `{}` on {} failed during {:?}: {}",
                    ability.key(),
                    source,
                    event,
                    err
                );
            }
        }
    }
}
