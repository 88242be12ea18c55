//! Homing projectile resolution.

use crate::abilities::{dispatch, AbilityEvent};
use crate::core::{EntityId, GameRng, GameState};
use crate::engine::SimContext;

/// Slowest speed a projectile is ever moved at, so every shot lands.
const MIN_SPEED: f32 = 1.0;

/// Advance every projectile one tick.
///
/// A projectile whose target is gone is dropped without effect. One that
/// comes within `travel + impact_tolerance * target radius` of its target
/// deals its damage, fires the owner's `AttackHit` abilities if the owner is
/// a live unit, and is removed.
pub fn resolve_projectiles(state: &mut GameState, ctx: SimContext<'_>, rng: &mut GameRng, dt: f32) {
    let tolerance = ctx.config.combat.impact_tolerance;
    let ids: Vec<EntityId> = state.projectiles.iter().map(|p| p.id).collect();

    for id in ids {
        let Some(index) = state.projectiles.iter().position(|p| p.id == id) else {
            continue;
        };
        let shot = state.projectiles[index].clone();
        let Some(target) = state.target_view(shot.target_id) else {
            state.projectiles.remove(index);
            continue;
        };

        let travel = shot.speed.max(MIN_SPEED) * dt;
        let remaining = shot.position.distance(target.position);
        if remaining <= travel + tolerance * target.radius {
            state.projectiles.remove(index);
            state.apply_damage(target.id, shot.damage);
            if state.unit(shot.owner).is_some() {
                dispatch(state, ctx, rng, shot.owner, Some(target.id), AbilityEvent::AttackHit, dt);
            }
            continue;
        }

        if let Some(p) = state.projectiles.get_mut(index) {
            p.position = p.position.move_toward(target.position, travel);
            p.angle = (target.position - p.position).angle();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::core::{EngineConfig, Projectile, Team, Unit, Vec2};

    fn setup() -> (EngineConfig, CardCatalog, GameState, EntityId) {
        let config = EngineConfig::default();
        let catalog = CardCatalog::builtin();
        let mut state = GameState::new(&config, 1);
        let id = state.alloc_id();
        let knight = catalog.by_name("knight").unwrap();
        let at = Vec2::new(100.0, 600.0);
        state
            .units
            .push_back(Unit::from_card(id, knight, Team::Blue, at, &config, 0.0));
        (config, catalog, state, id)
    }

    fn shot_at(state: &mut GameState, target: EntityId, from: Vec2) {
        let id = state.alloc_id();
        state.projectiles.push_back(Projectile {
            id,
            owner: EntityId::tower(1),
            team: Team::Red,
            target_id: target,
            position: from,
            speed: 400.0,
            damage: 100.0,
            visual: None,
            angle: 0.0,
            rotation_offset: 0.0,
        });
    }

    #[test]
    fn test_projectile_lands_within_bound() {
        let (config, catalog, mut state, target) = setup();
        shot_at(&mut state, target, Vec2::new(100.0, 300.0));
        let ctx = SimContext::new(&config, &catalog);
        let mut rng = GameRng::new(1);

        // 300 px at 400 px/s with 0.1 s ticks: at most 8 ticks.
        let mut ticks = 0;
        while !state.projectiles.is_empty() {
            resolve_projectiles(&mut state, ctx, &mut rng, 0.1);
            ticks += 1;
            assert!(ticks <= 8);
        }
        assert_eq!(state.unit(target).unwrap().hp, 1400.0 - 100.0);
    }

    #[test]
    fn test_fizzles_when_target_dies() {
        let (config, catalog, mut state, target) = setup();
        shot_at(&mut state, target, Vec2::new(100.0, 300.0));
        state.unit_mut(target).unwrap().hp = 0.0;

        let mut rng = GameRng::new(1);
        resolve_projectiles(&mut state, SimContext::new(&config, &catalog), &mut rng, 0.1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_homes_on_moving_target() {
        let (config, catalog, mut state, target) = setup();
        shot_at(&mut state, target, Vec2::new(100.0, 300.0));
        state.unit_mut(target).unwrap().position = Vec2::new(300.0, 300.0);

        let mut rng = GameRng::new(1);
        resolve_projectiles(&mut state, SimContext::new(&config, &catalog), &mut rng, 0.1);
        let p = &state.projectiles[0];
        assert_eq!(p.position, Vec2::new(140.0, 300.0));
    }
}
