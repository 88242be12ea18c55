//! Targeting, attacks, projectiles, and towers.
//!
//! ## Legal targets
//!
//! A unit may attack an enemy when all of these hold:
//! - the target is flying only if the unit hits air
//! - a buildings-only unit only attacks towers and building cards
//! - the target is on the unit's half, or the unit has crossed the river
//!
//! Towers attack any enemy unit in range, flying or not.
//!
//! ## Hits
//!
//! Every attack deals `dps * hit_cooldown`. Melee hits land immediately and
//! fire the attacker's `AttackHit` abilities at once. Ranged attackers and
//! towers launch a homing [`Projectile`]; abilities fire on impact.

pub mod projectile;
pub mod targeting;
pub mod towers;

pub use projectile::resolve_projectiles;
pub use targeting::update_unit;
pub use towers::{initial_towers, towers_attack};

use crate::core::{ArenaConfig, EntityId, GameState, Projectile, Team, TargetView, Unit, Vec2};

/// True if `unit` may engage `target` right now.
#[must_use]
pub fn can_target(unit: &Unit, target: &TargetView, arena: &ArenaConfig) -> bool {
    if target.team == unit.team || unit.targets.is_empty() {
        return false;
    }
    if target.flying && !unit.hits_air() {
        return false;
    }
    if unit.buildings_only() && !target.is_building {
        return false;
    }
    unit.crossed_river || arena.side_of(target.position) == arena.side_of(unit.position)
}

/// Parameters of a shot about to be launched.
pub(crate) struct Shot {
    pub owner: EntityId,
    pub team: Team,
    pub from: Vec2,
    pub target: TargetView,
    pub speed: f32,
    pub damage: f32,
    pub visual: Option<String>,
    pub rotation_offset: f32,
}

/// Add a homing projectile to the snapshot.
pub(crate) fn launch(state: &mut GameState, shot: Shot) -> EntityId {
    let id = state.alloc_id();
    state.projectiles.push_back(Projectile {
        id,
        owner: shot.owner,
        team: shot.team,
        target_id: shot.target.id,
        position: shot.from,
        speed: shot.speed,
        damage: shot.damage,
        visual: shot.visual,
        angle: (shot.target.position - shot.from).angle(),
        rotation_offset: shot.rotation_offset,
    });
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::core::EngineConfig;

    fn unit(name: &str, team: Team, at: Vec2) -> Unit {
        let config = EngineConfig::default();
        let catalog = CardCatalog::builtin();
        Unit::from_card(EntityId(50), catalog.by_name(name).unwrap(), team, at, &config, 0.0)
    }

    fn view(team: Team, at: Vec2, flying: bool, is_building: bool) -> TargetView {
        TargetView {
            id: EntityId(60),
            team,
            position: at,
            radius: 10.0,
            flying,
            is_building,
            is_tower: false,
        }
    }

    #[test]
    fn test_air_and_buildings_rules() {
        let arena = ArenaConfig::default();
        let knight = unit("knight", Team::Blue, Vec2::new(100.0, 600.0));
        let archer = unit("archer", Team::Blue, Vec2::new(100.0, 600.0));
        let giant = unit("giant", Team::Blue, Vec2::new(100.0, 600.0));

        let flyer = view(Team::Red, Vec2::new(100.0, 560.0), true, false);
        let troop = view(Team::Red, Vec2::new(100.0, 560.0), false, false);
        let hut = view(Team::Red, Vec2::new(100.0, 560.0), false, true);

        assert!(!can_target(&knight, &flyer, &arena));
        assert!(can_target(&archer, &flyer, &arena));
        assert!(!can_target(&giant, &troop, &arena));
        assert!(can_target(&giant, &hut, &arena));
        let friend = view(Team::Blue, Vec2::new(100.0, 560.0), false, false);
        assert!(!can_target(&knight, &friend, &arena));
    }

    #[test]
    fn test_river_rule() {
        let arena = ArenaConfig::default();
        let mut archer = unit("archer", Team::Blue, Vec2::new(80.0, 450.0));
        let across = view(Team::Red, Vec2::new(80.0, 350.0), false, false);

        assert!(!can_target(&archer, &across, &arena));
        archer.crossed_river = true;
        assert!(can_target(&archer, &across, &arena));
    }
}
