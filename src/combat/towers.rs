//! Tower layout and tower fire.

use im::Vector;

use crate::core::{edge_distance, EngineConfig, EntityId, GameState, Team, Tower, TowerKind, Vec2};

use super::{launch, Shot};

/// The six towers of a fresh match.
///
/// Slots 0..3 are Red (king, left princess, right princess) and 3..6 are
/// Blue in the same order. Blue's rows mirror Red's across the arena.
#[must_use]
pub fn initial_towers(config: &EngineConfig) -> Vector<Tower> {
    let arena = &config.arena;
    let t = &config.towers;
    let row = |team: Team, depth: f32| match team {
        Team::Red => depth,
        Team::Blue => arena.height - depth,
    };

    let mut towers = Vector::new();
    for (base, team) in [(0u8, Team::Red), (3u8, Team::Blue)] {
        towers.push_back(Tower {
            id: EntityId::tower(base),
            team,
            kind: TowerKind::King,
            position: Vec2::new(arena.midline_x(), row(team, t.king_depth)),
            hp: t.king_hp,
            max_hp: t.king_hp,
            radius: t.king_radius,
            dps: t.king_dps,
            range: t.king_range,
            last_attack_time: None,
        });
        for (offset, x) in [(1u8, arena.left_bridge_x), (2u8, arena.right_bridge_x)] {
            towers.push_back(Tower {
                id: EntityId::tower(base + offset),
                team,
                kind: TowerKind::Princess,
                position: Vec2::new(x, row(team, t.princess_depth)),
                hp: t.princess_hp,
                max_hp: t.princess_hp,
                radius: t.princess_radius,
                dps: t.princess_dps,
                range: t.princess_range,
                last_attack_time: None,
            });
        }
    }
    towers
}

/// Every live tower fires at the nearest enemy unit in range, on cooldown.
pub fn towers_attack(state: &mut GameState, config: &EngineConfig) {
    let now = state.time;
    let cooldown = config.towers.hit_cooldown;

    for index in 0..state.towers.len() {
        let tower = state.towers[index].clone();
        if !tower.is_alive() || tower.last_attack_time.is_some_and(|t| now - t < cooldown) {
            continue;
        }

        let target = state
            .targets_of(tower.team.opponent())
            .filter(|t| !t.is_tower)
            .map(|t| (edge_distance(tower.position, tower.radius, t.position, t.radius), t))
            .filter(|(gap, _)| *gap <= tower.range)
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.id.cmp(&b.1.id)))
            .map(|(_, t)| t);
        let Some(target) = target else {
            continue;
        };

        if let Some(slot) = state.towers.get_mut(index) {
            slot.last_attack_time = Some(now);
        }
        launch(
            state,
            Shot {
                owner: tower.id,
                team: tower.team,
                from: tower.position,
                target,
                speed: config.towers.projectile_speed,
                damage: tower.dps * cooldown,
                visual: None,
                rotation_offset: 0.0,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::core::Unit;

    #[test]
    fn test_layout_mirrors() {
        let config = EngineConfig::default();
        let towers = initial_towers(&config);
        assert_eq!(towers.len(), 6);

        let red_king = &towers[0];
        let blue_king = &towers[3];
        assert_eq!(red_king.kind, TowerKind::King);
        assert_eq!(red_king.position, Vec2::new(240.0, 50.0));
        assert_eq!(blue_king.position, Vec2::new(240.0, 750.0));
        assert_eq!(towers[1].position, Vec2::new(80.0, 120.0));
        assert_eq!(towers[5].position, Vec2::new(400.0, 680.0));
        assert!(towers.iter().enumerate().all(|(i, t)| t.id == EntityId(i as u32)));
    }

    #[test]
    fn test_tower_fires_on_cooldown() {
        let config = EngineConfig::default();
        let catalog = CardCatalog::builtin();
        let mut state = GameState::new(&config, 1);
        let id = state.alloc_id();
        let knight = catalog.by_name("knight").unwrap();
        let at = Vec2::new(40.0, 300.0);
        state
            .units
            .push_back(Unit::from_card(id, knight, Team::Blue, at, &config, 0.0));

        towers_attack(&mut state, &config);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].target_id, id);
        assert_eq!(state.projectiles[0].damage, 140.0);

        state.time = 0.5;
        towers_attack(&mut state, &config);
        assert_eq!(state.projectiles.len(), 1);

        state.time = 1.0;
        towers_attack(&mut state, &config);
        assert_eq!(state.projectiles.len(), 2);
    }
}
