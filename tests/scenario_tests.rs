//! Gameplay scenarios.
//!
//! Short, hand-built situations with one exact expected outcome each.

use lane_battle::cards::{CardCatalog, CardDefinition, CardId, CardKind};
use lane_battle::core::{EntityId, Team, Unit, Vec2};
use lane_battle::engine::{BattleEngine, MatchBuilder};
use lane_battle::status::{StatusEffect, StatusKind};
use lane_battle::GameState;

fn spawn(
    engine: &BattleEngine,
    state: &mut GameState,
    name: &str,
    team: Team,
    at: Vec2,
) -> EntityId {
    let card = engine.catalog().by_name(name).unwrap();
    let id = state.alloc_id();
    state
        .units
        .push_back(Unit::from_card(id, card, team, at, engine.config(), state.time));
    id
}

/// Test spending a full bar on a 10-cost card.
#[test]
fn test_ten_elixir_play() {
    let mut catalog = CardCatalog::builtin();
    let golem = CardDefinition::new(CardId::new(50), "mega_golem", CardKind::Troop)
        .with_cost(10)
        .with_stats(8000.0, 200.0);
    catalog.insert(golem).unwrap();

    let (engine, state) = MatchBuilder::new()
        .with_catalog(catalog)
        .with_deck(Team::Blue, &["mega_golem", "knight", "archer", "giant", "minion"])
        .shuffled(false)
        .with_bot(false)
        .with_elixir(Team::Blue, 10.0)
        .build(1);
    let golem = CardId::new(50);
    assert!(state.deck[Team::Blue].in_hand(golem));

    let next = engine.place_card(&state, golem, 120.0, 600.0, Team::Blue);
    let deck = &next.deck[Team::Blue];
    assert_eq!(next.elixir[Team::Blue], 0.0);
    assert!(!deck.in_hand(golem));
    assert_eq!(deck.queue.back(), Some(&golem));
    assert_eq!(deck.hand.len(), 4);
    assert_eq!(deck.total_cards(), 5);
    assert!(next.units.iter().any(|u| u.card_id == golem));
}

/// Test that a placement anywhere in the river band is rejected outright.
#[test]
fn test_river_placement_rejected() {
    let (engine, state) = MatchBuilder::new()
        .with_deck(Team::Blue, &["knight", "archer", "giant", "fireball", "minion"])
        .shuffled(false)
        .with_bot(false)
        .with_elixir(Team::Blue, 10.0)
        .build(1);
    let knight = engine.catalog().by_name("knight").unwrap().id;
    let fireball = engine.catalog().by_name("fireball").unwrap().id;

    for y in [360.0, 400.0, 440.0] {
        assert_eq!(engine.place_card(&state, knight, 100.0, y, Team::Blue), state);
        assert_eq!(engine.place_card(&state, fireball, 100.0, y, Team::Blue), state);
    }
    assert_ne!(engine.place_card(&state, knight, 100.0, 441.0, Team::Blue), state);
}

/// Test that a weaker slow followed by a stronger, shorter one keeps the
/// stronger magnitude and the later expiry.
#[test]
fn test_slow_merge() {
    let (engine, mut state) = MatchBuilder::new().with_bot(false).build(1);
    let knight = spawn(&engine, &mut state, "knight", Team::Blue, Vec2::new(80.0, 600.0));
    {
        let unit = state.unit_mut(knight).unwrap();
        unit.statuses.apply(StatusEffect::new(StatusKind::Slow, 0.2, 3.0));
        unit.statuses.apply(StatusEffect::new(StatusKind::Slow, 0.5, 2.0));
    }
    let slow = state.unit(knight).unwrap().statuses.get(StatusKind::Slow).cloned().unwrap();
    assert_eq!(slow.magnitude, 0.5);
    assert_eq!(slow.expires_at, 3.0);

    let before = state.unit(knight).unwrap().clone();
    let next = engine.step(&state, 0.1);
    let after = next.unit(knight).unwrap();
    let expected = before.speed * 0.5 * 0.1;
    assert!((before.position.y - after.position.y - expected).abs() < 1e-3);
    assert_eq!(after.position.x, 80.0);
}

/// Test that a unit chasing a tower switches to an enemy troop that steps
/// into its attack range.
#[test]
fn test_retarget_to_blocker() {
    let (engine, mut state) = MatchBuilder::new().with_bot(false).build(1);
    let princess = EntityId::tower(1);
    let knight = spawn(&engine, &mut state, "knight", Team::Blue, Vec2::new(80.0, 230.0));

    state = engine.step(&state, 0.1);
    let chaser = state.unit(knight).unwrap().clone();
    assert_eq!(chaser.target_id, Some(princess));

    let below = Vec2::new(chaser.position.x, chaser.position.y + 2.0 * chaser.radius + 2.0);
    let blocker = spawn(&engine, &mut state, "knight", Team::Red, below);

    state = engine.step(&state, 0.1);
    assert_eq!(state.unit(knight).unwrap().target_id, Some(blocker));
}

/// Test that a target beyond the leash releases the lock.
#[test]
fn test_leash_releases_lock() {
    let (engine, mut state) = MatchBuilder::new().with_bot(false).build(1);
    let knight = spawn(&engine, &mut state, "knight", Team::Blue, Vec2::new(240.0, 720.0));
    let decoy = spawn(&engine, &mut state, "knight", Team::Red, Vec2::new(240.0, 450.0));
    state.unit_mut(knight).unwrap().target_id = Some(decoy);

    let leash = engine.config().combat.leash_distance.unwrap();
    assert!(Vec2::new(240.0, 720.0).distance(Vec2::new(240.0, 450.0)) > leash);

    state = engine.step(&state, 0.1);
    assert_eq!(state.unit(knight).unwrap().target_id, None);
}

/// Test that a knight walking onto a tower from any angle ends up hitting it.
#[test]
fn test_melee_unit_reaches_tower() {
    let approaches = [
        Vec2::new(150.0, 230.0),
        Vec2::new(20.0, 220.0),
        Vec2::new(130.0, 260.0),
        Vec2::new(170.0, 190.0),
        Vec2::new(35.0, 300.0),
        Vec2::new(330.0, 240.0),
        Vec2::new(455.0, 215.0),
        Vec2::new(290.0, 300.0),
    ];

    for at in approaches {
        let (engine, mut state) = MatchBuilder::new().with_bot(false).build(3);
        let start = state.tower_hp(Team::Red);
        let id = spawn(&engine, &mut state, "knight", Team::Blue, at);
        let knight = state.unit_mut(id).unwrap();
        knight.max_hp = 1.0e6;
        knight.hp = 1.0e6;

        for _ in 0..400 {
            state = engine.step(&state, 0.1);
            if state.tower_hp(Team::Red) < start {
                break;
            }
        }
        assert!(
            state.tower_hp(Team::Red) < start,
            "knight from {:?} stalled at {:?}",
            at,
            state.unit(id).map(|u| u.position)
        );
    }
}
