//! Placement validation and spawning.
//!
//! A placement command is checked in this order:
//!
//! 1. the match is still running
//! 2. the card exists, is not a token, and is in the team's hand
//! 3. the team can afford it
//! 4. the point lies inside the arena
//! 5. the point is not in the river band (inclusive)
//! 6. troops and buildings go on the team's own half; spells anywhere
//!
//! The hand check only applies once a deck has been dealt to the team.
//!
//! On success the cost is paid, the unit is created with its lane and
//! `crossed_river` derived from the spawn point, the deck cycles, and the
//! card's spawn abilities fire. A spell exists only for its spawn event and
//! is removed right after.

use crate::abilities::{dispatch, AbilityEvent};
use crate::cards::{CardDefinition, CardId, CardKind};
use crate::core::{EngineConfig, EntityId, GameRng, GameState, Team, Unit, Vec2};
use crate::economy;
use crate::engine::SimContext;
use crate::error::PlacementError;

/// Run every check without touching the snapshot.
pub fn validate<'c>(
    state: &GameState,
    ctx: SimContext<'c>,
    card_id: CardId,
    position: Vec2,
    team: Team,
) -> Result<&'c CardDefinition, PlacementError> {
    if state.is_game_over() {
        return Err(PlacementError::GameOver);
    }
    let card = ctx.catalog.get(card_id).ok_or(PlacementError::UnknownCard(card_id))?;
    if card.token {
        return Err(PlacementError::TokenCard(card_id));
    }
    let deck = &state.deck[team];
    if deck.total_cards() > 0 && !deck.in_hand(card_id) {
        return Err(PlacementError::NotInHand { card: card_id, team });
    }

    let available = state.elixir[team];
    if available + f32::EPSILON < card.cost as f32 {
        return Err(PlacementError::InsufficientElixir { team, cost: card.cost, available });
    }

    check_position(ctx.config, card, position, team)?;
    Ok(card)
}

/// Bounds, river, and side checks.
pub fn check_position(
    config: &EngineConfig,
    card: &CardDefinition,
    position: Vec2,
    team: Team,
) -> Result<(), PlacementError> {
    let arena = &config.arena;
    if !arena.contains(position) {
        return Err(PlacementError::OutOfBounds { x: position.x, y: position.y });
    }
    if arena.in_river_band(position.y) {
        return Err(PlacementError::InRiver { y: position.y });
    }
    if card.kind != CardKind::Spell {
        let (lo, hi) = arena.deploy_range(team);
        if position.y < lo || position.y > hi {
            return Err(PlacementError::WrongSide { team, y: position.y });
        }
    }
    Ok(())
}

/// Validate and apply a placement in place. On error `state` is untouched.
pub fn place(
    state: &mut GameState,
    ctx: SimContext<'_>,
    rng: &mut GameRng,
    card_id: CardId,
    position: Vec2,
    team: Team,
) -> Result<EntityId, PlacementError> {
    let card = validate(state, ctx, card_id, position, team)?;

    economy::try_spend(&mut state.elixir[team], card.cost as f32);
    let hand_size = ctx.config.economy.hand_size;
    state.deck[team].play(card_id, hand_size);

    let id = state.alloc_id();
    state
        .units
        .push_back(Unit::from_card(id, card, team, position, ctx.config, state.time));
    dispatch(state, ctx, rng, id, None, AbilityEvent::Spawn, 0.0);

    if card.kind == CardKind::Spell {
        state.units.retain(|u| u.id != id);
    }
    log::debug!(
        "{} deployed {} at ({:.0}, {:.0}) as {}",
        team,
        card.name,
        position.x,
        position.y,
        id
    );
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::economy::DeckState;

    fn setup() -> (EngineConfig, CardCatalog) {
        (EngineConfig::default(), CardCatalog::builtin())
    }

    fn card(catalog: &CardCatalog, name: &str) -> CardId {
        catalog.by_name(name).unwrap().id
    }

    #[test]
    fn test_validation_order() {
        let (config, catalog) = setup();
        let ctx = SimContext::new(&config, &catalog);
        let mut state = GameState::new(&config, 1);
        let giant = card(&catalog, "giant");

        // Unaffordable and in the river: affordability is reported first.
        state.elixir[Team::Blue] = 1.0;
        assert!(matches!(
            validate(&state, ctx, giant, Vec2::new(100.0, 400.0), Team::Blue),
            Err(PlacementError::InsufficientElixir { cost: 5, .. })
        ));

        state.elixir[Team::Blue] = 10.0;
        assert!(matches!(
            validate(&state, ctx, giant, Vec2::new(-5.0, 400.0), Team::Blue),
            Err(PlacementError::OutOfBounds { .. })
        ));
        assert!(matches!(
            validate(&state, ctx, giant, Vec2::new(100.0, 360.0), Team::Blue),
            Err(PlacementError::InRiver { .. })
        ));
        assert!(matches!(
            validate(&state, ctx, giant, Vec2::new(100.0, 200.0), Team::Blue),
            Err(PlacementError::WrongSide { .. })
        ));
        assert!(validate(&state, ctx, giant, Vec2::new(100.0, 600.0), Team::Blue).is_ok());
    }

    #[test]
    fn test_spells_ignore_side() {
        let (config, catalog) = setup();
        let ctx = SimContext::new(&config, &catalog);
        let state = GameState::new(&config, 1);
        let fireball = card(&catalog, "fireball");
        assert!(validate(&state, ctx, fireball, Vec2::new(80.0, 120.0), Team::Blue).is_ok());
        assert!(matches!(
            validate(&state, ctx, fireball, Vec2::new(80.0, 400.0), Team::Blue),
            Err(PlacementError::InRiver { .. })
        ));
    }

    #[test]
    fn test_token_and_unknown_rejected() {
        let (config, catalog) = setup();
        let ctx = SimContext::new(&config, &catalog);
        let state = GameState::new(&config, 1);
        let at = Vec2::new(100.0, 600.0);
        assert_eq!(
            validate(&state, ctx, card(&catalog, "goblin"), at, Team::Blue).err(),
            Some(PlacementError::TokenCard(card(&catalog, "goblin")))
        );
        assert_eq!(
            validate(&state, ctx, CardId::new(4242), at, Team::Blue).err(),
            Some(PlacementError::UnknownCard(CardId::new(4242)))
        );
    }

    #[test]
    fn test_hand_enforced_once_dealt() {
        let (config, catalog) = setup();
        let ctx = SimContext::new(&config, &catalog);
        let mut state = GameState::new(&config, 1);
        state.deck[Team::Blue] = DeckState::from_order(&catalog.default_deck(), 4);

        // Default deck order: knight, archer, giant, minion in hand.
        let fireball = card(&catalog, "fireball");
        let at = Vec2::new(100.0, 600.0);
        assert!(matches!(
            validate(&state, ctx, fireball, at, Team::Blue),
            Err(PlacementError::NotInHand { .. })
        ));
        assert!(validate(&state, ctx, card(&catalog, "knight"), at, Team::Blue).is_ok());
    }

    #[test]
    fn test_place_pays_and_spawns() {
        let (config, catalog) = setup();
        let ctx = SimContext::new(&config, &catalog);
        let mut state = GameState::new(&config, 1);
        state.deck[Team::Blue] = DeckState::from_order(&catalog.default_deck(), 4);
        let mut rng = GameRng::new(1);

        let knight = card(&catalog, "knight");
        let at = Vec2::new(300.0, 600.0);
        let id = place(&mut state, ctx, &mut rng, knight, at, Team::Blue).unwrap();
        let unit = state.unit(id).unwrap();
        assert_eq!(state.elixir[Team::Blue], 2.0);
        assert_eq!(unit.lane, crate::core::Lane::Right);
        assert!(!state.deck[Team::Blue].in_hand(card(&catalog, "knight")));
        assert_eq!(state.deck[Team::Blue].hand.len(), 4);
    }

    #[test]
    fn test_spell_is_transient() {
        let (config, catalog) = setup();
        let ctx = SimContext::new(&config, &catalog);
        let mut state = GameState::new(&config, 1);
        let mut rng = GameRng::new(1);

        let units_before = state.units.len();
        let fireball = card(&catalog, "fireball");
        place(&mut state, ctx, &mut rng, fireball, Vec2::new(80.0, 120.0), Team::Blue).unwrap();
        assert_eq!(state.units.len(), units_before);
        // Princess tower takes the reduced tower share.
        let princess = state.tower(EntityId::tower(1)).unwrap();
        assert!((princess.hp - (2600.0 - 500.0 * 0.35)).abs() < 1e-3);
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let (config, catalog) = setup();
        let ctx = SimContext::new(&config, &catalog);
        let mut state = GameState::new(&config, 1);
        let before = state.clone();
        let mut rng = GameRng::new(1);

        let knight = card(&catalog, "knight");
        let result = place(&mut state, ctx, &mut rng, knight, Vec2::new(100.0, 400.0), Team::Blue);
        assert!(result.is_err());
        assert_eq!(state, before);
    }
}
