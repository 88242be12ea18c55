//! Elixir and hand cycle tests.

use lane_battle::core::Team;
use lane_battle::engine::MatchBuilder;
use lane_battle::EngineConfig;

/// Test that elixir fills at the configured rate and stops at the cap.
#[test]
fn test_regen_and_cap() {
    let config = EngineConfig::default().with_elixir_regen(1.0).with_starting_elixir(0.0);
    let (engine, mut state) = MatchBuilder::new().with_config(config).with_bot(false).build(1);

    for _ in 0..10 {
        state = engine.step(&state, 0.1);
    }
    for team in Team::ALL {
        assert!((state.elixir[team] - 1.0).abs() < 1e-4);
    }

    for _ in 0..200 {
        state = engine.step(&state, 0.1);
    }
    for team in Team::ALL {
        assert_eq!(state.elixir[team], 10.0);
    }
}

/// Test that repeated plays keep four cards in hand and never lose a card.
#[test]
fn test_hand_cycle_preserves_cards() {
    let config = EngineConfig::default().with_elixir_regen(10.0);
    let (engine, mut state) = MatchBuilder::new().with_config(config).with_bot(false).build(12);
    let total = state.deck[Team::Blue].total_cards();
    assert_eq!(total, 8);

    let mut plays = 0;
    for tick in 0..120 {
        if tick % 5 == 0 {
            let card = state.deck[Team::Blue].hand[tick % 4];
            let next = engine.place_card(&state, card, 100.0, 620.0, Team::Blue);
            if next != state {
                plays += 1;
                let deck = &next.deck[Team::Blue];
                assert_eq!(deck.queue.back(), Some(&card));
                assert!(!deck.in_hand(card));
            }
            state = next;
        }
        state = engine.step(&state, 0.1);

        let deck = &state.deck[Team::Blue];
        assert_eq!(deck.hand.len(), 4);
        assert_eq!(deck.total_cards(), total);
        assert_eq!(deck.next_card, deck.queue.front().copied());
    }
    assert!(plays > 5);
}

/// Test that the next card preview is the queue head.
#[test]
fn test_next_card_preview() {
    let (engine, state) = MatchBuilder::new()
        .with_deck(Team::Blue, &["knight", "archer", "giant", "minion", "fireball"])
        .shuffled(false)
        .with_bot(false)
        .build(1);
    let fireball = engine.catalog().by_name("fireball").unwrap().id;
    let knight = engine.catalog().by_name("knight").unwrap().id;
    assert_eq!(state.deck[Team::Blue].next_card, Some(fireball));

    let next = engine.place_card(&state, knight, 100.0, 600.0, Team::Blue);
    assert!(next.deck[Team::Blue].in_hand(fireball));
    assert_eq!(next.deck[Team::Blue].next_card, Some(knight));
}
