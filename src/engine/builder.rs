//! Match setup.

use crate::cards::{CardCatalog, DEFAULT_DECK};
use crate::core::{EngineConfig, GameRng, GameState, Team, TeamMap};
use crate::economy::DeckState;

use super::BattleEngine;

/// Builder for an engine plus its opening snapshot.
///
/// ```
/// use lane_battle::core::Team;
/// use lane_battle::engine::MatchBuilder;
///
/// let (engine, state) = MatchBuilder::new()
///     .with_deck(Team::Blue, &["knight", "archer", "giant", "minion"])
///     .shuffled(false)
///     .with_bot(false)
///     .build(7);
///
/// let knight = engine.catalog().by_name("knight").unwrap().id;
/// assert_eq!(state.deck[Team::Blue].hand[0], knight);
/// assert!(!state.bot.enabled);
/// ```
pub struct MatchBuilder {
    config: EngineConfig,
    catalog: Option<CardCatalog>,
    decks: TeamMap<Vec<String>>,
    shuffled: bool,
    bot: bool,
    elixir: TeamMap<Option<f32>>,
}

impl Default for MatchBuilder {
    fn default() -> Self {
        let default_deck: Vec<String> = DEFAULT_DECK.iter().map(|s| (*s).to_string()).collect();
        Self {
            config: EngineConfig::default(),
            catalog: None,
            decks: TeamMap::with_value(default_deck),
            shuffled: true,
            bot: true,
            elixir: TeamMap::default(),
        }
    }
}

impl MatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom catalog instead of the built-in roster.
    #[must_use]
    pub fn with_catalog(mut self, catalog: CardCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Deck for `team`, by card name. Unknown names are skipped.
    #[must_use]
    pub fn with_deck(mut self, team: Team, names: &[&str]) -> Self {
        self.decks[team] = names.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Shuffle decks before dealing (default) or deal in the given order.
    #[must_use]
    pub fn shuffled(mut self, shuffled: bool) -> Self {
        self.shuffled = shuffled;
        self
    }

    #[must_use]
    pub fn with_bot(mut self, enabled: bool) -> Self {
        self.bot = enabled;
        self
    }

    /// Override one team's opening elixir.
    #[must_use]
    pub fn with_elixir(mut self, team: Team, elixir: f32) -> Self {
        self.elixir[team] = Some(elixir);
        self
    }

    /// Build the engine and the opening snapshot.
    #[must_use]
    pub fn build(self, seed: u64) -> (BattleEngine, GameState) {
        let catalog = self.catalog.unwrap_or_else(CardCatalog::builtin);
        let mut state = GameState::new(&self.config, seed);
        let hand_size = self.config.economy.hand_size;
        let base = GameRng::new(seed);

        for team in Team::ALL {
            let names: Vec<&str> = self.decks[team].iter().map(String::as_str).collect();
            let cards = catalog.ids_for(&names);
            state.deck[team] = if self.shuffled {
                let mut rng = base.for_context(&format!("deck:{}", team));
                DeckState::deal(&cards, hand_size, &mut rng)
            } else {
                DeckState::from_order(&cards, hand_size)
            };
            if let Some(elixir) = self.elixir[team] {
                state.elixir[team] = elixir.clamp(0.0, self.config.economy.elixir_max);
            }
        }
        state.bot.enabled = self.bot;

        (BattleEngine::new(self.config, catalog), state)
    }
}
