//! The simulation's command surface.
//!
//! [`BattleEngine`] owns the tunables and the card catalog and exposes two
//! pure transitions over [`GameState`]:
//!
//! - [`BattleEngine::step`] advances the match by `dt` seconds
//! - [`BattleEngine::place_card`] deploys a card for a team
//!
//! Both take a snapshot by reference and return a new one. Snapshots are
//! built on persistent vectors, so the copy is cheap and the input is never
//! modified.
//!
//! ## Tick order
//!
//! 1. A finished match is returned unchanged.
//! 2. `dt` is clamped to `[0, max_dt]`.
//! 3. A tick RNG is forked from the snapshot's master RNG.
//! 4. Time advances and elixir regenerates.
//! 5. The bot plays if its cadence elapsed.
//! 6. Expired statuses are pruned.
//! 7. Each unit alive at tick start runs its combat update, then its tick
//!    abilities.
//! 8. Projectiles move and land.
//! 9. Towers fire.
//! 10. Death abilities fire and dead units are removed.
//! 11. Destroyed towers are removed; a fallen king ends the match.
//! 12. The timer decides the match at `match_duration`.
//!
//! ## Example
//!
//! ```
//! use lane_battle::engine::BattleEngine;
//! use lane_battle::core::Team;
//!
//! let engine = BattleEngine::default();
//! let state = engine.new_match(42);
//! let card = state.deck[Team::Blue].hand[0];
//!
//! let state = engine.place_card(&state, card, 100.0, 600.0, Team::Blue);
//! let state = engine.step(&state, 0.1);
//! assert!(state.time > 0.0);
//! ```

mod builder;
mod context;
mod tick;

pub use builder::MatchBuilder;
pub use context::SimContext;

use crate::cards::{CardCatalog, CardId};
use crate::core::{EngineConfig, EntityId, GameRng, GameState, Team, Vec2};
use crate::economy::DeckState;
use crate::error::PlacementError;
use crate::placement;

/// Stateless simulation driver.
#[derive(Clone, Debug)]
pub struct BattleEngine {
    config: EngineConfig,
    catalog: CardCatalog,
}

impl Default for BattleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), CardCatalog::builtin())
    }
}

impl BattleEngine {
    #[must_use]
    pub fn new(config: EngineConfig, catalog: CardCatalog) -> Self {
        Self { config, catalog }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Borrowed view handed to every subsystem.
    #[must_use]
    pub fn context(&self) -> SimContext<'_> {
        SimContext::new(&self.config, &self.catalog)
    }

    /// Fresh match with both teams dealt a shuffled default deck.
    #[must_use]
    pub fn new_match(&self, seed: u64) -> GameState {
        let mut state = GameState::new(&self.config, seed);
        let cards = self.catalog.default_deck();
        let base = GameRng::new(seed);
        for team in Team::ALL {
            let mut rng = base.for_context(&format!("deck:{}", team));
            state.deck[team] = DeckState::deal(&cards, self.config.economy.hand_size, &mut rng);
        }
        state
    }

    /// Advance the match by `dt` seconds.
    ///
    /// `dt` is clamped to `[0, max_dt]`. A finished match is returned as is.
    #[must_use]
    pub fn step(&self, state: &GameState, dt: f32) -> GameState {
        let mut next = state.clone();
        if next.is_game_over() {
            return next;
        }
        let dt = if dt.is_finite() { dt.clamp(0.0, self.config.combat.max_dt) } else { 0.0 };
        tick::advance(&mut next, self.context(), dt);
        next
    }

    /// Deploy `card_id` for `team` at `(x, y)`.
    ///
    /// Any rejection returns an unchanged copy of `state`; use
    /// [`try_place_card`](Self::try_place_card) to see why.
    #[must_use]
    pub fn place_card(
        &self,
        state: &GameState,
        card_id: CardId,
        x: f32,
        y: f32,
        team: Team,
    ) -> GameState {
        match self.try_place_card(state, card_id, x, y, team) {
            Ok((next, _)) => next,
            Err(err) => {
                log::debug!(
                    "{} placement of {} at ({}, {}) rejected: {}",
                    team,
                    card_id,
                    x,
                    y,
                    err
                );
                state.clone()
            }
        }
    }

    /// Deploy a card, returning the new snapshot and the spawned unit's id.
    pub fn try_place_card(
        &self,
        state: &GameState,
        card_id: CardId,
        x: f32,
        y: f32,
        team: Team,
    ) -> Result<(GameState, EntityId), PlacementError> {
        let mut next = state.clone();
        let mut master = GameRng::from_state(&next.rng_state);
        let mut rng = master.fork();
        let at = Vec2::new(x, y);
        let id = placement::place(&mut next, self.context(), &mut rng, card_id, at, team)?;
        next.rng_state = master.state();
        Ok((next, id))
    }
}
