//! # lane-battle
//!
//! Deterministic simulation core for a real-time, two-lane tower-defense
//! card battler.
//!
//! Two teams spend regenerating elixir to deploy units from a rotating hand.
//! Units path along their lane, cross the river only at bridges, fight
//! whatever they meet, and knock down enemy towers until a king tower falls
//! or the timer runs out.
//!
//! ## Design Principles
//!
//! 1. **Snapshot in, snapshot out**: the whole match is one serializable
//!    [`GameState`]. [`BattleEngine::step`] and [`BattleEngine::place_card`]
//!    are pure transitions over it.
//!
//! 2. **Deterministic**: all randomness comes from a seeded ChaCha stream
//!    stored in the snapshot. The same seed, `dt` sequence, and commands
//!    always produce the same snapshots.
//!
//! 3. **Data-driven cards**: card stats and abilities load from JSON into a
//!    closed, typed ability set. Faulty abilities roll back instead of
//!    corrupting the match.
//!
//! 4. **Persistent data structures**: `im` vectors make the per-tick
//!    snapshot copy O(1).
//!
//! ## Modules
//!
//! - `core`: entity ids, teams, geometry, RNG, configuration, snapshot types
//! - `cards`: card definitions and the catalog
//! - `status`: timed slow/stun/freeze/rage/boost effects
//! - `navigation`: lane waypoints and the river/bridge constraint
//! - `combat`: targeting state machine, projectiles, towers
//! - `abilities`: ability dispatch and handlers
//! - `economy`: elixir and hand cycling
//! - `placement`: command validation and spawning
//! - `bot`: heuristic opponent
//! - `engine`: the tick orchestrator and command surface
//! - `sync`: authoritative/replica snapshot exchange

pub mod abilities;
pub mod bot;
pub mod cards;
pub mod combat;
pub mod core;
pub mod economy;
pub mod engine;
pub mod error;
pub mod navigation;
pub mod placement;
pub mod status;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, EntityId, GameRng, GameRngState, GameState, Lane, MatchStatus, Projectile, Side,
    Team, TeamMap, Tower, TowerKind, Unit, UnitState, Vec2,
};

pub use crate::cards::{
    CardCatalog, CardDefinition, CardId, CardKind, RangeClass, SpeedClass, TargetClass,
};

pub use crate::abilities::{Ability, AbilityEvent, DeclaredAbility};

pub use crate::status::{StatusEffect, StatusKind};

pub use crate::economy::DeckState;

pub use crate::engine::{BattleEngine, MatchBuilder};

pub use crate::error::{AbilityError, CatalogError, ConfigError, PlacementError, SyncError};

pub use crate::sync::{PlacementIntent, Role, Session};
