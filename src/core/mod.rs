//! Core simulation types: entities, teams, geometry, RNG, tunables, and the
//! snapshot.
//!
//! Everything here is plain data. The behaviour that moves a snapshot
//! forward lives in the other modules and is driven by [`crate::engine`].

pub mod config;
pub mod entity;
pub mod geometry;
pub mod rng;
pub mod state;
pub mod team;

pub use config::{ArenaConfig, BotConfig, CombatConfig, EconomyConfig, EngineConfig, TowerConfig};
pub use entity::{EntityAllocator, EntityId};
pub use geometry::{edge_distance, Vec2};
pub use rng::{GameRng, GameRngState};
pub use state::{
    BotState, GameState, Lane, MatchStatus, Projectile, TargetView, Tower, TowerKind, Unit,
    UnitState,
};
pub use team::{Side, Team, TeamMap};
