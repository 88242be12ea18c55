//! Error types.
//!
//! The two public commands (`step`, `place_card`) never fail: they swallow
//! these into "no state change" and a log line. The `try_*` variants and the
//! loaders return them directly.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{EntityId, Team};

/// Why a placement command was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementError {
    #[error("match is over")]
    GameOver,
    #[error("unknown card {0}")]
    UnknownCard(CardId),
    #[error("card {0} is a token and cannot be deployed")]
    TokenCard(CardId),
    #[error("card {card} is not in {team}'s hand")]
    NotInHand { card: CardId, team: Team },
    #[error("{team} needs {cost} elixir, has {available:.2}")]
    InsufficientElixir { team: Team, cost: u32, available: f32 },
    #[error("({x}, {y}) is outside the arena")]
    OutOfBounds { x: f32, y: f32 },
    #[error("y = {y} is inside the river")]
    InRiver { y: f32 },
    #[error("{team} cannot deploy troops at y = {y}")]
    WrongSide { team: Team, y: f32 },
}

/// A handler fault. The dispatcher rolls the snapshot back when it sees one.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AbilityError {
    #[error("source unit {0} not found")]
    MissingSource(EntityId),
    #[error("token card {0} is not in the catalog")]
    MissingToken(String),
    #[error("invalid parameter: {0}")]
    InvalidParam(&'static str),
}

/// Card catalog loading problems.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("parse error")]
    Json(#[from] serde_json::Error),
    #[error("duplicate card id {0}")]
    DuplicateId(CardId),
    #[error("duplicate card name {0:?}")]
    DuplicateName(String),
    #[error("card {card} references unknown token {token:?}")]
    UnknownToken { card: CardId, token: String },
    #[error("card {card} has malformed params for ability {key:?}: {reason}")]
    MalformedAbility {
        card: CardId,
        key: String,
        reason: String,
    },
}

/// Engine configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("toml parse error")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Snapshot exchange problems.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("encoding error")]
    Codec(#[from] bincode::Error),
    #[error("replica sessions cannot mutate the snapshot")]
    NotAuthoritative,
    #[error("authoritative sessions do not adopt snapshots")]
    NotReplica,
    #[error("placement rejected")]
    Rejected(#[from] PlacementError),
}
