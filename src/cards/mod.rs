//! Card system: definitions, the catalog, and the built-in roster.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data (cost, stats, classes, abilities)
//! - `CardCatalog`: Lookup by id and by name
//!
//! ## Tokens
//!
//! Cards marked `token` are only ever spawned by abilities (a barrel's
//! goblins, a factory's minibots). They live in the catalog so abilities can
//! find them by name, but they are never dealt and cannot be placed.

pub mod builtin;
pub mod definition;
pub mod registry;

pub use builtin::DEFAULT_DECK;
pub use definition::{
    CardDefinition, CardId, CardKind, RangeClass, SpeedClass, TargetClass, Visuals,
};
pub use registry::CardCatalog;
