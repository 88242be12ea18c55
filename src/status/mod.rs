//! Timed status effects on units.
//!
//! A unit carries at most one effect per [`StatusKind`]. Re-applying a kind
//! merges into the existing effect: the magnitude becomes the larger of the
//! two and the expiry the later of the two, independently.
//!
//! ```
//! use lane_battle::status::{StatusEffect, StatusKind, StatusSet};
//!
//! let mut statuses = StatusSet::default();
//! statuses.apply(StatusEffect::new(StatusKind::Slow, 0.2, 5.0));
//! statuses.apply(StatusEffect::new(StatusKind::Slow, 0.5, 3.0));
//!
//! let slow = statuses.get(StatusKind::Slow).unwrap();
//! assert_eq!(slow.magnitude, 0.5);
//! assert_eq!(slow.expires_at, 5.0);
//! ```
//!
//! ## Modifiers
//!
//! | Kind | Effect |
//! |---|---|
//! | `Stun`, `Freeze` | no movement, no attacks |
//! | `Slow` | speed × (1 − magnitude) |
//! | `Boost` | speed × (1 + magnitude) |
//! | `Rage` | attack cooldown × (1 − magnitude) |

mod effect;

pub use effect::{StatusEffect, StatusKind, StatusSet};

/// Magnitude used for rage when a source does not specify one.
pub const DEFAULT_RAGE: f32 = 0.3;
