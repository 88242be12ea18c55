//! Entity identification.
//!
//! Every live object on the arena (tower, unit, projectile) has a unique
//! `EntityId`. IDs are allocated from a monotonic counter carried inside the
//! snapshot, so two replicas stepping the same inputs agree on every ID.
//!
//! ## ID Layout
//!
//! - `0..6`: the six towers created at match start
//! - `6..`: units and projectiles, in allocation order
//!
//! ```
//! use lane_battle::core::{EntityId, EntityAllocator};
//!
//! let mut ids = EntityAllocator::starting_at(EntityId::FIRST_DYNAMIC);
//! let a = ids.alloc();
//! let b = ids.alloc();
//!
//! assert!(a < b);
//! assert!(!a.is_tower());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for any arena entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Number of IDs reserved for towers.
    pub const TOWER_SLOTS: u32 = 6;

    /// First ID handed out to units and projectiles.
    pub const FIRST_DYNAMIC: EntityId = EntityId(Self::TOWER_SLOTS);

    /// Create an entity ID for a tower slot.
    #[must_use]
    pub const fn tower(slot: u8) -> Self {
        Self(slot as u32)
    }

    /// Check if this ID lives in the tower range.
    #[must_use]
    pub const fn is_tower(self) -> bool {
        self.0 < Self::TOWER_SLOTS
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic ID source.
///
/// The counter value is stored in the snapshot (`GameState::next_entity_id`)
/// and never derived from wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Start allocating at the given ID.
    #[must_use]
    pub const fn starting_at(first: EntityId) -> Self {
        Self { next: first.0 }
    }

    /// Allocate the next ID.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Peek at the ID the next `alloc` will return.
    #[must_use]
    pub const fn peek(&self) -> EntityId {
        EntityId(self.next)
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::starting_at(EntityId::FIRST_DYNAMIC)
    }
}
