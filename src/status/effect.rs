//! Status effect storage and modifiers.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::EntityId;

/// Kind of timed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Slow,
    Stun,
    Freeze,
    Rage,
    Boost,
}

/// One timed effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Fraction, e.g. 0.2 for a 20% slow. Ignored by stun and freeze.
    pub magnitude: f32,
    /// Match time at which the effect ends.
    pub expires_at: f32,
    pub source: Option<EntityId>,
}

impl StatusEffect {
    #[must_use]
    pub fn new(kind: StatusKind, magnitude: f32, expires_at: f32) -> Self {
        Self {
            kind,
            magnitude,
            expires_at,
            source: None,
        }
    }

    /// Set the entity that applied this effect.
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }
}

/// The effects on one unit, at most one per kind.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSet(SmallVec<[StatusEffect; 2]>);

impl StatusSet {
    /// Add an effect, merging with an existing one of the same kind.
    pub fn apply(&mut self, effect: StatusEffect) {
        match self.0.iter_mut().find(|s| s.kind == effect.kind) {
            Some(existing) => {
                existing.magnitude = existing.magnitude.max(effect.magnitude);
                existing.expires_at = existing.expires_at.max(effect.expires_at);
                if effect.source.is_some() {
                    existing.source = effect.source;
                }
            }
            None => self.0.push(effect),
        }
    }

    /// Drop every effect with `expires_at <= now`.
    pub fn prune(&mut self, now: f32) {
        self.0.retain(|s| s.expires_at > now);
    }

    #[must_use]
    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.0.iter().find(|s| s.kind == kind)
    }

    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.get(kind).is_some()
    }

    /// Stunned or frozen.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.has(StatusKind::Stun) || self.has(StatusKind::Freeze)
    }

    /// Speed after slow and boost. Zero while disabled.
    #[must_use]
    pub fn effective_speed(&self, base: f32) -> f32 {
        if self.is_disabled() {
            return 0.0;
        }
        let mut multiplier = 1.0;
        if let Some(slow) = self.get(StatusKind::Slow) {
            multiplier *= 1.0 - slow.magnitude;
        }
        if let Some(boost) = self.get(StatusKind::Boost) {
            multiplier *= 1.0 + boost.magnitude;
        }
        (base * multiplier).max(0.0)
    }

    /// Attack cooldown after rage.
    #[must_use]
    pub fn effective_cooldown(&self, base: f32) -> f32 {
        match self.get(StatusKind::Rage) {
            Some(rage) => base * (1.0 - rage.magnitude).max(0.0),
            None => base,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
