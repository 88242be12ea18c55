//! Per-unit ability bookkeeping.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Vec2};

/// Runtime state kept by ability handlers on the unit that owns them.
///
/// Every slot starts empty and belongs to exactly one ability, so a card
/// may combine any of them without the counters interfering.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AbilityScratch {
    /// Hits landed since elixir was last stolen.
    pub steal_hits: Option<u32>,
    /// Hits landed since the last stun.
    pub stun_hits: Option<u32>,
    /// Match time of the last random aura roll.
    pub aura_last: Option<f32>,
    /// Match time of the last spawn wave.
    pub spawn_last: Option<f32>,
    /// Match time of the last freeze pulse.
    pub pulse_last: Option<f32>,
    /// Where the current charge run started.
    pub charge_origin: Option<Vec2>,
    pub charged: bool,
    /// Seconds spent locked on `ramp_target`.
    pub ramp_progress: Option<f32>,
    pub ramp_target: Option<EntityId>,
    /// Shots fired in the current burst.
    pub burst_count: Option<u32>,
    /// Replaces the base cooldown for the next attack only.
    pub next_cooldown: Option<f32>,
    /// Match time a fused token breaks.
    pub fuse_at: Option<f32>,
    /// Match time a timed unit expires.
    pub expires_at: Option<f32>,
}

/// Increment a hit counter and report whether it reached `every`.
/// The counter resets when it does.
pub(super) fn count_hit(counter: &mut Option<u32>, every: u32) -> bool {
    let count = counter.unwrap_or(0) + 1;
    if count >= every.max(1) {
        *counter = Some(0);
        true
    } else {
        *counter = Some(count);
        false
    }
}

/// True once `interval` seconds have passed since `last`, which then
/// becomes `now`. The first call arms the timer.
pub(super) fn interval_elapsed(last: &mut Option<f32>, now: f32, interval: f32) -> bool {
    match *last {
        None => {
            *last = Some(now);
            false
        }
        Some(at) if now - at >= interval => {
            *last = Some(now);
            true
        }
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_hit() {
        let mut hits = None;
        assert!(!count_hit(&mut hits, 3));
        assert!(!count_hit(&mut hits, 3));
        assert!(count_hit(&mut hits, 3));
        assert_eq!(hits, Some(0));
        assert!(!count_hit(&mut hits, 3));
    }

    #[test]
    fn test_count_hit_every_one() {
        let mut hits = None;
        assert!(count_hit(&mut hits, 1));
        assert!(count_hit(&mut hits, 0));
    }

    #[test]
    fn test_counters_are_independent() {
        let mut scratch = AbilityScratch::default();
        assert!(!count_hit(&mut scratch.steal_hits, 2));
        assert!(count_hit(&mut scratch.stun_hits, 1));
        assert_eq!(scratch.steal_hits, Some(1));
        assert!(count_hit(&mut scratch.steal_hits, 2));
    }

    #[test]
    fn test_interval() {
        let mut last = None;
        assert!(!interval_elapsed(&mut last, 0.5, 5.0));
        assert!(!interval_elapsed(&mut last, 5.0, 5.0));
        assert!(interval_elapsed(&mut last, 5.5, 5.0));
        assert!(!interval_elapsed(&mut last, 6.0, 5.0));
    }
}
