//! Typed ability parameters.
//!
//! Every field has a default, so a catalog entry may give `"params": {}` and
//! override only what it needs.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StealElixirParams {
    pub every_n_attacks: u32,
    pub amount: f32,
}

impl Default for StealElixirParams {
    fn default() -> Self {
        Self { every_n_attacks: 3, amount: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashDamageParams {
    pub radius: f32,
    /// Fraction of a normal hit dealt to each splashed enemy.
    pub damage_ratio: f32,
}

impl Default for SplashDamageParams {
    fn default() -> Self {
        Self { radius: 30.0, damage_ratio: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlowOnHitParams {
    pub magnitude: f32,
    pub duration: f32,
}

impl Default for SlowOnHitParams {
    fn default() -> Self {
        Self { magnitude: 0.2, duration: 2.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StunEveryNParams {
    pub every_n_hits: u32,
    pub radius: f32,
    pub duration: f32,
}

impl Default for StunEveryNParams {
    fn default() -> Self {
        Self { every_n_hits: 3, radius: 25.0, duration: 1.5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinflipSpawnParams {
    /// Chance that the deployed unit stays on the field.
    pub spawn_probability: f32,
}

impl Default for CoinflipSpawnParams {
    fn default() -> Self {
        Self { spawn_probability: 0.55 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleRamParams {
    pub knockback: f32,
    pub stun: f32,
    /// Extra gap still counted as contact.
    pub contact_margin: f32,
}

impl Default for BattleRamParams {
    fn default() -> Self {
        Self { knockback: 12.0, stun: 0.25, contact_margin: 2.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuoUnitParams {
    /// Token card spawned behind the front unit.
    pub partner: String,
    pub front_hp_ratio: f32,
    pub back_hp_ratio: f32,
    /// Distance behind the front unit, against its forward direction.
    pub offset: f32,
}

impl Default for DuoUnitParams {
    fn default() -> Self {
        Self {
            partner: "duo_partner".into(),
            front_hp_ratio: 0.7,
            back_hp_ratio: 0.3,
            offset: 15.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomAuraParams {
    pub interval: f32,
    pub radius: f32,
    pub duration: f32,
    pub rage: f32,
    pub boost: f32,
    pub slow: f32,
}

impl Default for RandomAuraParams {
    fn default() -> Self {
        Self {
            interval: 7.0,
            radius: 60.0,
            duration: 3.0,
            rage: 0.3,
            boost: 0.2,
            slow: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnMinionsParams {
    pub token: String,
    pub interval: f32,
    pub count: u32,
    /// Cap on live children.
    pub max_active: usize,
    /// Horizontal spacing between children.
    pub spacing: f32,
    /// Distance behind the spawner.
    pub offset: f32,
}

impl Default for SpawnMinionsParams {
    fn default() -> Self {
        Self {
            token: "minibot".into(),
            interval: 5.0,
            count: 2,
            max_active: 6,
            spacing: 15.0,
            offset: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeStrikeParams {
    pub min_distance: f32,
    /// Total damage multiplier of a charged hit.
    pub multiplier: f32,
}

impl Default for ChargeStrikeParams {
    fn default() -> Self {
        Self { min_distance: 60.0, multiplier: 2.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PierceLineParams {
    /// Total targets hit, primary included.
    pub max_targets: usize,
    /// Half-angle of the cone in radians.
    pub cone: f32,
}

impl Default for PierceLineParams {
    fn default() -> Self {
        Self { max_targets: 3, cone: 0.3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuraSlowParams {
    pub radius: f32,
    pub magnitude: f32,
    /// Lifetime of each refreshed slow.
    pub refresh: f32,
}

impl Default for AuraSlowParams {
    fn default() -> Self {
        Self { radius: 40.0, magnitude: 0.25, refresh: 0.5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainLightningParams {
    /// Total targets hit, primary included.
    pub max_targets: usize,
    pub radius: f32,
    /// Damage fraction per link; index 0 is the primary hit.
    pub falloff: Vec<f32>,
}

impl Default for ChainLightningParams {
    fn default() -> Self {
        Self {
            max_targets: 3,
            radius: 50.0,
            falloff: vec![1.0, 0.7, 0.5],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetonateParams {
    pub damage: f32,
    pub splash_radius: f32,
    pub splash_ratio: f32,
}

impl Default for DetonateParams {
    fn default() -> Self {
        Self { damage: 350.0, splash_radius: 30.0, splash_ratio: 0.5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstFireParams {
    pub burst_size: u32,
    /// Cooldown between shots inside a burst.
    pub burst_cooldown: f32,
}

impl Default for BurstFireParams {
    fn default() -> Self {
        Self { burst_size: 3, burst_cooldown: 0.3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreezePulseParams {
    pub interval: f32,
    pub radius: f32,
    pub duration: f32,
}

impl Default for FreezePulseParams {
    fn default() -> Self {
        Self { interval: 5.0, radius: 40.0, duration: 1.5 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RampingDamageParams {
    pub min_dps: f32,
    pub max_dps: f32,
    pub ramp_time: f32,
}

impl Default for RampingDamageParams {
    fn default() -> Self {
        Self { min_dps: 90.0, max_dps: 260.0, ramp_time: 5.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoblinBarrelParams {
    /// Token dropped at the cast point.
    pub token: String,
}

impl Default for GoblinBarrelParams {
    fn default() -> Self {
        Self { token: "barrel".into() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrelFuseParams {
    pub fuse: f32,
    /// Token released when the barrel breaks.
    pub token: String,
    pub count: u32,
    pub spread: f32,
}

impl Default for BarrelFuseParams {
    fn default() -> Self {
        Self {
            fuse: 1.0,
            token: "goblin".into(),
            count: 3,
            spread: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeParams {
    pub seconds: f32,
}

impl Default for LifetimeParams {
    fn default() -> Self {
        Self { seconds: 12.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaDamageParams {
    pub damage: f32,
    pub radius: f32,
    /// Fraction of the damage dealt to towers.
    pub tower_ratio: f32,
}

impl Default for AreaDamageParams {
    fn default() -> Self {
        Self { damage: 500.0, radius: 45.0, tower_ratio: 0.35 }
    }
}
