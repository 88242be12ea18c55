//! Data-driven unit abilities.
//!
//! Cards declare abilities as `{ "key": …, "params": { … } }`. The key picks a
//! variant of the closed [`Ability`] enum and the params deserialize into that
//! variant's typed parameter struct. Keys the engine does not know load as
//! [`DeclaredAbility::Unknown`]: the card still works, the ability is logged
//! and skipped. A known key whose params do not parse is reported by
//! [`DeclaredAbility::malformed`], and catalog loading rejects it.
//!
//! ## Lifecycle events
//!
//! | Event | Fired |
//! |---|---|
//! | `Spawn` | once, right after the unit is placed or spawned |
//! | `Tick` | every tick the unit is alive, after its combat update |
//! | `AttackHit` | when its attack lands (melee swing or projectile impact) |
//! | `Death` | in the death phase, before the unit is removed |
//! | `Collision` | when a detonating unit reaches its target |
//!
//! [`Ability::handles`] is the registration table: an ability runs only for
//! the events it lists.
//!
//! ## Fault isolation
//!
//! Each handler runs against a copy of the snapshot through an
//! [`AbilityScope`]. If it returns an error, the copy is discarded, the RNG is
//! rewound, and a warning is logged; the caller sees the snapshot exactly as
//! it was before the call.
//!
//! ```
//! use lane_battle::abilities::{Ability, AbilityEvent, LifetimeParams};
//!
//! let ability = Ability::Lifetime(LifetimeParams { seconds: 8.0 });
//! assert!(ability.handles(AbilityEvent::Tick));
//! assert!(!ability.handles(AbilityEvent::AttackHit));
//! assert_eq!(ability.key(), "lifetime");
//! ```

mod dispatch;
mod handlers;
mod params;
mod scratch;

pub use dispatch::{dispatch, AbilityScope};
pub use params::*;
pub use scratch::AbilityScratch;

use serde::{Deserialize, Serialize};

/// Lifecycle events an ability can react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityEvent {
    Spawn,
    Tick,
    AttackHit,
    Death,
    Collision,
}

/// Every ability the engine can run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "params", rename_all = "snake_case")]
pub enum Ability {
    /// Every N hits, move elixir from the enemy to the owner.
    StealElixir(StealElixirParams),
    /// Damage enemies around the primary target.
    SplashDamage(SplashDamageParams),
    /// Slow the unit that was hit.
    SlowOnHit(SlowOnHitParams),
    /// Every N hits, stun enemies around the target.
    StunEveryN(StunEveryNParams),
    /// The deployed unit stays with the given probability, otherwise fizzles.
    CoinflipSpawn(CoinflipSpawnParams),
    /// While moving, knock back and briefly stun enemy troops in contact.
    BattleRam(BattleRamParams),
    /// Split hp with a ranged partner spawned behind.
    DuoUnit(DuoUnitParams),
    /// Periodically rage or boost allies, or slow enemies.
    RandomAura(RandomAuraParams),
    /// Periodically spawn tokens, capped by live children.
    SpawnMinions(SpawnMinionsParams),
    /// After walking a distance, the next hit deals bonus damage.
    ChargeStrike(ChargeStrikeParams),
    /// Hit extra enemies in a narrow cone behind the target.
    PierceLine(PierceLineParams),
    /// Keep enemies in an aura slowed.
    AuraSlow(AuraSlowParams),
    /// Bounce to nearby enemies with decreasing damage.
    ChainLightning(ChainLightningParams),
    /// Explode on contact and remove the unit.
    Detonate(DetonateParams),
    /// Short cooldowns between the shots of a burst.
    BurstFire(BurstFireParams),
    /// Periodically freeze nearby enemies.
    FreezePulse(FreezePulseParams),
    /// Damage ramps up while locked on the same target.
    RampingDamage(RampingDamageParams),
    /// Drop a fused barrel token at the cast point.
    GoblinBarrel(GoblinBarrelParams),
    /// Break after a delay and release tokens on death.
    BarrelFuse(BarrelFuseParams),
    /// Expire after a fixed time.
    Lifetime(LifetimeParams),
    /// Damage enemies in a radius, reduced against towers.
    AreaDamage(AreaDamageParams),
}

impl Ability {
    /// Every catalog key the engine has a handler for.
    pub const KEYS: &'static [&'static str] = &[
        "steal_elixir",
        "splash_damage",
        "slow_on_hit",
        "stun_every_n",
        "coinflip_spawn",
        "battle_ram",
        "duo_unit",
        "random_aura",
        "spawn_minions",
        "charge_strike",
        "pierce_line",
        "aura_slow",
        "chain_lightning",
        "detonate",
        "burst_fire",
        "freeze_pulse",
        "ramping_damage",
        "goblin_barrel",
        "barrel_fuse",
        "lifetime",
        "area_damage",
    ];

    /// Whether this ability runs for `event`.
    #[must_use]
    pub fn handles(&self, event: AbilityEvent) -> bool {
        use AbilityEvent::*;
        match self {
            Ability::StealElixir(_)
            | Ability::SplashDamage(_)
            | Ability::SlowOnHit(_)
            | Ability::StunEveryN(_)
            | Ability::PierceLine(_)
            | Ability::ChainLightning(_)
            | Ability::BurstFire(_) => event == AttackHit,
            Ability::CoinflipSpawn(_)
            | Ability::DuoUnit(_)
            | Ability::GoblinBarrel(_)
            | Ability::AreaDamage(_) => event == Spawn,
            Ability::BattleRam(_)
            | Ability::RandomAura(_)
            | Ability::SpawnMinions(_)
            | Ability::AuraSlow(_)
            | Ability::FreezePulse(_)
            | Ability::RampingDamage(_) => event == Tick,
            Ability::ChargeStrike(_) => matches!(event, Tick | AttackHit),
            Ability::Detonate(_) => event == Collision,
            Ability::BarrelFuse(_) => matches!(event, Spawn | Tick | Death),
            Ability::Lifetime(_) => matches!(event, Spawn | Tick),
        }
    }

    /// Catalog key of this ability.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Ability::StealElixir(_) => "steal_elixir",
            Ability::SplashDamage(_) => "splash_damage",
            Ability::SlowOnHit(_) => "slow_on_hit",
            Ability::StunEveryN(_) => "stun_every_n",
            Ability::CoinflipSpawn(_) => "coinflip_spawn",
            Ability::BattleRam(_) => "battle_ram",
            Ability::DuoUnit(_) => "duo_unit",
            Ability::RandomAura(_) => "random_aura",
            Ability::SpawnMinions(_) => "spawn_minions",
            Ability::ChargeStrike(_) => "charge_strike",
            Ability::PierceLine(_) => "pierce_line",
            Ability::AuraSlow(_) => "aura_slow",
            Ability::ChainLightning(_) => "chain_lightning",
            Ability::Detonate(_) => "detonate",
            Ability::BurstFire(_) => "burst_fire",
            Ability::FreezePulse(_) => "freeze_pulse",
            Ability::RampingDamage(_) => "ramping_damage",
            Ability::GoblinBarrel(_) => "goblin_barrel",
            Ability::BarrelFuse(_) => "barrel_fuse",
            Ability::Lifetime(_) => "lifetime",
            Ability::AreaDamage(_) => "area_damage",
        }
    }

    /// Token card names this ability spawns, for catalog validation.
    #[must_use]
    pub fn token_refs(&self) -> Option<&str> {
        match self {
            Ability::DuoUnit(p) => Some(&p.partner),
            Ability::SpawnMinions(p) => Some(&p.token),
            Ability::GoblinBarrel(p) => Some(&p.token),
            Ability::BarrelFuse(p) => Some(&p.token),
            _ => None,
        }
    }
}

/// An ability entry as written in a catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclaredAbility {
    Known(Ability),
    /// A key this engine has no handler for.
    Unknown {
        key: String,
        #[serde(default)]
        params: serde_json::Value,
    },
}

impl DeclaredAbility {
    #[must_use]
    pub fn known(&self) -> Option<&Ability> {
        match self {
            DeclaredAbility::Known(ability) => Some(ability),
            DeclaredAbility::Unknown { .. } => None,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            DeclaredAbility::Known(ability) => ability.key(),
            DeclaredAbility::Unknown { key, .. } => key,
        }
    }

    /// Why an entry with a handled key failed to parse as that ability.
    ///
    /// `None` for parsed abilities and for keys the engine does not know.
    #[must_use]
    pub fn malformed(&self) -> Option<serde_json::Error> {
        let DeclaredAbility::Unknown { key, params } = self else {
            return None;
        };
        if !Ability::KEYS.contains(&key.as_str()) {
            return None;
        }
        let entry = serde_json::json!({ "key": key, "params": params });
        serde_json::from_value::<Ability>(entry).err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let ability = Ability::StealElixir(StealElixirParams {
            every_n_attacks: 4,
            amount: 1.0,
        });
        let json = serde_json::to_string(&ability).unwrap();
        assert_eq!(
            json,
            r#"{"key":"steal_elixir","params":{"every_n_attacks":4,"amount":1.0}}"#
        );
    }

    #[test]
    fn test_empty_params_take_defaults() {
        let ability: Ability =
            serde_json::from_str(r#"{"key":"chain_lightning","params":{}}"#).unwrap();
        assert_eq!(ability, Ability::ChainLightning(ChainLightningParams::default()));
    }

    #[test]
    fn test_unknown_key() {
        let declared: DeclaredAbility =
            serde_json::from_str(r#"{"key":"summon_dragon","params":{"count":2}}"#).unwrap();
        assert!(declared.known().is_none());
        assert_eq!(declared.key(), "summon_dragon");
        assert!(declared.malformed().is_none());
    }

    #[test]
    fn test_known_key_with_bad_params() {
        for json in [
            r#"{"key":"splash_damage"}"#,
            r#"{"key":"splash_damage","params":{"radius":"wide"}}"#,
            r#"{"key":"lifetime","params":"forever"}"#,
        ] {
            let declared: DeclaredAbility = serde_json::from_str(json).unwrap();
            assert!(declared.known().is_none(), "{}", json);
            assert!(declared.malformed().is_some(), "{}", json);
        }
    }

    #[test]
    fn test_keys_cover_every_variant() {
        for key in Ability::KEYS {
            let entry = serde_json::json!({ "key": key, "params": {} });
            let ability: Ability = serde_json::from_value(entry).unwrap();
            assert_eq!(ability.key(), *key);
        }
        assert_eq!(Ability::KEYS.len(), 21);
    }

    #[test]
    fn test_event_table() {
        let fuse = Ability::BarrelFuse(BarrelFuseParams::default());
        assert!(fuse.handles(AbilityEvent::Spawn));
        assert!(fuse.handles(AbilityEvent::Tick));
        assert!(fuse.handles(AbilityEvent::Death));
        assert!(!fuse.handles(AbilityEvent::AttackHit));

        let bomb = Ability::Detonate(DetonateParams::default());
        assert!(bomb.handles(AbilityEvent::Collision));
        assert!(!bomb.handles(AbilityEvent::Tick));

        let charge = Ability::ChargeStrike(ChargeStrikeParams::default());
        assert!(charge.handles(AbilityEvent::Tick));
        assert!(charge.handles(AbilityEvent::AttackHit));
    }

    #[test]
    fn test_keys_roundtrip_through_serde() {
        let abilities = [
            Ability::SplashDamage(SplashDamageParams::default()),
            Ability::GoblinBarrel(GoblinBarrelParams::default()),
            Ability::RampingDamage(RampingDamageParams::default()),
        ];
        for ability in abilities {
            let value = serde_json::to_value(&ability).unwrap();
            assert_eq!(value["key"], ability.key());
        }
    }
}
