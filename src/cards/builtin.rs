//! The built-in card roster.
//!
//! Ids 1..=25 are playable cards; ids from 100 up are tokens spawned by
//! abilities and never dealt into a deck.

use super::definition::{CardDefinition, CardId, CardKind, RangeClass, SpeedClass, TargetClass};
use super::registry::CardCatalog;
use crate::abilities::*;

const GROUND: &[TargetClass] = &[TargetClass::Ground];
const ANY: &[TargetClass] = &[TargetClass::Ground, TargetClass::Air];
const BUILDINGS: &[TargetClass] = &[TargetClass::BuildingsOnly];

/// Deck handed to each side when a match is built without one.
pub const DEFAULT_DECK: [&str; 8] = [
    "knight",
    "archer",
    "giant",
    "minion",
    "fireball",
    "cannon",
    "bomber",
    "battle_ram",
];

fn troop(id: u32, name: &str, cost: u32, hp: f32, dps: f32) -> CardDefinition {
    CardDefinition::new(CardId::new(id), name, CardKind::Troop)
        .with_cost(cost)
        .with_stats(hp, dps)
}

fn building(id: u32, name: &str, cost: u32, hp: f32, dps: f32) -> CardDefinition {
    CardDefinition::new(CardId::new(id), name, CardKind::Building)
        .with_cost(cost)
        .with_stats(hp, dps)
}

fn spell(id: u32, name: &str, cost: u32) -> CardDefinition {
    CardDefinition::new(CardId::new(id), name, CardKind::Spell)
        .with_cost(cost)
        .with_targets(ANY)
}

fn roster() -> Vec<CardDefinition> {
    vec![
        troop(1, "knight", 3, 1400.0, 120.0),
        troop(2, "archer", 3, 500.0, 80.0)
            .with_range(RangeClass::Long)
            .with_targets(ANY)
            .with_projectile("arrow"),
        troop(3, "giant", 5, 3300.0, 150.0)
            .with_speed(SpeedClass::Slow)
            .with_targets(BUILDINGS)
            .with_hit_radius(14.0),
        troop(4, "minion", 3, 300.0, 90.0)
            .with_speed(SpeedClass::Fast)
            .with_range(RangeClass::Short)
            .with_targets(ANY)
            .flying()
            .with_hit_radius(7.0)
            .with_projectile("spit"),
        spell(5, "fireball", 4).with_ability(Ability::AreaDamage(AreaDamageParams::default())),
        building(6, "cannon", 3, 900.0, 130.0)
            .with_range(RangeClass::VeryLong)
            .with_targets(GROUND)
            .with_projectile("cannonball")
            .with_ability(Ability::Lifetime(LifetimeParams { seconds: 30.0 })),
        troop(7, "elixir_thief", 3, 700.0, 90.0)
            .with_speed(SpeedClass::Fast)
            .with_ability(Ability::StealElixir(StealElixirParams::default())),
        troop(8, "bomber", 3, 450.0, 110.0)
            .with_range(RangeClass::Medium)
            .with_projectile("bomb")
            .with_ability(Ability::SplashDamage(SplashDamageParams::default())),
        troop(9, "frost_archer", 3, 550.0, 75.0)
            .with_range(RangeClass::Long)
            .with_targets(ANY)
            .with_projectile("ice_arrow")
            .with_ability(Ability::SlowOnHit(SlowOnHitParams::default())),
        troop(10, "stunner", 4, 1000.0, 100.0)
            .with_ability(Ability::StunEveryN(StunEveryNParams::default())),
        troop(11, "gambler", 2, 1100.0, 140.0)
            .with_ability(Ability::CoinflipSpawn(CoinflipSpawnParams::default())),
        troop(12, "battle_ram", 4, 1500.0, 200.0)
            .with_speed(SpeedClass::Fast)
            .with_targets(BUILDINGS)
            .with_hit_radius(14.0)
            .with_ability(Ability::BattleRam(BattleRamParams::default())),
        troop(13, "duo", 4, 1600.0, 110.0)
            .with_ability(Ability::DuoUnit(DuoUnitParams::default())),
        building(14, "chaos_totem", 4, 800.0, 0.0)
            .with_range(RangeClass::None)
            .with_targets(&[])
            .with_ability(Ability::RandomAura(RandomAuraParams::default()))
            .with_ability(Ability::Lifetime(LifetimeParams { seconds: 25.0 })),
        building(15, "bot_factory", 5, 1000.0, 0.0)
            .with_range(RangeClass::None)
            .with_targets(&[])
            .with_ability(Ability::SpawnMinions(SpawnMinionsParams::default()))
            .with_ability(Ability::Lifetime(LifetimeParams { seconds: 40.0 })),
        troop(16, "charger", 4, 1200.0, 160.0)
            .with_ability(Ability::ChargeStrike(ChargeStrikeParams::default())),
        troop(17, "piercer", 4, 600.0, 100.0)
            .with_range(RangeClass::Long)
            .with_projectile("spear")
            .with_ability(Ability::PierceLine(PierceLineParams::default())),
        building(18, "tar_pit", 3, 600.0, 0.0)
            .with_range(RangeClass::None)
            .with_targets(&[])
            .with_ability(Ability::AuraSlow(AuraSlowParams::default()))
            .with_ability(Ability::Lifetime(LifetimeParams { seconds: 20.0 })),
        building(19, "tesla_coil", 4, 900.0, 120.0)
            .with_range(RangeClass::Medium)
            .with_targets(ANY)
            .with_ability(Ability::ChainLightning(ChainLightningParams::default()))
            .with_ability(Ability::Lifetime(LifetimeParams { seconds: 30.0 })),
        troop(20, "bomb_runner", 3, 500.0, 0.0)
            .with_speed(SpeedClass::VeryFast)
            .with_targets(BUILDINGS)
            .with_ability(Ability::Detonate(DetonateParams::default())),
        troop(21, "gunner", 4, 700.0, 70.0)
            .with_range(RangeClass::Medium)
            .with_targets(ANY)
            .with_projectile("bullet")
            .with_ability(Ability::BurstFire(BurstFireParams::default())),
        troop(22, "ice_speaker", 4, 900.0, 60.0)
            .with_speed(SpeedClass::Slow)
            .with_ability(Ability::FreezePulse(FreezePulseParams::default())),
        building(23, "inferno", 5, 1200.0, 90.0)
            .with_range(RangeClass::Medium)
            .with_targets(ANY)
            .with_ability(Ability::RampingDamage(RampingDamageParams::default()))
            .with_ability(Ability::Lifetime(LifetimeParams { seconds: 30.0 })),
        spell(24, "goblin_barrel", 3)
            .with_ability(Ability::GoblinBarrel(GoblinBarrelParams::default())),
        building(25, "nest", 4, 700.0, 0.0)
            .with_range(RangeClass::None)
            .with_targets(&[])
            .with_ability(Ability::SpawnMinions(SpawnMinionsParams {
                token: "chichi".into(),
                interval: 6.0,
                count: 3,
                max_active: 6,
                ..Default::default()
            }))
            .with_ability(Ability::Lifetime(LifetimeParams { seconds: 30.0 })),
        troop(100, "goblin", 0, 200.0, 100.0)
            .with_speed(SpeedClass::VeryFast)
            .with_hit_radius(7.0)
            .token(),
        troop(101, "minibot", 0, 250.0, 60.0)
            .with_hit_radius(7.0)
            .with_ability(Ability::Lifetime(LifetimeParams::default()))
            .token(),
        troop(102, "chichi", 0, 120.0, 50.0)
            .with_speed(SpeedClass::Fast)
            .with_targets(ANY)
            .flying()
            .with_hit_radius(7.0)
            .token(),
        troop(103, "duo_partner", 0, 500.0, 80.0)
            .with_range(RangeClass::Long)
            .with_targets(ANY)
            .with_projectile("arrow")
            .token(),
        troop(104, "barrel", 0, 1.0, 0.0)
            .with_speed(SpeedClass::None)
            .with_range(RangeClass::None)
            .with_targets(&[])
            .with_ability(Ability::BarrelFuse(BarrelFuseParams::default()))
            .token(),
    ]
}

impl CardCatalog {
    /// The built-in roster.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for card in roster() {
            if let Err(err) = catalog.insert(card) {
                log::error!("built-in roster: {}", err);
            }
        }
        catalog
    }

    /// Ids of [`DEFAULT_DECK`] in this catalog.
    #[must_use]
    pub fn default_deck(&self) -> Vec<CardId> {
        self.ids_for(&DEFAULT_DECK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_ids_unique_and_complete() {
        let catalog = CardCatalog::builtin();
        assert_eq!(catalog.len(), roster().len());
        assert_eq!(catalog.playable().count(), 25);
    }

    #[test]
    fn test_default_deck_resolves() {
        let catalog = CardCatalog::builtin();
        let deck = catalog.default_deck();
        assert_eq!(deck.len(), 8);
        assert!(deck.iter().all(|id| !catalog.get(*id).unwrap().token));
    }

    #[test]
    fn test_every_declared_ability_is_known() {
        let catalog = CardCatalog::builtin();
        for card in catalog.iter() {
            assert_eq!(card.known_abilities().count(), card.abilities.len(), "{}", card.name);
        }
    }

    #[test]
    fn test_spells_hit_air() {
        let catalog = CardCatalog::builtin();
        assert!(catalog.by_name("fireball").unwrap().hits_air());
    }
}
