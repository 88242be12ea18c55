//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: cost, stats,
//! movement and range classes, target classes, and the abilities it declares.
//! A deployed unit copies what it needs at spawn time; the definition itself
//! never changes after the catalog is loaded.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::abilities::{Ability, DeclaredAbility};

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What a card turns into when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Troop,
    Building,
    /// Materializes for its spawn event only.
    Spell,
}

/// Movement speed bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedClass {
    VerySlow,
    Slow,
    #[default]
    Medium,
    Fast,
    VeryFast,
    None,
}

impl SpeedClass {
    #[must_use]
    pub const fn pixels_per_second(self) -> f32 {
        match self {
            SpeedClass::VerySlow => 20.0,
            SpeedClass::Slow => 30.0,
            SpeedClass::Medium => 50.0,
            SpeedClass::Fast => 75.0,
            SpeedClass::VeryFast => 100.0,
            SpeedClass::None => 0.0,
        }
    }
}

/// Attack range bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeClass {
    #[default]
    Melee,
    Short,
    Medium,
    Long,
    VeryLong,
    Global,
    None,
}

impl RangeClass {
    /// Edge-to-edge reach in pixels. Melee reach is an engine tunable.
    #[must_use]
    pub fn pixels(self, melee_range: f32) -> f32 {
        match self {
            RangeClass::Melee => melee_range,
            RangeClass::Short => 42.0,
            RangeClass::Medium => 63.0,
            RangeClass::Long => 98.0,
            RangeClass::VeryLong => 140.0,
            RangeClass::Global => 9999.0,
            RangeClass::None => 0.0,
        }
    }

    /// Ranged attackers fire projectiles instead of hitting directly.
    #[must_use]
    pub fn is_ranged(self) -> bool {
        !matches!(self, RangeClass::Melee | RangeClass::None)
    }
}

/// What a unit is allowed to attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetClass {
    Ground,
    Air,
    /// Towers and building cards only.
    BuildingsOnly,
}

/// Presentation data, carried through to projectiles untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visuals {
    pub icon: Option<String>,
    pub color: Option<String>,
    /// Projectile sprite key for ranged attackers.
    pub projectile: Option<String>,
    /// Overrides the default projectile speed.
    pub projectile_speed: Option<f32>,
    /// Sprite rotation correction in degrees.
    pub rotation_offset: f32,
}

fn default_hit_radius() -> f32 {
    10.0
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use lane_battle::cards::{CardDefinition, CardId, CardKind, RangeClass, TargetClass};
///
/// let archer = CardDefinition::new(CardId::new(2), "archer", CardKind::Troop)
///     .with_cost(3)
///     .with_stats(500.0, 80.0)
///     .with_range(RangeClass::Long)
///     .with_targets(&[TargetClass::Ground, TargetClass::Air]);
///
/// assert_eq!(archer.cost, 3);
/// assert!(archer.range.is_ranged());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub cost: u32,
    pub kind: CardKind,
    #[serde(default)]
    pub hp: f32,
    #[serde(default)]
    pub dps: f32,
    #[serde(default)]
    pub speed: SpeedClass,
    #[serde(default)]
    pub range: RangeClass,
    #[serde(default)]
    pub targets: SmallVec<[TargetClass; 2]>,
    #[serde(default)]
    pub flying: bool,
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f32,
    #[serde(default)]
    pub abilities: Vec<DeclaredAbility>,
    #[serde(default)]
    pub visuals: Visuals,
    /// Auxiliary unit spawned by abilities; never dealt into a deck.
    #[serde(default)]
    pub token: bool,
}

impl CardDefinition {
    /// Create a definition with zeroed stats, targeting ground.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            cost: 0,
            kind,
            hp: 0.0,
            dps: 0.0,
            speed: if kind == CardKind::Troop { SpeedClass::Medium } else { SpeedClass::None },
            range: if kind == CardKind::Spell { RangeClass::Global } else { RangeClass::Melee },
            targets: smallvec![TargetClass::Ground],
            flying: false,
            hit_radius: if kind == CardKind::Building { 14.0 } else { default_hit_radius() },
            abilities: Vec::new(),
            visuals: Visuals::default(),
            token: false,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, hp: f32, dps: f32) -> Self {
        self.hp = hp;
        self.dps = dps;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: SpeedClass) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: RangeClass) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_targets(mut self, targets: &[TargetClass]) -> Self {
        self.targets = targets.iter().copied().collect();
        self
    }

    #[must_use]
    pub fn flying(mut self) -> Self {
        self.flying = true;
        self
    }

    #[must_use]
    pub fn with_hit_radius(mut self, radius: f32) -> Self {
        self.hit_radius = radius;
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(DeclaredAbility::Known(ability));
        self
    }

    #[must_use]
    pub fn with_projectile(mut self, sprite: impl Into<String>) -> Self {
        self.visuals.projectile = Some(sprite.into());
        self
    }

    /// Mark as an ability-spawned token.
    #[must_use]
    pub fn token(mut self) -> Self {
        self.token = true;
        self
    }

    /// Abilities this card declares that the engine knows how to run.
    pub fn known_abilities(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter().filter_map(DeclaredAbility::known)
    }

    /// True if any declared ability matches the predicate.
    #[must_use]
    pub fn has_ability(&self, predicate: impl Fn(&Ability) -> bool) -> bool {
        self.known_abilities().any(predicate)
    }

    #[must_use]
    pub fn buildings_only(&self) -> bool {
        self.targets.contains(&TargetClass::BuildingsOnly)
    }

    #[must_use]
    pub fn hits_air(&self) -> bool {
        self.targets.contains(&TargetClass::Air)
    }
}
