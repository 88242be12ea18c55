//! Engine tunables.
//!
//! Every number the simulation depends on lives in [`EngineConfig`], grouped
//! by concern:
//! - `ArenaConfig`: dimensions, river band, bridges
//! - `TowerConfig`: tower stats and layout
//! - `CombatConfig`: cooldowns, ranges, aggro, projectiles
//! - `EconomyConfig`: elixir and hand size
//! - `BotConfig`: opponent cadence and placement
//!
//! Configs start from `Default`, are adjusted with `with_*` builders, and can
//! be loaded from TOML where every field is optional:
//!
//! ```
//! use lane_battle::core::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     match_duration = 120.0
//!
//!     [economy]
//!     elixir_regen = 0.8
//! "#).unwrap();
//!
//! assert_eq!(config.match_duration, 120.0);
//! assert_eq!(config.economy.elixir_regen, 0.8);
//! assert_eq!(config.economy.elixir_max, 10.0);
//! ```

use serde::{Deserialize, Serialize};

use super::geometry::Vec2;
use super::state::Lane;
use super::team::{Side, Team};
use crate::error::ConfigError;

/// Arena geometry in pixels. North (y = 0) is Red's back line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// First y of the river band.
    pub river_top: f32,
    /// Last y of the river band.
    pub river_bottom: f32,
    /// Bridge centre x for the left lane.
    pub left_bridge_x: f32,
    /// Bridge centre x for the right lane.
    pub right_bridge_x: f32,
    /// Half of a bridge's walkable width.
    pub bridge_half_width: f32,
    /// How far past the far bank a crossing waypoint is placed.
    pub crossing_overshoot: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 800.0,
            river_top: 360.0,
            river_bottom: 440.0,
            left_bridge_x: 80.0,
            right_bridge_x: 400.0,
            bridge_half_width: 20.0,
            crossing_overshoot: 10.0,
        }
    }
}

impl ArenaConfig {
    /// Horizontal midpoint; placements left of it belong to the left lane.
    #[must_use]
    pub fn midline_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Vertical centre of the river.
    #[must_use]
    pub fn river_mid_y(&self) -> f32 {
        (self.river_top + self.river_bottom) / 2.0
    }

    /// Lane a horizontal coordinate belongs to.
    #[must_use]
    pub fn lane_for_x(&self, x: f32) -> Lane {
        if x < self.midline_x() {
            Lane::Left
        } else {
            Lane::Right
        }
    }

    #[must_use]
    pub fn bridge_x(&self, lane: Lane) -> f32 {
        match lane {
            Lane::Left => self.left_bridge_x,
            Lane::Right => self.right_bridge_x,
        }
    }

    /// Half of the arena a position is on. Positions inside the band count
    /// for the half whose bank they are nearer.
    #[must_use]
    pub fn side_of(&self, position: Vec2) -> Side {
        if position.y < self.river_mid_y() {
            Side::North
        } else {
            Side::South
        }
    }

    /// True if `y` is inside the band, banks included.
    #[must_use]
    pub fn in_river_band(&self, y: f32) -> bool {
        y >= self.river_top && y <= self.river_bottom
    }

    /// True if `y` is strictly between the banks.
    #[must_use]
    pub fn in_river_interior(&self, y: f32) -> bool {
        y > self.river_top && y < self.river_bottom
    }

    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.x <= self.width
            && position.y >= 0.0
            && position.y <= self.height
    }

    /// Clamp a position into the arena rectangle.
    #[must_use]
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.clamp(0.0, self.width),
            position.y.clamp(0.0, self.height),
        )
    }

    /// The bank y a team stands on before crossing.
    #[must_use]
    pub fn home_bank(&self, team: Team) -> f32 {
        match team.home_side() {
            Side::North => self.river_top,
            Side::South => self.river_bottom,
        }
    }

    /// Inclusive y range a team may deploy troops into.
    #[must_use]
    pub fn deploy_range(&self, team: Team) -> (f32, f32) {
        match team.home_side() {
            Side::North => (0.0, self.river_top),
            Side::South => (self.river_bottom, self.height),
        }
    }
}

/// Tower stats and layout. Positions are given for Red and mirrored for Blue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    pub king_hp: f32,
    pub king_dps: f32,
    pub king_range: f32,
    pub king_radius: f32,
    /// Distance of the king from its team's back edge.
    pub king_depth: f32,
    pub princess_hp: f32,
    pub princess_dps: f32,
    pub princess_range: f32,
    pub princess_radius: f32,
    /// Distance of the princesses from their team's back edge.
    pub princess_depth: f32,
    /// Seconds between tower shots.
    pub hit_cooldown: f32,
    pub projectile_speed: f32,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            king_hp: 4500.0,
            king_dps: 180.0,
            king_range: 250.0,
            king_radius: 40.0,
            king_depth: 50.0,
            princess_hp: 2600.0,
            princess_dps: 140.0,
            princess_range: 250.0,
            princess_radius: 30.0,
            princess_depth: 120.0,
            hit_cooldown: 1.0,
            projectile_speed: 500.0,
        }
    }
}

/// Combat and movement tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Seconds between unit attacks before rage.
    pub hit_cooldown: f32,
    /// Edge-to-edge reach of melee units.
    pub melee_range: f32,
    /// Added to attack range to get the search radius.
    pub aggro_margin: f32,
    /// Lower bound for the search radius.
    pub min_aggro_radius: f32,
    /// Locks further than this (centre to centre) are dropped. `None` disables.
    pub leash_distance: Option<f32>,
    /// Fraction of the target radius counted as a hit.
    pub impact_tolerance: f32,
    pub projectile_speed: f32,
    /// Largest dt a single step will integrate.
    pub max_dt: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            hit_cooldown: 1.0,
            melee_range: 5.0,
            aggro_margin: 100.0,
            min_aggro_radius: 120.0,
            leash_distance: Some(260.0),
            impact_tolerance: 0.8,
            projectile_speed: 400.0,
            max_dt: 0.1,
        }
    }
}

impl CombatConfig {
    /// Search radius for a unit with the given attack range.
    #[must_use]
    pub fn aggro_radius(&self, range: f32) -> f32 {
        (range + self.aggro_margin).max(self.min_aggro_radius)
    }
}

/// Elixir and hand tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub elixir_max: f32,
    /// Elixir per second.
    pub elixir_regen: f32,
    pub starting_elixir: f32,
    pub hand_size: usize,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            elixir_max: 10.0,
            elixir_regen: 0.4,
            starting_elixir: 5.0,
            hand_size: 4,
        }
    }
}

/// Heuristic opponent tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Team the bot plays.
    pub team: Team,
    pub think_min: f32,
    pub think_max: f32,
    /// Enemy units closer than this to a bot tower count as a threat.
    pub threat_radius: f32,
    /// Spread applied to placement points.
    pub placement_jitter: f32,
    /// How far behind its own bank the bot drops attacking units.
    pub attack_depth: f32,
    /// Cost bounds for a "mid-cost generalist".
    pub mid_cost_min: u32,
    pub mid_cost_max: u32,
    /// Minimum hp for a buildings-only card to count as a tank push.
    pub tank_hp: f32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            team: Team::Red,
            think_min: 0.7,
            think_max: 1.3,
            threat_radius: 300.0,
            placement_jitter: 30.0,
            attack_depth: 60.0,
            mid_cost_min: 3,
            mid_cost_max: 5,
            tank_hp: 1500.0,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub arena: ArenaConfig,
    pub towers: TowerConfig,
    pub combat: CombatConfig,
    pub economy: EconomyConfig,
    pub bot: BotConfig,
    /// Seconds until the timer decides the match.
    pub match_duration: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            towers: TowerConfig::default(),
            combat: CombatConfig::default(),
            economy: EconomyConfig::default(),
            bot: BotConfig::default(),
            match_duration: 180.0,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document. Missing fields take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        if arena.width <= 0.0 || arena.height <= 0.0 {
            return Err(ConfigError::Invalid("arena dimensions must be positive".into()));
        }
        let river_inside = 0.0 < arena.river_top
            && arena.river_top < arena.river_bottom
            && arena.river_bottom < arena.height;
        if !river_inside {
            return Err(ConfigError::Invalid(
                "river band must lie strictly inside the arena".into(),
            ));
        }
        if arena.left_bridge_x >= arena.midline_x() || arena.right_bridge_x <= arena.midline_x() {
            return Err(ConfigError::Invalid(
                "bridges must sit on either side of the midline".into(),
            ));
        }
        if self.combat.max_dt <= 0.0 {
            return Err(ConfigError::Invalid("max_dt must be positive".into()));
        }
        if self.economy.hand_size == 0 {
            return Err(ConfigError::Invalid("hand_size must be at least 1".into()));
        }
        if self.bot.think_min > self.bot.think_max {
            return Err(ConfigError::Invalid("bot think_min exceeds think_max".into()));
        }
        Ok(())
    }

    /// Set the match duration.
    #[must_use]
    pub fn with_match_duration(mut self, seconds: f32) -> Self {
        self.match_duration = seconds;
        self
    }

    /// Set the elixir regeneration rate.
    #[must_use]
    pub fn with_elixir_regen(mut self, per_second: f32) -> Self {
        self.economy.elixir_regen = per_second;
        self
    }

    /// Set the starting elixir for both teams.
    #[must_use]
    pub fn with_starting_elixir(mut self, elixir: f32) -> Self {
        self.economy.starting_elixir = elixir;
        self
    }

    /// Set or disable the lock leash.
    #[must_use]
    pub fn with_leash(mut self, leash: Option<f32>) -> Self {
        self.combat.leash_distance = leash;
        self
    }

    /// Set the team the bot plays.
    #[must_use]
    pub fn with_bot_team(mut self, team: Team) -> Self {
        self.bot.team = team;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.arena.width, 480.0);
        assert_eq!(config.arena.river_top, 360.0);
        assert_eq!(config.economy.elixir_max, 10.0);
        assert_eq!(config.combat.leash_distance, Some(260.0));
        assert_eq!(config.bot.team, Team::Red);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_match_duration(60.0)
            .with_starting_elixir(10.0)
            .with_leash(None)
            .with_bot_team(Team::Blue);

        assert_eq!(config.match_duration, 60.0);
        assert_eq!(config.bot.team, Team::Blue);
        assert_eq!(config.economy.starting_elixir, 10.0);
        assert_eq!(config.combat.leash_distance, None);
    }

    #[test]
    fn test_arena_helpers() {
        let arena = ArenaConfig::default();
        assert_eq!(arena.lane_for_x(100.0), Lane::Left);
        assert_eq!(arena.lane_for_x(240.0), Lane::Right);
        assert_eq!(arena.bridge_x(Lane::Right), 400.0);
        assert!(arena.in_river_band(360.0));
        assert!(!arena.in_river_interior(360.0));
        assert!(arena.in_river_interior(400.0));
        assert_eq!(arena.side_of(Vec2::new(0.0, 100.0)), Side::North);
        assert_eq!(arena.side_of(Vec2::new(0.0, 700.0)), Side::South);
        assert_eq!(arena.deploy_range(Team::Blue), (440.0, 800.0));
    }

    #[test]
    fn test_aggro_radius_floor() {
        let combat = CombatConfig::default();
        assert_eq!(combat.aggro_radius(5.0), 120.0);
        assert_eq!(combat.aggro_radius(98.0), 198.0);
    }

    #[test]
    fn test_toml_partial() {
        let config = EngineConfig::from_toml_str(
            r#"
            [arena]
            bridge_half_width = 25.0

            [bot]
            team = "blue"
            "#,
        )
        .unwrap();

        assert_eq!(config.arena.bridge_half_width, 25.0);
        assert_eq!(config.arena.width, 480.0);
        assert_eq!(config.bot.team, Team::Blue);
    }

    #[test]
    fn test_toml_rejects_bad_river() {
        let err = EngineConfig::from_toml_str(
            r#"
            [arena]
            river_top = 500.0
            river_bottom = 400.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = EngineConfig::from_toml_str("match_duration = [").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
