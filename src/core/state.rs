//! The match snapshot.
//!
//! ## GameState
//!
//! One serializable value holds everything the simulation needs:
//! - Towers, units, projectiles
//! - Per-team elixir and deck
//! - Match status, winner, clock
//! - Bot cadence and RNG state
//! - The entity ID counter
//!
//! Entity collections use `im::Vector`, so cloning a snapshot is O(1) and a
//! tick only pays for the entities it touches. `step` and `place_card` never
//! mutate their input: they clone, mutate the clone, and return it.
//!
//! ## Liveness
//!
//! An entity is alive while its hp is above zero. Dead units linger until the
//! death phase of the tick removes them; every query here skips them.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::{EntityAllocator, EntityId};
use super::geometry::Vec2;
use super::rng::GameRngState;
use super::team::{Team, TeamMap};
use crate::abilities::AbilityScratch;
use crate::cards::{CardDefinition, CardId, CardKind, TargetClass};
use crate::economy::DeckState;
use crate::status::StatusSet;

use super::config::EngineConfig;

/// One of the two lanes. Fixed for a unit's whole life.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Left,
    Right,
}

/// Combat state machine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    Idle,
    Searching,
    Moving,
    Attacking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    King,
    Princess,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Playing,
    GameOver,
}

/// A deployed troop, building, or transient spell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: EntityId,
    pub team: Team,
    pub card_id: CardId,
    pub kind: CardKind,
    pub position: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub radius: f32,
    pub dps: f32,
    /// Pixels per second before statuses.
    pub speed: f32,
    /// Edge-to-edge attack reach in pixels.
    pub range: f32,
    pub targets: SmallVec<[TargetClass; 2]>,
    pub flying: bool,
    pub lane: Lane,
    pub state: UnitState,
    pub target_id: Option<EntityId>,
    /// `None` until the first attack.
    pub last_attack_time: Option<f32>,
    pub statuses: StatusSet,
    pub scratch: AbilityScratch,
    /// Live children of a population-capped spawner.
    pub spawned_units: SmallVec<[EntityId; 4]>,
    pub crossed_river: bool,
    pub spawned_at: f32,
}

impl Unit {
    /// Build a unit from its card at `position`.
    ///
    /// `crossed_river` starts true when the unit spawns on the enemy half.
    #[must_use]
    pub fn from_card(
        id: EntityId,
        card: &CardDefinition,
        team: Team,
        position: Vec2,
        config: &EngineConfig,
        now: f32,
    ) -> Self {
        let arena = &config.arena;
        Self {
            id,
            team,
            card_id: card.id,
            kind: card.kind,
            position,
            hp: card.hp,
            max_hp: card.hp,
            radius: card.hit_radius,
            dps: card.dps,
            speed: card.speed.pixels_per_second(),
            range: card.range.pixels(config.combat.melee_range),
            targets: card.targets.clone(),
            flying: card.flying,
            lane: arena.lane_for_x(position.x),
            state: UnitState::Idle,
            target_id: None,
            last_attack_time: None,
            statuses: StatusSet::default(),
            scratch: AbilityScratch::default(),
            spawned_units: SmallVec::new(),
            crossed_river: arena.side_of(position) != team.home_side(),
            spawned_at: now,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    #[must_use]
    pub fn is_building(&self) -> bool {
        self.kind == CardKind::Building
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.kind == CardKind::Spell
    }

    /// True if this unit only attacks buildings and towers.
    #[must_use]
    pub fn buildings_only(&self) -> bool {
        self.targets.contains(&TargetClass::BuildingsOnly)
    }

    /// True if this unit can hit flying targets.
    #[must_use]
    pub fn hits_air(&self) -> bool {
        self.targets.contains(&TargetClass::Air)
    }
}

/// A stationary defensive structure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub id: EntityId,
    pub team: Team,
    pub kind: TowerKind,
    pub position: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub radius: f32,
    pub dps: f32,
    pub range: f32,
    pub last_attack_time: Option<f32>,
}

impl Tower {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}

/// A homing shot. Exists only while its target is alive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    /// Unit or tower that fired it.
    pub owner: EntityId,
    pub team: Team,
    pub target_id: EntityId,
    pub position: Vec2,
    pub speed: f32,
    pub damage: f32,
    /// Presentation key, passed through untouched.
    pub visual: Option<String>,
    /// Heading in radians.
    pub angle: f32,
    pub rotation_offset: f32,
}

/// Opponent agent cadence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotState {
    pub enabled: bool,
    pub last_think_time: f32,
    pub next_think_delay: f32,
}

impl Default for BotState {
    fn default() -> Self {
        Self {
            enabled: true,
            last_think_time: 0.0,
            next_think_delay: 1.0,
        }
    }
}

/// Read-only summary of something that can be attacked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetView {
    pub id: EntityId,
    pub team: Team,
    pub position: Vec2,
    pub radius: f32,
    pub flying: bool,
    /// Towers and building cards.
    pub is_building: bool,
    pub is_tower: bool,
}

/// Complete match snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub towers: Vector<Tower>,
    pub units: Vector<Unit>,
    pub projectiles: Vector<Projectile>,
    pub elixir: TeamMap<f32>,
    pub deck: TeamMap<DeckState>,
    pub status: MatchStatus,
    pub winner: Option<Team>,
    /// Seconds since match start.
    pub time: f32,
    pub bot: BotState,
    pub rng_state: GameRngState,
    pub next_entity_id: EntityAllocator,
}

impl GameState {
    /// Create a fresh match: towers standing, empty decks, starting elixir.
    #[must_use]
    pub fn new(config: &EngineConfig, seed: u64) -> Self {
        Self {
            towers: crate::combat::towers::initial_towers(config),
            units: Vector::new(),
            projectiles: Vector::new(),
            elixir: TeamMap::with_value(config.economy.starting_elixir),
            deck: TeamMap::default(),
            status: MatchStatus::Playing,
            winner: None,
            time: 0.0,
            bot: BotState::default(),
            rng_state: GameRngState::from_seed(seed),
            next_entity_id: EntityAllocator::default(),
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == MatchStatus::GameOver
    }

    /// Allocate a fresh entity ID.
    pub fn alloc_id(&mut self) -> EntityId {
        self.next_entity_id.alloc()
    }

    /// Look up a live unit.
    #[must_use]
    pub fn unit(&self, id: EntityId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id && u.is_alive())
    }

    /// Look up a unit mutably, alive or not.
    pub fn unit_mut(&mut self, id: EntityId) -> Option<&mut Unit> {
        let index = self.units.iter().position(|u| u.id == id)?;
        self.units.get_mut(index)
    }

    /// Look up a live tower.
    #[must_use]
    pub fn tower(&self, id: EntityId) -> Option<&Tower> {
        self.towers.iter().find(|t| t.id == id && t.is_alive())
    }

    pub fn tower_mut(&mut self, id: EntityId) -> Option<&mut Tower> {
        let index = self.towers.iter().position(|t| t.id == id)?;
        self.towers.get_mut(index)
    }

    /// True if `id` names a live unit or tower.
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.target_view(id).is_some()
    }

    /// Summary of a live unit or tower.
    #[must_use]
    pub fn target_view(&self, id: EntityId) -> Option<TargetView> {
        if let Some(tower) = self.tower(id) {
            return Some(TargetView {
                id,
                team: tower.team,
                position: tower.position,
                radius: tower.radius,
                flying: false,
                is_building: true,
                is_tower: true,
            });
        }
        self.unit(id).filter(|u| !u.is_spell()).map(|u| TargetView {
            id,
            team: u.team,
            position: u.position,
            radius: u.radius,
            flying: u.flying,
            is_building: u.is_building(),
            is_tower: false,
        })
    }

    /// Every live attackable entity of `team`, towers first.
    pub fn targets_of(&self, team: Team) -> impl Iterator<Item = TargetView> + '_ {
        let towers = self
            .towers
            .iter()
            .filter(move |t| t.team == team && t.is_alive())
            .map(|t| t.id);
        let units = self
            .units
            .iter()
            .filter(move |u| u.team == team && u.is_alive() && !u.is_spell())
            .map(|u| u.id);
        towers.chain(units).filter_map(move |id| self.target_view(id))
    }

    /// Subtract hp from a live unit or tower. Returns false if nothing was hit.
    pub fn apply_damage(&mut self, id: EntityId, amount: f32) -> bool {
        if let Some(tower) = self.tower_mut(id) {
            if tower.is_alive() {
                tower.hp -= amount;
                return true;
            }
            return false;
        }
        match self.unit_mut(id) {
            Some(unit) if unit.is_alive() => {
                unit.hp -= amount;
                true
            }
            _ => false,
        }
    }

    /// Standing towers of a team.
    #[must_use]
    pub fn tower_count(&self, team: Team) -> usize {
        self.towers.iter().filter(|t| t.team == team && t.is_alive()).count()
    }

    /// Summed hp of a team's standing towers.
    #[must_use]
    pub fn tower_hp(&self, team: Team) -> f32 {
        self.towers
            .iter()
            .filter(|t| t.team == team && t.is_alive())
            .map(|t| t.hp)
            .sum()
    }

    /// Live units of a team.
    pub fn units_of(&self, team: Team) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(move |u| u.team == team && u.is_alive())
    }
}
