//! Team identification and per-team data storage.
//!
//! ## Team
//!
//! The arena always has exactly two teams. `Blue` defends the south half
//! (large y) and attacks north; `Red` defends the north half and attacks south.
//!
//! ## TeamMap
//!
//! Per-team storage with O(1) access by `Team`. Serializes as
//! `{ "blue": …, "red": … }`, which is the snapshot wire shape for elixir and
//! deck state.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// South team (the human player in single-player matches).
    Blue,
    /// North team (the bot in single-player matches).
    Red,
}

impl Team {
    /// Both teams, in a fixed order.
    pub const ALL: [Team; 2] = [Team::Blue, Team::Red];

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    /// Sign of the y direction this team advances in.
    ///
    /// Blue walks toward y = 0 (-1.0), Red toward the bottom edge (+1.0).
    #[must_use]
    pub const fn forward(self) -> f32 {
        match self {
            Team::Blue => -1.0,
            Team::Red => 1.0,
        }
    }

    /// The half of the arena this team defends.
    #[must_use]
    pub const fn home_side(self) -> Side {
        match self {
            Team::Blue => Side::South,
            Team::Red => Side::North,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Blue => write!(f, "blue"),
            Team::Red => write!(f, "red"),
        }
    }
}

/// One half of the arena, split by the river.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Small y (Red's half).
    North,
    /// Large y (Blue's half).
    South,
}

/// Per-team data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use lane_battle::core::{Team, TeamMap};
///
/// let mut elixir: TeamMap<f32> = TeamMap::with_value(5.0);
/// elixir[Team::Red] -= 2.0;
///
/// assert_eq!(elixir[Team::Blue], 5.0);
/// assert_eq!(elixir[Team::Red], 3.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    /// Blue's entry.
    pub blue: T,
    /// Red's entry.
    pub red: T,
}

impl<T> TeamMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Team) -> T) -> Self {
        Self {
            blue: factory(Team::Blue),
            red: factory(Team::Red),
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            blue: value.clone(),
            red: value,
        }
    }

    /// Get a reference to a team's data.
    #[must_use]
    pub fn get(&self, team: Team) -> &T {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    /// Get a mutable reference to a team's data.
    pub fn get_mut(&mut self, team: Team) -> &mut T {
        match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        }
    }

    /// Iterate over (Team, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Team, &T)> {
        [(Team::Blue, &self.blue), (Team::Red, &self.red)].into_iter()
    }

    /// Apply a function to both entries.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(Team, &mut T)) {
        f(Team::Blue, &mut self.blue);
        f(Team::Red, &mut self.red);
    }
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        self.get(team)
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        self.get_mut(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Team::Blue.opponent(), Team::Red);
        assert_eq!(Team::Red.opponent(), Team::Blue);
    }

    #[test]
    fn test_forward_and_home() {
        assert!(Team::Blue.forward() < 0.0);
        assert!(Team::Red.forward() > 0.0);
        assert_eq!(Team::Blue.home_side(), Side::South);
        assert_eq!(Team::Red.home_side(), Side::North);
    }

    #[test]
    fn test_team_map_new() {
        let map: TeamMap<u32> = TeamMap::new(|t| if t == Team::Blue { 1 } else { 2 });

        assert_eq!(map[Team::Blue], 1);
        assert_eq!(map[Team::Red], 2);
    }

    #[test]
    fn test_team_map_mutation() {
        let mut map: TeamMap<i32> = TeamMap::with_value(0);

        map[Team::Blue] = 10;
        map.for_each_mut(|_, v| *v += 1);

        assert_eq!(map[Team::Blue], 11);
        assert_eq!(map[Team::Red], 1);
    }

    #[test]
    fn test_team_map_iter_order() {
        let map: TeamMap<i32> = TeamMap::with_value(3);
        let teams: Vec<_> = map.iter().map(|(t, _)| t).collect();
        assert_eq!(teams, vec![Team::Blue, Team::Red]);
    }

    #[test]
    fn test_team_map_wire_shape() {
        let map: TeamMap<f32> = TeamMap { blue: 1.5, red: 4.0 };
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"blue":1.5,"red":4.0}"#);

        let team_json = serde_json::to_string(&Team::Red).unwrap();
        assert_eq!(team_json, r#""red""#);
    }
}
