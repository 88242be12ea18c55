//! Lane routing around the river.
//!
//! The river is a horizontal band between `river_top` and `river_bottom`.
//! Ground and air units alike cross it only over their own lane's bridge.
//! The router produces one waypoint at a time:
//!
//! 1. Not aligned with the lane's bridge and still on land: walk to the
//!    bridge head on the near bank.
//! 2. Aligned with the bridge, or already on it: walk straight across to a
//!    point just past the far bank.
//! 3. No crossing needed: `None`, the caller advances in a straight line.
//!
//! Every movement, including knockback, passes through [`constrain_move`],
//! which guarantees no unit ever stands in the river outside a bridge
//! corridor, whatever the step size.
//!
//! ```
//! use lane_battle::core::{ArenaConfig, Lane, Team, Vec2};
//! use lane_battle::navigation::{constrain_move, next_waypoint};
//!
//! let arena = ArenaConfig::default();
//!
//! // A blue unit left of centre heads for the left bridge head first.
//! let from = Vec2::new(200.0, 600.0);
//! let wp = next_waypoint(&arena, from, Lane::Left, Team::Blue, None).unwrap();
//! assert_eq!(wp, Vec2::new(80.0, 440.0));
//!
//! // Walking diagonally into the water is refused at the bank.
//! let (from, to) = (Vec2::new(200.0, 450.0), Vec2::new(190.0, 420.0));
//! let moved = constrain_move(&arena, Lane::Left, from, to);
//! assert_eq!(moved.y, 440.0);
//! ```

use crate::core::{ArenaConfig, Lane, Side, Team, Vec2};

/// Next point to steer toward, or `None` for a straight-line advance.
///
/// `target_side` is the arena half of the current target, if any. Without a
/// target, a unit that has not reached the enemy half still has to cross.
#[must_use]
pub fn next_waypoint(
    arena: &ArenaConfig,
    position: Vec2,
    lane: Lane,
    team: Team,
    target_side: Option<Side>,
) -> Option<Vec2> {
    let my_side = arena.side_of(position);
    let must_cross = match target_side {
        Some(side) => side != my_side,
        None => my_side == team.home_side(),
    };
    if !must_cross {
        return None;
    }

    let bridge_x = arena.bridge_x(lane);
    let (near_bank, far_bank, dir) = match my_side {
        Side::North => (arena.river_top, arena.river_bottom, 1.0),
        Side::South => (arena.river_bottom, arena.river_top, -1.0),
    };

    let aligned = (position.x - bridge_x).abs() <= arena.bridge_half_width;
    if !aligned && !arena.in_river_band(position.y) {
        return Some(Vec2::new(bridge_x, near_bank));
    }

    Some(Vec2::new(bridge_x, far_bank + dir * arena.crossing_overshoot))
}

/// Bridge corridor `(min_x, max_x)` containing `x`, if any.
fn corridor_at(arena: &ArenaConfig, x: f32) -> Option<(f32, f32)> {
    [Lane::Left, Lane::Right]
        .into_iter()
        .map(|lane| corridor(arena, lane))
        .find(|(lo, hi)| x >= *lo && x <= *hi)
}

/// Corridor `(min_x, max_x)` of the lane's bridge.
#[must_use]
pub fn corridor(arena: &ArenaConfig, lane: Lane) -> (f32, f32) {
    let bx = arena.bridge_x(lane);
    (bx - arena.bridge_half_width, bx + arena.bridge_half_width)
}

/// Apply the river rule to a proposed move from `from` to `to` for a unit
/// assigned to `lane`.
///
/// The part of the segment strictly inside the band must lie within the
/// lane's bridge corridor. Otherwise a unit coming from land stops on the
/// bank it came from, and a unit already in the band is clamped onto the
/// corridor.
#[must_use]
pub fn constrain_move(arena: &ArenaConfig, lane: Lane, from: Vec2, to: Vec2) -> Vec2 {
    let to = arena.clamp(to);
    let (top, bottom) = (arena.river_top, arena.river_bottom);
    let (y_min, y_max) = if from.y <= to.y { (from.y, to.y) } else { (to.y, from.y) };
    if y_max <= top || y_min >= bottom {
        return to;
    }

    // Parametric span of the segment inside the open band.
    let dy = to.y - from.y;
    let (t_enter, t_exit) = if dy.abs() <= f32::EPSILON {
        (0.0, 1.0)
    } else {
        let ta = (top - from.y) / dy;
        let tb = (bottom - from.y) / dy;
        (ta.min(tb).max(0.0), ta.max(tb).min(1.0))
    };
    let x_enter = from.x + (to.x - from.x) * t_enter;
    let x_exit = from.x + (to.x - from.x) * t_exit;

    let (lo, hi) = corridor(arena, lane);
    let inside = |x: f32| x >= lo && x <= hi;
    if inside(x_enter) && inside(x_exit) {
        return to;
    }

    if arena.in_river_interior(from.y) {
        return Vec2::new(to.x.clamp(lo, hi), to.y);
    }

    let bank = if from.y <= top { top } else { bottom };
    Vec2::new(to.x, bank)
}

/// Move a freshly spawned point out of the water onto the nearest bank,
/// unless it sits on a bridge.
#[must_use]
pub fn settle(arena: &ArenaConfig, position: Vec2) -> Vec2 {
    let position = arena.clamp(position);
    if !arena.in_river_interior(position.y) || corridor_at(arena, position.x).is_some() {
        return position;
    }
    let bank = if position.y < arena.river_mid_y() {
        arena.river_top
    } else {
        arena.river_bottom
    };
    Vec2::new(position.x, bank)
}
