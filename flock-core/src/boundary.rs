//! Wall proximity and repulsion.
//!
//! A boid within `wall_threshold` of a wall ignores the flocking rules for that
//! tick and is pushed away from the wall instead. The two behaviours are never
//! blended, which shows as a visible kink in the path where a boid crosses the
//! threshold.

use crate::boid::Boid;
use crate::config::{BoidConfig, Bounds};
use crate::vector::Vector2D;

/// Distances to a wall are floored here, so a boid sitting on (or past) a
/// wall gets a large but finite push back inside.
pub const MIN_WALL_DISTANCE: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Bottom,
    Top,
}

/// The walls a boid is close to. One slot per axis: a boid can be near the
/// left or the right wall, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Proximity {
    pub horizontal: Option<Wall>,
    pub vertical: Option<Wall>,
}

impl Proximity {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }

    pub fn contains(&self, wall: Wall) -> bool {
        self.horizontal == Some(wall) || self.vertical == Some(wall)
    }

    pub fn walls(&self) -> impl Iterator<Item = Wall> {
        self.horizontal.into_iter().chain(self.vertical)
    }
}

/// Flags the nearer wall on each axis when it is closer than `threshold`.
pub fn classify_proximity(boid: &Boid, bounds: &Bounds, threshold: f32) -> Proximity {
    let p = boid.position;

    let (left, right) = (p.x - bounds.min.x, bounds.max.x - p.x);
    let horizontal = if left <= right {
        (left < threshold).then_some(Wall::Left)
    } else {
        (right < threshold).then_some(Wall::Right)
    };

    let (bottom, top) = (p.y - bounds.min.y, bounds.max.y - p.y);
    let vertical = if bottom <= top {
        (bottom < threshold).then_some(Wall::Bottom)
    } else {
        (top < threshold).then_some(Wall::Top)
    };

    Proximity {
        horizontal,
        vertical,
    }
}

/// Replacement velocity for a boid near one or more walls.
///
/// Each flagged wall adds `wall_avoidance_weight / distance` pointing back
/// into the world; the result is capped at `max_speed` like steered velocities.
pub fn repel(boid: &Boid, proximity: Proximity, bounds: &Bounds, config: &BoidConfig) -> Vector2D {
    let p = boid.position;
    let mut velocity = boid.velocity;

    for wall in proximity.walls() {
        let (distance, direction) = match wall {
            Wall::Left => (p.x - bounds.min.x, Vector2D::new(1.0, 0.0)),
            Wall::Right => (bounds.max.x - p.x, Vector2D::new(-1.0, 0.0)),
            Wall::Bottom => (p.y - bounds.min.y, Vector2D::new(0.0, 1.0)),
            Wall::Top => (bounds.max.y - p.y, Vector2D::new(0.0, -1.0)),
        };
        let distance = distance.max(MIN_WALL_DISTANCE);
        velocity += direction * ((1.0 / distance) * config.wall_avoidance_weight);
    }

    velocity.limit(config.max_speed)
}
