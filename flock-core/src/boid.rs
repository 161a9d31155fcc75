#[cfg(feature = "std")]
use crate::config::Bounds;
use crate::vector::Vector2D;

/// Display role of a boid for the current tick.
///
/// Derived from the selected index every tick; the simulation never reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tag {
    #[default]
    Normal,
    Highlighted,
    Neighbor,
}

/// A single boid entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub tag: Tag,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            tag: Tag::Normal,
        }
    }

    /// Random position inside `region`, random heading, moving at `speed`.
    #[cfg(feature = "std")]
    pub fn random<R: rand::Rng>(rng: &mut R, region: &Bounds, speed: f32) -> Self {
        let x = sample(rng, region.min.x, region.max.x);
        let y = sample(rng, region.min.y, region.max.y);
        let heading = rng.gen_range(0.0..core::f32::consts::TAU);
        Self::new(Vector2D::new(x, y), Vector2D::from_angle(heading, speed))
    }
}

// Collapsed ranges spawn on the lower edge instead of panicking in gen_range.
#[cfg(feature = "std")]
fn sample<R: rand::Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
