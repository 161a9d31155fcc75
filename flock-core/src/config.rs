use crate::error::ConfigError;
use crate::vector::Vector2D;

/// Axis-aligned rectangle, `min` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vector2D,
    pub max: Vector2D,
}

impl Bounds {
    pub fn new(min: Vector2D, max: Vector2D) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Shrinks the rectangle by `margin` on every side.
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            min: Vector2D::new(self.min.x + margin, self.min.y + margin),
            max: Vector2D::new(self.max.x - margin, self.max.y - margin),
        }
    }
}

/// Which k-nearest implementation the simulation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborStrategy {
    /// Sort every candidate, O(n log n) per query.
    #[default]
    Sorted,
    /// Partial selection of the k smallest, O(n + k log k) average per query.
    Select,
}

/// Per-boid steering and boundary parameters, tunable between ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidConfig {
    pub neighbor_count: usize,
    pub max_speed: f32,
    pub separation_distance: f32,
    pub wall_threshold: f32,
    pub wall_avoidance_weight: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self {
            neighbor_count: 6,
            max_speed: 0.01,
            separation_distance: 20.0,
            wall_threshold: 25.0,
            wall_avoidance_weight: 0.00001,
            separation_weight: 0.000007,
            alignment_weight: 0.0000002,
            cohesion_weight: 0.0000005,
        }
    }
}

/// Everything needed to build a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub flock_size: usize,
    /// Walls the boids steer away from.
    pub world: Bounds,
    /// Region initial positions are drawn from.
    pub spawn: Bounds,
    pub initial_speed: f32,
    pub strategy: NeighborStrategy,
    pub boids: BoidConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        // 500x500 window with a 100 px control strip along the bottom edge.
        let world = Bounds::new(Vector2D::new(0.0, 100.0), Vector2D::new(500.0, 500.0));
        Self {
            flock_size: 40,
            world,
            spawn: world.inset(45.0),
            initial_speed: 0.01,
            strategy: NeighborStrategy::Sorted,
            boids: BoidConfig::default(),
        }
    }
}

impl SimConfig {
    /// Rejects configurations no tick could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flock_size == 0 {
            return Err(ConfigError::InvalidFlockSize {
                expected: None,
                actual: 0,
            });
        }
        if self.boids.neighbor_count > self.flock_size - 1 {
            return Err(ConfigError::InvalidNeighborCount {
                neighbors: self.boids.neighbor_count,
                flock_size: self.flock_size,
            });
        }
        Ok(())
    }
}
