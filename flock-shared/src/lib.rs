#![cfg_attr(not(feature = "std"), no_std)]

//! Serialisable types exchanged between the simulation and whatever drives or
//! draws it: settings files, control commands and per-tick snapshots.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use flock_core::{
    BoidConfig, Bounds, NeighborStrategy, SimConfig, Simulation, Tag, Vector2D,
};
use serde::{Deserialize, Serialize};

/// Represents a 2D position in world coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vector2D> for Position {
    fn from(v: Vector2D) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Position> for Vector2D {
    fn from(p: Position) -> Self {
        Vector2D::new(p.x, p.y)
    }
}

/// Velocity in world units per tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl From<Vector2D> for Velocity {
    fn from(v: Vector2D) -> Self {
        Self { dx: v.x, dy: v.y }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Region {
    pub min: Position,
    pub max: Position,
}

impl From<Bounds> for Region {
    fn from(bounds: Bounds) -> Self {
        Self {
            min: bounds.min.into(),
            max: bounds.max.into(),
        }
    }
}

impl From<Region> for Bounds {
    fn from(region: Region) -> Self {
        Bounds::new(region.min.into(), region.max.into())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    #[default]
    Sorted,
    Select,
}

impl From<SearchKind> for NeighborStrategy {
    fn from(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Sorted => NeighborStrategy::Sorted,
            SearchKind::Select => NeighborStrategy::Select,
        }
    }
}

impl From<NeighborStrategy> for SearchKind {
    fn from(strategy: NeighborStrategy) -> Self {
        match strategy {
            NeighborStrategy::Sorted => SearchKind::Sorted,
            NeighborStrategy::Select => SearchKind::Select,
        }
    }
}

/// Flock simulation configuration.
///
/// Missing fields fall back to the defaults, so a settings file only needs the
/// values it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub flock_size: usize,
    pub world: Region,
    pub spawn: Region,
    pub initial_speed: f32,
    pub neighbor_count: usize,
    pub neighbor_search: SearchKind,
    pub max_speed: f32,
    pub separation_distance: f32,
    pub wall_threshold: f32,
    pub wall_avoidance_weight: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    /// Seed for the initial flock; `None` lets the driver pick one.
    pub seed: Option<u64>,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

impl FlockSettings {
    pub fn from_config(config: &SimConfig) -> Self {
        let boids = &config.boids;
        Self {
            flock_size: config.flock_size,
            world: config.world.into(),
            spawn: config.spawn.into(),
            initial_speed: config.initial_speed,
            neighbor_count: boids.neighbor_count,
            neighbor_search: config.strategy.into(),
            max_speed: boids.max_speed,
            separation_distance: boids.separation_distance,
            wall_threshold: boids.wall_threshold,
            wall_avoidance_weight: boids.wall_avoidance_weight,
            separation_weight: boids.separation_weight,
            alignment_weight: boids.alignment_weight,
            cohesion_weight: boids.cohesion_weight,
            seed: None,
        }
    }

    /// Unvalidated; the simulation constructors validate.
    pub fn to_config(&self) -> SimConfig {
        SimConfig {
            flock_size: self.flock_size,
            world: self.world.into(),
            spawn: self.spawn.into(),
            initial_speed: self.initial_speed,
            strategy: self.neighbor_search.into(),
            boids: BoidConfig {
                neighbor_count: self.neighbor_count,
                max_speed: self.max_speed,
                separation_distance: self.separation_distance,
                wall_threshold: self.wall_threshold,
                wall_avoidance_weight: self.wall_avoidance_weight,
                separation_weight: self.separation_weight,
                alignment_weight: self.alignment_weight,
                cohesion_weight: self.cohesion_weight,
            },
        }
    }

    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[cfg(feature = "std")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Intent sent to a running simulation between ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ControlCommand {
    Pause,
    Resume,
    TogglePause,
    Select { index: usize },
    ClearSelection,
    Faster,
    Slower,
    AdjustSpeed { delta: f32 },
    /// Replace any subset of the steering weights.
    Tune {
        separation_weight: Option<f32>,
        alignment_weight: Option<f32>,
        cohesion_weight: Option<f32>,
        wall_avoidance_weight: Option<f32>,
    },
}

impl ControlCommand {
    pub fn apply(&self, sim: &mut Simulation) {
        log::debug!("applying {:?} at tick {}", self, sim.tick());
        match *self {
            ControlCommand::Pause => sim.pause(),
            ControlCommand::Resume => sim.resume(),
            ControlCommand::TogglePause => sim.toggle_pause(),
            ControlCommand::Select { index } => sim.select(Some(index)),
            ControlCommand::ClearSelection => sim.select(None),
            ControlCommand::Faster => {
                sim.faster();
            }
            ControlCommand::Slower => {
                sim.slower();
            }
            ControlCommand::AdjustSpeed { delta } => {
                sim.adjust_max_speed(delta);
            }
            ControlCommand::Tune {
                separation_weight,
                alignment_weight,
                cohesion_weight,
                wall_avoidance_weight,
            } => {
                let boids = sim.boid_config_mut();
                if let Some(w) = separation_weight {
                    boids.separation_weight = w;
                }
                if let Some(w) = alignment_weight {
                    boids.alignment_weight = w;
                }
                if let Some(w) = cohesion_weight {
                    boids.cohesion_weight = w;
                }
                if let Some(w) = wall_avoidance_weight {
                    boids.wall_avoidance_weight = w;
                }
            }
        }
    }
}

/// A command to apply before the given frame runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledCommand {
    pub tick: u64,
    pub command: ControlCommand,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Normal,
    Highlighted,
    Neighbor,
}

impl From<Tag> for TagKind {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Normal => TagKind::Normal,
            Tag::Highlighted => TagKind::Highlighted,
            Tag::Neighbor => TagKind::Neighbor,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoidState {
    pub position: Position,
    pub velocity: Velocity,
    pub tag: TagKind,
}

/// The current generation as a renderer would consume it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlockSnapshot {
    pub tick: u64,
    pub paused: bool,
    pub selected: Option<usize>,
    pub max_speed: f32,
    pub boids: Vec<BoidState>,
}

impl FlockSnapshot {
    pub fn capture(sim: &Simulation) -> Self {
        Self {
            tick: sim.tick(),
            paused: sim.is_paused(),
            selected: sim.selected(),
            max_speed: sim.config().boids.max_speed,
            boids: sim
                .current()
                .iter()
                .map(|boid| BoidState {
                    position: boid.position.into(),
                    velocity: boid.velocity.into(),
                    tag: boid.tag.into(),
                })
                .collect(),
        }
    }

    pub fn count(&self, tag: TagKind) -> usize {
        self.boids.iter().filter(|b| b.tag == tag).count()
    }

    pub fn mean_speed(&self) -> f32 {
        if self.boids.is_empty() {
            return 0.0;
        }
        let total: f32 = self
            .boids
            .iter()
            .map(|b| Vector2D::new(b.velocity.dx, b.velocity.dy).magnitude())
            .sum();
        total / self.boids.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_core::Boid;

    #[test]
    fn test_default_settings_match_core_defaults() {
        let settings = FlockSettings::default();
        assert_eq!(settings.to_config(), SimConfig::default());
        assert_eq!(settings.flock_size, 40);
        assert_eq!(settings.neighbor_count, 6);
        assert_eq!(settings.world.min, Position::new(0.0, 100.0));
    }

    #[test]
    fn test_settings_json_round_trip() {
        let settings = FlockSettings {
            seed: Some(7),
            neighbor_search: SearchKind::Select,
            ..FlockSettings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(FlockSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings =
            FlockSettings::from_json(r#"{"flock_size": 12, "neighbor_search": "select"}"#).unwrap();
        assert_eq!(settings.flock_size, 12);
        assert_eq!(settings.neighbor_search, SearchKind::Select);
        assert_eq!(settings.max_speed, FlockSettings::default().max_speed);
        assert_eq!(settings.to_config().strategy, NeighborStrategy::Select);
    }

    #[test]
    fn test_command_json_format() {
        let script = r#"[
            {"tick": 0, "command": {"action": "select", "index": 2}},
            {"tick": 5, "command": {"action": "toggle_pause"}},
            {"tick": 9, "command": {"action": "tune", "cohesion_weight": 0.5}}
        ]"#;
        let commands: Vec<ScheduledCommand> = serde_json::from_str(script).unwrap();
        assert_eq!(commands[0].command, ControlCommand::Select { index: 2 });
        assert_eq!(commands[1].command, ControlCommand::TogglePause);
        assert_eq!(
            commands[2].command,
            ControlCommand::Tune {
                separation_weight: None,
                alignment_weight: None,
                cohesion_weight: Some(0.5),
                wall_avoidance_weight: None,
            }
        );
    }

    #[test]
    fn test_commands_drive_simulation() {
        let mut sim = Simulation::seeded(SimConfig::default(), 4).unwrap();

        ControlCommand::Pause.apply(&mut sim);
        assert!(sim.is_paused());
        ControlCommand::TogglePause.apply(&mut sim);
        assert!(!sim.is_paused());

        ControlCommand::Select { index: 1 }.apply(&mut sim);
        assert_eq!(sim.selected(), Some(1));
        ControlCommand::ClearSelection.apply(&mut sim);
        assert_eq!(sim.selected(), None);

        let before = sim.config().boids.max_speed;
        ControlCommand::AdjustSpeed { delta: 0.5 }.apply(&mut sim);
        assert!((sim.config().boids.max_speed - before - 0.5).abs() < 1e-6);

        ControlCommand::Tune {
            separation_weight: Some(1.0),
            alignment_weight: None,
            cohesion_weight: None,
            wall_avoidance_weight: Some(2.0),
        }
        .apply(&mut sim);
        assert_eq!(sim.config().boids.separation_weight, 1.0);
        assert_eq!(sim.config().boids.wall_avoidance_weight, 2.0);
        assert_eq!(
            sim.config().boids.alignment_weight,
            BoidConfig::default().alignment_weight
        );
    }

    #[test]
    fn test_snapshot_capture() {
        let world = Bounds::new(Vector2D::new(-100.0, -100.0), Vector2D::new(100.0, 100.0));
        let mut config = SimConfig {
            flock_size: 3,
            world,
            spawn: world,
            ..SimConfig::default()
        };
        config.boids.neighbor_count = 1;
        let flock = vec![
            Boid::new(Vector2D::new(0.0, 0.0), Vector2D::new(0.003, 0.004)),
            Boid::new(Vector2D::new(3.0, 0.0), Vector2D::new(0.003, 0.004)),
            Boid::new(Vector2D::new(50.0, 0.0), Vector2D::new(0.003, 0.004)),
        ];
        let mut sim = Simulation::new(config, flock).unwrap();
        sim.select(Some(0));
        sim.step();

        let snapshot = FlockSnapshot::capture(&sim);
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.boids.len(), 3);
        assert_eq!(snapshot.count(TagKind::Highlighted), 1);
        assert_eq!(snapshot.count(TagKind::Neighbor), 1);
        assert_eq!(snapshot.boids[1].tag, TagKind::Neighbor);
        assert!(snapshot.mean_speed() > 0.0);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#""tag":"highlighted""#));
    }
}
