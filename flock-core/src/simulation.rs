#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::behavior;
use crate::boid::{Boid, Tag};
use crate::boundary::{classify_proximity, repel};
use crate::config::{BoidConfig, SimConfig};
use crate::error::ConfigError;

/// Step size of the faster/slower speed controls.
pub const SPEED_STEP: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
}

/// Owns both generations of the flock and advances them one tick at a time.
///
/// During a tick every read comes from `previous` and every write goes to
/// `current`, so no boid ever sees another boid's already-updated state.
/// Renderers read [`Simulation::current`] between ticks.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    previous: Vec<Boid>,
    current: Vec<Boid>,
    state: RunState,
    selected: Option<usize>,
    tick: u64,
}

impl Simulation {
    /// Starts from an explicit flock.
    pub fn new(config: SimConfig, flock: Vec<Boid>) -> Result<Self, ConfigError> {
        config.validate()?;
        if flock.len() != config.flock_size {
            return Err(ConfigError::InvalidFlockSize {
                expected: Some(config.flock_size),
                actual: flock.len(),
            });
        }

        log::debug!(
            "simulation created: {} boids, {} neighbors, {} search",
            config.flock_size,
            config.boids.neighbor_count,
            config.strategy.search().name()
        );

        Ok(Self {
            config,
            previous: flock.clone(),
            current: flock,
            state: RunState::Running,
            selected: None,
            tick: 0,
        })
    }

    /// Spawns `flock_size` random boids inside the spawn region.
    #[cfg(feature = "std")]
    pub fn with_rng<R: rand::Rng>(config: SimConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;
        let flock = (0..config.flock_size)
            .map(|_| Boid::random(rng, &config.spawn, config.initial_speed))
            .collect();
        Self::new(config, flock)
    }

    /// Reproducible random flock.
    #[cfg(feature = "std")]
    pub fn seeded(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        use rand::SeedableRng;

        log::debug!("seeding flock with {seed}");
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        Self::with_rng(config, &mut rng)
    }

    /// Advances one tick. Does nothing while paused.
    pub fn step(&mut self) {
        if self.state == RunState::Paused {
            return;
        }

        self.previous.clone_from(&self.current);
        for boid in self.current.iter_mut() {
            boid.tag = Tag::Normal;
        }

        let search = self.config.strategy.search();
        let boids = &self.config.boids;
        let world = &self.config.world;

        for i in 0..self.previous.len() {
            let me = &self.previous[i];
            let neighbors = search.nearest(&self.previous, i, boids.neighbor_count);

            let proximity = classify_proximity(me, world, boids.wall_threshold);
            let velocity = if proximity.is_empty() {
                behavior::steer(i, &self.previous, &neighbors, boids)
            } else {
                repel(me, proximity, world, boids)
            };

            self.current[i].velocity = velocity;
            self.current[i].position = me.position + velocity;

            if self.selected == Some(i) {
                self.current[i].tag = Tag::Highlighted;
                for &neighbor in &neighbors {
                    self.current[neighbor].tag = Tag::Neighbor;
                }
            }
        }

        self.tick += 1;
        log::trace!("tick {} complete", self.tick);
    }

    /// Runs `ticks` steps; paused simulations stay put.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn pause(&mut self) {
        self.state = RunState::Paused;
    }

    pub fn resume(&mut self) {
        self.state = RunState::Running;
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
        log::debug!("run state now {:?}", self.state);
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Highlights `index` and its neighbours from the next tick on.
    ///
    /// An index past the end of the flock is kept but highlights nothing.
    pub fn select(&mut self, index: Option<usize>) {
        if let Some(i) = index {
            if i >= self.current.len() {
                log::warn!(
                    "selected boid {i} does not exist (flock has {}), nothing will be highlighted",
                    self.current.len()
                );
            }
        }
        self.selected = index;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Shifts the speed cap, never below zero.
    pub fn adjust_max_speed(&mut self, delta: f32) -> f32 {
        let speed = (self.config.boids.max_speed + delta).max(0.0);
        self.config.boids.max_speed = speed;
        log::debug!("max speed now {speed}");
        speed
    }

    pub fn faster(&mut self) -> f32 {
        self.adjust_max_speed(SPEED_STEP)
    }

    pub fn slower(&mut self) -> f32 {
        self.adjust_max_speed(-SPEED_STEP)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Steering weights can change between ticks; flock size and bounds cannot.
    pub fn boid_config_mut(&mut self) -> &mut BoidConfig {
        &mut self.config.boids
    }

    pub fn current(&self) -> &[Boid] {
        &self.current
    }

    pub fn previous(&self) -> &[Boid] {
        &self.previous
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn search_name(&self) -> &'static str {
        self.config.strategy.search().name()
    }
}
