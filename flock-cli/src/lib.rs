//! Headless driver for the flock simulation.
//!
//! Loads settings and a control script from JSON, runs frames, and hands back
//! the final snapshot for whatever renders or inspects it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flock_core::Simulation;
use flock_shared::{FlockSettings, FlockSnapshot, ScheduledCommand, TagKind};

pub fn load_settings(path: &Path) -> Result<FlockSettings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    FlockSettings::from_json(&json)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}

pub fn load_script(path: &Path) -> Result<Vec<ScheduledCommand>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read control script from {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid control script in {}", path.display()))
}

/// Builds the simulation, preferring `seed` over the one in the settings.
///
/// Returns the seed actually used so a run can be reproduced.
pub fn build_simulation(settings: &FlockSettings, seed: Option<u64>) -> Result<(Simulation, u64)> {
    let seed = seed.or(settings.seed).unwrap_or_else(rand::random);
    let sim = Simulation::seeded(settings.to_config(), seed).context("Invalid flock settings")?;
    Ok((sim, seed))
}

pub fn write_snapshot(snapshot: &FlockSnapshot, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Drives a simulation frame by frame, replaying scheduled commands.
pub struct Runner {
    sim: Simulation,
    script: Vec<ScheduledCommand>,
    log_every: u64,
    /// Frames run so far, across every call to `run`.
    frame: u64,
}

impl Runner {
    pub fn new(sim: Simulation, mut script: Vec<ScheduledCommand>, log_every: u64) -> Self {
        script.sort_by_key(|scheduled| scheduled.tick);
        Self {
            sim,
            script,
            log_every,
            frame: 0,
        }
    }

    /// Runs `frames` more frames. Commands scheduled for a frame are applied
    /// before it steps; a paused frame still counts. Frame numbers carry on
    /// from the previous call, so each command runs at most once.
    pub fn run(&mut self, frames: u64) -> FlockSnapshot {
        log::info!(
            "Running {} frames with {} boids ({} search)",
            frames,
            self.sim.current().len(),
            self.sim.search_name()
        );

        let end = self.frame + frames;
        let late = self.script.iter().filter(|s| s.tick >= end).count();
        if late > 0 {
            log::warn!("{late} scheduled commands fall after frame {end} and will not run yet");
        }

        for _ in 0..frames {
            let frame = self.frame;
            for scheduled in self.script.iter().filter(|s| s.tick == frame) {
                scheduled.command.apply(&mut self.sim);
            }

            self.sim.step();
            self.frame += 1;

            if self.log_every > 0 && (frame + 1) % self.log_every == 0 {
                let snapshot = FlockSnapshot::capture(&self.sim);
                log::info!(
                    "frame {} tick {}: mean speed {:.6}, {} highlighted, {} neighbors{}",
                    frame + 1,
                    snapshot.tick,
                    snapshot.mean_speed(),
                    snapshot.count(TagKind::Highlighted),
                    snapshot.count(TagKind::Neighbor),
                    if snapshot.paused { " (paused)" } else { "" }
                );
            }
        }

        FlockSnapshot::capture(&self.sim)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }
}
