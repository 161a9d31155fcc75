#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking simulation core.
//!
//! Boids follow alignment, cohesion and separation over their `k` nearest
//! neighbours and are pushed back from the walls of the world. Each tick reads
//! the previous generation of the flock and writes the next one.

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod behavior;
pub mod boid;
pub mod boundary;
pub mod config;
pub mod error;
mod math;
pub mod neighbors;
pub mod simulation;
pub mod vector;

pub use boid::{Boid, Tag};
pub use boundary::{classify_proximity, repel, Proximity, Wall};
pub use config::{BoidConfig, Bounds, NeighborStrategy, SimConfig};
pub use error::ConfigError;
pub use neighbors::{find_k_nearest, NeighborSearch, SelectSearch, SortedSearch};
pub use simulation::{RunState, Simulation};
pub use vector::Vector2D;
