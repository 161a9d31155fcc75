use core::fmt;

/// Configuration rejected before the first tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The flock is empty, or a supplied flock does not match `flock_size`.
    InvalidFlockSize {
        expected: Option<usize>,
        actual: usize,
    },
    /// More neighbours requested than there are other boids.
    InvalidNeighborCount { neighbors: usize, flock_size: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFlockSize {
                expected: None,
                actual,
            } => write!(f, "flock size must be positive, got {actual}"),
            ConfigError::InvalidFlockSize {
                expected: Some(expected),
                actual,
            } => write!(f, "flock has {actual} boids but flock_size is {expected}"),
            ConfigError::InvalidNeighborCount {
                neighbors,
                flock_size,
            } => write!(
                f,
                "neighbor count ({neighbors}) must be at most flock size - 1 ({})",
                flock_size.saturating_sub(1)
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
