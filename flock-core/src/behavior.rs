//! Flocking rules. Every function reads one generation and writes nothing.

use crate::boid::Boid;
use crate::config::BoidConfig;
use crate::vector::Vector2D;

/// Steer towards the neighbours' mean heading.
pub fn alignment(boid: &Boid, flock: &[Boid], neighbors: &[usize], config: &BoidConfig) -> Vector2D {
    if neighbors.is_empty() {
        return Vector2D::zero();
    }

    let mut sum = Vector2D::zero();
    for &other in neighbors {
        sum += flock[other].velocity;
    }
    let average = sum / neighbors.len() as f32;

    (average - boid.velocity).normalize() * config.alignment_weight
}

/// Steer towards the neighbours' centre of mass.
pub fn cohesion(boid: &Boid, flock: &[Boid], neighbors: &[usize], config: &BoidConfig) -> Vector2D {
    if neighbors.is_empty() {
        return Vector2D::zero();
    }

    let mut sum = Vector2D::zero();
    for &other in neighbors {
        sum += flock[other].position;
    }
    let center = sum / neighbors.len() as f32;

    (center - boid.position).normalize() * config.cohesion_weight
}

/// Push away from every neighbour closer than `separation_distance`.
///
/// Each push is weighted by the inverse distance and the pushes are summed
/// without normalising, so a very close neighbour dominates.
pub fn separation(boid: &Boid, flock: &[Boid], neighbors: &[usize], config: &BoidConfig) -> Vector2D {
    let mut steering = Vector2D::zero();

    for &other in neighbors {
        let other = &flock[other];
        let distance = boid.position.distance(&other.position);
        // coincident boids have no direction to push along
        if distance > 0.0 && distance < config.separation_distance {
            let away = (boid.position - other.position).normalize();
            steering += away * ((1.0 / distance) * config.separation_weight);
        }
    }

    steering
}

/// Velocity change from the three rules for `flock[index]`.
pub fn compute_steering(
    index: usize,
    flock: &[Boid],
    neighbors: &[usize],
    config: &BoidConfig,
) -> Vector2D {
    let boid = &flock[index];
    alignment(boid, flock, neighbors, config)
        + cohesion(boid, flock, neighbors, config)
        + separation(boid, flock, neighbors, config)
}

/// New velocity for `flock[index]`: its velocity plus steering, capped at `max_speed`.
///
/// Without the cap the summed steering keeps accelerating the flock tick after tick.
pub fn steer(index: usize, flock: &[Boid], neighbors: &[usize], config: &BoidConfig) -> Vector2D {
    let velocity = flock[index].velocity + compute_steering(index, flock, neighbors, config);
    velocity.limit(config.max_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::new(vx, vy))
    }

    fn unit_weights() -> BoidConfig {
        BoidConfig {
            separation_distance: 5.0,
            separation_weight: 1.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            max_speed: 100.0,
            ..BoidConfig::default()
        }
    }

    #[test]
    fn test_alignment_points_towards_mean_heading() {
        let flock = [boid(0.0, 0.0, 0.0, 0.0), boid(1.0, 0.0, 2.0, 0.0), boid(2.0, 0.0, 4.0, 0.0)];
        let config = BoidConfig {
            alignment_weight: 0.5,
            ..unit_weights()
        };

        let v = alignment(&flock[0], &flock, &[1, 2], &config);
        assert!((v.x - 0.5).abs() < 1e-6);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_alignment_zero_when_already_matched() {
        let flock = [boid(0.0, 0.0, 1.0, 1.0), boid(3.0, 0.0, 1.0, 1.0)];
        assert_eq!(alignment(&flock[0], &flock, &[1], &unit_weights()), Vector2D::zero());
    }

    #[test]
    fn test_cohesion_points_towards_center() {
        let flock = [boid(0.0, 0.0, 0.0, 0.0), boid(0.0, 10.0, 0.0, 0.0), boid(0.0, 30.0, 0.0, 0.0)];
        let v = cohesion(&flock[0], &flock, &[1, 2], &unit_weights());
        assert_eq!(v.x, 0.0);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_separation_weighted_by_inverse_distance() {
        let flock = [boid(0.0, 0.0, 0.0, 0.0), boid(2.0, 0.0, 0.0, 0.0), boid(0.0, -4.0, 0.0, 0.0)];
        let v = separation(&flock[0], &flock, &[1, 2], &unit_weights());
        assert!((v.x + 0.5).abs() < 1e-6);
        assert!((v.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_separation_ignores_far_and_coincident() {
        let flock = [boid(0.0, 0.0, 0.0, 0.0), boid(5.0, 0.0, 0.0, 0.0), boid(0.0, 0.0, 0.0, 0.0)];
        let v = separation(&flock[0], &flock, &[1, 2], &unit_weights());
        assert_eq!(v, Vector2D::zero());
    }

    #[test]
    fn test_no_neighbors_no_steering() {
        let flock = [boid(0.0, 0.0, 1.0, 0.0)];
        assert_eq!(compute_steering(0, &flock, &[], &unit_weights()), Vector2D::zero());
        assert_eq!(steer(0, &flock, &[], &unit_weights()), Vector2D::new(1.0, 0.0));
    }

    #[test]
    fn test_steer_clamps_speed() {
        let flock = [boid(0.0, 0.0, 3.0, 4.0), boid(1.0, 0.0, 3.0, 4.0)];
        let config = BoidConfig {
            max_speed: 1.0,
            ..unit_weights()
        };

        let v = steer(0, &flock, &[1], &config);
        assert!(v.magnitude() <= 1.0 + 1e-6);
        assert!(v.magnitude() > 1.0 - 1e-6);
    }
}
