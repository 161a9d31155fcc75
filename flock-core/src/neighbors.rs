//! k-nearest neighbour queries over one generation of the flock.
//!
//! Both strategies order candidates by `(distance, index)`, which is a total
//! order, so they always agree. The flock sizes this crate targets are a few
//! dozen boids; a query costs O(n log n) with [`SortedSearch`] and
//! O(n + k log k) on average with [`SelectSearch`]. Flocks in the thousands
//! want a spatial grid or quad-tree in front of either.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::boid::Boid;
use crate::config::NeighborStrategy;

/// Distance given to the query boid itself so it always sorts last.
pub const SELF_DISTANCE: f32 = f32::INFINITY;

/// A pluggable k-nearest query.
pub trait NeighborSearch {
    /// Indices of the `k` boids closest to `flock[index]`, nearest first,
    /// never including `index` itself. Requires `k < flock.len()`.
    fn nearest(&self, flock: &[Boid], index: usize, k: usize) -> Vec<usize>;

    fn name(&self) -> &'static str;
}

/// Full sort of every candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedSearch;

impl NeighborSearch for SortedSearch {
    fn nearest(&self, flock: &[Boid], index: usize, k: usize) -> Vec<usize> {
        find_k_nearest(flock, index, k)
    }

    fn name(&self) -> &'static str {
        "sorted"
    }
}

/// Partial selection of the k smallest, then a sort of just those.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectSearch;

impl NeighborSearch for SelectSearch {
    fn nearest(&self, flock: &[Boid], index: usize, k: usize) -> Vec<usize> {
        select_k_nearest(flock, index, k)
    }

    fn name(&self) -> &'static str {
        "select"
    }
}

impl NeighborStrategy {
    pub fn search(self) -> &'static dyn NeighborSearch {
        match self {
            NeighborStrategy::Sorted => &SortedSearch,
            NeighborStrategy::Select => &SelectSearch,
        }
    }
}

pub fn find_k_nearest(flock: &[Boid], index: usize, k: usize) -> Vec<usize> {
    debug_assert!(k < flock.len(), "k must leave room for the query boid");

    let mut candidates = distances(flock, index);
    candidates.sort_unstable_by(by_distance);
    candidates.iter().take(k).map(|&(_, i)| i).collect()
}

pub fn select_k_nearest(flock: &[Boid], index: usize, k: usize) -> Vec<usize> {
    debug_assert!(k < flock.len(), "k must leave room for the query boid");

    if k == 0 {
        return Vec::new();
    }

    let mut candidates = distances(flock, index);
    if k < candidates.len() {
        candidates.select_nth_unstable_by(k - 1, by_distance);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(by_distance);
    candidates.iter().map(|&(_, i)| i).collect()
}

fn distances(flock: &[Boid], index: usize) -> Vec<(f32, usize)> {
    let origin = flock[index].position;
    flock
        .iter()
        .enumerate()
        .map(|(i, other)| {
            let distance = if i == index {
                SELF_DISTANCE
            } else {
                origin.distance(&other.position)
            };
            (distance, i)
        })
        .collect()
}

fn by_distance(a: &(f32, usize), b: &(f32, usize)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2D;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn flock_at(points: &[(f32, f32)]) -> Vec<Boid> {
        points
            .iter()
            .map(|&(x, y)| Boid::new(Vector2D::new(x, y), Vector2D::zero()))
            .collect()
    }

    fn random_flock(rng: &mut StdRng, n: usize) -> Vec<Boid> {
        (0..n)
            .map(|_| {
                let position = Vector2D::new(rng.gen_range(0.0..500.0), rng.gen_range(100.0..500.0));
                Boid::new(position, Vector2D::zero())
            })
            .collect()
    }

    #[test]
    fn test_nearest_on_a_line() {
        let flock = flock_at(&[(0.0, 0.0), (10.0, 0.0), (3.0, 0.0), (-1.0, 0.0), (6.0, 0.0)]);

        assert_eq!(find_k_nearest(&flock, 0, 3), vec![3, 2, 4]);
        assert_eq!(find_k_nearest(&flock, 1, 2), vec![4, 2]);
    }

    #[test]
    fn test_self_never_included() {
        let flock = flock_at(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]);

        for index in 0..flock.len() {
            let neighbors = find_k_nearest(&flock, index, 2);
            assert_eq!(neighbors.len(), 2);
            assert!(!neighbors.contains(&index));
        }
    }

    #[test]
    fn test_ties_broken_by_index() {
        let flock = flock_at(&[(0.0, 0.0), (5.0, 0.0), (-5.0, 0.0), (0.0, 5.0)]);
        assert_eq!(find_k_nearest(&flock, 0, 3), vec![1, 2, 3]);
        assert_eq!(select_k_nearest(&flock, 0, 2), vec![1, 2]);
    }

    #[test]
    fn test_zero_neighbors() {
        let flock = flock_at(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(find_k_nearest(&flock, 0, 0).is_empty());
        assert!(select_k_nearest(&flock, 0, 0).is_empty());
    }

    #[test]
    fn test_results_unique_and_ascending() {
        let mut rng = StdRng::seed_from_u64(42);
        let flock = random_flock(&mut rng, 40);

        for index in 0..flock.len() {
            let neighbors = find_k_nearest(&flock, index, 6);
            assert_eq!(neighbors.len(), 6);
            assert!(!neighbors.contains(&index));

            let mut unique = neighbors.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), neighbors.len());

            let origin = flock[index].position;
            for pair in neighbors.windows(2) {
                let near = origin.distance(&flock[pair[0]].position);
                let far = origin.distance(&flock[pair[1]].position);
                assert!(near <= far);
            }
        }
    }

    #[test]
    fn test_select_matches_sort() {
        let mut rng = StdRng::seed_from_u64(1234);
        for n in [2usize, 5, 17, 40] {
            let flock = random_flock(&mut rng, n);
            for index in 0..n {
                for k in 0..n {
                    assert_eq!(
                        select_k_nearest(&flock, index, k),
                        find_k_nearest(&flock, index, k),
                        "n={n} index={index} k={k}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(NeighborStrategy::Sorted.search().name(), "sorted");
        assert_eq!(NeighborStrategy::Select.search().name(), "select");
    }
}
