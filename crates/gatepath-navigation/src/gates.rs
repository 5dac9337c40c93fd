//! Pairing cones into gates and placing a waypoint in each gate.

use gatepath_geometry::RotatedRect;
use tracing::{debug, trace};

/// Two cones driven between, by index into the cone list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gate {
    /// Index of the cone the pairing started from.
    pub left: usize,
    /// Index of its partner.
    pub right: usize,
}

impl Gate {
    /// Waypoint for this gate: a `size` square centered between both cones.
    ///
    /// Returns `None` if either index is out of range for `cones`.
    pub fn waypoint(&self, cones: &[RotatedRect], size: f64) -> Option<RotatedRect> {
        let left = cones.get(self.left)?;
        let right = cones.get(self.right)?;
        let mid = left.center().midpoint(&right.center());
        Some(RotatedRect::axis_aligned(mid.x, mid.y, size, size))
    }
}

/// Pairs cones whose centers lie between `min_distance` and `max_distance` apart.
///
/// Cones are visited in order. For each cone not yet in a gate, every other
/// free cone is scanned: the first one within `[min_distance, max_distance]`
/// becomes the candidate, and from then on any strictly closer free cone
/// replaces it, even one nearer than `min_distance`. A cone belongs to at most
/// one gate.
pub fn pair_gates(cones: &[RotatedRect], min_distance: f64, max_distance: f64) -> Vec<Gate> {
    let mut used = vec![false; cones.len()];
    let mut gates = Vec::new();

    for i in 0..cones.len() {
        if used[i] {
            continue;
        }

        let mut best: Option<(usize, f64)> = None;
        for j in 0..cones.len() {
            if i == j || used[j] {
                continue;
            }
            let distance = cones[i].distance(&cones[j]);
            best = match best {
                None if (min_distance..=max_distance).contains(&distance) => Some((j, distance)),
                Some((_, best_distance)) if distance < best_distance => Some((j, distance)),
                other => other,
            };
        }

        if let Some((j, distance)) = best {
            used[i] = true;
            used[j] = true;
            trace!(left = i, right = j, distance, "Paired cones");
            gates.push(Gate { left: i, right: j });
        }
    }

    debug!(cones = cones.len(), gates = gates.len(), "Paired gates");
    gates
}

/// Waypoints for `gates`, in gate order.
pub fn gate_waypoints(gates: &[Gate], cones: &[RotatedRect], size: f64) -> Vec<RotatedRect> {
    gates
        .iter()
        .filter_map(|gate| gate.waypoint(cones, size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn cone(x: f64, y: f64) -> RotatedRect {
        RotatedRect::axis_aligned(x, y, 2.0, 2.0)
    }

    #[test]
    fn test_pairs_cones_within_range() {
        let cones = [cone(0.0, 0.0), cone(10.0, 0.0), cone(0.0, 50.0), cone(10.0, 50.0)];
        let gates = pair_gates(&cones, 8.0, 14.0);
        assert_eq!(gates, vec![Gate { left: 0, right: 1 }, Gate { left: 2, right: 3 }]);
    }

    #[test]
    fn test_out_of_range_cones_stay_unpaired() {
        let cones = [cone(0.0, 0.0), cone(3.0, 0.0), cone(100.0, 0.0)];
        assert!(pair_gates(&cones, 8.0, 14.0).is_empty());
    }

    #[test]
    fn test_closer_cone_replaces_candidate() {
        // Cone 1 is first in range; cone 2 is closer and also in range.
        let cones = [cone(0.0, 0.0), cone(13.0, 0.0), cone(9.0, 0.0)];
        let gates = pair_gates(&cones, 8.0, 14.0);
        assert_eq!(gates, vec![Gate { left: 0, right: 2 }]);
    }

    #[test]
    fn test_closer_cone_below_minimum_replaces_candidate() {
        let cones = [cone(0.0, 0.0), cone(10.0, 0.0), cone(2.0, 0.0)];
        let gates = pair_gates(&cones, 8.0, 14.0);
        assert_eq!(gates, vec![Gate { left: 0, right: 2 }]);
    }

    #[test]
    fn test_cone_used_once() {
        let cones = [cone(0.0, 0.0), cone(10.0, 0.0), cone(20.0, 0.0)];
        let gates = pair_gates(&cones, 8.0, 14.0);
        assert_eq!(gates, vec![Gate { left: 0, right: 1 }]);
    }

    #[test]
    fn test_empty_and_single_cone() {
        assert!(pair_gates(&[], 1.0, 2.0).is_empty());
        assert!(pair_gates(&[cone(0.0, 0.0)], 0.0, 100.0).is_empty());
    }

    #[test]
    fn test_waypoint_centered_between_cones() {
        let cones = [cone(0.0, 0.0), cone(10.0, 4.0)];
        let waypoints = gate_waypoints(&[Gate { left: 0, right: 1 }], &cones, 2.0);
        assert_eq!(waypoints.len(), 1);
        let w = waypoints[0];
        assert!((w.x - 5.0).abs() < EPSILON);
        assert!((w.y - 2.0).abs() < EPSILON);
        assert_eq!((w.width, w.height, w.rotation), (2.0, 2.0, 0.0));
    }

    #[test]
    fn test_waypoint_with_bad_index() {
        let cones = [cone(0.0, 0.0)];
        assert!(Gate { left: 0, right: 3 }.waypoint(&cones, 2.0).is_none());
        assert!(gate_waypoints(&[Gate { left: 0, right: 3 }], &cones, 2.0).is_empty());
    }
}
