//! Closest-hit selection over a candidate list

use super::{intersect, Ray, SphereFormula};
use crate::scene::{NodeId, SceneTree};
use kestrel_core::Vec3;
use tracing::trace;

/// Radius used for every pickable sphere unless configured otherwise
pub const DEFAULT_SPHERE_RADIUS: f32 = 1.0;

/// A pickable sphere
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickCandidate {
    /// Caller-side index reported back on a hit
    pub index: usize,
    /// World-space center
    pub center: Vec3,
    pub radius: f32,
}

impl PickCandidate {
    pub fn new(index: usize, center: Vec3, radius: f32) -> Self {
        Self {
            index,
            center,
            radius,
        }
    }

    /// Candidates centered on the world positions of `nodes`
    ///
    /// Reads world matrices as they stand, so the hierarchy should be updated
    /// first. Stale keys are skipped; indices follow the position in `nodes`.
    pub fn from_nodes(tree: &SceneTree, nodes: &[NodeId], radius: f32) -> Vec<PickCandidate> {
        nodes
            .iter()
            .enumerate()
            .filter_map(|(index, &id)| {
                tree.world_position(id)
                    .map(|center| PickCandidate::new(index, center, radius))
            })
            .collect()
    }
}

/// Result of a successful pick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub index: usize,
    pub distance: f32,
}

/// Pick the candidate whose intersection is closest to the ray origin
///
/// Candidates are tested in slice order; on equal distances the earlier one
/// wins.
pub fn pick(ray: &Ray, candidates: &[PickCandidate], formula: SphereFormula) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;

    for candidate in candidates {
        let Some(distance) = intersect(ray, candidate.center, candidate.radius, formula) else {
            continue;
        };
        trace!(index = candidate.index, distance, "candidate hit");

        if closest.map_or(true, |best| distance < best.distance) {
            closest = Some(PickHit {
                index: candidate.index,
                distance,
            });
        }
    }

    closest
}

/// Index-only form of [`pick`]
pub fn pick_index(
    ray: &Ray,
    candidates: &[PickCandidate],
    formula: SphereFormula,
) -> Option<usize> {
    pick(ray, candidates, formula).map(|hit| hit.index)
}
