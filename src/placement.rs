//! Batch tag placement.
//!
//! The engine walks the input elements in order, asking the strategy for a
//! preferred location and then ranked alternatives, accepting the first
//! candidate that clears the collision check. Accepted tag bounds join a
//! running collision set (a local accumulator, not engine state) so later
//! elements avoid earlier elements' tags. One element failing never aborts
//! the batch.

use std::time::Instant;

use crate::collision::CollisionDetector;
use crate::log::debug;
use crate::strategy::{
    ElementId, MAX_PLACEMENT_ATTEMPTS, PlacementStrategy, RadialStrategy, ViewType,
};
use crate::types::{BoundingBox, Point3};

/// One element to tag, as supplied by the upstream element-query layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementInfo {
    pub id: ElementId,
    pub center: Point3,
    pub bounds: BoundingBox,
}

/// Terminal outcome for one element. Immutable once returned.
#[derive(Clone, Debug, PartialEq)]
pub struct TagPlacement {
    pub element_id: ElementId,
    /// The accepted tag location; `None` when placement failed.
    pub location: Option<Point3>,
    pub has_leader: bool,
    pub attempts_used: u8,
    /// Human-readable reason; `None` on success.
    pub failure_reason: Option<String>,
}

impl TagPlacement {
    pub fn is_success(&self) -> bool {
        self.location.is_some()
    }
}

/// Minimum batch success rate considered acceptable.
pub const QUALITY_TARGET: f64 = 0.95;

/// Summary of one placement batch.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementResult {
    /// One entry per input element, in input order.
    pub placements: Vec<TagPlacement>,
    pub success_count: usize,
    pub failed_count: usize,
    /// Wall-clock time spent computing the batch. The only
    /// non-deterministic field.
    pub calculation_time_ms: f64,
}

impl PlacementResult {
    /// Fraction of elements successfully placed. An empty batch reports 0,
    /// not NaN.
    pub fn success_rate(&self) -> f64 {
        if self.placements.is_empty() {
            0.0
        } else {
            self.success_count as f64 / self.placements.len() as f64
        }
    }

    /// Whether the observed success rate meets the quality target. This is
    /// reported, never forced: the attempt cap is hard even when a dense
    /// cluster drags the rate below the target.
    pub fn meets_quality_target(&self) -> bool {
        self.success_rate() >= QUALITY_TARGET
    }
}

/// Places a batch of tags, avoiding existing annotations and each other.
///
/// Holds no state between calls: everything the computation needs is passed
/// in, and the running collision set lives on the stack of
/// [`calculate_placements`](Self::calculate_placements).
pub struct TagPlacementEngine {
    strategy: Box<dyn PlacementStrategy>,
    detector: CollisionDetector,
}

impl TagPlacementEngine {
    /// Engine with the default radial strategy and default detector.
    pub fn new() -> Self {
        TagPlacementEngine {
            strategy: Box::new(RadialStrategy::default()),
            detector: CollisionDetector::default(),
        }
    }

    /// Engine with an explicit strategy and detector.
    pub fn with_parts(strategy: Box<dyn PlacementStrategy>, detector: CollisionDetector) -> Self {
        TagPlacementEngine { strategy, detector }
    }

    /// Compute placements for every element, in input order.
    ///
    /// Input order is semantic: when two elements contend for the same
    /// spot, the earlier one wins and the later one is pushed to an
    /// alternative. `existing_tag_bounds` seeds the collision set.
    pub fn calculate_placements(
        &self,
        elements: &[ElementInfo],
        existing_tag_bounds: &[BoundingBox],
        view: ViewType,
    ) -> PlacementResult {
        let started = Instant::now();

        // Running collision set: seeded with existing tags, grown with each
        // accepted placement. Local to this call by design.
        let mut occupied: Vec<BoundingBox> = existing_tag_bounds.to_vec();
        let mut placements = Vec::with_capacity(elements.len());
        let mut success_count = 0usize;

        for element in elements {
            let placement = self.place_one(element, &mut occupied, view);
            if placement.is_success() {
                success_count += 1;
            }
            placements.push(placement);
        }

        let failed_count = placements.len() - success_count;
        debug!(
            "placed {success_count}/{} tags ({failed_count} failed)",
            placements.len()
        );

        PlacementResult {
            placements,
            success_count,
            failed_count,
            calculation_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Search up to [`MAX_PLACEMENT_ATTEMPTS`] candidates for one element.
    /// On success the accepted bounds are appended to `occupied`.
    fn place_one(
        &self,
        element: &ElementInfo,
        occupied: &mut Vec<BoundingBox>,
        view: ViewType,
    ) -> TagPlacement {
        for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
            let candidate = if attempt == 1 {
                self.strategy
                    .preferred(element.id, element.center, &element.bounds, view)
            } else {
                match self.strategy.alternative(
                    element.id,
                    element.center,
                    &element.bounds,
                    attempt,
                    view,
                ) {
                    Ok(candidate) => candidate,
                    // The loop keeps `attempt` in range; a strategy that
                    // still errors has nothing more to propose.
                    Err(err) => {
                        return TagPlacement {
                            element_id: element.id,
                            location: None,
                            has_leader: false,
                            attempts_used: attempt,
                            failure_reason: Some(err.to_string()),
                        };
                    }
                }
            };

            let bounds = self
                .detector
                .estimate_tag_bounds(candidate.proposed_location);
            if !self.detector.has_collision(&bounds, occupied) {
                occupied.push(bounds);
                return TagPlacement {
                    element_id: element.id,
                    location: Some(candidate.proposed_location),
                    has_leader: candidate.requires_leader,
                    attempts_used: attempt,
                    failure_reason: None,
                };
            }
        }

        TagPlacement {
            element_id: element.id,
            location: None,
            has_leader: false,
            attempts_used: MAX_PLACEMENT_ATTEMPTS,
            failure_reason: Some(format!(
                "no collision-free location found for element {} after {MAX_PLACEMENT_ATTEMPTS} attempts",
                element.id
            )),
        }
    }
}

impl Default for TagPlacementEngine {
    fn default() -> Self {
        Self::new()
    }
}
