//! Candidate generation for tag placement.
//!
//! A strategy proposes where a tag could go: one preferred location, then a
//! ranked series of alternatives. The default [`RadialStrategy`] searches
//! outward in a fan of 8 directions with linearly growing distance, in the
//! annotation plane of the active view.

use std::fmt;
use std::str::FromStr;

use glam::DVec3;

use crate::errors::ContractError;
use crate::types::{Angle, BoundingBox, Length, Offset3, Point3};

/// Host element identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of view a tag is being placed in. Determines which axis the
/// preferred offset follows and which plane the alternative fan sweeps.
///
/// This enum is closed on purpose: an unknown view name is rejected in
/// [`ViewType::from_str`] rather than silently defaulted, because a silent
/// default previously masked offset-axis bugs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ViewType {
    #[default]
    FloorPlan,
    Elevation,
    Section,
    ThreeD,
}

impl ViewType {
    /// Unit direction of the preferred offset for this view.
    fn preferred_axis(self) -> DVec3 {
        match self {
            ViewType::FloorPlan => DVec3::new(0.0, 1.0, 0.0),
            ViewType::Elevation => DVec3::new(1.0, 0.0, 0.0),
            ViewType::Section => DVec3::new(0.0, 0.0, 1.0),
            // Diagonal: the full offset applied to X and Y equally.
            ViewType::ThreeD => DVec3::new(1.0, 1.0, 0.0),
        }
    }

    /// Direction at `angle` within this view's annotation plane.
    fn fan_direction(self, angle: Angle) -> DVec3 {
        let (sin, cos) = angle.radians().sin_cos();
        match self {
            ViewType::FloorPlan | ViewType::ThreeD => DVec3::new(cos, sin, 0.0),
            ViewType::Elevation => DVec3::new(cos, 0.0, sin),
            ViewType::Section => DVec3::new(0.0, cos, sin),
        }
    }
}

impl FromStr for ViewType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FloorPlan" => Ok(ViewType::FloorPlan),
            "Elevation" => Ok(ViewType::Elevation),
            "Section" => Ok(ViewType::Section),
            "ThreeD" => Ok(ViewType::ThreeD),
            other => Err(ContractError::UnknownViewType {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewType::FloorPlan => "FloorPlan",
            ViewType::Elevation => "Elevation",
            ViewType::Section => "Section",
            ViewType::ThreeD => "ThreeD",
        };
        write!(f, "{name}")
    }
}

/// A proposed tag location. Never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct TagPlacementCandidate {
    pub element_id: ElementId,
    pub element_center: Point3,
    pub proposed_location: Point3,
    /// 1 for the preferred location, 2..=10 for alternatives.
    pub attempt_number: u8,
    /// Fan angle of an alternative; `None` for the preferred location.
    pub placement_angle: Option<Angle>,
    pub requires_leader: bool,
    pub view_type: ViewType,
}

/// Hard cap on placement attempts per element (1 preferred + 9 alternatives).
pub const MAX_PLACEMENT_ATTEMPTS: u8 = 10;

/// Default distance between an element center and its preferred tag location.
pub const DEFAULT_BASE_OFFSET: f64 = 0.5;

/// Proposes candidate tag locations for one element at a time.
///
/// Implementations must be stateless and deterministic: the same inputs
/// always yield the same candidate, so batches are reproducible and
/// re-runs are idempotent.
pub trait PlacementStrategy {
    /// The preferred location (attempt 1, no leader).
    fn preferred(
        &self,
        element_id: ElementId,
        center: Point3,
        bounds: &BoundingBox,
        view: ViewType,
    ) -> TagPlacementCandidate;

    /// A ranked alternative. `attempt` must be in `2..=10`; anything else
    /// is a contract violation, never a clamp.
    fn alternative(
        &self,
        element_id: ElementId,
        center: Point3,
        bounds: &BoundingBox,
        attempt: u8,
        view: ViewType,
    ) -> Result<TagPlacementCandidate, ContractError>;
}

/// Fan angles swept by the alternative search, indexed by `(attempt - 2) % 8`.
const FAN_ANGLES: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];

/// The default strategy: fixed offset for the preferred location, then a
/// radial fan of 8 directions whose distance grows linearly with the
/// attempt number.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialStrategy {
    base_offset: Length,
}

impl RadialStrategy {
    /// Create with an explicit base offset distance (must be positive).
    pub fn new(base_offset: f64) -> Result<Self, ContractError> {
        let base_offset = Length::try_positive(base_offset)
            .map_err(|_| ContractError::NonPositiveOffset { value: base_offset })?;
        Ok(RadialStrategy { base_offset })
    }

    /// The configured base offset distance.
    pub fn base_offset(&self) -> Length {
        self.base_offset
    }

    /// Distance from the element center for a given attempt number.
    /// Attempt 2 is 1.125x the base offset, attempt 10 is 2.125x.
    fn distance_for_attempt(&self, attempt: u8) -> Length {
        let multiplier = 1.0 + f64::from(attempt - 1) * 0.125;
        self.base_offset * multiplier
    }
}

impl Default for RadialStrategy {
    fn default() -> Self {
        RadialStrategy {
            base_offset: Length::units(DEFAULT_BASE_OFFSET),
        }
    }
}

impl PlacementStrategy for RadialStrategy {
    fn preferred(
        &self,
        element_id: ElementId,
        center: Point3,
        _bounds: &BoundingBox,
        view: ViewType,
    ) -> TagPlacementCandidate {
        let axis = view.preferred_axis() * self.base_offset.raw();
        let offset = Offset3::new(Length(axis.x), Length(axis.y), Length(axis.z));
        TagPlacementCandidate {
            element_id,
            element_center: center,
            proposed_location: center + offset,
            attempt_number: 1,
            placement_angle: None,
            requires_leader: false,
            view_type: view,
        }
    }

    fn alternative(
        &self,
        element_id: ElementId,
        center: Point3,
        _bounds: &BoundingBox,
        attempt: u8,
        view: ViewType,
    ) -> Result<TagPlacementCandidate, ContractError> {
        if !(2..=MAX_PLACEMENT_ATTEMPTS).contains(&attempt) {
            return Err(ContractError::AttemptOutOfRange { attempt });
        }

        let angle = Angle::degrees(FAN_ANGLES[usize::from(attempt - 2) % FAN_ANGLES.len()]);
        let distance = self.distance_for_attempt(attempt);
        let dir = view.fan_direction(angle) * distance.raw();
        let offset = Offset3::new(Length(dir.x), Length(dir.y), Length(dir.z));

        Ok(TagPlacementCandidate {
            element_id,
            element_center: center,
            proposed_location: center + offset,
            attempt_number: attempt,
            placement_angle: Some(angle),
            requires_leader: true,
            view_type: view,
        })
    }
}
