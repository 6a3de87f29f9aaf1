//! tagline: a pure geometric annotation-placement engine.
//!
//! This crate positions element tags on a 2D/3D canvas while avoiding
//! overlaps, and analyzes room wall boundaries to plan dimension chains.
//! It is host-independent: upstream layers supply elements and room
//! geometry, downstream layers create the actual annotation objects.
//! Everything here is a pure, synchronous, single-threaded computation
//! with no I/O and no state between calls.
//!
//! The two entry points are [`place_tags`] and [`plan_room_dimensions`];
//! the building blocks behind them ([`TagPlacementEngine`],
//! [`CollisionDetector`], [`RadialStrategy`], [`analyze_boundary`],
//! [`plan_dimensions`]) are public for callers that need custom
//! configuration.

pub mod boundary;
pub mod collision;
pub mod dimension;
pub mod errors;
pub mod log;
pub mod placement;
pub mod strategy;
pub mod types;

pub use boundary::{
    BoundaryEdge, OpeningElement, OpeningInfo, OpeningKind, RoomBoundaryInfo, RoomModel,
    WallSegmentInfo, analyze_boundary, filter_room_separators, identify_corners,
};
pub use collision::{CollisionDetector, DEFAULT_BUFFER_MARGIN, TagFootprint};
pub use dimension::{
    DEFAULT_DIMENSION_STYLE, DimensionChainInfo, DimensionParameters, DimensionPlan,
    plan_dimensions,
};
pub use errors::ContractError;
pub use placement::{
    ElementInfo, PlacementResult, QUALITY_TARGET, TagPlacement, TagPlacementEngine,
};
pub use strategy::{
    DEFAULT_BASE_OFFSET, ElementId, MAX_PLACEMENT_ATTEMPTS, PlacementStrategy, RadialStrategy,
    TagPlacementCandidate, ViewType,
};
pub use types::{
    Angle, BoundingBox, Length, Millimeters, NumericError, Offset3, Point3, UnitVec3,
};

/// Place tags for a batch of elements with the default engine
/// (radial strategy, default footprint and buffer margin).
///
/// Returns a result describing every element's outcome; per-element
/// failures are data on the result, never errors.
pub fn place_tags(
    elements: &[ElementInfo],
    existing_tag_bounds: &[BoundingBox],
    view: ViewType,
) -> PlacementResult {
    TagPlacementEngine::new().calculate_placements(elements, existing_tag_bounds, view)
}

/// Analyze a room's boundary and plan dimension chains for its walls.
///
/// `offset_distance_mm` is the wall-to-dimension-line distance in
/// millimeters (must be positive); a blank `dimension_style` falls back to
/// [`DEFAULT_DIMENSION_STYLE`].
pub fn plan_room_dimensions(
    room: &RoomModel,
    offset_distance_mm: f64,
    dimension_style: &str,
) -> Result<DimensionPlan, miette::Report> {
    let params = DimensionParameters::new(offset_distance_mm, dimension_style)?;
    let boundary = analyze_boundary(room);
    Ok(plan_dimensions(&boundary, &params))
}
