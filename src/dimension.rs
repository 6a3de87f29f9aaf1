//! Dimension chain planning.
//!
//! For every physical, straight wall segment of an analyzed boundary, plans
//! a dimension line offset outward from the wall and an ordered list of
//! reference points (segment endpoints plus door/window edges). Curved
//! segments and room separators are skipped with a warning, never an error;
//! the skip counts travel on the plan so callers can surface them.

use crate::boundary::{RoomBoundaryInfo, WallSegmentInfo};
use crate::errors::ContractError;
use crate::log::{debug, warn};
use crate::types::{Length, Millimeters, Offset3, Point3};

/// Style applied when the caller supplies none.
pub const DEFAULT_DIMENSION_STYLE: &str = "Linear - 2.5mm Arial";

/// Caller-facing knobs for dimension planning.
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionParameters {
    offset_distance: Millimeters,
    dimension_style: String,
}

impl DimensionParameters {
    /// Create parameters. The offset distance (millimeters) must be
    /// positive; a blank style falls back to [`DEFAULT_DIMENSION_STYLE`].
    pub fn new(
        offset_distance_mm: f64,
        dimension_style: impl Into<String>,
    ) -> Result<Self, ContractError> {
        if !(offset_distance_mm > 0.0) || !offset_distance_mm.is_finite() {
            return Err(ContractError::NonPositiveDimensionOffset {
                value: offset_distance_mm,
            });
        }
        let style = dimension_style.into();
        let dimension_style = if style.trim().is_empty() {
            DEFAULT_DIMENSION_STYLE.to_string()
        } else {
            style
        };
        Ok(DimensionParameters {
            offset_distance: Millimeters(offset_distance_mm),
            dimension_style,
        })
    }

    /// Offset distance between wall and dimension line, in millimeters.
    pub fn offset_distance(&self) -> Millimeters {
        self.offset_distance
    }

    /// The dimension style tag; never empty.
    pub fn dimension_style(&self) -> &str {
        &self.dimension_style
    }
}

impl Default for DimensionParameters {
    fn default() -> Self {
        DimensionParameters {
            offset_distance: Millimeters(200.0),
            dimension_style: DEFAULT_DIMENSION_STYLE.to_string(),
        }
    }
}

/// A planned dimension chain for one wall segment.
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionChainInfo {
    /// Index of the segment within the analyzed boundary.
    pub segment_index: usize,
    /// The wall segment this chain dimensions.
    pub wall_segment: WallSegmentInfo,
    /// At least the two segment endpoints; opening edges are inserted in
    /// position order. Ordered by increasing X for horizontal walls and
    /// increasing Y for vertical walls.
    pub reference_points: Vec<Point3>,
    /// Outward-normal displacement between wall and dimension line.
    pub offset_vector: Offset3,
    pub dimension_line_start: Point3,
    pub dimension_line_end: Point3,
    /// Non-empty style tag for the created dimension.
    pub dimension_style: String,
}

/// The outcome of planning one room's dimensions.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DimensionPlan {
    /// One chain per physical straight wall, in boundary order.
    pub chains: Vec<DimensionChainInfo>,
    /// Curved segments that could not be dimensioned.
    pub skipped_curved: usize,
    /// Room-separator segments excluded from dimensioning.
    pub skipped_separators: usize,
}

/// Plan dimension chains for every qualifying wall of a boundary.
///
/// An all-curved or empty boundary yields an empty plan, not an error.
pub fn plan_dimensions(
    boundary: &RoomBoundaryInfo,
    params: &DimensionParameters,
) -> DimensionPlan {
    let offset_length = params.offset_distance().to_length();
    let mut plan = DimensionPlan::default();

    for (index, segment) in boundary.wall_segments.iter().enumerate() {
        if segment.is_curved {
            warn!("skipping curved wall segment {index} (radius {:?})", segment.curve_radius);
            plan.skipped_curved += 1;
            continue;
        }
        if segment.is_room_separator {
            warn!("skipping room separator segment {index}");
            plan.skipped_separators += 1;
            continue;
        }

        let offset_vector = segment.normal * offset_length;
        let reference_points = reference_points(segment);

        plan.chains.push(DimensionChainInfo {
            segment_index: index,
            wall_segment: segment.clone(),
            reference_points,
            offset_vector,
            dimension_line_start: segment.start_point + offset_vector,
            dimension_line_end: segment.end_point + offset_vector,
            dimension_style: params.dimension_style().to_string(),
        });
    }

    debug!(
        "planned {} dimension chains ({} curved, {} separators skipped)",
        plan.chains.len(),
        plan.skipped_curved,
        plan.skipped_separators
    );
    plan
}

/// Endpoints plus two edge points per opening, ordered along the wall's
/// dominant axis (X for horizontal walls, Y for vertical ones).
fn reference_points(segment: &WallSegmentInfo) -> Vec<Point3> {
    let mut points = vec![segment.start_point, segment.end_point];

    if !segment.openings.is_empty() {
        let direction = segment.direction();
        for opening in &segment.openings {
            let half = opening.width / 2.0;
            for edge_offset in [opening.center_offset - half, opening.center_offset + half] {
                let p = segment.start_point.to_dvec3() + direction * edge_offset.raw();
                points.push(Point3::from_dvec3(p));
            }
        }
    }

    let delta = segment.end_point - segment.start_point;
    if delta.dx.abs() >= delta.dy.abs() {
        points.sort_by(|a, b| a.x.raw().total_cmp(&b.x.raw()));
    } else {
        points.sort_by(|a, b| a.y.raw().total_cmp(&b.y.raw()));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{
        BoundaryEdge, OpeningElement, OpeningKind, RoomModel, analyze_boundary,
    };

    fn rectangular_room() -> RoomModel {
        let a = Point3::from_raw(0.0, 0.0, 0.0);
        let b = Point3::from_raw(10.0, 0.0, 0.0);
        let c = Point3::from_raw(10.0, 8.0, 0.0);
        let d = Point3::from_raw(0.0, 8.0, 0.0);
        RoomModel {
            boundary: vec![
                BoundaryEdge::wall(a, b),
                BoundaryEdge::wall(b, c),
                BoundaryEdge::wall(c, d),
                BoundaryEdge::wall(d, a),
            ],
            openings: Vec::new(),
        }
    }

    fn params_200mm() -> DimensionParameters {
        DimensionParameters::new(200.0, "").unwrap()
    }

    #[test]
    fn parameters_reject_non_positive_offset() {
        assert!(DimensionParameters::new(0.0, "x").is_err());
        assert!(DimensionParameters::new(-50.0, "x").is_err());
        assert!(DimensionParameters::new(f64::NAN, "x").is_err());
        assert!(DimensionParameters::new(200.0, "x").is_ok());
    }

    #[test]
    fn blank_style_falls_back() {
        let p = DimensionParameters::new(200.0, "  ").unwrap();
        assert_eq!(p.dimension_style(), DEFAULT_DIMENSION_STYLE);
        let p = DimensionParameters::new(200.0, "Custom 2.5mm").unwrap();
        assert_eq!(p.dimension_style(), "Custom 2.5mm");
    }

    #[test]
    fn rectangular_room_yields_four_chains() {
        let boundary = analyze_boundary(&rectangular_room());
        let plan = plan_dimensions(&boundary, &params_200mm());

        assert_eq!(plan.chains.len(), 4);
        assert_eq!(plan.skipped_curved, 0);
        assert_eq!(plan.skipped_separators, 0);
        for chain in &plan.chains {
            assert_eq!(chain.reference_points.len(), 2);
            assert!(!chain.dimension_style.is_empty());
        }
    }

    #[test]
    fn offset_magnitude_matches_converted_distance() {
        let boundary = analyze_boundary(&rectangular_room());
        let plan = plan_dimensions(&boundary, &params_200mm());

        // 200 mm -> ~0.65617 model units.
        for chain in &plan.chains {
            assert!((chain.offset_vector.magnitude().raw() - 0.65617).abs() < 0.001);
        }
    }

    #[test]
    fn offset_direction_is_the_outward_normal() {
        let boundary = analyze_boundary(&rectangular_room());
        let plan = plan_dimensions(&boundary, &params_200mm());

        // South wall chain must sit below the wall (negative Y offset).
        let south = &plan.chains[0];
        assert!(south.offset_vector.dy < Length::ZERO);
        assert!(south.dimension_line_start.y < south.wall_segment.start_point.y);
    }

    #[test]
    fn dimension_line_is_collinear_with_the_wall() {
        let boundary = analyze_boundary(&rectangular_room());
        let plan = plan_dimensions(&boundary, &params_200mm());

        for chain in &plan.chains {
            let wall = (chain.wall_segment.end_point - chain.wall_segment.start_point).to_dvec3();
            let line = (chain.dimension_line_end - chain.dimension_line_start).to_dvec3();
            let dot = wall.normalize().dot(line.normalize());
            assert!((dot.abs() - 1.0).abs() < 1e-9, "dot was {dot}");
        }
    }

    #[test]
    fn curved_wall_is_skipped_with_count() {
        let mut room = rectangular_room();
        room.boundary[1].radius = Some(Length(4.0));
        let boundary = analyze_boundary(&room);
        let plan = plan_dimensions(&boundary, &params_200mm());

        assert_eq!(boundary.wall_segments.len(), 4);
        assert_eq!(plan.chains.len(), 3);
        assert_eq!(plan.skipped_curved, 1);
    }

    #[test]
    fn separator_is_skipped_with_count() {
        let mut room = rectangular_room();
        room.boundary[3].separator = true;
        let boundary = analyze_boundary(&room);
        let plan = plan_dimensions(&boundary, &params_200mm());

        assert_eq!(plan.chains.len(), 3);
        assert_eq!(plan.skipped_separators, 1);
    }

    #[test]
    fn all_curved_boundary_yields_empty_plan() {
        let mut room = rectangular_room();
        for edge in &mut room.boundary {
            edge.radius = Some(Length(6.0));
        }
        let boundary = analyze_boundary(&room);
        let plan = plan_dimensions(&boundary, &params_200mm());

        assert!(plan.chains.is_empty());
        assert_eq!(plan.skipped_curved, 4);
    }

    #[test]
    fn empty_boundary_yields_empty_plan() {
        let boundary = analyze_boundary(&RoomModel::default());
        let plan = plan_dimensions(&boundary, &params_200mm());
        assert!(plan.chains.is_empty());
    }

    #[test]
    fn door_edges_become_reference_points_in_order() {
        let mut room = rectangular_room();
        room.openings = vec![OpeningElement {
            kind: OpeningKind::Door,
            location: Point3::from_raw(3.0, 0.0, 0.0),
            width: Length(3.0),
        }];
        let boundary = analyze_boundary(&room);
        let plan = plan_dimensions(&boundary, &params_200mm());

        // South wall: endpoints at x 0 and 10, door edges at 1.5 and 4.5.
        let xs: Vec<f64> = plan.chains[0]
            .reference_points
            .iter()
            .map(|p| p.x.raw())
            .collect();
        assert_eq!(xs, vec![0.0, 1.5, 4.5, 10.0]);
    }

    #[test]
    fn vertical_wall_reference_points_order_by_y() {
        let mut room = rectangular_room();
        room.openings = vec![OpeningElement {
            kind: OpeningKind::Window,
            location: Point3::from_raw(10.0, 5.0, 0.0),
            width: Length(2.0),
        }];
        let boundary = analyze_boundary(&room);
        let plan = plan_dimensions(&boundary, &params_200mm());

        // East wall runs from y 0 to y 8 with window edges at 4 and 6.
        let east = plan.chains.iter().find(|c| c.segment_index == 1).unwrap();
        let ys: Vec<f64> = east.reference_points.iter().map(|p| p.y.raw()).collect();
        assert_eq!(ys, vec![0.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn corners_recur_in_both_adjacent_chains() {
        let boundary = analyze_boundary(&rectangular_room());
        let plan = plan_dimensions(&boundary, &params_200mm());

        for corner in &boundary.corners {
            let containing = plan
                .chains
                .iter()
                .filter(|c| c.reference_points.contains(corner))
                .count();
            assert_eq!(containing, 2, "corner {corner:?} should appear in exactly two chains");
        }
    }
}
