//! Room boundary analysis.
//!
//! Decomposes a room's wall loop into oriented straight segments, corners
//! and openings. Outward normals are derived from the loop's winding
//! (shoelace signed area), so loops authored clockwise or counter-clockwise
//! both produce normals that point away from the room interior.

use glam::DVec3;

use crate::log::warn;
use crate::types::{Angle, Length, Point3, UnitVec3};

/// Kind of opening cut into a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpeningKind {
    Door,
    Window,
}

/// A door or window element, as supplied by the room/document layer.
#[derive(Clone, Debug, PartialEq)]
pub struct OpeningElement {
    pub kind: OpeningKind,
    /// Center of the opening, expected to lie on (or near) a wall.
    pub location: Point3,
    pub width: Length,
}

/// One edge of a room's boundary loop, as supplied by the room/document
/// layer. Start-to-end order must follow the loop direction.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryEdge {
    pub start: Point3,
    pub end: Point3,
    /// Curved edges carry the radius of their underlying arc.
    pub radius: Option<Length>,
    /// True for non-physical room-separation lines.
    pub separator: bool,
}

impl BoundaryEdge {
    /// A straight physical wall edge.
    pub fn wall(start: Point3, end: Point3) -> Self {
        BoundaryEdge { start, end, radius: None, separator: false }
    }

    /// A curved physical wall edge with the given arc radius.
    pub fn arc(start: Point3, end: Point3, radius: Length) -> Self {
        BoundaryEdge { start, end, radius: Some(radius), separator: false }
    }

    /// A non-physical room separation line.
    pub fn separator(start: Point3, end: Point3) -> Self {
        BoundaryEdge { start, end, radius: None, separator: true }
    }
}

/// A room as seen by this engine: a boundary loop plus its openings.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RoomModel {
    pub boundary: Vec<BoundaryEdge>,
    pub openings: Vec<OpeningElement>,
}

/// An opening attached to one wall segment.
#[derive(Clone, Debug, PartialEq)]
pub struct OpeningInfo {
    pub kind: OpeningKind,
    /// Distance from the segment start to the opening center, along the wall.
    pub center_offset: Length,
    pub width: Length,
}

/// An analyzed boundary segment. Immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct WallSegmentInfo {
    pub start_point: Point3,
    pub end_point: Point3,
    /// Unit vector perpendicular to the segment, pointing away from the
    /// room interior. For curved segments this is the chord normal.
    pub normal: UnitVec3,
    pub length: Length,
    /// Direction angle in `[0, 360)`: due east is 0, due north is 90.
    pub orientation: Angle,
    pub is_curved: bool,
    pub curve_radius: Option<Length>,
    pub is_room_separator: bool,
    /// Openings on this segment, sorted by offset along the wall.
    pub openings: Vec<OpeningInfo>,
}

impl WallSegmentInfo {
    /// Unit direction from start to end.
    pub fn direction(&self) -> DVec3 {
        (self.end_point.to_dvec3() - self.start_point.to_dvec3()) / self.length.raw()
    }
}

/// The analyzed boundary of one room.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomBoundaryInfo {
    /// Segments in loop order.
    pub wall_segments: Vec<WallSegmentInfo>,
    /// One corner per pair of consecutive segments; each corner is shared
    /// by the two segments that meet there.
    pub corners: Vec<Point3>,
    /// Sum of all segment lengths, separators included.
    pub perimeter: Length,
}

/// How far an opening center may sit from a wall's axis and still be
/// attached to that wall (covers typical wall thickness).
const OPENING_ATTACHMENT_TOLERANCE: f64 = 0.5;

/// Analyze a room's boundary loop into segments, corners and openings.
///
/// Zero-length edges are skipped with a warning; they occasionally appear
/// as slivers in host boundary loops and carry no geometry.
pub fn analyze_boundary(room: &RoomModel) -> RoomBoundaryInfo {
    // Winding from the shoelace signed area: positive means CCW, which puts
    // the interior on the left of each edge.
    let ccw = signed_area(&room.boundary) >= 0.0;

    let mut segments: Vec<WallSegmentInfo> = Vec::with_capacity(room.boundary.len());
    for edge in &room.boundary {
        let delta = edge.end.to_dvec3() - edge.start.to_dvec3();
        let length = Length(delta.length());
        let Some(direction) = UnitVec3::from_dvec3(delta) else {
            warn!("skipping zero-length boundary edge at {:?}", edge.start);
            continue;
        };

        // Perpendicular on the exterior side: right of the direction for a
        // CCW loop, left for a CW loop.
        let (nx, ny) = if ccw {
            (direction.dy(), -direction.dx())
        } else {
            (-direction.dy(), direction.dx())
        };
        // The loop lives in a horizontal plane, so the perpendicular of a
        // non-degenerate edge is never zero.
        let normal = UnitVec3::normalized(nx, ny, 0.0).unwrap_or(UnitVec3::POS_Y);

        let orientation = Angle(delta.y.atan2(delta.x).to_degrees()).normalized();

        segments.push(WallSegmentInfo {
            start_point: edge.start,
            end_point: edge.end,
            normal,
            length,
            orientation,
            is_curved: edge.radius.is_some(),
            curve_radius: edge.radius,
            is_room_separator: edge.separator,
            openings: Vec::new(),
        });
    }

    attach_openings(&mut segments, &room.openings);

    let corners = identify_corners(&segments);
    let perimeter = segments
        .iter()
        .fold(Length::ZERO, |acc, s| acc + s.length);

    RoomBoundaryInfo {
        wall_segments: segments,
        corners,
        perimeter,
    }
}

/// One corner per vertex where two consecutive segments meet. A closed
/// N-segment loop yields N corners; corner `i` is shared by segments `i`
/// and `i + 1` (wrapping).
pub fn identify_corners(segments: &[WallSegmentInfo]) -> Vec<Point3> {
    if segments.len() < 2 {
        return Vec::new();
    }
    segments.iter().map(|s| s.end_point).collect()
}

/// Remove room-separator segments, reporting how many were removed.
/// Running this on its own output is a no-op.
pub fn filter_room_separators(
    segments: &[WallSegmentInfo],
) -> (Vec<WallSegmentInfo>, usize) {
    let physical: Vec<WallSegmentInfo> = segments
        .iter()
        .filter(|s| !s.is_room_separator)
        .cloned()
        .collect();
    let filtered = segments.len() - physical.len();
    (physical, filtered)
}

/// Shoelace signed area of the loop (positive for CCW winding).
fn signed_area(edges: &[BoundaryEdge]) -> f64 {
    edges
        .iter()
        .map(|e| {
            e.start.x.raw() * e.end.y.raw() - e.end.x.raw() * e.start.y.raw()
        })
        .sum::<f64>()
        / 2.0
}

/// Attach each opening to the nearest segment whose span contains its
/// projection, within the attachment tolerance.
fn attach_openings(segments: &mut [WallSegmentInfo], openings: &[OpeningElement]) {
    for opening in openings {
        let mut best: Option<(usize, f64, f64)> = None; // (segment, distance, offset)

        for (i, segment) in segments.iter().enumerate() {
            if segment.length == Length::ZERO {
                continue;
            }
            let start = segment.start_point.to_dvec3();
            let axis = segment.end_point.to_dvec3() - start;
            let rel = opening.location.to_dvec3() - start;

            let t = rel.dot(axis) / axis.length_squared();
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            let distance = (rel - axis * t).length();
            if distance > OPENING_ATTACHMENT_TOLERANCE {
                continue;
            }
            if best.is_none_or(|(_, d, _)| distance < d) {
                best = Some((i, distance, t * segment.length.raw()));
            }
        }

        match best {
            Some((i, _, offset)) => segments[i].openings.push(OpeningInfo {
                kind: opening.kind,
                center_offset: Length(offset),
                width: opening.width,
            }),
            None => {
                warn!("opening at {:?} lies on no wall segment", opening.location);
            }
        }
    }

    for segment in segments {
        segment
            .openings
            .sort_by(|a, b| a.center_offset.raw().total_cmp(&b.center_offset.raw()));
    }
}
