//! Axis-aligned collision detection for annotation boxes.
//!
//! Two boxes collide iff their margin-expanded extents overlap on all three
//! axes simultaneously. The X and Y comparisons are strict, so at a zero
//! margin touching edges do not count as a collision; the Z comparison is
//! inclusive, because annotation footprints are flat (zero Z extent) and
//! co-planar boxes on the same level must still be able to collide. Boxes
//! on different levels never collide at margin zero.

use crate::errors::ContractError;
use crate::types::{BoundingBox, Length, Point3};

/// Estimated size of a tag annotation on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TagFootprint {
    pub width: Length,
    pub height: Length,
}

impl TagFootprint {
    /// Create a footprint; both extents must be positive.
    pub fn new(width: f64, height: f64) -> Result<Self, ContractError> {
        let (Ok(width), Ok(height)) = (Length::try_positive(width), Length::try_positive(height))
        else {
            return Err(ContractError::InvalidFootprint { width, height });
        };
        Ok(TagFootprint { width, height })
    }
}

impl Default for TagFootprint {
    fn default() -> Self {
        TagFootprint {
            width: Length::units(0.3),
            height: Length::units(0.15),
        }
    }
}

/// Default clearance kept around annotation boxes.
pub const DEFAULT_BUFFER_MARGIN: f64 = 0.1;

/// Pure AABB overlap tester with a configurable clearance margin.
///
/// Queries are O(n) linear scans over the existing boxes, which is the right
/// trade-off at the scale this engine targets (hundreds of elements).
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionDetector {
    buffer_margin: Length,
    footprint: TagFootprint,
}

impl CollisionDetector {
    /// Create a detector with the default tag footprint.
    /// The margin must be non-negative.
    pub fn new(buffer_margin: f64) -> Result<Self, ContractError> {
        Self::with_footprint(buffer_margin, TagFootprint::default())
    }

    /// Create a detector with an explicit tag footprint.
    pub fn with_footprint(
        buffer_margin: f64,
        footprint: TagFootprint,
    ) -> Result<Self, ContractError> {
        let buffer_margin = Length::try_non_negative(buffer_margin)
            .map_err(|_| ContractError::NegativeBufferMargin { value: buffer_margin })?;
        Ok(CollisionDetector {
            buffer_margin,
            footprint,
        })
    }

    /// The configured clearance margin.
    pub fn buffer_margin(&self) -> Length {
        self.buffer_margin
    }

    /// The configured tag footprint.
    pub fn footprint(&self) -> TagFootprint {
        self.footprint
    }

    /// Estimate the bounds a tag would occupy at a proposed location.
    pub fn estimate_tag_bounds(&self, location: Point3) -> BoundingBox {
        BoundingBox::from_center_footprint(location, self.footprint.width, self.footprint.height)
    }

    /// Test two boxes for overlap after expanding both by the margin.
    pub fn collides(&self, a: &BoundingBox, b: &BoundingBox) -> bool {
        let a = a.expanded(self.buffer_margin);
        let b = b.expanded(self.buffer_margin);

        // Strict on X/Y: touching edges are not overlap.
        let x = a.min.x < b.max.x && b.min.x < a.max.x;
        let y = a.min.y < b.max.y && b.min.y < a.max.y;
        // Inclusive on Z: flat boxes on the same plane can collide.
        let z = a.min.z <= b.max.z && b.min.z <= a.max.z;

        x && y && z
    }

    /// Test a candidate box against every existing box.
    pub fn has_collision(&self, candidate: &BoundingBox, existing: &[BoundingBox]) -> bool {
        existing.iter().any(|b| self.collides(candidate, b))
    }
}

impl Default for CollisionDetector {
    fn default() -> Self {
        CollisionDetector {
            buffer_margin: Length::units(DEFAULT_BUFFER_MARGIN),
            footprint: TagFootprint::default(),
        }
    }
}
