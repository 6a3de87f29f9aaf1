//! Strongly-typed geometric primitives for tagline (zero-cost newtypes).
//!
//! Design goals:
//! - No raw `f64` in domain logic
//! - Illegal states unrepresentable
//! - Unit conversions only via [`Millimeters`]

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use glam::DVec3;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Length in the model's native unit (feet in the source domain; opaque here)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    /// Create a Length from a raw value (const-friendly, unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub const fn units(val: f64) -> Length {
        Length(val)
    }

    /// Create a Length with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Length, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Length(val))
        }
    }

    /// Create a non-negative Length with validation
    #[inline]
    pub fn try_non_negative(val: f64) -> Result<Length, NumericError> {
        match Length::try_new(val)? {
            l if l.0 < 0.0 => Err(NumericError::Negative),
            l => Ok(l),
        }
    }

    /// Create a strictly positive Length with validation
    #[inline]
    pub fn try_positive(val: f64) -> Result<Length, NumericError> {
        match Length::try_non_negative(val)? {
            l if l.0 == 0.0 => Err(NumericError::Zero),
            l => Ok(l),
        }
    }

    /// Get the absolute value
    #[inline]
    pub fn abs(self) -> Length {
        Length(self.0.abs())
    }

    /// Get the minimum of two lengths
    #[inline]
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    /// Get the maximum of two lengths
    #[inline]
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }

    /// Get the raw value (use sparingly, prefer typed operations)
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Check if this length is finite (not NaN or infinite)
    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length { Length(self.0 + rhs.0) }
}
impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length { Length(self.0 - rhs.0) }
}
impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length { Length(self.0 * rhs) }
}
impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length { Length(self.0 / rhs) }
}
impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length { Length(-self.0) }
}
impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) { self.0 += rhs.0; }
}
impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) { self.0 -= rhs.0; }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Millimeters, the unit dimension offsets arrive in from upstream callers.
///
/// Conversion into model units happens only through [`Millimeters::to_length`];
/// the conversion factor never appears in domain logic.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Millimeters(pub f64);

/// Millimeters per model unit conversion (mm -> feet)
const MM_TO_UNITS: f64 = 0.00328084;

impl Millimeters {
    /// Create with validation (rejects NaN/infinite)
    #[inline]
    pub fn try_new(val: f64) -> Result<Millimeters, NumericError> {
        if val.is_nan() {
            Err(NumericError::NaN)
        } else if val.is_infinite() {
            Err(NumericError::Infinite)
        } else {
            Ok(Millimeters(val))
        }
    }

    /// Convert into the model's native length unit.
    #[inline]
    pub fn to_length(self) -> Length {
        Length(self.0 * MM_TO_UNITS)
    }

    /// Get the raw value in millimeters
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Millimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.0)
    }
}

/// Angle in degrees
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(pub f64);

impl Angle {
    /// Create from degrees
    #[inline]
    pub const fn degrees(val: f64) -> Angle {
        Angle(val)
    }

    /// Normalize into `[0, 360)`
    #[inline]
    pub fn normalized(self) -> Angle {
        Angle(self.0.rem_euclid(360.0))
    }

    /// Get the value in degrees
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    /// Get the value in radians
    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// 3D point in model coordinates (right-handed, Z up)
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point3 {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: Length::ZERO,
        y: Length::ZERO,
        z: Length::ZERO,
    };

    pub fn new(x: Length, y: Length, z: Length) -> Self {
        Point3 { x, y, z }
    }

    /// Construct from raw coordinate values
    pub fn from_raw(x: f64, y: f64, z: f64) -> Self {
        Point3 {
            x: Length(x),
            y: Length(y),
            z: Length(z),
        }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point3) -> Length {
        (other - self).magnitude()
    }

    /// Midpoint between two points
    pub fn midpoint(self, other: Point3) -> Point3 {
        Point3 {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }

    /// Bridge into glam for vector math
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x.0, self.y.0, self.z.0)
    }

    /// Bridge back from glam
    pub fn from_dvec3(v: DVec3) -> Self {
        Point3::from_raw(v.x, v.y, v.z)
    }
}

/// A displacement/offset vector (not an absolute position)
/// Use this for translations; Point3 + Offset3 = Point3
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset3 {
    pub dx: Length,
    pub dy: Length,
    pub dz: Length,
}

impl Offset3 {
    pub const ZERO: Offset3 = Offset3 {
        dx: Length::ZERO,
        dy: Length::ZERO,
        dz: Length::ZERO,
    };

    pub fn new(dx: Length, dy: Length, dz: Length) -> Self {
        Offset3 { dx, dy, dz }
    }

    /// Euclidean magnitude of the displacement
    pub fn magnitude(self) -> Length {
        Length(
            (self.dx.0 * self.dx.0 + self.dy.0 * self.dy.0 + self.dz.0 * self.dz.0).sqrt(),
        )
    }

    /// Bridge into glam for vector math
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.dx.0, self.dy.0, self.dz.0)
    }
}

/// Add an offset to a point to get a new point
impl Add<Offset3> for Point3 {
    type Output = Point3;
    fn add(self, rhs: Offset3) -> Point3 {
        Point3 {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
            z: self.z + rhs.dz,
        }
    }
}

/// Subtract two points to get an offset
impl Sub<Point3> for Point3 {
    type Output = Offset3;
    fn sub(self, rhs: Point3) -> Offset3 {
        Offset3 {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
            dz: self.z - rhs.z,
        }
    }
}

/// A unit direction vector (dimensionless, normalized)
/// Used for wall normals and radial search directions
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct UnitVec3 {
    dx: f64,
    dy: f64,
    dz: f64,
}

impl UnitVec3 {
    pub const POS_X: UnitVec3 = UnitVec3 { dx: 1.0, dy: 0.0, dz: 0.0 };
    pub const NEG_X: UnitVec3 = UnitVec3 { dx: -1.0, dy: 0.0, dz: 0.0 };
    pub const POS_Y: UnitVec3 = UnitVec3 { dx: 0.0, dy: 1.0, dz: 0.0 };
    pub const NEG_Y: UnitVec3 = UnitVec3 { dx: 0.0, dy: -1.0, dz: 0.0 };
    pub const POS_Z: UnitVec3 = UnitVec3 { dx: 0.0, dy: 0.0, dz: 1.0 };
    pub const NEG_Z: UnitVec3 = UnitVec3 { dx: 0.0, dy: 0.0, dz: -1.0 };

    /// Create a normalized unit vector from components.
    /// Returns None if the input has zero length.
    pub fn normalized(dx: f64, dy: f64, dz: f64) -> Option<Self> {
        let len = (dx * dx + dy * dy + dz * dz).sqrt();
        if len == 0.0 || !len.is_finite() {
            None
        } else {
            Some(UnitVec3 {
                dx: dx / len,
                dy: dy / len,
                dz: dz / len,
            })
        }
    }

    /// Create from a glam vector; None if zero length.
    pub fn from_dvec3(v: DVec3) -> Option<Self> {
        Self::normalized(v.x, v.y, v.z)
    }

    /// Get dx component
    pub fn dx(self) -> f64 { self.dx }

    /// Get dy component
    pub fn dy(self) -> f64 { self.dy }

    /// Get dz component
    pub fn dz(self) -> f64 { self.dz }

    /// Dot product with another unit vector (cosine of the angle between)
    pub fn dot(self, other: UnitVec3) -> f64 {
        self.dx * other.dx + self.dy * other.dy + self.dz * other.dz
    }

    /// Bridge into glam
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.dx, self.dy, self.dz)
    }
}

/// Multiply a unit vector by a length to get an offset (not a point!)
impl Mul<Length> for UnitVec3 {
    type Output = Offset3;
    fn mul(self, len: Length) -> Offset3 {
        Offset3 {
            dx: Length(self.dx * len.0),
            dy: Length(self.dy * len.0),
            dz: Length(self.dz * len.0),
        }
    }
}

/// Axis-aligned bounding box; `min ≤ max` componentwise
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// Create from explicit corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "bounding box min must not exceed max"
        );
        BoundingBox { min, max }
    }

    /// Build a flat annotation box centered on a location: extends
    /// ± width/2 in X and ± height/2 in Y, pinned to the location's Z.
    pub fn from_center_footprint(center: Point3, width: Length, height: Length) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        BoundingBox {
            min: Point3::new(center.x - hw, center.y - hh, center.z),
            max: Point3::new(center.x + hw, center.y + hh, center.z),
        }
    }

    /// Minkowski-expand by a margin on all sides.
    pub fn expanded(self, margin: Length) -> Self {
        let m = Offset3::new(margin, margin, margin);
        BoundingBox {
            min: Point3::new(self.min.x - m.dx, self.min.y - m.dy, self.min.z - m.dz),
            max: self.max + m,
        }
    }

    /// Get the center point
    pub fn center(self) -> Point3 {
        self.min.midpoint(self.max)
    }

    /// Extent along X
    pub fn width(self) -> Length { self.max.x - self.min.x }

    /// Extent along Y
    pub fn height(self) -> Length { self.max.y - self.min.y }

    /// Extent along Z
    pub fn depth(self) -> Length { self.max.z - self.min.z }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Length tests ====================

    #[test]
    fn length_try_new_valid() {
        assert!(Length::try_new(1.0).is_ok());
        assert!(Length::try_new(0.0).is_ok());
        assert!(Length::try_new(-1.0).is_ok());
    }

    #[test]
    fn length_try_new_rejects_nan() {
        assert_eq!(Length::try_new(f64::NAN), Err(NumericError::NaN));
    }

    #[test]
    fn length_try_new_rejects_infinity() {
        assert_eq!(Length::try_new(f64::INFINITY), Err(NumericError::Infinite));
        assert_eq!(Length::try_new(f64::NEG_INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn length_try_non_negative_rejects_negative() {
        assert!(Length::try_non_negative(0.0).is_ok());
        assert_eq!(Length::try_non_negative(-1.0), Err(NumericError::Negative));
    }

    #[test]
    fn length_try_positive_rejects_zero() {
        assert!(Length::try_positive(0.5).is_ok());
        assert_eq!(Length::try_positive(0.0), Err(NumericError::Zero));
        assert_eq!(Length::try_positive(-0.5), Err(NumericError::Negative));
    }

    #[test]
    fn length_arithmetic() {
        let a = Length(3.0);
        let b = Length(2.0);

        assert_eq!(a + b, Length(5.0));
        assert_eq!(a - b, Length(1.0));
        assert_eq!(a * 2.0, Length(6.0));
        assert_eq!(a / 2.0, Length(1.5));
        assert_eq!(-a, Length(-3.0));
    }

    #[test]
    fn length_min_max() {
        let a = Length(3.0);
        let b = Length(5.0);

        assert_eq!(a.min(b), Length(3.0));
        assert_eq!(a.max(b), Length(5.0));
    }

    // ==================== Millimeters tests ====================

    #[test]
    fn millimeters_to_length() {
        let mm = Millimeters(200.0);
        let len = mm.to_length();
        assert!((len.raw() - 0.656168).abs() < 1e-6);
    }

    #[test]
    fn millimeters_try_new_rejects_nan() {
        assert_eq!(Millimeters::try_new(f64::NAN), Err(NumericError::NaN));
    }

    // ==================== Angle tests ====================

    #[test]
    fn angle_normalized_wraps() {
        assert_eq!(Angle(370.0).normalized(), Angle(10.0));
        assert_eq!(Angle(-90.0).normalized(), Angle(270.0));
        assert_eq!(Angle(0.0).normalized(), Angle(0.0));
        assert_eq!(Angle(360.0).normalized(), Angle(0.0));
    }

    // ==================== Point3/Offset3 tests ====================

    #[test]
    fn point_plus_offset_gives_point() {
        let p = Point3::from_raw(1.0, 2.0, 3.0);
        let o = Offset3::new(Length(3.0), Length(4.0), Length(5.0));
        let result = p + o;
        assert_eq!(result, Point3::from_raw(4.0, 6.0, 8.0));
    }

    #[test]
    fn point_minus_point_gives_offset() {
        let p1 = Point3::from_raw(5.0, 7.0, 2.0);
        let p2 = Point3::from_raw(2.0, 3.0, 2.0);
        let offset = p1 - p2;
        assert_eq!(offset.dx, Length(3.0));
        assert_eq!(offset.dy, Length(4.0));
        assert_eq!(offset.dz, Length(0.0));
        assert_eq!(offset.magnitude(), Length(5.0));
    }

    #[test]
    fn point_distance() {
        let a = Point3::ORIGIN;
        let b = Point3::from_raw(3.0, 4.0, 0.0);
        assert_eq!(a.distance(b), Length(5.0));
    }

    #[test]
    fn point_midpoint() {
        let p1 = Point3::ORIGIN;
        let p2 = Point3::from_raw(4.0, 6.0, 2.0);
        assert_eq!(p1.midpoint(p2), Point3::from_raw(2.0, 3.0, 1.0));
    }

    // ==================== UnitVec3 tests ====================

    #[test]
    fn unitvec_axis_constants_are_unit_length() {
        let dirs = [
            UnitVec3::POS_X, UnitVec3::NEG_X,
            UnitVec3::POS_Y, UnitVec3::NEG_Y,
            UnitVec3::POS_Z, UnitVec3::NEG_Z,
        ];
        for dir in dirs {
            assert!((dir.dot(dir) - 1.0).abs() < 1e-10, "axis constant should have unit length");
        }
    }

    #[test]
    fn unitvec_normalized_valid() {
        let v = UnitVec3::normalized(3.0, 4.0, 0.0).unwrap();
        assert!((v.dx() - 0.6).abs() < 1e-10);
        assert!((v.dy() - 0.8).abs() < 1e-10);
        assert!((v.dot(v) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn unitvec_normalized_zero_returns_none() {
        assert_eq!(UnitVec3::normalized(0.0, 0.0, 0.0), None);
    }

    #[test]
    fn unitvec_mul_length_gives_offset() {
        let offset = UnitVec3::POS_X * Length(5.0);
        assert_eq!(offset.dx, Length(5.0));
        assert_eq!(offset.dy, Length(0.0));
        assert_eq!(offset.dz, Length(0.0));
    }

    #[test]
    fn unitvec_dot_opposite_is_negative_one() {
        assert!((UnitVec3::POS_Y.dot(UnitVec3::NEG_Y) + 1.0).abs() < 1e-10);
    }

    // ==================== BoundingBox tests ====================

    #[test]
    fn bbox_from_center_footprint() {
        let bb = BoundingBox::from_center_footprint(
            Point3::from_raw(5.0, 5.0, 1.0),
            Length(4.0),
            Length(2.0),
        );

        // center (5,5), width 4, height 2 -> min (3,4), max (7,6), flat at z=1
        assert_eq!(bb.min, Point3::from_raw(3.0, 4.0, 1.0));
        assert_eq!(bb.max, Point3::from_raw(7.0, 6.0, 1.0));
        assert_eq!(bb.depth(), Length::ZERO);
    }

    #[test]
    fn bbox_expanded_grows_all_sides() {
        let bb = BoundingBox::new(Point3::ORIGIN, Point3::from_raw(1.0, 1.0, 0.0));
        let grown = bb.expanded(Length(0.1));
        assert_eq!(grown.min, Point3::from_raw(-0.1, -0.1, -0.1));
        assert_eq!(grown.max, Point3::from_raw(1.1, 1.1, 0.1));
    }

    #[test]
    fn bbox_center_and_extents() {
        let bb = BoundingBox::new(Point3::from_raw(1.0, 2.0, 0.0), Point3::from_raw(5.0, 8.0, 0.0));
        assert_eq!(bb.center(), Point3::from_raw(3.0, 5.0, 0.0));
        assert_eq!(bb.width(), Length(4.0));
        assert_eq!(bb.height(), Length(6.0));
    }
}
