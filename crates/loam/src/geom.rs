//! Pure geometry predicates shared by every combat-area consumer.
//!
//! All of the shape tests in the simulation (weapon cones, ability zones,
//! projectile hits) route through these functions so the tie-break rules are
//! identical everywhere:
//!
//! - Degenerate directions normalize to the canonical unit vector `(1, 0)`.
//! - Dot products are clamped to `[-1, 1]` before `acos`.
//! - Distances compare with `<=` (inclusive boundary).

use glam::Vec2;

/// Length below which a vector is treated as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1e-4;

/// Normalizes `v`, falling back to the unit vector `(1, 0)` when `v` is
/// shorter than [`DEGENERATE_EPSILON`].
///
/// This never produces NaN, unlike a raw `v / v.length()`.
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use loam::geom::normalize_or_unit_x;
///
/// assert_eq!(normalize_or_unit_x(Vec2::ZERO), Vec2::new(1.0, 0.0));
/// assert_eq!(normalize_or_unit_x(Vec2::new(0.0, 3.0)), Vec2::new(0.0, 1.0));
/// ```
#[must_use]
pub fn normalize_or_unit_x(v: Vec2) -> Vec2 {
    let len = v.length();
    if len <= DEGENERATE_EPSILON {
        Vec2::new(1.0, 0.0)
    } else {
        v / len
    }
}

/// Angle in degrees between two directions, via `acos` of the clamped dot
/// product of their normalized forms.
#[must_use]
pub fn angle_between_deg(a: Vec2, b: Vec2) -> f32 {
    let dot = normalize_or_unit_x(a)
        .dot(normalize_or_unit_x(b))
        .clamp(-1.0, 1.0);
    dot.acos().to_degrees()
}

/// Distance from `point` to the closest point on the segment `start..end`.
///
/// A degenerate segment (length² ≤ [`DEGENERATE_EPSILON`]) collapses to the
/// distance from `point` to `start`.
#[must_use]
pub fn point_segment_distance(point: Vec2, start: Vec2, end: Vec2) -> f32 {
    let segment = end - start;
    let length_sq = segment.length_squared();
    if length_sq <= DEGENERATE_EPSILON {
        return (point - start).length();
    }
    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    let projection = start + segment * t;
    (point - projection).length()
}

/// True when `point` lies within `radius` of `center` (inclusive).
#[must_use]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    (point - center).length() <= radius
}

/// True when `point` lies inside a cone anchored at `origin`, facing
/// `facing`, with the given `range` and full `aperture_deg`.
///
/// Inside means: distance from origin ≤ `range` AND the angle between the
/// point offset and the facing direction ≤ half the aperture. A point
/// sitting exactly on the origin normalizes to `(1, 0)` and so counts as
/// inside whenever the cone faces roughly along +X.
#[must_use]
pub fn point_in_cone(origin: Vec2, facing: Vec2, range: f32, aperture_deg: f32, point: Vec2) -> bool {
    let delta = point - origin;
    if delta.length() > range {
        return false;
    }
    angle_between_deg(delta, facing) <= aperture_deg * 0.5
}

/// Cone test that additionally rejects points sitting on the origin.
///
/// Used by knockback-style effects where displacing a point that has no
/// defined outward direction would be meaningless.
#[must_use]
pub fn point_in_cone_strict(
    origin: Vec2,
    facing: Vec2,
    range: f32,
    aperture_deg: f32,
    point: Vec2,
) -> bool {
    let delta = point - origin;
    let dist = delta.length();
    if dist <= DEGENERATE_EPSILON || dist > range {
        return false;
    }
    angle_between_deg(delta, facing) <= aperture_deg * 0.5
}

// =============================================================================
// Tests
// =============================================================================
