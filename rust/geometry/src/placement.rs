// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Member placement - endpoints, offsets and roll to a rigid transform
//!
//! Profiles are extruded along the local reference axis (+Z) and centered
//! on the origin. A [`Placement`] maps that local frame into model space:
//! the rotation first aligns +Z with the member direction, then rolls about
//! the member's own axis.

use crate::config::DEFAULT_LENGTH_TOLERANCE;
use crate::error::{Error, Result};
use nalgebra::{Isometry3, Matrix4, Point3, Translation3, UnitQuaternion, Vector3};
use stb_lite_core::{EndOffset, NodePosition, PlanOffset};
use std::f64::consts::PI;

/// Local extrusion axis of every profile
#[inline]
pub fn reference_axis() -> Vector3<f64> {
    Vector3::z()
}

/// World-space endpoint offset; `z` is optional so callers can tell
/// "no vertical offset" apart from "vertical offset of zero"
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Offset {
    #[inline]
    pub fn new(x: f64, y: f64, z: Option<f64>) -> Self {
        Self { x, y, z }
    }

    /// Horizontal-only offset
    #[inline]
    pub fn plan(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z.unwrap_or(0.0))
    }
}

impl From<PlanOffset> for Offset {
    fn from(offset: PlanOffset) -> Self {
        Self::plan(offset.x, offset.y)
    }
}

impl From<EndOffset> for Offset {
    fn from(offset: EndOffset) -> Self {
        Self::new(offset.x, offset.y, offset.z)
    }
}

/// Rigid placement of an extruded profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Midpoint of the adjusted endpoints
    pub center: Point3<f64>,
    /// Unit vector from start to end
    pub direction: Vector3<f64>,
    /// Extrusion length (> 0)
    pub length: f64,
    /// Maps the reference axis onto `direction`, roll included
    pub rotation: UnitQuaternion<f64>,
}

impl Placement {
    /// Adjusted start point
    #[inline]
    pub fn start(&self) -> Point3<f64> {
        self.center - self.direction * (self.length / 2.0)
    }

    /// Adjusted end point
    #[inline]
    pub fn end(&self) -> Point3<f64> {
        self.center + self.direction * (self.length / 2.0)
    }

    /// Local profile frame to model space: translation(center) * rotation
    pub fn to_matrix(&self) -> Matrix4<f64> {
        Isometry3::from_parts(Translation3::from(self.center.coords), self.rotation).to_homogeneous()
    }

    /// Transform a point from the local profile frame into model space
    #[inline]
    pub fn local_to_world(&self, point: &Point3<f64>) -> Point3<f64> {
        self.center + self.rotation * point.coords
    }

    /// Same placement with an extra roll about the member axis
    pub fn rolled(&self, angle: f64) -> Self {
        Self {
            rotation: roll(&self.rotation, angle),
            ..*self
        }
    }
}

/// Rotation taking the reference axis onto `direction`
///
/// The antiparallel case has no unique shortest arc; a half turn about
/// local X is used.
pub fn align_to(direction: &Vector3<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::rotation_between(&reference_axis(), direction)
        .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI))
}

/// Right-multiply a roll about the local reference axis
///
/// Because the base rotation maps local +Z onto the member direction, this
/// equals a rotation about the member's own axis in world space.
#[inline]
pub fn roll(rotation: &UnitQuaternion<f64>, angle: f64) -> UnitQuaternion<f64> {
    if angle == 0.0 {
        return *rotation;
    }
    rotation * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Roll that brings the profile's local +Y as close as possible to world +Z
///
/// Zero for vertical members, where "up" is the member axis itself.
pub fn up_correction(rotation: &UnitQuaternion<f64>, direction: &Vector3<f64>) -> f64 {
    let desired = Vector3::z() - direction * direction.z;
    if desired.norm() < 1e-9 {
        return 0.0;
    }
    let current = rotation * Vector3::y();
    let sin = current.cross(&desired).dot(direction);
    let cos = current.dot(&desired);
    sin.atan2(cos)
}

/// Convert an end-plane offset of a horizontal member to world space
///
/// `x` runs along the member, `y` is lateral (world Z cross direction,
/// horizontal) and `z` is world vertical.
pub fn end_plane_to_world(offset: &EndOffset, direction: &Vector3<f64>) -> Offset {
    let lateral = Vector3::z()
        .cross(direction)
        .try_normalize(1e-9)
        .unwrap_or_else(Vector3::y);
    let world = direction * offset.x + lateral * offset.y;
    Offset::new(world.x, world.y, offset.z.map(|z| z + world.z))
}

/// Computes member placements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryCalculator {
    tolerance: f64,
}

impl Default for GeometryCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH_TOLERANCE)
    }
}

impl GeometryCalculator {
    /// Members shorter than `tolerance` (mm) are degenerate
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn from_config(config: &crate::config::GeometryConfig) -> Self {
        Self::new(config.length_tolerance)
    }

    /// Place a member between two points with world-space offsets and a roll
    pub fn place_between(
        &self,
        start: Point3<f64>,
        end: Point3<f64>,
        start_offset: &Offset,
        end_offset: &Offset,
        roll_angle: f64,
    ) -> Result<Placement> {
        let a = start + start_offset.vector();
        let b = end + end_offset.vector();
        let (direction, length) = self.axis(&a, &b)?;

        let rotation = roll(&align_to(&direction), roll_angle);

        Ok(Placement {
            center: nalgebra::center(&a, &b),
            direction,
            length,
            rotation,
        })
    }

    /// Column / post variant: plan offsets only
    pub fn place_column(
        &self,
        bottom: Point3<f64>,
        top: Point3<f64>,
        offset_bottom: PlanOffset,
        offset_top: PlanOffset,
        roll_angle: f64,
    ) -> Result<Placement> {
        self.place_between(
            bottom,
            top,
            &offset_bottom.into(),
            &offset_top.into(),
            roll_angle,
        )
    }

    /// Beam / brace variant
    ///
    /// Offsets are given in the end-plane frame. When `section_height` is
    /// set and neither end carries a vertical offset, both endpoints drop by
    /// half the height so the profile's top face sits on the nominal line.
    /// The profile's local +Y is kept on world up before `roll_angle` applies.
    pub fn place_horizontal(
        &self,
        start: Point3<f64>,
        end: Point3<f64>,
        offset_start: &EndOffset,
        offset_end: &EndOffset,
        roll_angle: f64,
        section_height: Option<f64>,
    ) -> Result<Placement> {
        let nominal = (end - start).try_normalize(self.tolerance.max(f64::EPSILON));
        let frame = nominal.unwrap_or_else(Vector3::x);

        let mut a = start + end_plane_to_world(offset_start, &frame).vector();
        let mut b = end + end_plane_to_world(offset_end, &frame).vector();

        let has_vertical_offset = offset_start.z.is_some() || offset_end.z.is_some();
        if let Some(height) = section_height.filter(|_| !has_vertical_offset) {
            let drop = Vector3::z() * (height / 2.0);
            a -= drop;
            b -= drop;
        }

        let (direction, length) = self.axis(&a, &b)?;

        let base = align_to(&direction);
        let upright = roll(&base, up_correction(&base, &direction));

        Ok(Placement {
            center: nalgebra::center(&a, &b),
            direction,
            length,
            rotation: roll(&upright, roll_angle),
        })
    }

    fn axis(&self, a: &Point3<f64>, b: &Point3<f64>) -> Result<(Vector3<f64>, f64)> {
        let delta = b - a;
        let length = delta.norm();
        if !length.is_finite() {
            return Err(Error::DegenerateGeometry(
                "member endpoints are not finite".to_string(),
            ));
        }
        if length <= self.tolerance {
            return Err(Error::DegenerateGeometry(format!(
                "member endpoints coincide (length {:.3e} mm)",
                length
            )));
        }
        Ok((delta / length, length))
    }
}

/// Convert a model node to a point
#[inline]
pub fn node_point(node: &NodePosition) -> Point3<f64> {
    Point3::new(node.x, node.y, node.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    fn calc() -> GeometryCalculator {
        GeometryCalculator::default()
    }

    #[test]
    fn test_vertical_member_is_identity() {
        let p = calc()
            .place_between(
                Point3::origin(),
                Point3::new(0.0, 0.0, 3000.0),
                &Offset::default(),
                &Offset::default(),
                0.0,
            )
            .unwrap();
        assert_relative_eq!(p.center, Point3::new(0.0, 0.0, 1500.0));
        assert_relative_eq!(p.length, 3000.0);
        assert_relative_eq!(p.direction, Vector3::z());
        assert_abs_diff_eq!(p.rotation.angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_maps_reference_axis_onto_direction() {
        let p = calc()
            .place_between(
                Point3::new(1.0, 2.0, 3.0),
                Point3::new(4.0, -2.0, 15.0),
                &Offset::default(),
                &Offset::default(),
                0.7,
            )
            .unwrap();
        assert_relative_eq!(p.rotation * reference_axis(), p.direction, epsilon = 1e-12);
        assert_relative_eq!(p.length, 13.0);
    }

    #[test]
    fn test_offsets_are_applied_before_direction() {
        let p = calc()
            .place_between(
                Point3::origin(),
                Point3::new(0.0, 0.0, 1000.0),
                &Offset::plan(100.0, 0.0),
                &Offset::plan(100.0, 0.0),
                0.0,
            )
            .unwrap();
        assert_relative_eq!(p.center, Point3::new(100.0, 0.0, 500.0));
        assert_relative_eq!(p.direction, Vector3::z());
    }

    #[test]
    fn test_antiparallel_direction() {
        let p = calc()
            .place_between(
                Point3::new(0.0, 0.0, 10.0),
                Point3::origin(),
                &Offset::default(),
                &Offset::default(),
                0.0,
            )
            .unwrap();
        assert_relative_eq!(p.rotation * reference_axis(), -Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_member() {
        let err = calc()
            .place_between(
                Point3::new(5.0, 5.0, 5.0),
                Point3::new(5.0, 5.0, 5.0),
                &Offset::default(),
                &Offset::default(),
                0.0,
            )
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry(_)));

        // Offsets that collapse the endpoints are degenerate too
        let err = calc().place_column(
            Point3::origin(),
            Point3::new(100.0, 0.0, 0.0),
            PlanOffset::new(100.0, 0.0),
            PlanOffset::default(),
            0.0,
        );
        assert!(matches!(err, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn test_roll_round_trip() {
        let base = align_to(&Vector3::new(1.0, 1.0, 0.5).normalize());
        let back = roll(&roll(&base, PI), -PI);
        assert_relative_eq!(back, base, epsilon = 1e-12);
    }

    #[test]
    fn test_roll_is_about_member_axis() {
        let direction = Vector3::new(0.0, 1.0, 1.0).normalize();
        let base = align_to(&direction);
        let rolled = roll(&base, 0.4);
        let world = UnitQuaternion::from_axis_angle(&nalgebra::Unit::new_normalize(direction), 0.4) * base;
        assert_relative_eq!(rolled, world, epsilon = 1e-12);
        assert_relative_eq!(rolled * Vector3::z(), direction, epsilon = 1e-12);
    }

    #[test]
    fn test_column_roll_turns_profile_x() {
        let p = calc()
            .place_column(
                Point3::origin(),
                Point3::new(0.0, 0.0, 3000.0),
                PlanOffset::default(),
                PlanOffset::default(),
                FRAC_PI_2,
            )
            .unwrap();
        assert_relative_eq!(p.rotation * Vector3::x(), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_beam_keeps_profile_up() {
        for end in [
            Point3::new(6000.0, 0.0, 0.0),
            Point3::new(-6000.0, 0.0, 0.0),
            Point3::new(0.0, 6000.0, 0.0),
            Point3::new(3000.0, 4000.0, 2000.0),
        ] {
            let p = calc()
                .place_horizontal(Point3::origin(), end, &EndOffset::default(), &EndOffset::default(), 0.0, None)
                .unwrap();
            let up = p.rotation * Vector3::y();
            assert!(up.z > 0.0, "profile up points down for {:?}", end);
            assert_abs_diff_eq!(up.dot(&p.direction), 0.0, epsilon = 1e-12);
            assert_relative_eq!(p.rotation * Vector3::z(), p.direction, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_top_aligned_beam() {
        let p = calc()
            .place_horizontal(
                Point3::new(0.0, 0.0, 3000.0),
                Point3::new(6000.0, 0.0, 3000.0),
                &EndOffset::default(),
                &EndOffset::default(),
                0.0,
                Some(400.0),
            )
            .unwrap();
        assert_relative_eq!(p.center, Point3::new(3000.0, 0.0, 2800.0));
        // Top face of the profile lands on the nominal level
        let top = p.local_to_world(&Point3::new(0.0, 200.0, 0.0));
        assert_relative_eq!(top.z, 3000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vertical_offset_disables_top_alignment() {
        let p = calc()
            .place_horizontal(
                Point3::new(0.0, 0.0, 3000.0),
                Point3::new(6000.0, 0.0, 3000.0),
                &EndOffset::new(0.0, 0.0, Some(-50.0)),
                &EndOffset::default(),
                0.0,
                Some(400.0),
            )
            .unwrap();
        assert_relative_eq!(p.start(), Point3::new(0.0, 0.0, 2950.0), epsilon = 1e-9);
        assert_relative_eq!(p.end(), Point3::new(6000.0, 0.0, 3000.0), epsilon = 1e-9);
    }

    #[test]
    fn test_end_plane_offsets() {
        // Beam along +X: lateral offset points to +Y, axial along +X
        let world = end_plane_to_world(&EndOffset::new(10.0, 20.0, Some(30.0)), &Vector3::x());
        assert_relative_eq!(world.vector(), Vector3::new(10.0, 20.0, 30.0), epsilon = 1e-12);

        // Beam along +Y: lateral offset points to -X
        let world = end_plane_to_world(&EndOffset::new(0.0, 20.0, None), &Vector3::y());
        assert_relative_eq!(world.vector(), Vector3::new(-20.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_matches_local_to_world() {
        let p = calc()
            .place_horizontal(
                Point3::new(100.0, 200.0, 300.0),
                Point3::new(2100.0, 1200.0, 800.0),
                &EndOffset::default(),
                &EndOffset::default(),
                0.3,
                None,
            )
            .unwrap();
        let local = Point3::new(12.0, -7.0, 40.0);
        assert_relative_eq!(
            p.to_matrix().transform_point(&local),
            p.local_to_world(&local),
            epsilon = 1e-9
        );
        assert_relative_eq!(p.local_to_world(&Point3::new(0.0, 0.0, p.length / 2.0)), p.end(), epsilon = 1e-9);
    }
}
