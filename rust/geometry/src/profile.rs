// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D cross-section profiles and triangulation

use crate::error::{Error, Result};
use nalgebra::Point2;
use std::f64::consts::PI;

/// How the outline of a profile should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProfileMeta {
    /// Plain polygon
    #[default]
    Polygon,
    /// Sampled circle; builders may substitute analytic circles
    Circular {
        outer_radius: f64,
        inner_radius: Option<f64>,
    },
}

impl ProfileMeta {
    #[inline]
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::Circular { .. })
    }
}

/// 2D profile with optional holes, millimeters in the profile-local plane
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Outer boundary (counter-clockwise, closed implicitly)
    pub outer: Vec<Point2<f64>>,
    /// Holes (clockwise)
    pub holes: Vec<Vec<Point2<f64>>>,
    pub meta: ProfileMeta,
}

/// Axis-aligned bounds of a profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds2D {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}

impl Profile {
    /// Create a polygon profile
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
            meta: ProfileMeta::Polygon,
        }
    }

    /// Add a hole to the profile
    pub fn add_hole(&mut self, hole: Vec<Point2<f64>>) {
        self.holes.push(hole);
    }

    /// Builder-style hole
    pub fn with_hole(mut self, hole: Vec<Point2<f64>>) -> Self {
        self.add_hole(hole);
        self
    }

    pub fn with_meta(mut self, meta: ProfileMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Net area: outer ring minus holes
    pub fn area(&self) -> f64 {
        let outer = signed_area(&self.outer).abs();
        let holes: f64 = self.holes.iter().map(|h| signed_area(h).abs()).sum();
        outer - holes
    }

    /// Bounds of the outer ring
    pub fn bounds(&self) -> Bounds2D {
        let mut min = Point2::new(f64::MAX, f64::MAX);
        let mut max = Point2::new(f64::MIN, f64::MIN);
        for p in &self.outer {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Bounds2D { min, max }
    }

    /// Copy of the profile shifted by (dx, dy)
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let shift = |ring: &Vec<Point2<f64>>| -> Vec<Point2<f64>> {
            ring.iter().map(|p| Point2::new(p.x + dx, p.y + dy)).collect()
        };
        Self {
            outer: shift(&self.outer),
            holes: self.holes.iter().map(shift).collect(),
            meta: self.meta,
        }
    }

    /// Copy of the profile with its bounding box centered on the origin
    pub fn centered(&self) -> Self {
        let c = self.bounds().center();
        self.translated(-c.x, -c.y)
    }

    /// Force counter-clockwise outer and clockwise holes
    pub fn normalize_winding(&mut self) {
        if signed_area(&self.outer) < 0.0 {
            self.outer.reverse();
        }
        for hole in &mut self.holes {
            if signed_area(hole) > 0.0 {
                hole.reverse();
            }
        }
    }

    /// Total number of vertices across all rings
    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(|h| h.len()).sum::<usize>()
    }

    /// Triangulate the profile using earcutr
    /// Returns triangle indices into the flattened vertex array
    pub fn triangulate(&self) -> Result<Triangulation> {
        if self.outer.len() < 3 {
            return Err(Error::InvalidProfile(
                "Profile must have at least 3 vertices".to_string(),
            ));
        }

        let mut vertices = Vec::with_capacity(self.vertex_count() * 2);
        for p in &self.outer {
            vertices.push(p.x);
            vertices.push(p.y);
        }

        let mut hole_indices = Vec::with_capacity(self.holes.len());
        for hole in &self.holes {
            hole_indices.push(vertices.len() / 2);
            for p in hole {
                vertices.push(p.x);
                vertices.push(p.y);
            }
        }

        let indices = earcutr::earcut(&vertices, &hole_indices, 2)
            .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

        let points = vertices
            .chunks_exact(2)
            .map(|c| Point2::new(c[0], c[1]))
            .collect();

        Ok(Triangulation { points, indices })
    }
}

/// Triangulated profile result
#[derive(Debug, Clone)]
pub struct Triangulation {
    /// All vertices (outer + holes)
    pub points: Vec<Point2<f64>>,
    /// Triangle indices
    pub indices: Vec<usize>,
}

/// Signed shoelace area, positive for counter-clockwise rings
pub fn signed_area(ring: &[Point2<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[(i + 1) % ring.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Axis-aligned rectangle centered at the origin (counter-clockwise)
#[inline]
pub fn rectangle_ring(width: f64, height: f64) -> Vec<Point2<f64>> {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    vec![
        Point2::new(-half_w, -half_h),
        Point2::new(half_w, -half_h),
        Point2::new(half_w, half_h),
        Point2::new(-half_w, half_h),
    ]
}

/// Circle sampled at `segments` points starting on +X (counter-clockwise)
pub fn circle_ring(radius: f64, segments: usize) -> Vec<Point2<f64>> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let angle = 2.0 * PI * (i as f64) / (segments as f64);
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Create a rectangular profile
#[inline]
pub fn create_rectangle(width: f64, height: f64) -> Profile {
    Profile::new(rectangle_ring(width, height))
}

/// Create a circular profile with an optional concentric hole
pub fn create_circle(radius: f64, hole_radius: Option<f64>, segments: usize) -> Profile {
    let mut profile = Profile::new(circle_ring(radius, segments));

    let inner_radius = hole_radius.filter(|r| *r > 0.0 && *r < radius);
    if let Some(hole_r) = inner_radius {
        let mut hole = circle_ring(hole_r, segments);
        hole.reverse(); // Make clockwise
        profile.add_hole(hole);
    }

    profile.with_meta(ProfileMeta::Circular {
        outer_radius: radius,
        inner_radius,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_profile() {
        let profile = create_rectangle(10.0, 5.0);
        assert_eq!(profile.outer.len(), 4);
        assert_eq!(profile.holes.len(), 0);

        assert_eq!(profile.outer[0], Point2::new(-5.0, -2.5));
        assert_eq!(profile.outer[2], Point2::new(5.0, 2.5));
        assert_relative_eq!(profile.area(), 50.0);
    }

    #[test]
    fn test_circle_profile() {
        let profile = create_circle(5.0, None, 32);
        assert_eq!(profile.outer.len(), 32);
        assert!(profile.holes.is_empty());
        assert_eq!(
            profile.meta,
            ProfileMeta::Circular {
                outer_radius: 5.0,
                inner_radius: None
            }
        );

        let first = profile.outer[0];
        assert_relative_eq!((first.x * first.x + first.y * first.y).sqrt(), 5.0);
    }

    #[test]
    fn test_hollow_circle_winding() {
        let profile = create_circle(10.0, Some(5.0), 24);
        assert_eq!(profile.holes.len(), 1);
        assert!(signed_area(&profile.outer) > 0.0);
        assert!(signed_area(&profile.holes[0]) < 0.0);
    }

    #[test]
    fn test_hole_radius_out_of_range_is_dropped() {
        let profile = create_circle(10.0, Some(12.0), 24);
        assert!(profile.holes.is_empty());
        let profile = create_circle(10.0, Some(0.0), 24);
        assert!(profile.holes.is_empty());
    }

    #[test]
    fn test_triangulate_rectangle() {
        let tri = create_rectangle(10.0, 5.0).triangulate().unwrap();
        assert_eq!(tri.points.len(), 4);
        assert_eq!(tri.indices.len(), 6);
    }

    #[test]
    fn test_triangulate_hollow_circle() {
        let tri = create_circle(10.0, Some(5.0), 16).triangulate().unwrap();
        assert_eq!(tri.points.len(), 32);
        assert!(!tri.indices.is_empty());
    }

    #[test]
    fn test_triangulate_too_few_points() {
        let profile = Profile::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(profile.triangulate().is_err());
    }

    #[test]
    fn test_centered_and_normalized() {
        let mut profile = Profile::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(2.0, 4.0),
            Point2::new(2.0, 0.0),
        ]);
        assert!(signed_area(&profile.outer) < 0.0);
        profile.normalize_winding();
        assert!(signed_area(&profile.outer) > 0.0);

        let centered = profile.centered();
        let b = centered.bounds();
        assert_relative_eq!(b.min.x, -1.0);
        assert_relative_eq!(b.max.y, 2.0);
    }
}
