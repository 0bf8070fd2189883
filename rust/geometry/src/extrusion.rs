// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D profiles to 3D meshes

use crate::error::{Error, Result};
use crate::mesh::{apply_transform, Mesh};
use crate::profile::{Profile, Triangulation};
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Extrude a 2D profile along the Z axis, from z = 0 to z = depth
#[inline]
pub fn extrude_profile(
    profile: &Profile,
    depth: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    let mut mesh = extrude_between(profile, 0.0, depth)?;

    if let Some(mat) = transform {
        apply_transform(&mut mesh, &mat);
    }

    Ok(mesh)
}

/// Extrude a profile symmetrically about the origin, z in [-length/2, length/2]
///
/// This is the local frame of a [`crate::placement::Placement`].
#[inline]
pub fn extrude_centered(profile: &Profile, length: f64) -> Result<Mesh> {
    extrude_between(profile, -length / 2.0, length / 2.0)
}

/// Extrude a profile between two axial levels
pub fn extrude_between(profile: &Profile, z_start: f64, z_end: f64) -> Result<Mesh> {
    let depth = z_end - z_start;
    if !depth.is_finite() || depth <= 0.0 {
        return Err(Error::InvalidExtrusion(format!(
            "Depth must be positive, got {}",
            depth
        )));
    }

    let triangulation = profile.triangulate()?;

    let side_vertex_count = profile.vertex_count() * 4;
    let mut mesh = Mesh::with_capacity(
        triangulation.points.len() * 2 + side_vertex_count,
        triangulation.indices.len() * 2 + profile.vertex_count() * 6,
    );

    add_cap(&triangulation, z_start, false, &mut mesh);
    add_cap(&triangulation, z_end, true, &mut mesh);

    add_side_walls(&profile.outer, &profile.outer, z_start, z_end, &mut mesh);
    for hole in &profile.holes {
        add_side_walls(hole, hole, z_start, z_end, &mut mesh);
    }

    Ok(mesh)
}

/// Add a planar cap at `z`, facing +Z when `facing_up`, else -Z
pub(crate) fn add_cap(triangulation: &Triangulation, z: f64, facing_up: bool, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let normal = if facing_up { Vector3::z() } else { -Vector3::z() };

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, point.y, z), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        // earcut does not promise an orientation, so orient each triangle
        let ccw = triangle_area(
            &triangulation.points[a],
            &triangulation.points[b],
            &triangulation.points[c],
        ) > 0.0;
        let (i0, i1, i2) = (base_index + a as u32, base_index + b as u32, base_index + c as u32);
        if ccw == facing_up {
            mesh.add_triangle(i0, i1, i2);
        } else {
            mesh.add_triangle(i0, i2, i1);
        }
    }
}

/// Add the quad strip joining `lower` at `z0` to `upper` at `z1`
///
/// Both rings must have the same vertex count. Counter-clockwise rings
/// produce outward faces; clockwise (hole) rings face into the hole.
pub(crate) fn add_side_walls(
    lower: &[Point2<f64>],
    upper: &[Point2<f64>],
    z0: f64,
    z1: f64,
    mesh: &mut Mesh,
) {
    debug_assert_eq!(lower.len(), upper.len());
    let n = lower.len().min(upper.len());

    for i in 0..n {
        let j = (i + 1) % n;

        let v0_bottom = Point3::new(lower[i].x, lower[i].y, z0);
        let v1_bottom = Point3::new(lower[j].x, lower[j].y, z0);
        let v1_top = Point3::new(upper[j].x, upper[j].y, z1);
        let v0_top = Point3::new(upper[i].x, upper[i].y, z1);

        // Face normal from the quad diagonals handles tapered walls too
        let normal = match (v1_top - v0_bottom)
            .cross(&(v0_top - v1_bottom))
            .try_normalize(1e-10)
        {
            Some(n) => n,
            None => continue, // Skip degenerate edge (duplicate points in ring)
        };

        let idx = mesh.vertex_count() as u32;
        mesh.add_vertex(v0_bottom, normal);
        mesh.add_vertex(v1_bottom, normal);
        mesh.add_vertex(v1_top, normal);
        mesh.add_vertex(v0_top, normal);

        mesh.add_triangle(idx, idx + 1, idx + 2);
        mesh.add_triangle(idx, idx + 2, idx + 3);
    }
}

#[inline]
fn triangle_area(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) / 2.0
}
