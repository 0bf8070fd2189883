// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tapered geometry - lofting a solid through cross-section stations
//!
//! Stations are ordered from the member start to its end and positioned by
//! their axial distance from the start. The solid lives in the same local
//! frame as [`crate::extrusion::extrude_centered`]: z runs from -L/2 at the
//! start to +L/2 at the end, so a [`crate::placement::Placement`] positions
//! lofted and straight members alike.

use crate::config::DEFAULT_LENGTH_TOLERANCE;
use crate::error::{Error, Result};
use crate::extrusion::{add_cap, add_side_walls, extrude_centered};
use crate::mesh::Mesh;
use crate::profile::{create_circle, Profile};
use nalgebra::Point2;
use smallvec::SmallVec;
use std::f64::consts::FRAC_PI_2;

/// Named location of a station along the member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationPosition {
    Top,
    Center,
    Bottom,
    Named(String),
}

/// Cross-section at an axial position
#[derive(Debug, Clone, PartialEq)]
pub struct TaperStation {
    pub position: StationPosition,
    /// Distance from the member start along its axis (mm)
    pub offset: f64,
    pub profile: Profile,
}

impl TaperStation {
    pub fn new(position: StationPosition, offset: f64, profile: Profile) -> Self {
        Self {
            position,
            offset,
            profile,
        }
    }

    fn named(name: &str, offset: f64, profile: Profile) -> Self {
        Self::new(StationPosition::Named(name.to_string()), offset, profile)
    }
}

/// Station sequence; enlarged-end piles need at most five
pub type Stations = SmallVec<[TaperStation; 5]>;

/// Loft a watertight solid through `stations` over `total_length`
///
/// Missing end stations are filled by repeating the first/last profile. A
/// single station (or stations that all share one profile) is a straight
/// extrusion. Two stations at the same offset form a hard step. Rings with
/// different vertex counts are resampled by arc length; holes are kept only
/// when every station has the same number of them.
pub fn loft(stations: &[TaperStation], total_length: f64) -> Result<Mesh> {
    if !total_length.is_finite() || total_length <= DEFAULT_LENGTH_TOLERANCE {
        return Err(Error::InvalidExtrusion(format!(
            "Loft length must be positive, got {}",
            total_length
        )));
    }
    let first = stations
        .first()
        .ok_or_else(|| Error::InvalidProfile("Loft needs at least one station".to_string()))?;

    if stations.iter().all(|s| s.profile == first.profile) {
        return extrude_centered(&first.profile, total_length);
    }

    let mut previous = 0.0;
    for station in stations {
        if !station.offset.is_finite()
            || station.offset < -DEFAULT_LENGTH_TOLERANCE
            || station.offset > total_length + DEFAULT_LENGTH_TOLERANCE
        {
            return Err(Error::InvalidExtrusion(format!(
                "Station {:?} at {} lies outside 0..{}",
                station.position, station.offset, total_length
            )));
        }
        if station.offset < previous - DEFAULT_LENGTH_TOLERANCE {
            return Err(Error::InvalidExtrusion(format!(
                "Station {:?} at {} is out of order",
                station.position, station.offset
            )));
        }
        previous = station.offset;
        if station.profile.outer.len() < 3 {
            return Err(Error::InvalidProfile(format!(
                "Station {:?} has fewer than 3 vertices",
                station.position
            )));
        }
    }

    let half = total_length / 2.0;
    let mut levels: Vec<(f64, &Profile)> = Vec::with_capacity(stations.len() + 2);
    if first.offset > DEFAULT_LENGTH_TOLERANCE {
        levels.push((0.0, &first.profile));
    }
    levels.extend(stations.iter().map(|s| (s.offset.clamp(0.0, total_length), &s.profile)));
    if let Some(last) = stations.last() {
        if last.offset < total_length - DEFAULT_LENGTH_TOLERANCE {
            levels.push((total_length, &last.profile));
        }
    }

    let rings = matched_rings(&levels);

    let vertex_estimate: usize = rings.iter().map(|r| r.vertex_count() * 4).sum();
    let mut mesh = Mesh::with_capacity(vertex_estimate, vertex_estimate * 2);

    for (pair, window) in levels.windows(2).zip(rings.windows(2)) {
        let (z0, z1) = (pair[0].0 - half, pair[1].0 - half);
        let (lower, upper) = (&window[0], &window[1]);
        add_side_walls(&lower.outer, &upper.outer, z0, z1, &mut mesh);
        for (a, b) in lower.holes.iter().zip(&upper.holes) {
            add_side_walls(a, b, z0, z1, &mut mesh);
        }
    }

    // `levels` always has at least two entries once the straight case is out
    if let (Some(bottom), Some(top)) = (rings.first(), rings.last()) {
        add_cap(&bottom.triangulate()?, -half, false, &mut mesh);
        add_cap(&top.triangulate()?, half, true, &mut mesh);
    }

    Ok(mesh)
}

/// Station profiles with compatible ring counts and vertex counts
fn matched_rings(levels: &[(f64, &Profile)]) -> Vec<Profile> {
    let hole_count = levels.first().map(|(_, p)| p.holes.len()).unwrap_or(0);
    let keep_holes = levels.iter().all(|(_, p)| p.holes.len() == hole_count);
    if !keep_holes {
        tracing::warn!(
            stations = levels.len(),
            "Stations disagree on hole count, lofting outer boundary only"
        );
    }

    let outer_count = levels.iter().map(|(_, p)| p.outer.len()).max().unwrap_or(0);
    let hole_counts: Vec<usize> = if keep_holes {
        (0..hole_count)
            .map(|i| levels.iter().map(|(_, p)| p.holes[i].len()).max().unwrap_or(0))
            .collect()
    } else {
        Vec::new()
    };

    levels
        .iter()
        .map(|(_, profile)| {
            let mut ring = Profile::new(resample(&profile.outer, outer_count)).with_meta(profile.meta);
            for (hole, &count) in profile.holes.iter().zip(&hole_counts) {
                ring.add_hole(resample(hole, count));
            }
            ring.normalize_winding();
            ring
        })
        .collect()
}

/// Resample a closed ring to `count` points spaced evenly by arc length,
/// starting at the ring's first vertex
pub fn resample(ring: &[Point2<f64>], count: usize) -> Vec<Point2<f64>> {
    if ring.len() == count || ring.len() < 2 || count < 3 {
        return ring.to_vec();
    }

    let n = ring.len();
    let edge_lengths: Vec<f64> = (0..n)
        .map(|i| (ring[(i + 1) % n] - ring[i]).norm())
        .collect();
    let perimeter: f64 = edge_lengths.iter().sum();
    if perimeter <= 0.0 {
        return vec![ring[0]; count];
    }

    let step = perimeter / count as f64;
    let mut out = Vec::with_capacity(count);
    let mut edge = 0;
    let mut walked = 0.0;
    for k in 0..count {
        let target = step * k as f64;
        while edge < n - 1 && walked + edge_lengths[edge] < target {
            walked += edge_lengths[edge];
            edge += 1;
        }
        let t = if edge_lengths[edge] > 0.0 {
            ((target - walked) / edge_lengths[edge]).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let a = ring[edge];
        let b = ring[(edge + 1) % n];
        out.push(a + (b - a) * t);
    }
    out
}

/// Enlarged end of a pile (foot or top)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnlargedEnd {
    pub radius: f64,
    /// Length of the straight enlarged part, measured from the pile end
    pub length: f64,
    /// Taper angle from the pile axis in radians; `None` is a vertical step
    pub angle: Option<f64>,
}

impl EnlargedEnd {
    /// Axial length of the transition back to the shaft radius
    pub fn taper_length(&self, shaft_radius: f64) -> f64 {
        match self.angle {
            Some(angle) if angle > 0.0 && angle < FRAC_PI_2 => {
                (self.radius - shaft_radius) / angle.tan()
            }
            _ => 0.0,
        }
    }
}

/// Stations of a circular pile with an enlarged foot and/or top
///
/// Offsets run from the pile bottom (foot) upward. `inner_radius` keeps a
/// constant hollow core through every station. The last station stops at
/// the top transition; [`loft`] extends it to the pile head.
///
/// Fails with `InvalidProfile` when the radii do not describe an enlargement
/// and with `InvalidExtrusion` when the enlarged parts overlap.
pub fn enlarged_pile_stations(
    shaft_radius: f64,
    inner_radius: Option<f64>,
    foot: Option<EnlargedEnd>,
    top: Option<EnlargedEnd>,
    total_length: f64,
    segments: usize,
) -> Result<Stations> {
    if !(shaft_radius.is_finite() && shaft_radius > 0.0) {
        return Err(Error::InvalidProfile(format!(
            "Pile shaft radius must be positive, got {}",
            shaft_radius
        )));
    }
    for end in foot.iter().chain(top.iter()) {
        if !(end.radius.is_finite() && end.radius > shaft_radius) {
            return Err(Error::InvalidProfile(format!(
                "Enlarged radius {} does not exceed shaft radius {}",
                end.radius, shaft_radius
            )));
        }
        if !(end.length.is_finite() && end.length >= 0.0) {
            return Err(Error::InvalidProfile(format!(
                "Enlarged length must be non-negative, got {}",
                end.length
            )));
        }
    }

    let circle = |r: f64| create_circle(r, inner_radius, segments);
    let mut stations = Stations::new();
    let mut cursor = 0.0;

    if let Some(f) = foot {
        let enlarged = circle(f.radius);
        stations.push(TaperStation::new(StationPosition::Bottom, 0.0, enlarged.clone()));
        stations.push(TaperStation::named("foot_enlarged_end", f.length, enlarged));
        cursor = f.length + f.taper_length(shaft_radius);
        stations.push(TaperStation::named("foot_taper_end", cursor, circle(shaft_radius)));
    }

    if let Some(t) = top {
        let enlarged_start = total_length - t.length;
        let taper_start = enlarged_start - t.taper_length(shaft_radius);
        if taper_start < cursor - DEFAULT_LENGTH_TOLERANCE {
            return Err(Error::InvalidExtrusion(format!(
                "Enlarged ends overlap: shaft ends at {} but top taper starts at {}",
                cursor, taper_start
            )));
        }
        if stations.is_empty() {
            stations.push(TaperStation::new(StationPosition::Bottom, 0.0, circle(shaft_radius)));
        }
        stations.push(TaperStation::named("top_taper_start", taper_start, circle(shaft_radius)));
        stations.push(TaperStation::named("top_enlarged_start", enlarged_start, circle(t.radius)));
    } else if cursor > total_length + DEFAULT_LENGTH_TOLERANCE {
        return Err(Error::InvalidExtrusion(format!(
            "Enlarged foot ({} mm) exceeds pile length {}",
            cursor, total_length
        )));
    }

    Ok(stations)
}
