// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Profile calculator - canonical parameters to 2D cross-sections
//!
//! One closed-form constructor per family, dispatched by an explicit match on
//! [`CanonicalParameters`]. Depth runs along local Y, width along local X.
//! Every constructor is pure: identical parameters give identical vertices,
//! which the geometry cache relies on.
//!
//! Physically inconsistent thicknesses never fail; the section degrades to a
//! solid outline (no hole, no re-entrant corners) and a warning is logged.

use crate::config::GeometryConfig;
use crate::family::ProfileFamily;
use crate::mapper::ParameterMapper;
use crate::params::*;
use crate::profile::{create_circle, create_rectangle, rectangle_ring, Profile};
use nalgebra::Point2;
use stb_lite_core::RawDimensions;

/// Builds 2D profiles from canonical parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileCalculator {
    circle_segments: usize,
}

impl Default for ProfileCalculator {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CIRCLE_SEGMENTS)
    }
}

impl ProfileCalculator {
    /// Create a calculator sampling circles with `circle_segments` points
    pub fn new(circle_segments: usize) -> Self {
        Self {
            circle_segments: circle_segments.max(3),
        }
    }

    pub fn from_config(config: &GeometryConfig) -> Self {
        Self::new(config.circle_segments)
    }

    #[inline]
    pub fn circle_segments(&self) -> usize {
        self.circle_segments
    }

    /// Build the profile for a canonical parameter record
    pub fn calculate(&self, params: &CanonicalParameters) -> Profile {
        let mut profile = match params {
            CanonicalParameters::H(p) => i_shape(p),
            CanonicalParameters::Box(p) => box_shape(p),
            CanonicalParameters::Pipe(p) => pipe(p, self.circle_segments),
            CanonicalParameters::Circle(p) => create_circle(p.diameter / 2.0, None, self.circle_segments),
            CanonicalParameters::Rectangle(p) => create_rectangle(p.width, p.height),
            CanonicalParameters::Channel(p) => channel(p),
            CanonicalParameters::Angle(p) => angle(p),
            CanonicalParameters::Tee(p) => tee(p),
            CanonicalParameters::DoubleAngle(p) => double_angle(p),
            CanonicalParameters::DoubleChannel(p) => double_channel(p),
            CanonicalParameters::CrossH(p) => cross_h(p),
            CanonicalParameters::FlatBar(p) => create_rectangle(p.width, p.thickness),
        };
        profile.normalize_winding();
        profile
    }

    /// Build a profile from a source family code and raw dimensions
    ///
    /// Unknown codes fall back to RECTANGLE.
    pub fn calculate_code(&self, code: &str, raw: &RawDimensions) -> Profile {
        let family = ProfileFamily::from_code(code).unwrap_or_else(|| {
            tracing::warn!(family = %code, "Unsupported profile family, using RECTANGLE");
            ProfileFamily::Rectangle
        });
        self.calculate(&ParameterMapper::normalize(family, raw))
    }
}

fn solid_fallback(family: ProfileFamily, reason: &str) {
    tracing::warn!(family = %family, reason, "Inconsistent section thickness, using solid outline");
}

/// H / I shape, 12 vertices, centered on the origin
pub fn i_shape(p: &IShapeParams) -> Profile {
    let half_width = p.overall_width / 2.0;
    let half_depth = p.overall_depth / 2.0;
    let half_web = p.web_thickness / 2.0;
    let tf = p.flange_thickness;

    if 2.0 * tf >= p.overall_depth || p.web_thickness >= p.overall_width {
        solid_fallback(ProfileFamily::H, "flange or web fills the section");
        return create_rectangle(p.overall_width, p.overall_depth);
    }

    // Counter-clockwise from bottom-left
    Profile::new(vec![
        // Bottom flange
        Point2::new(-half_width, -half_depth),
        Point2::new(half_width, -half_depth),
        Point2::new(half_width, -half_depth + tf),
        // Right side of web
        Point2::new(half_web, -half_depth + tf),
        Point2::new(half_web, half_depth - tf),
        // Top flange
        Point2::new(half_width, half_depth - tf),
        Point2::new(half_width, half_depth),
        Point2::new(-half_width, half_depth),
        Point2::new(-half_width, half_depth - tf),
        // Left side of web
        Point2::new(-half_web, half_depth - tf),
        Point2::new(-half_web, -half_depth + tf),
        Point2::new(-half_width, -half_depth + tf),
    ])
}

/// Rectangular hollow section
pub fn box_shape(p: &BoxParams) -> Profile {
    let profile = create_rectangle(p.overall_width, p.overall_depth);
    let t2 = 2.0 * p.wall_thickness;

    if t2 >= p.overall_width || t2 >= p.overall_depth {
        solid_fallback(ProfileFamily::Box, "wall fills the section");
        return profile;
    }

    let mut hole = rectangle_ring(p.overall_width - t2, p.overall_depth - t2);
    hole.reverse();
    profile.with_hole(hole)
}

/// Circular hollow section
pub fn pipe(p: &PipeParams, segments: usize) -> Profile {
    let inner = p.inner_radius();
    if inner <= 0.0 {
        solid_fallback(ProfileFamily::Pipe, "wall fills the section");
    }
    create_circle(p.outer_radius(), Some(inner), segments)
}

/// Channel, 11 vertices, web on +X so the opening faces -X
///
/// The outer faces carry a midpoint each so the ring keeps a fixed vertex
/// count regardless of proportions.
pub fn channel(p: &ChannelParams) -> Profile {
    let half_depth = p.overall_depth / 2.0;
    let half_width = p.flange_width / 2.0;
    let tf = p.flange_thickness;
    let web_inner = half_width - p.web_thickness;

    if 2.0 * tf >= p.overall_depth || p.web_thickness >= p.flange_width {
        solid_fallback(ProfileFamily::Channel, "flange or web fills the section");
        return create_rectangle(p.flange_width, p.overall_depth);
    }

    Profile::new(vec![
        Point2::new(-half_width, -half_depth),
        Point2::new(0.0, -half_depth),
        Point2::new(half_width, -half_depth),
        Point2::new(half_width, 0.0),
        Point2::new(half_width, half_depth),
        Point2::new(0.0, half_depth),
        Point2::new(-half_width, half_depth),
        Point2::new(-half_width, half_depth - tf),
        Point2::new(web_inner, half_depth - tf),
        Point2::new(web_inner, -half_depth + tf),
        Point2::new(-half_width, -half_depth + tf),
    ])
}

/// Single angle, 6 vertices, origin at the inner re-entrant corner
///
/// The depth leg rises along +Y, the width leg runs along +X. Callers that
/// need a centroidal placement translate with [`Profile::centered`].
pub fn angle(p: &AngleParams) -> Profile {
    let t1 = p.depth_leg_thickness;
    let t2 = p.width_leg_thickness;

    if t1 >= p.width || t2 >= p.depth {
        solid_fallback(ProfileFamily::Angle, "leg thickness exceeds leg length");
        return Profile::new(vec![
            Point2::new(-t1, -t2),
            Point2::new(p.width - t1, -t2),
            Point2::new(p.width - t1, p.depth - t2),
            Point2::new(-t1, p.depth - t2),
        ]);
    }

    Profile::new(vec![
        Point2::new(-t1, -t2),
        Point2::new(p.width - t1, -t2),
        Point2::new(p.width - t1, 0.0),
        Point2::new(0.0, 0.0),
        Point2::new(0.0, p.depth - t2),
        Point2::new(-t1, p.depth - t2),
    ])
}

/// Tee, 8 vertices, flange top face on y = 0, stem down -Y centered on the Y axis
pub fn tee(p: &TeeParams) -> Profile {
    let half_width = p.flange_width / 2.0;
    let half_web = p.web_thickness / 2.0;
    let tf = p.flange_thickness;
    let depth = p.overall_depth;

    if tf >= depth || p.web_thickness >= p.flange_width {
        solid_fallback(ProfileFamily::Tee, "flange or stem fills the section");
        return create_rectangle(p.flange_width, depth).translated(0.0, -depth / 2.0);
    }

    Profile::new(vec![
        Point2::new(-half_web, -depth),
        Point2::new(half_web, -depth),
        Point2::new(half_web, -tf),
        Point2::new(half_width, -tf),
        Point2::new(half_width, 0.0),
        Point2::new(-half_width, 0.0),
        Point2::new(-half_width, -tf),
        Point2::new(-half_web, -tf),
    ])
}

/// Two angles, centered on the bounding box
///
/// Back-to-back: the depth legs form a stem with the width legs as the
/// bottom flange; a gap becomes a slot closed by filler bands at both ends.
/// Face-to-face: the pair closes into a hollow rectangle.
pub fn double_angle(p: &DoubleAngleParams) -> Profile {
    let a = &p.angle;
    let (t1, t2, g) = (a.depth_leg_thickness, a.width_leg_thickness, p.gap);

    let profile = match p.arrangement {
        Arrangement::BackToBack => {
            if t1 >= a.width || t2 >= a.depth {
                solid_fallback(ProfileFamily::DoubleAngleBackToBack, "leg thickness exceeds leg length");
                return create_rectangle(2.0 * a.width + g, a.depth);
            }
            let stem = g / 2.0 + t1;
            let flange = g / 2.0 + a.width;
            let outline = Profile::new(vec![
                Point2::new(-flange, 0.0),
                Point2::new(flange, 0.0),
                Point2::new(flange, t2),
                Point2::new(stem, t2),
                Point2::new(stem, a.depth),
                Point2::new(-stem, a.depth),
                Point2::new(-stem, t2),
                Point2::new(-flange, t2),
            ]);
            if g > 0.0 && a.depth > 2.0 * t2 {
                outline.with_hole(slot(g, t2, a.depth - t2))
            } else {
                outline
            }
        }
        Arrangement::FaceToFace => {
            let width = a.width + g;
            let height = a.depth + g;
            let outline = create_rectangle(width, height);
            if 2.0 * t1 >= width || 2.0 * t2 >= height {
                solid_fallback(ProfileFamily::DoubleAngleFaceToFace, "legs fill the section");
                return outline;
            }
            let mut hole = rectangle_ring(width - 2.0 * t1, height - 2.0 * t2);
            hole.reverse();
            return outline.with_hole(hole);
        }
    };
    profile.centered()
}

/// Two channels, centered on the origin
///
/// Back-to-back: webs together, an I outline with a gap slot through the
/// combined web. Face-to-face: flanges toward each other, a closed box.
pub fn double_channel(p: &DoubleChannelParams) -> Profile {
    let c = &p.channel;
    let g = p.gap;
    let width = 2.0 * c.flange_width + g;

    match p.arrangement {
        Arrangement::BackToBack => {
            let outline = i_shape(&IShapeParams {
                overall_depth: c.overall_depth,
                overall_width: width,
                web_thickness: 2.0 * c.web_thickness + g,
                flange_thickness: c.flange_thickness,
                fillet_radius: c.fillet_radius,
            });
            let inner_half = c.overall_depth / 2.0 - c.flange_thickness;
            if g > 0.0 && outline.outer.len() == 12 {
                outline.with_hole(slot(g, -inner_half, inner_half))
            } else {
                outline
            }
        }
        Arrangement::FaceToFace => {
            let outline = create_rectangle(width, c.overall_depth);
            let inner_w = width - 2.0 * c.web_thickness;
            let inner_h = c.overall_depth - 2.0 * c.flange_thickness;
            if inner_w <= 0.0 || inner_h <= 0.0 {
                solid_fallback(ProfileFamily::DoubleChannelFaceToFace, "webs or flanges fill the section");
                return outline;
            }
            let mut hole = rectangle_ring(inner_w, inner_h);
            hole.reverse();
            outline.with_hole(hole)
        }
    }
}

/// Clockwise slot of width `gap` centered on the Y axis between two levels
fn slot(gap: f64, y_min: f64, y_max: f64) -> Vec<Point2<f64>> {
    let half = gap / 2.0;
    vec![
        Point2::new(-half, y_min),
        Point2::new(-half, y_max),
        Point2::new(half, y_max),
        Point2::new(half, y_min),
    ]
}

/// Cruciform outline of two orthogonal H shapes, 12 vertices
///
/// The primary arm's depth runs along X and the secondary arm's along Y;
/// each arm contributes its depth x width envelope.
pub fn cross_h(p: &CrossHParams) -> Profile {
    let hx1 = p.primary.overall_depth / 2.0;
    let hy1 = p.primary.overall_width / 2.0;
    let hx2 = p.secondary.overall_width / 2.0;
    let hy2 = p.secondary.overall_depth / 2.0;

    if hx2 >= hx1 || hy1 >= hy2 {
        solid_fallback(ProfileFamily::CrossH, "arms do not project past each other");
        return create_rectangle(2.0 * hx1.max(hx2), 2.0 * hy1.max(hy2));
    }

    Profile::new(vec![
        Point2::new(hx1, -hy1),
        Point2::new(hx1, hy1),
        Point2::new(hx2, hy1),
        Point2::new(hx2, hy2),
        Point2::new(-hx2, hy2),
        Point2::new(-hx2, hy1),
        Point2::new(-hx1, hy1),
        Point2::new(-hx1, -hy1),
        Point2::new(-hx2, -hy1),
        Point2::new(-hx2, -hy2),
        Point2::new(hx2, -hy2),
        Point2::new(hx2, -hy1),
    ])
}
