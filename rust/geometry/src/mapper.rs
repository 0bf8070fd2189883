// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter mapper - raw dimension names to canonical parameters
//!
//! Section dimensions arrive as camelCase (`overallDepth`), snake_case
//! (`overall_depth`) or structural short codes (`A`, `B`, `t1`, `t2`). Each
//! canonical field has an ordered alias list; the first alias holding a
//! usable value wins, otherwise the documented default applies.
//!
//! A value is usable when it is finite and positive. Fillet radii and
//! built-up gaps also accept zero.
//!
//! | Family  | Field              | Aliases (in order)                                        | Default |
//! |---------|--------------------|-----------------------------------------------------------|---------|
//! | H       | overall depth      | overallDepth, overall_depth, A, height, depth, H          | 450     |
//! | H       | overall width      | overallWidth, overall_width, B, width                     | 200     |
//! | H       | web thickness      | webThickness, web_thickness, t1, tw                       | 9       |
//! | H       | flange thickness   | flangeThickness, flange_thickness, t2, tf                 | 14      |
//! | H       | fillet radius      | filletRadius, fillet_radius, r                            | 18      |
//! | BOX     | wall thickness     | wallThickness, wall_thickness, t, thickness               | 12      |
//! | PIPE    | outer diameter     | outerDiameter, outer_diameter, D, diameter (or 2×radius)  | 216.3   |
//! | RECT    | width / height     | width, width_X, B, ... / height, depth, width_Y, A, ...   | 600     |
//!
//! The remaining families follow the same pattern; see the constants in
//! [`aliases`] and [`defaults`].

use crate::family::ProfileFamily;
use crate::params::*;
use stb_lite_core::RawDimensions;

/// Ordered alias lists, shared with family inference
pub mod aliases {
    pub const OVERALL_DEPTH: &[&str] = &["overallDepth", "overall_depth", "A", "height", "depth", "H"];
    pub const OVERALL_WIDTH: &[&str] = &["overallWidth", "overall_width", "B", "width"];
    pub const WEB_THICKNESS: &[&str] = &["webThickness", "web_thickness", "t1", "tw"];
    pub const FLANGE_THICKNESS: &[&str] = &["flangeThickness", "flange_thickness", "t2", "tf"];
    pub const FILLET_RADIUS: &[&str] = &["filletRadius", "fillet_radius", "r"];
    pub const WALL_THICKNESS: &[&str] = &["wallThickness", "wall_thickness", "t", "thickness"];
    pub const OUTER_FILLET_RADIUS: &[&str] =
        &["outerFilletRadius", "outer_fillet_radius", "cornerRadius", "corner_radius", "r"];
    pub const OUTER_DIAMETER: &[&str] = &["outerDiameter", "outer_diameter", "D", "diameter"];
    pub const OUTER_RADIUS: &[&str] = &["outerRadius", "outer_radius", "radius", "R"];
    pub const CIRCLE_DIAMETER: &[&str] = &["diameter", "D", "outerDiameter", "outer_diameter"];
    pub const CIRCLE_RADIUS: &[&str] = &["radius", "R", "outerRadius", "outer_radius"];
    pub const RECT_WIDTH: &[&str] = &["width", "width_X", "widthX", "B", "xDim", "X"];
    pub const RECT_HEIGHT: &[&str] = &["height", "depth", "width_Y", "widthY", "A", "yDim", "Y"];
    pub const FLANGE_WIDTH: &[&str] = &["flangeWidth", "flange_width", "B", "width"];
    pub const LEG_DEPTH: &[&str] = &["depth", "legDepth", "leg_depth", "A", "height"];
    pub const LEG_WIDTH: &[&str] = &["width", "legWidth", "leg_width", "B"];
    pub const LEG_THICKNESS: &[&str] = &["thickness", "legThickness", "leg_thickness", "t1", "t"];
    pub const SECOND_LEG_THICKNESS: &[&str] = &["secondLegThickness", "second_leg_thickness", "t2"];
    pub const GAP: &[&str] = &["gap", "spacing", "clearance", "s"];
    pub const FLAT_BAR_WIDTH: &[&str] = &["width", "B", "A"];
    pub const FLAT_BAR_THICKNESS: &[&str] = &["thickness", "t"];
    pub const PRIMARY_DEPTH: &[&str] = &["A1", "overallDepth1", "overall_depth_1", "depth1"];
    pub const PRIMARY_WIDTH: &[&str] = &["B1", "overallWidth1", "overall_width_1", "width1"];
    pub const PRIMARY_WEB: &[&str] = &["t1_1", "webThickness1", "web_thickness_1"];
    pub const PRIMARY_FLANGE: &[&str] = &["t2_1", "flangeThickness1", "flange_thickness_1"];
    pub const SECONDARY_DEPTH: &[&str] = &["A2", "overallDepth2", "overall_depth_2", "depth2"];
    pub const SECONDARY_WIDTH: &[&str] = &["B2", "overallWidth2", "overall_width_2", "width2"];
    pub const SECONDARY_WEB: &[&str] = &["t1_2", "webThickness2", "web_thickness_2"];
    pub const SECONDARY_FLANGE: &[&str] = &["t2_2", "flangeThickness2", "flange_thickness_2"];
}

/// Defaults applied when no alias matches (millimeters)
pub mod defaults {
    pub const H_DEPTH: f64 = 450.0;
    pub const H_WIDTH: f64 = 200.0;
    pub const H_WEB: f64 = 9.0;
    pub const H_FLANGE: f64 = 14.0;
    pub const H_FILLET: f64 = 18.0;
    pub const BOX_SIZE: f64 = 300.0;
    pub const BOX_WALL: f64 = 12.0;
    pub const PIPE_DIAMETER: f64 = 216.3;
    pub const PIPE_WALL: f64 = 8.2;
    pub const CIRCLE_DIAMETER: f64 = 600.0;
    pub const RECT_SIZE: f64 = 600.0;
    pub const CHANNEL_DEPTH: f64 = 200.0;
    pub const CHANNEL_WIDTH: f64 = 80.0;
    pub const CHANNEL_WEB: f64 = 7.5;
    pub const CHANNEL_FLANGE: f64 = 11.0;
    pub const CHANNEL_FILLET: f64 = 12.0;
    pub const ANGLE_LEG: f64 = 100.0;
    pub const ANGLE_THICKNESS: f64 = 10.0;
    pub const TEE_DEPTH: f64 = 200.0;
    pub const TEE_WIDTH: f64 = 200.0;
    pub const TEE_WEB: f64 = 8.0;
    pub const TEE_FLANGE: f64 = 12.0;
    pub const FLAT_BAR_WIDTH: f64 = 100.0;
    pub const FLAT_BAR_THICKNESS: f64 = 9.0;
}

/// Normalizes raw section dimensions into canonical parameter records
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterMapper;

impl ParameterMapper {
    /// Normalize `raw` for `family`
    ///
    /// Never fails: every field falls back to its documented default.
    pub fn normalize(family: ProfileFamily, raw: &RawDimensions) -> CanonicalParameters {
        let f = Fields(raw);
        match family {
            ProfileFamily::H => CanonicalParameters::H(f.i_shape()),
            ProfileFamily::Box => CanonicalParameters::Box(BoxParams {
                overall_depth: f.length(aliases::OVERALL_DEPTH, defaults::BOX_SIZE),
                overall_width: f.length(aliases::OVERALL_WIDTH, defaults::BOX_SIZE),
                wall_thickness: f.length(aliases::WALL_THICKNESS, defaults::BOX_WALL),
                outer_fillet_radius: f.radius(aliases::OUTER_FILLET_RADIUS, 0.0),
            }),
            ProfileFamily::Pipe => CanonicalParameters::Pipe(PipeParams {
                outer_diameter: f.diameter(
                    aliases::OUTER_DIAMETER,
                    aliases::OUTER_RADIUS,
                    defaults::PIPE_DIAMETER,
                ),
                wall_thickness: f.length(aliases::WALL_THICKNESS, defaults::PIPE_WALL),
            }),
            ProfileFamily::Circle => CanonicalParameters::Circle(CircleParams {
                diameter: f.diameter(
                    aliases::CIRCLE_DIAMETER,
                    aliases::CIRCLE_RADIUS,
                    defaults::CIRCLE_DIAMETER,
                ),
            }),
            ProfileFamily::Rectangle => CanonicalParameters::Rectangle(RectangleParams {
                width: f.length(aliases::RECT_WIDTH, defaults::RECT_SIZE),
                height: f.length(aliases::RECT_HEIGHT, defaults::RECT_SIZE),
            }),
            ProfileFamily::Channel => CanonicalParameters::Channel(f.channel()),
            ProfileFamily::Angle => CanonicalParameters::Angle(f.angle()),
            ProfileFamily::Tee => CanonicalParameters::Tee(TeeParams {
                overall_depth: f.length(aliases::OVERALL_DEPTH, defaults::TEE_DEPTH),
                flange_width: f.length(aliases::FLANGE_WIDTH, defaults::TEE_WIDTH),
                web_thickness: f.length(aliases::WEB_THICKNESS, defaults::TEE_WEB),
                flange_thickness: f.length(aliases::FLANGE_THICKNESS, defaults::TEE_FLANGE),
            }),
            ProfileFamily::DoubleAngleBackToBack | ProfileFamily::DoubleAngleFaceToFace => {
                CanonicalParameters::DoubleAngle(DoubleAngleParams {
                    angle: f.angle(),
                    arrangement: arrangement_of(family),
                    gap: f.radius(aliases::GAP, 0.0),
                })
            }
            ProfileFamily::DoubleChannelBackToBack | ProfileFamily::DoubleChannelFaceToFace => {
                CanonicalParameters::DoubleChannel(DoubleChannelParams {
                    channel: f.channel(),
                    arrangement: arrangement_of(family),
                    gap: f.radius(aliases::GAP, 0.0),
                })
            }
            ProfileFamily::CrossH => {
                // Unsuffixed H fields describe both arms unless an arm overrides them
                let base = f.i_shape();
                let primary = IShapeParams {
                    overall_depth: f.length(aliases::PRIMARY_DEPTH, base.overall_depth),
                    overall_width: f.length(aliases::PRIMARY_WIDTH, base.overall_width),
                    web_thickness: f.length(aliases::PRIMARY_WEB, base.web_thickness),
                    flange_thickness: f.length(aliases::PRIMARY_FLANGE, base.flange_thickness),
                    fillet_radius: base.fillet_radius,
                };
                let secondary = IShapeParams {
                    overall_depth: f.length(aliases::SECONDARY_DEPTH, primary.overall_depth),
                    overall_width: f.length(aliases::SECONDARY_WIDTH, primary.overall_width),
                    web_thickness: f.length(aliases::SECONDARY_WEB, primary.web_thickness),
                    flange_thickness: f.length(aliases::SECONDARY_FLANGE, primary.flange_thickness),
                    fillet_radius: base.fillet_radius,
                };
                CanonicalParameters::CrossH(CrossHParams { primary, secondary })
            }
            ProfileFamily::FlatBar => CanonicalParameters::FlatBar(FlatBarParams {
                width: f.length(aliases::FLAT_BAR_WIDTH, defaults::FLAT_BAR_WIDTH),
                thickness: f.length(aliases::FLAT_BAR_THICKNESS, defaults::FLAT_BAR_THICKNESS),
            }),
        }
    }
}

fn arrangement_of(family: ProfileFamily) -> Arrangement {
    match family {
        ProfileFamily::DoubleAngleFaceToFace | ProfileFamily::DoubleChannelFaceToFace => {
            Arrangement::FaceToFace
        }
        _ => Arrangement::BackToBack,
    }
}

/// Alias-table accessor over one raw dimension map
struct Fields<'a>(&'a RawDimensions);

impl Fields<'_> {
    /// First alias with a finite, positive value
    fn pick(&self, aliases: &[&str], allow_zero: bool) -> Option<f64> {
        aliases.iter().find_map(|alias| {
            let value = self.0.get(alias)?;
            let usable = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
            if !usable {
                tracing::debug!(key = %alias, value, "Skipping unusable dimension value");
            }
            usable.then_some(value)
        })
    }

    fn length(&self, aliases: &[&str], default: f64) -> f64 {
        self.pick(aliases, false).unwrap_or(default)
    }

    fn radius(&self, aliases: &[&str], default: f64) -> f64 {
        self.pick(aliases, true).unwrap_or(default)
    }

    /// Diameter from diameter aliases, else twice a radius alias
    fn diameter(&self, diameter: &[&str], radius: &[&str], default: f64) -> f64 {
        self.pick(diameter, false)
            .or_else(|| self.pick(radius, false).map(|r| r * 2.0))
            .unwrap_or(default)
    }

    fn i_shape(&self) -> IShapeParams {
        IShapeParams {
            overall_depth: self.length(aliases::OVERALL_DEPTH, defaults::H_DEPTH),
            overall_width: self.length(aliases::OVERALL_WIDTH, defaults::H_WIDTH),
            web_thickness: self.length(aliases::WEB_THICKNESS, defaults::H_WEB),
            flange_thickness: self.length(aliases::FLANGE_THICKNESS, defaults::H_FLANGE),
            fillet_radius: self.radius(aliases::FILLET_RADIUS, defaults::H_FILLET),
        }
    }

    fn channel(&self) -> ChannelParams {
        ChannelParams {
            overall_depth: self.length(aliases::OVERALL_DEPTH, defaults::CHANNEL_DEPTH),
            flange_width: self.length(aliases::FLANGE_WIDTH, defaults::CHANNEL_WIDTH),
            web_thickness: self.length(aliases::WEB_THICKNESS, defaults::CHANNEL_WEB),
            flange_thickness: self.length(aliases::FLANGE_THICKNESS, defaults::CHANNEL_FLANGE),
            fillet_radius: self.radius(aliases::FILLET_RADIUS, defaults::CHANNEL_FILLET),
        }
    }

    fn angle(&self) -> AngleParams {
        let thickness = self.length(aliases::LEG_THICKNESS, defaults::ANGLE_THICKNESS);
        AngleParams {
            depth: self.length(aliases::LEG_DEPTH, defaults::ANGLE_LEG),
            width: self.length(aliases::LEG_WIDTH, defaults::ANGLE_LEG),
            depth_leg_thickness: thickness,
            // Equal-thickness legs unless a second thickness is given
            width_leg_thickness: self.length(aliases::SECOND_LEG_THICKNESS, thickness),
        }
    }
}
