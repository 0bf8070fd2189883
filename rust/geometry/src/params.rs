// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical per-family profile parameters
//!
//! Every length is in millimeters. Records are produced by
//! [`crate::mapper::ParameterMapper`] and are complete: no optional fields,
//! every value finite and positive (fillet radii and gaps may be zero).

use crate::family::ProfileFamily;

/// H / I shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IShapeParams {
    pub overall_depth: f64,
    pub overall_width: f64,
    pub web_thickness: f64,
    pub flange_thickness: f64,
    pub fillet_radius: f64,
}

/// Rectangular hollow section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxParams {
    /// Extent along local Y
    pub overall_depth: f64,
    /// Extent along local X
    pub overall_width: f64,
    pub wall_thickness: f64,
    pub outer_fillet_radius: f64,
}

/// Circular hollow section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeParams {
    pub outer_diameter: f64,
    pub wall_thickness: f64,
}

impl PipeParams {
    #[inline]
    pub fn outer_radius(&self) -> f64 {
        self.outer_diameter / 2.0
    }

    /// Inner radius, zero or negative when the wall fills the section
    #[inline]
    pub fn inner_radius(&self) -> f64 {
        self.outer_radius() - self.wall_thickness
    }
}

/// Solid circle (round bar, RC circular column, pile shaft)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleParams {
    pub diameter: f64,
}

/// Solid rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleParams {
    /// Extent along local X
    pub width: f64,
    /// Extent along local Y
    pub height: f64,
}

/// Channel (C / U)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelParams {
    pub overall_depth: f64,
    pub flange_width: f64,
    pub web_thickness: f64,
    pub flange_thickness: f64,
    pub fillet_radius: f64,
}

/// Single angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleParams {
    /// Vertical leg length
    pub depth: f64,
    /// Horizontal leg length
    pub width: f64,
    /// Vertical leg thickness
    pub depth_leg_thickness: f64,
    /// Horizontal leg thickness
    pub width_leg_thickness: f64,
}

/// Tee
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeeParams {
    pub overall_depth: f64,
    pub flange_width: f64,
    pub web_thickness: f64,
    pub flange_thickness: f64,
}

/// Placement of the two halves of a built-up section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrangement {
    BackToBack,
    FaceToFace,
}

/// Two angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleAngleParams {
    pub angle: AngleParams,
    pub arrangement: Arrangement,
    pub gap: f64,
}

/// Two channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleChannelParams {
    pub channel: ChannelParams,
    pub arrangement: Arrangement,
    pub gap: f64,
}

/// Two orthogonal H shapes forming a cruciform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossHParams {
    /// Arm whose depth runs along local X
    pub primary: IShapeParams,
    /// Arm whose depth runs along local Y
    pub secondary: IShapeParams,
}

/// Flat bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatBarParams {
    pub width: f64,
    pub thickness: f64,
}

/// One canonical parameter record per profile family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanonicalParameters {
    H(IShapeParams),
    Box(BoxParams),
    Pipe(PipeParams),
    Circle(CircleParams),
    Rectangle(RectangleParams),
    Channel(ChannelParams),
    Angle(AngleParams),
    Tee(TeeParams),
    DoubleAngle(DoubleAngleParams),
    DoubleChannel(DoubleChannelParams),
    CrossH(CrossHParams),
    FlatBar(FlatBarParams),
}

impl CanonicalParameters {
    /// Family this record belongs to
    pub fn family(&self) -> ProfileFamily {
        match self {
            Self::H(_) => ProfileFamily::H,
            Self::Box(_) => ProfileFamily::Box,
            Self::Pipe(_) => ProfileFamily::Pipe,
            Self::Circle(_) => ProfileFamily::Circle,
            Self::Rectangle(_) => ProfileFamily::Rectangle,
            Self::Channel(_) => ProfileFamily::Channel,
            Self::Angle(_) => ProfileFamily::Angle,
            Self::Tee(_) => ProfileFamily::Tee,
            Self::DoubleAngle(p) => match p.arrangement {
                Arrangement::BackToBack => ProfileFamily::DoubleAngleBackToBack,
                Arrangement::FaceToFace => ProfileFamily::DoubleAngleFaceToFace,
            },
            Self::DoubleChannel(p) => match p.arrangement {
                Arrangement::BackToBack => ProfileFamily::DoubleChannelBackToBack,
                Arrangement::FaceToFace => ProfileFamily::DoubleChannelFaceToFace,
            },
            Self::CrossH(_) => ProfileFamily::CrossH,
            Self::FlatBar(_) => ProfileFamily::FlatBar,
        }
    }

    /// Named values, used for cache signatures and diagnostics
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        match self {
            Self::H(p) => i_shape_entries(p, ""),
            Self::Box(p) => vec![
                ("overallDepth", p.overall_depth),
                ("overallWidth", p.overall_width),
                ("wallThickness", p.wall_thickness),
                ("outerFilletRadius", p.outer_fillet_radius),
            ],
            Self::Pipe(p) => vec![
                ("outerDiameter", p.outer_diameter),
                ("wallThickness", p.wall_thickness),
            ],
            Self::Circle(p) => vec![("diameter", p.diameter)],
            Self::Rectangle(p) => vec![("width", p.width), ("height", p.height)],
            Self::Channel(p) => channel_entries(p),
            Self::Angle(p) => angle_entries(p),
            Self::Tee(p) => vec![
                ("overallDepth", p.overall_depth),
                ("flangeWidth", p.flange_width),
                ("webThickness", p.web_thickness),
                ("flangeThickness", p.flange_thickness),
            ],
            Self::DoubleAngle(p) => {
                let mut entries = angle_entries(&p.angle);
                entries.push(("gap", p.gap));
                entries
            }
            Self::DoubleChannel(p) => {
                let mut entries = channel_entries(&p.channel);
                entries.push(("gap", p.gap));
                entries
            }
            Self::CrossH(p) => {
                let mut entries = i_shape_entries(&p.primary, "primary");
                entries.extend(i_shape_entries(&p.secondary, "secondary"));
                entries
            }
            Self::FlatBar(p) => vec![("width", p.width), ("thickness", p.thickness)],
        }
    }

    /// Overall height of the section along local Y
    ///
    /// Used by top-aligned placement of horizontal members.
    pub fn section_height(&self) -> f64 {
        match self {
            Self::H(p) => p.overall_depth,
            Self::Box(p) => p.overall_depth,
            Self::Pipe(p) => p.outer_diameter,
            Self::Circle(p) => p.diameter,
            Self::Rectangle(p) => p.height,
            Self::Channel(p) => p.overall_depth,
            Self::Angle(p) => p.depth,
            Self::Tee(p) => p.overall_depth,
            Self::DoubleAngle(p) => match p.arrangement {
                Arrangement::BackToBack => p.angle.depth,
                Arrangement::FaceToFace => p.angle.depth + p.gap,
            },
            Self::DoubleChannel(p) => p.channel.overall_depth,
            Self::CrossH(p) => p.primary.overall_width.max(p.secondary.overall_depth),
            Self::FlatBar(p) => p.thickness,
        }
    }
}

fn i_shape_entries(p: &IShapeParams, arm: &'static str) -> Vec<(&'static str, f64)> {
    let names: [&'static str; 5] = match arm {
        "primary" => [
            "primaryOverallDepth",
            "primaryOverallWidth",
            "primaryWebThickness",
            "primaryFlangeThickness",
            "primaryFilletRadius",
        ],
        "secondary" => [
            "secondaryOverallDepth",
            "secondaryOverallWidth",
            "secondaryWebThickness",
            "secondaryFlangeThickness",
            "secondaryFilletRadius",
        ],
        _ => [
            "overallDepth",
            "overallWidth",
            "webThickness",
            "flangeThickness",
            "filletRadius",
        ],
    };
    vec![
        (names[0], p.overall_depth),
        (names[1], p.overall_width),
        (names[2], p.web_thickness),
        (names[3], p.flange_thickness),
        (names[4], p.fillet_radius),
    ]
}

fn channel_entries(p: &ChannelParams) -> Vec<(&'static str, f64)> {
    vec![
        ("overallDepth", p.overall_depth),
        ("flangeWidth", p.flange_width),
        ("webThickness", p.web_thickness),
        ("flangeThickness", p.flange_thickness),
        ("filletRadius", p.fillet_radius),
    ]
}

fn angle_entries(p: &AngleParams) -> Vec<(&'static str, f64)> {
    vec![
        ("depth", p.depth),
        ("width", p.width),
        ("depthLegThickness", p.depth_leg_thickness),
        ("widthLegThickness", p.width_leg_thickness),
    ]
}
