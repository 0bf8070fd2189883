// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Profile families and shape-type resolution
//!
//! Source models name cross-section shapes with a zoo of codes (`"H"`,
//! `"SH"`, `"BOX"`, `"□"`, `"Pipe"`, `"P"`, ...). Resolution follows a
//! fixed priority chain:
//!
//! 1. explicit family code on the section
//! 2. presence/absence pattern of known dimension fields
//! 3. H as the default when the section names no family at all
//!
//! An explicit code that is not recognized and matches no pattern resolves
//! to RECTANGLE.

use crate::mapper::aliases;
use stb_lite_core::{RawDimensions, SectionSpec};

/// Canonical cross-section family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileFamily {
    H,
    Box,
    Pipe,
    Circle,
    Rectangle,
    Channel,
    Angle,
    Tee,
    DoubleAngleBackToBack,
    DoubleAngleFaceToFace,
    DoubleChannelBackToBack,
    DoubleChannelFaceToFace,
    CrossH,
    FlatBar,
}

impl ProfileFamily {
    /// All families, in declaration order
    pub const ALL: [ProfileFamily; 14] = [
        ProfileFamily::H,
        ProfileFamily::Box,
        ProfileFamily::Pipe,
        ProfileFamily::Circle,
        ProfileFamily::Rectangle,
        ProfileFamily::Channel,
        ProfileFamily::Angle,
        ProfileFamily::Tee,
        ProfileFamily::DoubleAngleBackToBack,
        ProfileFamily::DoubleAngleFaceToFace,
        ProfileFamily::DoubleChannelBackToBack,
        ProfileFamily::DoubleChannelFaceToFace,
        ProfileFamily::CrossH,
        ProfileFamily::FlatBar,
    ];

    /// Canonical code, used in cache signatures
    pub fn code(&self) -> &'static str {
        match self {
            Self::H => "H",
            Self::Box => "BOX",
            Self::Pipe => "PIPE",
            Self::Circle => "CIRCLE",
            Self::Rectangle => "RECTANGLE",
            Self::Channel => "C",
            Self::Angle => "L",
            Self::Tee => "T",
            Self::DoubleAngleBackToBack => "2L_BB",
            Self::DoubleAngleFaceToFace => "2L_FF",
            Self::DoubleChannelBackToBack => "2C_BB",
            Self::DoubleChannelFaceToFace => "2C_FF",
            Self::CrossH => "CROSS_H",
            Self::FlatBar => "FB",
        }
    }

    /// Parse a source shape-type code, case-insensitively
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized: String = code
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_uppercase();

        let family = match normalized.as_str() {
            "H" | "I" | "SH" | "BH" | "WH" | "HSHAPE" | "ISHAPE" | "IBEAM" | "W" | "HP" => Self::H,
            "BOX" | "□" | "BCP" | "BCR" | "STKR" | "RHS" | "SHS" | "HSS" | "BOXSHAPE" => Self::Box,
            "PIPE" | "P" | "STK" | "STKN" | "CHS" | "○" | "TUBE" | "CIRCLEHOLLOW" => Self::Pipe,
            "CIRCLE" | "ROUND" | "RB" | "ROUNDBAR" | "RCCIRCLE" | "CIRCULAR" => Self::Circle,
            "RECT" | "RECTANGLE" | "RCRECT" | "RECTANGULAR" | "SQUARE" => Self::Rectangle,
            "C" | "[" | "U" | "CHANNEL" | "CSHAPE" | "USHAPE" => Self::Channel,
            "L" | "ANGLE" | "LSHAPE" => Self::Angle,
            "T" | "CT" | "TEE" | "TSHAPE" => Self::Tee,
            "2L" | "2LBB" | "2LBACKTOBACK" | "DOUBLEANGLE" => Self::DoubleAngleBackToBack,
            "2LFF" | "2LFACETOFACE" => Self::DoubleAngleFaceToFace,
            "2C" | "2CBB" | "2CBACKTOBACK" | "DOUBLECHANNEL" => Self::DoubleChannelBackToBack,
            "2CFF" | "2CFACETOFACE" => Self::DoubleChannelFaceToFace,
            "CROSSH" | "+H" | "CROSS" | "CRUCIFORM" => Self::CrossH,
            "FB" | "FLATBAR" | "FLAT" | "PL" | "PLATE" => Self::FlatBar,
            _ => return None,
        };
        Some(family)
    }

    /// Whether the family carries a wall / flange thickness that can
    /// swallow its hole or re-entrant corners
    pub fn has_thickness(&self) -> bool {
        !matches!(self, Self::Circle | Self::Rectangle | Self::FlatBar)
    }
}

impl std::fmt::Display for ProfileFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// How a family was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Taken from the section's explicit family code
    Explicit,
    /// Inferred from which dimension fields are present
    FieldPattern,
    /// No code and no recognizable fields
    Default,
    /// The explicit code was unknown and no pattern matched
    Unsupported,
}

/// Resolve the profile family of a section
pub fn resolve_family(section: &SectionSpec) -> ProfileFamily {
    resolve_family_with_source(section).0
}

/// Resolve the profile family and report which rule decided it
pub fn resolve_family_with_source(section: &SectionSpec) -> (ProfileFamily, Resolution) {
    let unknown_code = match section.family_code.as_deref() {
        Some(code) => match ProfileFamily::from_code(code) {
            Some(family) => return (family, Resolution::Explicit),
            None => Some(code),
        },
        None => None,
    };

    if let Some(family) = family_from_fields(&section.dimensions) {
        if let Some(code) = unknown_code {
            tracing::warn!(
                section = %section.id,
                code = %code,
                inferred = %family,
                "Unsupported profile family, inferred from dimensions"
            );
        }
        return (family, Resolution::FieldPattern);
    }

    match unknown_code {
        Some(code) => {
            tracing::warn!(
                section = %section.id,
                code = %code,
                "Unsupported profile family, using RECTANGLE"
            );
            (ProfileFamily::Rectangle, Resolution::Unsupported)
        }
        None => (ProfileFamily::H, Resolution::Default),
    }
}

/// Infer a family from the dimension fields present
pub fn family_from_fields(dims: &RawDimensions) -> Option<ProfileFamily> {
    let has_web = dims.has_any(aliases::WEB_THICKNESS);
    let has_flange = dims.has_any(aliases::FLANGE_THICKNESS);
    let has_depth = dims.has_any(aliases::OVERALL_DEPTH);
    let has_wall = dims.has_any(aliases::WALL_THICKNESS);
    let has_diameter =
        dims.has_any(aliases::OUTER_DIAMETER) || dims.has_any(aliases::OUTER_RADIUS);
    let has_width = dims.has_any(aliases::RECT_WIDTH);
    let has_height = dims.has_any(aliases::RECT_HEIGHT);

    if has_web && has_flange && has_depth {
        Some(ProfileFamily::H)
    } else if has_diameter && !has_web && !has_flange {
        // Checked before the wall rule: a diameter with a wall is a pipe, not a box
        Some(ProfileFamily::Pipe)
    } else if has_wall {
        Some(ProfileFamily::Box)
    } else if has_width && has_height && !has_web && !has_flange {
        Some(ProfileFamily::Rectangle)
    } else {
        None
    }
}
