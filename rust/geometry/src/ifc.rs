// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC profile mapping
//!
//! Translates canonical parameters into IFC4 profile definitions and their
//! attribute names, for interchange with BIM consumers. Attribute names are
//! the IFC schema names verbatim.
//!
//! Built-up sections and cruciforms have no parametric IFC type and map to
//! `IfcCompositeProfileDef` with one child per constituent shape.

use crate::params::*;

/// An IFC profile definition with its parametric attributes
#[derive(Debug, Clone, PartialEq)]
pub struct IfcProfileMapping {
    /// IFC entity name, e.g. `IfcIShapeProfileDef`
    pub ifc_type: &'static str,
    /// Attribute name / value pairs in schema order
    pub parameters: Vec<(&'static str, f64)>,
    /// Constituent profiles of a composite
    pub children: Vec<IfcProfileMapping>,
}

impl IfcProfileMapping {
    fn parametric(ifc_type: &'static str, parameters: Vec<(&'static str, f64)>) -> Self {
        Self {
            ifc_type,
            parameters,
            children: Vec::new(),
        }
    }

    fn composite(children: Vec<IfcProfileMapping>) -> Self {
        Self {
            ifc_type: "IfcCompositeProfileDef",
            parameters: Vec::new(),
            children,
        }
    }

    /// Attribute value by IFC name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Map canonical parameters to an IFC profile definition
pub fn to_ifc(params: &CanonicalParameters) -> IfcProfileMapping {
    match params {
        CanonicalParameters::H(p) => i_shape(p),
        CanonicalParameters::Box(p) => IfcProfileMapping::parametric(
            "IfcRectangleHollowProfileDef",
            vec![
                ("XDim", p.overall_width),
                ("YDim", p.overall_depth),
                ("WallThickness", p.wall_thickness),
                ("InnerFilletRadius", (p.outer_fillet_radius - p.wall_thickness).max(0.0)),
                ("OuterFilletRadius", p.outer_fillet_radius),
            ],
        ),
        CanonicalParameters::Pipe(p) => IfcProfileMapping::parametric(
            "IfcCircleHollowProfileDef",
            vec![("Radius", p.outer_radius()), ("WallThickness", p.wall_thickness)],
        ),
        CanonicalParameters::Circle(p) => {
            IfcProfileMapping::parametric("IfcCircleProfileDef", vec![("Radius", p.diameter / 2.0)])
        }
        CanonicalParameters::Rectangle(p) => rectangle(p.width, p.height),
        CanonicalParameters::FlatBar(p) => rectangle(p.width, p.thickness),
        CanonicalParameters::Channel(p) => channel(p),
        CanonicalParameters::Angle(p) => angle(p),
        CanonicalParameters::Tee(p) => IfcProfileMapping::parametric(
            "IfcTShapeProfileDef",
            vec![
                ("Depth", p.overall_depth),
                ("FlangeWidth", p.flange_width),
                ("WebThickness", p.web_thickness),
                ("FlangeThickness", p.flange_thickness),
            ],
        ),
        CanonicalParameters::DoubleAngle(p) => {
            IfcProfileMapping::composite(vec![angle(&p.angle), angle(&p.angle)])
        }
        CanonicalParameters::DoubleChannel(p) => {
            IfcProfileMapping::composite(vec![channel(&p.channel), channel(&p.channel)])
        }
        CanonicalParameters::CrossH(p) => {
            IfcProfileMapping::composite(vec![i_shape(&p.primary), i_shape(&p.secondary)])
        }
    }
}

fn rectangle(x: f64, y: f64) -> IfcProfileMapping {
    IfcProfileMapping::parametric("IfcRectangleProfileDef", vec![("XDim", x), ("YDim", y)])
}

fn i_shape(p: &IShapeParams) -> IfcProfileMapping {
    IfcProfileMapping::parametric(
        "IfcIShapeProfileDef",
        vec![
            ("OverallWidth", p.overall_width),
            ("OverallDepth", p.overall_depth),
            ("WebThickness", p.web_thickness),
            ("FlangeThickness", p.flange_thickness),
            ("FilletRadius", p.fillet_radius),
        ],
    )
}

fn channel(p: &ChannelParams) -> IfcProfileMapping {
    IfcProfileMapping::parametric(
        "IfcUShapeProfileDef",
        vec![
            ("Depth", p.overall_depth),
            ("FlangeWidth", p.flange_width),
            ("WebThickness", p.web_thickness),
            ("FlangeThickness", p.flange_thickness),
            ("FilletRadius", p.fillet_radius),
        ],
    )
}

// IfcLShapeProfileDef carries a single leg thickness
fn angle(p: &AngleParams) -> IfcProfileMapping {
    IfcProfileMapping::parametric(
        "IfcLShapeProfileDef",
        vec![
            ("Depth", p.depth),
            ("Width", p.width),
            ("Thickness", p.depth_leg_thickness.max(p.width_leg_thickness)),
        ],
    )
}
