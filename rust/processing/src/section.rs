// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section resolution: primary profile and composite sibling parts

use crate::element::{SecondaryProfile, SecondaryRole};
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use nalgebra::Point3;
use stb_lite_core::{BasePlateSpec, SectionMaterial, SectionSpec};
use stb_lite_geometry::params::{CircleParams, RectangleParams};
use stb_lite_geometry::{
    resolve_family, CanonicalParameters, ParameterMapper, Placement, Profile, ProfileFamily,
};

/// A section turned into canonical parameters and a profile
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedSection {
    pub family: ProfileFamily,
    pub params: CanonicalParameters,
    pub profile: Profile,
}

impl Orchestrator<'_> {
    /// Resolve family, parameters and profile of a section
    ///
    /// A `steel_shape_ref` found in the catalog supplies the dimensions (and
    /// the family code when the catalog entry has one); otherwise the
    /// section's own dimensions are used.
    pub fn shape(&self, spec: &SectionSpec) -> ShapedSection {
        let catalogued = spec.steel_shape_ref.as_deref().and_then(|name| {
            let found = self.catalog.and_then(|catalog| catalog.section(name));
            if found.is_none() {
                tracing::debug!(
                    section = %spec.id,
                    shape = %name,
                    "Steel shape not catalogued, using section dimensions"
                );
            }
            found
        });

        let (family, params) = match catalogued {
            Some(shape) => {
                let effective = SectionSpec {
                    id: spec.id.clone(),
                    family_code: shape.family_code.clone().or_else(|| spec.family_code.clone()),
                    dimensions: shape.dimensions.clone(),
                    ..SectionSpec::default()
                };
                let family = resolve_family(&effective);
                (family, ParameterMapper::normalize(family, &effective.dimensions))
            }
            None => {
                let family = resolve_family(spec);
                (family, ParameterMapper::normalize(family, &spec.dimensions))
            }
        };

        let mut profile = self.profiles.calculate(&params);
        // Angles and tees are built around a face; members run through the bounding-box center
        if matches!(family, ProfileFamily::Angle | ProfileFamily::Tee) {
            profile = profile.centered();
        }

        ShapedSection {
            family,
            params,
            profile,
        }
    }

    /// Encasement, fill and (optionally) base plate of a member
    pub(crate) fn composite_parts(
        &self,
        spec: &SectionSpec,
        primary: &ShapedSection,
        placement: &Placement,
        with_base_plate: bool,
    ) -> Result<Vec<SecondaryProfile>> {
        let mut parts: Vec<SecondaryProfile> = Vec::new();

        let result = self.collect_composite_parts(spec, primary, placement, with_base_plate, &mut parts);
        if result.is_err() {
            for part in &parts {
                self.cache.release(&part.signature);
            }
        }
        result.map(|()| parts)
    }

    fn collect_composite_parts(
        &self,
        spec: &SectionSpec,
        primary: &ShapedSection,
        placement: &Placement,
        with_base_plate: bool,
        parts: &mut Vec<SecondaryProfile>,
    ) -> Result<()> {
        match spec.encasement.as_deref() {
            Some(encasement) => {
                let shaped = self.shape(encasement);
                parts.push(self.part(SecondaryRole::Encasement, shaped, *placement)?);
            }
            None if spec.material == SectionMaterial::SteelConcrete => {
                tracing::warn!(section = %spec.id, "SRC section without encasement, drawing steel only");
            }
            None => {}
        }

        if spec.material == SectionMaterial::ConcreteFilledSteel {
            match fill_parameters(&primary.params) {
                Some(params) => {
                    let shaped = ShapedSection {
                        family: params.family(),
                        profile: self.profiles.calculate(&params),
                        params,
                    };
                    parts.push(self.part(SecondaryRole::Fill, shaped, *placement)?);
                }
                None => tracing::warn!(
                    section = %spec.id,
                    family = %primary.family,
                    "CFT section is not a hollow tube, skipping concrete fill"
                ),
            }
        }

        if let Some(plate) = spec.base_plate.filter(|_| with_base_plate) {
            if plate.width_x > 0.0 && plate.width_y > 0.0 {
                let thickness = if plate.thickness > 0.0 {
                    plate.thickness
                } else {
                    self.config.base_plate_thickness
                };
                let params = CanonicalParameters::Rectangle(RectangleParams {
                    width: plate.width_x,
                    height: plate.width_y,
                });
                let shaped = ShapedSection {
                    family: ProfileFamily::Rectangle,
                    profile: self.profiles.calculate(&params),
                    params,
                };
                let plate_placement = base_plate_placement(placement, &plate, thickness);
                parts.push(self.part(SecondaryRole::BasePlate, shaped, plate_placement)?);
            } else {
                tracing::warn!(section = %spec.id, "Base plate without plan size, skipping");
            }
        }

        Ok(())
    }

    pub(crate) fn part(
        &self,
        role: SecondaryRole,
        shaped: ShapedSection,
        placement: Placement,
    ) -> Result<SecondaryProfile> {
        let (signature, solid) = self.cached_extrusion(&shaped.params, &shaped.profile, placement.length)?;
        Ok(SecondaryProfile {
            role,
            family: shaped.family,
            profile: shaped.profile,
            placement,
            solid,
            signature,
        })
    }
}

/// Concrete core of a steel tube, `None` for open or solid sections
pub fn fill_parameters(params: &CanonicalParameters) -> Option<CanonicalParameters> {
    match params {
        CanonicalParameters::Pipe(p) if p.inner_radius() > 0.0 => {
            Some(CanonicalParameters::Circle(CircleParams {
                diameter: 2.0 * p.inner_radius(),
            }))
        }
        CanonicalParameters::Box(p) => {
            let width = p.overall_width - 2.0 * p.wall_thickness;
            let height = p.overall_depth - 2.0 * p.wall_thickness;
            (width > 0.0 && height > 0.0)
                .then_some(CanonicalParameters::Rectangle(RectangleParams { width, height }))
        }
        _ => None,
    }
}

/// Plate directly below the column's start, sharing its frame
fn base_plate_placement(column: &Placement, plate: &BasePlateSpec, thickness: f64) -> Placement {
    let local = Point3::new(plate.offset_x, plate.offset_y, -(column.length + thickness) / 2.0);
    Placement {
        center: column.local_to_world(&local),
        direction: column.direction,
        length: thickness,
        rotation: column.rotation,
    }
}
