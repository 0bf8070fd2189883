// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Piles: straight shafts and enlarged foot/top variants

use crate::element::ElementGeometry;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use crate::section::ShapedSection;
use nalgebra::{Point3, Vector3};
use stb_lite_core::{degrees_to_radians, MemberKind, PileMember, PileTaper, PileTaperDims};
use stb_lite_geometry::taper::enlarged_pile_stations;
use stb_lite_geometry::{loft, CanonicalParameters, EnlargedEnd, Mesh, Offset, Signature};
use std::sync::Arc;

impl Orchestrator<'_> {
    /// Pile hanging from its reference node
    ///
    /// The head sits at `node + (offset.x, offset.y, level_top)`; the foot is
    /// the explicit bottom node or `length_all` straight below the head. The
    /// solid runs foot to head, so taper stations are measured from the foot.
    pub fn pile(&self, member: &PileMember) -> Result<ElementGeometry> {
        let head = pile_head(self.node(&member.node)?, member);
        let foot = match &member.bottom_node {
            Some(node) => self.node(node)? + Vector3::new(member.offset.x, member.offset.y, 0.0),
            None => head - Vector3::z() * member.length_all,
        };

        let spec = self.section(&member.section)?;
        let shaped = self.shape(spec);

        let placement = self.calculator.place_between(
            foot,
            head,
            &Offset::default(),
            &Offset::default(),
            degrees_to_radians(member.rotate),
        )?;

        let (signature, solid, tapered) =
            match self.tapered_solid(member, &shaped, placement.length) {
                Some((signature, solid)) => (signature, solid, true),
                None => {
                    let (signature, solid) =
                        self.cached_extrusion(&shaped.params, &shaped.profile, placement.length)?;
                    (signature, solid, false)
                }
            };

        let secondary = self.release_on_err(
            &[&signature],
            self.composite_parts(spec, &shaped, &placement, false),
        )?;

        Ok(ElementGeometry {
            member_id: member.id.clone(),
            kind: MemberKind::Pile,
            family: shaped.family,
            profile: shaped.profile,
            placement,
            solid,
            signature,
            tapered,
            secondary,
        })
    }

    /// Lofted solid for enlarged-end piles
    ///
    /// `None` means "use a straight extrusion": the pile is straight, or its
    /// taper data cannot describe a valid solid (logged).
    fn tapered_solid(
        &self,
        member: &PileMember,
        shaped: &ShapedSection,
        length: f64,
    ) -> Option<(Signature, Arc<Mesh>)> {
        let (dims, wants_foot, wants_top) = match member.taper {
            PileTaper::Straight => return None,
            PileTaper::ExtendedFoot(dims) => (dims, true, false),
            PileTaper::ExtendedTop(dims) => (dims, false, true),
            PileTaper::ExtendedTopFoot(dims) => (dims, true, true),
        };

        let fallback = |reason: &str| {
            tracing::warn!(
                member = %member.id,
                reason,
                "Pile taper unusable, extruding the shaft straight"
            );
            None
        };

        let (shaft_radius, inner_radius) = match (positive(dims.d_axial), &shaped.params) {
            (Some(d), CanonicalParameters::Pipe(p)) => (d / 2.0, Some(p.inner_radius())),
            (Some(d), _) => (d / 2.0, None),
            (None, CanonicalParameters::Circle(p)) => (p.diameter / 2.0, None),
            (None, CanonicalParameters::Pipe(p)) => (p.outer_radius(), Some(p.inner_radius())),
            (None, _) => return fallback("no shaft diameter for a non-circular section"),
        };
        let inner_radius = inner_radius.filter(|r| *r > 0.0);

        let foot = if wants_foot {
            match foot_end(&dims) {
                Some(end) => Some(end),
                None => return fallback("missing foot diameter"),
            }
        } else {
            None
        };
        let top = if wants_top {
            match top_end(&dims) {
                Some(end) => Some(end),
                None => return fallback("missing top diameter"),
            }
        } else {
            None
        };

        let stations = match enlarged_pile_stations(
            shaft_radius,
            inner_radius,
            foot,
            top,
            length,
            self.profiles.circle_segments(),
        ) {
            Ok(stations) => stations,
            Err(e) => return fallback(&e.to_string()),
        };

        let signature = Signature::with_extra(
            &shaped.params,
            length,
            &taper_signature(shaft_radius, inner_radius, foot, top),
            self.config.geometry.signature_precision,
        );
        match self.cache.get_or_insert_with(&signature, || loft(&stations, length)) {
            Ok(solid) => {
                tracing::debug!(member = %member.id, stations = stations.len(), "Pile lofted");
                Some((signature, solid))
            }
            Err(e) => fallback(&e.to_string()),
        }
    }
}

#[inline]
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn enlarged_end(diameter: Option<f64>, length: Option<f64>, angle_degrees: Option<f64>) -> Option<EnlargedEnd> {
    Some(EnlargedEnd {
        radius: positive(diameter)? / 2.0,
        length: length.filter(|l| l.is_finite() && *l > 0.0).unwrap_or(0.0),
        angle: angle_degrees.map(degrees_to_radians),
    })
}

fn foot_end(dims: &PileTaperDims) -> Option<EnlargedEnd> {
    enlarged_end(
        dims.d_extension_foot,
        dims.length_extension_foot,
        dims.angle_extension_foot,
    )
}

fn top_end(dims: &PileTaperDims) -> Option<EnlargedEnd> {
    enlarged_end(
        dims.d_extension_top,
        dims.length_extension_top,
        dims.angle_extension_top,
    )
}

// Angles that produce a vertical step all sign as zero
fn taper_signature(
    shaft_radius: f64,
    inner_radius: Option<f64>,
    foot: Option<EnlargedEnd>,
    top: Option<EnlargedEnd>,
) -> Vec<(&'static str, f64)> {
    let mut extra = vec![
        ("taperShaftRadius", shaft_radius),
        ("taperInnerRadius", inner_radius.unwrap_or(0.0)),
    ];
    if let Some(f) = foot {
        extra.push(("taperFootRadius", f.radius));
        extra.push(("taperFootLength", f.length));
        extra.push(("taperFootRun", f.taper_length(shaft_radius)));
    }
    if let Some(t) = top {
        extra.push(("taperTopRadius", t.radius));
        extra.push(("taperTopLength", t.length));
        extra.push(("taperTopRun", t.taper_length(shaft_radius)));
    }
    extra
}

/// Pile head: reference node plus plan offset and `level_top`
pub fn pile_head(node: Point3<f64>, member: &PileMember) -> Point3<f64> {
    node + Vector3::new(member.offset.x, member.offset.y, member.level_top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessingConfig;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rustc_hash::FxHashMap;
    use stb_lite_core::{NodePosition, NodeRef, PlanOffset, SectionSpec};
    use stb_lite_geometry::GeometryCache;
    use std::f64::consts::PI;

    fn sections() -> FxHashMap<String, SectionSpec> {
        let mut sections = FxHashMap::default();
        sections.insert(
            "RC".to_string(),
            SectionSpec::new("RC").with_family("CIRCLE").with_dimension("D", 1200.0),
        );
        sections.insert(
            "PHC".to_string(),
            SectionSpec::new("PHC")
                .with_family("PIPE")
                .with_dimension("D", 600.0)
                .with_dimension("t", 100.0),
        );
        sections.insert(
            "SQ".to_string(),
            SectionSpec::new("SQ")
                .with_family("RECTANGLE")
                .with_dimension("width", 500.0)
                .with_dimension("height", 500.0),
        );
        sections
    }

    fn run<R>(f: impl FnOnce(&Orchestrator<'_>) -> R) -> R {
        let mut nodes: FxHashMap<String, NodePosition> = FxHashMap::default();
        nodes.insert("N1".to_string(), NodePosition::new(1000.0, 2000.0, 0.0));
        let sections = sections();
        let cache = GeometryCache::default();
        let config = ProcessingConfig::default();
        f(&Orchestrator::new(&nodes, &sections, &cache, &config))
    }

    fn pile(section: &str, taper: PileTaper) -> PileMember {
        let mut member = PileMember::new("P1", NodeRef::id("N1"), 12000.0, section);
        member.level_top = -1500.0;
        member.taper = taper;
        member
    }

    fn foot_dims() -> PileTaperDims {
        PileTaperDims {
            d_extension_foot: Some(2000.0),
            length_extension_foot: Some(1000.0),
            angle_extension_foot: Some(12.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_straight_pile_hangs_from_node() {
        let mut member = pile("RC", PileTaper::Straight);
        member.offset = PlanOffset::new(100.0, -50.0);
        let element = run(|o| o.pile(&member)).unwrap();

        assert!(!element.tapered);
        assert_relative_eq!(element.placement.length, 12000.0);
        assert_relative_eq!(element.placement.end(), Point3::new(1100.0, 1950.0, -1500.0), epsilon = 1e-9);
        assert_relative_eq!(element.placement.start(), Point3::new(1100.0, 1950.0, -13500.0), epsilon = 1e-9);
        assert_eq!(
            pile_head(Point3::new(1000.0, 2000.0, 0.0), &member),
            Point3::new(1100.0, 1950.0, -1500.0)
        );
    }

    #[test]
    fn test_explicit_bottom_node() {
        let mut member = pile("RC", PileTaper::Straight);
        member.bottom_node = Some(NodeRef::at(1000.0, 2000.0, -9500.0));
        let element = run(|o| o.pile(&member)).unwrap();
        assert_relative_eq!(element.placement.length, 8000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extended_foot_is_lofted() {
        let element = run(|o| o.pile(&pile("RC", PileTaper::ExtendedFoot(foot_dims())))).unwrap();
        assert!(element.tapered);

        // The foot is wider than the shaft, the head is not
        let mesh = element.world_mesh();
        let (min, max) = mesh.bounds();
        assert_abs_diff_eq!((max.x - min.x) as f64, 2000.0, epsilon = 1.0);
        assert_abs_diff_eq!(min.z as f64, -13500.0, epsilon = 1e-2);
        assert_abs_diff_eq!(max.z as f64, -1500.0, epsilon = 1e-2);

        let straight = PI * 600.0f64.powi(2) * 12000.0;
        assert!(mesh.volume() > straight);
    }

    #[test]
    fn test_hollow_pile_keeps_its_core() {
        let dims = PileTaperDims {
            d_extension_top: Some(800.0),
            length_extension_top: Some(500.0),
            ..Default::default()
        };
        let element = run(|o| o.pile(&pile("PHC", PileTaper::ExtendedTop(dims)))).unwrap();
        assert!(element.tapered);

        let shaft = PI * (300.0f64.powi(2) - 200.0f64.powi(2)) * 11500.0;
        let head = PI * (400.0f64.powi(2) - 200.0f64.powi(2)) * 500.0;
        assert_relative_eq!(element.solid.volume(), shaft + head, max_relative = 2e-2);
    }

    #[test]
    fn test_top_and_foot() {
        let dims = PileTaperDims {
            d_extension_top: Some(1600.0),
            length_extension_top: Some(800.0),
            angle_extension_top: Some(10.0),
            ..foot_dims()
        };
        let element = run(|o| o.pile(&pile("RC", PileTaper::ExtendedTopFoot(dims)))).unwrap();
        assert!(element.tapered);
    }

    #[test]
    fn test_missing_diameter_falls_back_to_straight() {
        let dims = PileTaperDims {
            length_extension_foot: Some(1000.0),
            ..Default::default()
        };
        let element = run(|o| o.pile(&pile("RC", PileTaper::ExtendedFoot(dims)))).unwrap();
        assert!(!element.tapered);
        assert_relative_eq!(element.solid.volume(), PI * 600.0f64.powi(2) * 12000.0, max_relative = 1e-2);
    }

    #[test]
    fn test_invalid_taper_falls_back_to_straight() {
        // Enlargement smaller than the shaft
        let dims = PileTaperDims {
            d_extension_foot: Some(800.0),
            ..Default::default()
        };
        let element = run(|o| o.pile(&pile("RC", PileTaper::ExtendedFoot(dims)))).unwrap();
        assert!(!element.tapered);

        // Non-circular shaft without an axial diameter
        let element = run(|o| o.pile(&pile("SQ", PileTaper::ExtendedFoot(foot_dims())))).unwrap();
        assert!(!element.tapered);
    }

    #[test]
    fn test_taper_signature_differs_from_straight() {
        let straight = run(|o| o.pile(&pile("RC", PileTaper::Straight))).unwrap();
        let tapered = run(|o| o.pile(&pile("RC", PileTaper::ExtendedFoot(foot_dims())))).unwrap();
        assert_ne!(straight.signature, tapered.signature);
    }
}
