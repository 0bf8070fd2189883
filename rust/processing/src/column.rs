// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Columns and posts

use crate::element::ElementGeometry;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use stb_lite_core::{degrees_to_radians, ColumnMember};

impl Orchestrator<'_> {
    /// Steel, RC, SRC and CFT columns (and posts) between two nodes
    ///
    /// Offsets are plan X/Y only. SRC encasement and CFT fill share the
    /// column placement; a base plate sits directly below the bottom end.
    pub fn column(&self, member: &ColumnMember) -> Result<ElementGeometry> {
        let bottom = self.node(&member.bottom)?;
        let top = self.node(&member.top)?;
        let spec = self.section(&member.section)?;
        let shaped = self.shape(spec);

        let placement = self.calculator.place_column(
            bottom,
            top,
            member.offset_bottom,
            member.offset_top,
            degrees_to_radians(member.rotate),
        )?;

        let (signature, solid) =
            self.cached_extrusion(&shaped.params, &shaped.profile, placement.length)?;
        let secondary = self.release_on_err(
            &[&signature],
            self.composite_parts(spec, &shaped, &placement, true),
        )?;

        tracing::trace!(
            member = %member.id,
            family = %shaped.family,
            length = placement.length,
            parts = secondary.len(),
            "Column placed"
        );

        Ok(ElementGeometry {
            member_id: member.id.clone(),
            kind: member.kind,
            family: shaped.family,
            profile: shaped.profile,
            placement,
            solid,
            signature,
            tapered: false,
            secondary,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ProcessingConfig;
    use crate::element::SecondaryRole;
    use crate::error::MemberFailure;
    use crate::orchestrator::Orchestrator;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rustc_hash::FxHashMap;
    use stb_lite_core::{
        BasePlateSpec, ColumnMember, NodePosition, NodeRef, PlanOffset, SectionMaterial, SectionSpec,
    };
    use stb_lite_geometry::{GeometryCache, ProfileFamily, Vector3};

    struct Fixture {
        nodes: FxHashMap<String, NodePosition>,
        sections: FxHashMap<String, SectionSpec>,
        cache: GeometryCache,
        config: ProcessingConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut nodes = FxHashMap::default();
            nodes.insert("N1".to_string(), NodePosition::new(0.0, 0.0, 0.0));
            nodes.insert("N2".to_string(), NodePosition::new(0.0, 0.0, 3500.0));

            let mut sections = FxHashMap::default();
            sections.insert(
                "BOX".to_string(),
                SectionSpec::new("BOX")
                    .with_family("BOX")
                    .with_dimension("A", 400.0)
                    .with_dimension("B", 400.0)
                    .with_dimension("t", 19.0),
            );
            sections.insert(
                "SRC".to_string(),
                SectionSpec::new("SRC")
                    .with_family("H")
                    .with_material(SectionMaterial::SteelConcrete)
                    .with_dimension("A", 300.0)
                    .with_dimension("B", 300.0)
                    .with_dimension("t1", 10.0)
                    .with_dimension("t2", 15.0)
                    .with_encasement(
                        SectionSpec::new("SRC-RC")
                            .with_family("RECTANGLE")
                            .with_dimension("width", 800.0)
                            .with_dimension("height", 800.0),
                    )
                    .with_base_plate(BasePlateSpec::new(600.0, 600.0, 0.0)),
            );
            sections.insert(
                "CFT".to_string(),
                SectionSpec::new("CFT")
                    .with_family("PIPE")
                    .with_material(SectionMaterial::ConcreteFilledSteel)
                    .with_dimension("D", 500.0)
                    .with_dimension("t", 16.0),
            );

            Self {
                nodes,
                sections,
                cache: GeometryCache::default(),
                config: ProcessingConfig::default(),
            }
        }

        fn orchestrator(&self) -> Orchestrator<'_> {
            Orchestrator::new(&self.nodes, &self.sections, &self.cache, &self.config)
        }
    }

    fn column(section: &str) -> ColumnMember {
        ColumnMember::new("C1", NodeRef::id("N1"), NodeRef::id("N2"), section)
    }

    #[test]
    fn test_box_column() {
        let fixture = Fixture::new();
        let element = fixture.orchestrator().column(&column("BOX")).unwrap();

        assert_eq!(element.family, ProfileFamily::Box);
        assert_eq!(element.profile.holes.len(), 1);
        assert_relative_eq!(element.placement.length, 3500.0);
        assert_relative_eq!(element.placement.direction, Vector3::z());
        assert!(element.secondary.is_empty());

        let (min, max) = element.world_mesh().bounds();
        assert_abs_diff_eq!(min.z, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(max.z, 3500.0, epsilon = 1e-3);
    }

    #[test]
    fn test_plan_offsets_and_rotation() {
        let fixture = Fixture::new();
        let mut member = column("BOX");
        member.offset_bottom = PlanOffset::new(100.0, 0.0);
        member.offset_top = PlanOffset::new(100.0, 0.0);
        member.rotate = 90.0;
        let element = fixture.orchestrator().column(&member).unwrap();

        assert_relative_eq!(element.placement.center.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(element.placement.center.z, 1750.0, epsilon = 1e-9);
        // 90° roll maps local X onto world Y
        let x = element.placement.rotation * Vector3::x();
        assert_relative_eq!(x, Vector3::y(), epsilon = 1e-9);
    }

    #[test]
    fn test_src_column_parts() {
        let fixture = Fixture::new();
        let element = fixture.orchestrator().column(&column("SRC")).unwrap();

        assert_eq!(element.family, ProfileFamily::H);
        let roles: Vec<SecondaryRole> = element.secondary.iter().map(|p| p.role).collect();
        assert_eq!(roles, vec![SecondaryRole::Encasement, SecondaryRole::BasePlate]);

        let encasement = &element.secondary[0];
        assert_eq!(encasement.family, ProfileFamily::Rectangle);
        assert_eq!(encasement.placement, element.placement);

        // Plate thickness falls back to the configured default
        let plate = &element.secondary[1];
        assert_relative_eq!(plate.placement.length, 25.0);
        assert_relative_eq!(plate.placement.center.z, -12.5, epsilon = 1e-9);
    }

    #[test]
    fn test_cft_column_fill() {
        let fixture = Fixture::new();
        let element = fixture.orchestrator().column(&column("CFT")).unwrap();
        let fill: Vec<_> = element.secondary_by_role(SecondaryRole::Fill).collect();
        assert_eq!(fill.len(), 1);
        assert_eq!(fill[0].family, ProfileFamily::Circle);
    }

    #[test]
    fn test_identical_columns_share_a_solid() {
        let fixture = Fixture::new();
        let orchestrator = fixture.orchestrator();
        let a = orchestrator.column(&column("BOX")).unwrap();
        let b = orchestrator.column(&column("BOX")).unwrap();
        assert!(std::sync::Arc::ptr_eq(&a.solid, &b.solid));
        assert_eq!(fixture.cache.stats().hits, 1);
    }

    #[test]
    fn test_missing_node_and_section() {
        let fixture = Fixture::new();
        let orchestrator = fixture.orchestrator();

        let mut member = column("BOX");
        member.top = NodeRef::id("N99");
        assert_eq!(
            orchestrator.column(&member).unwrap_err(),
            MemberFailure::MissingNodeData("N99".into())
        );

        assert_eq!(
            orchestrator.column(&column("NOPE")).unwrap_err(),
            MemberFailure::MissingSectionData("NOPE".into())
        );
    }

    #[test]
    fn test_coincident_nodes_are_degenerate() {
        let fixture = Fixture::new();
        let member = ColumnMember::new("C0", NodeRef::id("N1"), NodeRef::at(0.0, 0.0, 0.0), "BOX");
        assert!(matches!(
            fixture.orchestrator().column(&member),
            Err(MemberFailure::DegenerateGeometry(_))
        ));
    }
}
