// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Foundation columns

use crate::element::{ElementGeometry, SecondaryProfile, SecondaryRole};
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use nalgebra::{Point3, Vector3};
use stb_lite_core::{degrees_to_radians, FoundationColumnMember, MemberKind};

impl Orchestrator<'_> {
    /// Embedded part (FD) rising from the node, with an optional rise (WR)
    /// stacked on top as a secondary part
    pub fn foundation_column(&self, member: &FoundationColumnMember) -> Result<ElementGeometry> {
        let base = self.node(&member.node)?;
        let roll = degrees_to_radians(member.rotate);

        let spec = self.section(&member.section_fd)?;
        let shaped = self.shape(spec);
        let fd_top = base + Vector3::z() * member.length_fd;
        let placement = self.calculator.place_column(
            base,
            fd_top,
            member.offset_fd,
            member.offset_fd,
            roll,
        )?;
        let (signature, solid) =
            self.cached_extrusion(&shaped.params, &shaped.profile, placement.length)?;

        let mut secondary = Vec::new();
        let rise = member
            .section_wr
            .as_deref()
            .filter(|_| member.length_wr > 0.0);
        if let Some(section_wr) = rise {
            let part = self.release_on_err(&[&signature], self.rise(member, section_wr, fd_top, roll))?;
            secondary.push(part);
        }

        Ok(ElementGeometry {
            member_id: member.id.clone(),
            kind: MemberKind::FoundationColumn,
            family: shaped.family,
            profile: shaped.profile,
            placement,
            solid,
            signature,
            tapered: false,
            secondary,
        })
    }

    fn rise(
        &self,
        member: &FoundationColumnMember,
        section_wr: &str,
        fd_top: Point3<f64>,
        roll: f64,
    ) -> Result<SecondaryProfile> {
        let spec = self.section(section_wr)?;
        let wr_top = fd_top + Vector3::z() * member.length_wr;
        let placement = self.calculator.place_column(
            fd_top,
            wr_top,
            member.offset_wr,
            member.offset_wr,
            roll,
        )?;
        self.part(SecondaryRole::Rise, self.shape(spec), placement)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ProcessingConfig;
    use crate::element::SecondaryRole;
    use crate::error::MemberFailure;
    use crate::orchestrator::Orchestrator;
    use approx::assert_relative_eq;
    use rustc_hash::FxHashMap;
    use stb_lite_core::{FoundationColumnMember, NodePosition, NodeRef, PlanOffset, SectionSpec};
    use stb_lite_geometry::{GeometryCache, Point3, ProfileFamily};

    fn member() -> FoundationColumnMember {
        FoundationColumnMember {
            id: "FC1".to_string(),
            node: NodeRef::at(0.0, 0.0, -2000.0),
            length_fd: 1500.0,
            length_wr: 500.0,
            offset_fd: PlanOffset::default(),
            offset_wr: PlanOffset::new(50.0, 0.0),
            rotate: 0.0,
            section_fd: "FD".to_string(),
            section_wr: Some("WR".to_string()),
        }
    }

    fn run<R>(f: impl FnOnce(&Orchestrator<'_>, &GeometryCache) -> R) -> R {
        let nodes: FxHashMap<String, NodePosition> = FxHashMap::default();
        let mut sections = FxHashMap::default();
        sections.insert(
            "FD".to_string(),
            SectionSpec::new("FD")
                .with_family("RECTANGLE")
                .with_dimension("width", 1000.0)
                .with_dimension("height", 1000.0),
        );
        sections.insert(
            "WR".to_string(),
            SectionSpec::new("WR")
                .with_family("RECTANGLE")
                .with_dimension("width", 800.0)
                .with_dimension("height", 800.0),
        );
        let cache = GeometryCache::default();
        let config = ProcessingConfig::default();
        let orchestrator = Orchestrator::new(&nodes, &sections, &cache, &config);
        f(&orchestrator, &cache)
    }

    #[test]
    fn test_rise_is_stacked_on_the_embedded_part() {
        let element = run(|o, _| o.foundation_column(&member())).unwrap();
        assert_eq!(element.family, ProfileFamily::Rectangle);
        assert_relative_eq!(element.placement.start(), Point3::new(0.0, 0.0, -2000.0), epsilon = 1e-9);
        assert_relative_eq!(element.placement.end(), Point3::new(0.0, 0.0, -500.0), epsilon = 1e-9);

        assert_eq!(element.secondary.len(), 1);
        let rise = &element.secondary[0];
        assert_eq!(rise.role, SecondaryRole::Rise);
        assert_relative_eq!(rise.placement.start(), Point3::new(50.0, 0.0, -500.0), epsilon = 1e-9);
        assert_relative_eq!(rise.placement.end(), Point3::new(50.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_without_rise() {
        let mut m = member();
        m.length_wr = 0.0;
        let element = run(|o, _| o.foundation_column(&m)).unwrap();
        assert!(element.secondary.is_empty());
    }

    #[test]
    fn test_missing_rise_section_releases_the_primary() {
        let mut m = member();
        m.section_wr = Some("NOPE".to_string());
        run(|o, cache| {
            assert_eq!(
                o.foundation_column(&m).unwrap_err(),
                MemberFailure::MissingSectionData("NOPE".into())
            );
            let fd = cache.stats();
            assert_eq!(fd.entries, 1);
            let signature = stb_lite_geometry::Signature::new(
                &stb_lite_geometry::ParameterMapper::normalize(
                    ProfileFamily::Rectangle,
                    &stb_lite_core::RawDimensions::from_pairs([("width", 1000.0), ("height", 1000.0)]),
                ),
                1500.0,
                3,
            );
            assert_eq!(cache.ref_count(&signature), Some(0));
        });
    }
}
