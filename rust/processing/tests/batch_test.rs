// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch processing over a small mixed frame.

use approx::assert_relative_eq;
use rustc_hash::FxHashMap;
use stb_lite_core::{
    BeamMember, ColumnMember, FoundationColumnMember, Member, MemberKind, NodePosition, NodeRef,
    PileMember, PileTaper, PileTaperDims, PlanOffset, SectionSpec,
};
use stb_lite_geometry::{GeometryCache, ProfileMeta};
use stb_lite_processing::{process_batch, MemberFailure, ProcessingConfig, SecondaryRole};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn nodes() -> FxHashMap<String, NodePosition> {
    let mut nodes = FxHashMap::default();
    for (i, x) in [0.0, 6000.0, 12000.0].iter().enumerate() {
        nodes.insert(format!("B{}", i), NodePosition::new(*x, 0.0, 0.0));
        nodes.insert(format!("T{}", i), NodePosition::new(*x, 0.0, 4000.0));
    }
    nodes
}

fn sections() -> FxHashMap<String, SectionSpec> {
    let mut sections = FxHashMap::default();
    sections.insert(
        "C-PIPE".to_string(),
        SectionSpec::new("C-PIPE")
            .with_family("PIPE")
            .with_dimension("outerDiameter", 150.0)
            .with_dimension("wallThickness", 6.0),
    );
    sections.insert(
        "G-H".to_string(),
        SectionSpec::new("G-H")
            .with_dimension("overall_depth", 500.0)
            .with_dimension("overall_width", 200.0)
            .with_dimension("web_thickness", 10.0)
            .with_dimension("flange_thickness", 16.0),
    );
    sections.insert(
        "PILE".to_string(),
        SectionSpec::new("PILE").with_family("CIRCLE").with_dimension("D", 1000.0),
    );
    sections.insert(
        "FD".to_string(),
        SectionSpec::new("FD")
            .with_family("RECTANGLE")
            .with_dimension("width", 900.0)
            .with_dimension("height", 900.0),
    );
    sections
}

fn members() -> Vec<Member> {
    let mut members = Vec::new();
    for i in 0..3 {
        members.push(Member::Column(ColumnMember::new(
            format!("C{}", i),
            NodeRef::id(format!("B{}", i)),
            NodeRef::id(format!("T{}", i)),
            "C-PIPE",
        )));
    }
    members.push(Member::Beam(BeamMember::new(
        "G1",
        NodeRef::id("T0"),
        NodeRef::id("T1"),
        "G-H",
    )));
    // Unknown node
    members.push(Member::Beam(BeamMember::new(
        "G2",
        NodeRef::id("T1"),
        NodeRef::id("T9"),
        "G-H",
    )));
    // Unknown section
    members.push(Member::Column(ColumnMember::new(
        "C9",
        NodeRef::id("B0"),
        NodeRef::id("T0"),
        "MISSING",
    )));
    // Zero length
    members.push(Member::Beam(BeamMember::new(
        "G3",
        NodeRef::id("T2"),
        NodeRef::id("T2"),
        "G-H",
    )));

    let mut pile = PileMember::new("P1", NodeRef::id("B0"), 15000.0, "PILE");
    pile.level_top = -1000.0;
    pile.taper = PileTaper::ExtendedFoot(PileTaperDims {
        d_extension_foot: Some(1800.0),
        length_extension_foot: Some(800.0),
        angle_extension_foot: Some(15.0),
        ..Default::default()
    });
    members.push(Member::Pile(pile));

    members.push(Member::FoundationColumn(FoundationColumnMember {
        id: "FC1".to_string(),
        node: NodeRef::id("B2"),
        length_fd: 1000.0,
        length_wr: 300.0,
        offset_fd: PlanOffset::default(),
        offset_wr: PlanOffset::default(),
        rotate: 0.0,
        section_fd: "FD".to_string(),
        section_wr: Some("FD".to_string()),
    }));
    members
}

#[test]
fn test_failures_do_not_abort_the_batch() {
    init_tracing();
    let nodes = nodes();
    let sections = sections();
    let cache = GeometryCache::default();
    let config = ProcessingConfig::default();

    let report = process_batch(&members(), &nodes, &sections, &cache, &config);

    let ids: Vec<&str> = report.elements.iter().map(|e| e.member_id.as_str()).collect();
    assert_eq!(ids, vec!["C0", "C1", "C2", "G1", "P1", "FC1"]);

    let failed: Vec<&str> = report.failures.iter().map(|f| f.member_id.as_str()).collect();
    assert_eq!(failed, vec!["G2", "C9", "G3"]);
    assert_eq!(report.failures[0].failure, MemberFailure::MissingNodeData("T9".into()));
    assert_eq!(report.failures[1].failure, MemberFailure::MissingSectionData("MISSING".into()));
    assert_eq!(report.failures.len(), 3);
    assert!(matches!(report.failures[2].failure, MemberFailure::DegenerateGeometry(_)));
    assert_eq!(report.failures[2].kind, MemberKind::Beam);
}

#[test]
fn test_pipe_columns_share_one_solid() {
    let nodes = nodes();
    let sections = sections();
    let cache = GeometryCache::default();
    let config = ProcessingConfig::default().sequential();

    let report = process_batch(&members(), &nodes, &sections, &cache, &config);
    let column = &report.elements[0];
    match column.profile.meta {
        ProfileMeta::Circular {
            outer_radius,
            inner_radius,
        } => {
            assert_relative_eq!(outer_radius, 75.0);
            assert_relative_eq!(inner_radius.unwrap(), 69.0);
        }
        other => panic!("expected circular profile, got {:?}", other),
    }
    assert_relative_eq!(column.placement.length, 4000.0);

    assert!(std::sync::Arc::ptr_eq(&report.elements[0].solid, &report.elements[2].solid));
    // The second and third column are the only hits
    assert_eq!(report.cache.hits, 2);
}

#[test]
fn test_parallel_matches_sequential() {
    let nodes = nodes();
    let sections = sections();

    let parallel = process_batch(
        &members(),
        &nodes,
        &sections,
        &GeometryCache::default(),
        &ProcessingConfig::default(),
    );
    let sequential = process_batch(
        &members(),
        &nodes,
        &sections,
        &GeometryCache::default(),
        &ProcessingConfig::default().sequential(),
    );

    assert_eq!(parallel.elements.len(), sequential.elements.len());
    for (a, b) in parallel.elements.iter().zip(&sequential.elements) {
        assert_eq!(a.member_id, b.member_id);
        assert_eq!(a.placement, b.placement);
        assert_eq!(*a.solid, *b.solid);
    }
    assert_eq!(parallel.failures, sequential.failures);
}

#[test]
fn test_summary() {
    let nodes = nodes();
    let sections = sections();
    let cache = GeometryCache::default();
    let report = process_batch(&members(), &nodes, &sections, &cache, &ProcessingConfig::default());

    let summary = report.summary();
    assert_eq!(summary.total_members, 9);
    assert_eq!(summary.succeeded, 6);
    assert_eq!(summary.failed, 3);
    assert_eq!(summary.tapered, 1);
    assert_eq!(summary.secondary_parts, 1);

    let json: serde_json::Value = serde_json::from_str(&report.summary_json().unwrap()).unwrap();
    assert_eq!(json["failed"], 3);
    assert_eq!(json["failures"][0]["member_id"], "G2");
    assert_eq!(json["failures"][0]["failure"]["reason"], "missing_node_data");

    let rise: Vec<_> = report.elements[5].secondary_by_role(SecondaryRole::Rise).collect();
    assert_eq!(rise.len(), 1);
}
