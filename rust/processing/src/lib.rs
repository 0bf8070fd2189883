// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STB-Lite Processing
//!
//! Per-member geometry orchestration. An [`Orchestrator`] resolves nodes and
//! sections through caller-supplied lookups, builds the profile and
//! placement, and shares solids through a [`GeometryCache`]. Failures are
//! per member ([`MemberFailure`]) and never abort a batch.
//!
//! ```no_run
//! use rustc_hash::FxHashMap;
//! use stb_lite_core::{ColumnMember, Member, NodePosition, NodeRef, SectionSpec};
//! use stb_lite_geometry::GeometryCache;
//! use stb_lite_processing::{process_batch, ProcessingConfig};
//!
//! let mut nodes: FxHashMap<String, NodePosition> = FxHashMap::default();
//! nodes.insert("N1".into(), NodePosition::new(0.0, 0.0, 0.0));
//! nodes.insert("N2".into(), NodePosition::new(0.0, 0.0, 3000.0));
//!
//! let mut sections: FxHashMap<String, SectionSpec> = FxHashMap::default();
//! sections.insert(
//!     "P1".into(),
//!     SectionSpec::new("P1")
//!         .with_family("PIPE")
//!         .with_dimension("outerDiameter", 150.0)
//!         .with_dimension("wallThickness", 6.0),
//! );
//!
//! let members = vec![Member::Column(ColumnMember::new(
//!     "C1",
//!     NodeRef::id("N1"),
//!     NodeRef::id("N2"),
//!     "P1",
//! ))];
//!
//! let config = ProcessingConfig::from_env();
//! let cache = GeometryCache::from_config(&config.geometry);
//! let report = process_batch(&members, &nodes, &sections, &cache, &config);
//! println!("{}", report.summary_json().unwrap());
//! ```

pub mod batch;
pub mod beam;
pub mod column;
pub mod config;
pub mod element;
pub mod error;
pub mod foundation;
pub mod orchestrator;
pub mod pile;
pub mod section;

pub use batch::{process_batch, BatchReport, BatchSummary, MemberError};
pub use config::ProcessingConfig;
pub use element::{ElementGeometry, SecondaryProfile, SecondaryRole};
pub use error::{MemberFailure, Result};
pub use orchestrator::Orchestrator;
pub use pile::pile_head;
pub use section::{fill_parameters, ShapedSection};
