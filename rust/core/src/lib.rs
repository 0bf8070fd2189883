// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # STB-Lite Core
//!
//! Structural model records consumed by the STB-Lite geometry pipeline.
//!
//! ## Overview
//!
//! - **Nodes**: [`NodePosition`] in model millimeters, referenced by id or
//!   given inline through [`NodeRef`]
//! - **Sections**: [`SectionSpec`] with raw, un-normalized dimensions
//!   ([`RawDimensions`]) and optional encasement / base plate siblings
//! - **Members**: column/post, beam/brace, pile and foundation-column records
//! - **Lookups**: [`NodeLookup`] and [`SectionLookup`], implemented for hash maps
//!
//! Parsing of the source model format happens elsewhere; this crate only
//! holds the already-resolved values.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for model records

pub mod dimensions;
pub mod error;
pub mod lookup;
pub mod model;
pub mod units;

pub use dimensions::RawDimensions;
pub use error::{Error, Result};
pub use lookup::{resolve_node, resolve_section, NodeLookup, SectionLookup};
pub use model::{
    BasePlateSpec, BeamMember, ColumnMember, EndOffset, FoundationColumnMember, Member,
    MemberKind, NodePosition, NodeRef, PileMember, PileTaper, PileTaperDims, PlanOffset,
    SectionMaterial, SectionSpec,
};
pub use units::{degrees_to_radians, parse_number};
