// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Caller-supplied lookups for nodes and sections
//!
//! The geometry core performs no I/O; node positions and section
//! definitions are resolved in memory through these traits.

use crate::error::{Error, Result};
use crate::model::{NodePosition, NodeRef, SectionSpec};
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Node id → position
pub trait NodeLookup {
    fn node(&self, id: &str) -> Option<NodePosition>;
}

/// Section id → definition
///
/// Also used for steel shape catalogs keyed by shape name.
pub trait SectionLookup {
    fn section(&self, id: &str) -> Option<&SectionSpec>;
}

impl<S: BuildHasher> NodeLookup for HashMap<String, NodePosition, S> {
    #[inline]
    fn node(&self, id: &str) -> Option<NodePosition> {
        self.get(id).copied()
    }
}

impl<S: BuildHasher> SectionLookup for HashMap<String, SectionSpec, S> {
    #[inline]
    fn section(&self, id: &str) -> Option<&SectionSpec> {
        self.get(id)
    }
}

impl NodeLookup for [(String, NodePosition)] {
    fn node(&self, id: &str) -> Option<NodePosition> {
        self.iter().find(|(k, _)| k == id).map(|(_, p)| *p)
    }
}

/// Resolve an endpoint reference to a position
pub fn resolve_node<L: NodeLookup + ?Sized>(lookup: &L, node: &NodeRef) -> Result<NodePosition> {
    match node {
        NodeRef::Coordinates(position) => Ok(*position),
        NodeRef::Id(id) => lookup
            .node(id)
            .ok_or_else(|| Error::MissingNode(id.clone())),
    }
}

/// Resolve a section id to its definition
pub fn resolve_section<'a, L: SectionLookup + ?Sized>(
    lookup: &'a L,
    id: &str,
) -> Result<&'a SectionSpec> {
    lookup
        .section(id)
        .ok_or_else(|| Error::MissingSection(id.to_string()))
}
