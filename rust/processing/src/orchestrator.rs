// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element geometry orchestrator
//!
//! Composes section resolution, profile construction, placement and solid
//! generation for one member. The per-class entry points live next to this
//! module (`column`, `beam`, `pile`, `foundation`); this file holds the
//! shared plumbing and the [`Member`] dispatch.

use crate::config::ProcessingConfig;
use crate::element::ElementGeometry;
use crate::error::Result;
use nalgebra::Point3;
use stb_lite_core::{resolve_node, resolve_section, Member, NodeLookup, NodeRef, SectionLookup, SectionSpec};
use stb_lite_geometry::placement::node_point;
use stb_lite_geometry::{
    extrude_centered, CanonicalParameters, GeometryCache, GeometryCalculator, Mesh, Profile,
    ProfileCalculator, Signature,
};
use std::sync::Arc;

/// Builds member geometry against caller-supplied lookups and a shared cache
pub struct Orchestrator<'a> {
    pub(crate) nodes: &'a (dyn NodeLookup + Sync),
    pub(crate) sections: &'a (dyn SectionLookup + Sync),
    pub(crate) catalog: Option<&'a (dyn SectionLookup + Sync)>,
    pub(crate) cache: &'a GeometryCache,
    pub(crate) config: &'a ProcessingConfig,
    pub(crate) profiles: ProfileCalculator,
    pub(crate) calculator: GeometryCalculator,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        nodes: &'a (dyn NodeLookup + Sync),
        sections: &'a (dyn SectionLookup + Sync),
        cache: &'a GeometryCache,
        config: &'a ProcessingConfig,
    ) -> Self {
        Self {
            nodes,
            sections,
            catalog: None,
            cache,
            config,
            profiles: ProfileCalculator::from_config(&config.geometry),
            calculator: GeometryCalculator::from_config(&config.geometry),
        }
    }

    /// Resolve `steel_shape_ref` names against a steel shape catalog
    pub fn with_catalog(mut self, catalog: &'a (dyn SectionLookup + Sync)) -> Self {
        self.catalog = Some(catalog);
        self
    }

    #[inline]
    pub fn cache(&self) -> &GeometryCache {
        self.cache
    }

    /// Build the geometry of any member
    pub fn process(&self, member: &Member) -> Result<ElementGeometry> {
        match member {
            Member::Column(m) => self.column(m),
            Member::Beam(m) => self.beam(m),
            Member::Pile(m) => self.pile(m),
            Member::FoundationColumn(m) => self.foundation_column(m),
        }
    }

    pub(crate) fn node(&self, node: &NodeRef) -> Result<Point3<f64>> {
        Ok(node_point(&resolve_node(self.nodes, node)?))
    }

    pub(crate) fn section(&self, id: &str) -> Result<&'a SectionSpec> {
        Ok(resolve_section(self.sections, id)?)
    }

    /// Straight solid for `params`, shared through the cache
    pub(crate) fn cached_extrusion(
        &self,
        params: &CanonicalParameters,
        profile: &Profile,
        length: f64,
    ) -> Result<(Signature, Arc<Mesh>)> {
        let signature = Signature::new(params, length, self.config.geometry.signature_precision);
        let solid = self
            .cache
            .get_or_insert_with(&signature, || extrude_centered(profile, length))?;
        Ok((signature, solid))
    }

    /// Drop the cache references of a half-built member before failing it
    pub(crate) fn release_on_err<T>(&self, signatures: &[&Signature], result: Result<T>) -> Result<T> {
        if result.is_err() {
            for signature in signatures {
                self.cache.release(signature);
            }
        }
        result
    }
}
