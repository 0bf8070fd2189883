// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orchestrator output: one primary solid plus zero or more sibling parts.

use serde::Serialize;
use stb_lite_core::MemberKind;
use stb_lite_geometry::{GeometryCache, Mesh, Placement, Profile, ProfileFamily, Signature};
use std::sync::Arc;

/// What a sibling part represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryRole {
    /// Concrete around a steel section (SRC)
    Encasement,
    /// Concrete inside a steel tube (CFT)
    Fill,
    /// Plate under a column foot
    BasePlate,
    /// Upper part of a foundation column
    Rise,
}

/// A sibling solid sharing the member's frame but drawn separately
#[derive(Debug, Clone)]
pub struct SecondaryProfile {
    pub role: SecondaryRole,
    pub family: ProfileFamily,
    pub profile: Profile,
    pub placement: Placement,
    /// Solid in the placement's local frame
    pub solid: Arc<Mesh>,
    pub signature: Signature,
}

/// Geometry of one member
#[derive(Debug, Clone)]
pub struct ElementGeometry {
    pub member_id: String,
    pub kind: MemberKind,
    pub family: ProfileFamily,
    /// Primary cross-section (the shaft section for tapered piles)
    pub profile: Profile,
    pub placement: Placement,
    /// Solid in the placement's local frame; shared with the cache
    pub solid: Arc<Mesh>,
    pub signature: Signature,
    /// Whether the solid was lofted through taper stations
    pub tapered: bool,
    pub secondary: Vec<SecondaryProfile>,
}

impl ElementGeometry {
    /// Primary solid in model space
    pub fn world_mesh(&self) -> Mesh {
        self.solid.transformed(&self.placement.to_matrix())
    }

    /// Primary and secondary solids merged in model space
    pub fn merged_world_mesh(&self) -> Mesh {
        let mut mesh = self.world_mesh();
        for part in &self.secondary {
            mesh.merge(&part.solid.transformed(&part.placement.to_matrix()));
        }
        mesh
    }

    pub fn secondary_by_role(&self, role: SecondaryRole) -> impl Iterator<Item = &SecondaryProfile> {
        self.secondary.iter().filter(move |p| p.role == role)
    }

    /// Give the cached solids back once the caller is done with them
    pub fn release(self, cache: &GeometryCache) {
        cache.release(&self.signature);
        for part in &self.secondary {
            cache.release(&part.signature);
        }
    }
}
