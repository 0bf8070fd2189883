// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-member failure reasons.
//!
//! Recoverable problems (unknown family, inconsistent thickness, unusable
//! taper data) never reach this type; they are fixed up with a fallback and
//! logged where they happen.

use serde::Serialize;
use thiserror::Error;

/// Result type for orchestrator calls
pub type Result<T> = std::result::Result<T, MemberFailure>;

/// Why a member produced no geometry
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum MemberFailure {
    #[error("Missing node data: {0}")]
    MissingNodeData(String),

    #[error("Missing section data: {0}")]
    MissingSectionData(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Geometry error: {0}")]
    Geometry(String),
}

impl From<stb_lite_core::Error> for MemberFailure {
    fn from(error: stb_lite_core::Error) -> Self {
        match error {
            stb_lite_core::Error::MissingNode(id) => Self::MissingNodeData(id),
            stb_lite_core::Error::MissingSection(id) => Self::MissingSectionData(id),
            other => Self::Geometry(other.to_string()),
        }
    }
}

impl From<stb_lite_geometry::Error> for MemberFailure {
    fn from(error: stb_lite_geometry::Error) -> Self {
        match error {
            stb_lite_geometry::Error::DegenerateGeometry(msg) => Self::DegenerateGeometry(msg),
            stb_lite_geometry::Error::Core(inner) => inner.into(),
            other => Self::Geometry(other.to_string()),
        }
    }
}
