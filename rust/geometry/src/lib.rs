// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STB-Lite Geometry
//!
//! Cross-section profiles, member placement and solid generation for
//! structural members, using earcutr for cap triangulation and nalgebra for
//! transformations.
//!
//! The pipeline for one member:
//!
//! 1. [`family::resolve_family`] picks a [`ProfileFamily`] for a section.
//! 2. [`ParameterMapper::normalize`] turns raw dimensions into
//!    [`CanonicalParameters`].
//! 3. [`ProfileCalculator::calculate`] builds a centered 2D [`Profile`].
//! 4. [`GeometryCalculator`] computes the member [`Placement`].
//! 5. [`extrude_centered`] or [`taper::loft`] produces the [`Mesh`],
//!    memoized through [`GeometryCache`].

pub mod cache;
pub mod config;
pub mod error;
pub mod extrusion;
pub mod family;
pub mod ifc;
pub mod mapper;
pub mod mesh;
pub mod params;
pub mod placement;
pub mod profile;
pub mod profiles;
pub mod taper;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point2, Point3, UnitQuaternion, Vector2, Vector3};

pub use cache::{CacheStats, GeometryCache, Signature};
pub use config::GeometryConfig;
pub use error::{Error, Result};
pub use extrusion::{extrude_between, extrude_centered, extrude_profile};
pub use family::{resolve_family, resolve_family_with_source, ProfileFamily, Resolution};
pub use ifc::{to_ifc, IfcProfileMapping};
pub use mapper::ParameterMapper;
pub use mesh::Mesh;
pub use params::{Arrangement, CanonicalParameters};
pub use placement::{GeometryCalculator, Offset, Placement};
pub use profile::{Profile, ProfileMeta};
pub use profiles::ProfileCalculator;
pub use taper::{loft, EnlargedEnd, StationPosition, TaperStation};
