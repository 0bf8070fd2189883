// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural model records
//!
//! Value types created by the caller (after parsing the source model) and
//! handed to the geometry orchestrators. Nothing here is mutated after
//! construction.

use crate::dimensions::RawDimensions;

/// Model-space node position in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodePosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl NodePosition {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Member endpoint: a node id resolved through a lookup, or raw coordinates
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeRef {
    Id(String),
    Coordinates(NodePosition),
}

impl NodeRef {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::Coordinates(NodePosition::new(x, y, z))
    }
}

/// Material class of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionMaterial {
    /// Plain steel shape
    #[default]
    Steel,
    /// Reinforced concrete
    Concrete,
    /// Steel shape encased in concrete (SRC)
    SteelConcrete,
    /// Concrete-filled steel tube (CFT)
    ConcreteFilledSteel,
}

/// Base plate under a column foot
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasePlateSpec {
    pub width_x: f64,
    pub width_y: f64,
    pub thickness: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl BasePlateSpec {
    pub fn new(width_x: f64, width_y: f64, thickness: f64) -> Self {
        Self {
            width_x,
            width_y,
            thickness,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Cross-section definition
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionSpec {
    pub id: String,
    /// Explicit shape-type code from the source (`"H"`, `"BOX"`, `"Pipe"`, ...)
    pub family_code: Option<String>,
    pub dimensions: RawDimensions,
    /// Name of a catalogued steel shape (`"H-400x200x8x13"`)
    pub steel_shape_ref: Option<String>,
    pub material: SectionMaterial,
    /// Concrete encasement / fill drawn as a sibling solid
    pub encasement: Option<Box<SectionSpec>>,
    pub base_plate: Option<BasePlateSpec>,
}

impl SectionSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_family(mut self, code: impl Into<String>) -> Self {
        self.family_code = Some(code.into());
        self
    }

    pub fn with_dimension(mut self, key: &str, value: f64) -> Self {
        self.dimensions.insert(key, value);
        self
    }

    pub fn with_dimensions(mut self, dimensions: RawDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_steel_shape(mut self, name: impl Into<String>) -> Self {
        self.steel_shape_ref = Some(name.into());
        self
    }

    pub fn with_material(mut self, material: SectionMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_encasement(mut self, encasement: SectionSpec) -> Self {
        self.encasement = Some(Box::new(encasement));
        self
    }

    pub fn with_base_plate(mut self, plate: BasePlateSpec) -> Self {
        self.base_plate = Some(plate);
        self
    }
}

/// Member class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Column,
    Post,
    Beam,
    Brace,
    Pile,
    FoundationColumn,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Column => "Column",
            Self::Post => "Post",
            Self::Beam => "Beam",
            Self::Brace => "Brace",
            Self::Pile => "Pile",
            Self::FoundationColumn => "FoundationColumn",
        }
    }
}

/// Horizontal offset in world X/Y
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanOffset {
    pub x: f64,
    pub y: f64,
}

impl PlanOffset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Offset in a horizontal member's end-plane frame
///
/// `x` runs along the member, `y` is lateral (horizontal, perpendicular to
/// the member), `z` is vertical. A present `z` disables top alignment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndOffset {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl EndOffset {
    pub fn new(x: f64, y: f64, z: Option<f64>) -> Self {
        Self { x, y, z }
    }
}

/// Column or post between two nodes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnMember {
    pub id: String,
    /// `Column` or `Post`
    pub kind: MemberKind,
    pub bottom: NodeRef,
    pub top: NodeRef,
    pub section: String,
    /// Roll about the member axis in degrees
    pub rotate: f64,
    pub offset_bottom: PlanOffset,
    pub offset_top: PlanOffset,
}

impl ColumnMember {
    pub fn new(id: impl Into<String>, bottom: NodeRef, top: NodeRef, section: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MemberKind::Column,
            bottom,
            top,
            section: section.into(),
            rotate: 0.0,
            offset_bottom: PlanOffset::default(),
            offset_top: PlanOffset::default(),
        }
    }
}

/// Beam or brace between two nodes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeamMember {
    pub id: String,
    /// `Beam` or `Brace`
    pub kind: MemberKind,
    pub start: NodeRef,
    pub end: NodeRef,
    pub section: String,
    /// Roll about the member axis in degrees
    pub rotate: f64,
    pub offset_start: EndOffset,
    pub offset_end: EndOffset,
}

impl BeamMember {
    pub fn new(id: impl Into<String>, start: NodeRef, end: NodeRef, section: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: MemberKind::Beam,
            start,
            end,
            section: section.into(),
            rotate: 0.0,
            offset_start: EndOffset::default(),
            offset_end: EndOffset::default(),
        }
    }
}

/// Enlarged-end dimensions of a cast-in-place pile
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PileTaperDims {
    /// Shaft diameter
    pub d_axial: Option<f64>,
    pub d_extension_foot: Option<f64>,
    /// Length of the straight enlarged part at the foot
    pub length_extension_foot: Option<f64>,
    /// Taper angle from the pile axis in degrees
    pub angle_extension_foot: Option<f64>,
    pub d_extension_top: Option<f64>,
    pub length_extension_top: Option<f64>,
    pub angle_extension_top: Option<f64>,
}

/// Pile shaft variant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PileTaper {
    #[default]
    Straight,
    ExtendedFoot(PileTaperDims),
    ExtendedTop(PileTaperDims),
    ExtendedTopFoot(PileTaperDims),
}

/// Pile hanging from a reference node
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PileMember {
    pub id: String,
    /// Reference node; the pile top sits `level_top` above it
    pub node: NodeRef,
    /// Explicit bottom node; when absent the bottom is `length_all` below the top
    pub bottom_node: Option<NodeRef>,
    /// Pile top relative to the reference node (usually negative)
    pub level_top: f64,
    pub length_all: f64,
    pub offset: PlanOffset,
    /// Roll about the member axis in degrees
    pub rotate: f64,
    pub section: String,
    pub taper: PileTaper,
}

impl PileMember {
    pub fn new(id: impl Into<String>, node: NodeRef, length_all: f64, section: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node,
            bottom_node: None,
            level_top: 0.0,
            length_all,
            offset: PlanOffset::default(),
            rotate: 0.0,
            section: section.into(),
            taper: PileTaper::Straight,
        }
    }
}

/// Foundation column: embedded part (FD) with an optional rise (WR) above it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoundationColumnMember {
    pub id: String,
    /// Base node; FD starts here and runs upward
    pub node: NodeRef,
    pub length_fd: f64,
    pub length_wr: f64,
    pub offset_fd: PlanOffset,
    pub offset_wr: PlanOffset,
    /// Roll about the member axis in degrees
    pub rotate: f64,
    pub section_fd: String,
    pub section_wr: Option<String>,
}

/// Any member the orchestrators can process
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Member {
    Column(ColumnMember),
    Beam(BeamMember),
    Pile(PileMember),
    FoundationColumn(FoundationColumnMember),
}

impl Member {
    pub fn id(&self) -> &str {
        match self {
            Self::Column(m) => &m.id,
            Self::Beam(m) => &m.id,
            Self::Pile(m) => &m.id,
            Self::FoundationColumn(m) => &m.id,
        }
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            Self::Column(m) => m.kind,
            Self::Beam(m) => m.kind,
            Self::Pile(_) => MemberKind::Pile,
            Self::FoundationColumn(_) => MemberKind::FoundationColumn,
        }
    }
}
