// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Beams and braces

use crate::element::ElementGeometry;
use crate::error::Result;
use crate::orchestrator::Orchestrator;
use stb_lite_core::{degrees_to_radians, BeamMember, MemberKind};

impl Orchestrator<'_> {
    /// Horizontal and inclined members between two nodes
    ///
    /// Offsets are in the end-plane frame. Beams (not braces) hang below the
    /// node line when top alignment is enabled and no end carries a vertical
    /// offset; the governing height is the encasement's when there is one.
    pub fn beam(&self, member: &BeamMember) -> Result<ElementGeometry> {
        let start = self.node(&member.start)?;
        let end = self.node(&member.end)?;
        let spec = self.section(&member.section)?;
        let shaped = self.shape(spec);

        let section_height = (self.config.top_aligned_beams && member.kind == MemberKind::Beam)
            .then(|| match spec.encasement.as_deref() {
                Some(encasement) => self.shape(encasement).params.section_height(),
                None => shaped.params.section_height(),
            });

        let placement = self.calculator.place_horizontal(
            start,
            end,
            &member.offset_start,
            &member.offset_end,
            degrees_to_radians(member.rotate),
            section_height,
        )?;

        let (signature, solid) =
            self.cached_extrusion(&shaped.params, &shaped.profile, placement.length)?;
        let secondary = self.release_on_err(
            &[&signature],
            self.composite_parts(spec, &shaped, &placement, false),
        )?;

        tracing::trace!(
            member = %member.id,
            family = %shaped.family,
            length = placement.length,
            "Beam placed"
        );

        Ok(ElementGeometry {
            member_id: member.id.clone(),
            kind: member.kind,
            family: shaped.family,
            profile: shaped.profile,
            placement,
            solid,
            signature,
            tapered: false,
            secondary,
        })
    }
}
