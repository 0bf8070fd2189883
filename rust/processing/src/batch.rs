// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch processing with parallel member orchestration.
//!
//! Members are independent; the only shared state is the geometry cache.
//! A failing member is reported and skipped, never aborting the batch.

use crate::config::ProcessingConfig;
use crate::element::ElementGeometry;
use crate::error::MemberFailure;
use crate::orchestrator::Orchestrator;
use rayon::prelude::*;
use serde::Serialize;
use stb_lite_core::{Member, MemberKind, NodeLookup, SectionLookup};
use stb_lite_geometry::{CacheStats, GeometryCache};
use std::time::{Duration, Instant};

/// A member that produced no geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberError {
    pub member_id: String,
    pub kind: MemberKind,
    pub failure: MemberFailure,
}

/// Outcome of a batch
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Successful members, in input order
    pub elements: Vec<ElementGeometry>,
    /// Failed members, in input order
    pub failures: Vec<MemberError>,
    /// Cache counters after the batch
    pub cache: CacheStats,
    pub elapsed: Duration,
}

/// Serializable digest of a [`BatchReport`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total_members: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub tapered: usize,
    pub secondary_parts: usize,
    pub cache_entries: usize,
    pub cache_bytes: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_evictions: u64,
    pub elapsed_ms: u64,
    pub failures: Vec<MemberError>,
}

impl BatchReport {
    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total_members: self.elements.len() + self.failures.len(),
            succeeded: self.elements.len(),
            failed: self.failures.len(),
            tapered: self.elements.iter().filter(|e| e.tapered).count(),
            secondary_parts: self.elements.iter().map(|e| e.secondary.len()).sum(),
            cache_entries: self.cache.entries,
            cache_bytes: self.cache.estimated_bytes,
            cache_hits: self.cache.hits,
            cache_misses: self.cache.misses,
            cache_evictions: self.cache.evictions,
            elapsed_ms: self.elapsed.as_millis() as u64,
            failures: self.failures.clone(),
        }
    }

    /// Summary as JSON
    pub fn summary_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.summary())
    }
}

impl Orchestrator<'_> {
    /// Process every member, in parallel when configured
    pub fn process_all(&self, members: &[Member]) -> BatchReport {
        let start = Instant::now();
        tracing::info!(
            members = members.len(),
            parallel = self.config.parallel,
            "Starting member geometry processing"
        );

        let outcomes: Vec<Result<ElementGeometry, MemberError>> = if self.config.parallel {
            members.par_iter().map(|member| self.outcome(member)).collect()
        } else {
            members.iter().map(|member| self.outcome(member)).collect()
        };

        let mut elements = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(element) => elements.push(element),
                Err(error) => failures.push(error),
            }
        }

        let report = BatchReport {
            elements,
            failures,
            cache: self.cache.stats(),
            elapsed: start.elapsed(),
        };

        tracing::info!(
            succeeded = report.elements.len(),
            failed = report.failures.len(),
            cache_entries = report.cache.entries,
            cache_hits = report.cache.hits,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Member geometry processing complete"
        );
        report
    }

    fn outcome(&self, member: &Member) -> Result<ElementGeometry, MemberError> {
        self.process(member).map_err(|failure| {
            tracing::warn!(
                member = %member.id(),
                kind = member.kind().as_str(),
                error = %failure,
                "Skipping member"
            );
            MemberError {
                member_id: member.id().to_string(),
                kind: member.kind(),
                failure,
            }
        })
    }
}

/// Process a batch of members against caller-supplied lookups
pub fn process_batch(
    members: &[Member],
    nodes: &(dyn NodeLookup + Sync),
    sections: &(dyn SectionLookup + Sync),
    cache: &GeometryCache,
    config: &ProcessingConfig,
) -> BatchReport {
    Orchestrator::new(nodes, sections, cache, config).process_all(members)
}
