// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry configuration, optionally overridden from environment variables.

/// Default number of segments used to sample circular profiles.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 32;
/// Default cache entry ceiling.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 500;
/// Default cache size ceiling (100 MiB).
pub const DEFAULT_CACHE_MAX_BYTES: usize = 100 * 1024 * 1024;
/// Coincident-endpoint tolerance in millimeters.
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 1e-6;
/// Decimal places kept for parameters in cache signatures.
pub const DEFAULT_SIGNATURE_PRECISION: u32 = 3;

/// Geometry configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryConfig {
    /// Segments used when sampling circles into polygons.
    pub circle_segments: usize,
    /// Maximum number of cached solids.
    pub cache_max_entries: usize,
    /// Maximum estimated size of all cached solids in bytes.
    pub cache_max_bytes: usize,
    /// Members shorter than this are degenerate.
    pub length_tolerance: f64,
    /// Decimal places used when rounding parameters into a cache signature.
    pub signature_precision: u32,
}

impl GeometryConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            circle_segments: env_or("STB_LITE_CIRCLE_SEGMENTS", defaults.circle_segments).max(3),
            cache_max_entries: env_or("STB_LITE_CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_max_bytes: env_or("STB_LITE_CACHE_MAX_BYTES", defaults.cache_max_bytes),
            length_tolerance: defaults.length_tolerance,
            signature_precision: defaults.signature_precision,
        }
    }

    /// Override the circle sampling resolution (minimum 3).
    pub fn with_circle_segments(mut self, segments: usize) -> Self {
        self.circle_segments = segments.max(3);
        self
    }

    /// Override the cache ceilings.
    pub fn with_cache_limits(mut self, max_entries: usize, max_bytes: usize) -> Self {
        self.cache_max_entries = max_entries;
        self.cache_max_bytes = max_bytes;
        self
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            cache_max_bytes: DEFAULT_CACHE_MAX_BYTES,
            length_tolerance: DEFAULT_LENGTH_TOLERANCE,
            signature_precision: DEFAULT_SIGNATURE_PRECISION,
        }
    }
}

fn env_or(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
