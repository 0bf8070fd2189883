// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Processing configuration loaded from environment variables.

use stb_lite_geometry::GeometryConfig;

/// Base plate thickness used when a plate spec carries none (mm).
pub const DEFAULT_BASE_PLATE_THICKNESS: f64 = 25.0;

/// Processing configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingConfig {
    /// Profile sampling, cache ceilings and tolerances.
    pub geometry: GeometryConfig,
    /// Process members on the rayon thread pool.
    pub parallel: bool,
    /// Hang beams below their node line (top face on the line).
    pub top_aligned_beams: bool,
    /// Fallback thickness for base plates without one.
    pub base_plate_thickness: f64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            parallel: true,
            top_aligned_beams: true,
            base_plate_thickness: DEFAULT_BASE_PLATE_THICKNESS,
        }
    }
}

impl ProcessingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            geometry: GeometryConfig::from_env(),
            parallel: std::env::var("STB_LITE_PARALLEL")
                .map(|v| parse_flag(&v).unwrap_or(true))
                .unwrap_or(true),
            top_aligned_beams: std::env::var("STB_LITE_TOP_ALIGNED_BEAMS")
                .map(|v| parse_flag(&v).unwrap_or(true))
                .unwrap_or(true),
            base_plate_thickness: std::env::var("STB_LITE_BASE_PLATE_THICKNESS")
                .ok()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|t| t.is_finite() && *t > 0.0)
                .unwrap_or(DEFAULT_BASE_PLATE_THICKNESS),
        }
    }

    /// Sequential processing, handy for deterministic logs
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProcessingConfig::default();
        assert!(config.parallel);
        assert!(config.top_aligned_beams);
        assert_eq!(config.base_plate_thickness, 25.0);
        assert!(!config.sequential().parallel);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
