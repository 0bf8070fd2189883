// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit conversion helpers
//!
//! Model coordinates and section dimensions are carried in millimeters.
//! Angles arrive in degrees from the source format and are converted
//! to radians before any placement math.

/// Convert degrees to radians
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Parse a numeric attribute string
///
/// Accepts surrounding whitespace and rejects trailing garbage
/// (`"450.0mm"` is not a number). Non-finite results are rejected.
#[inline]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match fast_float::parse::<f64, _>(trimmed) {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("450"), Some(450.0));
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("-3e2"), Some(-300.0));
        assert_eq!(parse_number("450mm"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_degrees() {
        assert_relative_eq!(degrees_to_radians(180.0), std::f64::consts::PI);
    }
}
