//! Time-share to colour mapping.
//!
//! A node whose total time is `v` out of the report total `T` gets
//! `intensity = 1 - (v / T)^p`. The intensity drives the green and blue
//! channels of a white-to-red background: `255` is white (cold), `0` is
//! pure red (the node took all of the time).
//!
//! Nodes outside `(0, T]` (or `(0, T)` with an exclusive boundary) get no
//! background at all, and their intensity is reported as 0.

use crate::utils::config::{DEFAULT_HEAT_EXPONENT, MAX_CHANNEL};
use serde::{Deserialize, Serialize};

/// Whether a node taking exactly the whole total is still coloured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// `v <= T` is coloured
    #[default]
    Inclusive,
    /// only `v < T` is coloured
    Exclusive,
}

/// RGB background colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// White-to-red ramp: red stays saturated, `channel` drives green and blue
    pub fn heat(channel: u8) -> Self {
        Self {
            r: MAX_CHANNEL,
            g: channel,
            b: channel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatScale {
    pub exponent: f64,
    pub boundary: Boundary,
}

impl Default for HeatScale {
    fn default() -> Self {
        Self {
            exponent: DEFAULT_HEAT_EXPONENT,
            boundary: Boundary::Inclusive,
        }
    }
}

impl HeatScale {
    pub fn new(exponent: f64) -> Self {
        Self {
            exponent,
            ..Self::default()
        }
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Whether `value` gets a background under this scale
    pub fn is_coloured(&self, value: u64, total: u64) -> bool {
        if total == 0 || value == 0 {
            return false;
        }
        match self.boundary {
            Boundary::Inclusive => value <= total,
            Boundary::Exclusive => value < total,
        }
    }

    /// `1 - (value / total)^exponent`, or 0 when the node is not coloured
    pub fn intensity(&self, value: u64, total: u64) -> f64 {
        if !self.is_coloured(value, total) {
            return 0.0;
        }

        let share = value as f64 / total as f64;
        (1.0 - share.powf(self.exponent)).clamp(0.0, 1.0)
    }

    /// Green/blue channel value for `value`
    pub fn channel(&self, value: u64, total: u64) -> u8 {
        (f64::from(MAX_CHANNEL) * self.intensity(value, total)).round() as u8
    }

    /// Background for a row, `None` meaning no emphasis
    pub fn background(&self, value: u64, total: u64) -> Option<Rgb> {
        self.is_coloured(value, total)
            .then(|| Rgb::heat(self.channel(value, total)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_total_has_no_emphasis() {
        let scale = HeatScale::default();
        assert_eq!(scale.intensity(10, 0), 0.0);
        assert_eq!(scale.background(10, 0), None);
    }

    #[test]
    fn test_zero_value_has_no_emphasis() {
        let scale = HeatScale::default();
        let intensity = scale.intensity(0, 100);
        assert_eq!(intensity, 0.0);
        assert!(!intensity.is_nan());
        assert_eq!(scale.background(0, 100), None);
    }

    #[test]
    fn test_value_above_total() {
        let scale = HeatScale::default();
        assert_eq!(scale.intensity(101, 100), 0.0);
        assert_eq!(scale.background(101, 100), None);
    }

    #[test]
    fn test_whole_total_is_pure_red_when_inclusive() {
        let scale = HeatScale::default();
        assert_eq!(scale.background(100, 100), Some(Rgb { r: 255, g: 0, b: 0 }));
    }

    #[test]
    fn test_exclusive_boundary() {
        let scale = HeatScale::default().with_boundary(Boundary::Exclusive);
        assert_eq!(scale.background(100, 100), None);
        assert!(scale.background(99, 100).is_some());
    }

    #[test]
    fn test_square_root_exponent() {
        let scale = HeatScale::new(0.5);
        // 1 - sqrt(0.25) = 0.5
        assert!((scale.intensity(25, 100) - 0.5).abs() < 1e-9);
        assert_eq!(scale.channel(25, 100), 128);
    }

    #[test]
    fn test_smaller_share_is_lighter() {
        let scale = HeatScale::default();
        assert!(scale.channel(1, 100) > scale.channel(50, 100));
    }
}
