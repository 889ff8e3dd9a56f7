//! Section properties for beams bent in a single plane

use serde::{Deserialize, Serialize};

/// Cross-section properties about the bending axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area in m²
    pub a: f64,
    /// Second moment of area about the bending axis in m⁴
    pub i: f64,
    /// Depth of section (optional) in m
    pub depth: Option<f64>,
}

impl Section {
    /// Create a new section with basic properties
    pub fn new(a: f64, i: f64) -> Self {
        Self { a, i, depth: None }
    }

    /// Create a rectangular section bent about its width axis
    pub fn rectangular(width: f64, depth: f64) -> Self {
        Self {
            a: width * depth,
            i: width * depth.powi(3) / 12.0,
            depth: Some(depth),
        }
    }

    /// Create a circular section
    pub fn circular(diameter: f64) -> Self {
        let r = diameter / 2.0;
        Self {
            a: std::f64::consts::PI * r.powi(2),
            i: std::f64::consts::PI * r.powi(4) / 4.0,
            depth: Some(diameter),
        }
    }

    /// Elastic section modulus (I / c), if the depth is known
    pub fn elastic_modulus(&self) -> Option<f64> {
        self.depth.map(|d| self.i / (d / 2.0))
    }
}

impl Default for Section {
    fn default() -> Self {
        // 100mm x 100mm square, I = 8.333e-6 m⁴
        Self::rectangular(0.1, 0.1)
    }
}
