//! Material properties

use serde::{Deserialize, Serialize};

/// Elastic material properties for beam bending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Density in kg/m³
    pub rho: f64,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(e: f64, nu: f64, rho: f64) -> Self {
        Self { e, nu, rho }
    }

    /// Shear modulus derived from E and nu
    pub fn g(&self) -> f64 {
        self.e / (2.0 * (1.0 + self.nu))
    }

    /// Structural steel
    pub fn steel() -> Self {
        Self {
            e: 200e9,    // 200 GPa
            nu: 0.3,
            rho: 7850.0, // kg/m³
        }
    }

    /// Aluminum (6061-T6)
    pub fn aluminum() -> Self {
        Self {
            e: 68.9e9,   // 68.9 GPa
            nu: 0.33,
            rho: 2700.0, // kg/m³
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
