//! Result types for cantilever analysis

use serde::Serialize;

use crate::cantilever::analytical_deflection;
use crate::elements::{Beam, Material, Section};

/// Transverse deflection at a position along the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeflectionPoint {
    /// Distance from the clamped end in m
    pub x: f64,
    /// Transverse deflection in m (positive up)
    pub y: f64,
}

/// Reactions at the clamped end
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FixedEndReactions {
    /// Vertical reaction force (positive up)
    pub force: f64,
    /// Reaction moment (counter-clockwise positive)
    pub moment: f64,
}

/// Deviation of the nodal solution from the closed-form curve
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReferenceError {
    /// Largest absolute nodal deviation in m
    pub max_abs: f64,
    /// Tip deviation relative to the analytical tip deflection
    pub tip_relative: f64,
}

/// Member check from material and section properties
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SectionCheck {
    /// Beam mass `rho A L` in kg
    pub mass: f64,
    /// Shear modulus in Pa
    pub shear_modulus: f64,
    /// Peak bending stress `|M| / S` at the clamped end in Pa, if the depth is known
    pub max_bending_stress: Option<f64>,
}

/// Full result of a cantilever analysis
#[derive(Debug, Clone, Serialize)]
pub struct CantileverResult {
    /// Beam that was analyzed
    pub beam: Beam,
    /// Downward tip load magnitude in N
    pub tip_load: f64,
    /// Deflection at every node, clamped end first
    pub nodes: Vec<DeflectionPoint>,
    /// Rotation at every node in rad
    pub rotations: Vec<f64>,
    /// Full displacement vector `[v0, theta0, v1, theta1, ...]`
    pub displacements: Vec<f64>,
    /// Reactions recovered at the clamped end
    pub reactions: FixedEndReactions,
    /// Closed-form reference curve on an independent grid (may be empty)
    pub analytical: Vec<DeflectionPoint>,
}

impl CantileverResult {
    /// Deflection of the free end
    pub fn tip_deflection(&self) -> f64 {
        self.nodes.last().map(|p| p.y).unwrap_or(0.0)
    }

    /// Rotation of the free end
    pub fn tip_rotation(&self) -> f64 {
        self.rotations.last().copied().unwrap_or(0.0)
    }

    /// Node with the largest deflection magnitude
    pub fn max_deflection(&self) -> DeflectionPoint {
        self.nodes
            .iter()
            .copied()
            .fold(DeflectionPoint { x: 0.0, y: 0.0 }, |best, p| {
                if p.y.abs() > best.y.abs() {
                    p
                } else {
                    best
                }
            })
    }

    /// Compare nodal deflections against the closed-form curve at the same positions
    pub fn reference_error(&self) -> ReferenceError {
        let exact = |x: f64| {
            analytical_deflection(
                self.tip_load,
                self.beam.e(),
                self.beam.i(),
                self.beam.length(),
                x,
            )
        };

        let max_abs = self
            .nodes
            .iter()
            .map(|p| (p.y - exact(p.x)).abs())
            .fold(0.0_f64, f64::max);

        let exact_tip = exact(self.beam.length());
        let tip_relative = if exact_tip.abs() > 0.0 {
            ((self.tip_deflection() - exact_tip) / exact_tip).abs()
        } else {
            self.tip_deflection().abs()
        };

        ReferenceError {
            max_abs,
            tip_relative,
        }
    }

    /// Mass, shear modulus and root bending stress for the given properties
    pub fn section_check(&self, material: &Material, section: &Section) -> SectionCheck {
        SectionCheck {
            mass: material.rho * section.a * self.beam.length(),
            shear_modulus: material.g(),
            max_bending_stress: section
                .elastic_modulus()
                .map(|s| self.reactions.moment.abs() / s),
        }
    }
}
