//! Mech Solver - small mechanical engineering solvers in native Rust
//!
//! The core is a finite element solver for a cantilever beam built from
//! Euler-Bernoulli elements and checked against the closed-form deflection.
//! Around it sit a few classic textbook models:
//! - Shear force and bending moment diagrams for a simply supported beam
//! - 1D transient heat conduction (explicit finite differences)
//! - Heat exchanger effectiveness-NTU curves and a marched double-pipe exchanger
//! - Air-standard Otto and Diesel cycles
//!
//! ## Example
//! ```rust
//! use mech_solver::prelude::*;
//!
//! let beam = Beam::new(1.0, 200e9, 8.333e-6, 20).unwrap();
//! let result = analyze_cantilever(&beam, 1000.0, &AnalysisOptions::default()).unwrap();
//!
//! // Tip deflection of a cantilever is -P L³ / (3 E I)
//! let exact = analytical_tip_deflection(1000.0, 200e9, 8.333e-6, 1.0);
//! assert!((result.tip_deflection() - exact).abs() < 1e-10);
//! ```

pub mod analysis;
pub mod cantilever;
pub mod diagrams;
pub mod elements;
pub mod error;
pub mod math;
pub mod results;
pub mod thermal;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, LinearSolver};
    pub use crate::cantilever::{
        analytical_deflection, analytical_tip_deflection, analyze_cantilever, CantileverInput,
    };
    pub use crate::diagrams::{BeamDiagrams, SimplySupportedBeam};
    pub use crate::elements::{Beam, Material, Section};
    pub use crate::error::{MechError, MechResult};
    pub use crate::results::{CantileverResult, DeflectionPoint, FixedEndReactions};
    pub use crate::thermal::{
        DieselCycle, DoublePipeExchanger, ExchangerStreams, FlowArrangement, HeatConduction1D,
        OttoCycle, SweepRequest,
    };
}

#[cfg(feature = "wasm")]
pub mod wasm;
