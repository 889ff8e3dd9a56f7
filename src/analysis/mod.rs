//! Analysis options

use serde::{Deserialize, Serialize};

use crate::error::{require_count, MechResult};

/// Largest number of points on the analytical reference curve
pub const MAX_ANALYTICAL_SAMPLES: usize = 100_000;

/// Direct solver used for the reduced stiffness system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSolver {
    /// LU decomposition with partial pivoting
    Lu,
    /// Cholesky decomposition (symmetric positive definite systems only)
    Cholesky,
}

impl Default for LinearSolver {
    fn default() -> Self {
        Self::Lu
    }
}

/// Options for a cantilever analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Direct solver for the reduced system
    pub solver: LinearSolver,
    /// Number of points on the analytical reference curve (0 = skip it)
    pub analytical_samples: usize,
    /// Enable logging/progress output
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            solver: LinearSolver::Lu,
            analytical_samples: 100,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Create options for an LU-based solve
    pub fn linear() -> Self {
        Self::default()
    }

    /// Create options for a Cholesky-based solve
    pub fn cholesky() -> Self {
        Self {
            solver: LinearSolver::Cholesky,
            ..Self::default()
        }
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Set the analytical reference resolution
    pub fn with_analytical_samples(mut self, samples: usize) -> Self {
        self.analytical_samples = samples;
        self
    }

    /// Skip the analytical reference curve
    pub fn without_reference(self) -> Self {
        self.with_analytical_samples(0)
    }

    pub fn validate(&self) -> MechResult<()> {
        require_count(
            "analytical_samples",
            self.analytical_samples,
            0,
            MAX_ANALYTICAL_SAMPLES,
        )?;
        Ok(())
    }
}
