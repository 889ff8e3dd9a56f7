//! Air-standard Otto and Diesel cycles
//!
//! Ideal gas, isentropic compression and expansion. Pressures are in the
//! units of `p1` (atm by default) and volumes in the units of `v1`.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, MechError, MechResult};

/// Thermodynamic state of the working gas
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatePoint {
    pub pressure: f64,
    pub volume: f64,
    pub temperature: f64,
}

/// The four corner states of a cycle and its thermal efficiency
#[derive(Debug, Clone, Serialize)]
pub struct CycleResult {
    /// States 1 to 4
    pub states: [StatePoint; 4],
    pub efficiency: f64,
}

impl CycleResult {
    /// Closed P-V polygon 1-2-3-4-1
    pub fn pv_polygon(&self) -> Vec<(f64, f64)> {
        self.states
            .iter()
            .chain(std::iter::once(&self.states[0]))
            .map(|s| (s.volume, s.pressure))
            .collect()
    }

    /// Highest pressure reached in the cycle
    pub fn peak_pressure(&self) -> f64 {
        self.states.iter().map(|s| s.pressure).fold(f64::MIN, f64::max)
    }
}

/// Intake state shared by both cycles
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeState {
    pub p1: f64,
    pub t1: f64,
    pub v1: f64,
}

impl Default for IntakeState {
    fn default() -> Self {
        Self {
            p1: 1.0,
            t1: 300.0,
            v1: 1.0,
        }
    }
}

impl IntakeState {
    fn validate(&self) -> MechResult<()> {
        require_positive("p1", self.p1)?;
        require_positive("t1", self.t1)?;
        require_positive("v1", self.v1)?;
        Ok(())
    }

    fn state(&self) -> StatePoint {
        StatePoint {
            pressure: self.p1,
            volume: self.v1,
            temperature: self.t1,
        }
    }
}

fn validate_gamma_and_ratio(gamma: f64, compression_ratio: f64) -> MechResult<()> {
    if !(gamma.is_finite() && gamma > 1.0) {
        return Err(MechError::InvalidConfiguration(format!(
            "specific heat ratio must exceed 1, got {}",
            gamma
        )));
    }
    if !(compression_ratio.is_finite() && compression_ratio > 1.0) {
        return Err(MechError::InvalidConfiguration(format!(
            "compression ratio must exceed 1, got {}",
            compression_ratio
        )));
    }
    Ok(())
}

/// Isentropic change from `from` to `volume`
fn isentropic(from: StatePoint, volume: f64, gamma: f64) -> StatePoint {
    let temperature = from.temperature * (from.volume / volume).powf(gamma - 1.0);
    StatePoint {
        pressure: from.pressure * (temperature / from.temperature) * (from.volume / volume),
        volume,
        temperature,
    }
}

/// Spark-ignition cycle with constant-volume heat addition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OttoCycle {
    pub gamma: f64,
    pub compression_ratio: f64,
    /// Peak temperature after heat addition in K
    pub t3: f64,
    pub intake: IntakeState,
}

impl Default for OttoCycle {
    fn default() -> Self {
        Self {
            gamma: 1.4,
            compression_ratio: 8.0,
            t3: 1800.0,
            intake: IntakeState::default(),
        }
    }
}

impl OttoCycle {
    /// Closed-form efficiency `1 - 1 / r^(gamma - 1)`
    pub fn ideal_efficiency(&self) -> f64 {
        1.0 - 1.0 / self.compression_ratio.powf(self.gamma - 1.0)
    }

    pub fn solve(&self) -> MechResult<CycleResult> {
        validate_gamma_and_ratio(self.gamma, self.compression_ratio)?;
        self.intake.validate()?;
        require_positive("t3", self.t3)?;

        let s1 = self.intake.state();
        let s2 = isentropic(s1, s1.volume / self.compression_ratio, self.gamma);
        if self.t3 <= s2.temperature {
            return Err(MechError::InvalidConfiguration(format!(
                "peak temperature {} K must exceed the compression end temperature {:.1} K",
                self.t3, s2.temperature
            )));
        }
        let s3 = StatePoint {
            pressure: s2.pressure * self.t3 / s2.temperature,
            volume: s2.volume,
            temperature: self.t3,
        };
        let s4 = isentropic(s3, s1.volume, self.gamma);

        Ok(CycleResult {
            states: [s1, s2, s3, s4],
            efficiency: self.ideal_efficiency(),
        })
    }
}

/// Compression-ignition cycle with constant-pressure heat addition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DieselCycle {
    pub gamma: f64,
    pub compression_ratio: f64,
    /// Volume ratio across heat addition, `V3 / V2`
    pub cutoff_ratio: f64,
    pub intake: IntakeState,
}

impl Default for DieselCycle {
    fn default() -> Self {
        Self {
            gamma: 1.4,
            compression_ratio: 15.0,
            cutoff_ratio: 2.0,
            intake: IntakeState::default(),
        }
    }
}

impl DieselCycle {
    /// Closed-form efficiency `1 - (rc^g - 1) / (g r^(g-1) (rc - 1))`
    pub fn ideal_efficiency(&self) -> f64 {
        let (g, r, rc) = (self.gamma, self.compression_ratio, self.cutoff_ratio);
        1.0 - (rc.powf(g) - 1.0) / (g * r.powf(g - 1.0) * (rc - 1.0))
    }

    pub fn solve(&self) -> MechResult<CycleResult> {
        validate_gamma_and_ratio(self.gamma, self.compression_ratio)?;
        self.intake.validate()?;
        let rc = self.cutoff_ratio;
        if !(rc.is_finite() && rc > 1.0 && rc < self.compression_ratio) {
            return Err(MechError::InvalidConfiguration(format!(
                "cutoff ratio must lie in (1, {}), got {}",
                self.compression_ratio, rc
            )));
        }

        let s1 = self.intake.state();
        let s2 = isentropic(s1, s1.volume / self.compression_ratio, self.gamma);
        let s3 = StatePoint {
            pressure: s2.pressure,
            volume: rc * s2.volume,
            temperature: s2.temperature * rc,
        };
        let s4 = isentropic(s3, s1.volume, self.gamma);

        // Heat in at constant pressure, heat out at constant volume
        let efficiency = 1.0
            - (s4.temperature - s1.temperature)
                / (self.gamma * (s3.temperature - s2.temperature));

        Ok(CycleResult {
            states: [s1, s2, s3, s4],
            efficiency,
        })
    }
}
