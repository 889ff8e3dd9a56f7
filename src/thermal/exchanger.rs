//! Heat exchanger performance
//!
//! Two models are provided:
//! - closed-form effectiveness-NTU relations for parallel, counterflow and
//!   crossflow arrangements, swept over a range of NTU
//! - a double-pipe exchanger marched segment by segment along its length,
//!   with both streams entering at x = 0

use std::f64::consts::PI;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{require_count, require_finite, require_positive, MechError, MechResult};
use crate::math;

/// Largest number of NTU samples in a sweep
pub const MAX_SWEEP_SAMPLES: usize = 100_000;

/// Largest number of segments in a marched exchanger
pub const MAX_SEGMENTS: usize = 100_000;

/// Flow arrangement of the two streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowArrangement {
    Parallel,
    Counterflow,
    /// Simplified single-pass crossflow, `1 - exp(-NTU (1 + Cr))`
    Crossflow,
}

impl FlowArrangement {
    pub const ALL: [FlowArrangement; 3] = [Self::Parallel, Self::Counterflow, Self::Crossflow];
}

/// Effectiveness for a capacity ratio `cr = C_min / C_max` and `ntu`
pub fn effectiveness(cr: f64, ntu: f64, arrangement: FlowArrangement) -> MechResult<f64> {
    if !(0.0..=1.0).contains(&cr) {
        return Err(MechError::InvalidConfiguration(format!(
            "capacity ratio must lie in [0, 1], got {}",
            cr
        )));
    }
    if !(ntu.is_finite() && ntu >= 0.0) {
        return Err(MechError::InvalidConfiguration(format!(
            "NTU must be a non-negative finite number, got {}",
            ntu
        )));
    }

    let eps = match arrangement {
        FlowArrangement::Parallel => (1.0 - (-ntu * (1.0 + cr)).exp()) / (1.0 + cr),
        FlowArrangement::Counterflow => {
            if (1.0 - cr).abs() < 1e-12 {
                // Balanced streams, limit of the general formula
                ntu / (1.0 + ntu)
            } else {
                let x = (-ntu * (1.0 - cr)).exp();
                (1.0 - x) / (1.0 - cr * x)
            }
        }
        FlowArrangement::Crossflow => 1.0 - (-ntu * (1.0 + cr)).exp(),
    };
    Ok(eps)
}

/// Inlet temperatures and heat capacity rates (m·cp, W/K) of both streams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangerStreams {
    pub t_hot_in: f64,
    pub t_cold_in: f64,
    pub c_hot: f64,
    pub c_cold: f64,
}

impl ExchangerStreams {
    fn validate(&self) -> MechResult<()> {
        require_finite("t_hot_in", self.t_hot_in)?;
        require_finite("t_cold_in", self.t_cold_in)?;
        require_positive("c_hot", self.c_hot)?;
        require_positive("c_cold", self.c_cold)?;
        Ok(())
    }

    pub fn c_min(&self) -> f64 {
        self.c_hot.min(self.c_cold)
    }

    pub fn c_max(&self) -> f64 {
        self.c_hot.max(self.c_cold)
    }

    /// `C_min / C_max`
    pub fn capacity_ratio(&self) -> f64 {
        self.c_min() / self.c_max()
    }

    /// Largest possible duty `C_min (Th_in - Tc_in)`
    pub fn max_duty(&self) -> f64 {
        self.c_min() * (self.t_hot_in - self.t_cold_in)
    }

    /// Outlet temperatures `(hot, cold)` for a given effectiveness
    pub fn outlet_temperatures(&self, eps: f64) -> (f64, f64) {
        let q = eps * self.max_duty();
        (self.t_hot_in - q / self.c_hot, self.t_cold_in + q / self.c_cold)
    }

    /// Sample effectiveness and outlet temperatures over `[0, ntu_max]` for every arrangement
    pub fn sweep(&self, ntu_max: f64, samples: usize) -> MechResult<NtuSweep> {
        self.validate()?;
        require_positive("ntu_max", ntu_max)?;
        require_count("NTU sweep samples", samples, 2, MAX_SWEEP_SAMPLES)?;

        let cr = self.capacity_ratio();
        let ntu = math::linspace(0.0, ntu_max, samples);

        let curves = FlowArrangement::ALL
            .iter()
            .map(|&arrangement| -> MechResult<ArrangementCurve> {
                let eff = ntu
                    .iter()
                    .map(|&n| effectiveness(cr, n, arrangement))
                    .collect::<MechResult<Vec<f64>>>()?;
                let (t_hot_out, t_cold_out): (Vec<f64>, Vec<f64>) =
                    eff.iter().map(|&e| self.outlet_temperatures(e)).unzip();
                Ok(ArrangementCurve {
                    arrangement,
                    effectiveness: eff,
                    t_hot_out,
                    t_cold_out,
                })
            })
            .collect::<MechResult<Vec<ArrangementCurve>>>()?;

        debug!("NTU sweep: Cr={:.4}, {} samples up to NTU={}", cr, samples, ntu_max);

        Ok(NtuSweep {
            capacity_ratio: cr,
            ntu,
            curves,
        })
    }
}

/// Sweep results for one arrangement
#[derive(Debug, Clone, Serialize)]
pub struct ArrangementCurve {
    pub arrangement: FlowArrangement,
    pub effectiveness: Vec<f64>,
    pub t_hot_out: Vec<f64>,
    pub t_cold_out: Vec<f64>,
}

impl ArrangementCurve {
    /// Outlet temperatures `(hot, cold)` at the largest NTU
    pub fn final_outlets(&self) -> Option<(f64, f64)> {
        Some((*self.t_hot_out.last()?, *self.t_cold_out.last()?))
    }
}

/// Effectiveness-NTU sweep over all arrangements
#[derive(Debug, Clone, Serialize)]
pub struct NtuSweep {
    pub capacity_ratio: f64,
    pub ntu: Vec<f64>,
    pub curves: Vec<ArrangementCurve>,
}

impl NtuSweep {
    pub fn curve(&self, arrangement: FlowArrangement) -> Option<&ArrangementCurve> {
        self.curves.iter().find(|c| c.arrangement == arrangement)
    }
}

fn default_ntu_max() -> f64 {
    10.0
}

fn default_sweep_samples() -> usize {
    100
}

/// Streams plus sweep range, as read from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct SweepRequest {
    #[serde(flatten)]
    pub streams: ExchangerStreams,
    #[serde(default = "default_ntu_max")]
    pub ntu_max: f64,
    #[serde(default = "default_sweep_samples")]
    pub samples: usize,
}

impl SweepRequest {
    pub fn run(&self) -> MechResult<NtuSweep> {
        self.streams.sweep(self.ntu_max, self.samples)
    }
}

fn default_segments() -> usize {
    500
}

/// Double-pipe exchanger marched along its length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoublePipeExchanger {
    /// Exchanger length in m
    pub length: f64,
    /// Inner pipe diameter in m (heat transfer perimeter is `pi * d_inner`)
    pub d_inner: f64,
    pub t_hot_in: f64,
    pub t_cold_in: f64,
    /// Mass flow rates in kg/s
    pub m_hot: f64,
    pub m_cold: f64,
    /// Specific heats in J/(kg·K)
    pub cp_hot: f64,
    pub cp_cold: f64,
    /// Overall heat transfer coefficient in W/(m²·K)
    pub u: f64,
    #[serde(default = "default_segments")]
    pub segments: usize,
}

/// Temperature profiles and performance of a marched exchanger
#[derive(Debug, Clone, Serialize)]
pub struct MarchResult {
    pub x: Vec<f64>,
    pub t_hot: Vec<f64>,
    pub t_cold: Vec<f64>,
    pub t_hot_out: f64,
    pub t_cold_out: f64,
    /// Heat picked up by the cold stream in W
    pub duty: f64,
    /// `duty / (C_min (Th_in - Tc_in))`
    pub effectiveness: f64,
}

impl DoublePipeExchanger {
    fn validate(&self) -> MechResult<()> {
        require_positive("length", self.length)?;
        require_positive("d_inner", self.d_inner)?;
        require_positive("m_hot", self.m_hot)?;
        require_positive("m_cold", self.m_cold)?;
        require_positive("cp_hot", self.cp_hot)?;
        require_positive("cp_cold", self.cp_cold)?;
        require_positive("u", self.u)?;
        require_finite("t_hot_in", self.t_hot_in)?;
        require_finite("t_cold_in", self.t_cold_in)?;
        require_count("segments", self.segments, 1, MAX_SEGMENTS)?;
        if self.t_hot_in <= self.t_cold_in {
            return Err(MechError::InvalidConfiguration(format!(
                "hot inlet {} must be warmer than cold inlet {}",
                self.t_hot_in, self.t_cold_in
            )));
        }

        // One explicit segment must not carry the streams past each other
        let streams = self.streams();
        let conductance = self.segment_conductance();
        let approach = conductance / streams.c_hot + conductance / streams.c_cold;
        if approach > 1.0 {
            warn!(
                "double-pipe march rejected: segment approach factor {:.4} exceeds 1",
                approach
            );
            return Err(MechError::Unstable(format!(
                "segment conductance {:.3} W/K crosses the stream temperatures \
                 (UA/C_hot + UA/C_cold = {:.4} > 1), use more segments",
                conductance, approach
            )));
        }
        Ok(())
    }

    /// Stream capacity rates
    pub fn streams(&self) -> ExchangerStreams {
        ExchangerStreams {
            t_hot_in: self.t_hot_in,
            t_cold_in: self.t_cold_in,
            c_hot: self.m_hot * self.cp_hot,
            c_cold: self.m_cold * self.cp_cold,
        }
    }

    /// Conductance `U pi D dx` of one segment in W/K
    fn segment_conductance(&self) -> f64 {
        self.u * PI * self.d_inner * self.length / self.segments as f64
    }

    /// `U A / C_min`
    pub fn ntu(&self) -> f64 {
        self.u * PI * self.d_inner * self.length / self.streams().c_min()
    }

    /// Energy balance on each segment, both streams advancing from x = 0
    pub fn march(&self) -> MechResult<MarchResult> {
        self.validate()?;

        let n = self.segments;
        let streams = self.streams();
        let conductance = self.segment_conductance();

        let mut t_hot = Vec::with_capacity(n + 1);
        let mut t_cold = Vec::with_capacity(n + 1);
        t_hot.push(self.t_hot_in);
        t_cold.push(self.t_cold_in);

        for k in 0..n {
            let dq = conductance * (t_hot[k] - t_cold[k]);
            t_hot.push(t_hot[k] - dq / streams.c_hot);
            t_cold.push(t_cold[k] + dq / streams.c_cold);
        }

        let t_hot_out = t_hot[n];
        let t_cold_out = t_cold[n];
        let duty = streams.c_cold * (t_cold_out - self.t_cold_in);
        let effectiveness = duty / streams.max_duty();

        debug!(
            "double-pipe march: {} segments, NTU={:.3}, eps={:.4}",
            n,
            self.ntu(),
            effectiveness
        );

        Ok(MarchResult {
            x: math::linspace(0.0, self.length, n + 1),
            t_hot,
            t_cold,
            t_hot_out,
            t_cold_out,
            duty,
            effectiveness,
        })
    }
}
