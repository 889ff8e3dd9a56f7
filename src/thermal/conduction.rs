//! 1D transient heat conduction with an explicit finite difference scheme
//!
//! Solves `dT/dt = alpha d²T/dx²` on a rod with fixed end temperatures
//! using forward Euler in time and central differences in space.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{require_count, require_finite, require_positive, MechError, MechResult};
use crate::math;

/// Largest number of grid points
pub const MAX_GRID_POINTS: usize = 100_000;

/// Largest number of time steps
pub const MAX_TIME_STEPS: usize = 1_000_000;

/// Largest number of stored temperatures, `nx * (time_steps + 1)`
pub const MAX_HISTORY_VALUES: usize = 20_000_000;

/// Rod, material and time stepping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatConduction1D {
    /// Rod length in m
    pub length: f64,
    /// Number of grid points, ends included
    pub nx: usize,
    /// Thermal diffusivity in m²/s
    pub alpha: f64,
    /// Time step in s
    pub dt: f64,
    /// Number of time steps
    pub time_steps: usize,
    /// Fixed temperature at x = 0
    pub t_left: f64,
    /// Fixed temperature at x = L
    pub t_right: f64,
    /// Initial interior temperature
    pub t_initial: f64,
}

impl Default for HeatConduction1D {
    fn default() -> Self {
        Self {
            length: 1.0,
            nx: 20,
            alpha: 0.01,
            dt: 0.001,
            time_steps: 200,
            t_left: 100.0,
            t_right: 50.0,
            t_initial: 20.0,
        }
    }
}

/// Temperature field at every stored time level
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureHistory {
    /// Grid point positions
    pub x: Vec<f64>,
    /// Time step between frames in s
    pub dt: f64,
    /// Frame `n` is the field at `t = n * dt`; frame 0 is the initial state
    pub frames: Vec<Vec<f64>>,
}

impl TemperatureHistory {
    /// Field at the last time level
    pub fn final_profile(&self) -> &[f64] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Field at the stored time level closest to `t`
    pub fn at_time(&self, t: f64) -> Option<&[f64]> {
        if self.frames.is_empty() || !t.is_finite() || t < 0.0 {
            return None;
        }
        let idx = ((t / self.dt).round() as usize).min(self.frames.len() - 1);
        Some(&self.frames[idx])
    }

    /// Simulated time at the last frame
    pub fn end_time(&self) -> f64 {
        self.frames.len().saturating_sub(1) as f64 * self.dt
    }
}

impl HeatConduction1D {
    /// Grid spacing, infinite when there are fewer than 2 points
    pub fn dx(&self) -> f64 {
        self.length / self.nx.saturating_sub(1) as f64
    }

    /// Mesh Fourier number `alpha dt / dx²`
    pub fn fourier_number(&self) -> f64 {
        let dx = self.dx();
        self.alpha * self.dt / (dx * dx)
    }

    /// Largest stable time step `dx² / (2 alpha)`
    pub fn max_stable_dt(&self) -> f64 {
        let dx = self.dx();
        dx * dx / (2.0 * self.alpha)
    }

    fn validate(&self) -> MechResult<()> {
        require_positive("length", self.length)?;
        require_positive("alpha", self.alpha)?;
        require_positive("dt", self.dt)?;
        require_finite("t_left", self.t_left)?;
        require_finite("t_right", self.t_right)?;
        require_finite("t_initial", self.t_initial)?;
        require_count("nx", self.nx, 3, MAX_GRID_POINTS)?;
        require_count("time_steps", self.time_steps, 0, MAX_TIME_STEPS)?;
        self.frame_count()?;
        if self.dt > self.max_stable_dt() {
            warn!(
                "explicit step rejected: dt={} exceeds dx²/(2 alpha)={}",
                self.dt,
                self.max_stable_dt()
            );
            return Err(MechError::Unstable(format!(
                "time step {} exceeds the stability limit {} (r = {:.4} > 0.5)",
                self.dt,
                self.max_stable_dt(),
                self.fourier_number()
            )));
        }
        Ok(())
    }

    /// Number of stored frames, rejecting histories that would not fit
    fn frame_count(&self) -> MechResult<usize> {
        let frames = self.time_steps.checked_add(1);
        match frames.and_then(|f| f.checked_mul(self.nx)) {
            Some(values) if values <= MAX_HISTORY_VALUES => Ok(self.time_steps + 1),
            _ => Err(MechError::InvalidConfiguration(format!(
                "history of {} points x {} steps exceeds {} stored values",
                self.nx, self.time_steps, MAX_HISTORY_VALUES
            ))),
        }
    }

    /// Initial field with the boundary temperatures applied
    fn initial_field(&self) -> Vec<f64> {
        let mut t = vec![self.t_initial; self.nx];
        t[0] = self.t_left;
        t[self.nx - 1] = self.t_right;
        t
    }

    /// March the field forward and keep every time level
    pub fn run(&self) -> MechResult<TemperatureHistory> {
        self.validate()?;

        let r = self.fourier_number();
        let mut current = self.initial_field();
        let mut frames = Vec::with_capacity(self.frame_count()?);
        frames.push(current.clone());

        for n in 1..=self.time_steps {
            let next = step(&current, r);
            trace!("step {}: T[1] = {:.4}", n, next[1]);
            frames.push(next.clone());
            current = next;
        }

        debug!(
            "heat conduction: nx={}, r={:.4}, {} steps to t={} s",
            self.nx,
            r,
            self.time_steps,
            self.time_steps as f64 * self.dt
        );

        Ok(TemperatureHistory {
            x: math::linspace(0.0, self.length, self.nx),
            dt: self.dt,
            frames,
        })
    }

    /// Linear steady-state profile between the two boundary temperatures
    pub fn steady_state(&self) -> Vec<f64> {
        let n = self.nx.max(2);
        (0..n)
            .map(|k| {
                let s = k as f64 / (n - 1) as f64;
                self.t_left + (self.t_right - self.t_left) * s
            })
            .collect()
    }
}

/// One explicit update of the interior points; end points are held
fn step(t: &[f64], r: f64) -> Vec<f64> {
    let mut next = t.to_vec();
    for i in 1..t.len() - 1 {
        next[i] = t[i] + r * (t[i + 1] - 2.0 * t[i] + t[i - 1]);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_history_shape_and_boundaries() {
        let sim = HeatConduction1D::default();
        let hist = sim.run().unwrap();
        assert_eq!(hist.x.len(), 20);
        assert_eq!(hist.frames.len(), 201);
        for frame in &hist.frames {
            assert_eq!(frame[0], 100.0);
            assert_eq!(frame[19], 50.0);
        }
        assert_relative_eq!(hist.end_time(), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_single_step_matches_stencil() {
        let sim = HeatConduction1D {
            time_steps: 1,
            ..HeatConduction1D::default()
        };
        let r = sim.fourier_number();
        let hist = sim.run().unwrap();
        // Only the points next to the boundaries feel the first step
        assert_relative_eq!(hist.frames[1][1], 20.0 + r * (100.0 - 40.0 + 20.0));
        assert_relative_eq!(hist.frames[1][5], 20.0);
        assert_relative_eq!(hist.frames[1][18], 20.0 + r * (50.0 - 40.0 + 20.0));
    }

    #[test]
    fn test_converges_to_linear_profile() {
        let sim = HeatConduction1D {
            nx: 11,
            alpha: 0.1,
            dt: 0.04,
            time_steps: 2000,
            ..HeatConduction1D::default()
        };
        let hist = sim.run().unwrap();
        let steady = sim.steady_state();
        for (got, want) in hist.final_profile().iter().zip(&steady) {
            assert_relative_eq!(*got, *want, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_unstable_step_rejected() {
        let sim = HeatConduction1D {
            nx: 50,
            dt: 0.05,
            ..HeatConduction1D::default()
        };
        assert!(matches!(sim.run(), Err(MechError::Unstable(_))));
    }

    #[test]
    fn test_at_time_lookup() {
        let hist = HeatConduction1D::default().run().unwrap();
        assert_eq!(hist.at_time(0.0).unwrap(), hist.frames[0].as_slice());
        assert_eq!(hist.at_time(0.1).unwrap(), hist.frames[100].as_slice());
        assert_eq!(hist.at_time(99.0).unwrap(), hist.final_profile());
        assert!(hist.at_time(-1.0).is_none());
    }

    #[test]
    fn test_size_limits() {
        let endless = HeatConduction1D {
            time_steps: usize::MAX,
            ..HeatConduction1D::default()
        };
        assert!(matches!(
            endless.run(),
            Err(MechError::InvalidConfiguration(_))
        ));

        // Each bound holds alone but the product is too large
        let oversized = HeatConduction1D {
            nx: 1_000,
            alpha: 1e-6,
            time_steps: 100_000,
            ..HeatConduction1D::default()
        };
        assert!(oversized.run().is_err());

        let fine = HeatConduction1D {
            nx: MAX_GRID_POINTS + 1,
            ..HeatConduction1D::default()
        };
        assert!(fine.run().is_err());
    }

    #[test]
    fn test_degenerate_grid_does_not_panic() {
        for nx in [0, 1] {
            let sim = HeatConduction1D {
                nx,
                ..HeatConduction1D::default()
            };
            assert!(sim.dx().is_infinite());
            assert!(sim.max_stable_dt().is_infinite());
            assert_eq!(sim.fourier_number(), 0.0);
            assert!(matches!(
                sim.run(),
                Err(MechError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_too_few_points_rejected() {
        let sim = HeatConduction1D {
            nx: 2,
            ..HeatConduction1D::default()
        };
        assert!(matches!(
            sim.run(),
            Err(MechError::InvalidConfiguration(_))
        ));
    }
}
