//! Shear force and bending moment diagrams for a simply supported beam
//!
//! Pin at x = 0 (reaction `Ra`), roller at x = L (reaction `Rb`), one
//! downward point load `P` at x = a. Sign convention: shear positive when
//! the left part is pushed up, sagging moment positive.

use serde::{Deserialize, Serialize};

use crate::error::{require_count, require_finite, require_positive, MechError, MechResult};
use crate::math;

/// Largest number of diagram stations
pub const MAX_SAMPLES: usize = 100_000;

fn default_samples() -> usize {
    100
}

/// Simply supported span with a single point load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplySupportedBeam {
    /// Span in m
    pub length: f64,
    /// Downward point load in N
    pub load: f64,
    /// Load position from the left support in m
    pub position: f64,
    /// Number of stations along the span
    #[serde(default = "default_samples")]
    pub samples: usize,
}

/// Support reactions, positive up
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SupportReactions {
    pub left: f64,
    pub right: f64,
}

/// One station of the diagrams
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DiagramPoint {
    pub x: f64,
    /// Shear force in N
    pub shear: f64,
    /// Bending moment in N·m
    pub moment: f64,
}

/// Sampled shear force and bending moment diagrams
#[derive(Debug, Clone, Serialize)]
pub struct BeamDiagrams {
    pub reactions: SupportReactions,
    pub points: Vec<DiagramPoint>,
    /// Peak bending moment, always under the load
    pub max_moment: f64,
    /// Position of the peak bending moment
    pub max_moment_position: f64,
}

impl SimplySupportedBeam {
    pub fn new(length: f64, load: f64, position: f64) -> Self {
        Self {
            length,
            load,
            position,
            samples: default_samples(),
        }
    }

    /// Set the number of diagram stations
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    fn validate(&self) -> MechResult<()> {
        require_positive("length", self.length)?;
        require_finite("load", self.load)?;
        require_finite("position", self.position)?;
        if !(0.0..=self.length).contains(&self.position) {
            return Err(MechError::InvalidConfiguration(format!(
                "load position {} lies outside the span [0, {}]",
                self.position, self.length
            )));
        }
        require_count("diagram samples", self.samples, 2, MAX_SAMPLES)?;
        Ok(())
    }

    /// Support reactions from moment equilibrium about each support
    pub fn reactions(&self) -> MechResult<SupportReactions> {
        self.validate()?;
        let right = self.load * self.position / self.length;
        Ok(SupportReactions {
            left: self.load - right,
            right,
        })
    }

    /// Shear force at x
    fn shear_at(&self, reactions: &SupportReactions, x: f64) -> f64 {
        if x < self.position {
            reactions.left
        } else {
            reactions.left - self.load
        }
    }

    /// Bending moment at x
    fn moment_at(&self, reactions: &SupportReactions, x: f64) -> f64 {
        if x < self.position {
            reactions.left * x
        } else {
            reactions.left * x - self.load * (x - self.position)
        }
    }

    /// Sample both diagrams along the span
    pub fn diagrams(&self) -> MechResult<BeamDiagrams> {
        let reactions = self.reactions()?;

        let points: Vec<DiagramPoint> = math::linspace(0.0, self.length, self.samples)
            .into_iter()
            .map(|x| DiagramPoint {
                x,
                shear: self.shear_at(&reactions, x),
                moment: self.moment_at(&reactions, x),
            })
            .collect();

        let max_moment = self.moment_at(&reactions, self.position);

        log::debug!(
            "diagrams for L={} m, P={} N at a={} m: Ra={:.3}, Rb={:.3}, Mmax={:.3}",
            self.length,
            self.load,
            self.position,
            reactions.left,
            reactions.right,
            max_moment
        );

        Ok(BeamDiagrams {
            reactions,
            points,
            max_moment,
            max_moment_position: self.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_midspan_load() {
        let beam = SimplySupportedBeam::new(4.0, 1000.0, 2.0);
        let d = beam.diagrams().unwrap();
        assert_relative_eq!(d.reactions.left, 500.0);
        assert_relative_eq!(d.reactions.right, 500.0);
        // PL/4
        assert_relative_eq!(d.max_moment, 1000.0);
        assert_eq!(d.points.len(), 100);
    }

    #[test]
    fn test_offset_load_peak() {
        let (l, p, a) = (6.0, 1200.0, 1.5);
        let d = SimplySupportedBeam::new(l, p, a).diagrams().unwrap();
        assert_relative_eq!(d.max_moment, p * a * (l - a) / l, max_relative = 1e-12);
        assert_relative_eq!(d.reactions.left + d.reactions.right, p);
        for pt in &d.points {
            assert!(pt.moment <= d.max_moment + 1e-9);
        }
    }

    #[test]
    fn test_shear_jump_and_end_moments() {
        let d = SimplySupportedBeam::new(5.0, 800.0, 2.0)
            .with_samples(11)
            .diagrams()
            .unwrap();
        let first = d.points.first().unwrap();
        let last = d.points.last().unwrap();
        assert_relative_eq!(first.moment, 0.0);
        assert!(last.moment.abs() < 1e-9);
        assert_relative_eq!(first.shear, d.reactions.left);
        assert_relative_eq!(last.shear, -d.reactions.right);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(SimplySupportedBeam::new(0.0, 1.0, 0.0).diagrams().is_err());
        assert!(SimplySupportedBeam::new(2.0, 1.0, 3.0).diagrams().is_err());
        assert!(SimplySupportedBeam::new(2.0, 1.0, 1.0)
            .with_samples(1)
            .diagrams()
            .is_err());
        assert!(matches!(
            SimplySupportedBeam::new(2.0, 1.0, 1.0)
                .with_samples(MAX_SAMPLES + 1)
                .diagrams(),
            Err(MechError::InvalidConfiguration(_))
        ));
    }
}
