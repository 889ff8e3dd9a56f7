//! Discretized prismatic beam

use serde::Serialize;

use super::{Material, Section};
use crate::error::{require_count, require_positive, MechResult};

/// Largest mesh accepted; the global stiffness matrix is dense, so this
/// caps it near 128 MB
pub const MAX_ELEMENTS: usize = 2_000;

/// A prismatic beam split into equal Euler-Bernoulli elements
///
/// Node 0 sits at x = 0 and node `num_elements` at x = L. Every field is
/// validated on construction, so a `Beam` in hand is always solvable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Beam {
    length: f64,
    e: f64,
    i: f64,
    num_elements: usize,
}

impl Beam {
    /// Create a beam from length, Young's modulus, second moment of area and element count
    pub fn new(length: f64, e: f64, i: f64, num_elements: usize) -> MechResult<Self> {
        Ok(Self {
            length: require_positive("length", length)?,
            e: require_positive("E", e)?,
            i: require_positive("I", i)?,
            num_elements: require_count("num_elements", num_elements, 1, MAX_ELEMENTS)?,
        })
    }

    /// Create a beam from material and section properties
    pub fn from_properties(
        length: f64,
        material: &Material,
        section: &Section,
        num_elements: usize,
    ) -> MechResult<Self> {
        Self::new(length, material.e, section.i, num_elements)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    pub fn i(&self) -> f64 {
        self.i
    }

    /// Flexural rigidity EI
    pub fn ei(&self) -> f64 {
        self.e * self.i
    }

    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    pub fn num_nodes(&self) -> usize {
        self.num_elements + 1
    }

    /// Total degrees of freedom (transverse displacement + rotation per node)
    pub fn num_dofs(&self) -> usize {
        2 * self.num_nodes()
    }

    /// Element length L / num_elements
    pub fn element_length(&self) -> f64 {
        self.length / self.num_elements as f64
    }

    /// Node x-coordinates from the clamped end to the tip
    pub fn node_positions(&self) -> Vec<f64> {
        let le = self.element_length();
        (0..self.num_nodes())
            .map(|n| if n == self.num_elements { self.length } else { n as f64 * le })
            .collect()
    }

    /// Same beam with a different mesh density
    pub fn with_elements(&self, num_elements: usize) -> MechResult<Self> {
        Self::new(self.length, self.e, self.i, num_elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MechError;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_quantities() {
        let beam = Beam::new(1.0, 200e9, 8.333e-6, 20).unwrap();
        assert_eq!(beam.num_nodes(), 21);
        assert_eq!(beam.num_dofs(), 42);
        assert_relative_eq!(beam.element_length(), 0.05);

        let xs = beam.node_positions();
        assert_eq!(xs.len(), 21);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[20], 1.0);
    }

    #[test]
    fn test_zero_elements_rejected() {
        let err = Beam::new(1.0, 200e9, 8.333e-6, 0).unwrap_err();
        assert!(matches!(err, MechError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_mesh_size_limit() {
        assert!(Beam::new(1.0, 200e9, 8.333e-6, MAX_ELEMENTS).is_ok());
        assert!(matches!(
            Beam::new(1.0, 200e9, 8.333e-6, MAX_ELEMENTS + 1),
            Err(MechError::InvalidConfiguration(_))
        ));
        assert!(Beam::new(1.0, 200e9, 8.333e-6, usize::MAX).is_err());
    }

    #[test]
    fn test_non_positive_properties_rejected() {
        assert!(Beam::new(0.0, 200e9, 8.333e-6, 4).is_err());
        assert!(Beam::new(1.0, -1.0, 8.333e-6, 4).is_err());
        assert!(Beam::new(1.0, 200e9, 0.0, 4).is_err());
        assert!(Beam::new(f64::NAN, 200e9, 1e-6, 4).is_err());
    }

    #[test]
    fn test_from_properties() {
        let beam =
            Beam::from_properties(2.0, &Material::steel(), &Section::rectangular(0.1, 0.2), 4)
                .unwrap();
        assert_relative_eq!(beam.ei(), 200e9 * 0.1 * 0.008 / 12.0);
        assert_eq!(beam.with_elements(8).unwrap().num_elements(), 8);
    }
}
