//! Cantilever beam stiffness solver
//!
//! The beam is clamped at node 0 (x = 0) and free at the last node (x = L).
//! That is a fixed precondition of every function here: the clamped degrees
//! of freedom are always the first [`CLAMPED_DOFS`] entries of the global
//! system, and a tip load always acts on the last node.
//!
//! The pipeline is split into the four steps of the direct stiffness method
//! so each can be checked on its own:
//!
//! 1. [`assemble_stiffness`] sums the 4x4 element blocks into the global matrix
//! 2. [`apply_boundary_and_load`] strips the clamped DOFs and builds the load
//! 3. [`solve`] runs a direct solve on the reduced system
//! 4. [`extract_deflection`] keeps the transverse DOFs of the full solution
//!
//! [`analyze_cantilever`] chains them and adds post-processing.

use log::{debug, info, warn};
use serde::Deserialize;

use crate::analysis::{AnalysisOptions, LinearSolver};
use crate::elements::{Beam, Material, Section};
use crate::error::{require_finite, MechError, MechResult};
use crate::math::{self, Mat, Vec as MechVec};
use crate::results::{CantileverResult, DeflectionPoint, FixedEndReactions, SectionCheck};

/// Number of leading DOFs held at zero (displacement and rotation of node 0)
pub const CLAMPED_DOFS: usize = 2;

/// Assemble the global stiffness matrix of a cantilever
///
/// Validates the raw inputs first, so `num_elements == 0` or a non-positive
/// property is rejected before any matrix is allocated.
pub fn assemble_stiffness(e: f64, i: f64, length: f64, num_elements: usize) -> MechResult<Mat> {
    let beam = Beam::new(length, e, i, num_elements)?;
    Ok(global_stiffness(&beam))
}

/// Assemble the global stiffness matrix for an already validated beam
pub fn global_stiffness(beam: &Beam) -> Mat {
    let n_dofs = beam.num_dofs();
    let mut k_global = Mat::zeros(n_dofs, n_dofs);

    // All elements share the same length, so they share one block
    let k_local = math::beam_element_stiffness(beam.e(), beam.i(), beam.element_length());

    for element in 0..beam.num_elements() {
        let offset = 2 * element;
        for a in 0..4 {
            for b in 0..4 {
                k_global[(offset + a, offset + b)] += k_local[(a, b)];
            }
        }
    }

    debug!(
        "assembled {}x{} stiffness matrix from {} elements",
        n_dofs,
        n_dofs,
        beam.num_elements()
    );

    k_global
}

/// Build the full load vector with a single transverse force at the last node
pub fn build_load_vector(force: f64, num_nodes: usize) -> MechVec {
    let mut f = MechVec::zeros(2 * num_nodes);
    if num_nodes > 0 {
        f[2 * num_nodes - 2] = force;
    }
    f
}

/// Remove the clamped DOFs and build the matching reduced load vector
///
/// `force` is written unchanged into the transverse DOF of the last node
/// (index `2 * num_nodes - 2`), positive up.
pub fn apply_boundary_and_load(k: &Mat, force: f64, num_nodes: usize) -> MechResult<(Mat, MechVec)> {
    require_finite("tip force", force)?;

    let n_dofs = 2 * num_nodes;
    if num_nodes < 2 {
        return Err(MechError::InvalidConfiguration(format!(
            "a cantilever needs at least 2 nodes, got {}",
            num_nodes
        )));
    }
    if k.nrows() != n_dofs || k.ncols() != n_dofs {
        return Err(MechError::InvalidConfiguration(format!(
            "stiffness matrix is {}x{}, expected {}x{} for {} nodes",
            k.nrows(),
            k.ncols(),
            n_dofs,
            n_dofs,
            num_nodes
        )));
    }

    let n_free = n_dofs - CLAMPED_DOFS;
    let k_reduced = k
        .view((CLAMPED_DOFS, CLAMPED_DOFS), (n_free, n_free))
        .into_owned();
    let f_reduced = build_load_vector(force, num_nodes)
        .rows(CLAMPED_DOFS, n_free)
        .into_owned();

    Ok((k_reduced, f_reduced))
}

/// Solve the reduced system with LU decomposition
pub fn solve(k_reduced: &Mat, f_reduced: &MechVec) -> MechResult<MechVec> {
    solve_with(k_reduced, f_reduced, LinearSolver::Lu)
}

/// Solve the reduced system with the chosen direct solver
///
/// A failed factorization or a non-finite solution is reported as
/// [`MechError::SingularSystem`]; no partial result is returned.
pub fn solve_with(k_reduced: &Mat, f_reduced: &MechVec, solver: LinearSolver) -> MechResult<MechVec> {
    let solution = match solver {
        LinearSolver::Lu => math::solve_linear_system(k_reduced, f_reduced),
        LinearSolver::Cholesky => math::solve_cholesky(k_reduced, f_reduced),
    };

    match solution {
        Some(d) if d.iter().all(|v| v.is_finite()) => {
            debug!("solved {} free DOFs with {:?}", d.len(), solver);
            Ok(d)
        }
        _ => {
            warn!(
                "{:?} solve failed on {}x{} reduced system",
                solver,
                k_reduced.nrows(),
                k_reduced.ncols()
            );
            Err(MechError::SingularSystem)
        }
    }
}

/// Prepend the clamped DOFs (both exactly zero) to a reduced solution
pub fn expand_displacements(d_reduced: &MechVec) -> MechVec {
    let mut d_full = MechVec::zeros(d_reduced.len() + CLAMPED_DOFS);
    d_full.rows_mut(CLAMPED_DOFS, d_reduced.len()).copy_from(d_reduced);
    d_full
}

/// Transverse displacements (even DOFs) of a full displacement vector
pub fn extract_deflection(d_full: &MechVec) -> Vec<f64> {
    d_full.iter().step_by(2).copied().collect()
}

/// Rotations (odd DOFs) of a full displacement vector
pub fn extract_rotations(d_full: &MechVec) -> Vec<f64> {
    d_full.iter().skip(1).step_by(2).copied().collect()
}

/// Closed-form cantilever deflection under a downward tip load
///
/// `y(x) = -P x² (3L - x) / (6 E I)`
pub fn analytical_deflection(p: f64, e: f64, i: f64, length: f64, x: f64) -> f64 {
    -p * x * x * (3.0 * length - x) / (6.0 * e * i)
}

/// Closed-form tip deflection `-P L³ / (3 E I)`
pub fn analytical_tip_deflection(p: f64, e: f64, i: f64, length: f64) -> f64 {
    analytical_deflection(p, e, i, length, length)
}

/// Closed-form curve sampled on `samples` evenly spaced points over `[0, L]`
pub fn analytical_curve(beam: &Beam, p: f64, samples: usize) -> Vec<DeflectionPoint> {
    math::linspace(0.0, beam.length(), samples)
        .into_iter()
        .map(|x| DeflectionPoint {
            x,
            y: analytical_deflection(p, beam.e(), beam.i(), beam.length(), x),
        })
        .collect()
}

/// Solve a cantilever under a downward tip load of magnitude `tip_load`
///
/// Positive `tip_load` pushes the tip down, so the nodal force applied to
/// the upward transverse DOF is `-tip_load`.
pub fn analyze_cantilever(
    beam: &Beam,
    tip_load: f64,
    options: &AnalysisOptions,
) -> MechResult<CantileverResult> {
    require_finite("tip load", tip_load)?;
    options.validate()?;

    let num_nodes = beam.num_nodes();
    let k_global = global_stiffness(beam);
    let (k_reduced, f_reduced) = apply_boundary_and_load(&k_global, -tip_load, num_nodes)?;
    let d_reduced = solve_with(&k_reduced, &f_reduced, options.solver)?;
    let d_full = expand_displacements(&d_reduced);

    // R = K d - F, only the clamped rows carry a reaction
    let f_full = build_load_vector(-tip_load, num_nodes);
    let residual = &k_global * &d_full - f_full;
    let reactions = FixedEndReactions {
        force: residual[0],
        moment: residual[1],
    };

    let nodes = beam
        .node_positions()
        .into_iter()
        .zip(extract_deflection(&d_full))
        .map(|(x, y)| DeflectionPoint { x, y })
        .collect();

    let result = CantileverResult {
        beam: *beam,
        tip_load,
        nodes,
        rotations: extract_rotations(&d_full),
        displacements: d_full.iter().copied().collect(),
        reactions,
        analytical: analytical_curve(beam, tip_load, options.analytical_samples),
    };

    if options.log {
        info!(
            "cantilever L={} m, {} elements: tip deflection {:.6e} m (exact {:.6e} m)",
            beam.length(),
            beam.num_elements(),
            result.tip_deflection(),
            analytical_tip_deflection(tip_load, beam.e(), beam.i(), beam.length())
        );
    }

    Ok(result)
}

fn default_length() -> f64 {
    1.0
}

fn default_e() -> f64 {
    200e9
}

fn default_i() -> f64 {
    8.333e-6
}

fn default_load() -> f64 {
    1000.0
}

fn default_num_elements() -> usize {
    20
}

/// Serializable cantilever problem description
#[derive(Debug, Clone, Deserialize)]
pub struct CantileverInput {
    /// Beam length in m
    #[serde(default = "default_length")]
    pub length: f64,
    /// Young's modulus in Pa
    #[serde(default = "default_e")]
    pub e: f64,
    /// Second moment of area in m⁴
    #[serde(default = "default_i")]
    pub i: f64,
    /// Downward tip load in N
    #[serde(default = "default_load")]
    pub load: f64,
    /// Number of beam elements
    #[serde(default = "default_num_elements")]
    pub num_elements: usize,
    /// Material; when given its modulus replaces `e`
    #[serde(default)]
    pub material: Option<Material>,
    /// Cross-section; when given its second moment replaces `i`
    #[serde(default)]
    pub section: Option<Section>,
    #[serde(default)]
    pub options: AnalysisOptions,
}

impl Default for CantileverInput {
    fn default() -> Self {
        Self {
            length: default_length(),
            e: default_e(),
            i: default_i(),
            load: default_load(),
            num_elements: default_num_elements(),
            material: None,
            section: None,
            options: AnalysisOptions::default(),
        }
    }
}

impl CantileverInput {
    /// Validate into a [`Beam`]
    pub fn beam(&self) -> MechResult<Beam> {
        let e = self.material.as_ref().map_or(self.e, |m| m.e);
        let i = self.section.as_ref().map_or(self.i, |s| s.i);
        Beam::new(self.length, e, i, self.num_elements)
    }

    /// Validate and solve
    pub fn analyze(&self) -> MechResult<CantileverResult> {
        analyze_cantilever(&self.beam()?, self.load, &self.options)
    }

    /// Section check for a solved input, when both material and section were given
    pub fn section_check(&self, result: &CantileverResult) -> Option<SectionCheck> {
        match (&self.material, &self.section) {
            (Some(material), Some(section)) => Some(result.section_check(material, section)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const E: f64 = 200e9;
    const I: f64 = 8.333e-6;

    #[test]
    fn test_assembly_is_symmetric_and_additive() {
        let k = assemble_stiffness(E, I, 1.0, 4).unwrap();
        assert_eq!(k.nrows(), 10);
        assert!(math::is_symmetric(&k, 1e-3));

        // Interior node 1 receives the j-block of element 0 and the i-block of element 1
        let le: f64 = 0.25;
        let ei_l3 = E * I / le.powi(3);
        assert_relative_eq!(k[(2, 2)], 24.0 * ei_l3, max_relative = 1e-12);
        assert_relative_eq!(k[(3, 3)], 8.0 * le * le * ei_l3, max_relative = 1e-12);
        // Shared-node coupling terms cancel
        assert!(k[(2, 3)].abs() < 1e-3 * ei_l3);
        // End nodes see a single block
        assert_relative_eq!(k[(0, 0)], 12.0 * ei_l3, max_relative = 1e-12);
        assert_relative_eq!(k[(8, 8)], 12.0 * ei_l3, max_relative = 1e-12);
    }

    #[test]
    fn test_unconstrained_matrix_has_rigid_body_modes() {
        // A free beam translates and rotates without any nodal force
        let k = assemble_stiffness(E, I, 1.0, 3).unwrap();
        let xs = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0];
        let translation = MechVec::from_fn(8, |r, _| if r % 2 == 0 { 1.0 } else { 0.0 });
        let rotation = MechVec::from_fn(8, |r, _| if r % 2 == 0 { xs[r / 2] } else { 1.0 });
        let scale = k.amax();
        assert!((&k * translation).amax() < 1e-9 * scale);
        assert!((&k * rotation).amax() < 1e-9 * scale);
    }

    #[test]
    fn test_singular_system_is_reported() {
        let k = Mat::zeros(4, 4);
        let f = MechVec::from_vec(vec![0.0, 0.0, 1.0, 0.0]);
        assert!(matches!(solve(&k, &f), Err(MechError::SingularSystem)));
        assert!(matches!(
            solve_with(&k, &f, LinearSolver::Cholesky),
            Err(MechError::SingularSystem)
        ));
    }

    #[test]
    fn test_zero_elements_builds_nothing() {
        let err = assemble_stiffness(E, I, 1.0, 0).unwrap_err();
        assert!(matches!(err, MechError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_boundary_and_load_shapes() {
        let k = assemble_stiffness(E, I, 1.0, 2).unwrap();
        let (k_red, f_red) = apply_boundary_and_load(&k, 500.0, 3).unwrap();
        assert_eq!(k_red.shape(), (4, 4));
        assert_eq!(f_red.len(), 4);
        assert_eq!(f_red[2], 500.0);
        assert_eq!(f_red[0], 0.0);
        assert_eq!(f_red[3], 0.0);
        assert_eq!(k_red[(0, 0)], k[(2, 2)]);
    }

    #[test]
    fn test_boundary_rejects_mismatched_matrix() {
        let k = assemble_stiffness(E, I, 1.0, 2).unwrap();
        assert!(apply_boundary_and_load(&k, 1.0, 4).is_err());
        assert!(apply_boundary_and_load(&k, f64::NAN, 3).is_err());
    }

    #[test]
    fn test_single_element_matches_closed_form() {
        let (p, l) = (1000.0, 1.0);
        let beam = Beam::new(l, E, I, 1).unwrap();
        let result = analyze_cantilever(&beam, p, &AnalysisOptions::default()).unwrap();

        let expected = -p * l.powi(3) / (3.0 * E * I);
        assert_relative_eq!(result.tip_deflection(), expected, max_relative = 1e-10);
        assert_relative_eq!(
            result.tip_rotation(),
            -p * l * l / (2.0 * E * I),
            max_relative = 1e-10
        );
    }

    #[test]
    fn test_reference_example() {
        let beam = Beam::new(1.0, E, I, 20).unwrap();
        let result = analyze_cantilever(&beam, 1000.0, &AnalysisOptions::default()).unwrap();

        let exact = analytical_tip_deflection(1000.0, E, I, 1.0);
        assert_relative_eq!(exact, -2.0e-4, max_relative = 1e-3);
        assert_relative_eq!(result.tip_deflection(), exact, max_relative = 1e-8);
        assert_eq!(result.nodes.len(), 21);
        assert_eq!(result.analytical.len(), 100);
        assert!(result.reference_error().max_abs < 1e-10);
    }

    #[test]
    fn test_clamped_dofs_exactly_zero() {
        for n in [1, 2, 5, 17] {
            let beam = Beam::new(2.5, 70e9, 3e-6, n).unwrap();
            let result = analyze_cantilever(&beam, 250.0, &AnalysisOptions::default()).unwrap();
            assert_eq!(result.displacements[0], 0.0);
            assert_eq!(result.displacements[1], 0.0);
            assert_eq!(result.nodes[0].y, 0.0);
        }
    }

    #[test]
    fn test_deflection_grows_toward_tip() {
        let beam = Beam::new(1.0, E, I, 10).unwrap();
        let result = analyze_cantilever(&beam, 1000.0, &AnalysisOptions::default()).unwrap();
        for pair in result.nodes.windows(2) {
            assert!(pair[1].y.abs() > pair[0].y.abs());
        }
        assert_eq!(result.max_deflection().x, 1.0);
    }

    #[test]
    fn test_reactions_balance_tip_load() {
        let beam = Beam::new(2.0, E, I, 8).unwrap();
        let result = analyze_cantilever(&beam, 1000.0, &AnalysisOptions::default()).unwrap();
        assert_relative_eq!(result.reactions.force, 1000.0, max_relative = 1e-6);
        assert_relative_eq!(result.reactions.moment, 2000.0, max_relative = 1e-6);
    }

    #[test]
    fn test_cholesky_matches_lu() {
        let beam = Beam::new(1.0, E, I, 12).unwrap();
        let lu = analyze_cantilever(&beam, 1000.0, &AnalysisOptions::linear()).unwrap();
        let ch = analyze_cantilever(&beam, 1000.0, &AnalysisOptions::cholesky()).unwrap();
        assert_relative_eq!(lu.tip_deflection(), ch.tip_deflection(), max_relative = 1e-8);
    }

    #[test]
    fn test_extract_deflection_skips_rotations() {
        let d = expand_displacements(&MechVec::from_vec(vec![1.0, 2.0, 3.0, 4.0]));
        assert_eq!(d.len(), 6);
        assert_eq!(extract_deflection(&d), vec![0.0, 1.0, 3.0]);
        assert_eq!(extract_rotations(&d), vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_input_defaults_from_json() {
        let input: CantileverInput = serde_json::from_str(r#"{"num_elements": 5}"#).unwrap();
        assert_eq!(input.length, 1.0);
        assert_eq!(input.load, 1000.0);
        let result = input.analyze().unwrap();
        assert_eq!(result.nodes.len(), 6);

        let bad: CantileverInput = serde_json::from_str(r#"{"num_elements": 0}"#).unwrap();
        assert!(matches!(
            bad.analyze(),
            Err(MechError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_material_and_section_override_properties() {
        let input: CantileverInput = serde_json::from_str(
            r#"{
                "length": 2.0,
                "num_elements": 6,
                "material": {"e": 68.9e9, "nu": 0.33, "rho": 2700.0},
                "section": {"a": 0.005, "i": 4.0e-6, "depth": 0.1}
            }"#,
        )
        .unwrap();
        let beam = input.beam().unwrap();
        assert_relative_eq!(beam.e(), 68.9e9);
        assert_relative_eq!(beam.i(), 4.0e-6);

        let result = input.analyze().unwrap();
        let check = input.section_check(&result).unwrap();
        assert_relative_eq!(check.mass, 2700.0 * 0.005 * 2.0, max_relative = 1e-12);
        // |M| = P L = 2000 N·m, S = I / (d / 2) = 8e-5 m³
        assert_relative_eq!(check.max_bending_stress.unwrap(), 2.5e7, max_relative = 1e-6);

        assert!(CantileverInput::default()
            .section_check(&CantileverInput::default().analyze().unwrap())
            .is_none());
    }

    #[test]
    fn test_oversized_requests_rejected() {
        let huge_mesh: CantileverInput =
            serde_json::from_str(r#"{"num_elements": 50000}"#).unwrap();
        assert!(matches!(
            huge_mesh.analyze(),
            Err(MechError::InvalidConfiguration(_))
        ));

        let huge_curve: CantileverInput =
            serde_json::from_str(r#"{"options": {"analytical_samples": 1000000000}}"#).unwrap();
        assert!(matches!(
            huge_curve.analyze(),
            Err(MechError::InvalidConfiguration(_))
        ));
    }
}
