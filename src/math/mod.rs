//! Mathematical utilities for the solvers

use nalgebra::{DMatrix, DVector, SMatrix, SVector};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 4x4 matrix for a plane beam element (2 nodes x [v, theta])
pub type Mat4 = SMatrix<f64, 4, 4>;
/// 4-element vector for beam element forces/displacements
pub type Vec4 = SVector<f64, 4>;

/// Compute the local stiffness matrix for an Euler-Bernoulli beam element
///
/// DOF order is `[v_i, theta_i, v_j, theta_j]`.
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `i` - Second moment of area
/// * `le` - Element length
pub fn beam_element_stiffness(e: f64, i: f64, le: f64) -> Mat4 {
    let l = le;
    let l2 = l * l;
    let ei_l3 = e * i / (l2 * l);

    #[rustfmt::skip]
    let data = [
        12.0,     6.0 * l,   -12.0,    6.0 * l,
        6.0 * l,  4.0 * l2,  -6.0 * l, 2.0 * l2,
        -12.0,    -6.0 * l,  12.0,     -6.0 * l,
        6.0 * l,  2.0 * l2,  -6.0 * l, 4.0 * l2,
    ];

    Mat4::from_row_slice(&data) * ei_l3
}

/// Solve a linear system using LU decomposition
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().lu().solve(b)
}

/// Solve a linear system using Cholesky decomposition (for symmetric positive definite)
pub fn solve_cholesky(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().cholesky().map(|chol| chol.solve(b))
}

/// Check that a square matrix is symmetric within an absolute tolerance
pub fn is_symmetric(a: &Mat, tol: f64) -> bool {
    if a.nrows() != a.ncols() {
        return false;
    }
    let n = a.nrows();
    (0..n).all(|r| (r + 1..n).all(|c| (a[(r, c)] - a[(c, r)]).abs() <= tol))
}

/// Evenly spaced samples over `[start, end]`, both ends included
pub fn linspace(start: f64, end: f64, n: usize) -> std::vec::Vec<f64> {
    match n {
        0 => std::vec::Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|k| if k == n - 1 { end } else { start + step * k as f64 })
                .collect()
        }
    }
}
