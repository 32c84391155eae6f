//! # Polynomial Roots
//!
//! Real roots of a low-order polynomial, found as the eigenvalues of its
//! companion matrix. Used by the hydrostatic collapse formula, whose
//! characteristic resistance equation is a quintic in the wall thickness ratio.
//!
//! Coefficients are given highest degree first:
//!
//! ```text
//! p(y) = c[0]·yⁿ + c[1]·yⁿ⁻¹ + … + c[n]
//! ```

use nalgebra::{DMatrix, Schur};

use crate::errors::{CalcError, CalcResult};

/// Imaginary parts below this fraction of the root magnitude are treated as
/// rounding noise from the eigen solve.
const REAL_ROOT_TOLERANCE: f64 = 1e-7;

/// Maximum QR sweeps for the Schur decomposition.
const MAX_SCHUR_ITERATIONS: usize = 500;

/// Build the companion matrix of a polynomial.
///
/// The polynomial is normalised to monic form first. The matrix has ones on
/// the sub-diagonal and the negated coefficients in the last column, so its
/// characteristic polynomial is `p(y) / c[0]`.
fn companion_matrix(coeffs: &[f64]) -> DMatrix<f64> {
    let n = coeffs.len() - 1;
    let lead = coeffs[0];
    let mut m = DMatrix::<f64>::zeros(n, n);

    for i in 1..n {
        m[(i, i - 1)] = 1.0;
    }
    // Last column holds -c_k/c_0 from the constant term upward
    for (row, c) in coeffs[1..].iter().rev().enumerate() {
        m[(row, n - 1)] = -c / lead;
    }
    m
}

/// Return the real roots of a polynomial, in ascending order.
///
/// # Arguments
/// * `coeffs` - Coefficients, highest degree first. The leading coefficient
///   must be non-zero and finite.
///
/// # Errors
/// * `CalcError::InvalidInput` - fewer than two coefficients, a zero leading
///   coefficient, or non-finite coefficients
/// * `CalcError::CalculationFailed` - the eigen solve did not converge
pub fn real_roots(coeffs: &[f64]) -> CalcResult<Vec<f64>> {
    if coeffs.len() < 2 {
        return Err(CalcError::invalid_input(
            "coeffs",
            format!("{:?}", coeffs),
            "Polynomial must be at least linear",
        ));
    }
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(CalcError::invalid_input(
            "coeffs",
            format!("{:?}", coeffs),
            "Coefficients must be finite",
        ));
    }
    if coeffs[0] == 0.0 {
        return Err(CalcError::invalid_input(
            "coeffs",
            format!("{:?}", coeffs),
            "Leading coefficient must be non-zero",
        ));
    }

    let companion = companion_matrix(coeffs);
    let schur = Schur::try_new(companion, f64::EPSILON, MAX_SCHUR_ITERATIONS).ok_or_else(|| {
        CalcError::calculation_failed("polynomial roots", "Schur decomposition did not converge")
    })?;

    let mut roots: Vec<f64> = schur
        .complex_eigenvalues()
        .iter()
        .filter(|z| z.im.abs() <= REAL_ROOT_TOLERANCE * z.norm().max(1.0))
        .map(|z| z.re)
        .collect();
    roots.sort_by(|a, b| a.total_cmp(b));
    Ok(roots)
}

/// Largest real root of a polynomial, if it has any real root.
pub fn largest_real_root(coeffs: &[f64]) -> CalcResult<Option<f64>> {
    Ok(real_roots(coeffs)?.last().copied())
}
