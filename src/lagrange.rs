//! Exact Lagrange interpolation of a polynomial's value at zero.

use crate::error::{Error, Result};
use crate::point::Point;
use log::{debug, trace};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Lagrange weight of `xs[j]` at zero, as a reduced fraction with a positive denominator.
///
/// # Formula
/// ```text
/// λ_j = ∏_{i ≠ j} (0 - x_i) / (x_j - x_i)
/// ```
/// so that `∑_j λ_j · f(x_j) = f(0)` for any polynomial `f` of degree below `xs.len()`.
/// Callers pass `j < xs.len()`.
pub(crate) fn basis_at_zero(j: usize, xs: &[BigInt]) -> Result<(BigInt, BigInt)> {
    let x_j = &xs[j];
    // numerator = ∏_{i != j} (-x_i)
    let mut num = BigInt::one();
    // denominator = ∏_{i != j} (x_j - x_i)
    let mut den = BigInt::one();
    for (i, x_i) in xs.iter().enumerate() {
        if i == j {
            continue;
        }
        let diff = x_j - x_i;
        if diff.is_zero() {
            return Err(Error::DuplicateAbscissa(x_j.clone()));
        }
        num *= -x_i;
        den *= diff;
    }
    reduce(&mut num, &mut den);
    Ok((num, den))
}

/// Value at `x = 0` of the unique degree-`(n-1)` polynomial through `points`.
///
/// Terms are summed as an exact fraction and divided once at the end, since the
/// individual terms `y_j · λ_j` need not be integers even when their sum is.
pub fn constant_term(points: &[Point]) -> Result<BigInt> {
    if points.is_empty() {
        return Err(Error::EmptyPointSet);
    }
    let xs: Vec<BigInt> = points.iter().map(|p| p.x.clone()).collect();

    let mut num = BigInt::zero();
    let mut den = BigInt::one();
    for (j, point) in points.iter().enumerate() {
        let (basis_num, basis_den) = basis_at_zero(j, &xs)?;
        trace!("λ for x = {}: {}/{}", point.x, basis_num, basis_den);
        // num/den + y_j * basis_num/basis_den
        num = num * &basis_den + &point.y * basis_num * &den;
        den *= basis_den;
        reduce(&mut num, &mut den);
    }

    let (quotient, remainder) = num.div_rem(&den);
    if !remainder.is_zero() {
        return Err(Error::NonIntegralConstant {
            numerator: num,
            denominator: den,
        });
    }
    debug!("Interpolated {} points, constant = {}", points.len(), quotient);
    Ok(quotient)
}

/// Divide out the gcd and move the sign to the numerator.
fn reduce(num: &mut BigInt, den: &mut BigInt) {
    let g = num.gcd(den);
    if !g.is_zero() && !g.is_one() {
        *num /= &g;
        *den /= &g;
    }
    if den.is_negative() {
        *num = -std::mem::take(num);
        *den = -std::mem::take(den);
    }
}
