use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use rand::RngCore;

/// An integer polynomial f(x) = a0 + a1*x + ... + a_{t-1}*x^{t-1}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poly {
    /// Coefficients a0, a1, ..., a_{t-1}
    pub coeffs: Vec<BigInt>,
}

impl Poly {
    /// Construct a polynomial from explicit coefficients.
    pub fn from_coeffs(coeffs: Vec<BigInt>) -> Self {
        Poly { coeffs }
    }

    /// Degree of the polynomial (t-1 if threshold is t).
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Threshold (number of coefficients).
    pub fn threshold(&self) -> usize {
        self.coeffs.len()
    }

    /// The constant term a0, zero for an empty polynomial.
    pub fn constant(&self) -> BigInt {
        self.coeffs.first().cloned().unwrap_or_default()
    }

    /// Polynomial with constant `secret` and `t - 1` further coefficients,
    /// each drawn uniformly from `[0, 2^bits)`.
    pub fn random<R: RngCore>(secret: BigInt, t: usize, bits: usize, rng: &mut R) -> Self {
        let mut coeffs = Vec::with_capacity(t);
        coeffs.push(secret);
        let mut buf = vec![0u8; bits.div_ceil(8)];
        for _ in 1..t {
            rng.fill_bytes(&mut buf);
            // Drop the surplus high bits of the first byte.
            if bits % 8 != 0 {
                buf[0] &= (1u8 << (bits % 8)) - 1;
            }
            coeffs.push(BigUint::from_bytes_be(&buf).into());
        }
        Poly { coeffs }
    }

    /// Evaluate the polynomial at x using Horner's method.
    pub fn eval(&self, x: &BigInt) -> BigInt {
        let mut result = BigInt::zero();
        for coeff in self.coeffs.iter().rev() {
            result = result * x + coeff;
        }
        result
    }
}
