use std::collections::BTreeMap;

use crate::document::{Keys, RawShare, ShareDocument};
use crate::error::{Error, Result};
use crate::polynomial::Poly;
use crate::radix::{self, Radix};
use log::{debug, info};
use num_bigint::BigInt;
use num_traits::Signed;
use rand::{Rng, RngCore};

/// How a secret is split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealParams {
    /// Number of shares issued (n).
    pub shares: usize,
    /// Number of shares needed to recover the secret (k).
    pub threshold: usize,
    /// Size of each random coefficient, in bits.
    pub coefficient_bits: usize,
    /// Bases to render shares in, one picked at random per share. Empty means 2..=36.
    pub bases: Vec<i64>,
}

impl Default for DealParams {
    fn default() -> Self {
        Self {
            shares: 4,
            threshold: 3,
            coefficient_bits: 256,
            bases: Vec::new(),
        }
    }
}

/// Split `secret` into `params.shares` points of a random polynomial of degree
/// `params.threshold - 1`, at `x = 1..=n`.
pub fn deal<R: RngCore>(secret: &BigInt, params: &DealParams, rng: &mut R) -> Result<ShareDocument> {
    if secret.is_negative() {
        return Err(Error::NegativeSecret);
    }
    if params.threshold == 0 || params.threshold > params.shares {
        return Err(Error::InvalidThreshold {
            threshold: params.threshold,
            shares: params.shares,
        });
    }
    let radixes: Vec<Radix> = if params.bases.is_empty() {
        Radix::all().collect()
    } else {
        params
            .bases
            .iter()
            .map(|&b| Radix::new(b))
            .collect::<Result<_>>()?
    };

    let poly = Poly::random(
        secret.clone(),
        params.threshold,
        params.coefficient_bits,
        rng,
    );
    info!(
        "Dealing {} shares of a degree {} polynomial",
        params.shares,
        poly.degree()
    );

    let mut shares = BTreeMap::new();
    for index in 1..=params.shares {
        let x = BigInt::from(index);
        // Non-negative: every coefficient and every x is.
        let (_, y) = poly.eval(&x).into_parts();
        let share_radix = radixes[rng.random_range(0..radixes.len())];
        debug!("Share {index} in base {share_radix}");
        shares.insert(
            index.to_string(),
            RawShare::new(radix::render(&y, share_radix), share_radix),
        );
    }

    Ok(ShareDocument {
        keys: Some(
            Keys {
                n: params.shares,
                k: params.threshold,
            }
            .to_value(),
        ),
        shares,
    })
}
