pub mod dealer;
pub mod document;
pub mod error;
pub mod lagrange;
pub mod point;
pub mod polynomial;
pub mod radix;

pub use document::{Selection, ShareDocument};
pub use error::{Error, Result};
pub use point::Point;

use log::info;
use num_bigint::BigInt;

/// Decode the shares of `document` chosen by `selection` and interpolate the
/// polynomial's constant term. The first failing step aborts the whole run.
pub fn recover(document: &ShareDocument, selection: Selection) -> Result<BigInt> {
    let points = document.points(selection)?;
    info!("Recovering constant term from {} points", points.len());
    lagrange::constant_term(&points)
}
