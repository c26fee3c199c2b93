use std::fmt;

use num_bigint::BigInt;

/// A sample `(x, y)` of the unknown polynomial.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: BigInt,
    pub y: BigInt,
}

impl Point {
    pub fn new(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Point {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl<X: Into<BigInt>, Y: Into<BigInt>> From<(X, Y)> for Point {
    fn from((x, y): (X, Y)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
