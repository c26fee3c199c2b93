//! The share document: a JSON object holding a `keys` metadata record and one
//! entry per share, keyed by the decimal abscissa.
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" }
//! }
//! ```
//!
//! Entries are kept as raw JSON until they are decoded, so a share of the
//! wrong shape is reported against its own key and an unreadable `keys`
//! record only matters when something asks for it.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::point::Point;
use crate::radix::{self, Radix};
use log::{debug, warn};
use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Reserved key of the metadata record.
pub const METADATA_KEY: &str = "keys";

/// Metadata record: `n` shares were issued, any `k` of them recover the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keys {
    pub n: usize,
    pub k: usize,
}

impl Keys {
    /// Read `{ "n": .., "k": .. }`. Counts may be integers or numeric strings.
    pub fn from_value(value: &Value) -> Option<Keys> {
        let count = |name: &str| match value.get(name)? {
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };
        Some(Keys {
            n: count("n")?,
            k: count("k")?,
        })
    }

    pub fn to_value(self) -> Value {
        json!({ "n": self.n, "k": self.k })
    }
}

/// One share entry as it appears on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawShare(pub Value);

impl RawShare {
    pub fn new(digits: impl Into<String>, radix: Radix) -> Self {
        RawShare(json!({ "base": radix.to_string(), "value": digits.into() }))
    }

    /// The digit string of the entry stored under `key`.
    pub fn digits(&self, key: &str) -> Result<&str> {
        match self.field(key, "value")? {
            Value::String(s) => Ok(s),
            other => Err(malformed(key, format!("'value' {other} is not a string"))),
        }
    }

    /// The base of the entry stored under `key`, as a JSON integer or a
    /// numeric string. Range is checked by the parser.
    pub fn base(&self, key: &str) -> Result<i64> {
        let base = self.field(key, "base")?;
        let value = match base {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        };
        value.ok_or_else(|| malformed(key, format!("base {base} is not an integer")))
    }

    /// Decode the entry stored under `key` into a point.
    pub fn to_point(&self, key: &str) -> Result<Point> {
        let x = parse_abscissa(key)
            .ok_or_else(|| malformed(key, "key is not a decimal integer"))?;
        let digits = self.digits(key)?;
        let base = self.base(key)?;
        let y = radix::parse(digits, base)?;
        Ok(Point::new(x, y))
    }

    fn field(&self, key: &str, name: &str) -> Result<&Value> {
        let entry = self
            .0
            .as_object()
            .ok_or_else(|| malformed(key, format!("entry {} is not an object", self.0)))?;
        entry
            .get(name)
            .ok_or_else(|| malformed(key, format!("missing '{name}'")))
    }
}

/// Which of the extracted points go to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every share in the document.
    #[default]
    All,
    /// The first `keys.k` shares.
    Metadata,
    /// The first `k` shares.
    First(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Value>,
    #[serde(flatten)]
    pub shares: BTreeMap<String, RawShare>,
}

impl ShareDocument {
    pub fn import(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = || -> std::result::Result<Self, std::io::Error> {
            let data = fs::read(path)?;
            Ok(serde_json::from_slice(data.as_slice())?)
        };
        reader().map_err(|e| Error::Import {
            file: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Import {
            file: "<input>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Export {
            file: "<output>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let export_error = |message: String| Error::Export {
            file: path.display().to_string(),
            message,
        };
        let data = self.to_json().map_err(|e| export_error(e.to_string()))?;
        let writer = || -> std::result::Result<(), std::io::Error> {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(data.as_ref())?;
            writer.write_all(b"\n")?;
            writer.flush()
        };
        writer().map_err(|e| export_error(e.to_string()))
    }

    /// The `keys` record, read as `{ n, k }`.
    pub fn metadata(&self) -> Result<Keys> {
        let raw = self.keys.as_ref().ok_or(Error::MissingMetadata)?;
        Keys::from_value(raw).ok_or_else(|| Error::InvalidMetadata(raw.to_string()))
    }

    /// Points chosen by `selection`, in extractor order.
    pub fn points(&self, selection: Selection) -> Result<Vec<Point>> {
        let points = extract_points(self)?;
        match self.metadata() {
            Ok(keys) if keys.n != points.len() => warn!(
                "Metadata announces {} shares but the document holds {}",
                keys.n,
                points.len()
            ),
            Err(Error::InvalidMetadata(raw)) => debug!("Ignoring unreadable metadata {raw}"),
            _ => {}
        }
        match selection {
            Selection::All => Ok(points),
            Selection::Metadata => select_first(points, self.metadata()?.k),
            Selection::First(k) => select_first(points, k),
        }
    }
}

/// Decode every share of `document`, sorted ascending by `x`.
///
/// Entries with equal `x` keep their key order, so the result is the same on
/// every run. The metadata record is skipped.
pub fn extract_points(document: &ShareDocument) -> Result<Vec<Point>> {
    let mut points = Vec::with_capacity(document.shares.len());
    for (key, share) in &document.shares {
        if key == METADATA_KEY {
            continue;
        }
        let point = share.to_point(key)?;
        debug!("Share {key}: {point}");
        points.push(point);
    }
    points.sort_by(|a, b| a.x.cmp(&b.x));
    Ok(points)
}

/// Keep the first `k` points.
pub fn select_first(mut points: Vec<Point>, k: usize) -> Result<Vec<Point>> {
    if k == 0 {
        return Err(Error::InvalidThreshold {
            threshold: k,
            shares: points.len(),
        });
    }
    if points.len() < k {
        return Err(Error::InsufficientShares {
            required: k,
            available: points.len(),
        });
    }
    points.truncate(k);
    Ok(points)
}

/// Plain base-10 integer with an optional leading minus.
fn parse_abscissa(key: &str) -> Option<BigInt> {
    let (sign, digits) = match key.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, key),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = radix::parse(digits, 10).ok()?;
    Some(BigInt::from_biguint(sign, magnitude))
}

fn malformed(key: &str, reason: impl Into<String>) -> Error {
    Error::MalformedPoint {
        key: key.to_string(),
        reason: reason.into(),
    }
}
