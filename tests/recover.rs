// tests/recover.rs
// Fixture-driven tests: base-N vectors and share documents with known constants
use csv::ReaderBuilder;
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, Zero};
use serde::Deserialize;
use std::{fs::File, path::Path};

use share_recovery::document::extract_points;
use share_recovery::lagrange::constant_term;
use share_recovery::radix;
use share_recovery::{recover, Error, Point, Selection, ShareDocument};

#[derive(Debug, Deserialize)]
struct RadixVector {
    digits: String,
    base: i64,
    decimal: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
struct ExpectedConstant {
    file: String,
    selection: String,
    constant: String,
}

fn fixture(name: &str) -> ShareDocument {
    ShareDocument::import(Path::new("tests/data").join(name)).expect("cannot load fixture")
}

/// Constant term by plain rational Lagrange, no integer shortcuts.
fn rational_constant(points: &[Point]) -> BigRational {
    let mut sum = BigRational::zero();
    for (j, p_j) in points.iter().enumerate() {
        let mut term = BigRational::from_integer(p_j.y.clone());
        for (i, p_i) in points.iter().enumerate() {
            if i != j {
                term *= BigRational::new(-p_i.x.clone(), &p_j.x - &p_i.x);
            }
        }
        sum += term;
    }
    sum
}

#[test]
fn radix_vectors() {
    let file = File::open("tests/radix-vectors.csv").expect("cannot open radix-vectors.csv");
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut count = 0;
    for result in rdr.deserialize::<RadixVector>() {
        let row = result.expect("CSV deserialize failed");
        let expected: BigUint = row.decimal.parse().unwrap();
        assert_eq!(
            radix::parse(&row.digits, row.base).unwrap(),
            expected,
            "{:?} in base {}",
            row.digits,
            row.base
        );
        count += 1;
    }
    assert!(count > 20);
}

#[test]
fn fixtures_recover_expected_constants() {
    let file = File::open("tests/data/expected.csv").expect("cannot open expected.csv");
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    for result in rdr.deserialize::<ExpectedConstant>() {
        let row = result.expect("CSV deserialize failed");
        let selection = match row.selection.as_str() {
            "all" => Selection::All,
            "threshold" => Selection::Metadata,
            other => panic!("unknown selection {other}"),
        };
        let expected: BigInt = row.constant.parse().unwrap();
        let doc = fixture(&row.file);
        assert_eq!(
            recover(&doc, selection).unwrap(),
            expected,
            "{} ({})",
            row.file,
            row.selection
        );
    }
}

#[test]
fn large_values_match_rational_arithmetic() {
    let doc = fixture("large.json");
    let points = extract_points(&doc).unwrap();
    assert!(points.iter().all(|p| p.y.to_string().len() > 100));

    let exact = rational_constant(&points);
    assert!(exact.denom().is_one());
    assert_eq!(constant_term(&points).unwrap(), exact.to_integer());

    // Same for every prefix of at least k points, and in reverse order.
    for len in 7..=points.len() {
        let mut prefix = points[..len].to_vec();
        let expected = rational_constant(&prefix).to_integer();
        assert_eq!(constant_term(&prefix).unwrap(), expected);
        prefix.reverse();
        assert_eq!(constant_term(&prefix).unwrap(), expected);
    }
}

#[test]
fn under_threshold_matches_rational_arithmetic() {
    // Six points of a degree-6 polynomial: a different curve, whose value at
    // zero is either a different integer or a proper fraction.
    let doc = fixture("large.json");
    let points = doc.points(Selection::First(6)).unwrap();
    let exact = rational_constant(&points);
    match constant_term(&points) {
        Ok(c) => {
            assert!(exact.denom().is_one());
            assert_eq!(c, exact.to_integer());
        }
        Err(Error::NonIntegralConstant {
            numerator,
            denominator,
        }) => {
            assert_eq!(BigRational::new(numerator, denominator), exact);
            assert!(!exact.denom().is_one());
        }
        Err(e) => panic!("unexpected error {e}"),
    }
}

#[test]
fn duplicate_abscissa_fixture() {
    // "2" and "02" name the same x.
    let doc = fixture("duplicate.json");
    let err = recover(&doc, Selection::All).unwrap_err();
    assert_eq!(err, Error::DuplicateAbscissa(BigInt::from(2)));
    assert!(err.to_string().contains("x = 2"));
}

#[test]
fn bad_digit_fixture() {
    let doc = fixture("bad-digit.json");
    assert_eq!(
        recover(&doc, Selection::All),
        Err(Error::InvalidDigit {
            digit: 'g',
            base: 16
        })
    );
}

#[test]
fn missing_value_fixture() {
    let doc = fixture("missing-value.json");
    assert!(matches!(
        recover(&doc, Selection::All),
        Err(Error::MalformedPoint { ref key, .. }) if key == "1"
    ));
}

#[test]
fn export_then_import() {
    let doc = fixture("negative.json");
    let path = std::env::temp_dir().join(format!("share-recovery-{}.json", std::process::id()));
    doc.export(&path).unwrap();
    let again = ShareDocument::import(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(doc, again);
    assert_eq!(
        recover(&again, Selection::All).unwrap(),
        recover(&doc, Selection::All).unwrap()
    );
}
