//! Shared test utilities for integration tests.
//!
//! These helpers scan fixtures and assert over units. They mirror a subset of
//! the `cscan::test_util` module without requiring the `test-support`
//! feature, enabling integration tests to compile against the published
//! library.

#![expect(
    dead_code,
    reason = "helpers are reused across multiple tests so some may be unused"
)]

use cscan::{Unit, UnitKind, scan_units};

/// Scan `src`, panicking with the error on failure.
#[track_caller]
pub fn units(src: &str) -> Vec<Unit> {
    scan_units(src).unwrap_or_else(|e| panic!("scan failed at offset {}: {e}", e.offset()))
}

/// Read a fixture from `tests/data`.
#[track_caller]
pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {path}: {e}"))
}

/// Every unit in depth-first order with its nesting depth.
pub fn flatten(units: &[Unit]) -> Vec<(usize, &Unit)> {
    fn walk<'a>(units: &'a [Unit], depth: usize, out: &mut Vec<(usize, &'a Unit)>) {
        for unit in units {
            out.push((depth, unit));
            walk(unit.nested_units(), depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(units, 0, &mut out);
    out
}

/// The units whose body text equals `body`, at any depth.
pub fn find<'a>(units: &'a [Unit], body: &str) -> Vec<&'a Unit> {
    flatten(units)
        .into_iter()
        .map(|(_, unit)| unit)
        .filter(|unit| unit.body_text() == body)
        .collect()
}

/// Assert kind and attached comments of `unit`.
#[track_caller]
pub fn assert_unit(unit: &Unit, kind: UnitKind, pre: Option<&str>, post: Option<&str>) {
    assert_eq!(unit.kind(), kind, "kind of {:?}", unit.body_text());
    assert_eq!(
        unit.pre_comment().map(|c| c.text()),
        pre,
        "pre-comment of {:?}",
        unit.body_text()
    );
    assert_eq!(
        unit.post_comment().map(|c| c.text()),
        post,
        "post-comment of {:?}",
        unit.body_text()
    );
}
