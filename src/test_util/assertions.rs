//! Assertion helpers for verifying scanned units and scan errors in tests.

use crate::{ScanError, Unit, UnitKind, scan_units};

/// Scan `src`, panicking with the error location on failure.
///
/// # Panics
/// Panics if the scan fails.
#[must_use]
#[track_caller]
pub fn units(src: &str) -> Vec<Unit> {
    scan_units(src).unwrap_or_else(|e| panic!("scan failed at offset {}: {e}", e.offset()))
}

/// Kinds of the top-level units of `src`.
///
/// # Panics
/// Panics if the scan fails.
#[must_use]
#[track_caller]
pub fn kinds(src: &str) -> Vec<UnitKind> {
    units(src).iter().map(Unit::kind).collect()
}

/// Assert that `unit` has the given kind, body text and attached comments.
///
/// # Examples
///
/// ```rust,no_run
/// # #[cfg(feature = "test-support")]
/// # {
/// use cscan::test_util::{assert_unit, units};
/// let all = units("/* a */\nint x;");
/// assert_unit(&all[0], cscan::UnitKind::VariableDeclaration, "int x;", Some("/* a */"), None);
/// # }
/// ```
///
/// # Panics
/// Panics when any field differs.
#[track_caller]
pub fn assert_unit(
    unit: &Unit,
    kind: UnitKind,
    body: &str,
    pre: Option<&str>,
    post: Option<&str>,
) {
    assert_eq!(unit.kind(), kind, "kind of {:?}", unit.body_text());
    assert_eq!(unit.body_text(), body);
    assert_eq!(unit.pre_comment().map(|c| c.text()), pre, "pre-comment of {body:?}");
    assert_eq!(unit.post_comment().map(|c| c.text()), post, "post-comment of {body:?}");
}

/// Assert that scanning `src` fails at `offset` with an error whose message
/// contains `pattern`.
///
/// # Panics
/// Panics if the scan succeeds or the error differs.
#[track_caller]
pub fn assert_scan_error(src: &str, pattern: &str, offset: usize) -> ScanError {
    let err = match scan_units(src) {
        Ok(units) => panic!("expected a scan error, got {} units", units.len()),
        Err(e) => e,
    };
    assert!(
        err.to_string().contains(pattern),
        "expected error to contain {pattern:?}, got {err}"
    );
    assert_eq!(err.offset(), offset, "offset of {err}");
    err
}
