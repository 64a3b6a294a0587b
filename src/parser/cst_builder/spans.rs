//! Partition checks on emitted units.
//!
//! Units at one nesting level must be sorted and must not overlap, and every
//! nested unit must lie within its parent's body. A violation means the
//! scanner or the comment resolver produced inconsistent boundaries; the
//! emitter reports every issue at once rather than the first.

use crate::Span;
use crate::parser::ast::Unit;

/// What went wrong between two spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSpanIssueKind {
    /// A unit starts before the previous one ends.
    Overlap,
    /// A nested unit reaches outside its parent's body.
    OutsideParent,
}

/// A single ordering issue within one nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSpanIssue {
    scope: String,
    kind: UnitSpanIssueKind,
    prev: Span,
    next: Span,
}

impl UnitSpanIssue {
    fn new(scope: impl Into<String>, kind: UnitSpanIssueKind, prev: Span, next: Span) -> Self {
        Self {
            scope: scope.into(),
            kind,
            prev,
            next,
        }
    }

    /// Nesting level that failed validation, e.g. `top level` or
    /// `StructDefinition at 12..40`.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    #[must_use]
    pub fn kind(&self) -> UnitSpanIssueKind {
        self.kind
    }

    /// The earlier span, or the parent body for [`UnitSpanIssueKind::OutsideParent`].
    #[must_use]
    pub fn prev(&self) -> &Span {
        &self.prev
    }

    /// The offending span.
    #[must_use]
    pub fn next(&self) -> &Span {
        &self.next
    }
}

impl std::fmt::Display for UnitSpanIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            UnitSpanIssueKind::Overlap => write!(
                f,
                "{}: units overlap or are unsorted: {:?} then {:?}",
                self.scope, self.prev, self.next
            ),
            UnitSpanIssueKind::OutsideParent => write!(
                f,
                "{}: unit {:?} lies outside {:?}",
                self.scope, self.next, self.prev
            ),
        }
    }
}

/// Errors returned when unit span validation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UnitSpanValidationError {
    message: String,
    issues: Vec<UnitSpanIssue>,
}

impl UnitSpanValidationError {
    fn new(issues: Vec<UnitSpanIssue>) -> Self {
        let message = issues
            .iter()
            .map(UnitSpanIssue::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Self { message, issues }
    }

    /// Access the underlying validation issues.
    #[must_use]
    pub fn issues(&self) -> &[UnitSpanIssue] {
        &self.issues
    }
}

fn collect_issues(units: &[Unit], bounds: &Span, scope: &str, issues: &mut Vec<UnitSpanIssue>) {
    let mut prev: Option<Span> = None;
    for unit in units {
        let span = unit.span();
        if span.start < bounds.start || span.end > bounds.end {
            issues.push(UnitSpanIssue::new(
                scope,
                UnitSpanIssueKind::OutsideParent,
                bounds.clone(),
                span.clone(),
            ));
        }
        if let Some(prev) = prev.as_ref()
            && span.start < prev.end
        {
            issues.push(UnitSpanIssue::new(
                scope,
                UnitSpanIssueKind::Overlap,
                prev.clone(),
                span.clone(),
            ));
        }
        if !unit.nested_units().is_empty() {
            let body = unit.body_span();
            let inner = format!("{} at {}..{}", unit.kind(), body.start, body.end);
            collect_issues(unit.nested_units(), body, &inner, issues);
        }
        prev = Some(span);
    }
}

/// Check that `units` partition `bounds` without overlap, recursively.
///
/// # Errors
///
/// Returns [`UnitSpanValidationError`] listing every issue found.
pub(crate) fn validate_units(units: &[Unit], bounds: &Span) -> Result<(), UnitSpanValidationError> {
    let mut issues = Vec::new();
    collect_issues(units, bounds, "top level", &mut issues);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(UnitSpanValidationError::new(issues))
    }
}
