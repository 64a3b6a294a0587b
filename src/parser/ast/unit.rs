//! The [`Unit`] record and its [`UnitKind`].

use std::fmt;

use super::{Comment, Signature};
use crate::{Span, SyntaxKind};

/// Classification of a top-level construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// A function with its body.
    FunctionDefinition,
    /// A function declaration ending in `;`.
    FunctionPrototype,
    /// A declaration of one or more objects.
    VariableDeclaration,
    /// A `struct` body, possibly with declarators or a `typedef`.
    StructDefinition,
    /// A `union` body, possibly with declarators or a `typedef`.
    UnionDefinition,
    /// An `enum` body, possibly with declarators or a `typedef`.
    EnumDefinition,
    /// A `typedef` without an aggregate body.
    Typedef,
    /// `#define NAME ...`
    MacroDefinePlain,
    /// `#define NAME(args) ...`
    MacroDefineFunctionLike,
    /// Any other preprocessor directive.
    PreprocessorDirective,
    /// `extern "C" { ... }`
    ExternBlock,
    /// An expression or control statement.
    Statement,
    /// Anything else, including floating comments.
    Other,
}

impl UnitKind {
    /// The CST node kind emitted for this unit.
    #[must_use]
    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            Self::FunctionDefinition => SyntaxKind::N_FUNCTION_DEFINITION,
            Self::FunctionPrototype => SyntaxKind::N_FUNCTION_PROTOTYPE,
            Self::VariableDeclaration => SyntaxKind::N_VARIABLE_DECLARATION,
            Self::StructDefinition => SyntaxKind::N_STRUCT_DEFINITION,
            Self::UnionDefinition => SyntaxKind::N_UNION_DEFINITION,
            Self::EnumDefinition => SyntaxKind::N_ENUM_DEFINITION,
            Self::Typedef => SyntaxKind::N_TYPEDEF,
            Self::MacroDefinePlain => SyntaxKind::N_MACRO_DEFINE_PLAIN,
            Self::MacroDefineFunctionLike => SyntaxKind::N_MACRO_DEFINE_FUNCTION_LIKE,
            Self::PreprocessorDirective => SyntaxKind::N_PREPROCESSOR_DIRECTIVE,
            Self::ExternBlock => SyntaxKind::N_EXTERN_BLOCK,
            Self::Statement => SyntaxKind::N_STATEMENT,
            Self::Other => SyntaxKind::N_OTHER,
        }
    }

    /// Inverse of [`UnitKind::syntax_kind`].
    #[must_use]
    pub fn from_syntax_kind(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::N_FUNCTION_DEFINITION => Self::FunctionDefinition,
            SyntaxKind::N_FUNCTION_PROTOTYPE => Self::FunctionPrototype,
            SyntaxKind::N_VARIABLE_DECLARATION => Self::VariableDeclaration,
            SyntaxKind::N_STRUCT_DEFINITION => Self::StructDefinition,
            SyntaxKind::N_UNION_DEFINITION => Self::UnionDefinition,
            SyntaxKind::N_ENUM_DEFINITION => Self::EnumDefinition,
            SyntaxKind::N_TYPEDEF => Self::Typedef,
            SyntaxKind::N_MACRO_DEFINE_PLAIN => Self::MacroDefinePlain,
            SyntaxKind::N_MACRO_DEFINE_FUNCTION_LIKE => Self::MacroDefineFunctionLike,
            SyntaxKind::N_PREPROCESSOR_DIRECTIVE => Self::PreprocessorDirective,
            SyntaxKind::N_EXTERN_BLOCK => Self::ExternBlock,
            SyntaxKind::N_STATEMENT => Self::Statement,
            SyntaxKind::N_OTHER => Self::Other,
            _ => return None,
        })
    }

    /// Whether bodies of this kind are rescanned for nested units.
    #[must_use]
    pub fn has_nested_units(self) -> bool {
        matches!(
            self,
            Self::StructDefinition | Self::UnionDefinition | Self::ExternBlock
        )
    }

    /// Stable name used in diagnostics and CLI output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FunctionDefinition => "FunctionDefinition",
            Self::FunctionPrototype => "FunctionPrototype",
            Self::VariableDeclaration => "VariableDeclaration",
            Self::StructDefinition => "StructDefinition",
            Self::UnionDefinition => "UnionDefinition",
            Self::EnumDefinition => "EnumDefinition",
            Self::Typedef => "Typedef",
            Self::MacroDefinePlain => "MacroDefinePlain",
            Self::MacroDefineFunctionLike => "MacroDefineFunctionLike",
            Self::PreprocessorDirective => "PreprocessorDirective",
            Self::ExternBlock => "ExternBlock",
            Self::Statement => "Statement",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One top-level construct plus its attached comments.
///
/// Units are immutable once emitted. A comment that attaches to nothing is
/// itself a unit of kind [`UnitKind::Other`] whose body is the comment.
///
/// # Examples
///
/// ```rust
/// use cscan::{scan_units, UnitKind};
///
/// let units = scan_units("/* pre */\nint *x; /* post */").unwrap_or_default();
/// let unit = &units[0];
/// assert_eq!(unit.kind(), UnitKind::VariableDeclaration);
/// assert_eq!(unit.pre_comment().map(|c| c.text()), Some("/* pre */"));
/// assert_eq!(unit.body_text(), "int *x;");
/// assert_eq!(unit.post_comment().map(|c| c.text()), Some("/* post */"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub(crate) kind: UnitKind,
    pub(crate) pre_comment: Option<Comment>,
    pub(crate) body_span: Span,
    pub(crate) body_text: String,
    pub(crate) post_comment: Option<Comment>,
    pub(crate) nested: Vec<Unit>,
    pub(crate) line: usize,
    pub(crate) signature: Signature,
}

impl Unit {
    #[must_use]
    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    #[must_use]
    pub fn pre_comment(&self) -> Option<&Comment> {
        self.pre_comment.as_ref()
    }

    /// Span from the first token of the construct to its terminator.
    #[must_use]
    pub fn body_span(&self) -> &Span {
        &self.body_span
    }

    #[must_use]
    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    #[must_use]
    pub fn post_comment(&self) -> Option<&Comment> {
        self.post_comment.as_ref()
    }

    /// Units found inside a struct, union or `extern` body.
    #[must_use]
    pub fn nested_units(&self) -> &[Unit] {
        &self.nested
    }

    /// Span covering the pre-comment, body and post-comment.
    #[must_use]
    pub fn span(&self) -> Span {
        let start = self
            .pre_comment
            .as_ref()
            .map_or(self.body_span.start, |c| c.span().start);
        let end = self
            .post_comment
            .as_ref()
            .map_or(self.body_span.end, |c| c.span().end);
        start..end
    }

    /// 1-based line of the body's first token.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Names extracted from the construct's tokens.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Primary name: the function, macro or tag name, else the first
    /// declarator.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.signature
            .name()
            .or_else(|| self.signature.declarators().first().map(String::as_str))
    }

    /// Whether this unit is a comment that attached to nothing.
    #[must_use]
    pub fn is_floating_comment(&self) -> bool {
        self.kind == UnitKind::Other
            && (self.body_text.starts_with("/*") || self.body_text.starts_with("//"))
            && self.pre_comment.is_none()
            && self.post_comment.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(UnitKind::FunctionDefinition)]
    #[case(UnitKind::MacroDefineFunctionLike)]
    #[case(UnitKind::ExternBlock)]
    #[case(UnitKind::Other)]
    fn syntax_kind_round_trips(#[case] kind: UnitKind) {
        assert_eq!(UnitKind::from_syntax_kind(kind.syntax_kind()), Some(kind));
    }

    #[test]
    fn non_unit_node_has_no_kind() {
        assert_eq!(UnitKind::from_syntax_kind(SyntaxKind::N_BODY), None);
    }

    #[test]
    fn display_uses_stable_name() {
        assert_eq!(UnitKind::StructDefinition.to_string(), "StructDefinition");
    }
}
