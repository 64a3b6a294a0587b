//! Wrapper for the root `TRANSLATION_UNIT` node.
//!
//! Provides typed navigation over unit nodes in the CST.
//!
//! # Examples
//!
//! ```rust
//! use cscan::{parse, UnitKind};
//!
//! let parsed = parse("/* c */\nint x;\nvoid f(void) {}").expect("valid C");
//! let units = parsed.root().units();
//! assert_eq!(units.len(), 2);
//! assert_eq!(units[0].kind(), Some(UnitKind::VariableDeclaration));
//! assert_eq!(units[0].pre_comment().as_deref(), Some("/* c */"));
//! ```

use rowan::GreenNode;

use super::{AstNode, UnitKind};
use crate::{CLanguage, SyntaxKind};

/// The root of a scanned C buffer.
#[derive(Debug, Clone)]
pub struct Root {
    pub(crate) syntax: rowan::SyntaxNode<CLanguage>,
}

impl Root {
    /// Obtain the underlying syntax node.
    #[must_use]
    pub fn syntax(&self) -> &rowan::SyntaxNode<CLanguage> {
        &self.syntax
    }

    /// Create a new `Root` from a green node.
    #[must_use]
    pub fn from_green(green: GreenNode) -> Self {
        Self {
            syntax: rowan::SyntaxNode::<CLanguage>::new_root(green),
        }
    }

    /// The kind of this root node.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.syntax.kind()
    }

    /// Text range covered by this root.
    #[must_use]
    pub fn text_range(&self) -> rowan::TextRange {
        self.syntax.text_range()
    }

    /// Text content of this root.
    #[must_use]
    pub fn text(&self) -> String {
        self.syntax.text().to_string()
    }

    /// Collect the top-level unit nodes, floating comments included.
    #[must_use]
    pub fn units(&self) -> Vec<UnitNode> {
        collect_units(&self.syntax)
    }
}

fn collect_units(parent: &rowan::SyntaxNode<CLanguage>) -> Vec<UnitNode> {
    parent
        .children()
        .filter(|n| UnitKind::from_syntax_kind(n.kind()).is_some())
        .map(|syntax| UnitNode { syntax })
        .collect()
}

/// A unit node in the CST.
#[derive(Debug, Clone)]
pub struct UnitNode {
    pub(crate) syntax: rowan::SyntaxNode<CLanguage>,
}

impl UnitNode {
    /// Unit classification derived from the node kind.
    #[must_use]
    pub fn kind(&self) -> Option<UnitKind> {
        UnitKind::from_syntax_kind(self.syntax.kind())
    }

    fn child_text(&self, kind: SyntaxKind) -> Option<String> {
        self.syntax
            .children()
            .find(|n| n.kind() == kind)
            .map(|n| n.text().to_string())
    }

    #[must_use]
    pub fn pre_comment(&self) -> Option<String> {
        self.child_text(SyntaxKind::N_PRE_COMMENT)
    }

    #[must_use]
    pub fn post_comment(&self) -> Option<String> {
        self.child_text(SyntaxKind::N_POST_COMMENT)
    }

    /// Text of the construct itself, nested units included.
    #[must_use]
    pub fn body_text(&self) -> String {
        self.child_text(SyntaxKind::N_BODY).unwrap_or_default()
    }

    /// Unit nodes inside this unit's body.
    #[must_use]
    pub fn nested(&self) -> Vec<Self> {
        self.syntax
            .children()
            .find(|n| n.kind() == SyntaxKind::N_BODY)
            .map(|body| collect_units(&body))
            .unwrap_or_default()
    }

    /// Full text including attached comments.
    #[must_use]
    pub fn text(&self) -> String {
        self.syntax.text().to_string()
    }

    /// Items of the first parenthesised group in the body, e.g. the raw
    /// parameter list of a function or function-like macro invocation.
    #[must_use]
    pub fn first_group_items(&self) -> Vec<String> {
        self.syntax
            .children()
            .find(|n| n.kind() == SyntaxKind::N_BODY)
            .map(|body| crate::syntax_utils::parse_parenthesized_list(body.children_with_tokens()))
            .unwrap_or_default()
    }
}

impl_ast_node!(Root);
impl_ast_node!(UnitNode);
