//! Unit model and light-weight CST wrappers.
//!
//! [`Unit`] is the owned record handed to callers: one top-level construct,
//! its attached comments and any units nested in its body. [`Root`] and
//! [`UnitNode`] offer the same structure as typed navigation over the
//! `rowan` tree built by the emitter.

use crate::CLanguage;

/// Common interface for AST wrappers.
pub trait AstNode {
    /// Access the underlying syntax node.
    fn syntax(&self) -> &rowan::SyntaxNode<CLanguage>;
}

macro_rules! impl_ast_node {
    ($ty:ty) => {
        impl AstNode for $ty {
            fn syntax(&self) -> &rowan::SyntaxNode<CLanguage> {
                &self.syntax
            }
        }
    };
}

mod comment;
mod root;
mod signature;
mod unit;

pub use comment::{Comment, CommentStyle};
pub use root::{Root, UnitNode};
pub use signature::Signature;
pub(crate) use signature::extract_signature;
pub use unit::{Unit, UnitKind};
