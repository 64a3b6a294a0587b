//! Build a `rowan` green tree from tokens and resolved unit slots.

use log::warn;
use rowan::{GreenNode, GreenNodeBuilder, Language};

use crate::parser::comments::Slot;
use crate::tokenizer::Token;
use crate::{CLanguage, Span, SyntaxKind};

fn validate_token_span(span: &Span, src_len: usize) -> bool {
    if span.start <= span.end && span.end <= src_len {
        true
    } else {
        #[cfg(debug_assertions)]
        {
            panic!("token span {span:?} out of bounds for source of length {src_len}");
        }

        #[cfg(not(debug_assertions))]
        {
            warn!("token span {span:?} out of bounds for source of length {src_len}");
            false
        }
    }
}

struct TreeBuilder<'a> {
    builder: GreenNodeBuilder<'static>,
    tokens: &'a [Token],
    src: &'a str,
    cursor: usize,
}

impl TreeBuilder<'_> {
    fn start(&mut self, kind: SyntaxKind) {
        self.builder.start_node(CLanguage::kind_to_raw(kind));
    }

    fn finish(&mut self) {
        self.builder.finish_node();
    }

    /// Push every token from the cursor up to, but excluding, `end`.
    fn push_tokens_until(&mut self, end: usize) {
        while self.cursor < end {
            if let Some(token) = self.tokens.get(self.cursor)
                && validate_token_span(token.span(), self.src.len())
            {
                push_token(&mut self.builder, token, self.src);
            }
            self.cursor += 1;
        }
    }

    /// Push the single token at `idx` wrapped in a node of `kind`.
    fn push_wrapped(&mut self, kind: SyntaxKind, idx: usize) {
        self.push_tokens_until(idx);
        self.start(kind);
        self.push_tokens_until(idx + 1);
        self.finish();
    }

    fn push_slots(&mut self, slots: &[Slot]) {
        for slot in slots {
            match slot {
                Slot::Floating(idx) => {
                    self.push_tokens_until(*idx);
                    self.start(SyntaxKind::N_OTHER);
                    self.push_wrapped(SyntaxKind::N_BODY, *idx);
                    self.finish();
                }
                Slot::Unit(unit) => {
                    let extent = &unit.extent;
                    self.push_tokens_until(unit.pre.unwrap_or(extent.first));
                    self.start(extent.kind.syntax_kind());
                    if let Some(pre) = unit.pre {
                        self.push_wrapped(SyntaxKind::N_PRE_COMMENT, pre);
                    }
                    self.push_tokens_until(extent.first);
                    self.start(SyntaxKind::N_BODY);
                    if let Some((open, _)) = extent.body
                        && !unit.nested.is_empty()
                    {
                        self.push_tokens_until(open + 1);
                        self.push_slots(&unit.nested);
                    }
                    self.push_tokens_until(extent.last + 1);
                    self.finish();
                    if let Some(post) = unit.post {
                        self.push_wrapped(SyntaxKind::N_POST_COMMENT, post);
                    }
                    self.finish();
                }
            }
        }
    }
}

/// Construct the CST from the token stream and resolved slots.
///
/// Tokens not covered by any unit (whitespace between units) are attached to
/// the nearest enclosing node, so the tree text always equals the scanned
/// buffer.
pub(crate) fn build_green_tree(tokens: &[Token], src: &str, slots: &[Slot]) -> GreenNode {
    let mut tree = TreeBuilder {
        builder: GreenNodeBuilder::new(),
        tokens,
        src,
        cursor: 0,
    };
    tree.start(SyntaxKind::N_TRANSLATION_UNIT);
    tree.push_slots(slots);
    tree.push_tokens_until(tokens.len());
    tree.finish();
    tree.builder.finish()
}

fn push_token(builder: &mut GreenNodeBuilder, token: &Token, src: &str) {
    let text = src.get(token.span().clone()).map_or_else(
        || {
            warn!(
                "token span {:?} out of bounds for source of length {}",
                token.span(),
                src.len()
            );
            ""
        },
        |t| t,
    );
    builder.token(CLanguage::kind_to_raw(token.kind()), text);
}
