//! Unit scanner producing a rowan CST.
//!
//! This module contains the entry points for scanning C source. The input is
//! tokenised, split into top-level constructs by the boundary scanner, comments
//! are attached by the resolver and the result is emitted as [`Unit`] records
//! alongside a lossless `rowan` tree. Every stage is a pure function of the
//! previous stage's output and every failure is fatal to the scan.

use log::debug;

use crate::config::ScanOptions;
use crate::tokenizer::{Lexer, Token};

/// Iterate over the token stream and dispatch handlers by [`SyntaxKind`].
///
/// The macro expects a scanning context `ctx` with a `stream` field. It loops
/// until the stream is exhausted, invoking the handler associated with each
/// matching kind pattern and the fallback handler for everything else.
/// Handlers must advance the stream to consume the tokens they process and
/// return `Result<(), ScanError>`; the first error ends the loop and is
/// propagated with `?`.
///
/// # Examples
///
/// ```ignore
/// struct State<'a> {
///     stream: TokenStream<'a>,
/// }
///
/// fn skip(st: &mut State<'_>) -> Result<(), ScanError> {
///     st.stream.advance();
///     Ok(())
/// }
///
/// let mut st = State { stream: TokenStream::bounded(&tokens, src, 0, tokens.len()) };
/// token_dispatch!(st, {
///     SyntaxKind::T_WHITESPACE => skip,
/// }, _ => skip);
/// ```
///
/// [`SyntaxKind`]: crate::SyntaxKind
macro_rules! token_dispatch {
    ( $ctx:ident, {
        $( $kind:pat => $handler:ident ),* $(,)?
    }, _ => $fallback:ident ) => {{
        while let Some(token) = $ctx.stream.peek() {
            match token.kind() {
                $( $kind => $handler(&mut $ctx)?, )*
                _ => $fallback(&mut $ctx)?,
            }
        }
    }};
}

pub mod ast;
pub(crate) mod comments;
pub mod cst_builder;
pub(crate) mod delimiter;
pub mod errors;
pub(crate) mod span_scanner;
pub(crate) mod span_scanners;
pub(crate) mod token_stream;

pub use ast::Unit;
pub use cst_builder::{Parsed, line_col};
pub use errors::ScanError;

use cst_builder::{UnitEmitter, build_green_tree, validate_units};

/// Scan `src` with default options.
///
/// # Errors
///
/// See [`parse_with`].
///
/// # Examples
///
/// ```rust
/// use cscan::{parse, UnitKind};
///
/// let parsed = parse("int func(int a, int b);").expect("valid C");
/// assert_eq!(parsed.units().len(), 1);
/// assert_eq!(parsed.units()[0].kind(), UnitKind::FunctionPrototype);
/// ```
pub fn parse(src: &str) -> Result<Parsed, ScanError> {
    parse_with(src, &ScanOptions::default())
}

/// Scan `src` from `options.start_offset()` to the end of the buffer.
///
/// Token and unit spans are byte offsets into the whole of `src`.
///
/// # Errors
///
/// Returns [`ScanError::InvalidOffset`] when the start offset is not a
/// character boundary, [`ScanError::Lex`] for unterminated comments, literals
/// or continuations, [`ScanError::Structural`] for an unbalanced closing
/// delimiter and [`ScanError::UnterminatedConstruct`] when the buffer ends
/// inside a construct.
pub fn parse_with(src: &str, options: &ScanOptions) -> Result<Parsed, ScanError> {
    let offset = options.start_offset();
    let lexer = Lexer::with_offset(src, offset).ok_or(ScanError::InvalidOffset {
        offset,
        len: src.len(),
    })?;
    let tokens = lexer.collect::<Result<Vec<Token>, _>>()?;
    debug!("lexed {} tokens from offset {offset}", tokens.len());

    let items = span_scanner::scan_items(&tokens, src, options)?;
    let slots = comments::resolve(items, &tokens, src);
    let units = UnitEmitter::new(&tokens, src, options).emit(&slots);
    validate_units(&units, &(offset..src.len()))?;
    debug!("emitted {} top-level units", units.len());

    let green = build_green_tree(&tokens, src, &slots);
    Ok(Parsed::new(green, units, tokens, src, offset))
}

/// Scan `src` and return only the top-level units.
///
/// # Errors
///
/// See [`parse_with`].
pub fn scan_units(src: &str) -> Result<Vec<Unit>, ScanError> {
    parse(src).map(Parsed::into_units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::UnitKind;
    use rstest::rstest;

    #[test]
    fn empty_buffer_has_no_units() {
        let parsed = parse("").expect("scan");
        assert!(parsed.units().is_empty());
        assert_eq!(parsed.text(), "");
    }

    #[test]
    fn whitespace_only_buffer_has_no_units() {
        let units = scan_units(" \n\t\n").expect("scan");
        assert!(units.is_empty());
    }

    #[rstest]
    #[case(7)]
    #[case(1)]
    fn rejects_bad_start_offset(#[case] offset: usize) {
        let options = ScanOptions::builder().start_offset(offset).build();
        let err = parse_with("é x;", &options).expect_err("bad offset");
        assert_eq!(err, ScanError::InvalidOffset { offset, len: 5 });
        assert_eq!(err.offset(), offset);
    }

    #[test]
    fn lex_errors_propagate() {
        let err = parse("int x; /* open").expect_err("unterminated comment");
        assert!(matches!(err, ScanError::Lex(_)));
        assert_eq!(err.offset(), 7);
    }

    #[test]
    fn units_keep_order_and_text() {
        let src = "#include <stdio.h>\n\nint main(void)\n{\n\treturn 0;\n}\n";
        let units = scan_units(src).expect("scan");
        let kinds: Vec<_> = units.iter().map(Unit::kind).collect();
        assert_eq!(
            kinds,
            vec![UnitKind::PreprocessorDirective, UnitKind::FunctionDefinition]
        );
        assert_eq!(
            units.get(1).map(Unit::body_text),
            Some("int main(void)\n{\n\treturn 0;\n}")
        );
    }
}
