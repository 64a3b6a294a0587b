//! Names declared by a unit.
//!
//! Signatures are derived from tokens alone: no types are resolved and no
//! macros are expanded. What each field holds depends on the unit kind:
//!
//! | Kind | `name` | `parameters` | `declarators` |
//! |---|---|---|---|
//! | function definition / prototype | function | parameter names | |
//! | `#define` | macro | macro parameters (function-like only) | |
//! | struct / union / enum | tag, if any | | names after `}` |
//! | typedef | | | defined type names |
//! | variable declaration | | | declared names |

use crate::config::ScanOptions;
use crate::parser::span_scanner::Extent;
use crate::parser::span_scanners::declarators::{
    aggregate_tag, declarator_names, function_declarator, parameter_names, top_level_aggregate,
    top_level_indices, word,
};
use crate::parser::span_scanners::directives::define_header;
use crate::parser::span_scanners::significant_tokens;
use crate::tokenizer::Token;
use crate::SyntaxKind;

use super::UnitKind;

/// Declared names of a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    name: Option<String>,
    parameters: Vec<String>,
    declarators: Vec<String>,
}

impl Signature {
    /// Function, macro or aggregate tag name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parameter names of a function or function-like macro.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Names introduced by declarators.
    #[must_use]
    pub fn declarators(&self) -> &[String] {
        &self.declarators
    }

    /// Whether no name was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parameters.is_empty() && self.declarators.is_empty()
    }
}

fn without_terminator(mut sig: Vec<Token>) -> Vec<Token> {
    if sig.last().is_some_and(|t| t.kind() == SyntaxKind::T_SEMI) {
        sig.pop();
    }
    sig
}

/// Build the signature of the construct covered by `extent`.
pub(crate) fn extract_signature(
    extent: &Extent,
    tokens: &[Token],
    src: &str,
    options: &ScanOptions,
) -> Signature {
    match extent.kind {
        UnitKind::MacroDefinePlain | UnitKind::MacroDefineFunctionLike => tokens
            .get(extent.first)
            .and_then(|token| define_header(token, src))
            .map_or_else(Signature::default, |header| Signature {
                name: Some(header.name),
                parameters: header.parameters.unwrap_or_default(),
                declarators: Vec::new(),
            }),
        UnitKind::FunctionDefinition | UnitKind::FunctionPrototype => {
            let end = extent.body.map_or(extent.last + 1, |(open, _)| open);
            let sig = without_terminator(significant_tokens(tokens, extent.first..end));
            function_declarator(&sig, src, options).map_or_else(Signature::default, |decl| {
                Signature {
                    name: sig.get(decl.name).map(|t| t.text(src).to_string()),
                    parameters: parameter_names(&sig, decl.open, decl.close, src, options),
                    declarators: Vec::new(),
                }
            })
        }
        UnitKind::StructDefinition | UnitKind::UnionDefinition | UnitKind::EnumDefinition => {
            let Some((open, close)) = extent.body else {
                return Signature::default();
            };
            let head = significant_tokens(tokens, extent.first..open);
            let tail = without_terminator(significant_tokens(tokens, close + 1..extent.last + 1));
            Signature {
                name: top_level_aggregate(&head, src)
                    .and_then(|(keyword, _)| aggregate_tag(&head, keyword, head.len(), src, options)),
                parameters: Vec::new(),
                declarators: declarator_names(&tail, src, options),
            }
        }
        UnitKind::Typedef => {
            let sig = without_terminator(significant_tokens(tokens, extent.first..extent.last + 1));
            let after = top_level_indices(&sig, src)
                .into_iter()
                .find(|&idx| sig.get(idx).and_then(|t| word(t, src)) == Some("typedef"))
                .map_or(0, |idx| idx + 1);
            Signature {
                declarators: declarator_names(sig.get(after..).unwrap_or_default(), src, options),
                ..Signature::default()
            }
        }
        UnitKind::VariableDeclaration => {
            let sig = without_terminator(significant_tokens(tokens, extent.first..extent.last + 1));
            Signature {
                declarators: declarator_names(&sig, src, options),
                ..Signature::default()
            }
        }
        UnitKind::PreprocessorDirective
        | UnitKind::ExternBlock
        | UnitKind::Statement
        | UnitKind::Other => Signature::default(),
    }
}

#[cfg(test)]
mod tests {
    use crate::scan_units;
    use rstest::rstest;

    fn first_signature(src: &str) -> super::Signature {
        scan_units(src)
            .unwrap_or_else(|e| panic!("scan failed: {e}"))
            .first()
            .map(|u| u.signature().clone())
            .expect("at least one unit")
    }

    #[rstest]
    #[case("int func(int a, int b);", Some("func"), vec!["a", "b"])]
    #[case("static void run(void) { go(); }", Some("run"), vec![])]
    #[case("qwe * (* asd(void))(int aa, int bb) {}", Some("asd"), vec![])]
    #[case("#define asd(x, y) ASD", Some("asd"), vec!["x", "y"])]
    #[case("#define PLAIN 1", Some("PLAIN"), vec![])]
    fn names_and_parameters(
        #[case] src: &str,
        #[case] name: Option<&str>,
        #[case] params: Vec<&str>,
    ) {
        let sig = first_signature(src);
        assert_eq!(sig.name(), name);
        assert_eq!(sig.parameters(), params);
    }

    #[rstest]
    #[case("struct aaa { int x; } bbb, *ccc;", Some("aaa"), vec!["bbb", "ccc"])]
    #[case("typedef union { int x; } u_t;", None, vec!["u_t"])]
    #[case("typedef int (*fn)(int);", None, vec!["fn"])]
    #[case("typedef TAILQ_HEAD(aa,bb) tqh;", None, vec!["tqh"])]
    #[case("static int x = 1, *y;", None, vec!["x", "y"])]
    #[case("enum color { RED, GREEN };", Some("color"), vec![])]
    fn declarators(
        #[case] src: &str,
        #[case] name: Option<&str>,
        #[case] expected: Vec<&str>,
    ) {
        let sig = first_signature(src);
        assert_eq!(sig.name(), name);
        assert_eq!(sig.declarators(), expected);
    }

    #[test]
    fn statements_have_empty_signature() {
        assert!(first_signature("func(5, 6);").is_empty());
    }
}
