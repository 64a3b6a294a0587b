//! Scan configuration.
//!
//! [`ScanOptions`] carries the few knobs a caller may turn: where in the
//! buffer to start, and which project macros behave like `__attribute__`.
//! Instances are built through [`ScanOptions::builder`].

use phf::phf_set;

/// Words whose parenthesised argument is an annotation rather than a
/// parameter list.
static BUILTIN_ATTRIBUTE_WORDS: phf::Set<&'static str> = phf_set! {
    "__attribute__",
    "__attribute",
    "__declspec",
    "__asm__",
    "__asm",
    "asm",
    "_Alignas",
    "alignas",
    "__typeof__",
    "typeof",
};

/// Options controlling a scan.
///
/// # Examples
///
/// ```rust
/// use cscan::ScanOptions;
///
/// let options = ScanOptions::builder()
///     .start_offset(4)
///     .attribute_macro("WT_GCC_FUNC_ATTRIBUTE")
///     .build();
/// assert_eq!(options.start_offset(), 4);
/// assert!(options.is_attribute_word("WT_GCC_FUNC_ATTRIBUTE"));
/// assert!(options.is_attribute_word("__attribute__"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    start_offset: usize,
    attribute_macros: Vec<String>,
}

impl ScanOptions {
    /// Create a builder with default settings.
    #[must_use]
    pub fn builder() -> ScanOptionsBuilder {
        ScanOptionsBuilder::default()
    }

    /// Byte offset where scanning starts.
    #[must_use]
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Extra attribute-like macro names supplied by the caller.
    #[must_use]
    pub fn attribute_macros(&self) -> &[String] {
        &self.attribute_macros
    }

    /// Whether `word` introduces an annotation group, either built in or
    /// configured.
    #[must_use]
    pub fn is_attribute_word(&self, word: &str) -> bool {
        BUILTIN_ATTRIBUTE_WORDS.contains(word) || self.attribute_macros.iter().any(|m| m == word)
    }
}

/// Builder for [`ScanOptions`].
#[derive(Debug, Default, Clone)]
pub struct ScanOptionsBuilder {
    start_offset: usize,
    attribute_macros: Vec<String>,
}

impl ScanOptionsBuilder {
    /// Start scanning at `offset` instead of the beginning of the buffer.
    #[must_use]
    pub fn start_offset(mut self, offset: usize) -> Self {
        self.start_offset = offset;
        self
    }

    /// Treat `name(...)` like `__attribute__((...))`.
    #[must_use]
    pub fn attribute_macro(mut self, name: impl Into<String>) -> Self {
        self.attribute_macros.push(name.into());
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> ScanOptions {
        ScanOptions {
            start_offset: self.start_offset,
            attribute_macros: self.attribute_macros,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("__attribute__", true)]
    #[case("__declspec", true)]
    #[case("asm", true)]
    #[case("WT_INLINE", false)]
    #[case("int", false)]
    fn builtin_attribute_words(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(ScanOptions::default().is_attribute_word(word), expected);
    }

    #[test]
    fn configured_macros_are_attribute_words() {
        let options = ScanOptions::builder().attribute_macro("WT_ATTR").build();
        assert!(options.is_attribute_word("WT_ATTR"));
        assert_eq!(options.attribute_macros(), ["WT_ATTR".to_string()]);
    }

    #[test]
    fn default_starts_at_zero() {
        assert_eq!(ScanOptions::builder().build().start_offset(), 0);
    }
}
