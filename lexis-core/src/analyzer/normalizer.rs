//! Case folding and line-break removal.
//!
//! Both operations have an ASCII fast path. Case folding hands anything
//! non-ASCII to `str::to_lowercase`, the same rule stopwords are folded with.

use memchr::memchr2_iter;

#[inline(always)]
const fn is_line_break(b: u8) -> bool {
    matches!(b, b'\r' | b'\n')
}

/// Lowercases text and removes line breaks.
///
/// Stateless; a single value can be shared by every caller.
///
/// # Examples
///
/// ```
/// use lexis_core::analyzer::normalizer::TextNormalizer;
///
/// let n = TextNormalizer::new();
/// assert_eq!(n.fold_case("Don't STOP"), "don't stop");
/// assert_eq!(n.remove_line_breaks("one\r\ntwo\n\nthree"), "one two three");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Creates a normalizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Lowercases `input` into `out`, clearing it first.
    ///
    /// Reuses the buffer's capacity for ASCII input. Non-ASCII input goes
    /// through `str::to_lowercase` as a whole, so context-sensitive mappings
    /// hold: a word-final `Σ` becomes `ς`, and `İ` expands.
    #[inline]
    pub fn fold_case_into(&self, input: &str, out: &mut String) {
        out.clear();

        if input.is_ascii() {
            out.reserve(input.len());
            out.extend(input.bytes().map(|b| b.to_ascii_lowercase() as char));
        } else {
            out.push_str(&input.to_lowercase());
        }
    }

    /// Lowercases text and returns a new String.
    #[inline]
    pub fn fold_case(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.fold_case_into(input, &mut out);
        out
    }

    /// Replaces every maximal run of `\r`/`\n` with one space, into `out`.
    ///
    /// Other whitespace, including tabs and runs of spaces, is left alone.
    pub fn remove_line_breaks_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let bytes = input.as_bytes();
        let mut start = 0usize;

        for i in memchr2_iter(b'\r', b'\n', bytes) {
            if i < start {
                continue;
            }
            out.push_str(&input[start..i]);
            out.push(' ');

            let mut end = i + 1;
            while end < bytes.len() && is_line_break(bytes[end]) {
                end += 1;
            }
            start = end;
        }

        out.push_str(&input[start..]);
    }

    /// Removes line breaks and returns a new String.
    pub fn remove_line_breaks(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.remove_line_breaks_into(input, &mut out);
        out
    }
}

/// Replaces every run of line breaks in `text` with a single space.
pub fn remove_line_breaks(text: &str) -> String {
    TextNormalizer::new().remove_line_breaks(text)
}
