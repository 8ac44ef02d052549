//! Numeric literal rewriting.
//!
//! The C headers spell every table entry as a 32-bit unsigned hex literal
//! such as `0xD1310BA6`. Values above `0x7FFFFFFF` overflow a Java `int`, so
//! each one is turned into a `long` literal by appending `L`.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Suffix marking a Java `long` literal
pub const LONG_SUFFIX: &str = "L";

/// A `0x` literal with exactly eight hex digits, not glued to other word
/// characters on either side.
///
/// Lower-case digits are accepted as well as the upper-case ones libpiano
/// uses, unlike the Python generator this replaces: an unsuffixed
/// `0xdeadbeef` would otherwise compile as a negative `int` and sign-extend
/// when widened into the `long[]`.
static HEX32_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b0x[0-9A-Fa-f]{8}\b").expect("valid regex"));

/// Appends [`LONG_SUFFIX`] to every eight-digit hex literal in `block`.
///
/// Everything else, including whitespace, commas and line endings, is kept
/// as is. Literals that already carry the suffix are left alone, so the
/// rewrite is idempotent.
pub fn suffix_hex_literals(block: &str) -> Cow<'_, str> {
    HEX32_REGEX.replace_all(block, |caps: &regex::Captures<'_>| {
        format!("{}{}", &caps[0], LONG_SUFFIX)
    })
}
