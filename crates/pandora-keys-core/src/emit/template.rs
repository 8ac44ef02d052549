//! Java declaration templates for a captured key block.

use crate::keys::KeyName;

/// Wraps an initializer block in a `public static final` Java array.
///
/// Keys with the plural `s` suffix hold the S-boxes and become `long[][]`
/// with doubled braces; the others become `long[]`. `block` is inserted
/// verbatim and is expected to end with a line break.
pub fn declaration(key: KeyName, block: &str) -> String {
    if key.is_plural() {
        format!("public static final long[][] {key} = {{{{\n{block}\t}}}};")
    } else {
        format!("public static final long[] {key} = {{\n{block}\t}};")
    }
}
