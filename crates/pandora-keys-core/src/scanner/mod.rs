//! Line-oriented scanning of C headers for key tables.
//!
//! ## Algorithm Overview
//!
//! The scanner is a two-state machine driven one line at a time:
//!
//! 1. While [`ScanState::Idle`], look for a declaration such as
//!    `static const uint32_t in_key_p[16 + 2] = {`
//! 2. While [`ScanState::Capturing`], append each line verbatim until a line
//!    containing `};` closes the array
//! 3. On the closing line, rewrite the hex literals, wrap the block in its
//!    Java declaration and store it in the shared [`KeyTable`]
//!
//! Neither the declaration line nor the closing line is part of the captured
//! block. A capture still open at end of input is dropped.

mod literal;

use crate::emit::declaration;
use crate::error::{Error, Result};
use crate::keys::{KeyName, KeyTable};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, trace, warn};

pub use literal::{suffix_hex_literals, LONG_SUFFIX};

/// Token that closes an array initializer
const TERMINATOR: &str = "};";

/// Matches a `uint32_t` declaration of one of the four key arrays.
static DECLARATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"uint32_t ((?:in|out)_key_[ps])").expect("valid regex"));

/// Scanner state carried from one line to the next
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Searching for a key declaration
    #[default]
    Idle,
    /// Accumulating the initializer lines of `key`
    Capturing {
        /// The key being read
        key: KeyName,
        /// Raw lines seen so far, line endings included
        data: String,
    },
}

/// Outcome of scanning one input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Keys finalized from this input, in the order their arrays closed
    pub found: Vec<KeyName>,
    /// Key whose initializer was still open at end of input
    pub discarded: Option<KeyName>,
}

/// Incremental scanner over the lines of a single input
#[derive(Debug, Default)]
pub struct Scanner {
    state: ScanState,
    report: ScanReport,
}

impl Scanner {
    /// Creates a scanner in the idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Feeds one line, including its line ending if it has one
    pub fn feed_line(&mut self, line: &str, keys: &mut KeyTable) {
        match &mut self.state {
            ScanState::Idle => {
                if let Some(key) = match_declaration(line) {
                    trace!("Found declaration of {}", key);
                    self.state = ScanState::Capturing {
                        key,
                        data: String::new(),
                    };
                }
            }
            ScanState::Capturing { key, data } => {
                if !line.contains(TERMINATOR) {
                    data.push_str(line);
                    return;
                }

                let key = *key;
                let decl = declaration(key, &suffix_hex_literals(data));
                debug!("Captured {} ({} bytes of initializer)", key, data.len());
                keys.insert(key, decl);
                self.report.found.push(key);
                self.state = ScanState::Idle;
            }
        }
    }

    /// Ends the input and returns what was found.
    ///
    /// An unterminated capture is dropped and reported in
    /// [`ScanReport::discarded`].
    pub fn finish(mut self) -> ScanReport {
        if let ScanState::Capturing { key, .. } = self.state {
            self.report.discarded = Some(key);
        }
        self.report
    }
}

/// Returns the key declared on `line`, if any
fn match_declaration(line: &str) -> Option<KeyName> {
    let caps = DECLARATION_REGEX.captures(line)?;
    // The pattern only admits the four known names
    caps[1].parse().ok()
}

/// Scans `text` and stores every completed key in `keys`.
pub fn scan_str(text: &str, keys: &mut KeyTable) -> ScanReport {
    let mut scanner = Scanner::new();
    for line in text.split_inclusive('\n') {
        scanner.feed_line(line, keys);
    }
    scanner.finish()
}

/// Scans a header file and stores every completed key in `keys`.
///
/// Fails without reading anything if `path` is not a regular file. Bytes
/// that are not valid UTF-8 are replaced rather than rejected.
pub fn scan_file(path: impl AsRef<Path>, keys: &mut KeyTable) -> Result<ScanReport> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::not_a_file(path));
    }

    trace!("Reading {}", path.display());
    let bytes = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    // Headers may carry Latin-1 comments; key blocks are plain ASCII
    let text = String::from_utf8_lossy(&bytes);
    let report = scan_str(&text, keys);

    if let Some(key) = report.discarded {
        warn!(
            "{}: {} is never closed with '{}', ignoring it",
            path.display(),
            key,
            TERMINATOR
        );
    }
    debug!("Scan of {} complete: found {:?}", path.display(), report.found);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OUT_KEY_P: &str = "\
static const uint32_t out_key_p[16 + 2] = {
\t0xD8A1A847, 0xBCDA04F4,
\t0x54684D7B, 0xCDFD2D53,
};
";

    #[test]
    fn test_match_declaration() {
        assert_eq!(
            match_declaration("static const uint32_t in_key_s[4][256] = {"),
            Some(KeyName::InKeyS)
        );
        assert_eq!(match_declaration("uint32_t out_key_p[18];"), Some(KeyName::OutKeyP));
        assert_eq!(match_declaration("static const uint32_t other_key_p[18] = {"), None);
        assert_eq!(match_declaration("uint8_t in_key_p[18] = {"), None);
        assert_eq!(match_declaration("uint32_t in_key_q[18] = {"), None);
    }

    #[test]
    fn test_single_key() {
        let mut keys = KeyTable::new();
        let report = scan_str(OUT_KEY_P, &mut keys);

        assert_eq!(report.found, vec![KeyName::OutKeyP]);
        assert_eq!(report.discarded, None);
        assert_eq!(
            keys.get(KeyName::OutKeyP).unwrap(),
            "public static final long[] out_key_p = {\n\
             \t0xD8A1A847L, 0xBCDA04F4L,\n\
             \t0x54684D7BL, 0xCDFD2D53L,\n\
             \t};"
        );
    }

    #[test]
    fn test_plural_key_gets_two_dimensions() {
        let text = "uint32_t in_key_s[4][256] = {\n\t0x01234567,\n}};\n";
        let mut keys = KeyTable::new();
        scan_str(text, &mut keys);
        assert_eq!(
            keys.get(KeyName::InKeyS).unwrap(),
            "public static final long[][] in_key_s = {{\n\t0x01234567L,\n\t}};"
        );
    }

    #[test]
    fn test_no_declarations() {
        let mut keys = KeyTable::new();
        let report = scan_str("#include <stdint.h>\nint x[] = {\n1,\n};\n", &mut keys);
        assert_eq!(report, ScanReport::default());
        assert!(keys.is_empty());
    }

    #[test]
    fn test_unterminated_capture_is_discarded() {
        let text = "uint32_t in_key_p[18] = {\n\t0x11111111,\n";
        let mut keys = KeyTable::new();
        let report = scan_str(text, &mut keys);
        assert!(report.found.is_empty());
        assert_eq!(report.discarded, Some(KeyName::InKeyP));
        assert!(keys.is_empty());
    }

    #[test]
    fn test_declaration_line_is_not_a_terminator() {
        // The opening line is consumed by the declaration match even if it
        // also closes the array, so the next `};` ends the capture.
        let text = "uint32_t in_key_p[1] = { 0 };\n\t0x22222222,\n};\n";
        let mut keys = KeyTable::new();
        scan_str(text, &mut keys);
        assert_eq!(
            keys.get(KeyName::InKeyP).unwrap(),
            "public static final long[] in_key_p = {\n\t0x22222222L,\n\t};"
        );
    }

    #[test]
    fn test_declarations_inside_capture_are_data() {
        let text = "uint32_t in_key_p[1] = {\nuint32_t out_key_p[1] = {\n};\n";
        let mut keys = KeyTable::new();
        let report = scan_str(text, &mut keys);
        assert_eq!(report.found, vec![KeyName::InKeyP]);
        assert!(keys.get(KeyName::OutKeyP).is_none());
    }

    #[test]
    fn test_line_endings_preserved() {
        let text = "uint32_t in_key_p[1] = {\r\n\t0x33333333\r\n};\r\n";
        let mut keys = KeyTable::new();
        scan_str(text, &mut keys);
        assert!(keys
            .get(KeyName::InKeyP)
            .unwrap()
            .contains("\t0x33333333L\r\n\t};"));
    }

    #[test]
    fn test_later_input_overwrites() {
        let mut keys = KeyTable::new();
        scan_str(OUT_KEY_P, &mut keys);
        scan_str("uint32_t out_key_p[1] = {\n\t0x00000000\n};\n", &mut keys);
        assert_eq!(keys.len(), 1);
        assert!(keys.get(KeyName::OutKeyP).unwrap().contains("0x00000000L"));
    }

    #[test]
    fn test_scanner_states() {
        let mut keys = KeyTable::new();
        let mut scanner = Scanner::new();
        assert_eq!(scanner.state(), &ScanState::Idle);

        scanner.feed_line("uint32_t out_key_s[4][256] = {\n", &mut keys);
        assert_eq!(
            scanner.state(),
            &ScanState::Capturing {
                key: KeyName::OutKeyS,
                data: String::new()
            }
        );

        scanner.feed_line("\t0x44444444,\n", &mut keys);
        scanner.feed_line("};\n", &mut keys);
        assert_eq!(scanner.state(), &ScanState::Idle);
        assert_eq!(scanner.finish().found, vec![KeyName::OutKeyS]);
    }

    #[test]
    fn test_scan_file_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut keys = KeyTable::new();

        let err = scan_file(dir.path().join("missing.h"), &mut keys).unwrap_err();
        assert!(matches!(err, Error::NotAFile { .. }));

        let err = scan_file(dir.path(), &mut keys).unwrap_err();
        assert!(matches!(err, Error::NotAFile { .. }));
    }

    #[test]
    fn test_scan_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crypt_key_output.h");
        std::fs::write(&path, OUT_KEY_P).unwrap();

        let mut keys = KeyTable::new();
        let report = scan_file(&path, &mut keys).unwrap();
        assert_eq!(report.found, vec![KeyName::OutKeyP]);
    }

    #[test]
    fn test_scan_file_with_latin1_comment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crypt_key_output.h");
        let mut content = b"/* (c) 2010 J\xf6rg */\n".to_vec();
        content.extend_from_slice(OUT_KEY_P.as_bytes());
        std::fs::write(&path, content).unwrap();

        let mut keys = KeyTable::new();
        let report = scan_file(&path, &mut keys).unwrap();
        assert_eq!(report.found, vec![KeyName::OutKeyP]);
        assert!(keys.get(KeyName::OutKeyP).unwrap().contains("0xCDFD2D53L"));
    }
}
