//! # pandora-keys-core
//!
//! A library for porting the Pandora key tables from C headers into the
//! `PandoraKeys.java` constants class used by the Android client.
//!
//! This crate provides the core functionality for:
//! - Scanning C headers (such as libpiano's `crypt_key_{input,output}.h`)
//!   for the four `uint32_t *_key_[ps]` arrays
//! - Rewriting 32-bit hex literals as Java `long` literals
//! - Rendering the complete Java source file
//!
//! ## Architecture
//!
//! - [`keys`]: The four recognized key names and the collected [`KeyTable`]
//! - [`scanner`]: Line-oriented scanning and declaration templates
//! - [`emit`]: Java file rendering and writing
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use pandora_keys_core::{scan_file, JavaKeysFile, KeyTable};
//!
//! let mut keys = KeyTable::new();
//! scan_file("crypt_key_output.h", &mut keys)?;
//! scan_file("crypt_key_input.h", &mut keys)?;
//!
//! if keys.is_complete() {
//!     JavaKeysFile::new().write_to("src/com/aregner/pandora/PandoraKeys.java", &keys)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod emit;
pub mod error;
pub mod keys;
pub mod scanner;

// Re-export primary types for convenience
pub use emit::{JavaKeysFile, JAVA_CLASS, JAVA_PACKAGE, OUTPUT_PATH};
pub use error::{Error, Result};
pub use keys::{KeyName, KeyTable, REQUIRED_KEYS};
pub use scanner::{scan_file, scan_str, ScanReport, ScanState, Scanner};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path fragment that must appear in the tool's own invocation path.
///
/// The tool lives in `tools/` and is run as `./tools/update-pandora-api-keys`
/// from the project root, which makes [`OUTPUT_PATH`] resolve correctly.
pub const TOOLS_DIR_MARKER: &str = "/tools/";

/// Checks that the tool was invoked from the project root.
///
/// `invoked_as` is the program path as given on the command line (argv[0]).
pub fn check_invocation_path(invoked_as: &str) -> Result<()> {
    let native_marker = TOOLS_DIR_MARKER.replace('/', std::path::MAIN_SEPARATOR_STR);
    if invoked_as.contains(TOOLS_DIR_MARKER) || invoked_as.contains(&native_marker) {
        Ok(())
    } else {
        Err(Error::wrong_working_directory(invoked_as))
    }
}
