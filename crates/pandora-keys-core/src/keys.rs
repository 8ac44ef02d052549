//! The four Pandora key tables and the collection they are gathered into.
//!
//! libpiano ships its Blowfish keys as two pairs of arrays: the P-array
//! (`*_key_p`, one dimension) and the S-boxes (`*_key_s`, two dimensions),
//! once for encrypting requests (`out`) and once for decrypting responses
//! (`in`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Number of keys a complete extraction must produce.
pub const REQUIRED_KEYS: usize = KeyName::ALL.len();

/// One of the four recognized key identifiers.
///
/// Variants are declared in emission order, so the derived `Ord` matches the
/// layout of the generated class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyName {
    /// `out_key_p`
    OutKeyP,
    /// `out_key_s`
    OutKeyS,
    /// `in_key_p`
    InKeyP,
    /// `in_key_s`
    InKeyS,
}

impl KeyName {
    /// All key names in emission order
    pub const ALL: [KeyName; 4] = [
        KeyName::OutKeyP,
        KeyName::OutKeyS,
        KeyName::InKeyP,
        KeyName::InKeyS,
    ];

    /// Returns the identifier as written in both the C header and Java class
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyName::OutKeyP => "out_key_p",
            KeyName::OutKeyS => "out_key_s",
            KeyName::InKeyP => "in_key_p",
            KeyName::InKeyS => "in_key_s",
        }
    }

    /// Returns true if the identifier carries the plural `s` suffix
    pub fn is_plural(&self) -> bool {
        self.as_str().ends_with('s')
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four key identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyName(pub String);

impl fmt::Display for UnknownKeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key name: '{}'", self.0)
    }
}

impl std::error::Error for UnknownKeyName {}

impl FromStr for KeyName {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        KeyName::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKeyName(s.to_string()))
    }
}

/// Collected Java declarations, keyed by key name.
///
/// Shared across every scanned input; a key seen again in a later input
/// replaces the earlier declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTable {
    entries: BTreeMap<KeyName, String>,
}

impl KeyTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a declaration, returning the one it replaced
    pub fn insert(&mut self, name: KeyName, declaration: String) -> Option<String> {
        let previous = self.entries.insert(name, declaration);
        if previous.is_some() {
            debug!("Replacing earlier declaration of {}", name);
        }
        previous
    }

    /// Returns the declaration stored for `name`
    pub fn get(&self, name: KeyName) -> Option<&str> {
        self.entries.get(&name).map(String::as_str)
    }

    /// Number of distinct keys collected
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key has been collected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Collected key names in emission order
    pub fn names(&self) -> Vec<KeyName> {
        self.entries.keys().copied().collect()
    }

    /// Returns true once exactly [`REQUIRED_KEYS`] keys are present
    pub fn is_complete(&self) -> bool {
        self.entries.len() == REQUIRED_KEYS
    }
}
