//! Java source generation.
//!
//! [`JavaKeysFile`] renders the complete `PandoraKeys.java` from a finished
//! [`KeyTable`]: license header, package, and one constant per key in the
//! fixed order `out_key_p`, `out_key_s`, `in_key_p`, `in_key_s`.

mod template;

pub use template::declaration;

use crate::error::{Error, Result};
use crate::keys::{KeyName, KeyTable};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the generated file, relative to the project root
pub const OUTPUT_PATH: &str = "src/com/aregner/pandora/PandoraKeys.java";

/// Package of the generated class
pub const JAVA_PACKAGE: &str = "com.aregner.pandora";

/// Name of the generated class
pub const JAVA_CLASS: &str = "PandoraKeys";

const LICENSE_HEADER: &str = concat!(
    "/* Pandoroid Radio - open source pandora.com client for android\n",
    " * Copyright (C) 2011  Andrew Regner <andrew@aregner.com>\n",
    " * \n",
    " * This program is free software; you can redistribute it and/or\n",
    " * modify it under the terms of the GNU General Public License\n",
    " * as published by the Free Software Foundation; either version 2\n",
    " * of the License, or (at your option) any later version.\n",
    " * \n",
    " * This program is distributed in the hope that it will be useful,\n",
    " * but WITHOUT ANY WARRANTY; without even the implied warranty of\n",
    " * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the\n",
    " * GNU General Public License for more details.\n",
    " * \n",
    " * You should have received a copy of the GNU General Public License\n",
    " * along with this program; if not, write to the Free Software\n",
    " * Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301, USA.\n",
    " */\n",
);

const ATTRIBUTION: &str = concat!(
    "/* \n",
    " * These keys were extracted from the Pithos source code, credited to ZigZagJoe.\n",
    " * \n",
    " * Pithos is released under the GNU GPL v3, Copyright (C) 2010 Kevin Mehall <km@kevinmehall.net>\n",
    " */\n",
);

/// Renders and writes `PandoraKeys.java`
#[derive(Debug, Clone, Default)]
pub struct JavaKeysFile;

impl JavaKeysFile {
    /// Creates a new emitter
    pub fn new() -> Self {
        Self
    }

    /// Renders the complete Java source.
    ///
    /// Fails with [`Error::IncompleteKeys`] unless all four keys are present.
    pub fn render(&self, keys: &KeyTable) -> Result<String> {
        let declarations = Self::ordered_declarations(keys)?;

        let mut output = String::new();
        self.write_to_fmt(&mut output, &declarations)
            .expect("String write cannot fail");
        Ok(output)
    }

    /// Renders the file and writes it to `path`, replacing any existing file.
    ///
    /// Nothing is created or truncated if rendering fails.
    pub fn write_to(&self, path: impl AsRef<Path>, keys: &KeyTable) -> Result<()> {
        let path = path.as_ref();
        let content = self.render(keys)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::directory_create(parent, e))?;
        }

        fs::write(path, content.as_bytes()).map_err(|e| Error::file_write(path, e))?;
        info!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    fn ordered_declarations(keys: &KeyTable) -> Result<Vec<(KeyName, &str)>> {
        if !keys.is_complete() {
            return Err(Error::incomplete_keys(keys.names()));
        }

        KeyName::ALL
            .into_iter()
            .map(|name| {
                keys.get(name)
                    .map(|decl| (name, decl))
                    .ok_or_else(|| Error::incomplete_keys(keys.names()))
            })
            .collect()
    }

    fn write_to_fmt(
        &self,
        w: &mut impl FmtWrite,
        declarations: &[(KeyName, &str)],
    ) -> std::fmt::Result {
        w.write_str(LICENSE_HEADER)?;
        writeln!(w)?;
        w.write_str(ATTRIBUTION)?;
        writeln!(w)?;
        writeln!(w, "package {};", JAVA_PACKAGE)?;
        writeln!(w)?;
        writeln!(w, "public final class {} {{", JAVA_CLASS)?;

        for (i, (name, decl)) in declarations.iter().enumerate() {
            if i > 0 {
                writeln!(w, "\t")?;
            }
            debug!("Emitting declaration {}", name);
            writeln!(w, "\t{}", decl)?;
        }

        writeln!(w, "}}")?;
        // Trailing blank line kept for byte-compatibility with existing checkouts
        writeln!(w)
    }
}
