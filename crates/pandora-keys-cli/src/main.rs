//! update-pandora-api-keys - Port the Pandora key tables into PandoraKeys.java
//!
//! Reads C headers such as libpiano's `crypt_key_{input,output}.h`, collects
//! the four `uint32_t *_key_[ps]` arrays and regenerates the Java constants
//! class used by the Android client. Run it from the project root:
//!
//! ```text
//! ./tools/update-pandora-api-keys /path/to/crypt_key_output.h /path/to/crypt_key_input.h
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use pandora_keys_core::{check_invocation_path, scan_file, JavaKeysFile, KeyTable, OUTPUT_PATH};
use std::path::PathBuf;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Port key tables from C source headers to PandoraKeys.java
#[derive(Parser, Debug)]
#[command(name = "update-pandora-api-keys")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// C header files to extract keys from
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path of the generated Java file
    #[arg(short, long, default_value = OUTPUT_PATH)]
    output: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the generated file to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let invoked_as = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default();
    check_invocation_path(&invoked_as)?;

    let keys = collect_keys(&cli.files)?;
    emit(&cli, &keys)
}

/// Scan every input in order, stopping at the first one that fails
fn collect_keys(files: &[PathBuf]) -> Result<KeyTable> {
    let mut keys = KeyTable::new();

    for file in files {
        let report = scan_file(file, &mut keys)
            .with_context(|| format!("Failed to extract keys from {}", file.display()))?;
        info!(
            "{}: {} key(s) found",
            file.display(),
            report.found.len()
        );
    }

    debug!("Collected keys: {:?}", keys.names());
    Ok(keys)
}

/// Write the Java file, or warn and skip the write if keys are missing
fn emit(cli: &Cli, keys: &KeyTable) -> Result<()> {
    let emitter = JavaKeysFile::new();

    let result = if cli.dry_run {
        emitter.render(keys).map(|content| print!("{}", content))
    } else {
        emitter.write_to(&cli.output, keys).map(|()| {
            println!("Wrote {}", cli.output.display());
        })
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_soft() => {
            warn!("{}", e);
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to generate {}", cli.output.display())),
    }
}
