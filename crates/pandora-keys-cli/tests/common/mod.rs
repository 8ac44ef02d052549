use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const OUTPUT: &str = "src/com/aregner/pandora/PandoraKeys.java";

pub const OUT_KEY_P: &str = "\
static const uint32_t out_key_p[16 + 2] = {
\t0xD8A1A847, 0xBCDA04F4, 0x54684D7B, 0xCDFD2D53,
\t0xADAD96BA, 0x83F7C7D2,
};
";

pub const OUT_KEY_S: &str = "\
static const uint32_t out_key_s[4][256] = {
\t{
\t0x6C0B6E8D, 0x4A9B5C2F,
\t},{
\t0x0F3E7A16, 0x9A1C3B54,
\t}
}};
";

pub const IN_KEY_P: &str = "\
static const uint32_t in_key_p[16 + 2] = {
\t0x71207091, 0x64300505,
\t0x0FFF, 0x123456789,
};
";

pub const IN_KEY_S: &str = "\
static const uint32_t in_key_s[4][256] = {
\t{
\t0xDD2F3B4A, 0x5B0C2E19,
\t}
}};
";

/// A throwaway project root with the tool installed under `tools/`
pub struct Project {
    tmp: TempDir,
    tool: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let tools = tmp.path().join("tools");
        fs::create_dir_all(&tools).expect("create tools dir");

        let built = Path::new(env!("CARGO_BIN_EXE_update-pandora-api-keys"));
        let tool = tools.join(built.file_name().expect("binary file name"));
        fs::copy(built, &tool).expect("install tool into project");

        Self { tmp, tool }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn output(&self) -> PathBuf {
        self.root().join(OUTPUT)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    /// Run the installed tool from the project root
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(&self.tool);
        cmd.current_dir(self.root()).env_remove("RUST_LOG");
        cmd
    }

    /// Run the binary straight from the cargo target directory
    pub fn cmd_outside_tools(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_update-pandora-api-keys"));
        cmd.current_dir(self.root()).env_remove("RUST_LOG");
        cmd
    }
}
