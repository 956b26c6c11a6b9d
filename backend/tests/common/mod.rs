//! Shared fixtures for csvdex integration tests.

#![allow(dead_code)]

use csvdex_server::config::ServerConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temp workspace holding a config file, a data dir and CSV fixtures.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// Write `name` with `contents` and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// Write a config file with the given `[index]` body and load it back.
    pub fn config(&self, index_section: &str) -> ServerConfig {
        let toml = format!(
            r#"
[server]
host = "127.0.0.1"
port = 3999

[storage]
data_dir = '{data_dir}'

[logging]
level = "debug"
file_path = '{log}'
log_to_console = false

[index]
{index_section}
"#,
            data_dir = self.data_dir().display(),
            log = self.dir.path().join("logs").join("csvdex.log").display(),
        );
        let path = self.write("config.toml", &toml);
        ServerConfig::from_file(path).expect("config")
    }
}

pub const PEOPLE_CSV: &str = "id,name,city\n1,Ann,NY\n2,Bob,LA\n3,Cid,NY\n";
