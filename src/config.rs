use crate::opts::WriteMode;
use std::path::{Path, PathBuf};

pub static DEFAULT_MANIFEST_PATH: &str = "./package.json";
pub static DEFAULT_KEY: &str = "homepage";
pub const DEFAULT_INDENT: usize = 4;

/// Where the manifest lives, which field gets set, and how it's written back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    manifest_path: PathBuf,
    key: String,
    indent: usize,
    write_mode: WriteMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            key: DEFAULT_KEY.to_owned(),
            indent: DEFAULT_INDENT,
            write_mode: WriteMode::default(),
        }
    }
}

impl Config {
    pub fn with_manifest_path(mut self, manifest_path: impl Into<PathBuf>) -> Self {
        self.manifest_path = manifest_path.into();
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }
}
