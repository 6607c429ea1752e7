#![forbid(unsafe_code)]

use set_homepage::{
    config::Config,
    opts,
    util::cli::{self, Exec, GlobalFlags, TextWrapper},
    PatchError, NAME,
};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = NAME,
    about = "Sets a top-level field of a JSON manifest",
    settings = cli::SETTINGS
)]
pub struct Input {
    #[structopt(flatten)]
    flags: GlobalFlags,
    #[structopt(
        long,
        help = "Manifest to patch (defaults to ./package.json)",
        value_name = "PATH",
        parse(from_os_str)
    )]
    manifest_path: Option<PathBuf>,
    #[structopt(
        long,
        help = "Top-level field to set (defaults to homepage)",
        value_name = "KEY"
    )]
    key: Option<String>,
    #[structopt(
        long,
        help = "Spaces per indentation level (defaults to 4)",
        value_name = "N"
    )]
    indent: Option<usize>,
    #[structopt(
        long = "in-place",
        help = "Rewrite the manifest in place instead of swapping in a temp file; keeps hard links and ownership",
        parse(from_flag = opts::WriteMode::from_flag),
    )]
    write_mode: opts::WriteMode,
    #[structopt(help = "Value to assign", value_name = "VALUE")]
    value: String,
}

impl Input {
    fn config(&self) -> Config {
        let mut config = Config::default().with_write_mode(self.write_mode);
        if let Some(manifest_path) = &self.manifest_path {
            config = config.with_manifest_path(manifest_path);
        }
        if let Some(key) = &self.key {
            config = config.with_key(key);
        }
        if let Some(indent) = self.indent {
            config = config.with_indent(indent);
        }
        config
    }
}

impl Exec for Input {
    type Error = PatchError;

    fn global_flags(&self) -> GlobalFlags {
        self.flags
    }

    fn exec(self, _wrapper: &TextWrapper) -> Result<(), Self::Error> {
        set_homepage::patch::patch_with_config(&self.config(), &self.value)
    }
}

fn main() {
    cli::exec::<Input>()
}
