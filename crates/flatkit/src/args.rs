//! CLI argument definitions using clap.
//!
//! Every flag defaults to the layout of a Gradle/Android project: sources
//! under `./app/src/main/java`, output in `./REMESSA_PARA_IA`.

use std::path::PathBuf;

use clap::Parser;
use flatkit_io_fs::{
    C_EXTENSION_DEFAULT, EnumCollectFailurePolicy, L_NAMES_IGNORE_DIRS_DEFAULT,
    SpecCollectOptions,
};

pub const C_SOURCE_DEFAULT: &str = "./app/src/main/java";
pub const C_DESTINATION_DEFAULT: &str = "./REMESSA_PARA_IA";

#[derive(Debug, Parser)]
#[command(name = "flatkit", author, version, about, long_about = None)]
pub struct Arguments {
    /// Source tree to walk
    #[arg(long, value_name = "DIR", default_value = C_SOURCE_DEFAULT)]
    pub source: PathBuf,

    /// Flat output directory (removed and recreated on every run)
    #[arg(long, value_name = "DIR", default_value = C_DESTINATION_DEFAULT)]
    pub destination: PathBuf,

    /// Directory name to prune, with its whole subtree (repeatable; replaces the defaults)
    #[arg(long = "ignore", value_name = "NAME", default_values = L_NAMES_IGNORE_DIRS_DEFAULT)]
    pub ignore: Vec<String>,

    /// Case-sensitive file name suffix to collect
    #[arg(long, value_name = "EXT", default_value = C_EXTENSION_DEFAULT)]
    pub extension: String,

    /// Record failed copies and keep going instead of stopping at the first one
    #[arg(long)]
    pub keep_going: bool,

    /// Also write every collected file into this single text file
    #[arg(long, value_name = "PATH")]
    pub bundle: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Arguments {
    pub fn to_options(&self) -> SpecCollectOptions {
        SpecCollectOptions {
            extension: self.extension.clone(),
            names_ignore_dirs: self.ignore.iter().cloned().collect(),
            rule_failure: if self.keep_going {
                EnumCollectFailurePolicy::Continue
            } else {
                EnumCollectFailurePolicy::Abort
            },
            if_keep_records: self.bundle.is_some(),
        }
    }
}
