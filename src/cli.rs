//! CLI argument parsing for variable-injector

use crate::version::FullVersion;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output encoding for the resulting ResourceList
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML (default)
    Yaml,
    /// JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "variable-injector")]
#[command(version, long_version = FullVersion::current().to_string())]
#[command(
    about = "Injects per-resource variables into a KRM ResourceList or YAML stream read from stdin",
    long_about = None
)]
pub struct Cli {
    /// Read the function config from this file instead of the ResourceList functionConfig
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only expand placeholders whose name starts with PREFIX (overrides the config)
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "yaml")]
    pub format: OutputFormat,

    /// Log matching and expansion decisions to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
