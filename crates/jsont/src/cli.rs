//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jsont")]
#[command(version, about = "Expand JSON Template files against JSON data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log compile and render steps to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a template and print the result
    Expand {
        /// Template file, or a member name with --templates-dir
        template: Option<PathBuf>,

        /// Template source given inline
        #[arg(short = 't', long = "template", conflicts_with = "template")]
        inline: Option<String>,

        /// JSON data file (stdin when absent)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Load every *.jsont file in this directory as a template group
        #[arg(long, env = "JSONT_TEMPLATES_DIR")]
        templates_dir: Option<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Compile templates and report errors
    Check {
        /// Template files to compile
        #[arg(required = true)]
        templates: Vec<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },
}

/// Compile options shared by all subcommands
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// TOML file with compile options
    #[arg(short, long, env = "JSONT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Metacharacters, e.g. "{}" or "[[]]"
    #[arg(long)]
    pub meta: Option<String>,

    /// Character between a name and its formatters (':' or '|')
    #[arg(long)]
    pub format_char: Option<char>,

    /// Formatter for substitutions that name none ("disabled" turns it off)
    #[arg(long)]
    pub default_formatter: Option<String>,
}
