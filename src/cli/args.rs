//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Build, prune and draw a sample tree
#[derive(Parser, Debug)]
#[command(name = "gentree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Extra config file layered over the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the sample tree A(B(E), C, D), delete nodes and print it
    Demo {
        /// Label of a node to delete (repeatable, applied in order)
        #[arg(long = "delete", value_name = "LABEL")]
        delete: Vec<String>,

        /// Leave tombstones in place instead of compacting
        #[arg(long)]
        no_compress: bool,

        /// Draw with box characters instead of the margin diagram
        #[arg(long)]
        termtree: bool,

        /// Trace every node visit and print the flat debug listing
        #[arg(long)]
        debug_messages: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file path
    Path,
}
