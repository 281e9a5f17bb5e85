//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Decision-tree knowledge base: inspect, search, and extend a base of
/// characters discriminated by yes/no features
#[derive(Parser, Debug)]
#[command(name = "akin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Base file (default from config)
    #[arg(short = 'f', long = "base", global = true, value_hint = ValueHint::FilePath)]
    pub base: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the base as a tree
    Show,

    /// Validate the base structure
    Check,

    /// Show the feature path of a character
    Find {
        /// Character to look up
        character: String,
    },

    /// Compare two characters feature by feature
    Compare {
        /// First character
        first: String,
        /// Second character
        second: String,
    },

    /// Splice a new character into the base under a distinguishing feature
    Add {
        /// Existing character the base confuses with the new one
        guessed: String,
        /// New character to insert
        character: String,
        /// Feature that is true for the new character and false for the guessed one
        feature: String,
    },

    /// Write the base as a Graphviz dot graph
    Export {
        /// Output file ('-' for stdout, default from config)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init,

    /// Show config paths
    Path,
}
