//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// City network with hierarchical green zones: build from a script, inspect as graph or trees
#[derive(Parser, Debug)]
#[command(name = "citynet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (layered over the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a script and report the result
    Run {
        /// Action script
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// Continue after failed actions
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Print the city graph as {nodes, links} JSON
    Graph {
        /// Action script
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// Pretty-print JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print green zone trees
    Tree {
        /// Action script
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// Only this city
        #[arg(short = 'n', long)]
        city: Option<String>,
        /// Print {name, children} JSON instead of a text tree
        #[arg(long)]
        json: bool,
    },

    /// Show zone counts, heights and neighbors per city
    Stats {
        /// Action script
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
    },

    /// List the cities connected to a city
    Neighbors {
        /// Action script
        #[arg(value_hint = ValueHint::FilePath)]
        script: PathBuf,
        /// City name
        city: String,
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
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create global config template
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}
