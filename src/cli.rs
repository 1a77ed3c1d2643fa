//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "clabcli")]
#[command(author, version, about = "Classroom lab network client configurator")]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configure this machine for an EDA event (fetch config, install
    /// service and shell-profile edit)
    Eda {
        /// Event name, e.g. edaempyren2025summer
        name: Option<String>,

        /// Fetch and report but don't install anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Check whether this host falls inside a CIDR segment
    Check {
        /// Segment in CIDR notation, e.g. 192.168.132.0/22
        segment: String,
    },

    /// Show the primary (uid 1000) user account
    User,

    /// Remove the service and profile edit for an EDA event
    Uninstall {
        /// Event name
        name: String,
    },

    /// Show version
    Version,
}
