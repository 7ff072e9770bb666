//! Command-line interface

use clap::{Parser, Subcommand};

/// Faith Hub - persona chat relay
///
/// Serves the Halifax Elim Faith Hub chat endpoint: checks the shared access
/// code, pairs each message with one of four assistant personas and relays it
/// to the OpenAI chat completions API.
#[derive(Parser, Debug)]
#[command(name = "faith-hub", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: search ./faith-hub.toml, then the user and system dirs)
    #[arg(short, long, global = true, env = "FAITH_HUB_CONFIG", value_name = "PATH")]
    pub config: Option<String>,

    /// More log output: -v debug, -vv trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP relay
    Serve {
        /// Bind address, replaces server.host
        #[arg(long, value_name = "ADDR")]
        host: Option<String>,

        /// Listen port, replaces server.port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Inspect the bundled assistant personas
    Persona {
        #[command(subcommand)]
        subcommand: PersonaSubcommand,
    },

    /// Show, create or check the relay configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Display version and build information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PersonaSubcommand {
    /// List the available assistants
    List,

    /// Show one assistant and its system prompt
    Show {
        /// faith_companion, faith_builder, faith_in_practice or faith_mindfulness
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Print the effective configuration (the API key is never shown)
    Show,

    /// Initialize a commented configuration file
    Init {
        /// Where to write it (default: ~/.faith-hub/config.toml)
        #[arg(short, long, value_name = "PATH")]
        path: Option<String>,

        /// Replace an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Load and validate the configuration
    Validate,
}
