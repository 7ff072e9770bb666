//! Faith Hub - persona chat relay
//!
//! Main entry point for the faith-hub binary.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use faith_hub::cli::{Cli, Commands, ConfigSubcommand, PersonaSubcommand};
use faith_hub::config::{self, HubConfig, API_KEY_ENV};
use faith_hub::error::{Error, Result};
use faith_hub::logging;
use faith_hub::persona::PersonaRegistry;
use faith_hub::relay::{ChatRelay, RelayConfig};
use faith_hub::server::{self, AppState};
use faith_hub::upstream::{OpenAiClient, OpenAiConfig};
use faith_hub::version;

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => {
            version::print_version();
            Ok(())
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            handle_config_command(subcommand, cli.config.as_deref())
        }
        Commands::Persona { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            handle_persona_command(subcommand)
        }
        Commands::Serve { host, port } => {
            let config = load_serve_config(cli.config.as_deref(), host, port)?;

            logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

            let build = version::build_info();
            info!(
                version = %build.full_version(),
                target = %build.target,
                profile = %build.profile,
                "Starting Faith Hub"
            );

            run_server(config)
        }
    }
}

/// Load configuration and apply command-line overrides
fn load_serve_config(
    path: Option<&str>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<HubConfig> {
    let mut config = HubConfig::load(path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

/// Build the relay and run the HTTP server until shutdown
fn run_server(config: HubConfig) -> Result<()> {
    if !config.has_api_key() {
        warn!(
            env = API_KEY_ENV,
            "No OpenAI API key configured; chat requests will fail upstream"
        );
    }

    let registry = PersonaRegistry::with_builtins()?;
    info!(count = registry.len(), "Personas loaded");

    let client = OpenAiClient::new(OpenAiConfig::from(&config.openai))?;
    info!(
        base_url = %config.openai.base_url,
        timeout_secs = config.openai.timeout_secs,
        "Completion client configured"
    );

    let relay = ChatRelay::new(RelayConfig::from(&config), registry, Arc::new(client));
    let state = Arc::new(AppState::new(relay));
    let addr = config.bind_addr();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(num_cpus::get().min(8))
        .thread_name("faith-hub")
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create async runtime: {}", e)))?;

    runtime.block_on(server::serve(&addr, state))
}

/// Handle persona subcommands
fn handle_persona_command(subcommand: PersonaSubcommand) -> Result<()> {
    let registry = PersonaRegistry::with_builtins()?;

    match subcommand {
        PersonaSubcommand::List => {
            println!("{:<20} {:<22} DESCRIPTION", "ID", "NAME");
            for persona in registry.list() {
                println!(
                    "{:<20} {:<22} {}",
                    persona.id.as_str(),
                    persona.display_name,
                    persona.description
                );
            }
        }
        PersonaSubcommand::Show { id } => {
            let persona = registry
                .lookup(id.trim())
                .ok_or(Error::PersonaNotFound { id })?;
            println!("{} ({})", persona.display_name, persona.id);
            println!("{}", persona.description);
            println!();
            println!("System prompt:");
            println!("{}", persona.system_prompt.trim());
        }
    }

    Ok(())
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand, path: Option<&str>) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = HubConfig::load(path)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
            println!(
                "# {}: {}",
                API_KEY_ENV,
                if cfg.has_api_key() { "set" } else { "not set" }
            );
        }
        ConfigSubcommand::Init { path, force } => {
            let created = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", created.display());
        }
        ConfigSubcommand::Validate => {
            HubConfig::load(path)?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
