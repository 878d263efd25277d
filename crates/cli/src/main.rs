use clap::Parser;
use tracing_subscriber::EnvFilter;

use pa_cli::cli::{Cli, Command, ConfigCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_cli_tracing();
    let cli = Cli::parse();

    match cli.command {
        // Default to status when no subcommand is given.
        None | Some(Command::Status) => {
            let (config, _) = pa_cli::cli::load_config()?;
            pa_cli::cli::session_cmd::status(&config).await
        }
        Some(Command::Login { username }) => {
            let (config, _) = pa_cli::cli::load_config()?;
            pa_cli::cli::login::run(&config, &username).await
        }
        Some(Command::Whoami) => {
            let (config, _) = pa_cli::cli::load_config()?;
            pa_cli::cli::session_cmd::whoami(&config).await
        }
        Some(Command::Logout) => {
            let (config, _) = pa_cli::cli::load_config()?;
            pa_cli::cli::session_cmd::logout(&config)
        }
        Some(Command::Config(ConfigCommand::Validate)) => {
            let (config, config_path) = pa_cli::cli::load_config()?;
            let valid = pa_cli::cli::config::validate(&config, &config_path);
            if !valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Command::Config(ConfigCommand::Show)) => {
            let (config, _) = pa_cli::cli::load_config()?;
            pa_cli::cli::config::show(&config);
            Ok(())
        }
        Some(Command::Version) => {
            println!("portalauth {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Compact stderr-only tracing so diagnostic output never pollutes stdout.
///
/// Defaults to `warn`; raise with `RUST_LOG` when debugging.
fn init_cli_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
