use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use aa_cli::commands::classify::ClassifyArgs;
use aa_cli::commands::scan::ScanArgs;
use aa_cli::commands::{classify, rules, scan};
use aa_cli::{Cli, Commands, Config};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout stays parseable with --json.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Some(Commands::Classify {
            file,
            json,
            action,
            policy,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let args = ClassifyArgs {
                file,
                json,
                action,
                policy,
            };
            classify::run(&mut stdout, &args, &config)?;
        }
        Some(Commands::Scan {
            dir,
            json,
            ext,
            policy,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let args = ScanArgs {
                dir,
                json,
                ext,
                policy,
            };
            scan::run(&mut stdout, &args, &config)?;
        }
        Some(Commands::Rules) => {
            rules::run(&mut stdout)?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
