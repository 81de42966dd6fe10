//! soul-organizer CLI entry point

use anyhow::Context;
use clap::{CommandFactory, Parser};
use soul_importer::{Organizer, RunContext};
use soul_organizer::{config::EXAMPLE_CONFIG, logging, Cli, ConfigError, OrganizerConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match OrganizerConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let settings = match config.resolve(&cli) {
        Ok(settings) => settings,
        Err(e @ ConfigError::MissingDirectories(_)) => {
            eprintln!("Error: {}\n", e);
            eprintln!("{}", Cli::command().render_usage());
            eprintln!("\nEither pass --source and --storage, or create soul-organizer.ini:\n");
            eprintln!("{}", EXAMPLE_CONFIG);
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = logging::init(&config.log_settings(&cli)) {
        eprintln!("Error: {}", e);
        return ExitCode::from(2);
    }

    match run(RunContext::with_lofty(settings)) {
        Ok(failed) if failed > 0 => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the organizer and print the report, returning the failure count
fn run(ctx: RunContext) -> anyhow::Result<usize> {
    let report = Organizer::new(&ctx)
        .run()
        .context("organize run failed")?;

    println!("{}", report.stats.render_table(report.elapsed));
    if let Some(playlist) = &report.playlist {
        println!("Playlist: {}", playlist.display());
    }

    Ok(report.stats.failed)
}
