//! Console entry point for the museum artifact inventory.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the store once.
//! - Hand the connection to the menu loop and close it on exit.

mod config;
mod menu;

use clap::Parser;
use config::CliConfig;
use log::info;
use menu::{run_menu, Console};
use museum_core::db::{close_db, open_db, open_db_in_memory};
use museum_core::{init_logging, ArtifactService, SqliteArtifactRepository};
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::parse();
    start_logging(&config);

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), io::stderr());
    match run(&config, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Diagnostics go to stderr; a failure here has nowhere else to go.
            let _ = console.diagnose(&*err);
            ExitCode::FAILURE
        }
    }
}

fn start_logging(config: &CliConfig) {
    let Ok(cwd) = std::env::current_dir() else {
        eprintln!("warning: logging disabled: cannot resolve working directory");
        return;
    };
    if let Some(log_dir) = config.resolved_log_dir(&cwd) {
        if let Err(err) = init_logging(&config.log_level, &log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }
}

fn run<R, W, E>(config: &CliConfig, console: &mut Console<R, W, E>) -> Result<(), Box<dyn Error>>
where
    R: io::BufRead,
    W: io::Write,
    E: io::Write,
{
    let conn = if config.in_memory {
        open_db_in_memory()?
    } else {
        open_db(&config.db_path)?
    };
    info!(
        "event=cli_start module=cli status=ok in_memory={} db_path={}",
        config.in_memory,
        config.db_path.display()
    );

    {
        let repo = SqliteArtifactRepository::try_new(&conn)?;
        let service = ArtifactService::new(repo);
        run_menu(console, &service)?;
    }

    close_db(conn)?;
    Ok(())
}
