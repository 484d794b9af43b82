//! mysql-clone CLI - clone one MySQL database into another.

use dialoguer::Input;
use mysql_clone::{CloneConfig, CloneError, Pipeline};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

const CONFIG_PATH_DEFAULT: &str = "./config.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_cancellation() => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CloneError> {
    setup_logging();

    let path = prompt_config_path()?;
    let config = CloneConfig::load(&path)?;
    info!("{} file loaded successfully", path.display());

    let report = Pipeline::new(config).run().await?;

    println!("\nMigration completed!");
    println!("  Run ID: {}", report.run_id);
    println!("  Duration: {:.2}s", report.duration_seconds);
    println!("  Dump size: {:.2}MB", report.dump_megabytes);

    Ok(())
}

fn prompt_config_path() -> Result<PathBuf, CloneError> {
    let input: String = Input::new()
        .with_prompt("enter absolute config file")
        .default(CONFIG_PATH_DEFAULT.to_string())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CloneError::Io(std::io::Error::other(e.to_string())))?;

    let trimmed = input.trim();
    Ok(PathBuf::from(if trimmed.is_empty() {
        CONFIG_PATH_DEFAULT
    } else {
        trimmed
    }))
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();
}
