//! Export stage: dump the source database to the staging file.

use crate::config::CloneConfig;
use crate::error::{CloneError, Result};
use crate::process::{self, ProcessRunner};
use crate::progress::{self, POLL_INTERVAL};
use crate::staging::StagingArtifact;
use tracing::info;

pub struct ExportStage<'a> {
    pub config: &'a CloneConfig,
    pub staging: &'a StagingArtifact,
}

impl ExportStage<'_> {
    /// Full shell command for the dump tool, staging file as stdout.
    pub fn command(&self) -> String {
        format!(
            "{} {} > {}",
            self.config.application.mysqldump_path,
            process::connection_args(&self.config.source),
            self.staging.path().display()
        )
    }

    /// Dump the source database, polling the staging file size as progress.
    /// Returns the final dump size in MB.
    pub async fn run(&self, runner: &dyn ProcessRunner) -> Result<f64> {
        self.staging.truncate().await?;

        info!("exporting source db to dump file");

        let staging = self.staging.clone();
        let handle = progress::start(POLL_INTERVAL, move || {
            let staging = staging.clone();
            async move {
                match staging.size_megabytes().await {
                    Ok(mb) => format!("export file size: {:.2}MB", mb),
                    Err(_) => "export file size: pending".to_string(),
                }
            }
        });

        let command = self.command();
        let masked = process::mask_secrets(&command, self.config);
        let output = process::run_monitored(runner, &command, &masked, handle).await?;

        if let Some(detail) = output.failure_detail() {
            return Err(CloneError::DumpFailed { output: detail });
        }

        self.staging.size_megabytes().await
    }
}
