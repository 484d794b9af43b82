//! Import stage: replay the staging file against the target database.

use crate::config::CloneConfig;
use crate::db::DatabaseProbe;
use crate::error::{CloneError, Result};
use crate::process::{self, ProcessRunner};
use crate::progress::{self, POLL_INTERVAL};
use crate::staging::StagingArtifact;
use std::sync::Arc;
use tracing::info;

pub struct ImportStage<'a> {
    pub config: &'a CloneConfig,
    pub staging: &'a StagingArtifact,
    pub probe: Arc<dyn DatabaseProbe>,
}

impl ImportStage<'_> {
    /// Full shell command for the restore tool, staging file as stdin.
    pub fn command(&self) -> String {
        format!(
            "{} {} < {}",
            self.config.application.mysql_path,
            process::connection_args(&self.config.target),
            self.staging.path().display()
        )
    }

    /// Replay the dump into the target database, polling the target's
    /// reported data+index size as progress.
    pub async fn run(&self, runner: &dyn ProcessRunner) -> Result<()> {
        info!("importing dump file to target db");

        let probe = self.probe.clone();
        let target = self.config.target.clone();
        let handle = progress::start(POLL_INTERVAL, move || {
            let probe = probe.clone();
            let target = target.clone();
            async move {
                match probe.size_mb(&target).await {
                    Ok(Some(mb)) => format!("target db size: {:.2}MB", mb),
                    // no size yet, or the metadata query itself failed
                    _ => "checking db size, please wait".to_string(),
                }
            }
        });

        let command = self.command();
        let masked = process::mask_secrets(&command, self.config);
        let output = process::run_monitored(runner, &command, &masked, handle).await?;

        if let Some(detail) = output.failure_detail() {
            return Err(CloneError::RestoreFailed { output: detail });
        }

        Ok(())
    }
}
