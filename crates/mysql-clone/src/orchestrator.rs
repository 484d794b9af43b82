//! Clone pipeline - main workflow coordinator.

use crate::config::CloneConfig;
use crate::confirm::{self, ConfirmationGate, StdinGate};
use crate::db::{DatabaseProbe, MysqlProbe};
use crate::error::{CloneError, Result};
use crate::export::ExportStage;
use crate::import::ImportStage;
use crate::process::{ProcessRunner, ShellRunner, SETTLE_DELAY};
use crate::staging::StagingArtifact;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{error, info};

/// Stages of one pipeline invocation, strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    ConnectivityCheck,
    Confirm,
    Export,
    Import,
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::ConnectivityCheck => "connectivity check",
            Stage::Confirm => "confirmation",
            Stage::Export => "export",
            Stage::Import => "import",
            Stage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Ephemeral bookkeeping for one invocation; discarded on exit.
struct PipelineRun {
    started_at: DateTime<Utc>,
    current_stage: Stage,
    last_error: Option<String>,
}

impl PipelineRun {
    fn new() -> Self {
        Self {
            started_at: Utc::now(),
            current_stage: Stage::Init,
            last_error: None,
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.current_stage = stage;
    }
}

/// Result of a completed clone run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneReport {
    /// Unique run identifier.
    pub run_id: String,

    /// Final status.
    pub status: String,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Size of the dump file produced by the export stage, in MB.
    pub dump_megabytes: f64,
}

impl CloneReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Clone pipeline: connectivity check, confirmation gate, export, import,
/// cleanup. Every stage failure is terminal; nothing is retried.
pub struct Pipeline {
    config: CloneConfig,
    staging: StagingArtifact,
    probe: Arc<dyn DatabaseProbe>,
    runner: Arc<dyn ProcessRunner>,
    gate: Arc<dyn ConfirmationGate>,
}

impl Pipeline {
    /// Create a pipeline with the real probe, runner and gate.
    pub fn new(config: CloneConfig) -> Self {
        Self {
            config,
            staging: StagingArtifact::default(),
            probe: Arc::new(MysqlProbe),
            runner: Arc::new(ShellRunner),
            gate: Arc::new(StdinGate),
        }
    }

    pub fn with_staging(mut self, staging: StagingArtifact) -> Self {
        self.staging = staging;
        self
    }

    pub fn with_probe(mut self, probe: Arc<dyn DatabaseProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_gate(mut self, gate: Arc<dyn ConfirmationGate>) -> Self {
        self.gate = gate;
        self
    }

    /// Run the pipeline to completion.
    pub async fn run(self) -> Result<CloneReport> {
        let mut run = PipelineRun::new();
        match self.execute(&mut run).await {
            Ok(report) => Ok(report),
            Err(e) => {
                run.last_error = Some(e.to_string());
                if !e.is_cancellation() {
                    error!(
                        "pipeline failed during {}: {}",
                        run.current_stage,
                        run.last_error.as_deref().unwrap_or_default()
                    );
                }
                Err(e)
            }
        }
    }

    async fn execute(&self, run: &mut PipelineRun) -> Result<CloneReport> {
        let run_id = uuid::Uuid::new_v4().to_string();
        info!("starting clone run: {}", run_id);

        run.enter(Stage::ConnectivityCheck);
        self.verify_connections().await?;

        run.enter(Stage::Confirm);
        let response = self
            .gate
            .read_response(&confirm::render_banner(&self.config))?;
        if !confirm::is_confirmed(&response) {
            return Err(CloneError::Cancelled);
        }

        info!("checking storage directory permissions");
        self.staging.ensure_writable().await?;

        run.enter(Stage::Export);
        let export = ExportStage {
            config: &self.config,
            staging: &self.staging,
        };
        let dump_megabytes = export.run(self.runner.as_ref()).await?;

        run.enter(Stage::Import);
        let import = ImportStage {
            config: &self.config,
            staging: &self.staging,
            probe: self.probe.clone(),
        };
        import.run(self.runner.as_ref()).await?;

        run.enter(Stage::Cleanup);
        info!("cleaning up");
        sleep(SETTLE_DELAY).await;
        self.staging.truncate().await?;

        let completed_at = Utc::now();
        let duration_seconds =
            (completed_at - run.started_at).num_milliseconds() as f64 / 1000.0;

        info!("migration completed");

        Ok(CloneReport {
            run_id,
            status: "completed".to_string(),
            started_at: run.started_at,
            completed_at,
            duration_seconds,
            dump_megabytes,
        })
    }

    /// Check both databases before any destructive step; abort if either is
    /// unreachable, surfacing both results.
    async fn verify_connections(&self) -> Result<()> {
        info!("verifying connection to source...");
        let source = self.probe.check(&self.config.source).await;
        info!(
            "verifying connection to source... {}",
            if source { "success" } else { "FAILED" }
        );

        info!("verifying connection to target...");
        let target = self.probe.check(&self.config.target).await;
        info!(
            "verifying connection to target... {}",
            if target { "success" } else { "FAILED" }
        );

        if !(source && target) {
            return Err(CloneError::Connectivity {
                source_reachable: source,
                target_reachable: target,
            });
        }
        Ok(())
    }
}
