//! # mysql-clone
//!
//! Clone the contents of one MySQL database into another.
//!
//! The pipeline dumps the source database with an external `mysqldump`
//! binary, then replays the dump against the target with `mysql`, with:
//!
//! - **Pre-flight connectivity checks** against both databases
//! - **A destructive-action confirmation gate** (the target is wiped)
//! - **Single-line progress reporting** while the external tools run
//! - **Credential masking** in every rendered command line
//!
//! ## Example
//!
//! ```rust,no_run
//! use mysql_clone::{CloneConfig, Pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> mysql_clone::Result<()> {
//!     let config = CloneConfig::load("config.json")?;
//!     let report = Pipeline::new(config).run().await?;
//!     println!("cloned {:.2}MB in {:.2}s", report.dump_megabytes, report.duration_seconds);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod confirm;
pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod orchestrator;
pub mod process;
pub mod progress;
pub mod staging;

// Re-exports for convenient access
pub use config::{CloneConfig, ConnectionConfig, ToolConfig};
pub use confirm::{ConfirmationGate, StdinGate, CONFIRM_TOKEN};
pub use db::{DatabaseProbe, MysqlProbe};
pub use error::{CloneError, Result};
pub use orchestrator::{CloneReport, Pipeline, Stage};
pub use process::{ProcessOutput, ProcessRunner, ShellRunner};
pub use staging::StagingArtifact;
