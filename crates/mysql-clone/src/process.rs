//! External tool invocation.
//!
//! The dump and restore tools are reached through the [`ProcessRunner`]
//! capability so stages can be exercised against a scripted runner in tests.

use crate::config::{CloneConfig, ConnectionConfig};
use crate::error::Result;
use crate::progress::ProgressHandle;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Replacement token for masked credential values.
pub const MASK: &str = "******";

/// Pause after an external process reports completion, letting buffered
/// output finish flushing before polling stops.
pub const SETTLE_DELAY: Duration = Duration::from_millis(3000);

/// Captured outcome of an external process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Failure detail for display, if the invocation counts as failed.
    ///
    /// Any diagnostic output on stderr is fatal, even on a zero exit code.
    pub fn failure_detail(&self) -> Option<String> {
        if !self.success() {
            let code = self
                .exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let detail = if self.stderr.trim().is_empty() {
                self.stdout.trim()
            } else {
                self.stderr.trim()
            };
            Some(format!("exit code {}: {}", code, detail))
        } else if !self.stderr.trim().is_empty() {
            Some(self.stderr.trim().to_string())
        } else {
            None
        }
    }
}

/// Capability for running a shell command to completion.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: &str) -> Result<ProcessOutput>;
}

/// Runs commands through `sh -c`, as the dump/restore invocations use shell
/// redirection for the staging file.
pub struct ShellRunner;

#[async_trait]
impl ProcessRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<ProcessOutput> {
        let output = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(command)
            .output()
            .await?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Assemble mysql/mysqldump connection arguments from a descriptor.
///
/// Order: database (positional), `-h`, `-u`, `-p`, `-P`. A field that is
/// absent or empty is omitted entirely; every present value is quoted.
pub fn connection_args(conn: &ConnectionConfig) -> String {
    let mut parts = Vec::new();

    if !conn.database.is_empty() {
        parts.push(format!("\"{}\"", conn.database));
    }
    if let Some(host) = nonempty(&conn.host) {
        parts.push(format!("-h\"{}\"", host));
    }
    if let Some(user) = nonempty(&conn.user) {
        parts.push(format!("-u\"{}\"", user));
    }
    if let Some(password) = nonempty(&conn.password) {
        parts.push(format!("-p\"{}\"", password));
    }
    if let Some(port) = conn.port {
        parts.push(format!("-P\"{}\"", port));
    }

    parts.join(" ")
}

fn nonempty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Mask user and password values of both descriptors for public display.
pub fn mask_secrets(command: &str, config: &CloneConfig) -> String {
    let mut masked = command.to_string();
    for conn in [&config.source, &config.target] {
        for secret in [&conn.user, &conn.password] {
            if let Some(value) = nonempty(secret) {
                masked = masked.replace(value, MASK);
            }
        }
    }
    masked
}

/// Run a tool command to completion while a progress monitor polls alongside.
///
/// On success the settle delay elapses (with polling still live) before the
/// monitor stops; on failure the monitor stops immediately. The raw output is
/// returned either way so the caller can map failures to its own error.
pub async fn run_monitored(
    runner: &dyn ProcessRunner,
    command: &str,
    masked: &str,
    handle: ProgressHandle,
) -> Result<ProcessOutput> {
    info!("executing command {}", masked);

    match runner.run(command).await {
        Ok(output) => {
            let failed = output.failure_detail().is_some();
            if !failed {
                sleep(SETTLE_DELAY).await;
            }
            handle.stop().await;
            if !failed {
                info!("done");
            }
            Ok(output)
        }
        Err(e) => {
            handle.stop().await;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolConfig;

    fn conn(
        host: Option<&str>,
        port: Option<u16>,
        user: Option<&str>,
        password: Option<&str>,
        database: &str,
    ) -> ConnectionConfig {
        ConnectionConfig {
            host: host.map(String::from),
            port,
            user: user.map(String::from),
            password: password.map(String::from),
            database: database.to_string(),
        }
    }

    #[test]
    fn test_connection_args_full() {
        let args = connection_args(&conn(
            Some("db.internal"),
            Some(3307),
            Some("root"),
            Some("s3cret"),
            "orders_dev",
        ));
        assert_eq!(
            args,
            r#""orders_dev" -h"db.internal" -u"root" -p"s3cret" -P"3307""#
        );
    }

    #[test]
    fn test_connection_args_omits_absent_fields() {
        let args = connection_args(&conn(Some("db.internal"), None, None, None, "orders_dev"));
        assert_eq!(args, r#""orders_dev" -h"db.internal""#);
    }

    #[test]
    fn test_connection_args_treats_empty_as_absent() {
        let args = connection_args(&conn(Some(""), None, Some("  "), None, "orders_dev"));
        assert_eq!(args, r#""orders_dev""#);
    }

    #[test]
    fn test_connection_args_quotes_every_value() {
        let args = connection_args(&conn(
            Some("h"),
            Some(3306),
            Some("u"),
            Some("p"),
            "orders_dev",
        ));
        for part in args.split(' ') {
            assert!(part.ends_with('"'), "unquoted argument: {}", part);
        }
    }

    fn masking_config() -> CloneConfig {
        CloneConfig {
            source: conn(
                Some("db1"),
                Some(3306),
                Some("source_user"),
                Some("source_pass"),
                "orders_dev",
            ),
            target: conn(
                Some("db2"),
                Some(3306),
                Some("target_user"),
                Some("target_pass"),
                "orders_test",
            ),
            application: ToolConfig {
                mysqldump_path: "mysqldump".to_string(),
                mysql_path: "mysql".to_string(),
            },
        }
    }

    #[test]
    fn test_mask_secrets_hides_all_credentials() {
        let config = masking_config();
        let command = format!("mysqldump {}", connection_args(&config.source));
        let masked = mask_secrets(&command, &config);

        assert!(!masked.contains("source_user"));
        assert!(!masked.contains("source_pass"));
        assert!(masked.contains(MASK));
        assert!(masked.contains("orders_dev"));
    }

    #[test]
    fn test_mask_secrets_covers_target_credentials_too() {
        let config = masking_config();
        let command = format!("mysql {}", connection_args(&config.target));
        let masked = mask_secrets(&command, &config);

        assert!(!masked.contains("target_user"));
        assert!(!masked.contains("target_pass"));
    }

    #[test]
    fn test_failure_detail_on_nonzero_exit() {
        let output = ProcessOutput {
            exit_code: Some(2),
            stdout: String::new(),
            stderr: "Access denied".to_string(),
        };
        let detail = output.failure_detail().unwrap();
        assert!(detail.contains("exit code 2"));
        assert!(detail.contains("Access denied"));
    }

    #[test]
    fn test_failure_detail_on_stderr_with_zero_exit() {
        let output = ProcessOutput {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: "Warning: something went sideways\n".to_string(),
        };
        assert_eq!(
            output.failure_detail().unwrap(),
            "Warning: something went sideways"
        );
    }

    #[test]
    fn test_clean_run_has_no_failure_detail() {
        let output = ProcessOutput {
            exit_code: Some(0),
            stdout: "ok\n".to_string(),
            stderr: String::new(),
        };
        assert!(output.failure_detail().is_none());
    }

    #[tokio::test]
    async fn test_shell_runner_captures_exit_code() {
        let output = ShellRunner.run("exit 3").await.unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_shell_runner_captures_streams() {
        let output = ShellRunner.run("echo out; echo err >&2").await.unwrap();
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }
}
