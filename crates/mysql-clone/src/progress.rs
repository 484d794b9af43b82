//! Single-line progress reporting on a fixed cadence.

use chrono::Local;
use colored::Colorize;
use std::future::Future;
use std::io::Write;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cadence of the progress poll during export and import.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Handle to a running progress monitor. Owned by the stage that started it
/// and consumed by [`ProgressHandle::stop`].
pub struct ProgressHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ProgressHandle {
    /// Halt the cadence and emit a trailing line break so subsequent log
    /// lines do not collide with the progress line.
    pub async fn stop(self) {
        self.cancel.cancel();
        let _ = self.task.await;
        println!();
    }
}

/// Start polling `status` on the given cadence, rendering each result to a
/// single in-place-overwritten line. The first poll runs immediately.
pub fn start<F, Fut>(interval: Duration, mut status: F) -> ProgressHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = String> + Send,
{
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let started = Instant::now();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    let line = status().await;
                    render(&line, started.elapsed());
                }
            }
        }
    });

    ProgressHandle { cancel, task }
}

fn render(message: &str, elapsed: Duration) {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let elapsed = format!("+{}ms", elapsed.as_millis());
    print!(
        "\r\x1b[2K{} {} {} {}",
        timestamp.as_str().dimmed(),
        "stream".blue(),
        message,
        elapsed.as_str().bright_blue().dimmed()
    );
    let _ = std::io::stdout().flush();
}
