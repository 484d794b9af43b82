//! Destructive-action confirmation gate.

use crate::config::{CloneConfig, ConnectionConfig};
use crate::error::Result;
use colored::Colorize;
use std::io::Write;

/// The literal token the operator must type to proceed.
pub const CONFIRM_TOKEN: &str = "YES";

/// Exact-match check: case-sensitive, no trimming tolerance.
pub fn is_confirmed(input: &str) -> bool {
    input == CONFIRM_TOKEN
}

fn endpoint(conn: &ConnectionConfig) -> String {
    format!(
        "mysql://{}/{}",
        conn.host.as_deref().unwrap_or("localhost"),
        conn.database
    )
}

/// Render the migration summary and destruction warning shown before the
/// operator is asked to confirm.
pub fn render_banner(config: &CloneConfig) -> String {
    format!(
        "\n+-----------------------------------\
         \n| {}\
         \n|  source: {}\
         \n|  target: {}\
         \n|  \
         \n|  {}\
         \n|  \
         \n|  you need to explicitly type {} to proceed\
         \n+-----------------------------------",
        "WARNING: ABOUT TO MIGRATE".on_yellow(),
        endpoint(&config.source),
        endpoint(&config.target),
        "*** ALL DATA IN TARGET WILL BE DELETED ***".on_red(),
        CONFIRM_TOKEN.bright_green(),
    )
}

/// Source of the operator's confirmation response.
pub trait ConfirmationGate: Send + Sync {
    /// Present the banner and block on operator input, returning the raw
    /// response line.
    fn read_response(&self, banner: &str) -> Result<String>;
}

/// Reads the response from stdin. A raw line read, not a prompt library:
/// the token match is exact and must see the input untrimmed.
pub struct StdinGate;

impl ConfirmationGate for StdinGate {
    fn read_response(&self, banner: &str) -> Result<String> {
        println!("{banner}");
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;

        // strip the line terminator only
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolConfig;

    #[test]
    fn test_only_exact_token_confirms() {
        assert!(is_confirmed("YES"));

        assert!(!is_confirmed("yes"));
        assert!(!is_confirmed("Yes "));
        assert!(!is_confirmed("YES "));
        assert!(!is_confirmed(" YES"));
        assert!(!is_confirmed("Y"));
        assert!(!is_confirmed(""));
    }

    fn config() -> CloneConfig {
        CloneConfig {
            source: ConnectionConfig {
                host: Some("db1.internal".to_string()),
                port: None,
                user: Some("root".to_string()),
                password: Some("hunter2".to_string()),
                database: "orders_dev".to_string(),
            },
            target: ConnectionConfig {
                host: None,
                port: None,
                user: None,
                password: None,
                database: "orders_test".to_string(),
            },
            application: ToolConfig {
                mysqldump_path: "mysqldump".to_string(),
                mysql_path: "mysql".to_string(),
            },
        }
    }

    #[test]
    fn test_banner_names_both_endpoints() {
        let banner = render_banner(&config());
        assert!(banner.contains("mysql://db1.internal/orders_dev"));
        assert!(banner.contains("mysql://localhost/orders_test"));
        assert!(banner.contains("ALL DATA IN TARGET WILL BE DELETED"));
        assert!(banner.contains(CONFIRM_TOKEN));
    }

    #[test]
    fn test_banner_never_shows_credentials() {
        let banner = render_banner(&config());
        assert!(!banner.contains("hunter2"));
    }
}
