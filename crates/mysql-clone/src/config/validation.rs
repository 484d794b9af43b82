//! Configuration validation.

use super::CloneConfig;
use crate::error::{CloneError, Result};

/// Validate the configuration.
pub fn validate(config: &CloneConfig) -> Result<()> {
    if config.source.database.is_empty() {
        return Err(CloneError::Config("source.database is required".into()));
    }
    if config.target.database.is_empty() {
        return Err(CloneError::Config("target.database is required".into()));
    }

    if config.application.mysqldump_path.is_empty() {
        return Err(CloneError::Config(
            "application.mysqldumpPath is required".into(),
        ));
    }
    if config.application.mysql_path.is_empty() {
        return Err(CloneError::Config("application.mysqlPath is required".into()));
    }

    // Cloning a database onto itself would destroy the source
    if config.source.host == config.target.host
        && config.source.port == config.target.port
        && config.source.database == config.target.database
    {
        return Err(CloneError::Config(
            "source and target cannot be the same database".into(),
        ));
    }

    Ok(())
}
