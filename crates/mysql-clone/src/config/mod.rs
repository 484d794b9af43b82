//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::{CloneError, Result};
use std::path::Path;

impl CloneConfig {
    /// Load configuration from a JSON file.
    ///
    /// Fails with `ConfigNotFound` if the path does not exist and
    /// `ConfigMalformed` if the file cannot be parsed. Both are fatal to the
    /// run; there is no partial or default fallback.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CloneError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: CloneConfig =
            serde_json::from_str(&content).map_err(|e| CloneError::ConfigMalformed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file_is_not_found() {
        let err = CloneConfig::load("definitely_missing_config.json").unwrap_err();
        assert!(matches!(err, CloneError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();

        let err = CloneConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, CloneError::ConfigMalformed { .. }));
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "source": {{"host": "db1", "user": "root", "password": "a", "database": "orders_dev"}},
                "target": {{"host": "db2", "database": "orders_test"}},
                "application": {{"mysqldumpPath": "/usr/bin/mysqldump", "mysqlPath": "/usr/bin/mysql"}}
            }}"#
        )
        .unwrap();

        let config = CloneConfig::load(file.path()).unwrap();
        assert_eq!(config.source.database, "orders_dev");
        assert_eq!(config.target.host.as_deref(), Some("db2"));
        assert_eq!(config.target.port, None);
        assert_eq!(config.target.user, None);
        assert_eq!(config.application.mysqldump_path, "/usr/bin/mysqldump");
    }
}
