//! MySQL reachability probe and size metadata.

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, OptsBuilder, Row};
use tracing::debug;

/// Aggregate data+index size of a database in MB, rounded to 2 decimals.
const DATABASE_SIZE_SQL: &str = "SELECT \
     SUM(ROUND(((DATA_LENGTH + INDEX_LENGTH) / 1024 / 1024), 2)) AS size \
     FROM INFORMATION_SCHEMA.TABLES \
     WHERE TABLE_SCHEMA = ?";

/// Read-only database queries the pipeline needs: a pre-flight reachability
/// check and the size metadata used for import progress.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Whether a connection can be established and a trivial query executed.
    /// Reachability is boolean; the underlying failure is deliberately
    /// discarded.
    async fn check(&self, conn: &ConnectionConfig) -> bool;

    /// Total data+index size of the database in MB, `None` until the engine
    /// reports any tables.
    async fn size_mb(&self, conn: &ConnectionConfig) -> Result<Option<f64>>;
}

/// Probe backed by a live `mysql_async` connection per call.
pub struct MysqlProbe;

impl MysqlProbe {
    fn opts(conn: &ConnectionConfig) -> OptsBuilder {
        let mut opts = OptsBuilder::default().db_name(Some(conn.database.as_str()));
        if let Some(host) = conn.host.as_deref() {
            opts = opts.ip_or_hostname(host);
        }
        if let Some(port) = conn.port {
            opts = opts.tcp_port(port);
        }
        opts.user(conn.user.as_deref()).pass(conn.password.as_deref())
    }

    async fn run_check(&self, conn: &ConnectionConfig) -> Result<()> {
        let mut db = Conn::new(Self::opts(conn)).await?;
        db.query_drop("SELECT TRUE").await?;
        db.disconnect().await?;
        Ok(())
    }
}

#[async_trait]
impl DatabaseProbe for MysqlProbe {
    async fn check(&self, conn: &ConnectionConfig) -> bool {
        match self.run_check(conn).await {
            Ok(()) => true,
            Err(e) => {
                debug!("connectivity check failed for {}: {}", conn.database, e);
                false
            }
        }
    }

    async fn size_mb(&self, conn: &ConnectionConfig) -> Result<Option<f64>> {
        let mut db = Conn::new(Self::opts(conn)).await?;
        let row: Option<Row> = db
            .exec_first(DATABASE_SIZE_SQL, (conn.database.as_str(),))
            .await?;
        db.disconnect().await?;
        Ok(row
            .and_then(|r| r.get::<Option<f64>, _>("size"))
            .flatten())
    }
}
