//! Database Module
//!
//! SurrealDB connection pool. The connection string selects the engine
//! (`mem://` for tests, `rocksdb://<path>` for embedded deployments).

pub mod repository;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use tokio::sync::OnceCell;

use crate::core::Config;
use repository::{RepoError, RepoResult};

/// Lazily connected, process-wide store handle
///
/// Created once by the process root and handed to handlers through
/// [`ServerState`](crate::core::ServerState). The first call to
/// [`connection`](Self::connection) connects; concurrent first calls wait on
/// the same attempt, so exactly one underlying connect happens. A failed
/// attempt leaves the pool empty and the next call retries.
#[derive(Clone)]
pub struct DbPool {
    url: String,
    namespace: String,
    database: String,
    cell: Arc<OnceCell<Surreal<Any>>>,
    connects: Arc<AtomicUsize>,
}

impl DbPool {
    pub fn new(
        url: impl Into<String>,
        namespace: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            namespace: namespace.into(),
            database: database.into(),
            cell: Arc::new(OnceCell::new()),
            connects: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.database_url.clone(),
            config.db_namespace.clone(),
            config.db_name.clone(),
        )
    }

    /// Get the shared connection, connecting on first use
    pub async fn connection(&self) -> RepoResult<Surreal<Any>> {
        let db = self.cell.get_or_try_init(|| self.connect()).await?;
        Ok(db.clone())
    }

    /// Whether a connection has been established
    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }

    /// Number of underlying connect attempts made so far
    pub fn connect_attempts(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    async fn connect(&self) -> RepoResult<Surreal<Any>> {
        self.connects.fetch_add(1, Ordering::SeqCst);

        let db = any::connect(self.url.as_str())
            .await
            .map_err(|e| RepoError::Unavailable(format!("{}: {}", self.url, e)))?;
        db.use_ns(self.namespace.clone())
            .use_db(self.database.clone())
            .await
            .map_err(|e| RepoError::Unavailable(e.to_string()))?;

        tracing::info!(
            url = %self.url,
            namespace = %self.namespace,
            database = %self.database,
            "Database connection established"
        );
        Ok(db)
    }
}

impl fmt::Debug for DbPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbPool")
            .field("url", &self.url)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("connected", &self.is_connected())
            .finish()
    }
}
