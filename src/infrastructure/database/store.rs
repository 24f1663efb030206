use crate::shared::error::AppError;
use futures::future::BoxFuture;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite, SqliteConnection};
use std::path::Path;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Handle over the single live SQLite connection. Every multi-statement
/// operation goes through `with_exclusive_tx`, serialized process-wide by a
/// FIFO-fair async mutex whose guard is released on success, failure and
/// unwind alike. The underlying engine does not support concurrent writers,
/// so two transactions must never interleave.
pub struct StoreHandle {
    pool: Pool<Sqlite>,
    tx_lock: Mutex<()>,
}

impl StoreHandle {
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        if let Some(path) = database_url.strip_prefix("sqlite:") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                if let Some(parent) = Path::new(path).parent() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        info!("Local store connected: {}", database_url);

        Ok(Self {
            pool,
            tx_lock: Mutex::new(()),
        })
    }

    pub async fn in_memory() -> Result<Self, AppError> {
        Self::connect("sqlite::memory:").await
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Runs `f` inside one transaction, mutually exclusive with every other
    /// caller of this primitive. Commits on `Ok`, rolls back on `Err`.
    pub async fn with_exclusive_tx<T, F>(&self, f: F) -> Result<T, AppError>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut SqliteConnection) -> BoxFuture<'t, Result<T, AppError>> + Send,
    {
        let _guard = self.tx_lock.lock().await;
        let mut tx = self.pool.begin().await?;
        match f(&mut *tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Transaction rollback failed: {}", rollback_err);
                }
                Err(err)
            }
        }
    }

    /// Idempotent schema bootstrap: creates every table if absent and
    /// applies the guarded additive column migrations. Safe to call on
    /// every startup; fails only on unrecoverable storage corruption.
    pub async fn initialize(&self) -> Result<(), AppError> {
        for ddl in SCHEMA {
            sqlx::query(ddl).execute(&self.pool).await?;
        }

        // Columns added after the first shipped schema. Nullable, so the
        // migration is a plain ADD COLUMN guarded by a table_info check.
        self.ensure_column("properties", "city", "city TEXT").await?;
        self.ensure_column("user_profiles", "role", "role TEXT")
            .await?;
        for table in [
            "maintenance_submissions",
            "equipment_configurations",
            "inspection_checklists",
            "session_photo_batches",
        ] {
            self.ensure_column(table, "remote_id", "remote_id TEXT")
                .await?;
        }

        self.recover_interrupted().await?;

        info!("Local store schema initialized");
        Ok(())
    }

    /// Rows left in `syncing` by a crash mid-push would be invisible to the
    /// next drain; park them in `error` so they stay retriable.
    async fn recover_interrupted(&self) -> Result<(), AppError> {
        for table in [
            "maintenance_submissions",
            "equipment_configurations",
            "inspection_checklists",
            "session_photo_batches",
        ] {
            let result = sqlx::query(&format!(
                "UPDATE {table} SET status = 'error', \
                 error_message = 'Interrupted before completion' \
                 WHERE status = 'syncing'"
            ))
            .execute(&self.pool)
            .await?;
            if result.rows_affected() > 0 {
                warn!(
                    "Recovered {} interrupted {} rows",
                    result.rows_affected(),
                    table
                );
            }
        }
        Ok(())
    }

    async fn ensure_column(&self, table: &str, column: &str, ddl: &str) -> Result<(), AppError> {
        let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
            .fetch_all(&self.pool)
            .await?;
        let exists = rows.iter().any(|row| {
            row.try_get::<String, _>("name")
                .map(|name| name == column)
                .unwrap_or(false)
        });
        if !exists {
            sqlx::query(&format!("ALTER TABLE {table} ADD COLUMN {ddl}"))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

const SCHEMA: &[&str] = &[
    // Mirror tables, keyed by remote id. Replaced wholesale on pull.
    r#"
    CREATE TABLE IF NOT EXISTS properties (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT,
        city TEXT,
        last_synced_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment (
        id TEXT PRIMARY KEY,
        property_id TEXT NOT NULL,
        equipment_type_id TEXT,
        name TEXT NOT NULL,
        configured INTEGER NOT NULL DEFAULT 0,
        detail TEXT,
        last_synced_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment_types (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        category TEXT,
        last_synced_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS instruments (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        unit TEXT,
        last_synced_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS scheduled_work_orders (
        id TEXT PRIMARY KEY,
        equipment_id TEXT NOT NULL,
        property_id TEXT,
        status TEXT NOT NULL,
        scheduled_for INTEGER,
        last_synced_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS work_sessions (
        id TEXT PRIMARY KEY,
        property_id TEXT NOT NULL,
        technician_id TEXT,
        started_at INTEGER,
        last_synced_at INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_profiles (
        id TEXT PRIMARY KEY,
        display_name TEXT NOT NULL,
        email TEXT,
        role TEXT,
        last_synced_at INTEGER NOT NULL
    )
    "#,
    // Durable write queue, one mutation table and one media table per
    // family. Rows are never deleted.
    r#"
    CREATE TABLE IF NOT EXISTS maintenance_submissions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        remote_id TEXT,
        created_by TEXT NOT NULL,
        payload TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        error_message TEXT,
        created_at INTEGER NOT NULL,
        synced_at INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS maintenance_submission_media (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        mutation_id INTEGER NOT NULL REFERENCES maintenance_submissions(id),
        local_uri TEXT NOT NULL,
        category TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        remote_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment_configurations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        remote_id TEXT,
        created_by TEXT NOT NULL,
        payload TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        error_message TEXT,
        created_at INTEGER NOT NULL,
        synced_at INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment_configuration_media (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        mutation_id INTEGER NOT NULL REFERENCES equipment_configurations(id),
        local_uri TEXT NOT NULL,
        category TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        remote_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inspection_checklists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        remote_id TEXT,
        created_by TEXT NOT NULL,
        payload TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        error_message TEXT,
        created_at INTEGER NOT NULL,
        synced_at INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS inspection_checklist_media (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        mutation_id INTEGER NOT NULL REFERENCES inspection_checklists(id),
        local_uri TEXT NOT NULL,
        category TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        remote_url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS session_photo_batches (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        remote_id TEXT,
        created_by TEXT NOT NULL,
        payload TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        error_message TEXT,
        created_at INTEGER NOT NULL,
        synced_at INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS session_photo_batch_media (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        mutation_id INTEGER NOT NULL REFERENCES session_photo_batches(id),
        local_uri TEXT NOT NULL,
        category TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        remote_url TEXT
    )
    "#,
];
