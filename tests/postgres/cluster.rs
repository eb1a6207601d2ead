//! Embedded `PostgreSQL` cluster lifecycle for the task store tests.

use checklist::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    services::TaskStoreService,
};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{
    ClusterHandle, ExecutionPrivileges, TestCluster, detect_execution_privileges,
};
use rstest::fixture;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tokio::runtime::Runtime;

/// Schema for the `tasks` table, applied to the template database.
const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-01-20-000000_create_tasks/up.sql");

/// Template database holding the migrated schema.
const TEMPLATE_DB: &str = "checklist_test_template";

static CLUSTER: OnceLock<Option<ClusterHandle>> = OnceLock::new();
static TEMPLATE_LOCK: Mutex<()> = Mutex::new(());

/// Service type used by the `PostgreSQL` integration tests.
pub type PostgresService = TaskStoreService<PostgresTaskRepository, DefaultClock>;

fn start_cluster() -> Option<ClusterHandle> {
    if matches!(detect_execution_privileges(), ExecutionPrivileges::Root)
        && std::env::var_os("PG_EMBEDDED_WORKER").is_none()
    {
        eprintln!("SKIP-TEST-CLUSTER: running as root and PG_EMBEDDED_WORKER is not set");
        return None;
    }
    // `TestCluster` is `!Send`, so the static holds the `Send + Sync` handle
    // and the guard is forgotten to keep the cluster alive for the process.
    match TestCluster::new_split() {
        Ok((cluster, guard)) => {
            std::mem::forget(guard);
            Some(cluster)
        }
        Err(err) => {
            eprintln!("SKIP-TEST-CLUSTER: failed to start PostgreSQL: {err}");
            None
        }
    }
}

fn ensure_template(cluster: &'static ClusterHandle) -> eyre::Result<()> {
    let _lock = TEMPLATE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(&db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_TASKS_SQL)
                .map_err(|e| eyre::eyre!("{e}"))?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))
}

/// Drops the temporary database once every connection to it is closed.
struct DatabaseGuard {
    cluster: &'static ClusterHandle,
    db_name: String,
}

impl Drop for DatabaseGuard {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {err}", self.db_name);
        }
    }
}

/// A database cloned from the migrated template with a store bound to it.
///
/// Fields drop in declaration order, so the pool closes before the guard
/// drops the database.
pub struct StoreContext {
    /// Runtime driving the async store calls.
    pub runtime: Runtime,
    /// Service over [`Self::repository`].
    pub service: PostgresService,
    /// Repository bound to the temporary database.
    pub repository: Arc<PostgresTaskRepository>,
    _database: DatabaseGuard,
}

impl StoreContext {
    fn create(cluster: &'static ClusterHandle) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let db_name = format!("checklist_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("failed to create {db_name}: {e}"))?;
        let database = DatabaseGuard {
            cluster,
            db_name: db_name.clone(),
        };

        let url = cluster.connection().database_url(&db_name);
        // A single connection keeps statement order deterministic.
        let pool: TaskPgPool = Pool::builder()
            .max_size(1)
            .build(ConnectionManager::<PgConnection>::new(url))?;
        let repository = Arc::new(PostgresTaskRepository::new(pool));
        let service = TaskStoreService::new(Arc::clone(&repository), Arc::new(DefaultClock));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            runtime,
            service,
            repository,
            _database: database,
        })
    }
}

/// Provides a fresh migrated database, or `None` when no cluster is available.
#[fixture]
pub fn store() -> eyre::Result<Option<StoreContext>> {
    CLUSTER
        .get_or_init(start_cluster)
        .as_ref()
        .map(StoreContext::create)
        .transpose()
}
