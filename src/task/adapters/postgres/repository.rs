//! `PostgreSQL` repository implementation for task storage.

use super::{
    PostgresConfigError, PostgresStoreConfig,
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::not;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the task adapter.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool from `config` without opening a connection up front.
    ///
    /// An unreachable server is reported by the first operation as
    /// [`TaskRepositoryError::Unavailable`] once the checkout timeout expires.
    ///
    /// # Errors
    ///
    /// Returns [`PostgresConfigError::Invalid`] when the pool size or the
    /// checkout timeout is zero.
    pub fn connect_lazy(config: &PostgresStoreConfig) -> Result<Self, PostgresConfigError> {
        config.validate()?;
        let manager = ConnectionManager::<PgConnection>::new(config.database_url());
        let pool = Pool::builder()
            .max_size(config.max_pool_size())
            .connection_timeout(config.connection_timeout())
            .build_unchecked(manager);
        Ok(Self::new(pool))
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::unavailable)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::unavailable(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((tasks::created_at.desc(), tasks::insertion_seq.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::unavailable)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::unavailable)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn toggle_completed(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set(tasks::completed.eq(not(tasks::completed)))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::unavailable)?;
            row.map(row_to_task)
                .ok_or(TaskRepositoryError::NotFound(id))
        })
        .await
    }

    async fn update_text(&self, id: TaskId, text: &str) -> TaskRepositoryResult<Task> {
        let new_text = text.to_owned();
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set(tasks::text.eq(new_text))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::unavailable)?;
            row.map(row_to_task)
                .ok_or(TaskRepositoryError::NotFound(id))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::unavailable)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn delete_completed(&self) -> TaskRepositoryResult<usize> {
        self.run_blocking(|connection| {
            diesel::delete(tasks::table.filter(tasks::completed.eq(true)))
                .execute(connection)
                .map_err(TaskRepositoryError::unavailable)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        text: task.text().to_owned(),
        completed: task.is_completed(),
        created_at: task.created_at(),
    }
}

fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        text,
        completed,
        created_at,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        text,
        completed,
        created_at,
    })
}
