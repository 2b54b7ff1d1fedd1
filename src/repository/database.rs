use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::models::todo::{NewTodo, Todo};
use crate::repository::schema::todos::dsl::*;
use crate::repository::{StoreError, TodoStore};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const IN_MEMORY_URL: &str = ":memory:";

const BUSY_TIMEOUT_MS: u32 = 5_000;

type DBPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Per-connection settings so pooled writers wait on each other instead of
/// failing with `database is locked`.
#[derive(Debug)]
struct SqlitePragmas {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    /// Opens the SQLite database at `database_url` and runs any pending migrations.
    ///
    /// Every connection to `:memory:` is its own database, so that URL always gets a
    /// single-connection pool.
    pub fn connect(database_url: &str, pool_size: u32) -> Result<Self, StoreError> {
        let max_size = if database_url == IN_MEMORY_URL {
            1
        } else {
            pool_size
        };
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool: DBPool = r2d2::Pool::builder()
            .max_size(max_size)
            .connection_customizer(Box::new(SqlitePragmas {
                busy_timeout_ms: BUSY_TIMEOUT_MS,
            }))
            .build(manager)?;

        let mut conn = pool.get()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        tracing::info!(database_url, migrations = applied.len(), "database ready");

        Ok(Database { pool })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::connect(IN_MEMORY_URL, 1)
    }
}

impl TodoStore for Database {
    fn find_all(&self) -> Result<Vec<Todo>, StoreError> {
        let mut conn = self.pool.get()?;
        let all = todos.order(id.asc()).load::<Todo>(&mut conn)?;
        Ok(all)
    }

    fn find_by_id(&self, todo_id: i32) -> Result<Option<Todo>, StoreError> {
        let mut conn = self.pool.get()?;
        let todo = todos
            .find(todo_id)
            .first::<Todo>(&mut conn)
            .optional()?;
        Ok(todo)
    }

    fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let mut conn = self.pool.get()?;
        let todo = diesel::insert_into(todos)
            .values(&todo)
            .get_result::<Todo>(&mut conn)?;
        tracing::debug!(todo_id = todo.id, "inserted todo row");
        Ok(todo)
    }

    fn delete(&self, todo: &Todo) -> Result<(), StoreError> {
        let mut conn = self.pool.get()?;
        let count = diesel::delete(todos.find(todo.id)).execute(&mut conn)?;
        tracing::debug!(todo_id = todo.id, rows = count, "deleted todo row");
        Ok(())
    }
}
