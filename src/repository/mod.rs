use thiserror::Error;

use crate::models::todo::{NewTodo, Todo};

pub mod database;
pub mod memory;
pub mod schema;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to get a connection from the pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("query failed: {0}")]
    Query(#[from] diesel::result::Error),

    #[error("failed to run migrations: {0}")]
    Migration(String),

    #[error("no todo ids left to assign")]
    IdsExhausted,

    #[error("todo store lock poisoned")]
    Poisoned,
}

/// Storage handle the todo handlers are built on.
///
/// Ids are assigned by the store on insert. `find_all` returns todos ordered by id.
pub trait TodoStore: Send + Sync {
    fn find_all(&self) -> Result<Vec<Todo>, StoreError>;

    fn find_by_id(&self, id: i32) -> Result<Option<Todo>, StoreError>;

    fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    fn delete(&self, todo: &Todo) -> Result<(), StoreError>;
}
