use actix_web::{web, HttpResponse};

use crate::api::error::ApiError;
use crate::api::validation::{self, NumericId};
use crate::models::todo::NewTodo;
use crate::repository::{StoreError, TodoStore};

pub type Store = web::Data<dyn TodoStore>;

pub async fn get_todos(store: Store) -> Result<HttpResponse, ApiError> {
    let todos = web::block(move || store.find_all()).await??;
    Ok(HttpResponse::Ok().json(todos))
}

pub async fn create_todo(
    store: Store,
    new_todo: web::Json<NewTodo>,
) -> Result<HttpResponse, ApiError> {
    let new_todo = new_todo.into_inner();
    let todo = web::block(move || store.insert(new_todo)).await??;
    tracing::info!(todo_id = todo.id, "todo created");
    Ok(HttpResponse::Created().json(todo))
}

pub async fn delete_todo(store: Store, id: web::Path<NumericId>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner().todo_id().ok_or(ApiError::NotFound)?;
    let deleted = web::block(move || -> Result<bool, StoreError> {
        match store.find_by_id(id)? {
            Some(todo) => store.delete(&todo).map(|_| true),
            None => Ok(false),
        }
    })
    .await??;

    if !deleted {
        return Err(ApiError::NotFound);
    }
    tracing::info!(todo_id = id, "todo deleted");
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/todos")
            .app_data(validation::json_body())
            .route(web::get().to(get_todos))
            .route(web::post().to(create_todo)),
    )
    .service(
        web::resource("/todos/{id}")
            .app_data(validation::path_params())
            .route(web::delete().to(delete_todo)),
    );
}
