use std::sync::Arc;

use actix_web::{get, web, App, HttpResponse, HttpServer, Responder, Result};
use serde::{Deserialize, Serialize};

use crate::config::{Config, StoreKind};
use crate::repository::database::Database;
use crate::repository::memory::MemoryStore;
use crate::repository::TodoStore;

mod api;
mod config;
mod models;
mod repository;
mod telemetry;

#[derive(Serialize, Deserialize, Debug)]
pub struct Response {
    pub message: String,
}

#[get("/health")]
async fn healthcheck() -> impl Responder {
    let response = Response {
        message: "Everything is working fine".to_string(),
    };
    HttpResponse::Ok().json(response)
}

async fn not_found() -> Result<HttpResponse> {
    let response = Response {
        message: "Resource not found".to_string(),
    };
    Ok(HttpResponse::NotFound().json(response))
}

fn open_store(config: &Config) -> anyhow::Result<web::Data<dyn TodoStore>> {
    let store: Arc<dyn TodoStore> = match config.store {
        StoreKind::Sqlite => Arc::new(Database::connect(
            &config.database_url,
            config.database_pool_size,
        )?),
        StoreKind::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(web::Data::from(store))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(&config.app_name, &config.log_level)?;

    let store = open_store(&config)?;
    tracing::info!(store = ?config.store, host = %config.host, port = config.port, "starting server");

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(api::config)
            .service(healthcheck)
            .default_service(web::route().to(not_found))
            .wrap(actix_web::middleware::Logger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
