mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use database::DocumentStore;
use dotenv::dotenv;
use services::token_service::TokenService;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn startup_error(e: utils::AppError) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env().map_err(startup_error)?;

    log::info!("🚀 Starting Mindful Gurukul server...");
    log::info!("📊 Database: {}", config.database_name);

    // One client for the whole process, shared by every worker
    let db = database::MongoDB::new(&config.mongo_uri, &config.database_name)
        .await
        .map_err(startup_error)?;
    log::info!("✅ Pinged your deployment. MongoDB connection is up");

    let store: Arc<dyn DocumentStore> = Arc::new(db.clone());
    let store_data = web::Data::from(store);
    let token_data = web::Data::new(TokenService::new(&config.token_secret));
    let enforce_admin_routes = config.enforce_admin_routes;

    if enforce_admin_routes {
        log::info!("👑 Admin guard enabled for PATCH /users/{{email}} and DELETE /users/{{id}}");
    }

    log::info!("🌐 Mindful Gurukul server is live on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(token_data.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(|cfg| api::configure(cfg, enforce_admin_routes))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    log::info!("🛑 Server stopped, closing MongoDB connections");
    db.shutdown().await;

    Ok(())
}
