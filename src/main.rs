mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware, server};
use crate::features::categories::repositories::{CategoryRepository, PgCategoryRepository};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::products::repositories::{PgProductRepository, ProductRepository};
use crate::features::products::{routes as products_routes, ProductService};
use axum::Router;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const LISTEN_BACKLOG: i32 = 1024;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, category_description_max_length={}",
        worker_threads,
        config.catalog.category_description_max_length
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let category_repository: Arc<dyn CategoryRepository> =
        Arc::new(PgCategoryRepository::new(pool.clone()));
    let product_repository: Arc<dyn ProductRepository> =
        Arc::new(PgProductRepository::new(pool.clone()));

    let category_service = Arc::new(CategoryService::new(
        Arc::clone(&category_repository),
        Arc::clone(&product_repository),
        config.catalog.clone(),
    ));
    let product_service = Arc::new(ProductService::new(
        Arc::clone(&product_repository),
        Arc::clone(&category_repository),
    ));
    tracing::info!("Catalog services initialized");

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(categories_routes::routes(category_service))
        .merge(products_routes::routes(product_service))
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(RequestBodyLimitLayer::new(config.app.max_request_body_size))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let listener = server::bind_listener(&addr, LISTEN_BACKLOG)?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
