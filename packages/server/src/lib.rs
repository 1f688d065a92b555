#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the NYC street tree census dashboard.
//!
//! Loads the census CSV once at startup, precomputes the static summary
//! charts, and serves JSON view models for the map and analytics pages.
//! Client interactions (checklist changes, tab changes, navigation) are
//! routed through [`dispatch::dispatch`], which maps each event to pure
//! aggregation calls over the shared, immutable dataset. The frontend's
//! static files are served from the configured directory.

pub mod config;
pub mod dispatch;
mod handlers;
pub mod interactive;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::error::InternalError;
use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use tree_census_analytics_models::StaticAnalytics;
use tree_census_dataset::Dataset;
use tree_census_server_models::ApiError;

pub use config::ServerConfig;

/// Shared application state.
///
/// Built once at startup and never mutated, so handlers read it without
/// locking.
pub struct AppState {
    /// Loaded census records.
    pub dataset: Arc<Dataset>,
    /// Summary charts computed from [`Self::dataset`].
    pub analytics: Arc<StaticAnalytics>,
}

impl AppState {
    /// Precomputes the static analytics for `dataset` and wraps both.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        let analytics = tree_census_analytics::precompute(&dataset);
        Self {
            dataset: Arc::new(dataset),
            analytics: Arc::new(analytics),
        }
    }
}

/// Registers the `/api` routes and their extractor error handlers.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected event body: {err}");
        let response = HttpResponse::BadRequest().json(ApiError {
            error: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected query string: {err}");
        let response = HttpResponse::BadRequest().json(ApiError {
            error: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/layout", web::get().to(handlers::layout))
            .route("/analytics", web::get().to(handlers::analytics))
            .route("/analytics/map", web::get().to(handlers::analytics_map))
            .route("/map", web::get().to(handlers::map))
            .route("/table", web::get().to(handlers::table))
            .route("/events", web::post().to(handlers::events)),
    );
}

/// Serves the frontend bundle. Unknown paths fall back to `index.html` so
/// that `/analytics` can be routed client-side.
fn frontend(static_dir: &Path) -> Files {
    let index = static_dir.join("index.html");
    Files::new("/", static_dir)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(index).await?;
                let res = file.into_response(&req);
                Ok::<_, actix_web::Error>(ServiceResponse::new(req, res))
            }
        }))
}

/// Starts the dashboard server.
///
/// Loads the census CSV named by `config`, precomputes the static
/// analytics, and runs the Actix-Web HTTP server until shutdown. The caller
/// provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Error` if the dataset is unavailable, or if the
/// HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Loading dataset from {}...", config.data_path.display());
    let dataset = tree_census_dataset::load(&config.data_path).map_err(|e| {
        log::error!("Dataset unavailable: {e}");
        std::io::Error::other(e)
    })?;

    log::info!("Precomputing analytics for {} records...", dataset.len());
    let state = web::Data::new(AppState::new(dataset));

    let ServerConfig {
        bind_addr,
        port,
        static_dir,
        ..
    } = config;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            .service(frontend(&static_dir))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
