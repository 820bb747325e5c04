mod auth;
mod booking;
mod health;
mod middlewares;
mod service;
mod swagger;
use health::health_checker_handler;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::repository::Repository;
use crate::store::{FileBackend, Store};
use crate::{AppState, Config};

use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use std::error::Error;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub fn make_app() -> Result<Router, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();
    let config = Config::init();
    info!("Opening data store at {}", config.data_dir);
    let store = Store::new(Box::new(FileBackend::new(&config.data_dir)));
    let repo = Repository::new(store);

    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_str(&config.cors_url)?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_credentials(true)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE]);

    let state = Arc::new(AppState { repo, config });
    let ret = Router::new()
        .route("/api", get(health_checker_handler))
        .route("/api/health", get(health_checker_handler))
        .nest("/api/auth", auth::auth_routes(state.clone()))
        .nest("/api/services", service::service_routes(state.clone()))
        .nest("/api/bookings", booking::booking_routes(state.clone()))
        .merge(swagger::build_documentation())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(ret)
}
