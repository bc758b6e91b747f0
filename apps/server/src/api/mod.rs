use std::sync::Arc;

use axum::{http::Method, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::{Config, CorsOrigins},
    main_lib::AppState,
};

mod admin;
mod analysis;
mod categories;
mod dashboard;
mod goals;
mod health;
mod prediction;
mod transactions;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .merge(transactions::router())
        .merge(categories::router())
        .merge(goals::router())
        .merge(dashboard::router())
        .merge(analysis::router())
        .merge(prediction::router())
        .merge(admin::router())
        .merge(health::router());

    let cors = match &config.cors_allow_origins {
        CorsOrigins::Any => CorsLayer::new().allow_origin(Any),
        CorsOrigins::List(origins) => CorsLayer::new().allow_origin(origins.clone()),
    }
    .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
    .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
