/*
 * Responsibility
 * - Config load -> dependency wiring -> Router assembly
 * - Middleware application (request id / body limit / bearer token)
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::{JwtTokenValidator, ShopJwtConfiguration};
use crate::services::graphql::EchoExecutor;
use crate::services::request_reader::AuthTokenExtractor;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,graphql_base=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting GraphQL endpoint in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_state(config: &Config) -> AppState {
    // The validator owns the key material; the extractor only sees the trait.
    let jwt = ShopJwtConfiguration::from_config(config);
    let validator = Arc::new(JwtTokenValidator::new(&jwt));
    let tokens = Arc::new(AuthTokenExtractor::new(
        validator,
        config.forwarded_auth_header.clone(),
    ));

    AppState::new(tokens, Arc::new(EchoExecutor), config.body_limit_bytes)
}

pub(crate) fn build_router(state: AppState) -> Router {
    let body_limit_bytes = state.body_limit_bytes;

    let router = Router::new()
        .route("/health", get(api::v1::handlers::health::health))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .with_state(state);

    middleware::http::apply(router, body_limit_bytes)
}
