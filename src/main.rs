mod auth;
mod config;
mod error;
mod helpers;
mod inference;
mod middleware;
mod models;
mod prompt;
mod routes;
mod types;
mod validation;

use std::sync::Arc;

use anyhow::Context;
use axum::{extract::FromRef, http::Method};
use axum_extra::extract::cookie::Key;
use dotenvy::dotenv;
use reqwest::Client;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing_subscriber::EnvFilter;

use crate::{
    auth::credentials::{seed_demo_user, CredentialStore, InMemoryCredentialStore},
    config::Config,
    inference::{huggingface::HuggingFaceClient, TextGenerator},
};

#[derive(Clone)]
pub struct AppState {
    key: Key,
    users: Arc<dyn CredentialStore>,
    generator: Arc<dyn TextGenerator>,
}

impl FromRef<AppState> for Arc<dyn CredentialStore> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Arc<dyn TextGenerator> {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting server...");

    let config = Config::from_env()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
        .allow_headers(AllowHeaders::mirror_request())
        .allow_origin(AllowOrigin::exact(config.cors_origin.clone()));

    let users = Arc::new(InMemoryCredentialStore::new());
    if config.seed_demo_user {
        seed_demo_user(users.as_ref())
            .await
            .context("Failed to seed demo account")?;
    }

    let generator = HuggingFaceClient::new(Client::new(), &config.provider);
    if !generator.is_configured() {
        tracing::warn!("HUGGINGFACE_API_TOKEN not set, responses will use placeholder output");
    }

    let state = AppState {
        key: config.session_key.clone(),
        users,
        generator: Arc::new(generator),
    };

    let app = routes::router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    tracing::info!("listening on {}", config.addr);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
