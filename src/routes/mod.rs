pub mod assistant;
pub mod auth;

use std::any::Any;

use axum::{
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{error::AppError, middleware::auth_guard::guard, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .route("/generate", post(assistant::generate_code))
                .route("/explain", post(assistant::explain_code))
                .route("/me", get(auth::me))
                .route_layer(from_fn_with_state(state.clone(), guard))
                .route("/login", post(auth::login))
                .route("/logout", post(auth::logout))
                .route("/signup", post(auth::signup)),
        )
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}
