use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::AppError,
    helpers::json_response,
    inference::{generate_or_placeholder, TextGenerator},
    prompt::{format_explanation_prompt, format_generation_prompt},
    types::SessionUser,
};

fn default_language() -> String {
    "python".to_string()
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    prompt: String,
    #[serde(default = "default_language")]
    language: String,
}

#[derive(Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    code: String,
    #[serde(default = "default_language")]
    language: String,
}

fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!("Rejected assistant request body: {}", rejection.body_text());
            Err(AppError::BadRequest("Invalid request body".to_string()))
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[axum::debug_handler(state = crate::AppState)]
pub async fn generate_code(
    State(generator): State<Arc<dyn TextGenerator>>,
    Extension(user): Extension<SessionUser>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = read_body(payload)?;

    if request.prompt.trim().is_empty() {
        return Err(AppError::BadRequest("Prompt is required".to_string()));
    }

    tracing::info!("Generating {} code for {}", request.language, user.email);

    let formatted = format_generation_prompt(&request.prompt, &request.language);
    let code = generate_or_placeholder(generator.as_ref(), &formatted).await;

    Ok(json_response!(StatusCode::OK, {
        "success": true,
        "code": code,
        "language": request.language,
        "timestamp": timestamp()
    }))
}

#[axum::debug_handler(state = crate::AppState)]
pub async fn explain_code(
    State(generator): State<Arc<dyn TextGenerator>>,
    Extension(user): Extension<SessionUser>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = read_body(payload)?;

    if request.code.trim().is_empty() {
        return Err(AppError::BadRequest("Code is required".to_string()));
    }

    tracing::info!("Explaining {} code for {}", request.language, user.email);

    let formatted = format_explanation_prompt(&request.code, &request.language);
    let explanation = generate_or_placeholder(generator.as_ref(), &formatted).await;

    Ok(json_response!(StatusCode::OK, {
        "success": true,
        "explanation": explanation,
        "language": request.language,
        "timestamp": timestamp()
    }))
}
