use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::{
    auth::{
        credentials::{CredentialStore, StoreError},
        session,
    },
    helpers::json_response,
    types::SessionUser,
    validation::{validate_signup, SignupError},
};

/// Failures of the account endpoints, reported as `{"success": false, "message": ..}`.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid request body")]
    InvalidBody,
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Invalid(#[from] SignupError),
    #[error("Email already registered")]
    EmailTaken,
    #[error("An error occurred while processing your request")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AccountError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected account request body: {}", rejection.body_text());
        AccountError::InvalidBody
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = match &self {
            AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AccountError::Internal(err) => {
                tracing::error!("Account request failed: {:?}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        };

        json_response!(status, {
            "success": false,
            "message": self.to_string()
        })
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[axum::debug_handler(state = crate::AppState)]
pub async fn login(
    State(users): State<Arc<dyn CredentialStore>>,
    jar: PrivateCookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(PrivateCookieJar, Response), AccountError> {
    let Json(data) = payload?;
    let email = data.email.trim();

    if email.is_empty() || data.password.is_empty() {
        return Err(AccountError::MissingCredentials);
    }

    let user = users
        .verify(email, &data.password)
        .await
        .map_err(anyhow::Error::from)?;

    let Some(user) = user else {
        tracing::warn!("Login failed for {}", email);
        return Err(AccountError::InvalidCredentials);
    };

    let session_user = SessionUser::from(user);
    let jar = session::login(jar, &session_user)?;
    tracing::info!("Login successful - Email: {}", session_user.email);

    let body = json_response!(StatusCode::OK, {
        "success": true,
        "message": "Login successful",
        "user": session_user
    });
    Ok((jar, body))
}

#[axum::debug_handler(state = crate::AppState)]
pub async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    let jar = session::logout(jar);
    (
        jar,
        json_response!(StatusCode::OK, {
            "success": true,
            "message": "Logged out successfully"
        }),
    )
}

#[axum::debug_handler(state = crate::AppState)]
pub async fn signup(
    State(users): State<Arc<dyn CredentialStore>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Response, AccountError> {
    let Json(data) = payload?;
    let name = data.name.trim();
    let email = data.email.trim();

    if let Err(err) = validate_signup(name, email, &data.password) {
        tracing::warn!("Signup failed for {:?}: {}", email, err);
        return Err(err.into());
    }

    match users.register(email, name, &data.password).await {
        Ok(()) => {}
        Err(StoreError::AlreadyExists) => {
            tracing::warn!("Signup failed - Email already registered: {}", email);
            return Err(AccountError::EmailTaken);
        }
        Err(err) => return Err(anyhow::Error::from(err).into()),
    }

    tracing::info!("Signup successful - Email: {}, Name: {}", email, name);

    Ok(json_response!(StatusCode::OK, {
        "success": true,
        "message": "Account created successfully"
    }))
}

#[axum::debug_handler(state = crate::AppState)]
pub async fn me(Extension(user): Extension<SessionUser>) -> impl IntoResponse {
    json_response!(StatusCode::OK, {
        "success": true,
        "user": user
    })
}
