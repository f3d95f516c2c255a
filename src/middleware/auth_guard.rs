use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::extract::PrivateCookieJar;

use crate::{auth::session, error::AppError};

/// Rejects requests without a valid session and hands the `SessionUser` to the
/// handler as an extension.
pub async fn guard(
    jar: PrivateCookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user) = session::current_user(&jar) else {
        tracing::debug!("No session for {} {}", request.method(), request.uri());
        return Err(AppError::Unauthorized);
    };

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
