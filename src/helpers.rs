/// Builds a `(status, Json(json!(..)))` response. Call sites need `Json`, `json!`
/// and `IntoResponse` in scope.
macro_rules! json_response {
    ($status:expr, $body:tt $(,)?) => {
        ($status, Json(json!($body))).into_response()
    };
}

pub(crate) use json_response;
