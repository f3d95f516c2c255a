use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{
    api_types::{GenerationParameters, GenerationRequest},
    normalize_completion, ProviderError, TextGenerator,
};
use crate::config::ProviderConfig;

pub const DEFAULT_API_URL: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_MODEL: &str = "google/flan-t5-base";

pub const PARAMETERS: GenerationParameters = GenerationParameters {
    max_new_tokens: 300,
    temperature: 0.7,
    do_sample: true,
};

/// How much of an error body is kept for logging.
const ERROR_BODY_LIMIT: usize = 200;

/// Client for the Hugging Face Inference text-generation task.
pub struct HuggingFaceClient {
    reqwest: Client,
    endpoint: String,
    token: Option<String>,
    timeout: Duration,
}

impl HuggingFaceClient {
    pub fn new(reqwest: Client, config: &ProviderConfig) -> Self {
        Self {
            reqwest,
            endpoint: config.endpoint(),
            token: config.token.clone(),
            timeout: config.timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    fn request_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout)
        } else {
            ProviderError::Transport(err)
        }
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let token = self.token.as_deref().ok_or(ProviderError::NotConfigured)?;

        tracing::debug!("Calling {} with a {} byte prompt", self.endpoint, prompt.len());

        let res = self
            .reqwest
            .post(&self.endpoint)
            .bearer_auth(token)
            .timeout(self.timeout)
            .json(&GenerationRequest {
                inputs: prompt,
                parameters: PARAMETERS,
            })
            .send()
            .await
            .map_err(|err| self.request_error(err))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let bytes = res.bytes().await.map_err(|err| self.request_error(err))?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|err| ProviderError::Decode(err.to_string()))?;

        normalize_completion(body, prompt)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    type Captured = Arc<Mutex<Option<(Option<String>, Value)>>>;

    async fn spawn_provider(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", address)
    }

    fn client(api_url: String, token: Option<&str>, timeout: Duration) -> HuggingFaceClient {
        HuggingFaceClient::new(
            Client::new(),
            &ProviderConfig {
                api_url,
                model: "test-model".to_string(),
                token: token.map(str::to_string),
                timeout,
            },
        )
    }

    #[tokio::test]
    async fn sends_prompt_and_parameters_and_strips_echo() {
        let captured: Captured = Arc::default();
        let sink = captured.clone();
        let app = Router::new().route(
            "/test-model",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let sink = sink.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    let inputs = body["inputs"].as_str().unwrap_or_default().to_string();
                    *sink.lock().unwrap() = Some((auth, body));
                    Json(json!([{ "generated_text": format!("{inputs}\ndef f():\n    pass") }]))
                }
            }),
        );
        let url = spawn_provider(app).await;

        let text = client(url, Some("hf_secret"), Duration::from_secs(5))
            .generate("Write Python code:\nnothing")
            .await
            .unwrap();
        assert_eq!(text, "def f():\n    pass");

        let (auth, body) = captured.lock().unwrap().take().expect("provider was called");
        assert_eq!(auth.as_deref(), Some("Bearer hf_secret"));
        assert_eq!(body["inputs"], "Write Python code:\nnothing");
        assert_eq!(body["parameters"]["max_new_tokens"], 300);
        assert_eq!(body["parameters"]["do_sample"], true);
        let temperature = body["parameters"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let app = Router::new().route(
            "/test-model",
            post(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "error": "Model is loading" })),
                )
            }),
        );
        let url = spawn_provider(app).await;

        let err = client(url, Some("hf_secret"), Duration::from_secs(5))
            .generate("prompt")
            .await
            .unwrap_err();
        match err {
            ProviderError::Status { status, body } => {
                assert_eq!(status, 503);
                assert!(body.contains("Model is loading"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let app = Router::new().route("/test-model", post(|| async { "<html>oops</html>" }));
        let url = spawn_provider(app).await;

        let err = client(url, Some("hf_secret"), Duration::from_secs(5))
            .generate("prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn slow_provider_times_out() {
        let app = Router::new().route(
            "/test-model",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!("too late"))
            }),
        );
        let url = spawn_provider(app).await;

        let err = client(url, Some("hf_secret"), Duration::from_millis(100))
            .generate("prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{}", address), Some("hf_secret"), Duration::from_secs(5))
            .generate("prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[tokio::test]
    async fn missing_token_skips_the_network() {
        let client = client("http://127.0.0.1:9".to_string(), None, Duration::from_secs(5));
        assert!(!client.is_configured());

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured));
    }
}
