use crate::config::RethreadConfig;
use crate::error::{ConfigError, TransformError};
use crate::prompt::TransformRequest;
use crate::types::GeneratedImage;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;

/// A remote service that turns a [`TransformRequest`] into a generated image.
///
/// One call is one attempt: no streaming, no polling, no retry.
///
/// # Example
///
/// ```ignore
/// use rethread::{GeneratedImage, TransformError, TransformRequest, TransformService};
///
/// struct Canned(GeneratedImage);
///
/// impl TransformService for Canned {
///     async fn transform(&self, _req: &TransformRequest) -> Result<GeneratedImage, TransformError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait TransformService: Send + Sync {
    /// Send one request and wait for the generated image.
    fn transform(
        &self,
        request: &TransformRequest,
    ) -> impl Future<Output = Result<GeneratedImage, TransformError>> + Send;
}

/// HTTPS client for the Gemini `generateContent` endpoint.
///
/// # Example
/// ```no_run
/// use rethread::{GeminiClient, RethreadConfig};
///
/// # fn example() -> Result<(), rethread::ConfigError> {
/// let config = RethreadConfig::default().api_key("my-key");
/// let client = GeminiClient::new(config)?;
/// assert_eq!(client.model(), "gemini-2.5-flash-image-preview");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: RethreadConfig,
}

impl GeminiClient {
    /// Create a client. Fails if the config has no API key.
    pub fn new(config: RethreadConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            http: Client::new(),
            config,
        })
    }

    /// Use a custom `reqwest::Client` (for connection pooling, proxies, TLS).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Returns the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Full `generateContent` URL, without the key.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        )
    }

    async fn generate(&self, request: &TransformRequest) -> Result<GeneratedImage, TransformError> {
        let url = self.generate_url();
        let key = self.config.api_key.as_deref().unwrap_or_default();

        tracing::info!(
            model = %self.config.model,
            style = request.style_id,
            payload_bytes = request.image_b64.len(),
            "dispatching transform request"
        );

        let resp = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .timeout(self.config.timeout)
            .json(&request.to_body())
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the full URL, query string included.
                TransformError::Connection(self.config.endpoint.clone(), e.without_url().to_string())
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(TransformError::Http(status, text));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| TransformError::InvalidResponse(e.without_url().to_string()))?;

        extract_generated_image(&json)
    }
}

impl TransformService for GeminiClient {
    async fn transform(&self, request: &TransformRequest) -> Result<GeneratedImage, TransformError> {
        let outcome = self.generate(request).await;
        match &outcome {
            Ok(image) => tracing::info!(
                mime = %image.mime_type,
                bytes = image.data.len(),
                "transform succeeded"
            ),
            Err(e) => tracing::warn!(error = %e, "transform failed"),
        }
        outcome
    }
}

/// Pull the first inline image out of a `generateContent` response.
///
/// Looks at `candidates[0].content.parts` and returns the first part that
/// carries `inlineData`. A missing media type defaults to `image/png`.
pub fn extract_generated_image(json: &Value) -> Result<GeneratedImage, TransformError> {
    let parts = json
        .pointer("/candidates/0/content/parts")
        .and_then(|v| v.as_array());

    let inline = parts.and_then(|parts| {
        parts
            .iter()
            .find_map(|p| p.get("inlineData").filter(|d| d.is_object()))
    });

    let Some(inline) = inline else {
        return Err(TransformError::NoImage(no_image_reason(json)));
    };

    let data = inline
        .get("data")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| TransformError::InvalidResponse("inlineData part has no data".into()))?;

    let mime_type = inline
        .get("mimeType")
        .and_then(|v| v.as_str())
        .unwrap_or("image/png");

    Ok(GeneratedImage::new(mime_type, data))
}

fn no_image_reason(json: &Value) -> String {
    if let Some(msg) = json.pointer("/error/message").and_then(|v| v.as_str()) {
        return msg.to_string();
    }
    if let Some(reason) = json
        .pointer("/promptFeedback/blockReason")
        .and_then(|v| v.as_str())
    {
        return format!("prompt blocked ({})", reason);
    }
    if let Some(reason) = json
        .pointer("/candidates/0/finishReason")
        .and_then(|v| v.as_str())
    {
        return format!("finish reason {}", reason);
    }
    "response contained no image part".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn test_client_requires_key() {
        let result = GeminiClient::new(RethreadConfig::default());
        assert!(matches!(result, Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_generate_url() {
        let client = GeminiClient::new(
            RethreadConfig::with_model("img-model")
                .endpoint("http://localhost:9000/")
                .api_key("k"),
        )
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000");
        assert_eq!(
            client.generate_url(),
            "http://localhost:9000/v1beta/models/img-model:generateContent"
        );
        assert!(!client.generate_url().contains("key="));
    }

    #[test]
    fn test_extract_first_image_part() {
        let json = parse(
            r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your redesign."},
                        {"inlineData": {"mimeType": "image/png", "data": "Zmlyc3Q="}},
                        {"inlineData": {"mimeType": "image/png", "data": "c2Vjb25k"}}
                    ]
                }
            }]
        }"#,
        );
        let image = extract_generated_image(&json).unwrap();
        assert_eq!(image.data, "Zmlyc3Q=");
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn test_extract_defaults_mime() {
        let json = parse(r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"eA=="}}]}}]}"#);
        assert_eq!(extract_generated_image(&json).unwrap().mime_type, "image/png");
    }

    #[test]
    fn test_text_only_response_is_no_image() {
        let json = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"I can't do that."}]},"finishReason":"STOP"}]}"#,
        );
        let err = extract_generated_image(&json).unwrap_err();
        match err {
            TransformError::NoImage(reason) => assert_eq!(reason, "finish reason STOP"),
            other => panic!("expected NoImage, got {:?}", other),
        }
    }

    #[test]
    fn test_blocked_prompt_reason() {
        let json = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        let err = extract_generated_image(&json).unwrap_err();
        assert!(err.to_string().contains("prompt blocked (SAFETY)"));
    }

    #[test]
    fn test_error_body_reason() {
        let json = parse(r#"{"error":{"code":400,"message":"API key not valid."}}"#);
        let err = extract_generated_image(&json).unwrap_err();
        assert!(err.to_string().contains("API key not valid."));
    }

    #[test]
    fn test_empty_object_is_no_image() {
        let err = extract_generated_image(&parse("{}")).unwrap_err();
        assert!(matches!(err, TransformError::NoImage(_)));
    }

    #[test]
    fn test_empty_data_is_invalid() {
        let json = parse(r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":""}}]}}]}"#);
        assert!(matches!(
            extract_generated_image(&json),
            Err(TransformError::InvalidResponse(_))
        ));
    }
}
