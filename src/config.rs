use crate::error::ConfigError;
use std::time::Duration;

/// Default generation service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
/// Default image-capable model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
/// Inline request size accepted by the provider.
pub const PROVIDER_INLINE_LIMIT_BYTES: usize = 20 * 1024 * 1024;
/// Default upload bound: the largest raw image whose base64 encoding
/// (4 bytes per 3) stays within [`PROVIDER_INLINE_LIMIT_BYTES`].
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = PROVIDER_INLINE_LIMIT_BYTES / 4 * 3;

/// Configuration for the remote transform service.
///
/// Loaded once before any remote call and never mutated afterwards.
#[derive(Clone)]
pub struct RethreadConfig {
    /// Service base URL (e.g., "https://generativelanguage.googleapis.com")
    pub endpoint: String,
    /// Model name used in the `generateContent` path
    pub model: String,
    /// Caller-supplied credential. `None` is a configuration error.
    pub api_key: Option<String>,
    /// Request timeout (default: 120s)
    pub timeout: Duration,
    /// Largest accepted raw upload, in bytes (default: 15 MiB)
    pub max_upload_bytes: usize,
}

// The key must never reach logs.
impl std::fmt::Debug for RethreadConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RethreadConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl Default for RethreadConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl RethreadConfig {
    /// Create a new config with the given model name.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Load from the process environment.
    ///
    /// Reads `RETHREAD_API_KEY` (falling back to `GEMINI_API_KEY`),
    /// `RETHREAD_ENDPOINT` and `RETHREAD_MODEL`. The result is validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Same rules as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.api_key = lookup("RETHREAD_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup("GEMINI_API_KEY"));
        if let Some(endpoint) = lookup("RETHREAD_ENDPOINT") {
            config = config.endpoint(endpoint);
        }
        if let Some(model) = lookup("RETHREAD_MODEL") {
            config.model = model;
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the service endpoint. Trailing slashes are dropped.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the upload size bound.
    pub fn max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }

    /// Check the config is usable for remote calls.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.api_key.as_deref() {
            Some(k) if !k.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingApiKey),
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        Ok(())
    }
}
