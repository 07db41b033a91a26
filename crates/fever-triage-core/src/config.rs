//! Client configuration.
//!
//! The host page passes a JSON object when it creates the app; every field is
//! optional and falls back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Runtime configuration for the fever triage client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin prefix for API calls. Empty means same-origin.
    pub api_base: String,
    pub predict_path: String,
    pub status_path: String,
    /// Page shown when the fragment identifier is empty.
    pub default_page: String,
    /// Page shown after a successful prediction.
    pub result_page: String,
    /// Declared page sections. The browser build replaces this with the
    /// sections it finds in the document when any are present.
    pub pages: Vec<String>,
    /// Upper bound on a single prediction request.
    pub request_timeout_ms: u64,
    /// Delay before the entrance animation class is applied to a section.
    pub entrance_delay_ms: u32,
    /// Delay before the probability bar fill is applied.
    pub progress_fill_delay_ms: u32,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            predict_path: "/api/predict".to_string(),
            status_path: "/api/status".to_string(),
            default_page: "landing".to_string(),
            result_page: "result".to_string(),
            pages: ["landing", "form", "result", "advice"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            request_timeout_ms: 15_000,
            entrance_delay_ms: 10,
            progress_fill_delay_ms: 300,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse a configuration object and validate it.
    pub fn from_json(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(trimmed)
            .map_err(|e| Error::InvalidConfig(format!("malformed config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(Error::InvalidConfig("pages must not be empty".into()));
        }
        if !self.pages.contains(&self.default_page) {
            return Err(Error::InvalidConfig(format!(
                "default_page {:?} is not a declared page",
                self.default_page
            )));
        }
        if !self.pages.contains(&self.result_page) {
            return Err(Error::InvalidConfig(format!(
                "result_page {:?} is not a declared page",
                self.result_page
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "request_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Full URL of the prediction endpoint.
    #[must_use]
    pub fn predict_url(&self) -> String {
        join_url(&self.api_base, &self.predict_path)
    }

    /// Full URL of the status endpoint.
    #[must_use]
    pub fn status_url(&self) -> String {
        join_url(&self.api_base, &self.status_path)
    }

    /// Maximum level for the log subscriber; unknown names mean `info`.
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        parse_level(&self.log_level)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn parse_level(value: &str) -> tracing::Level {
    match value.trim().to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
