//! Request/response contract with the prediction backend.
//!
//! The transport only moves bytes; status and body interpretation lives here
//! so it behaves the same in the browser and in tests.

use std::future::Future;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{PredictionResult, ServiceStatus, SymptomFeatures};

/// Raw HTTP reply: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Minimal HTTP surface the client needs.
///
/// Implementations report network failures and timeouts as
/// [`Error::Network`] / [`Error::Timeout`] and return every completed
/// exchange as an [`HttpReply`], whatever its status.
pub trait PredictionTransport {
    /// `POST url` with a JSON body and `Content-Type: application/json`.
    fn post_json(&self, url: &str, body: String) -> impl Future<Output = Result<HttpReply>>;

    fn get(&self, url: &str) -> impl Future<Output = Result<HttpReply>>;
}

impl<T: PredictionTransport + ?Sized> PredictionTransport for &T {
    fn post_json(&self, url: &str, body: String) -> impl Future<Output = Result<HttpReply>> {
        (**self).post_json(url, body)
    }

    fn get(&self, url: &str) -> impl Future<Output = Result<HttpReply>> {
        (**self).get(url)
    }
}

/// Typed client for the two backend endpoints.
#[derive(Debug, Clone)]
pub struct PredictionClient<T> {
    transport: T,
    predict_url: String,
    status_url: String,
}

impl<T: PredictionTransport> PredictionClient<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            predict_url: config.predict_url(),
            status_url: config.status_url(),
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit features and decode the prediction.
    pub async fn predict(&self, features: &SymptomFeatures) -> Result<PredictionResult> {
        let body = serde_json::to_string(features)?;
        let reply = self.transport.post_json(&self.predict_url, body).await?;
        decode_prediction(&reply)
    }

    /// Probe backend health and whether a model is loaded.
    pub async fn status(&self) -> Result<ServiceStatus> {
        let reply = self.transport.get(&self.status_url).await?;
        if !reply.is_success() {
            return Err(Error::HttpStatus(reply.status));
        }
        Ok(serde_json::from_str(&reply.body)?)
    }
}

/// Interpret a `POST /api/predict` reply.
///
/// - non-2xx: [`Error::HttpStatus`], body ignored;
/// - unparseable JSON or missing required fields: [`Error::Decode`];
/// - a truthy `error` field: [`Error::BackendReported`] with its text.
pub fn decode_prediction(reply: &HttpReply) -> Result<PredictionResult> {
    if !reply.is_success() {
        return Err(Error::HttpStatus(reply.status));
    }
    let value: Value = serde_json::from_str(&reply.body)?;
    if let Some(error) = value.get("error").filter(|e| is_truthy(e)) {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(Error::BackendReported(message));
    }
    Ok(serde_json::from_value(value)?)
}

/// JSON truthiness: `null`, `false`, `0`, and `""` do not signal an error.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
