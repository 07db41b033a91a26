//! Core logic for the fever triage web client
//!
//! This crate provides:
//! - Wire models for the prediction backend (`SymptomFeatures`, `PredictionResult`)
//! - Form coercion into the request payload
//! - Hash-based page navigation (`Navigator`) and the mobile menu toggle
//! - The submit lifecycle (`DiagnosisFlow`) and result rendering (`ResultView`)
//! - Configuration and error types
//!
//! Nothing here touches the DOM or the network directly: effects go through
//! [`PageShell`], [`DiagnosisSurface`], and [`PredictionTransport`], which the
//! browser crate implements over `web-sys`.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod flow;
pub mod form;
pub mod menu;
pub mod models;
pub mod nav;
pub mod render;
pub mod testing;
pub mod text;
pub mod transport;

// Re-export key types for convenience
pub use config::ClientConfig;
pub use error::{Error as TriageError, FailureKind, Result as TriageResult};
pub use flow::{DiagnosisFlow, DiagnosisSurface, SubmitControlView, SubmitOutcome, SubmitState};
pub use form::FormState;
pub use menu::MenuLayout;
pub use models::{DiseaseBreakdown, PredictionResult, ServiceStatus, SymptomFeatures, SymptomFlag};
pub use nav::{NavOutcome, Navigator, PageId, PageShell};
pub use render::{ResultView, SeverityTier, Tone};
pub use transport::{HttpReply, PredictionClient, PredictionTransport};
