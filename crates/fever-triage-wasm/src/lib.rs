//! WASM browser frontend for the fever triage client.
//!
//! This crate binds the core navigator and submit flow to a live document:
//! hash routing, the mobile menu, the symptom form, and the result pages.
//!
//! # Architecture
//!
//! ```text
//! Browser (WASM)                      Prediction backend
//!   ├─ DomShell    (page sections)
//!   ├─ DomSurface  (form + result)
//!   └─ FetchTransport  ──POST /api/predict──▶  model
//!                      ──GET  /api/status ──▶  health
//! ```
//!
//! # Building
//!
//! ```bash
//! # Using wasm-pack (recommended)
//! wasm-pack build crates/fever-triage-wasm --target web
//!
//! # Using cargo directly
//! cargo build --target wasm32-unknown-unknown -p fever-triage-wasm --release
//! ```
//!
//! # Usage
//!
//! ```javascript
//! import init, { FeverTriageApp } from './fever_triage_wasm.js';
//!
//! async function main() {
//!     await init();
//!     const app = FeverTriageApp.from_config('{"api_base": "http://localhost:5000"}');
//!     app.mount();
//! }
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod dom;

#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod shell;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

use fever_triage_core::{ClientConfig, PredictionResult, ResultView, TriageResult};

/// Build the result view for a raw prediction payload.
pub fn preview(json: &str) -> TriageResult<ResultView> {
    let result: PredictionResult = serde_json::from_str(json)?;
    Ok(ResultView::from_result(
        &result,
        ClientConfig::default().progress_fill_delay_ms,
    ))
}

// ──────────────────────────────────────────────────────────────────────────────
// Native-only exports (for testing)
// ──────────────────────────────────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
pub mod native {
    //! Native utilities for testing the browser bindings.

    use fever_triage_core::{DiseaseBreakdown, PredictionResult};

    /// A high-severity dengue prediction with a full breakdown.
    #[must_use]
    pub fn test_prediction() -> PredictionResult {
        PredictionResult {
            prediction: serde_json::json!(1),
            severity_level: Some("High".to_string()),
            probability: 82.0,
            message: "Dengue likely".to_string(),
            medical_advice: "See a doctor today".to_string(),
            disease_breakdown: Some(DiseaseBreakdown {
                dengue: 82.0,
                malaria: 8.0,
                normal: 10.0,
            }),
            patient_name: None,
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────────────────────────────────────
