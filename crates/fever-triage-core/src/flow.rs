//! Submit lifecycle of the symptom form.
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──────▶ Idle   (result rendered, result page shown)
//!   ▲                 │
//!   └──next submit── Error ◀──failure──┘      (error text shown, no navigation)
//! ```
//!
//! The idle presentation of the submit control is restored by a drop guard,
//! so it comes back on every exit path: success, failure, panic, or the
//! submit future being dropped mid-flight.

use std::cell::Cell;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::form::FormState;
use crate::nav::PageId;
use crate::render::ResultView;
use crate::text;
use crate::transport::{PredictionClient, PredictionTransport};

/// Submit lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Loading,
    /// Looks like `Idle` plus a visible error message.
    Error,
}

/// Presentation of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControlView {
    pub disabled: bool,
    pub label: &'static str,
    pub icon_visible: bool,
    pub spinner_visible: bool,
}

impl SubmitControlView {
    pub const IDLE: Self = Self {
        disabled: false,
        label: text::SUBMIT_IDLE,
        icon_visible: true,
        spinner_visible: false,
    };

    pub const LOADING: Self = Self {
        disabled: true,
        label: text::SUBMIT_LOADING,
        icon_visible: false,
        spinner_visible: true,
    };
}

/// DOM effects of a submit.
pub trait DiagnosisSurface {
    fn set_submit_control(&mut self, view: &SubmitControlView);
    /// Replace the form's error text; empty clears it.
    fn set_error_text(&mut self, text: &str);
    fn render_result(&mut self, view: &ResultView);
    /// Hand over to the navigator.
    fn show_page(&mut self, page: &PageId);
}

/// How a submit attempt ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Result rendered and the result page shown.
    Shown(Box<ResultView>),
    /// Error text shown; no navigation happened.
    Failed(Error),
    /// A previous submit is still in flight; nothing was sent.
    Busy,
}

impl SubmitOutcome {
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        matches!(self, Self::Shown(_))
    }
}

/// Restores the idle control on drop. The body of a submit works through
/// this guard so it cannot forget the restoration.
struct BusyGuard<'a, S: DiagnosisSurface> {
    surface: &'a mut S,
    state: &'a Cell<SubmitState>,
    settled: SubmitState,
}

impl<'a, S: DiagnosisSurface> BusyGuard<'a, S> {
    fn enter(surface: &'a mut S, state: &'a Cell<SubmitState>) -> Self {
        state.set(SubmitState::Loading);
        surface.set_submit_control(&SubmitControlView::LOADING);
        surface.set_error_text("");
        Self {
            surface,
            state,
            settled: SubmitState::Idle,
        }
    }
}

impl<S: DiagnosisSurface> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_submit_control(&SubmitControlView::IDLE);
        self.state.set(self.settled);
    }
}

/// Owns the submit state and the backend client.
pub struct DiagnosisFlow<T> {
    client: PredictionClient<T>,
    result_page: PageId,
    fill_delay_ms: u32,
    state: Cell<SubmitState>,
}

impl<T: PredictionTransport> DiagnosisFlow<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            client: PredictionClient::new(transport, config),
            result_page: PageId::new(config.result_page.as_str()),
            fill_delay_ms: config.progress_fill_delay_ms,
            state: Cell::new(SubmitState::Idle),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state.get()
    }

    pub const fn client(&self) -> &PredictionClient<T> {
        &self.client
    }

    /// Run one submit attempt end to end.
    pub async fn submit<S: DiagnosisSurface>(
        &self,
        form: &FormState,
        surface: &mut S,
    ) -> SubmitOutcome {
        if self.state.get() == SubmitState::Loading {
            tracing::debug!("submit ignored; prediction already in flight");
            return SubmitOutcome::Busy;
        }

        let features = form.to_features();
        let mut guard = BusyGuard::enter(surface, &self.state);
        tracing::info!(
            age = features.age,
            gender = features.gender,
            fever = features.fever,
            "submitting symptoms for prediction"
        );

        match self.client.predict(&features).await {
            Ok(result) => {
                let view = ResultView::from_result(&result, self.fill_delay_ms);
                tracing::info!(
                    severity = ?view.tier,
                    probability = result.probability,
                    "prediction received"
                );
                guard.surface.render_result(&view);
                guard.surface.show_page(&self.result_page);
                SubmitOutcome::Shown(Box::new(view))
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    error_type = err.error_type(),
                    "prediction failed"
                );
                guard.surface.set_error_text(&err.user_message());
                guard.settled = SubmitState::Error;
                SubmitOutcome::Failed(err)
            }
        }
    }
}
