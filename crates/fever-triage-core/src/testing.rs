//! In-memory doubles for the DOM and network seams.
//!
//! Used by unit tests, the integration suite, and the native build of the
//! browser crate.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::future::Future;

use crate::error::{Error, Result};
use crate::flow::{DiagnosisSurface, SubmitControlView};
use crate::nav::{Navigator, PageId, PageShell};
use crate::render::ResultView;
use crate::transport::{HttpReply, PredictionTransport};

// ─── Page shell ──────────────────────────────────────────────────────────────

/// Records every navigation effect and keeps the resulting visibility map.
#[derive(Debug, Clone, Default)]
pub struct RecordingShell {
    order: Vec<PageId>,
    visible: HashMap<PageId, bool>,
    nav_links: BTreeSet<String>,
    highlighted: BTreeSet<String>,
    /// Every fragment pushed, oldest first.
    pub fragments: Vec<String>,
    pub entrances: Vec<(PageId, u32)>,
    pub scrolls: usize,
}

impl RecordingShell {
    /// A shell with one section and one nav control per page, all hidden.
    #[must_use]
    pub fn new(sections: &[PageId]) -> Self {
        Self {
            order: sections.to_vec(),
            visible: sections.iter().map(|p| (p.clone(), false)).collect(),
            nav_links: sections.iter().map(|p| p.as_str().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Sections currently visible, in declaration order.
    #[must_use]
    pub fn visible_sections(&self) -> Vec<PageId> {
        self.order
            .iter()
            .filter(|page| self.visible.get(*page).copied().unwrap_or(false))
            .cloned()
            .collect()
    }

    /// Nav controls currently bearing the active marker.
    #[must_use]
    pub fn highlighted(&self) -> Vec<PageId> {
        self.highlighted.iter().map(PageId::new).collect()
    }

    /// Current fragment identifier, empty before any navigation.
    #[must_use]
    pub fn fragment(&self) -> &str {
        self.fragments.last().map_or("", String::as_str)
    }
}

impl PageShell for RecordingShell {
    fn push_fragment(&mut self, page: &PageId) {
        self.fragments.push(page.fragment());
    }

    fn set_section_visible(&mut self, page: &PageId, visible: bool) {
        if let Some(slot) = self.visible.get_mut(page) {
            *slot = visible;
        }
    }

    fn play_entrance(&mut self, page: &PageId, delay_ms: u32) {
        self.entrances.push((page.clone(), delay_ms));
    }

    fn clear_nav_highlight(&mut self) {
        self.highlighted.clear();
    }

    fn highlight_nav(&mut self, page: &PageId) {
        if self.nav_links.contains(page.as_str()) {
            self.highlighted.insert(page.as_str().to_string());
        }
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }
}

// ─── Diagnosis surface ───────────────────────────────────────────────────────

/// Records submit effects. When built with a navigator, `show_page` drives
/// it against the embedded [`RecordingShell`].
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub controls: Vec<SubmitControlView>,
    pub errors: Vec<String>,
    pub results: Vec<ResultView>,
    pub pages: Vec<PageId>,
    pub navigator: Option<Navigator>,
    pub shell: RecordingShell,
}

impl RecordingSurface {
    #[must_use]
    pub fn with_navigator(navigator: Navigator) -> Self {
        let shell = RecordingShell::new(navigator.sections());
        Self {
            navigator: Some(navigator),
            shell,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.errors.last().map(String::as_str)
    }

    #[must_use]
    pub fn last_control(&self) -> Option<&SubmitControlView> {
        self.controls.last()
    }
}

impl DiagnosisSurface for RecordingSurface {
    fn set_submit_control(&mut self, view: &SubmitControlView) {
        self.controls.push(*view);
    }

    fn set_error_text(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn render_result(&mut self, view: &ResultView) {
        self.results.push(view.clone());
    }

    fn show_page(&mut self, page: &PageId) {
        self.pages.push(page.clone());
        if let Some(navigator) = self.navigator.as_mut() {
            navigator.navigate(page, &mut self.shell);
        }
    }
}

// ─── Transport ───────────────────────────────────────────────────────────────

/// A request seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: String,
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(HttpReply),
    Fail(String),
    Timeout(u64),
    Pending,
}

/// Answers requests from a queue, in order. An exhausted queue answers with
/// a network error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn reply(self, reply: HttpReply) -> Self {
        self.script.borrow_mut().push_back(Scripted::Reply(reply));
        self
    }

    /// Queue a network-level failure.
    #[must_use]
    pub fn fail(self, reason: &str) -> Self {
        self.script
            .borrow_mut()
            .push_back(Scripted::Fail(reason.to_string()));
        self
    }

    #[must_use]
    pub fn time_out(self, after_ms: u64) -> Self {
        self.script.borrow_mut().push_back(Scripted::Timeout(after_ms));
        self
    }

    /// Queue a request that never completes.
    #[must_use]
    pub fn pending(self) -> Self {
        self.script.borrow_mut().push_back(Scripted::Pending);
        self
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    fn next(&self, method: &'static str, url: &str, body: String) -> Option<Scripted> {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            url: url.to_string(),
            body,
        });
        self.script.borrow_mut().pop_front()
    }
}

async fn play(step: Option<Scripted>) -> Result<HttpReply> {
    match step {
        Some(Scripted::Reply(reply)) => Ok(reply),
        Some(Scripted::Fail(reason)) => Err(Error::Network(reason)),
        Some(Scripted::Timeout(ms)) => Err(Error::Timeout(ms)),
        Some(Scripted::Pending) => std::future::pending().await,
        None => Err(Error::Network("no scripted reply".into())),
    }
}

impl PredictionTransport for ScriptedTransport {
    fn post_json(&self, url: &str, body: String) -> impl Future<Output = Result<HttpReply>> {
        play(self.next("POST", url, body))
    }

    fn get(&self, url: &str) -> impl Future<Output = Result<HttpReply>> {
        play(self.next("GET", url, String::new()))
    }
}
