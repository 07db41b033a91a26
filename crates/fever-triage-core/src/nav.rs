//! Hash-based page navigation.
//!
//! The [`Navigator`] owns which page section is active. Every way of reaching
//! a page (nav click, fragment change, initial load, a finished prediction)
//! funnels into [`Navigator::navigate`], so the resulting view is identical
//! regardless of how it was requested.

use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// Identifier of one mutually exclusive page section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(String);

impl PageId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `#id`, as written into the address bar.
    #[must_use]
    pub fn fragment(&self) -> String {
        format!("#{}", self.0)
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// DOM effects the navigator needs. Implemented over `web-sys` in the
/// browser and by recording doubles in tests.
pub trait PageShell {
    /// Record `page` as the current fragment without reloading.
    fn push_fragment(&mut self, page: &PageId);
    fn set_section_visible(&mut self, page: &PageId, visible: bool);
    /// Apply the entrance animation class to a freshly shown section after
    /// `delay_ms`.
    fn play_entrance(&mut self, page: &PageId, delay_ms: u32);
    /// Remove the active marker from every nav control.
    fn clear_nav_highlight(&mut self);
    /// Mark the nav control(s) pointing at `page`, if any exist.
    fn highlight_nav(&mut self, page: &PageId);
    /// Smooth scroll to the top of the viewport.
    fn scroll_to_top(&mut self);
}

/// What a navigate call ended up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Shown(PageId),
    /// No declared section matches; every section is left hidden.
    UnknownPage(PageId),
}

/// Active-page state over a fixed set of declared sections.
#[derive(Debug, Clone)]
pub struct Navigator {
    sections: Vec<PageId>,
    default_page: PageId,
    active: Option<PageId>,
    entrance_delay_ms: u32,
}

impl Navigator {
    #[must_use]
    pub fn new(sections: Vec<PageId>, default_page: PageId, entrance_delay_ms: u32) -> Self {
        Self {
            sections,
            default_page,
            active: None,
            entrance_delay_ms,
        }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.pages.iter().map(PageId::new).collect(),
            PageId::new(config.default_page.as_str()),
            config.entrance_delay_ms,
        )
    }

    #[must_use]
    pub fn active(&self) -> Option<&PageId> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn sections(&self) -> &[PageId] {
        &self.sections
    }

    #[must_use]
    pub const fn default_page(&self) -> &PageId {
        &self.default_page
    }

    #[must_use]
    pub fn is_known(&self, page: &PageId) -> bool {
        self.sections.contains(page)
    }

    /// Map a fragment identifier (with or without the leading `#`) to a page;
    /// an empty fragment means the default page.
    #[must_use]
    pub fn resolve_fragment(&self, fragment: &str) -> PageId {
        let id = fragment.strip_prefix('#').unwrap_or(fragment);
        if id.is_empty() {
            self.default_page.clone()
        } else {
            PageId::new(id)
        }
    }

    /// Show `page` and hide everything else.
    pub fn navigate<S: PageShell>(&mut self, page: &PageId, shell: &mut S) -> NavOutcome {
        shell.push_fragment(page);

        for section in &self.sections {
            shell.set_section_visible(section, false);
        }
        shell.clear_nav_highlight();

        let outcome = if self.is_known(page) {
            shell.set_section_visible(page, true);
            shell.play_entrance(page, self.entrance_delay_ms);
            self.active = Some(page.clone());
            tracing::debug!(page = %page, "navigated");
            NavOutcome::Shown(page.clone())
        } else {
            self.active = None;
            tracing::warn!(page = %page, "navigate to unknown page; all sections hidden");
            NavOutcome::UnknownPage(page.clone())
        };

        shell.highlight_nav(page);
        shell.scroll_to_top();
        outcome
    }

    /// Back/forward or any other external fragment change.
    pub fn on_fragment_change<S: PageShell>(&mut self, fragment: &str, shell: &mut S) -> NavOutcome {
        let page = self.resolve_fragment(fragment);
        self.navigate(&page, shell)
    }

    /// Resolve the starting page from the fragment present at load time.
    pub fn on_initial_load<S: PageShell>(&mut self, fragment: &str, shell: &mut S) -> NavOutcome {
        self.on_fragment_change(fragment, shell)
    }

    /// A nav control was activated; `data_page` is its target attribute.
    /// Controls without a target fall back to the default page.
    pub fn on_nav_click<S: PageShell>(
        &mut self,
        data_page: Option<&str>,
        shell: &mut S,
    ) -> NavOutcome {
        let page = data_page.map_or_else(|| self.default_page.clone(), |id| self.resolve_fragment(id));
        self.navigate(&page, shell)
    }
}
