//! `web-sys` implementations of the core DOM seams.

use std::cell::RefCell;
use std::rc::Rc;

use fever_triage_core::{
    DiagnosisSurface, Navigator, PageId, PageShell, ResultView, SubmitControlView, TriageError,
    TriageResult,
};
use fever_triage_core::render::{BreakdownRow, LabeledText};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, ScrollBehavior, ScrollToOptions, Window,
};

use crate::dom;

// ──────────────────────────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────────────────────────

/// Every element matching `selector`, in document order.
pub fn select_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        tracing::warn!(selector, "invalid selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    let Some(element) = document.get_element_by_id(id) else {
        tracing::debug!(id, "element missing from page");
        return None;
    };
    element.dyn_into::<HtmlElement>().ok()
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if element.style().set_property(property, value).is_err() {
        tracing::warn!(property, value, "failed to set style");
    }
}

fn add_class(element: &Element, class: &str) {
    if element.class_list().add_1(class).is_err() {
        tracing::warn!(class, "failed to add class");
    }
}

fn remove_class(element: &Element, class: &str) {
    if element.class_list().remove_1(class).is_err() {
        tracing::warn!(class, "failed to remove class");
    }
}

fn set_attr(element: &Element, name: &str, value: &str) {
    if element.set_attribute(name, value).is_err() {
        tracing::warn!(name, "failed to set attribute");
    }
}

fn set_display(element: Option<&HtmlElement>, value: &str) {
    if let Some(element) = element {
        set_style(element, "display", value);
    }
}

/// Run `f` once after `delay_ms`. Fire-and-forget.
pub fn after(window: &Window, delay_ms: u32, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        .is_err()
    {
        tracing::warn!(delay_ms, "failed to schedule timer");
    }
}

fn element(document: &Document, tag: &str) -> TriageResult<Element> {
    document
        .create_element(tag)
        .map_err(|_| TriageError::Dom(format!("Failed to create <{tag}>")))
}

fn append(parent: &Element, child: &Element) {
    if parent.append_child(child).is_err() {
        tracing::warn!("failed to append child element");
    }
}

/// `<strong>label</strong> text`, replacing the target's content.
fn write_labeled(document: &Document, target: &HtmlElement, content: &LabeledText) {
    target.set_text_content(None);
    let Ok(strong) = element(document, "strong") else {
        target.set_text_content(Some(&format!("{} {}", content.label, content.text)));
        return;
    };
    strong.set_text_content(Some(&content.label));
    append(target, &strong);
    let tail = document.create_text_node(&format!(" {}", content.text));
    if target.append_child(&tail).is_err() {
        tracing::warn!("failed to append text");
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Page shell
// ──────────────────────────────────────────────────────────────────────────────

/// Page sections and nav controls of the live document.
#[derive(Clone)]
pub struct DomShell {
    window: Window,
    document: Document,
}

impl DomShell {
    pub fn new() -> TriageResult<Self> {
        let window = web_sys::window().ok_or_else(|| TriageError::Dom("No window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| TriageError::Dom("No document".into()))?;
        Ok(Self { window, document })
    }

    pub const fn window(&self) -> &Window {
        &self.window
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Ids of the `.page-section` elements present in the document.
    pub fn declared_sections(&self) -> Vec<PageId> {
        select_all(&self.document, dom::PAGE_SECTION_SELECTOR)
            .into_iter()
            .map(|section| section.id())
            .filter(|id| !id.is_empty())
            .map(PageId::new)
            .collect()
    }

    /// Current fragment identifier including `#`, or empty.
    pub fn current_fragment(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn section(&self, page: &PageId) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(page.as_str())?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl PageShell for DomShell {
    fn push_fragment(&mut self, page: &PageId) {
        let fragment = page.fragment();
        // Back/forward already moved the address bar; pushing again would
        // discard the forward history.
        if self.current_fragment() == fragment {
            return;
        }
        let pushed = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&fragment)));
        if pushed.is_err() {
            tracing::warn!(%page, "failed to push history state");
        }
    }

    fn set_section_visible(&mut self, page: &PageId, visible: bool) {
        let Some(section) = self.section(page) else {
            return;
        };
        if visible {
            set_style(&section, "display", "block");
        } else {
            remove_class(&section, dom::ACTIVE_PAGE_CLASS);
            set_style(&section, "display", "none");
        }
    }

    fn play_entrance(&mut self, page: &PageId, delay_ms: u32) {
        let Some(section) = self.section(page) else {
            return;
        };
        after(&self.window, delay_ms, move || {
            add_class(&section, dom::ACTIVE_PAGE_CLASS);
        });
    }

    fn clear_nav_highlight(&mut self) {
        for link in select_all(&self.document, dom::NAV_LINK_SELECTOR) {
            remove_class(&link, dom::ACTIVE_LINK_CLASS);
        }
    }

    fn highlight_nav(&mut self, page: &PageId) {
        if let Ok(Some(link)) = self.document.query_selector(&dom::nav_link_for(page.as_str())) {
            add_class(&link, dom::ACTIVE_LINK_CLASS);
        }
    }

    fn scroll_to_top(&mut self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Diagnosis surface
// ──────────────────────────────────────────────────────────────────────────────

/// Form and result elements touched by a submit.
#[derive(Clone)]
pub struct DomSurface {
    shell: DomShell,
    navigator: Rc<RefCell<Navigator>>,
    submit_button: HtmlButtonElement,
    submit_label: Option<Element>,
    submit_icon: Option<HtmlElement>,
    spinner: Option<HtmlElement>,
    error: Option<HtmlElement>,
    result_card: Option<HtmlElement>,
    result_icon: Option<HtmlElement>,
    result_title: Option<HtmlElement>,
    fill: Option<HtmlElement>,
    fill_text: Option<HtmlElement>,
    message: Option<HtmlElement>,
    actions: Option<HtmlElement>,
    breakdown_card: Option<HtmlElement>,
    breakdown_list: Option<HtmlElement>,
    advice_container: Option<HtmlElement>,
    advice_text: Option<HtmlElement>,
}

impl DomSurface {
    /// Look up every target once. Only the submit button is mandatory.
    pub fn bind(shell: DomShell, navigator: Rc<RefCell<Navigator>>) -> TriageResult<Self> {
        let document = shell.document().clone();
        let submit_button: HtmlButtonElement = document
            .get_element_by_id(dom::SUBMIT_BUTTON_ID)
            .ok_or_else(|| TriageError::Dom("Submit button not found".into()))?
            .dyn_into()
            .map_err(|_| TriageError::Dom("Submit control is not a button".into()))?;
        let submit_label = submit_button
            .query_selector(dom::SUBMIT_LABEL_SELECTOR)
            .ok()
            .flatten();
        let submit_icon = submit_button
            .query_selector(dom::SUBMIT_ICON_SELECTOR)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into().ok());
        let spinner = document
            .query_selector(dom::SPINNER_SELECTOR)
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into().ok());

        Ok(Self {
            submit_button,
            submit_label,
            submit_icon,
            spinner,
            error: by_id(&document, dom::ERROR_ID),
            result_card: by_id(&document, dom::RESULT_CARD_ID),
            result_icon: by_id(&document, dom::RESULT_ICON_ID),
            result_title: by_id(&document, dom::RESULT_TITLE_ID),
            fill: by_id(&document, dom::PROBABILITY_FILL_ID),
            fill_text: by_id(&document, dom::PROBABILITY_TEXT_ID),
            message: by_id(&document, dom::RESULT_MESSAGE_ID),
            actions: by_id(&document, dom::RESULT_ACTIONS_ID),
            breakdown_card: by_id(&document, dom::BREAKDOWN_CARD_ID),
            breakdown_list: by_id(&document, dom::BREAKDOWN_LIST_ID),
            advice_container: by_id(&document, dom::ADVICE_CONTAINER_ID),
            advice_text: by_id(&document, dom::ADVICE_TEXT_ID),
            shell,
            navigator,
        })
    }

    fn render_tier(&self, view: &ResultView) {
        if let Some(icon) = &self.result_icon {
            icon.set_class_name(dom::RESULT_ICON_BASE_CLASS);
            add_class(icon, view.badge_class);
            if let Ok(Some(glyph)) = icon.query_selector("i") {
                glyph.set_class_name(view.icon_class);
            }
        }
        if let Some(title) = &self.result_title {
            title.set_text_content(Some(view.title));
            set_style(title, "color", view.title_tone.css_var());
        }
    }

    fn render_progress(&self, view: &ResultView) {
        if let Some(text) = &self.fill_text {
            text.set_text_content(Some(&view.progress.label));
        }
        if let Some(fill) = self.fill.clone() {
            let width = view.progress.width.clone();
            let color = view.progress.tone.css_var();
            after(self.shell.window(), view.progress.delay_ms, move || {
                set_style(&fill, "width", &width);
                set_style(&fill, "background", color);
            });
        }
    }

    /// Replaces the previous rows; `None` hides the card.
    fn render_breakdown(&self, rows: Option<&[BreakdownRow]>) {
        let (Some(card), Some(list)) = (&self.breakdown_card, &self.breakdown_list) else {
            return;
        };
        list.set_text_content(None);
        let Some(rows) = rows else {
            set_style(card, "display", "none");
            return;
        };
        set_style(card, "display", "block");
        let document = self.shell.document();
        let last = rows.len().saturating_sub(1);
        for (idx, row) in rows.iter().enumerate() {
            if let Err(err) = append_breakdown_row(document, list, row, idx == last) {
                tracing::warn!(error = %err, "failed to render breakdown row");
            }
        }
    }
}

fn append_breakdown_row(
    document: &Document,
    list: &HtmlElement,
    row: &BreakdownRow,
    last: bool,
) -> TriageResult<()> {
    let header = element(document, "div")?;
    set_attr(
        &header,
        "style",
        "display: flex; justify-content: space-between; align-items: center; margin-bottom: 0.5rem;",
    );
    let label = element(document, "span")?;
    label.set_text_content(Some(row.label));
    let value = element(document, "strong")?;
    value.set_text_content(Some(&row.value));
    append(&header, &label);
    append(&header, &value);

    let bar = element(document, "div")?;
    bar.set_class_name("progress-bar");
    let bar_style = if last {
        "height: 8px;"
    } else {
        "height: 8px; margin-bottom: 1rem;"
    };
    set_attr(&bar, "style", bar_style);
    let fill = element(document, "div")?;
    fill.set_class_name("progress-fill");
    set_attr(
        &fill,
        "style",
        &format!("width: {}; background: {};", row.value, row.tone.css_var()),
    );
    append(&bar, &fill);

    append(list, &header);
    append(list, &bar);
    Ok(())
}

impl DiagnosisSurface for DomSurface {
    fn set_submit_control(&mut self, view: &SubmitControlView) {
        self.submit_button.set_disabled(view.disabled);
        if let Some(label) = &self.submit_label {
            label.set_text_content(Some(view.label));
        }
        set_display(
            self.submit_icon.as_ref(),
            if view.icon_visible { "inline-block" } else { "none" },
        );
        set_display(
            self.spinner.as_ref(),
            if view.spinner_visible { "inline-block" } else { "none" },
        );
    }

    fn set_error_text(&mut self, text: &str) {
        if let Some(error) = &self.error {
            error.set_text_content(Some(text));
        }
    }

    fn render_result(&mut self, view: &ResultView) {
        set_display(self.result_card.as_ref(), "block");
        set_display(self.actions.as_ref(), "flex");
        self.render_tier(view);
        self.render_progress(view);
        let document = self.shell.document();
        if let Some(message) = &self.message {
            write_labeled(document, message, &view.message);
        }
        self.render_breakdown(view.breakdown.as_deref());
        set_display(self.advice_container.as_ref(), "block");
        if let Some(advice) = &self.advice_text {
            write_labeled(document, advice, &view.advice);
        }
    }

    fn show_page(&mut self, page: &PageId) {
        match self.navigator.try_borrow_mut() {
            Ok(mut navigator) => {
                navigator.navigate(page, &mut self.shell);
            }
            Err(_) => tracing::warn!(%page, "navigator busy; result page not shown"),
        }
    }
}
