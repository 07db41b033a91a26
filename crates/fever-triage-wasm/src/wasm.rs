//! WASM-specific implementation using wasm-bindgen.
//!
//! This module provides the JavaScript-facing API and wires DOM events to the
//! core navigator and submit flow.

use std::cell::RefCell;
use std::rc::Rc;

use fever_triage_core::{
    ClientConfig, DiagnosisFlow, FormState, NavOutcome, Navigator, PageId, SubmitState,
    TriageError, form, menu,
};
use wasm_bindgen::prelude::*;
use web_sys::{Event, FormData, HtmlElement, HtmlFormElement, console};

use crate::dom;
use crate::fetch::FetchTransport;
use crate::logging;
use crate::shell::{DomShell, DomSurface, select_all};

// ──────────────────────────────────────────────────────────────────────────────
// Initialization
// ──────────────────────────────────────────────────────────────────────────────

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn wasm_init() {
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();

    console::debug_1(&"Fever triage WASM initialized".into());
}

fn to_js(err: &TriageError) -> JsValue {
    JsValue::from_str(&format!("{}: {err}", err.error_type()))
}

// ──────────────────────────────────────────────────────────────────────────────
// Main Application
// ──────────────────────────────────────────────────────────────────────────────

/// Shared by every event handler.
struct Runtime {
    config: ClientConfig,
    navigator: Rc<RefCell<Navigator>>,
    flow: DiagnosisFlow<FetchTransport>,
    shell: DomShell,
}

impl Runtime {
    fn with_navigator(
        &self,
        f: impl FnOnce(&mut Navigator, &mut DomShell) -> NavOutcome,
    ) -> Option<NavOutcome> {
        let mut shell = self.shell.clone();
        match self.navigator.try_borrow_mut() {
            Ok(mut navigator) => Some(f(&mut navigator, &mut shell)),
            Err(_) => {
                tracing::warn!("navigation re-entered; event dropped");
                None
            }
        }
    }
}

/// Fever triage client bound to the current document.
///
/// # Example
///
/// ```javascript
/// const app = FeverTriageApp.from_config('{"api_base": "http://localhost:5000"}');
/// app.mount();
/// ```
#[wasm_bindgen]
pub struct FeverTriageApp {
    runtime: Rc<Runtime>,
    mounted: bool,
}

#[wasm_bindgen]
impl FeverTriageApp {
    /// Create an app with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<FeverTriageApp, JsValue> {
        Self::build(ClientConfig::default())
    }

    /// Create with a JSON configuration object. Missing fields take defaults.
    #[wasm_bindgen]
    pub fn from_config(config_json: &str) -> Result<FeverTriageApp, JsValue> {
        let config = ClientConfig::from_json(config_json).map_err(|e| to_js(&e))?;
        Self::build(config)
    }

    fn build(mut config: ClientConfig) -> Result<Self, JsValue> {
        logging::init(config.log_level());
        let shell = DomShell::new().map_err(|e| to_js(&e))?;

        let declared = shell.declared_sections();
        if !declared.is_empty() {
            config.pages = declared.iter().map(|p| p.as_str().to_string()).collect();
        }
        config.validate().map_err(|e| to_js(&e))?;
        tracing::debug!(pages = ?config.pages, "page sections discovered");

        let navigator = Rc::new(RefCell::new(Navigator::from_config(&config)));
        let flow = DiagnosisFlow::new(FetchTransport::new(config.request_timeout_ms), &config);
        Ok(Self {
            runtime: Rc::new(Runtime {
                config,
                navigator,
                flow,
                shell,
            }),
            mounted: false,
        })
    }

    /// Attach every event handler and show the initial page. Idempotent.
    #[wasm_bindgen]
    pub fn mount(&mut self) -> Result<(), JsValue> {
        if self.mounted {
            return Ok(());
        }
        self.bind_fragment_changes()?;
        self.bind_nav_links()?;
        self.bind_mobile_menu()?;
        self.bind_form()?;

        let fragment = self.runtime.shell.current_fragment();
        self.runtime
            .with_navigator(|nav, shell| nav.on_initial_load(&fragment, shell));
        self.spawn_status_probe();

        self.mounted = true;
        tracing::info!("fever triage client mounted");
        Ok(())
    }

    fn bind_fragment_changes(&self) -> Result<(), JsValue> {
        let runtime = Rc::clone(&self.runtime);
        let onhashchange = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let fragment = runtime.shell.current_fragment();
            runtime.with_navigator(|nav, shell| nav.on_fragment_change(&fragment, shell));
        });
        self.runtime
            .shell
            .window()
            .add_event_listener_with_callback("hashchange", onhashchange.as_ref().unchecked_ref())?;
        onhashchange.forget();
        Ok(())
    }

    fn bind_nav_links(&self) -> Result<(), JsValue> {
        for link in select_all(self.runtime.shell.document(), dom::NAV_LINK_SELECTOR) {
            let runtime = Rc::clone(&self.runtime);
            let target = link.get_attribute(dom::NAV_TARGET_ATTR);
            let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                event.prevent_default();
                runtime.with_navigator(|nav, shell| nav.on_nav_click(target.as_deref(), shell));
            });
            link.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
            onclick.forget();
        }
        Ok(())
    }

    fn bind_mobile_menu(&self) -> Result<(), JsValue> {
        let document = self.runtime.shell.document();
        let button = document.query_selector(dom::MOBILE_MENU_BUTTON_SELECTOR)?;
        let links = document
            .query_selector(dom::NAV_LINKS_CONTAINER_SELECTOR)?
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let (Some(button), Some(links)) = (button, links) else {
            tracing::debug!("no mobile menu on this page");
            return Ok(());
        };

        let ontoggle = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let style = links.style();
            let current = style.get_property_value("display").unwrap_or_default();
            for (property, value) in menu::toggle(&current).styles() {
                if style.set_property(property, value).is_err() {
                    tracing::warn!(property, "failed to apply menu style");
                }
            }
        });
        button.add_event_listener_with_callback("click", ontoggle.as_ref().unchecked_ref())?;
        ontoggle.forget();
        Ok(())
    }

    fn bind_form(&self) -> Result<(), JsValue> {
        let document = self.runtime.shell.document();
        let Some(element) = document.get_element_by_id(dom::FORM_ID) else {
            tracing::debug!("no symptom form on this page");
            return Ok(());
        };
        let form: HtmlFormElement = element
            .dyn_into()
            .map_err(|_| JsValue::from_str("Symptom form is not a <form>"))?;
        let surface = DomSurface::bind(
            self.runtime.shell.clone(),
            Rc::clone(&self.runtime.navigator),
        )
        .map_err(|e| to_js(&e))?;

        let runtime = Rc::clone(&self.runtime);
        let target = form.clone();
        let onsubmit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let state = match read_form(&target) {
                Ok(state) => state,
                Err(err) => {
                    tracing::error!(error = ?err, "failed to read symptom form");
                    return;
                }
            };
            let runtime = Rc::clone(&runtime);
            let mut surface = surface.clone();
            wasm_bindgen_futures::spawn_local(async move {
                runtime.flow.submit(&state, &mut surface).await;
            });
        });
        form.add_event_listener_with_callback("submit", onsubmit.as_ref().unchecked_ref())?;
        onsubmit.forget();
        Ok(())
    }

    fn spawn_status_probe(&self) {
        let runtime = Rc::clone(&self.runtime);
        wasm_bindgen_futures::spawn_local(async move {
            match runtime.flow.client().status().await {
                Ok(status) if status.is_ready() => tracing::info!("prediction service ready"),
                Ok(status) => tracing::warn!(
                    status = %status.status,
                    model_loaded = status.model_loaded,
                    "prediction service not ready"
                ),
                Err(err) => tracing::warn!(error = %err, "prediction service unreachable"),
            }
        });
    }

    /// Navigate programmatically. Returns `false` for unknown pages.
    #[wasm_bindgen]
    pub fn navigate(&self, page: &str) -> bool {
        let page = PageId::new(page);
        matches!(
            self.runtime.with_navigator(|nav, shell| nav.navigate(&page, shell)),
            Some(NavOutcome::Shown(_))
        )
    }

    /// Query `GET /api/status`; resolves to `{status, model_loaded}`.
    #[wasm_bindgen]
    pub fn check_status(&self) -> js_sys::Promise {
        let runtime = Rc::clone(&self.runtime);
        wasm_bindgen_futures::future_to_promise(async move {
            let status = runtime
                .flow
                .client()
                .status()
                .await
                .map_err(|e| to_js(&e))?;
            serde_wasm_bindgen::to_value(&status)
                .map_err(|e| JsValue::from_str(&format!("Conversion error: {e}")))
        })
    }

    /// Currently displayed page, if any.
    #[wasm_bindgen(getter)]
    pub fn active_page(&self) -> Option<String> {
        self.runtime
            .navigator
            .try_borrow()
            .ok()
            .and_then(|nav| nav.active().map(|p| p.as_str().to_string()))
    }

    /// `idle`, `loading`, or `error`.
    #[wasm_bindgen(getter)]
    pub fn submit_state(&self) -> String {
        match self.runtime.flow.state() {
            SubmitState::Idle => "idle",
            SubmitState::Loading => "loading",
            SubmitState::Error => "error",
        }
        .to_string()
    }

    /// Effective configuration as JSON.
    #[wasm_bindgen(getter)]
    pub fn config(&self) -> String {
        serde_json::to_string(&self.runtime.config).unwrap_or_default()
    }
}

/// Snapshot the known form fields. `FormData::get` yields the first value.
fn read_form(element: &HtmlFormElement) -> Result<FormState, JsValue> {
    let data = FormData::new_with_form(element)?;
    let mut state = FormState::new();
    for name in form::field_names() {
        if let Some(value) = data.get(name).as_string() {
            state.set(name, &value);
        }
    }
    Ok(state)
}

// ──────────────────────────────────────────────────────────────────────────────
// Utility exports
// ──────────────────────────────────────────────────────────────────────────────

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Render a prediction payload into the view model without touching the DOM.
#[wasm_bindgen]
pub fn preview_result(json: &str) -> Result<JsValue, JsValue> {
    let view = crate::preview(json).map_err(|e| to_js(&e))?;
    serde_wasm_bindgen::to_value(&view)
        .map_err(|e| JsValue::from_str(&format!("Conversion error: {e}")))
}
