//! `fetch`-backed transport with a bounded timeout.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use fever_triage_core::{HttpReply, PredictionTransport, TriageError, TriageResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response, Window};

/// Browser `fetch` transport. Requests exceeding `timeout_ms` are aborted and
/// reported as [`TriageError::Timeout`].
#[derive(Debug, Clone, Copy)]
pub struct FetchTransport {
    timeout_ms: u64,
}

impl FetchTransport {
    #[must_use]
    pub const fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    async fn send(&self, method: &str, url: &str, body: Option<String>) -> TriageResult<HttpReply> {
        let window = web_sys::window().ok_or_else(|| TriageError::Dom("No window".into()))?;
        let controller = AbortController::new().map_err(network_error)?;

        let init = RequestInit::new();
        init.set_method(method);
        init.set_signal(Some(&controller.signal()));
        if let Some(body) = body {
            let headers = Headers::new().map_err(network_error)?;
            headers
                .set("Content-Type", "application/json")
                .map_err(network_error)?;
            init.set_headers(&headers);
            init.set_body(&JsValue::from_str(&body));
        }
        let request = Request::new_with_str_and_init(url, &init).map_err(network_error)?;

        let timer = AbortTimer::arm(&window, &controller, self.timeout_ms)?;
        let outcome = async {
            let response: Response = JsFuture::from(window.fetch_with_request(&request))
                .await
                .map_err(network_error)?
                .dyn_into()
                .map_err(|_| TriageError::Network("fetch did not yield a Response".into()))?;
            let status = response.status();
            let text = JsFuture::from(response.text().map_err(network_error)?)
                .await
                .map_err(network_error)?;
            Ok::<_, TriageError>(HttpReply::new(status, text.as_string().unwrap_or_default()))
        }
        .await;

        match outcome {
            Err(_) if timer.fired() => Err(TriageError::Timeout(self.timeout_ms)),
            other => other,
        }
    }
}

impl PredictionTransport for FetchTransport {
    fn post_json(&self, url: &str, body: String) -> impl Future<Output = TriageResult<HttpReply>> {
        self.send("POST", url, Some(body))
    }

    fn get(&self, url: &str) -> impl Future<Output = TriageResult<HttpReply>> {
        self.send("GET", url, None)
    }
}

/// Aborts the request when it fires; cleared on drop.
struct AbortTimer {
    window: Window,
    handle: i32,
    fired: Rc<Cell<bool>>,
    _callback: Closure<dyn FnMut()>,
}

impl AbortTimer {
    fn arm(window: &Window, controller: &AbortController, timeout_ms: u64) -> TriageResult<Self> {
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let controller = controller.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            flag.set(true);
            controller.abort();
        });
        let delay = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            )
            .map_err(network_error)?;
        Ok(Self {
            window: window.clone(),
            handle,
            fired,
            _callback: callback,
        })
    }

    fn fired(&self) -> bool {
        self.fired.get()
    }
}

impl Drop for AbortTimer {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}

fn network_error(err: JsValue) -> TriageError {
    TriageError::Network(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
