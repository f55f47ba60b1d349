//! Browser-backed implementations of the core theming seams.

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use gloo::utils::{document, document_element, head, window};
use twilight_core::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MediaQueryList, MediaQueryListEvent, StorageEvent};

fn js_error(err: wasm_bindgen::JsValue) -> String {
    format!("{:?}", err)
}

/// `window.localStorage`, holding raw `"light"`/`"dark"` strings so the
/// bootstrap script can read the same values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BrowserStore;

impl BrowserStore {
    fn storage() -> StoreResult<web_sys::Storage> {
        window()
            .local_storage()
            .map_err(|_| StoreError::Unavailable)?
            .ok_or(StoreError::Unavailable)
    }

    /// Calls `callback` with the new value whenever another tab writes `key`.
    pub fn subscribe(key: &str, callback: impl Fn(Option<String>) + 'static) -> EventListener {
        let key = key.to_string();
        EventListener::new(&window(), "storage", move |event| {
            let Some(event) = event.dyn_ref::<StorageEvent>() else {
                return;
            };
            // `key` is null when the whole storage was cleared
            match event.key() {
                Some(changed) if changed == key => callback(event.new_value()),
                None => callback(None),
                Some(_) => {}
            }
        })
    }
}

impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StoreError::Read(js_error(err)))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Write(js_error(err)))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| StoreError::Write(js_error(err)))
    }
}

/// `prefers-color-scheme`, read through `window.matchMedia`.
#[derive(Clone, Debug)]
pub struct MediaQuerySignal {
    query: Option<MediaQueryList>,
}

impl MediaQuerySignal {
    pub fn new() -> Self {
        let query = window()
            .match_media(PREFERS_DARK_QUERY)
            .ok()
            .flatten()
            // browsers that don't know the feature report it as "not all"
            .filter(|query| query.media() != "not all");
        if query.is_none() {
            log::debug!("system color scheme is not available");
        }
        Self { query }
    }

    /// Calls `callback` on every change of the system color scheme.
    pub fn subscribe(&self, callback: impl Fn(Option<Theme>) + 'static) -> Option<EventListener> {
        let query = self.query.as_ref()?;
        Some(EventListener::new(query, "change", move |event| {
            let theme = event
                .dyn_ref::<MediaQueryListEvent>()
                .map(|event| Theme::from_dark(event.matches()));
            log::debug!("system color scheme changed: {:?}", theme);
            callback(theme);
        }))
    }
}

impl Default for MediaQuerySignal {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemSignal for MediaQuerySignal {
    fn current(&self) -> Option<Theme> {
        self.query
            .as_ref()
            .map(|query| Theme::from_dark(query.matches()))
    }
}

/// `document.documentElement`.
#[derive(Clone, Debug)]
pub struct DocumentRoot {
    html: HtmlElement,
}

impl DocumentRoot {
    pub fn new() -> Result<Self, MarkerError> {
        document_element()
            .dyn_into::<HtmlElement>()
            .map(|html| Self { html })
            .map_err(|_| MarkerError::MissingRoot)
    }
}

impl RootMarker for DocumentRoot {
    fn add_class(&self, name: &str) -> Result<(), MarkerError> {
        self.html
            .class_list()
            .add_1(name)
            .map_err(|err| MarkerError::Dom(js_error(err)))
    }

    fn remove_class(&self, name: &str) -> Result<(), MarkerError> {
        self.html
            .class_list()
            .remove_1(name)
            .map_err(|err| MarkerError::Dom(js_error(err)))
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), MarkerError> {
        self.html
            .set_attribute(name, value)
            .map_err(|err| MarkerError::Dom(js_error(err)))
    }

    fn remove_attribute(&self, name: &str) -> Result<(), MarkerError> {
        self.html
            .remove_attribute(name)
            .map_err(|err| MarkerError::Dom(js_error(err)))
    }

    fn set_color_scheme(&self, scheme: &str) -> Result<(), MarkerError> {
        self.html
            .style()
            .set_property("color-scheme", scheme)
            .map_err(|err| MarkerError::Dom(js_error(err)))
    }
}

/// Disables CSS transitions until dropped, so a theme switch doesn't animate
/// every colored element on the page.
pub struct TransitionGuard {
    style: web_sys::Element,
}

impl TransitionGuard {
    pub fn install() -> Option<Self> {
        let style = document().create_element("style").ok()?;
        style.set_text_content(Some(RootApplier::NO_TRANSITIONS_CSS));
        head().append_child(&style).ok()?;
        Some(Self { style })
    }
}

impl Drop for TransitionGuard {
    fn drop(&mut self) {
        // force a style recalculation before the transitions come back
        let _ = window().get_computed_style(&document_element());
        let style = self.style.clone();
        let _ = Timeout::new(1, move || style.remove()).forget();
    }
}

/// Applies `theme` to the live document, logging instead of failing.
pub fn apply_to_document(applier: &RootApplier, theme: Theme) {
    let result = DocumentRoot::new().and_then(|root| applier.apply(theme, &root));
    if let Err(err) = result {
        log::error!("failed to apply theme: {}", err);
    }
}
