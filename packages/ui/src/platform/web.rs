//! Browser adapters over `web-sys`.

use super::{Dom, KeyValueStore, Navigator, Selector};
use crate::banner::{BannerKind, CLOSE_BUTTON_CLASS, DISMISS_ATTR};
use crate::i18n::TranslationTable;
use api::types::{FilePart, MultipartForm};
use async_trait::async_trait;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, File, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    Storage,
};

const TABLE_SCRIPT_ID: &str = "i18n-table";

#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    /// The page-supplied table from `<script id="i18n-table">`, else the built-in one.
    pub fn translation_table(&self) -> TranslationTable {
        let Some(json) = self
            .document
            .get_element_by_id(TABLE_SCRIPT_ID)
            .and_then(|el| el.text_content())
        else {
            return TranslationTable::builtin();
        };
        match TranslationTable::from_json(&json) {
            Ok(table) => {
                let mut codes: Vec<&str> = table.codes().collect();
                codes.sort_unstable();
                tracing::debug!("platform.translation_table: page table codes={codes:?}");
                table
            }
            Err(e) => {
                tracing::warn!("platform.translation_table: invalid page table: {e}");
                TranslationTable::builtin()
            }
        }
    }

    fn collect(list: web_sys::NodeList) -> Vec<Element> {
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

fn chosen_file(input: &Element) -> Option<File> {
    input
        .dyn_ref::<HtmlInputElement>()?
        .files()?
        .get(0)
}

#[async_trait(?Send)]
impl Dom for WebDom {
    type Element = Element;

    fn query_all(&self, selector: Selector<'_>) -> Vec<Element> {
        match self.document.query_selector_all(&selector.to_css()) {
            Ok(list) => Self::collect(list),
            Err(e) => {
                tracing::warn!("platform.query_all: selector={selector:?} err={e:?}");
                Vec::new()
            }
        }
    }

    fn query_within(&self, root: &Element, selector: Selector<'_>) -> Option<Element> {
        root.query_selector(&selector.to_css()).ok().flatten()
    }

    fn closest(&self, element: &Element, selector: Selector<'_>) -> Option<Element> {
        element.closest(&selector.to_css()).ok().flatten()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        if let Err(e) = element.set_attribute(name, value) {
            tracing::warn!("platform.set_attribute: name={name} err={e:?}");
        }
    }

    fn text(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn inner_html(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn is_disabled(&self, element: &Element) -> bool {
        element.has_attribute("disabled")
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        if disabled {
            let _ = element.set_attribute("disabled", "");
        } else {
            let _ = element.remove_attribute("disabled");
        }
    }

    fn value(&self, element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, element: &Element, value: &str) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn selected_file_name(&self, input: &Element) -> Option<String> {
        chosen_file(input).map(|file| file.name())
    }

    fn on_input(&self, element: &Element, handler: Box<dyn Fn(String)>) {
        let dom = self.clone();
        let target = element.clone();
        let closure = Closure::<dyn Fn(Event)>::new(move |_evt: Event| {
            handler(dom.value(&target));
        });
        if let Err(e) =
            element.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())
        {
            tracing::warn!("platform.on_input: err={e:?}");
        }
        // Listeners live as long as the page.
        closure.forget();
    }

    fn prepend_banner(&self, container: &Element, kind: BannerKind, message: &str) {
        let build = || -> Result<Element, wasm_bindgen::JsValue> {
            let alert = self.document.create_element("div")?;
            alert.set_class_name(kind.class_list());
            alert.set_attribute("role", "alert")?;
            alert.set_attribute("data-banner", kind.as_str())?;

            let text = self.document.create_element("span")?;
            text.set_text_content(Some(message));
            alert.append_child(&text)?;

            let close = self.document.create_element("button")?;
            close.set_attribute("type", "button")?;
            close.set_class_name(CLOSE_BUTTON_CLASS);
            close.set_attribute(DISMISS_ATTR, "alert")?;
            close.set_attribute("aria-label", "Close")?;
            let target = alert.clone();
            let on_close = Closure::<dyn Fn(Event)>::new(move |_evt: Event| target.remove());
            close.add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
            on_close.forget();
            alert.append_child(&close)?;
            Ok(alert)
        };

        match build().and_then(|alert| container.prepend_with_node_1(&alert)) {
            Ok(()) => {}
            Err(e) => tracing::warn!("platform.prepend_banner: kind={} err={e:?}", kind.as_str()),
        }
    }

    async fn form_payload(&self, form: &Element) -> MultipartForm {
        let mut payload = MultipartForm::new();
        let controls = form
            .query_selector_all("input[name], select[name], textarea[name]")
            .map(Self::collect)
            .unwrap_or_default();

        for control in controls {
            let name = control.get_attribute("name").unwrap_or_default();
            if name.is_empty() || control.has_attribute("disabled") {
                continue;
            }
            let Some(input) = control.dyn_ref::<HtmlInputElement>() else {
                payload.text(name, self.value(&control));
                continue;
            };
            match input.type_().as_str() {
                "file" => {
                    let Some(file) = chosen_file(&control) else {
                        continue;
                    };
                    match JsFuture::from(file.array_buffer()).await {
                        Ok(buffer) => {
                            let content_type = file.type_();
                            payload.file(FilePart {
                                field: name,
                                file_name: file.name(),
                                content_type: (!content_type.is_empty()).then_some(content_type),
                                bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
                            });
                        }
                        Err(e) => tracing::warn!("platform.form_payload: read {name} failed: {e:?}"),
                    }
                }
                "checkbox" | "radio" => {
                    if input.checked() {
                        payload.text(name, input.value());
                    }
                }
                "button" | "submit" | "reset" | "image" => {}
                _ => {
                    payload.text(name, input.value());
                }
            }
        }
        payload
    }
}

/// `window.localStorage`; storage failures (private mode, quota) are logged.
#[derive(Debug, Clone)]
pub struct WebStorage {
    storage: Option<Storage>,
}

impl WebStorage {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            tracing::warn!("platform.storage: localStorage unavailable");
        }
        Self { storage }
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::warn!("platform.storage: set key={key} failed: {e:?}");
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WebNavigator;

impl WebNavigator {
    /// `window.location.origin`, used as the API base URL.
    pub fn origin() -> Option<String> {
        web_sys::window()?.location().origin().ok()
    }
}

impl Navigator for WebNavigator {
    fn reload(&self) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                tracing::warn!("platform.navigator: reload failed: {e:?}");
            }
        }
    }

    fn assign(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().assign(url) {
                tracing::warn!("platform.navigator: assign url={url} failed: {e:?}");
            }
        }
    }
}
