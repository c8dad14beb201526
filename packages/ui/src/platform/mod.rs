//! Capabilities the controllers need from the host page.
//!
//! The browser implementations live in `web` (wasm only). `memory` holds the
//! element tree non-browser builds render against; its storage, navigation
//! and event-simulation doubles are only built for tests or `test-utils`.

use crate::banner::BannerKind;
use api::types::MultipartForm;
use async_trait::async_trait;

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// DOM implementation the app is compiled against.
#[cfg(target_arch = "wasm32")]
pub type HostDom = web::WebDom;
#[cfg(not(target_arch = "wasm32"))]
pub type HostDom = memory::MemoryDom;

/// The handful of selector shapes the page contract uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Id(&'a str),
    Class(&'a str),
    /// Elements carrying the attribute, whatever its value.
    Attr(&'a str),
    AttrEq(&'a str, &'a str),
    /// `input[name=...]`
    InputNamed(&'a str),
}

impl Selector<'_> {
    pub fn to_css(&self) -> String {
        match self {
            Selector::Id(id) => format!(r#"[id="{}"]"#, css_escape(id)),
            Selector::Class(class) => format!(".{class}"),
            Selector::Attr(name) => format!("[{name}]"),
            Selector::AttrEq(name, value) => format!(r#"[{name}="{}"]"#, css_escape(value)),
            Selector::InputNamed(name) => format!(r#"input[name="{}"]"#, css_escape(name)),
        }
    }
}

fn css_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Element-level operations over the page. Handles are cheap clones.
#[async_trait(?Send)]
pub trait Dom: Clone + 'static {
    type Element: Clone + 'static;

    fn query_all(&self, selector: Selector<'_>) -> Vec<Self::Element>;

    fn query(&self, selector: Selector<'_>) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    /// First descendant of `root` matching `selector`.
    fn query_within(&self, root: &Self::Element, selector: Selector<'_>) -> Option<Self::Element>;

    /// `element` itself or its nearest ancestor matching `selector`.
    fn closest(&self, element: &Self::Element, selector: Selector<'_>) -> Option<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    fn text(&self, element: &Self::Element) -> String;
    fn set_text(&self, element: &Self::Element, text: &str);
    fn inner_html(&self, element: &Self::Element) -> String;
    fn set_inner_html(&self, element: &Self::Element, html: &str);

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);

    fn is_disabled(&self, element: &Self::Element) -> bool;
    fn set_disabled(&self, element: &Self::Element, disabled: bool);

    /// Current value of a form control.
    fn value(&self, element: &Self::Element) -> String;
    fn set_value(&self, element: &Self::Element, value: &str);

    /// Name of the first file chosen in a file input.
    fn selected_file_name(&self, input: &Self::Element) -> Option<String>;

    /// Call `handler` with the control's value on every `input` event.
    fn on_input(&self, element: &Self::Element, handler: Box<dyn Fn(String)>);

    /// Insert a dismissible banner as the first child of `container`.
    fn prepend_banner(&self, container: &Self::Element, kind: BannerKind, message: &str);

    /// Successful controls of a form, as a browser `FormData` would collect them.
    async fn form_payload(&self, form: &Self::Element) -> MultipartForm;
}

/// Persistent string storage (the browser's `localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Whole-page navigation.
pub trait Navigator {
    fn reload(&self);
    fn assign(&self, url: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_render_as_css() {
        assert_eq!(Selector::Id("filePreview").to_css(), r#"[id="filePreview"]"#);
        assert_eq!(Selector::Class("language-item").to_css(), ".language-item");
        assert_eq!(Selector::Attr("data-i18n").to_css(), "[data-i18n]");
        assert_eq!(
            Selector::AttrEq("data-lang", "zh_TW").to_css(),
            r#"[data-lang="zh_TW"]"#
        );
        assert_eq!(
            Selector::InputNamed("tempo").to_css(),
            r#"input[name="tempo"]"#
        );
        assert_eq!(Selector::Id(r#"a"b"#).to_css(), r#"[id="a\"b"]"#);
    }
}
