//! In-memory page for non-browser builds, plus storage and navigation
//! doubles for tests.

use super::{Dom, Selector};
#[cfg(any(test, feature = "test-utils"))]
use super::{KeyValueStore, Navigator};
use crate::banner::{BannerKind, CLOSE_BUTTON_CLASS, DISMISS_ATTR};
use api::types::{FilePart, MultipartForm};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryElement(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    html: Option<String>,
    value: String,
    disabled: bool,
    file: Option<MemoryFile>,
    parent: Option<usize>,
    children: Vec<usize>,
}

type InputHandler = Rc<dyn Fn(String)>;

/// A flat element tree with just enough DOM behavior for the controllers.
#[derive(Clone, Default)]
pub struct MemoryDom {
    nodes: Rc<RefCell<Vec<Node>>>,
    listeners: Rc<RefCell<HashMap<usize, Vec<InputHandler>>>>,
}

impl std::fmt::Debug for MemoryDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDom")
            .field("nodes", &self.nodes.borrow().len())
            .finish_non_exhaustive()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element. A `class` attribute is split into the class list;
    /// `value` seeds the control value.
    pub fn add(
        &self,
        parent: Option<&MemoryElement>,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> MemoryElement {
        let mut nodes = self.nodes.borrow_mut();
        let idx = nodes.len();
        let mut node = Node {
            tag: tag.to_ascii_lowercase(),
            parent: parent.map(|p| p.0),
            ..Node::default()
        };
        for (name, value) in attributes {
            match *name {
                "class" => node.classes = value.split_whitespace().map(str::to_string).collect(),
                "value" => node.value = value.to_string(),
                "disabled" => node.disabled = true,
                _ => {
                    node.attributes.insert(name.to_string(), value.to_string());
                }
            }
        }
        nodes.push(node);
        if let Some(parent) = parent {
            nodes[parent.0].children.push(idx);
        }
        MemoryElement(idx)
    }

    /// Like `add`, with initial text content.
    pub fn add_text(
        &self,
        parent: Option<&MemoryElement>,
        tag: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> MemoryElement {
        let el = self.add(parent, tag, attributes);
        self.nodes.borrow_mut()[el.0].text = text.to_string();
        el
    }

    fn matches(node: &Node, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Id(id) => node.attributes.get("id").map(String::as_str) == Some(*id),
            Selector::Class(class) => node.classes.iter().any(|c| c == class),
            Selector::Attr(name) => node.attributes.contains_key(*name),
            Selector::AttrEq(name, value) => {
                node.attributes.get(*name).map(String::as_str) == Some(*value)
            }
            Selector::InputNamed(name) => {
                node.tag == "input" && node.attributes.get("name").map(String::as_str) == Some(*name)
            }
        }
    }

    fn descendants(nodes: &[Node], root: usize, out: &mut Vec<usize>) {
        for &child in &nodes[root].children {
            out.push(child);
            Self::descendants(nodes, child, out);
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl MemoryDom {
    pub fn by_id(&self, id: &str) -> Option<MemoryElement> {
        self.query(Selector::Id(id))
    }

    pub fn children(&self, element: &MemoryElement) -> Vec<MemoryElement> {
        self.nodes.borrow()[element.0]
            .children
            .iter()
            .map(|&i| MemoryElement(i))
            .collect()
    }

    /// Simulate the user picking (or un-picking) a file.
    pub fn choose_file(&self, input: &MemoryElement, file: Option<MemoryFile>) {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[input.0];
        node.value = file
            .as_ref()
            .map(|f| format!("C:\\fakepath\\{}", f.name))
            .unwrap_or_default();
        node.file = file;
    }

    /// Simulate typing into a control: updates its value, then runs listeners.
    pub fn fire_input(&self, element: &MemoryElement, value: &str) {
        self.nodes.borrow_mut()[element.0].value = value.to_string();
        let handlers: Vec<InputHandler> = self
            .listeners
            .borrow()
            .get(&element.0)
            .cloned()
            .unwrap_or_default();
        for handler in handlers {
            handler(value.to_string());
        }
    }

    pub fn listener_count(&self, element: &MemoryElement) -> usize {
        self.listeners
            .borrow()
            .get(&element.0)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Banners inside `container`, top first.
    pub fn banners(&self, container: &MemoryElement) -> Vec<(BannerKind, String)> {
        let nodes = self.nodes.borrow();
        nodes[container.0]
            .children
            .iter()
            .filter_map(|&i| {
                let node = &nodes[i];
                let kind = match node.attributes.get("data-banner").map(String::as_str) {
                    Some("success") => BannerKind::Success,
                    Some("error") => BannerKind::Error,
                    _ => return None,
                };
                let message = node
                    .children
                    .iter()
                    .map(|&c| &nodes[c])
                    .find(|c| c.tag == "span")
                    .map(|c| c.text.clone())
                    .unwrap_or_default();
                Some((kind, message))
            })
            .collect()
    }
}

#[async_trait(?Send)]
impl Dom for MemoryDom {
    type Element = MemoryElement;

    fn query_all(&self, selector: Selector<'_>) -> Vec<MemoryElement> {
        let nodes = self.nodes.borrow();
        // Document order: roots in insertion order, then depth first.
        let mut order = Vec::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if node.parent.is_none() {
                order.push(idx);
                Self::descendants(&nodes, idx, &mut order);
            }
        }
        order
            .into_iter()
            .filter(|&i| Self::matches(&nodes[i], &selector))
            .map(MemoryElement)
            .collect()
    }

    fn query_within(
        &self,
        root: &MemoryElement,
        selector: Selector<'_>,
    ) -> Option<MemoryElement> {
        let nodes = self.nodes.borrow();
        let mut order = Vec::new();
        Self::descendants(&nodes, root.0, &mut order);
        order
            .into_iter()
            .find(|&i| Self::matches(&nodes[i], &selector))
            .map(MemoryElement)
    }

    fn closest(&self, element: &MemoryElement, selector: Selector<'_>) -> Option<MemoryElement> {
        let nodes = self.nodes.borrow();
        let mut cursor = Some(element.0);
        while let Some(idx) = cursor {
            if Self::matches(&nodes[idx], &selector) {
                return Some(MemoryElement(idx));
            }
            cursor = nodes[idx].parent;
        }
        None
    }

    fn attribute(&self, element: &MemoryElement, name: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let node = &nodes[element.0];
        match name {
            "class" => Some(node.classes.join(" ")),
            _ => node.attributes.get(name).cloned(),
        }
    }

    fn set_attribute(&self, element: &MemoryElement, name: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[element.0];
        match name {
            "class" => node.classes = value.split_whitespace().map(str::to_string).collect(),
            _ => {
                node.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn text(&self, element: &MemoryElement) -> String {
        self.nodes.borrow()[element.0].text.clone()
    }

    fn set_text(&self, element: &MemoryElement, text: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[element.0];
        node.text = text.to_string();
        node.html = None;
    }

    fn inner_html(&self, element: &MemoryElement) -> String {
        let nodes = self.nodes.borrow();
        let node = &nodes[element.0];
        node.html.clone().unwrap_or_else(|| node.text.clone())
    }

    fn set_inner_html(&self, element: &MemoryElement, html: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[element.0];
        node.html = Some(html.to_string());
        node.text = html.to_string();
    }

    fn has_class(&self, element: &MemoryElement, class: &str) -> bool {
        self.nodes.borrow()[element.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn add_class(&self, element: &MemoryElement, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[element.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, element: &MemoryElement, class: &str) {
        self.nodes.borrow_mut()[element.0]
            .classes
            .retain(|c| c != class);
    }

    fn is_disabled(&self, element: &MemoryElement) -> bool {
        self.nodes.borrow()[element.0].disabled
    }

    fn set_disabled(&self, element: &MemoryElement, disabled: bool) {
        self.nodes.borrow_mut()[element.0].disabled = disabled;
    }

    fn value(&self, element: &MemoryElement) -> String {
        self.nodes.borrow()[element.0].value.clone()
    }

    fn set_value(&self, element: &MemoryElement, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[element.0];
        node.value = value.to_string();
        // Browsers only let scripts clear a file input.
        if value.is_empty() {
            node.file = None;
        }
    }

    fn selected_file_name(&self, input: &MemoryElement) -> Option<String> {
        self.nodes.borrow()[input.0]
            .file
            .as_ref()
            .map(|f| f.name.clone())
    }

    fn on_input(&self, element: &MemoryElement, handler: Box<dyn Fn(String)>) {
        self.listeners
            .borrow_mut()
            .entry(element.0)
            .or_default()
            .push(Rc::from(handler));
    }

    fn prepend_banner(&self, container: &MemoryElement, kind: BannerKind, message: &str) {
        let alert = self.add(
            None,
            "div",
            &[
                ("class", kind.class_list()),
                ("role", "alert"),
                ("data-banner", kind.as_str()),
            ],
        );
        self.add_text(Some(&alert), "span", &[], message);
        self.add(
            Some(&alert),
            "button",
            &[
                ("type", "button"),
                ("class", CLOSE_BUTTON_CLASS),
                (DISMISS_ATTR, "alert"),
            ],
        );

        let mut nodes = self.nodes.borrow_mut();
        nodes[alert.0].parent = Some(container.0);
        nodes[container.0].children.insert(0, alert.0);
    }

    async fn form_payload(&self, form: &MemoryElement) -> MultipartForm {
        let nodes = self.nodes.borrow();
        let mut order = Vec::new();
        Self::descendants(&nodes, form.0, &mut order);

        let mut payload = MultipartForm::new();
        for idx in order {
            let node = &nodes[idx];
            let Some(name) = node.attributes.get("name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if node.disabled || !matches!(node.tag.as_str(), "input" | "select" | "textarea") {
                continue;
            }
            match node.attributes.get("type").map(String::as_str) {
                Some("file") => {
                    if let Some(file) = &node.file {
                        payload.file(FilePart {
                            field: name.clone(),
                            file_name: file.name.clone(),
                            content_type: file.content_type.clone(),
                            bytes: file.bytes.clone(),
                        });
                    }
                }
                Some("button" | "submit" | "reset") => {}
                _ => {
                    payload.text(name.clone(), node.value.clone());
                }
            }
        }
        payload
    }
}

#[cfg(any(test, feature = "test-utils"))]
/// `localStorage` stand-in.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Reload,
    Assign(String),
}

#[cfg(any(test, feature = "test-utils"))]
/// Records navigation requests instead of performing them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: RefCell<Vec<Navigation>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Navigation> {
        self.history.borrow().clone()
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Navigator for RecordingNavigator {
    fn reload(&self) {
        self.history.borrow_mut().push(Navigation::Reload);
    }

    fn assign(&self, url: &str) {
        self.history
            .borrow_mut()
            .push(Navigation::Assign(url.to_string()));
    }
}
