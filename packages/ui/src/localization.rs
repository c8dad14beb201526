//! Client-side language switching.

use crate::i18n::{display_name_for, TranslationTable};
use crate::platform::{Dom, KeyValueStore, Navigator, Selector};
use api::{ApiClient, ApiError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, error, info, warn};

pub const ATTR_TEXT: &str = "data-i18n";
pub const ATTR_PLACEHOLDER: &str = "data-i18n-placeholder";
pub const ATTR_TITLE: &str = "data-i18n-title";
pub const ATTR_LANG: &str = "data-lang";
pub const LANGUAGE_ITEM_CLASS: &str = "language-item";
pub const ACTIVE_CLASS: &str = "active";
pub const CURRENT_LANGUAGE_ID: &str = "current-language-text";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LocaleState {
    #[default]
    Unset,
    Applied(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("unsupported language code: {0}")]
    Unsupported(String),
}

/// What the server made of a language switch.
#[derive(Debug)]
pub enum LanguageSync {
    /// Accepted; the page has been asked to reload.
    Persisted,
    Rejected(Option<String>),
    Failed(ApiError),
}

/// Host capabilities shared by the controllers.
#[derive(Clone)]
pub struct Services {
    pub store: Rc<dyn KeyValueStore>,
    pub navigator: Rc<dyn Navigator>,
    pub api: ApiClient,
    pub table: Rc<TranslationTable>,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl Services {
    /// Persisted language code, or the configured fallback.
    pub fn persisted_language(&self) -> String {
        let config = self.api.config();
        self.store
            .get(&config.language_storage_key)
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| config.fallback_language.clone())
    }
}

/// Applies translations to marked elements and keeps the session's language.
#[derive(Clone)]
pub struct Translator<D: Dom> {
    dom: D,
    services: Services,
    state: Rc<RefCell<LocaleState>>,
}

impl<D: Dom> Translator<D> {
    pub fn new(dom: D, services: Services) -> Self {
        Self {
            dom,
            services,
            state: Rc::new(RefCell::new(LocaleState::Unset)),
        }
    }

    pub fn state(&self) -> LocaleState {
        self.state.borrow().clone()
    }

    pub fn current(&self) -> Option<String> {
        match &*self.state.borrow() {
            LocaleState::Unset => None,
            LocaleState::Applied(code) => Some(code.clone()),
        }
    }

    /// Seed from storage and apply. Run once the page is mounted.
    pub fn initialize(&self) {
        let stored = self.services.persisted_language();
        let code = if self.services.table.supports(&stored) {
            stored
        } else {
            let fallback = self.services.api.config().fallback_language.clone();
            warn!("localization.initialize: stored code={stored} unsupported, using {fallback}");
            fallback
        };
        if let Err(e) = self.set_language(&code) {
            error!("localization.initialize: {e}");
        }
        self.highlight_current_language();
    }

    /// Re-apply the session language to elements mounted since it was set.
    pub fn refresh(&self) {
        let Some(code) = self.current() else {
            self.initialize();
            return;
        };
        if let Err(e) = self.set_language(&code) {
            error!("localization.refresh: {e}");
        }
        self.highlight_current_language();
    }

    /// Apply `code` to every marked element and persist it.
    pub fn set_language(&self, code: &str) -> Result<(), LocaleError> {
        let Some(strings) = self.services.table.language(code) else {
            error!("localization.set_language: unsupported code={code}");
            return Err(LocaleError::Unsupported(code.to_string()));
        };

        let config = self.services.api.config();
        self.services.store.set(&config.language_storage_key, code);
        *self.state.borrow_mut() = LocaleState::Applied(code.to_string());

        let mut applied = 0usize;
        for el in self.dom.query_all(Selector::Attr(ATTR_TEXT)) {
            if let Some(value) = self.translated(&el, ATTR_TEXT, strings) {
                self.dom.set_text(&el, value);
                applied += 1;
            }
        }
        for (marker, target) in [(ATTR_PLACEHOLDER, "placeholder"), (ATTR_TITLE, "title")] {
            for el in self.dom.query_all(Selector::Attr(marker)) {
                if let Some(value) = self.translated(&el, marker, strings) {
                    self.dom.set_attribute(&el, target, value);
                    applied += 1;
                }
            }
        }
        debug!("localization.set_language: code={code} applied={applied}");

        self.update_language_display(code);
        Ok(())
    }

    fn translated<'t>(
        &self,
        el: &D::Element,
        marker: &str,
        strings: &'t HashMap<String, String>,
    ) -> Option<&'t String> {
        let key = self.dom.attribute(el, marker)?;
        strings.get(&key).filter(|value| !value.is_empty())
    }

    pub fn highlight_current_language(&self) {
        let current = self.current();
        for item in self.dom.query_all(Selector::Class(LANGUAGE_ITEM_CLASS)) {
            let is_current = current.is_some() && self.dom.attribute(&item, ATTR_LANG) == current;
            if is_current {
                self.dom.add_class(&item, ACTIVE_CLASS);
            } else {
                self.dom.remove_class(&item, ACTIVE_CLASS);
            }
        }
    }

    pub fn update_language_display(&self, code: &str) {
        if let Some(el) = self.dom.query(Selector::Id(CURRENT_LANGUAGE_ID)) {
            self.dom.set_text(&el, &display_name_for(code));
        }
    }

    /// Apply locally, then tell the server. The local change stays even when
    /// the server refuses it.
    pub async fn switch_language(&self, code: &str) -> LanguageSync {
        if self.set_language(code).is_ok() {
            self.highlight_current_language();
        }

        match self.services.api.change_language(code).await {
            Ok(resp) if resp.is_success() => {
                info!("localization.switch_language: code={code} persisted, reloading");
                self.services.navigator.reload();
                LanguageSync::Persisted
            }
            Ok(resp) => {
                error!(
                    "localization.switch_language: code={code} rejected status={} message={}",
                    resp.status,
                    resp.message.as_deref().unwrap_or("")
                );
                LanguageSync::Rejected(resp.message)
            }
            Err(e) => {
                error!("localization.switch_language: code={code} failed: {e}");
                LanguageSync::Failed(e)
            }
        }
    }

    /// Current language's string for `key`, falling back to the key.
    pub fn lookup(&self, key: &str) -> String {
        let code = self
            .current()
            .unwrap_or_else(|| self.services.persisted_language());
        self.services
            .table
            .get(&code, key)
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }
}
