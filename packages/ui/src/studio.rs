use crate::form::{FormController, FORM_ID};
use crate::i18n::{t, Lang};
use crate::localization::{Services, Translator};
use crate::platform::HostDom;
use api::config::GenerationLimits;
use api::types::FormMode;
use dioxus::prelude::*;

const STUDIO_CSS: Asset = asset!("/assets/styling/studio.css");

const STYLES: [&str; 5] = ["pop", "rock", "jazz", "classical", "electronic"];
const MOODS: [&str; 6] = ["happy", "sad", "energetic", "calm", "romantic", "mysterious"];

/// Both page controllers, bound to the live document.
#[derive(Clone)]
pub struct Studio {
    pub translator: Translator<HostDom>,
    pub form: FormController<HostDom>,
}

impl Studio {
    pub fn new(dom: HostDom, services: Services) -> Self {
        Self {
            translator: Translator::new(dom.clone(), services.clone()),
            form: FormController::new(dom, services),
        }
    }

    /// Wire the controllers to the browser window.
    #[cfg(target_arch = "wasm32")]
    pub fn attach() -> Option<Self> {
        use crate::platform::web::{WebDom, WebNavigator, WebStorage};
        use api::config::ClientConfig;
        use api::{ApiClient, ReqwestTransport};
        use std::rc::Rc;

        let dom = WebDom::from_window()?;
        let Some(origin) = WebNavigator::origin() else {
            tracing::error!("studio.attach: window origin unavailable");
            return None;
        };
        let services = Services {
            store: Rc::new(WebStorage::local()),
            navigator: Rc::new(WebNavigator),
            api: ApiClient::new(
                ClientConfig::default().with_base_url(origin),
                Rc::new(ReqwestTransport::new()),
            ),
            table: Rc::new(dom.translation_table()),
        };
        tracing::debug!("studio.attach: api={:?}", services.api);
        Some(Self::new(dom, services))
    }

    /// No document to bind to outside the browser.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn attach() -> Option<Self> {
        None
    }

    /// Setup for a freshly mounted studio page, on full loads and client-side
    /// route changes alike.
    pub fn page_ready(&self) {
        self.translator.refresh();
        self.form.bind_range_labels();
    }
}

/// Provide `Signal<Option<Studio>>` to the tree and attach once mounted.
///
/// Page-level wiring is left to the pages, which can mount long after this.
#[component]
pub fn StudioProvider(children: Element) -> Element {
    let mut studio = use_signal(|| None::<Studio>);
    use_context_provider(|| studio);

    use_effect(move || {
        let Some(attached) = Studio::attach() else {
            return;
        };
        attached.translator.initialize();
        tracing::info!(
            "studio.attach: language={}",
            attached.translator.current().unwrap_or_default()
        );
        studio.set(Some(attached));
    });

    rsx! { {children} }
}

pub fn use_studio() -> Signal<Option<Studio>> {
    if let Some(sig) = try_use_context::<Signal<Option<Studio>>>() {
        return sig;
    }

    // Fallback for SSR or mis-ordered providers to avoid panics in production.
    eprintln!("startup: missing StudioProvider context, page controls stay inert");
    use_signal(|| None::<Studio>)
}

#[component]
pub fn MusicStudioPage() -> Element {
    let studio = use_studio();
    let lang = Lang::DEFAULT;
    let limits = GenerationLimits::DEFAULT;

    // Reruns when the provider attaches; otherwise once per mount of this page.
    use_effect(move || {
        if let Some(s) = studio() {
            s.page_ready();
        }
    });

    let switch_mode = move |mode: FormMode| {
        if let Some(s) = studio() {
            s.form.switch_mode(mode);
        }
    };
    let create = move |mode: FormMode| {
        if let Some(s) = studio() {
            spawn(async move {
                let outcome = s.form.create_music(mode).await;
                tracing::debug!("studio.create_music: outcome={outcome:?}");
            });
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: STUDIO_CSS }

        div { class: "studio",
            div { class: "studio_header",
                h1 { "data-i18n": "studio.title", {t(lang, "studio.title")} }
                p { class: "hint", "data-i18n": "studio.subtitle", {t(lang, "studio.subtitle")} }
            }

            div { class: "mode_toggle", "data-i18n-title": "mode.switch_title",
                button {
                    id: "simpleMode",
                    class: "mode_btn active",
                    r#type: "button",
                    "data-i18n": "mode.simple",
                    onclick: move |_| switch_mode(FormMode::Simple),
                    {t(lang, "mode.simple")}
                }
                button {
                    id: "advancedMode",
                    class: "mode_btn",
                    r#type: "button",
                    "data-i18n": "mode.advanced",
                    onclick: move |_| switch_mode(FormMode::Advanced),
                    {t(lang, "mode.advanced")}
                }
            }

            form {
                id: FORM_ID,
                class: "studio_form",
                onsubmit: move |evt| evt.prevent_default(),

                div { id: "simpleForm", class: "form_section",
                    ChoiceField { name: "style", label_key: "form.style", prefix: "style", options: STYLES.to_vec() }
                    ChoiceField { name: "mood", label_key: "form.mood", prefix: "mood", options: MOODS.to_vec() }
                    button {
                        class: "btn primary",
                        r#type: "button",
                        "data-create-music": "simple",
                        onclick: move |_| create(FormMode::Simple),
                        span { "data-i18n": "form.create", {t(lang, "form.create")} }
                    }
                }

                div { id: "advancedForm", class: "form_section hidden",
                    label { class: "field",
                        span { class: "field_label",
                            span { "data-i18n": "form.tempo", {t(lang, "form.tempo")} }
                            " "
                            span { id: "tempoValue", class: "range_value", "{limits.tempo_default} BPM" }
                        }
                        input {
                            r#type: "range",
                            name: "tempo",
                            min: "{limits.tempo_min}",
                            max: "{limits.tempo_max}",
                            value: "{limits.tempo_default}",
                        }
                    }
                    label { class: "field",
                        span { class: "field_label",
                            span { "data-i18n": "form.duration", {t(lang, "form.duration")} }
                            " "
                            span { id: "durationValue", class: "range_value", "{limits.duration_default}" }
                        }
                        input {
                            r#type: "range",
                            name: "duration",
                            min: "{limits.duration_min}",
                            max: "{limits.duration_max}",
                            value: "{limits.duration_default}",
                        }
                    }
                    label { class: "field",
                        span { class: "field_label", "data-i18n": "form.chord_progression",
                            {t(lang, "form.chord_progression")}
                        }
                        input {
                            r#type: "text",
                            name: "chord_progression",
                            placeholder: t(lang, "form.chord_progression_ph"),
                            title: t(lang, "form.chord_progression_title"),
                            "data-i18n-placeholder": "form.chord_progression_ph",
                            "data-i18n-title": "form.chord_progression_title",
                        }
                    }
                    FileField {}
                    button {
                        class: "btn primary",
                        r#type: "button",
                        "data-create-music": "advanced",
                        onclick: move |_| create(FormMode::Advanced),
                        span { "data-i18n": "form.create", {t(lang, "form.create")} }
                    }
                }
            }
        }
    }
}

#[component]
fn ChoiceField(
    name: &'static str,
    label_key: &'static str,
    prefix: &'static str,
    options: Vec<&'static str>,
) -> Element {
    let lang = Lang::DEFAULT;
    rsx! {
        label { class: "field",
            span { class: "field_label", "data-i18n": label_key, {t(lang, label_key)} }
            select { name: name,
                for choice in options {
                    {
                        let key = format!("{prefix}.{choice}");
                        rsx! {
                            option { value: choice, "data-i18n": key.clone(), {t(lang, &key)} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FileField() -> Element {
    let studio = use_studio();
    let lang = Lang::DEFAULT;

    rsx! {
        div { class: "field",
            span { class: "field_label", "data-i18n": "form.incomplete_track", {t(lang, "form.incomplete_track")} }
            div { class: "custom-file-upload",
                label { class: "btn", r#for: "incomplete_track",
                    span { "data-i18n": "form.choose_file", {t(lang, "form.choose_file")} }
                }
                input {
                    id: "incomplete_track",
                    class: "file_input",
                    r#type: "file",
                    name: "incomplete_track",
                    accept: ".mid,.midi,audio/midi",
                    onchange: move |_| {
                        if let Some(s) = studio() {
                            if let Some(input) = s.form.file_input() {
                                s.form.handle_file_select(&input);
                            }
                        }
                    },
                }
                span { class: "selected-file-name", {t(lang, "form.no_file_chosen")} }
            }
            div { id: "filePreview", class: "file_preview d-none",
                span { class: "file-name" }
                button {
                    class: "btn",
                    r#type: "button",
                    "data-i18n": "form.clear_file",
                    onclick: move |_| {
                        if let Some(s) = studio() {
                            s.form.clear_file_input();
                        }
                    },
                    {t(lang, "form.clear_file")}
                }
            }
        }
    }
}
