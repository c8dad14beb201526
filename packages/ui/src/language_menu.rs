use crate::i18n::{t, Lang};
use crate::localization::{CURRENT_LANGUAGE_ID, LANGUAGE_ITEM_CLASS};
use crate::studio::use_studio;
use dioxus::prelude::*;

/// Language switcher in the top-right of the app nav.
///
/// Items stay mounted while the dropdown is closed so the translator can
/// mark the active one.
#[component]
pub fn LanguageMenu() -> Element {
    let studio = use_studio();
    let mut open = use_signal(|| false);

    let label = match studio() {
        Some(s) => s.translator.lookup("lang.label"),
        None => t(Lang::DEFAULT, "lang.label"),
    };
    let dropdown_class = if open() { "dropdown" } else { "dropdown hidden" };

    rsx! {
        div { class: "language_menu",
            button {
                class: "btn language_btn",
                r#type: "button",
                title: "{label}",
                onclick: move |_| {
                    let next = !open();
                    open.set(next);
                },
                span { id: CURRENT_LANGUAGE_ID, {Lang::DEFAULT.display_name()} }
            }

            div { class: dropdown_class,
                for lang in Lang::ALL {
                    a {
                        key: "{lang.code()}",
                        class: "dropdown_item {LANGUAGE_ITEM_CLASS}",
                        href: "#",
                        "data-lang": lang.code(),
                        onclick: move |evt: MouseEvent| {
                            evt.prevent_default();
                            open.set(false);
                            let Some(s) = studio() else {
                                return;
                            };
                            spawn(async move {
                                let sync = s.translator.switch_language(lang.code()).await;
                                tracing::debug!("language_menu.switch: code={} sync={sync:?}", lang.code());
                            });
                        },
                        {lang.display_name()}
                    }
                }
            }
        }
    }
}
