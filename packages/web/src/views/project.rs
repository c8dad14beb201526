use dioxus::prelude::*;

/// Landing spot after a successful creation. The project itself is rendered
/// by the music server; this view only keeps client-side navigation from 404ing.
#[component]
pub fn Project(id: String) -> Element {
    rsx! {
        div { class: "panel",
            h2 { "Project {id}" }
            a { class: "btn", href: "/", "data-i18n": "nav.create", {ui::t(ui::Lang::DEFAULT, "nav.create")} }
        }
    }
}
