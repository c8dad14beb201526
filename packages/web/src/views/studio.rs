use dioxus::prelude::*;
use ui::MusicStudioPage;

#[component]
pub fn Studio() -> Element {
    rsx! { MusicStudioPage {} }
}
