use dioxus::prelude::*;
use std::env;

use views::{Project, Studio};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Studio {},
    #[route("/project/:id")]
    Project { id: String },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    install_panic_hook();

    #[cfg(feature = "server")]
    init_tracing();

    log_runtime_config();
    dioxus::launch(App);
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {info}");
    }));
}

#[cfg(feature = "server")]
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    api::config::load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn log_runtime_config() {
    let ip = env::var("IP").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let mode = api::config::AppMode::from_env();
    let client = api::config::ClientConfig::from_env();

    eprintln!("startup: IP={ip} PORT={port} mode={mode:?}");
    eprintln!(
        "startup: api base={} change_language={} create_music={}",
        client.base_url, client.change_language_path, client.create_music_path
    );

    if mode == api::config::AppMode::Production
        && (client.base_url.contains("127.0.0.1") || client.base_url.contains("localhost"))
    {
        eprintln!("startup: WARNING APP_BASE_URL points to localhost in production mode");
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        ui::StudioTheme {}
        ui::StudioProvider {
            Router::<Route> {}
        }
    }
}

/// Nav bar with the language switcher; pages render below it.
#[component]
fn WebNavbar() -> Element {
    let lang = ui::Lang::DEFAULT;

    rsx! {
        div { class: "studio_nav",
            div { class: "studio_nav_inner",
                a { class: "brand", href: "/",
                    span { class: "brand_mark" }
                    span { class: "brand_name", "data-i18n": "app.name", {ui::t(lang, "app.name")} }
                }
                div { class: "nav_links",
                    Link { class: "nav_link", to: Route::Studio {},
                        span { "data-i18n": "nav.create", {ui::t(lang, "nav.create")} }
                    }
                    ui::LanguageMenu {}
                }
            }
        }
        div { class: "studio_container route_view", Outlet::<Route> {} }
    }
}
