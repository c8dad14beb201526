//! This crate contains the studio page's client-side behavior and shared UI.

mod banner;
pub use banner::BannerKind;

pub mod platform;

mod i18n;
pub use i18n::{display_name_for, t, Lang, TranslationTable};

pub mod localization;
pub use localization::{LanguageSync, LocaleError, LocaleState, Services, Translator};

pub mod form;
pub use form::{FormController, Submission};

#[cfg(test)]
mod form_tests;

mod studio;
pub use studio::{use_studio, MusicStudioPage, Studio, StudioProvider};

mod language_menu;
pub use language_menu::LanguageMenu;

mod theme;
pub use theme::StudioTheme;
