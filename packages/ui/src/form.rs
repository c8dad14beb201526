//! Music creation form: mode toggle, range labels, submission, file preview.

use crate::banner::BannerKind;
use crate::i18n::{t, Lang};
use crate::localization::Services;
use crate::platform::{Dom, Selector};
use api::types::{FormMode, SubmissionResult};
use api::{ApiError, CreateMusicOutcome};
use tracing::{debug, error, info};

pub const SIMPLE_TOGGLE_ID: &str = "simpleMode";
pub const ADVANCED_TOGGLE_ID: &str = "advancedMode";
pub const SIMPLE_FORM_ID: &str = "simpleForm";
pub const ADVANCED_FORM_ID: &str = "advancedForm";
pub const FORM_ID: &str = "musicGenerationForm";
pub const TEMPO_LABEL_ID: &str = "tempoValue";
pub const DURATION_LABEL_ID: &str = "durationValue";
pub const FILE_PREVIEW_ID: &str = "filePreview";
pub const FILE_INPUT_ID: &str = "incomplete_track";
pub const SUBMIT_ATTR: &str = "data-create-music";

const ACTIVE: &str = "active";
const HIDDEN: &str = "hidden";
const PREVIEW_HIDDEN: &str = "d-none";
const UPLOAD_CLASS: &str = "custom-file-upload";
const SELECTED_NAME_CLASS: &str = "selected-file-name";
const PREVIEW_NAME_CLASS: &str = "file-name";

/// How a `create_music` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The browser was sent to the redirect target.
    Redirected(String),
    /// Success banner shown; `project_id` was navigated to when present.
    Created { project_id: Option<String> },
    /// Error banner shown with this message.
    Failed(String),
    /// Form or submit control missing; nothing was sent.
    Aborted,
}

#[derive(Clone)]
pub struct FormController<D: Dom> {
    dom: D,
    services: Services,
}

impl<D: Dom> FormController<D> {
    pub fn new(dom: D, services: Services) -> Self {
        Self { dom, services }
    }

    /// Localized string for the persisted language.
    fn label(&self, key: &str) -> String {
        let code = self.services.persisted_language();
        if let Some(value) = self.services.table.get(&code, key) {
            return value.to_string();
        }
        t(Lang::from_code(&code).unwrap_or(Lang::DEFAULT), key)
    }

    pub fn switch_mode(&self, mode: FormMode) {
        let (on, off) = match mode {
            FormMode::Simple => (
                (SIMPLE_TOGGLE_ID, SIMPLE_FORM_ID),
                (ADVANCED_TOGGLE_ID, ADVANCED_FORM_ID),
            ),
            FormMode::Advanced => (
                (ADVANCED_TOGGLE_ID, ADVANCED_FORM_ID),
                (SIMPLE_TOGGLE_ID, SIMPLE_FORM_ID),
            ),
        };
        if let Some(el) = self.dom.query(Selector::Id(on.0)) {
            self.dom.add_class(&el, ACTIVE);
        }
        if let Some(el) = self.dom.query(Selector::Id(off.0)) {
            self.dom.remove_class(&el, ACTIVE);
        }
        if let Some(el) = self.dom.query(Selector::Id(on.1)) {
            self.dom.remove_class(&el, HIDDEN);
        }
        if let Some(el) = self.dom.query(Selector::Id(off.1)) {
            self.dom.add_class(&el, HIDDEN);
        }
        debug!("form.switch_mode: mode={}", mode.as_str());
    }

    /// Mirror the tempo and duration ranges into their labels.
    pub fn bind_range_labels(&self) {
        for (input_name, label_id, suffix) in [
            ("tempo", TEMPO_LABEL_ID, " BPM"),
            ("duration", DURATION_LABEL_ID, ""),
        ] {
            let (Some(input), Some(label)) = (
                self.dom.query(Selector::InputNamed(input_name)),
                self.dom.query(Selector::Id(label_id)),
            ) else {
                debug!("form.bind_range_labels: {input_name} not on page");
                continue;
            };
            self.dom
                .set_text(&label, &format!("{}{suffix}", self.dom.value(&input)));
            let dom = self.dom.clone();
            self.dom.on_input(
                &input,
                Box::new(move |value: String| dom.set_text(&label, &format!("{value}{suffix}"))),
            );
        }
    }

    fn submit_control(&self, form: &D::Element, mode: FormMode) -> Option<D::Element> {
        self.dom
            .query_within(form, Selector::AttrEq(SUBMIT_ATTR, mode.as_str()))
            .or_else(|| self.dom.query_within(form, Selector::Attr(SUBMIT_ATTR)))
    }

    /// Submit the form with `mode` and render the outcome.
    pub async fn create_music(&self, mode: FormMode) -> Submission {
        let Some(form) = self.dom.query(Selector::Id(FORM_ID)) else {
            error!("form.create_music: form #{FORM_ID} not found");
            return Submission::Aborted;
        };
        let Some(button) = self.submit_control(&form, mode) else {
            error!("form.create_music: submit control not found");
            return Submission::Aborted;
        };

        let original = self.dom.inner_html(&button);
        self.dom.set_inner_html(
            &button,
            &format!(
                r#"<i class="fas fa-spinner fa-spin"></i> {}"#,
                escape_html(&self.label("form.creating"))
            ),
        );
        self.dom.set_disabled(&button, true);

        let mut payload = self.dom.form_payload(&form).await;
        payload.text("mode", mode.as_str());

        let outcome = match self.services.api.create_music(payload).await {
            Ok(CreateMusicOutcome::Redirect(target)) => {
                // The page is being replaced; leave the control as it is.
                info!("form.create_music: redirected to {target}");
                self.services.navigator.assign(&target);
                return Submission::Redirected(target);
            }
            Ok(CreateMusicOutcome::Completed(result)) => Ok(result),
            Err(e) => Err(e),
        };

        self.dom.set_inner_html(&button, &original);
        self.dom.set_disabled(&button, false);

        match outcome {
            Ok(SubmissionResult::Success {
                message,
                project_id,
            }) => {
                let message = message.unwrap_or_else(|| self.label("music.created"));
                self.dom
                    .prepend_banner(&form, BannerKind::Success, &message);
                info!(
                    "form.create_music: created project_id={}",
                    project_id.as_deref().unwrap_or("<none>")
                );
                if let Some(id) = &project_id {
                    let path = self.services.api.config().project_path(id);
                    self.services.navigator.assign(&path);
                }
                Submission::Created { project_id }
            }
            Ok(SubmissionResult::Failure { message }) => {
                let message = message.unwrap_or_else(|| self.label("error.create_failed"));
                self.fail(&form, message)
            }
            Err(e) => {
                error!("form.create_music: {e}");
                let message = match e {
                    ApiError::UnexpectedResponse => self.label("error.unexpected_response"),
                    _ => self.label("error.create_failed"),
                };
                self.fail(&form, message)
            }
        }
    }

    fn fail(&self, form: &D::Element, message: String) -> Submission {
        self.dom.prepend_banner(form, BannerKind::Error, &message);
        Submission::Failed(message)
    }

    pub fn file_input(&self) -> Option<D::Element> {
        self.dom.query(Selector::Id(FILE_INPUT_ID))
    }

    /// Show the chosen file's name in the upload label and preview panel.
    pub fn handle_file_select(&self, input: &D::Element) {
        let name = self.dom.selected_file_name(input);
        let name_label = self
            .dom
            .closest(input, Selector::Class(UPLOAD_CLASS))
            .and_then(|upload| self.dom.query_within(&upload, Selector::Class(SELECTED_NAME_CLASS)));
        let preview = self.dom.query(Selector::Id(FILE_PREVIEW_ID));

        match name {
            Some(name) => {
                debug!("form.handle_file_select: file={name}");
                if let Some(label) = &name_label {
                    self.dom.set_text(label, &name);
                }
                if let Some(preview) = &preview {
                    self.dom.remove_class(preview, PREVIEW_HIDDEN);
                    if let Some(slot) =
                        self.dom.query_within(preview, Selector::Class(PREVIEW_NAME_CLASS))
                    {
                        self.dom.set_text(&slot, &name);
                    }
                }
            }
            None => self.reset_file_display(name_label.as_ref(), preview.as_ref()),
        }
    }

    pub fn clear_file_input(&self) {
        let Some(input) = self.file_input() else {
            error!("form.clear_file_input: #{FILE_INPUT_ID} not found");
            return;
        };
        self.dom.set_value(&input, "");
        let name_label = self
            .dom
            .closest(&input, Selector::Class(UPLOAD_CLASS))
            .and_then(|upload| self.dom.query_within(&upload, Selector::Class(SELECTED_NAME_CLASS)));
        let preview = self.dom.query(Selector::Id(FILE_PREVIEW_ID));
        self.reset_file_display(name_label.as_ref(), preview.as_ref());
    }

    fn reset_file_display(&self, name_label: Option<&D::Element>, preview: Option<&D::Element>) {
        if let Some(label) = name_label {
            self.dom.set_text(label, &self.label("form.no_file_chosen"));
        }
        if let Some(preview) = preview {
            self.dom.add_class(preview, PREVIEW_HIDDEN);
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
