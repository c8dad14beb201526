use crate::banner::BannerKind;
use crate::form::*;
use crate::i18n::TranslationTable;
use crate::localization::Services;
use crate::platform::memory::{
    MemoryDom, MemoryElement, MemoryFile, MemoryStore, Navigation, RecordingNavigator,
};
use crate::platform::Dom;
use api::config::ClientConfig;
use api::test_utils::{html_response, json_response, RecordedBody, StubTransport};
use api::transport::RawResponse;
use api::types::FormMode;
use api::{ApiClient, ApiError};
use serde_json::json;
use std::rc::Rc;

struct Page {
    dom: MemoryDom,
    navigator: Rc<RecordingNavigator>,
    transport: Rc<StubTransport>,
    services: Services,
    controller: FormController<MemoryDom>,
    form: MemoryElement,
    simple_toggle: MemoryElement,
    advanced_toggle: MemoryElement,
    simple_form: MemoryElement,
    advanced_form: MemoryElement,
    tempo: MemoryElement,
    duration: MemoryElement,
    simple_button: MemoryElement,
    advanced_button: MemoryElement,
    file_input: MemoryElement,
    file_label: MemoryElement,
    preview: MemoryElement,
    preview_name: MemoryElement,
}

const BUTTON_LABEL: &str = r#"<i class="fas fa-music"></i> Create music"#;

fn page(language: &str) -> Page {
    let dom = MemoryDom::new();
    let simple_toggle = dom.add(None, "button", &[("id", "simpleMode"), ("class", "mode-btn active")]);
    let advanced_toggle = dom.add(None, "button", &[("id", "advancedMode"), ("class", "mode-btn")]);

    let form = dom.add(None, "form", &[("id", "musicGenerationForm")]);
    let simple_form = dom.add(Some(&form), "div", &[("id", "simpleForm")]);
    dom.add(Some(&simple_form), "select", &[("name", "style"), ("value", "pop")]);
    dom.add(Some(&simple_form), "select", &[("name", "mood"), ("value", "happy")]);
    let simple_button = dom.add(
        Some(&simple_form),
        "button",
        &[("type", "button"), ("data-create-music", "simple")],
    );
    dom.set_inner_html(&simple_button, BUTTON_LABEL);

    let advanced_form = dom.add(Some(&form), "div", &[("id", "advancedForm"), ("class", "hidden")]);
    let tempo = dom.add(
        Some(&advanced_form),
        "input",
        &[("type", "range"), ("name", "tempo"), ("value", "120")],
    );
    dom.add(Some(&advanced_form), "span", &[("id", "tempoValue")]);
    let duration = dom.add(
        Some(&advanced_form),
        "input",
        &[("type", "range"), ("name", "duration"), ("value", "60")],
    );
    dom.add(Some(&advanced_form), "span", &[("id", "durationValue")]);
    let upload = dom.add(Some(&advanced_form), "div", &[("class", "custom-file-upload")]);
    let file_input = dom.add(
        Some(&upload),
        "input",
        &[("type", "file"), ("id", "incomplete_track"), ("name", "incomplete_track")],
    );
    let file_label = dom.add_text(Some(&upload), "span", &[("class", "selected-file-name")], "");
    let preview = dom.add(Some(&advanced_form), "div", &[("id", "filePreview"), ("class", "d-none")]);
    let preview_name = dom.add(Some(&preview), "span", &[("class", "file-name")]);
    let advanced_button = dom.add(
        Some(&advanced_form),
        "button",
        &[("type", "button"), ("data-create-music", "advanced")],
    );
    dom.set_inner_html(&advanced_button, BUTTON_LABEL);

    let navigator = Rc::new(RecordingNavigator::new());
    let transport = Rc::new(StubTransport::new());
    let services = Services {
        store: Rc::new(MemoryStore::with("language", language)),
        navigator: navigator.clone(),
        api: ApiClient::new(
            ClientConfig::default().with_base_url("http://studio.test"),
            transport.clone(),
        ),
        table: Rc::new(TranslationTable::builtin()),
    };

    Page {
        controller: FormController::new(dom.clone(), services.clone()),
        services,
        dom,
        navigator,
        transport,
        form,
        simple_toggle,
        advanced_toggle,
        simple_form,
        advanced_form,
        tempo,
        duration,
        simple_button,
        advanced_button,
        file_input,
        file_label,
        preview,
        preview_name,
    }
}

fn midi(name: &str) -> MemoryFile {
    MemoryFile {
        name: name.to_string(),
        content_type: Some("audio/midi".to_string()),
        bytes: vec![0x4d, 0x54, 0x68, 0x64],
    }
}

#[test]
fn switch_mode_advanced_scenario() {
    let p = page("en");
    p.controller.switch_mode(FormMode::Advanced);

    assert!(!p.dom.has_class(&p.advanced_form, "hidden"));
    assert!(p.dom.has_class(&p.simple_form, "hidden"));
    assert!(p.dom.has_class(&p.advanced_toggle, "active"));
    assert!(!p.dom.has_class(&p.simple_toggle, "active"));

    p.controller.switch_mode(FormMode::Simple);
    assert!(p.dom.has_class(&p.advanced_form, "hidden"));
    assert!(!p.dom.has_class(&p.simple_form, "hidden"));
    assert!(p.dom.has_class(&p.simple_toggle, "active"));
    assert!(!p.dom.has_class(&p.advanced_toggle, "active"));
}

#[test]
fn switch_mode_skips_missing_targets() {
    let dom = MemoryDom::new();
    let toggle = dom.add(None, "button", &[("id", "advancedMode")]);
    let controller = FormController::new(dom.clone(), page("en").services);
    controller.switch_mode(FormMode::Advanced);
    assert!(dom.has_class(&toggle, "active"));
}

#[test]
fn range_labels_mirror_their_inputs() {
    let p = page("en");
    p.controller.bind_range_labels();

    let tempo_label = p.dom.by_id("tempoValue").unwrap();
    let duration_label = p.dom.by_id("durationValue").unwrap();
    assert_eq!(p.dom.text(&tempo_label), "120 BPM");
    assert_eq!(p.dom.text(&duration_label), "60");

    p.dom.fire_input(&p.tempo, "96");
    p.dom.fire_input(&p.duration, "180");
    assert_eq!(p.dom.text(&tempo_label), "96 BPM");
    assert_eq!(p.dom.text(&duration_label), "180");
    assert_eq!(p.dom.listener_count(&p.tempo), 1);
}

#[test]
fn range_labels_without_targets_are_not_bound() {
    let dom = MemoryDom::new();
    let tempo = dom.add(None, "input", &[("name", "tempo")]);
    let controller = FormController::new(dom.clone(), page("en").services);
    controller.bind_range_labels();
    assert_eq!(dom.listener_count(&tempo), 0);
}

#[tokio::test]
async fn create_music_success_scenario() {
    let p = page("en");
    p.transport.push(Ok(json_response(
        json!({"status": "success", "message": "ok", "project_id": "42"}),
    )));

    let outcome = p.controller.create_music(FormMode::Simple).await;

    assert_eq!(
        outcome,
        Submission::Created {
            project_id: Some("42".to_string())
        }
    );
    assert_eq!(
        p.dom.banners(&p.form),
        vec![(BannerKind::Success, "ok".to_string())]
    );
    assert_eq!(
        p.navigator.history(),
        vec![Navigation::Assign("/project/42".to_string())]
    );
    assert!(!p.dom.is_disabled(&p.simple_button));
    assert_eq!(p.dom.inner_html(&p.simple_button), BUTTON_LABEL);
}

#[tokio::test]
async fn create_music_opens_project_for_float_id() {
    let p = page("en");
    p.transport.push(Ok(json_response(
        json!({"status": "success", "message": "ok", "project_id": 42.0}),
    )));

    let outcome = p.controller.create_music(FormMode::Simple).await;

    assert_eq!(
        outcome,
        Submission::Created {
            project_id: Some("42".to_string())
        }
    );
    assert_eq!(
        p.dom.banners(&p.form),
        vec![(BannerKind::Success, "ok".to_string())]
    );
    assert_eq!(
        p.navigator.history(),
        vec![Navigation::Assign("/project/42".to_string())]
    );
}

#[tokio::test]
async fn create_music_sends_fields_mode_and_headers() {
    let p = page("en");
    p.dom.choose_file(&p.file_input, Some(midi("sketch.mid")));
    p.transport
        .push(Ok(json_response(json!({"status": "success", "message": "ok"}))));

    let outcome = p.controller.create_music(FormMode::Advanced).await;
    assert_eq!(outcome, Submission::Created { project_id: None });
    assert!(p.navigator.history().is_empty());

    let requests = p.transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://studio.test/create_music");
    assert!(requests[0]
        .headers
        .contains(&("X-Requested-With".to_string(), "XMLHttpRequest".to_string())));
    assert!(requests[0]
        .headers
        .contains(&("Accept".to_string(), "application/json".to_string())));
    let RecordedBody::Multipart(form) = &requests[0].body else {
        panic!("expected multipart body");
    };
    assert_eq!(form.field("style"), Some("pop"));
    assert_eq!(form.field("tempo"), Some("120"));
    assert_eq!(form.field("mode"), Some("advanced"));
    assert_eq!(form.files().len(), 1);
    assert_eq!(form.files()[0].field, "incomplete_track");
    assert!(!p.dom.is_disabled(&p.advanced_button));
}

#[tokio::test]
async fn create_music_network_rejection_scenario() {
    let p = page("en");
    p.transport
        .push(Err(ApiError::Network("connection reset".to_string())));

    let outcome = p.controller.create_music(FormMode::Simple).await;

    let fallback = "An error occurred while generating music".to_string();
    assert_eq!(outcome, Submission::Failed(fallback.clone()));
    assert_eq!(p.dom.banners(&p.form), vec![(BannerKind::Error, fallback)]);
    assert!(!p.dom.is_disabled(&p.simple_button));
    assert_eq!(p.dom.inner_html(&p.simple_button), BUTTON_LABEL);
    assert!(p.navigator.history().is_empty());
}

#[tokio::test]
async fn create_music_failure_status_shows_server_message() {
    let p = page("zh_CN");
    p.transport.push(Ok(json_response(
        json!({"status": "error", "message": "quota exceeded"}),
    )));
    p.transport.push(Ok(json_response(json!({"status": "error"}))));

    let first = p.controller.create_music(FormMode::Simple).await;
    let second = p.controller.create_music(FormMode::Simple).await;

    assert_eq!(first, Submission::Failed("quota exceeded".to_string()));
    assert_eq!(second, Submission::Failed("生成音乐时发生错误".to_string()));
    assert_eq!(
        p.dom.banners(&p.form),
        vec![
            (BannerKind::Error, "生成音乐时发生错误".to_string()),
            (BannerKind::Error, "quota exceeded".to_string()),
        ]
    );
}

#[tokio::test]
async fn create_music_follows_redirects() {
    let p = page("en");
    p.transport.push(Ok(RawResponse {
        redirected_to: Some("http://studio.test/auth/login".to_string()),
        ..html_response("<html>login</html>")
    }));

    let outcome = p.controller.create_music(FormMode::Simple).await;

    assert_eq!(
        outcome,
        Submission::Redirected("http://studio.test/auth/login".to_string())
    );
    assert_eq!(
        p.navigator.history(),
        vec![Navigation::Assign("http://studio.test/auth/login".to_string())]
    );
    assert!(p.dom.banners(&p.form).is_empty());
    assert!(p.dom.is_disabled(&p.simple_button));
}

#[tokio::test]
async fn create_music_rejects_non_json_bodies() {
    let p = page("en");
    p.transport.push(Ok(html_response("<html>oops</html>")));

    let outcome = p.controller.create_music(FormMode::Simple).await;

    let message = "Not signed in, or the server returned a non-JSON response".to_string();
    assert_eq!(outcome, Submission::Failed(message.clone()));
    assert_eq!(p.dom.banners(&p.form), vec![(BannerKind::Error, message)]);
    assert!(!p.dom.is_disabled(&p.simple_button));
}

#[tokio::test]
async fn create_music_without_form_sends_nothing() {
    let dom = MemoryDom::new();
    let p = page("en");
    let controller = FormController::new(dom, p.services.clone());

    assert_eq!(controller.create_music(FormMode::Simple).await, Submission::Aborted);
    assert!(p.transport.requests().is_empty());
}

#[test]
fn file_select_and_clear() {
    let p = page("en");
    p.dom.choose_file(&p.file_input, Some(midi("sketch.mid")));
    p.controller.handle_file_select(&p.file_input);

    assert_eq!(p.dom.text(&p.file_label), "sketch.mid");
    assert_eq!(p.dom.text(&p.preview_name), "sketch.mid");
    assert!(!p.dom.has_class(&p.preview, "d-none"));

    p.controller.clear_file_input();
    assert_eq!(p.dom.selected_file_name(&p.file_input), None);
    assert_eq!(p.dom.text(&p.file_label), "No file chosen");
    assert!(p.dom.has_class(&p.preview, "d-none"));
}

#[test]
fn deselecting_a_file_hides_the_preview() {
    let p = page("zh_TW");
    p.dom.choose_file(&p.file_input, Some(midi("a.mid")));
    p.controller.handle_file_select(&p.file_input);
    p.dom.choose_file(&p.file_input, None);
    p.controller.handle_file_select(&p.file_input);

    assert_eq!(p.dom.text(&p.file_label), "未選擇檔案");
    assert!(p.dom.has_class(&p.preview, "d-none"));
    assert_eq!(p.controller.file_input(), Some(p.file_input));
}

