use e2e::{browser::Browser, test_server::TestServer};
use std::time::Duration;

#[tokio::test]
#[ignore = "needs Chrome and boots the web server"]
async fn test_mode_toggle_and_range_labels() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");

    let browser = Browser::launch().expect("Failed to launch browser");
    let page = browser.new_page().expect("Failed to create page");
    page.goto(server.url()).expect("Failed to navigate");

    page.wait_until(Duration::from_secs(10), |p| {
        p.has_class("#simpleMode", "active").unwrap_or(false)
    })
    .expect("Studio should mount");

    page.click("#advancedMode").expect("Advanced toggle");
    page.wait_until(Duration::from_secs(5), |p| {
        p.has_class("#advancedMode", "active").unwrap_or(false)
            && p.has_class("#simpleForm", "hidden").unwrap_or(false)
    })
    .expect("Advanced form should be shown");

    let tempo = page.text_of("#tempoValue").expect("Tempo label");
    assert!(tempo.ends_with("BPM"), "Tempo label should carry its unit: {tempo}");
}

#[tokio::test]
#[ignore = "needs Chrome and boots the web server"]
async fn test_language_is_persisted_locally() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");

    let browser = Browser::launch().expect("Failed to launch browser");
    let page = browser.new_page().expect("Failed to create page");
    page.goto(server.url()).expect("Failed to navigate");

    page.wait_until(Duration::from_secs(10), |p| {
        p.eval_string("localStorage.getItem('language')")
            .ok()
            .flatten()
            .is_some()
    })
    .expect("Language should be seeded on load");

    let stored = page
        .eval_string("localStorage.getItem('language')")
        .expect("eval")
        .unwrap_or_default();
    assert_eq!(stored, "zh_CN");

    let label = page
        .text_of("#current-language-text")
        .expect("Language label");
    assert_eq!(label, "简体中文");
}

#[tokio::test]
#[ignore = "needs Chrome and boots the web server"]
async fn test_studio_reached_by_client_side_navigation_is_wired() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");

    let browser = Browser::launch().expect("Failed to launch browser");
    let page = browser.new_page().expect("Failed to create page");
    let project_url = format!("{}/project/x", server.url());
    page.goto(&project_url).expect("Failed to navigate");
    page.eval_string("localStorage.setItem('language', 'en')")
        .expect("Seed language");
    page.goto(&project_url).expect("Failed to reload");

    page.click("a.nav_link").expect("Create link");
    page.wait_until(Duration::from_secs(10), |p| {
        p.text_of(r#"[data-i18n="form.tempo"]"#)
            .map(|text| text == "Tempo")
            .unwrap_or(false)
    })
    .expect("Studio mounted by the router should be translated");
    page.click("#advancedMode").expect("Advanced toggle");

    page.eval_string(
        r#"(() => {
            const input = document.querySelector('input[name="tempo"]');
            input.value = '96';
            input.dispatchEvent(new Event('input', { bubbles: true }));
            return input.value;
        })()"#,
    )
    .expect("Drive tempo input");
    page.wait_until(Duration::from_secs(5), |p| {
        p.text_of("#tempoValue")
            .map(|text| text == "96 BPM")
            .unwrap_or(false)
    })
    .expect("Tempo label should follow its input");
}
