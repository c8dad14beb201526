use e2e::test_server::TestServer;

#[tokio::test]
#[ignore = "boots the web server with cargo run"]
async fn test_studio_page_loads() {
    let server = TestServer::start()
        .await
        .expect("Failed to start test server");

    let response = reqwest::get(server.url())
        .await
        .expect("Failed to fetch studio page");

    assert_eq!(response.status(), 200, "Studio page should return 200 OK");

    let body = response.text().await.expect("Failed to read body");
    assert!(
        body.contains("musicGenerationForm") || body.contains("DOCTYPE"),
        "Should contain the studio markup"
    );
}
