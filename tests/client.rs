use httpmock::prelude::*;
use premailer_client::{Client, Error, Response, STATUS_SUCCESS, SourceType, SslMode};
use serde_json::json;

const API_PATH: &str = "/api/0.1/documents";
const SOURCE_URL: &str = "http://dialect.ca/premailer-tests/base.html";

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .endpoint(server.url(API_PATH))
        .build()
        .unwrap()
}

fn created_body(server: &MockServer) -> String {
    json!({
        "status": 201,
        "message": "Created",
        "version": "0.1",
        "documents": {
            "html": server.url("/_cache/doc.html"),
            "txt": server.url("/_cache/doc.txt"),
        },
        "options": {
            "adapter": "hpricot",
            "line_length": "65",
            "link_query_string": "",
            "preserve_styles": "true",
            "remove_ids": "false",
            "remove_classes": "false",
            "remove_comments": "false",
        },
    })
    .to_string()
}

#[tokio::test]
async fn submit_posts_form_and_decodes_reply() {
    let server = MockServer::start_async().await;
    let reply = created_body(&server);
    let submit = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(API_PATH)
                .header("content-type", "application/x-www-form-urlencoded")
                .header("accept", "application/json")
                .body(
                    "url=http%3A%2F%2Fdialect.ca%2Fpremailer-tests%2Fbase.html\
                     &adapter=hpricot&line_length=65&link_query_string=\
                     &preserve_styles=true&remove_ids=false&remove_classes=false\
                     &remove_comments=false",
                );
            then.status(201)
                .header("content-type", "application/json")
                .body(&reply);
        })
        .await;

    let mut client = client_for(&server);
    client
        .options_mut()
        .set_source(Some("url"), Some(SOURCE_URL))
        .unwrap();
    assert_eq!(client.options().source_type(), Some(SourceType::Url));

    let response = client.submit().await.unwrap().response().unwrap();
    assert_eq!(response.status(), Some(STATUS_SUCCESS));
    assert_eq!(response.message(), Some("Created"));
    assert_eq!(response.version(), Some("0.1"));
    assert_eq!(response.options()["adapter"], "hpricot");
    assert_eq!(response.options()["line_length"], "65");
    assert!(response.option("base_url").is_none());
    assert_eq!(response.option_bool("preserve_styles"), Some(true));

    assert_eq!(client.response_text(), Some(reply.as_str()));
    submit.assert_async().await;
}

#[tokio::test]
async fn raw_reply_can_be_parsed_again() {
    let server = MockServer::start_async().await;
    let reply = created_body(&server);
    server
        .mock_async(|when, then| {
            when.method(POST).path(API_PATH);
            then.status(201).body(&reply);
        })
        .await;

    let mut client = client_for(&server);
    client.options_mut().html("<p>hello</p>");
    client.submit().await.unwrap();

    let again: Response = client.response_text().unwrap().parse().unwrap();
    let stored = client.response().unwrap();
    assert_eq!(again.status(), stored.status());
    assert_eq!(again.message(), stored.message());
    assert_eq!(again.documents(), stored.documents());
    assert_eq!(again.options(), stored.options());
}

#[tokio::test]
async fn base_url_and_settings_are_encoded() {
    let server = MockServer::start_async().await;
    let reply = created_body(&server);
    let submit = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(API_PATH)
                .x_www_form_urlencoded_tuple("html", "<p class=\"a\">Tom & Jerry</p>")
                .x_www_form_urlencoded_tuple("adapter", "nokogiri")
                .x_www_form_urlencoded_tuple("line_length", "40")
                .x_www_form_urlencoded_tuple("link_query_string", "utm_source=mail&utm_medium=email")
                .x_www_form_urlencoded_tuple("remove_ids", "true")
                .x_www_form_urlencoded_tuple("preserve_styles", "false")
                .body_contains("base_url=http%3A%2F%2Fb");
            then.status(201).body(&reply);
        })
        .await;

    let mut client = client_for(&server);
    client
        .options_mut()
        .html("<p class=\"a\">Tom & Jerry</p>")
        .set_base_url("http://b")
        .set_line_length(40)
        .set_link_query_string("utm_source=mail&utm_medium=email")
        .set_remove_ids(true)
        .set_preserve_styles(false)
        .set_adapter(Some("nokogiri"))
        .unwrap();

    client.submit().await.unwrap();
    submit.assert_async().await;
}

#[tokio::test]
async fn submit_without_source_makes_no_request() {
    let server = MockServer::start_async().await;
    let submit = server
        .mock_async(|when, then| {
            when.path(API_PATH);
            then.status(201);
        })
        .await;

    let mut client = client_for(&server);
    client
        .options_mut()
        .set_source(Some("url"), None)
        .unwrap();

    let err = client.submit().await.unwrap_err();
    assert!(matches!(err, Error::MissingSource));
    assert!(client.response().is_none());
    assert!(client.response_text().is_none());
    submit.assert_hits_async(0).await;
}

#[tokio::test]
async fn documents_are_fetched_on_every_call() {
    let server = MockServer::start_async().await;
    let reply = created_body(&server);
    server
        .mock_async(|when, then| {
            when.method(POST).path(API_PATH);
            then.status(201).body(&reply);
        })
        .await;
    let html = server
        .mock_async(|when, then| {
            when.method(GET).path("/_cache/doc.html");
            then.status(200)
                .header("content-type", "text/html")
                .body("<html><body><p style=\"color: red;\">Hi</p></body></html>\n");
        })
        .await;
    let text = server
        .mock_async(|when, then| {
            when.method(GET).path("/_cache/doc.txt");
            then.status(200).body("Hi\n");
        })
        .await;

    let mut client = client_for(&server);
    client.options_mut().url(SOURCE_URL);
    let response = client.submit().await.unwrap().response().unwrap();

    let first = response.get_html(SslMode::Verify).await.unwrap();
    let second = response.get_html(SslMode::Verify).await.unwrap();
    assert_eq!(first, "<html><body><p style=\"color: red;\">Hi</p></body></html>\n");
    assert_eq!(first, second);
    html.assert_hits_async(2).await;

    let plain = response.get_text(SslMode::NoVerify).await.unwrap();
    assert_eq!(plain, "Hi\n");
    text.assert_hits_async(1).await;
}

#[tokio::test]
async fn failure_status_is_passed_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(API_PATH);
            then.status(400).body(
                json!({
                    "status": 400,
                    "message": "Missing source file",
                    "version": "0.1",
                })
                .to_string(),
            );
        })
        .await;

    let mut client = client_for(&server);
    client.options_mut().url("http://example.invalid/missing.html");
    let response = client.submit().await.unwrap().response().unwrap();

    assert_eq!(response.status(), Some(400));
    assert!(!response.is_success());
    assert_eq!(response.message(), Some("Missing source file"));
    assert!(response.documents().is_empty());

    let err = response.get_html(SslMode::Verify).await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn malformed_reply_is_a_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(API_PATH);
            then.status(502).body("<html><body>Bad Gateway</body></html>");
        })
        .await;

    let mut client = client_for(&server);
    client.options_mut().url(SOURCE_URL);

    let err = client.submit().await.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(
        client.response_text(),
        Some("<html><body>Bad Gateway</body></html>")
    );
    assert!(client.response().is_none());
}

#[tokio::test]
async fn resubmit_replaces_previous_reply() {
    let server = MockServer::start_async().await;
    let reply = created_body(&server);
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(API_PATH)
                .x_www_form_urlencoded_tuple("url", SOURCE_URL);
            then.status(201).body(&reply);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(API_PATH)
                .x_www_form_urlencoded_tuple("url", "http://example.com/broken");
            then.status(500)
                .body(r#"{"status": 500, "message": "Error", "version": "0.1"}"#);
        })
        .await;

    let mut client = client_for(&server);
    client.options_mut().url(SOURCE_URL);
    client.submit().await.unwrap();
    assert!(client.response().unwrap().is_success());

    client.options_mut().url("http://example.com/broken");
    client.submit().await.unwrap();
    let response = client.response().unwrap();
    assert_eq!(response.status(), Some(500));
    assert_eq!(response.message(), Some("Error"));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let mut client = Client::builder()
        .endpoint("http://127.0.0.1:1/api/0.1/documents")
        .build()
        .unwrap();
    client.options_mut().url(SOURCE_URL);

    let err = client.submit().await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }), "got {err:?}");
    assert!(err.transport_code().is_some());
    assert!(client.response_text().is_none());
}
