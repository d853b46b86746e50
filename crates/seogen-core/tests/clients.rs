//! Client-level tests against a mock HTTP server.
//!
//! Uses the in-memory store and recording sink so credential mutation
//! and notification surfacing can be asserted precisely.

use seogen_core::api::auth::AuthClient;
use seogen_core::api::generate::{GENERATION_FALLBACK, GenerationClient, MISSING_KEY_NOTICE};
use seogen_core::api::keys::{KeyClient, PROVISIONING_FAILED, Plan};
use seogen_core::api::ApiErrorKind;
use seogen_core::credentials::{Credential, CredentialStore, MemoryCredentialStore};
use seogen_core::notify::MemorySink;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_stores_session_token_after_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(serde_json::json!({
            "email": "a@x.com",
            "password": "pw"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "tok123"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    let client = AuthClient::new(server.uri());

    let token = client.login(&store, "a@x.com", "pw").await.unwrap();
    assert_eq!(token, "tok123");
    assert_eq!(store.get(), Some(Credential::Session("tok123".to_string())));
}

#[tokio::test]
async fn test_failed_login_leaves_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "bad credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    store.set(Credential::ApiKey("key_old".to_string())).unwrap();

    let client = AuthClient::new(server.uri());
    let err = client.login(&store, "a@x.com", "wrong").await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::HttpStatus);
    assert_eq!(store.get(), Some(Credential::ApiKey("key_old".to_string())));
}

#[tokio::test]
async fn test_login_without_token_field_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    let client = AuthClient::new(server.uri());

    let err = client.login(&store, "a@x.com", "pw").await.unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Parse);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_register_does_not_parse_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AuthClient::new(server.uri());
    client.register("a@x.com", "pw").await.unwrap();
}

#[tokio::test]
async fn test_create_key_with_empty_store_sends_empty_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-api-key"))
        .and(header("x-api-key", ""))
        .and(body_json(serde_json::json!({"plan": "basic"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "created",
            "api_key": "key_abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    let sink = MemorySink::new();
    let client = KeyClient::new(server.uri());

    let outcome = client.create_key(&store, &sink, Plan::Basic).await.unwrap();

    assert_eq!(outcome.api_key.as_deref(), Some("key_abc"));
    assert_eq!(sink.messages(), vec!["created"]);
    assert_eq!(store.get(), Some(Credential::ApiKey("key_abc".to_string())));
}

#[tokio::test]
async fn test_create_key_overwrites_session_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-api-key"))
        .and(header("x-api-key", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "created",
            "api_key": "key_abc"
        })))
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    store.set(Credential::Session("tok123".to_string())).unwrap();

    let sink = MemorySink::new();
    let client = KeyClient::new(server.uri());
    client.create_key(&store, &sink, Plan::Pro).await.unwrap();

    // Last write wins: the api key replaces the session token.
    assert_eq!(store.get(), Some(Credential::ApiKey("key_abc".to_string())));
}

#[tokio::test]
async fn test_create_key_surfaces_message_on_failure_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create-api-key"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "message": "invalid plan"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    let sink = MemorySink::new();
    let client = KeyClient::new(server.uri());

    let outcome = client.create_key(&store, &sink, Plan::Basic).await.unwrap();

    // Exactly one notification with the server's text, despite the 400.
    assert_eq!(sink.messages(), vec!["invalid plan"]);
    assert_eq!(outcome.api_key, None);
    assert_eq!(store.get(), None);
}

#[tokio::test]
async fn test_create_key_transport_failure_mutates_nothing() {
    // A non-pooled server: dropping it actually closes the listener,
    // unlike `MockServer::start()` whose pooled server keeps serving.
    let server = MockServer::builder().start().await;
    let dead_uri = server.uri();
    drop(server);

    let store = MemoryCredentialStore::new();
    store.set(Credential::Session("tok123".to_string())).unwrap();

    let sink = MemorySink::new();
    let client = KeyClient::new(dead_uri);

    let err = client.create_key(&store, &sink, Plan::Basic).await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Transport);
    assert_eq!(sink.messages(), vec![PROVISIONING_FAILED]);
    assert_eq!(store.get(), Some(Credential::Session("tok123".to_string())));
}

#[tokio::test]
async fn test_generate_with_empty_store_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-seo"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    let sink = MemorySink::new();
    let client = GenerationClient::new(server.uri());

    let err = client
        .generate(&store, &sink, "Shoes", "red,leather")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Precondition);
    assert_eq!(sink.messages(), vec![MISSING_KEY_NOTICE]);
}

#[tokio::test]
async fn test_generate_returns_description_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-seo"))
        .and(header("x-api-key", "key_abc"))
        .and(body_json(serde_json::json!({
            "title": "Shoes",
            "keywords": "red,leather"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "seo_description": "Stylish red leather shoes."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    store.set(Credential::ApiKey("key_abc".to_string())).unwrap();

    let sink = MemorySink::new();
    let client = GenerationClient::new(server.uri());

    let text = client
        .generate(&store, &sink, "Shoes", "red,leather")
        .await
        .unwrap();

    assert_eq!(text, "Stylish red leather shoes.");
    assert!(sink.messages().is_empty());
}

#[tokio::test]
async fn test_generate_without_description_field_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-seo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    store.set(Credential::ApiKey("key_abc".to_string())).unwrap();

    let sink = MemorySink::new();
    let client = GenerationClient::new(server.uri());

    let err = client
        .generate(&store, &sink, "Shoes", "red,leather")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Parse);
    // The caller renders this as the fixed fallback text.
    assert!(!GENERATION_FALLBACK.is_empty());
}
