//! Mock server tests for collections, auth flows, files and backups.
//!
//! These tests use wiremock to simulate a PocketBase server and check the
//! requests the client sends and how it reads the answers.

use pocketbase::{Client, ErrorKind, ListParams};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wiremock::matchers::{
    body_json, body_string_contains, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Post {
    title: String,
    #[serde(default)]
    published: bool,
}

fn base_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}", server.address().port())
}

/// A client that already holds `tok`, so no login mock is needed.
fn client(server: &MockServer) -> Client {
    Client::builder(base_url(server)).token("tok").build().unwrap()
}

fn post_items(range: std::ops::Range<usize>) -> Vec<Value> {
    range
        .map(|i| json!({"id": format!("p{i}"), "title": format!("post {i}")}))
        .collect()
}

// ============================================================================
// Records
// ============================================================================

#[tokio::test]
async fn test_create_record_sends_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/posts/records"))
        .and(header("Authorization", "Bearer tok"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"title": "hello", "published": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc123",
            "collectionId": "c1",
            "collectionName": "posts",
            "created": "2024-01-01 00:00:00.000Z",
            "updated": "2024-01-01 00:00:00.000Z",
            "title": "hello"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client(&server).collection::<Post>("posts");
    let meta = posts
        .create(&Post {
            title: "hello".into(),
            published: true,
        })
        .await
        .unwrap();

    assert_eq!(meta.id, "abc123");
    assert_eq!(meta.collection_name, "posts");
}

#[tokio::test]
async fn test_update_and_delete_record() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/collections/posts/records/abc123"))
        .and(body_json(json!({"title": "edited", "published": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/collections/posts/records/abc123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client(&server).collection::<Post>("posts");
    posts
        .update(
            "abc123",
            &Post {
                title: "edited".into(),
                published: false,
            },
        )
        .await
        .unwrap();
    posts.delete("abc123").await.unwrap();
}

#[tokio::test]
async fn test_one_record_with_projection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records/abc123"))
        .and(query_param("fields", "title"))
        .and(query_param("expand", "author"))
        .and(query_param_is_missing("filter"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "hello"})))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client(&server).collection::<Post>("posts");
    let params = ListParams::new()
        .fields("title")
        .expand("author")
        .filter("published = true")
        .page(3);
    let post = posts.one_with_params("abc123", &params).await.unwrap();

    assert_eq!(post.title, "hello");
    assert!(!post.published);
}

#[tokio::test]
async fn test_list_forwards_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .and(query_param("page", "2"))
        .and(query_param("perPage", "10"))
        .and(query_param("sort", "-created"))
        .and(query_param("filter", "published = true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "perPage": 10,
            "totalItems": 11,
            "totalPages": 2,
            "items": [{"title": "last", "published": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client(&server).collection::<Post>("posts");
    let params = ListParams::new()
        .page(2)
        .per_page(10)
        .sort("-created")
        .filter("published = true");
    let page = posts.list(&params).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total_items, 11);
    assert_eq!(page.items[0].title, "last");
}

#[tokio::test]
async fn test_full_list_concatenates_pages_in_order() {
    let server = MockServer::start().await;
    let items = post_items(0..5);

    for (page, chunk) in items.chunks(2).enumerate() {
        Mock::given(method("GET"))
            .and(path("/api/collections/posts/records"))
            .and(query_param("page", (page + 1).to_string().as_str()))
            .and(query_param("perPage", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": page + 1,
                "perPage": 2,
                "totalItems": 5,
                "totalPages": 3,
                "items": chunk
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let posts = client(&server).collection::<Value>("posts");
    let all = posts
        .full_list(&ListParams::new().per_page(2))
        .await
        .unwrap();

    assert_eq!(all, items);
}

#[tokio::test]
async fn test_full_list_stops_when_total_is_reached() {
    let server = MockServer::start().await;
    let items = post_items(0..4);

    for (page, chunk) in items.chunks(2).enumerate() {
        Mock::given(method("GET"))
            .and(path("/api/collections/posts/records"))
            .and(query_param("page", (page + 1).to_string().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": page + 1,
                "perPage": 2,
                "totalItems": 4,
                "totalPages": 2,
                "items": chunk
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let posts = client(&server).collection::<Value>("posts");
    let all = posts
        .full_list(&ListParams::new().per_page(2))
        .await
        .unwrap();

    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn test_full_list_follows_server_capped_page_size() {
    let server = MockServer::start().await;
    let items = post_items(0..700);

    for (page, chunk) in items.chunks(500).enumerate() {
        Mock::given(method("GET"))
            .and(path("/api/collections/posts/records"))
            .and(query_param("page", (page + 1).to_string().as_str()))
            .and(query_param("perPage", "1000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": page + 1,
                "perPage": 500,
                "totalItems": 700,
                "totalPages": 2,
                "items": chunk
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let posts = client(&server).collection::<Value>("posts");
    let all = posts
        .full_list(&ListParams::new().per_page(1000))
        .await
        .unwrap();

    assert_eq!(all.len(), 700);
    assert_eq!(all, items);
}

#[tokio::test]
async fn test_full_list_without_total_stops_on_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .and(query_param("page", "1"))
        .and(query_param("perPage", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "perPage": 500,
            "totalItems": -1,
            "totalPages": -1,
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let posts = client(&server).collection::<Value>("posts");
    let all = posts.full_list(&ListParams::new()).await.unwrap();

    assert!(all.is_empty());
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_not_found_keeps_status_and_body() {
    let server = MockServer::start().await;
    let body = r#"{"code":404,"message":"The requested resource wasn't found.","data":{}}"#;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&server)
        .await;

    let posts = client(&server).collection::<Post>("posts");
    let err = posts.one("missing").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerRejected);
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.body(), Some(body));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let posts = client(&server).collection::<Post>("posts");
    let err = posts.list(&ListParams::new()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeFailed);
    assert_eq!(err.operation(), Some("records.list"));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let client = Client::builder("http://127.0.0.1:1")
        .token("tok")
        .build()
        .unwrap();
    let err = client.files().get_token().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportFailed);
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_update_of_unknown_record_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/collections/posts/records/nope"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;

    let posts = client(&server).collection::<Post>("posts");
    let err = posts
        .update(
            "nope",
            &Post {
                title: "x".into(),
                published: false,
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerRejected);
    assert_eq!(err.body(), Some("bad request"));
}

// ============================================================================
// Auth flows
// ============================================================================

#[tokio::test]
async fn test_auth_with_password_replaces_session_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-with-password"))
        .and(body_string_contains("name=\"identity\""))
        .and(body_string_contains("alice@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "user-token",
            "record": {"id": "u1", "email": "alice@example.com", "verified": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/files/token"))
        .and(header("Authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "ft"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(base_url(&server)).unwrap();
    let users = client.collection::<Value>("users");
    let response = users
        .auth_with_password("alice@example.com", "pw")
        .await
        .unwrap();

    assert_eq!(response.record.id, "u1");
    assert!(response.record.verified);
    assert_eq!(client.files().get_token().await.unwrap(), "ft");
}

#[tokio::test]
async fn test_failed_auth_flow_keeps_previous_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-with-password"))
        .respond_with(ResponseTemplate::new(400).set_body_string("nope"))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .collection::<Value>("users")
        .auth_with_password("alice", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerRejected);
    assert_eq!(client.token().await.unwrap().as_str(), "tok");
}

#[tokio::test]
async fn test_auth_refresh_and_oauth2_store_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-refresh"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "refreshed",
            "record": {"id": "u1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-with-oauth2"))
        .and(header("Authorization", "Bearer refreshed"))
        .and(body_string_contains("name=\"codeVerifier\""))
        .and(body_string_contains("name=\"redirectUrl\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "oauth"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let users = client.collection::<Value>("users");

    users.auth_refresh().await.unwrap();
    assert_eq!(client.token().await.unwrap().as_str(), "refreshed");

    let response = users
        .auth_with_oauth2_code("github", "code", "verifier", "http://localhost/cb")
        .await
        .unwrap();
    assert_eq!(response.token, "oauth");
    assert_eq!(client.token().await.unwrap().as_str(), "oauth");
}

#[tokio::test]
async fn test_list_auth_methods() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/users/auth-methods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "usernamePassword": false,
            "emailPassword": true,
            "authProviders": [{"name": "google", "state": "s", "codeVerifier": "v"}]
        })))
        .mount(&server)
        .await;

    let methods = Client::new(base_url(&server))
        .unwrap()
        .collection::<Value>("users")
        .list_auth_methods()
        .await
        .unwrap();

    assert!(methods.email_password);
    assert_eq!(methods.auth_providers[0].code_verifier, "v");
}

#[tokio::test]
async fn test_verification_and_reset_requests() {
    let server = MockServer::start().await;

    for (action, field) in [
        ("request-verification", "email"),
        ("confirm-verification", "token"),
        ("request-password-reset", "email"),
        ("confirm-password-reset", "passwordConfirm"),
        ("request-email-change", "newEmail"),
        ("confirm-email-change", "password"),
    ] {
        Mock::given(method("POST"))
            .and(path(format!("/api/collections/users/{action}")))
            .and(body_string_contains(format!("name=\"{field}\"")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    let users = client(&server).collection::<Value>("users");
    users.request_verification("a@b.c").await.unwrap();
    users.confirm_verification("vt").await.unwrap();
    users.request_password_reset("a@b.c").await.unwrap();
    users
        .confirm_password_reset("rt", "newpass1", "newpass1")
        .await
        .unwrap();
    users.request_email_change("new@b.c").await.unwrap();
    users.confirm_email_change("ct", "pw").await.unwrap();
}

#[tokio::test]
async fn test_external_auths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/users/records/u1/external-auths"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "e1", "recordId": "u1", "provider": "github", "providerId": "42"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/collections/users/records/u1/external-auths/github"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let users = client(&server).collection::<Value>("users");
    let linked = users.list_external_auths("u1").await.unwrap();
    assert_eq!(linked[0].provider, "github");
    assert_eq!(linked[0].provider_id, "42");

    users.unlink_external_auth("u1", "github").await.unwrap();
}

#[tokio::test]
async fn test_auth_flow_with_empty_token_keeps_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": ""})))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .collection::<Value>("users")
        .auth_refresh()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthorizationFailed);
    assert_eq!(client.token().await.unwrap().as_str(), "tok");
}

// ============================================================================
// Backups
// ============================================================================

#[tokio::test]
async fn test_backup_listing_and_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/backups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"key": "nightly.zip", "size": 2048, "modified": "2024-01-01 00:00:00.000Z"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/backups"))
        .and(body_string_contains("nightly.zip"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/backups/nightly.zip/restore"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/backups/nightly.zip"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let backups = client(&server).backups();
    let list = backups.full_list().await.unwrap();
    assert_eq!(list[0].key, "nightly.zip");
    assert_eq!(list[0].size, 2048);

    backups.create(Some("Nightly")).await.unwrap();
    backups.restore("nightly.zip").await.unwrap();
    backups.delete("nightly.zip").await.unwrap();
}

#[tokio::test]
async fn test_backup_upload_from_file() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/backups/upload"))
        .and(body_string_contains("filename=\"old.zip\""))
        .and(body_string_contains("archive-bytes"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("old.zip");
    std::fs::write(&archive, b"archive-bytes").unwrap();

    client(&server)
        .backups()
        .upload_file("old.zip", &archive)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_backup_upload_of_missing_file_is_invalid_input() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let err = client(&server)
        .backups()
        .upload_file("x.zip", dir.path().join("missing.zip"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_download_url_makes_no_request() {
    let server = MockServer::start().await;
    let backups = client(&server).backups();

    let url = backups.download_url("t", "k").unwrap();
    assert_eq!(url, format!("{}/api/backups/k?token=t", base_url(&server)));

    let err = backups.download_url("", "k").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    let err = backups.download_url("t", "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert!(server.received_requests().await.unwrap().is_empty());
}
