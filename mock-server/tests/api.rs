use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use quorum_mock_server::{app, Account, CustomTag, Listing, MailingList, INVALID_KEY_BODY};
use serde_json::{Map, Value};
use tower::ServiceExt;

const AUTH: &str = "username=tester&api_key=abc123";

fn account() -> Account {
    Account::new("tester", "abc123")
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- lists ---

#[tokio::test]
async fn lists_with_valid_credentials() {
    let resp = app(account())
        .oneshot(get(&format!("/api/list/?{AUTH}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Listing<MailingList> = body_json(resp).await;
    assert_eq!(listing.meta.model, "List");
    assert_eq!(listing.meta.total_count, listing.objects.len());
    assert!(!listing.objects.is_empty());
}

#[tokio::test]
async fn lists_without_credentials_is_401() {
    let resp = app(account()).oneshot(get("/api/list/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_bytes(resp).await, INVALID_KEY_BODY.as_bytes());
}

#[tokio::test]
async fn lists_with_wrong_key_is_401() {
    let resp = app(account())
        .oneshot(get("/api/list/?username=tester&api_key=nope"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- custom tags ---

#[tokio::test]
async fn custom_tags_report_model() {
    let resp = app(account())
        .oneshot(get(&format!("/api/customtag/?{AUTH}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Listing<CustomTag> = body_json(resp).await;
    assert_eq!(listing.meta.model, "CustomTag");
}

// --- supporters ---

#[tokio::test]
async fn create_supporter_returns_201_with_id() {
    let resp = app(account())
        .oneshot(json_request(
            "POST",
            &format!("/api/supporter/?{AUTH}"),
            r#"{"firstname":"Test","lastname":"User","email":"t@example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Map<String, Value> = body_json(resp).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["firstname"], "Test");
    assert_eq!(created["email"], "t@example.com");
}

#[tokio::test]
async fn create_supporter_without_email_is_400() {
    let resp = app(account())
        .oneshot(json_request(
            "POST",
            &format!("/api/supporter/?{AUTH}"),
            r#"{"firstname":"Test"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "email is required");
}

#[tokio::test]
async fn create_supporter_checks_credentials_first() {
    let resp = app(account())
        .oneshot(json_request(
            "POST",
            "/api/supporter/?username=tester&api_key=wrong",
            r#"{"email":"t@example.com"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn supporters_persist_across_requests() {
    use tower::Service;

    let mut app = app(account()).into_service();

    for email in ["a@example.com", "b@example.com"] {
        let body = format!(r#"{{"email":"{email}"}}"#);
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", &format!("/api/supporter/?{AUTH}"), &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/supporter/?{AUTH}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Listing<Map<String, Value>> = body_json(resp).await;
    assert_eq!(listing.meta.model, "Supporter");
    assert_eq!(listing.meta.total_count, 2);
    assert_eq!(listing.objects[0]["email"], "a@example.com");
    assert_eq!(listing.objects[1]["id"], 2);
}
