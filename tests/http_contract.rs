mod support;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use client_api::build_router;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use support::{
    EXISTING_ID, EXISTING_NAME, NON_EXISTING_ID, SEEDED_CLIENTS, seeded_state,
};

async fn seeded_app() -> Router {
    build_router(seeded_state().await)
}

async fn request_json(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.expect("request must complete");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must collect")
        .to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body must be JSON")
    };

    (status, headers, body)
}

fn get(uri: impl AsRef<str>) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri.as_ref())
        .body(Body::empty())
        .expect("valid request")
}

fn with_json_body(method: &str, uri: String, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn new_client_body() -> Value {
    json!({
        "name": "Luan",
        "cpf": "1235489461",
        "income": 2000.0,
        "birthDate": "1958-09-20T08:00:00Z",
        "children": 1
    })
}

fn assert_error_body(body: &Value, status: u16, error: &str, path: &str) {
    assert_eq!(body.get("status").and_then(Value::as_u64), Some(u64::from(status)));
    assert_eq!(body.get("error").and_then(Value::as_str), Some(error));
    assert_eq!(body.get("path").and_then(Value::as_str), Some(path));
    assert!(body.get("timestamp").and_then(Value::as_str).is_some());
    assert!(body.get("message").and_then(Value::as_str).is_some());
}

#[tokio::test]
async fn get_by_id_returns_client_dto_when_id_exists() {
    let (status, _, body) = request_json(
        seeded_app().await,
        get(format!("/clients/{EXISTING_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("id").and_then(Value::as_i64), Some(EXISTING_ID));
    assert_eq!(body.get("name").and_then(Value::as_str), Some(EXISTING_NAME));
}

#[tokio::test]
async fn get_by_id_returns_not_found_with_error_body_when_id_does_not_exist() {
    let (status, _, body) = request_json(
        seeded_app().await,
        get(format!("/clients/{NON_EXISTING_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_body(
        &body,
        404,
        "Resource not found",
        &format!("/clients/{NON_EXISTING_ID}"),
    );
}

#[tokio::test]
async fn list_returns_page_envelope() {
    let (status, _, body) = request_json(seeded_app().await, get("/clients")).await;

    assert_eq!(status, StatusCode::OK);
    let content = body
        .get("content")
        .and_then(Value::as_array)
        .expect("page body must include content");
    assert_eq!(content.len() as u64, SEEDED_CLIENTS);
    assert_eq!(
        body.get("totalElements").and_then(Value::as_u64),
        Some(SEEDED_CLIENTS)
    );
    assert_eq!(body.get("page").and_then(Value::as_u64), Some(0));
    assert_eq!(body.get("size").and_then(Value::as_u64), Some(12));
    assert_eq!(body.get("totalPages").and_then(Value::as_u64), Some(1));
}

#[tokio::test]
async fn list_honors_page_size_and_sort_params() {
    let (status, _, body) = request_json(
        seeded_app().await,
        get("/clients?page=1&size=5&sort=name&direction=asc"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let content = body
        .get("content")
        .and_then(Value::as_array)
        .expect("page body must include content");
    assert_eq!(content.len(), 5);
    assert_eq!(
        body.get("totalElements").and_then(Value::as_u64),
        Some(SEEDED_CLIENTS)
    );
    assert_eq!(body.get("totalPages").and_then(Value::as_u64), Some(3));

    let (_, _, first_page) = request_json(
        seeded_app().await,
        get("/clients?page=0&size=5&sort=name&direction=asc"),
    )
    .await;
    let first = first_page
        .get("content")
        .and_then(Value::as_array)
        .and_then(|content| content.first())
        .expect("first page must have content");
    assert_eq!(
        first.get("name").and_then(Value::as_str),
        Some("Carolina Maria de Jesus")
    );
}

#[tokio::test]
async fn find_all_returns_plain_list() {
    let (status, _, body) = request_json(seeded_app().await, get("/clients/findAll")).await;

    assert_eq!(status, StatusCode::OK);
    let clients = body.as_array().expect("body must be an array");
    assert_eq!(clients.len() as u64, SEEDED_CLIENTS);
}

#[tokio::test]
async fn post_creates_client_and_points_location_at_it() {
    let body = new_client_body();
    let (status, headers, created) = request_json(
        seeded_app().await,
        with_json_body("POST", "/clients".to_string(), &body),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let new_id = SEEDED_CLIENTS as i64 + 1;
    assert_eq!(created.get("id").and_then(Value::as_i64), Some(new_id));
    assert_eq!(created.get("name"), body.get("name"));
    assert_eq!(created.get("cpf"), body.get("cpf"));
    assert_eq!(created.get("income"), body.get("income"));
    assert_eq!(created.get("birthDate"), body.get("birthDate"));
    assert_eq!(created.get("children"), body.get("children"));
    assert_eq!(
        headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some(format!("/clients/{new_id}").as_str())
    );
}

#[tokio::test]
async fn put_returns_updated_client_with_same_id() {
    let body = new_client_body();
    let (status, _, updated) = request_json(
        seeded_app().await,
        with_json_body("PUT", format!("/clients/{EXISTING_ID}"), &body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated.get("id").and_then(Value::as_i64), Some(EXISTING_ID));
    assert_eq!(updated.get("name"), body.get("name"));
    assert_eq!(updated.get("cpf"), body.get("cpf"));
    assert_eq!(updated.get("income"), body.get("income"));
    assert_eq!(updated.get("birthDate"), body.get("birthDate"));
    assert_eq!(updated.get("children"), body.get("children"));
}

#[tokio::test]
async fn put_returns_not_found_with_error_body_when_id_does_not_exist() {
    let (status, _, body) = request_json(
        seeded_app().await,
        with_json_body(
            "PUT",
            format!("/clients/{NON_EXISTING_ID}"),
            &new_client_body(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_body(
        &body,
        404,
        "Resource not found",
        &format!("/clients/{NON_EXISTING_ID}"),
    );
}

#[tokio::test]
async fn delete_returns_no_content_with_empty_body_when_id_exists() {
    let app = seeded_app().await;
    let (status, _, body) = request_json(
        app.clone(),
        Request::builder()
            .method("DELETE")
            .uri(format!("/clients/{EXISTING_ID}"))
            .body(Body::empty())
            .expect("valid request"),
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _, _) = request_json(app, get(format!("/clients/{EXISTING_ID}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_not_found_when_id_does_not_exist() {
    let (status, _, body) = request_json(
        seeded_app().await,
        Request::builder()
            .method("DELETE")
            .uri(format!("/clients/{NON_EXISTING_ID}"))
            .body(Body::empty())
            .expect("valid request"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_body(
        &body,
        404,
        "Resource not found",
        &format!("/clients/{NON_EXISTING_ID}"),
    );
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let (status, _, body) = request_json(seeded_app().await, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status").and_then(Value::as_str), Some("ok"));
}
