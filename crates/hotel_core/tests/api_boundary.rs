use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use hotel_core::api::{
    log_requests, ApiError, ApiPath, ApiQuery, ApiResult, PageParams, ValidatedJson,
};
use hotel_core::validation::not_blank;
use hotel_core::{DbHandle, Page, RepoError, ServiceError};
use http_body_util::BodyExt;
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;
use tower::ServiceExt;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct Probe {
    #[validate(custom(function = "not_blank"))]
    display_name: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    copies: u32,
}

async fn by_id(ApiPath(id): ApiPath<i64>) -> Json<i64> {
    Json(id)
}

async fn list(ApiQuery(params): ApiQuery<PageParams>) -> Json<Page<i64>> {
    Json(Page::new(Vec::new(), params.request(), 0))
}

async fn create(ValidatedJson(probe): ValidatedJson<Probe>) -> (StatusCode, Json<String>) {
    (StatusCode::CREATED, Json(probe.display_name))
}

async fn answer(State(db): State<DbHandle>) -> ApiResult<Json<i64>> {
    let value = db
        .run(|conn| {
            conn.query_row("SELECT 41 + 1;", [], |row| row.get::<_, i64>(0))
                .map_err(|err| ServiceError::unexpected("query failed")(RepoError::from(err)))
        })
        .await?;
    Ok(Json(value))
}

async fn missing() -> ApiResult<Json<i64>> {
    Err(ApiError::from(ServiceError::not_found("Thing with id 1 not found.")))
}

async fn broken(State(db): State<DbHandle>) -> ApiResult<Json<i64>> {
    let value = db
        .run(|conn| {
            conn.query_row("SELECT value FROM no_such_table;", [], |row| row.get(0))
                .map_err(|err| {
                    ServiceError::unexpected("Unexpected error while probing")(RepoError::from(err))
                })
        })
        .await?;
    Ok(Json(value))
}

fn app() -> Router {
    let db = DbHandle::new(Connection::open_in_memory().unwrap());
    Router::new()
        .route("/items", get(list).post(create))
        .route("/items/:id", get(by_id))
        .route("/answer", get(answer))
        .route("/missing", get(missing))
        .route("/broken", get(broken))
        .with_state(db)
        .layer(axum::middleware::from_fn(log_requests))
}

async fn call(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn path_rejection_uses_error_envelope() {
    let (status, body) = call(get_request("/items/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].is_string());

    let (status, body) = call(get_request("/items/12")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, 12);
}

#[tokio::test]
async fn page_params_default_and_clamp() {
    let (_, body) = call(get_request("/items")).await;
    assert_eq!(body["page"]["size"], 10);
    assert_eq!(body["page"]["number"], 0);

    let (_, body) = call(get_request("/items?page=2&size=1000")).await;
    assert_eq!(body["page"]["size"], 100);
    assert_eq!(body["page"]["number"], 2);

    let (status, _) = call(get_request("/items?page=-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn validated_json_reports_camel_case_fields() {
    let (status, body) = call(post_json("/items", r#"{"displayName": " ", "copies": 0}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["displayName"], "must not be blank");
    assert_eq!(body["copies"], "must be at least 1");

    let (status, body) = call(post_json("/items", r#"{"displayName": "ok", "copies": 2}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (status, body) = call(post_json("/items", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn db_handle_runs_closures_on_the_connection() {
    let (status, body) = call(get_request("/answer")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, 42);
}

#[tokio::test]
async fn service_errors_map_to_status_codes() {
    let (status, body) = call(get_request("/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Thing with id 1 not found.");

    let (status, body) = call(get_request("/broken")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Unexpected error while probing");
    assert_eq!(body["status"], 500);
}
