use std::sync::Mutex;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
};
use http_body_util::BodyExt as _;
use movies_app::{
    contract::{GetListResponse, MovieRequest, MovieResponse, Pagination},
    rest_api::api_router,
    service::{MovieService, ServiceError},
    state::{AppConfig, AppState},
};
use movies_dal::ListParams;
use movies_types::Lang;
use serde_json::{Value, json};
use tower::ServiceExt as _;

const FOUND_ID: i64 = 1;
const BROKEN_ID: i64 = 3;

/// Service with canned answers, remembers last received input
#[derive(Default)]
struct StubService {
    last_request: Mutex<Option<MovieRequest>>,
    last_params: Mutex<Option<ListParams>>,
}

fn response(id: i64, request: &MovieRequest) -> MovieResponse {
    MovieResponse {
        id,
        title: request.title.clone(),
        description: request.description.clone(),
        rating: request.rating,
        image: request.image.clone(),
        created_at: "2024-05-01 10:00:00".into(),
        updated_at: "2024-05-01 10:00:00".into(),
    }
}

fn lookup(id: i64) -> Result<MovieResponse, ServiceError> {
    match id {
        FOUND_ID => Ok(response(
            FOUND_ID,
            &MovieRequest {
                title: "alien".into(),
                rating: 8.5,
                ..Default::default()
            },
        )),
        BROKEN_ID => Err(ServiceError::Repository(movies_dal::Error::DatabaseError(
            movies_dal::SqlxError::PoolTimedOut,
        ))),
        _ => Err(ServiceError::MovieNotFound),
    }
}

impl MovieService for StubService {
    async fn get(&self, id: i64) -> Result<MovieResponse, ServiceError> {
        lookup(id)
    }

    async fn list(&self, params: ListParams) -> Result<GetListResponse, ServiceError> {
        let page = params.page;
        *self.last_params.lock().unwrap() = Some(params);
        Ok(GetListResponse {
            data: vec![lookup(FOUND_ID)?],
            pagination: Pagination::new(page, 10, 1),
        })
    }

    async fn create(&self, request: MovieRequest) -> Result<MovieResponse, ServiceError> {
        let created = response(10, &request);
        *self.last_request.lock().unwrap() = Some(request);
        Ok(created)
    }

    async fn update(
        &self,
        request: MovieRequest,
        id: i64,
    ) -> Result<MovieResponse, ServiceError> {
        lookup(id)?;
        let updated = response(id, &request);
        *self.last_request.lock().unwrap() = Some(request);
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        lookup(id).map(|_| ())
    }
}

fn app_with(default_language: Lang) -> (Router, AppState<StubService>) {
    let state = AppState::new(
        StubService::default(),
        AppConfig {
            default_page_size: 10,
            default_language,
        },
    );
    (api_router(state.clone()), state)
}

fn app() -> (Router, AppState<StubService>) {
    app_with(Lang::En)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response: Response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-request-id", "test-request")
        .body(Body::empty())
        .unwrap()
}

fn with_json(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_get_movie() {
    let (app, _) = app();
    let (status, body) = send(app, get("/movies/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["title"], "alien");
    assert_eq!(body["metadata"]["request_id"], "test-request");
}

#[tokio::test]
async fn test_get_invalid_id() {
    let (app, _) = app();
    let (status, body) = send(app, get("/movies/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["code"], "err_bad_request");
    assert_eq!(body["metadata"]["request_id"], "test-request");
}

#[tokio::test]
async fn test_get_not_found() {
    let (app, _) = app();
    let (status, body) = send(app, get("/movies/2")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "err_movie_id_not_found");
    assert_eq!(body["error"]["message_title"], "Movie Not Found");
    assert_eq!(body["error"]["message_severity"], "error");
}

#[tokio::test]
#[tracing_test::traced_test]
async fn test_internal_error() {
    let (app, _) = app();
    let (status, body) = send(app, get("/movies/3")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "err_internal_server");
    // details are logged, not returned
    assert!(!body["error"]["message"].as_str().unwrap().contains("pool"));
    assert!(logs_contain("Internal error"));
}

#[tokio::test]
async fn test_localized_error() {
    let (app, _) = app();
    let request = Request::builder()
        .uri("/movies/2")
        .header("accept-language", "id-ID,id;q=0.9,en;q=0.8")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(app, request).await;
    assert_eq!(body["error"]["message_title"], "Film Tidak Ditemukan");

    let (app, _) = app_with(Lang::Id);
    let (_, body) = send(app, get("/movies/2")).await;
    assert_eq!(body["error"]["message_title"], "Film Tidak Ditemukan");
}

#[tokio::test]
async fn test_list_defaults() {
    let (app, state) = app();
    let (status, body) = send(app, get("/movies")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["page"], 1);
    assert_eq!(body["data"]["pagination"]["total_page"], 1);
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 1);

    let params = state.service().last_params.lock().unwrap().clone().unwrap();
    assert_eq!(params, ListParams::new(1, 10, ""));
}

#[tokio::test]
async fn test_list_query() {
    let (app, state) = app();
    let (status, _) = send(app, get("/movies?page=2&limit=5&keyword=alien")).await;
    assert_eq!(status, StatusCode::OK);
    let params = state.service().last_params.lock().unwrap().clone().unwrap();
    assert_eq!(params.offset, 5);
    assert_eq!(params.keyword, "alien");
}

#[tokio::test]
async fn test_list_invalid_page() {
    let (app, _) = app();
    let (status, body) = send(app, get("/movies?page=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "err_bad_request");
}

#[tokio::test]
async fn test_create_movie() {
    let (app, state) = app();
    let request = with_json(
        Method::POST,
        "/movies",
        json!({"title": "The Thing", "description": "antarctica", "rating": 8.2}),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 10);
    assert_eq!(body["data"]["title"], "the thing");

    let received = state.service().last_request.lock().unwrap().clone().unwrap();
    assert_eq!(received.title, "the thing");
    assert_eq!(received.image, "");
}

#[tokio::test]
async fn test_create_invalid_body() {
    let (app, state) = app();
    let request = with_json(Method::POST, "/movies", json!({"description": "no title"}));
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("title"), "{message}");
    assert!(message.contains("rating"), "{message}");
    assert!(state.service().last_request.lock().unwrap().is_none());

    let (app, _) = app_with(Lang::En);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/movies")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "err_bad_request");
}

#[tokio::test]
async fn test_update_movie() {
    let (app, _) = app();
    let request = with_json(
        Method::PATCH,
        "/movies/1",
        json!({"title": "ALIEN", "rating": 9.0}),
    );
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "alien");

    let (app, _) = self::app();
    let request = with_json(
        Method::PATCH,
        "/movies/2",
        json!({"title": "missing", "rating": 1.0}),
    );
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_movie() {
    let (app, _) = app();
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/movies/1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "success delete movie");

    let (app, _) = self::app();
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/movies/2")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "err_movie_id_not_found");
}
