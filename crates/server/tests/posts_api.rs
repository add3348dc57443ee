use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use blog_server::handler::AppRouter;
use serde_json::{Value, json};
use shared::{
    abstract_trait::{DynAuthorRepository, DynPostsRepository},
    state::AppState,
    testing::{InMemoryAuthorRepository, InMemoryPostRepository},
};
use std::sync::Arc;
use tower::ServiceExt;

async fn app() -> Router {
    let posts = Arc::new(InMemoryPostRepository::new()) as DynPostsRepository;
    let authors = Arc::new(InMemoryAuthorRepository::with_authors([1, 2])) as DynAuthorRepository;

    let state = AppState::with_repositories(posts, authors).await;

    AppRouter::build(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn create(app: &Router, text: &str, author_id: i64) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/posts",
        Some(json!({ "text": text, "authorId": author_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    body["data"]["postId"].as_i64().unwrap()
}

#[tokio::test]
async fn create_returns_created_post() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/posts",
        Some(json!({ "text": "Sample Post", "authorId": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Post saved successfully");
    assert_eq!(body["data"]["text"], "Sample Post");
    assert_eq!(body["data"]["authorId"], 1);
    assert_eq!(body["data"]["isDeleted"], false);
}

#[tokio::test]
async fn create_with_unknown_author_is_bad_request() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/posts",
        Some(json!({ "text": "Sample Post", "authorId": 99 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "INVALID_REFERENCE");
}

#[tokio::test]
async fn create_with_empty_text_is_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/posts",
        Some(json!({ "text": "", "authorId": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_ignores_author_in_body() {
    let app = app().await;
    let id = create(&app, "Sample Post", 1).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/posts/{id}"),
        Some(json!({ "text": "Updated Post", "authorId": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post updated successfully");
    assert_eq!(body["data"]["text"], "Updated Post");
    assert_eq!(body["data"]["authorId"], 1);
}

#[tokio::test]
async fn delete_then_get_shows_soft_deleted_post() {
    let app = app().await;
    let id = create(&app, "Sample Post", 1).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/posts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Post deleted successfully");
    assert_eq!(body["data"], id);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/posts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post fetched successfully");
    assert_eq!(body["data"]["isDeleted"], true);
    assert_eq!(body["data"]["text"], "Sample Post");
}

#[tokio::test]
async fn unknown_post_is_not_found() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/posts/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "NOT_FOUND");

    let (status, _) = send(&app, Method::DELETE, "/api/v1/posts/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/posts/0",
        Some(json!({ "text": "Updated Post" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn author_listings_split_active_and_deleted() {
    let app = app().await;
    let kept = create(&app, "Active Post", 1).await;
    let removed = create(&app, "Deleted Post", 1).await;
    create(&app, "Someone else", 2).await;
    send(&app, Method::DELETE, &format!("/api/v1/posts/{removed}"), None).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/posts/author-posts/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Posts fetched successfully");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/posts/author-deleted-posts/1",
        None,
    )
    .await;
    let deleted = body["data"].as_array().unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0]["postId"], removed);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/posts/author-active-posts/1",
        None,
    )
    .await;
    let active = body["data"].as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["postId"], kept);

    let (status, body) = send(&app, Method::GET, "/api/v1/posts/author-posts/9", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "INVALID_REFERENCE");
}

#[tokio::test]
async fn list_all_includes_deleted_posts() {
    let app = app().await;
    create(&app, "Sample Post 1", 1).await;
    let removed = create(&app, "Sample Post 2", 2).await;
    send(&app, Method::DELETE, &format!("/api/v1/posts/{removed}"), None).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/posts", None).await;

    assert_eq!(status, StatusCode::OK);
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["text"], "Sample Post 1");
    assert_eq!(posts[1]["text"], "Sample Post 2");
}

#[tokio::test]
async fn paginates_with_sort() {
    let app = app().await;
    for text in ["Sample Post 1", "Sample Post 2", "Sample Post 3", "Sample Post 4"] {
        create(&app, text, 1).await;
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/posts/by-page?pageNumber=0&pageSize=3&sort=postId,asc",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Posts fetched successfully");
    let texts: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, ["Sample Post 1", "Sample Post 2", "Sample Post 3"]);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/v1/posts/by-page?pageNumber=0&pageSize=2&sort=id,desc",
        None,
    )
    .await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["postId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [4, 3]);
}

#[tokio::test]
async fn rejects_bad_page_parameters() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/posts/by-page?pageNumber=0&pageSize=3&sort=title,asc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/posts/by-page?pageNumber=-1&pageSize=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/posts/by-page?pageNumber=0&pageSize=0",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_query_values_get_an_error_body() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/posts/by-page?pageNumber=abc&pageSize=3",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_ids_get_an_error_body() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/posts/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::DELETE, "/api/v1/posts/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/posts/author-posts/abc",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn exposes_request_metrics() {
    let app = app().await;
    create(&app, "Sample Post", 1).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("post_service_request_counter"));
}
