use crate::{
    handler::error_response,
    middleware::{SimplePath, SimpleQuery, SimpleValidatedJson},
};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::{
    domain::{
        ApiResponse, CreatePostRequest, ErrorResponse, FindPagedPostsRequest, PostResponse,
        PostSort, UpdatePostRequest,
    },
    model::posts::Post,
    state::AppState,
};
use shared::abstract_trait::PostsServiceTrait;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn posts_response(posts: Vec<Post>) -> Json<ApiResponse<Vec<PostResponse>>> {
    Json(ApiResponse::success(
        "Posts fetched successfully",
        posts.into_iter().map(PostResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = ApiResponse<PostResponse>),
        (status = 400, description = "Unknown author or invalid body", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn create_post(
    State(data): State<Arc<AppState>>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreatePostRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let post = data
        .di_container
        .post_service
        .create_post(&body)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Post saved successfully",
            PostResponse::from(post),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    params(
        ("id" = i64, Path, description = "Post ID")
    ),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post text updated", body = ApiResponse<PostResponse>),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn update_post(
    State(data): State<Arc<AppState>>,
    SimplePath(id): SimplePath<i64>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdatePostRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let post = data
        .di_container
        .post_service
        .update_post(&body, id)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Post updated successfully",
            PostResponse::from(post),
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(
        ("id" = i64, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post marked as deleted, data is its id", body = ApiResponse<i64>),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn delete_post(
    State(data): State<Arc<AppState>>,
    SimplePath(id): SimplePath<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    data.di_container
        .post_service
        .delete_post(id)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Post deleted successfully", id)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(
        ("id" = i64, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post, including soft-deleted ones", body = ApiResponse<PostResponse>),
        (status = 404, description = "Post not found", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_post(
    State(data): State<Arc<AppState>>,
    SimplePath(id): SimplePath<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    let post = data
        .di_container
        .post_service
        .get_post(id)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Post fetched successfully",
            PostResponse::from(post),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses(
        (status = 200, description = "Every post, including soft-deleted ones", body = ApiResponse<Vec<PostResponse>>)
    ),
    tag = "posts"
)]
pub async fn get_posts(
    State(data): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let posts = data
        .di_container
        .post_service
        .list_posts()
        .await
        .map_err(error_response)?;

    Ok((StatusCode::OK, posts_response(posts)))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/author-posts/{author_id}",
    params(
        ("author_id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "All posts of the author", body = ApiResponse<Vec<PostResponse>>),
        (status = 400, description = "Unknown author", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_author_posts(
    State(data): State<Arc<AppState>>,
    SimplePath(author_id): SimplePath<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    let posts = data
        .di_container
        .post_service
        .list_posts_by_author(author_id)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::OK, posts_response(posts)))
}

async fn author_posts_by_state(
    data: &AppState,
    author_id: i64,
    is_deleted: bool,
) -> Result<(StatusCode, Json<ApiResponse<Vec<PostResponse>>>), HandlerError> {
    let posts = data
        .di_container
        .post_service
        .list_posts_by_author_and_deleted(author_id, is_deleted)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::OK, posts_response(posts)))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/author-deleted-posts/{author_id}",
    params(
        ("author_id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Soft-deleted posts of the author", body = ApiResponse<Vec<PostResponse>>),
        (status = 400, description = "Unknown author", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_author_deleted_posts(
    State(data): State<Arc<AppState>>,
    SimplePath(author_id): SimplePath<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    author_posts_by_state(&data, author_id, true).await
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/author-active-posts/{author_id}",
    params(
        ("author_id" = i64, Path, description = "Author ID")
    ),
    responses(
        (status = 200, description = "Posts of the author that are not deleted", body = ApiResponse<Vec<PostResponse>>),
        (status = 400, description = "Unknown author", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_author_active_posts(
    State(data): State<Arc<AppState>>,
    SimplePath(author_id): SimplePath<i64>,
) -> Result<impl IntoResponse, HandlerError> {
    author_posts_by_state(&data, author_id, false).await
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/by-page",
    params(FindPagedPostsRequest),
    responses(
        (status = 200, description = "One page of posts", body = ApiResponse<Vec<PostResponse>>),
        (status = 400, description = "Invalid page or sort parameters", body = ErrorResponse)
    ),
    tag = "posts"
)]
pub async fn get_posts_by_page(
    State(data): State<Arc<AppState>>,
    SimpleQuery(params): SimpleQuery<FindPagedPostsRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let sort = params.sort.parse::<PostSort>().map_err(error_response)?;

    let posts = data
        .di_container
        .post_service
        .list_posts_paginated(params.page_number, params.page_size, sort)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::OK, posts_response(posts)))
}

pub fn post_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/v1/posts", get(get_posts).post(create_post))
        .route("/api/v1/posts/by-page", get(get_posts_by_page))
        .route(
            "/api/v1/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/api/v1/posts/author-posts/{author_id}",
            get(get_author_posts),
        )
        .route(
            "/api/v1/posts/author-deleted-posts/{author_id}",
            get(get_author_deleted_posts),
        )
        .route(
            "/api/v1/posts/author-active-posts/{author_id}",
            get(get_author_active_posts),
        )
        .with_state(app_state)
}
