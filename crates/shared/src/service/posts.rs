use crate::{
    abstract_trait::{DynAuthorRepository, DynPostsRepository, PostsServiceTrait},
    domain::{CreatePostRequest, PostSort, UpdatePostRequest},
    model::{
        author::Author,
        posts::{NewPost, Post},
    },
    utils::{AppError, Method, Metrics, Status as StatusUtils, TracingContext},
};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

/// Post management on top of the post store and the author directory.
///
/// Holds no state of its own between calls. Mutations re-read the stored post
/// and write back only the fields the operation owns, which is what keeps the
/// author binding fixed after creation.
#[derive(Clone)]
pub struct PostService {
    repository: DynPostsRepository,
    author_repository: DynAuthorRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl std::fmt::Debug for PostService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostService")
            .field("repository", &"DynPostsRepository")
            .field("author_repository", &"DynAuthorRepository")
            .finish()
    }
}

impl PostService {
    pub async fn new(
        repository: DynPostsRepository,
        author_repository: DynAuthorRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: &mut Registry,
    ) -> Self {
        registry.register(
            "post_service_request_counter",
            "Total number of requests to the PostService",
            metrics.lock().await.request_counter.clone(),
        );
        registry.register(
            "post_service_request_duration",
            "Histogram of request durations for the PostService",
            metrics.lock().await.request_duration.clone(),
        );

        Self {
            repository,
            author_repository,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("post-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    async fn complete_tracing<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: &Result<T, AppError>,
        success_message: &str,
    ) {
        let (is_success, message) = match result {
            Ok(_) => (true, success_message.to_string()),
            Err(err) => (false, err.to_string()),
        };
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.clone()),
            ],
        );

        if is_success {
            info!("Operation completed successfully: {message}");
        } else {
            error!("Operation failed: {message}");
        }

        self.metrics.lock().await.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }

    async fn find_author(&self, author_id: i64) -> Result<Author, AppError> {
        self.author_repository
            .find_by_id(author_id)
            .await?
            .ok_or(AppError::InvalidReference(author_id))
    }

    async fn find_post(&self, post_id: i64) -> Result<Post, AppError> {
        self.repository
            .find_by_id(post_id)
            .await?
            .ok_or(AppError::NotFound(post_id))
    }

    async fn create(&self, input: &CreatePostRequest) -> Result<Post, AppError> {
        let author = self.find_author(input.author_id).await?;

        let new_post = NewPost {
            text: input.text.clone(),
            author_id: author.id,
        };

        self.repository.create(&new_post).await
    }

    async fn update(&self, input: &UpdatePostRequest, post_id: i64) -> Result<Post, AppError> {
        let mut post = self.find_post(post_id).await?;

        if let Some(author_id) = input.author_id.filter(|id| *id != post.author_id) {
            info!("Ignoring author {author_id} on update of post {post_id}");
        }

        post.text = input.text.clone();

        self.repository.save(&post).await
    }

    async fn delete(&self, post_id: i64) -> Result<(), AppError> {
        let mut post = self.find_post(post_id).await?;

        post.is_deleted = true;

        self.repository.save(&post).await?;
        Ok(())
    }

    async fn by_author(
        &self,
        author_id: i64,
        is_deleted: Option<bool>,
    ) -> Result<Vec<Post>, AppError> {
        let author = self.find_author(author_id).await?;

        match is_deleted {
            Some(is_deleted) => {
                self.repository
                    .find_by_author_and_deleted(&author, is_deleted)
                    .await
            }
            None => self.repository.find_by_author(&author).await,
        }
    }

    async fn paginated(
        &self,
        page_number: i64,
        page_size: i64,
        sort: &PostSort,
    ) -> Result<Vec<Post>, AppError> {
        if page_number < 0 {
            return Err(AppError::ValidationError(format!(
                "page number must not be negative, got {page_number}"
            )));
        }
        if page_size < 1 {
            return Err(AppError::ValidationError(format!(
                "page size must be at least 1, got {page_size}"
            )));
        }
        if page_number.checked_mul(page_size).is_none() {
            return Err(AppError::ValidationError(format!(
                "page {page_number} of size {page_size} is out of range"
            )));
        }

        self.repository
            .find_paginated(page_number, page_size, sort)
            .await
    }
}

#[async_trait]
impl PostsServiceTrait for PostService {
    async fn create_post(&self, input: &CreatePostRequest) -> Result<Post, AppError> {
        let tracing_ctx = self.start_tracing(
            "CreatePost",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("author_id", input.author_id),
            ],
        );

        let result = self.create(input).await;

        self.complete_tracing(&tracing_ctx, Method::Post, &result, "Post created")
            .await;

        result
    }

    async fn update_post(
        &self,
        input: &UpdatePostRequest,
        post_id: i64,
    ) -> Result<Post, AppError> {
        let tracing_ctx = self.start_tracing(
            "UpdatePost",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("id", post_id),
            ],
        );

        let result = self.update(input, post_id).await;

        self.complete_tracing(&tracing_ctx, Method::Put, &result, "Post updated")
            .await;

        result
    }

    async fn delete_post(&self, post_id: i64) -> Result<(), AppError> {
        let tracing_ctx = self.start_tracing(
            "DeletePost",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("id", post_id),
            ],
        );

        let result = self.delete(post_id).await;

        self.complete_tracing(&tracing_ctx, Method::Delete, &result, "Post marked deleted")
            .await;

        result
    }

    async fn get_post(&self, post_id: i64) -> Result<Post, AppError> {
        let tracing_ctx = self.start_tracing(
            "GetPost",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("id", post_id),
            ],
        );

        let result = self.find_post(post_id).await;

        self.complete_tracing(&tracing_ctx, Method::Get, &result, "Post retrieved")
            .await;

        result
    }

    async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let tracing_ctx =
            self.start_tracing("ListPosts", vec![KeyValue::new("component", "post")]);

        let result = self.repository.find_all().await;

        self.complete_tracing(&tracing_ctx, Method::Get, &result, "Posts retrieved")
            .await;

        result
    }

    async fn list_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, AppError> {
        let tracing_ctx = self.start_tracing(
            "ListPostsByAuthor",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("author_id", author_id),
            ],
        );

        let result = self.by_author(author_id, None).await;

        self.complete_tracing(&tracing_ctx, Method::Get, &result, "Author posts retrieved")
            .await;

        result
    }

    async fn list_posts_by_author_and_deleted(
        &self,
        author_id: i64,
        is_deleted: bool,
    ) -> Result<Vec<Post>, AppError> {
        let tracing_ctx = self.start_tracing(
            "ListPostsByAuthorAndDeleted",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("author_id", author_id),
                KeyValue::new("is_deleted", is_deleted),
            ],
        );

        let result = self.by_author(author_id, Some(is_deleted)).await;

        self.complete_tracing(&tracing_ctx, Method::Get, &result, "Author posts retrieved")
            .await;

        result
    }

    async fn list_posts_paginated(
        &self,
        page_number: i64,
        page_size: i64,
        sort: PostSort,
    ) -> Result<Vec<Post>, AppError> {
        let tracing_ctx = self.start_tracing(
            "ListPostsPaginated",
            vec![
                KeyValue::new("component", "post"),
                KeyValue::new("page_number", page_number),
                KeyValue::new("page_size", page_size),
                KeyValue::new("sort", sort.to_string()),
            ],
        );

        let result = self.paginated(page_number, page_size, &sort).await;

        self.complete_tracing(&tracing_ctx, Method::Get, &result, "Post page retrieved")
            .await;

        result
    }
}
