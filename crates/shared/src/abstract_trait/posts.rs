use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{CreatePostRequest, PostSort, UpdatePostRequest},
    model::{
        author::Author,
        posts::{NewPost, Post},
    },
    utils::AppError,
};

pub type DynPostsRepository = Arc<dyn PostsRepositoryTrait + Send + Sync>;
pub type DynPostsService = Arc<dyn PostsServiceTrait + Send + Sync>;

#[async_trait]
pub trait PostsRepositoryTrait {
    /// Stores a new post and returns it with its assigned id.
    async fn create(&self, input: &NewPost) -> Result<Post, AppError>;
    /// Writes every field of an already stored post.
    async fn save(&self, post: &Post) -> Result<Post, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;
    async fn find_all(&self) -> Result<Vec<Post>, AppError>;
    async fn find_by_author(&self, author: &Author) -> Result<Vec<Post>, AppError>;
    async fn find_by_author_and_deleted(
        &self,
        author: &Author,
        is_deleted: bool,
    ) -> Result<Vec<Post>, AppError>;
    async fn find_paginated(
        &self,
        page_number: i64,
        page_size: i64,
        sort: &PostSort,
    ) -> Result<Vec<Post>, AppError>;
}

#[async_trait]
pub trait PostsServiceTrait {
    async fn create_post(&self, input: &CreatePostRequest) -> Result<Post, AppError>;
    async fn update_post(&self, input: &UpdatePostRequest, post_id: i64)
    -> Result<Post, AppError>;
    async fn delete_post(&self, post_id: i64) -> Result<(), AppError>;
    async fn get_post(&self, post_id: i64) -> Result<Post, AppError>;
    async fn list_posts(&self) -> Result<Vec<Post>, AppError>;
    async fn list_posts_by_author(&self, author_id: i64) -> Result<Vec<Post>, AppError>;
    async fn list_posts_by_author_and_deleted(
        &self,
        author_id: i64,
        is_deleted: bool,
    ) -> Result<Vec<Post>, AppError>;
    async fn list_posts_paginated(
        &self,
        page_number: i64,
        page_size: i64,
        sort: PostSort,
    ) -> Result<Vec<Post>, AppError>;
}
