//! In-memory collaborators for exercising the post service without a database.

use async_trait::async_trait;
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::atomic::{AtomicUsize, Ordering as AtomicOrdering},
};
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{AuthorRepositoryTrait, PostsRepositoryTrait},
    domain::{PostSort, PostSortField, SortDirection},
    model::{
        author::Author,
        posts::{NewPost, Post},
    },
    utils::AppError,
};

#[derive(Debug, Default)]
pub struct InMemoryAuthorRepository {
    authors: BTreeMap<i64, Author>,
}

impl InMemoryAuthorRepository {
    pub fn with_authors(ids: impl IntoIterator<Item = i64>) -> Self {
        let authors = ids
            .into_iter()
            .map(|id| {
                let author = Author {
                    id,
                    name: format!("author-{id}"),
                    email: format!("author-{id}@example.com"),
                };
                (id, author)
            })
            .collect();

        Self { authors }
    }
}

#[async_trait]
impl AuthorRepositoryTrait for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError> {
        Ok(self.authors.get(&id).cloned())
    }
}

/// Ids start at 1 and iteration follows id order.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<BTreeMap<i64, Post>>,
    writes: AtomicUsize,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `create` and `save` calls seen so far.
    pub fn writes(&self) -> usize {
        self.writes.load(AtomicOrdering::SeqCst)
    }

    async fn filtered(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        self.posts
            .lock()
            .await
            .values()
            .filter(|post| keep(post))
            .cloned()
            .collect()
    }
}

fn compare(a: &Post, b: &Post, field: PostSortField) -> Ordering {
    match field {
        PostSortField::Id => a.id.cmp(&b.id),
        PostSortField::Text => a.text.cmp(&b.text),
        PostSortField::AuthorId => a.author_id.cmp(&b.author_id),
        PostSortField::IsDeleted => a.is_deleted.cmp(&b.is_deleted),
    }
}

#[async_trait]
impl PostsRepositoryTrait for InMemoryPostRepository {
    async fn create(&self, input: &NewPost) -> Result<Post, AppError> {
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);

        let mut posts = self.posts.lock().await;
        let id = posts.keys().next_back().map_or(1, |last| last + 1);

        let post = Post {
            id,
            text: input.text.clone(),
            author_id: input.author_id,
            is_deleted: false,
        };
        posts.insert(id, post.clone());

        Ok(post)
    }

    async fn save(&self, post: &Post) -> Result<Post, AppError> {
        self.writes.fetch_add(1, AtomicOrdering::SeqCst);

        self.posts.lock().await.insert(post.id, post.clone());

        Ok(post.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        Ok(self.posts.lock().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_author(&self, author: &Author) -> Result<Vec<Post>, AppError> {
        Ok(self.filtered(|post| post.author_id == author.id).await)
    }

    async fn find_by_author_and_deleted(
        &self,
        author: &Author,
        is_deleted: bool,
    ) -> Result<Vec<Post>, AppError> {
        Ok(self
            .filtered(|post| post.author_id == author.id && post.is_deleted == is_deleted)
            .await)
    }

    async fn find_paginated(
        &self,
        page_number: i64,
        page_size: i64,
        sort: &PostSort,
    ) -> Result<Vec<Post>, AppError> {
        let out_of_range = || {
            AppError::ValidationError(format!(
                "page {page_number} of size {page_size} is out of range"
            ))
        };
        let limit = usize::try_from(page_size).map_err(|_| out_of_range())?;
        let offset = page_number
            .checked_mul(page_size)
            .and_then(|offset| usize::try_from(offset).ok())
            .ok_or_else(out_of_range)?;

        let mut posts = self.filtered(|_| true).await;

        posts.sort_by(|a, b| {
            let ordering = compare(a, b, sort.field);
            let ordering = match sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then(a.id.cmp(&b.id))
        });

        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }
}
