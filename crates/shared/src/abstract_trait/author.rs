use async_trait::async_trait;
use std::sync::Arc;

use crate::{model::author::Author, utils::AppError};

pub type DynAuthorRepository = Arc<dyn AuthorRepositoryTrait + Send + Sync>;

/// Lookup into the author directory. `Ok(None)` means the author does not exist.
#[async_trait]
pub trait AuthorRepositoryTrait {
    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError>;
}
