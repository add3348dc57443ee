use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynAuthorRepository, DynPostsRepository, DynPostsService},
    config::ConnectionPool,
    repository::{AuthorRepository, PostRepository},
    service::PostService,
    utils::Metrics,
};

#[derive(Clone)]
pub struct DependenciesInject {
    pub post_service: DynPostsService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("post_service", &"DynPostsService")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(
        pool: ConnectionPool,
        metrics: Arc<Mutex<Metrics>>,
        registry: &mut Registry,
    ) -> Self {
        let post_repository = Arc::new(PostRepository::new(pool.clone())) as DynPostsRepository;
        let author_repository = Arc::new(AuthorRepository::new(pool)) as DynAuthorRepository;

        Self::with_repositories(post_repository, author_repository, metrics, registry).await
    }

    /// Wires the service over caller-supplied collaborators.
    pub async fn with_repositories(
        post_repository: DynPostsRepository,
        author_repository: DynAuthorRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: &mut Registry,
    ) -> Self {
        let post_service = Arc::new(
            PostService::new(post_repository, author_repository, metrics, registry).await,
        ) as DynPostsService;

        Self { post_service }
    }
}
