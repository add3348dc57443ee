use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynAuthorRepository, DynPostsRepository},
    config::ConnectionPool,
    utils::{DependenciesInject, Metrics},
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<Mutex<Registry>>,
    pub di_container: DependenciesInject,
    pub metrics: Arc<Mutex<Metrics>>,
}

impl AppState {
    pub async fn new(pool: ConnectionPool) -> Self {
        let mut registry = Registry::default();
        let metrics = Arc::new(Mutex::new(Metrics::new()));

        let di_container = DependenciesInject::new(pool, metrics.clone(), &mut registry).await;

        Self::assemble(registry, di_container, metrics)
    }

    pub async fn with_repositories(
        post_repository: DynPostsRepository,
        author_repository: DynAuthorRepository,
    ) -> Self {
        let mut registry = Registry::default();
        let metrics = Arc::new(Mutex::new(Metrics::new()));

        let di_container = DependenciesInject::with_repositories(
            post_repository,
            author_repository,
            metrics.clone(),
            &mut registry,
        )
        .await;

        Self::assemble(registry, di_container, metrics)
    }

    fn assemble(
        registry: Registry,
        di_container: DependenciesInject,
        metrics: Arc<Mutex<Metrics>>,
    ) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
            di_container,
            metrics,
        }
    }
}
