use crate::abstract_trait::AuthorRepositoryTrait;
use crate::config::ConnectionPool;
use crate::model::author::Author;
use crate::schema::author::Authors;
use crate::utils::AppError;
use async_trait::async_trait;
use sea_query::{Expr, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use tracing::info;

pub struct AuthorRepository {
    db_pool: ConnectionPool,
}

impl AuthorRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AuthorRepositoryTrait for AuthorRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError> {
        info!("Finding author by id: {id}");

        let (sql, values) = Query::select()
            .columns([Authors::Id, Authors::Name, Authors::Email])
            .from(Authors::Table)
            .and_where(Expr::col(Authors::Id).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let author = sqlx::query_as_with::<_, Author, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        info!("Author {id} found: {}", author.is_some());
        Ok(author)
    }
}
