use crate::abstract_trait::PostsRepositoryTrait;
use crate::config::ConnectionPool;
use crate::domain::{PostSort, PostSortField, SortDirection};
use crate::model::author::Author;
use crate::model::posts::{NewPost, Post};
use crate::schema::posts::Posts;
use crate::utils::AppError;
use async_trait::async_trait;
use sea_query::{
    Expr, InsertStatement, OnConflict, Order, PostgresQueryBuilder, Query, SelectStatement,
};
use sea_query_binder::SqlxBinder;
use tracing::{error, info};

const POST_COLUMNS: [Posts; 4] = [Posts::Id, Posts::Text, Posts::AuthorId, Posts::IsDeleted];

fn select_posts() -> SelectStatement {
    Query::select()
        .columns(POST_COLUMNS)
        .from(Posts::Table)
        .to_owned()
}

fn insert_query(input: &NewPost) -> Result<InsertStatement, AppError> {
    Ok(Query::insert()
        .into_table(Posts::Table)
        .columns([Posts::Text, Posts::AuthorId, Posts::IsDeleted])
        .values([input.text.clone().into(), input.author_id.into(), false.into()])
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .returning(Query::returning().columns(POST_COLUMNS))
        .to_owned())
}

fn save_query(post: &Post) -> Result<InsertStatement, AppError> {
    Ok(Query::insert()
        .into_table(Posts::Table)
        .columns(POST_COLUMNS)
        .values([
            post.id.into(),
            post.text.clone().into(),
            post.author_id.into(),
            post.is_deleted.into(),
        ])
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .on_conflict(
            OnConflict::column(Posts::Id)
                .update_columns([Posts::Text, Posts::AuthorId, Posts::IsDeleted])
                .to_owned(),
        )
        .returning(Query::returning().columns(POST_COLUMNS))
        .to_owned())
}

fn by_author_query(author_id: i64, is_deleted: Option<bool>) -> SelectStatement {
    let mut query = select_posts();
    query.and_where(Expr::col(Posts::AuthorId).eq(author_id));
    if let Some(is_deleted) = is_deleted {
        query.and_where(Expr::col(Posts::IsDeleted).eq(is_deleted));
    }
    query.order_by(Posts::Id, Order::Asc);
    query
}

fn paginated_query(
    page_number: i64,
    page_size: i64,
    sort: &PostSort,
) -> Result<SelectStatement, AppError> {
    let out_of_range = || {
        AppError::ValidationError(format!(
            "page {page_number} of size {page_size} is out of range"
        ))
    };

    let limit = u64::try_from(page_size).map_err(|_| out_of_range())?;
    let offset = page_number
        .checked_mul(page_size)
        .and_then(|offset| u64::try_from(offset).ok())
        .ok_or_else(out_of_range)?;

    let order = match sort.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    let mut query = select_posts();
    query.order_by(Posts::from(sort.field), order);
    if sort.field != PostSortField::Id {
        // ties on non-unique columns would otherwise shuffle between pages
        query.order_by(Posts::Id, Order::Asc);
    }
    query.limit(limit).offset(offset);

    Ok(query)
}

pub struct PostRepository {
    db_pool: ConnectionPool,
}

impl PostRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }

    async fn fetch_all(&self, query: &SelectStatement) -> Result<Vec<Post>, AppError> {
        let (sql, values) = query.build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Post, _>(&sql, values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error fetching posts: {e}");
                AppError::SqlxError(e)
            })
    }

    async fn fetch_one(&self, query: &InsertStatement) -> Result<Post, AppError> {
        let (sql, values) = query.build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Post, _>(&sql, values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| {
                error!("Error writing post: {e}");
                AppError::SqlxError(e)
            })
    }
}

#[async_trait]
impl PostsRepositoryTrait for PostRepository {
    async fn create(&self, input: &NewPost) -> Result<Post, AppError> {
        info!("Creating new post for author {}", input.author_id);

        let post = self.fetch_one(&insert_query(input)?).await?;

        info!("New post inserted with ID: {}", post.id);
        Ok(post)
    }

    async fn save(&self, post: &Post) -> Result<Post, AppError> {
        info!("Saving post {}", post.id);

        self.fetch_one(&save_query(post)?).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        info!("Finding post by id: {id}");

        let (sql, values) = select_posts()
            .and_where(Expr::col(Posts::Id).eq(id))
            .build_sqlx(PostgresQueryBuilder);

        let post = sqlx::query_as_with::<_, Post, _>(&sql, values)
            .fetch_optional(&self.db_pool)
            .await?;

        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        let query = select_posts().order_by(Posts::Id, Order::Asc).to_owned();

        let posts = self.fetch_all(&query).await?;

        info!("Found {} posts", posts.len());
        Ok(posts)
    }

    async fn find_by_author(&self, author: &Author) -> Result<Vec<Post>, AppError> {
        let posts = self.fetch_all(&by_author_query(author.id, None)).await?;

        info!("Found {} posts for author {}", posts.len(), author.id);
        Ok(posts)
    }

    async fn find_by_author_and_deleted(
        &self,
        author: &Author,
        is_deleted: bool,
    ) -> Result<Vec<Post>, AppError> {
        let posts = self
            .fetch_all(&by_author_query(author.id, Some(is_deleted)))
            .await?;

        info!(
            "Found {} posts for author {} with is_deleted={is_deleted}",
            posts.len(),
            author.id
        );
        Ok(posts)
    }

    async fn find_paginated(
        &self,
        page_number: i64,
        page_size: i64,
        sort: &PostSort,
    ) -> Result<Vec<Post>, AppError> {
        info!("Getting posts page {page_number} (size {page_size}) sorted by {sort}");

        let query = paginated_query(page_number, page_size, sort)?;
        let posts = self.fetch_all(&query).await?;

        info!("Found {} posts on page {page_number}", posts.len());
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort(raw: &str) -> PostSort {
        raw.parse().unwrap()
    }

    #[test]
    fn first_page_by_id_has_no_tiebreak() {
        let sql = paginated_query(0, 3, &sort("id,asc"))
            .unwrap()
            .to_string(PostgresQueryBuilder);

        assert_eq!(
            sql,
            r#"SELECT "id", "text", "author_id", "is_deleted" FROM "posts" ORDER BY "id" ASC LIMIT 3 OFFSET 0"#
        );
    }

    #[test]
    fn later_pages_skip_whole_pages_and_break_ties_by_id() {
        let sql = paginated_query(2, 3, &sort("authorId,desc"))
            .unwrap()
            .to_string(PostgresQueryBuilder);

        assert!(sql.ends_with(r#"ORDER BY "author_id" DESC, "id" ASC LIMIT 3 OFFSET 6"#));
    }

    #[test]
    fn page_bounds_outside_sql_range_are_rejected() {
        for (page_number, page_size) in [(0, -1), (-1, 3), (i64::MAX, 2)] {
            let result = paginated_query(page_number, page_size, &sort("id"));
            assert!(
                matches!(result, Err(AppError::ValidationError(_))),
                "page {page_number} size {page_size}"
            );
        }
    }

    #[test]
    fn save_upserts_on_id() {
        let post = Post {
            id: 7,
            text: "Updated Post".to_string(),
            author_id: 1,
            is_deleted: true,
        };

        let sql = save_query(&post).unwrap().to_string(PostgresQueryBuilder);

        assert!(sql.starts_with(
            r#"INSERT INTO "posts" ("id", "text", "author_id", "is_deleted") VALUES (7, 'Updated Post', 1, TRUE)"#
        ));
        assert!(sql.contains(
            r#"ON CONFLICT ("id") DO UPDATE SET "text" = "excluded"."text", "author_id" = "excluded"."author_id", "is_deleted" = "excluded"."is_deleted""#
        ));
        assert!(sql.ends_with(r#"RETURNING "id", "text", "author_id", "is_deleted""#));
    }

    #[test]
    fn create_lets_the_database_assign_the_id() {
        let input = NewPost {
            text: "Sample Post".to_string(),
            author_id: 1,
        };

        let sql = insert_query(&input).unwrap().to_string(PostgresQueryBuilder);

        assert_eq!(
            sql,
            r#"INSERT INTO "posts" ("text", "author_id", "is_deleted") VALUES ('Sample Post', 1, FALSE) RETURNING "id", "text", "author_id", "is_deleted""#
        );
    }

    #[test]
    fn author_queries_filter_on_author_and_deletion_state() {
        let all = by_author_query(1, None).to_string(PostgresQueryBuilder);
        assert!(all.ends_with(r#"WHERE "author_id" = 1 ORDER BY "id" ASC"#));

        let deleted = by_author_query(1, Some(true)).to_string(PostgresQueryBuilder);
        assert!(
            deleted.ends_with(r#"WHERE "author_id" = 1 AND "is_deleted" = TRUE ORDER BY "id" ASC"#)
        );
    }
}
