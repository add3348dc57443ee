use sea_query::Iden;

use crate::domain::PostSortField;

#[derive(Iden, Clone, Copy)]
pub enum Posts {
    Table,
    Id,
    Text,
    AuthorId,
    IsDeleted,
}

impl From<PostSortField> for Posts {
    fn from(field: PostSortField) -> Self {
        match field {
            PostSortField::Id => Posts::Id,
            PostSortField::Text => Posts::Text,
            PostSortField::AuthorId => Posts::AuthorId,
            PostSortField::IsDeleted => Posts::IsDeleted,
        }
    }
}
