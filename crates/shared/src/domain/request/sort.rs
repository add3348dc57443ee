use std::{fmt, str::FromStr};

use crate::utils::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortField {
    Id,
    Text,
    AuthorId,
    IsDeleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Field and direction for paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostSort {
    pub field: PostSortField,
    pub direction: SortDirection,
}

impl PostSort {
    pub fn new(field: PostSortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Default for PostSort {
    fn default() -> Self {
        Self::new(PostSortField::Id, SortDirection::Asc)
    }
}

impl FromStr for PostSortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "postid" | "post_id" => Ok(PostSortField::Id),
            "text" => Ok(PostSortField::Text),
            "authorid" | "author_id" => Ok(PostSortField::AuthorId),
            "isdeleted" | "is_deleted" | "deleted" => Ok(PostSortField::IsDeleted),
            other => Err(AppError::ValidationError(format!(
                "unknown sort field '{other}'"
            ))),
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(AppError::ValidationError(format!(
                "unknown sort direction '{other}'"
            ))),
        }
    }
}

impl FromStr for PostSort {
    type Err = AppError;

    /// Parses `<field>[,<direction>]`; the direction defaults to ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');

        let field = parts.next().unwrap_or_default().parse()?;
        let direction = match parts.next() {
            Some(direction) => direction.parse()?,
            None => SortDirection::default(),
        };

        if parts.next().is_some() {
            return Err(AppError::ValidationError(format!(
                "sort must be '<field>[,<direction>]', got '{s}'"
            )));
        }

        Ok(Self { field, direction })
    }
}

impl fmt::Display for PostSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            PostSortField::Id => "id",
            PostSortField::Text => "text",
            PostSortField::AuthorId => "authorId",
            PostSortField::IsDeleted => "isDeleted",
        };
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };

        write!(f, "{field},{direction}")
    }
}
