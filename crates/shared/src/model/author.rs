use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Read-only view of an author. Authors are managed by another service; this
/// crate only checks that one exists before binding posts to it.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub email: String,
}
