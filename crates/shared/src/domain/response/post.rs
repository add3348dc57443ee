use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::posts::Post;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub post_id: i64,
    pub text: String,
    pub author_id: i64,
    pub is_deleted: bool,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            post_id: post.id,
            text: post.text,
            author_id: post.author_id,
            is_deleted: post.is_deleted,
        }
    }
}
