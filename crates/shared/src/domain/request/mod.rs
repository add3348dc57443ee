mod post;
mod sort;

pub use self::post::{CreatePostRequest, FindPagedPostsRequest, UpdatePostRequest};
pub use self::sort::{PostSort, PostSortField, SortDirection};
