mod request;
mod response;

pub use self::request::{
    CreatePostRequest, FindPagedPostsRequest, PostSort, PostSortField, SortDirection,
    UpdatePostRequest,
};

pub use self::response::{ApiResponse, ErrorResponse, PostResponse};
