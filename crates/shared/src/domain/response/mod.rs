mod api;
mod post;

pub use self::api::{ApiResponse, ErrorResponse};
pub use self::post::PostResponse;
