use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Serialize, Deserialize, Clone, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindPagedPostsRequest {
    /// Zero-based page index.
    #[serde(default)]
    pub page_number: i64,

    #[serde(default = "default_page_size")]
    pub page_size: i64,

    /// `<field>[,<direction>]`, e.g. `postId,asc`.
    #[serde(default = "default_sort")]
    pub sort: String,
}

fn default_page_size() -> i64 {
    10
}

fn default_sort() -> String {
    "id,asc".to_string()
}

#[derive(Debug, Deserialize, Serialize, ToSchema, Validate, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    pub author_id: i64,
}

/// Same shape callers send on create. `author_id` is accepted so clients can
/// resubmit a full post, but an update never rebinds the author.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,

    #[serde(default)]
    pub author_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_request_defaults() {
        let req: FindPagedPostsRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(req.page_number, 0);
        assert_eq!(req.page_size, 10);
        assert_eq!(req.sort, "id,asc");
    }

    #[test]
    fn create_request_rejects_empty_text() {
        let req = CreatePostRequest {
            text: String::new(),
            author_id: 1,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn update_request_reads_camel_case_and_optional_author() {
        let req: UpdatePostRequest =
            serde_json::from_str(r#"{"text":"Updated Post","authorId":2}"#).unwrap();
        assert_eq!(req.author_id, Some(2));

        let req: UpdatePostRequest = serde_json::from_str(r#"{"text":"Updated Post"}"#).unwrap();
        assert_eq!(req.author_id, None);
    }
}
