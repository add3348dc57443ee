use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use shared::{domain::ErrorResponse, utils::AppError};
use validator::Validate;

use crate::handler::error_response;

type Rejection = (StatusCode, Json<ErrorResponse>);

fn validation_rejection(status: StatusCode, message: String) -> Rejection {
    (
        status,
        Json(ErrorResponse {
            status: "VALIDATION_ERROR".to_string(),
            message,
        }),
    )
}

/// JSON body extractor that also runs the `validator` rules of `T`.
pub struct SimpleValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| validation_rejection(rejection.status(), rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| error_response(AppError::from(errors)))?;

        Ok(SimpleValidatedJson(value))
    }
}

/// Query string extractor answering malformed parameters with an `ErrorResponse`.
pub struct SimpleQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for SimpleQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| validation_rejection(rejection.status(), rejection.body_text()))?;

        Ok(SimpleQuery(value))
    }
}

/// Path extractor answering malformed segments with an `ErrorResponse`.
pub struct SimplePath<T>(pub T);

impl<T, S> FromRequestParts<S> for SimplePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| validation_rejection(rejection.status(), rejection.body_text()))?;

        Ok(SimplePath(value))
    }
}
