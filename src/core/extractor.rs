use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;

/// Custom JSON extractor that provides consistent error responses
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(AppJsonRejection(rejection)),
        }
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let message = match self.0 {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err),
            JsonRejection::MissingJsonContentType(err) => {
                format!("Missing JSON content type: {}", err)
            }
            _ => "Failed to parse JSON body".to_string(),
        };

        AppError::BadRequest(message).into_response()
    }
}

/// Query-string extractor that reports failures in the standard envelope
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection: QueryRejection| {
                AppError::BadRequest(format!("Invalid query parameters: {}", rejection.body_text()))
            })
    }
}
