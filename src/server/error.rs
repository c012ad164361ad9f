//! Mapping of repository errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mini_apis_core::QuoteError;
use serde::Serialize;

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "errorMessage")]
    error_message: String,
}

/// Error returned by the quotemaster handlers.
#[derive(Debug)]
pub struct ApiError(pub QuoteError);

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            QuoteError::InvalidId | QuoteError::InvalidQuote | QuoteError::InvalidName => {
                StatusCode::BAD_REQUEST
            }
            QuoteError::InvalidPassword => StatusCode::FORBIDDEN,
            QuoteError::EmptyCollection => StatusCode::NOT_FOUND,
            QuoteError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self.0 {
            QuoteError::Store(e) => {
                tracing::error!("Store failure: {}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error_message })).into_response()
    }
}
