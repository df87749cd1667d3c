use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marquee_domain::EngineError;
use serde_json::json;

/// HTTP mapping for the engine's error taxonomy. Storage details never
/// leak to the caller; they are logged here instead.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
            EngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            // A timed-out claim is seat-unavailable-equivalent: the caller
            // may re-query availability and pick different seats.
            EngineError::SeatUnavailable(_) | EngineError::ClaimTimeout(_) => StatusCode::CONFLICT,
            EngineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            EngineError::Storage(err) => {
                tracing::error!("storage failure: {err}");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
