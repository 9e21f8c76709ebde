//! HTTP error responses.
//!
//! # Design
//! Every failure leaves the API as a problem-details style JSON body.
//! Internal failures get a fresh `trace_id`; the cause is logged under that
//! id and never written to the response.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use todo_store::TodoId;
use uuid::Uuid;

use crate::service::ServiceError;
use crate::validation::{ValidationErrors, ID_FIELD, REQUEST_FIELD};

pub const VALIDATION_TITLE: &str = "One or more validation errors occurred.";
pub const NOT_FOUND_TITLE: &str = "Not Found";
pub const INTERNAL_TITLE: &str = "An unexpected error occurred.";

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Uuid>,
}

impl ProblemDetails {
    fn new(status: StatusCode, title: &str) -> Self {
        Self {
            title: title.to_string(),
            status: status.as_u16(),
            detail: None,
            errors: None,
            trace_id: None,
        }
    }
}

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationErrors),
    NotFound(TodoId),
    Internal { trace_id: Uuid },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_problem(&self) -> ProblemDetails {
        let status = self.status();
        match self {
            ApiError::Validation(errors) => ProblemDetails {
                errors: Some(errors.clone()),
                ..ProblemDetails::new(status, VALIDATION_TITLE)
            },
            ApiError::NotFound(id) => ProblemDetails {
                detail: Some(format!("todo {id} was not found")),
                ..ProblemDetails::new(status, NOT_FOUND_TITLE)
            },
            ApiError::Internal { trace_id } => ProblemDetails {
                trace_id: Some(*trace_id),
                ..ProblemDetails::new(status, INTERNAL_TITLE)
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_problem())).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Validation(errors) => ApiError::Validation(errors),
            ServiceError::NotFound(id) => ApiError::NotFound(id),
            ServiceError::Internal(source) => {
                let trace_id = Uuid::new_v4();
                tracing::error!(%trace_id, error = %source, "unhandled store failure");
                ApiError::Internal { trace_id }
            }
        }
    }
}

/// Unreadable bodies are reported like any other validation failure,
/// under the `request` placeholder.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected request body");
        ApiError::Validation(ValidationErrors::single(REQUEST_FIELD, rejection.body_text()))
    }
}

/// A path id that does not parse as an integer is a validation failure on
/// the `id` field, with the same body as any other 400.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected path id");
        ApiError::Validation(ValidationErrors::single(ID_FIELD, rejection.body_text()))
    }
}
