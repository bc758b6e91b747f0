use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fintrack_core::errors::{Error as CoreError, ErrorKind};
use serde::Serialize;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),
    /// Request input axum could not extract. Keeps the rejection's status.
    #[error("{1}")]
    BadRequest(StatusCode, String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Core(err) => match err.kind() {
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION"),
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
                ErrorKind::UpstreamUnavailable => {
                    (StatusCode::SERVICE_UNAVAILABLE, "UPSTREAM_UNAVAILABLE")
                }
                ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
            },
            ApiError::BadRequest(status, _) => (*status, "VALIDATION"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.status(), rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        // Internal details stay in the log.
        let message = if status.is_server_error() {
            tracing::error!("{} request failed: {}", code, self);
            status
                .canonical_reason()
                .unwrap_or("Internal error")
                .to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { code, message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_core::errors::{DatabaseError, ValidationError};

    fn status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn error_kinds_map_to_status_codes() {
        assert_eq!(
            status(CoreError::invalid_input("bad page").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(CoreError::Validation(ValidationError::MissingField("name".into())).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(CoreError::NotFound("goal".into()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(CoreError::ConstraintViolation("in use".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status(CoreError::Database(DatabaseError::ConnectionFailed("down".into())).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(CoreError::Unexpected("boom".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(ApiError::Unauthorized("who?".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status(ApiError::Forbidden("admins only".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status(ApiError::BadRequest(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "expected JSON".into()
            )),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }
}
