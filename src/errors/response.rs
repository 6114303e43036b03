use axum::{
    response::{IntoResponse, Response, Json},
    http::StatusCode,
};
use serde_json::json;
use crate::errors::{AppError, StoreError};

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Payload(status, _) => *status,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Store(err) => store_status(err),
        }
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::MissingFields => StatusCode::BAD_REQUEST,
        StoreError::DuplicateEmail(_) => StatusCode::CONFLICT,
        // Anything else is a file or parsing failure on our side
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// Every failure leaves as {"success": false, "message": ...}
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }

        let body = json!({
            "success": false,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::from(StoreError::MissingFields).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(StoreError::DuplicateEmail("a@x.com".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(StoreError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Payload(StatusCode::PAYLOAD_TOO_LARGE, "too big".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_server_error_message_is_the_error_text() {
        let err = AppError::from(StoreError::Io(io::Error::new(io::ErrorKind::Other, "disk on fire")));
        assert_eq!(err.to_string(), "disk on fire");
        assert_eq!(
            AppError::from(StoreError::DuplicateEmail("a@x.com".into())).to_string(),
            "Admin with this email already exists"
        );
    }
}
