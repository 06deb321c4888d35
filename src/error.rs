// emsx/src/error.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde::Serialize;

#[derive(Debug, Display)]
pub enum EmsxError {
    #[display(fmt = "Not Found")]
    NotFound,
    #[display(fmt = "Bad Request: {}", _0)]
    BadRequest(String),
    #[display(fmt = "Authentication required")]
    Unauthorized,
    #[display(fmt = "Forbidden: {}", _0)]
    Forbidden(String),
    #[display(fmt = "Internal Server Error")]
    InternalError,
}

impl std::error::Error for EmsxError {}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for EmsxError {
    fn status_code(&self) -> StatusCode {
        match self {
            EmsxError::NotFound => StatusCode::NOT_FOUND,
            EmsxError::BadRequest(_) => StatusCode::BAD_REQUEST,
            EmsxError::Unauthorized => StatusCode::UNAUTHORIZED,
            EmsxError::Forbidden(_) => StatusCode::FORBIDDEN,
            EmsxError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(EmsxError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(EmsxError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(EmsxError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(EmsxError::BadRequest("bad".into()).to_string(), "Bad Request: bad");
    }
}
