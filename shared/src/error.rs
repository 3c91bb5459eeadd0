use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("required field missing: title and author must not be empty")]
    RequiredFieldMissing,
    #[error("empty request body")]
    EmptyRequestBody,
    #[error("book id must not be empty")]
    EmptyBookId,
    #[error("review id must be a positive number")]
    EmptyReviewId,
    #[error("book not found")]
    BookNotFound,
    #[error("review not found")]
    ReviewNotFound,
    #[error("book is already checked out")]
    BookAlreadyCheckedOut,
    #[error("book is not checked out")]
    BookNotCheckedOut,
    #[error("borrower name is missing")]
    NameMissing,
    #[error("review is missing or outside the range 1 to 5")]
    ReviewMissing,
    #[error("unable to read message")]
    UnableToReadMessage,
    #[error("unable to parse json")]
    UnableToParseJson,
    #[error("{0}")]
    InvalidQuery(String),
    #[error("book history was modified by another request")]
    HistoryConflict,
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    // 接続エラーも操作エラーも mongodb::error::Error で届くので、まとめて扱う
    #[error("an error occurred while accessing the book store")]
    StoreError(#[source] mongodb::error::Error),
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::RequiredFieldMissing
            | AppError::EmptyRequestBody
            | AppError::EmptyBookId
            | AppError::EmptyReviewId
            | AppError::BookAlreadyCheckedOut
            | AppError::NameMissing
            | AppError::ReviewMissing
            | AppError::UnableToReadMessage
            | AppError::UnableToParseJson
            | AppError::InvalidQuery(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::BookNotFound | AppError::BookNotCheckedOut | AppError::ReviewNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::HistoryConflict => StatusCode::CONFLICT,
            AppError::StoreError(_) | AppError::ConversionEntityError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    status: u16,
    message: String,
}

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "internal server error";

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let message = if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            INTERNAL_SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            status: status_code.as_u16(),
            message,
        };
        (status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
