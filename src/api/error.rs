use crate::application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
/// 「見つからない」はアプリケーション層では値（`None`）であり、404にするかはここで決める。
#[derive(Debug)]
pub enum ApiError {
    Application(ApplicationError),
    NotFound(&'static str),
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // 404 Not Found - リクエストされたリソースが存在しない
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),

            // 409 Conflict - 書籍コードの重複、貸出中の書籍
            ApiError::Application(ApplicationError::Conflict(msg)) => (StatusCode::CONFLICT, msg),

            // 400 Bad Request - 入力の不備
            ApiError::Application(ApplicationError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Application(ApplicationError::BookNotFound(msg)) => {
                (StatusCode::BAD_REQUEST, msg)
            }

            // 500 Internal Server Error - プログラミングエラー、システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ApiError::Application(ApplicationError::InvalidArgument(msg)) => {
                tracing::error!("Invalid argument reached the service layer: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
            ApiError::Application(ApplicationError::StoreError(e)) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
