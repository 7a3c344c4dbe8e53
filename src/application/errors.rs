use thiserror::Error;

use crate::domain::{PageRequestError, ValidationError};
use crate::ports::StoreError;

/// カタログ・貸出アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 一意性・排他性のビジネスルール違反（書籍コードの重複、貸出中の書籍）
    #[error("{0}")]
    Conflict(String),

    /// 更新・削除でIDが指定されていない（呼び出し側のプログラミングエラー）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 必須項目・ページ指定の不備
    #[error("{0}")]
    Validation(String),

    /// 書籍コードに該当する書籍がない（コード指定の貸出のみ）
    #[error("{0}")]
    BookNotFound(String),

    /// ストアのエラー
    #[error("Store error")]
    StoreError(#[source] StoreError),
}

impl ApplicationError {
    /// 利用者が修正可能なビジネスルール違反か
    pub fn is_conflict(&self) -> bool {
        matches!(self, ApplicationError::Conflict(_))
    }

    /// 登録・更新時のストアエラーを変換する
    ///
    /// 一意制約違反は事前チェックと同じ`Conflict`として返し、
    /// 呼び出し側からは競合をどちらで検知したか区別できないようにする。
    pub(crate) fn from_write(err: StoreError, conflict_message: &str) -> Self {
        if err.is_unique_violation() {
            tracing::warn!("Store rejected write: {}", err);
            ApplicationError::Conflict(conflict_message.to_string())
        } else {
            ApplicationError::StoreError(err)
        }
    }
}

impl From<ValidationError> for ApplicationError {
    fn from(err: ValidationError) -> Self {
        ApplicationError::Validation(err.to_string())
    }
}

impl From<PageRequestError> for ApplicationError {
    fn from(err: PageRequestError) -> Self {
        ApplicationError::Validation(err.to_string())
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_on_write_becomes_conflict() {
        let err = StoreError::UniqueViolation {
            constraint: "books_code_key".to_string(),
        };
        let app_err = ApplicationError::from_write(err, "Book code already registered");
        assert!(app_err.is_conflict());
        assert_eq!(app_err.to_string(), "Book code already registered");
    }

    #[test]
    fn test_backend_failure_on_write_stays_store_error() {
        let err = StoreError::backend(std::io::Error::other("connection reset"));
        let app_err = ApplicationError::from_write(err, "Book code already registered");
        assert!(matches!(app_err, ApplicationError::StoreError(_)));
    }

    #[test]
    fn test_validation_error_conversion() {
        let app_err: ApplicationError = ValidationError::Empty("title").into();
        assert!(matches!(app_err, ApplicationError::Validation(ref msg) if msg == "title must not be empty"));
    }
}
