use thiserror::Error;

/// ストアのエラー
///
/// 一意制約違反はビジネスルール違反に変換できるよう、他の障害と区別して返す。
#[derive(Debug, Error)]
pub enum StoreError {
    /// 一意制約違反（書籍コードの重複、同一書籍への貸出中レコードの重複）
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// ストア自体の障害（接続断、クエリ失敗、データ不整合など）
    #[error("store backend failure")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
