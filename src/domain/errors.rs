use thiserror::Error;

/// 必須項目のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必須項目が空
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// 文字数の上限を超えた
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// ページ指定のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// ページサイズは1以上
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}
