pub mod book_store;
pub mod loan_store;

// パブリックに型を再エクスポート
pub use book_store::BookStore as PostgresBookStore;
pub use loan_store::LoanStore as PostgresLoanStore;

use crate::ports::StoreError;

/// PostgreSQLの一意制約違反（unique_violation）
const UNIQUE_VIOLATION: &str = "23505";

/// sqlxのエラーをストアのエラーに変換する
///
/// 一意制約違反は制約名付きの`UniqueViolation`、それ以外は`Backend`。
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::UniqueViolation {
                constraint: db_err.constraint().unwrap_or_default().to_string(),
            };
        }
    }
    StoreError::backend(err)
}

/// LIKEパターンのワイルドカードをエスケープする（ESCAPE文字はバックスラッシュ）
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// ページ指定をLIMIT/OFFSETの値に変換する
fn limit_offset(page: crate::domain::PageRequest) -> (i64, i64) {
    (
        i64::from(page.page_size()),
        i64::try_from(page.offset()).unwrap_or(i64::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("auto"), "auto");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_limit_offset() {
        let page = crate::domain::PageRequest::new(2, 100).unwrap();
        assert_eq!(limit_offset(page), (100, 200));
    }
}
