use crate::domain::{Book, Loan, LoanId, Page, PageRequest};
use async_trait::async_trait;

pub use super::store_error::Result;

/// 貸出中レコードの一意制約名（書籍ごとに未返却は1件まで）
pub const OUTSTANDING_LOAN_CONSTRAINT: &str = "loans_outstanding_book_key";

/// 貸出ストアポート
///
/// 貸出レコードの永続化を抽象化する。
/// 「1冊につき貸出中は1件まで」はストアが制約として保証し、違反時は
/// `StoreError::UniqueViolation`を返すこと。
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// 貸出を登録し、IDを採番したレコードを返す
    async fn insert(&self, loan: Loan) -> Result<Loan>;

    /// IDで貸出を取得する
    async fn find_by_id(&self, id: LoanId) -> Result<Option<Loan>>;

    /// 貸出を更新して更新後のレコードを返す
    async fn update(&self, loan: Loan) -> Result<Loan>;

    /// 書籍に未返却の貸出があるか確認する
    async fn exists_outstanding_for_book(&self, book: &Book) -> Result<bool>;

    /// 書籍コードまたは借り手名が一致する貸出の1ページ分を返す
    async fn find_page(
        &self,
        book_code: &str,
        borrower: &str,
        page: PageRequest,
    ) -> Result<Page<Loan>>;

    /// 書籍の貸出履歴の1ページ分を返す
    async fn find_page_by_book(&self, book: &Book, page: PageRequest) -> Result<Page<Loan>>;
}
