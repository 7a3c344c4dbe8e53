use crate::domain::{Book, BookId, BookMatcher, Page, PageRequest};
use async_trait::async_trait;

pub use super::store_error::Result;

/// 書籍コードの一意制約名
pub const BOOK_CODE_CONSTRAINT: &str = "books_code_key";

/// カタログストアポート
///
/// 書籍レコードの永続化を抽象化する。
/// 書籍コードの一意性はストアが制約として保証し、違反時は
/// `StoreError::UniqueViolation`を返すこと。
#[async_trait]
pub trait BookStore: Send + Sync {
    /// 書籍を登録し、IDを採番したレコードを返す
    async fn insert(&self, book: Book) -> Result<Book>;

    /// IDで書籍を取得する
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>>;

    /// 書籍コードの登録有無を確認する
    ///
    /// 重複チェック専用。レコード本体は読み込まない。
    async fn exists_by_code(&self, code: &str) -> Result<bool>;

    /// 書籍コードで書籍を取得する
    async fn find_by_code(&self, code: &str) -> Result<Option<Book>>;

    /// タイトルと著者を置き換えて更新後のレコードを返す
    async fn update(&self, book: Book) -> Result<Book>;

    /// 書籍を削除する
    async fn delete(&self, book: &Book) -> Result<()>;

    /// 照合条件に一致する書籍の1ページ分と該当件数を返す
    async fn find_page(&self, matcher: &BookMatcher, page: PageRequest) -> Result<Page<Book>>;
}
