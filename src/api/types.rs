use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Book, BookFilter, Loan, Page};

/// ページ番号の既定値
pub const DEFAULT_PAGE: u32 = 0;
/// ページサイズの既定値
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// 書籍登録・更新のリクエスト（POST /api/books, PUT /api/books/:id）
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub code: String,
}

impl BookRequest {
    pub fn to_book(&self) -> Book {
        Book::new(&self.title, &self.author, &self.code)
    }
}

/// 書籍レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: Option<Uuid>,
    pub title: String,
    pub author: String,
    pub code: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.map(|id| id.value()),
            title: book.title,
            author: book.author,
            code: book.code,
        }
    }
}

/// 書籍検索のクエリパラメータ（GET /api/books）
#[derive(Debug, Default, Deserialize)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub code: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl BookQuery {
    pub fn to_filter(&self) -> BookFilter {
        BookFilter {
            title: self.title.clone(),
            author: self.author.clone(),
            code: self.code.clone(),
        }
    }
}

/// ページ指定のみのクエリパラメータ（GET /api/books/:id/loans）
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// 貸出作成のリクエスト（POST /api/loans）
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoanRequest {
    pub code: String,
    pub borrower: String,
    pub loan_date: Option<NaiveDate>,
}

/// 返却フラグ設定のリクエスト（PATCH /api/loans/:id）
#[derive(Debug, Deserialize, Serialize)]
pub struct ReturnRequest {
    pub returned: bool,
}

/// 貸出検索のクエリパラメータ（GET /api/loans）
#[derive(Debug, Default, Deserialize)]
pub struct LoanQuery {
    pub code: Option<String>,
    pub borrower: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// 貸出レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanResponse {
    pub id: Option<Uuid>,
    pub borrower: String,
    pub loan_date: NaiveDate,
    pub returned: Option<bool>,
    pub book: BookResponse,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            id: loan.id.map(|id| id.value()),
            borrower: loan.borrower,
            loan_date: loan.loan_date,
            returned: loan.returned,
            book: BookResponse::from(loan.book),
        }
    }
}

/// ページレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page_number: u32,
    pub page_size: u32,
}

impl<T, U: Into<T>> From<Page<U>> for PageResponse<T> {
    fn from(page: Page<U>) -> Self {
        let page = page.map(Into::into);
        Self {
            content: page.items,
            total_elements: page.total_matches,
            page_number: page.page_index,
            page_size: page.page_size,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}
