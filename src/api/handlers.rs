use crate::application::{ApplicationError, ServiceDependencies, catalog, lending};
use crate::domain::{
    BookId, LoanFilter, LoanId, PageRequest,
    commands::{CheckoutBook, RecordReturn, ReviseBook},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        BookQuery, BookRequest, BookResponse, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, LoanQuery,
        LoanRequest, LoanResponse, PageQuery, PageResponse, ReturnRequest,
    },
};

const BOOK_NOT_FOUND: &str = "Book not found";
const LOAN_NOT_FOUND: &str = "Loan not found";

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

fn page_request(page: Option<u32>, size: Option<u32>) -> Result<PageRequest, ApiError> {
    PageRequest::new(
        page.unwrap_or(DEFAULT_PAGE),
        size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
    .map_err(|e| ApiError::from(ApplicationError::from(e)))
}

// ============================================================================
// Books
// ============================================================================

/// POST /api/books - 書籍を登録
///
/// 強制されるビジネスルール:
/// - タイトル・著者・コードが空でないこと
/// - コードが登録済みでないこと（重複は409）
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = catalog::create_book(&state.service_deps, req.to_book()).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

/// GET /api/books/:id - 書籍をIDで取得
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<BookResponse>, ApiError> {
    catalog::get_book_by_id(&state.service_deps, BookId::from_uuid(book_id))
        .await?
        .map(|book| Json(BookResponse::from(book)))
        .ok_or(ApiError::NotFound(BOOK_NOT_FOUND))
}

/// PUT /api/books/:id - 書籍のタイトルと著者を更新
///
/// コードは変更されない。
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
    Json(req): Json<BookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let cmd = ReviseBook {
        book_id: BookId::from_uuid(book_id),
        title: req.title,
        author: req.author,
    };

    catalog::revise_book(&state.service_deps, cmd)
        .await?
        .map(|book| Json(BookResponse::from(book)))
        .ok_or(ApiError::NotFound(BOOK_NOT_FOUND))
}

/// DELETE /api/books/:id - 書籍を削除
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if catalog::remove_book(&state.service_deps, BookId::from_uuid(book_id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(BOOK_NOT_FOUND))
    }
}

/// GET /api/books - 書籍を検索
///
/// クエリパラメータ:
/// - title, author, code: 大文字小文字を区別しない部分一致（省略時は条件なし）
/// - page, size: ページ指定（既定は0, 20）
pub async fn find_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookQuery>,
) -> Result<Json<PageResponse<BookResponse>>, ApiError> {
    let page = page_request(query.page, query.size)?;
    let result = catalog::find_books(&state.service_deps, &query.to_filter(), page).await?;
    Ok(Json(PageResponse::from(result)))
}

/// GET /api/books/:id/loans - 書籍の貸出履歴
pub async fn get_loans_by_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<LoanResponse>>, ApiError> {
    let page = page_request(query.page, query.size)?;

    let book = catalog::get_book_by_id(&state.service_deps, BookId::from_uuid(book_id))
        .await?
        .ok_or(ApiError::NotFound(BOOK_NOT_FOUND))?;

    let result = lending::get_loans_by_book(&state.service_deps, &book, page).await?;
    Ok(Json(PageResponse::from(result)))
}

// ============================================================================
// Loans
// ============================================================================

/// POST /api/loans - 書籍コードを指定して貸出を作成
///
/// 強制されるビジネスルール:
/// - コードに該当する書籍が存在すること（存在しない場合は400）
/// - 書籍が貸出中でないこと（貸出中は409）
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoanRequest>,
) -> Result<(StatusCode, Json<LoanResponse>), ApiError> {
    let cmd = CheckoutBook {
        book_code: req.code,
        borrower: req.borrower,
        loan_date: req.loan_date,
    };

    let loan = lending::checkout_book(&state.service_deps, cmd).await?;
    Ok((StatusCode::CREATED, Json(LoanResponse::from(loan))))
}

/// PATCH /api/loans/:id - 返却フラグを設定
pub async fn return_loan(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<Uuid>,
    Json(req): Json<ReturnRequest>,
) -> Result<Json<LoanResponse>, ApiError> {
    let cmd = RecordReturn {
        loan_id: LoanId::from_uuid(loan_id),
        returned: req.returned,
    };

    lending::record_return(&state.service_deps, cmd)
        .await?
        .map(|loan| Json(LoanResponse::from(loan)))
        .ok_or(ApiError::NotFound(LOAN_NOT_FOUND))
}

/// GET /api/loans - 書籍コード・借り手名で貸出を検索
///
/// クエリパラメータ:
/// - code: 書籍コード
/// - borrower: 借り手名
/// - page, size: ページ指定（既定は0, 20）
pub async fn find_loans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoanQuery>,
) -> Result<Json<PageResponse<LoanResponse>>, ApiError> {
    let page = page_request(query.page, query.size)?;
    let filter = LoanFilter {
        book_code: query.code.unwrap_or_default(),
        borrower: query.borrower.unwrap_or_default(),
    };

    let result = lending::find_loans(&state.service_deps, &filter, page).await?;
    Ok(Json(PageResponse::from(result)))
}
