use crate::application::catalog;
use crate::domain::{
    Book, Loan, LoanFilter, LoanId, Page, PageRequest,
    commands::{CheckoutBook, RecordReturn},
};

use super::super::{ApplicationError, Result, ServiceDependencies};

/// 貸出中の書籍を貸し出そうとした場合のメッセージ
pub const BOOK_ON_LOAN_MESSAGE: &str = "Book already on loan";

/// 書籍コードに該当する書籍がない場合のメッセージ
pub const UNKNOWN_CODE_MESSAGE: &str = "Book not found for the given code";

const MISSING_BOOK_ID_MESSAGE: &str = "Loaned book id must not be empty";

/// 貸出を登録する
///
/// ビジネスルール：
/// - 対象の書籍が登録済み（IDを持つ）であること
/// - 借り手名が空でなく、上限文字数以内であること
/// - 対象の書籍に未返却の貸出がないこと（1冊につき貸出中は1件まで）
///
/// 排他チェックと登録は2回のストア呼び出しであり、それだけでは原子的でない。
/// 同じ書籍への同時リクエストはストアの一意制約で後発が失敗し、
/// 事前チェックと同じ`Conflict`として返す。
pub async fn create_loan(deps: &ServiceDependencies, loan: Loan) -> Result<Loan> {
    if loan.book.id.is_none() {
        return Err(ApplicationError::InvalidArgument(
            MISSING_BOOK_ID_MESSAGE.to_string(),
        ));
    }

    loan.validate()?;

    let on_loan = deps
        .loan_store
        .exists_outstanding_for_book(&loan.book)
        .await
        .map_err(ApplicationError::StoreError)?;

    if on_loan {
        tracing::warn!(book_id = ?loan.book.id, "Rejected loan of a book already on loan");
        return Err(ApplicationError::Conflict(BOOK_ON_LOAN_MESSAGE.to_string()));
    }

    let stored = deps
        .loan_store
        .insert(loan)
        .await
        .map_err(|e| ApplicationError::from_write(e, BOOK_ON_LOAN_MESSAGE))?;

    tracing::info!(loan_id = ?stored.id, book_id = ?stored.book.id, "Loan created");
    Ok(stored)
}

/// IDで貸出を取得する
///
/// 見つからない場合は`None`（エラーではない）。
pub async fn get_loan_by_id(deps: &ServiceDependencies, id: LoanId) -> Result<Option<Loan>> {
    deps.loan_store
        .find_by_id(id)
        .await
        .map_err(ApplicationError::StoreError)
}

/// 貸出を更新する
///
/// 返却フラグの設定に使用する。状態遷移のガードは設けない
/// （返却済みの再返却や、返却済みから貸出中への訂正も受け付ける）。
/// 貸出中へ戻すと同じ書籍の貸出中が2件になる場合は`Conflict`。
pub async fn update_loan(deps: &ServiceDependencies, loan: Loan) -> Result<Loan> {
    let updated = deps
        .loan_store
        .update(loan)
        .await
        .map_err(|e| ApplicationError::from_write(e, BOOK_ON_LOAN_MESSAGE))?;

    tracing::info!(loan_id = ?updated.id, returned = ?updated.returned, "Loan updated");
    Ok(updated)
}

/// 書籍コード・借り手名で貸出を検索する
pub async fn find_loans(
    deps: &ServiceDependencies,
    filter: &LoanFilter,
    page: PageRequest,
) -> Result<Page<Loan>> {
    deps.loan_store
        .find_page(&filter.book_code, &filter.borrower, page)
        .await
        .map_err(ApplicationError::StoreError)
}

/// 書籍の貸出履歴を取得する
pub async fn get_loans_by_book(
    deps: &ServiceDependencies,
    book: &Book,
    page: PageRequest,
) -> Result<Page<Loan>> {
    deps.loan_store
        .find_page_by_book(book, page)
        .await
        .map_err(ApplicationError::StoreError)
}

/// 書籍コードを指定して貸し出す
///
/// カタログから書籍をコードで解決し、貸出中状態の貸出を登録する。
/// 貸出日が未指定の場合は当日。
///
/// # エラー
/// - BookNotFound: コードに該当する書籍がない
/// - Conflict: 書籍が貸出中
pub async fn checkout_book(deps: &ServiceDependencies, cmd: CheckoutBook) -> Result<Loan> {
    let book = catalog::get_book_by_code(deps, &cmd.book_code)
        .await?
        .ok_or_else(|| ApplicationError::BookNotFound(UNKNOWN_CODE_MESSAGE.to_string()))?;

    let loan_date = cmd
        .loan_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    create_loan(deps, Loan::new(book, cmd.borrower, loan_date)).await
}

/// 返却フラグを設定する
///
/// 貸出が存在しない場合は`None`。
pub async fn record_return(deps: &ServiceDependencies, cmd: RecordReturn) -> Result<Option<Loan>> {
    let Some(mut loan) = get_loan_by_id(deps, cmd.loan_id).await? else {
        return Ok(None);
    };

    loan.returned = Some(cmd.returned);

    update_loan(deps, loan).await.map(Some)
}
