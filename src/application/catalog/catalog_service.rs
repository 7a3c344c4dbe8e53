use crate::domain::{Book, BookFilter, BookId, BookMatcher, Page, PageRequest, commands::ReviseBook};

use super::super::{ApplicationError, Result, ServiceDependencies};

/// 書籍コード重複時のメッセージ
pub const DUPLICATE_CODE_MESSAGE: &str = "Book code already registered";

const MISSING_ID_MESSAGE: &str = "Book id must not be empty";

/// 書籍を登録する
///
/// ビジネスルール：
/// - タイトル・著者・コードが空でないこと
/// - 書籍コードがカタログ内で一意であること
///
/// 重複チェックは存在確認クエリで行い、レコード本体は読み込まない。
/// チェックと登録の間に他のリクエストが同じコードを登録した場合は
/// ストアの一意制約違反となり、同じ`Conflict`として返す。
pub async fn create_book(deps: &ServiceDependencies, book: Book) -> Result<Book> {
    book.validate()?;

    let code_exists = deps
        .book_store
        .exists_by_code(&book.code)
        .await
        .map_err(ApplicationError::StoreError)?;

    if code_exists {
        tracing::warn!(code = %book.code, "Rejected duplicate book code");
        return Err(ApplicationError::Conflict(DUPLICATE_CODE_MESSAGE.to_string()));
    }

    let stored = deps
        .book_store
        .insert(book)
        .await
        .map_err(|e| ApplicationError::from_write(e, DUPLICATE_CODE_MESSAGE))?;

    tracing::info!(book_id = ?stored.id, code = %stored.code, "Book registered");
    Ok(stored)
}

/// IDで書籍を取得する
///
/// 見つからない場合は`None`（エラーではない）。
pub async fn get_book_by_id(deps: &ServiceDependencies, id: BookId) -> Result<Option<Book>> {
    deps.book_store
        .find_by_id(id)
        .await
        .map_err(ApplicationError::StoreError)
}

/// 書籍を更新する（タイトル・著者の置き換え）
///
/// IDのない書籍は`InvalidArgument`となり、ストアは呼び出さない。
pub async fn update_book(deps: &ServiceDependencies, book: Book) -> Result<Book> {
    if book.id.is_none() {
        return Err(ApplicationError::InvalidArgument(MISSING_ID_MESSAGE.to_string()));
    }

    book.validate()?;

    let updated = deps
        .book_store
        .update(book)
        .await
        .map_err(ApplicationError::StoreError)?;

    tracing::info!(book_id = ?updated.id, "Book updated");
    Ok(updated)
}

/// 書籍を削除する
///
/// IDのない書籍は`InvalidArgument`となり、ストアは呼び出さない。
pub async fn delete_book(deps: &ServiceDependencies, book: &Book) -> Result<()> {
    if book.id.is_none() {
        return Err(ApplicationError::InvalidArgument(MISSING_ID_MESSAGE.to_string()));
    }

    deps.book_store
        .delete(book)
        .await
        .map_err(ApplicationError::StoreError)?;

    tracing::info!(book_id = ?book.id, "Book deleted");
    Ok(())
}

/// フィルタに一致する書籍を検索する
///
/// 空でないフィールドごとに大文字小文字を区別しない部分一致の条件を作り、
/// すべてを満たす書籍の1ページ分を返す。ストアの結果はそのまま返す。
pub async fn find_books(
    deps: &ServiceDependencies,
    filter: &BookFilter,
    page: PageRequest,
) -> Result<Page<Book>> {
    let matcher = BookMatcher::from_filter(filter);

    deps.book_store
        .find_page(&matcher, page)
        .await
        .map_err(ApplicationError::StoreError)
}

/// 書籍コードで書籍を取得する
pub async fn get_book_by_code(deps: &ServiceDependencies, code: &str) -> Result<Option<Book>> {
    deps.book_store
        .find_by_code(code)
        .await
        .map_err(ApplicationError::StoreError)
}

/// 書籍のタイトルと著者を置き換える
///
/// 書籍が存在しない場合は`None`。コードは変更しない。
pub async fn revise_book(deps: &ServiceDependencies, cmd: ReviseBook) -> Result<Option<Book>> {
    let Some(mut book) = get_book_by_id(deps, cmd.book_id).await? else {
        return Ok(None);
    };

    book.title = cmd.title;
    book.author = cmd.author;

    update_book(deps, book).await.map(Some)
}

/// IDを指定して書籍を削除する
///
/// 書籍が存在しない場合は`false`。
pub async fn remove_book(deps: &ServiceDependencies, book_id: BookId) -> Result<bool> {
    let Some(book) = get_book_by_id(deps, book_id).await? else {
        return Ok(false);
    };

    delete_book(deps, &book).await?;
    Ok(true)
}
