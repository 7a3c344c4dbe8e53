mod common;

use chrono::NaiveDate;
use library_lending::adapters::postgres::{PostgresBookStore, PostgresLoanStore};
use library_lending::domain::*;
use library_lending::ports::{BookStore, LoanStore, StoreError};
use sqlx::PgPool;

/// テストごとに重複しない書籍コード
fn unique_code() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn loan_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// テストデータをクリーンアップ
async fn cleanup_book(pool: &PgPool, book: &Book) {
    let id = book.id.unwrap().value();
    sqlx::query("DELETE FROM loans WHERE book_id = $1")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to cleanup test loans");
    sqlx::query("DELETE FROM books WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .expect("Failed to cleanup test book");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_book_store_insert_and_find() {
    let pool = common::create_test_pool().await;
    let store = PostgresBookStore::new(pool.clone());
    let code = unique_code();

    let stored = store
        .insert(Book::new("Meu Livro", "Autor", code.clone()))
        .await
        .unwrap();

    assert!(stored.id.is_some());
    assert!(store.exists_by_code(&code).await.unwrap());
    assert_eq!(
        store.find_by_id(stored.id.unwrap()).await.unwrap(),
        Some(stored.clone())
    );
    assert_eq!(store.find_by_code(&code).await.unwrap(), Some(stored.clone()));
    assert!(store.find_by_id(BookId::new()).await.unwrap().is_none());

    cleanup_book(&pool, &stored).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_book_store_duplicate_code_is_unique_violation() {
    let pool = common::create_test_pool().await;
    let store = PostgresBookStore::new(pool.clone());
    let code = unique_code();

    let stored = store
        .insert(Book::new("Meu Livro", "Autor", code.clone()))
        .await
        .unwrap();
    let err = store
        .insert(Book::new("Outro", "Outro", code))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::UniqueViolation { ref constraint } if constraint == "books_code_key"
    ));

    cleanup_book(&pool, &stored).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_book_store_update_keeps_code() {
    let pool = common::create_test_pool().await;
    let store = PostgresBookStore::new(pool.clone());
    let code = unique_code();

    let mut stored = store
        .insert(Book::new("Meu Livro", "Autor", code.clone()))
        .await
        .unwrap();
    stored.title = "Novo Titulo".to_string();
    stored.code = "changed".to_string();

    let updated = store.update(stored.clone()).await.unwrap();

    assert_eq!(updated.title, "Novo Titulo");
    assert_eq!(updated.code, code);

    cleanup_book(&pool, &updated).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_book_store_find_page_by_matcher() {
    let pool = common::create_test_pool().await;
    let store = PostgresBookStore::new(pool.clone());
    let code = unique_code();

    let stored = store
        .insert(Book::new("Autor 100%", "Someone", code.clone()))
        .await
        .unwrap();

    let matcher = BookMatcher::from_filter(&BookFilter {
        title: Some("AUTOR 100%".to_string()),
        code: Some(code[..8].to_string()),
        ..Default::default()
    });
    let page = store
        .find_page(&matcher, PageRequest::new(0, 10).unwrap())
        .await
        .unwrap();

    assert_eq!(page.total_matches, 1);
    assert_eq!(page.items, vec![stored.clone()]);

    store.delete(&stored).await.unwrap();
    assert!(!store.exists_by_code(&code).await.unwrap());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_loan_store_single_outstanding_loan() {
    let pool = common::create_test_pool().await;
    let books = PostgresBookStore::new(pool.clone());
    let loans = PostgresLoanStore::new(pool.clone());

    let book = books
        .insert(Book::new("Meu Livro", "Autor", unique_code()))
        .await
        .unwrap();

    let first = loans
        .insert(Loan::new(book.clone(), "Fulano", loan_date()))
        .await
        .unwrap();
    assert!(loans.exists_outstanding_for_book(&book).await.unwrap());

    // 部分一意インデックスにより2件目の貸出中は拒否される
    let err = loans
        .insert(Loan::new(book.clone(), "Ciclano", loan_date()))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());

    let mut returned = first.clone();
    returned.returned = Some(true);
    let updated = loans.update(returned).await.unwrap();
    assert_eq!(updated.returned, Some(true));
    assert_eq!(updated.book, book);
    assert!(!loans.exists_outstanding_for_book(&book).await.unwrap());

    let second = loans
        .insert(Loan::new(book.clone(), "Ciclano", loan_date()))
        .await
        .unwrap();
    assert_eq!(
        loans.find_by_id(second.id.unwrap()).await.unwrap(),
        Some(second)
    );

    let history = loans
        .find_page_by_book(&book, PageRequest::new(0, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(history.total_matches, 2);
    assert_eq!(history.items[0].borrower, "Fulano");

    cleanup_book(&pool, &book).await;
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_loan_store_find_page_by_code_or_borrower() {
    let pool = common::create_test_pool().await;
    let books = PostgresBookStore::new(pool.clone());
    let loans = PostgresLoanStore::new(pool.clone());
    let borrower = unique_code();
    let other_borrower = unique_code();

    let a = books
        .insert(Book::new("A", "Autor", unique_code()))
        .await
        .unwrap();
    let b = books
        .insert(Book::new("B", "Autor", unique_code()))
        .await
        .unwrap();
    loans
        .insert(Loan::new(a.clone(), borrower.clone(), loan_date()))
        .await
        .unwrap();
    loans
        .insert(Loan::new(b.clone(), other_borrower, loan_date()))
        .await
        .unwrap();

    let page = loans
        .find_page(&b.code, &borrower, PageRequest::new(0, 100).unwrap())
        .await
        .unwrap();

    assert_eq!(page.total_matches, 2);
    assert_eq!(page.page_size, 100);

    cleanup_book(&pool, &a).await;
    cleanup_book(&pool, &b).await;
}
