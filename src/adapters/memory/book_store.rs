use crate::domain::{Book, BookId, BookMatcher, Page, PageRequest};
use crate::ports::book_store::{BOOK_CODE_CONSTRAINT, BookStore as BookStoreTrait, Result};
use crate::ports::StoreError;
use async_trait::async_trait;
use std::sync::Mutex;

use super::{lock, not_found};

/// BookStoreのインメモリ実装
///
/// 登録順に書籍を保持する。コードの一意制約は登録と同じロック内で確認するため、
/// 同時登録でも重複は発生しない。
pub struct BookStore {
    books: Mutex<Vec<Book>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            books: Mutex::new(Vec::new()),
        }
    }

    /// 登録済みの書籍数
    pub fn len(&self) -> usize {
        self.books.lock().map(|books| books.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookStoreTrait for BookStore {
    async fn insert(&self, book: Book) -> Result<Book> {
        let mut books = lock(&self.books)?;

        if books.iter().any(|b| b.code == book.code) {
            return Err(StoreError::UniqueViolation {
                constraint: BOOK_CODE_CONSTRAINT.to_string(),
            });
        }

        let stored = book.with_id(BookId::new());
        books.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let books = lock(&self.books)?;
        Ok(books.iter().find(|b| b.id == Some(id)).cloned())
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool> {
        let books = lock(&self.books)?;
        Ok(books.iter().any(|b| b.code == code))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Book>> {
        let books = lock(&self.books)?;
        Ok(books.iter().find(|b| b.code == code).cloned())
    }

    /// タイトルと著者のみ置き換える（コードは登録時のまま）
    async fn update(&self, book: Book) -> Result<Book> {
        let mut books = lock(&self.books)?;

        let stored = books
            .iter_mut()
            .find(|b| book.id.is_some() && b.id == book.id)
            .ok_or_else(|| not_found("book"))?;

        stored.title = book.title;
        stored.author = book.author;
        Ok(stored.clone())
    }

    async fn delete(&self, book: &Book) -> Result<()> {
        let mut books = lock(&self.books)?;
        books.retain(|b| b.id != book.id);
        Ok(())
    }

    async fn find_page(&self, matcher: &BookMatcher, page: PageRequest) -> Result<Page<Book>> {
        let books = lock(&self.books)?;
        let matching: Vec<Book> = books.iter().filter(|b| matcher.matches(b)).cloned().collect();
        Ok(page.paginate(matching))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookFilter;

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = BookStore::new();
        let stored = store
            .insert(Book::new("Meu Livro", "Autor", "123123"))
            .await
            .unwrap();

        assert!(stored.id.is_some());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_code() {
        let store = BookStore::new();
        store.insert(Book::new("A", "B", "123123")).await.unwrap();

        let result = store.insert(Book::new("C", "D", "123123")).await;

        assert!(matches!(result, Err(StoreError::UniqueViolation { .. })));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_code() {
        let store = BookStore::new();
        let mut book = store.insert(Book::new("A", "B", "123123")).await.unwrap();

        book.title = "Novo".to_string();
        book.code = "999".to_string();
        let updated = store.update(book).await.unwrap();

        assert_eq!(updated.title, "Novo");
        assert_eq!(updated.code, "123123");
    }

    #[tokio::test]
    async fn test_update_unknown_book_fails() {
        let store = BookStore::new();
        let book = Book::new("A", "B", "1").with_id(BookId::new());

        assert!(store.update(book).await.is_err());
    }

    #[tokio::test]
    async fn test_find_page_keeps_insertion_order() {
        let store = BookStore::new();
        for i in 0..5 {
            store
                .insert(Book::new(format!("Livro {}", i), "Autor", i.to_string()))
                .await
                .unwrap();
        }

        let matcher = BookMatcher::from_filter(&BookFilter::default());
        let page = store
            .find_page(&matcher, PageRequest::new(1, 2).unwrap())
            .await
            .unwrap();

        let titles: Vec<_> = page.items.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Livro 2", "Livro 3"]);
        assert_eq!(page.total_matches, 5);
    }
}
