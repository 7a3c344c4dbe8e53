use crate::domain::{Book, BookId, BookMatcher, Page, PageRequest};
use crate::ports::book_store::{BookStore as BookStoreTrait, Result};
use crate::ports::StoreError;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};

use super::{escape_like, limit_offset, map_sqlx_error};

/// PostgreSQLの行データをBookに変換する
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    Ok(Book {
        id: Some(BookId::from_uuid(row.try_get("id").map_err(map_sqlx_error)?)),
        title: row.try_get("title").map_err(map_sqlx_error)?,
        author: row.try_get("author").map_err(map_sqlx_error)?,
        code: row.try_get("code").map_err(map_sqlx_error)?,
    })
}

/// 照合条件をWHERE句として追加する
///
/// 各条件は`column ILIKE '%needle%'`で、すべてをANDで結合する。
fn push_matcher(qb: &mut QueryBuilder<'_, Postgres>, matcher: &BookMatcher) {
    for (i, (field, needle)) in matcher.criteria().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        qb.push(field.column());
        qb.push(" ILIKE ");
        qb.push_bind(format!("%{}%", escape_like(needle)));
    }
}

/// BookStoreのPostgreSQL実装
///
/// 書籍コードの一意性は`books_code_key`制約で保証する。
pub struct BookStore {
    pool: PgPool,
}

impl BookStore {
    /// PostgreSQLコネクションプールから新しいBookStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStoreTrait for BookStore {
    async fn insert(&self, book: Book) -> Result<Book> {
        let id = BookId::new();

        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, code)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.value())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.code)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(book.with_id(id))
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, code
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn exists_by_code(&self, code: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM books WHERE code = $1)")
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, code
            FROM books
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    /// タイトルと著者のみ更新する（コードは登録時のまま）
    async fn update(&self, book: Book) -> Result<Book> {
        let id = book
            .id
            .ok_or_else(|| StoreError::Backend("book has no id".into()))?;

        let row = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3
            WHERE id = $1
            RETURNING id, title, author, code
            "#,
        )
        .bind(id.value())
        .bind(&book.title)
        .bind(&book.author)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        map_row_to_book(&row)
    }

    async fn delete(&self, book: &Book) -> Result<()> {
        let Some(id) = book.id else {
            return Ok(());
        };

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    /// 該当件数とページ内容を並行して取得する
    async fn find_page(&self, matcher: &BookMatcher, page: PageRequest) -> Result<Page<Book>> {
        let (limit, offset) = limit_offset(page);

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        push_matcher(&mut count_query, matcher);

        let mut page_query = QueryBuilder::<Postgres>::new("SELECT id, title, author, code FROM books");
        push_matcher(&mut page_query, matcher);
        page_query
            .push(" ORDER BY created_at, id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let (total, rows) = futures::try_join!(
            count_query.build_query_scalar::<i64>().fetch_one(&self.pool),
            page_query.build().fetch_all(&self.pool),
        )
        .map_err(map_sqlx_error)?;

        let books = rows.iter().map(map_row_to_book).collect::<Result<Vec<_>>>()?;
        Ok(Page::new(books, u64::try_from(total).unwrap_or(0), page))
    }
}
