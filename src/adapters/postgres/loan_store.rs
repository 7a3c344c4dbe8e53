use crate::domain::{Book, BookId, Loan, LoanId, Page, PageRequest};
use crate::ports::StoreError;
use crate::ports::loan_store::{LoanStore as LoanStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::{limit_offset, map_sqlx_error};

/// 貸出と書籍を結合して取得するSELECT句
const SELECT_LOAN: &str = r#"
    SELECT
        l.id,
        l.borrower,
        l.loan_date,
        l.returned,
        b.id AS book_id,
        b.title,
        b.author,
        b.code
    FROM loans l
    JOIN books b ON b.id = l.book_id
"#;

/// PostgreSQLの行データをLoanに変換する
///
/// 結合した書籍の列から貸出が参照する書籍レコードを復元する。
fn map_row_to_loan(row: &PgRow) -> Result<Loan> {
    let book = Book {
        id: Some(BookId::from_uuid(row.try_get("book_id").map_err(map_sqlx_error)?)),
        title: row.try_get("title").map_err(map_sqlx_error)?,
        author: row.try_get("author").map_err(map_sqlx_error)?,
        code: row.try_get("code").map_err(map_sqlx_error)?,
    };

    Ok(Loan {
        id: Some(LoanId::from_uuid(row.try_get("id").map_err(map_sqlx_error)?)),
        borrower: row.try_get("borrower").map_err(map_sqlx_error)?,
        book,
        loan_date: row.try_get("loan_date").map_err(map_sqlx_error)?,
        returned: row.try_get("returned").map_err(map_sqlx_error)?,
    })
}

fn book_id(book: &Book) -> Result<BookId> {
    book.id
        .ok_or_else(|| StoreError::Backend("loan references a book without id".into()))
}

/// LoanStoreのPostgreSQL実装
///
/// 「1冊につき貸出中は1件まで」は部分一意インデックス
/// `loans_outstanding_book_key`（`returned IS NOT TRUE`の行のみ）で保証する。
pub struct LoanStore {
    pool: PgPool,
}

impl LoanStore {
    /// PostgreSQLコネクションプールから新しいLoanStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanStoreTrait for LoanStore {
    async fn insert(&self, loan: Loan) -> Result<Loan> {
        let book_id = book_id(&loan.book)?;
        let id = LoanId::new();

        sqlx::query(
            r#"
            INSERT INTO loans (id, borrower, book_id, loan_date, returned)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id.value())
        .bind(&loan.borrower)
        .bind(book_id.value())
        .bind(loan.loan_date)
        .bind(loan.returned)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(loan.with_id(id))
    }

    async fn find_by_id(&self, id: LoanId) -> Result<Option<Loan>> {
        let sql = format!("{} WHERE l.id = $1", SELECT_LOAN);
        let row = sqlx::query(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(map_row_to_loan).transpose()
    }

    /// 返却フラグのみ更新する（借り手・書籍・貸出日は作成時のまま）
    async fn update(&self, loan: Loan) -> Result<Loan> {
        let id = loan
            .id
            .ok_or_else(|| StoreError::Backend("loan has no id".into()))?;

        let result = sqlx::query("UPDATE loans SET returned = $2 WHERE id = $1")
            .bind(id.value())
            .bind(loan.returned)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(
                format!("loan {} not found", id.value()).into(),
            ));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| StoreError::Backend(format!("loan {} not found", id.value()).into()))
    }

    async fn exists_outstanding_for_book(&self, book: &Book) -> Result<bool> {
        let Some(book_id) = book.id else {
            return Ok(false);
        };

        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM loans
                WHERE book_id = $1 AND returned IS NOT TRUE
            )
            "#,
        )
        .bind(book_id.value())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_page(
        &self,
        book_code: &str,
        borrower: &str,
        page: PageRequest,
    ) -> Result<Page<Loan>> {
        let (limit, offset) = limit_offset(page);
        let page_sql = format!(
            "{} WHERE b.code = $1 OR l.borrower = $2 ORDER BY l.created_at, l.id LIMIT $3 OFFSET $4",
            SELECT_LOAN
        );

        let (total, rows) = futures::try_join!(
            sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*)
                FROM loans l
                JOIN books b ON b.id = l.book_id
                WHERE b.code = $1 OR l.borrower = $2
                "#,
            )
            .bind(book_code)
            .bind(borrower)
            .fetch_one(&self.pool),
            sqlx::query(&page_sql)
                .bind(book_code)
                .bind(borrower)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool),
        )
        .map_err(map_sqlx_error)?;

        let loans = rows.iter().map(map_row_to_loan).collect::<Result<Vec<_>>>()?;
        Ok(Page::new(loans, u64::try_from(total).unwrap_or(0), page))
    }

    async fn find_page_by_book(&self, book: &Book, page: PageRequest) -> Result<Page<Loan>> {
        let book_id = book_id(book)?;
        let (limit, offset) = limit_offset(page);
        let page_sql = format!(
            "{} WHERE l.book_id = $1 ORDER BY l.created_at, l.id LIMIT $2 OFFSET $3",
            SELECT_LOAN
        );

        let (total, rows) = futures::try_join!(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM loans WHERE book_id = $1")
                .bind(book_id.value())
                .fetch_one(&self.pool),
            sqlx::query(&page_sql)
                .bind(book_id.value())
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool),
        )
        .map_err(map_sqlx_error)?;

        let loans = rows.iter().map(map_row_to_loan).collect::<Result<Vec<_>>>()?;
        Ok(Page::new(loans, u64::try_from(total).unwrap_or(0), page))
    }
}
