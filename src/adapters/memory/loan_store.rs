use crate::domain::{Book, Loan, LoanId, Page, PageRequest};
use crate::ports::StoreError;
use crate::ports::loan_store::{LoanStore as LoanStoreTrait, OUTSTANDING_LOAN_CONSTRAINT, Result};
use async_trait::async_trait;
use std::sync::Mutex;

use super::{lock, not_found};

/// LoanStoreのインメモリ実装
///
/// 貸出は書籍レコードを内包して保持し、書籍コードでの検索に使用する。
/// 「1冊につき貸出中は1件まで」は登録・更新と同じロック内で確認する。
pub struct LoanStore {
    loans: Mutex<Vec<Loan>>,
}

impl LoanStore {
    pub fn new() -> Self {
        Self {
            loans: Mutex::new(Vec::new()),
        }
    }

    /// 登録済みの貸出数
    pub fn len(&self) -> usize {
        self.loans.lock().map(|loans| loans.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LoanStore {
    fn default() -> Self {
        Self::new()
    }
}

fn same_book(a: &Book, b: &Book) -> bool {
    a.id.is_some() && a.id == b.id
}

/// `candidate`を保存すると同じ書籍の貸出中が2件になるか
fn violates_outstanding(loans: &[Loan], candidate: &Loan) -> bool {
    candidate.is_outstanding()
        && loans.iter().any(|l| {
            l.id != candidate.id && l.is_outstanding() && same_book(&l.book, &candidate.book)
        })
}

fn outstanding_violation() -> StoreError {
    StoreError::UniqueViolation {
        constraint: OUTSTANDING_LOAN_CONSTRAINT.to_string(),
    }
}

#[async_trait]
impl LoanStoreTrait for LoanStore {
    async fn insert(&self, loan: Loan) -> Result<Loan> {
        let mut loans = lock(&self.loans)?;

        let stored = loan.with_id(LoanId::new());
        if violates_outstanding(&loans, &stored) {
            return Err(outstanding_violation());
        }

        loans.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: LoanId) -> Result<Option<Loan>> {
        let loans = lock(&self.loans)?;
        Ok(loans.iter().find(|l| l.id == Some(id)).cloned())
    }

    /// 返却フラグのみ更新する（借り手・書籍・貸出日は作成時のまま）
    async fn update(&self, loan: Loan) -> Result<Loan> {
        let mut loans = lock(&self.loans)?;

        let index = loans
            .iter()
            .position(|l| loan.id.is_some() && l.id == loan.id)
            .ok_or_else(|| not_found("loan"))?;

        let mut updated = loans[index].clone();
        updated.returned = loan.returned;
        if violates_outstanding(&loans, &updated) {
            return Err(outstanding_violation());
        }

        loans[index] = updated.clone();
        Ok(updated)
    }

    async fn exists_outstanding_for_book(&self, book: &Book) -> Result<bool> {
        let loans = lock(&self.loans)?;
        Ok(loans
            .iter()
            .any(|l| l.is_outstanding() && same_book(&l.book, book)))
    }

    async fn find_page(
        &self,
        book_code: &str,
        borrower: &str,
        page: PageRequest,
    ) -> Result<Page<Loan>> {
        let loans = lock(&self.loans)?;
        let matching: Vec<Loan> = loans
            .iter()
            .filter(|l| l.book.code == book_code || l.borrower == borrower)
            .cloned()
            .collect();
        Ok(page.paginate(matching))
    }

    async fn find_page_by_book(&self, book: &Book, page: PageRequest) -> Result<Page<Loan>> {
        let loans = lock(&self.loans)?;
        let matching: Vec<Loan> = loans
            .iter()
            .filter(|l| same_book(&l.book, book))
            .cloned()
            .collect();
        Ok(page.paginate(matching))
    }
}
