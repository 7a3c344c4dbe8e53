use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Book, LoanId, ValidationError};

/// 借り手名の最大文字数
pub const BORROWER_MAX_LEN: usize = 1000;

/// 貸出状態
///
/// `returned`フラグから導出される。未設定（`None`）も貸出中として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanState {
    /// 貸出中
    Outstanding,
    /// 返却済み
    Returned,
}

/// 貸出 - 1冊の書籍の1回の貸出
///
/// ビジネスルール：
/// - 1冊の書籍につき貸出中（`returned != Some(true)`）の貸出は常に高々1件
/// - 書籍への参照は作成時に決まり、以後変更しない
/// - 作成後に変更されるのは`returned`のみ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: Option<LoanId>,
    pub borrower: String,
    pub book: Book,
    pub loan_date: NaiveDate,
    pub returned: Option<bool>,
}

impl Loan {
    /// 未登録の貸出を作成する（貸出中状態）
    pub fn new(book: Book, borrower: impl Into<String>, loan_date: NaiveDate) -> Self {
        Self {
            id: None,
            borrower: borrower.into(),
            book,
            loan_date,
            returned: Some(false),
        }
    }

    /// ストアが採番したIDを付与する
    pub fn with_id(mut self, id: LoanId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn state(&self) -> LoanState {
        match self.returned {
            Some(true) => LoanState::Returned,
            Some(false) | None => LoanState::Outstanding,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.state() == LoanState::Outstanding
    }

    /// 借り手名が空でなく、上限文字数以内であることを確認する
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.borrower.trim().is_empty() {
            return Err(ValidationError::Empty("borrower"));
        }
        if self.borrower.chars().count() > BORROWER_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: "borrower",
                max: BORROWER_MAX_LEN,
            });
        }
        Ok(())
    }
}

/// 貸出検索のフィルタ
///
/// 書籍コードと借り手名の両方を指定する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanFilter {
    pub book_code: String,
    pub borrower: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookId;

    fn loan_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn sample_book() -> Book {
        Book::new("Meu Livro", "Autor", "123123").with_id(BookId::new())
    }

    #[test]
    fn test_new_loan_is_outstanding() {
        let loan = Loan::new(sample_book(), "Fulano", loan_date());
        assert_eq!(loan.returned, Some(false));
        assert_eq!(loan.state(), LoanState::Outstanding);
        assert!(loan.id.is_none());
    }

    #[test]
    fn test_unset_returned_flag_counts_as_outstanding() {
        let mut loan = Loan::new(sample_book(), "Fulano", loan_date());
        loan.returned = None;
        assert!(loan.is_outstanding());
    }

    #[test]
    fn test_returned_flag_true_is_returned() {
        let mut loan = Loan::new(sample_book(), "Fulano", loan_date());
        loan.returned = Some(true);
        assert_eq!(loan.state(), LoanState::Returned);
        assert!(!loan.is_outstanding());
    }

    #[test]
    fn test_returned_loan_can_be_reverted() {
        let mut loan = Loan::new(sample_book(), "Fulano", loan_date());
        loan.returned = Some(true);
        loan.returned = Some(false);
        assert!(loan.is_outstanding());
    }

    #[test]
    fn test_validate_rejects_blank_borrower() {
        let loan = Loan::new(sample_book(), " ", loan_date());
        assert_eq!(loan.validate(), Err(ValidationError::Empty("borrower")));
    }

    #[test]
    fn test_validate_rejects_long_borrower() {
        let loan = Loan::new(sample_book(), "a".repeat(BORROWER_MAX_LEN + 1), loan_date());
        assert!(matches!(
            loan.validate(),
            Err(ValidationError::TooLong { field: "borrower", .. })
        ));

        let loan = Loan::new(sample_book(), "a".repeat(BORROWER_MAX_LEN), loan_date());
        assert!(loan.validate().is_ok());
    }
}
