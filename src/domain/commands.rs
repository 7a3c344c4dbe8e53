use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookId, LoanId};

/// コマンド：書籍コードを指定して貸し出す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutBook {
    pub book_code: String,
    pub borrower: String,
    /// 未指定の場合は当日
    pub loan_date: Option<NaiveDate>,
}

/// コマンド：返却フラグを設定する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordReturn {
    pub loan_id: LoanId,
    pub returned: bool,
}

/// コマンド：書籍のタイトルと著者を置き換える
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviseBook {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
}
