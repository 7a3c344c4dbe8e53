use serde::{Deserialize, Serialize};

use super::{BookId, ValidationError};

/// タイトル・著者・コードの上限文字数
pub const BOOK_FIELD_MAX_LEN: usize = 255;

/// 書籍 - カタログの1レコード
///
/// `id`はストアへの登録時に採番されるため、未登録の書籍では`None`。
/// `code`（ISBNなど外部で付与されたコード）はカタログ全体で一意であり、登録後は変更しない。
/// 貸出履歴は書籍が保持せず、貸出ストアへの問い合わせで導出する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Option<BookId>,
    pub title: String,
    pub author: String,
    pub code: String,
}

impl Book {
    /// 未登録の書籍を作成する
    pub fn new(title: impl Into<String>, author: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            code: code.into(),
        }
    }

    /// ストアが採番したIDを付与する
    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }

    /// 必須項目（タイトル・著者・コード）が空でなく、上限文字数以内であることを確認する
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("code", &self.code),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::Empty(field));
            }
            if value.chars().count() > BOOK_FIELD_MAX_LEN {
                return Err(ValidationError::TooLong {
                    field,
                    max: BOOK_FIELD_MAX_LEN,
                });
            }
        }
        Ok(())
    }
}

/// 書籍検索のフィルタ
///
/// 値が`None`または空文字のフィールドは条件に含めない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub code: Option<String>,
}
