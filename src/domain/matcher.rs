use super::{Book, BookFilter};

/// 照合対象となる書籍のフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Code,
}

impl BookField {
    /// 永続化先のカラム名
    pub fn column(&self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Code => "code",
        }
    }

    pub fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            BookField::Title => &book.title,
            BookField::Author => &book.author,
            BookField::Code => &book.code,
        }
    }
}

/// 書籍検索の照合条件
///
/// フィルタの空でないフィールドごとに（フィールド, 検索語）の組を持つ。
/// 各組は大文字小文字を区別しない部分一致で、すべての組を満たす書籍が該当する。
/// 組が1つもなければ全件が該当する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookMatcher {
    criteria: Vec<(BookField, String)>,
}

impl BookMatcher {
    pub fn from_filter(filter: &BookFilter) -> Self {
        let criteria = [
            (BookField::Title, filter.title.as_deref()),
            (BookField::Author, filter.author.as_deref()),
            (BookField::Code, filter.code.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, needle)| match needle {
            Some(needle) if !needle.is_empty() => Some((field, needle.to_string())),
            _ => None,
        })
        .collect();

        Self { criteria }
    }

    pub fn criteria(&self) -> &[(BookField, String)] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.criteria.iter().all(|(field, needle)| {
            field
                .value(book)
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }
}
