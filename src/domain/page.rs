use serde::{Deserialize, Serialize};

use super::PageRequestError;

/// ページ指定（0始まりのページ番号とページサイズ）
///
/// 書籍検索と貸出検索で同じ形を使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page_index: u32,
    page_size: u32,
}

impl PageRequest {
    /// ページサイズ0は不正
    pub fn new(page_index: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self {
            page_index,
            page_size,
        })
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 先頭からスキップする件数
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }

    /// 全件のスライスからこのページ分を切り出す
    ///
    /// インメモリのストア実装で使用する。
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total_matches = items.len() as u64;
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let items = items
            .into_iter()
            .skip(offset)
            .take(self.page_size as usize)
            .collect();
        Page::new(items, total_matches, *self)
    }
}

/// 検索結果の1ページと全ページ合計の該当件数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_matches: u64,
    pub page_index: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_matches: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_matches,
            page_index: request.page_index(),
            page_size: request.page_size(),
        }
    }

    /// 要素を変換する（ページ情報は維持）
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_matches: self.total_matches,
            page_index: self.page_index,
            page_size: self.page_size,
        }
    }
}
