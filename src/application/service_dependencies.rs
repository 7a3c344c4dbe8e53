use crate::ports::{BookStore, LoanStore};
use std::sync::Arc;

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// サービス関数は状態を持たず、共有される可変状態はすべてストア側にある。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_store: Arc<dyn BookStore>,
    pub loan_store: Arc<dyn LoanStore>,
}
