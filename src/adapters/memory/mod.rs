pub mod book_store;
pub mod loan_store;

pub use book_store::BookStore as MemoryBookStore;
pub use loan_store::LoanStore as MemoryLoanStore;

use crate::ports::StoreError;
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Backend("in-memory store lock poisoned".into()))
}

fn not_found(what: &str) -> StoreError {
    StoreError::Backend(format!("{} not found", what).into())
}
