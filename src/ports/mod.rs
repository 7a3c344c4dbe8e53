pub mod book_store;
pub mod loan_store;
pub mod store_error;

pub use book_store::*;
pub use loan_store::*;
pub use store_error::StoreError;
