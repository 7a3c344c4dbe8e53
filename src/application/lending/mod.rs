mod lending_service;

pub use lending_service::{
    BOOK_ON_LOAN_MESSAGE, UNKNOWN_CODE_MESSAGE, checkout_book, create_loan, find_loans,
    get_loan_by_id, get_loans_by_book, record_return, update_loan,
};
