mod catalog_service;

pub use catalog_service::{
    DUPLICATE_CODE_MESSAGE, create_book, delete_book, find_books, get_book_by_code,
    get_book_by_id, remove_book, revise_book, update_book,
};
