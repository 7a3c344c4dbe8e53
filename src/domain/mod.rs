pub mod book;
pub mod commands;
pub mod errors;
pub mod loan;
pub mod matcher;
pub mod page;
pub mod value_objects;

pub use book::*;
pub use errors::*;
pub use loan::*;
pub use matcher::*;
pub use page::*;
pub use value_objects::*;
