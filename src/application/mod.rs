pub mod catalog;
mod errors;
pub mod lending;
mod service_dependencies;

pub use errors::{ApplicationError, Result};
pub use service_dependencies::ServiceDependencies;
