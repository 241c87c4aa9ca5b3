pub mod types;
pub mod filter_where;
pub mod company;
pub mod job;
pub mod error;

pub use types::*;
pub use error::QueryError;
pub use filter_where::FilterWhere;
