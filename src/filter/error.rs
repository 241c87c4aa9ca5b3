use thiserror::Error;

/// Caller errors raised while turning request input into SQL fragments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("No data")]
    EmptyInput,

    #[error("{min_field} cannot be greater than {max_field}")]
    RangeConsistency {
        min_field: &'static str,
        max_field: &'static str,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
