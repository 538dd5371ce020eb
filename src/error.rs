//! Error types for scheduling operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence error while trying to {context}: {source}")]
    Persistence {
        context: String,
        #[source]
        source: sqlx::Error,
    },
}

pub type Result<T> = std::result::Result<T, SchedulingError>;

impl SchedulingError {
    pub fn validation(msg: impl Into<String>) -> Self {
        SchedulingError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        SchedulingError::NotFound(msg.into())
    }
}

/// Wraps a `sqlx::Error` with the operation that failed, for use with `map_err`.
pub fn persistence(context: impl Into<String>) -> impl FnOnce(sqlx::Error) -> SchedulingError {
    let context = context.into();
    move |source| SchedulingError::Persistence { context, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_message_names_the_operation() {
        let err = persistence("insert scheduled activity for preference p1")(sqlx::Error::RowNotFound);
        let msg = err.to_string();
        assert!(msg.contains("insert scheduled activity for preference p1"));
        assert!(matches!(err, SchedulingError::Persistence { .. }));
    }
}
