//! Error handling utilities for repositories

use hub_core::error::DomainError;
use hub_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation through `on_unique` (given the violated
/// constraint name, when reported); anything else is a database error
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

pub fn resource_not_found(id: Snowflake) -> DomainError {
    DomainError::ResourceNotFound(id)
}

pub fn version_not_found(id: Snowflake) -> DomainError {
    DomainError::VersionNotFound(id)
}

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn test_non_database_error_is_database_error() {
        let err = map_unique_violation(SqlxError::RowNotFound, |_| DomainError::EmailAlreadyExists);
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
