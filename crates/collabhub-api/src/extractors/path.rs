//! Typed path parameter helpers.

use std::str::FromStr;

use collabhub_core::error::AppError;

/// Parses a typed identifier from a path segment.
///
/// Malformed ids surface as a 400 in the standard error body rather than
/// Axum's plain-text path rejection.
pub fn parse_id<T>(s: &str) -> Result<T, AppError>
where
    T: FromStr,
{
    s.parse::<T>()
        .map_err(|_| AppError::validation(format!("Invalid id: {s}")))
}
