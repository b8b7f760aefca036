//! Error types for the ACL client core

use thiserror::Error;

/// Errors surfaced by the ACL client core.
///
/// These only ever escape through the parsing entry points
/// (`decode_scope_key`, `Effect::from_str`); every evaluation path
/// absorbs them into a default-deny result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AclError {
    /// Empty scope key string provided
    #[error("scope key cannot be empty")]
    EmptyScopeKey,

    /// Scope key segment without a `key=value` form
    #[error("malformed scope key segment: '{0}'")]
    MalformedSegment(String),

    /// Scope key is missing one of the five required fields
    #[error("scope key is missing required field '{0}'")]
    MissingField(&'static str),

    /// Effect value other than allow/deny
    #[error("invalid effect: '{0}'")]
    InvalidEffect(String),
}

/// Result type for ACL client operations
pub type Result<T> = std::result::Result<T, AclError>;
