//! # ACL Client Core
//!
//! Client-side evaluator for scoped access-control snapshots. Answers
//! "is this action allowed?" against a previously fetched snapshot
//! without a network round-trip per check.
//!
//! Three algorithms must agree bit-for-bit with the server that built
//! the snapshot: the canonical scope-key encoding, the deterministic
//! scope-widening fallback chain, and the wildcard-precedence matrix
//! lookup. How a snapshot is fetched, cached, or refreshed is the
//! caller's concern; this core only consumes one.
//!
//! ## Example
//!
//! ```
//! use acl_client::{
//!     decide, encode_scope_key, AccessMatrix, AccessSnapshot, DataDomain, Effect, Outcome,
//!     ScopedMatrix,
//! };
//!
//! let domain = DataDomain::new().with_org("acme").with_tenant("t1");
//!
//! let mut matrix = AccessMatrix::new();
//! matrix.insert("docs", "read", "*", Outcome::allow());
//!
//! let snapshot = AccessSnapshot::enabled()
//!     .with_scope(encode_scope_key(&domain), ScopedMatrix::local(matrix));
//!
//! assert_eq!(
//!     decide(Some(&snapshot), Some(&domain), "docs", "read", "view"),
//!     Effect::Allow
//! );
//! ```

pub mod error;
pub mod evaluate;
pub mod matrix;
pub mod response;
pub mod scope;
pub mod snapshot;

// Re-export the public surface
pub use error::{AclError, Result};
pub use evaluate::{decide, decide_outcome};
pub use matrix::{AccessMatrix, Effect, Outcome};
pub use response::{
    interpret_check_response, interpret_evaluate_response, CheckView, EvaluateView,
};
pub use scope::{
    build_fallback_chain, decode_scope_key, encode_scope_key, DataDomain, ScopeKeyFields,
    GLOBAL_SCOPE_KEY, WILDCARD,
};
pub use snapshot::{AccessSnapshot, ScopedMatrix};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
