//! Scope-key encoding and fallback-chain construction
//!
//! A scope key is the canonical string form of a [`DataDomain`], used as
//! the lookup key into a snapshot's scope map. The fallback module widens
//! a key field by field toward the fully global scope so callers can try
//! narrower-to-broader matches.

pub mod fallback;
pub mod key;

pub use fallback::build_fallback_chain;
pub use key::{
    decode_scope_key, encode_scope_key, DataDomain, ScopeKeyFields, GLOBAL_SCOPE_KEY, WILDCARD,
};
