//! Fallback-chain construction
//!
//! Widens a scope key one field at a time toward the fully global key,
//! producing the ordered candidate list used when no exact-scope entry
//! is usable.

use super::key::{decode_scope_key, ScopeKeyFields, GLOBAL_SCOPE_KEY, WILDCARD};

/// Build the ordered fallback chain for a scope key.
///
/// Widens fields strictly in the order owner → seg → tenant → acct →
/// org, each step replacing that single field with `*` while keeping
/// earlier widenings in place, and emits the re-encoded key after every
/// step. A decodable key therefore yields exactly five entries, the
/// last of which is always [`GLOBAL_SCOPE_KEY`]; a malformed key yields
/// an empty chain.
///
/// # Examples
///
/// ```
/// use acl_client::build_fallback_chain;
///
/// let chain = build_fallback_chain("org=acme|acct=*|tenant=t1|seg=*|owner=*");
/// assert_eq!(chain.len(), 5);
/// assert_eq!(chain[0], "org=acme|acct=*|tenant=t1|seg=*|owner=*");
/// assert_eq!(chain[4], "org=*|acct=*|tenant=*|seg=*|owner=*");
/// ```
pub fn build_fallback_chain(scope_key: &str) -> Vec<String> {
    let Ok(start) = decode_scope_key(scope_key) else {
        return Vec::new();
    };

    let mut chain = Vec::with_capacity(6);
    let mut current = start;

    current = ScopeKeyFields {
        owner: WILDCARD.to_string(),
        ..current
    };
    chain.push(current.format());

    current = ScopeKeyFields {
        seg: WILDCARD.to_string(),
        ..current
    };
    chain.push(current.format());

    current = ScopeKeyFields {
        tenant: WILDCARD.to_string(),
        ..current
    };
    chain.push(current.format());

    current = ScopeKeyFields {
        acct: WILDCARD.to_string(),
        ..current
    };
    chain.push(current.format());

    current = ScopeKeyFields {
        org: WILDCARD.to_string(),
        ..current
    };
    chain.push(current.format());

    // The five-step order already ends at the global key; guard anyway so
    // the chain invariant survives any future reordering of the steps.
    if chain.last().map(String::as_str) != Some(GLOBAL_SCOPE_KEY) {
        chain.push(GLOBAL_SCOPE_KEY.to_string());
    }

    chain
}
