//! Snapshot decision evaluation
//!
//! Orchestrates the scope-key codec, fallback-chain builder, and matrix
//! lookup into a single linear scan over candidate scopes. Pure
//! functions of (snapshot, inputs); no state is retained between calls,
//! so concurrent evaluations against a shared snapshot need no
//! coordination.

use tracing::{debug, trace};

use crate::matrix::{Effect, Outcome};
use crate::scope::{build_fallback_chain, encode_scope_key, DataDomain, GLOBAL_SCOPE_KEY};
use crate::snapshot::AccessSnapshot;

/// Resolve an (area, domain, action) triple to ALLOW or DENY.
///
/// Same resolution as [`decide_outcome`], collapsed to the effect;
/// every non-match path, including an absent or disabled snapshot,
/// yields [`Effect::Deny`].
pub fn decide(
    snapshot: Option<&AccessSnapshot>,
    data_domain: Option<&DataDomain>,
    area: &str,
    domain: &str,
    action: &str,
) -> Effect {
    decide_outcome(snapshot, data_domain, area, domain, action)
        .map(|outcome| outcome.effect)
        .unwrap_or(Effect::Deny)
}

/// Resolve an (area, domain, action) triple to the full outcome record.
///
/// # Resolution
///
/// 1. Absent snapshot or `enabled == false` short-circuits to `None`
///    regardless of matrix contents.
/// 2. The starting scope key is the encoded `data_domain` when one was
///    supplied, else the snapshot's `requested_scope`, else the global
///    key.
/// 3. The fallback chain is computed locally from the starting key when
///    a `data_domain` was supplied; otherwise the server-supplied
///    `requested_fallback` is replayed, defaulting to a singleton
///    global chain.
/// 4. Candidates are scanned narrowest first; scopes missing from the
///    snapshot or flagged `requires_server` are skipped. The first
///    matrix hit is the answer; no hit anywhere returns `None`.
pub fn decide_outcome<'a>(
    snapshot: Option<&'a AccessSnapshot>,
    data_domain: Option<&DataDomain>,
    area: &str,
    domain: &str,
    action: &str,
) -> Option<&'a Outcome> {
    let snapshot = snapshot?;
    if !snapshot.enabled {
        debug!("snapshot disabled, local evaluation denied");
        return None;
    }

    let start_key = match data_domain {
        Some(dd) => encode_scope_key(dd),
        None => snapshot
            .requested_scope
            .clone()
            .unwrap_or_else(|| GLOBAL_SCOPE_KEY.to_string()),
    };

    let chain = match data_domain {
        Some(_) => build_fallback_chain(&start_key),
        None => snapshot
            .requested_fallback
            .clone()
            .unwrap_or_else(|| vec![GLOBAL_SCOPE_KEY.to_string()]),
    };

    // The literal start key is tried before any widening step. The chain
    // may re-derive it, but first hit wins, so the duplicate is harmless
    // and keeps the narrowest scope first even if the chain's first entry
    // ever diverges from the start key.
    for key in std::iter::once(&start_key).chain(chain.iter()) {
        let Some(scoped) = snapshot.scopes.get(key) else {
            trace!("no scoped matrix for candidate '{}'", key);
            continue;
        };
        if scoped.requires_server {
            trace!("scope '{}' requires server-side resolution, skipping", key);
            continue;
        }
        if let Some(outcome) = scoped.matrix.lookup(area, domain, action) {
            debug!(
                "resolved {} for ({}, {}, {}) in scope '{}'",
                outcome.effect, area, domain, action, key
            );
            return Some(outcome);
        }
    }

    debug!(
        "no candidate scope decided ({}, {}, {}), defaulting to deny",
        area, domain, action
    );
    None
}

impl AccessSnapshot {
    /// Convenience method form of [`decide`]
    pub fn decide(
        &self,
        data_domain: Option<&DataDomain>,
        area: &str,
        domain: &str,
        action: &str,
    ) -> Effect {
        decide(Some(self), data_domain, area, domain, action)
    }

    /// Convenience method form of [`decide_outcome`]
    pub fn decide_outcome(
        &self,
        data_domain: Option<&DataDomain>,
        area: &str,
        domain: &str,
        action: &str,
    ) -> Option<&Outcome> {
        decide_outcome(Some(self), data_domain, area, domain, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::AccessMatrix;
    use crate::snapshot::ScopedMatrix;

    fn tenant_domain() -> DataDomain {
        DataDomain::new().with_org("acme").with_tenant("t1")
    }

    fn allow_matrix() -> AccessMatrix {
        AccessMatrix::from_iter([("docs", "read", "view", Outcome::allow())])
    }

    #[test]
    fn test_absent_snapshot_denies() {
        assert_eq!(
            decide(None, Some(&tenant_domain()), "docs", "read", "view"),
            Effect::Deny
        );
        assert!(decide_outcome(None, None, "docs", "read", "view").is_none());
    }

    #[test]
    fn test_disabled_snapshot_denies_regardless_of_matrix() {
        let mut snapshot = AccessSnapshot::enabled()
            .with_scope(GLOBAL_SCOPE_KEY, ScopedMatrix::local(allow_matrix()));
        snapshot.enabled = false;

        assert_eq!(
            snapshot.decide(Some(&tenant_domain()), "docs", "read", "view"),
            Effect::Deny
        );
    }

    #[test]
    fn test_exact_scope_hit() {
        let key = encode_scope_key(&tenant_domain());
        let snapshot =
            AccessSnapshot::enabled().with_scope(&key, ScopedMatrix::local(allow_matrix()));

        assert_eq!(
            snapshot.decide(Some(&tenant_domain()), "docs", "read", "view"),
            Effect::Allow
        );
    }

    #[test]
    fn test_fallback_widens_to_broader_scope() {
        // Only the org-wide scope is in the snapshot; the tenant-scoped
        // start key misses and widening must reach it.
        let snapshot = AccessSnapshot::enabled().with_scope(
            "org=acme|acct=*|tenant=*|seg=*|owner=*",
            ScopedMatrix::local(allow_matrix()),
        );

        assert_eq!(
            snapshot.decide(Some(&tenant_domain()), "docs", "read", "view"),
            Effect::Allow
        );
    }

    #[test]
    fn test_requires_server_scope_is_skipped() {
        let key = encode_scope_key(&tenant_domain());
        let snapshot = AccessSnapshot::enabled()
            .with_scope(&key, ScopedMatrix::server_only())
            .with_scope(GLOBAL_SCOPE_KEY, ScopedMatrix::local(allow_matrix()));

        // The narrow scope defers to the server, the scan continues to
        // the global scope instead of stopping.
        assert_eq!(
            snapshot.decide(Some(&tenant_domain()), "docs", "read", "view"),
            Effect::Allow
        );
    }

    #[test]
    fn test_usable_scope_without_entry_continues_scan() {
        let key = encode_scope_key(&tenant_domain());
        let narrow = AccessMatrix::from_iter([("billing", "invoice", "pay", Outcome::deny())]);
        let snapshot = AccessSnapshot::enabled()
            .with_scope(&key, ScopedMatrix::local(narrow))
            .with_scope(GLOBAL_SCOPE_KEY, ScopedMatrix::local(allow_matrix()));

        assert_eq!(
            snapshot.decide(Some(&tenant_domain()), "docs", "read", "view"),
            Effect::Allow
        );
    }

    #[test]
    fn test_default_deny_with_empty_scopes() {
        let snapshot = AccessSnapshot::enabled();
        assert_eq!(
            snapshot.decide(Some(&tenant_domain()), "docs", "read", "view"),
            Effect::Deny
        );
        assert!(snapshot
            .decide_outcome(Some(&tenant_domain()), "docs", "read", "view")
            .is_none());
    }

    #[test]
    fn test_no_domain_uses_requested_scope() {
        let mut snapshot = AccessSnapshot::enabled().with_scope(
            "org=acme|acct=*|tenant=t1|seg=*|owner=*",
            ScopedMatrix::local(allow_matrix()),
        );
        snapshot.requested_scope = Some("org=acme|acct=*|tenant=t1|seg=*|owner=*".to_string());

        assert_eq!(snapshot.decide(None, "docs", "read", "view"), Effect::Allow);
    }

    #[test]
    fn test_no_domain_replays_requested_fallback() {
        let mut snapshot = AccessSnapshot::enabled().with_scope(
            "org=acme|acct=*|tenant=*|seg=*|owner=*",
            ScopedMatrix::local(allow_matrix()),
        );
        snapshot.requested_scope = Some("org=acme|acct=*|tenant=t1|seg=*|owner=*".to_string());
        snapshot.requested_fallback =
            Some(vec!["org=acme|acct=*|tenant=*|seg=*|owner=*".to_string()]);

        assert_eq!(snapshot.decide(None, "docs", "read", "view"), Effect::Allow);
    }

    #[test]
    fn test_no_domain_no_requested_scope_defaults_global() {
        let snapshot = AccessSnapshot::enabled()
            .with_scope(GLOBAL_SCOPE_KEY, ScopedMatrix::local(allow_matrix()));

        assert_eq!(snapshot.decide(None, "docs", "read", "view"), Effect::Allow);
    }

    #[test]
    fn test_outcome_provenance_passes_through() {
        let matrix = AccessMatrix::from_iter([(
            "docs",
            "read",
            "view",
            Outcome::allow().with_rule("r-42").with_priority(7).with_source("policy-set"),
        )]);
        let snapshot =
            AccessSnapshot::enabled().with_scope(GLOBAL_SCOPE_KEY, ScopedMatrix::local(matrix));

        let outcome = snapshot
            .decide_outcome(Some(&DataDomain::new()), "docs", "read", "view")
            .unwrap();
        assert_eq!(outcome.rule.as_deref(), Some("r-42"));
        assert_eq!(outcome.priority, Some(7));
        assert_eq!(outcome.source.as_deref(), Some("policy-set"));
    }

    #[test]
    fn test_narrow_deny_beats_broad_allow() {
        let key = encode_scope_key(&tenant_domain());
        let narrow = AccessMatrix::from_iter([("docs", "read", "view", Outcome::deny())]);
        let snapshot = AccessSnapshot::enabled()
            .with_scope(&key, ScopedMatrix::local(narrow))
            .with_scope(GLOBAL_SCOPE_KEY, ScopedMatrix::local(allow_matrix()));

        assert_eq!(
            snapshot.decide(Some(&tenant_domain()), "docs", "read", "view"),
            Effect::Deny
        );
    }
}
