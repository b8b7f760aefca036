//! Access snapshot wire shapes
//!
//! A snapshot is fetched out-of-band by the caller's network layer and
//! handed to the evaluator as an immutable value. This core never
//! mutates one; refresh replaces it wholesale.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::matrix::AccessMatrix;

/// Previously fetched, scoped access-control snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessSnapshot {
    /// Hard kill-switch: when false, every local decision is DENY
    pub enabled: bool,

    /// Scope key → per-scope matrix payload
    pub scopes: HashMap<String, ScopedMatrix>,

    /// Scope key the server resolved for the original request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_scope: Option<String>,

    /// Server-supplied ordered fallback keys for the original request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_fallback: Option<Vec<String>>,
}

impl AccessSnapshot {
    /// Empty, enabled snapshot (useful as a test fixture base)
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Add a scoped matrix under a key
    pub fn with_scope(mut self, key: impl Into<String>, scoped: ScopedMatrix) -> Self {
        self.scopes.insert(key.into(), scoped);
        self
    }
}

/// Per-scope payload within a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScopedMatrix {
    /// When true this scope's data is not safe to resolve locally and
    /// the caller must defer to a server-side check
    pub requires_server: bool,

    /// Area → domain → action matrix for this scope
    pub matrix: AccessMatrix,
}

impl ScopedMatrix {
    /// Locally resolvable payload wrapping a matrix
    pub fn local(matrix: AccessMatrix) -> Self {
        Self {
            requires_server: false,
            matrix,
        }
    }

    /// Payload whose scope must be resolved server-side
    pub fn server_only() -> Self {
        Self {
            requires_server: true,
            matrix: AccessMatrix::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Effect, Outcome};

    #[test]
    fn test_snapshot_deserializes_server_document() {
        let json = r#"{
            "enabled": true,
            "requestedScope": "org=acme|acct=*|tenant=t1|seg=*|owner=*",
            "requestedFallback": ["org=*|acct=*|tenant=*|seg=*|owner=*"],
            "scopes": {
                "org=acme|acct=*|tenant=t1|seg=*|owner=*": {
                    "requiresServer": false,
                    "matrix": {"docs": {"read": {"view": {"effect": "allow", "rule": "r1"}}}}
                },
                "org=*|acct=*|tenant=*|seg=*|owner=*": {
                    "requiresServer": true
                }
            }
        }"#;

        let snapshot: AccessSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.enabled);
        assert_eq!(
            snapshot.requested_scope.as_deref(),
            Some("org=acme|acct=*|tenant=t1|seg=*|owner=*")
        );
        assert_eq!(snapshot.scopes.len(), 2);

        let scoped = &snapshot.scopes["org=acme|acct=*|tenant=t1|seg=*|owner=*"];
        assert!(!scoped.requires_server);
        let outcome = scoped.matrix.lookup("docs", "read", "view").unwrap();
        assert_eq!(outcome.effect, Effect::Allow);
        assert_eq!(outcome.rule.as_deref(), Some("r1"));

        let global = &snapshot.scopes["org=*|acct=*|tenant=*|seg=*|owner=*"];
        assert!(global.requires_server);
        assert!(global.matrix.is_empty());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let snapshot: AccessSnapshot = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(!snapshot.enabled);
        assert!(snapshot.scopes.is_empty());
        assert!(snapshot.requested_scope.is_none());
        assert!(snapshot.requested_fallback.is_none());
    }

    #[test]
    fn test_builder_fixtures() {
        let mut matrix = AccessMatrix::new();
        matrix.insert("docs", "read", "view", Outcome::allow());

        let snapshot = AccessSnapshot::enabled()
            .with_scope("org=*|acct=*|tenant=*|seg=*|owner=*", ScopedMatrix::local(matrix));
        assert!(snapshot.enabled);
        assert_eq!(snapshot.scopes.len(), 1);
    }
}
