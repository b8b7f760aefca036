//! Server response interpreters
//!
//! Normalizers for the two raw check-endpoint response shapes, used by
//! callers hitting the single-check and bulk-evaluate endpoints rather
//! than the snapshot flow. Raw documents are consumed as
//! [`serde_json::Value`] because every field is optional and the
//! constraint lists must tolerate non-array shapes from older servers.

use serde_json::{Map, Value};

/// Normalized view of a single-check response.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckView {
    /// Canonical decision, `ALLOW` or `DENY`
    pub decision: String,

    /// Decision scope: `EXACT`, `SCOPED`, or `DEFAULT`
    pub scope: String,

    /// Scoped constraints when the decision is `SCOPED`
    pub constraints: Vec<Value>,

    /// Back-compat flag for older filter-constraint clients
    pub filter_constraints_present: bool,

    /// Back-compat filter constraints
    pub filter_constraints: Vec<Value>,
}

impl Default for CheckView {
    fn default() -> Self {
        Self {
            decision: "DENY".to_string(),
            scope: "DEFAULT".to_string(),
            constraints: Vec::new(),
            filter_constraints_present: false,
            filter_constraints: Vec::new(),
        }
    }
}

/// Normalize a raw single-check response document.
///
/// Decision prefers an explicit `decision` field, then `finalEffect`
/// uppercased, then `DENY`. Scope defaults to `DEFAULT`; both
/// constraint lists default to empty when missing or not array-shaped.
/// A missing or null document yields the all-default deny view.
pub fn interpret_check_response(raw: Option<&Value>) -> CheckView {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        return CheckView::default();
    };

    let decision = raw
        .get("decision")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| {
            raw.get("finalEffect")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_uppercase)
        })
        .unwrap_or_else(|| "DENY".to_string());

    let scope = raw
        .get("decisionScope")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("DEFAULT")
        .to_string();

    CheckView {
        decision,
        scope,
        constraints: array_or_empty(raw.get("scopedConstraints")),
        filter_constraints_present: raw
            .get("filterConstraintsPresent")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        filter_constraints: array_or_empty(raw.get("filterConstraints")),
    }
}

/// Normalized view of a bulk evaluate response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluateView {
    /// Allowed entries keyed by the server's grouping
    pub allow: Map<String, Value>,

    /// Denied entries keyed by the server's grouping
    pub deny: Map<String, Value>,

    /// Per-action decision documents, area → domain → action
    pub decisions: Map<String, Value>,

    /// Evaluation mode the server used, `LEGACY` when unreported
    pub eval_mode_used: String,
}

impl EvaluateView {
    /// Exact-match walk of the decisions tree.
    ///
    /// No wildcard precedence here: each level must be present
    /// verbatim, and any missing level (or explicit null leaf) returns
    /// `None`.
    pub fn decision(&self, area: &str, domain: &str, action: &str) -> Option<&Value> {
        self.decisions
            .get(area)?
            .get(domain)?
            .get(action)
            .filter(|v| !v.is_null())
    }
}

/// Normalize a raw bulk evaluate response document.
///
/// `allow`, `deny`, and `decisions` default to empty maps and
/// `evalModeUsed` to `LEGACY`, so a missing or null document yields an
/// empty view whose lookups all miss.
pub fn interpret_evaluate_response(raw: Option<&Value>) -> EvaluateView {
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        return EvaluateView {
            eval_mode_used: "LEGACY".to_string(),
            ..EvaluateView::default()
        };
    };

    EvaluateView {
        allow: object_or_empty(raw.get("allow")),
        deny: object_or_empty(raw.get("deny")),
        decisions: object_or_empty(raw.get("decisions")),
        eval_mode_used: raw
            .get("evalModeUsed")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("LEGACY")
            .to_string(),
    }
}

fn array_or_empty(value: Option<&Value>) -> Vec<Value> {
    value
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn object_or_empty(value: Option<&Value>) -> Map<String, Value> {
    value
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
