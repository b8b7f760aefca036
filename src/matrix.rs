//! In-scope action matrix and wildcard-precedence lookup

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::error::AclError;
use crate::scope::WILDCARD;

/// Terminal effect of a resolved decision.
///
/// Case-insensitive at rest; reads and renders as uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Allow the action
    Allow,
    /// Deny the action
    Deny,
}

impl Effect {
    /// Canonical uppercase wire form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "ALLOW",
            Self::Deny => "DENY",
        }
    }

    /// Whether this effect allows the action
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Effect {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("allow") {
            Ok(Self::Allow)
        } else if s.eq_ignore_ascii_case("deny") {
            Ok(Self::Deny)
        } else {
            Err(AclError::InvalidEffect(s.to_string()))
        }
    }
}

impl Serialize for Effect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Effect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Resolved decision record with rule provenance.
///
/// Provenance fields are carried through unmodified for audit and
/// debugging; only `effect` is interpreted by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Decision effect
    pub effect: Effect,

    /// Rule that produced this entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// Rule priority at evaluation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Whether the rule was final (stopped server-side evaluation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_rule: Option<bool>,

    /// Origin of the rule (policy set, migration, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Outcome {
    /// Bare allow outcome with no provenance
    pub fn allow() -> Self {
        Self::new(Effect::Allow)
    }

    /// Bare deny outcome with no provenance
    pub fn deny() -> Self {
        Self::new(Effect::Deny)
    }

    fn new(effect: Effect) -> Self {
        Self {
            effect,
            rule: None,
            priority: None,
            final_rule: None,
            source: None,
        }
    }

    /// Attach the originating rule name
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Attach the rule priority
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Attach the rule source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Three-level action matrix: area → domain → action → [`Outcome`].
///
/// An explicit keyed map per level makes a missing level a checked
/// case rather than an implicit lookup miss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessMatrix(HashMap<String, HashMap<String, HashMap<String, Outcome>>>);

impl AccessMatrix {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an outcome for an (area, domain, action) triple.
    ///
    /// Any of the three components may be the literal `*` to store a
    /// wildcard entry at that level.
    pub fn insert(
        &mut self,
        area: impl Into<String>,
        domain: impl Into<String>,
        action: impl Into<String>,
        outcome: Outcome,
    ) {
        self.0
            .entry(area.into())
            .or_default()
            .entry(domain.into())
            .or_default()
            .insert(action.into(), outcome);
    }

    /// Whether the matrix holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a triple using fixed wildcard precedence.
    ///
    /// Candidates are tried in order, first hit wins:
    ///
    /// 1. `(area, domain, action)`
    /// 2. `(area, domain, *)`
    /// 3. `(area, *, action)`
    /// 4. `(area, *, *)`
    /// 5. `(*, domain, action)`
    /// 6. `(*, domain, *)`
    /// 7. `(*, *, action)`
    /// 8. `(*, *, *)`
    ///
    /// Exact matches win, then action is wildcarded before domain, and
    /// domain before area. Absence at any level just moves on to the
    /// next candidate; all eight missing returns `None`.
    pub fn lookup(&self, area: &str, domain: &str, action: &str) -> Option<&Outcome> {
        let candidates = [
            [area, domain, action],
            [area, domain, WILDCARD],
            [area, WILDCARD, action],
            [area, WILDCARD, WILDCARD],
            [WILDCARD, domain, action],
            [WILDCARD, domain, WILDCARD],
            [WILDCARD, WILDCARD, action],
            [WILDCARD, WILDCARD, WILDCARD],
        ];

        for [a, d, act] in candidates {
            let Some(domains) = self.0.get(a) else {
                continue;
            };
            let Some(actions) = domains.get(d) else {
                continue;
            };
            if let Some(outcome) = actions.get(act) {
                return Some(outcome);
            }
        }

        None
    }
}

impl<A, D, C> FromIterator<(A, D, C, Outcome)> for AccessMatrix
where
    A: Into<String>,
    D: Into<String>,
    C: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (A, D, C, Outcome)>>(iter: T) -> Self {
        let mut matrix = Self::new();
        for (area, domain, action, outcome) in iter {
            matrix.insert(area, domain, action, outcome);
        }
        matrix
    }
}
