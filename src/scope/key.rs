//! Canonical scope-key codec
//!
//! Encodes a [`DataDomain`] into the persisted key format
//! `org=<v>|acct=<v>|tenant=<v>|seg=<v>|owner=<v>` and decodes it back.
//! Field order and separators are a wire contract: keys are matched
//! verbatim against server-produced snapshot maps, so any deviation
//! breaks every lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AclError, Result};

/// Wildcard token meaning "any value" for a scope field
pub const WILDCARD: &str = "*";

/// The fully global scope key, matched by every request
pub const GLOBAL_SCOPE_KEY: &str = "org=*|acct=*|tenant=*|seg=*|owner=*";

/// Descriptor of the security scope of a request.
///
/// Each field is either a concrete identifier or absent; absent (or
/// empty after trimming) means "any" and encodes as the wildcard token.
///
/// # Examples
///
/// ```
/// use acl_client::{encode_scope_key, DataDomain};
///
/// let domain = DataDomain::new().with_org("acme").with_tenant("t1");
/// assert_eq!(
///     encode_scope_key(&domain),
///     "org=acme|acct=*|tenant=t1|seg=*|owner=*"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataDomain {
    /// Organization reference name
    pub org_ref_name: Option<String>,

    /// Account number within the organization
    pub account_number: Option<String>,

    /// Tenant identifier
    pub tenant_id: Option<String>,

    /// Data segment within the tenant
    pub data_segment: Option<String>,

    /// Owner identifier
    pub owner_id: Option<String>,
}

impl DataDomain {
    /// Create an empty data domain (every field wildcards on encode)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the organization reference name
    pub fn with_org(mut self, value: impl Into<String>) -> Self {
        self.org_ref_name = Some(value.into());
        self
    }

    /// Set the account number
    pub fn with_account(mut self, value: impl Into<String>) -> Self {
        self.account_number = Some(value.into());
        self
    }

    /// Set the tenant identifier
    pub fn with_tenant(mut self, value: impl Into<String>) -> Self {
        self.tenant_id = Some(value.into());
        self
    }

    /// Set the data segment
    pub fn with_segment(mut self, value: impl Into<String>) -> Self {
        self.data_segment = Some(value.into());
        self
    }

    /// Set the owner identifier
    pub fn with_owner(mut self, value: impl Into<String>) -> Self {
        self.owner_id = Some(value.into());
        self
    }
}

/// Decoded scope key with all five fields wildcard-normalized.
///
/// The fixed five-field shape makes widening an explicit struct copy
/// with one field changed, so no step can drop or reorder fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKeyFields {
    /// Organization value or `*`
    pub org: String,
    /// Account value or `*`
    pub acct: String,
    /// Tenant value or `*`
    pub tenant: String,
    /// Segment value or `*`
    pub seg: String,
    /// Owner value or `*`
    pub owner: String,
}

impl ScopeKeyFields {
    /// The fully global fields (every field `*`)
    pub fn global() -> Self {
        Self {
            org: WILDCARD.to_string(),
            acct: WILDCARD.to_string(),
            tenant: WILDCARD.to_string(),
            seg: WILDCARD.to_string(),
            owner: WILDCARD.to_string(),
        }
    }

    /// Re-serialize into the canonical key format
    pub fn format(&self) -> String {
        format!(
            "org={}|acct={}|tenant={}|seg={}|owner={}",
            self.org, self.acct, self.tenant, self.seg, self.owner
        )
    }
}

impl fmt::Display for ScopeKeyFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

/// Encode a data domain into its canonical scope key.
///
/// Total function: every domain, including the fully empty one, maps to
/// a key. Each field independently defaults to `*` when absent or
/// empty after trimming; concrete values are emitted untrimmed.
pub fn encode_scope_key(domain: &DataDomain) -> String {
    ScopeKeyFields {
        org: normalize(domain.org_ref_name.as_deref()),
        acct: normalize(domain.account_number.as_deref()),
        tenant: normalize(domain.tenant_id.as_deref()),
        seg: normalize(domain.data_segment.as_deref()),
        owner: normalize(domain.owner_id.as_deref()),
    }
    .format()
}

fn normalize(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => WILDCARD.to_string(),
    }
}

/// Decode a scope key back into its five fields.
///
/// Partial inverse of [`encode_scope_key`]: splits on `|`, then on `=`
/// per segment. A segment with no `=` or no key name fails the decode;
/// an empty value reads as `*`; unknown field names are ignored and a
/// duplicated field keeps its last value. Succeeds only when all five
/// required fields are present.
pub fn decode_scope_key(key: &str) -> Result<ScopeKeyFields> {
    if key.is_empty() {
        return Err(AclError::EmptyScopeKey);
    }

    let mut org = None;
    let mut acct = None;
    let mut tenant = None;
    let mut seg = None;
    let mut owner = None;

    for segment in key.split('|') {
        let (name, value) = segment
            .split_once('=')
            .ok_or_else(|| AclError::MalformedSegment(segment.to_string()))?;
        if name.is_empty() {
            return Err(AclError::MalformedSegment(segment.to_string()));
        }

        let value = if value.is_empty() {
            WILDCARD.to_string()
        } else {
            value.to_string()
        };

        match name {
            "org" => org = Some(value),
            "acct" => acct = Some(value),
            "tenant" => tenant = Some(value),
            "seg" => seg = Some(value),
            "owner" => owner = Some(value),
            _ => {}
        }
    }

    Ok(ScopeKeyFields {
        org: org.ok_or(AclError::MissingField("org"))?,
        acct: acct.ok_or(AclError::MissingField("acct"))?,
        tenant: tenant.ok_or(AclError::MissingField("tenant"))?,
        seg: seg.ok_or(AclError::MissingField("seg"))?,
        owner: owner.ok_or(AclError::MissingField("owner"))?,
    })
}
