//! Key-level endorsement policies
//!
//! A key-level policy overrides the chain-wide default for one ledger key:
//! once attached, every later write to the key must be endorsed by the
//! listed organizations. The serialized form is a signature-policy envelope
//! (JSON), which is what the substrate stores as the key's validation
//! parameter and evaluates at commit time.
//!
//! `assign_endorsement` is the write-once hardening step run right after a
//! public record's first write. Nothing here removes or reassigns a policy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::TxContext;
use crate::errors::{LedgerGuardError, Result};
use crate::stub::present;

/// Role an organization member must hold to satisfy a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleType {
    Member,
    Peer,
    Client,
    Admin,
    Orderer,
}

impl RoleType {
    /// Whether a peer endorsement from the right org satisfies this role
    fn satisfied_by_peer(&self) -> bool {
        matches!(self, RoleType::Member | RoleType::Peer)
    }
}

/// One principal in a signature-policy envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MspPrincipal {
    pub msp_identifier: String,
    pub role: RoleType,
}

/// Signature policy rule tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignaturePolicy {
    /// Index into the envelope's identities
    SignedBy(usize),
    NOutOf { n: usize, rules: Vec<SignaturePolicy> },
}

/// Serialized validation parameter format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePolicyEnvelope {
    pub version: u32,
    pub rule: SignaturePolicy,
    pub identities: Vec<MspPrincipal>,
}

impl SignaturePolicyEnvelope {
    /// Evaluate the rule tree against the orgs whose peers endorsed
    pub fn evaluate(&self, endorsers: &[String]) -> bool {
        self.evaluate_rule(&self.rule, endorsers)
    }

    fn evaluate_rule(&self, rule: &SignaturePolicy, endorsers: &[String]) -> bool {
        match rule {
            SignaturePolicy::SignedBy(index) => self.identities.get(*index).is_some_and(|p| {
                p.role.satisfied_by_peer() && endorsers.iter().any(|e| e == &p.msp_identifier)
            }),
            SignaturePolicy::NOutOf { n, rules } => {
                rules
                    .iter()
                    .filter(|r| self.evaluate_rule(r, endorsers))
                    .count()
                    >= *n
            }
        }
    }
}

/// Builder for a key-level policy: every listed org must endorse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyEndorsementPolicy {
    orgs: BTreeMap<String, RoleType>,
}

impl KeyEndorsementPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored validation parameter
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the bytes are not a signature-policy envelope.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let envelope: SignaturePolicyEnvelope =
            serde_json::from_slice(bytes).map_err(|e| LedgerGuardError::InvalidInput {
                reason: format!("malformed endorsement policy: {}", e),
            })?;
        let orgs = envelope
            .identities
            .into_iter()
            .map(|p| (p.msp_identifier, p.role))
            .collect();
        Ok(Self { orgs })
    }

    /// Require endorsement from each org, in the given role
    ///
    /// Re-adding an org replaces its role.
    pub fn add_orgs<I, S>(&mut self, role: RoleType, orgs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for org in orgs {
            self.orgs.insert(org.into(), role);
        }
        self
    }

    pub fn del_orgs<I, S>(&mut self, orgs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for org in orgs {
            self.orgs.remove(org.as_ref());
        }
        self
    }

    /// Orgs in the policy, sorted
    pub fn list_orgs(&self) -> Vec<String> {
        self.orgs.keys().cloned().collect()
    }

    pub fn role_of(&self, org: &str) -> Option<RoleType> {
        self.orgs.get(org).copied()
    }

    /// All-of envelope over the listed orgs
    pub fn envelope(&self) -> SignaturePolicyEnvelope {
        let identities: Vec<MspPrincipal> = self
            .orgs
            .iter()
            .map(|(org, role)| MspPrincipal {
                msp_identifier: org.clone(),
                role: *role,
            })
            .collect();
        let rules = (0..identities.len()).map(SignaturePolicy::SignedBy).collect();
        SignaturePolicyEnvelope {
            version: 0,
            rule: SignaturePolicy::NOutOf {
                n: identities.len(),
                rules,
            },
            identities,
        }
    }

    /// Serialized validation parameter
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if JSON encoding fails.
    pub fn policy(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.envelope())?)
    }

    pub fn is_satisfied_by(&self, endorsers: &[String]) -> bool {
        self.envelope().evaluate(endorsers)
    }
}

/// Role used by the post-create hardening step
pub const ASSIGNMENT_ROLE: RoleType = RoleType::Peer;

/// Whether the substrate accepted the validation parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssignmentOutcome {
    Applied,
    Failed { reason: String },
}

/// Diagnostic result of `assign_endorsement`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAssignment {
    pub key: String,
    pub org: String,
    pub role: RoleType,
    /// Serialized policy text as attached (or attempted)
    pub policy: String,
    pub outcome: AssignmentOutcome,
}

impl PolicyAssignment {
    pub fn is_applied(&self) -> bool {
        self.outcome == AssignmentOutcome::Applied
    }
}

/// Restrict future writes to `key` to peers of `org`
///
/// A substrate failure is reported in the returned outcome, not as `Err`;
/// the caller decides whether that fails the transaction.
///
/// # Errors
///
/// Returns `Serialization` if the policy cannot be encoded.
pub fn assign_endorsement(
    ctx: &mut TxContext<'_>,
    key: &str,
    org: &str,
) -> Result<PolicyAssignment> {
    let mut policy = KeyEndorsementPolicy::new();
    policy.add_orgs(ASSIGNMENT_ROLE, [org]);
    let bytes = policy.policy()?;
    let policy_text = String::from_utf8_lossy(&bytes).into_owned();

    let outcome = match ctx.stub().set_state_validation_parameter(key, bytes) {
        Ok(()) => {
            tracing::debug!(asset_id = key, msp_id = org, "key-level endorsement policy set");
            AssignmentOutcome::Applied
        }
        Err(e) => AssignmentOutcome::Failed {
            reason: e.to_string(),
        },
    };

    Ok(PolicyAssignment {
        key: key.to_string(),
        org: org.to_string(),
        role: ASSIGNMENT_ROLE,
        policy: policy_text,
        outcome,
    })
}

/// Decode the key-level policy attached to `key`, if any
///
/// # Errors
///
/// Propagates substrate errors; `InvalidInput` for a malformed parameter.
pub fn read_key_policy(ctx: &mut TxContext<'_>, key: &str) -> Result<Option<KeyEndorsementPolicy>> {
    present(ctx.stub().get_state_validation_parameter(key)?)
        .map(|bytes| KeyEndorsementPolicy::from_bytes(&bytes))
        .transpose()
}
