//! Proposal types and payload validation

use serde::{Deserialize, Serialize};

use crate::config::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, VOTING_WINDOW};
use crate::error::{GovernanceError, Result};

/// Participant identity (node address or public key string).
pub type Address = String;

pub type ProposalId = u64;

/// Kind-specific payload. Exactly three kinds; each carries only the
/// fields its executor needs, so a parameter proposal can never smuggle
/// a protocol descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProposalAction {
    /// Change a named chain parameter to a new value.
    Parameter { key: String, value: String },
    /// Protocol upgrade descriptor (contract hash, version tag, ...).
    Protocol { change: String },
    /// Node authorization policy change.
    Authorization { policy: String },
}

impl ProposalAction {
    /// Build an action from the loose transport form: a kind tag plus
    /// optional payload fields. Unknown tags are rejected, as is a
    /// parameter change without its key/value pair.
    pub fn parse(
        kind: &str,
        parameter_key: Option<String>,
        parameter_value: Option<String>,
        change: Option<String>,
    ) -> Result<Self> {
        match kind {
            "parameter" => {
                let key = parameter_key.ok_or_else(|| {
                    GovernanceError::InvalidParameter("parameter proposal requires a key".into())
                })?;
                let value = parameter_value.ok_or_else(|| {
                    GovernanceError::InvalidParameter("parameter proposal requires a value".into())
                })?;
                Ok(ProposalAction::Parameter { key, value })
            }
            "protocol" => {
                let change = change.ok_or_else(|| {
                    GovernanceError::InvalidParameter(
                        "protocol proposal requires a change descriptor".into(),
                    )
                })?;
                Ok(ProposalAction::Protocol { change })
            }
            "authorization" => {
                let policy = change.ok_or_else(|| {
                    GovernanceError::InvalidParameter(
                        "authorization proposal requires a policy descriptor".into(),
                    )
                })?;
                Ok(ProposalAction::Authorization { policy })
            }
            other => Err(GovernanceError::InvalidProposalType(other.to_string())),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ProposalAction::Parameter { .. } => "parameter",
            ProposalAction::Protocol { .. } => "protocol",
            ProposalAction::Authorization { .. } => "authorization",
        }
    }

    /// Payload sanity checks shared by every creation path.
    pub fn validate(&self) -> Result<()> {
        match self {
            ProposalAction::Parameter { key, .. } if key.is_empty() => Err(
                GovernanceError::InvalidParameter("parameter key must not be empty".into()),
            ),
            ProposalAction::Protocol { change } if change.is_empty() => Err(
                GovernanceError::InvalidParameter("change descriptor must not be empty".into()),
            ),
            ProposalAction::Authorization { policy } if policy.is_empty() => Err(
                GovernanceError::InvalidParameter("policy descriptor must not be empty".into()),
            ),
            _ => Ok(()),
        }
    }
}

/// A governance proposal with its running vote tallies.
///
/// The voting window is fixed at creation (`expires_at = created_at +
/// VOTING_WINDOW`, both in block heights) and never moves. Tallies only
/// grow, and `total_power == for_power + against_power` at all times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: Address,
    pub title: String,
    pub description: String,
    pub action: ProposalAction,
    pub created_at: u64,
    pub expires_at: u64,
    /// Set once by execution or admin cancellation; never cleared.
    pub terminal: bool,
    pub for_power: u64,
    pub against_power: u64,
    pub total_power: u64,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        proposer: Address,
        title: String,
        description: String,
        action: ProposalAction,
        now: u64,
    ) -> Result<Self> {
        if title.is_empty() || title.len() > MAX_TITLE_LEN {
            return Err(GovernanceError::InvalidParameter(format!(
                "title length must be in 1..={}",
                MAX_TITLE_LEN
            )));
        }
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(GovernanceError::InvalidParameter(format!(
                "description length must be at most {}",
                MAX_DESCRIPTION_LEN
            )));
        }
        action.validate()?;

        Ok(Self {
            id,
            proposer,
            title,
            description,
            action,
            created_at: now,
            expires_at: now + VOTING_WINDOW,
            terminal: false,
            for_power: 0,
            against_power: 0,
            total_power: 0,
        })
    }
}
