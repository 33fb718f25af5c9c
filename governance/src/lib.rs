//! Proposal lifecycle and stake-weighted voting engine
//!
//! Stakeholders create change proposals, cast weighted votes exactly
//! once each, and the engine decides pass/fail against a percentage
//! threshold. Node identity, stake accounting and the effects of an
//! approved change live behind collaborator traits; the engine owns only
//! the proposal table, the vote ledger and the admin cell.

pub mod engine;
pub mod error;
pub mod executor;
pub mod lifecycle;
pub mod proposal;
pub mod store;
pub mod voting;

pub use engine::{BlockClock, GovernanceEngine, PowerSource};
pub use error::{GovernanceError, Result};
pub use executor::{NodeAuthorizer, ParameterStore, ProtocolUpgrader};
pub use lifecycle::ProposalState;
pub use proposal::{Address, Proposal, ProposalAction, ProposalId};
pub use store::{ProposalStore, VoteLedger};
pub use voting::{is_approved, VoteChoice, VoteRecord};

/// Governance configuration constants
pub mod config {
    /// Required approval percentage of cast power (60%)
    pub const APPROVAL_THRESHOLD: u64 = 60;

    /// Minimum stake to create a proposal
    pub const MIN_PROPOSAL_STAKE: u64 = 10_000_000;

    /// Voting window length in blocks (one week at 30s blocks)
    pub const VOTING_WINDOW: u64 = 20_160;

    /// Title length limit
    pub const MAX_TITLE_LEN: usize = 128;

    /// Description length limit
    pub const MAX_DESCRIPTION_LEN: usize = 4096;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_governance_constants() {
        assert_eq!(config::APPROVAL_THRESHOLD, 60);
        assert_eq!(config::MIN_PROPOSAL_STAKE, 10_000_000);
        assert!(config::VOTING_WINDOW > 0);
    }
}
