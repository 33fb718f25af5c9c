//! Governance error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Proposal already exists: {0}")]
    ProposalExists(u64),

    #[error("Proposal not found: {0}")]
    ProposalNotFound(u64),

    /// Also raised when acting on a proposal that is already terminal.
    #[error("Proposal expired: {0}")]
    ProposalExpired(u64),

    #[error("Proposal not active: {0}")]
    ProposalNotActive(u64),

    #[error("Already voted on proposal {proposal_id}: {voter}")]
    AlreadyVoted { proposal_id: u64, voter: String },

    #[error("Insufficient stake: required {required}, held {held}")]
    InsufficientStake { required: u64, held: u64 },

    #[error("Voting period still active for proposal {0}")]
    VotingPeriodActive(u64),

    #[error("Proposal not approved: {0}")]
    ProposalNotApproved(u64),

    #[error("Invalid proposal type: {0}")]
    InvalidProposalType(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Vote tally overflow on proposal {0}")]
    TallyOverflow(u64),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, GovernanceError>;
