//! Proposal lifecycle: active-window and terminal-state rules
//!
//! The state is computed from the proposal and the current block height
//! on every call rather than stored, so it can never go stale between
//! operations.

use serde::{Deserialize, Serialize};

use crate::proposal::Proposal;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProposalState {
    /// Before the window opens. Unreachable through the normal creation
    /// path (creation stamps `created_at = now`); kept for completeness.
    Pending,
    /// In the voting window and not terminal. Votes and execution are
    /// accepted only in this state.
    Active,
    /// Past the window without having been executed or cancelled.
    Expired,
    /// Executed or admin-cancelled. No distinction is kept between the
    /// two once terminal.
    Terminated,
}

pub fn state(proposal: &Proposal, now: u64) -> ProposalState {
    if proposal.terminal {
        ProposalState::Terminated
    } else if now < proposal.created_at {
        ProposalState::Pending
    } else if now > proposal.expires_at {
        ProposalState::Expired
    } else {
        ProposalState::Active
    }
}

/// Window check with inclusive bounds: a vote at exactly `expires_at`
/// still counts.
pub fn is_active(proposal: &Proposal, now: u64) -> bool {
    state(proposal, now) == ProposalState::Active
}
