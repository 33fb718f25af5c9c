//! In-memory proposal table and vote ledger
//!
//! The durable state of the engine is exactly: the proposal table, the
//! vote table keyed by (proposal, voter), and the next-id counter. Hosts
//! that snapshot state can serialize both structs as-is.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::MIN_PROPOSAL_STAKE;
use crate::error::{GovernanceError, Result};
use crate::proposal::{Address, Proposal, ProposalAction, ProposalId};
use crate::voting::{VoteChoice, VoteRecord};

/// Owns the proposal set and allocates identifiers.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProposalStore {
    proposals: BTreeMap<ProposalId, Proposal>,
    next_id: ProposalId,
}

impl Default for ProposalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalStore {
    pub fn new() -> Self {
        Self {
            proposals: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Validate and persist a new proposal. The id counter advances only
    /// when every check has passed, so failed attempts leave no gap.
    pub fn create(
        &mut self,
        proposer: Address,
        title: String,
        description: String,
        action: ProposalAction,
        proposer_power: u64,
        now: u64,
    ) -> Result<ProposalId> {
        if proposer_power < MIN_PROPOSAL_STAKE {
            return Err(GovernanceError::InsufficientStake {
                required: MIN_PROPOSAL_STAKE,
                held: proposer_power,
            });
        }

        let id = self.next_id;
        let proposal = Proposal::new(id, proposer, title, description, action, now)?;
        self.proposals.insert(id, proposal);
        self.next_id += 1;
        Ok(id)
    }

    pub fn get(&self, id: ProposalId) -> Result<&Proposal> {
        self.proposals
            .get(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    /// Add cast power to the proposal's tallies. Nothing else changes.
    pub fn apply_tally(&mut self, id: ProposalId, choice: VoteChoice, power: u64) -> Result<()> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        crate::voting::apply_tally(proposal, choice, power)
    }

    /// Flip the terminal flag. Callers check the current state first;
    /// this does not.
    pub fn mark_terminal(&mut self, id: ProposalId) -> Result<()> {
        let proposal = self
            .proposals
            .get_mut(&id)
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        proposal.terminal = true;
        Ok(())
    }

    pub fn count(&self) -> u64 {
        self.proposals.len() as u64
    }

    pub fn list(&self, offset: usize, limit: usize) -> Vec<&Proposal> {
        self.proposals.values().skip(offset).take(limit).collect()
    }
}

/// Owns the vote records, keyed by (proposal, voter), and enforces one
/// vote per pair.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VoteLedger {
    votes: HashMap<ProposalId, HashMap<Address, VoteRecord>>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_voted(&self, proposal_id: ProposalId, voter: &str) -> bool {
        self.votes
            .get(&proposal_id)
            .is_some_and(|votes| votes.contains_key(voter))
    }

    /// Insert a vote record. Records are written once and never replaced.
    pub fn record(
        &mut self,
        proposal_id: ProposalId,
        voter: Address,
        choice: VoteChoice,
        power: u64,
        cast_height: u64,
    ) -> Result<()> {
        if self.has_voted(proposal_id, &voter) {
            return Err(GovernanceError::AlreadyVoted { proposal_id, voter });
        }
        let record = VoteRecord {
            voter: voter.clone(),
            choice,
            power,
            cast_height,
        };
        self.votes
            .entry(proposal_id)
            .or_default()
            .insert(voter, record);
        Ok(())
    }

    pub fn get(&self, proposal_id: ProposalId, voter: &str) -> Option<&VoteRecord> {
        self.votes
            .get(&proposal_id)
            .and_then(|votes| votes.get(voter))
    }
}
