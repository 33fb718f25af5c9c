//! Governance engine facade
//!
//! One owned value serializes every mutating call: the host drives it
//! from a single writer, each operation runs to completion, and a failed
//! operation leaves all state exactly as it was. Checks always precede
//! writes within an operation.

use crate::error::{GovernanceError, Result};
use crate::executor::{self, NodeAuthorizer, ParameterStore, ProtocolUpgrader};
use crate::lifecycle::{self, ProposalState};
use crate::proposal::{Address, Proposal, ProposalAction, ProposalId};
use crate::store::{ProposalStore, VoteLedger};
use crate::voting::{self, VoteChoice, VoteRecord};

/// Current logical position, a monotone counter the host derives from
/// block height. Drives every window check.
pub trait BlockClock: Send + Sync {
    fn height(&self) -> u64;
}

/// Authoritative stake lookup. Read once per creation attempt and once
/// per vote attempt; the engine never caches it beyond the frozen copy
/// inside a vote record.
pub trait PowerSource: Send + Sync {
    fn voting_power(&self, participant: &str) -> u64;
}

pub struct GovernanceEngine {
    store: ProposalStore,
    ledger: VoteLedger,
    admin: Address,
    clock: Box<dyn BlockClock>,
    power: Box<dyn PowerSource>,
    parameters: Box<dyn ParameterStore>,
    protocol: Box<dyn ProtocolUpgrader>,
    authorizer: Box<dyn NodeAuthorizer>,
}

impl GovernanceEngine {
    /// The deployer becomes the initial admin; ids start at 1.
    pub fn new(
        admin: Address,
        clock: Box<dyn BlockClock>,
        power: Box<dyn PowerSource>,
        parameters: Box<dyn ParameterStore>,
        protocol: Box<dyn ProtocolUpgrader>,
        authorizer: Box<dyn NodeAuthorizer>,
    ) -> Self {
        Self {
            store: ProposalStore::new(),
            ledger: VoteLedger::new(),
            admin,
            clock,
            power,
            parameters,
            protocol,
            authorizer,
        }
    }

    /// Create a proposal. The proposer must hold at least
    /// MIN_PROPOSAL_STAKE at this instant; the voting window is fixed to
    /// [now, now + VOTING_WINDOW].
    pub fn create_proposal(
        &mut self,
        proposer: Address,
        title: String,
        description: String,
        action: ProposalAction,
    ) -> Result<ProposalId> {
        let now = self.clock.height();
        let stake = self.power.voting_power(&proposer);
        let id = self
            .store
            .create(proposer.clone(), title, description, action, stake, now)?;
        log::info!(
            "proposal {} created by {} at height {} (stake {})",
            id,
            proposer,
            now,
            stake
        );
        Ok(id)
    }

    /// Cast a weighted vote. One vote per voter per proposal, only while
    /// the proposal is active; the voter's power is snapshotted into the
    /// record and added to the tallies.
    pub fn vote(&mut self, proposal_id: ProposalId, voter: Address, support: bool) -> Result<()> {
        let now = self.clock.height();
        let proposal = self.store.get(proposal_id)?;
        if !lifecycle::is_active(proposal, now) {
            return Err(GovernanceError::ProposalNotActive(proposal_id));
        }
        if self.ledger.has_voted(proposal_id, &voter) {
            return Err(GovernanceError::AlreadyVoted {
                proposal_id,
                voter,
            });
        }

        let power = self.power.voting_power(&voter);
        let choice = VoteChoice::from_support(support);
        // tally first: it can still fail on overflow, and the ledger
        // write must not survive a failed tally
        self.store.apply_tally(proposal_id, choice, power)?;
        self.ledger
            .record(proposal_id, voter.clone(), choice, power, now)?;
        log::debug!(
            "vote on proposal {} by {}: {:?} with power {}",
            proposal_id,
            voter,
            choice,
            power
        );
        Ok(())
    }

    /// Execute an approved proposal: dispatch its action to the matching
    /// collaborator, then mark it terminal. A delegate failure leaves the
    /// proposal live so execution can be retried.
    pub fn execute(&mut self, proposal_id: ProposalId) -> Result<()> {
        let now = self.clock.height();
        let proposal = self.store.get(proposal_id)?;
        match lifecycle::state(proposal, now) {
            // already-terminal reuses the expiry error code
            ProposalState::Terminated => {
                return Err(GovernanceError::ProposalExpired(proposal_id))
            }
            ProposalState::Active => {}
            _ => return Err(GovernanceError::ProposalNotActive(proposal_id)),
        }
        if !voting::is_approved(proposal.for_power, proposal.against_power) {
            return Err(GovernanceError::ProposalNotApproved(proposal_id));
        }

        let action = proposal.action.clone();
        executor::dispatch(
            &action,
            self.parameters.as_mut(),
            self.protocol.as_mut(),
            self.authorizer.as_mut(),
        )?;
        self.store.mark_terminal(proposal_id)?;
        log::info!(
            "proposal {} executed at height {} ({})",
            proposal_id,
            now,
            action.kind_name()
        );
        Ok(())
    }

    /// Admin override: terminate a live or expired proposal without
    /// executing it. Fails with the expiry code if already terminal.
    pub fn admin_cancel(&mut self, caller: &str, proposal_id: ProposalId) -> Result<()> {
        self.require_admin(caller)?;
        let proposal = self.store.get(proposal_id)?;
        if proposal.terminal {
            return Err(GovernanceError::ProposalExpired(proposal_id));
        }
        self.store.mark_terminal(proposal_id)?;
        log::warn!("proposal {} cancelled by admin {}", proposal_id, caller);
        Ok(())
    }

    /// Owner-to-owner handoff of the admin cell.
    pub fn set_admin(&mut self, caller: &str, new_admin: Address) -> Result<()> {
        self.require_admin(caller)?;
        log::info!("admin handoff: {} -> {}", self.admin, new_admin);
        self.admin = new_admin;
        Ok(())
    }

    fn require_admin(&self, caller: &str) -> Result<()> {
        if caller != self.admin {
            return Err(GovernanceError::NotAuthorized(caller.to_string()));
        }
        Ok(())
    }

    // --- read surface ---

    pub fn get_proposal(&self, proposal_id: ProposalId) -> Result<&Proposal> {
        self.store.get(proposal_id)
    }

    pub fn get_vote(&self, proposal_id: ProposalId, voter: &str) -> Option<&VoteRecord> {
        self.ledger.get(proposal_id, voter)
    }

    pub fn get_voting_power(&self, participant: &str) -> u64 {
        self.power.voting_power(participant)
    }

    pub fn is_active(&self, proposal_id: ProposalId) -> Result<bool> {
        let proposal = self.store.get(proposal_id)?;
        Ok(lifecycle::is_active(proposal, self.clock.height()))
    }

    /// Stateless verdict over the current tallies. Callers decide when
    /// the window has closed before trusting it for execution.
    pub fn is_approved(&self, proposal_id: ProposalId) -> Result<bool> {
        let proposal = self.store.get(proposal_id)?;
        Ok(voting::is_approved(
            proposal.for_power,
            proposal.against_power,
        ))
    }

    pub fn proposal_count(&self) -> u64 {
        self.store.count()
    }

    pub fn list_proposals(&self, offset: usize, limit: usize) -> Vec<&Proposal> {
        self.store.list(offset, limit)
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }
}
