//! Vote records, tally arithmetic and the approval rule

use serde::{Deserialize, Serialize};

use crate::config::APPROVAL_THRESHOLD;
use crate::error::{GovernanceError, Result};
use crate::proposal::{Address, Proposal};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum VoteChoice {
    For,
    Against,
}

impl VoteChoice {
    pub fn from_support(support: bool) -> Self {
        if support {
            VoteChoice::For
        } else {
            VoteChoice::Against
        }
    }
}

/// One cast vote. The power is a snapshot taken at cast time, not a live
/// reference to the voter's stake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRecord {
    pub voter: Address,
    pub choice: VoteChoice,
    pub power: u64,
    pub cast_height: u64,
}

/// Add a vote's power to the proposal's running sums. Exactly one of the
/// directional sums grows, and the total grows by the same amount.
/// Overflow is checked and surfaced, never wrapped.
pub fn apply_tally(proposal: &mut Proposal, choice: VoteChoice, power: u64) -> Result<()> {
    let id = proposal.id;
    let overflow = || GovernanceError::TallyOverflow(id);

    let total = proposal.total_power.checked_add(power).ok_or_else(overflow)?;
    match choice {
        VoteChoice::For => {
            proposal.for_power = proposal.for_power.checked_add(power).ok_or_else(overflow)?;
        }
        VoteChoice::Against => {
            proposal.against_power = proposal
                .against_power
                .checked_add(power)
                .ok_or_else(overflow)?;
        }
    }
    proposal.total_power = total;
    Ok(())
}

/// Approval rule: the for-side must hold at least APPROVAL_THRESHOLD
/// percent of all cast power. Evaluated in cross-multiplied form so no
/// integer division can shave the boundary case; `>=` makes an exact
/// 60% tally pass. No votes means not approved.
pub fn is_approved(for_power: u64, against_power: u64) -> bool {
    let total = for_power as u128 + against_power as u128;
    if total == 0 {
        return false;
    }
    (for_power as u128) * 100 >= total * APPROVAL_THRESHOLD as u128
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::ProposalAction;

    fn proposal() -> Proposal {
        Proposal::new(
            1,
            "proposer".to_string(),
            "Upgrade".to_string(),
            String::new(),
            ProposalAction::Protocol {
                change: "v2".to_string(),
            },
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_apply_tally_tracks_total() {
        let mut p = proposal();
        apply_tally(&mut p, VoteChoice::For, 30).unwrap();
        apply_tally(&mut p, VoteChoice::Against, 20).unwrap();
        apply_tally(&mut p, VoteChoice::For, 50).unwrap();
        assert_eq!(p.for_power, 80);
        assert_eq!(p.against_power, 20);
        assert_eq!(p.total_power, p.for_power + p.against_power);
    }

    #[test]
    fn test_apply_tally_overflow_is_rejected() {
        let mut p = proposal();
        apply_tally(&mut p, VoteChoice::For, u64::MAX).unwrap();
        let err = apply_tally(&mut p, VoteChoice::Against, 1).unwrap_err();
        assert_eq!(err, GovernanceError::TallyOverflow(1));
        // tallies untouched by the failed call
        assert_eq!(p.for_power, u64::MAX);
        assert_eq!(p.against_power, 0);
        assert_eq!(p.total_power, u64::MAX);
    }

    #[test]
    fn test_threshold_boundary() {
        assert!(is_approved(60, 40));
        assert!(!is_approved(59, 41));
        assert!(!is_approved(0, 0));
    }

    #[test]
    fn test_threshold_just_below() {
        // 59.96% of cast power must not round up to a pass
        assert!(is_approved(3, 2));
        assert!(!is_approved(599, 400));
    }

    #[test]
    fn test_threshold_large_powers() {
        // cross-multiplication must not overflow near u64::MAX
        assert!(is_approved(u64::MAX, 0));
        assert!(!is_approved(1, u64::MAX));
    }
}
