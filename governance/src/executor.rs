//! Execution collaborators and dispatch
//!
//! The engine never touches chain parameters, protocol versions or the
//! node registry directly. Approved proposals are handed to one of three
//! collaborator traits; swap these for your runtime's real services, or
//! for mocks in tests.

use crate::error::Result;
use crate::proposal::ProposalAction;

/// Applies approved parameter changes to the chain configuration.
pub trait ParameterStore: Send + Sync {
    fn execute_parameter_change(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Applies approved protocol upgrades.
pub trait ProtocolUpgrader: Send + Sync {
    fn execute_protocol_change(&mut self, change: &str) -> Result<()>;
}

/// Applies approved node authorization policy changes.
pub trait NodeAuthorizer: Send + Sync {
    fn execute_authorization_change(&mut self, policy: &str) -> Result<()>;
}

/// Route an approved action to its executor. Failures propagate verbatim;
/// the caller only marks the proposal terminal after this returns Ok.
pub fn dispatch(
    action: &ProposalAction,
    parameters: &mut dyn ParameterStore,
    protocol: &mut dyn ProtocolUpgrader,
    authorizer: &mut dyn NodeAuthorizer,
) -> Result<()> {
    match action {
        ProposalAction::Parameter { key, value } => {
            parameters.execute_parameter_change(key, value)
        }
        ProposalAction::Protocol { change } => protocol.execute_protocol_change(change),
        ProposalAction::Authorization { policy } => {
            authorizer.execute_authorization_change(policy)
        }
    }
}
