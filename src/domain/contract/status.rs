//! Contract lifecycle: proposal -> live -> finished, with restart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle state of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    #[default]
    Proposal,
    Live,
    Finished,
}

/// Events that move a contract through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractEvent {
    /// proposal -> live
    Start,
    /// live -> finished
    Finish,
    /// finished -> live
    Restart,
}

impl ContractStatus {
    /// Storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Proposal => "proposal",
            ContractStatus::Live => "live",
            ContractStatus::Finished => "finished",
        }
    }

    /// Human readable label used in exports.
    pub fn humanize(&self) -> &'static str {
        match self {
            ContractStatus::Proposal => "Proposal",
            ContractStatus::Live => "Live",
            ContractStatus::Finished => "Finished",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, ContractStatus::Live)
    }
}

impl StateMachine for ContractStatus {
    type Event = ContractEvent;

    fn target(&self, event: ContractEvent) -> Option<Self> {
        use ContractStatus::*;
        match (self, event) {
            (Proposal, ContractEvent::Start) => Some(Live),
            (Live, ContractEvent::Finish) => Some(Finished),
            (Finished, ContractEvent::Restart) => Some(Live),
            _ => None,
        }
    }

    fn events() -> &'static [ContractEvent] {
        &[ContractEvent::Start, ContractEvent::Finish, ContractEvent::Restart]
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "proposal" => Ok(ContractStatus::Proposal),
            "live" => Ok(ContractStatus::Live),
            "finished" => Ok(ContractStatus::Finished),
            other => Err(ValidationError::invalid_format(
                "contract_status",
                format!("unknown state '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ContractEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContractEvent::Start => "start",
            ContractEvent::Finish => "finish",
            ContractEvent::Restart => "restart",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ContractEvent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(ContractEvent::Start),
            "finish" => Ok(ContractEvent::Finish),
            "restart" => Ok(ContractEvent::Restart),
            other => Err(ValidationError::invalid_format(
                "contract_event",
                format!("unknown event '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn default_is_proposal() {
        assert_eq!(ContractStatus::default(), ContractStatus::Proposal);
    }

    #[test]
    fn start_then_finish_succeeds_in_sequence() {
        let live = ContractStatus::Proposal.transition(ContractEvent::Start).unwrap();
        assert_eq!(live, ContractStatus::Live);
        let finished = live.transition(ContractEvent::Finish).unwrap();
        assert_eq!(finished, ContractStatus::Finished);
    }

    #[test]
    fn restart_reopens_finished_contract() {
        assert_eq!(
            ContractStatus::Finished.transition(ContractEvent::Restart).unwrap(),
            ContractStatus::Live
        );
    }

    #[test]
    fn finish_from_proposal_is_rejected() {
        let err = ContractStatus::Proposal
            .transition(ContractEvent::Finish)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn only_table_transitions_are_permitted() {
        assert_eq!(ContractStatus::Proposal.permitted_events(), vec![ContractEvent::Start]);
        assert_eq!(ContractStatus::Live.permitted_events(), vec![ContractEvent::Finish]);
        assert_eq!(ContractStatus::Finished.permitted_events(), vec![ContractEvent::Restart]);
        assert!(!ContractStatus::Live.can_fire(ContractEvent::Start));
        assert!(!ContractStatus::Live.can_fire(ContractEvent::Restart));
    }

    #[test]
    fn no_state_is_terminal() {
        for status in [ContractStatus::Proposal, ContractStatus::Live, ContractStatus::Finished] {
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn parses_storage_names() {
        assert_eq!("live".parse::<ContractStatus>().unwrap(), ContractStatus::Live);
        assert!("archived".parse::<ContractStatus>().is_err());
        assert_eq!("restart".parse::<ContractEvent>().unwrap(), ContractEvent::Restart);
    }

    #[test]
    fn humanize_capitalizes() {
        assert_eq!(ContractStatus::Finished.humanize(), "Finished");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&ContractStatus::Proposal).unwrap(),
            "\"proposal\""
        );
    }
}
