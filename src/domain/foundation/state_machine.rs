//! State machine trait for lifecycle enums.
//!
//! Lifecycles are driven by named events rather than by target states: the
//! implementor supplies a transition table, and [`StateMachine::transition`]
//! validates an event against it before anything is mutated.

use std::fmt;

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent event-driven state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ContractStatus {
///     type Event = ContractEvent;
///
///     fn target(&self, event: ContractEvent) -> Option<Self> {
///         match (self, event) {
///             (Proposal, ContractEvent::Start) => Some(Live),
///             // ... etc
///             _ => None,
///         }
///     }
///
///     fn events() -> &'static [ContractEvent] {
///         &[ContractEvent::Start, ContractEvent::Finish, ContractEvent::Restart]
///     }
/// }
///
/// // Usage:
/// let next = status.transition(ContractEvent::Start)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Debug {
    /// Events that drive the machine.
    type Event: Copy + PartialEq + fmt::Debug + fmt::Display + 'static;

    /// Transition table: the state `event` leads to from `self`, if permitted.
    fn target(&self, event: Self::Event) -> Option<Self>;

    /// Every event the machine knows about.
    fn events() -> &'static [Self::Event];

    /// Returns true if `event` may fire from the current state.
    fn can_fire(&self, event: Self::Event) -> bool {
        self.target(event).is_some()
    }

    /// Returns the events that may fire from the current state.
    fn permitted_events(&self) -> Vec<Self::Event> {
        Self::events()
            .iter()
            .copied()
            .filter(|event| self.can_fire(*event))
            .collect()
    }

    /// Validates `event` and returns the resulting state.
    ///
    /// Pure: the caller decides whether to apply the returned state.
    fn transition(&self, event: Self::Event) -> Result<Self, DomainError> {
        self.target(event).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot {} from {:?}", event, self),
            )
            .with_detail("event", event.to_string())
            .with_detail("state", format!("{:?}", self))
        })
    }

    /// Checks if the current state has no outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.permitted_events().is_empty()
    }
}
