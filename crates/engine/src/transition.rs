//! Transition legality — decides whether an action may fire from a given
//! state.
//!
//! Checks run in a fixed order, first failure wins:
//! 1. The current state exists in the definition.
//! 2. The current state is not final (final states reject every action,
//!    regardless of action rules).
//! 3. The action exists in the definition.
//! 4. The action is enabled.
//! 5. The current state is one of the action's `fromStates`.
//! 6. The action's target state exists.
//!
//! This is a pure function over immutable data; the caller (the workflow
//! service) is responsible for running it inside the per-instance critical
//! section so the state it checked is the state it mutates.

use crate::{EngineError, models::{Action, WorkflowDefinition}};

/// Resolve the action that should fire, or report why it cannot.
///
/// On success the returned action's `to_state` is guaranteed to exist in
/// `def`, so the caller can apply the transition without further lookups.
///
/// # Errors
/// One of [`EngineError::CurrentStateMissing`], [`EngineError::InstanceIsFinal`],
/// [`EngineError::ActionNotFound`], [`EngineError::ActionDisabled`],
/// [`EngineError::ActionNotValidFromCurrentState`], or
/// [`EngineError::TargetStateMissing`], in that precedence.
pub fn check_transition<'a>(
    def: &'a WorkflowDefinition,
    current_state_id: &str,
    action_id: &str,
) -> Result<&'a Action, EngineError> {
    let current = def
        .state(current_state_id)
        .ok_or_else(|| EngineError::CurrentStateMissing(current_state_id.to_owned()))?;

    if current.is_final {
        return Err(EngineError::InstanceIsFinal(current.id.clone()));
    }

    let action = def
        .action(action_id)
        .ok_or_else(|| EngineError::ActionNotFound(action_id.to_owned()))?;

    if !action.enabled {
        return Err(EngineError::ActionDisabled(action.id.clone()));
    }

    if !action.from_states.iter().any(|s| s == current_state_id) {
        return Err(EngineError::ActionNotValidFromCurrentState {
            action_id: action.id.clone(),
            state_id: current_state_id.to_owned(),
        });
    }

    if def.state(&action.to_state).is_none() {
        return Err(EngineError::TargetStateMissing {
            action_id: action.id.clone(),
            state_id: action.to_state.clone(),
        });
    }

    Ok(action)
}
