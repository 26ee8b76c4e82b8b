//! Definition validation — run this before a definition is accepted into
//! the registry.
//!
//! Rules enforced, in order (first failure wins):
//! 1. The definition's ID is not already registered.
//! 2. Exactly one state has `isInitial = true`.
//! 3. State IDs are unique within the definition.
//! 4. Action IDs are unique within the definition.
//! 5. Every *enabled* action references existing states (both its target
//!    and every entry of `fromStates`).
//!
//! Disabled actions are exempt from rule 5 so that not-yet-wired actions
//! can be staged in a definition before their states exist.
//!
//! Deliberately *not* checked: reachability from the initial state, cycles,
//! and outgoing actions on final states.  A well-formed-but-unreachable
//! topology is accepted.

use std::collections::HashSet;

use crate::registry::DefinitionRegistry;
use crate::{EngineError, models::WorkflowDefinition};

/// Validate a definition against the registry it is about to enter.
///
/// Pure read: neither the definition nor the registry is mutated.  Note the
/// registry-uniqueness check here is advisory under concurrency; the
/// registry's own atomic insert is what ultimately arbitrates racing
/// `define` calls for the same ID.
///
/// # Errors
/// The first failing rule above, as the matching [`EngineError`] variant.
pub fn validate(
    def: &WorkflowDefinition,
    registry: &DefinitionRegistry,
) -> Result<(), EngineError> {
    if registry.contains(&def.id) {
        return Err(EngineError::DuplicateWorkflowId(def.id.clone()));
    }
    validate_structure(def)
}

/// Structural rules 2–5, with no registry involved.
///
/// Exposed separately so a definition file can be checked offline (the CLI
/// `validate` subcommand) before any registry exists.
pub fn validate_structure(def: &WorkflowDefinition) -> Result<(), EngineError> {
    // -----------------------------------------------------------------------
    // 2. Exactly one initial state
    // -----------------------------------------------------------------------
    let initial_count = def.states.iter().filter(|s| s.is_initial).count();
    if initial_count != 1 {
        return Err(EngineError::InvalidInitialStateCount(initial_count));
    }

    // -----------------------------------------------------------------------
    // 3. State IDs are unique
    // -----------------------------------------------------------------------
    let mut state_ids: HashSet<&str> = HashSet::new();
    for state in &def.states {
        if !state_ids.insert(state.id.as_str()) {
            return Err(EngineError::DuplicateStateId(state.id.clone()));
        }
    }

    // -----------------------------------------------------------------------
    // 4. Action IDs are unique
    // -----------------------------------------------------------------------
    let mut action_ids: HashSet<&str> = HashSet::new();
    for action in &def.actions {
        if !action_ids.insert(action.id.as_str()) {
            return Err(EngineError::DuplicateActionId(action.id.clone()));
        }
    }

    // -----------------------------------------------------------------------
    // 5. Enabled actions reference existing states
    // -----------------------------------------------------------------------
    for action in &def.actions {
        if !action.enabled {
            continue;
        }

        if !state_ids.contains(action.to_state.as_str()) {
            return Err(EngineError::UnknownTargetState {
                action_id: action.id.clone(),
                state_id: action.to_state.clone(),
            });
        }

        for from in &action.from_states {
            if !state_ids.contains(from.as_str()) {
                return Err(EngineError::UnknownFromState {
                    action_id: action.id.clone(),
                    state_id: from.clone(),
                });
            }
        }
    }

    Ok(())
}
