//! Core domain models for the workflow engine.
//!
//! These types are the source of truth for what a workflow definition and a
//! running instance look like in memory.  Field names serialize in camelCase
//! to match the service's JSON contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// One node of a workflow's state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Unique identifier within this workflow (referenced by actions).
    pub id: String,
    /// Human-readable label; not used by the engine.
    pub name: String,
    pub enabled: bool,
    /// Exactly one state per definition carries this flag.
    pub is_initial: bool,
    /// Final states reject every action, regardless of action rules.
    pub is_final: bool,
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A guarded transition rule: fire from any of `from_states`, land on
/// `to_state`.
///
/// `from_states` is semantically a set; duplicates are tolerated and an
/// empty set means the action can never fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Unique identifier within this workflow.
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub from_states: Vec<String>,
    pub to_state: String,
}

// ---------------------------------------------------------------------------
// WorkflowDefinition
// ---------------------------------------------------------------------------

/// A complete workflow definition: the state-machine template instances run
/// against.  Immutable once accepted by the definition registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    /// Caller-chosen identifier, unique across the whole registry.
    pub id: String,
    pub states: Vec<State>,
    pub actions: Vec<Action>,
}

impl WorkflowDefinition {
    /// Look up a state by ID.
    pub fn state(&self, state_id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == state_id)
    }

    /// Look up an action by ID.
    pub fn action(&self, action_id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == action_id)
    }

    /// The state instances are seeded at: initial *and* enabled.
    ///
    /// Validation guarantees exactly one `is_initial` state exists but says
    /// nothing about its `enabled` flag, so this can legitimately be `None`
    /// for an accepted definition.
    pub fn enabled_initial_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.is_initial && s.enabled)
    }
}

// ---------------------------------------------------------------------------
// WorkflowInstance
// ---------------------------------------------------------------------------

/// Audit record appended for every successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceHistoryEntry {
    pub action_id: String,
    pub timestamp: DateTime<Utc>,
}

/// One running execution of a [`WorkflowDefinition`].
///
/// `current_state_id` and `history` mutate only inside the transition
/// engine's per-instance critical section; everything handed out to callers
/// is a snapshot clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowInstance {
    /// Generated, globally unique.
    pub id: String,
    /// Foreign key into the definition registry; never mutated.
    pub workflow_definition_id: String,
    pub current_state_id: String,
    /// Append-only, in execution order.
    pub history: Vec<InstanceHistoryEntry>,
}

impl WorkflowInstance {
    /// A fresh instance seeded at `initial_state_id` with empty history.
    pub fn new(
        id: String,
        workflow_definition_id: String,
        initial_state_id: String,
    ) -> Self {
        Self {
            id,
            workflow_definition_id,
            current_state_id: initial_state_id,
            history: Vec::new(),
        }
    }
}
