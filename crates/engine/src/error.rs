//! Engine-level error types.

use thiserror::Error;

/// Errors produced by the workflow engine (validation, lookups, and
/// transition rejections).  All are expected and recoverable; none is fatal
/// to the process, and no mutation happens before the checks that produce
/// them have all passed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    // ------ Validation errors (definition rejected) ------

    /// The registry already holds a definition with this ID.
    #[error("duplicate workflow ID: '{0}'")]
    DuplicateWorkflowId(String),

    /// A definition must have exactly one state with `isInitial = true`.
    #[error("exactly one initial state is required (found {0})")]
    InvalidInitialStateCount(usize),

    /// Two or more states share the same ID.
    #[error("duplicate state ID: '{0}'")]
    DuplicateStateId(String),

    /// Two or more actions share the same ID.
    #[error("duplicate action ID: '{0}'")]
    DuplicateActionId(String),

    /// An enabled action targets a state that doesn't exist.
    #[error("action '{action_id}' targets unknown state '{state_id}'")]
    UnknownTargetState { action_id: String, state_id: String },

    /// An enabled action lists a source state that doesn't exist.
    #[error("action '{action_id}' references unknown from-state '{state_id}'")]
    UnknownFromState { action_id: String, state_id: String },

    // ------ Lookup errors (entity absent) ------

    /// No definition registered under this ID.
    #[error("workflow definition '{0}' not found")]
    WorkflowNotFound(String),

    /// No instance registered under this ID.
    #[error("workflow instance '{0}' not found")]
    InstanceNotFound(String),

    /// An instance references a definition the registry doesn't hold.
    /// Definitions are never deleted, so this is a data-integrity error.
    #[error("instance references missing workflow definition '{0}'")]
    DefinitionNotFound(String),

    /// The instance's current state is absent from its definition.
    /// Definitions are immutable, so this indicates a prior integrity
    /// violation; surfaced rather than masked.
    #[error("current state '{0}' does not exist in the workflow definition")]
    CurrentStateMissing(String),

    /// The requested action is not part of the definition.
    #[error("action '{0}' not found in workflow")]
    ActionNotFound(String),

    /// The action's target state is absent from the definition.  Validation
    /// covers this for enabled actions; rechecked at fire time rather than
    /// trusting cached validity.
    #[error("action '{action_id}' targets missing state '{state_id}'")]
    TargetStateMissing { action_id: String, state_id: String },

    // ------ Transition-rejection errors (operation illegal) ------

    /// The definition's initial state exists but is disabled, so no
    /// instance can be spawned from it.
    #[error("workflow '{0}' has no enabled initial state")]
    NoEnabledInitialState(String),

    /// The instance sits on a final state; final states reject every
    /// action.
    #[error("cannot perform actions on final state '{0}'")]
    InstanceIsFinal(String),

    #[error("action '{0}' is disabled")]
    ActionDisabled(String),

    /// The instance's current state is not in the action's `fromStates`.
    #[error("action '{action_id}' is not valid from current state '{state_id}'")]
    ActionNotValidFromCurrentState { action_id: String, state_id: String },
}

impl EngineError {
    /// Whether this error means the addressed entity does not exist, as
    /// opposed to the request being rejected as invalid.  Transport layers
    /// use this to keep the not-found / bad-request distinction intact.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WorkflowNotFound(_)
                | Self::InstanceNotFound(_)
                | Self::DefinitionNotFound(_)
        )
    }
}
