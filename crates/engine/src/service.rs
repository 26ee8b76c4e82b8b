//! The workflow service — the engine's complete operation surface.
//!
//! `WorkflowService` owns both registries plus the clock and ID source, and
//! exposes exactly seven operations: define/get/list workflows,
//! spawn/get/list instances, and `execute_action`.  Transport layers call
//! these and nothing else; every failure comes back as a typed
//! [`EngineError`].

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::models::{InstanceHistoryEntry, WorkflowDefinition, WorkflowInstance};
use crate::registry::{DefinitionRegistry, InstanceRegistry};
use crate::runtime::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::{EngineError, transition};

pub struct WorkflowService {
    definitions: DefinitionRegistry,
    instances: InstanceRegistry,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for WorkflowService {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowService {
    /// Service backed by the system clock and random UUIDs.
    pub fn new() -> Self {
        Self::with_runtime(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }

    /// Service with injected clock and ID source (test seam).
    pub fn with_runtime(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            definitions: DefinitionRegistry::new(),
            instances: InstanceRegistry::new(),
            clock,
            ids,
        }
    }

    // -----------------------------------------------------------------------
    // Definitions
    // -----------------------------------------------------------------------

    /// Validate and register a workflow definition.
    ///
    /// # Errors
    /// Any [`crate::validator`] failure; the registry is unchanged on
    /// failure.
    #[instrument(skip(self, def), fields(workflow_id = %def.id))]
    pub fn define_workflow(
        &self,
        def: WorkflowDefinition,
    ) -> Result<Arc<WorkflowDefinition>, EngineError> {
        self.definitions.define(def)
    }

    /// # Errors
    /// [`EngineError::WorkflowNotFound`] if the ID is unknown.
    pub fn get_workflow(&self, id: &str) -> Result<Arc<WorkflowDefinition>, EngineError> {
        self.definitions
            .get(id)
            .ok_or_else(|| EngineError::WorkflowNotFound(id.to_owned()))
    }

    pub fn list_workflows(&self) -> Vec<Arc<WorkflowDefinition>> {
        self.definitions.list()
    }

    // -----------------------------------------------------------------------
    // Instances
    // -----------------------------------------------------------------------

    /// Start a new instance of `workflow_id`, seeded at the definition's
    /// enabled initial state with empty history.
    ///
    /// # Errors
    /// - [`EngineError::WorkflowNotFound`] if the definition is unknown.
    /// - [`EngineError::NoEnabledInitialState`] if the initial state exists
    ///   but is disabled (validation permits that; such a definition is
    ///   permanently unspawnable).
    #[instrument(skip(self))]
    pub fn spawn_instance(&self, workflow_id: &str) -> Result<WorkflowInstance, EngineError> {
        let def = self.get_workflow(workflow_id)?;

        let initial = def
            .enabled_initial_state()
            .ok_or_else(|| EngineError::NoEnabledInitialState(workflow_id.to_owned()))?;

        // Collisions are cryptographically negligible, but an existing
        // instance must never be overwritten: regenerate until the insert
        // wins.
        let instance = loop {
            let candidate = WorkflowInstance::new(
                self.ids.new_id(),
                workflow_id.to_owned(),
                initial.id.clone(),
            );
            match self.instances.insert_new(candidate.clone()) {
                Ok(()) => break candidate,
                Err(_) => warn!(instance_id = %candidate.id, "instance ID collision, regenerating"),
            }
        };

        info!(
            instance_id = %instance.id,
            state = %instance.current_state_id,
            "instance started"
        );
        Ok(instance)
    }

    /// # Errors
    /// [`EngineError::InstanceNotFound`] if the ID is unknown.
    pub fn get_instance(&self, id: &str) -> Result<WorkflowInstance, EngineError> {
        self.instances
            .get(id)
            .ok_or_else(|| EngineError::InstanceNotFound(id.to_owned()))
    }

    pub fn list_instances(&self) -> Vec<WorkflowInstance> {
        self.instances.list()
    }

    // -----------------------------------------------------------------------
    // Transition execution
    // -----------------------------------------------------------------------

    /// Fire `action_id` on the instance, advancing it to the action's
    /// target state and appending one history entry.
    ///
    /// The definition lookup, legality checks, and mutation all run inside
    /// the instance's critical section, so the state that was checked is
    /// the state that is replaced.  No partial writes: the instance is
    /// untouched unless every check passes.
    ///
    /// # Errors
    /// [`EngineError::InstanceNotFound`], or any failure from
    /// [`transition::check_transition`] (plus
    /// [`EngineError::DefinitionNotFound`] if the instance's definition has
    /// gone missing — an integrity error, surfaced not masked).
    #[instrument(skip(self))]
    pub fn execute_action(
        &self,
        instance_id: &str,
        action_id: &str,
    ) -> Result<WorkflowInstance, EngineError> {
        let result = self.instances.with_mut(instance_id, |inst| {
            let def = self.definitions.get(&inst.workflow_definition_id).ok_or_else(|| {
                EngineError::DefinitionNotFound(inst.workflow_definition_id.clone())
            })?;

            let action = transition::check_transition(&def, &inst.current_state_id, action_id)?;

            inst.current_state_id = action.to_state.clone();
            inst.history.push(InstanceHistoryEntry {
                action_id: action.id.clone(),
                timestamp: self.clock.now(),
            });
            Ok(inst.clone())
        });

        let instance = result
            .ok_or_else(|| EngineError::InstanceNotFound(instance_id.to_owned()))??;

        info!(
            instance_id,
            action_id,
            state = %instance.current_state_id,
            "action executed"
        );
        Ok(instance)
    }
}
