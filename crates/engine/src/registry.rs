//! The two registries: validated definitions and running instances.
//!
//! Thin wrappers over [`store::KeyedStore`] that encode each registry's
//! consistency contract:
//! - definitions are insert-only and immutable, handed out as shared `Arc`s;
//! - instances are mutable, but only inside [`InstanceRegistry::with_mut`]'s
//!   per-instance critical section, and reads return snapshot clones.

use std::sync::Arc;

use store::KeyedStore;
use tracing::info;

use crate::models::{WorkflowDefinition, WorkflowInstance};
use crate::{EngineError, validator};

// ---------------------------------------------------------------------------
// DefinitionRegistry
// ---------------------------------------------------------------------------

/// Keyed store of validated workflow definitions.
#[derive(Default)]
pub struct DefinitionRegistry {
    defs: KeyedStore<Arc<WorkflowDefinition>>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `def` and accept it into the registry.
    ///
    /// Uniqueness-check-then-insert is atomic: if two `define` calls race on
    /// the same ID, the store's `try_insert` admits exactly one and the
    /// loser reports [`EngineError::DuplicateWorkflowId`].
    ///
    /// # Errors
    /// Any [`validator::validate`] failure; the definition is not stored.
    pub fn define(&self, def: WorkflowDefinition) -> Result<Arc<WorkflowDefinition>, EngineError> {
        validator::validate(&def, self)?;

        let id = def.id.clone();
        let def = Arc::new(def);
        self.defs
            .try_insert(&id, Arc::clone(&def))
            .map_err(|_| EngineError::DuplicateWorkflowId(id.clone()))?;

        info!(workflow_id = %id, "workflow definition registered");
        Ok(def)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.defs.contains(id)
    }

    pub fn get(&self, id: &str) -> Option<Arc<WorkflowDefinition>> {
        self.defs.get(id)
    }

    /// Snapshot of all definitions; order unspecified.
    pub fn list(&self) -> Vec<Arc<WorkflowDefinition>> {
        self.defs.list()
    }
}

// ---------------------------------------------------------------------------
// InstanceRegistry
// ---------------------------------------------------------------------------

/// Keyed store of running workflow instances.
#[derive(Default)]
pub struct InstanceRegistry {
    instances: KeyedStore<WorkflowInstance>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly spawned instance; fails if the ID is already taken
    /// (the caller regenerates and retries — an existing instance must never
    /// be overwritten).
    pub fn insert_new(&self, instance: WorkflowInstance) -> Result<(), WorkflowInstance> {
        let id = instance.id.clone();
        self.instances.try_insert(&id, instance)
    }

    /// Snapshot of one instance.
    pub fn get(&self, id: &str) -> Option<WorkflowInstance> {
        self.instances.get(id)
    }

    /// Snapshot of all instances; order unspecified.
    pub fn list(&self) -> Vec<WorkflowInstance> {
        self.instances.list()
    }

    /// Run `f` inside the instance's critical section.
    ///
    /// Transition execution does its read-check-write entirely in here, so
    /// two concurrent actions on one instance are linearized: the loser
    /// observes the post-transition state, never the same pre-state as the
    /// winner. Instances are the unit of isolation; different IDs don't
    /// contend.
    pub fn with_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut WorkflowInstance) -> T,
    ) -> Option<T> {
        self.instances.with_mut(id, f)
    }
}
