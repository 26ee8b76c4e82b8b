//! `engine` crate — core domain models, definition validation, and the
//! transition-execution engine.

pub mod models;
pub mod error;
pub mod validator;
pub mod transition;
pub mod registry;
pub mod runtime;
pub mod service;

pub use models::{Action, State, WorkflowDefinition, WorkflowInstance, InstanceHistoryEntry};
pub use error::EngineError;
pub use validator::{validate, validate_structure};
pub use registry::{DefinitionRegistry, InstanceRegistry};
pub use service::WorkflowService;
