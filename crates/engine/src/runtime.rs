//! Ambient collaborators the engine consumes through narrow seams: a clock
//! for history timestamps and an ID source for instance IDs.
//!
//! Production uses the system implementations below; tests substitute
//! deterministic ones.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Timestamp source, monotonic-enough for audit ordering.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of instance IDs with negligible collision probability.
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// Random UUID v4 IDs.
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
