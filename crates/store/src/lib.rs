//! `store` crate — concurrency-safe keyed stores.
//!
//! Both registries (definitions and instances) sit on top of [`KeyedStore`],
//! an in-memory map with two guarantees the engine relies on:
//!
//! 1. `try_insert` is an atomic check-then-insert: two racing inserts of the
//!    same key cannot both succeed.
//! 2. `with_mut` runs its closure under a per-key lock, so read-check-write
//!    sequences on one entry are linearized without serializing the whole
//!    store. Operations on different keys never block each other.

pub mod keyed;

pub use keyed::KeyedStore;
