//! Queue ordering module
//!
//! This module provides the deterministic ordering of the attendance queue,
//! position derivation for a calling patient, and the call-next selection
//! rule used by doctors.

pub mod engine;

pub use engine::{CallNextDecision, OrderedEntry, QueueOrderingEngine};
