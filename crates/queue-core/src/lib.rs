//! # MedFila Queue Core
//!
//! This crate provides the portable core of the MedFila clinic attendance
//! queue: deterministic priority ordering, position derivation for the
//! calling patient, the call-next selection rule for doctors, snapshot
//! statistics, and a poll-driven position watcher.
//!
//! The hosted backend stays a black box behind a trait: authentication,
//! persistence, and the HTTP API that performs check-in, cancel and
//! call-next are not reimplemented here. The crate consumes *snapshots*
//! (full, unordered reads of queue entries and profiles) and every ordering
//! operation is a pure function of those two snapshots.
//!
//! ## Features
//!
//! - **Queue Ordering**: priority patients first (a legal requirement),
//!   earliest check-in first within each group, deterministic tie-break
//! - **Position Derivation**: the patient widget's
//!   `not_in_queue | waiting | called` status with a 1-based position
//! - **Call-Next Selection**: one patient per doctor, head of the ordered
//!   waiting queue otherwise
//! - **Snapshot Statistics**: waiting/priority/called counts and wait times
//! - **Position Watching**: tokio poll loop publishing position changes
//! - **Document Validation**: CPF check digits and display formatting
//!
//! ## Architecture
//!
//! - [`types`]: snapshot data model with lenient, wire-compatible serde
//! - [`ordering`]: the ordering engine, the heart of the crate
//! - [`stats`]: aggregates for dashboards
//! - [`watch`]: snapshot source trait and polling watcher
//! - [`validation`]: patient document validation
//! - [`config`]: configuration with defaults and validation
//! - [`error`]: error types
//!
//! ## Quick Start
//!
//! ```rust
//! use medfila_queue_core::prelude::*;
//!
//! let engine = QueueOrderingEngine::with_defaults();
//!
//! // Snapshots come from the backend; empty here for brevity.
//! let entries: Vec<QueueEntry> = vec![];
//! let profiles: Vec<Profile> = vec![];
//!
//! let queue = engine.order(&entries, &profiles);
//! assert!(queue.is_empty());
//!
//! let me = ProfileId::from("p1");
//! assert_eq!(
//!     engine.position_of(&me, &entries, &profiles),
//!     QueuePosition::NotInQueue
//! );
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Queue functionality modules
pub mod ordering;
pub mod stats;
pub mod validation;
pub mod watch;

// Re-exports for convenience
pub use config::QueueCoreConfig;
pub use error::{QueueCoreError, Result};
pub use ordering::QueueOrderingEngine;

/// Prelude module for convenient imports
pub mod prelude {
    // Core types
    pub use crate::{QueueCoreConfig, QueueCoreError, QueueOrderingEngine, Result};

    // Configuration types
    pub use crate::config::{OrderingConfig, PollingConfig};

    // Ordering types
    pub use crate::ordering::{CallNextDecision, OrderedEntry};

    // Data model
    pub use crate::types::{
        EntryId, EntryStatus, Profile, ProfileId, QueueEntry, QueuePosition, Role, UserContext,
    };

    // Statistics
    pub use crate::stats::QueueStats;

    // Watching
    pub use crate::watch::{PositionWatcher, QueueSnapshotSource, WatcherHandle};

    // Validation
    pub use crate::validation::{format_cpf, is_valid_cpf, validate_cpf, DocumentError};

    // Common external types
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
