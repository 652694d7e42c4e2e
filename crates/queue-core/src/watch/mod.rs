//! Snapshot polling module
//!
//! The ordering engine is pure; something still has to fetch the two
//! snapshots and re-run it on a fixed interval. This module provides that
//! collaborator: a [`QueueSnapshotSource`] trait over the backend client
//! and a [`PositionWatcher`] task that polls it and publishes the calling
//! patient's position whenever it changes.

pub mod watcher;

pub use watcher::{PositionWatcher, QueueSnapshotSource, WatcherHandle};
