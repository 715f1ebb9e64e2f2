//! Structured Playlist - dependency trees of playlists, synced remotely
//!
//! This library maintains playlists that declare other playlists as
//! dependencies, and copies missing items from each dependency into the
//! playlist that depends on it.

pub mod model;
pub mod repository;
pub mod structure;
pub mod sync;
pub mod validation;

pub use structure::{Definition, DependencyGraph, StructuralError};
pub use sync::{SyncConfig, SyncPipeline, SyncReport};
