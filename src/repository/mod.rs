//! Playlist repository layer
//!
//! The sync engine talks to the remote playlist service only through the
//! [`PlaylistRepository`] trait. A local JSON library implementation backs
//! the command-line tool, and [`RetryingRepository`] adds backoff for
//! rate-limited services.

mod library_file;
mod retry;
mod traits;

pub use library_file::{LibraryFile, LibraryFileRepository};
pub use retry::{RetryPolicy, RetryingRepository};
pub use traits::{PlaylistRepository, RepoError, RepoErrorStatus};
