//! Lazy directory tree walking for dirpull.
//!
//! # Overview
//!
//! `dirpull-scan` enumerates the files of a directory tree one at a time, on
//! demand. Nothing is read ahead beyond the listing of the directories on the
//! current path, and traversal never recurses:
//!
//! - **[`Cursor`]** holds the pre-read listing of one directory and a read
//!   position.
//! - **[`TreeWalker`]** keeps a stack of suspended cursors and implements
//!   [`Producer`], yielding paths in pre-order depth-first order.
//! - **[`ProducerIter`]** (from `dirpull-core`) turns the walker into an
//!   ordinary iterator with one item of lookahead.
//!
//! Only real directories are descended into. Symbolic links, devices and
//! other special entries are produced like regular files.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirpull_scan::{TreeWalker, WalkConfig};
//!
//! let config = WalkConfig::new("/path/to/walk").sorted();
//! for path in TreeWalker::with_config(&config).unwrap() {
//!     println!("{}", path.unwrap().display());
//! }
//! ```

mod cursor;
mod stats;
mod walker;

pub use cursor::{Cursor, EntryKind, ListedEntry};
pub use stats::WalkStats;
pub use walker::{TreeWalker, walk};

// Re-export core types for convenience
pub use dirpull_core::{Producer, ProducerIter, SequenceError, WalkConfig, WalkError};
