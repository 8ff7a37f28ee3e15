//! Core types and traits for dirpull.
//!
//! This crate provides the pull-style [`Producer`] contract, the
//! [`ProducerIter`] adapter that turns any producer into an ordinary
//! iterator, and the error and configuration types shared by the rest
//! of the dirpull workspace.

mod config;
mod error;
mod producer;

pub use config::{WalkConfig, WalkConfigBuilder};
pub use error::{SequenceError, WalkError};
pub use producer::{FnProducer, Producer, ProducerIter};
