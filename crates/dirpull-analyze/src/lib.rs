//! Consumers for the paths a dirpull traversal produces.
//!
//! The walker hands out paths without opening them. This crate reads them:
//! [`FileDigester`] computes a BLAKE3 [`ContentHash`] for each file.

mod digest;

pub use digest::{
    ContentHash, DigestConfig, DigestConfigBuilder, DigestError, FileDigest, FileDigester,
};
