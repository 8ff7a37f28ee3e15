//! BLAKE3 content digests for walked files.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use derive_builder::Builder;
use dirpull_core::WalkError;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// BLAKE3 content hash of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Create a new ContentHash from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Errors raised while digesting a traversal.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The traversal feeding the digester failed.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// A produced file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Digest of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDigest {
    /// Path as produced by the walker.
    pub path: PathBuf,
    /// Number of bytes hashed.
    pub size: u64,
    /// BLAKE3 hash of the contents.
    pub hash: ContentHash,
}

/// Configuration for content digesting.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct DigestConfig {
    /// Size of the read buffer in bytes.
    #[builder(default = "64 * 1024")]
    pub buffer_size: usize,
}

impl DigestConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.buffer_size == Some(0) {
            return Err("Buffer size must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl DigestConfig {
    /// Create a new digest config builder.
    pub fn builder() -> DigestConfigBuilder {
        DigestConfigBuilder::default()
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
        }
    }
}

/// Computes content hashes for the files a walker produces.
#[derive(Debug, Default)]
pub struct FileDigester {
    config: DigestConfig,
}

impl FileDigester {
    /// Create a digester with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a digester with custom configuration.
    pub fn with_config(config: DigestConfig) -> Self {
        Self { config }
    }

    /// Hash a single file with a buffered read loop.
    pub fn digest_file(&self, path: &Path) -> Result<FileDigest, DigestError> {
        let read_err = |source| DigestError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(read_err)?;
        let mut hasher = Hasher::new();
        let mut buffer = vec![0u8; self.config.buffer_size];
        let mut size = 0u64;

        loop {
            let bytes_read = file.read(&mut buffer).map_err(read_err)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
            size += bytes_read as u64;
        }

        tracing::trace!(path = %path.display(), size, "digested");

        Ok(FileDigest {
            path: path.to_path_buf(),
            size,
            hash: ContentHash::new(*hasher.finalize().as_bytes()),
        })
    }

    /// Lazily digest every path of a traversal.
    ///
    /// Files are read one at a time as the returned iterator is advanced.
    /// Traversal errors are passed through as [`DigestError::Walk`].
    pub fn digest_all<I>(&self, files: I) -> impl Iterator<Item = Result<FileDigest, DigestError>>
    where
        I: IntoIterator<Item = Result<PathBuf, WalkError>>,
    {
        files
            .into_iter()
            .map(|path| self.digest_file(&path?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_digest_matches_blake3() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.bin");
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        let config = DigestConfig::builder().buffer_size(4096usize).build().unwrap();
        let digester = FileDigester::with_config(config);
        let digest = digester.digest_file(&path).unwrap();

        assert_eq!(digest.size, data.len() as u64);
        assert_eq!(digest.hash.0, *blake3::hash(&data).as_bytes());
        assert_eq!(digest.hash.to_hex(), blake3::hash(&data).to_hex().as_str());
    }

    #[test]
    fn test_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty");
        std::fs::write(&path, "").unwrap();

        let digest = FileDigester::new().digest_file(&path).unwrap();
        assert_eq!(digest.size, 0);
        assert_eq!(digest.hash.0, *blake3::hash(b"").as_bytes());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = FileDigester::new()
            .digest_file(&temp.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, DigestError::Read { .. }));
    }

    #[test]
    fn test_walk_error_passes_through() {
        let files: Vec<Result<PathBuf, WalkError>> = vec![Err(WalkError::Poisoned)];
        let results: Vec<_> = FileDigester::new().digest_all(files).collect();
        assert!(matches!(results[0], Err(DigestError::Walk(WalkError::Poisoned))));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        assert!(DigestConfig::builder().buffer_size(0usize).build().is_err());
        assert_eq!(DigestConfig::builder().build().unwrap().buffer_size, 64 * 1024);
    }

    #[test]
    fn test_hash_display_and_serialize() {
        let hash = ContentHash::new([0xab; 32]);
        assert_eq!(hash.to_string(), hash.to_hex());
        assert!(hash.to_hex().starts_with("abab"));

        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash.to_hex()));
    }
}
