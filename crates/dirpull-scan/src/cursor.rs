//! Read position over one directory's listing.

use std::fs;
use std::path::{Path, PathBuf};

use dirpull_core::WalkError;

/// Classification of a listing entry, taken from the entry itself.
///
/// Symbolic links are not followed, so a link to a directory is a
/// [`EntryKind::Symlink`] and is never descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A real directory.
    Directory,
    /// A regular file.
    File,
    /// A symbolic link, whatever it points at (or if it dangles).
    Symlink,
    /// Devices, FIFOs, sockets and anything else.
    Other,
}

impl EntryKind {
    fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else if file_type.is_symlink() {
            Self::Symlink
        } else {
            Self::Other
        }
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Full path of the entry (parent joined with file name).
    pub path: PathBuf,
    /// What the entry is.
    pub kind: EntryKind,
}

/// The listing of one directory, read once, plus a read position.
///
/// Holds no open handle after [`Cursor::open`] returns.
#[derive(Debug)]
pub struct Cursor {
    dir: PathBuf,
    entries: Vec<ListedEntry>,
    position: usize,
}

impl Cursor {
    /// List the immediate children of `dir`.
    ///
    /// Any failure to read the directory or one of its entries is returned;
    /// an unreadable directory never turns into an empty cursor.
    pub fn open(dir: impl Into<PathBuf>, sort_entries: bool) -> Result<Self, WalkError> {
        let dir = dir.into();
        let read_dir = fs::read_dir(&dir).map_err(|e| WalkError::io(&dir, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| WalkError::read_entry(&dir, e))?;
            let file_type = entry.file_type().map_err(|e| WalkError::io(entry.path(), e))?;
            entries.push(ListedEntry {
                path: entry.path(),
                kind: EntryKind::from_file_type(file_type),
            });
        }

        if sort_entries {
            entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        }

        tracing::trace!(dir = %dir.display(), entries = entries.len(), "listed directory");

        Ok(Self {
            dir,
            entries,
            position: 0,
        })
    }

    /// Directory this cursor lists.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check whether an entry remains.
    pub fn has_more(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Take the entry at the current position and advance.
    ///
    /// Returns `None` once the cursor is exhausted.
    pub fn take_next(&mut self) -> Option<ListedEntry> {
        let entry = self.entries.get(self.position)?.clone();
        self.position += 1;
        Some(entry)
    }

    /// Number of entries in the listing.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the directory had no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries already taken.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_and_drain() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("c")).unwrap();

        let mut cursor = Cursor::open(temp.path(), true).unwrap();
        assert_eq!(cursor.len(), 3);
        assert_eq!(cursor.dir(), temp.path());

        let first = cursor.take_next().unwrap();
        assert_eq!(first.path, temp.path().join("a.txt"));
        assert_eq!(first.kind, EntryKind::File);
        assert_eq!(cursor.position(), 1);

        assert_eq!(cursor.take_next().unwrap().path, temp.path().join("b.txt"));

        let dir = cursor.take_next().unwrap();
        assert!(dir.kind.is_dir());

        assert!(!cursor.has_more());
        assert!(cursor.take_next().is_none());
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_has_more_has_no_side_effect() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("only"), "").unwrap();

        let mut cursor = Cursor::open(temp.path(), false).unwrap();
        assert!(cursor.has_more());
        assert!(cursor.has_more());
        assert_eq!(cursor.position(), 0);
        assert!(cursor.take_next().is_some());
        assert!(!cursor.has_more());
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let cursor = Cursor::open(temp.path(), false).unwrap();
        assert!(cursor.is_empty());
        assert!(!cursor.has_more());
    }

    #[test]
    fn test_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let err = Cursor::open(temp.path().join("missing"), false).unwrap_err();
        assert!(matches!(err, WalkError::NotFound { .. }));
    }

    #[test]
    fn test_listing_a_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "x").unwrap();
        assert!(Cursor::open(&file, false).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let mut cursor = Cursor::open(temp.path(), true).unwrap();
        let link = cursor.take_next().unwrap();
        assert_eq!(link.kind, EntryKind::Symlink);
        assert!(!link.kind.is_dir());
        assert_eq!(cursor.take_next().unwrap().kind, EntryKind::Directory);
    }
}
