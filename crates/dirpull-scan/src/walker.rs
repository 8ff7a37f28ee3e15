//! Non-recursive depth-first file enumerator.

use std::fs;
use std::path::{Path, PathBuf};

use dirpull_core::{Producer, ProducerIter, WalkConfig, WalkError};

use crate::cursor::Cursor;
use crate::stats::{StatsTracker, WalkStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Done,
    Poisoned,
}

/// Depth-first, pre-order walker over the non-directory entries of a tree.
///
/// The walker keeps one [`Cursor`] per directory on the path from the root
/// to the directory being scanned, so memory grows with the depth of the
/// tree rather than its size. Each call to [`Producer::produce`] resumes
/// where the previous one stopped.
///
/// A walker is single-use. After it reports the end it keeps reporting the
/// end; after a listing failure every further call returns
/// [`WalkError::Poisoned`].
#[derive(Debug)]
pub struct TreeWalker {
    root: PathBuf,
    sort_entries: bool,
    stack: Vec<Cursor>,
    current: Option<Cursor>,
    state: State,
    stats: StatsTracker,
}

impl TreeWalker {
    /// Create a walker over `root`, consuming listings in filesystem order.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, WalkError> {
        Self::with_config(&WalkConfig::new(root))
    }

    /// Create a walker from a config.
    ///
    /// The root is checked and listed here, so a missing root or one that is
    /// not a directory fails before anything is produced.
    pub fn with_config(config: &WalkConfig) -> Result<Self, WalkError> {
        let root = config.root.clone();
        let metadata = fs::metadata(&root).map_err(|e| WalkError::io(&root, e))?;
        if !metadata.is_dir() {
            return Err(WalkError::NotADirectory { path: root });
        }

        let cursor = Cursor::open(&root, config.sort_entries)?;
        tracing::debug!(root = %root.display(), entries = cursor.len(), "starting traversal");

        Ok(Self {
            root,
            sort_entries: config.sort_entries,
            stack: Vec::new(),
            current: Some(cursor),
            state: State::Active,
            stats: StatsTracker::new(),
        })
    }

    /// Root directory of this traversal.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of suspended parent directories, 0 while scanning the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check whether the walker reported the end.
    pub fn is_finished(&self) -> bool {
        self.state == State::Done
    }

    /// Check whether an earlier failure aborted the walk.
    pub fn is_poisoned(&self) -> bool {
        self.state == State::Poisoned
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> WalkStats {
        self.stats.snapshot()
    }

    /// Turn this walker into an iterator over produced paths.
    pub fn into_files(self) -> ProducerIter<Self> {
        ProducerIter::new(self)
    }

    /// Pop exhausted cursors until one with entries remains.
    ///
    /// Returns `false` once the whole stack is drained.
    fn ascend(&mut self) -> bool {
        while !self.current.as_ref().is_some_and(Cursor::has_more) {
            match self.stack.pop() {
                Some(parent) => {
                    tracing::trace!(dir = %parent.dir().display(), "ascending");
                    self.current = Some(parent);
                }
                None => {
                    self.current = None;
                    return false;
                }
            }
        }
        true
    }

    fn descend(&mut self, dir: &Path) -> Result<(), WalkError> {
        let child = Cursor::open(dir, self.sort_entries)?;
        tracing::trace!(dir = %dir.display(), entries = child.len(), "descending");
        if let Some(parent) = self.current.replace(child) {
            self.stack.push(parent);
        }
        self.stats.record_dir(self.stack.len());
        Ok(())
    }

    fn finish(&mut self) {
        self.state = State::Done;
        self.stats.finish();
        let stats = self.stats.snapshot();
        tracing::debug!(
            root = %self.root.display(),
            files = stats.files_produced,
            dirs = stats.dirs_entered,
            max_depth = stats.max_depth,
            "traversal complete"
        );
    }

    fn poison(&mut self, err: &WalkError) {
        tracing::warn!(root = %self.root.display(), error = %err, "traversal aborted");
        self.state = State::Poisoned;
        self.stats.finish();
        self.stack.clear();
        self.current = None;
    }
}

impl Producer for TreeWalker {
    type Item = PathBuf;
    type Error = WalkError;

    fn produce(&mut self) -> Result<Option<PathBuf>, WalkError> {
        match self.state {
            State::Active => {}
            State::Done => return Ok(None),
            State::Poisoned => return Err(WalkError::Poisoned),
        }

        loop {
            if !self.ascend() {
                self.finish();
                return Ok(None);
            }

            while let Some(entry) = self.current.as_mut().and_then(Cursor::take_next) {
                if !entry.kind.is_dir() {
                    self.stats.record_file();
                    tracing::trace!(path = %entry.path.display(), "produced");
                    return Ok(Some(entry.path));
                }
                if let Err(err) = self.descend(&entry.path) {
                    self.poison(&err);
                    return Err(err);
                }
            }
        }
    }
}

impl IntoIterator for TreeWalker {
    type Item = Result<PathBuf, WalkError>;
    type IntoIter = ProducerIter<TreeWalker>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_files()
    }
}

/// Walk `root` in filesystem order.
pub fn walk(root: impl Into<PathBuf>) -> Result<ProducerIter<TreeWalker>, WalkError> {
    TreeWalker::new(root).map(TreeWalker::into_files)
}
