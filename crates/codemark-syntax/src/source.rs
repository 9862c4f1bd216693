//! Source positions across a set of files.
//!
//! Every file added to a [`FileSet`] receives a contiguous range of global
//! positions starting at its base. AST nodes store global positions, so a
//! single `usize` identifies both the file and the byte offset within it.

use std::sync::Arc;

/// A global byte position in a [`FileSet`].
pub type BytePos = usize;

/// A range `[start, end)` of global positions.
///
/// `end` is exclusive, so the span of the last token of a node ends one byte
/// past that token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start position.
    pub start: BytePos,
    /// Exclusive end position.
    pub end: BytePos,
}

impl Span {
    pub fn new(start: BytePos, end: BytePos) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Identifies a file within a [`FileSet`]; assigned sequentially from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(pub usize);

/// A resolved position: file name, byte offset within the file, and 1-based
/// line and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: FileId,
    pub filename: Arc<str>,
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug)]
struct FileEntry {
    name: Arc<str>,
    base: BytePos,
    len: usize,
    /// Offsets (relative to the file) at which each line begins.
    line_starts: Vec<usize>,
}

/// A registry of parsed files and their position ranges.
#[derive(Debug, Default)]
pub struct FileSet {
    files: Vec<FileEntry>,
    next_base: BytePos,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a file and returns its id and base position.
    ///
    /// Bases are separated by one unused position so that the end position
    /// of one file never equals the start position of the next.
    pub fn add_file(&mut self, name: &str, src: &str) -> (FileId, BytePos) {
        let base = self.next_base;
        let line_starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        self.files.push(FileEntry {
            name: Arc::from(name),
            base,
            len: src.len(),
            line_starts,
        });
        self.next_base = base + src.len() + 1;
        (FileId(self.files.len() - 1), base)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn filename(&self, file: FileId) -> Option<&str> {
        self.files.get(file.0).map(|f| f.name.as_ref())
    }

    pub fn base(&self, file: FileId) -> Option<BytePos> {
        self.files.get(file.0).map(|f| f.base)
    }

    /// The file containing a global position (end positions included).
    pub fn file_of(&self, pos: BytePos) -> Option<FileId> {
        let idx = self.files.partition_point(|f| f.base <= pos);
        let idx = idx.checked_sub(1)?;
        let entry = &self.files[idx];
        (pos <= entry.base + entry.len).then_some(FileId(idx))
    }

    /// Resolves a global position; `None` if it lies outside every file.
    pub fn position(&self, pos: BytePos) -> Option<Position> {
        let file = self.file_of(pos)?;
        let entry = &self.files[file.0];
        let offset = pos - entry.base;
        let line_idx = entry.line_starts.partition_point(|&s| s <= offset) - 1;
        Some(Position {
            file,
            filename: Arc::clone(&entry.name),
            offset,
            line: line_idx as u32 + 1,
            column: (offset - entry.line_starts[line_idx]) as u32 + 1,
        })
    }

    /// 1-based line of a global position.
    pub fn line(&self, pos: BytePos) -> Option<u32> {
        self.position(pos).map(|p| p.line)
    }
}
