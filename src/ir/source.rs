use crate::names::MangledName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a translation unit (source file)
///
/// Stored verbatim inside global variables and returned unchanged by their
/// translation-unit accessor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceFile {
    path: MangledName,
}

impl SourceFile {
    pub fn new(path: &str) -> Self {
        Self {
            path: MangledName::from_raw(path),
        }
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// A position in a source file
///
/// Consumed by abduced-variable naming; the derived name encodes everything
/// the identity needs, so the location is not stored beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLoc {
    pub file: SourceFile,
    pub line: u32,
    pub col: u32,
}

impl SourceLoc {
    pub fn new(file: SourceFile, line: u32, col: u32) -> Self {
        Self { file, line, col }
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.col)
    }
}
