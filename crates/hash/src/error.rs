//! Errors raised by key-path parsing and tree writes.
//!
//! Reads never fail on missing data; these errors cover malformed paths and
//! writes the tree cannot honour.

use thiserror::Error;

/// Result alias for hash operations.
pub type HashResult<T> = Result<T, HashError>;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The path string was empty.
    #[error("Key path is empty")]
    EmptyPath,

    /// A segment between dots was empty (`a..b`, `.a`, `a.`, `[]`).
    #[error("Empty segment at position {position} in key path '{path}'")]
    EmptySegment { path: String, position: usize },

    /// Too many segments.
    #[error("Key path '{path}' has {actual} segments, limit is {max}")]
    TooManySegments {
        path: String,
        max: usize,
        actual: usize,
    },

    /// A non-numeric segment addressed an array-shaped node.
    #[error("Segment '{segment}' of key path '{path}' is not an array index")]
    NotAnIndex { path: String, segment: String },

    /// The path asks for a node of one shape where a node of the other
    /// shape already exists.
    #[error("Segment '{segment}' of key path '{path}' expects an {expected} node, found {found}")]
    ShapeConflict {
        path: String,
        segment: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A write skipped indices of an array while gaps are rejected.
    #[error("Index {index} of key path '{path}' leaves a gap (array length {length})")]
    IndexGap {
        path: String,
        index: usize,
        length: usize,
    },

    /// A write addressed an index at or past the array length limit.
    #[error("Index {index} of key path '{path}' exceeds the array length limit of {max}")]
    ArrayTooLong {
        path: String,
        index: usize,
        max: usize,
    },
}

impl HashError {
    pub(crate) fn empty_segment(path: &str, position: usize) -> Self {
        Self::EmptySegment {
            path: path.to_owned(),
            position,
        }
    }

    pub(crate) fn too_many_segments(path: &str, max: usize, actual: usize) -> Self {
        Self::TooManySegments {
            path: path.to_owned(),
            max,
            actual,
        }
    }

    pub(crate) fn not_an_index(path: &str, segment: &str) -> Self {
        Self::NotAnIndex {
            path: path.to_owned(),
            segment: segment.to_owned(),
        }
    }

    pub(crate) fn index_gap(path: &str, index: usize, length: usize) -> Self {
        Self::IndexGap {
            path: path.to_owned(),
            index,
            length,
        }
    }

    pub(crate) fn array_too_long(path: &str, index: usize, max: usize) -> Self {
        Self::ArrayTooLong {
            path: path.to_owned(),
            index,
            max,
        }
    }
}
