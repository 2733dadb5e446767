//! Key-path grammar.
//!
//! ```text
//! path    = segment ( "." segment )*
//! segment = key [ "[]" ]
//! ```
//!
//! A segment suffixed with `[]` names a key whose child is array-shaped.
//! A purely decimal key addresses an index when the enclosing node is
//! array-shaped. The marker is not part of the stored key:
//! `alpha.tag[].0` means object key `alpha`, then key `tag` holding an
//! array, then index `0` of that array.

use crate::error::{HashError, HashResult};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Default maximum number of segments accepted by [`KeyPath::parse`].
pub const MAX_PATH_SEGMENTS: usize = 100;

const ARRAY_MARKER: &str = "[]";

// ============================================================================
// SEGMENT
// ============================================================================

/// One dot-separated component of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    key: String,
    holds_array: bool,
}

impl Segment {
    /// Creates a segment from its key (without marker).
    pub fn new(key: impl Into<String>, holds_array: bool) -> Self {
        Self {
            key: key.into(),
            holds_array,
        }
    }

    /// The key with any `[]` marker removed.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the child reached through this segment is array-shaped.
    pub fn holds_array(&self) -> bool {
        self.holds_array
    }

    /// The key as an array index, if it is purely decimal.
    pub fn index(&self) -> Option<usize> {
        if !self.key.is_empty() && self.key.bytes().all(|b| b.is_ascii_digit()) {
            self.key.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.holds_array {
            write!(f, "{}{ARRAY_MARKER}", self.key)
        } else {
            f.write_str(&self.key)
        }
    }
}

// ============================================================================
// KEY PATH
// ============================================================================

/// A parsed key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    raw: String,
    segments: SmallVec<[Segment; 4]>,
}

impl KeyPath {
    /// Parses a path with the default segment limit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use formulary_hash::KeyPath;
    ///
    /// let path = KeyPath::parse("alpha.tag[].0").unwrap();
    /// let keys: Vec<_> = path.segments().iter().map(|s| s.key()).collect();
    /// assert_eq!(keys, ["alpha", "tag", "0"]);
    /// assert!(path.segments()[1].holds_array());
    /// ```
    pub fn parse(path: &str) -> HashResult<Self> {
        Self::parse_with_limit(path, MAX_PATH_SEGMENTS)
    }

    /// Parses a path, rejecting more than `max_segments` segments.
    pub fn parse_with_limit(path: &str, max_segments: usize) -> HashResult<Self> {
        if path.is_empty() {
            return Err(HashError::EmptyPath);
        }

        let mut segments = SmallVec::new();
        for (position, raw) in path.split('.').enumerate() {
            if position >= max_segments {
                let actual = path.split('.').count();
                return Err(HashError::too_many_segments(path, max_segments, actual));
            }

            let (key, holds_array) = match raw.strip_suffix(ARRAY_MARKER) {
                Some(key) => (key, true),
                None => (raw, false),
            };
            if key.is_empty() {
                return Err(HashError::empty_segment(path, position));
            }
            segments.push(Segment::new(key, holds_array));
        }

        Ok(Self {
            raw: path.to_owned(),
            segments,
        })
    }

    /// The path as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments (always at least one).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for KeyPath {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
