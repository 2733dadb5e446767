//! [`PathHashBuilder`]: grow a nested structure from `(path, value)` pairs.

use crate::error::{HashError, HashResult};
use crate::leaf::Leaf;
use crate::node::{HashNode, Shape, Slot};
use crate::path::{KeyPath, MAX_PATH_SEGMENTS};
use serde::{Deserialize, Serialize};

/// Default upper bound on the length of any array the builder grows.
pub const MAX_ARRAY_LENGTH: usize = 10_000;

/// What to do when a write addresses an index past the end of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Pad skipped indices with the null placeholder.
    #[default]
    Fill,
    /// Refuse the write with [`HashError::IndexGap`].
    Reject,
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a nested object/array value from dotted key paths.
///
/// Writes sharing a prefix share the intermediate nodes, later writes to the
/// same path overwrite earlier ones, and every write is all-or-nothing: a
/// path that cannot be honoured leaves the tree untouched.
///
/// # Examples
///
/// ```rust
/// use formulary_hash::PathHashBuilder;
/// use serde_json::json;
///
/// let mut builder: PathHashBuilder = PathHashBuilder::new();
/// builder
///     .set_value("alpha.user.id", "1")?
///     .set_value("alpha.user.name", "Bob")?
///     .set_value("alpha.tag[].0", "x")?;
///
/// assert_eq!(
///     builder.build(),
///     json!({ "alpha": { "user": { "id": "1", "name": "Bob" }, "tag": ["x"] } })
/// );
/// # Ok::<(), formulary_hash::HashError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PathHashBuilder<V = serde_json::Value> {
    root: HashNode<V>,
    gap_policy: GapPolicy,
    max_segments: usize,
    max_array_length: usize,
}

impl<V: Leaf> Default for PathHashBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Leaf> PathHashBuilder<V> {
    /// Creates a builder with an object-shaped root.
    pub fn new() -> Self {
        Self::with_shape(Shape::Object)
    }

    /// Creates a builder whose root has the given shape.
    pub fn with_shape(shape: Shape) -> Self {
        Self {
            root: HashNode::new(shape),
            gap_policy: GapPolicy::default(),
            max_segments: MAX_PATH_SEGMENTS,
            max_array_length: MAX_ARRAY_LENGTH,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = gap_policy;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments;
        self
    }

    /// Caps array length; a write to index `i` needs `i < max_array_length`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_array_length(mut self, max_array_length: usize) -> Self {
        self.max_array_length = max_array_length;
        self
    }

    pub fn max_array_length(&self) -> usize {
        self.max_array_length
    }

    pub fn shape(&self) -> Shape {
        self.root.shape()
    }

    pub fn gap_policy(&self) -> GapPolicy {
        self.gap_policy
    }

    pub fn root(&self) -> &HashNode<V> {
        &self.root
    }

    /// Assigns `value` at `path`, creating intermediate nodes as needed.
    pub fn set_value(&mut self, path: &str, value: impl Into<V>) -> HashResult<&mut Self> {
        let path = KeyPath::parse_with_limit(path, self.max_segments)?;
        self.set_path(&path, value)
    }

    /// Assigns `value` at an already parsed path.
    pub fn set_path(&mut self, path: &KeyPath, value: impl Into<V>) -> HashResult<&mut Self> {
        let limits = Limits {
            gap_policy: self.gap_policy,
            max_array_length: self.max_array_length,
        };
        check(&self.root, path, 0, limits)?;
        tracing::trace!(path = %path, "assigning value");
        write(&mut self.root, path, 0, value.into())?;
        Ok(self)
    }

    /// Applies [`set_value`](Self::set_value) to each pair in order.
    ///
    /// Stops at the first failing pair; pairs before it stay applied.
    pub fn set_values<I, P, T>(&mut self, pairs: I) -> HashResult<&mut Self>
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: Into<V>,
    {
        for (path, value) in pairs {
            self.set_value(path.as_ref(), value)?;
        }
        Ok(self)
    }

    /// Reads the plain value at `path`.
    ///
    /// Missing keys and out-of-range indices yield `Ok(None)`; only a
    /// malformed path is an error.
    pub fn get(&self, path: &str) -> HashResult<Option<V>> {
        let path = KeyPath::parse_with_limit(path, self.max_segments)?;
        let Some((last, parents)) = path.segments().split_last() else {
            return Ok(None);
        };

        let mut node = &self.root;
        for segment in parents {
            match node.get(segment) {
                Some(Slot::Node(child)) => node = child,
                Some(Slot::Value(_)) | None => return Ok(None),
            }
        }
        Ok(node.get(last).map(Slot::to_plain))
    }

    /// Flattens the tree into a plain value. The builder is left untouched,
    /// so repeated calls yield equal values.
    pub fn build(&self) -> V {
        self.root.to_plain()
    }

    /// Consumes the builder and flattens without cloning leaves.
    pub fn into_value(self) -> V {
        self.root.into_plain()
    }
}

/// Builds a nested value from `(path, value)` pairs with default settings.
///
/// ```rust
/// use formulary_hash::build_nested;
/// use serde_json::{Value, json};
///
/// let payload: Value = build_nested([("list[].0", "x"), ("list[].1", "y")])?;
/// assert_eq!(payload, json!({ "list": ["x", "y"] }));
/// # Ok::<(), formulary_hash::HashError>(())
/// ```
pub fn build_nested<V, I, P, T>(pairs: I) -> HashResult<V>
where
    V: Leaf,
    I: IntoIterator<Item = (P, T)>,
    P: AsRef<str>,
    T: Into<V>,
{
    let mut builder = PathHashBuilder::<V>::new();
    builder.set_values(pairs)?;
    Ok(builder.into_value())
}

// ============================================================================
// TRAVERSAL
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Limits {
    gap_policy: GapPolicy,
    max_array_length: usize,
}

/// Dry run of [`write`]: walks existing nodes (and empty stand-ins for the
/// ones a write would create) and reports any error the write would hit.
fn check<V>(node: &HashNode<V>, path: &KeyPath, depth: usize, limits: Limits) -> HashResult<()> {
    let segments = path.segments();
    let segment = &segments[depth];

    if let HashNode::Array(items) = node {
        let index = segment
            .index()
            .ok_or_else(|| HashError::not_an_index(path.as_str(), segment.key()))?;
        if index >= limits.max_array_length {
            return Err(HashError::array_too_long(path.as_str(), index, limits.max_array_length));
        }
        if limits.gap_policy == GapPolicy::Reject && index > items.len() {
            return Err(HashError::index_gap(path.as_str(), index, items.len()));
        }
    }

    if depth + 1 == segments.len() {
        return Ok(());
    }

    let shape = Shape::of(segment);
    match node.get(segment) {
        Some(Slot::Node(child)) if child.shape() != shape => Err(HashError::ShapeConflict {
            path: path.as_str().to_owned(),
            segment: segment.to_string(),
            expected: shape.name(),
            found: child.shape().name(),
        }),
        Some(Slot::Node(child)) => check(child, path, depth + 1, limits),
        Some(Slot::Value(_)) | None => check(&HashNode::<V>::new(shape), path, depth + 1, limits),
    }
}

fn write<V: Leaf>(node: &mut HashNode<V>, path: &KeyPath, depth: usize, value: V) -> HashResult<()> {
    let segments = path.segments();
    let segment = &segments[depth];

    if depth + 1 == segments.len() {
        return node.put(segment, path, value);
    }

    let child = node.child_mut(segment, path, Shape::of(segment))?;
    write(child, path, depth + 1, value)
}
