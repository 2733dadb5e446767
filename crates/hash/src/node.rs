//! Tree nodes owned by a [`PathHashBuilder`](crate::PathHashBuilder).
//!
//! Ownership is strictly tree-shaped: a node exclusively owns its slots and a
//! slot owns either a leaf value or a child node.

use crate::error::{HashError, HashResult};
use crate::leaf::Leaf;
use crate::path::{KeyPath, Segment};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Container shape, fixed for the lifetime of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// String keys, insertion order.
    #[default]
    Object,
    /// Dense indices starting at 0.
    Array,
}

impl Shape {
    /// Shape of the child named by `segment`.
    pub fn of(segment: &Segment) -> Self {
        if segment.holds_array() {
            Self::Array
        } else {
            Self::Object
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

// ============================================================================
// SLOT
// ============================================================================

/// What a node stores under one key or index.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<V> {
    Value(V),
    Node(HashNode<V>),
}

impl<V> Slot<V> {
    /// Turns a leaf slot into an empty node of `shape` and returns the node.
    fn node_mut(&mut self, shape: Shape) -> &mut HashNode<V> {
        if let Self::Value(_) = self {
            *self = Self::Node(HashNode::new(shape));
        }
        match self {
            Self::Node(node) => node,
            Self::Value(_) => unreachable!("leaf slot was just replaced by a node"),
        }
    }
}

impl<V: Leaf> Slot<V> {
    pub fn to_plain(&self) -> V {
        match self {
            Self::Value(value) => value.clone(),
            Self::Node(node) => node.to_plain(),
        }
    }

    pub fn into_plain(self) -> V {
        match self {
            Self::Value(value) => value,
            Self::Node(node) => node.into_plain(),
        }
    }
}

// ============================================================================
// HASH NODE
// ============================================================================

/// An object- or array-shaped container.
#[derive(Debug, Clone, PartialEq)]
pub enum HashNode<V> {
    Object(IndexMap<String, Slot<V>>),
    Array(Vec<Slot<V>>),
}

impl<V> HashNode<V> {
    pub fn new(shape: Shape) -> Self {
        match shape {
            Shape::Object => Self::Object(IndexMap::new()),
            Shape::Array => Self::Array(Vec::new()),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Self::Object(_) => Shape::Object,
            Self::Array(_) => Shape::Array,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Object(map) => map.len(),
            Self::Array(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the slot addressed by `segment`.
    ///
    /// Missing keys, out-of-range indices and non-numeric segments on an
    /// array all read as `None`.
    pub fn get(&self, segment: &Segment) -> Option<&Slot<V>> {
        match self {
            Self::Object(map) => map.get(segment.key()),
            Self::Array(items) => segment.index().and_then(|index| items.get(index)),
        }
    }
}

impl<V: Leaf> HashNode<V> {
    /// Returns the slot for `segment`, inserting `make()` when absent.
    ///
    /// Arrays grow to reach the index; skipped indices hold `V::null()`.
    fn entry_mut(
        &mut self,
        segment: &Segment,
        path: &KeyPath,
        make: impl FnOnce() -> Slot<V>,
    ) -> HashResult<&mut Slot<V>> {
        match self {
            Self::Object(map) => Ok(map.entry(segment.key().to_owned()).or_insert_with(make)),
            Self::Array(items) => {
                let index = segment
                    .index()
                    .ok_or_else(|| HashError::not_an_index(path.as_str(), segment.key()))?;
                while items.len() < index {
                    items.push(Slot::Value(V::null()));
                }
                if index == items.len() {
                    items.push(make());
                }
                Ok(&mut items[index])
            }
        }
    }

    /// Stores `value` under `segment`, replacing whatever was there.
    pub(crate) fn put(&mut self, segment: &Segment, path: &KeyPath, value: V) -> HashResult<()> {
        let mut value = Some(value);
        let slot = self.entry_mut(segment, path, || {
            Slot::Value(value.take().unwrap_or_else(V::null))
        })?;
        if let Some(value) = value {
            *slot = Slot::Value(value);
        }
        Ok(())
    }

    /// Returns the child node under `segment`, creating an empty one of
    /// `shape` if the slot is missing or holds a leaf. An existing node is
    /// returned as is.
    pub(crate) fn child_mut(
        &mut self,
        segment: &Segment,
        path: &KeyPath,
        shape: Shape,
    ) -> HashResult<&mut HashNode<V>> {
        let slot = self.entry_mut(segment, path, || Slot::Node(HashNode::new(shape)))?;
        Ok(slot.node_mut(shape))
    }

    /// Recursively converts this node into a plain value.
    pub fn to_plain(&self) -> V {
        match self {
            Self::Object(map) => V::from_entries(
                map.iter()
                    .map(|(key, slot)| (key.clone(), slot.to_plain()))
                    .collect(),
            ),
            Self::Array(items) => V::from_items(items.iter().map(Slot::to_plain).collect()),
        }
    }

    pub fn into_plain(self) -> V {
        match self {
            Self::Object(map) => V::from_entries(
                map.into_iter()
                    .map(|(key, slot)| (key, slot.into_plain()))
                    .collect(),
            ),
            Self::Array(items) => V::from_items(items.into_iter().map(Slot::into_plain).collect()),
        }
    }
}
