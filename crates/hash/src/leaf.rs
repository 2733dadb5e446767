//! Plain value types a [`PathHashBuilder`](crate::PathHashBuilder) can
//! produce.

use formulary_value::FieldValue;

/// A plain value type that can hold leaves and the containers `build`
/// produces.
pub trait Leaf: Clone {
    /// Placeholder used for array slots skipped by a sparse write.
    fn null() -> Self;

    /// Assembles a plain object; entry order is insertion order.
    fn from_entries(entries: Vec<(String, Self)>) -> Self;

    /// Assembles a plain array.
    fn from_items(items: Vec<Self>) -> Self;
}

impl Leaf for serde_json::Value {
    fn null() -> Self {
        Self::Null
    }

    fn from_entries(entries: Vec<(String, Self)>) -> Self {
        Self::Object(entries.into_iter().collect())
    }

    fn from_items(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}

impl Leaf for FieldValue {
    fn null() -> Self {
        Self::Null
    }

    fn from_entries(entries: Vec<(String, Self)>) -> Self {
        Self::Object(entries.into_iter().collect())
    }

    fn from_items(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}
