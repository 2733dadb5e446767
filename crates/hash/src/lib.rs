//! # formulary-hash
//!
//! Turns flat `(key path, value)` pairs into nested objects and arrays.
//!
//! Form controls carry flat names such as `alpha.user.id` or
//! `alpha.tag[].0`. [`PathHashBuilder`] resolves those names into a tree of
//! [`HashNode`]s, sharing every common prefix, and [`PathHashBuilder::build`]
//! flattens the tree into a plain value ready to be sent as a request body
//! or a GraphQL variables object.
//!
//! ```rust
//! use formulary_hash::PathHashBuilder;
//! use serde_json::json;
//!
//! let mut builder: PathHashBuilder = PathHashBuilder::new();
//! builder.set_values([("list[].0", "x"), ("list[].1", "y")])?;
//! assert_eq!(builder.build(), json!({ "list": ["x", "y"] }));
//! # Ok::<(), formulary_hash::HashError>(())
//! ```
//!
//! See [`path`] for the key-path grammar.

mod builder;
mod error;
mod leaf;
mod node;
pub mod path;

pub use builder::{GapPolicy, MAX_ARRAY_LENGTH, PathHashBuilder, build_nested};
pub use error::{HashError, HashResult};
pub use leaf::Leaf;
pub use node::{HashNode, Shape, Slot};
pub use path::{KeyPath, MAX_PATH_SEGMENTS, Segment};
