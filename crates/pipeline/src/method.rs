//! Method registry: a method key maps to the strategy that assembles its
//! payload.
//!
//! | key | strategy | request |
//! |-----|----------|---------|
//! | `GET`, `DELETE` | [`QueryStrategy`] | flat values as query string |
//! | `POST`, `PUT`, `PATCH` | [`JsonBodyStrategy`] | nested values as JSON body |
//! | `GRAPHQL` | [`GraphQlStrategy`] | `POST` of `{ query, variables }` |
//!
//! Registries are plain values. Build one per pipeline (or per test); there
//! is no process-wide instance.

use crate::error::{PipelineError, PipelineResult};
use crate::payload::{Method, Payload};
use formulary_value::{FieldValue, ValueHash};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Inputs available to a strategy.
#[derive(Debug, Clone, Copy)]
pub struct PayloadInput<'a> {
    pub endpoint: &'a str,
    /// Flat field name -> value map.
    pub values: &'a ValueHash,
    /// The same values nested by key path.
    pub nested: &'a serde_json::Value,
}

/// Turns extracted values into a [`Payload`].
pub trait PayloadStrategy: fmt::Debug + Send + Sync {
    /// HTTP method of the assembled request.
    fn method(&self) -> Method;

    fn assemble(&self, input: PayloadInput<'_>) -> PipelineResult<Payload>;
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Flat values as an `application/x-www-form-urlencoded` query.
///
/// Sequences repeat their key; nulls, files and objects are left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryStrategy {
    method: Method,
}

impl QueryStrategy {
    pub fn new(method: Method) -> Self {
        Self { method }
    }
}

impl PayloadStrategy for QueryStrategy {
    fn method(&self) -> Method {
        self.method
    }

    fn assemble(&self, input: PayloadInput<'_>) -> PipelineResult<Payload> {
        let query = encode_query(input.values);
        let payload = Payload::new(self.method, input.endpoint);
        Ok(if query.is_empty() {
            payload
        } else {
            payload.with_query(query)
        })
    }
}

/// Encodes a flat value hash as a query string.
///
/// ```rust
/// use formulary_pipeline::encode_query;
/// use formulary_value::{FieldValue, ValueHash};
///
/// let mut values = ValueHash::new();
/// values.insert("q".into(), FieldValue::from("a b"));
/// values.insert("tag".into(), FieldValue::Array(vec!["x".into(), "y".into()]));
/// values.insert("page".into(), FieldValue::from(2.0));
/// values.insert("empty".into(), FieldValue::Null);
///
/// assert_eq!(encode_query(&values), "q=a+b&tag=x&tag=y&page=2");
/// ```
pub fn encode_query(values: &ValueHash) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in values {
        match value {
            FieldValue::Array(items) => {
                for item in items {
                    if let Some(scalar) = item.to_scalar_string() {
                        serializer.append_pair(key, &scalar);
                    }
                }
            }
            other => {
                if let Some(scalar) = other.to_scalar_string() {
                    serializer.append_pair(key, &scalar);
                }
            }
        }
    }
    serializer.finish()
}

/// Nested values as a JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonBodyStrategy {
    method: Method,
}

impl JsonBodyStrategy {
    pub fn new(method: Method) -> Self {
        Self { method }
    }
}

impl PayloadStrategy for JsonBodyStrategy {
    fn method(&self) -> Method {
        self.method
    }

    fn assemble(&self, input: PayloadInput<'_>) -> PipelineResult<Payload> {
        Ok(Payload::new(self.method, input.endpoint).with_body(input.nested.clone()))
    }
}

/// A GraphQL operation with the nested values as its variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQlStrategy {
    document: String,
    operation_name: Option<String>,
}

impl GraphQlStrategy {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            operation_name: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    pub fn document(&self) -> &str {
        &self.document
    }
}

impl PayloadStrategy for GraphQlStrategy {
    fn method(&self) -> Method {
        Method::Post
    }

    fn assemble(&self, input: PayloadInput<'_>) -> PipelineResult<Payload> {
        let mut body = serde_json::Map::new();
        body.insert("query".to_owned(), self.document.clone().into());
        body.insert("variables".to_owned(), input.nested.clone());
        if let Some(name) = &self.operation_name {
            body.insert("operationName".to_owned(), name.clone().into());
        }
        Ok(Payload::new(Method::Post, input.endpoint).with_body(body.into()))
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Method key -> strategy. Keys are case-insensitive.
///
/// ```rust
/// use formulary_pipeline::{Method, MethodRegistry, PayloadStrategy};
///
/// let registry = MethodRegistry::standard();
/// assert_eq!(registry.get("get")?.method(), Method::Get);
/// assert!(registry.get("GRAPHQL").is_err());
/// # Ok::<(), formulary_pipeline::PipelineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    strategies: IndexMap<String, Arc<dyn PayloadStrategy>>,
}

impl MethodRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// `GET`, `DELETE`, `POST`, `PUT` and `PATCH`. `GRAPHQL` needs a
    /// document and is registered separately.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for method in [Method::Get, Method::Delete] {
            registry.register(method.as_str(), QueryStrategy::new(method));
        }
        for method in [Method::Post, Method::Put, Method::Patch] {
            registry.register(method.as_str(), JsonBodyStrategy::new(method));
        }
        registry
    }

    /// Registers `strategy` under `key`, returning the one it replaces.
    pub fn register(
        &mut self,
        key: &str,
        strategy: impl PayloadStrategy + 'static,
    ) -> Option<Arc<dyn PayloadStrategy>> {
        self.strategies.insert(normalize(key), Arc::new(strategy))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, key: &str, strategy: impl PayloadStrategy + 'static) -> Self {
        self.register(key, strategy);
        self
    }

    pub fn get(&self, key: &str) -> PipelineResult<&dyn PayloadStrategy> {
        self.strategies
            .get(&normalize(key))
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| PipelineError::UnknownMethod(key.to_owned()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.strategies.contains_key(&normalize(key))
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strategies.keys().map(String::as_str)
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}
