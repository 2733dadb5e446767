//! Finished request payloads.

use crate::error::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// HTTP method of an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(PipelineError::UnknownMethod(s.to_owned())),
        }
    }
}

/// A request ready to hand to a transport: method, endpoint, and either a
/// query string or a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub method: Method,
    pub endpoint: String,

    /// URL-encoded query, without the leading `?`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl Payload {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: None,
            body: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Endpoint with the query appended, as a string. Relative endpoints
    /// stay relative.
    pub fn target(&self) -> String {
        match self.query.as_deref() {
            None | Some("") => self.endpoint.clone(),
            Some(query) => {
                let separator = if self.endpoint.contains('?') { '&' } else { '?' };
                format!("{}{separator}{query}", self.endpoint)
            }
        }
    }

    /// Resolves the endpoint against `base` and attaches the query.
    ///
    /// A query already present on the endpoint is kept and extended.
    pub fn resolve(&self, base: &Url) -> PipelineResult<Url> {
        let mut url = base.join(&self.endpoint)?;
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            let joined = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{existing}&{query}"),
                _ => query.to_owned(),
            };
            url.set_query(Some(&joined));
        }
        Ok(url)
    }

    /// Serialized body, if any.
    pub fn body_string(&self) -> Option<String> {
        self.body.as_ref().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("get", Method::Get)]
    #[case(" Post ", Method::Post)]
    #[case("PATCH", Method::Patch)]
    fn parses_methods(#[case] raw: &str, #[case] expected: Method) {
        assert_eq!(raw.parse::<Method>().unwrap(), expected);
    }

    #[test]
    fn unknown_method() {
        assert!(matches!(
            "TRACE".parse::<Method>(),
            Err(PipelineError::UnknownMethod(m)) if m == "TRACE"
        ));
    }

    #[test]
    fn target_appends_query() {
        let payload = Payload::new(Method::Get, "/search").with_query("q=a+b");
        assert_eq!(payload.target(), "/search?q=a+b");

        let payload = Payload::new(Method::Get, "/search?page=2").with_query("q=x");
        assert_eq!(payload.target(), "/search?page=2&q=x");

        assert_eq!(Payload::new(Method::Post, "/x").target(), "/x");
    }

    #[test]
    fn resolves_against_base() {
        let base = Url::parse("https://example.com/app/").unwrap();
        let payload = Payload::new(Method::Get, "search?page=2").with_query("q=x");
        assert_eq!(
            payload.resolve(&base).unwrap().as_str(),
            "https://example.com/app/search?page=2&q=x"
        );
    }

    #[test]
    fn serializes_without_empty_parts() {
        let payload = Payload::new(Method::Post, "/x").with_body(serde_json::json!({ "a": 1 }));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({ "method": "POST", "endpoint": "/x", "body": { "a": 1 } })
        );
        assert_eq!(payload.body_string().as_deref(), Some(r#"{"a":1}"#));
    }
}
