//! [`FormPipeline`]: form snapshot in, validated payload (or rejection) out.

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::method::{GraphQlStrategy, MethodRegistry, PayloadInput, PayloadStrategy};
use crate::payload::Payload;
use formulary_form::{Form, extract_value_hash};
use formulary_hash::{GapPolicy, HashResult, PathHashBuilder};
use formulary_log::LoggerGuard;
use formulary_validator::{FieldRule, ValidationResult, Validator};
use formulary_value::ValueHash;
use serde::Serialize;
use tracing::debug;

/// Registry key of the GraphQL strategy built from [`PipelineConfig::graphql`].
pub const GRAPHQL: &str = "GRAPHQL";

/// Outcome of [`FormPipeline::prepare`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Submission {
    /// Every rule passed; send this.
    Ready(Payload),
    /// At least one field failed; nothing should be sent.
    Rejected(ValidationResult),
}

impl Submission {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Ready(payload) => Some(payload),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&ValidationResult> {
        match self {
            Self::Ready(_) => None,
            Self::Rejected(result) => Some(result),
        }
    }
}

/// Extraction, validation, nesting and payload assembly in one place.
///
/// # Examples
///
/// ```rust
/// use formulary_form::{Element, Form};
/// use formulary_pipeline::{FormPipeline, PipelineConfig, Submission};
/// use serde_json::json;
///
/// let config = PipelineConfig::from_toml_str(r#"
///     endpoint = "/users"
///
///     [[rules]]
///     field = "user.name"
///     check = "required"
///     message = "Name is required"
/// "#)?;
/// let pipeline = FormPipeline::new(config)?;
///
/// let form = Form::new()
///     .with_element(Element::input("text").with_name("user.name").with_value("Bob"))
///     .with_element(Element::input("number").with_name("user.age").with_value("42"));
///
/// let Submission::Ready(payload) = pipeline.prepare(&form)? else { panic!("rejected") };
/// assert_eq!(payload.body, Some(json!({ "user": { "name": "Bob", "age": 42 } })));
/// # Ok::<(), formulary_pipeline::PipelineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FormPipeline {
    config: PipelineConfig,
    validator: Validator,
    registry: MethodRegistry,
}

impl FormPipeline {
    /// Builds the validator from the configured rules and a standard
    /// registry, plus the GraphQL strategy when one is configured.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        let validator = config.validator()?;
        let mut registry = MethodRegistry::standard();
        if let Some(graphql) = &config.graphql {
            let mut strategy = GraphQlStrategy::new(graphql.document.as_str());
            if let Some(name) = &graphql.operation_name {
                strategy = strategy.with_operation_name(name.as_str());
            }
            registry.register(GRAPHQL, strategy);
        }

        debug!(
            rules = validator.rules().len(),
            methods = registry.keys().count(),
            "pipeline ready"
        );
        Ok(Self {
            config,
            validator,
            registry,
        })
    }

    /// Adds a rule after the configured ones, typically a closure that
    /// configuration cannot express.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.validator.push(rule);
        self
    }

    /// Registers a custom strategy under `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_strategy(mut self, key: &str, strategy: impl PayloadStrategy + 'static) -> Self {
        self.registry.register(key, strategy);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Installs the configured global subscriber.
    pub fn init_logging(&self) -> PipelineResult<LoggerGuard> {
        Ok(formulary_log::init_with(self.config.log.clone())?)
    }

    /// Flat value hash and its validation result.
    pub fn validate(&self, form: &Form) -> PipelineResult<(ValueHash, ValidationResult)> {
        let values = extract_value_hash(form);
        let result = self.validator.generate_validation_hash(&values)?;
        Ok((values, result))
    }

    /// Nests a flat value hash by key path under the configured limits.
    pub fn nest(&self, values: &ValueHash) -> PipelineResult<serde_json::Value> {
        let mut builder: PathHashBuilder = PathHashBuilder::new()
            .with_gap_policy(self.config.gap_policy)
            .with_max_segments(self.config.max_path_segments)
            .with_max_array_length(self.config.max_array_length);
        builder.set_values(values)?;
        Ok(builder.into_value())
    }

    /// Runs the whole pipeline on a form snapshot.
    ///
    /// The form's own `method` and `action` win over the configured
    /// defaults.
    pub fn prepare(&self, form: &Form) -> PipelineResult<Submission> {
        let method = non_empty(form.method.as_deref()).unwrap_or(self.config.method.as_str());
        let endpoint = non_empty(form.action.as_deref()).unwrap_or(self.config.endpoint.as_str());

        let (values, result) = self.validate(form)?;
        if result.is_invalid() {
            debug!(
                invalid = ?result.invalid_fields().collect::<Vec<_>>(),
                "submission rejected"
            );
            return Ok(Submission::Rejected(result));
        }

        let payload = self.assemble(method, endpoint, &values)?;
        debug!(method, endpoint, "submission ready");
        Ok(Submission::Ready(payload))
    }

    /// Parses a JSON form snapshot and runs [`prepare`](Self::prepare) on it.
    pub fn prepare_json(&self, snapshot: &str) -> PipelineResult<Submission> {
        let form = Form::from_json(snapshot)?;
        self.prepare(&form)
    }

    /// Assembles a payload for already validated values.
    pub fn assemble(&self, method: &str, endpoint: &str, values: &ValueHash) -> PipelineResult<Payload> {
        let strategy = self.registry.get(method)?;
        let nested = self.nest(values)?;
        strategy.assemble(PayloadInput {
            endpoint,
            values,
            nested: &nested,
        })
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Nests `(path, value)` pairs into a JSON value with the given gap policy.
///
/// ```rust
/// use formulary_hash::GapPolicy;
/// use formulary_pipeline::build_nested_payload;
/// use serde_json::json;
///
/// let payload = build_nested_payload(
///     [("alpha.user.id", "1"), ("alpha.user.name", "Bob")],
///     GapPolicy::Fill,
/// )?;
/// assert_eq!(payload, json!({ "alpha": { "user": { "id": "1", "name": "Bob" } } }));
/// # Ok::<(), formulary_hash::HashError>(())
/// ```
pub fn build_nested_payload<I, P, T>(pairs: I, gap_policy: GapPolicy) -> HashResult<serde_json::Value>
where
    I: IntoIterator<Item = (P, T)>,
    P: AsRef<str>,
    T: Into<serde_json::Value>,
{
    let mut builder: PathHashBuilder = PathHashBuilder::new().with_gap_policy(gap_policy);
    builder.set_values(pairs)?;
    Ok(builder.into_value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::payload::Method;
    use formulary_form::Element;
    use formulary_hash::HashError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pipeline(toml: &str) -> FormPipeline {
        FormPipeline::new(PipelineConfig::from_toml_str(toml).unwrap()).unwrap()
    }

    #[test]
    fn form_method_and_action_win() {
        let pipeline = pipeline(r#"endpoint = "/default""#);
        let form = Form::new()
            .with_method("get")
            .with_action("/search")
            .with_element(Element::input("search").with_name("q").with_value("rust"));

        let submission = pipeline.prepare(&form).unwrap();
        let payload = submission.payload().unwrap();
        assert_eq!(payload.method, Method::Get);
        assert_eq!(payload.target(), "/search?q=rust");
    }

    #[test]
    fn defaults_apply_without_form_attributes() {
        let pipeline = pipeline(r#"endpoint = "/default""#);
        let form = Form::new().with_element(Element::input("text").with_name("a").with_value("1"));

        let payload = pipeline.prepare(&form).unwrap().payload().cloned().unwrap();
        assert_eq!(payload.method, Method::Post);
        assert_eq!(payload.endpoint, "/default");
        assert_eq!(payload.body, Some(json!({ "a": "1" })));
    }

    #[test]
    fn prepare_json_parses_the_snapshot() {
        let pipeline = pipeline(r#"endpoint = "/users""#);
        let snapshot = r#"{ "elements": [
            { "tag": "input", "type": "text", "name": "user.name", "value": "Ann" }
        ] }"#;

        let payload = pipeline.prepare_json(snapshot).unwrap().payload().cloned().unwrap();
        assert_eq!(payload.body, Some(json!({ "user": { "name": "Ann" } })));

        assert!(matches!(
            pipeline.prepare_json("{ not json"),
            Err(PipelineError::Form(_))
        ));
    }

    #[test]
    fn unknown_method_is_an_error() {
        let pipeline = pipeline(r#"method = "TELEPORT""#);
        let form = Form::new().with_element(Element::input("text").with_name("a"));
        assert!(matches!(
            pipeline.prepare(&form),
            Err(PipelineError::UnknownMethod(m)) if m == "TELEPORT"
        ));
    }

    #[test]
    fn graphql_is_registered_from_config() {
        let pipeline = pipeline(
            r#"
            method = "graphql"
            [graphql]
            document = "mutation($user: UserInput) { save(user: $user) }"
            "#,
        );
        assert!(pipeline.registry().contains(GRAPHQL));

        let form = Form::new()
            .with_element(Element::input("text").with_name("user.name").with_value("Ann"));
        let payload = pipeline.prepare(&form).unwrap().payload().cloned().unwrap();
        assert_eq!(payload.method, Method::Post);
        assert_eq!(payload.body.unwrap()["variables"], json!({ "user": { "name": "Ann" } }));
    }

    #[test]
    fn rejected_submission_carries_result() {
        let pipeline = pipeline(
            r#"
            [[rules]]
            field = "a"
            check = "required"
            message = "required"
            "#,
        );
        let form = Form::new().with_element(Element::input("text").with_name("a"));

        let submission = pipeline.prepare(&form).unwrap();
        assert!(!submission.is_ready());
        assert_eq!(submission.rejection().unwrap().messages("a"), ["required"]);
    }

    #[test]
    fn gap_policy_reaches_the_builder() {
        let pipeline = pipeline(r#"gap_policy = "reject""#);
        let mut values = ValueHash::new();
        values.insert("list[].2".into(), "x".into());

        assert!(matches!(
            pipeline.nest(&values),
            Err(PipelineError::Hash(HashError::IndexGap { .. }))
        ));
        let filled = build_nested_payload(&values, GapPolicy::Fill).unwrap();
        assert_eq!(filled, json!({ "list": [null, null, "x"] }));
    }

    #[test]
    fn max_segments_reaches_the_builder() {
        let pipeline = pipeline("max_path_segments = 2");
        let mut values = ValueHash::new();
        values.insert("a.b.c".into(), "x".into());
        assert!(matches!(
            pipeline.nest(&values),
            Err(PipelineError::Hash(HashError::TooManySegments { .. }))
        ));
    }

    #[test]
    fn array_limit_reaches_the_builder() {
        let pipeline = pipeline("max_array_length = 4");
        let form = Form::new()
            .with_element(Element::input("text").with_name("list[].3").with_value("ok"))
            .with_element(Element::input("text").with_name("list[].4").with_value("x"));

        assert!(matches!(
            pipeline.prepare(&form),
            Err(PipelineError::Hash(HashError::ArrayTooLong { index: 4, max: 4, .. }))
        ));
    }

    #[test]
    fn submission_serializes_with_status() {
        let rejected = Submission::Rejected(ValidationResult::new());
        assert_eq!(
            serde_json::to_value(&rejected).unwrap()["status"],
            json!("rejected")
        );
    }
}
