//! # formulary-pipeline
//!
//! Turns a form snapshot into a request payload:
//!
//! 1. extract one value per named control (`formulary-form`),
//! 2. validate the flat value hash (`formulary-validator`),
//! 3. on success nest the values by key path (`formulary-hash`),
//! 4. assemble the request through the strategy registered for the form's
//!    method ([`MethodRegistry`]).
//!
//! A failed validation yields [`Submission::Rejected`] and no payload.
//! Sending the payload is left to the caller's transport.

mod config;
mod error;
mod method;
mod payload;
mod pipeline;

pub use config::{GraphQlConfig, PipelineConfig};
pub use error::{PipelineError, PipelineResult};
pub use method::{
    GraphQlStrategy, JsonBodyStrategy, MethodRegistry, PayloadInput, PayloadStrategy,
    QueryStrategy, encode_query,
};
pub use payload::{Method, Payload};
pub use pipeline::{FormPipeline, GRAPHQL, Submission, build_nested_payload};
