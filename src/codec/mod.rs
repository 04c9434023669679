//! JSON codec pipeline for optional domain values.
//!
//! The pieces compose in a fixed order (field normalization, then the value
//! codec, then validation) and [`pipeline::JsonPipeline`] is the one place
//! that order lives. See the module docs of [`pipeline`] for the stage
//! contract.

pub mod fields;
mod normalize;
pub mod pipeline;
pub mod registry;
pub mod validate;
pub mod wire;

pub use fields::{FieldSpec, FieldTable};
pub use pipeline::{JsonPipeline, JsonPipelineBuilder};
pub use registry::{DefaultValueRegistry, DefaultValueRegistryBuilder};
pub use validate::{require, require_non_blank, Validate};
pub use wire::WireScalar;

/// Last path segment of a type name, for error messages and logs.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
