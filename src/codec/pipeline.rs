//! The JSON codec pipeline.
//!
//! Decode runs its stages in a fixed, load-bearing order:
//!
//! 1. parse the text into a JSON tree (generic decode),
//! 2. field normalization: missing/null marked fields become the registered
//!    absent wire form,
//! 3. value-codec stage: marked scalars are strict-checked (or, in lenient
//!    mode, downgraded to absent),
//! 4. typed decode through serde,
//! 5. validation.
//!
//! Normalization must precede any stage that assumes marked fields are never
//! null, and validation must follow both; the pipeline owns that ordering so
//! callers cannot get it wrong. Encoding validates first and then serializes.
//!
//! A built pipeline is immutable and safe to share across threads; every
//! operation is pure computation over in-memory values.

use std::any::TypeId;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::fields::{FieldKind, FieldTable};
use super::normalize::FieldNormalizer;
use super::registry::{DefaultValueRegistry, DefaultValueRegistryBuilder};
use super::validate::Validate;
use super::wire::WireScalar;
use crate::error::{ConfigError, ConfigResult, WireError, WireResult};

/// Frozen decode/encode engine.
///
/// # Example
///
/// ```
/// use phonewire::{JsonPipeline, PhoneNumber};
///
/// let pipeline = JsonPipeline::builder()
///     .register_default(PhoneNumber::absent)
///     .build()
///     .unwrap();
///
/// let phones: Vec<PhoneNumber> = pipeline.decode(r#"[null, "+36301234567"]"#).unwrap();
/// assert!(phones[0].is_absent());
/// assert!(phones[1].is_present());
/// ```
#[derive(Debug)]
pub struct JsonPipeline {
    registry: DefaultValueRegistry,
    tables: HashMap<TypeId, FieldTable>,
    lenient_scalars: bool,
}

impl JsonPipeline {
    /// Start assembling a pipeline.
    pub fn builder() -> JsonPipelineBuilder {
        JsonPipelineBuilder {
            registry: DefaultValueRegistry::builder(),
            tables: Vec::new(),
            lenient_scalars: false,
        }
    }

    /// Decode a JSON document into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] for malformed JSON, strict scalar failures, and
    /// validation failures, in that stage order.
    pub fn decode<T>(&self, json: &str) -> WireResult<T>
    where
        T: DeserializeOwned + Validate + 'static,
    {
        let doc: Value = serde_json::from_str(json)?;
        self.decode_value(doc)
    }

    /// Decode an already-parsed JSON tree into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`JsonPipeline::decode`], minus the JSON parse stage.
    pub fn decode_value<T>(&self, mut doc: Value) -> WireResult<T>
    where
        T: DeserializeOwned + Validate + 'static,
    {
        let type_id = TypeId::of::<T>();
        FieldNormalizer::new(&self.registry, &self.tables).normalize(type_id, &mut doc);
        self.check_scalars(type_id, &mut doc)?;
        let value: T = serde_json::from_value(doc)?;
        value.validate()?;
        Ok(value)
    }

    /// Encode `value` as a JSON string, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Validation`] when the value violates an
    /// invariant; serialization itself does not fail for pipeline types.
    pub fn encode<T>(&self, value: &T) -> WireResult<String>
    where
        T: Serialize + Validate,
    {
        value.validate()?;
        Ok(serde_json::to_string(value)?)
    }

    /// Encode `value` as a JSON tree, validating it first.
    ///
    /// # Errors
    ///
    /// Same as [`JsonPipeline::encode`].
    pub fn encode_value<T>(&self, value: &T) -> WireResult<Value>
    where
        T: Serialize + Validate,
    {
        value.validate()?;
        Ok(serde_json::to_value(value)?)
    }

    /// Strict-check every marked scalar reachable from `doc`.
    ///
    /// In lenient mode a failing scalar is replaced with the absent wire form
    /// instead of failing the record; the original text is dropped in that
    /// path, unlike [`crate::PhoneNumber::raw`].
    fn check_scalars(&self, type_id: TypeId, doc: &mut Value) -> WireResult<()> {
        let Some(table) = self.tables.get(&type_id) else {
            return Ok(());
        };
        let Value::Object(map) = doc else {
            return Ok(());
        };
        for spec in table.entries() {
            match spec.kind() {
                FieldKind::OptionalValue { value_type, .. } => {
                    // Normalization has already run, so the key exists.
                    let Some(value) = map.get(spec.name()) else {
                        continue;
                    };
                    let Some(entry) = self.registry.find(*value_type) else {
                        continue;
                    };
                    if let Err(err) = entry.check(value) {
                        if self.lenient_scalars {
                            warn!(
                                record = table.record(),
                                field = spec.name(),
                                error = %err,
                                "downgrading unparseable scalar to absent"
                            );
                            map.insert(spec.name().to_string(), entry.absent_wire().clone());
                        } else {
                            return Err(WireError::Field {
                                record: table.record(),
                                field: spec.name(),
                                source: Box::new(err),
                            });
                        }
                    }
                }
                FieldKind::Nested { record } => {
                    if let Some(child) = map.get_mut(spec.name()) {
                        self.check_scalars(*record, child)?;
                    }
                }
                FieldKind::NestedList { record } => {
                    if let Some(Value::Array(items)) = map.get_mut(spec.name()) {
                        for item in items {
                            self.check_scalars(*record, item)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Collects registrations, then freezes them into a [`JsonPipeline`].
pub struct JsonPipelineBuilder {
    registry: DefaultValueRegistryBuilder,
    tables: Vec<FieldTable>,
    lenient_scalars: bool,
}

impl JsonPipelineBuilder {
    /// Register the absent-value factory for value type `V`.
    pub fn register_default<V, F>(mut self, factory: F) -> Self
    where
        V: WireScalar + 'static,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.registry = self.registry.register(factory);
        self
    }

    /// Register the field table of a record type.
    pub fn register_record(mut self, table: FieldTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Downgrade unparseable marked scalars to absent instead of failing the
    /// record.
    ///
    /// The downgrade happens on the wire tree, so the offending raw text is
    /// *not* retained the way [`crate::PhoneNumber::raw`] retains it; each
    /// downgrade is logged at `warn`. Off by default: the wire contract is
    /// strict, and leniency is an explicit embedder choice.
    pub fn lenient_scalars(mut self, lenient: bool) -> Self {
        self.lenient_scalars = lenient;
        self
    }

    /// Freeze the pipeline, verifying its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a record table is registered twice or a
    /// marked field's value type has no registered default. These are
    /// deploy-time bugs, reported here rather than per decoded record.
    pub fn build(self) -> ConfigResult<JsonPipeline> {
        let registry = self.registry.build();
        let mut tables: HashMap<TypeId, FieldTable> = HashMap::new();
        for table in self.tables {
            let record = table.record();
            if tables.insert(table.type_id(), table).is_some() {
                return Err(ConfigError::DuplicateTable { record });
            }
        }
        for table in tables.values() {
            for spec in table.entries() {
                if let FieldKind::OptionalValue {
                    value_type,
                    value_name,
                } = spec.kind()
                {
                    if registry.find(*value_type).is_none() {
                        return Err(ConfigError::MissingDefault {
                            record: table.record(),
                            field: spec.name(),
                            value_type: *value_name,
                        });
                    }
                }
            }
        }
        debug!(
            tables = tables.len(),
            lenient = self.lenient_scalars,
            "codec pipeline frozen"
        );
        Ok(JsonPipeline {
            registry,
            tables,
            lenient_scalars: self.lenient_scalars,
        })
    }
}
