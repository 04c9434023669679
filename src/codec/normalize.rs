//! Decode-time field normalization.
//!
//! After the document is parsed into a JSON tree and before typed decode, the
//! normalizer visits every registered marked field and replaces a missing or
//! null entry with the registered absent wire form for the field's value
//! type. Non-null entries are never touched. Nested registered records are
//! normalized in the same walk, so normalization composes through the whole
//! document in a single pass per decode.

use std::any::TypeId;
use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::fields::{FieldKind, FieldTable};
use super::registry::DefaultValueRegistry;

pub(crate) struct FieldNormalizer<'a> {
    registry: &'a DefaultValueRegistry,
    tables: &'a HashMap<TypeId, FieldTable>,
}

impl<'a> FieldNormalizer<'a> {
    pub(crate) fn new(
        registry: &'a DefaultValueRegistry,
        tables: &'a HashMap<TypeId, FieldTable>,
    ) -> Self {
        Self { registry, tables }
    }

    /// Fill absent marked fields of `doc`, assuming it decodes as `type_id`.
    pub(crate) fn normalize(&self, type_id: TypeId, doc: &mut Value) {
        let Some(table) = self.tables.get(&type_id) else {
            return;
        };
        let Value::Object(map) = doc else {
            return;
        };
        for spec in table.entries() {
            match spec.kind() {
                FieldKind::OptionalValue { value_type, .. } => {
                    let missing = matches!(map.get(spec.name()), None | Some(Value::Null));
                    if !missing {
                        continue;
                    }
                    // Pipeline build verified that every marked value type is
                    // registered, so the lookup cannot miss here.
                    if let Some(entry) = self.registry.find(*value_type) {
                        map.insert(spec.name().to_string(), entry.absent_wire().clone());
                        debug!(
                            record = table.record(),
                            field = spec.name(),
                            "filled missing field with absent value"
                        );
                    }
                }
                FieldKind::Nested { record } => {
                    if let Some(child) = map.get_mut(spec.name()) {
                        self.normalize(*record, child);
                    }
                }
                FieldKind::NestedList { record } => {
                    if let Some(Value::Array(items)) = map.get_mut(spec.name()) {
                        for item in items {
                            self.normalize(*record, item);
                        }
                    }
                }
            }
        }
    }
}
