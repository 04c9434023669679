//! Default-value registry.
//!
//! Maps a value type's identity to the zero-argument factory producing its
//! canonical absent instance. Built once through [`DefaultValueRegistryBuilder`]
//! while the pipeline is assembled, then frozen into an immutable snapshot;
//! nothing mutates it afterwards, so a pipeline can be shared across threads.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use super::wire::WireScalar;
use crate::error::WireResult;

type Factory = Box<dyn Fn() -> Value + Send + Sync>;
type ScalarCheck = Box<dyn Fn(&Value) -> WireResult<()> + Send + Sync>;

/// Frozen registry entry for one value type.
pub(crate) struct DefaultEntry {
    type_name: &'static str,
    absent_wire: Value,
    check: ScalarCheck,
}

impl DefaultEntry {
    /// Wire form of the canonical absent instance, precomputed at freeze.
    pub(crate) fn absent_wire(&self) -> &Value {
        &self.absent_wire
    }

    /// Strict scalar check against the value type's wire codec.
    pub(crate) fn check(&self, value: &Value) -> WireResult<()> {
        (self.check)(value)
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Immutable lookup table from value-type identity to absent defaults.
pub struct DefaultValueRegistry {
    entries: HashMap<TypeId, DefaultEntry>,
}

impl DefaultValueRegistry {
    /// Start collecting registrations.
    pub fn builder() -> DefaultValueRegistryBuilder {
        DefaultValueRegistryBuilder {
            pending: HashMap::new(),
        }
    }

    pub(crate) fn find(&self, type_id: TypeId) -> Option<&DefaultEntry> {
        self.entries.get(&type_id)
    }

    /// Whether a default is registered for `V`.
    pub fn contains<V: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<V>())
    }
}

impl fmt::Debug for DefaultValueRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.entries.values().map(DefaultEntry::type_name))
            .finish()
    }
}

struct Pending {
    type_name: &'static str,
    factory: Factory,
    check: ScalarCheck,
}

/// Single-writer builder phase of the registry.
pub struct DefaultValueRegistryBuilder {
    pending: HashMap<TypeId, Pending>,
}

impl DefaultValueRegistryBuilder {
    /// Register the absent-value factory for `V`.
    ///
    /// Registering the same type again replaces the earlier factory. The
    /// factory runs once, at [`DefaultValueRegistryBuilder::build`], to
    /// precompute the absent wire form.
    pub fn register<V, F>(mut self, factory: F) -> Self
    where
        V: WireScalar + 'static,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.pending.insert(
            TypeId::of::<V>(),
            Pending {
                type_name: crate::codec::short_type_name::<V>(),
                factory: Box::new(move || factory().to_wire()),
                check: Box::new(|value| V::from_wire(value).map(|_| ())),
            },
        );
        self
    }

    /// Freeze into an immutable snapshot.
    pub fn build(self) -> DefaultValueRegistry {
        let entries = self
            .pending
            .into_iter()
            .map(|(type_id, pending)| {
                let absent_wire = (pending.factory)();
                (
                    type_id,
                    DefaultEntry {
                        type_name: pending.type_name,
                        absent_wire,
                        check: pending.check,
                    },
                )
            })
            .collect();
        DefaultValueRegistry { entries }
    }
}
