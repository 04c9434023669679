//! Per-record field tables.
//!
//! A field table is the declarative marker for "this field holds an optional
//! domain value": instead of runtime reflection over annotations, each record
//! type registers a table naming its marked fields (and any nested records to
//! recurse into) when the pipeline is built. Tables are data, assembled once
//! and read-only afterwards.

use std::any::TypeId;

/// What the pipeline should do with one named field.
#[derive(Clone, Debug)]
pub(crate) enum FieldKind {
    /// The field holds an optional domain value of the given type; missing or
    /// null wire values become the registered absent instance.
    OptionalValue {
        value_type: TypeId,
        value_name: &'static str,
    },
    /// The field holds a nested record; recurse with that record's table.
    Nested { record: TypeId },
    /// The field holds a list of nested records.
    NestedList { record: TypeId },
}

/// One field declaration inside a [`FieldTable`].
#[derive(Clone, Debug)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
}

impl FieldSpec {
    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

/// Field declarations for one record type.
///
/// # Example
///
/// ```
/// use phonewire::{FieldTable, PhoneNumber};
///
/// struct ContactCard;
///
/// let table = FieldTable::for_record::<ContactCard>()
///     .optional_value::<PhoneNumber>("phone_number");
/// assert_eq!(table.record(), "ContactCard");
/// ```
#[derive(Debug)]
pub struct FieldTable {
    record: &'static str,
    type_id: TypeId,
    entries: Vec<FieldSpec>,
}

impl FieldTable {
    /// Start a table for record type `T`.
    pub fn for_record<T: 'static>() -> Self {
        Self {
            record: crate::codec::short_type_name::<T>(),
            type_id: TypeId::of::<T>(),
            entries: Vec::new(),
        }
    }

    /// Splice a base record's entries ahead of this table's own entries.
    ///
    /// Mirrors ordinary field resolution for embedded/flattened base records:
    /// base fields are processed before the declaring type's fields, no
    /// matter when `inherit` is called.
    pub fn inherit(mut self, base: &FieldTable) -> Self {
        let mut entries = base.entries.clone();
        entries.append(&mut self.entries);
        self.entries = entries;
        self
    }

    /// Declare `name` as an optional-domain-value field of type `V`.
    pub fn optional_value<V: 'static>(mut self, name: &'static str) -> Self {
        self.entries.push(FieldSpec {
            name,
            kind: FieldKind::OptionalValue {
                value_type: TypeId::of::<V>(),
                value_name: crate::codec::short_type_name::<V>(),
            },
        });
        self
    }

    /// Declare `name` as a nested record of type `R`.
    pub fn nested<R: 'static>(mut self, name: &'static str) -> Self {
        self.entries.push(FieldSpec {
            name,
            kind: FieldKind::Nested {
                record: TypeId::of::<R>(),
            },
        });
        self
    }

    /// Declare `name` as a list of nested records of type `R`.
    pub fn nested_list<R: 'static>(mut self, name: &'static str) -> Self {
        self.entries.push(FieldSpec {
            name,
            kind: FieldKind::NestedList {
                record: TypeId::of::<R>(),
            },
        });
        self
    }

    /// Type name of the record this table describes.
    pub fn record(&self) -> &'static str {
        self.record
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn entries(&self) -> &[FieldSpec] {
        &self.entries
    }
}
