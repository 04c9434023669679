//! Shared record fixtures for the pipeline tests.
#![allow(dead_code)]

use phonewire::codec::{require, require_non_blank};
use phonewire::{FieldTable, JsonPipeline, PhoneNumber, Validate, ValidationError};
use serde::{Deserialize, Serialize};

/// Typical API payload with one marked phone field; absent encodes by
/// omitting the field, mirroring APIs that drop null members.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ContactCard {
    pub name: String,
    #[serde(skip_serializing_if = "PhoneNumber::has_empty_raw")]
    pub phone_number: PhoneNumber,
}

impl ContactCard {
    pub fn new(name: &str, phone_number: PhoneNumber) -> Self {
        Self {
            name: name.to_string(),
            phone_number,
        }
    }
}

impl Validate for ContactCard {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.name, "name")?;
        require(!self.phone_number.has_absent_raw(), "phone number invalid")
    }
}

/// Same payload, but absent phones stay on the wire as explicit nulls.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ContactCardWithNulls {
    pub name: String,
    pub phone_number: PhoneNumber,
}

impl Validate for ContactCardWithNulls {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.name, "name")
    }
}

/// Base record embedded into [`CustomerRecord`]; carries its own marked field.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PartyBase {
    pub reference: String,
    pub fax_number: PhoneNumber,
}

/// Record with an embedded base, exercising ancestor-first table ordering.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomerRecord {
    #[serde(flatten)]
    pub base: PartyBase,
    pub phone_number: PhoneNumber,
}

impl Validate for CustomerRecord {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.base.reference, "reference")
    }
}

/// Record with a nested marked record and a list of them.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Roster {
    pub team: String,
    pub captain: ContactCard,
    pub members: Vec<ContactCard>,
}

impl Validate for Roster {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.team, "team")?;
        self.captain.validate()?;
        self.members.validate()
    }
}

pub fn contact_card_table() -> FieldTable {
    FieldTable::for_record::<ContactCard>().optional_value::<PhoneNumber>("phone_number")
}

pub fn contact_card_with_nulls_table() -> FieldTable {
    FieldTable::for_record::<ContactCardWithNulls>().optional_value::<PhoneNumber>("phone_number")
}

pub fn party_base_table() -> FieldTable {
    FieldTable::for_record::<PartyBase>().optional_value::<PhoneNumber>("fax_number")
}

pub fn customer_record_table() -> FieldTable {
    FieldTable::for_record::<CustomerRecord>()
        .optional_value::<PhoneNumber>("phone_number")
        .inherit(&party_base_table())
}

pub fn roster_table() -> FieldTable {
    FieldTable::for_record::<Roster>()
        .nested::<ContactCard>("captain")
        .nested_list::<ContactCard>("members")
}

/// Route pipeline logs to the test writer; honors `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The pipeline all fixtures share: phone defaults plus every record table.
pub fn pipeline() -> JsonPipeline {
    pipeline_builder().build().expect("fixture pipeline builds")
}

pub fn pipeline_builder() -> phonewire::JsonPipelineBuilder {
    JsonPipeline::builder()
        .register_default(PhoneNumber::absent)
        .register_record(contact_card_table())
        .register_record(contact_card_with_nulls_table())
        .register_record(customer_record_table())
        .register_record(roster_table())
}
