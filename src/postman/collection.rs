use crate::constants::{GENERATED_COLLECTION_DESCRIPTION, POSTMAN_SCHEMA_V2_1};
use crate::error::Result;
use crate::field::Field;
use crate::json_file::{read_json_file, write_json_file};
use crate::postman::auth::Auth;
use crate::postman::common::{DescriptionField, Event, Settings, Variable};
use crate::postman::item::Item;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// e.g. `beta-3`
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub identifier: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub meta: Field<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionField {
    Structured(CollectionVersion),
    Text(String),
}

/// The `info` block. `name` and `schema` are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Information {
    #[serde(rename = "_postman_id", default, skip_serializing_if = "Field::is_absent")]
    pub postman_id: Field<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<DescriptionField>,
    pub schema: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub version: Field<VersionField>,
    #[serde(rename = "_exporter_id", default, skip_serializing_if = "Field::is_absent")]
    pub exporter_id: Field<String>,
}

/// Root of a collection file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: Information,
    pub item: Vec<Item>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub auth: Field<Auth>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub event: Field<Vec<Event>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub variable: Field<Vec<Variable>>,
    #[serde(rename = "protocolProfileBehavior", default, skip_serializing_if = "Field::is_absent")]
    pub protocol_profile_behavior: Field<Settings>,
}

impl Collection {
    /// A v2.1 collection wrapping the given items, as produced from a scene directory.
    pub fn generated(name: &str, item: Vec<Item>) -> Self {
        Collection {
            info: Information {
                postman_id: Field::Absent,
                name: name.to_string(),
                description: Field::Present(DescriptionField::Text(GENERATED_COLLECTION_DESCRIPTION.to_string())),
                schema: POSTMAN_SCHEMA_V2_1.to_string(),
                version: Field::Absent,
                exporter_id: Field::Absent,
            },
            item,
            auth: Field::Absent,
            event: Field::Absent,
            variable: Field::Absent,
            protocol_profile_behavior: Field::Absent,
        }
    }

    /// Load a collection file. Any shape error aborts the load.
    pub fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        log::info!("Loading collection from file {:?}", file_path.as_ref());
        read_json_file(file_path)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, file_path: P) -> Result<()> {
        log::info!("Writing collection '{}' to {:?}", self.info.name, file_path.as_ref());
        write_json_file(file_path, self)
    }
}
