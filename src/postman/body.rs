use crate::field::Field;
use crate::postman::common::{DescriptionField, Settings};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    Raw,
    Urlencoded,
    Formdata,
    File,
    Graphql,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormParameterType {
    Text,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormSource {
    Files(Vec<Value>),
    Path(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormParameter {
    pub key: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub src: Field<FormSource>,
    /// Overrides the content type of this form part.
    #[serde(rename = "contentType", default, skip_serializing_if = "Field::is_absent")]
    pub content_type: Field<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub parameter_type: Field<FormParameterType>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub disabled: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<DescriptionField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlEncodedParameter {
    pub key: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub parameter_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub disabled: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<DescriptionField>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyFile {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub src: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub content: Field<String>,
}

/// Request body in one of the vendor modes. Not interpreted by the runner.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Body {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub mode: Field<BodyMode>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub raw: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub urlencoded: Field<Vec<UrlEncodedParameter>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub formdata: Field<Vec<FormParameter>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub file: Field<BodyFile>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub graphql: Field<Settings>,
    /// Per-mode editor options, e.g. the language of a raw body.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub options: Field<Settings>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub disabled: Field<bool>,
}
