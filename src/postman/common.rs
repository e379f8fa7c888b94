use crate::field::Field;
use crate::postman::url::UrlField;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A description with an optional mime type and version.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Description {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub content: Field<String>,
    /// e.g. `text/markdown` or `text/html`
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub content_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub version: Field<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptionField {
    Structured(Description),
    Text(String),
}

/// A single HTTP header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub header_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub disabled: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<DescriptionField>,
}

impl Header {
    pub fn new(key: &str, value: &str) -> Self {
        Header {
            key: key.to_string(),
            value: value.to_string(),
            ..Default::default()
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.disabled, Field::Present(true))
    }
}

/// Request headers: a header list, or the raw header block as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderField {
    List(Vec<Header>),
    Raw(String),
}

impl HeaderField {
    /// Headers as a list. A raw block is split into `Key: Value` lines.
    pub fn to_headers(&self) -> Vec<Header> {
        match self {
            HeaderField::List(headers) => headers.clone(),
            HeaderField::Raw(raw) => raw
                .lines()
                .filter_map(|line| line.split_once(':'))
                .map(|(key, value)| Header::new(key.trim(), value.trim()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderEntry {
    Structured(Header),
    Text(String),
}

/// Headers of a saved response; entries may be plain strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseHeaders {
    List(Vec<HeaderEntry>),
    Raw(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    Any,
    Boolean,
    Number,
    String,
}

/// Collection, folder or path variable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub key: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub variable_type: Field<VariableType>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<DescriptionField>,
    /// Set by the vendor tool itself.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub system: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub disabled: Field<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptExec {
    Lines(Vec<String>),
    Source(String),
}

/// Script attached to an event. Carried through as-is, never run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub script_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub exec: Field<ScriptExec>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub src: Field<UrlField>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    /// `test` or `prerequest`
    pub listen: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub disabled: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub script: Field<Script>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CookieExpiry {
    Timestamp(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cookie {
    pub domain: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub expires: Field<CookieExpiry>,
    #[serde(rename = "maxAge", default, skip_serializing_if = "Field::is_absent")]
    pub max_age: Field<String>,
    #[serde(rename = "hostOnly", default, skip_serializing_if = "Field::is_absent")]
    pub host_only: Field<bool>,
    #[serde(rename = "httpOnly", default, skip_serializing_if = "Field::is_absent")]
    pub http_only: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub secure: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub session: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub extensions: Field<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CertificateFile {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub src: Field<Value>,
}

/// Client certificate settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub matches: Field<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub key: Field<CertificateFile>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cert: Field<CertificateFile>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub passphrase: Field<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// URL match pattern the proxy applies to.
    #[serde(rename = "match", default, skip_serializing_if = "Field::is_absent")]
    pub match_pattern: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub host: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub port: Field<u16>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub tunnel: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub disabled: Field<bool>,
}

/// Free-form settings object such as `protocolProfileBehavior`.
pub type Settings = Map<String, Value>;
