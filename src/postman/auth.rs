use crate::field::Field;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    Apikey,
    Awsv4,
    Basic,
    Bearer,
    Digest,
    Hawk,
    Noauth,
    Ntlm,
    Oauth1,
    Oauth2,
}

/// One attribute of an auth helper, e.g. `username` for basic auth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthAttribute {
    pub key: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub attribute_type: Field<String>,
}

/// Authentication helper settings. Carried through without being applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auth {
    #[serde(rename = "type")]
    pub auth_type: AuthType,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub noauth: Field<Value>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub apikey: Field<Vec<AuthAttribute>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub awsv4: Field<Vec<AuthAttribute>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub basic: Field<Vec<AuthAttribute>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub bearer: Field<Vec<AuthAttribute>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub digest: Field<Vec<AuthAttribute>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub hawk: Field<Vec<AuthAttribute>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub ntlm: Field<Vec<AuthAttribute>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub oauth1: Field<Vec<AuthAttribute>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub oauth2: Field<Vec<AuthAttribute>>,
}
