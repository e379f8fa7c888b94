use crate::constants::DEFAULT_PROTOCOL;
use crate::error::{Result, WebApiTestError};
use crate::field::Field;
use crate::postman::common::{DescriptionField, Variable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Host of a URL: either `"api.example.com"` or `["api", "example", "com"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segments {
    List(Vec<String>),
    Single(String),
}

/// Path variable written as an object, e.g. `{"type": "string", "value": ":id"}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathComponent {
    #[serde(rename = "type", default, skip_serializing_if = "Field::is_absent")]
    pub component_type: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Structured(PathComponent),
    Text(String),
}

impl PathSegment {
    pub fn as_text(&self) -> String {
        match self {
            PathSegment::Structured(component) => component.value.get().cloned().unwrap_or_default(),
            PathSegment::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegments {
    List(Vec<PathSegment>),
    Single(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryParam {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub key: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub value: Field<String>,
    /// If set to true, the parameter is not sent with the request.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub disabled: Field<bool>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<DescriptionField>,
}

impl QueryParam {
    pub fn new(key: &str, value: &str) -> Self {
        QueryParam {
            key: Field::Present(key.to_string()),
            value: Field::Present(value.to_string()),
            ..Default::default()
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.disabled, Field::Present(true))
    }
}

/// Structured form of a request URL.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Url {
    /// The string representation of the whole URL, query included.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub raw: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub protocol: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub host: Field<Segments>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub port: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub path: Field<PathSegments>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub query: Field<Vec<QueryParam>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub hash: Field<String>,
    /// Path variables such as `/users/:id`.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub variable: Field<Vec<Variable>>,
}

impl Url {
    /// Enabled query parameters as a key/value map. A repeated key keeps its last value.
    pub fn get_params(&self) -> IndexMap<String, String> {
        let mut params = IndexMap::new();

        if let Some(query) = self.query.get() {
            for param in query.iter().filter(|param| !param.is_disabled()) {
                // a parameter without a key cannot be sent
                if let Some(key) = param.key.get() {
                    params.insert(key.clone(), param.value.get().cloned().unwrap_or_default());
                }
            }
        }

        params
    }

    /// `<protocol>://<first host segment>/<first path segment>`, query ignored.
    pub fn get_easy_url(&self) -> String {
        let host = match self.host.get() {
            Some(Segments::List(parts)) => parts.first().cloned().unwrap_or_default(),
            Some(Segments::Single(host)) => host.clone(),
            None => String::new(),
        };

        let path = match self.path.get() {
            Some(PathSegments::List(parts)) => parts.first().map(PathSegment::as_text).unwrap_or_default(),
            Some(PathSegments::Single(path)) => path.clone(),
            None => String::new(),
        };

        format!("{}://{}/{}", self.protocol_or_default(), host, path)
    }

    /// The full URL: `raw` when present, else `host/path` with the protocol prefixed.
    ///
    /// Falling back to host and path only works when both are plain strings.
    pub fn get_url(&self) -> Result<String> {
        let url = match (self.raw.get(), self.host.get(), self.path.get()) {
            (Some(raw), _, _) if !raw.is_empty() => raw.clone(),
            (_, Some(Segments::Single(host)), Some(PathSegments::Single(path))) => format!("{host}/{path}"),
            (_, Some(Segments::Single(host)), None) => host.clone(),
            _ => {
                return Err(WebApiTestError::Conversion(
                    "cannot build a full url: no raw url and host/path are not plain strings".to_string(),
                ))
            }
        };

        Ok(prefix_protocol(&url, self.protocol_or_default()))
    }

    fn protocol_or_default(&self) -> &str {
        self.protocol
            .get()
            .map(String::as_str)
            .filter(|protocol| !protocol.is_empty())
            .unwrap_or(DEFAULT_PROTOCOL)
    }
}

/// The url of a request, structured or as a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlField {
    Structured(Url),
    Raw(String),
}

impl UrlField {
    pub fn get_params(&self) -> IndexMap<String, String> {
        match self {
            UrlField::Structured(url) => url.get_params(),
            UrlField::Raw(raw) => split_query(raw).1,
        }
    }

    pub fn get_easy_url(&self) -> String {
        match self {
            UrlField::Structured(url) => url.get_easy_url(),
            UrlField::Raw(raw) => prefix_protocol(&split_query(raw).0, DEFAULT_PROTOCOL),
        }
    }

    pub fn get_url(&self) -> Result<String> {
        match self {
            UrlField::Structured(url) => url.get_url(),
            UrlField::Raw(raw) => Ok(prefix_protocol(raw, DEFAULT_PROTOCOL)),
        }
    }
}

fn prefix_protocol(url: &str, protocol: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{protocol}://{url}")
    }
}

/// Split `http://host/path?a=1&b=2#frag` into the part before `?` and its query pairs.
pub fn split_query(raw: &str) -> (String, IndexMap<String, String>) {
    let without_fragment = raw.split('#').next().unwrap_or_default();
    let mut params = IndexMap::new();

    let Some((base, query)) = without_fragment.split_once('?') else {
        return (without_fragment.to_string(), params);
    };

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(key.to_string(), value.to_string());
    }

    (base.to_string(), params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn url_from(value: serde_json::Value) -> Url {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_get_params_skips_disabled() {
        let url = url_from(json!({
            "query": [
                {"key": "a", "value": "1", "disabled": false},
                {"key": "b", "value": "2", "disabled": true}
            ]
        }));

        let params = url.get_params();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("a").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_get_params_last_duplicate_wins() {
        let url = url_from(json!({
            "query": [
                {"key": "a", "value": "1"},
                {"key": "a", "value": "2"},
                {"key": "c"}
            ]
        }));

        let params = url.get_params();
        assert_eq!(params.get("a").map(String::as_str), Some("2"));
        assert_eq!(params.get("c").map(String::as_str), Some(""));
    }

    #[test]
    fn test_easy_url_takes_first_segments() {
        let url = url_from(json!({
            "protocol": "https",
            "host": ["api.example.com"],
            "path": ["users", "1"],
            "query": [{"key": "id", "value": "1"}]
        }));

        assert_eq!(url.get_easy_url(), "https://api.example.com/users");
    }

    #[test]
    fn test_easy_url_defaults() {
        let url = url_from(json!({ "host": "localhost" }));
        assert_eq!(url.get_easy_url(), "http://localhost/");

        let url = url_from(json!({ "host": "localhost", "path": [{"type": "string", "value": "items"}] }));
        assert_eq!(url.get_easy_url(), "http://localhost/items");
    }

    #[test]
    fn test_full_url_prefers_raw() {
        let url = url_from(json!({
            "raw": "https://api.example.com/users?id=1",
            "host": ["api", "example", "com"],
            "path": ["users"]
        }));

        assert_eq!(url.get_url().unwrap(), "https://api.example.com/users?id=1");
    }

    #[test]
    fn test_full_url_from_plain_host_and_path() {
        let url = url_from(json!({ "protocol": "https", "host": "example.com", "path": "login" }));
        assert_eq!(url.get_url().unwrap(), "https://example.com/login");

        let url = url_from(json!({ "raw": "{{host}}/login" }));
        assert_eq!(url.get_url().unwrap(), "http://{{host}}/login");
    }

    #[test]
    fn test_full_url_rejects_segment_lists() {
        let url = url_from(json!({ "host": ["example", "com"], "path": ["login"] }));
        assert!(matches!(url.get_url(), Err(WebApiTestError::Conversion(_))));
    }

    #[test]
    fn test_raw_url_field() {
        let field: UrlField = serde_json::from_value(json!("example.com/search?q=rust&page=2#top")).unwrap();

        assert_eq!(field.get_easy_url(), "http://example.com/search");
        let params = field.get_params();
        assert_eq!(params.get("q").map(String::as_str), Some("rust"));
        assert_eq!(params.get("page").map(String::as_str), Some("2"));
    }
}
