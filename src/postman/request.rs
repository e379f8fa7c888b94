use crate::constants::DEFAULT_METHOD;
use crate::error::{Result, WebApiTestError};
use crate::field::Field;
use crate::postman::auth::Auth;
use crate::postman::body::Body;
use crate::postman::common::{Certificate, Cookie, DescriptionField, HeaderField, ProxyConfig, ResponseHeaders, Settings};
use crate::postman::url::UrlField;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single HTTP request of a collection item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub method: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub header: Field<HeaderField>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub body: Field<Body>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub url: Field<UrlField>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub auth: Field<Auth>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub proxy: Field<ProxyConfig>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub certificate: Field<Certificate>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<DescriptionField>,
}

impl Request {
    /// True when the method is missing or is GET in any letter case.
    pub fn is_get(&self) -> bool {
        self.method
            .get()
            .map_or(true, |method| method.eq_ignore_ascii_case(DEFAULT_METHOD))
    }

    pub fn get_params(&self) -> IndexMap<String, String> {
        self.url.get().map(UrlField::get_params).unwrap_or_default()
    }

    /// The url a scene is built from: the easy url for GET, the full url otherwise.
    pub fn get_easy_url(&self) -> Result<String> {
        let url = self
            .url
            .get()
            .ok_or_else(|| WebApiTestError::Conversion("request has no url".to_string()))?;

        if self.is_get() {
            Ok(url.get_easy_url())
        } else {
            url.get_url()
        }
    }
}

/// An item request, structured or as a bare url string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestField {
    Structured(Request),
    Raw(String),
}

impl RequestField {
    /// Structured view; a bare url becomes a GET request on that url.
    pub fn to_request(&self) -> Request {
        match self {
            RequestField::Structured(request) => request.clone(),
            RequestField::Raw(url) => Request {
                url: Field::Present(UrlField::Raw(url.clone())),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseTime {
    Millis(f64),
    Text(String),
}

/// A sample response saved with a request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(rename = "originalRequest", default, skip_serializing_if = "Field::is_absent")]
    pub original_request: Field<RequestField>,
    /// e.g. `200 OK`
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub status: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub code: Field<u16>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub header: Field<ResponseHeaders>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub cookie: Field<Vec<Cookie>>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub body: Field<String>,
    #[serde(rename = "responseTime", default, skip_serializing_if = "Field::is_absent")]
    pub response_time: Field<ResponseTime>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub timings: Field<Settings>,
}

/// Entry of an item's response list. Anything that is not a response object is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseEntry {
    Response(Box<Response>),
    Other(Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_easy_url_depends_on_method() {
        let mut request: Request = serde_json::from_value(json!({
            "url": {
                "raw": "http://localhost:5000/api/notes?page=1",
                "host": ["localhost"],
                "port": "5000",
                "path": ["api", "notes"],
                "query": [{"key": "page", "value": "1"}]
            }
        }))
        .unwrap();

        assert!(request.is_get());
        assert_eq!(request.get_easy_url().unwrap(), "http://localhost/api");

        request.method = Field::Present("post".to_string());
        assert!(!request.is_get());
        assert_eq!(request.get_easy_url().unwrap(), "http://localhost:5000/api/notes?page=1");
    }

    #[test]
    fn test_request_without_url() {
        let request = Request::default();
        assert!(request.get_params().is_empty());
        assert!(request.get_easy_url().is_err());
    }

    #[test]
    fn test_response_entries_keep_unknown_shapes() {
        let entries: Vec<ResponseEntry> = serde_json::from_value(json!([
            {"name": "ok", "code": 200, "body": "{}"},
            42,
            "plain"
        ]))
        .unwrap();

        assert!(matches!(entries[0], ResponseEntry::Response(_)));
        assert_eq!(entries[1], ResponseEntry::Other(json!(42)));
        assert_eq!(entries[2], ResponseEntry::Other(json!("plain")));
    }
}
