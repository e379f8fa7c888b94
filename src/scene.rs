//! Scene/case test format.
//!
//! A scene is one url and method with an ordered list of cases; each case is a
//! named set of parameters. Scenes live one per `.json` file, optionally with a
//! `.csv` sibling that overlays the cases.

use crate::constants::{
    CSV_CASE_NAME_LABEL, CSV_EXTENSION, CSV_KEY_LABEL, CSV_SCENE_NAME_LABEL, CSV_URL_LABEL, CSV_USER_LABEL,
    CSV_VALUE_LABEL, DEFAULT_METHOD, JSON_EXTENSION,
};
use crate::csv_table::read_csv;
use crate::error::Result;
use crate::field::Field;
use crate::json_file::{read_json_file, write_json_file};
use crate::models::PreparedRequest;
use crate::postman::{HeaderField, PathSegments, QueryParam, Request, Segments, Url, UrlField};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Project-wide `{{key}}` substitution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironParam {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnvironParam {
    pub fn new(key: &str, value: &str) -> Self {
        EnvironParam {
            key: key.to_string(),
            value: value.to_string(),
            description: None,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        text.replace(&format!("{{{{{}}}}}", self.key), &self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Case {
    pub name: String,
    pub params: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Filled in after execution, never read from a scene file.
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl Case {
    pub fn new(name: &str, params: IndexMap<String, String>) -> Self {
        Case {
            name: name.to_string(),
            params,
            desc: None,
            response: None,
        }
    }

    pub fn get_payload(&self) -> &IndexMap<String, String> {
        &self.params
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub url: String,
    /// Key into the project's logged-in users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub method: Field<String>,
    pub cases: Vec<Case>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub header: Field<HeaderField>,

    #[serde(skip)]
    envs: Vec<EnvironParam>,
    #[serde(skip)]
    user_cookie: Option<String>,
}

impl Scene {
    pub fn new(name: &str, url: &str, method: Field<String>, cases: Vec<Case>) -> Self {
        Scene {
            name: name.to_string(),
            url: url.to_string(),
            method,
            cases,
            ..Default::default()
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Scene> {
        log::info!("Loading scene from file {:?}", file_path.as_ref());
        read_json_file(file_path)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, file_path: P) -> Result<()> {
        write_json_file(file_path, self)
    }

    /// Load a scene with its csv overlay.
    ///
    /// The `.json` sibling supplies the scene and must exist; the csv rows then
    /// override name, url, user and the cases. A `.json` path loads the file alone.
    pub fn load_from_csv<P: AsRef<Path>>(file_path: P) -> Result<Scene> {
        let file_path = file_path.as_ref();
        let mut scene = Scene::load_from_file(file_path.with_extension(JSON_EXTENSION))?;

        let is_csv = file_path
            .extension()
            .is_some_and(|extension| extension == CSV_EXTENSION);
        if !is_csv {
            return Ok(scene);
        }

        let rows = read_csv(file_path)?;
        scene.apply_csv_rows(&rows);
        Ok(scene)
    }

    /// Overlay csv rows produced by [`Scene::to_csv`].
    pub fn apply_csv_rows(&mut self, rows: &[Vec<String>]) {
        let mut case_header_index = None;

        for (index, row) in rows.iter().enumerate() {
            let Some(label) = row.first() else { continue };
            let value = row.get(1).cloned().unwrap_or_default();

            match label.trim() {
                CSV_SCENE_NAME_LABEL => self.name = value,
                CSV_URL_LABEL => self.url = value,
                CSV_USER_LABEL => self.user = Some(value).filter(|user| !user.is_empty()),
                CSV_CASE_NAME_LABEL => {
                    case_header_index = Some(index);
                    break;
                }
                _ => {}
            }
        }

        let Some(header_index) = case_header_index else {
            log::warn!("No '{CSV_CASE_NAME_LABEL}' row in csv of scene '{}', keeping its cases", self.name);
            return;
        };

        let cases: Vec<Case> = rows[header_index + 1..]
            .iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .map(|row| self.case_from_row(row))
            .collect();
        self.cases = cases;
    }

    fn case_from_row(&self, row: &[String]) -> Case {
        let name = row.first().cloned().unwrap_or_default();
        let mut params = IndexMap::new();

        for pair in row[1..].chunks(2) {
            let key = &pair[0];
            if key.is_empty() {
                continue;
            }
            params.insert(key.clone(), pair.get(1).cloned().unwrap_or_default());
        }

        // descriptions only live in the json file
        let desc = self
            .cases
            .iter()
            .find(|case| case.name == name)
            .and_then(|case| case.desc.clone());

        Case {
            desc,
            ..Case::new(&name, params)
        }
    }

    /// Row table for spreadsheet editing: scene rows, then a case header row
    /// sized to the widest case, then one row per case.
    pub fn to_csv(&self) -> Vec<Vec<String>> {
        let mut rows = vec![
            vec![CSV_SCENE_NAME_LABEL.to_string(), self.name.clone()],
            vec![CSV_URL_LABEL.to_string(), self.url.clone()],
        ];
        if let Some(user) = &self.user {
            rows.push(vec![CSV_USER_LABEL.to_string(), user.clone()]);
        }

        let max_key_count = self.cases.iter().map(|case| case.params.len()).max().unwrap_or(0);
        let mut header = vec![CSV_CASE_NAME_LABEL.to_string()];
        for _ in 0..max_key_count {
            header.push(CSV_KEY_LABEL.to_string());
            header.push(CSV_VALUE_LABEL.to_string());
        }
        rows.push(header);

        for case in &self.cases {
            let mut line = vec![case.name.clone()];
            for (key, value) in &case.params {
                line.push(key.clone());
                line.push(value.clone());
            }
            rows.push(line);
        }

        rows
    }

    pub fn envs(&self) -> &[EnvironParam] {
        &self.envs
    }

    pub fn set_envs(&mut self, envs: Vec<EnvironParam>) {
        self.envs = envs;
    }

    pub fn user_cookie(&self) -> Option<&str> {
        self.user_cookie.as_deref()
    }

    /// Inject the cookie of the scene's user, e.g. `session=abc`.
    pub fn set_user_cookie(&mut self, user_cookie: Option<String>) {
        self.user_cookie = user_cookie;
    }

    pub fn method_or_default(&self) -> String {
        self.method
            .get()
            .map(|method| method.to_uppercase())
            .unwrap_or_else(|| DEFAULT_METHOD.to_string())
    }

    fn url_without_scheme(&self) -> &str {
        ["http://", "https://"]
            .iter()
            .find_map(|scheme| self.url.strip_prefix(scheme))
            .unwrap_or(&self.url)
    }

    fn host_port(&self) -> &str {
        self.url_without_scheme().split('/').next().unwrap_or_default()
    }

    pub fn get_host(&self) -> String {
        self.host_port().split(':').next().unwrap_or_default().to_string()
    }

    pub fn get_port(&self) -> Option<String> {
        self.host_port().split_once(':').map(|(_, port)| port.to_string())
    }

    /// Path after the host, without leading slash and without query string.
    pub fn get_path(&self) -> String {
        let path = self.url_without_scheme().split_once('/').map(|(_, path)| path).unwrap_or_default();
        path.split('?').next().unwrap_or_default().to_string()
    }

    /// Scene headers plus the `Cookie` header of its user when one was injected.
    pub fn get_headers(&self) -> IndexMap<String, String> {
        let mut headers: IndexMap<String, String> = self
            .header
            .get()
            .map(HeaderField::to_headers)
            .unwrap_or_default()
            .into_iter()
            .filter(|header| !header.is_disabled())
            .map(|header| (header.key, header.value))
            .collect();

        if let Some(user) = &self.user {
            match &self.user_cookie {
                Some(cookie) => {
                    headers.insert("Cookie".to_string(), cookie.clone());
                }
                None => log::warn!("User '{user}' of scene '{}' is not logged in, sending anonymously", self.name),
            }
        }

        headers
    }

    fn substitute(&self, text: &str) -> String {
        self.envs.iter().fold(text.to_string(), |text, env| env.apply(&text))
    }

    /// One request per case with every `{{key}}` replaced in url, headers and params.
    pub fn prepare_requests(&self) -> Vec<PreparedRequest> {
        let url = self.substitute(&self.url);
        let headers: IndexMap<String, String> = self
            .get_headers()
            .into_iter()
            .map(|(key, value)| (key, self.substitute(&value)))
            .collect();
        let method = self.method_or_default();

        self.cases
            .iter()
            .map(|case| PreparedRequest {
                scene_name: self.name.clone(),
                case_name: case.name.clone(),
                method: method.clone(),
                url: url.clone(),
                headers: headers.clone(),
                payload: case
                    .get_payload()
                    .iter()
                    .map(|(key, value)| (key.clone(), self.substitute(value)))
                    .collect(),
            })
            .collect()
    }

    /// Structured url for a case, host and path split out of `url`.
    pub fn to_postman_url(&self, case: Option<&Case>) -> Url {
        let protocol = if self.url.contains("https:") { "https" } else { "http" };

        Url {
            raw: Field::Present(self.url.clone()),
            protocol: Field::Present(protocol.to_string()),
            host: Field::Present(Segments::Single(self.get_host())),
            port: Field::from_option(self.get_port()),
            path: Field::Present(PathSegments::Single(self.get_path())),
            query: Field::from_option(case.map(|case| {
                case.params
                    .iter()
                    .map(|(key, value)| QueryParam::new(key, value))
                    .collect()
            })),
            ..Default::default()
        }
    }

    /// Vendor request built from the first case only; further cases are dropped.
    pub fn to_postman_request(&self) -> Request {
        if self.cases.len() > 1 {
            log::debug!("Scene '{}' has {} cases, only the first one is exported", self.name, self.cases.len());
        }

        Request {
            method: self.method.clone(),
            header: self.header.clone(),
            url: Field::Present(UrlField::Structured(self.to_postman_url(self.cases.first()))),
            ..Default::default()
        }
    }
}
