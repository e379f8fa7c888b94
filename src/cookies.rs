use crate::error::{Result, WebApiTestError};
use crate::json_file::{read_json_file, write_json_file};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Find the `<cookie_key>=<value>` pair in a list of `Set-Cookie` lines.
///
/// Returns the pair ready to be sent back as a `Cookie` header.
pub fn extract_cookie(cookie_key: &str, set_cookie_lines: &[String]) -> Result<Option<String>> {
    if cookie_key.is_empty() {
        return Err(WebApiTestError::Cookie("cookie key must not be empty".to_string()));
    }
    let pattern = Regex::new(&format!("^{}=(.*?)(?:;|$)", regex::escape(cookie_key)))?;

    let cookie = set_cookie_lines.iter().find_map(|line| {
        pattern
            .captures(line)
            .and_then(|captures| captures.get(1))
            .map(|value| format!("{cookie_key}={}", value.as_str()))
    });

    Ok(cookie)
}

/// Logged-in users and their cookie, persisted between runs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar {
    users: IndexMap<String, String>,
}

impl CookieJar {
    /// A missing store is an empty jar.
    pub fn load<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let file_path = file_path.as_ref();
        if !file_path.exists() {
            log::debug!("No cookie store at {file_path:?}");
            return Ok(CookieJar::default());
        }

        let jar: CookieJar = read_json_file(file_path)?;
        log::info!("Loaded {} stored cookie(s) from {file_path:?}", jar.len());
        Ok(jar)
    }

    pub fn save<P: AsRef<Path>>(&self, file_path: P) -> Result<()> {
        log::debug!("Saving {} cookie(s) to {:?}", self.len(), file_path.as_ref());
        write_json_file(file_path, self)
    }

    pub fn get(&self, user: &str) -> Option<&str> {
        self.users.get(user).map(String::as_str)
    }

    pub fn insert(&mut self, user: &str, cookie: String) {
        self.users.insert(user.to_string(), cookie);
    }

    pub fn remove(&mut self, user: &str) -> Option<String> {
        self.users.shift_remove(user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
