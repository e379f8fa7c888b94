use crate::error::{Result, WebApiTestError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read and decode a JSON file. Any shape mismatch is reported with the file name.
pub fn read_json_file<T: DeserializeOwned, P: AsRef<Path>>(file_path: P) -> Result<T> {
    let file_path = file_path.as_ref();
    log::debug!("Reading json file: {file_path:?}");

    let decode_error = |reason: String| WebApiTestError::Decode {
        file: file_path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(file_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => WebApiTestError::FileNotFound(file_path.display().to_string()),
        ErrorKind::InvalidData => decode_error("not valid UTF-8".to_string()),
        _ => WebApiTestError::Io(e),
    })?;

    serde_json::from_str(&content).map_err(|e| decode_error(e.to_string()))
}

/// Encode a value as JSON indented by four spaces. Non-ASCII text is written as-is.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;

    String::from_utf8(buffer).map_err(|e| WebApiTestError::Conversion(e.to_string()))
}

pub fn write_json_file<T: Serialize, P: AsRef<Path>>(file_path: P, value: &T) -> Result<()> {
    let file_path = file_path.as_ref();
    log::debug!("Writing json file: {file_path:?}");

    fs::write(file_path, to_pretty_json(value)?)?;
    Ok(())
}
