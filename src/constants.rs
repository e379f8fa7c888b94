pub const DEFAULT_PROTOCOL: &str = "http";
pub const DEFAULT_METHOD: &str = "GET";

pub const POSTMAN_SCHEMA_V2_1: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";
pub const GENERATED_COLLECTION_DESCRIPTION: &str = "auto parsed from webapitest";

// row labels of the scene csv projection
pub const CSV_SCENE_NAME_LABEL: &str = "场景名";
pub const CSV_URL_LABEL: &str = "URL";
pub const CSV_USER_LABEL: &str = "用户";
pub const CSV_CASE_NAME_LABEL: &str = "CASE名";
pub const CSV_KEY_LABEL: &str = "K";
pub const CSV_VALUE_LABEL: &str = "V";

pub const UTF8_BOM: &str = "\u{feff}";

pub const JSON_EXTENSION: &str = "json";
pub const CSV_EXTENSION: &str = "csv";

pub const DEFAULT_CONFIG_FILE: &str = "webapitest.json";
pub const DEFAULT_COOKIE_KEY: &str = "session";
pub const DEFAULT_COOKIE_STORE: &str = ".cookies.json";
pub const DEFAULT_SHELL_DIR: &str = "shell";
