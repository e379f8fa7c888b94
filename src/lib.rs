/// webapitest - convert Postman collections to scene/case test suites and back, and run them
pub mod cli;
pub mod config;
pub mod constants;
pub mod convert;
pub mod cookies;
pub mod csv_table;
pub mod error;
pub mod executor;
pub mod field;
pub mod json_file;
pub mod lifecycle;
pub mod logger;
pub mod models;
pub mod postman;
pub mod project;
pub mod scene;

pub use error::{Result, WebApiTestError};
