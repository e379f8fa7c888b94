//! Postman collection (v2.x) data model.
//!
//! Every entity decodes permissively: optional keys may be missing or `null`,
//! and union-typed keys try their structured form before the plain string
//! form. Encoding writes back exactly the keys that were present.

pub mod auth;
pub mod body;
pub mod collection;
pub mod common;
pub mod item;
pub mod request;
pub mod url;

pub use auth::{Auth, AuthAttribute, AuthType};
pub use body::{Body, BodyMode};
pub use collection::{Collection, Information};
pub use common::{Description, DescriptionField, Event, Header, HeaderField, Variable};
pub use item::{Item, ItemKind};
pub use request::{Request, RequestField, Response, ResponseEntry};
pub use url::{PathSegment, PathSegments, QueryParam, Segments, Url, UrlField};
