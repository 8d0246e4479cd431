//! Core domain entities.
//!
//! - [`UrlRecord`] - A shortened URL mapping
//! - [`NewUrlRecord`] - Input for creating a record

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord, compose_short_url};
