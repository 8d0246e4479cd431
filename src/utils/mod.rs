//! Utility functions for slug handling, URL validation and error classification.
//!
//! - [`slug`] - Slug generation and grammar validation
//! - [`url_validator`] - Target URL validation
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod slug;
pub mod url_validator;
