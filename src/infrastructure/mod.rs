//! Infrastructure layer implementing the domain repository traits.
//!
//! - [`persistence`] - PostgreSQL repository implementations

pub mod persistence;
