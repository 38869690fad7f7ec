//! Jira Resource Core
//!
//! Parameter model, value resolution and issue field assembly for the
//! Concourse Jira resource.

pub mod error;
pub mod fields;
pub mod models;
pub mod resolve;

pub use error::{Error, Result};
pub use fields::{FieldAssembler, RequestKind};
pub use resolve::{BuildMetadata, ValueResolver};
