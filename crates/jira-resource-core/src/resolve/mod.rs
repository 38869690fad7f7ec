//! Resolution of declared field values into final strings
//!
//! Three passes run over every value, in order:
//!
//! 1. `{text, file}` substitution
//! 2. `$NOW` relative date expansion
//! 3. build metadata (`$BUILD_ID`, ...) substitution

pub mod date;
pub mod env;
pub mod file;

pub use env::{BuildMetadata, BUILD_VARIABLES};

use crate::models::FieldValue;
use crate::Result;
use chrono::Local;
use std::path::{Path, PathBuf};

pub struct ValueResolver {
    base_dir: PathBuf,
    build: BuildMetadata,
}

impl ValueResolver {
    pub fn new(base_dir: impl Into<PathBuf>, build: BuildMetadata) -> Self {
        Self {
            base_dir: base_dir.into(),
            build,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Run all passes over `value`
    pub fn resolve(&self, value: &FieldValue) -> Result<String> {
        let text = self.substitute_file(value)?;
        let text = date::expand_now(&text, Local::now().fixed_offset());
        Ok(self.build.expand(&text))
    }

    /// File/text pass only; primitives are rendered unchanged
    pub fn substitute_file(&self, value: &FieldValue) -> Result<String> {
        match value {
            FieldValue::Text(text) => Ok(text.clone()),
            FieldValue::Number(number) => Ok(number.to_string()),
            FieldValue::Bool(flag) => Ok(flag.to_string()),
            FieldValue::File(file_text) => file::substitute(&self.base_dir, file_text),
        }
    }
}
