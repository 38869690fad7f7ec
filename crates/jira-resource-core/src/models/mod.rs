pub mod custom_field;
pub mod field;
pub mod params;
pub mod source;

pub use custom_field::{CustomField, CustomFieldList, CustomFieldSpec, FieldId};
pub use field::{FieldValue, FileText};
pub use params::{CommentSpec, OutParams};
pub use source::{Credentials, Source};
