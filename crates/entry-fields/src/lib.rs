//! Entry field preparation for outbound content sync.
//! Rich text fields are rendered to HTML, other values are flattened to strings,
//! and a set of fields can be laid out as a standalone HTML preview document.

pub mod fields;
pub mod preview;

pub use fields::{FieldWarning, PreparedFields, prepare_entry_fields, safe_field_value};
pub use preview::fields_to_html;
