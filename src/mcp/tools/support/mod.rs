// Support module for shared utility functions
mod args;
mod deserialize_non_empty_string;
mod patch_document;

pub use args::{non_empty, parse_args, schema_for};
pub use deserialize_non_empty_string::deserialize_non_empty_string;
pub use patch_document::{FieldPatch, link_type_reference};
