//! Shared utilities for feature modules
//!
//! - **validation**: filename and extension checks used by the upload command

pub mod validation;

pub use validation::{extension_of, is_allowed, validate_extension, ExtensionError};
