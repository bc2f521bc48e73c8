//! CLI command implementations

pub mod info;
pub mod morph;
pub mod render;
pub mod validate;

mod reporting;
