//! Compile options, their defaults, and the template header format

pub mod consts;
pub mod header;
pub mod model;

pub use header::split_header;
pub use model::{Meta, TemplateOptions};
