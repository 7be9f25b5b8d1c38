// Core modules
pub mod config;
pub mod error;
pub mod formatters;
pub mod template;

// Re-export commonly used types
pub use config::TemplateOptions;
pub use error::{Error, Result};
pub use formatters::{Formatter, FormatterResolver, LookupChain};
pub use template::{
    expand, CompileError, EvalError, FormatterError, ScopedContext, Template, TemplateGroup,
};
