//! Template module - logic-less JSON template engine
//!
//! A template is plain text with directives between metacharacters
//! (`{` and `}` by default). Data is a [`serde_json::Value`].
//!
//! ## Syntax
//!
//! - Substitution: `{name}`, `{a.b.c}`, `{@}` (the cursor), `{@index}`
//! - Formatters: `{name|html}`, chained left to right: `{params|url-params|html}`
//! - Sections: `{.section name}...{.or}...{.end}`
//! - Repetition: `{.repeated section items}...{.alternates with}...{.or}...{.end}`
//! - Literals: `{.meta-left}`, `{.meta-right}`, `{.space}`
//! - Comments: `{# anything}`
//!
//! A newline right after any directive other than a substitution is
//! dropped, so block directives can sit on lines of their own.

pub mod engine;
pub mod error;
pub mod group;

pub use engine::{expand, ScopedContext, Template};
pub use error::{CompileError, EvalError, FormatterError};
pub use group::{TemplateGroup, TemplateGroupBuilder};
