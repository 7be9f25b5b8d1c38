//! Formatters and formatter resolution
//!
//! A formatter turns one value into another. Substitutions apply a chain of
//! them, `{name|html}` or `{params|url-params|html}`, and the last value is
//! written to the output.
//!
//! Formatter names are resolved when a template is compiled: the caller's
//! [`FormatterResolver`] is asked first, then the built-in table
//! ([`Builtins`]). A name neither knows is a compile error.
//!
//! Names may carry arguments after the first space (`printf %.2f`,
//! `cycle odd even`); the resolver parses them once and returns a formatter
//! holding the parsed form.

mod builtin;
pub mod printf;

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::template::engine::context::ScopedContext;
use crate::template::error::{CompileError, FormatterError};

pub use builtin::{
    AbsUrl, Cycle, Html, HtmlAttribute, Json, PrintfFormatter, Raw, Size, Str, UrlParamValue,
    UrlParams,
};

/// A value transformation applied during expansion
///
/// Formatters receive the current scope so they can read beyond their
/// input value (see [`AbsUrl`] and [`Cycle`]). Implementations must be
/// thread-safe: one compiled template may be expanded from many threads.
pub trait Formatter: Send + Sync {
    fn format(&self, value: &Value, context: &ScopedContext<'_>)
        -> Result<Value, FormatterError>;
}

/// Maps formatter names to formatters
pub trait FormatterResolver: Send + Sync {
    /// Return the formatter for `name`, or `None` if this resolver does not know it
    fn resolve(&self, name: &str) -> Option<Arc<dyn Formatter>>;
}

/// Formatter built from a closure over the value only
pub struct FnFormatter<F>(F);

impl<F> Formatter for FnFormatter<F>
where
    F: Fn(&Value) -> Result<Value, FormatterError> + Send + Sync,
{
    fn format(&self, value: &Value, _context: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        (self.0)(value)
    }
}

/// Wrap a closure as a formatter
pub fn formatter_fn<F>(f: F) -> Arc<dyn Formatter>
where
    F: Fn(&Value) -> Result<Value, FormatterError> + Send + Sync + 'static,
{
    Arc::new(FnFormatter(f))
}

/// Formatter built from a closure that also reads the scope
pub struct ContextFnFormatter<F>(F);

impl<F> Formatter for ContextFnFormatter<F>
where
    F: Fn(&Value, &ScopedContext<'_>) -> Result<Value, FormatterError> + Send + Sync,
{
    fn format(&self, value: &Value, context: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        (self.0)(value, context)
    }
}

/// Wrap a scope-aware closure as a formatter
pub fn context_formatter_fn<F>(f: F) -> Arc<dyn Formatter>
where
    F: Fn(&Value, &ScopedContext<'_>) -> Result<Value, FormatterError> + Send + Sync + 'static,
{
    Arc::new(ContextFnFormatter(f))
}

impl FormatterResolver for HashMap<String, Arc<dyn Formatter>> {
    fn resolve(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        self.get(name).cloned()
    }
}

impl FormatterResolver for Arc<dyn FormatterResolver> {
    fn resolve(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        self.as_ref().resolve(name)
    }
}

/// Resolver built from a lookup function
pub struct FnResolver<F>(F);

impl<F> FormatterResolver for FnResolver<F>
where
    F: Fn(&str) -> Option<Arc<dyn Formatter>> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        (self.0)(name)
    }
}

/// Wrap a lookup function as a resolver
pub fn resolver_fn<F>(f: F) -> FnResolver<F>
where
    F: Fn(&str) -> Option<Arc<dyn Formatter>> + Send + Sync,
{
    FnResolver(f)
}

/// Resolvers tried in order; the first that knows a name wins
#[derive(Default, Clone)]
pub struct LookupChain {
    resolvers: Vec<Arc<dyn FormatterResolver>>,
}

impl LookupChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resolver: impl FormatterResolver + 'static) -> Self {
        self.resolvers.push(Arc::new(resolver));
        self
    }

    pub fn push(&mut self, resolver: Arc<dyn FormatterResolver>) {
        self.resolvers.push(resolver);
    }
}

impl FormatterResolver for LookupChain {
    fn resolve(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        self.resolvers.iter().find_map(|r| r.resolve(name))
    }
}

/// The built-in formatter table
///
/// `str`, `raw`, `html`, `htmltag`, `html-attr-value`, `size`, `url-params`,
/// `url-param-value`, `json`, `absurl`, `printf FMT` (also any name starting
/// with `%`), and `cycle A B ...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Builtins;

impl FormatterResolver for Builtins {
    fn resolve(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        builtin::resolve(name)
    }
}

/// Compile-time resolution: caller's resolver first, then built-ins
pub(crate) struct FormatterRegistry<'a> {
    user: Option<&'a dyn FormatterResolver>,
}

impl<'a> FormatterRegistry<'a> {
    pub fn new(user: Option<&'a dyn FormatterResolver>) -> Self {
        Self { user }
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        self.user
            .and_then(|user| user.resolve(name))
            .or_else(|| Builtins.resolve(name))
    }

    pub fn resolve(&self, name: &str, line: usize) -> Result<Arc<dyn Formatter>, CompileError> {
        self.lookup(name).ok_or_else(|| CompileError::BadFormatter {
            name: name.to_string(),
            line,
        })
    }
}
