//! Built-in formatters

use serde_json::Value;
use std::sync::Arc;
use url::form_urlencoded;

use super::printf::Printf;
use super::Formatter;
use crate::template::engine::context::ScopedContext;
use crate::template::engine::helpers::{stringify_value, value_kind};
use crate::template::error::FormatterError;

/// Look up a built-in formatter by name
pub(super) fn resolve(name: &str) -> Option<Arc<dyn Formatter>> {
    let formatter: Arc<dyn Formatter> = match name {
        "str" => Arc::new(Str),
        "raw" => Arc::new(Raw),
        "html" => Arc::new(Html),
        "htmltag" | "html-attr-value" => Arc::new(HtmlAttribute),
        "size" => Arc::new(Size),
        "url-params" => Arc::new(UrlParams),
        "url-param-value" => Arc::new(UrlParamValue),
        "json" => Arc::new(Json),
        "absurl" => Arc::new(AbsUrl),
        _ => return resolve_parameterized(name),
    };
    Some(formatter)
}

/// Formatters whose name carries arguments
fn resolve_parameterized(name: &str) -> Option<Arc<dyn Formatter>> {
    if let Some(format) = name.strip_prefix("printf ") {
        return Some(Arc::new(PrintfFormatter(Printf::parse(format)?)));
    }
    if name.starts_with('%') {
        return Some(Arc::new(PrintfFormatter(Printf::parse(name)?)));
    }
    if let Some(args) = name.strip_prefix("cycle ") {
        return Cycle::new(args.split_whitespace()).map(|c| Arc::new(c) as Arc<dyn Formatter>);
    }
    None
}

fn expect_str(value: &Value) -> Result<&str, FormatterError> {
    value.as_str().ok_or(FormatterError::TypeMismatch {
        expected: "string",
        found: value_kind(value),
    })
}

/// `str`: best-effort human-readable string
#[derive(Debug, Clone, Copy)]
pub struct Str;

impl Formatter for Str {
    fn format(&self, value: &Value, _: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        Ok(stringify_value(value).map_or(Value::Null, Value::String))
    }
}

/// `raw`: identity
#[derive(Debug, Clone, Copy)]
pub struct Raw;

impl Formatter for Raw {
    fn format(&self, value: &Value, _: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        Ok(value.clone())
    }
}

/// `html`: escape `&`, `<`, `>`
#[derive(Debug, Clone, Copy)]
pub struct Html;

impl Formatter for Html {
    fn format(&self, value: &Value, _: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        Ok(Value::String(
            html_escape::encode_text(expect_str(value)?).into_owned(),
        ))
    }
}

/// `htmltag` / `html-attr-value`: also escape double quotes
#[derive(Debug, Clone, Copy)]
pub struct HtmlAttribute;

impl Formatter for HtmlAttribute {
    fn format(&self, value: &Value, _: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        Ok(Value::String(
            html_escape::encode_double_quoted_attribute(expect_str(value)?).into_owned(),
        ))
    }
}

/// `size`: number of items in a list or map, characters in a string
#[derive(Debug, Clone, Copy)]
pub struct Size;

impl Formatter for Size {
    fn format(&self, value: &Value, _: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        let size = match value {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::String(s) => s.chars().count(),
            other => {
                return Err(FormatterError::TypeMismatch {
                    expected: "list, map or string",
                    found: value_kind(other),
                })
            }
        };
        Ok(Value::String(size.to_string()))
    }
}

/// `url-params`: form-encode a map as a query string, keys sorted
#[derive(Debug, Clone, Copy)]
pub struct UrlParams;

impl Formatter for UrlParams {
    fn format(&self, value: &Value, _: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        let Value::Object(map) = value else {
            return Err(FormatterError::TypeMismatch {
                expected: "map",
                found: value_kind(value),
            });
        };

        let mut pairs: Vec<(&String, &Value)> = map.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, item) in pairs {
            serializer.append_pair(key, &stringify_value(item).unwrap_or_default());
        }
        Ok(Value::String(serializer.finish()))
    }
}

/// `url-param-value`: form-encode a single value
#[derive(Debug, Clone, Copy)]
pub struct UrlParamValue;

impl Formatter for UrlParamValue {
    fn format(&self, value: &Value, _: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        let text = match value {
            Value::Array(_) | Value::Object(_) | Value::Null => {
                return Err(FormatterError::TypeMismatch {
                    expected: "string, number or boolean",
                    found: value_kind(value),
                })
            }
            scalar => stringify_value(scalar).unwrap_or_default(),
        };
        Ok(Value::String(
            form_urlencoded::byte_serialize(text.as_bytes()).collect(),
        ))
    }
}

/// `json`: compact JSON text of any value
#[derive(Debug, Clone, Copy)]
pub struct Json;

impl Formatter for Json {
    fn format(&self, value: &Value, _: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        Ok(Value::String(serde_json::to_string(value)?))
    }
}

/// `absurl`: prefix a relative URL with `base-url` from the scope chain
#[derive(Debug, Clone, Copy)]
pub struct AbsUrl;

impl Formatter for AbsUrl {
    fn format(&self, value: &Value, context: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        let relative = expect_str(value)?;
        let base = context.lookup("base-url")?;
        let base = stringify_value(base).unwrap_or_default();
        Ok(Value::String(format!("{}/{}", base, relative)))
    }
}

/// `cycle A B ...`: pick an argument by position in the enclosing repeated section
#[derive(Debug, Clone)]
pub struct Cycle {
    choices: Vec<String>,
}

impl Cycle {
    /// `None` when no choices are given
    pub fn new<'a>(choices: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let choices: Vec<String> = choices.into_iter().map(str::to_string).collect();
        (!choices.is_empty()).then_some(Self { choices })
    }
}

impl Formatter for Cycle {
    fn format(&self, _value: &Value, context: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        let index = context.index().ok_or_else(|| {
            FormatterError::Context("cycle used outside a repeated section".to_string())
        })?;
        let choice = &self.choices[(index - 1) % self.choices.len()];
        Ok(Value::String(choice.clone()))
    }
}

/// `printf FMT` or `%FMT`
#[derive(Debug, Clone)]
pub struct PrintfFormatter(pub Printf);

impl Formatter for PrintfFormatter {
    fn format(&self, value: &Value, _: &ScopedContext<'_>) -> Result<Value, FormatterError> {
        Ok(Value::String(self.0.apply(value)?))
    }
}
