use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::consts::{
    DEFAULT_FORMAT_CHAR, DEFAULT_FORMATTER, DEFAULT_META, DEFAULT_RECURSION_LIMIT, FORMAT_CHARS,
};
use crate::formatters::FormatterResolver;
use crate::template::error::CompileError;

/// Compile options for a template
///
/// Serializable options can be loaded from TOML:
///
/// ```toml
/// meta = "[]"
/// format-char = ":"
/// default-formatter = "html"
/// recursion-limit = 16
/// ```
///
/// `more_formatters` is only settable from code.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TemplateOptions {
    /// Left and right metacharacters concatenated, e.g. `{}` or `[[]]`
    pub meta: String,

    /// `|` or `:`
    pub format_char: char,

    /// Formatter used when a substitution names none; `None` disables it
    #[serde(with = "default_formatter_serde")]
    pub default_formatter: Option<String>,

    /// Maximum depth of nested template expansion
    pub recursion_limit: usize,

    /// Caller-supplied formatters, consulted before the built-ins
    #[serde(skip)]
    pub more_formatters: Option<Arc<dyn FormatterResolver>>,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            meta: DEFAULT_META.to_string(),
            format_char: DEFAULT_FORMAT_CHAR,
            default_formatter: Some(DEFAULT_FORMATTER.to_string()),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            more_formatters: None,
        }
    }
}

impl fmt::Debug for TemplateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateOptions")
            .field("meta", &self.meta)
            .field("format_char", &self.format_char)
            .field("default_formatter", &self.default_formatter)
            .field("recursion_limit", &self.recursion_limit)
            .field("more_formatters", &self.more_formatters.is_some())
            .finish()
    }
}

impl TemplateOptions {
    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = meta.into();
        self
    }

    pub fn with_format_char(mut self, format_char: char) -> Self {
        self.format_char = format_char;
        self
    }

    pub fn with_default_formatter(mut self, name: impl Into<String>) -> Self {
        self.default_formatter = Some(name.into());
        self
    }

    pub fn without_default_formatter(mut self) -> Self {
        self.default_formatter = None;
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_formatters(mut self, resolver: impl FormatterResolver + 'static) -> Self {
        self.more_formatters = Some(Arc::new(resolver));
        self
    }

    pub fn with_shared_formatters(mut self, resolver: Arc<dyn FormatterResolver>) -> Self {
        self.more_formatters = Some(resolver);
        self
    }

    /// Parse options from a TOML document
    pub fn from_toml_str(content: &str) -> crate::error::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read options from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub(crate) fn validated_format_char(&self) -> Result<char, CompileError> {
        if FORMAT_CHARS.contains(&self.format_char) {
            Ok(self.format_char)
        } else {
            Err(CompileError::Configuration(format!(
                "only format characters ':' and '|' are accepted (got {:?})",
                self.format_char
            )))
        }
    }
}

/// Validated left/right metacharacter pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub left: String,
    pub right: String,
}

impl Meta {
    /// Split a metacharacter spec into its halves
    pub fn parse(spec: &str) -> Result<Self, CompileError> {
        let chars: Vec<char> = spec.chars().collect();
        if chars.is_empty() {
            return Err(CompileError::Configuration(
                "metacharacters must not be empty".to_string(),
            ));
        }
        if chars.len() % 2 == 1 {
            return Err(CompileError::Configuration(format!(
                "{:?} has an odd number of metacharacters",
                spec
            )));
        }

        let half = chars.len() / 2;
        Ok(Self {
            left: chars[..half].iter().collect(),
            right: chars[half..].iter().collect(),
        })
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            left: "{".to_string(),
            right: "}".to_string(),
        }
    }
}

mod default_formatter_serde {
    use super::super::consts::DISABLED;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(DISABLED))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let name = String::deserialize(d)?;
        Ok((name != DISABLED).then_some(name))
    }
}
