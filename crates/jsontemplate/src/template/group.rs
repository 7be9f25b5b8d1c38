//! Named templates that expand each other
//!
//! Members of a group reference one another with the `template NAME`
//! formatter: `{.section page}{@|template header}{.end}` expands the member
//! `header` with the section value as its data. Names are checked when the
//! group is built, so a reference to a missing member is a compile error.
//!
//! Members hold only a weak handle to the group, resolved at expansion time.
//! Recursion between members is bounded by the recursion limit.

use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::{Arc, OnceLock, Weak};

use crate::config::TemplateOptions;
use crate::error::Result;
use crate::formatters::{Formatter, FormatterResolver, LookupChain};
use crate::template::engine::{ScopedContext, Template};
use crate::template::error::{CompileError, EvalError, FormatterError};

/// File extension picked up by [`TemplateGroupBuilder::add_dir`]
pub const TEMPLATE_EXTENSION: &str = "jsont";

const TEMPLATE_FORMATTER: &str = "template ";

#[derive(Default)]
struct GroupInner {
    templates: OnceLock<BTreeMap<String, Template>>,
}

/// A set of compiled templates addressable by name
#[derive(Clone)]
pub struct TemplateGroup {
    inner: Arc<GroupInner>,
}

impl std::fmt::Debug for TemplateGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateGroup")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl TemplateGroup {
    pub fn builder() -> TemplateGroupBuilder {
        TemplateGroupBuilder::default()
    }

    /// Member named `name`
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.inner.templates.get()?.get(name)
    }

    /// Member names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner
            .templates
            .get()
            .into_iter()
            .flat_map(|templates| templates.keys().map(String::as_str))
    }

    /// Expand the member `name` against `data`
    pub fn expand(&self, name: &str, data: &Value) -> Result<String> {
        let template = self.get(name).ok_or_else(|| EvalError::undefined(name))?;
        Ok(template.expand(data)?)
    }
}

/// Collects template sources, then compiles them together
#[derive(Debug, Default)]
pub struct TemplateGroupBuilder {
    options: TemplateOptions,
    sources: Vec<Source>,
}

#[derive(Debug)]
struct Source {
    name: String,
    text: String,
    headered: bool,
}

impl TemplateGroupBuilder {
    /// Options shared by all members
    pub fn options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a member from source text
    pub fn add(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.push(Source {
            name: name.into(),
            text: text.into(),
            headered: false,
        });
        self
    }

    /// Add every `*.jsont` file in `dir`, named by file stem
    ///
    /// Files may start with an option header.
    pub fn add_dir(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(TEMPLATE_EXTENSION)
            {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let text = std::fs::read_to_string(&path)?;
            self.sources.push(Source {
                name: name.to_string(),
                text,
                headered: true,
            });
        }
        Ok(self)
    }

    /// Compile every member
    pub fn build(self) -> std::result::Result<TemplateGroup, CompileError> {
        let inner = Arc::new(GroupInner::default());
        let names: HashSet<String> = self.sources.iter().map(|s| s.name.clone()).collect();

        let resolver = GroupResolver {
            names: Arc::new(names),
            group: Arc::downgrade(&inner),
        };
        let mut chain = LookupChain::new();
        if let Some(user) = self.options.more_formatters.clone() {
            chain.push(user);
        }
        chain.push(Arc::new(resolver));
        let options = self.options.with_formatters(chain);

        let mut templates = BTreeMap::new();
        for source in self.sources {
            let template = if source.headered {
                Template::from_headered_str(&source.text, options.clone())?
            } else {
                Template::compile(&source.text, options.clone())?
            };
            if templates.contains_key(&source.name) {
                return Err(CompileError::Configuration(format!(
                    "template '{}' is defined more than once",
                    source.name
                )));
            }
            templates.insert(source.name, template);
        }

        tracing::debug!(templates = templates.len(), "built template group");
        // Freshly created, so the cell is empty
        let _ = inner.templates.set(templates);
        Ok(TemplateGroup { inner })
    }
}

/// Resolves `template NAME` for members of one group
struct GroupResolver {
    names: Arc<HashSet<String>>,
    group: Weak<GroupInner>,
}

impl FormatterResolver for GroupResolver {
    fn resolve(&self, name: &str) -> Option<Arc<dyn Formatter>> {
        let target = name.strip_prefix(TEMPLATE_FORMATTER)?.trim();
        self.names.contains(target).then(|| {
            Arc::new(TemplateCall {
                name: target.to_string(),
                group: self.group.clone(),
            }) as Arc<dyn Formatter>
        })
    }
}

/// Formatter expanding one group member with the value as data
struct TemplateCall {
    name: String,
    group: Weak<GroupInner>,
}

impl Formatter for TemplateCall {
    fn format(
        &self,
        value: &Value,
        context: &ScopedContext<'_>,
    ) -> std::result::Result<Value, FormatterError> {
        let group = self
            .group
            .upgrade()
            .ok_or_else(|| FormatterError::Context("template group was dropped".to_string()))?;
        let template = group
            .templates
            .get()
            .and_then(|templates| templates.get(&self.name))
            .ok_or_else(|| {
                FormatterError::Context(format!("template '{}' is not available", self.name))
            })?;
        Ok(Value::String(template.expand_nested(value, context)?))
    }
}
