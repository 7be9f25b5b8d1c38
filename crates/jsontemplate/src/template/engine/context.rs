//! Scope chain used during expansion

use serde_json::Value;

use crate::config::consts::DEFAULT_RECURSION_LIMIT;
use crate::template::error::EvalError;

/// Stand-in frame for a section whose name resolved to nothing
static NULL: Value = Value::Null;

#[derive(Debug, Clone, Copy)]
struct Frame<'a> {
    value: &'a Value,
    /// 0-based position when this frame is a repeated-section item
    index: Option<usize>,
}

/// Stack of data frames consulted innermost first
///
/// The top frame is the cursor (`@`). Sections push the value they name,
/// repeated sections push one frame per item, and lookups fall through to
/// enclosing frames. A context is created for each expansion and borrows the
/// caller's data for its lifetime.
#[derive(Debug, Clone)]
pub struct ScopedContext<'a> {
    frames: Vec<Frame<'a>>,
    /// Nesting level of template-in-template expansion, 0 at the top
    depth: usize,
    recursion_limit: usize,
}

impl<'a> ScopedContext<'a> {
    /// Context rooted at `data`
    pub fn new(data: &'a Value) -> Self {
        Self {
            frames: vec![Frame {
                value: data,
                index: None,
            }],
            depth: 0,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    pub(crate) fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Fresh context for expanding another template inside this one
    ///
    /// Fails once the nesting depth passes the recursion limit.
    pub fn nested<'b>(&self, data: &'b Value) -> Result<ScopedContext<'b>, EvalError> {
        let depth = self.depth + 1;
        if depth > self.recursion_limit {
            return Err(EvalError::RecursionLimit {
                limit: self.recursion_limit,
            });
        }
        Ok(ScopedContext {
            frames: vec![Frame {
                value: data,
                index: None,
            }],
            depth,
            recursion_limit: self.recursion_limit,
        })
    }

    /// The current scope value
    pub fn cursor(&self) -> &'a Value {
        self.frames.last().map_or(&NULL, |frame| frame.value)
    }

    /// Find `name` in the nearest enclosing map where it is set and not null
    pub fn lookup(&self, name: &str) -> Result<&'a Value, EvalError> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| match frame.value {
                Value::Object(map) => map.get(name).filter(|v| !v.is_null()),
                _ => None,
            })
            .ok_or_else(|| EvalError::undefined(name))
    }

    /// Resolve `a.b.c`: `a` by scope lookup, the rest by descending into maps
    pub(crate) fn lookup_path(&self, path: &[String]) -> Result<&'a Value, EvalError> {
        let Some((first, rest)) = path.split_first() else {
            return Err(EvalError::undefined(""));
        };
        let undefined = || EvalError::undefined(path.join("."));

        let mut value = self.lookup(first).map_err(|_| undefined())?;
        for segment in rest {
            value = match value {
                Value::Object(map) => map
                    .get(segment)
                    .filter(|v| !v.is_null())
                    .ok_or_else(undefined)?,
                _ => return Err(undefined()),
            };
        }
        Ok(value)
    }

    /// 1-based position in the nearest enclosing repeated section
    pub fn index(&self) -> Option<usize> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.index)
            .map(|i| i + 1)
    }

    /// Nesting level of template-in-template expansion
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Push the value `path` resolves to, null when it resolves to nothing
    pub(crate) fn push_section(&mut self, path: &[String]) -> &'a Value {
        let value = self.lookup_path(path).unwrap_or(&NULL);
        self.frames.push(Frame { value, index: None });
        value
    }

    /// Push one repeated-section item
    pub(crate) fn push_item(&mut self, item: &'a Value, index: usize) {
        self.frames.push(Frame {
            value: item,
            index: Some(index),
        });
    }

    pub(crate) fn pop(&mut self) {
        // The root frame stays for the whole expansion
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }
}
