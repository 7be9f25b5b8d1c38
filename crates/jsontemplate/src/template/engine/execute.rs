//! Program interpreter

use serde_json::Value;
use std::borrow::Cow;

use super::blocks::{Block, FormatterCall, Program, Statement};
use super::context::ScopedContext;
use super::directive::Name;
use super::helpers::{is_truthy, preview_value, stringify_value, value_kind};
use crate::template::error::EvalError;

/// Walks a [`Program`] and emits output fragments
pub(crate) struct Executor<'p, 'e> {
    program: &'p Program,
    emit: &'e mut dyn FnMut(&str),
}

impl<'p, 'e> Executor<'p, 'e> {
    pub fn new(program: &'p Program, emit: &'e mut dyn FnMut(&str)) -> Self {
        Self { program, emit }
    }

    pub fn run(&mut self, context: &mut ScopedContext<'_>) -> Result<(), EvalError> {
        let root = self.program.block(self.program.root);
        self.statements(&root.default, context)
    }

    fn statements(
        &mut self,
        statements: &'p [Statement],
        context: &mut ScopedContext<'_>,
    ) -> Result<(), EvalError> {
        for statement in statements {
            match statement {
                Statement::Literal(text) => (self.emit)(text),
                Statement::Substitute { name, formatters } => {
                    self.substitute(name, formatters, context)?
                }
                Statement::Section(id) => self.section(self.program.block(*id), context)?,
                Statement::RepeatedSection(id) => {
                    self.repeated_section(self.program.block(*id), context)?
                }
            }
        }
        Ok(())
    }

    fn substitute(
        &mut self,
        name: &Name,
        formatters: &[FormatterCall],
        context: &ScopedContext<'_>,
    ) -> Result<(), EvalError> {
        let mut value: Cow<'_, Value> = match name {
            Name::Cursor => Cow::Borrowed(context.cursor()),
            Name::Index => {
                let index = context
                    .index()
                    .ok_or_else(|| EvalError::undefined(name.to_string()))?;
                Cow::Owned(Value::from(index))
            }
            Name::Path(path) => Cow::Borrowed(context.lookup_path(path)?),
        };
        if value.is_null() {
            return Err(EvalError::undefined(name.to_string()));
        }

        for call in formatters {
            let next = call
                .formatter
                .format(&value, context)
                .map_err(|source| EvalError::Formatter {
                    formatter: call.spec.clone(),
                    value: preview_value(&value),
                    source,
                })?;
            value = Cow::Owned(next);
        }

        match value.as_ref() {
            Value::String(s) => (self.emit)(s),
            other => match stringify_value(other) {
                Some(s) => (self.emit)(&s),
                None => {
                    return Err(EvalError::NullValue {
                        name: name.to_string(),
                    })
                }
            },
        }
        Ok(())
    }

    fn section(
        &mut self,
        block: &'p Block,
        context: &mut ScopedContext<'_>,
    ) -> Result<(), EvalError> {
        match &block.name {
            Some(Name::Path(path)) => {
                let value = context.push_section(path);
                tracing::trace!(section = %path.join("."), taken = is_truthy(value), "enter section");
                if is_truthy(value) {
                    self.statements(&block.default, context)?;
                    context.pop();
                } else {
                    context.pop();
                    self.or_clause(block, context)?;
                }
            }
            // `@` tests the cursor in place
            _ => {
                if is_truthy(context.cursor()) {
                    self.statements(&block.default, context)?;
                } else {
                    self.or_clause(block, context)?;
                }
            }
        }
        Ok(())
    }

    fn repeated_section(
        &mut self,
        block: &'p Block,
        context: &mut ScopedContext<'_>,
    ) -> Result<(), EvalError> {
        let Some(Name::Path(path)) = &block.name else {
            let cursor = context.cursor();
            let Value::Array(items) = cursor else {
                return Err(EvalError::CursorNotList {
                    found: value_kind(cursor),
                });
            };
            tracing::trace!(section = "@", items = items.len(), "enter repeated section");
            return if items.is_empty() {
                self.or_clause(block, context)
            } else {
                self.iterate(block, items, context)
            };
        };

        let value = context.push_section(path);
        tracing::trace!(section = %path.join("."), "enter repeated section");
        match value {
            Value::Array(items) if !items.is_empty() => {
                self.iterate(block, items, context)?;
                context.pop();
                Ok(())
            }
            value if !is_truthy(value) => {
                context.pop();
                self.or_clause(block, context)
            }
            value => Err(EvalError::NotAList {
                name: path.join("."),
                found: value_kind(value),
            }),
        }
    }

    fn iterate<'d>(
        &mut self,
        block: &'p Block,
        items: &'d [Value],
        context: &mut ScopedContext<'d>,
    ) -> Result<(), EvalError> {
        for (index, item) in items.iter().enumerate() {
            context.push_item(item, index);
            self.statements(&block.default, context)?;
            // The separator still sees the item it follows
            if index + 1 < items.len() {
                if let Some(alternates) = &block.alternates {
                    self.statements(alternates, context)?;
                }
            }
            context.pop();
        }
        Ok(())
    }

    fn or_clause(
        &mut self,
        block: &'p Block,
        context: &mut ScopedContext<'_>,
    ) -> Result<(), EvalError> {
        match &block.or {
            Some(statements) => self.statements(statements, context),
            None => Ok(()),
        }
    }
}
