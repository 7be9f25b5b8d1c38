//! Template engine implementation
//!
//! Compilation runs the [`TokenStream`](tokenize::TokenStream) over the
//! template text, classifies each directive, and feeds the result to a
//! [`ProgramBuilder`](blocks::ProgramBuilder). The finished program is shared
//! behind an `Arc` and walked by the [`Executor`](execute::Executor) once per
//! expansion with a fresh [`ScopedContext`].

mod blocks;
pub mod context;
mod directive;
mod execute;
pub(crate) mod helpers;
mod tokenize;

use serde_json::Value;
use std::sync::Arc;

use crate::config::{split_header, Meta, TemplateOptions};
use crate::formatters::FormatterRegistry;
use crate::template::error::{CompileError, EvalError};

use blocks::{Program, ProgramBuilder};
use directive::{classify, Directive};
use execute::Executor;
use tokenize::{Token, TokenStream};

pub use context::ScopedContext;

/// A compiled template
///
/// Compile once, expand any number of times. Cloning is cheap and a
/// template can be expanded from several threads at once.
#[derive(Debug, Clone)]
pub struct Template {
    program: Arc<Program>,
    options: TemplateOptions,
}

impl Template {
    /// Compile with default options
    pub fn new(text: &str) -> Result<Self, CompileError> {
        Self::compile(text, TemplateOptions::default())
    }

    /// Compile with the given options
    pub fn compile(text: &str, options: TemplateOptions) -> Result<Self, CompileError> {
        let program = compile(text, &options)?;
        Ok(Self {
            program: Arc::new(program),
            options,
        })
    }

    /// Compile text that may start with `key: value` option lines
    ///
    /// Header options override `options`. See [`split_header`].
    pub fn from_headered_str(text: &str, options: TemplateOptions) -> Result<Self, CompileError> {
        let (options, body) = split_header(text, options)?;
        Self::compile(body, options)
    }

    /// Options this template was compiled with
    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// Expand against `data` and return the output
    pub fn expand(&self, data: &Value) -> Result<String, EvalError> {
        let mut output = String::new();
        self.render(data, |fragment| output.push_str(fragment))?;
        Ok(output)
    }

    /// Expand against `data`, passing each output fragment to `emit`
    ///
    /// On error, fragments already emitted are an incomplete expansion.
    pub fn render<F>(&self, data: &Value, mut emit: F) -> Result<(), EvalError>
    where
        F: FnMut(&str),
    {
        tracing::trace!(blocks = self.program.blocks.len(), "render");
        let mut context =
            ScopedContext::new(data).with_recursion_limit(self.options.recursion_limit);
        Executor::new(&self.program, &mut emit).run(&mut context)
    }

    /// Expand inside another expansion, one level deeper than `parent`
    pub(crate) fn expand_nested(
        &self,
        data: &Value,
        parent: &ScopedContext<'_>,
    ) -> Result<String, EvalError> {
        let mut context = parent.nested(data)?;
        let mut output = String::new();
        let mut emit = |fragment: &str| output.push_str(fragment);
        Executor::new(&self.program, &mut emit).run(&mut context)?;
        Ok(output)
    }
}

/// Compile and expand in one step
pub fn expand(text: &str, data: &Value) -> crate::error::Result<String> {
    Ok(Template::new(text)?.expand(data)?)
}

fn compile(text: &str, options: &TemplateOptions) -> Result<Program, CompileError> {
    let meta = Meta::parse(&options.meta)?;
    let format_char = options.validated_format_char()?;
    let registry = FormatterRegistry::new(options.more_formatters.as_deref());
    let mut builder = ProgramBuilder::new(registry, options.default_formatter.as_deref());

    for token in TokenStream::new(text, &meta) {
        let (content, newline, line) = match token {
            Token::Literal(text) => {
                builder.literal(text);
                continue;
            }
            Token::Directive {
                content,
                newline,
                line,
            } => (content, newline, line),
        };
        let trailing = if newline { "\n" } else { "" };

        match classify(content, &meta, format_char, line)? {
            Directive::Comment => {}
            Directive::Escape(text) => builder.literal(text),
            Directive::Section { repeated, name } => builder.open_section(name, repeated, line),
            Directive::Clause(clause) => builder.clause(clause, line)?,
            Directive::End => builder.end(line)?,
            Directive::Substitution { name, formatters } => {
                builder.substitution(name, &formatters, line)?;
                builder.literal(trailing);
            }
            Directive::Text => {
                builder.literal(&meta.left);
                builder.literal(content);
                builder.literal(&meta.right);
                builder.literal(trailing);
            }
        }
    }

    let program = builder.finish()?;
    tracing::debug!(
        blocks = program.blocks.len(),
        meta = %options.meta,
        format_char = %format_char,
        "compiled template"
    );
    Ok(program)
}

#[cfg(test)]
mod tests;
