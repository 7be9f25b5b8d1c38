//! Compiled program representation and the builder that produces it

use std::fmt;
use std::sync::Arc;

use super::directive::{Clause, Name};
use crate::formatters::{Formatter, FormatterRegistry};
use crate::template::error::CompileError;

/// Index of a block in [`Program::blocks`]
pub(crate) type BlockId = usize;

/// A resolved formatter together with the name it was written as
#[derive(Clone)]
pub(crate) struct FormatterCall {
    pub spec: String,
    pub formatter: Arc<dyn Formatter>,
}

impl fmt::Debug for FormatterCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FormatterCall").field(&self.spec).finish()
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Statement {
    Literal(String),
    Substitute {
        name: Name,
        formatters: Vec<FormatterCall>,
    },
    Section(BlockId),
    RepeatedSection(BlockId),
}

/// One section body
#[derive(Debug, Clone, Default)]
pub(crate) struct Block {
    /// `None` for the root block
    pub name: Option<Name>,
    pub repeated: bool,
    pub default: Vec<Statement>,
    pub or: Option<Vec<Statement>>,
    pub alternates: Option<Vec<Statement>>,
}

/// Immutable compiled template
#[derive(Debug, Clone)]
pub(crate) struct Program {
    pub blocks: Vec<Block>,
    pub root: BlockId,
}

impl Program {
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id]
    }
}

/// Open block on the builder stack
struct Open {
    id: BlockId,
    clause: Clause,
    line: usize,
}

/// Builds a [`Program`] from classified directives
///
/// Keeps a stack of open blocks; statements are appended to the active
/// clause of the innermost one.
pub(crate) struct ProgramBuilder<'a> {
    blocks: Vec<Block>,
    stack: Vec<Open>,
    registry: FormatterRegistry<'a>,
    default_formatter: Option<&'a str>,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(registry: FormatterRegistry<'a>, default_formatter: Option<&'a str>) -> Self {
        Self {
            blocks: vec![Block::default()],
            stack: vec![Open {
                id: 0,
                clause: Clause::Default,
                line: 1,
            }],
            registry,
            default_formatter,
        }
    }

    fn current(&mut self) -> &mut Vec<Statement> {
        let (id, clause) = self
            .stack
            .last()
            .map_or((0, Clause::Default), |open| (open.id, open.clause));
        let block = &mut self.blocks[id];
        match clause {
            Clause::Default => &mut block.default,
            Clause::Or => block.or.get_or_insert_with(Vec::new),
            Clause::AlternatesWith => block.alternates.get_or_insert_with(Vec::new),
        }
    }

    /// Append literal text, merging with a preceding literal
    pub fn literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let statements = self.current();
        if let Some(Statement::Literal(previous)) = statements.last_mut() {
            previous.push_str(text);
        } else {
            statements.push(Statement::Literal(text.to_string()));
        }
    }

    pub fn substitution(
        &mut self,
        name: Name,
        specs: &[&str],
        line: usize,
    ) -> Result<(), CompileError> {
        let formatters = if specs.is_empty() {
            let spec = self
                .default_formatter
                .ok_or_else(|| CompileError::MissingFormatter {
                    name: name.to_string(),
                    line,
                })?;
            vec![self.resolve(spec, line)?]
        } else {
            specs
                .iter()
                .map(|spec| self.resolve(spec, line))
                .collect::<Result<Vec<_>, _>>()?
        };

        self.current()
            .push(Statement::Substitute { name, formatters });
        Ok(())
    }

    fn resolve(&self, spec: &str, line: usize) -> Result<FormatterCall, CompileError> {
        Ok(FormatterCall {
            spec: spec.to_string(),
            formatter: self.registry.resolve(spec, line)?,
        })
    }

    pub fn open_section(&mut self, name: Name, repeated: bool, line: usize) {
        let id = self.blocks.len();
        self.blocks.push(Block {
            name: Some(name),
            repeated,
            ..Block::default()
        });
        let statement = if repeated {
            Statement::RepeatedSection(id)
        } else {
            Statement::Section(id)
        };
        self.current().push(statement);
        self.stack.push(Open {
            id,
            clause: Clause::Default,
            line,
        });
    }

    pub fn clause(&mut self, clause: Clause, line: usize) -> Result<(), CompileError> {
        if self.stack.len() <= 1 {
            return Err(CompileError::syntax(
                format!("'{}' is only valid inside a section", clause),
                line,
            ));
        }
        let Some(open) = self.stack.last_mut() else {
            return Err(CompileError::syntax("no open section", line));
        };
        let block = &mut self.blocks[open.id];

        let slot = match clause {
            Clause::Or => &mut block.or,
            Clause::AlternatesWith if block.repeated => &mut block.alternates,
            Clause::AlternatesWith => {
                return Err(CompileError::syntax(
                    "'alternates with' is only valid inside a repeated section",
                    line,
                ))
            }
            Clause::Default => return Ok(()),
        };
        if slot.is_some() {
            return Err(CompileError::syntax(
                format!("'{}' appears twice in the same section", clause),
                line,
            ));
        }
        *slot = Some(Vec::new());
        open.clause = clause;
        Ok(())
    }

    pub fn end(&mut self, line: usize) -> Result<(), CompileError> {
        if self.stack.len() <= 1 {
            return Err(CompileError::syntax("got too many 'end' statements", line));
        }
        self.stack.pop();
        Ok(())
    }

    pub fn finish(mut self) -> Result<Program, CompileError> {
        if self.stack.len() > 1 {
            let unclosed = self.stack.len() - 1;
            let open = self.stack.pop();
            let (name, line) = open
                .map(|open| {
                    let name = self.blocks[open.id]
                        .name
                        .as_ref()
                        .map(Name::to_string)
                        .unwrap_or_default();
                    (name, open.line)
                })
                .unwrap_or_default();
            return Err(CompileError::syntax(
                format!(
                    "got too few 'end' statements: {} section(s) left open, innermost '{}'",
                    unclosed, name
                ),
                line,
            ));
        }

        Ok(Program {
            blocks: self.blocks,
            root: 0,
        })
    }
}
