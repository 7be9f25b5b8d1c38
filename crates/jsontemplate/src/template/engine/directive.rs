//! Directive classification
//!
//! Turns the raw text between metacharacters into a typed directive:
//!
//! - `#...` → comment
//! - `.meta-left`, `.meta-right`, `.space` → escaped literal text
//! - `.section NAME`, `.repeated section NAME` → section open
//! - `.or`, `.alternates with` → clause switch
//! - `.end` → section close
//! - `NAME`, `NAME|f|g` → substitution
//!
//! Content that fits none of these (whitespace in the name, empty path
//! segments) is not a directive and stays literal text.

use std::fmt;

use crate::config::Meta;
use crate::template::error::CompileError;

/// A variable reference in a substitution or section
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Name {
    /// `@`, the current scope value
    Cursor,
    /// `@index`, 1-based position in the nearest repeated section
    Index,
    /// `a` or `a.b.c`
    Path(Vec<String>),
}

impl Name {
    /// Parse a name, or `None` if the text is not a valid name
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() || text.chars().any(char::is_whitespace) {
            return None;
        }

        match text {
            "@" => Some(Name::Cursor),
            "@index" => Some(Name::Index),
            _ => {
                let segments: Vec<String> = text.split('.').map(str::to_string).collect();
                segments
                    .iter()
                    .all(|s| !s.is_empty())
                    .then_some(Name::Path(segments))
            }
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Cursor => f.write_str("@"),
            Name::Index => f.write_str("@index"),
            Name::Path(segments) => f.write_str(&segments.join(".")),
        }
    }
}

/// Statement list within a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clause {
    Default,
    Or,
    AlternatesWith,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Default => f.write_str("default"),
            Clause::Or => f.write_str("or"),
            Clause::AlternatesWith => f.write_str("alternates with"),
        }
    }
}

/// Classified directive
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Directive<'a> {
    Comment,
    /// Literal produced by `.meta-left`, `.meta-right` or `.space`
    Escape(&'a str),
    Section { repeated: bool, name: Name },
    Clause(Clause),
    End,
    /// Formatter specs as written; empty means "use the default formatter"
    Substitution { name: Name, formatters: Vec<&'a str> },
    /// Not a directive; emit the original text
    Text,
}

/// Classify directive content
pub(crate) fn classify<'a>(
    content: &'a str,
    meta: &'a Meta,
    format_char: char,
    line: usize,
) -> Result<Directive<'a>, CompileError> {
    if content.starts_with('#') {
        return Ok(Directive::Comment);
    }

    if let Some(keyword) = content.strip_prefix('.') {
        if keyword.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return classify_keyword(keyword.trim(), meta, line);
        }
    }

    let mut parts = content.split(format_char);
    let name_text = parts.next().unwrap_or_default();
    if name_text.contains(meta.left.as_str()) {
        return Ok(Directive::Text);
    }

    Ok(match Name::parse(name_text) {
        Some(name) => Directive::Substitution {
            name,
            formatters: parts.collect(),
        },
        None => Directive::Text,
    })
}

fn classify_keyword<'a>(
    keyword: &str,
    meta: &'a Meta,
    line: usize,
) -> Result<Directive<'a>, CompileError> {
    match keyword {
        "meta-left" => return Ok(Directive::Escape(&meta.left)),
        "meta-right" => return Ok(Directive::Escape(&meta.right)),
        "space" => return Ok(Directive::Escape(" ")),
        "or" => return Ok(Directive::Clause(Clause::Or)),
        "end" => return Ok(Directive::End),
        _ => {}
    }

    let mut words = keyword.split_whitespace();
    let first = words.next().unwrap_or_default();

    if first == "alternates" && words.clone().eq(["with"]) {
        return Ok(Directive::Clause(Clause::AlternatesWith));
    }

    let repeated = match first {
        "section" => false,
        "repeated" if words.next() == Some("section") => true,
        _ => {
            return Err(CompileError::syntax(
                format!("unknown directive '{}.{}{}'", meta.left, keyword, meta.right),
                line,
            ))
        }
    };

    let Some(name_text) = words.next() else {
        return Err(CompileError::syntax(
            format!("missing section name in '{}.{}{}'", meta.left, keyword, meta.right),
            line,
        ));
    };

    match Name::parse(name_text) {
        Some(Name::Index) => Err(CompileError::syntax(
            "@index cannot be used as a section name",
            line,
        )),
        Some(name) => Ok(Directive::Section { repeated, name }),
        None => Err(CompileError::syntax(
            format!("invalid section name '{}'", name_text),
            line,
        )),
    }
}
