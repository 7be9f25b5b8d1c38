//! Unit tests for directive classification

use super::directive::{classify, Clause, Directive, Name};
use crate::config::Meta;
use crate::template::error::CompileError;

fn classify_default(content: &str) -> Result<Directive<'_>, CompileError> {
    // Leaked so the returned directive can borrow the metacharacters
    let meta: &'static Meta = Box::leak(Box::new(Meta::default()));
    classify(content, meta, '|', 1)
}

fn path(segments: &[&str]) -> Name {
    Name::Path(segments.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_name_parse() {
    assert_eq!(Name::parse("@"), Some(Name::Cursor));
    assert_eq!(Name::parse("@index"), Some(Name::Index));
    assert_eq!(Name::parse("a"), Some(path(&["a"])));
    assert_eq!(Name::parse("a.b.c"), Some(path(&["a", "b", "c"])));
    assert_eq!(Name::parse("base-url"), Some(path(&["base-url"])));
    assert_eq!(Name::parse(""), None);
    assert_eq!(Name::parse("a b"), None);
    assert_eq!(Name::parse("a..b"), None);
    assert_eq!(Name::parse(".a"), None);
}

#[test]
fn test_name_display_round_trips() {
    for text in ["@", "@index", "a", "a.b.c"] {
        assert_eq!(Name::parse(text).unwrap().to_string(), text);
    }
}

#[test]
fn test_comment() {
    assert_eq!(classify_default("# anything {here}"), Ok(Directive::Comment));
}

#[test]
fn test_escapes() {
    assert_eq!(classify_default(".meta-left"), Ok(Directive::Escape("{")));
    assert_eq!(classify_default(".meta-right"), Ok(Directive::Escape("}")));
    assert_eq!(classify_default(".space"), Ok(Directive::Escape(" ")));
}

#[test]
fn test_sections() {
    assert_eq!(
        classify_default(".section people"),
        Ok(Directive::Section {
            repeated: false,
            name: path(&["people"])
        })
    );
    assert_eq!(
        classify_default(".repeated section @"),
        Ok(Directive::Section {
            repeated: true,
            name: Name::Cursor
        })
    );
    assert_eq!(
        classify_default(".section   a.b  "),
        Ok(Directive::Section {
            repeated: false,
            name: path(&["a", "b"])
        })
    );
}

#[test]
fn test_clauses_and_end() {
    assert_eq!(classify_default(".or"), Ok(Directive::Clause(Clause::Or)));
    assert_eq!(
        classify_default(".alternates with"),
        Ok(Directive::Clause(Clause::AlternatesWith))
    );
    assert_eq!(classify_default(".end"), Ok(Directive::End));
}

#[test]
fn test_substitutions() {
    assert_eq!(
        classify_default("name"),
        Ok(Directive::Substitution {
            name: path(&["name"]),
            formatters: vec![]
        })
    );
    assert_eq!(
        classify_default("params|url-params|html"),
        Ok(Directive::Substitution {
            name: path(&["params"]),
            formatters: vec!["url-params", "html"]
        })
    );
    assert_eq!(
        classify_default("n|printf %.2f"),
        Ok(Directive::Substitution {
            name: path(&["n"]),
            formatters: vec!["printf %.2f"]
        })
    );
}

#[test]
fn test_colon_format_char() {
    let meta = Meta::default();
    assert_eq!(
        classify("name:html", &meta, ':', 1),
        Ok(Directive::Substitution {
            name: path(&["name"]),
            formatters: vec!["html"]
        })
    );
    // With ':' as the format char, '|' is part of the name
    assert_eq!(classify("a|b c", &meta, ':', 1), Ok(Directive::Text));
}

#[test]
fn test_non_directives_are_text() {
    assert_eq!(classify_default(" name "), Ok(Directive::Text));
    assert_eq!(classify_default("color: red"), Ok(Directive::Text));
    assert_eq!(classify_default(" return 1; "), Ok(Directive::Text));
    assert_eq!(classify_default("a{b"), Ok(Directive::Text));
    assert_eq!(classify_default("..."), Ok(Directive::Text));
}

#[test]
fn test_unknown_keyword() {
    let err = classify_default(".sectoin x").unwrap_err();
    assert_eq!(
        err,
        CompileError::syntax("unknown directive '{.sectoin x}'", 1)
    );
}

#[test]
fn test_section_errors() {
    assert!(matches!(
        classify_default(".section"),
        Err(CompileError::Syntax { .. })
    ));
    assert!(matches!(
        classify_default(".repeated section"),
        Err(CompileError::Syntax { .. })
    ));
    assert!(matches!(
        classify_default(".section @index"),
        Err(CompileError::Syntax { .. })
    ));
    assert!(matches!(
        classify_default(".section a..b"),
        Err(CompileError::Syntax { .. })
    ));
    assert!(matches!(
        classify_default(".alternates"),
        Err(CompileError::Syntax { .. })
    ));
}
