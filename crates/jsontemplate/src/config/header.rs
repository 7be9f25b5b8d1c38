//! Template header parsing
//!
//! A template file may start with option lines:
//!
//! ```text
//! meta: []
//! format-char: :
//! default-formatter: html
//!
//! Hello [name]
//! ```
//!
//! The first line that is not a recognized option ends the header. When at
//! least one option was read, that line must be blank; it is dropped and the
//! rest of the text is the body. Without options the whole text is the body.

use super::consts::{DISABLED, HEADER_OPTIONS};
use super::model::TemplateOptions;
use crate::template::error::CompileError;

/// Split `text` into options and body, applying header options over `options`
pub fn split_header(
    text: &str,
    mut options: TemplateOptions,
) -> Result<(TemplateOptions, &str), CompileError> {
    let mut pos = 0;
    let mut parsed = 0;

    for line in text.split_inclusive('\n') {
        let Some((name, value)) = parse_option_line(line) else {
            if parsed == 0 {
                return Ok((options, text));
            }
            if !line.trim().is_empty() {
                return Err(CompileError::Configuration(format!(
                    "must be one blank line between template options and body (got {:?})",
                    line.trim_end()
                )));
            }
            tracing::debug!(options = parsed, "parsed template header");
            return Ok((options, &text[pos + line.len()..]));
        };

        apply_option(&mut options, &name, value)?;
        parsed += 1;
        pos += line.len();
    }

    // Header only, no body
    Ok((options, &text[pos..]))
}

/// Match `name: value` where name is a recognized option (case-insensitive)
fn parse_option_line(line: &str) -> Option<(String, &str)> {
    let (name, value) = line.split_once(':')?;
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
        return None;
    }

    let name = name.to_ascii_lowercase();
    HEADER_OPTIONS
        .contains(&name.as_str())
        .then(|| (name, value.trim()))
}

fn apply_option(
    options: &mut TemplateOptions,
    name: &str,
    value: &str,
) -> Result<(), CompileError> {
    match name {
        "meta" => options.meta = value.to_string(),
        "format-char" => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => options.format_char = c,
                _ => {
                    return Err(CompileError::Configuration(format!(
                        "format-char must be a single character (got {:?})",
                        value
                    )))
                }
            }
        }
        "default-formatter" => {
            options.default_formatter = (value != DISABLED).then(|| value.to_string());
        }
        other => {
            return Err(CompileError::Configuration(format!(
                "unknown template option '{}'",
                other
            )))
        }
    }
    Ok(())
}
