pub mod check;
pub mod expand;

use crate::cli::OptionArgs;
use anyhow::{Context, Result};
use jsontemplate::TemplateOptions;
use jsontemplate::config::consts::DISABLED;
use std::path::Path;

/// Build compile options: defaults, then the config file, then flags
///
/// Template headers are applied later and override all three.
pub fn resolve_options(args: &OptionArgs) -> Result<TemplateOptions> {
    let mut options = match &args.config {
        Some(path) => TemplateOptions::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TemplateOptions::default(),
    };

    if let Some(meta) = &args.meta {
        options = options.with_meta(meta.clone());
    }
    if let Some(c) = args.format_char {
        options = options.with_format_char(c);
    }
    if let Some(name) = &args.default_formatter {
        options = if name == DISABLED {
            options.without_default_formatter()
        } else {
            options.with_default_formatter(name.clone())
        };
    }

    tracing::debug!(?options, "resolved options");
    Ok(options)
}

pub fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))
}
