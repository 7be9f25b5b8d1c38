//! Expand command - render a template against JSON data

use super::{read_template, resolve_options};
use crate::cli::OptionArgs;
use crate::output;
use anyhow::{Context, Result, bail};
use jsontemplate::{Template, TemplateGroup};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Expand a template file, inline source, or group member
///
/// Output is written only once expansion has succeeded.
pub fn run(
    template: Option<PathBuf>,
    inline: Option<String>,
    templates_dir: Option<PathBuf>,
    data: Option<PathBuf>,
    args: &OptionArgs,
) -> Result<()> {
    let options = resolve_options(args)?;
    let data = read_data(data.as_deref())?;

    let expanded = match (template, inline, templates_dir) {
        (Some(name), None, Some(dir)) => {
            let group = TemplateGroup::builder()
                .options(options)
                .add_dir(&dir)
                .with_context(|| format!("failed to load templates from {}", dir.display()))?
                .build()?;
            group.expand(&member_name(&name), &data)?
        }
        (None, _, Some(_)) => bail!("--templates-dir needs the name of a template to expand"),
        (Some(path), None, None) => {
            let text = read_template(&path)?;
            Template::from_headered_str(&text, options)
                .with_context(|| format!("failed to compile {}", path.display()))?
                .expand(&data)?
        }
        (None, Some(text), None) => Template::from_headered_str(&text, options)?.expand(&data)?,
        (None, None, None) => bail!("no template given; pass a file or --template"),
        (Some(_), Some(_), _) => bail!("pass either a template file or --template, not both"),
    };

    output::print_raw(&expanded)?;
    Ok(())
}

fn read_data(path: Option<&Path>) -> Result<Value> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read data {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read data from stdin")?;
            text
        }
    };
    serde_json::from_str(&text).context("data is not valid JSON")
}

/// `page`, `page.jsont` and `dir/page.jsont` all name the member `page`
fn member_name(name: &Path) -> String {
    let is_template = name
        .extension()
        .is_some_and(|ext| ext == jsontemplate::template::group::TEMPLATE_EXTENSION);
    let stem = if is_template { name.file_stem() } else { name.file_name() };
    stem.map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string_lossy().into_owned())
}
