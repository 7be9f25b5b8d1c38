//! Check command - compile templates without expanding them

use super::{read_template, resolve_options};
use crate::cli::OptionArgs;
use crate::output;
use anyhow::{Result, bail};
use colored::Colorize;
use jsontemplate::Template;
use std::path::PathBuf;

/// Compile every template, report each result, fail if any did not compile
pub fn run(templates: &[PathBuf], args: &OptionArgs) -> Result<()> {
    let options = resolve_options(args)?;
    let mut failed = 0;

    for path in templates {
        let compiled = read_template(path)
            .and_then(|text| Ok(Template::from_headered_str(&text, options.clone())?));
        match compiled {
            Ok(_) => output::print_text(&format!("{} {}", "✓".green().bold(), path.display()))?,
            Err(e) => {
                failed += 1;
                output::print_text(&format!("{} {}: {:#}", "✗".red().bold(), path.display(), e))?;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} template(s) failed to compile", failed, templates.len());
    }
    Ok(())
}
