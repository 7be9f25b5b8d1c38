//! Canonical data sets and template directories for tests

use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// A page header and a list of people
pub fn people_data() -> Value {
    json!({
        "header": "People",
        "people": [
            {"name": "John", "age": 30},
            {"name": "Jane", "age": 28},
            {"name": "Bob", "age": 45}
        ]
    })
}

/// A small site: base URL, a title and nested navigation
pub fn site_data() -> Value {
    json!({
        "base-url": "http://example.com",
        "title": "Home & Garden",
        "nav": [
            {"label": "About", "href": "about.html"},
            {"label": "Contact <us>", "href": "contact.html"}
        ],
        "footer": null
    })
}

/// Write `(name, source)` pairs as `name.jsont` files in `dir`
pub fn write_templates(dir: &Path, templates: &[(&str, &str)]) -> Vec<PathBuf> {
    templates
        .iter()
        .map(|(name, source)| {
            crate::write_file(dir, &format!("{}.jsont", name), source)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_templates() {
        let temp = crate::temp_dir_in_workspace();
        let paths = write_templates(temp.path(), &[("a", "{x}"), ("b", "y")]);
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("a.jsont"));
        assert_eq!(std::fs::read_to_string(&paths[1]).unwrap(), "y");
    }
}
