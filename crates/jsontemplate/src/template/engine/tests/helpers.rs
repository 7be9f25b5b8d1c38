//! Shared test helpers for template engine tests

use super::*;
use serde_json::json;

/// Compile with default options and expand, panicking on any error
pub(super) fn expand_str(template: &str, data: &Value) -> String {
    Template::new(template)
        .unwrap_or_else(|e| panic!("compile failed for {:?}: {}", template, e))
        .expand(data)
        .unwrap_or_else(|e| panic!("expand failed for {:?}: {}", template, e))
}

/// Compile with `options` and expand, panicking on any error
pub(super) fn expand_with(template: &str, options: TemplateOptions, data: &Value) -> String {
    Template::compile(template, options)
        .unwrap()
        .expand(data)
        .unwrap()
}

/// Compile with default options and return the expansion error
pub(super) fn expand_err(template: &str, data: &Value) -> EvalError {
    match Template::new(template).unwrap().expand(data) {
        Ok(output) => panic!("expected an error, got {:?}", output),
        Err(e) => e,
    }
}

/// Return the compile error for `template` under default options
pub(super) fn compile_err(template: &str) -> CompileError {
    match Template::new(template) {
        Ok(_) => panic!("expected {:?} to fail to compile", template),
        Err(e) => e,
    }
}

/// Scalars at the top level
pub(super) fn simple_data() -> Value {
    json!({
        "title": "My Title",
        "count": 42,
        "price": 9.99,
        "enabled": true,
        "nothing": null
    })
}

/// A page with a list of people and a nested owner map
pub(super) fn people_data() -> Value {
    json!({
        "header": "People",
        "owner": {"name": "Ada", "contact": {"email": "ada@example.com"}},
        "people": [
            {"name": "John", "age": 30},
            {"name": "Jane", "age": 28},
            {"name": "Bob", "age": 45}
        ]
    })
}
