//! Section rendering tests for template engine

use super::helpers::{expand_err, expand_str, people_data};
use super::*;
use serde_json::json;

const OR_TEMPLATE: &str = "{.section x}Y{.or}N{.end}";

#[test]
fn test_falsy_values_take_or_branch() {
    for data in [
        json!({"x": null}),
        json!({"x": false}),
        json!({"x": []}),
        json!({"x": {}}),
        json!({"x": 0}),
        json!({"x": ""}),
        json!({}),
    ] {
        assert_eq!(expand_str(OR_TEMPLATE, &data), "N", "data: {}", data);
    }
}

#[test]
fn test_truthy_values_take_section_branch() {
    for data in [
        json!({"x": 1}),
        json!({"x": [1]}),
        json!({"x": {"k": 1}}),
        json!({"x": true}),
        json!({"x": "s"}),
    ] {
        assert_eq!(expand_str(OR_TEMPLATE, &data), "Y", "data: {}", data);
    }
}

#[test]
fn test_falsy_section_without_or_emits_nothing() {
    assert_eq!(expand_str("a{.section x}Y{.end}b", &json!({})), "ab");
}

#[test]
fn test_missing_section_matches_null_section() {
    let template = "{header}\n{.section people}has people\n{.or}nobody\n{.end}";
    let missing = expand_str(template, &json!({"header": "H"}));
    let null = expand_str(template, &json!({"header": "H", "people": null}));
    assert_eq!(missing, "H\nnobody\n");
    assert_eq!(missing, null);
}

#[test]
fn test_section_pushes_scope() {
    let data = people_data();
    assert_eq!(
        expand_str("{.section owner}{name}: {contact.email}{.end}", &data),
        "Ada: ada@example.com"
    );
}

#[test]
fn test_lookup_falls_back_to_enclosing_scope() {
    let data = json!({"a": {}, "b": "X"});
    // An empty map is falsy, so the section is skipped
    assert_eq!(expand_str("{.section a}{b}{.end}", &data), "");

    let data = json!({"a": {"other": 1}, "b": "X"});
    assert_eq!(expand_str("{.section a}{b}{.end}", &data), "X");
}

#[test]
fn test_null_in_inner_scope_is_absence() {
    let data = json!({"a": {"b": null}, "c": "X"});
    let err = expand_err("{.section a}{b}{.end}", &data);
    assert!(err.is_undefined_variable());

    let data = json!({"a": {"b": null, "k": 1}, "b": "outer"});
    assert_eq!(expand_str("{.section a}{b}{.end}", &data), "outer");
}

#[test]
fn test_inner_scope_shadows_outer() {
    let data = json!({"name": "outer", "inner": {"name": "inner"}});
    assert_eq!(
        expand_str("{name} {.section inner}{name}{.end} {name}", &data),
        "outer inner outer"
    );
}

#[test]
fn test_section_name_is_looked_up_outward() {
    let data = json!({"a": {"x": 1}, "b": "outer"});
    assert_eq!(
        expand_str("{.section a}{.section b}{@}{.end}{.end}", &data),
        "outer"
    );
}

#[test]
fn test_section_and_substitution_resolve_identically() {
    let data = json!({
        "v": "root",
        "a": {"v": "a", "b": {"k": 1, "v": null}},
        "c": {"k": 2}
    });
    let scopes = ["", "{.section a}", "{.section a}{.section b}", "{.section c}"];
    let ends = ["", "{.end}", "{.end}{.end}", "{.end}"];
    for (open, end) in scopes.iter().zip(ends) {
        let by_substitution = expand_str(&format!("{open}{{v}}{end}"), &data);
        let by_section = expand_str(&format!("{open}{{.section v}}{{@}}{{.end}}{end}"), &data);
        assert_eq!(by_substitution, by_section, "scope {:?}", open);
    }
}

#[test]
fn test_cursor_section() {
    assert_eq!(
        expand_str("{.section @}yes{.or}no{.end}", &json!({"k": 1})),
        "yes"
    );
    assert_eq!(
        expand_str("{.section @}yes{.or}no{.end}", &json!([])),
        "no"
    );
}

#[test]
fn test_section_over_string() {
    let data = json!({"name": "World"});
    assert_eq!(
        expand_str("{.section name}Hi {@}{.end}", &data),
        "Hi World"
    );
}

#[test]
fn test_dotted_section() {
    let data = people_data();
    assert_eq!(
        expand_str("{.section owner.contact}{email}{.end}", &data),
        "ada@example.com"
    );
    assert_eq!(
        expand_str("{.section owner.missing}x{.or}none{.end}", &data),
        "none"
    );
}

#[test]
fn test_or_clause_sees_enclosing_scope() {
    let data = json!({"x": false, "msg": "fallback"});
    assert_eq!(expand_str("{.section x}{.or}{msg}{.end}", &data), "fallback");
}

#[test]
fn test_nested_sections() {
    let data = json!({"a": {"b": {"c": "deep"}}});
    let template = "{.section a}\n{.section b}\n{.section c}\n{@}\n{.end}\n{.end}\n{.end}\n";
    assert_eq!(expand_str(template, &data), "deep\n");
}
