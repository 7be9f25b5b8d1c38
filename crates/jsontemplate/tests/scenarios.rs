//! End-to-end expansion scenarios

use jsontemplate::{expand, EvalError, Template, TemplateOptions};
use jsontemplate_testkit::{people_data, site_data};
use serde_json::json;

#[test]
fn test_hello_world() {
    let output = expand("Hello {name}", &json!({"name": "World"})).unwrap();
    assert_eq!(output, "Hello World");
}

#[test]
fn test_repeated_cursor_with_square_meta() {
    let options = TemplateOptions::default().with_meta("[]");
    let template = Template::compile("[.repeated section @][@] [.end]", options).unwrap();
    assert_eq!(template.expand(&json!(["Andy", "Bob"])).unwrap(), "Andy Bob ");
}

#[test]
fn test_html_escaping() {
    let output = expand("Where is your {name|html}", &json!({"name": "<head>"})).unwrap();
    assert_eq!(output, "Where is your &lt;head&gt;");
}

#[test]
fn test_missing_section_takes_or_branch() {
    let template = Template::new(
        "{header}\n{.section people}\n{.repeated section @}{name}\n{.end}\n{.or}\nNo one\n{.end}\n",
    )
    .unwrap();
    let missing = template.expand(&json!({"header": "H"})).unwrap();
    let null = template.expand(&json!({"header": "H", "people": null})).unwrap();
    assert_eq!(missing, "H\nNo one\n");
    assert_eq!(missing, null);

    let present = template.expand(&people_data()).unwrap();
    assert_eq!(present, "People\nJohn\nJane\nBob\n");
}

#[test]
fn test_undefined_variable_is_an_error() {
    let err = Template::new("{name}").unwrap().expand(&json!({})).unwrap_err();
    assert!(matches!(err, EvalError::UndefinedVariable { .. }));
}

#[test]
fn test_site_page() {
    let template = Template::new(
        r#"<h1>{title|html}</h1>
<ul>
{.repeated section nav}
  <li><a href="{href|absurl|htmltag}">{label|html}</a></li>
{.end}
</ul>
{.section footer}<p>{@}</p>{.or}<p>no footer</p>{.end}
"#,
    )
    .unwrap();

    let expected = concat!(
        "<h1>Home &amp; Garden</h1>\n",
        "<ul>\n",
        "  <li><a href=\"http://example.com/about.html\">About</a></li>\n",
        "  <li><a href=\"http://example.com/contact.html\">Contact &lt;us&gt;</a></li>\n",
        "</ul>\n",
        "<p>no footer</p>",
    );
    assert_eq!(template.expand(&site_data()).unwrap(), expected);
}

#[test]
fn test_table_with_index_and_alternates() {
    let template = Template::new(
        "{.repeated section people}{@index}. {name} ({age|%d}){.alternates with}; {.end}",
    )
    .unwrap();
    assert_eq!(
        template.expand(&people_data()).unwrap(),
        "1. John (30); 2. Jane (28); 3. Bob (45)"
    );
}

#[test]
fn test_headered_template_with_options() {
    let text = "Meta: <>\nFormat-Char: :\n\n<.section people><.repeated section @><name:html><.alternates with>, <.end><.end>";
    let template = Template::from_headered_str(text, TemplateOptions::default()).unwrap();
    assert_eq!(template.expand(&people_data()).unwrap(), "John, Jane, Bob");
}

#[test]
fn test_options_loaded_from_toml() {
    let options = TemplateOptions::from_toml_str("meta = \"{{}}\"\ndefault-formatter = \"html\"\n").unwrap();
    let template = Template::compile("{{title}} {title}", options).unwrap();
    assert_eq!(
        template.expand(&site_data()).unwrap(),
        "Home &amp; Garden {title}"
    );
}
