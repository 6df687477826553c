//! Integration tests for partial resolution

use std::cell::Cell;

use mustache_lite::{
    render_with_config, PartialDir, PartialLoader, PartialRegistry, RenderConfig, RenderError,
    Template, Value,
};
use mustache_lite::renderer::MAX_RENDER_DEPTH;
use pretty_assertions::assert_eq;

fn registry(entries: &[(&str, &str)]) -> PartialRegistry {
    let mut registry = PartialRegistry::new();
    for (name, source) in entries {
        registry.register(*name, *source).expect("unique names");
    }
    registry
}

fn render_partials(
    source: &str,
    data: &Value,
    loader: &dyn PartialLoader,
) -> Result<String, RenderError> {
    render_with_config(source, data, &RenderConfig::default(), Some(loader))
}

#[test]
fn test_partials_without_loader_are_silent() {
    let template = Template::parse("a{{> header }}b").unwrap();
    assert_eq!(template.render(&Value::object()).unwrap(), "ab");
}

#[test]
fn test_nested_partials() {
    let partials = registry(&[
        ("page", "<main>{{>list}}</main>"),
        ("list", "{{#items}}{{>item}}{{/items}}"),
        ("item", "<li>{{name}}</li>"),
    ]);
    let data = Value::object().with(
        "items",
        vec![
            Value::object().with("name", "a"),
            Value::object().with("name", "b & c"),
        ],
    );
    assert_eq!(
        render_partials("{{>page}}", &data, &partials).unwrap(),
        "<main><li>a</li><li>b &amp; c</li></main>"
    );
}

#[test]
fn test_partial_keeps_its_own_delimiters() {
    let partials = registry(&[("custom", "{{=[ ]=}}[v]")]);
    let data = Value::object().with("v", "1");
    assert_eq!(
        render_partials("{{>custom}}{{v}}", &data, &partials).unwrap(),
        "11"
    );
}

#[test]
fn test_missing_partial() {
    let partials = registry(&[]);
    let err = render_partials("x{{>ghost}}", &Value::object(), &partials).unwrap_err();
    assert!(matches!(err, RenderError::PartialNotFound { ref name } if name == "ghost"));
    assert_eq!(err.to_string(), "partial not found: ghost");
}

#[test]
fn test_self_recursive_partial_hits_limit() {
    let partials = registry(&[("forever", "again {{>forever}}")]);
    let config = RenderConfig::new().with_max_partial_depth(5);
    let err = render_with_config("{{>forever}}", &Value::object(), &config, Some(&partials)).unwrap_err();
    assert!(matches!(
        err,
        RenderError::PartialRecursionLimit { ref name, limit: 5 } if name == "forever"
    ));
}

#[test]
fn test_recursion_bounded_by_data_is_fine() {
    let partials = registry(&[("node", "{{name}}{{#child}}({{>node}}){{/child}}")]);
    let data = Value::object().with("name", "a").with(
        "child",
        Value::object()
            .with("name", "b")
            .with("child", Value::object().with("name", "c").with("child", false)),
    );
    assert_eq!(
        render_partials("{{>node}}", &data, &partials).unwrap(),
        "a(b(c))"
    );
}

#[test]
fn test_deep_sections_inside_recursive_partial_fail_cleanly() {
    let source = format!("{}{{{{>p}}}}{}", "{{#a}}".repeat(127), "{{/a}}".repeat(127));
    let partials = registry(&[("p", source.as_str())]);
    let data = Value::object().with("a", true);
    let err = render_partials("{{>p}}", &data, &partials).unwrap_err();
    assert!(matches!(
        err,
        RenderError::NestingTooDeep { ref name, limit: MAX_RENDER_DEPTH } if name == "a"
    ));
}

#[test]
fn test_partial_parse_error() {
    let partials = registry(&[("broken", "{{/nothing}}")]);
    let err = render_partials("{{>broken}}", &Value::object(), &partials).unwrap_err();
    let RenderError::PartialParse { name, source } = err else {
        panic!("expected a partial parse error, got {:?}", err);
    };
    assert_eq!(name, "broken");
    assert_eq!(source.offset(), 0);
}

#[test]
fn test_closure_loader_sees_trimmed_names_once() {
    let requested = Cell::new(0);
    let loader = |name: &str| {
        requested.set(requested.get() + 1);
        (name == "x").then(|| "X".to_string())
    };
    assert_eq!(
        render_partials("{{>  x  }}{{> x}}", &Value::object(), &loader).unwrap(),
        "XX"
    );
    assert_eq!(requested.get(), 1);
}

#[test]
fn test_partial_dir() {
    let base = std::env::temp_dir().join(format!("mustache-lite-it-{}", std::process::id()));
    std::fs::create_dir_all(base.join("shared")).unwrap();
    std::fs::write(base.join("shared/footer.html"), "-- {{site}} --").unwrap();

    let loader = PartialDir::new(&base).with_extension("html");
    let data = Value::object().with("site", "example");
    let result = render_partials("body\n{{>shared/footer}}", &data, &loader);
    std::fs::remove_dir_all(&base).unwrap();

    assert_eq!(result.unwrap(), "body\n-- example --");
}
