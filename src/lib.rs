//! Mustache Lite - a logic-light text templating engine
//!
//! This library compiles templates made of literal text and `{{tags}}` into a
//! tree, then renders that tree against a [`Value`].
//!
//! # Example
//!
//! ```rust
//! use mustache_lite::{render, Value};
//!
//! let data = Value::object().with(
//!     "items",
//!     vec![Value::object().with("n", "a"), Value::object().with("n", "b")],
//! );
//! let out = render("{{#items}}{{n}},{{/items}}", &data).unwrap();
//! assert_eq!(out, "a,b,");
//! ```

pub mod error;
pub mod parser;
pub mod renderer;
pub mod template;
pub mod value;

pub use error::{ParseError, RenderError};
pub use parser::{parse, Document};
pub use renderer::{escape_html, Context, RenderConfig};
pub use template::{PartialDir, PartialLoader, PartialRegistry, Template};
pub use value::{DataError, Object, Value, ValueKind};

/// Compile and render a template in one step
///
/// # Example
///
/// ```rust
/// use mustache_lite::{render, Value};
///
/// let data = Value::object().with("v", "<b>");
/// assert_eq!(render("{{v}} {{{v}}}", &data).unwrap(), "&lt;b&gt; <b>");
/// ```
pub fn render(source: &str, data: &Value) -> Result<String, RenderError> {
    render_with_config(source, data, &RenderConfig::default(), None)
}

/// Compile and render a template with custom configuration and partials
///
/// # Example
///
/// ```rust
/// use mustache_lite::{render_with_config, PartialRegistry, RenderConfig, Value};
///
/// let partials = PartialRegistry::new().with("user", "<{{name}}>").unwrap();
/// let data = Value::object().with("name", "Ann");
/// let config = RenderConfig::new().with_max_partial_depth(8);
///
/// let out = render_with_config("Hi {{>user}}", &data, &config, Some(&partials)).unwrap();
/// assert_eq!(out, "Hi <Ann>");
/// ```
pub fn render_with_config(
    source: &str,
    data: &Value,
    config: &RenderConfig,
    loader: Option<&dyn PartialLoader>,
) -> Result<String, RenderError> {
    let template = Template::parse(source).map_err(RenderError::InvalidTemplate)?;
    let mut out = Vec::new();
    template.render_with(&mut out, data, config, loader)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_plain_text() {
        assert_eq!(render("no tags here", &Value::object()).unwrap(), "no tags here");
    }

    #[test]
    fn test_render_section() {
        let data = Value::object().with("u", Value::object().with("n", "Ann"));
        assert_eq!(render("{{#u}}{{n}}{{/u}}", &data).unwrap(), "Ann");
    }

    #[test]
    fn test_render_parse_error() {
        let err = render("{{#u}}", &Value::object()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTemplate(_)));
    }

    #[test]
    fn test_render_escape_disabled() {
        let data = Value::object().with("v", "a&b");
        let config = RenderConfig::new().with_escape_html(false);
        assert_eq!(
            render_with_config("{{v}}", &data, &config, None).unwrap(),
            "a&b"
        );
    }

    #[test]
    fn test_template_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Template>();
        assert_send_sync::<Value>();
    }
}
