//! Configuration for rendering

/// Default ceiling on partials including partials
pub const DEFAULT_MAX_PARTIAL_DEPTH: usize = 32;

/// Ceiling on sections and partials open at once during one render
///
/// Parsing caps section nesting per template, but partials can stack those
/// templates on top of each other.
pub const MAX_RENDER_DEPTH: usize = 256;

/// Configuration options for rendering
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// How many partials may be nested inside each other before rendering fails
    pub max_partial_depth: usize,

    /// Whether `{{name}}` output is HTML-escaped
    pub escape_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_partial_depth: DEFAULT_MAX_PARTIAL_DEPTH,
            escape_html: true,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the partial nesting ceiling
    pub fn with_max_partial_depth(mut self, depth: usize) -> Self {
        self.max_partial_depth = depth;
        self
    }

    /// Set whether variables are HTML-escaped
    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }
}
