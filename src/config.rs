use serde::{Deserialize, Serialize};

/// Settings used when rendering a node to a JSON string
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Emit newlines and indentation
    #[serde(default)]
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    2
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: default_indent(),
        }
    }
}

/// Rendering profiles for common uses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderProfile {
    /// Single line, for request bodies
    Compact,
    /// Indented, for logs and debugging
    Readable,
}

impl RenderProfile {
    pub fn pretty(&self) -> bool {
        matches!(self, RenderProfile::Readable)
    }

    pub fn indent(&self) -> usize {
        match self {
            RenderProfile::Compact => 0,
            RenderProfile::Readable => 2,
        }
    }

    /// Apply this profile to a RenderSettings
    pub fn apply_to(&self, settings: &mut RenderSettings) {
        settings.pretty = self.pretty();
        settings.indent = self.indent();
    }
}

impl RenderSettings {
    pub fn new(pretty: bool) -> Self {
        Self {
            pretty,
            ..Default::default()
        }
    }

    /// Apply a rendering profile to these settings
    pub fn with_profile(mut self, profile: RenderProfile) -> Self {
        profile.apply_to(&mut self);
        self
    }

    /// Set the indentation width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
