//! Provider capability description.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Formats and destinations a provider supports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Capabilities {
    /// Accepted input formats (e.g. "h264", "prores")
    pub input_formats: Vec<String>,
    /// Producible output formats (e.g. "mp4", "hls")
    pub output_formats: Vec<String>,
    /// Supported destination kinds (e.g. "s3")
    pub destinations: Vec<String>,
}

impl Capabilities {
    /// Build from static string lists.
    pub fn from_static(inputs: &[&str], outputs: &[&str], destinations: &[&str]) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            input_formats: owned(inputs),
            output_formats: owned(outputs),
            destinations: owned(destinations),
        }
    }

    /// Check whether the provider can produce the given output format.
    pub fn supports_output(&self, format: &str) -> bool {
        self.output_formats.iter().any(|f| f.eq_ignore_ascii_case(format))
    }
}
