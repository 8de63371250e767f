//! Job specification types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name identifying a provider implementation in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ProviderName(pub String);

impl ProviderName {
    /// Create from an existing string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProviderName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ProviderName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A transcoding job as handed to a provider.
///
/// The order of `presets` is significant: it determines the ordering of the
/// output streams in the request built for the backend. An empty list is
/// accepted and yields a job without rendition outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JobSpec {
    /// Source media URI
    pub source: String,

    /// Backend preset identifiers, one per output rendition
    #[serde(default)]
    pub presets: Vec<String>,
}

impl JobSpec {
    /// Create a new job specification.
    pub fn new<I, S>(source: impl Into<String>, presets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: source.into(),
            presets: presets.into_iter().map(Into::into).collect(),
        }
    }

    /// Final path segment of the source with its extension removed.
    ///
    /// `"s3://bucket/in/video.mp4"` yields `"video"`. A source without any
    /// separator is treated as a bare filename.
    pub fn source_stem(&self) -> &str {
        let filename = self.source.rsplit('/').next().unwrap_or_default();
        match filename.rfind('.') {
            Some(idx) => &filename[..idx],
            None => filename,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_spec_keeps_preset_order() {
        let spec = JobSpec::new("s3://in/video.mp4", ["b", "a", "c"]);
        assert_eq!(spec.presets, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_source_stem() {
        assert_eq!(JobSpec::new("/a/b/clip.mov", Vec::<String>::new()).source_stem(), "clip");
        assert_eq!(JobSpec::new("s3://in/video.tar.gz", Vec::<String>::new()).source_stem(), "video.tar");
        assert_eq!(JobSpec::new("movie", Vec::<String>::new()).source_stem(), "movie");
        assert_eq!(JobSpec::new("s3://in/dir/", Vec::<String>::new()).source_stem(), "");
    }

    #[test]
    fn test_job_spec_presets_default_to_empty() {
        let spec: JobSpec = serde_json::from_str(r#"{"source":"s3://in/video.mp4"}"#).unwrap();
        assert!(spec.presets.is_empty());
    }
}
