use std::path::Path;

use serde::Deserialize;

use crate::StdError;

const DEFAULT_MAX_DEPTH: usize = 64;

/// Options of a [`Container`](crate::Container).
///
/// Missing keys fall back to their defaults, so an empty JSON object is a
/// valid configuration.
///
/// ```rust
/// use modular::ContainerConfig;
///
/// let config = ContainerConfig::parse(r#"{"max_depth": 8}"#).unwrap();
/// assert_eq!(config.max_depth, 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Maximum number of nested binding materializations in one resolution.
    ///
    /// Always at least 1, otherwise no binding could be resolved.
    pub max_depth: usize,
}

impl ContainerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resolution depth limit. Zero is raised to 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON and on a `max_depth` of 0.
    pub fn parse<T>(text: T) -> Result<Self, StdError>
    where
        T: AsRef<str>,
    {
        let config: Self = serde_json::from_str(text.as_ref())?;
        if config.max_depth == 0 {
            return Err("max_depth must be at least 1".into());
        }
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self, StdError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(text)
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
