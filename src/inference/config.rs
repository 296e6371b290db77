//! Configuration for schema exploration

use serde::{Deserialize, Serialize};

/// How the explorer treats a sampled value whose kind it cannot collate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnsupportedKindPolicy {
    /// Record the field as skipped and log a warning
    #[default]
    Skip,
    /// Abort the analysis with `ExplorerError::UnsupportedKind`
    Error,
}

/// Configuration for schema exploration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerConfig {
    /// Number of nested object levels analyzed below the root (0 = root only)
    pub max_depth: usize,

    /// Rewrite date-like strings into date-wrappers before collation
    pub detect_dates: bool,

    /// Treatment of fields whose sampled kind is not handled (e.g. arrays)
    pub unsupported_kinds: UnsupportedKindPolicy,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            detect_dates: true,
            unsupported_kinds: UnsupportedKindPolicy::Skip,
        }
    }
}

impl ExplorerConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::default()
    }
}

/// Builder for ExplorerConfig
#[derive(Debug, Default)]
pub struct ExplorerConfigBuilder {
    config: ExplorerConfig,
}

impl ExplorerConfigBuilder {
    /// Set how many nested levels are analyzed
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Enable or disable date detection
    pub fn detect_dates(mut self, detect: bool) -> Self {
        self.config.detect_dates = detect;
        self
    }

    /// Set the policy for unsupported value kinds
    pub fn unsupported_kinds(mut self, policy: UnsupportedKindPolicy) -> Self {
        self.config.unsupported_kinds = policy;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ExplorerConfig {
        self.config
    }
}
