//! Advisory configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Source of the advisory copy
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisoryConfig {
    /// YAML document replacing the embedded library; unset uses the embedded one
    #[serde(default)]
    pub library_path: Option<PathBuf>,
}
