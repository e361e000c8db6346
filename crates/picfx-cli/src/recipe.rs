//! YAML recipes: a named list of filter steps.
//!
//! A step with parameters is a one-key map from the filter name to its
//! fields; a step without parameters is just the name.
//!
//! ```yaml
//! steps:
//!   - blur: { size: 5 }
//!   - negate
//!   - stair_step: { shift_count: 10, steps: 10 }
//! ```

use anyhow::{Context, Result};
use picfx_ops::Filter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Filters to run, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    /// Steps applied first to last.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Filter>,
}

impl Recipe {
    /// Parses a recipe from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Invalid recipe")
    }

    /// Reads and parses a recipe file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("In recipe: {}", path.display()))
    }
}
