// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build-time configuration for statistics tracking.
//!
//! These are collection-level settings the stats records consult but do not
//! own. The defaults are sized for typical XML: a hundred distinct values is
//! plenty to call an element "categorical" (think `<status>` or `@lang`), and
//! values longer than 96 bytes are almost always prose, not categories.
//!
//! ```json
//! { "maxCategories": 100, "maxValueLen": 96, "trackStats": true }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{IndexError, Result};

/// Default cap on distinct sampled values per name.
pub const DEFAULT_MAX_CATEGORIES: usize = 100;

/// Default maximum length of a sampled value, in bytes.
pub const DEFAULT_MAX_VALUE_LEN: usize = 96;

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Distinct values kept per name before the sample is dropped
    pub max_categories: usize,
    /// Values longer than this are never sampled
    pub max_value_len: usize,
    /// Whether builds fold values into stats records at all
    pub track_stats: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_categories: DEFAULT_MAX_CATEGORIES,
            max_value_len: DEFAULT_MAX_VALUE_LEN,
            track_stats: true,
        }
    }
}

impl IndexConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig =
            serde_json::from_str(json).map_err(|e| IndexError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            IndexError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_categories == 0 {
            return Err(IndexError::Config("maxCategories must be at least 1".into()));
        }
        if self.max_categories > crate::binary::MAX_SAMPLE_SIZE {
            return Err(IndexError::Config(format!(
                "maxCategories {} exceeds limit {}",
                self.max_categories,
                crate::binary::MAX_SAMPLE_SIZE
            )));
        }
        if self.max_value_len == 0 || self.max_value_len > crate::binary::MAX_KEY_LEN {
            return Err(IndexError::Config(format!(
                "maxValueLen must be between 1 and {}",
                crate::binary::MAX_KEY_LEN
            )));
        }
        Ok(())
    }
}
