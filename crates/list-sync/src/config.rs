//! List Configuration
//!
//! Tunables for paging, scroll detection and reordering.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

/// Items requested per page fetch
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Distance in pixels from the bottom that still counts as "at the bottom"
pub const DEFAULT_NEAR_BOTTOM_THRESHOLD: f64 = 2.0;

/// Order distance placed between a dragged item and its new neighbour
pub const DEFAULT_REORDER_STEP: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListConfig {
    pub page_size: usize,
    pub near_bottom_threshold: f64,
    pub reorder_step: f64,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            near_bottom_threshold: DEFAULT_NEAR_BOTTOM_THRESHOLD,
            reorder_step: DEFAULT_REORDER_STEP,
        }
    }
}

impl ListConfig {
    /// Parse a JSON config; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ListConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(SyncError::Config("page_size must be positive".to_string()));
        }
        if !self.reorder_step.is_finite() || self.reorder_step <= 0.0 {
            return Err(SyncError::Config(format!(
                "reorder_step must be finite and positive, got {}",
                self.reorder_step
            )));
        }
        if !self.near_bottom_threshold.is_finite() || self.near_bottom_threshold < 0.0 {
            return Err(SyncError::Config(format!(
                "near_bottom_threshold must be non-negative, got {}",
                self.near_bottom_threshold
            )));
        }
        Ok(())
    }
}
