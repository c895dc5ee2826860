//! Filter Controller
//!
//! Owns the active filter and the filter epoch. The epoch moves forward on
//! every effective change and is stamped on outgoing page requests so late
//! responses from an older filter can be recognised.

use tracing::info;

use crate::domain::Filter;

#[derive(Debug, Clone, Default)]
pub struct FilterController {
    current: Filter,
    epoch: u64,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Filter {
        &self.current
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Replace the filter; returns the new epoch, or `None` if unchanged
    pub fn set(&mut self, filter: Filter) -> Option<u64> {
        if filter == self.current {
            return None;
        }
        self.current = filter;
        self.epoch += 1;
        info!(epoch = self.epoch, filter = ?self.current, "filter changed");
        Some(self.epoch)
    }

    /// Adopt a filter restored from a snapshot without opening a new epoch
    pub fn restore(&mut self, filter: Filter) {
        self.current = filter;
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.epoch
    }
}
