// src/config.rs

//! Grid layout configuration.
//!
//! `GridConfig` is deserializable so it can later be loaded from a config
//! file alongside the CLI flags; for now the flags populate it directly.

use serde::{Deserialize, Serialize};

/// Default number of columns and rows when an axis is left unset (zero).
pub const DEFAULT_GRID_AXIS: u32 = 4;

/// A requested grid shape. Zero on either axis means "unset"; call
/// [`GridConfig::resolve`] to obtain a shape usable for layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
}

impl GridConfig {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Resolves unset axes to [`DEFAULT_GRID_AXIS`]. The result has both
    /// fields >= 1 and is fixed for the duration of a render pass.
    pub fn resolve(self) -> Self {
        Self {
            columns: if self.columns == 0 {
                DEFAULT_GRID_AXIS
            } else {
                self.columns
            },
            rows: if self.rows == 0 {
                DEFAULT_GRID_AXIS
            } else {
                self.rows
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_axes_resolve_to_four_by_four() {
        assert_eq!(GridConfig::default().resolve(), GridConfig::new(4, 4));
    }

    #[test]
    fn explicit_axes_survive_resolution() {
        assert_eq!(GridConfig::new(3, 5).resolve(), GridConfig::new(3, 5));
    }

    #[test]
    fn partially_set_config_resolves_only_the_unset_axis() {
        assert_eq!(GridConfig::new(2, 0).resolve(), GridConfig::new(2, 4));
        assert_eq!(GridConfig::new(0, 7).resolve(), GridConfig::new(4, 7));
    }
}
