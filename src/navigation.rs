// src/navigation.rs

//! Selection and movement among the displayed images.
//!
//! The machine holds one `NavigationState`: a selected index plus its grid
//! coordinates. The coordinates are always derived from the index and the
//! resolved column count (`x = i mod columns`, `y = i div columns`) and are
//! recomputed on every commit, so they cannot drift from the index. A move
//! that would land outside the image list is rejected and leaves the state
//! untouched.

use crate::config::GridConfig;
use thiserror::Error;

/// The current selection. `grid_x`/`grid_y` are derived from
/// `selected_index`, never stored independently of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub selected_index: usize,
    pub grid_x: u32,
    pub grid_y: u32,
}

/// A rejected move. Recoverable: the selection is unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("move to index {target} is outside [0, {image_count})")]
    OutOfBounds { target: i64, image_count: usize },
}

/// Tracks the selection for one image list. Persists for the session;
/// replaced lists reset the selection with [`Navigator::load`].
#[derive(Debug)]
pub struct Navigator {
    state: NavigationState,
    columns: u32,
    image_count: usize,
}

impl Navigator {
    /// A navigator over `image_count` images laid out with `config`
    /// (resolved here if unset). Selection starts at index 0.
    pub fn new(image_count: usize, config: GridConfig) -> Self {
        let resolved = config.resolve();
        Self {
            state: Self::derive(0, resolved.columns),
            columns: resolved.columns,
            image_count,
        }
    }

    /// Replaces the image list, resetting the selection to index 0.
    pub fn load(&mut self, image_count: usize) {
        self.image_count = image_count;
        self.state = Self::derive(0, self.columns);
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Moves the selection by `dx` columns and `dy` rows. Diagonals are
    /// just both deltas at once: the target index is
    /// `selected + dy * columns + dx`.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> Result<NavigationState, NavigationError> {
        let target = self.state.selected_index as i64
            + i64::from(dy) * i64::from(self.columns)
            + i64::from(dx);

        if target < 0 || target >= self.image_count as i64 {
            return Err(NavigationError::OutOfBounds {
                target,
                image_count: self.image_count,
            });
        }

        self.state = Self::derive(target as usize, self.columns);
        Ok(self.state)
    }

    fn derive(index: usize, columns: u32) -> NavigationState {
        NavigationState {
            selected_index: index,
            grid_x: index as u32 % columns,
            grid_y: index as u32 / columns,
        }
    }
}
