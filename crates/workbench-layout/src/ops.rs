//! Grid operations.
//!
//! Each public operation clones the tree, edits the clone through routes
//! found with the visitor, and returns the clone. On error the clone is
//! simply dropped.

mod parts;
mod views;

pub use parts::is_valid_ratio;

use crate::error::{LayoutError, Result};
use crate::tree::{LayoutTree, PartLeaf};
use crate::types::Slot;

/// Ratio given to a freshly created sash.
pub const DEFAULT_SPLITTER_RATIO: f64 = 0.5;

/// Resolve an optional insertion index against a part with `len` views.
/// `None` appends.
fn resolve_index(index: Option<usize>, len: usize) -> Result<usize> {
    match index {
        None => Ok(len),
        Some(index) if index <= len => Ok(index),
        Some(index) => Err(LayoutError::IndexOutOfRange { index, len }),
    }
}

impl LayoutTree {
    fn route_to_part(&self, part_id: &str) -> Result<Vec<Slot>> {
        self.locate_part(part_id)
            .ok_or_else(|| LayoutError::part_not_found(part_id))
    }

    fn leaf_at(&mut self, route: &[Slot], part_id: &str) -> Result<&mut PartLeaf> {
        self.part_mut(route)
            .ok_or_else(|| LayoutError::part_not_found(part_id))
    }
}
