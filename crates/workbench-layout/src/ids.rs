//! Identity allocation for new parts and sashes.
//!
//! Ids are recomputed from the tree on every call: the smallest unused
//! number wins, so ids freed by a removal are handed out again.

use crate::settings::LayoutSettings;
use crate::tree::LayoutTree;
use std::collections::HashSet;

/// Smallest sash id >= 1 not used in `tree`.
pub fn next_sash_id(tree: &LayoutTree) -> u32 {
    let used: HashSet<u32> = tree.sash_ids().into_iter().collect();
    let mut candidate = 1;
    while used.contains(&candidate) {
        candidate += 1;
    }
    candidate
}

/// Smallest `part-N` id not used in `tree`.
pub fn next_part_id(tree: &LayoutTree) -> String {
    next_part_id_with(tree, &LayoutSettings::default())
}

/// Smallest `{prefix}N` id not used in `tree`.
pub fn next_part_id_with(tree: &LayoutTree, settings: &LayoutSettings) -> String {
    let used: HashSet<&str> = tree.part_ids().into_iter().collect();
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{}{}", settings.part_id_prefix, n);
        if !used.contains(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}
