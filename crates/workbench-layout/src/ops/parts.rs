//! Part-level edits: splitting, resizing and removing parts.

use super::DEFAULT_SPLITTER_RATIO;
use crate::error::{LayoutError, Result};
use crate::ids::{next_part_id_with, next_sash_id};
use crate::registry::ActivationRegistry;
use crate::settings::LayoutSettings;
use crate::tree::{LayoutNode, LayoutTree, PartLeaf};
use crate::types::{Region, Slot};

/// Whether a split ratio is strictly inside (0, 1).
pub fn is_valid_ratio(ratio: f64) -> bool {
    ratio > 0.0 && ratio < 1.0
}

impl LayoutTree {
    /// Move the divider of sash `sash_id`.
    pub fn split_position(&self, sash_id: u32, ratio: f64) -> Result<LayoutTree> {
        let route = self
            .locate_sash(sash_id)
            .ok_or(LayoutError::SashNotFound { sash_id })?;
        if !is_valid_ratio(ratio) {
            return Err(LayoutError::InvalidRatio { ratio });
        }
        let mut next = self.clone();
        next.sash_mut(&route)
            .ok_or(LayoutError::SashNotFound { sash_id })?
            .set_splitter_ratio(ratio);
        log::debug!("split_position: sash {} -> {}", sash_id, ratio);
        Ok(next)
    }

    /// Split the anchor part, placing a new empty part `new_part_id` on the
    /// `region` side of it. The new sash takes the anchor's old position.
    pub fn add_sibling_part(
        &self,
        region: Region,
        anchor_part_id: &str,
        new_part_id: &str,
    ) -> Result<LayoutTree> {
        let mut next = self.clone();
        let sash_id = next.add_sibling_part_in_place(region, anchor_part_id, new_part_id)?;
        log::debug!(
            "add_sibling_part: {} {:?} of {} under sash {}",
            new_part_id, region, anchor_part_id, sash_id
        );
        Ok(next)
    }

    /// [`add_sibling_part`](Self::add_sibling_part) with the new part id
    /// chosen by the identity allocator. Returns the new tree and the id.
    pub fn add_sibling_part_auto(
        &self,
        region: Region,
        anchor_part_id: &str,
        settings: &LayoutSettings,
    ) -> Result<(LayoutTree, String)> {
        let new_part_id = next_part_id_with(self, settings);
        let next = self.add_sibling_part(region, anchor_part_id, &new_part_id)?;
        Ok((next, new_part_id))
    }

    /// Remove a part and its views. Its parent sash collapses and the
    /// sibling subtree moves up into the sash's place; removing the root
    /// part empties the tree.
    pub fn remove_part(&self, part_id: &str) -> Result<LayoutTree> {
        let route = self.route_to_part(part_id)?;
        let mut next = self.clone();
        if !next.prune(&route) {
            return Err(LayoutError::part_not_found(part_id));
        }
        log::debug!("remove_part: {}", part_id);
        Ok(next)
    }

    /// Drop a view on an edge of `anchor_part_id`: a new part is created on
    /// that side and the view moves into it. Returns the new tree and the
    /// new part's id.
    pub fn move_view_to_new_part(
        &self,
        view_id: &str,
        region: Region,
        anchor_part_id: &str,
        registry: &dyn ActivationRegistry,
        settings: &LayoutSettings,
    ) -> Result<(LayoutTree, String)> {
        if self.locate_view(view_id).is_none() {
            return Err(LayoutError::view_not_found(view_id));
        }
        let new_part_id = next_part_id_with(self, settings);
        let mut next = self.clone();
        next.add_sibling_part_in_place(region, anchor_part_id, &new_part_id)?;
        next.detach_view_in_place(view_id, registry)?;
        next.insert_view_in_place(&new_part_id, view_id, None)?;
        log::debug!(
            "move_view_to_new_part: {} into new part {} {:?} of {}",
            view_id, new_part_id, region, anchor_part_id
        );
        Ok((next, new_part_id))
    }

    fn add_sibling_part_in_place(
        &mut self,
        region: Region,
        anchor_part_id: &str,
        new_part_id: &str,
    ) -> Result<u32> {
        let route = self.route_to_part(anchor_part_id)?;
        if self.contains_part(new_part_id) {
            return Err(LayoutError::DuplicateId { id: new_part_id.to_string() });
        }
        let sash_id = next_sash_id(self);

        let target = self
            .node_mut(&route)
            .ok_or_else(|| LayoutError::part_not_found(anchor_part_id))?;
        let anchor = std::mem::replace(target, LayoutNode::Part(PartLeaf::new(String::new())));
        let fresh = LayoutNode::Part(PartLeaf::new(new_part_id));
        let (child1, child2) = match region.new_part_slot() {
            Slot::First => (fresh, anchor),
            Slot::Second => (anchor, fresh),
        };
        *target = LayoutNode::sash(sash_id, region.orientation(), DEFAULT_SPLITTER_RATIO, child1, child2);
        Ok(sash_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::NoActivationHistory;
    use crate::types::Orientation;

    // === Helper constructors ===

    fn part(id: &str, views: &[&str], active: Option<&str>) -> LayoutNode {
        LayoutNode::Part(PartLeaf::with_views(
            id,
            views.iter().map(|v| v.to_string()).collect(),
            active.map(str::to_string),
        ))
    }

    fn empty(id: &str) -> LayoutNode {
        LayoutNode::Part(PartLeaf::new(id))
    }

    fn hsash(id: u32, child1: LayoutNode, child2: LayoutNode) -> LayoutNode {
        LayoutNode::sash(id, Orientation::Horizontal, 0.5, child1, child2)
    }

    fn vsash(id: u32, child1: LayoutNode, child2: LayoutNode) -> LayoutNode {
        LayoutNode::sash(id, Orientation::Vertical, 0.5, child1, child2)
    }

    fn tree(root: LayoutNode) -> LayoutTree {
        LayoutTree::from_root(root).unwrap()
    }

    // === add_sibling_part ===

    #[test]
    fn add_sibling_east_of_root_part() {
        let next = LayoutTree::single_part("part-1")
            .add_sibling_part(Region::East, "part-1", "part-2")
            .unwrap();
        assert_eq!(next, tree(hsash(1, empty("part-1"), empty("part-2"))));
    }

    #[test]
    fn region_decides_orientation_and_order() {
        let start = LayoutTree::single_part("a");
        let cases = [
            (Region::North, vsash(1, empty("b"), empty("a"))),
            (Region::South, vsash(1, empty("a"), empty("b"))),
            (Region::East, hsash(1, empty("a"), empty("b"))),
            (Region::West, hsash(1, empty("b"), empty("a"))),
        ];
        for (region, expected) in cases {
            assert_eq!(start.add_sibling_part(region, "a", "b").unwrap(), tree(expected), "{:?}", region);
        }
    }

    #[test]
    fn add_sibling_replaces_anchor_slot_in_parent() {
        let start = tree(hsash(
            1,
            part("p1", &["v1"], Some("v1")),
            part("p2", &["v2"], Some("v2")),
        ));
        let next = start.add_sibling_part(Region::North, "p2", "p3").unwrap();
        assert_eq!(
            next,
            tree(hsash(
                1,
                part("p1", &["v1"], Some("v1")),
                vsash(2, empty("p3"), part("p2", &["v2"], Some("v2"))),
            ))
        );
    }

    #[test]
    fn add_sibling_reuses_freed_sash_id() {
        let start = tree(LayoutNode::sash(
            2,
            Orientation::Horizontal,
            0.5,
            empty("p1"),
            empty("p2"),
        ));
        let next = start.add_sibling_part(Region::South, "p1", "p3").unwrap();
        assert_eq!(next.sash_ids(), vec![2, 1]);
    }

    #[test]
    fn add_sibling_errors() {
        let start = LayoutTree::single_part("part-1");
        assert!(matches!(
            start.add_sibling_part(Region::East, "part-9", "part-2"),
            Err(LayoutError::PartNotFound { .. })
        ));
        assert!(matches!(
            start.add_sibling_part(Region::East, "part-1", "part-1"),
            Err(LayoutError::DuplicateId { ref id }) if id == "part-1"
        ));
        assert!(matches!(
            LayoutTree::empty().add_sibling_part(Region::East, "part-1", "part-2"),
            Err(LayoutError::PartNotFound { .. })
        ));
    }

    #[test]
    fn add_sibling_part_auto_allocates_id() {
        let start = tree(hsash(1, empty("part-1"), empty("part-3")));
        let (next, id) = start
            .add_sibling_part_auto(Region::East, "part-3", &LayoutSettings::default())
            .unwrap();
        assert_eq!(id, "part-2");
        assert_eq!(next.part_ids(), vec!["part-1", "part-3", "part-2"]);
    }

    // === remove_part ===

    #[test]
    fn remove_part_collapses_parent_and_promotes_sibling_subtree() {
        let start = tree(hsash(
            1,
            empty("p1"),
            vsash(2, empty("p2"), hsash(3, empty("p3"), empty("p4"))),
        ));
        let next = start.remove_part("p2").unwrap();
        assert_eq!(next, tree(hsash(1, empty("p1"), hsash(3, empty("p3"), empty("p4")))));

        let next = start.remove_part("p1").unwrap();
        assert_eq!(next, tree(vsash(2, empty("p2"), hsash(3, empty("p3"), empty("p4")))));
    }

    #[test]
    fn remove_root_part_empties_tree() {
        let next = LayoutTree::single_part("p1").remove_part("p1").unwrap();
        assert!(next.is_empty());
        assert_eq!(next.part_count(), 0);
    }

    #[test]
    fn remove_part_unknown() {
        assert!(matches!(
            LayoutTree::single_part("p1").remove_part("p2"),
            Err(LayoutError::PartNotFound { .. })
        ));
    }

    // === split_position ===

    #[test]
    fn split_position_sets_ratio_only() {
        let start = tree(hsash(1, empty("p1"), vsash(2, empty("p2"), empty("p3"))));
        let next = start.split_position(2, 0.25).unwrap();
        assert_eq!(
            next,
            tree(hsash(
                1,
                empty("p1"),
                LayoutNode::sash(2, Orientation::Vertical, 0.25, empty("p2"), empty("p3")),
            ))
        );
    }

    #[test]
    fn split_position_errors() {
        let start = tree(hsash(1, empty("p1"), empty("p2")));
        assert!(matches!(
            start.split_position(7, 0.5),
            Err(LayoutError::SashNotFound { sash_id: 7 })
        ));
        for ratio in [0.0, 1.0, -1.0, 2.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(start.split_position(1, ratio), Err(LayoutError::InvalidRatio { .. })),
                "ratio {} accepted",
                ratio
            );
        }
    }

    // === move_view_to_new_part ===

    #[test]
    fn move_view_to_new_part_splits_anchor() {
        let start = tree(part("part-1", &["v1", "v2"], Some("v2")));
        let (next, id) = start
            .move_view_to_new_part("v2", Region::East, "part-1", &NoActivationHistory, &LayoutSettings::default())
            .unwrap();
        assert_eq!(id, "part-2");
        assert_eq!(
            next,
            tree(hsash(
                1,
                part("part-1", &["v1"], Some("v1")),
                part("part-2", &["v2"], Some("v2")),
            ))
        );
    }

    #[test]
    fn move_only_view_to_new_part_promotes_new_part() {
        let start = tree(vsash(
            1,
            part("part-1", &["v1"], Some("v1")),
            part("part-2", &["v2"], Some("v2")),
        ));
        let (next, id) = start
            .move_view_to_new_part("v2", Region::West, "part-2", &NoActivationHistory, &LayoutSettings::default())
            .unwrap();
        assert_eq!(id, "part-3");
        assert_eq!(
            next,
            tree(vsash(
                1,
                part("part-1", &["v1"], Some("v1")),
                part("part-3", &["v2"], Some("v2")),
            ))
        );
    }

    #[test]
    fn move_view_to_new_part_errors() {
        let start = tree(part("part-1", &["v1"], Some("v1")));
        let settings = LayoutSettings::default();
        assert!(matches!(
            start.move_view_to_new_part("zz", Region::East, "part-1", &NoActivationHistory, &settings),
            Err(LayoutError::ViewNotFound { .. })
        ));
        assert!(matches!(
            start.move_view_to_new_part("v1", Region::East, "part-5", &NoActivationHistory, &settings),
            Err(LayoutError::PartNotFound { .. })
        ));
    }
}
