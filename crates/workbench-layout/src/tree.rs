//! Immutable layout tree of parts (leaves) and sashes (binary splits).
//!
//! A [`LayoutTree`] is never edited in place by callers: every grid
//! operation clones the tree, edits the clone and hands it back. Structural
//! reads go through [`LayoutTree::walk`] / [`LayoutTree::visit`], which is
//! the only way the rest of the crate locates nodes.

use crate::error::{LayoutError, Result};
use crate::types::{Orientation, Slot};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Write as _;

/// A tabbed container: the leaf of the layout tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartLeaf {
    part_id: String,
    /// Docked views in tab order
    view_ids: Vec<String>,
    active_view_id: Option<String>,
}

impl PartLeaf {
    /// Create a part with no views.
    pub fn new(part_id: impl Into<String>) -> Self {
        Self {
            part_id: part_id.into(),
            view_ids: Vec::new(),
            active_view_id: None,
        }
    }

    /// Create a part with the given tabs. Invariants are checked when the
    /// part is placed into a tree with [`LayoutTree::from_root`].
    pub fn with_views(
        part_id: impl Into<String>,
        view_ids: Vec<String>,
        active_view_id: Option<String>,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            view_ids,
            active_view_id,
        }
    }

    pub fn part_id(&self) -> &str {
        &self.part_id
    }

    pub fn view_ids(&self) -> &[String] {
        &self.view_ids
    }

    pub fn active_view_id(&self) -> Option<&str> {
        self.active_view_id.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.view_ids.is_empty()
    }

    pub fn contains_view(&self, view_id: &str) -> bool {
        self.view_index(view_id).is_some()
    }

    /// Tab index of a view inside this part.
    pub fn view_index(&self, view_id: &str) -> Option<usize> {
        self.view_ids.iter().position(|v| v == view_id)
    }

    /// Splice a view in at `index` and make it the active tab.
    /// `index` must already be bounds-checked.
    pub(crate) fn insert_view(&mut self, index: usize, view_id: &str) {
        self.view_ids.insert(index, view_id.to_string());
        self.active_view_id = Some(view_id.to_string());
    }

    pub(crate) fn remove_view_at(&mut self, index: usize) -> String {
        self.view_ids.remove(index)
    }

    pub(crate) fn set_active(&mut self, view_id: Option<String>) {
        self.active_view_id = view_id;
    }
}

/// A binary split between two child regions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SashNode {
    id: u32,
    orientation: Orientation,
    /// Fraction of space given to `child1`, strictly inside (0, 1)
    splitter_ratio: f64,
    child1: Box<LayoutNode>,
    child2: Box<LayoutNode>,
}

impl SashNode {
    pub fn new(
        id: u32,
        orientation: Orientation,
        splitter_ratio: f64,
        child1: LayoutNode,
        child2: LayoutNode,
    ) -> Self {
        Self {
            id,
            orientation,
            splitter_ratio,
            child1: Box::new(child1),
            child2: Box::new(child2),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn splitter_ratio(&self) -> f64 {
        self.splitter_ratio
    }

    pub fn child1(&self) -> &LayoutNode {
        &self.child1
    }

    pub fn child2(&self) -> &LayoutNode {
        &self.child2
    }

    pub fn child(&self, slot: Slot) -> &LayoutNode {
        match slot {
            Slot::First => &self.child1,
            Slot::Second => &self.child2,
        }
    }

    pub(crate) fn child_mut(&mut self, slot: Slot) -> &mut LayoutNode {
        match slot {
            Slot::First => &mut self.child1,
            Slot::Second => &mut self.child2,
        }
    }

    pub(crate) fn set_splitter_ratio(&mut self, ratio: f64) {
        self.splitter_ratio = ratio;
    }
}

/// Recursive layout tree node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutNode {
    Part(PartLeaf),
    Sash(SashNode),
}

impl LayoutNode {
    /// Shorthand for a leaf node.
    pub fn part(leaf: PartLeaf) -> Self {
        LayoutNode::Part(leaf)
    }

    /// Shorthand for a split node.
    pub fn sash(
        id: u32,
        orientation: Orientation,
        splitter_ratio: f64,
        child1: LayoutNode,
        child2: LayoutNode,
    ) -> Self {
        LayoutNode::Sash(SashNode::new(id, orientation, splitter_ratio, child1, child2))
    }

    /// Follow a route of child slots down from this node.
    pub(crate) fn descend_mut(&mut self, route: &[Slot]) -> Option<&mut LayoutNode> {
        let mut node = self;
        for slot in route {
            node = match node {
                LayoutNode::Sash(sash) => sash.child_mut(*slot),
                LayoutNode::Part(_) => return None,
            };
        }
        Some(node)
    }

    /// Replace this sash with the child in `keep`, dropping the other child.
    /// Returns false if this node is not a sash.
    pub(crate) fn promote_child(&mut self, keep: Slot) -> bool {
        let LayoutNode::Sash(sash) = self else {
            return false;
        };
        let kept = std::mem::replace(sash.child_mut(keep), LayoutNode::Part(PartLeaf::new(String::new())));
        *self = kept;
        true
    }
}

/// One step on the way from the root down to a node: the sash passed
/// through and the child slot taken.
#[derive(Clone, Copy, Debug)]
pub struct SashStep<'t> {
    pub sash: &'t SashNode,
    pub slot: Slot,
}

/// What a visitor sees for each part.
#[derive(Clone, Copy, Debug)]
pub struct PartVisit<'p, 't> {
    /// Ancestor sashes, root first
    pub path: &'p [SashStep<'t>],
    pub leaf: &'t PartLeaf,
}

impl<'p, 't> PartVisit<'p, 't> {
    pub fn part_id(&self) -> &'t str {
        self.leaf.part_id()
    }

    pub fn view_ids(&self) -> &'t [String] {
        self.leaf.view_ids()
    }

    pub fn active_view_id(&self) -> Option<&'t str> {
        self.leaf.active_view_id()
    }

    /// The sash directly above this part, if it is not the root.
    pub fn parent(&self) -> Option<SashStep<'t>> {
        self.path.last().copied()
    }

    /// Child slots from the root down to this part.
    pub fn route(&self) -> Vec<Slot> {
        self.path.iter().map(|step| step.slot).collect()
    }
}

/// What a visitor sees for each sash.
#[derive(Clone, Copy, Debug)]
pub struct SashVisit<'p, 't> {
    /// Ancestor sashes, root first
    pub path: &'p [SashStep<'t>],
    pub sash: &'t SashNode,
}

impl<'p, 't> SashVisit<'p, 't> {
    pub fn route(&self) -> Vec<Slot> {
        self.path.iter().map(|step| step.slot).collect()
    }
}

/// Depth-first, pre-order visitor over a layout tree.
///
/// Returning `false` from either method stops the walk; the `false`
/// propagates back up through every enclosing sash.
pub trait LayoutVisitor<'t> {
    fn visit_part(&mut self, part: &PartVisit<'_, 't>) -> bool;

    fn visit_sash(&mut self, sash: &SashVisit<'_, 't>) -> bool {
        let _ = sash;
        true
    }
}

struct FnVisitor<P, S> {
    on_part: P,
    on_sash: S,
}

impl<'t, P, S> LayoutVisitor<'t> for FnVisitor<P, S>
where
    P: FnMut(&PartVisit<'_, 't>) -> bool,
    S: FnMut(&SashVisit<'_, 't>) -> bool,
{
    fn visit_part(&mut self, part: &PartVisit<'_, 't>) -> bool {
        (self.on_part)(part)
    }

    fn visit_sash(&mut self, sash: &SashVisit<'_, 't>) -> bool {
        (self.on_sash)(sash)
    }
}

fn walk_node<'t, V>(node: &'t LayoutNode, path: &mut Vec<SashStep<'t>>, visitor: &mut V) -> bool
where
    V: LayoutVisitor<'t> + ?Sized,
{
    match node {
        LayoutNode::Part(leaf) => visitor.visit_part(&PartVisit { path: path.as_slice(), leaf }),
        LayoutNode::Sash(sash) => {
            if !visitor.visit_sash(&SashVisit { path: path.as_slice(), sash }) {
                return false;
            }
            for slot in Slot::BOTH {
                path.push(SashStep { sash, slot });
                let keep_going = walk_node(sash.child(slot), path, visitor);
                path.pop();
                if !keep_going {
                    return false;
                }
            }
            true
        }
    }
}

/// Where a view currently lives.
#[derive(Clone, Debug)]
pub(crate) struct ViewLocation {
    pub part_id: String,
    pub route: Vec<Slot>,
    pub index: usize,
}

/// The whole arrangement. `root == None` is an empty workspace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutTree {
    root: Option<LayoutNode>,
}

impl LayoutTree {
    /// A workspace with no parts at all.
    pub fn empty() -> Self {
        Self { root: None }
    }

    /// A workspace with a single empty part.
    pub fn single_part(part_id: impl Into<String>) -> Self {
        Self {
            root: Some(LayoutNode::Part(PartLeaf::new(part_id))),
        }
    }

    /// Wrap a hand-built node, rejecting trees that break an invariant.
    pub fn from_root(root: LayoutNode) -> Result<Self> {
        let tree = Self { root: Some(root) };
        tree.validate()?;
        Ok(tree)
    }

    pub(crate) fn from_root_unchecked(root: Option<LayoutNode>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&LayoutNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Walk the tree with a [`LayoutVisitor`]. Returns `false` if the
    /// visitor stopped the walk early.
    pub fn walk<'t, V>(&'t self, visitor: &mut V) -> bool
    where
        V: LayoutVisitor<'t> + ?Sized,
    {
        let Some(root) = &self.root else {
            return true;
        };
        let mut path = Vec::new();
        walk_node(root, &mut path, visitor)
    }

    /// Closure form of [`walk`](Self::walk).
    pub fn visit<'t, P, S>(&'t self, on_part: P, on_sash: S) -> bool
    where
        P: FnMut(&PartVisit<'_, 't>) -> bool,
        S: FnMut(&SashVisit<'_, 't>) -> bool,
    {
        self.walk(&mut FnVisitor { on_part, on_sash })
    }

    /// Visit parts only.
    pub fn visit_parts<'t, P>(&'t self, on_part: P) -> bool
    where
        P: FnMut(&PartVisit<'_, 't>) -> bool,
    {
        self.visit(on_part, |_| true)
    }

    /// Part ids in pre-order.
    pub fn part_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.visit_parts(|part| {
            ids.push(part.part_id());
            true
        });
        ids
    }

    /// Sash ids in pre-order.
    pub fn sash_ids(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        self.visit(
            |_| true,
            |sash| {
                ids.push(sash.sash.id());
                true
            },
        );
        ids
    }

    pub fn part_count(&self) -> usize {
        self.part_ids().len()
    }

    pub fn part(&self, part_id: &str) -> Option<&PartLeaf> {
        let mut found = None;
        self.visit_parts(|part| {
            if part.part_id() == part_id {
                found = Some(part.leaf);
                false
            } else {
                true
            }
        });
        found
    }

    pub fn contains_part(&self, part_id: &str) -> bool {
        self.part(part_id).is_some()
    }

    /// The part a view is docked in.
    pub fn part_of_view(&self, view_id: &str) -> Option<&PartLeaf> {
        let mut found = None;
        self.visit_parts(|part| {
            if part.leaf.contains_view(view_id) {
                found = Some(part.leaf);
                false
            } else {
                true
            }
        });
        found
    }

    pub(crate) fn locate_part(&self, part_id: &str) -> Option<Vec<Slot>> {
        let mut route = None;
        self.visit_parts(|part| {
            if part.part_id() == part_id {
                route = Some(part.route());
                false
            } else {
                true
            }
        });
        route
    }

    pub(crate) fn locate_view(&self, view_id: &str) -> Option<ViewLocation> {
        let mut location = None;
        self.visit_parts(|part| match part.leaf.view_index(view_id) {
            Some(index) => {
                location = Some(ViewLocation {
                    part_id: part.part_id().to_string(),
                    route: part.route(),
                    index,
                });
                false
            }
            None => true,
        });
        location
    }

    pub(crate) fn locate_sash(&self, sash_id: u32) -> Option<Vec<Slot>> {
        let mut route = None;
        self.visit(
            |_| true,
            |sash| {
                if sash.sash.id() == sash_id {
                    route = Some(sash.route());
                    false
                } else {
                    true
                }
            },
        );
        route
    }

    pub(crate) fn node_mut(&mut self, route: &[Slot]) -> Option<&mut LayoutNode> {
        self.root.as_mut()?.descend_mut(route)
    }

    pub(crate) fn part_mut(&mut self, route: &[Slot]) -> Option<&mut PartLeaf> {
        match self.node_mut(route)? {
            LayoutNode::Part(leaf) => Some(leaf),
            LayoutNode::Sash(_) => None,
        }
    }

    pub(crate) fn sash_mut(&mut self, route: &[Slot]) -> Option<&mut SashNode> {
        match self.node_mut(route)? {
            LayoutNode::Sash(sash) => Some(sash),
            LayoutNode::Part(_) => None,
        }
    }

    /// Drop the node at `route`. The root empties the tree; anything else
    /// collapses its parent sash, promoting the sibling into its place.
    pub(crate) fn prune(&mut self, route: &[Slot]) -> bool {
        let Some((slot, parent_route)) = route.split_last() else {
            self.root = None;
            return true;
        };
        match self.node_mut(parent_route) {
            Some(parent) => parent.promote_child(slot.other()),
            None => false,
        }
    }

    /// Check every tree-wide invariant, reporting the first violation found.
    pub fn validate(&self) -> Result<()> {
        let mut check = InvariantCheck::default();
        self.walk(&mut check);
        match check.problem {
            Some(reason) => Err(LayoutError::corrupt(reason)),
            None => Ok(()),
        }
    }

    /// Indented, human-readable dump of the tree.
    pub fn outline(&self) -> String {
        let mut outline = Outline::default();
        self.walk(&mut outline);
        if outline.text.is_empty() {
            outline.text.push_str("(empty)\n");
        }
        outline.text
    }
}

#[derive(Default)]
struct InvariantCheck<'t> {
    part_ids: HashSet<&'t str>,
    view_ids: HashSet<&'t str>,
    sash_ids: HashSet<u32>,
    problem: Option<String>,
}

impl<'t> LayoutVisitor<'t> for InvariantCheck<'t> {
    fn visit_part(&mut self, part: &PartVisit<'_, 't>) -> bool {
        let part_id = part.part_id();
        if !self.part_ids.insert(part_id) {
            self.problem = Some(format!("duplicate part id `{}`", part_id));
            return false;
        }
        for view_id in part.view_ids() {
            if !self.view_ids.insert(view_id) {
                self.problem = Some(format!("view `{}` is docked in more than one part", view_id));
                return false;
            }
        }
        match part.active_view_id() {
            Some(active) if !part.leaf.contains_view(active) => {
                self.problem = Some(format!(
                    "active view `{}` is not a tab of part `{}`",
                    active, part_id
                ));
                false
            }
            None if !part.leaf.is_empty() => {
                self.problem = Some(format!("part `{}` has views but no active view", part_id));
                false
            }
            _ => true,
        }
    }

    fn visit_sash(&mut self, sash: &SashVisit<'_, 't>) -> bool {
        let node = sash.sash;
        if !self.sash_ids.insert(node.id()) {
            self.problem = Some(format!("duplicate sash id {}", node.id()));
            return false;
        }
        let ratio = node.splitter_ratio();
        if !(ratio > 0.0 && ratio < 1.0) {
            self.problem = Some(format!("sash {} has split ratio {} outside (0, 1)", node.id(), ratio));
            return false;
        }
        true
    }
}

#[derive(Default)]
struct Outline {
    text: String,
}

impl<'t> LayoutVisitor<'t> for Outline {
    fn visit_part(&mut self, part: &PartVisit<'_, 't>) -> bool {
        let tabs: Vec<String> = part
            .view_ids()
            .iter()
            .map(|view| {
                if Some(view.as_str()) == part.active_view_id() {
                    format!("{}*", view)
                } else {
                    view.clone()
                }
            })
            .collect();
        let _ = writeln!(
            self.text,
            "{}part {} [{}]",
            "  ".repeat(part.path.len()),
            part.part_id(),
            tabs.join(", ")
        );
        true
    }

    fn visit_sash(&mut self, sash: &SashVisit<'_, 't>) -> bool {
        let orientation = match sash.sash.orientation() {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        };
        let _ = writeln!(
            self.text,
            "{}sash #{} {} {:.2}",
            "  ".repeat(sash.path.len()),
            sash.sash.id(),
            orientation,
            sash.sash.splitter_ratio()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Helper constructors ===

    fn part(id: &str, views: &[&str], active: Option<&str>) -> LayoutNode {
        LayoutNode::Part(PartLeaf::with_views(
            id,
            views.iter().map(|v| v.to_string()).collect(),
            active.map(str::to_string),
        ))
    }

    fn hsash(id: u32, child1: LayoutNode, child2: LayoutNode) -> LayoutNode {
        LayoutNode::sash(id, Orientation::Horizontal, 0.5, child1, child2)
    }

    fn vsash(id: u32, child1: LayoutNode, child2: LayoutNode) -> LayoutNode {
        LayoutNode::sash(id, Orientation::Vertical, 0.5, child1, child2)
    }

    /// p1 | (p2 / p3)
    fn sample() -> LayoutTree {
        LayoutTree::from_root(hsash(
            1,
            part("p1", &["a", "b"], Some("b")),
            vsash(2, part("p2", &["c"], Some("c")), part("p3", &[], None)),
        ))
        .unwrap()
    }

    // === visit ===

    #[test]
    fn visit_is_preorder_parts_and_sashes() {
        let tree = sample();
        let mut seen = Vec::new();
        let mut sashes = Vec::new();
        let completed = tree.visit(
            |part| {
                seen.push(part.part_id().to_string());
                true
            },
            |sash| {
                sashes.push(sash.sash.id());
                true
            },
        );
        assert!(completed);
        assert_eq!(seen, vec!["p1", "p2", "p3"]);
        assert_eq!(sashes, vec![1, 2]);
    }

    #[test]
    fn visit_reports_ancestor_path() {
        let tree = sample();
        let mut paths = Vec::new();
        tree.visit_parts(|part| {
            let ids: Vec<u32> = part.path.iter().map(|step| step.sash.id()).collect();
            paths.push((part.part_id().to_string(), ids, part.route()));
            true
        });
        assert_eq!(paths[0], ("p1".to_string(), vec![1], vec![Slot::First]));
        assert_eq!(paths[1], ("p2".to_string(), vec![1, 2], vec![Slot::Second, Slot::First]));
        assert_eq!(paths[2], ("p3".to_string(), vec![1, 2], vec![Slot::Second, Slot::Second]));
    }

    #[test]
    fn visit_part_false_stops_whole_walk() {
        let tree = sample();
        let mut seen = Vec::new();
        let completed = tree.visit_parts(|part| {
            seen.push(part.part_id().to_string());
            part.part_id() != "p2"
        });
        assert!(!completed);
        assert_eq!(seen, vec!["p1", "p2"]);
    }

    #[test]
    fn visit_sash_false_stops_walk_before_its_children() {
        let tree = sample();
        let mut seen = Vec::new();
        let completed = tree.visit(
            |part| {
                seen.push(part.part_id().to_string());
                true
            },
            |sash| sash.sash.id() != 2,
        );
        assert!(!completed);
        assert_eq!(seen, vec!["p1"]);
    }

    #[test]
    fn visit_on_empty_tree_calls_nothing() {
        let tree = LayoutTree::empty();
        let mut calls = 0;
        assert!(tree.visit_parts(|_| {
            calls += 1;
            true
        }));
        assert_eq!(calls, 0);
    }

    // === queries ===

    #[test]
    fn queries_find_parts_and_views() {
        let tree = sample();
        assert_eq!(tree.part_ids(), vec!["p1", "p2", "p3"]);
        assert_eq!(tree.sash_ids(), vec![1, 2]);
        assert_eq!(tree.part_count(), 3);
        assert!(tree.contains_part("p3"));
        assert!(!tree.contains_part("p9"));
        assert_eq!(tree.part("p1").unwrap().active_view_id(), Some("b"));
        assert_eq!(tree.part_of_view("c").unwrap().part_id(), "p2");
        assert!(tree.part_of_view("zz").is_none());
    }

    #[test]
    fn locate_helpers_return_routes() {
        let tree = sample();
        assert_eq!(tree.locate_part("p3"), Some(vec![Slot::Second, Slot::Second]));
        assert_eq!(tree.locate_sash(2), Some(vec![Slot::Second]));
        assert_eq!(tree.locate_sash(1), Some(vec![]));
        let location = tree.locate_view("b").unwrap();
        assert_eq!(location.part_id, "p1");
        assert_eq!(location.index, 1);
        assert_eq!(location.route, vec![Slot::First]);
    }

    // === pruning ===

    #[test]
    fn prune_promotes_sibling() {
        let mut tree = sample();
        assert!(tree.prune(&[Slot::Second, Slot::First]));
        let expected = LayoutTree::from_root(hsash(
            1,
            part("p1", &["a", "b"], Some("b")),
            part("p3", &[], None),
        ))
        .unwrap();
        assert_eq!(tree, expected);
    }

    #[test]
    fn prune_root_empties_tree() {
        let mut tree = LayoutTree::single_part("p1");
        assert!(tree.prune(&[]));
        assert!(tree.is_empty());
    }

    // === validate ===

    #[test]
    fn validate_rejects_duplicate_part_ids() {
        let result = LayoutTree::from_root(hsash(1, part("p1", &[], None), part("p1", &[], None)));
        assert!(matches!(result, Err(LayoutError::CorruptLayout { .. })));
    }

    #[test]
    fn validate_rejects_view_in_two_parts() {
        let result = LayoutTree::from_root(hsash(
            1,
            part("p1", &["v"], Some("v")),
            part("p2", &["v"], Some("v")),
        ));
        assert!(matches!(result, Err(LayoutError::CorruptLayout { .. })));
    }

    #[test]
    fn validate_rejects_bad_active_view() {
        assert!(LayoutTree::from_root(part("p1", &["a"], Some("b"))).is_err());
        assert!(LayoutTree::from_root(part("p1", &["a"], None)).is_err());
        assert!(LayoutTree::from_root(part("p1", &[], Some("a"))).is_err());
    }

    #[test]
    fn validate_rejects_duplicate_sash_ids_and_bad_ratios() {
        let duplicate = hsash(1, part("p1", &[], None), vsash(1, part("p2", &[], None), part("p3", &[], None)));
        assert!(LayoutTree::from_root(duplicate).is_err());

        for ratio in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let node = LayoutNode::sash(1, Orientation::Vertical, ratio, part("p1", &[], None), part("p2", &[], None));
            assert!(LayoutTree::from_root(node).is_err(), "ratio {} accepted", ratio);
        }
    }

    // === outline ===

    #[test]
    fn outline_indents_by_depth_and_marks_active() {
        let expected = "\
sash #1 horizontal 0.50
  part p1 [a, b*]
  sash #2 vertical 0.50
    part p2 [c*]
    part p3 []
";
        assert_eq!(sample().outline(), expected);
        assert_eq!(LayoutTree::empty().outline(), "(empty)\n");
    }
}
