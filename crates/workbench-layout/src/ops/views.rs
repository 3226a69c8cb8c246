//! Tab-level edits: adding, moving, closing and activating views.

use super::resolve_index;
use crate::error::{LayoutError, Result};
use crate::registry::{ActivationRegistry, most_recent};
use crate::tree::LayoutTree;

impl LayoutTree {
    /// Dock `view_id` in `part_id` at `index` (append when `None`) and make
    /// it the active tab.
    ///
    /// The caller must not add a view that is already docked elsewhere.
    pub fn add_view(&self, part_id: &str, view_id: &str, index: Option<usize>) -> Result<LayoutTree> {
        let mut next = self.clone();
        next.insert_view_in_place(part_id, view_id, index)?;
        log::debug!("add_view: {} into {} at {:?}", view_id, part_id, index);
        Ok(next)
    }

    /// Move a view to `target_part_id`, inserting it before the view that
    /// currently sits at `index` in the target (append when `None`).
    ///
    /// Leaving a different part runs the same cleanup as [`remove_view`](Self::remove_view),
    /// including pruning the source part if it empties.
    pub fn move_view(
        &self,
        view_id: &str,
        target_part_id: &str,
        index: Option<usize>,
        registry: &dyn ActivationRegistry,
    ) -> Result<LayoutTree> {
        let source = self
            .locate_view(view_id)
            .ok_or_else(|| LayoutError::view_not_found(view_id))?;
        let target = self
            .part(target_part_id)
            .ok_or_else(|| LayoutError::part_not_found(target_part_id))?;
        // Resolved against the target as it looks before the move
        let insert_at = resolve_index(index, target.view_ids().len())?;

        let mut next = self.clone();
        if source.part_id == target_part_id {
            let part = next.leaf_at(&source.route, target_part_id)?;
            part.remove_view_at(source.index);
            let insert_at = if insert_at > source.index { insert_at - 1 } else { insert_at };
            part.insert_view(insert_at, view_id);
        } else {
            next.detach_view_in_place(view_id, registry)?;
            next.insert_view_in_place(target_part_id, view_id, Some(insert_at))?;
        }
        log::debug!(
            "move_view: {} from {} to {} at {}",
            view_id, source.part_id, target_part_id, insert_at
        );
        Ok(next)
    }

    /// Close a view. If it was the active tab, the most recently activated
    /// remaining view takes over; a part left without views is removed.
    pub fn remove_view(&self, view_id: &str, registry: &dyn ActivationRegistry) -> Result<LayoutTree> {
        let mut next = self.clone();
        next.detach_view_in_place(view_id, registry)?;
        log::debug!("remove_view: {}", view_id);
        Ok(next)
    }

    /// Make `view_id` the active tab of `part_id`.
    pub fn activate_view(&self, part_id: &str, view_id: &str) -> Result<LayoutTree> {
        let route = self.route_to_part(part_id)?;
        let mut next = self.clone();
        let part = next.leaf_at(&route, part_id)?;
        if !part.contains_view(view_id) {
            return Err(LayoutError::ViewNotPresentInPart {
                part_id: part_id.to_string(),
                view_id: view_id.to_string(),
            });
        }
        part.set_active(Some(view_id.to_string()));
        log::debug!("activate_view: {} in {}", view_id, part_id);
        Ok(next)
    }

    /// Activate the tab after `view_id`, or the one before it when it is the
    /// last tab. A single-tab part is left unchanged.
    pub fn activate_sibling_view(&self, part_id: &str, view_id: &str) -> Result<LayoutTree> {
        let route = self.route_to_part(part_id)?;
        let mut next = self.clone();
        let part = next.leaf_at(&route, part_id)?;
        let index = part.view_index(view_id).ok_or_else(|| LayoutError::ViewNotPresentInPart {
            part_id: part_id.to_string(),
            view_id: view_id.to_string(),
        })?;

        // Forward first, then backward
        let views = part.view_ids();
        let sibling = views
            .get(index + 1)
            .or_else(|| index.checked_sub(1).and_then(|prev| views.get(prev)))
            .cloned();
        if let Some(sibling) = sibling {
            log::debug!("activate_sibling_view: {} -> {} in {}", view_id, sibling, part_id);
            part.set_active(Some(sibling));
        }
        Ok(next)
    }

    pub(crate) fn insert_view_in_place(
        &mut self,
        part_id: &str,
        view_id: &str,
        index: Option<usize>,
    ) -> Result<()> {
        let route = self.route_to_part(part_id)?;
        let part = self.leaf_at(&route, part_id)?;
        let index = resolve_index(index, part.view_ids().len())?;
        part.insert_view(index, view_id);
        Ok(())
    }

    pub(crate) fn detach_view_in_place(
        &mut self,
        view_id: &str,
        registry: &dyn ActivationRegistry,
    ) -> Result<()> {
        let location = self
            .locate_view(view_id)
            .ok_or_else(|| LayoutError::view_not_found(view_id))?;
        let part = self.leaf_at(&location.route, &location.part_id)?;
        let removed = part.remove_view_at(location.index);

        if part.active_view_id() == Some(removed.as_str()) {
            let successor = most_recent(registry, part.view_ids()).cloned();
            part.set_active(successor);
        }

        if part.is_empty() {
            self.prune(&location.route);
            log::debug!("Pruned part {} after its last view closed", location.part_id);
        }
        Ok(())
    }
}
