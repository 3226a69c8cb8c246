//! Most-recently-used lookups used when the active tab of a part is closed.

use std::collections::HashMap;

/// Read-only oracle answering "when was this view last activated?".
///
/// Timestamps only need to be monotonically increasing; `None` means the
/// view was never activated and ranks below every timestamp.
pub trait ActivationRegistry {
    fn last_activated(&self, view_id: &str) -> Option<u64>;
}

/// Registry with no history: every view is "never activated".
#[derive(Clone, Copy, Debug, Default)]
pub struct NoActivationHistory;

impl ActivationRegistry for NoActivationHistory {
    fn last_activated(&self, _view_id: &str) -> Option<u64> {
        None
    }
}

impl<T: ActivationRegistry + ?Sized> ActivationRegistry for &T {
    fn last_activated(&self, view_id: &str) -> Option<u64> {
        (**self).last_activated(view_id)
    }
}

impl ActivationRegistry for HashMap<String, u64> {
    fn last_activated(&self, view_id: &str) -> Option<u64> {
        self.get(view_id).copied()
    }
}

/// In-memory activation history driven by a logical clock.
#[derive(Clone, Debug, Default)]
pub struct ActivationLog {
    clock: u64,
    stamps: HashMap<String, u64>,
}

impl ActivationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an activation and return its timestamp.
    pub fn record(&mut self, view_id: &str) -> u64 {
        self.clock += 1;
        self.stamps.insert(view_id.to_string(), self.clock);
        self.clock
    }

    /// Drop a view's history (e.g. once the view is closed for good).
    pub fn forget(&mut self, view_id: &str) {
        self.stamps.remove(view_id);
    }
}

impl ActivationRegistry for ActivationLog {
    fn last_activated(&self, view_id: &str) -> Option<u64> {
        self.stamps.get(view_id).copied()
    }
}

/// Pick the most recently activated candidate. Ties (including "never
/// activated") go to the earliest candidate in tab order.
pub(crate) fn most_recent<'a>(
    registry: &dyn ActivationRegistry,
    candidates: &'a [String],
) -> Option<&'a String> {
    let mut best: Option<(&String, Option<u64>)> = None;
    for view_id in candidates {
        let stamp = registry.last_activated(view_id);
        match best {
            Some((_, best_stamp)) if stamp <= best_stamp => {}
            _ => best = Some((view_id, stamp)),
        }
    }
    best.map(|(view_id, _)| view_id)
}
