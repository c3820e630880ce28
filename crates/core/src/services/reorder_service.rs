use crate::errors::CoreError;

use super::watchlist_store::WatchlistStore;

/// Remove the element at `from` and reinsert it at `to`.
///
/// Both indices must be in bounds. The result is always a permutation
/// of the input.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Translate a drag from `active_id` onto `over_id` into (from, to) indices.
///
/// `None` when either id is unknown or the drag ends on its own origin.
pub fn drag_indices(ids: &[String], active_id: &str, over_id: &str) -> Option<(usize, usize)> {
    if active_id == over_id {
        return None;
    }
    let from = ids.iter().position(|id| id == active_id)?;
    let to = ids.iter().position(|id| id == over_id)?;
    Some((from, to))
}

/// Turns drag gestures over watchlist entries into store reorders.
///
/// Target selection (closest center) belongs to the host's gesture
/// library; this controller only maps ids to positions.
#[derive(Debug, Default)]
pub struct ReorderController {
    active: Option<String>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag began on the entry with `id`.
    pub fn drag_start(&mut self, id: &str) {
        self.active = Some(id.to_string());
    }

    /// The entry currently being dragged, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The drag was abandoned (escape key, pointer left the window).
    pub fn drag_cancel(&mut self) {
        self.active = None;
    }

    /// A drag of `active_id` ended over `over_id` (`None`: over nothing).
    ///
    /// Returns whether the store order changed.
    pub fn drag_end(
        &mut self,
        store: &mut WatchlistStore,
        active_id: &str,
        over_id: Option<&str>,
    ) -> Result<bool, CoreError> {
        self.active = None;

        let Some(over_id) = over_id else {
            return Ok(false);
        };
        match drag_indices(&store.ids(), active_id, over_id) {
            Some((from, to)) => store.reorder(from, to),
            None => Ok(false),
        }
    }
}

