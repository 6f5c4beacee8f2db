//! Placement Resolution
//!
//! The backend only understands relative moves (after X, before X, append under
//! P). Plans are applied parent-changes first and then reorders in ascending
//! target order, so the previous sibling is the most stable reference: it is
//! preferred over the next sibling, and appending is the last resort.

use crate::models::PlacementRef;

/// Relative placement for `page_id` at `target_index` among `sibling_ids`.
///
/// `sibling_ids` is the final child order of `parent_id`, including `page_id`.
pub fn resolve_placement(
    page_id: &str,
    parent_id: &str,
    target_index: usize,
    sibling_ids: &[&str],
) -> PlacementRef {
    let prev_id = target_index
        .checked_sub(1)
        .and_then(|prev| sibling_ids.get(prev))
        .copied();
    let next_id = sibling_ids.get(target_index + 1).copied();

    if let Some(prev) = prev_id.filter(|id| *id != page_id) {
        return PlacementRef::after(prev);
    }

    if let Some(next) = next_id.filter(|id| *id != page_id) {
        return PlacementRef::before(next);
    }

    PlacementRef::append_to(parent_id)
}
