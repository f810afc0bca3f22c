//! Insertion-position arithmetic for ordered lists
//!
//! Positions come from presentation as plain integers measured against the
//! list the user was looking at. They are clamped, never rejected, and
//! `None` always means "append".

/// Clamp an optional insertion position to `[0, len]`
///
/// `None` resolves to `len` (append).
pub fn insertion_index(position: Option<usize>, len: usize) -> usize {
    position.map_or(len, |p| p.min(len))
}

/// Final index of an item moved within its own list
///
/// `current` is the item's index in a list of `len` items. The target is
/// clamped against the list with the item removed. When the requested
/// position lies after the current index, the removal has already shifted
/// the caller's slot down by one, so the target is decremented.
pub fn reorder_target(current: usize, position: Option<usize>, len: usize) -> usize {
    let target = insertion_index(position, len.saturating_sub(1));
    match position {
        Some(p) if p > current => target.saturating_sub(1),
        _ => target,
    }
}

/// Move the item at `current` to the position requested by the caller
///
/// Returns true if the order changed.
pub fn reorder<T>(items: &mut Vec<T>, current: usize, position: Option<usize>) -> bool {
    if current >= items.len() {
        return false;
    }

    let target = reorder_target(current, position, items.len());
    if target == current {
        return false;
    }

    let item = items.remove(current);
    items.insert(target, item);
    true
}

/// Insert an item at a clamped position, returning the index it landed at
pub fn insert_at<T>(items: &mut Vec<T>, item: T, position: Option<usize>) -> usize {
    let index = insertion_index(position, items.len());
    items.insert(index, item);
    index
}
