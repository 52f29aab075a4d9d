//! Admin reordering: move-element-to-index over a plain ordered list

use std::collections::BTreeMap;

/// Move the element at `from` so it ends up at index `to`
///
/// `to` is clamped to the list bounds. Returns false when `from` is out of
/// range or nothing moved.
pub fn move_to_index<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() {
        return false;
    }
    let to = to.min(list.len() - 1);
    if from == to {
        return false;
    }
    let item = list.remove(from);
    list.insert(to, item);
    true
}

/// Drop the element keyed `dragged` onto the position of the element keyed `target`
pub fn move_by_key<T, K, F>(list: &mut Vec<T>, dragged: &K, target: &K, key: F) -> bool
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    if dragged == target {
        return false;
    }
    let from = list.iter().position(|item| key(item) == *dragged);
    let to = list.iter().position(|item| key(item) == *target);
    match (from, to) {
        (Some(from), Some(to)) => move_to_index(list, from, to),
        _ => false,
    }
}

/// Move the element keyed `dragged` to the first slot of 1-based `page`
///
/// The insert index is clamped to the end of the list.
pub fn move_to_page_start<T, K, F>(
    list: &mut Vec<T>,
    dragged: &K,
    page: usize,
    page_size: usize,
    key: F,
) -> bool
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let Some(from) = list.iter().position(|item| key(item) == *dragged) else {
        return false;
    };
    let target = page.saturating_sub(1).saturating_mul(page_size.max(1));

    let item = list.remove(from);
    let insert_at = target.min(list.len());
    list.insert(insert_at, item);
    insert_at != from
}

/// 1-based page an index falls on
pub fn page_of(index: usize, page_size: usize) -> usize {
    index / page_size.max(1) + 1
}

/// Number of pages needed for `len` items
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Group items by 1-based page, preserving order
pub fn group_by_page<T>(list: &[T], page_size: usize) -> BTreeMap<usize, Vec<&T>> {
    let mut pages: BTreeMap<usize, Vec<&T>> = BTreeMap::new();
    for (index, item) in list.iter().enumerate() {
        pages.entry(page_of(index, page_size)).or_default().push(item);
    }
    pages
}
