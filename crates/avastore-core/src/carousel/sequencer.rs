//! Item sequencing: repeats the source list so a wrap is invisible.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// How many times the source list is rendered back to back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Copies {
    Double,
    #[default]
    Triple,
}

impl Copies {
    pub fn count(self) -> usize {
        match self {
            Copies::Double => 2,
            Copies::Triple => 3,
        }
    }
}

impl TryFrom<u8> for Copies {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Copies::Double),
            3 => Ok(Copies::Triple),
            other => Err(format!("copies must be 2 or 3, got {}", other)),
        }
    }
}

impl From<Copies> for u8 {
    fn from(copies: Copies) -> Self {
        copies.count() as u8
    }
}

/// Payload a carousel can display
///
/// `key` must be stable for the item's lifetime; it is combined with the copy
/// index to identify each rendered slot.
pub trait CarouselItem {
    fn key(&self) -> String;
}

impl CarouselItem for String {
    fn key(&self) -> String {
        self.clone()
    }
}

impl CarouselItem for &str {
    fn key(&self) -> String {
        (*self).to_string()
    }
}

/// Identity of one rendered slot: the item's own key plus which copy it is in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub item_key: String,
    pub copy: usize,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.item_key, self.copy)
    }
}

/// One entry of a sequenced list, borrowing the host's item
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<'a, T> {
    pub item: &'a T,
    pub key: SlotKey,
    /// Position in the sequenced list
    pub index: usize,
}

/// Repeat `items` `copies` times, preserving order
pub fn sequence<T: CarouselItem>(items: &[T], copies: Copies) -> Vec<Slot<'_, T>> {
    let mut slots = Vec::with_capacity(items.len() * copies.count());
    for copy in 0..copies.count() {
        for item in items {
            let index = slots.len();
            slots.push(Slot {
                item,
                key: SlotKey {
                    item_key: item.key(),
                    copy,
                },
                index,
            });
        }
    }
    slots
}

/// Read-only sequenced view over a host-owned item list
///
/// The view is recomputed only when the host hands over a different list
/// (compared by allocation identity, not by value).
#[derive(Debug, Clone)]
pub struct SequencedList<T> {
    source: Arc<[T]>,
    copies: Copies,
    keys: Vec<SlotKey>,
}

impl<T: CarouselItem> SequencedList<T> {
    pub fn new(source: Arc<[T]>, copies: Copies) -> Self {
        let keys = Self::build_keys(&source, copies);
        Self {
            source,
            copies,
            keys,
        }
    }

    fn build_keys(source: &[T], copies: Copies) -> Vec<SlotKey> {
        sequence(source, copies)
            .into_iter()
            .map(|slot| slot.key)
            .collect()
    }

    /// Swap in a new source list. Returns true when the view was recomputed.
    pub fn refresh(&mut self, source: &Arc<[T]>) -> bool {
        if Arc::ptr_eq(&self.source, source) {
            return false;
        }
        self.source = Arc::clone(source);
        self.keys = Self::build_keys(&self.source, self.copies);
        true
    }

    pub fn source(&self) -> &Arc<[T]> {
        &self.source
    }

    pub fn copies(&self) -> Copies {
        self.copies
    }

    /// Number of distinct source items
    pub fn item_count(&self) -> usize {
        self.source.len()
    }

    /// Number of rendered slots
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Slot at sequenced position `index`
    pub fn get(&self, index: usize) -> Option<Slot<'_, T>> {
        let key = self.keys.get(index)?;
        let item = self.source.get(index % self.source.len())?;
        Some(Slot {
            item,
            key: key.clone(),
            index,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Slot<'_, T>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_sequence_repeats_in_order() {
        let items = vec!["a", "b", "c"];
        let slots = sequence(&items, Copies::Double);

        assert_eq!(slots.len(), 2 * items.len());
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(*slot.item, items[i % items.len()]);
            assert_eq!(slot.index, i);
        }
    }

    #[test]
    fn test_slot_keys_are_unique_and_stable() {
        let items = vec!["a".to_string(), "b".to_string()];
        let slots = sequence(&items, Copies::Triple);

        let keys: Vec<String> = slots.iter().map(|s| s.key.to_string()).collect();
        assert_eq!(keys, vec!["a-0", "b-0", "a-1", "b-1", "a-2", "b-2"]);

        let again = sequence(&items, Copies::Triple);
        assert_eq!(
            slots.iter().map(|s| &s.key).collect::<Vec<_>>(),
            again.iter().map(|s| &s.key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_empty_sequence() {
        let items: Vec<String> = Vec::new();
        assert!(sequence(&items, Copies::Triple).is_empty());

        let list = SequencedList::new(Arc::from(items), Copies::Double);
        assert!(list.is_empty());
        assert!(list.get(0).is_none());
    }

    #[test]
    fn test_refresh_only_on_new_identity() {
        let first: Arc<[String]> = Arc::from(vec!["x".to_string()]);
        let mut list = SequencedList::new(Arc::clone(&first), Copies::Double);
        assert!(!list.refresh(&first));

        // A different allocation is recomputed
        let second: Arc<[String]> = Arc::from(vec!["x".to_string(), "y".to_string()]);
        assert!(list.refresh(&second));
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(3).map(|s| s.item.clone()), Some("y".to_string()));
    }

    #[test]
    fn test_copies_from_number() {
        assert_eq!(Copies::try_from(2u8), Ok(Copies::Double));
        assert_eq!(Copies::try_from(3u8), Ok(Copies::Triple));
        assert!(Copies::try_from(4u8).is_err());
        assert_eq!(u8::from(Copies::Triple), 3);
    }
}
