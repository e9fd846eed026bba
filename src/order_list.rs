//! OrderList: head/tail anchors of the first-insertion order threaded through the entry arena.

use crate::entry::{EntryKey, Links, Occurrence};
use slotmap::SlotMap;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct OrderList {
    head: Option<EntryKey>,
    tail: Option<EntryKey>,
}

impl OrderList {
    pub(crate) const fn new() -> Self {
        Self {
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<EntryKey> {
        self.head
    }

    #[cfg(test)]
    pub(crate) fn tail(&self) -> Option<EntryKey> {
        self.tail
    }

    /// Link `key` after the current tail.
    pub(crate) fn push_back<T>(&mut self, entries: &mut SlotMap<EntryKey, Occurrence<T>>, key: EntryKey) {
        let prev = self.tail;
        entries[key].links = Links { prev, next: None };
        match prev {
            Some(p) => entries[p].links.next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Splice `key` out, joining its neighbours. The entry stays in the arena.
    pub(crate) fn unlink<T>(&mut self, entries: &mut SlotMap<EntryKey, Occurrence<T>>, key: EntryKey) {
        let Links { prev, next } = core::mem::take(&mut entries[key].links);
        match prev {
            Some(p) => entries[p].links.next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => entries[n].links.prev = prev,
            None => self.tail = prev,
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(names: &[&'static str]) -> (SlotMap<EntryKey, Occurrence<&'static str>>, Vec<EntryKey>) {
        let mut entries = SlotMap::with_key();
        let keys = names
            .iter()
            .map(|n| entries.insert(Occurrence::new(*n, 1, 0)))
            .collect();
        (entries, keys)
    }

    fn walk(list: &OrderList, entries: &SlotMap<EntryKey, Occurrence<&'static str>>) -> Vec<&'static str> {
        let mut out = Vec::new();
        let mut cur = list.head();
        while let Some(k) = cur {
            out.push(entries[k].element);
            cur = entries[k].links.next;
        }
        out
    }

    fn walk_back(list: &OrderList, entries: &SlotMap<EntryKey, Occurrence<&'static str>>) -> Vec<&'static str> {
        let mut out = Vec::new();
        let mut cur = list.tail();
        while let Some(k) = cur {
            out.push(entries[k].element);
            cur = entries[k].links.prev;
        }
        out
    }

    #[test]
    fn push_back_preserves_order_both_ways() {
        let (mut entries, keys) = arena(&["a", "b", "c"]);
        let mut list = OrderList::new();
        for &k in &keys {
            list.push_back(&mut entries, k);
        }
        assert_eq!(walk(&list, &entries), ["a", "b", "c"]);
        assert_eq!(walk_back(&list, &entries), ["c", "b", "a"]);
    }

    #[test]
    fn unlink_middle_head_and_tail() {
        let (mut entries, keys) = arena(&["a", "b", "c", "d"]);
        let mut list = OrderList::new();
        for &k in &keys {
            list.push_back(&mut entries, k);
        }

        list.unlink(&mut entries, keys[1]);
        assert_eq!(walk(&list, &entries), ["a", "c", "d"]);
        assert_eq!(entries[keys[1]].links, Links::default());

        list.unlink(&mut entries, keys[0]);
        assert_eq!(list.head(), Some(keys[2]));
        assert_eq!(walk_back(&list, &entries), ["d", "c"]);

        list.unlink(&mut entries, keys[3]);
        assert_eq!(list.tail(), Some(keys[2]));
        assert_eq!(walk(&list, &entries), ["c"]);

        list.unlink(&mut entries, keys[2]);
        assert_eq!(list, OrderList::new());
    }

    #[test]
    fn relinking_appends_at_tail() {
        let (mut entries, keys) = arena(&["a", "b", "c"]);
        let mut list = OrderList::new();
        for &k in &keys {
            list.push_back(&mut entries, k);
        }
        list.unlink(&mut entries, keys[0]);
        list.push_back(&mut entries, keys[0]);
        assert_eq!(walk(&list, &entries), ["b", "c", "a"]);
        assert_eq!(walk_back(&list, &entries), ["a", "c", "b"]);
    }
}
