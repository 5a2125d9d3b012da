//! Ordered collection of invoice rows.

use indexmap::IndexMap;

use tallysheet_core::SeqId;

use crate::line_item::{LineItem, LineItemDraft, LineItemId};

/// Rows in insertion (display) order, addressed by opaque handles.
///
/// Holds no computed values. Handles are never reused, not even after
/// [`LineItemStore::clear`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemStore {
    rows: IndexMap<LineItemId, LineItem>,
    next_id: SeqId,
}

impl Default for LineItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemStore {
    pub fn new() -> Self {
        Self {
            rows: IndexMap::new(),
            next_id: SeqId::FIRST,
        }
    }

    /// Handle the next [`LineItemStore::append`] will return.
    pub fn next_id(&self) -> LineItemId {
        LineItemId::new(self.next_id)
    }

    /// Add a row at the end.
    pub fn append(&mut self, draft: LineItemDraft) -> LineItemId {
        let id = self.next_id();
        self.insert(id, draft);
        id
    }

    /// Place a row under a handle minted earlier.
    ///
    /// An existing row with the same handle is replaced in place; otherwise
    /// the row goes to the end. The sequence moves past `id` either way.
    pub fn insert(&mut self, id: LineItemId, draft: LineItemDraft) {
        self.rows.insert(id, LineItem::from_draft(id, draft));
        if id.0 >= self.next_id {
            self.next_id = id.0.next();
        }
    }

    /// Remove a row. Absent handles are ignored.
    pub fn remove(&mut self, id: LineItemId) -> Option<LineItem> {
        self.rows.shift_remove(&id)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn get(&self, id: LineItemId) -> Option<&LineItem> {
        self.rows.get(&id)
    }

    /// Direct access for the editing collaborator.
    pub fn get_mut(&mut self, id: LineItemId) -> Option<&mut LineItem> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: LineItemId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &LineItem> + '_ {
        self.rows.values()
    }

    /// Alias of [`LineItemStore::iter`].
    pub fn all(&self) -> impl ExactSizeIterator<Item = &LineItem> + '_ {
        self.iter()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = LineItemId> + '_ {
        self.rows.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a LineItemStore {
    type Item = &'a LineItem;
    type IntoIter = indexmap::map::Values<'a, LineItemId, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallysheet_core::Entity;

    fn articles(store: &LineItemStore) -> Vec<String> {
        store.iter().map(|r| r.article.clone()).collect()
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut store = LineItemStore::new();
        let a = store.append(LineItemDraft::default().with_article("A"));
        let b = store.append(LineItemDraft::default().with_article("B"));
        let c = store.append(LineItemDraft::default().with_article("C"));

        assert_eq!(articles(&store), ["A", "B", "C"]);
        assert!(a < b && b < c);
        assert_eq!(store.get(b).map(|r| r.id()), Some(b));
    }

    #[test]
    fn remove_keeps_order_of_remaining_rows() {
        let mut store = LineItemStore::new();
        let a = store.append(LineItemDraft::default().with_article("A"));
        let b = store.append(LineItemDraft::default().with_article("B"));
        let c = store.append(LineItemDraft::default().with_article("C"));

        let removed = store.remove(b).unwrap();
        assert_eq!(removed.article, "B");
        assert_eq!(articles(&store), ["A", "C"]);
        assert_eq!(store.ids().collect::<Vec<_>>(), [a, c]);
    }

    #[test]
    fn removing_absent_row_is_a_no_op() {
        let mut store = LineItemStore::new();
        let a = store.append(LineItemDraft::default());
        assert!(store.remove(a).is_some());

        assert!(store.remove(a).is_none());
        assert!(store.remove(LineItemId::new(SeqId::from_raw(99))).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn handles_are_not_reused_after_clear() {
        let mut store = LineItemStore::new();
        let first = store.append(LineItemDraft::default());
        store.clear();
        assert_eq!(store.len(), 0);

        let second = store.append(LineItemDraft::default());
        assert_ne!(first, second);
    }

    #[test]
    fn insert_advances_sequence_past_explicit_handle() {
        let mut store = LineItemStore::new();
        let explicit = LineItemId::new(SeqId::from_raw(10));
        store.insert(explicit, LineItemDraft::default());
        assert_eq!(store.next_id(), LineItemId::new(SeqId::from_raw(11)));
    }

    #[test]
    fn editing_through_get_mut_is_visible_on_iteration() {
        let mut store = LineItemStore::new();
        let id = store.append(LineItemDraft::measured(1, 2.0, 3.0));
        if let Some(row) = store.get_mut(id) {
            row.area = 4.0;
        }
        let amounts: Vec<f64> = store.iter().map(LineItem::amount).collect();
        assert_eq!(amounts, [12.0]);
    }
}
