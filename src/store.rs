//! The item store: the single source of truth for the list.
//!
//! Every mutating operation is total. Invalid input is absorbed: adding
//! blank text does nothing, and saving blank text keeps the previous text.
//! Operations report whether they changed anything so callers can log or
//! ignore it, but nothing is ever surfaced as an error.
//!
//! ```rust
//! use bubbletea_todo::store::{ItemActions, Store};
//!
//! let mut store = Store::new();
//! let id = store.add_item("  Buy milk  ").unwrap();
//! store.begin_edit(id);
//! store.save_edit(id, "Buy oat milk");
//! assert_eq!(store.get(id).map(|i| i.text()), Some("Buy oat milk"));
//! ```

use crate::item::{IdGenerator, IdSource, Item, ItemId};
use tracing::debug;

/// A partial update of an item, applied with [`ItemActions::update_item`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    /// New text. Blank text keeps the current text.
    pub text: Option<String>,
    /// New edit-mode flag.
    pub editing: Option<bool>,
}

impl ItemPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the edit-mode flag.
    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = Some(editing);
        self
    }
}

/// The operations that mutate the list.
///
/// The dispatch layer is written against this trait rather than against
/// [`Store`], so it only ever sees the capability to mutate items.
pub trait ItemActions {
    /// Appends an item with the trimmed text. Blank text is ignored and
    /// returns `None`.
    fn add_item(&mut self, text: &str) -> Option<ItemId>;

    /// Puts the item into edit mode.
    fn begin_edit(&mut self, id: ItemId) -> bool;

    /// Stores the trimmed text, or keeps the old text when it is blank, and
    /// leaves edit mode.
    fn save_edit(&mut self, id: ItemId, new_text: &str) -> bool;

    /// Leaves edit mode without touching the text.
    fn cancel_edit(&mut self, id: ItemId) -> bool;

    /// Removes the item.
    fn delete_item(&mut self, id: ItemId) -> bool;

    /// Applies a partial update.
    fn update_item(&mut self, id: ItemId, patch: &ItemPatch) -> bool;
}

/// Ordered, in-memory item collection.
#[derive(Debug, Default)]
pub struct Store {
    items: Vec<Item>,
    ids: IdGenerator,
}

impl Store {
    /// An empty store with identifiers from the wall clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store with identifiers from the given clock.
    pub fn with_id_source(source: impl IdSource + 'static) -> Self {
        Self {
            items: Vec::new(),
            ids: IdGenerator::new(source),
        }
    }

    /// All items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Looks an item up by identifier.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// The display position of an item.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        let item = self.items.iter_mut().find(|i| i.id == id);
        if item.is_none() {
            debug!(%id, "no such item");
        }
        item
    }
}

fn apply_text(item: &mut Item, new_text: &str) {
    let trimmed = new_text.trim();
    if trimmed.is_empty() {
        debug!(id = %item.id, "blank text, keeping previous");
    } else {
        item.text = trimmed.to_string();
    }
}

impl ItemActions for Store {
    fn add_item(&mut self, text: &str) -> Option<ItemId> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("ignoring blank item");
            return None;
        }
        let id = self.ids.next_id();
        self.items.push(Item::new(id, trimmed.to_string()));
        debug!(%id, len = self.items.len(), "item added");
        Some(id)
    }

    fn begin_edit(&mut self, id: ItemId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.editing = true;
                true
            }
            None => false,
        }
    }

    fn save_edit(&mut self, id: ItemId, new_text: &str) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                apply_text(item, new_text);
                item.editing = false;
                true
            }
            None => false,
        }
    }

    fn cancel_edit(&mut self, id: ItemId) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.editing = false;
                true
            }
            None => false,
        }
    }

    fn delete_item(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(%id, len = self.items.len(), "item deleted");
        } else {
            debug!(%id, "no such item");
        }
        removed
    }

    fn update_item(&mut self, id: ItemId, patch: &ItemPatch) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                if let Some(text) = &patch.text {
                    apply_text(item, text);
                }
                if let Some(editing) = patch.editing {
                    item.editing = editing;
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_store() -> Store {
        let mut t: u64 = 0;
        Store::with_id_source(move || {
            t += 1;
            t
        })
    }

    fn texts(store: &Store) -> Vec<&str> {
        store.items().iter().map(|i| i.text()).collect()
    }

    #[test]
    fn test_add_trims_text() {
        let mut store = counting_store();
        let id = store.add_item("  Buy milk  ").expect("item should be added");
        assert_eq!(store.len(), 1);
        let item = store.get(id).expect("item exists");
        assert_eq!(item.text(), "Buy milk");
        assert!(!item.is_editing());
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut store = counting_store();
        assert_eq!(store.add_item(""), None);
        assert_eq!(store.add_item("   "), None);
        assert_eq!(store.add_item("\t\n"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = Store::with_id_source(|| 7u64);
        let a = store.add_item("a").unwrap();
        let b = store.add_item("b").unwrap();
        let c = store.add_item("c").unwrap();
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn test_begin_then_cancel_leaves_item_unchanged() {
        let mut store = counting_store();
        store.add_item("first");
        let id = store.add_item("second").unwrap();
        store.add_item("third");

        assert!(store.begin_edit(id));
        assert!(store.get(id).unwrap().is_editing());
        assert!(store.cancel_edit(id));

        let item = store.get(id).unwrap();
        assert_eq!(item.text(), "second");
        assert!(!item.is_editing());
        assert_eq!(store.position(id), Some(1));
    }

    #[test]
    fn test_save_blank_keeps_text() {
        let mut store = counting_store();
        let id = store.add_item("Milk").unwrap();
        store.begin_edit(id);
        assert!(store.save_edit(id, ""));
        let item = store.get(id).unwrap();
        assert_eq!(item.text(), "Milk");
        assert!(!item.is_editing());

        store.begin_edit(id);
        store.save_edit(id, "   ");
        assert_eq!(store.get(id).unwrap().text(), "Milk");
    }

    #[test]
    fn test_save_replaces_text() {
        let mut store = counting_store();
        let id = store.add_item("Milk").unwrap();
        store.begin_edit(id);
        store.save_edit(id, " New text ");
        let item = store.get(id).unwrap();
        assert_eq!(item.text(), "New text");
        assert!(!item.is_editing());
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut store = counting_store();
        let a = store.add_item("a").unwrap();
        let b = store.add_item("b").unwrap();
        let c = store.add_item("c").unwrap();
        let d = store.add_item("d").unwrap();

        assert!(store.delete_item(b));
        assert_eq!(texts(&store), ["a", "c", "d"]);
        assert_eq!(store.get(b), None);
        assert_eq!(
            store.items().iter().map(Item::id).collect::<Vec<_>>(),
            [a, c, d]
        );
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut store = counting_store();
        store.add_item("only");
        let ghost = ItemId::new(999);

        assert!(!store.begin_edit(ghost));
        assert!(!store.save_edit(ghost, "x"));
        assert!(!store.cancel_edit(ghost));
        assert!(!store.delete_item(ghost));
        assert!(!store.update_item(ghost, &ItemPatch::new().editing(true)));
        assert_eq!(texts(&store), ["only"]);
        assert!(!store.items()[0].is_editing());
    }

    #[test]
    fn test_several_items_may_edit_at_once() {
        let mut store = counting_store();
        let a = store.add_item("a").unwrap();
        let b = store.add_item("b").unwrap();
        store.begin_edit(a);
        store.begin_edit(b);
        assert!(store.items().iter().all(Item::is_editing));
    }

    #[test]
    fn test_update_item_applies_patch() {
        let mut store = counting_store();
        let id = store.add_item("tea").unwrap();

        store.update_item(id, &ItemPatch::new().editing(true));
        assert!(store.get(id).unwrap().is_editing());

        store.update_item(id, &ItemPatch::new().text("  green tea ").editing(false));
        let item = store.get(id).unwrap();
        assert_eq!(item.text(), "green tea");
        assert!(!item.is_editing());

        store.update_item(id, &ItemPatch::new().text(""));
        assert_eq!(store.get(id).unwrap().text(), "green tea");
    }
}
