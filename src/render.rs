//! The render function: items in, virtual list out.
//!
//! [`render`] is pure. It reads the items and builds a [`ListView`] value;
//! it never touches the store, and rendering the same items twice yields
//! equal views. Each row is in view mode or edit mode depending only on
//! the item's editing flag.

use crate::item::{Item, ItemId};
use std::fmt;

/// The role of an activatable control. Activations are classified by role,
/// not by which concrete row the control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRole {
    /// Append the new-item text.
    Add,
    /// Enter edit mode.
    Edit,
    /// Remove the item.
    Delete,
    /// Store the edited text.
    Save,
    /// Leave edit mode without storing.
    Cancel,
}

impl ControlRole {
    /// The button caption.
    pub fn label(self) -> &'static str {
        match self {
            ControlRole::Add => "Add",
            ControlRole::Edit => "Edit",
            ControlRole::Delete => "Delete",
            ControlRole::Save => "Save",
            ControlRole::Cancel => "Cancel",
        }
    }
}

impl fmt::Display for ControlRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a row shows in place of its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    /// A static label.
    View {
        /// The item text.
        text: String,
    },
    /// A text field pre-filled with the stored text.
    Edit {
        /// Initial field contents.
        field: String,
    },
}

/// One rendered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Identifier of the item this row shows.
    pub id: ItemId,
    /// Label or field.
    pub mode: RowMode,
    /// Controls in display order.
    pub controls: [ControlRole; 2],
}

impl Row {
    /// Whether the row shows an edit field.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, RowMode::Edit { .. })
    }
}

/// A fully rendered list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    rows: Vec<Row>,
}

impl ListView {
    /// Rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The row for an item.
    pub fn row(&self, id: ItemId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Unstyled text form, one numbered line per row.
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for (n, row) in self.rows.iter().enumerate() {
            let body = match &row.mode {
                RowMode::View { text } => text.clone(),
                RowMode::Edit { field } => format!("[{}]", field),
            };
            let controls: Vec<String> = row
                .controls
                .iter()
                .map(|c| format!("[ {} ]", c.label()))
                .collect();
            out.push_str(&format!("{}. {} {}\n", n + 1, body, controls.join(" ")));
        }
        out
    }
}

/// Builds the list view from the items.
pub fn render(items: &[Item]) -> ListView {
    let rows = items
        .iter()
        .map(|item| {
            if item.is_editing() {
                render_edit_mode(item)
            } else {
                render_view_mode(item)
            }
        })
        .collect();
    ListView { rows }
}

/// A row showing the text with Edit and Delete controls.
pub fn render_view_mode(item: &Item) -> Row {
    Row {
        id: item.id(),
        mode: RowMode::View {
            text: item.text().to_string(),
        },
        controls: [ControlRole::Edit, ControlRole::Delete],
    }
}

/// A row showing a pre-filled field with Save and Cancel controls.
pub fn render_edit_mode(item: &Item) -> Row {
    Row {
        id: item.id(),
        mode: RowMode::Edit {
            field: item.text().to_string(),
        },
        controls: [ControlRole::Save, ControlRole::Cancel],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ItemActions, Store};

    fn store_with(texts: &[&str]) -> Store {
        let mut t: u64 = 0;
        let mut store = Store::with_id_source(move || {
            t += 1;
            t
        });
        for text in texts {
            store.add_item(text);
        }
        store
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let view = render(&[]);
        assert!(view.is_empty());
        assert_eq!(view.to_plain(), "");
    }

    #[test]
    fn test_modes_follow_editing_flag() {
        let mut store = store_with(&["Milk", "Eggs"]);
        let eggs = store.items()[1].id();
        store.begin_edit(eggs);

        let view = render(store.items());
        assert_eq!(view.len(), 2);
        assert_eq!(
            view.rows()[0].mode,
            RowMode::View {
                text: "Milk".into()
            }
        );
        assert_eq!(view.rows()[0].controls, [ControlRole::Edit, ControlRole::Delete]);
        assert_eq!(
            view.row(eggs).map(|r| &r.mode),
            Some(&RowMode::Edit {
                field: "Eggs".into()
            })
        );
        assert_eq!(view.rows()[1].controls, [ControlRole::Save, ControlRole::Cancel]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut store = store_with(&["a", "b", "c"]);
        let b = store.items()[1].id();
        store.begin_edit(b);

        let first = render(store.items());
        let second = render(store.items());
        assert_eq!(first, second);
        assert_eq!(first.to_plain(), second.to_plain());
    }

    #[test]
    fn test_render_does_not_touch_items() {
        let store = store_with(&["a", "b"]);
        let before = store.items().to_vec();
        let _ = render(store.items());
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_plain_text_form() {
        let mut store = store_with(&["Milk", "Eggs"]);
        let milk = store.items()[0].id();
        store.begin_edit(milk);
        assert_eq!(
            render(store.items()).to_plain(),
            "1. [Milk] [ Save ] [ Cancel ]\n2. Eggs [ Edit ] [ Delete ]\n"
        );
    }
}
