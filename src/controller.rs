//! The render loop controller.
//!
//! Owns the [`Store`] and the latest [`ListView`]. Every intent goes
//! through [`Controller::handle`], which dispatches it and then re-renders
//! the whole list, whether or not the intent changed anything. Nothing else
//! writes to the store.
//!
//! ```rust
//! use bubbletea_todo::controller::Controller;
//! use bubbletea_todo::intent::Intent;
//!
//! let mut ctl = Controller::new();
//! ctl.handle(Intent::Add("Milk".into()));
//! assert_eq!(ctl.view().len(), 1);
//! ```

use crate::intent::{DispatchTable, Intent};
use crate::item::Item;
use crate::render::{render, ListView};
use crate::store::Store;
use tracing::trace;

/// Single owner of the list state and its rendered form.
#[derive(Debug)]
pub struct Controller {
    store: Store,
    table: DispatchTable,
    view: ListView,
    renders: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// A controller over an empty store.
    pub fn new() -> Self {
        Self::with_store(Store::new())
    }

    /// A controller over the given store. The store is rendered immediately.
    pub fn with_store(store: Store) -> Self {
        let mut ctl = Self {
            store,
            table: DispatchTable::new(),
            view: ListView::default(),
            renders: 0,
        };
        ctl.rerender();
        ctl
    }

    /// Replaces the dispatch table.
    pub fn with_table(mut self, table: DispatchTable) -> Self {
        self.table = table;
        self
    }

    /// Dispatches one intent and re-renders. Returns whether the list changed.
    pub fn handle(&mut self, intent: Intent) -> bool {
        let changed = self.table.dispatch(&mut self.store, intent);
        self.rerender();
        changed
    }

    fn rerender(&mut self) {
        self.view = render(self.store.items());
        self.renders += 1;
        trace!(rows = self.view.len(), renders = self.renders, "rendered");
    }

    /// The current items.
    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    /// Read access to the store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The list as of the last render.
    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// How many times the list has been rendered.
    pub fn render_count(&self) -> u64 {
        self.renders
    }
}
