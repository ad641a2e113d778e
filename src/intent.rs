//! Intents and the dispatch table.
//!
//! An [`Intent`] is a request to change the list. Activations are turned
//! into intents by [`classify`], which looks only at the control's role, so
//! one classifier serves every row however many there are. The
//! [`DispatchTable`] then maps each [`IntentKind`] to exactly one
//! [`ItemActions`] call.

use crate::item::ItemId;
use crate::render::ControlRole;
use crate::store::{ItemActions, ItemPatch};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// A request to change the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Append an item with this text.
    Add(String),
    /// Enter edit mode.
    Edit(ItemId),
    /// Store the text and leave edit mode.
    Save(ItemId, String),
    /// Leave edit mode, discarding pending text.
    Cancel(ItemId),
    /// Remove the item.
    Delete(ItemId),
    /// Apply a partial update.
    Update(ItemId, ItemPatch),
}

/// The kind of an [`Intent`], used as the dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    /// [`Intent::Add`]
    Add,
    /// [`Intent::Edit`]
    Edit,
    /// [`Intent::Save`]
    Save,
    /// [`Intent::Cancel`]
    Cancel,
    /// [`Intent::Delete`]
    Delete,
    /// [`Intent::Update`]
    Update,
}

impl IntentKind {
    /// Every kind.
    pub const ALL: [IntentKind; 6] = [
        IntentKind::Add,
        IntentKind::Edit,
        IntentKind::Save,
        IntentKind::Cancel,
        IntentKind::Delete,
        IntentKind::Update,
    ];
}

impl Intent {
    /// The dispatch key.
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Add(_) => IntentKind::Add,
            Intent::Edit(_) => IntentKind::Edit,
            Intent::Save(..) => IntentKind::Save,
            Intent::Cancel(_) => IntentKind::Cancel,
            Intent::Delete(_) => IntentKind::Delete,
            Intent::Update(..) => IntentKind::Update,
        }
    }

    /// The item the intent targets, if any.
    pub fn target(&self) -> Option<ItemId> {
        match self {
            Intent::Add(_) => None,
            Intent::Edit(id)
            | Intent::Save(id, _)
            | Intent::Cancel(id)
            | Intent::Delete(id)
            | Intent::Update(id, _) => Some(*id),
        }
    }
}

/// Turns the activation of a control into an intent.
///
/// `row` is the item the control belongs to and `field` the text of the
/// field associated with the control (the new-item field for Add, the
/// row's edit field for Save). Row controls activated without a row yield
/// `None`.
pub fn classify(role: ControlRole, row: Option<ItemId>, field: &str) -> Option<Intent> {
    let intent = match (role, row) {
        (ControlRole::Add, _) => Intent::Add(field.to_string()),
        (ControlRole::Edit, Some(id)) => Intent::Edit(id),
        (ControlRole::Delete, Some(id)) => Intent::Delete(id),
        (ControlRole::Save, Some(id)) => Intent::Save(id, field.to_string()),
        (ControlRole::Cancel, Some(id)) => Intent::Cancel(id),
        (_, None) => return None,
    };
    Some(intent)
}

/// A dispatch handler: performs one store operation for an intent.
pub type Handler = fn(&mut dyn ItemActions, Intent) -> bool;

fn on_add(actions: &mut dyn ItemActions, intent: Intent) -> bool {
    match intent {
        Intent::Add(text) => actions.add_item(&text).is_some(),
        _ => false,
    }
}

fn on_edit(actions: &mut dyn ItemActions, intent: Intent) -> bool {
    match intent {
        Intent::Edit(id) => actions.begin_edit(id),
        _ => false,
    }
}

fn on_save(actions: &mut dyn ItemActions, intent: Intent) -> bool {
    match intent {
        Intent::Save(id, text) => actions.save_edit(id, &text),
        _ => false,
    }
}

fn on_cancel(actions: &mut dyn ItemActions, intent: Intent) -> bool {
    match intent {
        Intent::Cancel(id) => actions.cancel_edit(id),
        _ => false,
    }
}

fn on_delete(actions: &mut dyn ItemActions, intent: Intent) -> bool {
    match intent {
        Intent::Delete(id) => actions.delete_item(id),
        _ => false,
    }
}

fn on_update(actions: &mut dyn ItemActions, intent: Intent) -> bool {
    match intent {
        Intent::Update(id, patch) => actions.update_item(id, &patch),
        _ => false,
    }
}

/// Maps intent kinds to handlers.
#[derive(Clone)]
pub struct DispatchTable {
    handlers: HashMap<IntentKind, Handler>,
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        let mut handlers: HashMap<IntentKind, Handler> = HashMap::with_capacity(6);
        handlers.insert(IntentKind::Add, on_add);
        handlers.insert(IntentKind::Edit, on_edit);
        handlers.insert(IntentKind::Save, on_save);
        handlers.insert(IntentKind::Cancel, on_cancel);
        handlers.insert(IntentKind::Delete, on_delete);
        handlers.insert(IntentKind::Update, on_update);
        Self { handlers }
    }
}

impl DispatchTable {
    /// The standard table: each kind calls the matching store operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the handler for one kind.
    pub fn with_handler(mut self, kind: IntentKind, handler: Handler) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    /// Number of registered handlers. Independent of how many items exist.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the handler for the intent. Returns whether the list changed.
    pub fn dispatch(&self, actions: &mut dyn ItemActions, intent: Intent) -> bool {
        let kind = intent.kind();
        match self.handlers.get(&kind) {
            Some(handler) => {
                let changed = handler(actions, intent);
                trace!(?kind, changed, "dispatched");
                changed
            }
            None => {
                trace!(?kind, "no handler");
                false
            }
        }
    }
}
