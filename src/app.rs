//! The terminal app.
//!
//! [`App`] is a `bubbletea_rs::Model`. It owns the [`Controller`], the
//! new-item field, one draft field per item in edit mode, and keyboard
//! focus. Key presses never touch the list directly: the focused control
//! is classified into an [`Intent`] and handed to the controller, and
//! [`App::view`] paints whatever the controller rendered last.
//!
//! Focus moves through the controls in display order:
//!
//! ```text
//! To-do
//!
//! > What needs doing?  [ Add ]
//!
//! 1. Milk [ Edit ] [ Delete ]
//! 2. > Eggs  [ Save ] [ Cancel ]
//! ```

use crate::config::Config;
use crate::controller::Controller;
use crate::intent::{classify, Intent, IntentKind};
use crate::item::ItemId;
use crate::key::{self, new_binding, with_help, with_keys_str, Binding};
use crate::render::{ControlRole, Row, RowMode};
use crate::store::Store;
use crate::style::{Styles, BULLET};
use crate::textinput::{self, Model as TextInput};
use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use std::collections::HashMap;
use tracing::{debug, info};

/// What currently receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// The new-item text field.
    NewItem,
    /// The Add button next to it.
    AddButton,
    /// The edit field of an item in edit mode.
    Field(ItemId),
    /// A button on an item row.
    Control(ItemId, ControlRole),
}

impl Focus {
    /// The item row this focus belongs to, if any.
    pub fn row(self) -> Option<ItemId> {
        match self {
            Focus::NewItem | Focus::AddButton => None,
            Focus::Field(id) | Focus::Control(id, _) => Some(id),
        }
    }
}

/// Application-level key bindings.
#[derive(Debug, Clone)]
pub struct AppKeyMap {
    /// Focus the next control.
    pub next: Binding,
    /// Focus the previous control.
    pub prev: Binding,
    /// Focus the next control when no text field has focus.
    pub down: Binding,
    /// Focus the previous control when no text field has focus.
    pub up: Binding,
    /// Activate the focused control or submit the focused field.
    pub activate: Binding,
    /// Cancel the edit under focus, or quit from the new-item field.
    pub cancel: Binding,
    /// Quit immediately.
    pub quit: Binding,
}

impl Default for AppKeyMap {
    fn default() -> Self {
        Self {
            next: new_binding(vec![with_keys_str(&["tab"]), with_help("tab", "next")]),
            prev: new_binding(vec![with_keys_str(&["shift+tab"]), with_help("shift+tab", "prev")]),
            down: new_binding(vec![with_keys_str(&["down"]), with_help("↓", "next")]),
            up: new_binding(vec![with_keys_str(&["up"]), with_help("↑", "prev")]),
            activate: new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "select")]),
            cancel: new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "cancel")]),
            quit: new_binding(vec![with_keys_str(&["ctrl+c"]), with_help("ctrl+c", "quit")]),
        }
    }
}

impl key::KeyMap for AppKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next, &self.activate, &self.cancel, &self.quit]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.next, &self.prev, &self.down, &self.up],
            vec![&self.activate, &self.cancel],
            vec![&self.quit],
        ]
    }
}

/// The to-do list app.
#[derive(Debug)]
pub struct App {
    config: Config,
    controller: Controller,
    new_item: TextInput,
    drafts: HashMap<ItemId, TextInput>,
    focus: Focus,
    /// Key bindings.
    pub keys: AppKeyMap,
    /// Styles.
    pub styles: Styles,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// An empty list with default settings.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// An empty list with the given settings.
    pub fn with_config(config: Config) -> Self {
        Self::with_store(config, Store::new())
    }

    /// The given store with the given settings.
    pub fn with_store(config: Config, store: Store) -> Self {
        let mut new_item = field(&config);
        new_item.set_placeholder(&config.placeholder);
        let mut app = Self {
            controller: Controller::with_store(store),
            new_item,
            drafts: HashMap::new(),
            focus: Focus::NewItem,
            keys: AppKeyMap::default(),
            styles: Styles::default(),
            config,
        };
        app.sync_drafts();
        app.apply_focus();
        app
    }

    /// The controller holding the list.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Current focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Text of the new-item field.
    pub fn new_item_value(&self) -> String {
        self.new_item.value()
    }

    /// Pending text of an item in edit mode.
    pub fn draft_value(&self, id: ItemId) -> Option<String> {
        self.drafts.get(&id).map(TextInput::value)
    }

    /// Focus targets in display order.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::NewItem, Focus::AddButton];
        for row in self.controller.view().rows() {
            if row.is_editing() {
                order.push(Focus::Field(row.id));
            }
            order.extend(row.controls.iter().map(|&role| Focus::Control(row.id, role)));
        }
        order
    }

    /// Moves focus to `target` if it exists, otherwise to the new-item field.
    pub fn set_focus(&mut self, target: Focus) {
        self.focus = target;
        self.settle_focus(None);
        self.apply_focus();
    }

    fn move_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.set_focus(order[next]);
    }

    /// Hands an intent to the controller and brings drafts and focus in line
    /// with the new render. Returns whether the list changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        let kind = intent.kind();
        let target = intent.target();
        let text_patched = matches!(&intent, Intent::Update(_, patch) if patch.text.is_some());
        debug!(?kind, ?target, "intent");

        let changed = self.controller.handle(intent);

        match (kind, target) {
            (IntentKind::Add, _) => {
                if changed {
                    self.new_item.reset();
                }
                self.focus = Focus::NewItem;
            }
            (IntentKind::Edit, Some(id)) => self.focus = Focus::Field(id),
            // A new text must reach the open draft, or the next save undoes it.
            (IntentKind::Update, Some(id)) if text_patched => {
                self.drafts.remove(&id);
            }
            (IntentKind::Save | IntentKind::Cancel, Some(id)) => {
                // Drop the draft before sync so a re-opened edit starts fresh.
                self.drafts.remove(&id);
                self.focus = Focus::Control(id, ControlRole::Edit);
            }
            _ => {}
        }

        self.sync_drafts();
        self.settle_focus(target);
        self.apply_focus();
        changed
    }

    fn activate(&mut self) {
        let (role, row, text) = match self.focus {
            Focus::NewItem | Focus::AddButton => (ControlRole::Add, None, self.new_item.value()),
            Focus::Field(id) => (ControlRole::Save, Some(id), self.draft_text(id)),
            Focus::Control(id, role) => (role, Some(id), self.draft_text(id)),
        };
        if let Some(intent) = classify(role, row, &text) {
            self.dispatch(intent);
        }
    }

    fn escape(&mut self) -> Option<Cmd> {
        match self.focus {
            Focus::NewItem => {
                info!("quit from new-item field");
                Some(quit())
            }
            focus => {
                let editing = focus
                    .row()
                    .and_then(|id| self.controller.view().row(id))
                    .filter(|row| row.is_editing())
                    .map(|row| row.id);
                match editing {
                    Some(id) => {
                        self.dispatch(Intent::Cancel(id));
                    }
                    None => self.set_focus(Focus::NewItem),
                }
                None
            }
        }
    }

    fn draft_text(&self, id: ItemId) -> String {
        self.draft_value(id).unwrap_or_default()
    }

    fn sync_drafts(&mut self) {
        let editing: Vec<(ItemId, String)> = self
            .controller
            .items()
            .iter()
            .filter(|i| i.is_editing())
            .map(|i| (i.id(), i.text().to_string()))
            .collect();

        self.drafts
            .retain(|id, _| editing.iter().any(|(editing_id, _)| editing_id == id));

        for (id, text) in editing {
            if !self.drafts.contains_key(&id) {
                let mut draft = field(&self.config);
                draft.set_value(&text);
                self.drafts.insert(id, draft);
            }
        }
    }

    fn settle_focus(&mut self, row: Option<ItemId>) {
        let order = self.focus_order();
        if order.contains(&self.focus) {
            return;
        }
        let row = row.or(self.focus.row());
        self.focus = row
            .and_then(|id| order.iter().copied().find(|f| f.row() == Some(id)))
            .unwrap_or(Focus::NewItem);
    }

    fn apply_focus(&mut self) {
        let focus = self.focus;
        if focus == Focus::NewItem {
            let _ = self.new_item.focus();
        } else {
            self.new_item.blur();
        }
        for (id, draft) in self.drafts.iter_mut() {
            if focus == Focus::Field(*id) {
                let _ = draft.focus();
            } else {
                draft.blur();
            }
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Focus::NewItem => Some(&mut self.new_item),
            Focus::Field(id) => self.drafts.get_mut(&id),
            _ => None,
        }
    }

    /// Handles one message. Only key presses do anything.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;

        if self.keys.quit.matches(key_msg) {
            info!("quit");
            return Some(quit());
        }
        let in_field = matches!(self.focus, Focus::NewItem | Focus::Field(_));
        if self.keys.next.matches(key_msg) || (!in_field && self.keys.down.matches(key_msg)) {
            self.move_focus(1);
        } else if self.keys.prev.matches(key_msg) || (!in_field && self.keys.up.matches(key_msg)) {
            self.move_focus(-1);
        } else if self.keys.activate.matches(key_msg) {
            self.activate();
        } else if self.keys.cancel.matches(key_msg) {
            return self.escape();
        } else if let Some(field) = self.focused_field_mut() {
            field.handle_key(key_msg);
        }
        None
    }

    /// Paints the current render.
    pub fn view(&self) -> String {
        let s = &self.styles;
        let mut out = String::new();

        out.push_str(&s.title.render(&self.config.title));
        out.push_str("\n\n");

        out.push_str(&self.new_item.view());
        out.push(' ');
        out.push_str(&self.paint_control(Focus::AddButton, ControlRole::Add));
        out.push_str("\n\n");

        let list = self.controller.view();
        if list.is_empty() {
            out.push_str(&s.empty.render("Nothing to do."));
            out.push('\n');
        }
        for (n, row) in list.rows().iter().enumerate() {
            out.push_str(&self.paint_row(n, row));
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&self.help_view());
        out
    }

    fn paint_row(&self, n: usize, row: &Row) -> String {
        let s = &self.styles;
        let mut line = s.index.render(&format!("{}.", n + 1));
        line.push(' ');
        match &row.mode {
            RowMode::View { text } => line.push_str(&s.item_text.render(text)),
            RowMode::Edit { field } => match self.drafts.get(&row.id) {
                Some(draft) => line.push_str(&draft.view()),
                None => line.push_str(&format!("{}{}", self.config.prompt, field)),
            },
        }
        for role in row.controls {
            line.push(' ');
            line.push_str(&self.paint_control(Focus::Control(row.id, role), role));
        }
        line
    }

    fn paint_control(&self, target: Focus, role: ControlRole) -> String {
        let label = format!("[ {} ]", role.label());
        if self.focus == target {
            self.styles.focused_control.render(&label)
        } else {
            self.styles.control.render(&label)
        }
    }

    fn help_view(&self) -> String {
        use crate::key::KeyMap as _;

        let s = &self.styles;
        let separator = s.help_separator.render(&format!(" {} ", BULLET));
        self.keys
            .short_help()
            .into_iter()
            .filter(|b| b.enabled())
            .map(|b| {
                format!(
                    "{} {}",
                    s.help_key.render(&b.help().key),
                    s.help_desc.render(&b.help().desc)
                )
            })
            .collect::<Vec<_>>()
            .join(&separator)
    }
}

fn field(config: &Config) -> TextInput {
    let mut input = textinput::new();
    input.prompt = config.prompt.clone();
    input.set_char_limit(config.char_limit);
    input
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let app = App::with_config(Config::from_env());
        info!("app started");
        (app, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        App::update(self, msg)
    }

    fn view(&self) -> String {
        App::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        let mut t: u64 = 0;
        App::with_store(
            Config::default(),
            Store::with_id_source(move || {
                t += 1;
                t
            }),
        )
    }

    fn send(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Option<Cmd> {
        app.update(Box::new(KeyMsg {
            key: code,
            modifiers,
        }) as Msg)
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Cmd> {
        send(app, code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add(app: &mut App, text: &str) {
        app.set_focus(Focus::NewItem);
        type_str(app, text);
        press(app, KeyCode::Enter);
    }

    fn texts(app: &App) -> Vec<String> {
        app.controller()
            .items()
            .iter()
            .map(|i| i.text().to_string())
            .collect()
    }

    fn plain(app: &App) -> String {
        strip_ansi_escapes::strip_str(app.view())
    }

    #[test]
    fn test_add_trims_and_clears_the_field() {
        let mut app = app();
        type_str(&mut app, "  Buy milk  ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(texts(&app), ["Buy milk"]);
        assert!(!app.controller().items()[0].is_editing());
        assert_eq!(app.new_item_value(), "");
        assert_eq!(app.focus(), Focus::NewItem);
    }

    #[test]
    fn test_blank_add_is_ignored() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.controller().items().is_empty());
    }

    #[test]
    fn test_add_button_submits_the_field() {
        let mut app = app();
        type_str(&mut app, "Tea");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::AddButton);
        press(&mut app, KeyCode::Enter);
        assert_eq!(texts(&app), ["Tea"]);
        assert_eq!(app.focus(), Focus::NewItem);
    }

    #[test]
    fn test_focus_order_follows_rows() {
        let mut app = app();
        add(&mut app, "Milk");
        add(&mut app, "Eggs");
        let milk = app.controller().items()[0].id();
        let eggs = app.controller().items()[1].id();

        assert_eq!(
            app.focus_order(),
            [
                Focus::NewItem,
                Focus::AddButton,
                Focus::Control(milk, ControlRole::Edit),
                Focus::Control(milk, ControlRole::Delete),
                Focus::Control(eggs, ControlRole::Edit),
                Focus::Control(eggs, ControlRole::Delete),
            ]
        );

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus(), Focus::Control(eggs, ControlRole::Delete));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::NewItem);
    }

    #[test]
    fn test_keyboard_end_to_end_scenario() {
        let mut app = app();
        add(&mut app, "Milk");
        add(&mut app, "Eggs");
        let milk = app.controller().items()[0].id();

        // Tab to Milk's Edit button and open the editor.
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::Control(milk, ControlRole::Edit));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus(), Focus::Field(milk));
        assert_eq!(app.draft_value(milk).as_deref(), Some("Milk"));

        press(&mut app, KeyCode::Home);
        type_str(&mut app, "Oat ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(texts(&app), ["Oat Milk", "Eggs"]);
        assert_eq!(app.focus(), Focus::Control(milk, ControlRole::Edit));
        assert_eq!(app.draft_value(milk), None);

        // Milk Edit -> Milk Delete -> Eggs Edit -> Eggs Delete.
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        assert_eq!(texts(&app), ["Oat Milk"]);
        assert!(!app.controller().items()[0].is_editing());
        assert_eq!(app.focus(), Focus::NewItem);
    }

    #[test]
    fn test_escape_cancels_and_discards_the_draft() {
        let mut app = app();
        add(&mut app, "Milk");
        let milk = app.controller().items()[0].id();

        app.dispatch(Intent::Edit(milk));
        type_str(&mut app, " and honey");
        assert_eq!(app.draft_value(milk).as_deref(), Some("Milk and honey"));
        press(&mut app, KeyCode::Esc);

        let item = &app.controller().items()[0];
        assert_eq!(item.text(), "Milk");
        assert!(!item.is_editing());
        assert_eq!(app.draft_value(milk), None);
        assert_eq!(app.focus(), Focus::Control(milk, ControlRole::Edit));

        app.dispatch(Intent::Edit(milk));
        assert_eq!(app.draft_value(milk).as_deref(), Some("Milk"));
    }

    #[test]
    fn test_cancel_button() {
        let mut app = app();
        add(&mut app, "Milk");
        let milk = app.controller().items()[0].id();
        app.dispatch(Intent::Edit(milk));
        type_str(&mut app, "!!!");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::Control(milk, ControlRole::Cancel));
        press(&mut app, KeyCode::Enter);
        assert_eq!(texts(&app), ["Milk"]);
    }

    #[test]
    fn test_saving_a_blank_draft_keeps_the_text() {
        let mut app = app();
        add(&mut app, "Milk");
        let milk = app.controller().items()[0].id();
        app.dispatch(Intent::Edit(milk));

        send(&mut app, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(app.draft_value(milk).as_deref(), Some(""));
        press(&mut app, KeyCode::Enter);

        assert_eq!(texts(&app), ["Milk"]);
        assert!(!app.controller().items()[0].is_editing());
    }

    #[test]
    fn test_several_rows_can_be_edited_at_once() {
        let mut app = app();
        add(&mut app, "a");
        add(&mut app, "b");
        let a = app.controller().items()[0].id();
        let b = app.controller().items()[1].id();

        app.dispatch(Intent::Edit(a));
        app.dispatch(Intent::Edit(b));
        assert!(app.draft_value(a).is_some());
        assert!(app.draft_value(b).is_some());
        assert_eq!(app.focus(), Focus::Field(b));
    }

    #[test]
    fn test_update_intent_opens_a_draft() {
        use crate::store::ItemPatch;

        let mut app = app();
        add(&mut app, "a");
        let a = app.controller().items()[0].id();
        app.dispatch(Intent::Update(a, ItemPatch::new().editing(true)));
        assert_eq!(app.draft_value(a).as_deref(), Some("a"));
    }

    #[test]
    fn test_text_update_reaches_an_open_draft() {
        use crate::store::ItemPatch;

        let mut app = app();
        add(&mut app, "Milk");
        let milk = app.controller().items()[0].id();
        app.dispatch(Intent::Edit(milk));
        app.dispatch(Intent::Update(milk, ItemPatch::new().text("Oat Milk")));
        assert_eq!(app.draft_value(milk).as_deref(), Some("Oat Milk"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(texts(&app), ["Oat Milk"]);
    }

    #[test]
    fn test_arrows_stay_inside_text_fields() {
        let mut app = app();
        add(&mut app, "Milk");
        let milk = app.controller().items()[0].id();

        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus(), Focus::NewItem);

        app.dispatch(Intent::Edit(milk));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus(), Focus::Field(milk));

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::Control(milk, ControlRole::Save));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus(), Focus::Control(milk, ControlRole::Cancel));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus(), Focus::Control(milk, ControlRole::Save));
    }

    #[test]
    fn test_escape_on_new_item_quits() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Esc).is_some());
        assert!(send(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL).is_some());
    }

    #[test]
    fn test_escape_on_a_view_row_returns_to_the_new_item_field() {
        let mut app = app();
        add(&mut app, "a");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert!(press(&mut app, KeyCode::Esc).is_none());
        assert_eq!(app.focus(), Focus::NewItem);
    }

    #[test]
    fn test_view_paints_rows() {
        let mut app = app();
        assert!(plain(&app).contains("Nothing to do."));

        add(&mut app, "Milk");
        add(&mut app, "Eggs");
        let eggs = app.controller().items()[1].id();
        app.dispatch(Intent::Edit(eggs));

        let out = plain(&app);
        assert!(out.starts_with("To-do\n"));
        assert!(out.contains("[ Add ]"));
        assert!(out.contains("1. Milk [ Edit ] [ Delete ]"));
        assert!(out.contains("2. > Eggs"));
        assert!(out.contains("[ Save ] [ Cancel ]"));
        assert!(out.contains("ctrl+c quit"));
        assert!(!out.contains("Nothing to do."));
    }

    #[test]
    fn test_view_is_idempotent() {
        let mut app = app();
        add(&mut app, "Milk");
        assert_eq!(app.view(), app.view());
    }

    #[test]
    fn test_char_limit_applies_to_fields() {
        let mut app = App::with_config(Config::default().with_char_limit(3));
        type_str(&mut app, "abcdef");
        assert_eq!(app.new_item_value(), "abc");
    }
}
