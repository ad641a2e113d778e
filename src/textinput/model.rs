//! The text field model: value, cursor, editing and rendering.

use super::keymap::{default_key_map, KeyMap};
use crate::key::matches_binding;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

/// A single-line text field.
///
/// The value is kept as a vector of `char`s so the cursor position is a
/// character index rather than a byte offset.
#[derive(Debug, Clone)]
pub struct Model {
    /// Text shown before the value.
    pub prompt: String,
    /// Style for the prompt.
    pub prompt_style: Style,
    /// Style for the value.
    pub text_style: Style,
    /// Text shown while the value is empty.
    pub placeholder: String,
    /// Style for the placeholder.
    pub placeholder_style: Style,
    /// Style for the character under the cursor.
    pub cursor_style: Style,
    /// Minimum display width of the value area; 0 disables padding.
    pub width: usize,
    /// Maximum number of characters accepted; 0 means no limit.
    pub char_limit: usize,
    /// Editing bindings.
    pub key_map: KeyMap,

    value: Vec<char>,
    pos: usize,
    focus: bool,
}

/// Creates an unfocused, empty field with the default prompt `"> "`.
pub fn new() -> Model {
    Model {
        prompt: "> ".to_string(),
        prompt_style: Style::new(),
        text_style: Style::new(),
        placeholder: String::new(),
        placeholder_style: Style::new().foreground(Color::from("240")),
        cursor_style: Style::new().reverse(true),
        width: 0,
        char_limit: 0,
        key_map: default_key_map(),
        value: Vec::new(),
        pos: 0,
        focus: false,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Replaces the value and moves the cursor to its end.
    pub fn set_value(&mut self, s: &str) {
        let mut runes: Vec<char> = s.chars().collect();
        if self.char_limit > 0 && runes.len() > self.char_limit {
            runes.truncate(self.char_limit);
        }
        self.value = runes;
        self.pos = self.value.len();
    }

    /// The current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Cursor position as a character index.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the end of the value.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Moves the cursor to the start.
    pub fn cursor_start(&mut self) {
        self.set_cursor(0);
    }

    /// Moves the cursor to the end.
    pub fn cursor_end(&mut self) {
        self.set_cursor(self.value.len());
    }

    /// Clears the value.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Sets the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    /// Sets the character limit; 0 removes it. An over-long value is truncated.
    pub fn set_char_limit(&mut self, limit: usize) {
        self.char_limit = limit;
        if limit > 0 && self.value.len() > limit {
            self.value.truncate(limit);
            self.set_cursor(self.pos);
        }
    }

    /// Whether the field accepts input.
    pub fn focused(&self) -> bool {
        self.focus
    }

    /// Gives the field focus.
    pub fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    /// Takes focus away.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Handles a message. Only key messages are acted on, and only while focused.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key_msg);
        }
        None
    }

    /// Applies one key press. Returns whether the press was consumed.
    pub fn handle_key(&mut self, key_msg: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }
        self.handle_deletion_keys(key_msg)
            || self.handle_movement_keys(key_msg)
            || self.handle_character_input(key_msg)
    }

    fn handle_deletion_keys(&mut self, key_msg: &KeyMsg) -> bool {
        let km = &self.key_map;
        if matches_binding(key_msg, &km.delete_word_backward) {
            self.delete_word_backward();
        } else if matches_binding(key_msg, &km.delete_character_backward) {
            if self.pos > 0 {
                self.value.remove(self.pos - 1);
                self.pos -= 1;
            }
        } else if matches_binding(key_msg, &km.delete_character_forward) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
            }
        } else if matches_binding(key_msg, &km.delete_after_cursor) {
            self.value.truncate(self.pos);
        } else if matches_binding(key_msg, &km.delete_before_cursor) {
            self.value.drain(..self.pos);
            self.pos = 0;
        } else {
            return false;
        }
        true
    }

    fn handle_movement_keys(&mut self, key_msg: &KeyMsg) -> bool {
        let km = &self.key_map;
        if matches_binding(key_msg, &km.character_backward) {
            self.set_cursor(self.pos.saturating_sub(1));
        } else if matches_binding(key_msg, &km.character_forward) {
            self.set_cursor(self.pos + 1);
        } else if matches_binding(key_msg, &km.line_start) {
            self.cursor_start();
        } else if matches_binding(key_msg, &km.line_end) {
            self.cursor_end();
        } else {
            return false;
        }
        true
    }

    fn handle_character_input(&mut self, key_msg: &KeyMsg) -> bool {
        let KeyCode::Char(ch) = key_msg.key else {
            return false;
        };
        // Shift is folded into the char itself.
        if key_msg.modifiers.contains(KeyModifiers::CONTROL)
            || key_msg.modifiers.contains(KeyModifiers::ALT)
        {
            return false;
        }
        if self.char_limit > 0 && self.value.len() >= self.char_limit {
            return true;
        }
        self.value.insert(self.pos, ch);
        self.pos += 1;
        true
    }

    fn delete_word_backward(&mut self) {
        if self.pos == 0 {
            return;
        }
        let mut start = self.pos;
        while start > 0 && self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !self.value[start - 1].is_whitespace() {
            start -= 1;
        }
        self.value.drain(start..self.pos);
        self.pos = start;
    }

    /// Renders the prompt and value, with a block cursor when focused.
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);
        if self.value.is_empty() && !self.placeholder.is_empty() {
            return format!("{}{}", prompt, self.placeholder_view());
        }

        let mut v = String::new();
        let before: String = self.value[..self.pos].iter().collect();
        if !before.is_empty() {
            v.push_str(&self.text_style.render(&before));
        }

        let mut shown = before.width();
        let rest = if self.focus {
            let under = self.value.get(self.pos).copied().unwrap_or(' ');
            v.push_str(&self.cursor_style.render(&under.to_string()));
            shown += UnicodeWidthStr::width(under.to_string().as_str());
            &self.value[(self.pos + 1).min(self.value.len())..]
        } else {
            &self.value[self.pos..]
        };
        let after: String = rest.iter().collect();
        if !after.is_empty() {
            shown += after.width();
            v.push_str(&self.text_style.render(&after));
        }

        if self.width > shown {
            v.push_str(&" ".repeat(self.width - shown));
        }

        format!("{}{}", prompt, v)
    }

    fn placeholder_view(&self) -> String {
        let mut chars = self.placeholder.chars();
        let mut v = String::new();
        if self.focus {
            if let Some(first) = chars.next() {
                v.push_str(&self.cursor_style.render(&first.to_string()));
            }
        }
        let rest: String = chars.collect();
        if !rest.is_empty() {
            v.push_str(&self.placeholder_style.render(&rest));
        }
        let shown = self.placeholder.width();
        if self.width > shown {
            v.push_str(&" ".repeat(self.width - shown));
        }
        v
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        Model::focus(self)
    }

    fn blur(&mut self) {
        Model::blur(self)
    }

    fn focused(&self) -> bool {
        Model::focused(self)
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new();
        let cmd = model.focus();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Model::update(self, msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}
