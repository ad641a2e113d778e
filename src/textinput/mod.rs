//! Single-line text field.
//!
//! Used for the new-item entry and for every item that is being edited.
//! The field owns its value and cursor; the application decides what
//! `enter` and `esc` mean, so neither is bound here.
//!
//! ```rust
//! use bubbletea_todo::textinput::new;
//!
//! let mut input = new();
//! input.set_placeholder("What needs doing?");
//! let _ = input.focus();
//! input.set_value("Buy milk");
//! assert_eq!(input.value(), "Buy milk");
//! ```

pub mod keymap;
pub mod model;


pub use keymap::{default_key_map, KeyMap};
pub use model::{new, Model};
