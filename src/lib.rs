#![warn(missing_docs)]

//! # bubbletea-todo
//!
//! A to-do list for the terminal, built on
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) around a
//! state-first render loop:
//!
//! ```text
//! key press -> intent -> store mutation -> full re-render -> paint
//! ```
//!
//! The [`Store`](store::Store) is the only place list state lives. The
//! [`render`](render::render) function turns its items into a
//! [`ListView`](render::ListView) value and never mutates anything. The
//! [`DispatchTable`](intent::DispatchTable) maps each kind of
//! [`Intent`](intent::Intent) to one store operation, and the
//! [`Controller`](controller::Controller) runs dispatch and render back to
//! back for every intent. [`App`] is the bubbletea model that turns key
//! presses into intents and paints the result.
//!
//! ## Using the controller directly
//!
//! ```rust
//! use bubbletea_todo::prelude::*;
//!
//! let mut ctl = Controller::new();
//! ctl.handle(Intent::Add("Milk".into()));
//! ctl.handle(Intent::Add("Eggs".into()));
//!
//! let milk = ctl.items()[0].id();
//! let eggs = ctl.items()[1].id();
//! ctl.handle(Intent::Edit(milk));
//! ctl.handle(Intent::Save(milk, "Oat Milk".into()));
//! ctl.handle(Intent::Delete(eggs));
//!
//! assert_eq!(ctl.view().to_plain(), "1. Oat Milk [ Edit ] [ Delete ]\n");
//! ```
//!
//! ## Running the app
//!
//! ```rust,ignore
//! use bubbletea_rs::Program;
//! use bubbletea_todo::App;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let program = Program::<App>::builder().alt_screen(true).build()?;
//! program.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod controller;
pub mod intent;
pub mod item;
pub mod key;
pub mod logging;
pub mod render;
pub mod store;
pub mod style;
pub mod textinput;

use bubbletea_rs::Cmd;

/// Focus management shared by interactive widgets.
///
/// ```rust
/// use bubbletea_todo::prelude::*;
///
/// fn cycle<T: Component>(component: &mut T) {
///     let _ = component.focus();
///     assert!(component.focused());
///     component.blur();
///     assert!(!component.focused());
/// }
///
/// let mut input = textinput_new();
/// cycle(&mut input);
/// ```
pub trait Component {
    /// Gives the component focus. May return a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes focus away.
    fn blur(&mut self);

    /// Whether the component has focus.
    fn focused(&self) -> bool;
}

pub use app::{App, AppKeyMap, Focus};
pub use config::Config;
pub use controller::Controller;
pub use intent::{classify, DispatchTable, Intent, IntentKind};
pub use item::{IdSource, Item, ItemId, SystemClock};
pub use key::{
    matches, matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding,
    Help as KeyHelp, KeyMap, KeyPress,
};
pub use render::{render, ControlRole, ListView, Row, RowMode};
pub use store::{ItemActions, ItemPatch, Store};
pub use textinput::{
    default_key_map as textinput_default_key_map, new as textinput_new,
    KeyMap as TextInputKeyMap, Model as TextInput,
};

/// The commonly used types in one import.
pub mod prelude {
    pub use crate::app::{App, AppKeyMap, Focus};
    pub use crate::config::Config;
    pub use crate::controller::Controller;
    pub use crate::intent::{classify, DispatchTable, Intent, IntentKind};
    pub use crate::item::{Item, ItemId};
    pub use crate::key::{new_binding, with_help, with_keys_str, Binding, KeyMap};
    pub use crate::render::{render, ControlRole, ListView, RowMode};
    pub use crate::store::{ItemActions, ItemPatch, Store};
    pub use crate::textinput::{new as textinput_new, Model as TextInput};
    pub use crate::Component;
}
