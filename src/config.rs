//! App configuration.
//!
//! Built with `with_*` methods, or read from the environment with
//! [`Config::from_env`]:
//!
//! | Variable           | Field         | Default               |
//! |--------------------|---------------|-----------------------|
//! | `TODO_PLACEHOLDER` | `placeholder` | `"What needs doing?"` |
//! | `TODO_CHAR_LIMIT`  | `char_limit`  | `0` (unlimited)       |
//! | `TODO_ALT_SCREEN`  | `alt_screen`  | `true`                |
//! | `TODO_LOG_FILE`    | `log_file`    | unset (no logging)    |
//! | `TODO_LOG`         | `log_filter`  | `"info"`              |

use std::path::PathBuf;
use tracing::warn;

/// Settings for the app and its binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Heading above the list.
    pub title: String,
    /// Placeholder of the new-item field.
    pub placeholder: String,
    /// Prompt of every text field.
    pub prompt: String,
    /// Maximum item length in characters; 0 means no limit.
    pub char_limit: usize,
    /// Whether to run in the alternate screen.
    pub alt_screen: bool,
    /// Where to write logs. `None` disables logging.
    pub log_file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "To-do".to_string(),
            placeholder: "What needs doing?".to_string(),
            prompt: "> ".to_string(),
            char_limit: 0,
            alt_screen: true,
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// The defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `TODO_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `TODO_*`
    /// variable. Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(placeholder) = lookup("TODO_PLACEHOLDER") {
            config.placeholder = placeholder;
        }
        if let Some(raw) = lookup("TODO_CHAR_LIMIT") {
            match raw.trim().parse() {
                Ok(limit) => config.char_limit = limit,
                Err(err) => warn!(value = %raw, %err, "ignoring TODO_CHAR_LIMIT"),
            }
        }
        if let Some(raw) = lookup("TODO_ALT_SCREEN") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "no" | "off" => config.alt_screen = false,
                "1" | "true" | "yes" | "on" => config.alt_screen = true,
                _ => warn!(value = %raw, "ignoring TODO_ALT_SCREEN"),
            }
        }
        if let Some(path) = lookup("TODO_LOG_FILE").filter(|p| !p.is_empty()) {
            config.log_file = Some(PathBuf::from(path));
        }
        if let Some(filter) = lookup("TODO_LOG") {
            config.log_filter = filter;
        }
        config
    }

    /// Sets the heading.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the new-item placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the field prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets the character limit.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    /// Enables or disables the alternate screen.
    pub fn with_alt_screen(mut self, alt_screen: bool) -> Self {
        self.alt_screen = alt_screen;
        self
    }

    /// Sets the log file.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Sets the log filter.
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}
