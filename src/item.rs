//! Item records and identifier generation.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Opaque item identifier.
///
/// Identifiers come from the millisecond clock, so they read as creation
/// timestamps, but the generator guarantees they strictly increase even when
/// two items are created within the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the to-do list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub(crate) id: ItemId,
    pub(crate) text: String,
    pub(crate) editing: bool,
}

impl Item {
    pub(crate) fn new(id: ItemId, text: String) -> Self {
        Self {
            id,
            text,
            editing: false,
        }
    }

    /// The identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The stored text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the item is in edit mode.
    pub fn is_editing(&self) -> bool {
        self.editing
    }
}

/// A millisecond clock used to derive identifiers.
pub trait IdSource: Send {
    /// Milliseconds since some fixed origin.
    fn now_millis(&mut self) -> u64;
}

/// The wall clock, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl IdSource for SystemClock {
    fn now_millis(&mut self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl<F> IdSource for F
where
    F: FnMut() -> u64 + Send,
{
    fn now_millis(&mut self) -> u64 {
        self()
    }
}

/// Hands out strictly increasing identifiers from an [`IdSource`].
pub struct IdGenerator {
    source: Box<dyn IdSource>,
    last: Option<u64>,
}

impl IdGenerator {
    /// A generator reading the given clock.
    pub fn new(source: impl IdSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            last: None,
        }
    }

    /// The next identifier. Falls back to `last + 1` when the clock repeats
    /// or runs backwards. Identifiers stop increasing at `u64::MAX`.
    pub fn next_id(&mut self) -> ItemId {
        let now = self.source.now_millis();
        let raw = match self.last {
            Some(last) if now <= last => last.saturating_add(1),
            _ => now,
        };
        self.last = Some(raw);
        ItemId(raw)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}
