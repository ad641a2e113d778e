//! Styles for the to-do app.
//!
//! All styles use adaptive colors so the app stays readable on light and
//! dark terminals.

use lipgloss_extras::prelude::*;

/// Separator between help entries in the footer.
pub const BULLET: &str = "•";

/// Styles for every element the app paints.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The heading line.
    pub title: Style,
    /// Item numbers.
    pub index: Style,
    /// Item text in view mode.
    pub item_text: Style,
    /// A control that does not have focus.
    pub control: Style,
    /// The control that has focus.
    pub focused_control: Style,
    /// Shown when the list is empty.
    pub empty: Style,
    /// Key names in the footer.
    pub help_key: Style,
    /// Key descriptions in the footer.
    pub help_desc: Style,
    /// Separators in the footer.
    pub help_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        };
        Self {
            title: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#ffffff",
                })
                .bold(true),
            index: Style::new().foreground(subdued.clone()),
            item_text: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            control: Style::new().foreground(subdued.clone()),
            focused_control: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#EE6FF8",
                    Dark: "#EE6FF8",
                })
                .bold(true),
            empty: Style::new().foreground(subdued).italic(true),
            help_key: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            help_desc: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            help_separator: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
        }
    }
}
