//! Capability classification from the terminal type

use serde::Serialize;
use tracing::debug;

/// Terminal families known to handle color and basic text attributes.
const ATTRIBUTE_FAMILIES: &[&str] = &["xterm", "screen", "tmux", "rxvt"];

/// Families that additionally handle UTF-8, mouse reporting and the
/// alternate screen.
const EXTENDED_FAMILIES: &[&str] = &["xterm", "screen", "tmux"];

/// What a terminal can render, as reported by its type identifier.
///
/// Every flag starts off false; an unrecognized terminal gets nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub color: bool,
    pub mouse: bool,
    pub alt_screen: bool,
    pub utf8: bool,
    pub bold: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl Capabilities {
    /// Classify a `TERM` value, with `colorterm` taken from `COLORTERM`.
    ///
    /// Rules only ever add capabilities: a known family enables attributes,
    /// the extended families add UTF-8, mouse and alt-screen, and any
    /// non-empty `COLORTERM` forces color on.
    pub fn classify(term_type: &str, colorterm: &str) -> Self {
        let term = term_type.to_lowercase();
        let mut caps = Capabilities::default();

        if contains_any(&term, ATTRIBUTE_FAMILIES) || term == "linux" {
            caps.color = true;
            caps.bold = true;
            caps.underline = true;
            caps.reverse = true;

            if contains_any(&term, EXTENDED_FAMILIES) {
                caps.utf8 = true;
                caps.mouse = true;
                caps.alt_screen = true;
            }
        }

        if !colorterm.is_empty() {
            caps.color = true;
        }

        debug!(
            "Terminal capabilities - Color: {}, Mouse: {}, AltScreen: {}, UTF8: {}",
            caps.color, caps.mouse, caps.alt_screen, caps.utf8
        );
        caps
    }
}

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
