//! Plain-text rendering for limited terminals

use crate::info::TerminalInfo;

const ESC: char = '\x1b';

/// Final bytes that end an escape: set graphics, erase, cursor position.
///
/// Other CSI finals (cursor movement and friends) are not recognized, so
/// the text that follows them is swallowed up to the next terminator.
const TERMINATORS: [char; 3] = ['m', 'J', 'H'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InEscape,
}

/// Remove escape sequences from `text`.
///
/// An escape still open at the end of the input is dropped whole, so no
/// partial control sequence ever reaches the output.
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = ScanState::Normal;

    for c in text.chars() {
        state = match (state, c) {
            (_, ESC) => ScanState::InEscape,
            (ScanState::InEscape, c) if TERMINATORS.contains(&c) => ScanState::Normal,
            (ScanState::InEscape, _) => ScanState::InEscape,
            (ScanState::Normal, c) => {
                out.push(c);
                ScanState::Normal
            }
        };
    }

    out
}

/// Formatting allowed on System V terminals. Currently unrestricted.
fn basic_formatting(text: &str) -> String {
    text.to_string()
}

/// Prepare `text` for output on the terminal described by `info`.
pub fn format_for_terminal(info: &TerminalInfo, text: &str) -> String {
    if info.is_minimal {
        strip_formatting(text)
    } else if info.is_system_v {
        basic_formatting(text)
    } else {
        text.to_string()
    }
}

impl TerminalInfo {
    pub fn format(&self, text: &str) -> String {
        format_for_terminal(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_codes() {
        assert_eq!(strip_formatting("\x1b[31mRed\x1b[0m"), "Red");
    }

    #[test]
    fn strips_erase_and_cursor_home() {
        assert_eq!(strip_formatting("\x1b[2J\x1b[1;1Htop"), "top");
    }

    #[test]
    fn unterminated_escape_is_dropped() {
        assert_eq!(strip_formatting("ok\x1b[38;5"), "ok");
        assert_eq!(strip_formatting("\x1b"), "");
    }

    #[test]
    fn unknown_final_byte_swallows_until_next_terminator() {
        assert_eq!(strip_formatting("a\x1b[2Cb\x1b[0mc"), "ac");
    }

    #[test]
    fn escape_inside_escape_restarts_scan() {
        assert_eq!(strip_formatting("\x1b[3\x1b[1mx"), "x");
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(strip_formatting("\x1b[1mcafé ✓\x1b[0m"), "café ✓");
    }
}
