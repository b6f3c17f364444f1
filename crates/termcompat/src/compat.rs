//! Compatibility regime classification
//!
//! Two independent flags: *minimal* for terminals that should get plain,
//! inline output, and *System V* for old fixed-function terminal types.
//! Neither implies the other.

use crate::capability::contains_any;
use crate::host::Host;
use crate::size::Size;
use serde::Serialize;
use tracing::debug;

/// Terminal types treated as minimal on an exact match.
const MINIMAL_TERMINALS: &[&str] = &[
    "dumb", "unknown", "", "vt52", "vt100", "vt102", "ansi", "cons25",
];

/// Substrings of terminal types that need System V compatibility.
const SYSTEM_V_TERMINALS: &[&str] = &[
    "vt52", "vt100", "vt102", "vt220", "ansi", "att", "sun", "cons25",
];

/// Environment variables whose presence marks an automated run.
const AUTOMATION_VARS: &[&str] = &["CI", "BUILD"];

pub const MIN_INTERACTIVE_WIDTH: u16 = 40;
pub const MIN_INTERACTIVE_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Compatibility {
    pub minimal: bool,
    pub system_v: bool,
}

impl Compatibility {
    /// Classify a terminal from its type, the host environment and its size.
    pub fn classify(term_type: &str, host: &dyn Host, size: Size) -> Self {
        let compat = Self {
            minimal: is_minimal(term_type, host, size),
            system_v: is_system_v(term_type, host),
        };
        debug!(
            "Minimal terminal detection: {}, System V compatibility: {}",
            compat.minimal, compat.system_v
        );
        compat
    }
}

fn is_minimal(term_type: &str, host: &dyn Host, size: Size) -> bool {
    let term = term_type.to_lowercase();
    if MINIMAL_TERMINALS.contains(&term.as_str()) {
        return true;
    }

    let raw_term = host.var_or_empty("TERM");
    if raw_term.is_empty() || raw_term == "dumb" {
        return true;
    }

    if AUTOMATION_VARS
        .iter()
        .any(|key| !host.var_or_empty(key).is_empty())
    {
        return true;
    }

    size.cols < MIN_INTERACTIVE_WIDTH || size.rows < MIN_INTERACTIVE_HEIGHT
}

fn is_system_v(term_type: &str, host: &dyn Host) -> bool {
    if !host.var_or_empty("SYSV").is_empty() {
        return true;
    }
    contains_any(&term_type.to_lowercase(), SYSTEM_V_TERMINALS)
}
