//! Detected terminal snapshot and the detection entry points

use crate::capability::Capabilities;
use crate::compat::Compatibility;
use crate::host::{Host, SystemHost};
use crate::size::{Size, SizeProbe, SizeStrategy, DEFAULT_COMMAND_TIMEOUT};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Exit code reported for a minimal terminal.
pub const EXIT_MINIMAL: i32 = 2;
/// Exit code reported for a System V terminal that is not minimal.
pub const EXIT_SYSTEM_V: i32 = 3;

/// Knobs for a detection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectOptions {
    /// Size strategies, tried in this order.
    pub strategies: Vec<SizeStrategy>,
    /// Upper bound on each `tput`/`stty` invocation.
    pub command_timeout: Duration,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            strategies: SizeStrategy::ALL.to_vec(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

impl DetectOptions {
    /// Drop the strategies that spawn helper processes.
    pub fn without_commands(mut self) -> Self {
        self.strategies.retain(|s| !s.runs_command());
        self
    }
}

/// Everything detection learned about the terminal.
///
/// Built once by [`detect`] and read-only afterwards. The raw capability
/// flags are kept as detected; what the renderer may actually use comes
/// from [`TerminalInfo::negotiate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalInfo {
    pub width: u16,
    pub height: u16,
    pub term_type: String,
    pub term_program: String,
    pub is_minimal: bool,
    #[serde(rename = "is_systemv")]
    pub is_system_v: bool,
    pub color_support: bool,
    pub mouse_support: bool,
    pub alt_screen_support: bool,
    pub supports_utf8: bool,
    pub supports_bold: bool,
    pub supports_underline: bool,
    pub supports_reverse: bool,
}

impl Default for TerminalInfo {
    fn default() -> Self {
        Self::from_parts(
            Size::FALLBACK,
            String::new(),
            String::new(),
            Capabilities::default(),
            Compatibility::default(),
        )
    }
}

impl TerminalInfo {
    pub fn from_parts(
        size: Size,
        term_type: String,
        term_program: String,
        caps: Capabilities,
        compat: Compatibility,
    ) -> Self {
        Self {
            width: size.cols,
            height: size.rows,
            term_type,
            term_program,
            is_minimal: compat.minimal,
            is_system_v: compat.system_v,
            color_support: caps.color,
            mouse_support: caps.mouse,
            alt_screen_support: caps.alt_screen,
            supports_utf8: caps.utf8,
            supports_bold: caps.bold,
            supports_underline: caps.underline,
            supports_reverse: caps.reverse,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            color: self.color_support,
            mouse: self.mouse_support,
            alt_screen: self.alt_screen_support,
            utf8: self.supports_utf8,
            bold: self.supports_bold,
            underline: self.supports_underline,
            reverse: self.supports_reverse,
        }
    }

    pub fn compatibility(&self) -> Compatibility {
        Compatibility {
            minimal: self.is_minimal,
            system_v: self.is_system_v,
        }
    }

    /// Exit code for the diagnostic report. Minimal wins over System V.
    pub fn exit_code(&self) -> i32 {
        if self.is_minimal {
            EXIT_MINIMAL
        } else if self.is_system_v {
            EXIT_SYSTEM_V
        } else {
            0
        }
    }
}

/// Detect the controlling terminal of this process.
pub fn detect() -> TerminalInfo {
    detect_with(&SystemHost::new(), &DetectOptions::default())
}

/// Detect through an explicit host. Never fails.
pub fn detect_with(host: &dyn Host, options: &DetectOptions) -> TerminalInfo {
    debug!("Starting terminal detection");

    let term_type = host.var_or_empty("TERM");
    let term_program = host.var_or_empty("TERM_PROGRAM");
    debug!("TERM={}, TERM_PROGRAM={}", term_type, term_program);

    let size = SizeProbe::new(host)
        .with_strategies(&options.strategies)
        .with_command_timeout(options.command_timeout)
        .probe();
    debug!("Terminal size: {}", size);

    let caps = Capabilities::classify(&term_type, &host.var_or_empty("COLORTERM"));
    let compat = Compatibility::classify(&term_type, host, size);

    let info = TerminalInfo::from_parts(size, term_type, term_program, caps, compat);
    info!(
        "Terminal detected - Type: {}, Size: {}, Minimal: {}, SystemV: {}",
        info.term_type,
        size,
        info.is_minimal,
        info.is_system_v
    );
    info
}

impl fmt::Display for TerminalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Terminal Information:")?;
        writeln!(f, "  Type: {}", self.term_type)?;
        writeln!(f, "  Program: {}", self.term_program)?;
        writeln!(f, "  Size: {}x{}", self.width, self.height)?;
        writeln!(f, "  Color Support: {}", self.color_support)?;
        writeln!(f, "  Mouse Support: {}", self.mouse_support)?;
        writeln!(f, "  Alt Screen: {}", self.alt_screen_support)?;
        writeln!(f, "  UTF-8: {}", self.supports_utf8)?;
        writeln!(f, "  Bold: {}", self.supports_bold)?;
        writeln!(f, "  Underline: {}", self.supports_underline)?;
        writeln!(f, "  Reverse: {}", self.supports_reverse)?;
        writeln!(f, "  Minimal: {}", self.is_minimal)?;
        write!(f, "  System V: {}", self.is_system_v)
    }
}
