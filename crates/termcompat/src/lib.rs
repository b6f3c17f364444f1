//! Terminal capability detection for termcompat
//!
//! Works out what the controlling terminal supports (size, color, mouse,
//! alternate screen, UTF-8) and which compatibility regime it falls into,
//! then derives the degraded feature set a full-screen renderer must honor.
//! Detection never fails: every probe that cannot answer simply contributes
//! nothing, and the size falls back to 80x24.

pub mod capability;
pub mod compat;
pub mod host;
pub mod info;
pub mod negotiate;
pub mod sanitize;
pub mod settings;
pub mod size;

pub use capability::Capabilities;
pub use compat::Compatibility;
pub use host::{Host, SystemHost};
pub use info::{detect, detect_with, DetectOptions, TerminalInfo};
pub use negotiate::{negotiate, safe_size, RenderOption};
pub use sanitize::{format_for_terminal, strip_formatting};
pub use settings::{RenderSettings, TerminalSettings};
pub use size::{Size, SizeProbe, SizeStrategy};

use thiserror::Error;

/// Reasons a single detection probe produced no data.
///
/// These never escape [`detect`]; the probe cascade logs them and moves on.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("window size ioctl failed: {0}")]
    Ioctl(std::io::Error),

    #[error("window size query is not supported on this platform")]
    Unsupported,

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` did not finish within {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u128 },

    #[error("`{program}` exited with {status}")]
    ExitStatus { program: String, status: String },

    #[error("could not parse size from {0:?}")]
    Parse(String),

    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("reported size {cols}x{rows} has a zero dimension")]
    ZeroSize { cols: u16, rows: u16 },
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid terminal size {width}x{height}")]
    InvalidSize { width: u16, height: u16 },
}
