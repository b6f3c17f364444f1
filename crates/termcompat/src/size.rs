//! Terminal size probing
//!
//! Tries an ordered list of strategies and keeps the first one that yields
//! a usable size. A strategy that fails is logged and skipped; if none
//! succeed the probe falls back to 80x24.

use crate::host::Host;
use crate::ProbeError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Default per-helper timeout for the `tput` and `stty` strategies.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(1);

/// Terminal dimensions in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// Size used when every strategy fails.
    pub const FALLBACK: Size = Size { cols: 80, rows: 24 };

    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    fn nonzero(self) -> Result<Self, ProbeError> {
        if self.cols == 0 || self.rows == 0 {
            Err(ProbeError::ZeroSize {
                cols: self.cols,
                rows: self.rows,
            })
        } else {
            Ok(self)
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// A single way of finding out the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SizeStrategy {
    /// `TIOCGWINSZ` on standard input
    Ioctl,
    /// `COLUMNS` and `LINES`
    Environment,
    /// `tput cols` and `tput lines`
    Tput,
    /// `stty size`
    Stty,
}

impl SizeStrategy {
    /// Every strategy, in the order they are tried by default.
    pub const ALL: [SizeStrategy; 4] = [
        SizeStrategy::Ioctl,
        SizeStrategy::Environment,
        SizeStrategy::Tput,
        SizeStrategy::Stty,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SizeStrategy::Ioctl => "ioctl",
            SizeStrategy::Environment => "environment",
            SizeStrategy::Tput => "tput",
            SizeStrategy::Stty => "stty",
        }
    }

    /// Whether this strategy spawns a helper process.
    pub fn runs_command(self) -> bool {
        matches!(self, SizeStrategy::Tput | SizeStrategy::Stty)
    }
}

impl fmt::Display for SizeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run `attempt` over `candidates` in order and return the first `Ok`.
///
/// Candidates after the first success are never attempted. Each failure is
/// handed to `on_error` together with the candidate that produced it.
pub fn first_success<C, T, E>(
    candidates: impl IntoIterator<Item = C>,
    mut attempt: impl FnMut(&C) -> Result<T, E>,
    mut on_error: impl FnMut(&C, E),
) -> Option<T> {
    for candidate in candidates {
        match attempt(&candidate) {
            Ok(value) => return Some(value),
            Err(e) => on_error(&candidate, e),
        }
    }
    None
}

/// Ordered size probe over a [`Host`].
pub struct SizeProbe<'a> {
    host: &'a dyn Host,
    strategies: Vec<SizeStrategy>,
    command_timeout: Duration,
}

impl<'a> SizeProbe<'a> {
    /// Probe with every strategy and the default helper timeout.
    pub fn new(host: &'a dyn Host) -> Self {
        Self {
            host,
            strategies: SizeStrategy::ALL.to_vec(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_strategies(mut self, strategies: &[SizeStrategy]) -> Self {
        self.strategies = strategies.to_vec();
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Run the cascade. Always returns a size with both dimensions positive.
    pub fn probe(&self) -> Size {
        let found = first_success(
            self.strategies.iter().copied(),
            |&strategy| self.try_strategy(strategy),
            |strategy, err| debug!("size strategy {} produced nothing: {}", strategy, err),
        );

        match found {
            Some(size) => size,
            None => {
                debug!("Could not detect terminal size, using {}", Size::FALLBACK);
                Size::FALLBACK
            }
        }
    }

    /// Run one strategy on its own.
    pub fn try_strategy(&self, strategy: SizeStrategy) -> Result<Size, ProbeError> {
        let size = match strategy {
            SizeStrategy::Ioctl => self.host.window_size()?.nonzero()?,
            SizeStrategy::Environment => self.from_env()?,
            SizeStrategy::Tput => self.from_tput()?,
            SizeStrategy::Stty => self.from_stty()?,
        };
        debug!("Got terminal size from {}: {}", strategy, size);
        Ok(size)
    }

    fn from_env(&self) -> Result<Size, ProbeError> {
        let cols = self.host.var("COLUMNS").ok_or(ProbeError::MissingVar("COLUMNS"))?;
        let lines = self.host.var("LINES").ok_or(ProbeError::MissingVar("LINES"))?;
        Ok(Size::new(parse_dimension(&cols)?, parse_dimension(&lines)?))
    }

    fn from_tput(&self) -> Result<Size, ProbeError> {
        // Both helpers always run; a failure in either discards the pair.
        let cols = self
            .host
            .run("tput", &["cols"], self.command_timeout)
            .and_then(|out| parse_dimension(&out));
        let lines = self
            .host
            .run("tput", &["lines"], self.command_timeout)
            .and_then(|out| parse_dimension(&out));
        Ok(Size::new(cols?, lines?))
    }

    fn from_stty(&self) -> Result<Size, ProbeError> {
        let out = self.host.run("stty", &["size"], self.command_timeout)?;
        parse_stty_size(&out)
    }
}

/// Parse one positive cell count, saturating at `u16::MAX`.
fn parse_dimension(raw: &str) -> Result<u16, ProbeError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(u16::try_from(n).unwrap_or(u16::MAX)),
        _ => Err(ProbeError::Parse(raw.to_string())),
    }
}

/// `stty size` prints `rows cols`.
fn parse_stty_size(raw: &str) -> Result<Size, ProbeError> {
    let mut fields = raw.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(rows), Some(cols)) => Ok(Size::new(parse_dimension(cols)?, parse_dimension(rows)?)),
        _ => Err(ProbeError::Parse(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dimension_trims_and_rejects_zero() {
        assert_eq!(parse_dimension(" 120\n").unwrap(), 120);
        assert!(parse_dimension("0").is_err());
        assert!(parse_dimension("-5").is_err());
        assert!(parse_dimension("wide").is_err());
        assert!(parse_dimension("").is_err());
    }

    #[test]
    fn parse_dimension_saturates_oversized_counts() {
        assert_eq!(parse_dimension("65535").unwrap(), u16::MAX);
        assert_eq!(parse_dimension("70000").unwrap(), u16::MAX);
        assert_eq!(parse_dimension("99999999999").unwrap(), u16::MAX);
    }

    #[test]
    fn stty_output_is_rows_then_cols() {
        assert_eq!(parse_stty_size("50 132\n").unwrap(), Size::new(132, 50));
        assert_eq!(parse_stty_size("50 132 extra").unwrap(), Size::new(132, 50));
        assert!(parse_stty_size("50").is_err());
        assert!(parse_stty_size("0 132").is_err());
    }

    #[test]
    fn first_success_stops_at_first_ok() {
        let mut attempted = Vec::new();
        let mut failures = Vec::new();
        let found = first_success(
            ["a", "b", "c"],
            |&label| {
                attempted.push(label);
                match label {
                    "a" => Err("nope"),
                    "b" => Ok(7),
                    _ => Ok(9),
                }
            },
            |label, e| failures.push(format!("{label}:{e}")),
        );
        assert_eq!(found, Some(7));
        assert_eq!(attempted, vec!["a", "b"]);
        assert_eq!(failures, vec!["a:nope".to_string()]);
    }

    #[test]
    fn first_success_with_no_candidates_is_none() {
        let found: Option<u32> = first_success(Vec::<u8>::new(), |_| Err(()), |_, _| {});
        assert_eq!(found, None);
    }
}
