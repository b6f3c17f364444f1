//! Side-effect boundary for detection
//!
//! Everything detection reads from the outside world (environment, kernel,
//! helper processes) goes through [`Host`], so the probes and classifiers
//! can be driven by a scripted fake in tests.

use crate::size::Size;
use crate::ProbeError;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Poll interval while waiting on a helper process.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Source of environment values, window sizes and helper output.
pub trait Host {
    /// Look up an environment variable. Unset and non-UTF-8 values are `None`.
    fn var(&self, key: &str) -> Option<String>;

    /// Query the kernel for the window size of standard input.
    fn window_size(&self) -> Result<Size, ProbeError>;

    /// Run `program` with `args` and return its stdout, giving up after `timeout`.
    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<String, ProbeError>;

    /// Environment value with absence folded into the empty string.
    fn var_or_empty(&self, key: &str) -> String {
        self.var(key).unwrap_or_default()
    }
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }
}

impl Host for SystemHost {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    #[cfg(unix)]
    fn window_size(&self) -> Result<Size, ProbeError> {
        let mut winsize = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };

        // SAFETY: TIOCGWINSZ only writes into the winsize struct we own.
        let ret = unsafe { libc::ioctl(libc::STDIN_FILENO, libc::TIOCGWINSZ, &mut winsize as *mut libc::winsize) };
        if ret < 0 {
            return Err(ProbeError::Ioctl(std::io::Error::last_os_error()));
        }

        Ok(Size::new(winsize.ws_col, winsize.ws_row))
    }

    #[cfg(not(unix))]
    fn window_size(&self) -> Result<Size, ProbeError> {
        Err(ProbeError::Unsupported)
    }

    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<String, ProbeError> {
        run_with_timeout(program, args, timeout)
    }
}

/// Spawn a helper and wait for it with a deadline.
///
/// Stdin is inherited because `tput` and `stty` inspect the controlling
/// terminal through it. A helper still running at the deadline is killed
/// and reaped.
fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> Result<String, ProbeError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ProbeError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    return Err(ProbeError::ExitStatus {
                        program: program.to_string(),
                        status: status.to_string(),
                    });
                }
                let output = child.wait_with_output().map_err(|source| ProbeError::Spawn {
                    program: program.to_string(),
                    source,
                })?;
                return String::from_utf8(output.stdout)
                    .map_err(|e| ProbeError::Parse(String::from_utf8_lossy(e.as_bytes()).into_owned()));
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProbeError::Timeout {
                        program: program.to_string(),
                        timeout_ms: timeout.as_millis(),
                    });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProbeError::Spawn {
                    program: program.to_string(),
                    source,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = run_with_timeout(
            "/nonexistent/termcompat-helper",
            &[],
            Duration::from_millis(200),
        )
        .unwrap_err();
        assert!(matches!(err, ProbeError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_of_successful_helper() {
        let out = run_with_timeout("sh", &["-c", "echo 132"], Duration::from_secs(5)).unwrap();
        assert_eq!(out.trim(), "132");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_reported() {
        let err = run_with_timeout("sh", &["-c", "exit 3"], Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, ProbeError::ExitStatus { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn hung_helper_is_abandoned_after_timeout() {
        let start = Instant::now();
        let err = run_with_timeout("sleep", &["5"], Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, ProbeError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }
}
