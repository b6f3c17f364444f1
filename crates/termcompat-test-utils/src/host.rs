use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;
use termcompat::{Host, ProbeError, Size};

/// Scripted outcome of one helper invocation.
#[derive(Debug, Clone)]
enum Scripted {
    Output(String),
    Failed,
    Hung,
}

/// One recorded helper invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperCall {
    pub command: String,
    pub timeout: Duration,
}

/// A [`Host`] with a fixed environment, window size and helper outputs.
///
/// Helpers without a script behave as if the binary is missing. Every
/// `window_size` and `run` call is recorded so tests can check which
/// strategies were consulted.
#[derive(Debug, Default)]
pub struct FakeHost {
    vars: HashMap<String, String>,
    window: Option<Size>,
    helpers: HashMap<String, Scripted>,
    calls: RefCell<Vec<String>>,
    helper_calls: RefCell<Vec<HelperCall>>,
}

impl FakeHost {
    /// Empty environment, no tty, no helpers.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Answer the ioctl with this size (zero dimensions allowed).
    pub fn window(mut self, cols: u16, rows: u16) -> Self {
        self.window = Some(Size::new(cols, rows));
        self
    }

    /// Make `command` (e.g. `"tput cols"`) print `stdout` and succeed.
    pub fn helper(mut self, command: &str, stdout: &str) -> Self {
        self.helpers
            .insert(command.to_string(), Scripted::Output(stdout.to_string()));
        self
    }

    /// Make `command` exit with a failure status.
    pub fn failing_helper(mut self, command: &str) -> Self {
        self.helpers.insert(command.to_string(), Scripted::Failed);
        self
    }

    /// Make `command` run past any timeout.
    pub fn hung_helper(mut self, command: &str) -> Self {
        self.helpers.insert(command.to_string(), Scripted::Hung);
        self
    }

    /// Probes consulted so far, e.g. `["ioctl", "tput cols", "tput lines"]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn helper_calls(&self) -> Vec<HelperCall> {
        self.helper_calls.borrow().clone()
    }
}

impl Host for FakeHost {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn window_size(&self) -> Result<Size, ProbeError> {
        self.calls.borrow_mut().push("ioctl".to_string());
        self.window.ok_or_else(|| {
            ProbeError::Ioctl(std::io::Error::new(
                std::io::ErrorKind::Other,
                "inappropriate ioctl for device",
            ))
        })
    }

    fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<String, ProbeError> {
        let command = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.borrow_mut().push(command.clone());
        self.helper_calls.borrow_mut().push(HelperCall {
            command: command.clone(),
            timeout,
        });

        match self.helpers.get(&command) {
            Some(Scripted::Output(stdout)) => Ok(stdout.clone()),
            Some(Scripted::Failed) => Err(ProbeError::ExitStatus {
                program: program.to_string(),
                status: "exit status: 1".to_string(),
            }),
            Some(Scripted::Hung) => Err(ProbeError::Timeout {
                program: program.to_string(),
                timeout_ms: timeout.as_millis(),
            }),
            None => Err(ProbeError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}
