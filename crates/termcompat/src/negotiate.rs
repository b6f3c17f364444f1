//! Renderer option negotiation
//!
//! Turns raw capabilities plus the compatibility regime into permission to
//! use a feature. Options are typed internally and only become the
//! renderer's string tokens at the boundary.

use crate::info::TerminalInfo;
use crate::size::Size;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const MIN_SAFE_WIDTH: u16 = 40;
pub const MAX_SAFE_WIDTH: u16 = 200;
pub const MIN_SAFE_HEIGHT: u16 = 10;
pub const MAX_SAFE_HEIGHT: u16 = 60;

/// A feature toggle the renderer must apply at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderOption {
    DisableMouse,
    DisableAltScreen,
    SimpleRender,
}

impl RenderOption {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderOption::DisableMouse => "no-mouse",
            RenderOption::DisableAltScreen => "no-altscreen",
            RenderOption::SimpleRender => "simple-render",
        }
    }
}

impl fmt::Display for RenderOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no-mouse" => Ok(RenderOption::DisableMouse),
            "no-altscreen" => Ok(RenderOption::DisableAltScreen),
            "simple-render" => Ok(RenderOption::SimpleRender),
            _ => Err(format!("unknown render option: {s}")),
        }
    }
}

/// Options for `info`, in fixed order: mouse, alt-screen, simple render.
///
/// Empty only for a capable terminal that is neither minimal nor System V.
pub fn negotiate(info: &TerminalInfo) -> Vec<RenderOption> {
    let legacy = info.is_minimal || info.is_system_v;
    let mut options = Vec::with_capacity(3);

    if legacy || !info.mouse_support {
        options.push(RenderOption::DisableMouse);
    }
    if legacy || !info.alt_screen_support {
        options.push(RenderOption::DisableAltScreen);
    }
    if info.is_minimal {
        options.push(RenderOption::SimpleRender);
    }

    debug!("Compatible options: {:?}", options);
    options
}

/// Clamp the detected size into the range the renderer can lay out.
pub fn safe_size(info: &TerminalInfo) -> Size {
    Size::new(
        info.width.clamp(MIN_SAFE_WIDTH, MAX_SAFE_WIDTH),
        info.height.clamp(MIN_SAFE_HEIGHT, MAX_SAFE_HEIGHT),
    )
}

impl TerminalInfo {
    pub fn negotiate(&self) -> Vec<RenderOption> {
        negotiate(self)
    }

    /// Negotiated options as the renderer's string tokens.
    pub fn negotiate_tokens(&self) -> Vec<&'static str> {
        negotiate(self).into_iter().map(RenderOption::as_str).collect()
    }

    pub fn safe_size(&self) -> Size {
        safe_size(self)
    }
}
