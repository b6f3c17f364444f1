//! Applying user terminal settings to a detected terminal
//!
//! Settings can force a compatibility regime or switch mouse and alternate
//! screen off, but never turn those two on once negotiation disabled them.
//! `color_enabled` may add color to a terminal that did not advertise it,
//! except in minimal mode.

use crate::info::TerminalInfo;
use crate::negotiate::{negotiate, safe_size, RenderOption};
use crate::SettingsError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The `terminal` block of the application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    pub width: u16,
    pub height: u16,
    pub color_enabled: bool,
    pub force_minimal: bool,
    #[serde(rename = "force_systemv")]
    pub force_system_v: bool,
    pub auto_detect: bool,
    pub mouse_enabled: bool,
    pub alt_screen_enabled: bool,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
            color_enabled: false,
            force_minimal: false,
            force_system_v: false,
            auto_detect: true,
            mouse_enabled: true,
            alt_screen_enabled: true,
        }
    }
}

impl TerminalSettings {
    /// Reject a configured size with a zero dimension.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width == 0 || self.height == 0 {
            return Err(SettingsError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Renderer configuration after detection and settings are combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSettings {
    pub width: u16,
    pub height: u16,
    pub color: bool,
    pub mouse: bool,
    pub alt_screen: bool,
    pub simple_render: bool,
    #[serde(serialize_with = "serialize_options")]
    pub options: Vec<RenderOption>,
}

impl RenderSettings {
    pub fn resolve(info: &TerminalInfo, settings: &TerminalSettings) -> Self {
        // Forced regimes apply to a copy; the detected snapshot stays as is.
        let mut effective = info.clone();
        effective.is_minimal |= settings.force_minimal;
        effective.is_system_v |= settings.force_system_v;

        let options = negotiate(&effective);
        let size = if settings.auto_detect {
            safe_size(&effective)
        } else {
            let mut configured = effective.clone();
            configured.width = settings.width;
            configured.height = settings.height;
            safe_size(&configured)
        };

        let resolved = Self {
            width: size.cols,
            height: size.rows,
            color: !effective.is_minimal && (settings.color_enabled || effective.color_support),
            mouse: settings.mouse_enabled && !options.contains(&RenderOption::DisableMouse),
            alt_screen: settings.alt_screen_enabled
                && !options.contains(&RenderOption::DisableAltScreen),
            simple_render: options.contains(&RenderOption::SimpleRender),
            options,
        };
        debug!("Resolved render settings: {:?}", resolved);
        resolved
    }
}

fn serialize_options<S>(options: &[RenderOption], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(options.iter().map(|o| o.as_str()))
}
