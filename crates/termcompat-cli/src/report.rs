//! Human-readable detection report

use std::fmt;
use termcompat::{RenderSettings, TerminalInfo};

fn checkbox(f: &mut fmt::Formatter<'_>, label: &str, checked: bool) -> fmt::Result {
    let mark = if checked { '✓' } else { ' ' };
    writeln!(f, "  [{mark}] {label}")
}

/// The report printed by `terminal-info` without `--json`.
pub struct HumanReport<'a>(pub &'a TerminalInfo);

impl fmt::Display for HumanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.0;

        writeln!(f, "Terminal Detection Results:")?;
        writeln!(f, "==========================")?;
        writeln!(f, "Terminal Type: {}", info.term_type)?;
        if !info.term_program.is_empty() {
            writeln!(f, "Terminal Program: {}", info.term_program)?;
        }
        writeln!(f, "Size: {}x{}", info.width, info.height)?;
        writeln!(f)?;

        writeln!(f, "Compatibility Mode:")?;
        if info.is_minimal {
            checkbox(f, "Minimal Terminal Detected", true)?;
        } else {
            checkbox(f, "Minimal Terminal", false)?;
        }
        checkbox(f, "UNIX System V Compatible", info.is_system_v)?;
        writeln!(f)?;

        writeln!(f, "Capabilities:")?;
        checkbox(f, "Color Support", info.color_support)?;
        checkbox(f, "Mouse Support", info.mouse_support)?;
        checkbox(f, "Alt Screen", info.alt_screen_support)?;
        checkbox(f, "UTF-8 Support", info.supports_utf8)?;
        checkbox(f, "Bold Text", info.supports_bold)?;
        checkbox(f, "Underline", info.supports_underline)?;
        checkbox(f, "Reverse Video", info.supports_reverse)?;
        writeln!(f)?;

        writeln!(f, "Recommended Settings:")?;
        let options = info.negotiate();
        if options.is_empty() {
            writeln!(f, "  Full features available")?;
        } else {
            for option in options {
                writeln!(f, "  - {option}")?;
            }
        }

        let safe = info.safe_size();
        if safe != info.size() {
            writeln!(f, "  Recommended size: {safe}")?;
        }
        Ok(())
    }
}

/// The settings section printed when `--config` is given.
pub struct SettingsReport<'a>(pub &'a RenderSettings);

impl fmt::Display for SettingsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.0;

        writeln!(f, "\nRender Settings:")?;
        writeln!(f, "  Size: {}x{}", settings.width, settings.height)?;
        checkbox(f, "Color", settings.color)?;
        checkbox(f, "Mouse", settings.mouse)?;
        checkbox(f, "Alt Screen", settings.alt_screen)?;
        checkbox(f, "Simple Render", settings.simple_render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcompat::TerminalSettings;

    #[test]
    fn capable_terminal_reports_full_features() {
        let info = TerminalInfo {
            width: 120,
            height: 40,
            term_type: "xterm-256color".to_string(),
            mouse_support: true,
            alt_screen_support: true,
            ..TerminalInfo::default()
        };

        let report = HumanReport(&info).to_string();

        assert!(report.starts_with("Terminal Detection Results:\n"));
        assert!(report.contains("Terminal Type: xterm-256color\n"));
        assert!(!report.contains("Terminal Program:"));
        assert!(report.contains("Size: 120x40\n\nCompatibility Mode:\n"));
        assert!(report.contains("  [ ] Minimal Terminal\n"));
        assert!(report.contains("  [✓] Mouse Support\n"));
        assert!(report.contains("  Full features available\n"));
        assert!(!report.contains("Recommended size"));
    }

    #[test]
    fn minimal_terminal_lists_options_and_safe_size() {
        let info = TerminalInfo {
            width: 20,
            height: 5,
            term_type: "dumb".to_string(),
            term_program: "ssh".to_string(),
            is_minimal: true,
            ..TerminalInfo::default()
        };

        let report = HumanReport(&info).to_string();

        assert!(report.contains("Terminal Program: ssh\n"));
        assert!(report.contains("  [✓] Minimal Terminal Detected\n"));
        assert!(report.contains("  - no-mouse\n  - no-altscreen\n  - simple-render\n"));
        assert!(report.ends_with("  Recommended size: 40x10\n"));
    }

    #[test]
    fn settings_section_lists_every_flag() {
        let info = TerminalInfo {
            width: 100,
            height: 30,
            ..TerminalInfo::default()
        };
        let resolved = RenderSettings::resolve(&info, &TerminalSettings::default());

        let report = SettingsReport(&resolved).to_string();

        assert_eq!(
            report,
            "\nRender Settings:\n  Size: 100x30\n  [ ] Color\n  [ ] Mouse\n  [ ] Alt Screen\n  [ ] Simple Render\n"
        );
    }
}
