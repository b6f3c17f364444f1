use pretty_assertions::assert_eq;
use termcompat::{RenderOption, RenderSettings, SettingsError, TerminalInfo, TerminalSettings};

fn capable() -> TerminalInfo {
    TerminalInfo {
        width: 120,
        height: 40,
        term_type: "xterm-256color".to_string(),
        color_support: true,
        mouse_support: true,
        alt_screen_support: true,
        supports_utf8: true,
        ..TerminalInfo::default()
    }
}

#[test]
fn defaults_match_documented_values() {
    let settings = TerminalSettings::default();

    assert_eq!((settings.width, settings.height), (80, 24));
    assert!(settings.auto_detect);
    assert!(settings.mouse_enabled && settings.alt_screen_enabled);
    assert!(!settings.color_enabled && !settings.force_minimal && !settings.force_system_v);
}

#[test]
fn partial_json_keeps_defaults_for_missing_keys() {
    let settings: TerminalSettings =
        serde_json::from_str(r#"{"force_systemv": true, "width": 100}"#).unwrap();

    assert!(settings.force_system_v);
    assert_eq!(settings.width, 100);
    assert_eq!(settings.height, 24);
    assert!(settings.auto_detect);
}

#[test]
fn zero_size_is_rejected() {
    let settings = TerminalSettings {
        height: 0,
        ..TerminalSettings::default()
    };

    assert!(matches!(
        settings.validate(),
        Err(SettingsError::InvalidSize { width: 80, height: 0 })
    ));
    assert!(TerminalSettings::default().validate().is_ok());
}

#[test]
fn capable_terminal_keeps_everything() {
    let resolved = RenderSettings::resolve(&capable(), &TerminalSettings::default());

    assert_eq!(
        resolved,
        RenderSettings {
            width: 120,
            height: 40,
            color: true,
            mouse: true,
            alt_screen: true,
            simple_render: false,
            options: vec![],
        }
    );
}

#[test]
fn force_minimal_degrades_without_touching_detection() {
    let info = capable();
    let settings = TerminalSettings {
        force_minimal: true,
        ..TerminalSettings::default()
    };

    let resolved = RenderSettings::resolve(&info, &settings);

    assert!(!resolved.mouse && !resolved.alt_screen && !resolved.color);
    assert!(resolved.simple_render);
    assert!(!info.is_minimal);
    assert_eq!(info, capable());
}

#[test]
fn force_system_v_disables_mouse_and_alt_screen_only() {
    let settings = TerminalSettings {
        force_system_v: true,
        ..TerminalSettings::default()
    };

    let resolved = RenderSettings::resolve(&capable(), &settings);

    assert_eq!(
        resolved.options,
        vec![RenderOption::DisableMouse, RenderOption::DisableAltScreen]
    );
    assert!(resolved.color);
    assert!(!resolved.simple_render);
}

#[test]
fn settings_cannot_grant_refused_features() {
    let info = TerminalInfo {
        term_type: "linux".to_string(),
        color_support: true,
        ..TerminalInfo::default()
    };

    let resolved = RenderSettings::resolve(&info, &TerminalSettings::default());

    assert!(!resolved.mouse);
    assert!(!resolved.alt_screen);
}

#[test]
fn disabled_features_stay_off_on_capable_terminal() {
    let settings = TerminalSettings {
        mouse_enabled: false,
        ..TerminalSettings::default()
    };

    let resolved = RenderSettings::resolve(&capable(), &settings);

    assert!(!resolved.mouse);
    assert!(resolved.alt_screen);
}

#[test]
fn configured_size_is_used_and_clamped_without_auto_detect() {
    let settings = TerminalSettings {
        auto_detect: false,
        width: 250,
        height: 30,
        ..TerminalSettings::default()
    };

    let resolved = RenderSettings::resolve(&capable(), &settings);

    assert_eq!((resolved.width, resolved.height), (200, 30));
}

#[test]
fn color_enabled_turns_on_color_for_plain_terminal() {
    let info = TerminalInfo {
        term_type: "vt220".to_string(),
        is_system_v: true,
        ..TerminalInfo::default()
    };
    let settings = TerminalSettings {
        color_enabled: true,
        ..TerminalSettings::default()
    };

    assert!(RenderSettings::resolve(&info, &settings).color);
}

#[test]
fn resolved_settings_serialize_option_tokens() {
    let info = TerminalInfo {
        is_minimal: true,
        ..TerminalInfo::default()
    };
    let resolved = RenderSettings::resolve(&info, &TerminalSettings::default());
    let value = serde_json::to_value(&resolved).unwrap();

    assert_eq!(
        value["options"],
        serde_json::json!(["no-mouse", "no-altscreen", "simple-render"])
    );
}
