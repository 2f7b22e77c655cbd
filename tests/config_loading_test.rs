use std::fs;

use tripwire::domain::models::{ActionPlan, ProbeKind, RotationPolicy};
use tripwire::infrastructure::config::{ConfigError, ConfigLoader};
use tripwire::services::{resolve, TemplateVars};

const FULL_YAML: &str = r#"
dataDir: state
probeTimeoutSecs: 20
commandTimeoutSecs: 30
takeScreenshot: true
useNotifier: true
terminalNotifierPath: /usr/local/bin/terminal-notifier
smsPath: /usr/local/bin/send-sms
sendSms: ["+15550100", "+15550101"]
preAction: echo start %NAME%
defaultAction: open %URL%
postAction: echo done
probe:
  kind: browser
  browserPath: /usr/bin/chromium
logging:
  level: warn
  rotation: daily
watchers:
  - name: clinic-A
    url: https://example.com/book
    waitForText: { text: Fully booked, isPresent: false }
    action: say opening
  - name: clinic-B
    url: https://example.com/b
    waitForText: { text: Book now, isPresent: true }
    takeScreenshot: false
    useTerminalNotifier: false
    actions:
      - [open, -a, Safari, "%URL%"]
"#;

#[test]
fn test_full_document_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tripwire.yaml");
    fs::write(&path, FULL_YAML).unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();

    assert_eq!(config.command_timeout_secs, Some(30));
    assert_eq!(config.probe.kind, ProbeKind::Browser);
    assert_eq!(config.logging.rotation, RotationPolicy::Daily);

    let defaults = config.default_config();
    assert_eq!(defaults.sms.recipients.len(), 2);

    let specs = config.watcher_specs();
    let a = &specs[0];
    let b = &specs[1];
    assert!(a.take_screenshot && a.use_notifier, "useNotifier alias is accepted");
    assert!(!b.take_screenshot && !b.use_notifier);
    assert!(matches!(b.actions, ActionPlan::OrderedList(_)));

    assert_eq!(
        resolve(&a.actions, &defaults.actions, &TemplateVars::for_watcher(a)),
        ["echo start clinic-A", "say opening", "echo done"],
        "phases fall back individually"
    );
    assert_eq!(
        resolve(&b.actions, &defaults.actions, &TemplateVars::for_watcher(b)),
        ["open -a Safari https://example.com/b"],
        "ordered list replaces the phased defaults whole"
    );
}

#[test]
fn test_json_document_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watchers.json");
    fs::write(
        &path,
        r#"{
            "defaultActions": ["open %URL%"],
            "watchers": [
                {"name": "gone", "url": "https://example.com", "waitForText": {"text": "Sold out"}}
            ]
        }"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    let spec = &config.watcher_specs()[0];
    assert!(!spec.expected_presence);
    assert!(spec.actions.is_empty());
}

#[test]
fn test_invalid_documents_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tripwire.yaml");

    fs::write(
        &path,
        "watchers:\n  - {name: a, url: 'https://a', waitForText: {text: x}}\n  - {name: a, url: 'https://b', waitForText: {text: y}}\n",
    )
    .unwrap();
    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::DuplicateWatcherName(_))
    ));

    fs::write(&path, "watchers:\n  - {name: a, url: 'https://a'}\n").unwrap();
    assert!(
        ConfigLoader::load_from_file(&path).is_err(),
        "waitForText is required"
    );

    fs::write(&path, "logging: {level: loud}\n").unwrap();
    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidLogLevel(_))
    ));
}

#[test]
fn test_environment_overrides_nested_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tripwire.yaml");
    fs::write(&path, "logging:\n  level: info\n  format: pretty\n").unwrap();

    temp_env::with_vars(
        [
            ("TRIPWIRE_LOGGING__FORMAT", Some("json")),
            ("TRIPWIRE_PROBE__KIND", Some("browser")),
        ],
        || {
            let config = ConfigLoader::load_from_file(&path).unwrap();
            assert_eq!(
                config.logging.format,
                tripwire::domain::models::LogFormat::Json
            );
            assert_eq!(config.probe.kind, ProbeKind::Browser);
        },
    );
}
