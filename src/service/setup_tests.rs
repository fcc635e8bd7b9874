//! Tests for the setup wizard.

use std::io::Cursor;

use tempfile::TempDir;

use crate::config::ConfigFile;

use super::{ServiceError, run_wizard, write_config};

fn answers(input: &str) -> Result<super::SetupAnswers, ServiceError> {
    let mut output = Vec::new();
    run_wizard(Cursor::new(input.as_bytes()), &mut output)
}

#[test]
fn full_answers_are_collected() {
    let result = answers("myhost.dynv6.net\nabc123\n1\n600\ny\n").unwrap();

    assert_eq!(result.config.hostname.as_deref(), Some("myhost.dynv6.net"));
    assert_eq!(result.config.token.as_deref(), Some("abc123"));
    assert_eq!(result.config.ip_version.as_deref(), Some("4"));
    assert_eq!(result.config.interval.as_deref(), Some("600"));
    assert!(result.install);
}

#[test]
fn blank_choices_use_defaults() {
    let result = answers("h\nt\n\n\nn\n").unwrap();

    assert_eq!(result.config.ip_version.as_deref(), Some("46"));
    assert_eq!(result.config.interval.as_deref(), Some("300"));
    assert!(!result.install);
}

#[test]
fn ipv6_choice_maps_to_6() {
    let result = answers("h\nt\n2\n\n\n").unwrap();
    assert_eq!(result.config.ip_version.as_deref(), Some("6"));
}

#[test]
fn invalid_interval_falls_back_to_default() {
    let result = answers("h\nt\n3\nsoon\nN\n").unwrap();
    assert_eq!(result.config.interval.as_deref(), Some("300"));

    let zero = answers("h\nt\n3\n0\nN\n").unwrap();
    assert_eq!(zero.config.interval.as_deref(), Some("300"));
}

#[test]
fn install_answer_is_case_insensitive() {
    assert!(answers("h\nt\n3\n\nY\n").unwrap().install);
}

#[test]
fn empty_hostname_is_rejected() {
    assert!(matches!(
        answers("\n"),
        Err(ServiceError::MissingInput("hostname"))
    ));
}

#[test]
fn empty_token_is_rejected() {
    assert!(matches!(
        answers("h\n   \n"),
        Err(ServiceError::MissingInput("API token"))
    ));
}

#[test]
fn eof_before_token_is_rejected() {
    assert!(matches!(
        answers("h\n"),
        Err(ServiceError::MissingInput("API token"))
    ));
}

#[test]
fn prompts_are_written() {
    let mut output = Vec::new();
    run_wizard(Cursor::new("h\nt\n\n\nn\n".as_bytes()), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Enter hostname"));
    assert!(text.contains("3. Both IPv4 and IPv6"));
    assert!(text.contains("systemd service"));
}

#[test]
fn written_config_parses_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dyndns-client.conf");
    let result = answers("myhost.dynv6.net\nabc123\n3\n120\nn\n").unwrap();

    write_config(&path, &result.config).unwrap();

    let parsed = ConfigFile::load(&path).unwrap();
    assert_eq!(parsed, result.config);
}

#[cfg(unix)]
#[test]
fn written_config_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dyndns-client.conf");
    std::fs::write(&path, "old").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    write_config(&path, &ConfigFile::default()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
