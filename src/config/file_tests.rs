//! Tests for `key=value` configuration file parsing.

use std::io::Write;

use tempfile::NamedTempFile;

use super::ConfigError;
use super::file::{ConfigFile, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_full_file() {
        let config = ConfigFile::parse(
            "hostname=myhost.dynv6.net\n\
             token=abc123\n\
             ip_version=4\n\
             interval=120\n\
             update_url=https://dyn.example.com/api/update\n\
             ipv4_url=https://ip.example.com\n\
             state_file=/var/lib/dyndns/last.addr\n",
        );

        assert_eq!(config.hostname.as_deref(), Some("myhost.dynv6.net"));
        assert_eq!(config.token.as_deref(), Some("abc123"));
        assert_eq!(config.ip_version.as_deref(), Some("4"));
        assert_eq!(config.interval.as_deref(), Some("120"));
        assert_eq!(
            config.update_url.as_deref(),
            Some("https://dyn.example.com/api/update")
        );
        assert_eq!(config.ipv4_url.as_deref(), Some("https://ip.example.com"));
        assert_eq!(
            config.state_file.as_deref(),
            Some("/var/lib/dyndns/last.addr")
        );
    }

    #[test]
    fn ignores_blank_comment_and_unknown_lines() {
        let config = ConfigFile::parse(
            "\n# hostname=commented.example\n\nfoo=bar\njust some text\nhostname=real.example\n",
        );

        assert_eq!(config.hostname.as_deref(), Some("real.example"));
        assert_eq!(config, ConfigFile {
            hostname: Some("real.example".to_string()),
            ..ConfigFile::default()
        });
    }

    #[test]
    fn trims_keys_and_values() {
        let config = ConfigFile::parse("  hostname = spaced.example  \n\ttoken=\tt0k\n");

        assert_eq!(config.hostname.as_deref(), Some("spaced.example"));
        assert_eq!(config.token.as_deref(), Some("t0k"));
    }

    #[test]
    fn value_may_contain_equals() {
        let config = ConfigFile::parse("token=abc==\n");
        assert_eq!(config.token.as_deref(), Some("abc=="));
    }

    #[test]
    fn empty_value_is_absent() {
        let config = ConfigFile::parse("hostname=\ninterval=  \n");

        assert!(config.hostname.is_none());
        assert!(config.interval.is_none());
    }

    #[test]
    fn last_occurrence_wins() {
        let config = ConfigFile::parse("interval=60\ninterval=90\n");
        assert_eq!(config.interval.as_deref(), Some("90"));
    }

    #[test]
    fn empty_content_is_default() {
        assert_eq!(ConfigFile::parse(""), ConfigFile::default());
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hostname=loaded.example").unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.hostname.as_deref(), Some("loaded.example"));
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.conf");

        match ConfigFile::load(&path) {
            Err(ConfigError::FileRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected FileRead, got {other:?}"),
        }
    }
}

mod rendering {
    use super::*;

    #[test]
    fn render_writes_present_fields_in_order() {
        let config = ConfigFile {
            hostname: Some("h.example".to_string()),
            token: Some("t".to_string()),
            ip_version: Some("46".to_string()),
            interval: Some("300".to_string()),
            ..ConfigFile::default()
        };

        assert_eq!(
            config.render(),
            "hostname=h.example\ntoken=t\nip_version=46\ninterval=300\n"
        );
    }

    #[test]
    fn rendered_file_parses_back() {
        let config = ConfigFile {
            hostname: Some("h.example".to_string()),
            token: Some("t".to_string()),
            state_file: Some("/tmp/s".to_string()),
            ..ConfigFile::default()
        };

        assert_eq!(ConfigFile::parse(&config.render()), config);
    }

    #[test]
    fn template_parses_to_defaults_only() {
        let config = ConfigFile::parse(&default_config_template());

        assert!(config.hostname.is_none());
        assert!(config.token.is_none());
        assert_eq!(config.ip_version.as_deref(), Some("46"));
        assert_eq!(config.interval.as_deref(), Some("300"));
    }
}
