//! End-to-end tests for visitor construction, loading and reload.

use visitor_conf::config::loader::{load_config, ConfigError};
use visitor_conf::config::{ValidationError, VisitorConfError, VisitorStore};
use visitor_conf::{build_visitor_conf, registry};

mod common;

#[test]
fn test_stcp_visitor_end_to_end() {
    let raw = common::section(&[
        ("type", "stcp"),
        ("role", "visitor"),
        ("server_name", "srvA"),
        ("bind_port", "6000"),
    ]);

    let conf = build_visitor_conf("userA.", "tunnel1", &raw).unwrap();
    let base = conf.base_info();
    assert_eq!(base.proxy_name(), "userA.tunnel1");
    assert_eq!(base.server_name(), "userA.srvA");
    assert_eq!(base.bind_addr(), "127.0.0.1");
    assert_eq!(base.bind_port(), 6000);
    assert!(conf.compare(conf.as_ref()));
}

#[test]
fn test_unregistered_type_end_to_end() {
    let raw = common::section(&[
        ("type", "ftp"),
        ("role", "visitor"),
        ("server_name", "srvA"),
        ("bind_port", "6000"),
    ]);

    let err = build_visitor_conf("userA.", "tunnel1", &raw).unwrap_err();
    assert_eq!(
        err,
        VisitorConfError::UnknownType {
            name: "tunnel1".into(),
            visitor_type: "ftp".into(),
        }
    );
}

#[test]
fn test_every_registered_type_builds() {
    for visitor_type in registry::visitor_types() {
        let raw = common::section(&[
            ("type", visitor_type),
            ("role", "visitor"),
            ("bind_addr", "0.0.0.0"),
            ("bind_port", "1"),
        ]);
        let conf = build_visitor_conf("", "v", &raw).unwrap();
        assert_eq!(conf.base_info().proxy_type(), visitor_type);
    }
}

#[test]
fn test_role_checked_regardless_of_other_fields() {
    for visitor_type in registry::visitor_types() {
        let raw = common::section(&[("type", visitor_type), ("role", ""), ("bind_port", "-5")]);
        match build_visitor_conf("", "v", &raw).unwrap_err() {
            VisitorConfError::Validation(e) => assert_eq!(e.field(), "role"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn test_load_config_from_file() {
    let file = common::write_config(
        r#"
[common]
user = "alice"

[secret_ssh_visitor]
type = "stcp"
role = "visitor"
server_name = "secret_ssh"
sk = "abcdefg"
bind_addr = "127.0.0.1"
bind_port = 6000

[p2p_ssh_visitor]
type = "xtcp"
role = "visitor"
server_name = "p2p_ssh"
sk = "abcdefg"
bind_port = 6001
"#,
    );

    let config = load_config(file.path()).unwrap();
    let names: Vec<_> = config.visitors.keys().cloned().collect();
    assert_eq!(names, vec!["alice.p2p_ssh_visitor", "alice.secret_ssh_visitor"]);
    assert_eq!(
        config.visitors["alice.p2p_ssh_visitor"].base_info().server_name(),
        "alice.p2p_ssh"
    );
}

#[test]
fn test_load_config_rejects_bad_bind_port() {
    let file = common::write_config(
        "[v]\ntype = \"sudp\"\nrole = \"visitor\"\nbind_port = 0\n",
    );

    match load_config(file.path()).unwrap_err() {
        ConfigError::Visitor { section, source } => {
            assert_eq!(section, "v");
            assert_eq!(
                source,
                VisitorConfError::Validation(ValidationError::InvalidBindPort(0))
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_reload_from_files() {
    let first = common::write_config(
        r#"
[a]
type = "stcp"
role = "visitor"
server_name = "s"
bind_port = 7000

[b]
type = "stcp"
role = "visitor"
server_name = "s"
bind_port = 7001
"#,
    );
    let second = common::write_config(
        r#"
[a]
type = "stcp"
role = "visitor"
server_name = "s"
bind_port = "7000"

[b]
type = "xtcp"
role = "visitor"
server_name = "s"
bind_port = 7001

[c]
type = "sudp"
role = "visitor"
server_name = "s"
bind_port = 7002
"#,
    );

    let store = VisitorStore::new(load_config(first.path()).unwrap().visitors);
    let changes = store.reload(load_config(second.path()).unwrap().visitors);

    assert_eq!(changes.added, vec!["c".to_string()]);
    assert!(changes.removed.is_empty());
    assert_eq!(changes.changed, vec!["b".to_string()]);
    assert_eq!(store.load().len(), 3);
}
