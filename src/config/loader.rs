//! Configuration loading from disk.
//!
//! The file is TOML; every top-level table is one section. Section values are
//! flattened to strings before they reach the visitor decoders, so
//! `bind_port = 6000` and `bind_port = "6000"` are equivalent.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::schema::{ClientConfig, CommonConf, VisitorSet, COMMON_SECTION};
use crate::config::section::Section;
use crate::config::visitor::base::VISITOR_ROLE;
use crate::config::visitor::{build_visitor_conf, VisitorConfError};

/// Role of sections describing proxies rather than visitors.
const SERVER_ROLE: &str = "server";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A section is malformed before any visitor logic runs.
    Section { name: String, reason: String },
    /// A visitor section failed to build; the whole load is rejected.
    Visitor { section: String, source: VisitorConfError },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Section { name, reason } => {
                write!(f, "Invalid section [{}]: {}", name, reason)
            }
            ConfigError::Visitor { source, .. } => write!(f, "Visitor error: {}", source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Section { .. } => None,
            ConfigError::Visitor { source, .. } => Some(source),
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    let sections = parse_sections(content)?;
    build_client_config(&sections)
}

/// Split a TOML document into named string-valued sections.
pub fn parse_sections(content: &str) -> Result<BTreeMap<String, Section>, ConfigError> {
    let table: toml::Table = toml::from_str(content).map_err(ConfigError::Parse)?;

    let mut sections = BTreeMap::new();
    for (name, value) in table {
        let entries = match value {
            toml::Value::Table(entries) => entries,
            other => {
                return Err(ConfigError::Section {
                    reason: format!("expected a table, found {}", other.type_str()),
                    name,
                })
            }
        };

        let mut section = Section::new();
        for (key, value) in entries {
            let Some(raw) = scalar_to_string(&value) else {
                return Err(ConfigError::Section {
                    reason: format!("key `{}` must be a scalar, found {}", key, value.type_str()),
                    name,
                });
            };
            section.insert(key, raw);
        }
        sections.insert(name, section);
    }

    Ok(sections)
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        // Debug keeps the fraction, so `6000.0` never passes as an integer.
        toml::Value::Float(f) => Some(format!("{f:?}")),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

/// Build every visitor from already split sections.
///
/// Sections with role "server" or no role describe proxies and are skipped.
/// Any other role, or any visitor error, aborts the whole load; a partial
/// visitor set is never returned.
pub fn build_client_config(
    sections: &BTreeMap<String, Section>,
) -> Result<ClientConfig, ConfigError> {
    let common: CommonConf = match sections.get(COMMON_SECTION) {
        Some(section) => section.decode().map_err(|e| ConfigError::Section {
            name: COMMON_SECTION.to_string(),
            reason: e.to_string(),
        })?,
        None => CommonConf::default(),
    };
    let prefix = common.name_prefix();

    let mut visitors = VisitorSet::new();
    for (name, section) in sections {
        if name == COMMON_SECTION {
            continue;
        }
        match section.get("role") {
            "" | SERVER_ROLE => {
                tracing::debug!(section = %name, "Skipping proxy section");
                continue;
            }
            VISITOR_ROLE => {}
            _ => {
                return Err(ConfigError::Section {
                    name: name.clone(),
                    reason: "role should be 'server' or 'visitor'".to_string(),
                })
            }
        }

        let conf = build_visitor_conf(&prefix, name, section).map_err(|source| {
            ConfigError::Visitor {
                section: name.clone(),
                source,
            }
        })?;
        visitors.insert(conf.base_info().proxy_name().to_string(), conf);
    }

    tracing::info!(
        user = %common.user,
        visitors = visitors.len(),
        "Configuration loaded"
    );

    Ok(ClientConfig { common, visitors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::ValidationError;

    const CONFIG: &str = r#"
[common]
user = "userA"
server_addr = "x.x.x.x"

[ssh]
type = "stcp"
sk = "abcdefg"
local_port = 22

[tunnel1]
type = "stcp"
role = "visitor"
server_name = "srvA"
bind_port = 6000

[dns_visitor]
type = "sudp"
role = "visitor"
server_name = "dns"
bind_addr = "0.0.0.0"
bind_port = "5353"
use_encryption = true
"#;

    #[test]
    fn test_parse_config() {
        let config = parse_config(CONFIG).unwrap();
        assert_eq!(config.common.user, "userA");
        assert_eq!(config.visitors.len(), 2);

        let tunnel = &config.visitors["userA.tunnel1"];
        assert_eq!(tunnel.base_info().server_name(), "userA.srvA");
        assert_eq!(tunnel.base_info().bind_addr(), "127.0.0.1");
        assert_eq!(tunnel.base_info().bind_port(), 6000);

        let dns = &config.visitors["userA.dns_visitor"];
        assert_eq!(dns.base_info().proxy_type(), "sudp");
        assert!(dns.base_info().use_encryption());
        assert_eq!(dns.base_info().bind_addr(), "0.0.0.0");
    }

    #[test]
    fn test_no_common_section_means_no_prefix() {
        let config = parse_config(
            r#"
[v]
type = "xtcp"
role = "visitor"
server_name = "p2p"
bind_port = 7000
"#,
        )
        .unwrap();

        let v = &config.visitors["v"];
        assert_eq!(v.base_info().server_name(), "p2p");
    }

    #[test]
    fn test_one_bad_visitor_rejects_whole_config() {
        let content = format!("{CONFIG}\n[broken]\ntype = \"stcp\"\nrole = \"visitor\"\n");

        match parse_config(&content).unwrap_err() {
            ConfigError::Visitor { section, source } => {
                assert_eq!(section, "broken");
                assert_eq!(
                    source,
                    VisitorConfError::Validation(ValidationError::InvalidBindPort(0))
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_visitor_without_type() {
        let err = parse_config("[v]\nrole = \"visitor\"\nbind_port = 1\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Visitor {
                source: VisitorConfError::MissingType { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_non_scalar_value_rejected() {
        let err = parse_sections("[v]\nbind_port = [1, 2]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Section { ref name, .. } if name == "v"));

        let err = parse_sections("top_level = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Section { .. }));
    }

    #[test]
    fn test_mistyped_role_rejects_config() {
        for role in ["vistor", "Visitor"] {
            let content = format!(
                "[v]\ntype = \"stcp\"\nrole = \"{role}\"\nserver_name = \"s\"\nbind_port = 6000\n"
            );
            match parse_config(&content).unwrap_err() {
                ConfigError::Section { name, reason } => {
                    assert_eq!(name, "v");
                    assert!(reason.contains("'visitor'"));
                }
                other => panic!("unexpected error for role {role:?}: {other}"),
            }
        }
    }

    #[test]
    fn test_server_role_sections_skipped() {
        let config =
            parse_config("[web]\ntype = \"tcp\"\nrole = \"server\"\nlocal_port = 80\n").unwrap();
        assert!(config.visitors.is_empty());
    }

    #[test]
    fn test_float_port_rejected() {
        let err = parse_config("[v]\ntype = \"stcp\"\nrole = \"visitor\"\nbind_port = 6000.0\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Visitor {
                source: VisitorConfError::Config { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(parse_config("[v"), Err(ConfigError::Parse(_))));
    }
}
