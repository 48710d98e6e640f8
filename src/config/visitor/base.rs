//! Fields and behaviour shared by every visitor variant.

use serde::{Deserialize, Serialize};

use crate::config::section::Section;
use crate::config::validation::{validate_base, ValidationError};

/// The only role a visitor section may declare.
pub const VISITOR_ROLE: &str = "visitor";

/// Bind address used when a section leaves `bind_addr` empty.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Common visitor configuration, embedded by each variant.
///
/// Fields are private: once decorated and checked, a visitor is read-only
/// configuration shared with the tunnel runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BaseVisitorConf {
    /// Globally scoped name (`prefix + section name`).
    #[serde(rename = "name")]
    proxy_name: String,

    /// Echoes the `type` discriminator.
    #[serde(rename = "type")]
    proxy_type: String,

    use_encryption: bool,
    use_compression: bool,

    /// Must be "visitor".
    role: String,

    /// Shared secret for the tunnel handshake.
    sk: String,

    /// Remote proxy this visitor binds to, namespaced like `proxy_name`.
    server_name: String,

    /// Local listen address (default: 127.0.0.1).
    bind_addr: String,

    /// Local listen port. Signed so a negative value reaches validation
    /// instead of failing to decode.
    bind_port: i32,
}

impl BaseVisitorConf {
    pub fn proxy_name(&self) -> &str {
        &self.proxy_name
    }

    pub fn proxy_type(&self) -> &str {
        &self.proxy_type
    }

    pub fn use_encryption(&self) -> bool {
        self.use_encryption
    }

    pub fn use_compression(&self) -> bool {
        self.use_compression
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn sk(&self) -> &str {
        &self.sk
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }

    pub fn bind_port(&self) -> i32 {
        self.bind_port
    }

    /// Normalize derived fields after decoding.
    ///
    /// Not idempotent: callers decode a fresh value before every call.
    pub(crate) fn decorate(&mut self, prefix: &str, name: &str, _section: &Section) {
        self.proxy_name = format!("{prefix}{name}");
        self.server_name = format!("{prefix}{}", self.server_name);

        if self.bind_addr.is_empty() {
            self.bind_addr = DEFAULT_BIND_ADDR.to_string();
        }
    }

    pub(crate) fn check(&self) -> Result<(), ValidationError> {
        validate_base(self)
    }

    /// Field-by-field equality over the common fields.
    pub(crate) fn compare(&self, other: &BaseVisitorConf) -> bool {
        self.proxy_name == other.proxy_name
            && self.proxy_type == other.proxy_type
            && self.use_encryption == other.use_encryption
            && self.use_compression == other.use_compression
            && self.role == other.role
            && self.sk == other.sk
            && self.server_name == other.server_name
            && self.bind_addr == other.bind_addr
            && self.bind_port == other.bind_port
    }
}
