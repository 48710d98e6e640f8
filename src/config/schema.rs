//! Configuration schema definitions.
//!
//! Client-level configuration: the `[common]` section plus every visitor
//! built from the remaining sections.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::visitor::VisitorConf;

/// Name of the section holding client-wide settings.
pub const COMMON_SECTION: &str = "common";

/// Visitors keyed by their decorated proxy name.
pub type VisitorSet = BTreeMap<String, Arc<dyn VisitorConf>>;

/// Settings from the `[common]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CommonConf {
    /// Namespaces every proxy and visitor name as `user.name`.
    pub user: String,
}

impl CommonConf {
    /// Prefix applied to visitor and server names.
    pub fn name_prefix(&self) -> String {
        if self.user.is_empty() {
            String::new()
        } else {
            format!("{}.", self.user)
        }
    }
}

/// Fully loaded and validated client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub common: CommonConf,

    /// Validated visitors, immutable once loaded.
    pub visitors: VisitorSet,
}
