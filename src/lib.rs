//! Visitor configuration for a reverse-proxy client.
//!
//! Decodes, defaults, validates and compares stcp/sudp/xtcp visitor sections.

pub mod config;
pub mod observability;

pub use config::visitor::registry;
pub use config::{build_visitor_conf, BaseVisitorConf, ClientConfig, Section, VisitorConf};
