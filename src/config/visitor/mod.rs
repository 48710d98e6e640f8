//! Visitor configuration.
//!
//! # Data Flow
//! ```text
//! raw section (key → string)
//!     → registry.rs (resolve `type` to a variant)
//!     → empty variant record
//!     → unmarshal_from_section (decode, then decorate)
//!     → check (base invariants, then variant invariants)
//!     → Arc<dyn VisitorConf> (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Each variant is its own type embedding `BaseVisitorConf`
//! - Callers only see the `VisitorConf` trait, never the concrete variant
//! - `compare` is semantic: different variants are never equal
//! - A record is rebuilt from scratch on every reload

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::config::section::{DecodeError, Section};
use crate::config::validation::ValidationError;

pub mod base;
pub mod error;
pub mod registry;
pub mod stcp;
pub mod sudp;
pub mod xtcp;

pub use base::BaseVisitorConf;
pub use error::{VisitorConfError, VisitorConfResult};
pub use stcp::StcpVisitorConf;
pub use sudp::SudpVisitorConf;
pub use xtcp::XtcpVisitorConf;

/// Access to the concrete type behind a trait object.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Capabilities shared by every visitor variant.
pub trait VisitorConf: AsAny + fmt::Debug + Send + Sync {
    /// The common fields of this visitor.
    fn base_info(&self) -> &BaseVisitorConf;

    /// True when `other` is the same variant with the same effective config.
    fn compare(&self, other: &dyn VisitorConf) -> bool;

    /// Decode `section` into `self` and normalize derived fields.
    fn unmarshal_from_section(
        &mut self,
        prefix: &str,
        name: &str,
        section: &Section,
    ) -> Result<(), DecodeError>;

    /// Validate base invariants, then variant-specific ones.
    fn check(&self) -> Result<(), ValidationError>;
}

/// Downcast `other` to the variant `T`, if it is one.
pub(crate) fn same_variant<T: VisitorConf>(other: &dyn VisitorConf) -> Option<&T> {
    other.as_any().downcast_ref::<T>()
}

/// Build a visitor from the section `name`.
///
/// `prefix` namespaces both the visitor's own name and the server it binds to.
pub fn build_visitor_conf(
    prefix: &str,
    name: &str,
    section: &Section,
) -> VisitorConfResult<Arc<dyn VisitorConf>> {
    let visitor_type = section.get("type");
    if visitor_type.is_empty() {
        return Err(VisitorConfError::MissingType { name: name.to_string() });
    }

    let mut conf = registry::default_visitor_conf(visitor_type).ok_or_else(|| {
        VisitorConfError::UnknownType {
            name: name.to_string(),
            visitor_type: visitor_type.to_string(),
        }
    })?;

    conf.unmarshal_from_section(prefix, name, section)
        .map_err(|source| VisitorConfError::Config {
            name: name.to_string(),
            visitor_type: visitor_type.to_string(),
            source,
        })?;

    conf.check()?;

    tracing::debug!(
        name = %conf.base_info().proxy_name(),
        visitor_type,
        server_name = %conf.base_info().server_name(),
        bind_addr = %conf.base_info().bind_addr(),
        bind_port = conf.base_info().bind_port(),
        "Visitor configuration built"
    );

    Ok(Arc::from(conf))
}
