//! NAT traversal (P2P) TCP visitor.

use crate::config::section::{DecodeError, Section};
use crate::config::validation::ValidationError;
use crate::config::visitor::{same_variant, BaseVisitorConf, VisitorConf};

pub const VISITOR_TYPE: &str = "xtcp";

/// Visitor for an xtcp proxy. Traffic goes peer to peer once hole punching
/// succeeds; the configuration is the same as for stcp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XtcpVisitorConf {
    base: BaseVisitorConf,
}

impl VisitorConf for XtcpVisitorConf {
    fn base_info(&self) -> &BaseVisitorConf {
        &self.base
    }

    fn compare(&self, other: &dyn VisitorConf) -> bool {
        let Some(other) = same_variant::<Self>(other) else {
            return false;
        };
        // Variant-only fields, once added, are compared after the base.
        self.base.compare(&other.base)
    }

    fn unmarshal_from_section(
        &mut self,
        prefix: &str,
        name: &str,
        section: &Section,
    ) -> Result<(), DecodeError> {
        self.base = section.decode()?;
        self.base.decorate(prefix, name, section);
        Ok(())
    }

    fn check(&self) -> Result<(), ValidationError> {
        self.base.check()
    }
}
