//! Secret TCP visitor.

use crate::config::section::{DecodeError, Section};
use crate::config::validation::ValidationError;
use crate::config::visitor::{same_variant, BaseVisitorConf, VisitorConf};

pub const VISITOR_TYPE: &str = "stcp";

/// Visitor for a secret TCP proxy: the server side only accepts visitors
/// presenting the matching `sk`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StcpVisitorConf {
    base: BaseVisitorConf,
}

impl VisitorConf for StcpVisitorConf {
    fn base_info(&self) -> &BaseVisitorConf {
        &self.base
    }

    fn compare(&self, other: &dyn VisitorConf) -> bool {
        let Some(other) = same_variant::<Self>(other) else {
            return false;
        };
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
