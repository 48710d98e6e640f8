//! Secret UDP visitor.

use crate::config::section::{DecodeError, Section};
use crate::config::validation::ValidationError;
use crate::config::visitor::{same_variant, BaseVisitorConf, VisitorConf};

pub const VISITOR_TYPE: &str = "sudp";

/// Visitor for a secret UDP proxy. Datagrams received on the bind address
/// are relayed to the named server proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SudpVisitorConf {
    base: BaseVisitorConf,
}

impl VisitorConf for SudpVisitorConf {
    fn base_info(&self) -> &BaseVisitorConf {
        &self.base
    }

    fn compare(&self, other: &dyn VisitorConf) -> bool {
        match same_variant::<Self>(other) {
            Some(other) => self.base.compare(&other.base),
            None => false,
        }
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
