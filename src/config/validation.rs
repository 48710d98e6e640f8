//! Visitor validation.
//!
//! # Responsibilities
//! - Semantic validation (the section adapter handles syntactic)
//! - Check the invariants every visitor variant shares
//!
//! # Design Decisions
//! - Returns the first violation, not all of them
//! - Each error names the offending field
//! - Validation is a pure function over already decorated values

use thiserror::Error;

use crate::config::visitor::base::{BaseVisitorConf, VISITOR_ROLE};

/// A visitor invariant that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid role {0:?}, expected \"visitor\"")]
    InvalidRole(String),

    #[error("bind_addr shouldn't be empty")]
    EmptyBindAddr,

    #[error("bind_port is required, got {0}")]
    InvalidBindPort(i32),
}

impl ValidationError {
    /// Name of the config key that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidRole(_) => "role",
            ValidationError::EmptyBindAddr => "bind_addr",
            ValidationError::InvalidBindPort(_) => "bind_port",
        }
    }
}

pub fn validate_base(conf: &BaseVisitorConf) -> Result<(), ValidationError> {
    if conf.role() != VISITOR_ROLE {
        return Err(ValidationError::InvalidRole(conf.role().to_string()));
    }
    if conf.bind_addr().is_empty() {
        return Err(ValidationError::EmptyBindAddr);
    }
    if conf.bind_port() <= 0 {
        return Err(ValidationError::InvalidBindPort(conf.bind_port()));
    }
    Ok(())
}
