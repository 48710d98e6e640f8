//! Visitor type registry.
//!
//! # Responsibilities
//! - Map a `type` discriminator to the variant that handles it
//! - Allocate empty variant records behind the `VisitorConf` trait
//!
//! # Design Decisions
//! - Static table, fixed at compile time (thread-safe without locks)
//! - Adding a variant means one new row here, nothing else shared changes

use crate::config::visitor::{stcp, sudp, xtcp, VisitorConf};

/// A registered visitor variant.
#[derive(Debug, Clone, Copy)]
pub struct VisitorKind {
    /// Discriminator matched against a section's `type` key.
    pub visitor_type: &'static str,
    new: fn() -> Box<dyn VisitorConf>,
}

impl VisitorKind {
    /// Allocate a zero-valued record of this variant.
    pub fn new_conf(&self) -> Box<dyn VisitorConf> {
        (self.new)()
    }
}

fn alloc<T: VisitorConf + Default>() -> Box<dyn VisitorConf> {
    Box::<T>::default()
}

static VISITOR_KINDS: &[VisitorKind] = &[
    VisitorKind {
        visitor_type: stcp::VISITOR_TYPE,
        new: alloc::<stcp::StcpVisitorConf>,
    },
    VisitorKind {
        visitor_type: sudp::VISITOR_TYPE,
        new: alloc::<sudp::SudpVisitorConf>,
    },
    VisitorKind {
        visitor_type: xtcp::VISITOR_TYPE,
        new: alloc::<xtcp::XtcpVisitorConf>,
    },
];

/// Look up the variant registered for `visitor_type`.
pub fn resolve(visitor_type: &str) -> Option<&'static VisitorKind> {
    VISITOR_KINDS
        .iter()
        .find(|kind| kind.visitor_type == visitor_type)
}

/// Empty record for `visitor_type`, or `None` when it isn't registered.
pub fn default_visitor_conf(visitor_type: &str) -> Option<Box<dyn VisitorConf>> {
    resolve(visitor_type).map(VisitorKind::new_conf)
}

/// All registered discriminators, in registration order.
pub fn visitor_types() -> impl Iterator<Item = &'static str> {
    VISITOR_KINDS.iter().map(|kind| kind.visitor_type)
}
