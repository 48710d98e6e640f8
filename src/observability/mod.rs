//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config subsystem produces:
//!     → structured log events (visitor built, reload changes, errors)
//!
//! Consumers:
//!     → logging.rs (stdout via tracing-subscriber)
//! ```

pub mod logging;
