//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (split into string-valued sections)
//!     → [common] → schema.rs (CommonConf, name prefix)
//!     → each visitor section → visitor/ (decode, decorate, check)
//!     → ClientConfig (validated, immutable)
//!
//! On reload:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → reload.rs diffs visitors with `compare`
//!     → atomic swap of the visitor set
//! ```
//!
//! # Design Decisions
//! - Visitors are immutable once built; changes require full reload
//! - One failing visitor rejects the whole file
//! - Decoding (section.rs) is separate from semantic checks (validation.rs)

pub mod loader;
pub mod reload;
pub mod schema;
pub mod section;
pub mod validation;
pub mod visitor;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use reload::{diff_visitors, VisitorChanges, VisitorStore};
pub use schema::{ClientConfig, CommonConf, VisitorSet};
pub use section::{DecodeError, Section};
pub use validation::ValidationError;
pub use visitor::{build_visitor_conf, BaseVisitorConf, VisitorConf, VisitorConfError};
