//! Create project folder structures (folders and empty files) from
//! declarative YAML templates.
//!
//! A run goes through `resolve` (load a `Template` from a file or a
//! `Registry`), `validate` (collect every structural problem), and
//! `materialize` (create the structure, or preview it), with an optional
//! `git` step at the end.

pub mod cmd;
pub mod config;
pub mod error;
pub mod git;
pub mod materialize;
pub mod registry;
pub mod resolve;
pub mod template;
pub mod userpath;
pub mod validate;
pub mod verbosity;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
