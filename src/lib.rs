//! Workspace management for generated projects.
//!
//! - [`workspace::resolve`] decides where a logical file lives under the project root.
//! - [`workspace::build_tree`] renders a filtered summary of the workspace.
//! - [`workspace::save_files_snapshot`] records the content of every workspace file
//!   against a development step.
//!
//! Records are persisted through [`db::RecordStore`], implemented by [`db::Database`].

pub mod error;
pub mod workspace;

pub use pilot_core::{db, models};
