//! Persisted records for workspace snapshots.
//!
//! - [`DevelopmentStep`]: one coherent unit of generation work, identified by a caller key.
//! - [`FileRecord`]: a file observed in the workspace, unique per `(path, name)`.
//! - [`FileSnapshot`]: a file's content captured at a development step, unique per
//!   `(file, development step)`.

mod file;
mod step;

pub use file::*;
pub use step::*;
