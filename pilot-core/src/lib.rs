//! Record models and the SQLite-backed record store used by `pilot-workspace`.

pub mod db;
pub mod models;
