//! AIT: Asset Inventory Toolkit
//!
//! A single-user tool for recording, searching, cancelling/restoring and
//! reporting on physical device assets, backed by two local SQLite files.

pub mod cli;
pub mod core;
