//! Library components of the `county-atlas` CLI.

pub mod export;
pub mod logging;
pub mod settings;
pub mod summary;
