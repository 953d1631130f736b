//! Session Stopwatcher core: session state machine, persistence and the manifest questionnaire.
//!
//! The `cli` crate owns terminals, processes and logging setup; everything here is
//! plain data + file I/O so it can be exercised from tests.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod manifest;
pub mod persist;
pub mod session;
pub mod util;
