//! Headless client for the ring siege.
//!
//! Loads content from a data directory, runs one wave through
//! [`siege_runtime::Runtime`], and narrates the encounter into the log.
pub mod config;
pub mod logging;
pub mod narrator;

pub use config::ClientConfig;
pub use narrator::Narrator;
