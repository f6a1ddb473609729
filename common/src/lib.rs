//! Common code shared between `classify_server` and its clients.
pub mod protocol;

/// Error type.
pub type Error = Box<dyn std::error::Error>;
