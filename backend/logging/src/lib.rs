//! Structured logging for the Pawtoon service.
//!
//! Handles subscriber setup, JSON file output with rotation, and redaction
//! of service credentials from log text.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_sensitive_data;
