//! Logging setup for processes embedding the access-policy crates.
//!
//! The library crates only emit `tracing` events; installing a subscriber is
//! left to the process, through [`init`] or its own setup.

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
