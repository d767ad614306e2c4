//! Shared test utilities for the lawtest crates.
//!
//! - [`recording`] captures spans and events so suites can assert on the
//!   diagnostics a check emits.
//! - [`logging`] installs a test-friendly subscriber for eyeballing output.
//! - [`profile`] reads the property-suite tuning knobs from the environment.

pub mod logging;
pub mod profile;
pub mod recording;
