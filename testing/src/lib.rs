//! # Normandy Testing
//!
//! Testing utilities for the Normandy recipe console crates.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Effect assertion helpers
//! - [`MockApiServer`]: HTTP server answering from a fixture directory
//! - [`init_tracing`]: Test log output controlled by `RUST_LOG`
//!
//! ## Example
//!
//! ```ignore
//! use normandy_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(RevisionsReducer::new())
//!     .with_env(())
//!     .given_state(RevisionsState::default())
//!     .when_action(RevisionsAction::RevisionReceived { revision })
//!     .then_state(|state| assert_eq!(state.revision_count(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

/// Mock HTTP server serving JSON fixtures
pub mod mock_api;


pub use mock_api::MockApiServer;
pub use reducer_test::{assertions, ReducerTest};

/// Install a `tracing` subscriber that writes through the test harness
///
/// Filtering follows `RUST_LOG` and defaults to `warn`. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
