//! Normalized recipe revision store for the Normandy console.
//!
//! Revisions arrive either on their own or embedded in recipes. They are kept
//! in a single lookup table keyed by [`RevisionId`], next to a table tracking
//! the `{loading, error}` status of every fetch keyed by [`RequestId`].
//!
//! # Quick Start
//!
//! ```no_run
//! use normandy_revisions::{RequestId, Revision, RevisionsAction, RevisionsReducer, RevisionsState};
//! use normandy_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::new(RevisionsState::new(), RevisionsReducer::new(), ());
//! let request_id = RequestId::new("revision-7");
//!
//! store.send(RevisionsAction::FetchRevision { request_id: request_id.clone() }).await?;
//! store
//!     .send(RevisionsAction::RevisionReceived { revision: Revision::new(7).with_field("name", "x") })
//!     .await?;
//! store.send(RevisionsAction::FetchRevisionSuccess { request_id: request_id.clone() }).await?;
//!
//! let loading = store.state(|s| s.is_loading(&request_id)).await;
//! assert!(!loading);
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod reducer;
pub mod state;
pub mod types;

pub use actions::RevisionsAction;
pub use reducer::{RevisionObjectsReducer, RevisionRequestsReducer, RevisionsReducer};
pub use state::{RequestMap, RevisionMap, RevisionsState};
pub use types::{
    InvalidRequestStatus, Recipe, RequestError, RequestId, RequestKind, RequestStatus, Revision,
    RevisionId,
};
