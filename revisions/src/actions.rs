//! Actions understood by the revision store.
//!
//! Serialized with a `type` tag carrying the console's action type names, so
//! actions can be logged or replayed in the same shape the console emits.

use crate::types::{Recipe, RequestError, RequestId, RequestKind, Revision};
use serde::{Deserialize, Serialize};

/// Actions for the revisions slice of the console state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RevisionsAction {
    // ========== Received data ==========
    /// A single revision arrived
    #[serde(rename = "REVISION_RECEIVE")]
    RevisionReceived {
        /// The revision
        revision: Revision,
    },

    /// A recipe arrived, embedding its latest and approved revisions
    #[serde(rename = "RECIPE_RECEIVE")]
    RecipeReceived {
        /// The recipe
        recipe: Recipe,
    },

    // ========== Single revision requests ==========
    /// A single-revision fetch started
    #[serde(rename = "REVISION_FETCH")]
    FetchRevision {
        /// Request key
        #[serde(rename = "requestId")]
        request_id: RequestId,
    },

    /// A single-revision fetch completed
    #[serde(rename = "REVISION_FETCH_SUCCESS")]
    FetchRevisionSuccess {
        /// Request key
        #[serde(rename = "requestId")]
        request_id: RequestId,
    },

    /// A single-revision fetch failed
    #[serde(rename = "REVISION_FETCH_FAILURE")]
    FetchRevisionFailure {
        /// Request key
        #[serde(rename = "requestId")]
        request_id: RequestId,
        /// Why it failed
        error: RequestError,
    },

    // ========== Revision list requests ==========
    /// A revision list fetch started
    #[serde(rename = "REVISIONS_FETCH")]
    FetchRevisions {
        /// Request key
        #[serde(rename = "requestId")]
        request_id: RequestId,
    },

    /// A revision list fetch completed
    #[serde(rename = "REVISIONS_FETCH_SUCCESS")]
    FetchRevisionsSuccess {
        /// Request key
        #[serde(rename = "requestId")]
        request_id: RequestId,
    },

    /// A revision list fetch failed
    #[serde(rename = "REVISIONS_FETCH_FAILURE")]
    FetchRevisionsFailure {
        /// Request key
        #[serde(rename = "requestId")]
        request_id: RequestId,
        /// Why it failed
        error: RequestError,
    },
}

impl RevisionsAction {
    /// Request key of a fetch lifecycle action
    #[must_use]
    pub const fn request_id(&self) -> Option<&RequestId> {
        match self {
            Self::FetchRevision { request_id }
            | Self::FetchRevisionSuccess { request_id }
            | Self::FetchRevisionFailure { request_id, .. }
            | Self::FetchRevisions { request_id }
            | Self::FetchRevisionsSuccess { request_id }
            | Self::FetchRevisionsFailure { request_id, .. } => Some(request_id),
            Self::RevisionReceived { .. } | Self::RecipeReceived { .. } => None,
        }
    }

    /// Endpoint targeted by a fetch lifecycle action
    #[must_use]
    pub const fn request_kind(&self) -> Option<RequestKind> {
        match self {
            Self::FetchRevision { .. }
            | Self::FetchRevisionSuccess { .. }
            | Self::FetchRevisionFailure { .. } => Some(RequestKind::Revision),
            Self::FetchRevisions { .. }
            | Self::FetchRevisionsSuccess { .. }
            | Self::FetchRevisionsFailure { .. } => Some(RequestKind::RevisionList),
            Self::RevisionReceived { .. } | Self::RecipeReceived { .. } => None,
        }
    }

    /// Builds the fetch-started action for `kind`
    #[must_use]
    pub fn fetch_started(kind: RequestKind, request_id: RequestId) -> Self {
        match kind {
            RequestKind::Revision => Self::FetchRevision { request_id },
            RequestKind::RevisionList => Self::FetchRevisions { request_id },
        }
    }

    /// Builds the fetch-succeeded action for `kind`
    #[must_use]
    pub fn fetch_succeeded(kind: RequestKind, request_id: RequestId) -> Self {
        match kind {
            RequestKind::Revision => Self::FetchRevisionSuccess { request_id },
            RequestKind::RevisionList => Self::FetchRevisionsSuccess { request_id },
        }
    }

    /// Builds the fetch-failed action for `kind`
    #[must_use]
    pub fn fetch_failed(kind: RequestKind, request_id: RequestId, error: RequestError) -> Self {
        match kind {
            RequestKind::Revision => Self::FetchRevisionFailure { request_id, error },
            RequestKind::RevisionList => Self::FetchRevisionsFailure { request_id, error },
        }
    }
}
