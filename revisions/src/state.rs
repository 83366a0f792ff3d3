//! The revisions slice of the console state tree.

use crate::types::{RequestError, RequestId, RequestStatus, Revision, RevisionId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Revisions keyed by id
pub type RevisionMap = HashMap<RevisionId, Revision>;

/// Request statuses keyed by request id
pub type RequestMap = HashMap<RequestId, RequestStatus>;

/// Normalized revisions plus the status of every fetch that produced them
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RevisionsState {
    /// Revision lookup table
    pub objects: RevisionMap,
    /// Per-request loading/error status
    pub requests: RequestMap,
}

impl RevisionsState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a revision by id
    #[must_use]
    pub fn revision(&self, id: RevisionId) -> Option<&Revision> {
        self.objects.get(&id)
    }

    /// Number of stored revisions
    #[must_use]
    pub fn revision_count(&self) -> usize {
        self.objects.len()
    }

    /// Returns the status of a request
    #[must_use]
    pub fn request(&self, id: &RequestId) -> Option<&RequestStatus> {
        self.requests.get(id)
    }

    /// `true` while the request is in flight; unknown requests are not loading
    #[must_use]
    pub fn is_loading(&self, id: &RequestId) -> bool {
        self.request(id).is_some_and(RequestStatus::loading)
    }

    /// Error of a failed request
    #[must_use]
    pub fn request_error(&self, id: &RequestId) -> Option<&RequestError> {
        self.request(id).and_then(RequestStatus::error)
    }
}
