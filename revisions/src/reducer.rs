//! Reducers for the revisions slice.
//!
//! Two independent reducers, each owning one map of [`RevisionsState`]:
//!
//! - [`RevisionObjectsReducer`] upserts revisions as they are received, either
//!   directly or embedded in a recipe.
//! - [`RevisionRequestsReducer`] tracks the `{loading, error}` status of every
//!   revision and revision-list fetch.
//!
//! [`RevisionsReducer`] scopes each to its map and combines them. Every
//! reducer here is total and returns no effects.

use crate::actions::RevisionsAction;
use crate::state::{RequestMap, RevisionMap, RevisionsState};
use crate::types::{RequestStatus, Revision};
use normandy_core::{
    composition::{combine_reducers, scope_reducer, CombinedReducer},
    effect::Effect,
    reducer::Reducer,
    SmallVec,
};

/// Keeps the revision lookup table current
#[derive(Clone, Copy, Debug, Default)]
pub struct RevisionObjectsReducer;

impl RevisionObjectsReducer {
    fn upsert(objects: &mut RevisionMap, revision: Revision) {
        tracing::trace!(revision_id = %revision.id, "storing revision");
        objects.insert(revision.id, revision);
    }
}

impl Reducer for RevisionObjectsReducer {
    type State = RevisionMap;
    type Action = RevisionsAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RevisionsAction::RevisionReceived { revision } => {
                Self::upsert(state, revision);
            },
            RevisionsAction::RecipeReceived { recipe } => {
                // Latest first, so an approved revision sharing its id wins
                for revision in recipe.into_revisions() {
                    Self::upsert(state, revision);
                }
            },
            RevisionsAction::FetchRevision { .. }
            | RevisionsAction::FetchRevisionSuccess { .. }
            | RevisionsAction::FetchRevisionFailure { .. }
            | RevisionsAction::FetchRevisions { .. }
            | RevisionsAction::FetchRevisionsSuccess { .. }
            | RevisionsAction::FetchRevisionsFailure { .. } => {},
        }

        SmallVec::new()
    }
}

/// Tracks per-request loading and error status
#[derive(Clone, Copy, Debug, Default)]
pub struct RevisionRequestsReducer;

impl Reducer for RevisionRequestsReducer {
    type State = RequestMap;
    type Action = RevisionsAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let (request_id, status) = match action {
            RevisionsAction::FetchRevision { request_id }
            | RevisionsAction::FetchRevisions { request_id } => (request_id, RequestStatus::Pending),
            RevisionsAction::FetchRevisionSuccess { request_id }
            | RevisionsAction::FetchRevisionsSuccess { request_id } => {
                (request_id, RequestStatus::Succeeded)
            },
            RevisionsAction::FetchRevisionFailure { request_id, error }
            | RevisionsAction::FetchRevisionsFailure { request_id, error } => {
                (request_id, RequestStatus::Failed(error))
            },
            RevisionsAction::RevisionReceived { .. } | RevisionsAction::RecipeReceived { .. } => {
                return SmallVec::new();
            },
        };

        let settles = status.is_settled();
        let previous = state.insert(request_id.clone(), status);

        // Completions are applied as given; one without a preceding start
        // means the dispatcher skipped or reordered events.
        if settles && !matches!(previous, Some(RequestStatus::Pending)) {
            tracing::debug!(
                request_id = %request_id,
                previous = ?previous,
                "request settled without a pending fetch"
            );
        } else {
            tracing::trace!(request_id = %request_id, "request status updated");
        }

        SmallVec::new()
    }
}

/// The revisions slice reducer: objects and requests combined
///
/// ```
/// use normandy_core::reducer::Reducer;
/// use normandy_revisions::{Revision, RevisionId, RevisionsAction, RevisionsReducer, RevisionsState};
///
/// let reducer = RevisionsReducer::new();
/// let mut state = RevisionsState::default();
///
/// let revision = Revision::new(7).with_field("name", "x");
/// let _ = reducer.reduce(&mut state, RevisionsAction::RevisionReceived { revision: revision.clone() }, &());
///
/// assert_eq!(state.revision(RevisionId::new(7)), Some(&revision));
/// ```
pub struct RevisionsReducer {
    inner: CombinedReducer<RevisionsState, RevisionsAction, ()>,
}

impl RevisionsReducer {
    /// Creates the combined reducer
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: combine_reducers(vec![
                Box::new(scope_reducer(RevisionObjectsReducer, |state: &mut RevisionsState| {
                    &mut state.objects
                })),
                Box::new(scope_reducer(RevisionRequestsReducer, |state: &mut RevisionsState| {
                    &mut state.requests
                })),
            ]),
        }
    }
}

impl Default for RevisionsReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RevisionsReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevisionsReducer").finish_non_exhaustive()
    }
}

impl Reducer for RevisionsReducer {
    type State = RevisionsState;
    type Action = RevisionsAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}
