//! Property tests for the revisions reducers.

use normandy_core::reducer::Reducer;
use normandy_revisions::{
    Recipe, RequestError, RequestId, RequestStatus, Revision, RevisionId, RevisionsAction,
    RevisionsReducer, RevisionsState,
};
use proptest::prelude::*;

fn arb_revision() -> impl Strategy<Value = Revision> {
    (0u64..1_000, "[a-z]{1,12}").prop_map(|(id, name)| Revision::new(id).with_field("name", name))
}

fn arb_request_id() -> impl Strategy<Value = RequestId> {
    "[a-z0-9-]{1,24}".prop_map(RequestId::from)
}

fn arb_request_error() -> impl Strategy<Value = RequestError> {
    (".{0,40}", proptest::option::of(0u16..600)).prop_map(|(message, status)| match status {
        Some(status) => RequestError::new(message).with_details(serde_json::json!({"status": status})),
        None => RequestError::new(message),
    })
}

fn arb_fetch_action() -> impl Strategy<Value = RevisionsAction> {
    (arb_request_id(), arb_request_error(), 0u8..6).prop_map(|(request_id, error, which)| match which {
        0 => RevisionsAction::FetchRevision { request_id },
        1 => RevisionsAction::FetchRevisionSuccess { request_id },
        2 => RevisionsAction::FetchRevisionFailure { request_id, error },
        3 => RevisionsAction::FetchRevisions { request_id },
        4 => RevisionsAction::FetchRevisionsSuccess { request_id },
        _ => RevisionsAction::FetchRevisionsFailure { request_id, error },
    })
}

fn arb_receive_action() -> impl Strategy<Value = RevisionsAction> {
    prop_oneof![
        arb_revision().prop_map(|revision| RevisionsAction::RevisionReceived { revision }),
        (arb_revision(), proptest::option::of(arb_revision())).prop_map(|(latest, approved)| {
            let recipe = Recipe::new(latest);
            let recipe = match approved {
                Some(approved) => recipe.with_approved(approved),
                None => recipe,
            };
            RevisionsAction::RecipeReceived { recipe }
        }),
    ]
}

fn arb_state() -> impl Strategy<Value = RevisionsState> {
    (
        proptest::collection::vec(arb_revision(), 0..8),
        proptest::collection::vec(arb_fetch_action(), 0..8),
    )
        .prop_map(|(revisions, fetches)| {
            let reducer = RevisionsReducer::new();
            let mut state = RevisionsState::new();
            for action in revisions
                .into_iter()
                .map(|revision| RevisionsAction::RevisionReceived { revision })
                .chain(fetches)
            {
                let _ = reducer.reduce(&mut state, action, &());
            }
            state
        })
}

fn apply(state: &mut RevisionsState, actions: impl IntoIterator<Item = RevisionsAction>) {
    let reducer = RevisionsReducer::new();
    for action in actions {
        let effects = reducer.reduce(state, action, &());
        assert!(effects.is_empty());
    }
}

proptest! {
    #[test]
    fn recipe_without_approved_touches_only_latest(mut state in arb_state(), latest in arb_revision()) {
        let before = state.clone();
        let id = latest.id;

        apply(&mut state, [RevisionsAction::RecipeReceived { recipe: Recipe::new(latest.clone()) }]);

        prop_assert_eq!(state.revision(id), Some(&latest));
        prop_assert_eq!(&state.requests, &before.requests);
        for (other, revision) in &before.objects {
            if *other != id {
                prop_assert_eq!(state.revision(*other), Some(revision));
            }
        }
        prop_assert!(state.revision_count() <= before.revision_count() + 1);
    }

    #[test]
    fn recipe_with_both_revisions_touches_exactly_two(
        mut state in arb_state(),
        latest in arb_revision(),
        approved in arb_revision(),
    ) {
        prop_assume!(latest.id != approved.id);
        let before = state.clone();
        let touched = [latest.id, approved.id];

        apply(&mut state, [RevisionsAction::RecipeReceived {
            recipe: Recipe::new(latest.clone()).with_approved(approved.clone()),
        }]);

        prop_assert_eq!(state.revision(latest.id), Some(&latest));
        prop_assert_eq!(state.revision(approved.id), Some(&approved));
        let changed = state
            .objects
            .iter()
            .filter(|(id, revision)| before.objects.get(*id) != Some(*revision))
            .count();
        prop_assert!(changed <= 2);
        for id in state.objects.keys() {
            prop_assert!(touched.contains(id) || before.objects.contains_key(id));
        }
    }

    #[test]
    fn start_then_success_settles_cleanly(mut state in arb_state(), request_id in arb_request_id(), list in any::<bool>()) {
        let actions = if list {
            [
                RevisionsAction::FetchRevisions { request_id: request_id.clone() },
                RevisionsAction::FetchRevisionsSuccess { request_id: request_id.clone() },
            ]
        } else {
            [
                RevisionsAction::FetchRevision { request_id: request_id.clone() },
                RevisionsAction::FetchRevisionSuccess { request_id: request_id.clone() },
            ]
        };

        apply(&mut state, actions);

        prop_assert_eq!(state.request(&request_id), Some(&RequestStatus::Succeeded));
        prop_assert!(!state.is_loading(&request_id));
        prop_assert_eq!(state.request_error(&request_id), None);
    }

    #[test]
    fn start_then_failure_keeps_error(
        mut state in arb_state(),
        request_id in arb_request_id(),
        error in arb_request_error(),
        list in any::<bool>(),
    ) {
        let actions = if list {
            [
                RevisionsAction::FetchRevisions { request_id: request_id.clone() },
                RevisionsAction::FetchRevisionsFailure { request_id: request_id.clone(), error: error.clone() },
            ]
        } else {
            [
                RevisionsAction::FetchRevision { request_id: request_id.clone() },
                RevisionsAction::FetchRevisionFailure { request_id: request_id.clone(), error: error.clone() },
            ]
        };

        apply(&mut state, actions);

        prop_assert!(!state.is_loading(&request_id));
        prop_assert_eq!(state.request_error(&request_id), Some(&error));
    }

    #[test]
    fn fetch_actions_leave_objects_unchanged(mut state in arb_state(), action in arb_fetch_action()) {
        let before = state.objects.clone();
        apply(&mut state, [action]);
        prop_assert_eq!(state.objects, before);
    }

    #[test]
    fn receive_actions_leave_requests_unchanged(mut state in arb_state(), action in arb_receive_action()) {
        let before = state.requests.clone();
        apply(&mut state, [action]);
        prop_assert_eq!(state.requests, before);
    }

    #[test]
    fn other_requests_are_untouched(
        mut state in arb_state(),
        action in arb_fetch_action(),
    ) {
        let before = state.requests.clone();
        let target = action.request_id().cloned();

        apply(&mut state, [action]);

        for (id, status) in &before {
            if Some(id) != target.as_ref() {
                prop_assert_eq!(state.request(id), Some(status));
            }
        }
    }
}

#[test]
fn receive_into_empty_state() {
    let mut state = RevisionsState::new();
    let revision = Revision::new(7).with_field("name", "x");

    apply(&mut state, [RevisionsAction::RevisionReceived { revision }]);

    assert_eq!(state.revision_count(), 1);
    assert_eq!(
        state.revision(RevisionId::new(7)).map(Revision::to_json),
        Some(serde_json::json!({"id": 7, "name": "x"}))
    );
}
