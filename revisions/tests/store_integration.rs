//! Integration tests for the revisions reducer running inside a Store.

use normandy_revisions::{
    Recipe, RequestError, RequestId, RequestKind, RequestStatus, Revision, RevisionId,
    RevisionsAction, RevisionsReducer, RevisionsState,
};
use normandy_runtime::Store;
use serde_json::json;

type RevisionsStore = Store<RevisionsState, RevisionsAction, (), RevisionsReducer>;

fn store() -> RevisionsStore {
    normandy_testing::init_tracing();
    Store::new(RevisionsState::new(), RevisionsReducer::new(), ())
}

#[tokio::test]
async fn test_fetch_revision_lifecycle() -> anyhow::Result<()> {
    let store = store();
    let request_id = RequestId::new("revision-7");

    store
        .send(RevisionsAction::fetch_started(RequestKind::Revision, request_id.clone()))
        .await?;
    assert!(store.state(|s| s.is_loading(&request_id)).await);

    let revision = Revision::from_json(json!({"id": 7, "name": "x"}))?;
    store.send(RevisionsAction::RevisionReceived { revision }).await?;
    store
        .send(RevisionsAction::fetch_succeeded(RequestKind::Revision, request_id.clone()))
        .await?;

    let (count, name, status) = store
        .state(|s| {
            (
                s.revision_count(),
                s.revision(RevisionId::new(7)).and_then(|r| r.field("name")).cloned(),
                s.request(&request_id).cloned(),
            )
        })
        .await;

    assert_eq!(count, 1);
    assert_eq!(name, Some(json!("x")));
    assert_eq!(status, Some(RequestStatus::Succeeded));
    assert_eq!(store.pending_effects(), 0);
    Ok(())
}

#[tokio::test]
async fn test_fetch_revisions_failure_keeps_error() -> anyhow::Result<()> {
    let store = store();
    let request_id = RequestId::new("all-revisions");

    store
        .send(RevisionsAction::FetchRevisions { request_id: request_id.clone() })
        .await?;
    store
        .send(RevisionsAction::FetchRevisionsFailure {
            request_id: request_id.clone(),
            error: RequestError::new("502 Bad Gateway"),
        })
        .await?;

    let (loading, error) = store
        .state(|s| (s.is_loading(&request_id), s.request_error(&request_id).cloned()))
        .await;

    assert!(!loading);
    assert_eq!(error.map(|e| e.to_string()), Some("502 Bad Gateway".to_string()));
    assert_eq!(store.state(|s| s.revision_count()).await, 0);
    Ok(())
}

#[tokio::test]
async fn test_recipe_receive_populates_revisions() -> anyhow::Result<()> {
    let store = store();

    let recipe: Recipe = serde_json::from_value(json!({
        "id": 12,
        "name": "system-addon-test",
        "latest_revision": {"id": 31, "comment": "draft"},
        "approved_revision": {"id": 30, "comment": "shipped"},
    }))?;
    store.send(RevisionsAction::RecipeReceived { recipe }).await?;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.revision_count(), 2);
    assert_eq!(
        state.revision(RevisionId::new(30)).map(Revision::to_json),
        Some(json!({"id": 30, "comment": "shipped"}))
    );
    assert!(state.requests.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_replayed_action_log() -> anyhow::Result<()> {
    let store = store();

    let log = json!([
        {"type": "REVISIONS_FETCH", "requestId": "list"},
        {"type": "REVISION_RECEIVE", "revision": {"id": 1}},
        {"type": "REVISION_RECEIVE", "revision": {"id": 2}},
        {"type": "REVISIONS_FETCH_SUCCESS", "requestId": "list"},
        {"type": "REVISION_FETCH", "requestId": "one"},
        {"type": "REVISION_FETCH_FAILURE", "requestId": "one", "error": {"message": "timeout"}},
    ]);
    let actions: Vec<RevisionsAction> = serde_json::from_value(log)?;
    for action in actions {
        store.send(action).await?;
    }

    let state = store.state(Clone::clone).await;
    assert_eq!(
        serde_json::to_value(&state.requests)?,
        json!({
            "list": {"loading": false, "error": null},
            "one": {"loading": false, "error": {"message": "timeout"}},
        })
    );
    assert_eq!(state.revision_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_fetches_are_tracked_separately() -> anyhow::Result<()> {
    let store = store();

    let handles: Vec<_> = (0..10u64)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move {
                let request_id = RequestId::new(format!("revision-{n}"));
                store
                    .send(RevisionsAction::FetchRevision { request_id: request_id.clone() })
                    .await?;
                store
                    .send(RevisionsAction::RevisionReceived { revision: Revision::new(n) })
                    .await?;
                store
                    .send(RevisionsAction::FetchRevisionSuccess { request_id })
                    .await?;
                Ok::<_, normandy_runtime::StoreError>(())
            })
        })
        .collect();

    for handle in handles {
        handle.await??;
    }

    let state = store.state(Clone::clone).await;
    assert_eq!(state.revision_count(), 10);
    assert_eq!(state.requests.len(), 10);
    assert!(state.requests.values().all(|status| *status == RequestStatus::Succeeded));
    Ok(())
}
