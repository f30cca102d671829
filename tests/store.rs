// Store tests against the live mock server.
// Checks cache-state transitions, the stale flag, and subscription delivery.

mod support;

use std::sync::{Arc, Mutex};

use postdeck::api::{ApiClient, NewPost, Post};
use postdeck::store::{CacheSlice, PostStore, Subscription};

fn store_for(base: &str) -> Arc<PostStore> {
    PostStore::new(ApiClient::new(base).unwrap())
}

fn record_transitions(store: &Arc<PostStore>) -> (Arc<Mutex<Vec<CacheSlice>>>, Subscription) {
    let states = Arc::new(Mutex::new(Vec::new()));
    let captured = states.clone();
    let sub = store.subscribe(move |slice| {
        captured.lock().unwrap().push(slice.clone());
    });
    (states, sub)
}

#[tokio::test]
async fn first_reload_transitions_loading_then_success() {
    let base = support::spawn(vec![support::post(1, "A", "x")]).await;
    let store = store_for(&base);
    let (states, _sub) = record_transitions(&store);

    store.reload().await.unwrap();

    let states = states.lock().unwrap();
    assert_eq!(states.len(), 2);
    assert!(states[0].query.is_loading());
    assert!(states[1].query.is_success());
    assert_eq!(states[1].query.data().unwrap().len(), 1);
    assert!(!states[1].stale);
}

#[tokio::test]
async fn second_reload_is_a_refetch_keeping_data() {
    let base = support::spawn(vec![support::post(1, "A", "x")]).await;
    let store = store_for(&base);
    store.reload().await.unwrap();

    let (states, _sub) = record_transitions(&store);
    store.reload().await.unwrap();

    let states = states.lock().unwrap();
    assert!(states[0].query.is_fetching());
    assert!(!states[0].query.is_loading());
    // Previous data stays visible during the refetch.
    assert_eq!(states[0].query.data().unwrap().len(), 1);
}

#[tokio::test]
async fn mutation_marks_slice_stale_without_refetching() {
    let base = support::spawn(vec![support::post(1, "A", "x")]).await;
    let store = store_for(&base);
    store.reload().await.unwrap();

    store
        .create(NewPost::new(Some(2), "poster", "me"))
        .await
        .unwrap();

    let slice = store.snapshot();
    assert!(slice.stale);
    // The cached list is untouched until the next reload.
    assert_eq!(slice.query.data().unwrap().len(), 1);

    store.reload().await.unwrap();
    let slice = store.snapshot();
    assert!(!slice.stale);
    assert_eq!(slice.query.data().unwrap().len(), 2);
}

#[tokio::test]
async fn update_replaces_fields_atomically() {
    let base = support::spawn(vec![
        support::post(1, "A", "x"),
        support::post(2, "poster", "me"),
    ])
    .await;
    let store = store_for(&base);

    store
        .update(Post {
            id: 2,
            title: "Updated".to_string(),
            author: "me Updated".to_string(),
        })
        .await
        .unwrap();
    store.reload().await.unwrap();

    let slice = store.snapshot();
    let posts = slice.query.data().unwrap();
    assert_eq!(posts[0].title, "A");
    assert_eq!(posts[1].title, "Updated");
    assert_eq!(posts[1].author, "me Updated");
}

#[tokio::test]
async fn delete_then_reload_excludes_id() {
    let base = support::spawn(vec![
        support::post(1, "A", "x"),
        support::post(2, "poster", "me"),
    ])
    .await;
    let store = store_for(&base);

    store.delete(2).await.unwrap();
    store.reload().await.unwrap();

    let slice = store.snapshot();
    let posts = slice.query.data().unwrap();
    assert!(posts.iter().all(|post| post.id != 2));
}

#[tokio::test]
async fn reload_against_dead_backend_settles_error() {
    let store = store_for("http://127.0.0.1:1");
    let (states, _sub) = record_transitions(&store);

    assert!(store.reload().await.is_err());

    let states = states.lock().unwrap();
    assert!(states[0].query.is_loading());
    assert!(states[1].query.error().is_some());
}

#[tokio::test]
async fn failed_mutation_leaves_slice_fresh() {
    let base = support::spawn(vec![support::post(1, "A", "x")]).await;
    let store = store_for(&base);
    store.reload().await.unwrap();

    assert!(store.delete(99).await.is_err());

    let slice = store.snapshot();
    assert!(!slice.stale);
    assert_eq!(slice.query.data().unwrap().len(), 1);
}
