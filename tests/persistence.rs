//! Debounced persistence through a `FitnessSession` backed by `MemoryStore`.

use std::sync::Arc;
use std::time::Duration;

use fitness_intake::persist::{FlushOutcome, PendingChanges, SAVE_ERROR};
use fitness_intake::plans::Workout;
use fitness_intake::profile::{ProfileUpdate, UserProfile};
use fitness_intake::store::{MemoryStore, StoredData};
use fitness_intake::{FitnessConfig, FitnessSession};

/// Longer than the test autosave window.
const SETTLE: Duration = Duration::from_millis(500);

async fn session_with(store: &Arc<MemoryStore>) -> Arc<FitnessSession> {
    let session = FitnessSession::new(FitnessConfig::for_tests(), store.clone());
    session.load().await.unwrap();
    session
}

fn age(age: u32) -> ProfileUpdate {
    ProfileUpdate {
        age: Some(age),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn burst_of_updates_saves_once_with_final_state() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(&store).await;

    for value in [25, 26, 27] {
        session.update_profile(&age(value)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(store.write_counts().total(), 0);

    tokio::time::sleep(SETTLE).await;
    let counts = store.write_counts();
    assert_eq!(counts.save_profile, 1);
    assert_eq!(counts.total(), 1);
    assert_eq!(store.data().await.profile.unwrap().age, 27);

    let status = session.save_status().await;
    assert!(status.last_saved_at.is_some());
    assert!(status.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn load_itself_writes_nothing() {
    let store = Arc::new(MemoryStore::with_data(StoredData {
        profile: Some(UserProfile::with_name("Ana")),
        workouts: vec![Workout::new("A", "Segunda", vec![])],
        diet: None,
    }));
    let session = session_with(&store).await;
    tokio::time::sleep(SETTLE).await;

    assert_eq!(store.write_counts().total(), 0);
    assert!(session.status().await.pending.is_empty());
}

#[tokio::test(start_paused = true)]
async fn regeneration_flushes_both_categories_together() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(&store).await;

    session
        .update_profile(&ProfileUpdate {
            training_days_per_week: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    tokio::time::sleep(SETTLE).await;

    let counts = store.write_counts();
    assert_eq!(counts.save_profile, 1);
    assert_eq!(counts.replace_workouts, 1);
    assert_eq!(counts.save_diet_plan, 0);
    assert_eq!(store.data().await.workouts, session.workouts().await);
}

#[tokio::test(start_paused = true)]
async fn failed_flush_keeps_changes_for_next_save() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(&store).await;
    store.set_fail_writes(true);

    session.update_profile(&age(33)).await.unwrap();
    tokio::time::sleep(SETTLE).await;

    let status = session.status().await;
    assert_eq!(status.save.error.as_deref(), Some(SAVE_ERROR));
    assert!(!status.save.is_saving);
    assert!(status.pending.personal_info);
    assert!(store.data().await.profile.is_none());

    store.set_fail_writes(false);
    let outcome = session.save_now().await;
    assert!(matches!(outcome, FlushOutcome::Saved(_)));
    assert_eq!(store.data().await.profile.unwrap().age, 33);
    assert!(session.status().await.save.error.is_none());
}

#[tokio::test(start_paused = true)]
async fn unauthenticated_session_keeps_everything_local() {
    let store = Arc::new(MemoryStore::new());
    store.set_authenticated(false);
    let session = session_with(&store).await;

    session.update_profile(&age(41)).await.unwrap();
    tokio::time::sleep(SETTLE).await;

    assert_eq!(store.write_counts().total(), 0);
    assert_eq!(session.profile().await.age, 41);
    assert_eq!(
        session.status().await.pending,
        PendingChanges {
            personal_info: true,
            ..Default::default()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn reload_discards_pending_changes() {
    let store = Arc::new(MemoryStore::with_data(StoredData {
        profile: Some(UserProfile::with_name("Bia")),
        ..Default::default()
    }));
    let session = session_with(&store).await;

    session.update_profile(&age(50)).await.unwrap();
    session.reload().await.unwrap();
    tokio::time::sleep(SETTLE).await;

    assert_eq!(store.write_counts().total(), 0);
    let profile = session.profile().await;
    assert_eq!(profile.name, "Bia");
    assert_eq!(profile.age, 0);
}

#[tokio::test]
async fn save_now_writes_all_categories() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(&store).await;

    let outcome = session.save_now().await;
    assert_eq!(outcome, FlushOutcome::Saved(PendingChanges::all(false)));
    let counts = store.write_counts();
    assert_eq!(counts.save_profile, 1);
    assert_eq!(counts.replace_workouts, 1);
    assert_eq!(counts.save_diet_plan, 0);
}
