use chrono::{Duration, Utc};

use shutterbox_identity::usecase::session::{
    AuthenticateSessionUseCase, RevokeSessionUseCase, SweepSessionsUseCase, issue_session,
};

use crate::helpers::{MockSessionRepo, test_session};

const IDLE_TIMEOUT: i64 = 1800;

fn authenticate(sessions: MockSessionRepo) -> AuthenticateSessionUseCase<MockSessionRepo> {
    AuthenticateSessionUseCase {
        sessions,
        idle_timeout: Duration::seconds(IDLE_TIMEOUT),
    }
}

#[tokio::test]
async fn issued_session_authenticates() {
    let repo = MockSessionRepo::empty();
    let issued = issue_session(&repo, 7).await.unwrap();

    let uc = authenticate(repo);
    let session = uc.execute(&issued.id).await.unwrap().expect("live session");
    assert_eq!(session.user_id, 7);
}

#[tokio::test]
async fn authenticate_refreshes_last_accessed() {
    let mut stale = test_session(&"a".repeat(64), 7, "csrf");
    stale.last_accessed = Utc::now() - Duration::seconds(IDLE_TIMEOUT / 2);
    let id = stale.id.clone();

    let repo = MockSessionRepo::new(vec![stale]);
    let handle = repo.sessions_handle();

    authenticate(repo).execute(&id).await.unwrap().unwrap();

    let refreshed = handle.lock().unwrap()[0].last_accessed;
    assert!(Utc::now() - refreshed < Duration::seconds(5));
}

#[tokio::test]
async fn authenticate_rejects_empty_id() {
    let uc = authenticate(MockSessionRepo::empty());
    assert!(uc.execute("").await.unwrap().is_none());
    assert!(uc.execute("   ").await.unwrap().is_none());
}

#[tokio::test]
async fn authenticate_rejects_unknown_id() {
    let uc = authenticate(MockSessionRepo::empty());
    assert!(uc.execute(&"f".repeat(64)).await.unwrap().is_none());
}

#[tokio::test]
async fn authenticate_deletes_idle_expired_session() {
    let mut expired = test_session(&"a".repeat(64), 7, "csrf");
    expired.last_accessed = Utc::now() - Duration::seconds(IDLE_TIMEOUT + 60);
    let id = expired.id.clone();

    let repo = MockSessionRepo::new(vec![expired]);
    let handle = repo.sessions_handle();

    let result = authenticate(repo).execute(&id).await.unwrap();
    assert!(result.is_none(), "idle session must be rejected");
    assert!(
        handle.lock().unwrap().is_empty(),
        "idle session must be deleted, not revived"
    );
}

#[tokio::test]
async fn revoke_is_idempotent() {
    let session = test_session(&"a".repeat(64), 7, "csrf");
    let id = session.id.clone();

    let uc = RevokeSessionUseCase {
        sessions: MockSessionRepo::new(vec![session]),
    };

    assert!(uc.execute(&id).await.unwrap());
    assert!(!uc.execute(&id).await.unwrap(), "second revoke reports false");
}

#[tokio::test]
async fn sweep_deletes_only_sessions_past_cutoff() {
    let fresh = test_session(&"a".repeat(64), 1, "csrf");
    let mut old = test_session(&"b".repeat(64), 2, "csrf");
    old.last_accessed = Utc::now() - Duration::days(40);

    let repo = MockSessionRepo::new(vec![fresh, old]);
    let handle = repo.sessions_handle();

    let uc = SweepSessionsUseCase { sessions: repo };
    let count = uc.execute(Duration::days(30)).await.unwrap();

    assert_eq!(count, 1);
    let remaining = handle.lock().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, 1);
}
