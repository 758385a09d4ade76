use chrono::{Duration, Utc};

use shutterbox_identity::error::IdentityError;
use shutterbox_identity::usecase::csrf::CsrfGuardUseCase;

use crate::helpers::{MockSessionRepo, test_session};

fn guard(sessions: MockSessionRepo) -> CsrfGuardUseCase<MockSessionRepo> {
    CsrfGuardUseCase {
        sessions,
        idle_timeout: Duration::seconds(1800),
    }
}

#[tokio::test]
async fn should_reject_missing_token_before_anything_else() {
    let uc = guard(MockSessionRepo::empty());

    let result = uc.execute(Some("some-session"), None).await;
    assert!(
        matches!(result, Err(IdentityError::Forbidden("CSRF token missing"))),
        "got {result:?}"
    );

    let result = uc.execute(Some("some-session"), Some("")).await;
    assert!(
        matches!(result, Err(IdentityError::Forbidden("CSRF token missing"))),
        "empty token counts as missing: {result:?}"
    );
}

#[tokio::test]
async fn should_reject_missing_session_cookie() {
    let uc = guard(MockSessionRepo::empty());

    let result = uc.execute(None, Some("token")).await;
    assert!(
        matches!(result, Err(IdentityError::Unauthorized("Not authenticated"))),
        "got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_session() {
    let uc = guard(MockSessionRepo::empty());

    let result = uc.execute(Some(&"a".repeat(64)), Some("token")).await;
    assert!(
        matches!(result, Err(IdentityError::Unauthorized("Invalid session"))),
        "got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_idle_expired_session_and_delete_it() {
    let mut session = test_session(&"a".repeat(64), 7, "secret");
    session.last_accessed = Utc::now() - Duration::hours(2);
    let id = session.id.clone();

    let repo = MockSessionRepo::new(vec![session]);
    let handle = repo.sessions_handle();

    let result = guard(repo).execute(Some(&id), Some("secret")).await;
    assert!(
        matches!(result, Err(IdentityError::Unauthorized("Invalid session"))),
        "got {result:?}"
    );
    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_mismatched_token() {
    let session = test_session(&"a".repeat(64), 7, "the-real-secret");
    let id = session.id.clone();

    let uc = guard(MockSessionRepo::new(vec![session]));

    let result = uc.execute(Some(&id), Some("not-the-secret")).await;
    assert!(
        matches!(result, Err(IdentityError::Forbidden("Invalid CSRF token"))),
        "got {result:?}"
    );
}

#[tokio::test]
async fn should_pass_with_matching_token() {
    let session = test_session(&"a".repeat(64), 7, "the-real-secret");
    let id = session.id.clone();

    let uc = guard(MockSessionRepo::new(vec![session]));

    let user_id = uc.execute(Some(&id), Some("the-real-secret")).await.unwrap();
    assert_eq!(user_id, 7);
}
