use chrono::{Duration, Utc};

use shutterbox_identity::usecase::verify::{VerifyEmailInput, VerifyEmailUseCase};

use crate::helpers::{MockSessionRepo, MockUserRepo, unverified_user, verified_user};

fn input(email: &str, code: &str) -> VerifyEmailInput {
    VerifyEmailInput {
        email: email.to_owned(),
        code: code.to_owned(),
    }
}

#[tokio::test]
async fn should_activate_account_and_issue_session() {
    let user = unverified_user(1, "042917");
    let email = user.email.clone();

    let users = MockUserRepo::new(vec![user]);
    let users_handle = users.users_handle();
    let sessions = MockSessionRepo::empty();
    let sessions_handle = sessions.sessions_handle();

    let uc = VerifyEmailUseCase { users, sessions };

    let session = uc
        .execute(input(&email, "042917"))
        .await
        .unwrap()
        .expect("valid code should verify");

    assert_eq!(session.user_id, 1);
    assert_eq!(session.id.len(), 64);
    assert!(!session.csrf_token.is_empty());
    assert_ne!(session.id, session.csrf_token);

    // Consume-and-activate: verified set, code/expiry pair cleared.
    let stored = users_handle.lock().unwrap();
    assert!(stored[0].is_verified);
    assert!(stored[0].verification_code.is_none());
    assert!(stored[0].verification_expiry.is_none());

    assert_eq!(sessions_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_fail_closed_on_second_use_of_code() {
    let user = unverified_user(1, "042917");
    let email = user.email.clone();

    let uc = VerifyEmailUseCase {
        users: MockUserRepo::new(vec![user]),
        sessions: MockSessionRepo::empty(),
    };

    assert!(uc.execute(input(&email, "042917")).await.unwrap().is_some());
    let replay = uc.execute(input(&email, "042917")).await.unwrap();
    assert!(replay.is_none(), "a consumed code must not verify again");
}

#[tokio::test]
async fn should_fail_closed_on_wrong_code() {
    let user = unverified_user(1, "042917");
    let email = user.email.clone();

    let uc = VerifyEmailUseCase {
        users: MockUserRepo::new(vec![user]),
        sessions: MockSessionRepo::empty(),
    };

    let result = uc.execute(input(&email, "000000")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn should_fail_closed_on_expired_code() {
    let mut user = unverified_user(1, "042917");
    user.verification_expiry = Some(Utc::now() - Duration::minutes(1));
    let email = user.email.clone();

    let users = MockUserRepo::new(vec![user]);
    let users_handle = users.users_handle();

    let uc = VerifyEmailUseCase {
        users,
        sessions: MockSessionRepo::empty(),
    };

    let result = uc.execute(input(&email, "042917")).await.unwrap();
    assert!(result.is_none(), "expired code must not verify");

    // An expired attempt leaves the challenge untouched.
    let stored = users_handle.lock().unwrap();
    assert!(!stored[0].is_verified);
    assert!(stored[0].verification_code.is_some());
}

#[tokio::test]
async fn should_fail_closed_on_unknown_email() {
    let uc = VerifyEmailUseCase {
        users: MockUserRepo::empty(),
        sessions: MockSessionRepo::empty(),
    };

    let result = uc.execute(input("nobody@x.com", "042917")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn should_fail_closed_on_already_verified_account() {
    let user = verified_user(1);
    let email = user.email.clone();

    let uc = VerifyEmailUseCase {
        users: MockUserRepo::new(vec![user]),
        sessions: MockSessionRepo::empty(),
    };

    let result = uc.execute(input(&email, "042917")).await.unwrap();
    assert!(result.is_none());
}
