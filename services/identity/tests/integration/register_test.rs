use shutterbox_identity::error::IdentityError;
use shutterbox_identity::password::verify_password;
use shutterbox_identity::usecase::register::{RegisterInput, RegisterUseCase};

use crate::helpers::{
    FailingNotifier, MockUserRepo, RecordingNotifier, test_policy, verified_user,
};

fn input(username: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_create_unverified_account() {
    let repo = MockUserRepo::empty();
    let users_handle = repo.users_handle();
    let notifier = RecordingNotifier::new();
    let sent_handle = notifier.sent_handle();

    let uc = RegisterUseCase {
        users: repo,
        notifier,
        policy: test_policy(),
    };

    let user = uc
        .execute(input("alice", "a@x.com", "Passw0rd"))
        .await
        .unwrap();

    assert!(!user.is_verified);
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "a@x.com");
    assert!(user.id > 0, "store should assign the id");

    let stored = users_handle.lock().unwrap();
    let stored = &stored[0];
    let code = stored.verification_code.as_deref().expect("code set");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert!(stored.verification_expiry.is_some());
    assert!(
        verify_password("Passw0rd", &stored.password_hash),
        "stored hash should match the password"
    );

    let sent = sent_handle.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, "verification");
    assert_eq!(sent[0].email, "a@x.com");
    assert_eq!(sent[0].username, "alice");
    assert_eq!(sent[0].secret, code);
}

#[tokio::test]
async fn should_reject_invalid_username() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
        notifier: RecordingNotifier::new(),
        policy: test_policy(),
    };

    let result = uc.execute(input("a!", "a@x.com", "Passw0rd")).await;
    assert!(
        matches!(result, Err(IdentityError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_invalid_email() {
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
        notifier: RecordingNotifier::new(),
        policy: test_policy(),
    };

    let result = uc.execute(input("alice", "not-an-email", "Passw0rd")).await;
    assert!(
        matches!(result, Err(IdentityError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_password_without_uppercase() {
    // Other fields are fine; only the policy violation should matter.
    let uc = RegisterUseCase {
        users: MockUserRepo::empty(),
        notifier: RecordingNotifier::new(),
        policy: test_policy(),
    };

    let result = uc.execute(input("alice", "a@x.com", "passw0rd")).await;
    assert!(
        matches!(result, Err(IdentityError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_duplicate_email() {
    let existing = verified_user(1);
    let email = existing.email.clone();

    let uc = RegisterUseCase {
        users: MockUserRepo::new(vec![existing]),
        notifier: RecordingNotifier::new(),
        policy: test_policy(),
    };

    let result = uc.execute(input("newname", &email, "Passw0rd")).await;
    assert!(
        matches!(result, Err(IdentityError::Conflict(_))),
        "expected Conflict, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_duplicate_username() {
    let existing = verified_user(1);
    let username = existing.username.clone();

    let uc = RegisterUseCase {
        users: MockUserRepo::new(vec![existing]),
        notifier: RecordingNotifier::new(),
        policy: test_policy(),
    };

    let result = uc
        .execute(input(&username, "fresh@x.com", "Passw0rd"))
        .await;
    assert!(
        matches!(result, Err(IdentityError::Conflict(_))),
        "expected Conflict, got {result:?}"
    );
}

#[tokio::test]
async fn should_register_even_when_notification_fails() {
    let repo = MockUserRepo::empty();
    let users_handle = repo.users_handle();

    let uc = RegisterUseCase {
        users: repo,
        notifier: FailingNotifier,
        policy: test_policy(),
    };

    let user = uc
        .execute(input("alice", "a@x.com", "Passw0rd"))
        .await
        .expect("mail outage must not fail registration");

    assert!(!user.is_verified);
    assert_eq!(users_handle.lock().unwrap().len(), 1);
}
