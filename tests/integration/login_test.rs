use gatekey::error::AuthServiceError;
use gatekey::usecase::login::{LoginInput, LoginUseCase};

use crate::helpers::{
    MockOtpCache, MockSessionStore, MockUserRepo, RecordingNotifier, TEST_PASSWORD, test_user,
};

fn login_usecase(
    users: MockUserRepo,
    otp_cache: MockOtpCache,
    sessions: MockSessionStore,
    notifier: RecordingNotifier,
) -> LoginUseCase<MockUserRepo, MockOtpCache, MockSessionStore, RecordingNotifier> {
    LoginUseCase {
        users,
        otp_cache,
        sessions,
        notifier,
    }
}

#[tokio::test]
async fn should_issue_otp_and_bind_session_on_valid_credentials() {
    let user = test_user();
    let cache = MockOtpCache::empty();
    let sessions = MockSessionStore::empty();
    let notifier = RecordingNotifier::new();

    let uc = login_usecase(
        MockUserRepo::new(vec![user.clone()]),
        cache.clone(),
        sessions.clone(),
        notifier.clone(),
    );
    let out = uc
        .execute(LoginInput {
            email: user.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();

    let records = cache.records_handle();
    let records = records.lock().unwrap();
    let record = records.get(&user.email).expect("otp record for email");
    assert_eq!(record.code.len(), 6);
    assert!(record.code.bytes().all(|b| b.is_ascii_digit()));

    let stored_sessions = sessions.sessions_handle();
    let stored_sessions = stored_sessions.lock().unwrap();
    let session = stored_sessions
        .get(&out.session_id)
        .expect("pending login session");
    assert_eq!(session.user_id, user.id);
    assert_eq!(session.otp, record.code, "session binds the issued code");

    let sent = notifier.sent_handle();
    let sent = sent.lock().unwrap();
    assert_eq!(sent.as_slice(), &[(user.email.clone(), record.code.clone())]);
}

#[tokio::test]
async fn repeated_logins_leave_exactly_one_record_matching_the_last_code() {
    let user = test_user();
    let cache = MockOtpCache::empty();
    let notifier = RecordingNotifier::new();

    let uc = login_usecase(
        MockUserRepo::new(vec![user.clone()]),
        cache.clone(),
        MockSessionStore::empty(),
        notifier.clone(),
    );
    for _ in 0..3 {
        uc.execute(LoginInput {
            email: user.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();
    }

    let records = cache.records_handle();
    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1, "last-write-wins: one live record");

    let sent = notifier.sent_handle();
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    let last_code = &sent.last().unwrap().1;
    assert_eq!(&records[&user.email].code, last_code);
}

#[tokio::test]
async fn should_reject_wrong_password_without_issuing_otp() {
    let user = test_user();
    let cache = MockOtpCache::empty();
    let notifier = RecordingNotifier::new();

    let uc = login_usecase(
        MockUserRepo::new(vec![user.clone()]),
        cache.clone(),
        MockSessionStore::empty(),
        notifier.clone(),
    );
    let result = uc
        .execute(LoginInput {
            email: user.email.clone(),
            password: "wrong-password".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
    assert!(cache.records_handle().lock().unwrap().is_empty());
    assert!(notifier.sent_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_email_is_indistinguishable_from_wrong_password() {
    let uc = login_usecase(
        MockUserRepo::empty(),
        MockOtpCache::empty(),
        MockSessionStore::empty(),
        RecordingNotifier::new(),
    );
    let result = uc
        .execute(LoginInput {
            email: "nobody@example.com".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AuthServiceError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}
