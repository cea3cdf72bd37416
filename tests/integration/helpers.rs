use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use gatekey::domain::repository::{
    NotificationPort, OtpCache, SessionStore, TokenRepository, UserRepository,
};
use gatekey::domain::types::{
    OtpCheck, OtpRecord, PendingLoginSession, User, UserChanges, generate_otp,
};
use gatekey::error::AuthServiceError;
use gatekey::password::hash_password;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the internal user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn create(&self, user: &User) -> Result<(), AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthServiceError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(ref email) = changes.email {
            if users.iter().any(|u| u.email == *email && u.id != id) {
                return Err(AuthServiceError::DuplicateEmail);
            }
        }
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(ref username) = changes.username {
            user.username = username.clone();
        }
        if let Some(ref email) = changes.email {
            user.email = email.clone();
        }
        if let Some(ref password_hash) = changes.password_hash {
            user.password_hash = password_hash.clone();
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AuthServiceError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── MockOtpCache ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOtpCache {
    pub records: Arc<Mutex<HashMap<String, OtpRecord>>>,
}

impl MockOtpCache {
    pub fn empty() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Pre-seed a record, e.g. one aged past the validity window.
    pub fn with_record(email: &str, record: OtpRecord) -> Self {
        let cache = Self::empty();
        cache
            .records
            .lock()
            .unwrap()
            .insert(email.to_owned(), record);
        cache
    }

    pub fn records_handle(&self) -> Arc<Mutex<HashMap<String, OtpRecord>>> {
        Arc::clone(&self.records)
    }
}

impl OtpCache for MockOtpCache {
    async fn issue(&self, email: &str, now: i64) -> Result<String, AuthServiceError> {
        let code = generate_otp();
        self.records.lock().unwrap().insert(
            email.to_owned(),
            OtpRecord {
                code: code.clone(),
                issued_at: now,
            },
        );
        Ok(code)
    }

    async fn verify(
        &self,
        email: &str,
        candidate: &str,
        now: i64,
    ) -> Result<OtpCheck, AuthServiceError> {
        let mut records = self.records.lock().unwrap();
        let Some(record) = records.get(email) else {
            return Ok(OtpCheck::NotFound);
        };
        let outcome = record.check(candidate, now);
        if matches!(outcome, OtpCheck::Ok | OtpCheck::Expired) {
            records.remove(email);
        }
        Ok(outcome)
    }
}

// ── MockSessionStore ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockSessionStore {
    pub sessions: Arc<Mutex<HashMap<String, PendingLoginSession>>>,
}

impl MockSessionStore {
    pub fn empty() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_session(session_id: &str, session: PendingLoginSession) -> Self {
        let store = Self::empty();
        store
            .sessions
            .lock()
            .unwrap()
            .insert(session_id.to_owned(), session);
        store
    }

    pub fn sessions_handle(&self) -> Arc<Mutex<HashMap<String, PendingLoginSession>>> {
        Arc::clone(&self.sessions)
    }
}

impl SessionStore for MockSessionStore {
    async fn put(
        &self,
        session_id: &str,
        session: &PendingLoginSession,
    ) -> Result<(), AuthServiceError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.to_owned(), session.clone());
        Ok(())
    }

    async fn get(
        &self,
        session_id: &str,
    ) -> Result<Option<PendingLoginSession>, AuthServiceError> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn remove(&self, session_id: &str) -> Result<(), AuthServiceError> {
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }
}

// ── MockTokenRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockTokenRepo {
    pub tokens: Arc<Mutex<HashMap<Uuid, String>>>,
}

impl MockTokenRepo {
    pub fn empty() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_token(user_id: Uuid, token: &str) -> Self {
        let repo = Self::empty();
        repo.tokens
            .lock()
            .unwrap()
            .insert(user_id, token.to_owned());
        repo
    }
}

impl TokenRepository for MockTokenRepo {
    async fn issue_or_get(
        &self,
        user_id: Uuid,
        candidate: &str,
    ) -> Result<String, AuthServiceError> {
        let mut tokens = self.tokens.lock().unwrap();
        Ok(tokens
            .entry(user_id)
            .or_insert_with(|| candidate.to_owned())
            .clone())
    }

    async fn resolve(&self, token: &str) -> Result<Option<Uuid>, AuthServiceError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|(_, t)| t.as_str() == token)
            .map(|(user_id, _)| *user_id))
    }

    async fn revoke_for_user(&self, user_id: Uuid) -> Result<(), AuthServiceError> {
        self.tokens.lock().unwrap().remove(&user_id);
        Ok(())
    }
}

// ── RecordingNotifier ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl NotificationPort for RecordingNotifier {
    async fn send_otp(&self, email: &str, code: &str) -> Result<(), AuthServiceError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_owned(), code.to_owned()));
        Ok(())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_PASSWORD: &str = "Passw0rd!";

pub fn test_user() -> User {
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        username: "user1".to_owned(),
        email: "u1@example.com".to_owned(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        created_at: Utc::now(),
    }
}
