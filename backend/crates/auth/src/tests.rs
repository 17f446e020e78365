//! In-memory store and end-to-end tests of the auth flows

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use kernel::id::{AdminId, UserId};
use platform::client::ClientInfo;
use platform::config::SeedConfig;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::application::admin::{AdminMeUseCase, AdminSignInUseCase, AuthenticateAdminUseCase};
use crate::application::app::{
    AuthenticateUserUseCase, SignUpUseCase, UserMeUseCase, UserSignInUseCase, UserSignOutUseCase,
};
use crate::application::config::AuthConfig;
use crate::application::input::{SignInInput, SignUpInput};
use crate::domain::entity::{
    admin::Admin, admin_session::AdminSession, user::User, user_session::UserSession,
};
use crate::domain::repository::{
    AdminRepository, AdminSessionRepository, TransactionScope, UserRepository,
    UserSessionRepository,
};
use crate::domain::value_object::{email_address::EmailAddress, session_token::SessionToken};
use crate::error::{AuthError, AuthResult};
use crate::presentation::router::{admin_router, app_router};
use crate::seeder::seed_default_admin;

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Clone, Default)]
struct Tables {
    admins: Vec<Admin>,
    users: Vec<User>,
    admin_sessions: Vec<AdminSession>,
    user_sessions: Vec<UserSession>,
}

#[derive(Debug)]
struct TxState {
    base: Tables,
    working: Mutex<Tables>,
}

/// Store with snapshot transactions
///
/// A transaction works on a copy of the committed tables; commit merges the
/// copy back and re-checks email uniqueness against what others committed
/// in the meantime.
#[derive(Debug, Clone, Default)]
struct MemoryStore {
    committed: Arc<Mutex<Tables>>,
    tx: Option<Arc<TxState>>,
    fail_user_session_create: Arc<AtomicBool>,
}

impl MemoryStore {
    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        match &self.tx {
            Some(tx) => f(&mut tx.working.lock().unwrap()),
            None => f(&mut self.committed.lock().unwrap()),
        }
    }

    fn user_count(&self) -> usize {
        self.committed.lock().unwrap().users.len()
    }

    fn user_session_count(&self) -> usize {
        self.committed.lock().unwrap().user_sessions.len()
    }

    fn admin_count(&self) -> usize {
        self.committed.lock().unwrap().admins.len()
    }
}

/// Apply a transaction's inserts, updates and deletes onto `committed`
fn merge<T: Clone>(committed: &mut Vec<T>, base: &[T], staged: &[T], key: impl Fn(&T) -> Uuid) {
    committed.retain(|row| {
        let k = key(row);
        let deleted = base.iter().any(|b| key(b) == k) && !staged.iter().any(|s| key(s) == k);
        !deleted
    });

    for row in staged {
        match committed.iter_mut().find(|c| key(c) == key(row)) {
            Some(existing) => *existing = row.clone(),
            None => committed.push(row.clone()),
        }
    }
}

impl TransactionScope for MemoryStore {
    type Tx = MemoryStore;

    async fn begin(&self) -> AuthResult<MemoryStore> {
        let snapshot = self.committed.lock().unwrap().clone();
        Ok(MemoryStore {
            committed: self.committed.clone(),
            tx: Some(Arc::new(TxState {
                base: snapshot.clone(),
                working: Mutex::new(snapshot),
            })),
            fail_user_session_create: self.fail_user_session_create.clone(),
        })
    }

    async fn commit(&self, tx: MemoryStore) -> AuthResult<()> {
        let state = tx
            .tx
            .ok_or_else(|| AuthError::Internal("not in a transaction".to_string()))?;
        let staged = state.working.lock().unwrap().clone();
        let mut committed = self.committed.lock().unwrap();

        let new_users = staged
            .users
            .iter()
            .filter(|u| !state.base.users.iter().any(|b| b.id == u.id));
        for user in new_users {
            if committed
                .users
                .iter()
                .any(|c| c.email_address == user.email_address && c.id != user.id)
            {
                return Err(AuthError::Conflict("index_users_on_email_address".to_string()));
            }
        }

        merge(&mut committed.admins, &state.base.admins, &staged.admins, |a| a.id.into_uuid());
        merge(&mut committed.users, &state.base.users, &staged.users, |u| u.id.into_uuid());
        merge(
            &mut committed.admin_sessions,
            &state.base.admin_sessions,
            &staged.admin_sessions,
            |s| s.id.into_uuid(),
        );
        merge(
            &mut committed.user_sessions,
            &state.base.user_sessions,
            &staged.user_sessions,
            |s| s.id.into_uuid(),
        );
        Ok(())
    }

    async fn rollback(&self, _tx: MemoryStore) -> AuthResult<()> {
        Ok(())
    }
}

impl AdminRepository for MemoryStore {
    async fn find_by_id(&self, id: AdminId) -> AuthResult<Option<Admin>> {
        Ok(self.with_tables(|t| t.admins.iter().find(|a| a.id == id).cloned()))
    }

    async fn find_by_email_address(&self, email: &EmailAddress) -> AuthResult<Option<Admin>> {
        Ok(self.with_tables(|t| t.admins.iter().find(|a| &a.email_address == email).cloned()))
    }

    async fn exists_by_email_address(&self, email: &EmailAddress) -> AuthResult<bool> {
        Ok(self.with_tables(|t| t.admins.iter().any(|a| &a.email_address == email)))
    }

    async fn create(&self, admin: &Admin) -> AuthResult<()> {
        self.with_tables(|t| {
            if t.admins.iter().any(|a| a.email_address == admin.email_address) {
                return Err(AuthError::Conflict("index_admins_on_email_address".to_string()));
            }
            t.admins.push(admin.clone());
            Ok(())
        })
    }

    async fn update(&self, admin: &mut Admin) -> AuthResult<()> {
        admin.timestamps.before_update();
        let admin = admin.clone();
        self.with_tables(|t| {
            if let Some(existing) = t.admins.iter_mut().find(|a| a.id == admin.id) {
                *existing = admin;
            }
        });
        Ok(())
    }
}

impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.with_tables(|t| t.users.iter().find(|u| u.id == id).cloned()))
    }

    async fn find_by_email_address(&self, email: &EmailAddress) -> AuthResult<Option<User>> {
        Ok(self.with_tables(|t| t.users.iter().find(|u| &u.email_address == email).cloned()))
    }

    async fn exists_by_email_address(&self, email: &EmailAddress) -> AuthResult<bool> {
        Ok(self.with_tables(|t| t.users.iter().any(|u| &u.email_address == email)))
    }

    async fn create(&self, user: &User) -> AuthResult<()> {
        self.with_tables(|t| {
            if t.users.iter().any(|u| u.email_address == user.email_address) {
                return Err(AuthError::Conflict("index_users_on_email_address".to_string()));
            }
            t.users.push(user.clone());
            Ok(())
        })
    }

    async fn update(&self, user: &mut User) -> AuthResult<()> {
        user.timestamps.before_update();
        let user = user.clone();
        self.with_tables(|t| {
            if let Some(existing) = t.users.iter_mut().find(|u| u.id == user.id) {
                *existing = user;
            }
        });
        Ok(())
    }
}

impl AdminSessionRepository for MemoryStore {
    async fn find_by_token(&self, token: &SessionToken) -> AuthResult<Option<AdminSession>> {
        Ok(self.with_tables(|t| t.admin_sessions.iter().find(|s| &s.token == token).cloned()))
    }

    async fn create(&self, session: &AdminSession) -> AuthResult<()> {
        self.with_tables(|t| t.admin_sessions.push(session.clone()));
        Ok(())
    }

    async fn delete_by_token(&self, token: &SessionToken) -> AuthResult<bool> {
        Ok(self.with_tables(|t| {
            let before = t.admin_sessions.len();
            t.admin_sessions.retain(|s| &s.token != token);
            t.admin_sessions.len() < before
        }))
    }
}

impl UserSessionRepository for MemoryStore {
    async fn find_by_token(&self, token: &SessionToken) -> AuthResult<Option<UserSession>> {
        Ok(self.with_tables(|t| t.user_sessions.iter().find(|s| &s.token == token).cloned()))
    }

    async fn create(&self, session: &UserSession) -> AuthResult<()> {
        if self.fail_user_session_create.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("session store unavailable".to_string()));
        }
        self.with_tables(|t| t.user_sessions.push(session.clone()));
        Ok(())
    }

    async fn delete_by_token(&self, token: &SessionToken) -> AuthResult<bool> {
        Ok(self.with_tables(|t| {
            let before = t.user_sessions.len();
            t.user_sessions.retain(|s| &s.token != token);
            t.user_sessions.len() < before
        }))
    }
}

// ============================================================================
// Helpers
// ============================================================================

const PASSWORD: &str = "correct horse battery";

fn client() -> ClientInfo {
    ClientInfo {
        ip: Some("203.0.113.7".parse().unwrap()),
        user_agent: "test-agent/1.0".to_string(),
    }
}

fn config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::default())
}

fn sign_up_input(email: &str) -> SignUpInput {
    SignUpInput {
        name: "Jane Doe".to_string(),
        email_address: email.to_string(),
        password: PASSWORD.to_string(),
        client: client(),
    }
}

fn sign_in_input(email: &str, password: &str) -> SignInInput {
    SignInInput {
        email_address: email.to_string(),
        password: password.to_string(),
        client: client(),
    }
}

fn sign_up_use_case(store: &MemoryStore) -> SignUpUseCase<MemoryStore, MemoryStore> {
    SignUpUseCase::new(Arc::new(store.clone()), Arc::new(store.clone()), config())
}

fn user_sign_in_use_case(store: &MemoryStore) -> UserSignInUseCase<MemoryStore, MemoryStore> {
    UserSignInUseCase::new(Arc::new(store.clone()), Arc::new(store.clone()), config())
}

fn authenticate_user(store: &MemoryStore) -> AuthenticateUserUseCase<MemoryStore, MemoryStore> {
    AuthenticateUserUseCase::new(Arc::new(store.clone()), Arc::new(store.clone()))
}

fn seed_config() -> SeedConfig {
    SeedConfig {
        admin_name: "Administrator".to_string(),
        admin_email_address: "admin@example.com".to_string(),
        admin_password: "change-me-on-first-login".to_string(),
    }
}

fn field_messages(err: &AuthError, field: &str) -> Vec<String> {
    match err {
        AuthError::Validation(errors) => errors.get(field).map(<[String]>::to_vec).unwrap_or_default(),
        other => panic!("expected validation error, got {:?}", other),
    }
}

// ============================================================================
// Use case tests
// ============================================================================

#[tokio::test]
async fn test_sign_up_creates_user_and_session() {
    let store = MemoryStore::default();

    let output = sign_up_use_case(&store)
        .execute(sign_up_input("jane@example.com"))
        .await
        .unwrap();

    assert_eq!(store.user_count(), 1);
    assert_eq!(store.user_session_count(), 1);

    let user = authenticate_user(&store)
        .execute(Some(output.session_token))
        .await
        .unwrap();
    assert_eq!(user.id, output.user_id);
    assert_eq!(user.email_address.as_str(), "jane@example.com");

    let session = store.committed.lock().unwrap().user_sessions[0].clone();
    assert_eq!(session.ip_address, "203.0.113.7");
    assert_eq!(session.user_agent, "test-agent/1.0");
}

#[tokio::test]
async fn test_sign_up_duplicate_email_is_field_error() {
    let store = MemoryStore::default();
    sign_up_use_case(&store)
        .execute(sign_up_input("jane@example.com"))
        .await
        .unwrap();

    let err = sign_up_use_case(&store)
        .execute(sign_up_input("JANE@example.com"))
        .await
        .unwrap_err();

    assert_eq!(
        field_messages(&err, "emailAddress"),
        vec!["email address already registered"]
    );
    assert_eq!(store.user_count(), 1);
    assert_eq!(store.user_session_count(), 1);
}

#[tokio::test]
async fn test_sign_up_merges_uniqueness_with_other_field_errors() {
    let store = MemoryStore::default();
    sign_up_use_case(&store)
        .execute(sign_up_input("jane@example.com"))
        .await
        .unwrap();

    let mut input = sign_up_input("jane@example.com");
    input.name = String::new();
    let err = sign_up_use_case(&store).execute(input).await.unwrap_err();

    assert_eq!(
        field_messages(&err, "emailAddress"),
        vec!["email address already registered"]
    );
    assert_eq!(
        field_messages(&err, "name"),
        vec!["name must be between 1 and 255 characters"]
    );
}

#[tokio::test]
async fn test_sign_up_is_atomic() {
    let store = MemoryStore::default();
    store.fail_user_session_create.store(true, Ordering::SeqCst);

    let err = sign_up_use_case(&store)
        .execute(sign_up_input("jane@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Internal(_)));
    assert_eq!(store.user_count(), 0);
    assert_eq!(store.user_session_count(), 0);
}

#[tokio::test]
async fn test_concurrent_sign_ups_same_email() {
    let store = MemoryStore::default();
    let first = sign_up_use_case(&store);
    let second = sign_up_use_case(&store);

    let (a, b) = tokio::join!(
        first.execute(sign_up_input("race@example.com")),
        second.execute(sign_up_input("race@example.com")),
    );

    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let err = results.into_iter().find_map(Result::err).unwrap();
    assert_eq!(
        field_messages(&err, "emailAddress"),
        vec!["email address already registered"]
    );
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_interleaved_transactions_conflict_on_commit() {
    let store = MemoryStore::default();
    let digest = platform::password::ClearTextPassword::new(PASSWORD.to_string())
        .unwrap()
        .hash(None)
        .unwrap();
    let email = EmailAddress::new("race@example.com").unwrap();

    let tx1 = store.begin().await.unwrap();
    let tx2 = store.begin().await.unwrap();
    UserRepository::create(&tx1, &User::new("A", email.clone(), digest.clone()))
        .await
        .unwrap();
    UserRepository::create(&tx2, &User::new("B", email, digest))
        .await
        .unwrap();

    store.commit(tx1).await.unwrap();
    assert!(matches!(store.commit(tx2).await, Err(AuthError::Conflict(_))));
    assert_eq!(store.user_count(), 1);
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let store = MemoryStore::default();
    sign_up_use_case(&store)
        .execute(sign_up_input("jane@example.com"))
        .await
        .unwrap();

    let wrong_password = user_sign_in_use_case(&store)
        .execute(sign_in_input("jane@example.com", "not the password"))
        .await
        .unwrap_err();
    let unknown_email = user_sign_in_use_case(&store)
        .execute(sign_in_input("nobody@example.com", PASSWORD))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_email, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_sign_in_requires_fields() {
    let store = MemoryStore::default();
    let err = user_sign_in_use_case(&store)
        .execute(sign_in_input("", ""))
        .await
        .unwrap_err();

    assert_eq!(field_messages(&err, "emailAddress"), vec!["email address is required"]);
    assert_eq!(field_messages(&err, "password"), vec!["password is required"]);
}

#[tokio::test]
async fn test_sign_in_round_trip_and_parallel_sessions() {
    let store = MemoryStore::default();
    let signed_up = sign_up_use_case(&store)
        .execute(sign_up_input("jane@example.com"))
        .await
        .unwrap();

    let signed_in = user_sign_in_use_case(&store)
        .execute(sign_in_input("Jane@Example.com", PASSWORD))
        .await
        .unwrap();
    assert_ne!(signed_in.session_token, signed_up.session_token);

    // Both sessions stay valid
    for token in [signed_up.session_token, signed_in.session_token] {
        let user = authenticate_user(&store).execute(Some(token)).await.unwrap();
        let me = UserMeUseCase.execute(Some(&user)).unwrap();
        assert_eq!(me.id, signed_up.user_id);
        assert_eq!(me.name, "Jane Doe");
        assert_eq!(me.email_address, "jane@example.com");
    }
}

#[tokio::test]
async fn test_sign_out_revokes_and_is_idempotent() {
    let store = MemoryStore::default();
    let output = sign_up_use_case(&store)
        .execute(sign_up_input("jane@example.com"))
        .await
        .unwrap();
    let sign_out = UserSignOutUseCase::new(Arc::new(store.clone()));

    sign_out.execute(&output.session_token).await.unwrap();
    sign_out.execute(&output.session_token).await.unwrap();

    let err = authenticate_user(&store)
        .execute(Some(output.session_token))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized));
    assert_eq!(store.user_session_count(), 0);
}

#[tokio::test]
async fn test_authenticate_without_token_or_principal() {
    let store = MemoryStore::default();
    assert!(matches!(
        authenticate_user(&store).execute(None).await,
        Err(AuthError::Unauthorized)
    ));

    // Session whose user no longer exists
    let orphan = UserSession::new(UserId::new(), &client());
    UserSessionRepository::create(&store, &orphan).await.unwrap();
    assert!(matches!(
        authenticate_user(&store).execute(Some(orphan.token)).await,
        Err(AuthError::Unauthorized)
    ));
}

#[test]
fn test_me_without_principal() {
    assert!(matches!(UserMeUseCase.execute(None), Err(AuthError::Unauthorized)));
    assert!(matches!(AdminMeUseCase.execute(None), Err(AuthError::Unauthorized)));
}

#[tokio::test]
async fn test_seed_default_admin_is_idempotent() {
    let store = MemoryStore::default();

    assert!(seed_default_admin(&store, &seed_config(), None).await.unwrap());
    assert!(!seed_default_admin(&store, &seed_config(), None).await.unwrap());
    assert_eq!(store.admin_count(), 1);
}

#[tokio::test]
async fn test_admin_sign_in_with_seeded_admin() {
    let store = MemoryStore::default();
    seed_default_admin(&store, &seed_config(), None).await.unwrap();

    let output = AdminSignInUseCase::new(Arc::new(store.clone()), Arc::new(store.clone()), config())
        .execute(sign_in_input("admin@example.com", "change-me-on-first-login"))
        .await
        .unwrap();

    let admin = AuthenticateAdminUseCase::new(Arc::new(store.clone()), Arc::new(store.clone()))
        .execute(Some(output.session_token))
        .await
        .unwrap();
    assert_eq!(admin.name, "Administrator");
}

#[tokio::test]
async fn test_update_refreshes_updated_at() {
    let store = MemoryStore::default();
    sign_up_use_case(&store)
        .execute(sign_up_input("jane@example.com"))
        .await
        .unwrap();
    let email = EmailAddress::new("jane@example.com").unwrap();
    let mut user = UserRepository::find_by_email_address(&store, &email)
        .await
        .unwrap()
        .unwrap();
    let before = user.timestamps.updated_at;
    std::thread::sleep(std::time::Duration::from_millis(2));

    user.name = "Jane Roe".to_string();
    UserRepository::update(&store, &mut user).await.unwrap();

    let stored = UserRepository::find_by_id(&store, user.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Jane Roe");
    assert!(stored.timestamps.updated_at > before);
    assert_eq!(stored.timestamps.created_at, user.timestamps.created_at);
}

// ============================================================================
// HTTP tests
// ============================================================================

fn router(store: &MemoryStore) -> Router {
    Router::new()
        .nest("/api/v1/admin", admin_router(store.clone(), AuthConfig::default()))
        .nest("/api/v1/app", app_router(store.clone(), AuthConfig::default()))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_cookie(method: &str, uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// `name=value` part of the Set-Cookie header
fn cookie_pair(headers: &HeaderMap) -> String {
    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn sign_up_body(email: &str) -> Value {
    json!({"name": "Jane Doe", "emailAddress": email, "password": PASSWORD})
}

#[tokio::test]
async fn test_http_sign_up_then_me() {
    let store = MemoryStore::default();
    let app = router(&store);

    let (status, headers, body) = send(
        &app,
        post_json("/api/v1/app/auth/signup", sign_up_body("jane@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"ok": true, "meta": null, "data": {"message": "ok"}, "errors": null})
    );
    let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("user_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));

    let cookie = cookie_pair(&headers);
    let (status, _, body) = send(&app, with_cookie("GET", "/api/v1/app/auth/me", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["data"]["user"]["name"], json!("Jane Doe"));
    assert_eq!(body["data"]["user"]["emailAddress"], json!("jane@example.com"));
    assert!(body["data"]["user"].get("password").is_none());
    assert!(body["errors"].is_null());
}

#[tokio::test]
async fn test_http_me_requires_session() {
    let store = MemoryStore::default();
    let app = router(&store);

    let (status, _, body) = send(
        &app,
        Request::get("/api/v1/app/auth/me").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({"ok": false, "meta": null, "data": null, "errors": {"message": "Unauthorized"}})
    );

    let (status, _, _) = send(
        &app,
        with_cookie("GET", "/api/v1/admin/auth/me", "admin_session=forged"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_http_sign_out_clears_cookie_and_revokes() {
    let store = MemoryStore::default();
    let app = router(&store);
    let (_, headers, _) = send(
        &app,
        post_json("/api/v1/app/auth/signup", sign_up_body("jane@example.com")),
    )
    .await;
    let cookie = cookie_pair(&headers);

    let (status, headers, body) =
        send(&app, with_cookie("POST", "/api/v1/app/auth/signout", &cookie)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    let cleared = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.starts_with("user_session=;"));
    assert!(cleared.contains("Max-Age=0"));

    let (status, _, _) = send(&app, with_cookie("GET", "/api/v1/app/auth/me", &cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _, _) = send(&app, with_cookie("POST", "/api/v1/app/auth/signout", &cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_http_sign_in_errors() {
    let store = MemoryStore::default();
    let app = router(&store);
    send(
        &app,
        post_json("/api/v1/app/auth/signup", sign_up_body("jane@example.com")),
    )
    .await;

    let (wrong_status, _, wrong_body) = send(
        &app,
        post_json(
            "/api/v1/app/auth/signin",
            json!({"emailAddress": "jane@example.com", "password": "wrong password!"}),
        ),
    )
    .await;
    let (unknown_status, _, unknown_body) = send(
        &app,
        post_json(
            "/api/v1/app/auth/signin",
            json!({"emailAddress": "ghost@example.com", "password": PASSWORD}),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["ok"], json!(false));
}

#[tokio::test]
async fn test_http_validation_and_malformed_json() {
    let store = MemoryStore::default();
    let app = router(&store);

    let (status, _, body) = send(
        &app,
        post_json("/api/v1/app/auth/signup", json!({"name": "Jane"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["ok"], json!(false));
    assert_eq!(
        body["errors"]["params"]["emailAddress"],
        json!(["email address is required"])
    );
    assert_eq!(body["errors"]["params"]["password"], json!(["password is required"]));

    let malformed = Request::post("/api/v1/app/auth/signin")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, body) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], json!(false));
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_http_admin_flow_and_cookie_separation() {
    let store = MemoryStore::default();
    seed_default_admin(&store, &seed_config(), None).await.unwrap();
    let app = router(&store);

    let (status, headers, _) = send(
        &app,
        post_json(
            "/api/v1/admin/auth/signin",
            json!({"emailAddress": "admin@example.com", "password": "change-me-on-first-login"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let cookie = cookie_pair(&headers);
    assert!(cookie.starts_with("admin_session="));

    let (status, _, body) = send(&app, with_cookie("GET", "/api/v1/admin/auth/me", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["admin"]["emailAddress"], json!("admin@example.com"));

    // An admin token is not a user session
    let token = cookie.trim_start_matches("admin_session=");
    let (status, _, _) = send(
        &app,
        with_cookie("GET", "/api/v1/app/auth/me", &format!("user_session={}", token)),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
