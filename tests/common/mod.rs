#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chamados_api::auth::PrivilegePolicy;
use chamados_api::backend::{BackendError, IdentityGateway, RecordStore};
use chamados_api::models::{AuthResponse, Chamado, NewChamado, User};
use chamados_api::{app, AppState};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::{json, Map, Value};
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@marido.com";

/// In-memory identity provider
#[derive(Default)]
pub struct FakeIdentity {
    accounts: Mutex<HashMap<String, (String, User)>>,
    tokens: Mutex<HashMap<String, User>>,
}

impl FakeIdentity {
    /// Register a user directly and hand back a valid token for it
    pub fn issue_token(&self, email: &str, role: Option<&str>) -> (String, User) {
        let mut app_metadata = Map::new();
        if let Some(role) = role {
            app_metadata.insert("role".to_string(), json!(role));
        }
        let user = User {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            user_metadata: Map::new(),
            app_metadata,
        };
        let token = format!("token-{}", Uuid::new_v4().simple());
        self.tokens.lock().unwrap().insert(token.clone(), user.clone());
        (token, user)
    }

    pub fn revoke(&self, token: &str) {
        self.tokens.lock().unwrap().remove(token);
    }
}

fn rejected(status: u16, message: &str) -> BackendError {
    BackendError::Provider {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl IdentityGateway for FakeIdentity {
    async fn sign_up(
        &self,
        nome: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthResponse, BackendError> {
        let email = email.ok_or_else(|| rejected(400, "Anonymous sign-ins are disabled"))?;
        let password = password.ok_or_else(|| rejected(400, "Signup requires a valid password"))?;
        if password.len() < 6 {
            return Err(rejected(422, "Password should be at least 6 characters."));
        }

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(rejected(422, "User already registered"));
        }

        let mut user_metadata = Map::new();
        if let Some(nome) = nome {
            user_metadata.insert("nome".to_string(), json!(nome));
        }
        let user = User {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            user_metadata,
            app_metadata: Map::new(),
        };
        accounts.insert(email.to_string(), (password.to_string(), user.clone()));

        Ok(AuthResponse::from_provider(serde_json::to_value(user).unwrap()))
    }

    async fn sign_in_with_password(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthResponse, BackendError> {
        let invalid = || rejected(400, "Invalid login credentials");
        let (email, password) = email.zip(password).ok_or_else(invalid)?;

        let user = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                Some((stored, user)) if stored == password => user.clone(),
                _ => return Err(invalid()),
            }
        };

        let token = format!("token-{}", Uuid::new_v4().simple());
        self.tokens.lock().unwrap().insert(token.clone(), user.clone());

        Ok(AuthResponse::from_provider(json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "refresh",
            "user": user,
        })))
    }

    async fn get_user(&self, token: &str) -> Result<User, BackendError> {
        self.tokens
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| rejected(401, "invalid JWT: unable to parse or verify signature"))
    }
}

/// In-memory chamados table shaped like PostgREST rows: a bigint `id`, text
/// columns coerced the way Postgres casts them, a nullable `status` column and
/// an offset-less `created_at` (a `timestamp` column). Each insert is one
/// second newer than the last.
pub struct FakeStore {
    rows: Mutex<Vec<Chamado>>,
    next_id: AtomicI64,
    failing: AtomicBool,
    epoch: NaiveDateTime,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            failing: AtomicBool::new(false),
            epoch: NaiveDate::from_ymd_opt(2024, 5, 1)
                .and_then(|d| d.and_hms_opt(12, 0, 0))
                .unwrap(),
        }
    }
}

impl FakeStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Chamado> {
        self.rows.lock().unwrap().clone()
    }

    /// Seed a row as another writer would have stored it
    pub fn push_row(&self, row: Value) {
        let row = serde_json::from_value(row).expect("row must be an object");
        self.rows.lock().unwrap().push(row);
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(rejected(503, "store offline"));
        }
        Ok(())
    }

    fn newest_first(mut rows: Vec<Chamado>) -> Vec<Chamado> {
        // Same fixed-width format for every row, so text order is time order
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        rows
    }
}

fn text_column(value: Option<Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::Null,
        Some(Value::String(s)) => Value::String(s),
        Some(other) => Value::String(other.to_string()),
    }
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn insert(&self, new: NewChamado) -> Result<Chamado, BackendError> {
        self.check()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created_at = self.epoch + Duration::seconds(n);

        let mut row = Map::new();
        row.insert("id".to_string(), json!(n));
        row.insert("titulo".to_string(), text_column(new.titulo));
        row.insert("descricao".to_string(), text_column(new.descricao));
        row.insert("usuario_id".to_string(), json!(new.usuario_id));
        row.insert(
            "created_at".to_string(),
            json!(created_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
        );
        row.insert("status".to_string(), Value::Null);

        let chamado = Chamado::from(row);
        self.rows.lock().unwrap().push(chamado.clone());
        Ok(chamado)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Chamado>, BackendError> {
        self.check()?;
        let rows = self
            .rows()
            .into_iter()
            .filter(|c| c.is_owned_by(owner))
            .collect();
        Ok(Self::newest_first(rows))
    }

    async fn list_all(&self) -> Result<Vec<Chamado>, BackendError> {
        self.check()?;
        Ok(Self::newest_first(self.rows()))
    }

    async fn delete_owned(&self, id: &str, owner: Uuid) -> Result<usize, BackendError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| !(c.id().map(id_text).as_deref() == Some(id) && c.is_owned_by(owner)));
        Ok(before - rows.len())
    }
}

pub struct TestApp {
    pub router: Router,
    pub identity: Arc<FakeIdentity>,
    pub store: Arc<FakeStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_policy(PrivilegePolicy::new([ADMIN_EMAIL], None), false)
    }

    pub fn strict() -> Self {
        Self::with_policy(PrivilegePolicy::new([ADMIN_EMAIL], None), true)
    }

    pub fn with_policy(policy: PrivilegePolicy, strict_validation: bool) -> Self {
        let identity = Arc::new(FakeIdentity::default());
        let store = Arc::new(FakeStore::default());
        let state = AppState::new(identity.clone(), store.clone(), policy)
            .with_strict_validation(strict_validation);

        Self {
            router: app(state),
            identity,
            store,
        }
    }

    /// Send a request with an optional raw `Authorization` header value
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        call(&self.router, method, uri, authorization, body).await
    }

    /// Send a request authenticated with `token`
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let header = token.map(|t| format!("Bearer {}", t));
        self.send_raw(method, uri, header.as_deref(), body).await
    }

    pub async fn create_chamado(&self, token: &str, titulo: &str, descricao: &str) -> Value {
        let (status, body) = self
            .send(
                Method::POST,
                "/chamados",
                Some(token),
                Some(json!({ "titulo": titulo, "descricao": descricao })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body
    }
}

/// Drive `router` with one request. A JSON body is sent with
/// `Content-Type: application/json`; no body means no content type at all.
pub async fn call(
    router: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    read_response(router.clone().oneshot(request).await.expect("router call")).await
}

/// Send an already-built request
pub async fn call_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    read_response(router.clone().oneshot(request).await.expect("router call")).await
}

async fn read_response(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, body)
}

pub fn id_segment(record: &Value) -> String {
    id_text(&record["id"])
}
