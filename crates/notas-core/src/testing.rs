//! In-process fake of the remote note service for gateway and auth tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::models::{Note, NoteId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct RemoteState {
    notes: Vec<Note>,
    next_id: i64,
    users: HashMap<String, String>,
    issued_tokens: Vec<String>,
    require_auth: bool,
    fail_status: Option<u16>,
    malformed: bool,
    bare_auth_failures: bool,
    requests: Vec<RecordedRequest>,
}

impl RemoteState {
    fn record(
        &mut self,
        method: &'static str,
        path: String,
        headers: &HeaderMap,
        body: Option<&Value>,
    ) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        self.requests.push(RecordedRequest {
            method,
            path,
            authorization,
            body: body.cloned(),
        });
    }

    fn reject(&self, headers: &HeaderMap) -> Option<Response> {
        if let Some(status) = self.fail_status {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return Some((status, Json(json!({"message": "Injected failure"}))).into_response());
        }
        if self.require_auth {
            let presented = headers
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "));
            let accepted = presented.is_some_and(|token| self.issued_tokens.iter().any(|t| t == token));
            if !accepted {
                return Some(
                    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"})))
                        .into_response(),
                );
            }
        }
        None
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.notes.iter().position(|note| note.id.get() == id)
    }
}

/// Fake remote service; clones share state with the running server.
#[derive(Clone, Default)]
pub struct FakeRemote {
    state: Arc<Mutex<RemoteState>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        let remote = Self::default();
        remote.lock().next_id = 1;
        remote
    }

    fn lock(&self) -> MutexGuard<'_, RemoteState> {
        self.state.lock().expect("fake remote state poisoned")
    }

    pub fn with_user(self, username: &str, password: &str) -> Self {
        self.lock()
            .users
            .insert(username.to_string(), password.to_string());
        self
    }

    pub fn requiring_auth(self) -> Self {
        self.lock().require_auth = true;
        self
    }

    pub fn seed(&self, title: &str, body: &str, completed: bool) -> Note {
        let mut state = self.lock();
        let note = Note {
            id: NoteId::new(state.next_id),
            title: title.to_string(),
            body: body.to_string(),
            completed,
        };
        state.next_id += 1;
        state.notes.push(note.clone());
        note
    }

    pub fn fail_with(&self, status: u16) {
        self.lock().fail_status = Some(status);
    }

    pub fn clear_failure(&self) {
        self.lock().fail_status = None;
    }

    pub fn serve_malformed(&self) {
        self.lock().malformed = true;
    }

    pub fn bare_auth_failures(&self) {
        self.lock().bare_auth_failures = true;
    }

    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.lock()
            .requests
            .last()
            .cloned()
            .expect("no request recorded")
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.lock().users.contains_key(username)
    }

    /// Serve on an ephemeral local port; returns the API base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake remote");
        let addr = listener.local_addr().expect("fake remote address");
        let router = Router::new().nest("/api", self.router());
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("fake remote server");
        });
        format!("http://{addr}/api")
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/tareas", get(list_notes).post(create_note))
            .route(
                "/tareas/{id}",
                get(get_note).put(update_note).delete(delete_note),
            )
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .with_state(self.clone())
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/api")
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Tarea no encontrada"})),
    )
        .into_response()
}

async fn list_notes(State(remote): State<FakeRemote>, headers: HeaderMap) -> Response {
    let mut state = remote.lock();
    state.record("GET", "/tareas".to_string(), &headers, None);
    if let Some(response) = state.reject(&headers) {
        return response;
    }
    if state.malformed {
        return Json(json!([{"id": 1, "titulo": "missing fields"}])).into_response();
    }
    Json(state.notes.clone()).into_response()
}

async fn get_note(
    State(remote): State<FakeRemote>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let mut state = remote.lock();
    state.record("GET", format!("/tareas/{id}"), &headers, None);
    if let Some(response) = state.reject(&headers) {
        return response;
    }
    state
        .position(id)
        .map_or_else(not_found, |index| Json(state.notes[index].clone()).into_response())
}

async fn create_note(
    State(remote): State<FakeRemote>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = remote.lock();
    state.record("POST", "/tareas".to_string(), &headers, Some(&body));
    if let Some(response) = state.reject(&headers) {
        return response;
    }
    let title = body["titulo"].as_str().unwrap_or_default().to_string();
    if title.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "titulo is required"})),
        )
            .into_response();
    }
    let note = Note {
        id: NoteId::new(state.next_id),
        title,
        body: body["descripcion"].as_str().unwrap_or_default().to_string(),
        completed: body["completada"].as_bool().unwrap_or(false),
    };
    state.next_id += 1;
    state.notes.push(note.clone());
    (StatusCode::CREATED, Json(note)).into_response()
}

async fn update_note(
    State(remote): State<FakeRemote>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = remote.lock();
    state.record("PUT", format!("/tareas/{id}"), &headers, Some(&body));
    if let Some(response) = state.reject(&headers) {
        return response;
    }
    let Some(index) = state.position(id) else {
        return not_found();
    };
    let note = &mut state.notes[index];
    if let Some(title) = body["titulo"].as_str() {
        note.title = title.to_string();
    }
    if let Some(description) = body["descripcion"].as_str() {
        note.body = description.to_string();
    }
    if let Some(completed) = body["completada"].as_bool() {
        note.completed = completed;
    }
    Json(note.clone()).into_response()
}

async fn delete_note(
    State(remote): State<FakeRemote>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let mut state = remote.lock();
    state.record("DELETE", format!("/tareas/{id}"), &headers, None);
    if let Some(response) = state.reject(&headers) {
        return response;
    }
    let Some(index) = state.position(id) else {
        return not_found();
    };
    state.notes.remove(index);
    StatusCode::NO_CONTENT.into_response()
}

async fn login(
    State(remote): State<FakeRemote>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = remote.lock();
    state.record("POST", "/auth/login".to_string(), &headers, Some(&body));
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if state.users.get(username).map(String::as_str) != Some(password) {
        if state.bare_auth_failures {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Credenciales inválidas"})),
        )
            .into_response();
    }
    let token = format!("token-{}", state.issued_tokens.len() + 1);
    state.issued_tokens.push(token.clone());
    Json(json!({"token": token, "user": {"username": username}})).into_response()
}

async fn register(
    State(remote): State<FakeRemote>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = remote.lock();
    state.record("POST", "/auth/register".to_string(), &headers, Some(&body));
    let username = body["username"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    if state.users.contains_key(&username) {
        if state.bare_auth_failures {
            return StatusCode::CONFLICT.into_response();
        }
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "User already exists"})),
        )
            .into_response();
    }
    state.users.insert(username, password);
    (
        StatusCode::CREATED,
        Json(json!({"message": "User registered"})),
    )
        .into_response()
}
