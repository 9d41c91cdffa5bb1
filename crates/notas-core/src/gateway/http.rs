//! `reqwest` implementation of the remote note gateway.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::wire::{excerpt, parse_api_error, server_message, Credentials, LoginResponse};
use super::{NoteGateway, RegisterConfirmation};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{NewNote, Note, NoteChanges, NoteId};
use crate::session::{BearerToken, Session};

const NOTES_PATH: &str = "/tareas";
const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";

const GENERIC_LOGIN_FAILURE: &str = "Invalid username or password";
const GENERIC_REGISTER_FAILURE: &str = "Could not create the account";

#[derive(Clone)]
pub struct HttpGateway {
    config: ClientConfig,
    client: Client,
    session: Session,
}

impl HttpGateway {
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|error| Error::Config(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            config,
            client,
            session,
        })
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Exchange credentials for a session token.
    ///
    /// The token is returned, not persisted.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<BearerToken> {
        let request = self
            .client
            .post(self.config.endpoint(LOGIN_PATH))
            .json(&Credentials {
                username: identifier,
                password: secret,
            });
        tracing::debug!("POST {}", LOGIN_PATH);

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Login rejected with HTTP {}", status.as_u16());
            return Err(Error::Auth(
                server_message(&body).unwrap_or_else(|| GENERIC_LOGIN_FAILURE.to_string()),
            ));
        }

        let payload: LoginResponse = decode(response).await?;
        BearerToken::new(payload.token)
            .map_err(|_| Error::Decode("login response carried an empty token".to_string()))
    }

    pub async fn register(&self, identifier: &str, secret: &str) -> Result<RegisterConfirmation> {
        let request = self
            .client
            .post(self.config.endpoint(REGISTER_PATH))
            .json(&Credentials {
                username: identifier,
                password: secret,
            });
        tracing::debug!("POST {}", REGISTER_PATH);

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!("Registration rejected with HTTP {}", status.as_u16());
            return Err(Error::Auth(
                server_message(&body).unwrap_or_else(|| GENERIC_REGISTER_FAILURE.to_string()),
            ));
        }
        Ok(RegisterConfirmation::from_body(&body))
    }

    fn note_path(id: NoteId) -> String {
        format!("{NOTES_PATH}/{id}")
    }

    /// Attach the session token when there is one.
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(match self.session.token()? {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        })
    }

    async fn send(&self, method: &str, path: &str, request: RequestBuilder) -> Result<Response> {
        let request = self.authorized(request)?;
        tracing::debug!("{} {}", method, path);

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("{} {} failed with HTTP {}", method, path, status.as_u16());
            return Err(Error::Transport {
                status: status.as_u16(),
                message: parse_api_error(status, &body),
            });
        }
        Ok(response)
    }
}

impl NoteGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<Note>> {
        let request = self.client.get(self.config.endpoint(NOTES_PATH));
        let response = self.send("GET", NOTES_PATH, request).await?;
        decode(response).await
    }

    async fn get(&self, id: NoteId) -> Result<Note> {
        let path = Self::note_path(id);
        let request = self.client.get(self.config.endpoint(&path));
        let response = self.send("GET", &path, request).await?;
        decode(response).await
    }

    async fn create(&self, title: &str, body: &str) -> Result<Note> {
        let request = self
            .client
            .post(self.config.endpoint(NOTES_PATH))
            .json(&NewNote::new(title, body));
        let response = self.send("POST", NOTES_PATH, request).await?;
        decode(response).await
    }

    async fn update(&self, id: NoteId, changes: &NoteChanges) -> Result<Note> {
        let path = Self::note_path(id);
        let request = self.client.put(self.config.endpoint(&path)).json(changes);
        let response = self.send("PUT", &path, request).await?;
        let note: Note = decode(response).await?;
        if note.id != id {
            return Err(Error::Decode(format!(
                "update of note {id} returned note {}",
                note.id
            )));
        }
        Ok(note)
    }

    async fn remove(&self, id: NoteId) -> Result<()> {
        let path = Self::note_path(id);
        let request = self.client.delete(self.config.endpoint(&path));
        self.send("DELETE", &path, request).await?;
        Ok(())
    }
}

/// Strictly decode a success body; shape mismatches become `Error::Decode`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|error| Error::Decode(format!("{error}: {}", excerpt(&body))))
}
