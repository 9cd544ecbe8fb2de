//! HTTP client for the fleet REST backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    config::ClientConfig,
    error::{ClientError, ClientResult, ErrorResponse},
    models::{
        bulk::{BulkCreateResponse, BulkDeleteResponse, BulkUpdateResponse},
        engine::{EngineDraft, EngineRecord},
        listing::{AffectationListing, DisponibilityListing, EngineList},
        movement::{MoveRequest, Transition},
        user::{LoginRequest, LoginResponse, UserInfo},
    },
};

use super::{filter::FilterPredicate, reconcile::FleetBackend, stats::FleetStats};

/// Authenticated REST client. The bearer token lives in memory only.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message,
            Err(_) => format!("HTTP {}", status.as_u16()),
        };
        tracing::debug!(status = status.as_u16(), %message, "Backend request failed");

        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => ClientError::Network(format!("HTTP {}: {}", status.as_u16(), message)),
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    /// Log in and keep the access token for subsequent requests
    pub async fn login(&mut self, login: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .send(self.request(Method::POST, "/auth/login").json(&body))
            .await?;
        self.token = Some(response.access_token.clone());
        tracing::info!(user = %response.user.login, "Logged in");
        Ok(response)
    }

    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.send(self.request(Method::GET, "/auth/me")).await
    }

    // -----------------------------------------------------------------------
    // Engines
    // -----------------------------------------------------------------------

    pub async fn list_engines(&self, filter: &FilterPredicate) -> ClientResult<Vec<EngineRecord>> {
        let list: EngineList = self
            .send(self.request(Method::GET, "/engines").query(filter))
            .await?;
        Ok(list.engines)
    }

    pub async fn get_engine(&self, id: &str) -> ClientResult<EngineRecord> {
        self.send(self.request(Method::GET, &format!("/engines/{}", id))).await
    }

    pub async fn create_engine(&self, record: &EngineRecord) -> ClientResult<EngineRecord> {
        record.check()?;
        self.send(self.request(Method::POST, "/engines").json(record)).await
    }

    pub async fn update_engine(&self, record: &EngineRecord) -> ClientResult<EngineRecord> {
        record.check()?;
        self.send(
            self.request(Method::PUT, &format!("/engines/{}", record.id))
                .json(record),
        )
        .await
    }

    pub async fn delete_engine(&self, id: &str) -> ClientResult<()> {
        Self::check(
            self.request(Method::DELETE, &format!("/engines/{}", id))
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    pub async fn bulk_create(&self, engines: Vec<EngineDraft>) -> ClientResult<BulkCreateResponse> {
        self.send(
            self.request(Method::POST, "/engines/bulk")
                .json(&json!({ "engines": engines })),
        )
        .await
    }

    pub async fn bulk_update(&self, engines: Vec<EngineRecord>) -> ClientResult<BulkUpdateResponse> {
        self.send(
            self.request(Method::PUT, "/engines/bulk")
                .json(&json!({ "engines": engines })),
        )
        .await
    }

    pub async fn bulk_delete(&self, engine_ids: Vec<String>) -> ClientResult<BulkDeleteResponse> {
        self.send(
            self.request(Method::DELETE, "/engines/bulk")
                .json(&json!({ "engineIds": engine_ids })),
        )
        .await
    }

    pub async fn engine_stats(&self) -> ClientResult<FleetStats> {
        self.send(self.request(Method::GET, "/engines/stats")).await
    }

    // -----------------------------------------------------------------------
    // Disponibility / affectation
    // -----------------------------------------------------------------------

    pub async fn disponibility(&self, filter: &FilterPredicate) -> ClientResult<DisponibilityListing> {
        self.send(self.request(Method::GET, "/disponibility").query(filter))
            .await
    }

    pub async fn move_engine(&self, request: &MoveRequest) -> ClientResult<EngineRecord> {
        self.send(self.request(Method::POST, "/disponibility/move").json(request))
            .await
    }

    pub async fn affectation(&self, filter: &FilterPredicate) -> ClientResult<AffectationListing> {
        self.send(self.request(Method::GET, "/affectation").query(filter))
            .await
    }

    pub async fn affectation_stats(&self) -> ClientResult<FleetStats> {
        self.send(self.request(Method::GET, "/affectation/stats")).await
    }

    /// Post one transition, returning the committed record
    pub async fn commit(&self, transition: &Transition) -> ClientResult<EngineRecord> {
        let builder = self.request(Method::POST, transition.endpoint());
        let builder = match transition {
            Transition::MarkAvailable(body) | Transition::Unassign(body) => builder.json(body),
            Transition::MarkUnavailable(body) => builder.json(body),
            Transition::Assign(body) => builder.json(body),
        };
        self.send(builder).await
    }
}

#[async_trait]
impl FleetBackend for ApiClient {
    async fn apply(&self, transition: &Transition) -> ClientResult<()> {
        match self.commit(transition).await {
            Ok(_) => Ok(()),
            // The engine vanished server-side since it was loaded
            Err(ClientError::NotFound(message)) => Err(ClientError::Conflict(message)),
            Err(e) => Err(e),
        }
    }
}
