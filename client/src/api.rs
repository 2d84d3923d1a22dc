//! Transport to the game server.

use std::future::Future;

use common::data::Snapshot;
use common::event::client::{ActionRequest, NewGameRequest, CHECKSUM_REQUEST};
use common::event::server::{ActionResponse, ChecksumResponse, NewGameResponse};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{config::Config, Error};

pub const STATE_ENDPOINT: &str = "getgamestate";
pub const CHECKSUM_ENDPOINT: &str = "checkstate";
pub const PLAY_ENDPOINT: &str = "playcards";
pub const NEW_GAME_ENDPOINT: &str = "startnewgame";

/// The four requests this client makes.
pub trait Api {
    fn fetch_snapshot(&self) -> impl Future<Output = Result<Snapshot, Error>> + Send;

    /// Fingerprint of the server's stored state, if it has one.
    fn fetch_checksum(&self) -> impl Future<Output = Result<Option<String>, Error>> + Send;

    fn submit(
        &self,
        action: &ActionRequest,
    ) -> impl Future<Output = Result<ActionResponse, Error>> + Send;

    fn start_new_game(
        &self,
        request: &NewGameRequest,
    ) -> impl Future<Output = Result<NewGameResponse, Error>> + Send;
}

/// [`Api`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base: String,
}

impl HttpApi {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| Error::Config(format!("session cookie: {e}")))?;
            headers.insert(header::COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base: config.server_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base)
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    response: reqwest::Response,
) -> Result<T, Error> {
    let body = response.error_for_status()?.text().await?;
    debug!(endpoint, len = body.len(), "response received");

    serde_json::from_str(&body).map_err(|source| Error::Protocol { endpoint, source })
}

impl Api for HttpApi {
    async fn fetch_snapshot(&self) -> Result<Snapshot, Error> {
        let response = self.http.get(self.url(STATE_ENDPOINT)).send().await?;
        decode(STATE_ENDPOINT, response).await
    }

    async fn fetch_checksum(&self) -> Result<Option<String>, Error> {
        let response = self
            .http
            .post(self.url(CHECKSUM_ENDPOINT))
            .json(CHECKSUM_REQUEST)
            .send()
            .await?;
        let checksum: ChecksumResponse = decode(CHECKSUM_ENDPOINT, response).await?;

        Ok(checksum.database_checksum)
    }

    async fn submit(&self, action: &ActionRequest) -> Result<ActionResponse, Error> {
        let response = self
            .http
            .post(self.url(PLAY_ENDPOINT))
            .json(action)
            .send()
            .await?;
        decode(PLAY_ENDPOINT, response).await
    }

    async fn start_new_game(&self, request: &NewGameRequest) -> Result<NewGameResponse, Error> {
        let response = self
            .http
            .post(self.url(NEW_GAME_ENDPOINT))
            .json(request)
            .send()
            .await?;
        decode(NEW_GAME_ENDPOINT, response).await
    }
}
