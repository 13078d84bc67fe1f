//! HTTP implementation of the race service contract.
//!
//! | Operation | Request |
//! |---|---|
//! | list tracks | `GET /api/tracks` |
//! | list drivers | `GET /api/cars` |
//! | create race | `POST /api/races` with `{player_id, track_id}` |
//! | race status | `GET /api/races/{id}` |
//! | start | `POST /api/races/{id}/start` |
//! | accelerate | `POST /api/races/{id}/accelerate` |
//!
//! Per-race paths take a [`ReferenceId`]; the creation id returned by
//! create-race must be translated by the caller first. No timeouts and no
//! retries: a failure surfaces as [`TransportError`] and the core decides
//! what it means.

use std::future::Future;

use podrace_core::{
    DriverId, RaceDescriptor, RaceService, RaceSnapshot, Racer, ReferenceId, Track, TrackId,
};
use reqwest::{Client, Response, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{ServiceConfig, TransportError};

/// Body of the create-race request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreateRaceRequest {
    /// Selected driver.
    pub player_id: DriverId,
    /// Selected track.
    pub track_id: TrackId,
}

/// Race service reached over HTTP.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpRaceService {
    client: Client,
    base_url: String,
}

impl HttpRaceService {
    /// Create a service client for `config.base_url`.
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| TransportError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl {
                url: config.base_url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url)
    }

    fn race_endpoint(&self, race: ReferenceId, action: Option<&str>) -> String {
        match action {
            Some(action) => self.endpoint(&format!("races/{race}/{action}")),
            None => self.endpoint(&format!("races/{race}")),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, TransportError> {
        tracing::trace!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        url: String,
        body: &B,
    ) -> Result<T, TransportError> {
        tracing::trace!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn post_empty(&self, url: String) -> Result<(), TransportError> {
        tracing::trace!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TransportError::Status { status: status.as_u16(), url: response.url().to_string() })
    }
}

impl RaceService for HttpRaceService {
    type Error = TransportError;

    fn list_tracks(&self) -> impl Future<Output = Result<Vec<Track>, Self::Error>> + Send {
        self.get_json(self.endpoint("tracks"))
    }

    fn list_racers(&self) -> impl Future<Output = Result<Vec<Racer>, Self::Error>> + Send {
        self.get_json(self.endpoint("cars"))
    }

    fn create_race(
        &self,
        driver: DriverId,
        track: TrackId,
    ) -> impl Future<Output = Result<RaceDescriptor, Self::Error>> + Send {
        let url = self.endpoint("races");
        async move {
            let body = CreateRaceRequest { player_id: driver, track_id: track };
            self.post_json(url, &body).await
        }
    }

    fn race_status(
        &self,
        race: ReferenceId,
    ) -> impl Future<Output = Result<RaceSnapshot, Self::Error>> + Send {
        self.get_json(self.race_endpoint(race, None))
    }

    fn start_race(&self, race: ReferenceId) -> impl Future<Output = Result<(), Self::Error>> + Send {
        self.post_empty(self.race_endpoint(race, Some("start")))
    }

    fn accelerate(
        &self,
        race: ReferenceId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        self.post_empty(self.race_endpoint(race, Some("accelerate")))
    }
}
