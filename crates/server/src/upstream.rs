// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client for the booking API.
//!
//! The console owns no data. Availability, jobs and technicians are read from
//! the booking API with the caller's own bearer token and role, so the
//! booking API stays the only place sessions are checked.

use aircare::{AvailabilitySource, CoreError};
use aircare_api::AuthenticatedActor;
use aircare_domain::{AvailabilityDay, Job, Technician, TimeSlot, format_date};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use time::Date;
use tracing::debug;

/// Header carrying the operator role on every booking API request.
pub const ROLE_HEADER: &str = "X-Role";

/// Errors talking to the booking API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    /// The request could not be sent or timed out.
    #[error("request to {url} failed: {source}")]
    Request {
        /// The requested URL.
        url: String,
        /// The transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The booking API answered with a non-success status.
    #[error("{url} returned {status}: {body}")]
    Status {
        /// The requested URL.
        url: String,
        /// The response status.
        status: StatusCode,
        /// The response body, for the log.
        body: String,
    },
    /// The response body was not the expected JSON.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// The requested URL.
        url: String,
        /// The decode error.
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    /// Whether the booking API rejected the caller's credentials.
    #[must_use]
    pub fn is_auth_rejection(&self) -> bool {
        match self {
            Self::Status { status, .. } => {
                *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
            }
            _ => false,
        }
    }
}

/// Availability responses come either wrapped in a day record or as a bare
/// slot list.
#[derive(Deserialize)]
#[serde(untagged)]
enum AvailabilityPayload {
    Day(AvailabilityDay),
    Slots(Vec<TimeSlot>),
}

impl AvailabilityPayload {
    fn into_slots(self) -> Vec<TimeSlot> {
        match self {
            Self::Day(day) => day.slots,
            Self::Slots(slots) => slots,
        }
    }
}

/// Shared connection to the booking API.
#[derive(Debug, Clone)]
pub struct BookingApiClient {
    http: Client,
    base_url: String,
}

impl BookingApiClient {
    /// Creates a client for the booking API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let http: Client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Binds the client to one operator's credentials.
    #[must_use]
    pub const fn as_actor<'a>(&'a self, actor: &'a AuthenticatedActor) -> ActorSession<'a> {
        ActorSession {
            client: self,
            actor,
        }
    }

    async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
        actor: &AuthenticatedActor,
    ) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let url: String = format!("{}{path}", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&actor.token)
            .header(ROLE_HEADER, actor.role.as_header_value())
            .query(query)
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                url: url.clone(),
                source,
            })?;

        let status: StatusCode = response.status();
        if !status.is_success() {
            let body: String = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { url, status, body });
        }

        debug!(%url, %status, "Booking API response");

        response
            .json::<T>()
            .await
            .map_err(|source| UpstreamError::Decode { url, source })
    }
}

/// A booking API client acting for one operator.
#[derive(Debug, Clone, Copy)]
pub struct ActorSession<'a> {
    client: &'a BookingApiClient,
    actor: &'a AuthenticatedActor,
}

impl ActorSession<'_> {
    /// Fetches the slots of one day from `/public/availability_v2`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not slot data.
    pub async fn availability_day(&self, date: Date) -> Result<Vec<TimeSlot>, UpstreamError> {
        let payload: AvailabilityPayload = self
            .client
            .get_json(
                "/public/availability_v2",
                &[("date", format_date(date))],
                self.actor,
            )
            .await?;
        Ok(payload.into_slots())
    }

    /// Fetches every job visible to the operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a job list.
    pub async fn jobs(&self) -> Result<Vec<Job>, UpstreamError> {
        self.client.get_json("/jobs", &[], self.actor).await
    }

    /// Fetches every technician record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a
    /// technician list.
    pub async fn technicians(&self) -> Result<Vec<Technician>, UpstreamError> {
        self.client.get_json("/technicians", &[], self.actor).await
    }
}

impl AvailabilitySource for ActorSession<'_> {
    async fn fetch_day(&self, date: Date) -> Result<Vec<TimeSlot>, CoreError> {
        self.availability_day(date)
            .await
            .map_err(|err| CoreError::SourceUnavailable {
                date,
                reason: err.to_string(),
            })
    }
}
