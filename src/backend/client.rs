//! HTTP implementation of [`MeetingBackend`] on top of `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::{BackendError, Result};
use super::wire::PollResponse;
use super::MeetingBackend;
use crate::auth::BearerToken;
use crate::models::attendance::{MeetingAttendanceSummary, SavedAttendance};
use crate::models::meeting::MeetingListItem;
use crate::models::participant::ConnectionEvent;
use crate::models::poll::PollAnswer;

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8080/api`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".into(),
            timeout_secs: 30,
        }
    }
}

/// Client for the meeting-data backend.
///
/// The operator's bearer token is attached per call, so one client serves
/// every operator.
pub struct BackendClient {
    config: BackendConfig,
    client: Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder, auth: &BearerToken) -> RequestBuilder {
        match auth.as_str() {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, auth: &BearerToken, path: &str) -> Result<T> {
        let request = self.authorize(self.client.get(self.url(path)), auth);
        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Unauthorized),
            StatusCode::NOT_FOUND => Err(BackendError::NotFound(response.url().path().to_string())),
            _ => {
                let message = response.text().await.unwrap_or_default();
                Err(BackendError::Status { status: status.as_u16(), message })
            }
        }
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let response = self.check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl MeetingBackend for BackendClient {
    async fn list_meetings(&self, auth: &BearerToken) -> Result<Vec<MeetingListItem>> {
        self.get_json(auth, "/meetings").await
    }

    async fn fetch_connection_events(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<Vec<ConnectionEvent>> {
        self.get_json(auth, &format!("/meetings/{meeting_id}/connections")).await
    }

    async fn refresh_connection_events(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<Vec<ConnectionEvent>> {
        let url = self.url(&format!("/meetings/{meeting_id}/connections/refresh"));
        let response = self.authorize(self.client.post(url), auth).send().await?;
        self.handle_response(response).await
    }

    async fn fetch_poll_answers(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<Vec<PollAnswer>> {
        let url = self.url(&format!("/meetings/{meeting_id}/polls"));
        let response = self.authorize(self.client.get(url), auth).send().await?;

        // No poll was run for this meeting.
        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let polls: PollResponse = self.handle_response(response).await?;
        Ok(polls.into_answers())
    }

    async fn fetch_saved_attendance(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
    ) -> Result<SavedAttendance> {
        let url = self.url(&format!("/meetings/{meeting_id}/attendance"));
        let response = self.authorize(self.client.get(url), auth).send().await?;

        // Never reviewed.
        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_FOUND {
            return Ok(SavedAttendance::default());
        }

        self.handle_response(response).await
    }

    async fn save_attendance_summary(
        &self,
        auth: &BearerToken,
        meeting_id: i64,
        summary: &MeetingAttendanceSummary,
    ) -> Result<()> {
        let url = self.url(&format!("/meetings/{meeting_id}/attendance"));
        let response = self.authorize(self.client.put(url), auth).json(summary).send().await?;
        self.check_status(response).await?;
        Ok(())
    }
}
