use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_models::{
    AdminMeta, AntennaNotesRequest, DeleteAccountRequest, DeleteNoteRequest, MetaRequest,
    UpdateMetaRequest,
};
use crate::core::moderation::{ApiError, ModerationApi};

const ANTENNA_NOTES: &str = "antennas/notes";
const NOTES_DELETE: &str = "notes/delete";
const ADMIN_DELETE_ACCOUNT: &str = "admin/delete-account";
const ADMIN_META: &str = "admin/meta";
const ADMIN_UPDATE_META: &str = "admin/update-meta";

/// Minimal admin client for a Misskey-compatible server. It only exposes the
/// calls the moderation sweep needs.
pub struct MisskeyApiClient {
    client: Client,
    base_url: String,
    token: String,
}

impl MisskeyApiClient {
    pub fn new(base_url: String, token: String, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "User-Agent",
            HeaderValue::from_static(concat!("AntennaModerator/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: "client",
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint)
    }

    /// POST a JSON body and return the raw response, whatever its status.
    async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let resp = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint,
                reason: e.to_string(),
            })?;

        tracing::debug!(endpoint, status = %resp.status(), "Response received");
        Ok(resp)
    }

    /// POST and require a success status.
    async fn post_checked<B: Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let resp = self.post(endpoint, body).await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: resp.status().as_u16(),
            });
        }
        Ok(resp)
    }

    /// POST, require success, and decode the body.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.post_checked(endpoint, body)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Malformed {
                endpoint,
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl ModerationApi for MisskeyApiClient {
    async fn antenna_notes(
        &self,
        antenna_id: &str,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, ApiError> {
        let body = AntennaNotesRequest {
            i: &self.token,
            antenna_id,
            limit,
        };
        self.post_json(ANTENNA_NOTES, &body).await
    }

    async fn delete_note(&self, note_id: &str) -> Result<(), ApiError> {
        let body = DeleteNoteRequest {
            i: &self.token,
            note_id,
        };
        self.post_checked(NOTES_DELETE, &body).await?;
        Ok(())
    }

    async fn delete_account(&self, user_id: &str) -> Result<(), ApiError> {
        let body = DeleteAccountRequest {
            i: &self.token,
            user_id,
        };
        self.post_checked(ADMIN_DELETE_ACCOUNT, &body).await?;
        Ok(())
    }

    async fn blocked_hosts(&self) -> Result<Vec<String>, ApiError> {
        let meta: AdminMeta = self
            .post_json(ADMIN_META, &MetaRequest { i: &self.token })
            .await?;
        Ok(meta.blocked_hosts)
    }

    async fn update_blocked_hosts(&self, hosts: &[String]) -> Result<(), ApiError> {
        let body = UpdateMetaRequest {
            i: &self.token,
            blocked_hosts: hosts,
        };
        self.post_checked(ADMIN_UPDATE_META, &body).await?;
        Ok(())
    }
}
