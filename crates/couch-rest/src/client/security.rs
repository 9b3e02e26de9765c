//! Session, API key, database security, and CORS operations.

use serde::Serialize;
use tracing::instrument;

use wharf_couch_client::encode::{encode_path_segment, require_path_param};
use wharf_couch_client::{DetailedResponse, RequestMethod};

use crate::error::Result;
use crate::security::{ApiKeysResult, CorsInformation, Security};
use crate::server::{Ok, SessionInformation};

#[derive(Serialize)]
struct CorsConfigurationBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    allow_credentials: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_cors: Option<bool>,
    origins: &'a [String],
}

impl super::CloudantClient {
    /// Retrieve information about the authenticated session:
    /// `GET /_session`.
    #[instrument(skip(self))]
    pub async fn get_session_information(&self) -> Result<DetailedResponse<SessionInformation>> {
        let req = self.request(RequestMethod::Get, "/_session")?;
        self.send(req, "SessionInformation").await
    }

    /// Generate an API key pair: `POST /_api/v2/api_keys`.
    #[instrument(skip(self))]
    pub async fn post_api_keys(&self) -> Result<DetailedResponse<ApiKeysResult>> {
        let req = self.request(RequestMethod::Post, "/_api/v2/api_keys")?;
        self.send(req, "ApiKeysResult").await
    }

    /// Retrieve a database security object: `GET /{db}/_security`.
    #[instrument(skip(self))]
    pub async fn get_security(&self, db: &str) -> Result<DetailedResponse<Security>> {
        let db = require_path_param("db", db)?;
        let req = self.request(
            RequestMethod::Get,
            &format!("/{}/_security", encode_path_segment(db)),
        )?;
        self.send(req, "Security").await
    }

    /// Replace a database security object: `PUT /{db}/_security`.
    #[instrument(skip(self, security))]
    pub async fn put_security(
        &self,
        db: &str,
        security: &Security,
    ) -> Result<DetailedResponse<Ok>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Put,
                &format!("/{}/_security", encode_path_segment(db)),
            )?
            .json(security)?;
        self.send(req, "Ok").await
    }

    /// Replace a database security object through the API-key-aware
    /// endpoint: `PUT /_api/v2/db/{db}/_security`.
    #[instrument(skip(self, security))]
    pub async fn put_cloudant_security_configuration(
        &self,
        db: &str,
        security: &Security,
    ) -> Result<DetailedResponse<Ok>> {
        let db = require_path_param("db", db)?;
        let req = self
            .request(
                RequestMethod::Put,
                &format!("/_api/v2/db/{}/_security", encode_path_segment(db)),
            )?
            .json(security)?;
        self.send(req, "Ok").await
    }

    /// Retrieve the account CORS configuration:
    /// `GET /_api/v2/user/config/cors`.
    #[instrument(skip(self))]
    pub async fn get_cors_information(&self) -> Result<DetailedResponse<CorsInformation>> {
        let req = self.request(RequestMethod::Get, "/_api/v2/user/config/cors")?;
        self.send(req, "CorsInformation").await
    }

    /// Replace the account CORS configuration:
    /// `PUT /_api/v2/user/config/cors`.
    #[instrument(skip(self, origins))]
    pub async fn put_cors_configuration(
        &self,
        origins: &[String],
        allow_credentials: Option<bool>,
        enable_cors: Option<bool>,
    ) -> Result<DetailedResponse<Ok>> {
        let body = CorsConfigurationBody {
            allow_credentials,
            enable_cors,
            origins,
        };
        let req = self
            .request(RequestMethod::Put, "/_api/v2/user/config/cors")?
            .json(&body)?;
        self.send(req, "Ok").await
    }
}
