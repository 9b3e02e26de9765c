//! Server metadata and provisioned capacity operations.

use tracing::instrument;

use wharf_couch_client::{DetailedResponse, RequestMethod};

use crate::error::Result;
use crate::server::{CapacityThroughputInformation, ServerInformation, UuidsResult};

impl super::CloudantClient {
    /// Retrieve server metadata: `GET /`.
    #[instrument(skip(self))]
    pub async fn get_server_information(&self) -> Result<DetailedResponse<ServerInformation>> {
        let req = self.request(RequestMethod::Get, "/")?;
        self.send(req, "ServerInformation").await
    }

    /// Generate UUIDs: `GET /_uuids`.
    #[instrument(skip(self))]
    pub async fn get_uuids(&self, count: Option<u64>) -> Result<DetailedResponse<UuidsResult>> {
        let req = self
            .request(RequestMethod::Get, "/_uuids")?
            .query_opt("count", count);
        self.send(req, "UuidsResult").await
    }

    /// Retrieve provisioned throughput capacity:
    /// `GET /_api/v2/user/capacity/throughput`.
    #[instrument(skip(self))]
    pub async fn get_capacity_throughput_information(
        &self,
    ) -> Result<DetailedResponse<CapacityThroughputInformation>> {
        let req = self.request(RequestMethod::Get, "/_api/v2/user/capacity/throughput")?;
        self.send(req, "CapacityThroughputInformation").await
    }

    /// Update provisioned throughput capacity:
    /// `PUT /_api/v2/user/capacity/throughput`.
    #[instrument(skip(self))]
    pub async fn put_capacity_throughput_configuration(
        &self,
        blocks: i64,
    ) -> Result<DetailedResponse<CapacityThroughputInformation>> {
        let req = self
            .request(RequestMethod::Put, "/_api/v2/user/capacity/throughput")?
            .json_value(serde_json::json!({ "blocks": blocks }));
        self.send(req, "CapacityThroughputInformation").await
    }
}
