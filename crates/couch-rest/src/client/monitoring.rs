//! Server health, tasks, and account usage operations.

use tracing::instrument;

use wharf_couch_client::{DetailedResponse, RequestMethod};

use crate::error::Result;
use crate::server::{
    ActiveTask, ActivityTrackerEvents, CurrentThroughputInformation, MembershipInformation, Ok,
    UpInformation,
};

impl super::CloudantClient {
    /// Probe server health: `HEAD /_up`.
    #[instrument(skip(self))]
    pub async fn head_up_information(&self) -> Result<DetailedResponse<()>> {
        let req = self.request(RequestMethod::Head, "/_up")?;
        self.send_unit(req).await
    }

    /// Retrieve server health: `GET /_up`.
    #[instrument(skip(self))]
    pub async fn get_up_information(&self) -> Result<DetailedResponse<UpInformation>> {
        let req = self.request(RequestMethod::Get, "/_up")?;
        self.send(req, "UpInformation").await
    }

    /// List running server tasks: `GET /_active_tasks`.
    #[instrument(skip(self))]
    pub async fn get_active_tasks(&self) -> Result<DetailedResponse<Vec<ActiveTask>>> {
        let req = self.request(RequestMethod::Get, "/_active_tasks")?;
        self.send(req, "Vec<ActiveTask>").await
    }

    /// Retrieve the cluster node lists: `GET /_membership`.
    #[instrument(skip(self))]
    pub async fn get_membership_information(
        &self,
    ) -> Result<DetailedResponse<MembershipInformation>> {
        let req = self.request(RequestMethod::Get, "/_membership")?;
        self.send(req, "MembershipInformation").await
    }

    /// Retrieve the activity-tracker event configuration:
    /// `GET /_api/v2/user/activity_tracker/events`.
    #[instrument(skip(self))]
    pub async fn get_activity_tracker_events(
        &self,
    ) -> Result<DetailedResponse<ActivityTrackerEvents>> {
        let req = self.request(RequestMethod::Get, "/_api/v2/user/activity_tracker/events")?;
        self.send(req, "ActivityTrackerEvents").await
    }

    /// Replace the activity-tracker event configuration:
    /// `POST /_api/v2/user/activity_tracker/events`.
    #[instrument(skip(self, events))]
    pub async fn post_activity_tracker_events(
        &self,
        events: &ActivityTrackerEvents,
    ) -> Result<DetailedResponse<Ok>> {
        let req = self
            .request(RequestMethod::Post, "/_api/v2/user/activity_tracker/events")?
            .json(events)?;
        self.send(req, "Ok").await
    }

    /// Retrieve consumed throughput: `GET /_api/v2/user/current/throughput`.
    #[instrument(skip(self))]
    pub async fn get_current_throughput_information(
        &self,
    ) -> Result<DetailedResponse<CurrentThroughputInformation>> {
        let req = self.request(RequestMethod::Get, "/_api/v2/user/current/throughput")?;
        self.send(req, "CurrentThroughputInformation").await
    }
}
