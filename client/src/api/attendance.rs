use reqwest::Method;
use serde_json::Value;
use worklog_engine::types::{AttendanceId, EngineerId};
use worklog_engine::{AttendanceForm, AttendanceRecord, ProjectAssignment};

use super::client::{path_segment, ApiClient};
use super::types::AttendanceListQuery;
use crate::error::ClientError;

impl ApiClient {
    pub async fn list_attendance(
        &self,
        query: &AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        tracing::debug!(params = ?query.params(), "fetching attendance");
        let request = self
            .request(Method::GET, "/attendance")
            .query(&query.params());
        let records: Vec<AttendanceRecord> = self.send_json(request).await?;
        tracing::debug!(count = records.len(), "attendance fetched");
        Ok(records)
    }

    pub async fn list_projects(
        &self,
        engineer_id: &EngineerId,
    ) -> Result<Vec<ProjectAssignment>, ClientError> {
        tracing::debug!(engineer_id = %engineer_id, "fetching project assignments");
        let request = self
            .request(Method::GET, "/attendance/projects")
            .query(&[("engineerId", engineer_id.as_str())]);
        self.send_json(request).await
    }

    pub async fn create_attendance(
        &self,
        form: &AttendanceForm,
    ) -> Result<Option<AttendanceRecord>, ClientError> {
        tracing::debug!(work_date = %form.work_date, "creating attendance");
        let request = self.request(Method::POST, "/attendance").json(form);
        Ok(self.send_envelope(request).await?.data)
    }

    pub async fn update_attendance(
        &self,
        id: &AttendanceId,
        form: &AttendanceForm,
    ) -> Result<Option<AttendanceRecord>, ClientError> {
        tracing::debug!(id = %id, "updating attendance");
        let request = self
            .request(Method::PATCH, &format!("/attendance/{}", path_segment(id.as_str())))
            .json(form);
        Ok(self.send_envelope(request).await?.data)
    }

    pub async fn delete_attendance(&self, id: &AttendanceId) -> Result<(), ClientError> {
        tracing::debug!(id = %id, "deleting attendance");
        let path = format!("/attendance/{}", path_segment(id.as_str()));
        let request = self.request(Method::DELETE, &path);
        self.send_envelope::<Value>(request).await?;
        Ok(())
    }
}
