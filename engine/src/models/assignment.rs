use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::query::ProjectKey;
use crate::types::{EngineerId, ProjectAssignmentId, ProjectId};

/// Engineer ↔ project (↔ client) association that attendance is booked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAssignment {
    pub id: ProjectAssignmentId,
    #[serde(default)]
    pub engineer_id: Option<EngineerId>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    pub project_name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl ProjectAssignment {
    /// Label for a filter dropdown. Includes the client so that projects
    /// sharing a display name stay distinguishable.
    pub fn label(&self) -> String {
        match &self.client_name {
            Some(client) => format!("{} ({})", self.project_name, client),
            None => self.project_name.clone(),
        }
    }

    pub fn filter_key(&self) -> ProjectKey {
        ProjectKey::Assignment(self.id.clone())
    }

    /// Whether the assignment covers any day of `first..=last`. Open ends
    /// are unbounded.
    pub fn is_active_between(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| start <= last)
            && self.end_date.map_or(true, |end| first <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assignment() -> ProjectAssignment {
        serde_json::from_value(json!({
            "id": "pa-1",
            "engineerId": "eng-1",
            "projectId": "p-1",
            "projectName": "Portal",
            "clientName": "Acme",
            "startDate": "2024-01-01",
            "endDate": "2024-06-30"
        }))
        .unwrap()
    }

    #[test]
    fn label_includes_client() {
        assert_eq!(assignment().label(), "Portal (Acme)");
    }

    #[test]
    fn filter_key_uses_assignment_id() {
        assert_eq!(
            assignment().filter_key(),
            ProjectKey::Assignment(ProjectAssignmentId::from("pa-1"))
        );
    }

    #[test]
    fn is_active_between_checks_overlap() {
        let a = assignment();
        let day = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        assert!(a.is_active_between(day(3, 1), day(3, 31)));
        assert!(a.is_active_between(day(6, 1), day(6, 30)));
        assert!(!a.is_active_between(day(7, 1), day(7, 31)));
        assert!(!a.is_active_between(
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        ));
    }
}
