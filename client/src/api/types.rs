use serde::{Deserialize, Serialize};
use serde_json::Value;
use worklog_engine::types::{EngineerId, ProjectAssignmentId};
use worklog_engine::MonthCursor;

/// `{ success, data, message }` wrapper around every backend payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Error body. The backend answers with either `{ error, code, details }`
/// or `{ success: false, message }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Scope of one `GET /attendance` fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceListQuery {
    pub engineer_id: EngineerId,
    pub month: Option<MonthCursor>,
    pub project_assignment_id: Option<ProjectAssignmentId>,
}

impl AttendanceListQuery {
    pub fn new(engineer_id: EngineerId) -> Self {
        Self {
            engineer_id,
            month: None,
            project_assignment_id: None,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("engineerId", self.engineer_id.to_string())];
        if let Some(month) = self.month {
            params.push(("month", month.to_string()));
        }
        if let Some(assignment) = &self.project_assignment_id {
            params.push(("projectAssignmentId", assignment.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_defaults_to_success_without_flag() {
        let env: ApiEnvelope<Vec<u32>> = serde_json::from_value(json!({ "data": [1, 2] })).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(vec![1, 2]));
    }

    #[test]
    fn envelope_keeps_failure_message() {
        let env: ApiEnvelope<Value> =
            serde_json::from_value(json!({ "success": false, "message": "Not allowed" })).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("Not allowed"));
    }

    #[test]
    fn error_body_prefers_error_over_message() {
        let body: ApiErrorBody =
            serde_json::from_value(json!({ "error": "bad", "message": "worse", "code": "BAD_REQUEST" }))
                .unwrap();
        assert_eq!(body.text(), Some("bad"));
        let body: ApiErrorBody = serde_json::from_value(json!({ "message": "worse" })).unwrap();
        assert_eq!(body.text(), Some("worse"));
    }

    #[test]
    fn list_query_params_skip_missing_values() {
        let query = AttendanceListQuery::new("eng-1".into());
        assert_eq!(query.params(), vec![("engineerId", "eng-1".to_string())]);
    }

    #[test]
    fn list_query_params_include_scope() {
        let query = AttendanceListQuery {
            engineer_id: "eng-1".into(),
            month: MonthCursor::new(2024, 3),
            project_assignment_id: Some("pa-9".into()),
        };
        let params = query.params();
        assert!(params.contains(&("month", "2024-03".to_string())));
        assert!(params.contains(&("projectAssignmentId", "pa-9".to_string())));
    }
}
