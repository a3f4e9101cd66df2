//! Fetch/refetch layer around the engine's query state.
//!
//! The board owns one engineer's fetched month of attendance and hands the
//! engine a stable record vector to filter, paginate and summarize. Records
//! are only ever replaced by a whole fetch result.

use async_trait::async_trait;
use std::num::NonZeroUsize;
use worklog_engine::query::{
    day_buckets, month_grid, total_worked_hours, CalendarDay, QueryView,
};
use worklog_engine::types::{AttendanceId, EngineerId, ProjectAssignmentId};
use worklog_engine::{
    AttendanceForm, AttendanceQuery, AttendanceRecord, Direction, FilterState, MonthCursor,
    ProjectAssignment, ProjectKey,
};

use crate::api::{ApiClient, AttendanceListQuery};
use crate::error::ClientError;

/// Backend operations the board depends on.
///
/// Use `MockAttendanceSource` in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceSource: Send + Sync {
    async fn list_attendance(
        &self,
        query: &AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>, ClientError>;

    async fn list_projects(
        &self,
        engineer_id: &EngineerId,
    ) -> Result<Vec<ProjectAssignment>, ClientError>;

    async fn create_attendance(
        &self,
        form: &AttendanceForm,
    ) -> Result<Option<AttendanceRecord>, ClientError>;

    async fn update_attendance(
        &self,
        id: &AttendanceId,
        form: &AttendanceForm,
    ) -> Result<Option<AttendanceRecord>, ClientError>;

    async fn delete_attendance(&self, id: &AttendanceId) -> Result<(), ClientError>;
}

#[async_trait]
impl AttendanceSource for ApiClient {
    async fn list_attendance(
        &self,
        query: &AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>, ClientError> {
        ApiClient::list_attendance(self, query).await
    }

    async fn list_projects(
        &self,
        engineer_id: &EngineerId,
    ) -> Result<Vec<ProjectAssignment>, ClientError> {
        ApiClient::list_projects(self, engineer_id).await
    }

    async fn create_attendance(
        &self,
        form: &AttendanceForm,
    ) -> Result<Option<AttendanceRecord>, ClientError> {
        ApiClient::create_attendance(self, form).await
    }

    async fn update_attendance(
        &self,
        id: &AttendanceId,
        form: &AttendanceForm,
    ) -> Result<Option<AttendanceRecord>, ClientError> {
        ApiClient::update_attendance(self, id, form).await
    }

    async fn delete_attendance(&self, id: &AttendanceId) -> Result<(), ClientError> {
        ApiClient::delete_attendance(self, id).await
    }
}

/// Proof that a fetch was started, carrying the scope it was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    query: AttendanceListQuery,
}

impl FetchTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn query(&self) -> &AttendanceListQuery {
        &self.query
    }
}

#[derive(Debug, Clone)]
pub struct AttendanceBoard {
    engineer_id: EngineerId,
    project_assignment_id: Option<ProjectAssignmentId>,
    month: MonthCursor,
    records: Vec<AttendanceRecord>,
    projects: Vec<ProjectAssignment>,
    query: AttendanceQuery,
    token: u64,
}

impl AttendanceBoard {
    /// Starts on `month` with the month filter set to the same month.
    pub fn new(engineer_id: EngineerId, month: MonthCursor, page_size: NonZeroUsize) -> Self {
        Self {
            engineer_id,
            project_assignment_id: None,
            month,
            records: Vec::new(),
            projects: Vec::new(),
            query: AttendanceQuery::new(page_size)
                .with_filter(FilterState::for_month(month.year, month.month)),
            token: 0,
        }
    }

    /// Narrows the server-side fetch to one assignment.
    pub fn with_project_assignment(mut self, id: ProjectAssignmentId) -> Self {
        self.project_assignment_id = Some(id);
        self
    }

    pub fn engineer_id(&self) -> &EngineerId {
        &self.engineer_id
    }

    pub fn month(&self) -> MonthCursor {
        self.month
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn projects(&self) -> &[ProjectAssignment] {
        &self.projects
    }

    pub fn query(&self) -> &AttendanceQuery {
        &self.query
    }

    /// Filter setters go through here; page moves use the board's own
    /// methods so they are clamped against the current records.
    pub fn query_mut(&mut self) -> &mut AttendanceQuery {
        &mut self.query
    }

    pub fn list_query(&self) -> AttendanceListQuery {
        self.scope_for(self.month)
    }

    fn scope_for(&self, month: MonthCursor) -> AttendanceListQuery {
        AttendanceListQuery {
            engineer_id: self.engineer_id.clone(),
            month: Some(month),
            project_assignment_id: self.project_assignment_id.clone(),
        }
    }

    /// Issues a new ticket. Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.ticket_for(self.month)
    }

    fn ticket_for(&mut self, month: MonthCursor) -> FetchTicket {
        self.token = self.token.wrapping_add(1);
        FetchTicket {
            token: self.token,
            query: self.scope_for(month),
        }
    }

    /// Applies `records` if `ticket` is still the latest one. Returns
    /// whether the records were applied.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, records: Vec<AttendanceRecord>) -> bool {
        if ticket.token != self.token {
            tracing::warn!(
                ticket = ticket.token,
                current = self.token,
                "discarding stale attendance fetch"
            );
            return false;
        }
        tracing::debug!(
            count = records.len(),
            month = ?ticket.query.month,
            "attendance records replaced"
        );
        self.records = records;
        self.query.reconcile(&self.records);
        true
    }

    pub async fn refresh<S>(&mut self, source: &S) -> Result<(), ClientError>
    where
        S: AttendanceSource + ?Sized,
    {
        let ticket = self.begin_fetch();
        let records = source.list_attendance(ticket.query()).await?;
        self.complete_fetch(ticket, records);
        Ok(())
    }

    /// Fetches the neighbouring month and, once it arrived, moves the
    /// cursor and the month filter onto it. A failed fetch leaves the board
    /// on the month its records belong to.
    pub async fn navigate_month<S>(
        &mut self,
        direction: Direction,
        source: &S,
    ) -> Result<MonthCursor, ClientError>
    where
        S: AttendanceSource + ?Sized,
    {
        let target = self.month.step(direction);
        let ticket = self.ticket_for(target);
        let records = source.list_attendance(ticket.query()).await?;
        if ticket.token == self.token {
            self.month = target;
            self.query.set_month(Some(target));
        }
        self.complete_fetch(ticket, records);
        Ok(self.month)
    }

    pub async fn load_projects<S>(&mut self, source: &S) -> Result<&[ProjectAssignment], ClientError>
    where
        S: AttendanceSource + ?Sized,
    {
        self.projects = source.list_projects(&self.engineer_id).await?;
        Ok(&self.projects)
    }

    /// Filter choices for the project dimension, keyed by assignment.
    /// Assignments that do not overlap the fetched month are left out.
    pub fn project_options(&self) -> Vec<(ProjectKey, String)> {
        let bounds = self.month.bounds();
        self.projects
            .iter()
            .filter(|project| {
                bounds.map_or(true, |(first, last)| project.is_active_between(first, last))
            })
            .map(|project| (project.filter_key(), project.label()))
            .collect()
    }

    pub async fn create<S>(
        &mut self,
        form: AttendanceForm,
        source: &S,
    ) -> Result<Option<AttendanceRecord>, ClientError>
    where
        S: AttendanceSource + ?Sized,
    {
        let form = self.prepare(form)?;
        let created = source.create_attendance(&form).await?;
        self.refresh(source).await?;
        Ok(created)
    }

    pub async fn update<S>(
        &mut self,
        id: &AttendanceId,
        form: AttendanceForm,
        source: &S,
    ) -> Result<Option<AttendanceRecord>, ClientError>
    where
        S: AttendanceSource + ?Sized,
    {
        let form = self.prepare(form)?;
        let updated = source.update_attendance(id, &form).await?;
        self.refresh(source).await?;
        Ok(updated)
    }

    pub async fn delete<S>(&mut self, id: &AttendanceId, source: &S) -> Result<(), ClientError>
    where
        S: AttendanceSource + ?Sized,
    {
        source.delete_attendance(id).await?;
        self.refresh(source).await
    }

    fn prepare(&self, mut form: AttendanceForm) -> Result<AttendanceForm, ClientError> {
        if form.engineer_id.is_none() {
            form.engineer_id = Some(self.engineer_id.clone());
        }
        Ok(form.validated()?)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.query.go_to_page(page, &self.records);
    }

    pub fn next_page(&mut self) {
        self.query.next_page(&self.records);
    }

    pub fn prev_page(&mut self) {
        self.query.prev_page();
    }

    pub fn view(&self) -> QueryView<'_> {
        self.query.view(&self.records)
    }

    /// Hours worked across the records passing the current filter.
    pub fn worked_hours(&self) -> f64 {
        total_worked_hours(worklog_engine::apply_filters(
            &self.records,
            self.query.filter(),
        ))
    }

    /// Calendar weeks for the fetched month, ignoring the list filters.
    pub fn calendar(&self) -> Vec<[CalendarDay; 7]> {
        month_grid(self.month, &day_buckets(&self.records))
    }
}
