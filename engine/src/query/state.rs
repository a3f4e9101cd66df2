use chrono::NaiveDate;
use std::num::NonZeroUsize;

use super::calendar::{Direction, MonthCursor};
use super::filter::{apply_filters, FilterState, ProjectKey};
use super::pagination::{clamp_page, paginate, total_pages, PageWindow, DEFAULT_PAGE_SIZE};
use super::stats::{compute_stats, PeriodStats};
use crate::models::{AttendanceRecord, AttendanceType};

/// Filter, page and scroll state owned by one listing view.
///
/// Any filter change puts the view back on page 1. Moving to a different
/// page leaves a scroll-to-top request for the view to consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceQuery {
    filter: FilterState,
    page: usize,
    page_size: NonZeroUsize,
    scroll_to_top: bool,
}

/// Everything a listing renders for one set of records.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryView<'a> {
    pub page: PageWindow<&'a AttendanceRecord>,
    pub filtered_count: usize,
    pub stats: PeriodStats,
}

impl Default for AttendanceQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl AttendanceQuery {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            filter: FilterState::default(),
            page: 1,
            page_size,
            scroll_to_top: false,
        }
    }

    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn set_month(&mut self, cursor: Option<MonthCursor>) {
        self.update_filter(|filter| {
            filter.year = cursor.map(|c| c.year);
            filter.month = cursor.map(|c| c.month);
        });
    }

    /// Steps the month dimension, starting from `fallback` when unset.
    pub fn step_month(&mut self, direction: Direction, fallback: MonthCursor) -> MonthCursor {
        let current = match (self.filter.year, self.filter.month) {
            (Some(year), Some(month)) => MonthCursor::new(year, month).unwrap_or(fallback),
            _ => fallback,
        };
        let next = current.step(direction);
        self.set_month(Some(next));
        next
    }

    pub fn set_attendance_type(&mut self, kind: Option<AttendanceType>) {
        self.update_filter(|filter| filter.attendance_type = kind);
    }

    pub fn set_project(&mut self, project: Option<ProjectKey>) {
        self.update_filter(|filter| filter.project = project);
    }

    pub fn set_specific_date(&mut self, date: Option<NaiveDate>) {
        self.update_filter(|filter| filter.specific_date = date);
    }

    /// Drops every dimension except the month.
    pub fn clear_filters(&mut self) {
        self.update_filter(|filter| {
            *filter = FilterState {
                month: filter.month,
                year: filter.year,
                ..FilterState::default()
            };
        });
    }

    fn update_filter(&mut self, change: impl FnOnce(&mut FilterState)) {
        let before = self.filter.clone();
        change(&mut self.filter);
        if self.filter != before {
            tracing::debug!(filter = ?self.filter, "attendance filter changed");
            self.move_to(1);
        }
    }

    /// Moves to `page`, clamped to the pages `records` currently produce.
    pub fn go_to_page(&mut self, page: usize, records: &[AttendanceRecord]) {
        let total = self.total_pages(records);
        self.move_to(clamp_page(page, total));
    }

    pub fn next_page(&mut self, records: &[AttendanceRecord]) {
        if self.page < self.total_pages(records) {
            self.move_to(self.page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.move_to(self.page - 1);
        }
    }

    fn move_to(&mut self, page: usize) {
        if page != self.page {
            self.page = page;
            self.scroll_to_top = true;
        }
    }

    /// Returns and clears the pending scroll-to-top request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    fn total_pages(&self, records: &[AttendanceRecord]) -> usize {
        total_pages(apply_filters(records, &self.filter).len(), self.page_size)
    }

    /// Re-clamps the current page after the record set was replaced.
    pub fn reconcile(&mut self, records: &[AttendanceRecord]) {
        let total = self.total_pages(records);
        if self.page > total.max(1) {
            self.move_to(total.max(1));
        }
    }

    pub fn view<'a>(&self, records: &'a [AttendanceRecord]) -> QueryView<'a> {
        let filtered = apply_filters(records, &self.filter);
        QueryView {
            page: paginate(&filtered, self.page_size, self.page),
            filtered_count: filtered.len(),
            stats: compute_stats(filtered.iter().copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::record;

    fn records(n: usize) -> Vec<AttendanceRecord> {
        (1..=n)
            .map(|i| {
                let day = (i - 1) % 28 + 1;
                let kind = if i % 2 == 0 {
                    AttendanceType::Present
                } else {
                    AttendanceType::PaidLeave
                };
                record(&format!("r{i}"), &format!("2024-03-{day:02}"), kind, "pa-1")
            })
            .collect()
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn filter_change_resets_page_and_requests_scroll() {
        let data = records(30);
        let mut query = AttendanceQuery::new(size(10));
        query.go_to_page(3, &data);
        assert_eq!(query.page(), 3);
        assert!(query.take_scroll_request());

        query.set_attendance_type(Some(AttendanceType::Present));
        assert_eq!(query.page(), 1);
        assert!(query.take_scroll_request());
        assert!(!query.take_scroll_request());
    }

    #[test]
    fn setting_the_same_filter_keeps_the_page() {
        let data = records(30);
        let mut query = AttendanceQuery::new(size(10));
        query.set_attendance_type(Some(AttendanceType::Present));
        query.go_to_page(2, &data);
        query.take_scroll_request();

        query.set_attendance_type(Some(AttendanceType::Present));
        assert_eq!(query.page(), 2);
        assert!(!query.take_scroll_request());
    }

    #[test]
    fn paging_stops_at_bounds() {
        let data = records(15);
        let mut query = AttendanceQuery::new(size(10));
        query.prev_page();
        assert_eq!(query.page(), 1);
        assert!(!query.take_scroll_request());

        query.next_page(&data);
        query.next_page(&data);
        assert_eq!(query.page(), 2);

        query.go_to_page(99, &data);
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn view_combines_page_and_stats() {
        let data = records(25);
        let mut query = AttendanceQuery::new(size(20));
        query.go_to_page(2, &data);
        let view = query.view(&data);
        assert_eq!(view.filtered_count, 25);
        assert_eq!(view.page.items.len(), 5);
        assert_eq!(view.page.total_pages, 2);
        assert_eq!(view.page.items[0].id.as_str(), "r21");
        assert_eq!(view.stats.work_days + view.stats.leave_days, 25);
    }

    #[test]
    fn step_month_uses_fallback_then_tracks_filter() {
        let mut query = AttendanceQuery::default();
        let start = MonthCursor::new(2024, 1).unwrap();
        assert_eq!(query.step_month(Direction::Prev, start), MonthCursor::new(2023, 12).unwrap());
        assert_eq!(query.filter().month, Some(12));
        assert_eq!(query.step_month(Direction::Next, start), start);
    }

    #[test]
    fn clear_filters_keeps_month() {
        let mut query = AttendanceQuery::default();
        query.set_month(MonthCursor::new(2024, 3));
        query.set_specific_date(NaiveDate::from_ymd_opt(2024, 3, 5));
        query.clear_filters();
        assert_eq!(query.filter(), &FilterState::for_month(2024, 3));
    }

    #[test]
    fn reconcile_pulls_back_after_shrinking_refetch() {
        let mut data = records(30);
        let mut query = AttendanceQuery::new(size(10));
        query.go_to_page(3, &data);
        data.truncate(12);
        query.reconcile(&data);
        assert_eq!(query.page(), 2);
    }
}
