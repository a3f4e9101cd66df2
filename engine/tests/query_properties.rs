use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use worklog_engine::{
    apply_filters, compute_stats, navigate_month, paginate, AttendanceRecord, AttendanceType,
    Direction, FilterState, PeriodStats, ProjectKey,
};

fn record(id: &str, date: &str, kind: AttendanceType, assignment: &str) -> AttendanceRecord {
    AttendanceRecord::new(id, date, kind, assignment)
}

/// Two months of mixed entries over two assignments, plus one undated row.
fn fixture() -> Vec<AttendanceRecord> {
    let kinds = AttendanceType::ALL;
    let mut records = Vec::new();
    for (month, days) in [(2u32, 29u32), (3, 31)] {
        for day in 1..=days {
            let idx = records.len();
            let kind = kinds[idx % kinds.len()];
            let assignment = if day % 3 == 0 { "pa-2" } else { "pa-1" };
            records.push(record(
                &format!("r{idx}"),
                &format!("2024-{month:02}-{day:02}T00:00:00.000Z"),
                kind,
                assignment,
            ));
            if day % 5 == 0 {
                records.push(record(
                    &format!("r{idx}b"),
                    &format!("2024-{month:02}-{day:02}"),
                    AttendanceType::PaidLeave,
                    "pa-2",
                ));
            }
        }
    }
    records.push(record("undated", "n/a", AttendanceType::Present, "pa-1"));
    records
}

fn filters() -> Vec<FilterState> {
    let march_fifth = NaiveDate::from_ymd_opt(2024, 3, 5);
    vec![
        FilterState::default(),
        FilterState::for_month(2024, 3),
        FilterState {
            year: Some(2024),
            ..FilterState::default()
        },
        FilterState {
            attendance_type: Some(AttendanceType::Present),
            ..FilterState::default()
        },
        FilterState {
            project: Some(ProjectKey::Assignment("pa-2".into())),
            ..FilterState::for_month(2024, 2)
        },
        FilterState {
            specific_date: march_fifth,
            ..FilterState::default()
        },
    ]
}

fn ids(records: &[&AttendanceRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

#[test]
fn filtering_is_idempotent() {
    let records = fixture();
    for filter in filters() {
        let once = apply_filters(&records, &filter);
        let twice = apply_filters(once.iter().copied(), &filter);
        assert_eq!(ids(&once), ids(&twice), "filter {filter:?}");
    }
}

#[test]
fn adding_a_dimension_never_grows_the_result() {
    let records = fixture();
    let extras: Vec<Box<dyn Fn(&mut FilterState)>> = vec![
        Box::new(|f: &mut FilterState| f.month = Some(3)),
        Box::new(|f: &mut FilterState| f.year = Some(2024)),
        Box::new(|f: &mut FilterState| f.attendance_type = Some(AttendanceType::Absent)),
        Box::new(|f: &mut FilterState| f.project = Some(ProjectKey::Assignment("pa-1".into()))),
        Box::new(|f: &mut FilterState| f.specific_date = NaiveDate::from_ymd_opt(2024, 2, 10)),
    ];
    for base in filters() {
        let base_len = apply_filters(&records, &base).len();
        for extra in &extras {
            let mut narrowed = base.clone();
            extra(&mut narrowed);
            assert!(
                apply_filters(&records, &narrowed).len() <= base_len,
                "{narrowed:?} grew beyond {base:?}"
            );
        }
    }
}

#[test]
fn undated_row_only_survives_the_empty_filter() {
    let records = fixture();
    for filter in filters() {
        let present = apply_filters(&records, &filter)
            .iter()
            .any(|r| r.id.as_str() == "undated");
        assert_eq!(present, filter.is_empty(), "filter {filter:?}");
    }
}

#[test]
fn pages_reassemble_the_filtered_set() {
    let records = fixture();
    for filter in filters() {
        let filtered = apply_filters(&records, &filter);
        for size in [1usize, 7, 12, 20, 500] {
            let size = NonZeroUsize::new(size).unwrap();
            let total = paginate(&filtered, size, 1).total_pages;
            let rebuilt: Vec<&AttendanceRecord> = (1..=total)
                .flat_map(|page| paginate(&filtered, size, page).items)
                .collect();
            assert_eq!(ids(&rebuilt), ids(&filtered));
        }
    }
}

#[test]
fn stats_never_exceed_distinct_days() {
    let records = fixture();
    for filter in filters() {
        let filtered = apply_filters(&records, &filter);
        let days: BTreeSet<NaiveDate> = filtered.iter().filter_map(|r| r.work_day()).collect();
        let stats = compute_stats(filtered.iter().copied());
        assert!(stats.work_days + stats.leave_days + stats.absent_days <= days.len());
    }
}

#[test]
fn month_navigation_wraps_around_the_year() {
    assert_eq!(navigate_month(1, 2024, Direction::Prev), (12, 2023));
    assert_eq!(navigate_month(12, 2024, Direction::Next), (1, 2025));
    assert_eq!(navigate_month(6, 2024, Direction::Next), (7, 2024));
}

#[test]
fn same_day_work_outranks_leave() {
    let records = vec![
        record("1", "2024-03-05", AttendanceType::Present, "pa-1"),
        record("2", "2024-03-05", AttendanceType::PaidLeave, "pa-2"),
        record("3", "2024-03-06", AttendanceType::Absent, "pa-1"),
    ];
    assert_eq!(
        compute_stats(&records),
        PeriodStats {
            work_days: 1,
            leave_days: 0,
            absent_days: 1
        }
    );
}

#[test]
fn second_page_of_twenty_five() {
    let records: Vec<AttendanceRecord> = (1..=25)
        .map(|i| record(&format!("r{i}"), "2024-03-01", AttendanceType::Present, "pa-1"))
        .collect();
    let all = apply_filters(&records, &FilterState::default());
    let window = paginate(&all, NonZeroUsize::new(20).unwrap(), 2);
    assert_eq!(window.total_pages, 2);
    assert_eq!(
        ids(&window.items),
        (21..=25).map(|i| format!("r{i}")).collect::<Vec<_>>()
    );
}

#[test]
fn empty_set_yields_no_pages_and_zero_stats() {
    let records: Vec<AttendanceRecord> = Vec::new();
    let filtered = apply_filters(&records, &FilterState::for_month(2024, 3));
    let window = paginate(&filtered, NonZeroUsize::new(20).unwrap(), 1);
    assert!(window.items.is_empty());
    assert_eq!(window.total_pages, 0);
    assert_eq!(compute_stats(filtered.iter().copied()), PeriodStats::default());
}
