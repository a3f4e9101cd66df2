use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use worklog_client::{ApiClient, AttendanceBoard, Config};
use worklog_engine::{AttendanceRecord, AttendanceType, MonthCursor};

/// Lists one engineer's attendance for a month.
#[derive(Debug, Parser)]
#[command(name = "worklog", version)]
struct Cli {
    /// Engineer whose attendance is listed.
    #[arg(long)]
    engineer: String,

    /// Month to fetch as YYYY-MM. Defaults to the current month.
    #[arg(long, value_parser = parse_month)]
    month: Option<MonthCursor>,

    /// Only fetch entries booked against this assignment.
    #[arg(long)]
    project_assignment: Option<String>,

    /// PRESENT, PAID_LEAVE, ABSENT or LEGAL_HOLIDAY.
    #[arg(long = "type")]
    attendance_type: Option<AttendanceType>,

    /// Only show this day (YYYY-MM-DD).
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long, default_value_t = 1)]
    page: usize,
}

fn parse_month(value: &str) -> Result<MonthCursor, String> {
    MonthCursor::parse(value).ok_or_else(|| format!("expected YYYY-MM, got {value}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worklog=info,worklog_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let client = ApiClient::from_config(&config);

    let month = cli
        .month
        .unwrap_or_else(|| MonthCursor::containing(config.today()));
    let mut board = AttendanceBoard::new(cli.engineer.into(), month, config.page_size);
    if let Some(assignment) = cli.project_assignment {
        board = board.with_project_assignment(assignment.into());
    }

    tracing::info!(base_url = client.base_url(), %month, "loading attendance");
    board
        .refresh(&client)
        .await
        .with_context(|| format!("Failed to load attendance for {month}"))?;

    board.query_mut().set_attendance_type(cli.attendance_type);
    board.query_mut().set_specific_date(cli.date);
    board.go_to_page(cli.page);

    print_board(&board);
    Ok(())
}

fn print_board(board: &AttendanceBoard) {
    let view = board.view();
    println!("Attendance for {} ({})", board.engineer_id(), board.month());

    if view.page.is_empty() {
        println!("No attendance records.");
    } else {
        for record in &view.page.items {
            println!("{}", format_row(record));
        }
        println!(
            "Showing {}-{} of {} (page {} of {})",
            view.page.first_index + 1,
            view.page.last_index,
            view.filtered_count,
            view.page.current_page,
            view.page.total_pages
        );
    }

    println!(
        "Work days: {}  Leave days: {}  Absent days: {}  Hours: {:.2}",
        view.stats.work_days,
        view.stats.leave_days,
        view.stats.absent_days,
        board.worked_hours()
    );
}

fn format_row(record: &AttendanceRecord) -> String {
    let location = record
        .work_location
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());
    let span = match (record.start_time, record.end_time) {
        (Some(start), Some(end)) => format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")),
        _ => "-".to_string(),
    };
    let hours = record
        .worked_hours()
        .map(|h| format!("{h:.2}h"))
        .unwrap_or_else(|| "-".to_string());
    let project = record
        .project_name
        .as_deref()
        .unwrap_or_else(|| record.project_assignment_id.as_str());
    format!(
        "{:<10}  {:<13}  {:<11}  {:<11}  {:>6}  {}",
        record.work_date,
        record.attendance_type,
        location,
        span,
        hours,
        project
    )
}
