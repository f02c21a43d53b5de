use std::path::Path;

use hensai_client::ApiClient;
use hensai_core::{
    closest_window, summarize, Clock, PeriodFilter, RepaymentHistoryEntry, ScheduleBrowser,
    ScheduleEntry, SortDirection, StatusFilter,
};
use hensai_import::{parse_statement, reconcile, BankCsvProfile};

use crate::error::AppError;

pub struct ListOptions {
    pub status: StatusFilter,
    pub period: PeriodFilter,
    pub search: Option<String>,
    pub sort: SortDirection,
    pub page: usize,
    pub per_page: usize,
}

/// Summary statistics plus a preview of the installments nearest today.
pub async fn dashboard(
    client: &ApiClient,
    clock: &dyn Clock,
    window: usize,
) -> Result<(), AppError> {
    let schedules = client.fetch_schedule().await?;

    // Inconsistent server data is logged, never rejected.
    for entry in &schedules {
        if let Err(e) = entry.check_consistency(clock.today()) {
            tracing::warn!(error = %e, "inconsistent schedule entry");
        }
    }

    let summary = summarize(&schedules);

    println!("Repayment summary");
    println!(
        "  total {} / repaid {} / remaining {}",
        summary.total_amount, summary.completed_amount, summary.remaining_amount
    );
    println!(
        "  {} completed, {} scheduled, {} delayed ({:.0}% repaid)",
        summary.completed_count,
        summary.scheduled_count,
        summary.delayed_count,
        summary.repaid_ratio() * 100.0
    );

    let preview = closest_window(&schedules, clock.today(), window);
    if preview.is_empty() {
        println!("\nNo installments on file.");
        return Ok(());
    }

    println!("\nUpcoming installments");
    for entry in &preview {
        print_entry(entry);
    }
    Ok(())
}

/// One page of the filtered, sorted schedule.
pub async fn list(
    client: &ApiClient,
    clock: &dyn Clock,
    opts: ListOptions,
) -> Result<(), AppError> {
    let schedules = client.fetch_schedule().await?;

    let mut browser = ScheduleBrowser::new(schedules);
    browser.set_status_filter(opts.status);
    browser.set_period_filter(opts.period);
    if let Some(term) = opts.search {
        browser.set_search(term);
    }
    browser.set_sort(opts.sort);
    browser.set_per_page(opts.per_page);
    // Page selection last: filter setters reset it to 1.
    browser.set_page(opts.page);

    let page = browser.page_view(clock);
    if page.total_count == 0 {
        println!("No matching installments.");
        return Ok(());
    }

    for entry in &page.entries {
        print_entry(entry);
    }
    println!(
        "page {}/{} — {} matching installments",
        page.page, page.total_pages, page.total_count
    );
    Ok(())
}

/// Reconcile a Shift-JIS bank statement export against the schedule and
/// optionally submit the resulting status transitions.
pub async fn reconcile_csv(
    client: &ApiClient,
    clock: &dyn Clock,
    file: &Path,
    marker: Option<&str>,
    upload: bool,
) -> Result<(), AppError> {
    let mut profile = BankCsvProfile::default();
    if let Some(pattern) = marker {
        profile.transfer_marker = regex::Regex::new(pattern)
            .map_err(|e| AppError::validation(format!("Invalid transfer marker pattern: {e}")))?;
    }

    let bytes = std::fs::read(file)?;
    let statement = parse_statement(&bytes, &profile)?;

    tracing::info!(
        accepted = statement.transactions.len(),
        rejected = statement.rejected.len(),
        "statement parsed"
    );
    if !statement.rejected.is_empty() {
        println!("Skipped {} row(s):", statement.rejected.len());
        for row in &statement.rejected {
            println!("  line {}: {}", row.line, row.reason);
        }
    }

    let schedules = client.fetch_schedule().await?;
    let updates = reconcile(&statement.transactions, &schedules, clock.today());

    if updates.is_empty() {
        println!("Schedule is up to date — no status changes.");
        return Ok(());
    }

    println!("Proposed status transitions:");
    for update in &updates {
        let history =
            RepaymentHistoryEntry::from_update(update, Some(chrono::Utc::now()), None);
        let paid = update
            .paid_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {}  due {}  {}  {} -> {}  paid {}",
            history.id,
            update.scheduled_date,
            history.amount,
            history.before_status,
            history.status,
            paid
        );
    }

    if !upload {
        println!("Dry run — pass --upload to submit {} update(s).", updates.len());
        return Ok(());
    }

    match client.upload_updates(&updates).await {
        Ok(()) => {
            println!("Upload succeeded — {} installment(s) updated.", updates.len());
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "upload failed");
            println!("Upload failed.");
            Err(e.into())
        }
    }
}

fn print_entry(entry: &ScheduleEntry) {
    let paid = entry
        .paid_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  {}  due {}  {}  {}  paid {}",
        entry.id, entry.scheduled_date, entry.amount, entry.status, paid
    );
}
