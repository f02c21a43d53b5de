use chrono::{Datelike, NaiveDate};
use std::str::FromStr;

use crate::clock::Clock;
use crate::schedule::{ScheduleEntry, ScheduleStatus};

pub const DEFAULT_PER_PAGE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Scheduled,
    Delayed,
}

impl StatusFilter {
    fn matches(self, entry: &ScheduleEntry) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => entry.status == ScheduleStatus::Completed,
            StatusFilter::Scheduled => entry.status == ScheduleStatus::Scheduled,
            StatusFilter::Delayed => entry.status == ScheduleStatus::Delayed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "scheduled" => Ok(StatusFilter::Scheduled),
            "delayed" => Ok(StatusFilter::Delayed),
            other => Err(format!("Unknown status filter: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodFilter {
    #[default]
    All,
    ThisMonth,
    NextMonth,
    ThisYear,
}

impl PeriodFilter {
    fn matches(self, scheduled: NaiveDate, today: NaiveDate) -> bool {
        match self {
            PeriodFilter::All => true,
            PeriodFilter::ThisMonth => {
                scheduled.year() == today.year() && scheduled.month() == today.month()
            }
            PeriodFilter::NextMonth => {
                let (year, month) = if today.month() == 12 {
                    (today.year() + 1, 1)
                } else {
                    (today.year(), today.month() + 1)
                };
                scheduled.year() == year && scheduled.month() == month
            }
            PeriodFilter::ThisYear => scheduled.year() == today.year(),
        }
    }
}

impl FromStr for PeriodFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(PeriodFilter::All),
            "this-month" => Ok(PeriodFilter::ThisMonth),
            "next-month" => Ok(PeriodFilter::NextMonth),
            "this-year" => Ok(PeriodFilter::ThisYear),
            other => Err(format!("Unknown period filter: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction: '{other}'")),
        }
    }
}

/// One visible page of the filtered, sorted schedule.
#[derive(Debug, Clone)]
pub struct SchedulePage {
    pub entries: Vec<ScheduleEntry>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
}

/// View-model over the full schedule list: status/period/search filters,
/// date sort, and 1-indexed pagination, derived synchronously on demand.
///
/// Mutating a filter or the search term resets the page to 1; changing the
/// sort direction or the page itself does not.
#[derive(Debug, Clone)]
pub struct ScheduleBrowser {
    entries: Vec<ScheduleEntry>,
    status: StatusFilter,
    period: PeriodFilter,
    search: String,
    sort: SortDirection,
    page: usize,
    per_page: usize,
}

impl ScheduleBrowser {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        ScheduleBrowser {
            entries,
            status: StatusFilter::All,
            period: PeriodFilter::All,
            search: String::new(),
            sort: SortDirection::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_period_filter(&mut self, period: PeriodFilter) {
        self.period = period;
        self.page = 1;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortDirection) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    pub fn page_number(&self) -> usize {
        self.page
    }

    fn entry_matches(&self, entry: &ScheduleEntry, today: NaiveDate) -> bool {
        if !self.status.matches(entry) {
            return false;
        }
        if !self.period.matches(entry.scheduled_date, today) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        // Case-sensitive substring over the ISO date and the plain amount.
        entry.scheduled_date.to_string().contains(&self.search)
            || entry.amount.digits().contains(&self.search)
    }

    /// Derives the visible page. Pure in its inputs: the same browser state
    /// and the same clock date always produce the same page.
    pub fn page_view(&self, clock: &dyn Clock) -> SchedulePage {
        let today = clock.today();

        let mut filtered: Vec<ScheduleEntry> = self
            .entries
            .iter()
            .filter(|e| self.entry_matches(e, today))
            .cloned()
            .collect();

        // Stable sort keeps equal dates in input order for both directions.
        match self.sort {
            SortDirection::Asc => filtered.sort_by(|a, b| a.scheduled_date.cmp(&b.scheduled_date)),
            SortDirection::Desc => filtered.sort_by(|a, b| b.scheduled_date.cmp(&a.scheduled_date)),
        }

        let total_count = filtered.len();
        let total_pages = total_count.div_ceil(self.per_page);

        let start = (self.page - 1) * self.per_page;
        let entries = if start >= filtered.len() {
            Vec::new()
        } else {
            let end = (start + self.per_page).min(filtered.len());
            filtered[start..end].to_vec()
        };

        SchedulePage {
            entries,
            total_count,
            total_pages,
            page: self.page,
        }
    }
}
