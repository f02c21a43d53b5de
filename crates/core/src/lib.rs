pub mod clock;
pub mod filter;
pub mod money;
pub mod schedule;
pub mod stats;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::{
    PeriodFilter, ScheduleBrowser, SchedulePage, SortDirection, StatusFilter,
};
pub use money::Yen;
pub use schedule::{
    PaymentCategory, PaymentMethod, RepaymentHistoryEntry, RepaymentUpdate, ScheduleEntry,
    ScheduleError, ScheduleId, ScheduleStatus,
};
pub use stats::{summarize, RepaymentSummary};
pub use window::closest_window;
