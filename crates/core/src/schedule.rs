use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Server-issued opaque identifier. Never minted client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleId(pub String);

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScheduleId {
    fn from(s: &str) -> Self {
        ScheduleId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Scheduled,
    Completed,
    Delayed,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Scheduled => write!(f, "scheduled"),
            ScheduleStatus::Completed => write!(f, "completed"),
            ScheduleStatus::Delayed => write!(f, "delayed"),
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(ScheduleStatus::Scheduled),
            "completed" => Ok(ScheduleStatus::Completed),
            "delayed" => Ok(ScheduleStatus::Delayed),
            other => Err(format!("Unknown status: '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    Normal,
    Special,
}

/// One expected repayment installment, as held server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub id: ScheduleId,
    pub amount: super::Yen,
    pub scheduled_date: NaiveDate,
    #[serde(with = "blank_date", default)]
    pub paid_date: Option<NaiveDate>,
    pub status: ScheduleStatus,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    pub payment_category: PaymentCategory,
}

/// Status transition proposed by reconciliation, in the shape the upload
/// endpoint expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentUpdate {
    pub id: ScheduleId,
    pub amount: super::Yen,
    pub scheduled_date: NaiveDate,
    #[serde(with = "blank_date", default)]
    pub paid_date: Option<NaiveDate>,
    pub status: ScheduleStatus,
    pub before_status: ScheduleStatus,
    pub payment_method: PaymentMethod,
    pub payment_category: PaymentCategory,
    #[serde(rename = "hasCSVUpdate")]
    pub has_csv_update: bool,
}

/// Audit record of one status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentHistoryEntry {
    pub id: ScheduleId,
    pub amount: super::Yen,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub before_status: ScheduleStatus,
    pub status: ScheduleStatus,
    pub note: Option<String>,
}

impl RepaymentHistoryEntry {
    pub fn from_update(
        update: &RepaymentUpdate,
        updated_at: Option<chrono::DateTime<chrono::Utc>>,
        note: Option<String>,
    ) -> Self {
        RepaymentHistoryEntry {
            id: update.id.clone(),
            amount: update.amount,
            updated_at,
            before_status: update.before_status,
            status: update.status,
            note,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ScheduleError {
    #[error("Entry {0} is completed but has no paid date")]
    CompletedWithoutPaidDate(ScheduleId),
    #[error("Entry {0} has a paid date in the future: {1}")]
    PaidInFuture(ScheduleId, NaiveDate),
    #[error("Entry {0} is delayed but carries a paid date")]
    DelayedWithPaidDate(ScheduleId),
    #[error("Entry {0} is delayed but its due date {1} has not passed")]
    DelayedBeforeDue(ScheduleId, NaiveDate),
}

impl ScheduleEntry {
    /// Checks the status/date invariants against a processing date.
    /// `Scheduled` entries whose due date has passed are not an error here;
    /// that drift is resolved by reconciliation, not enforced continuously.
    pub fn check_consistency(&self, today: NaiveDate) -> Result<(), ScheduleError> {
        match self.status {
            ScheduleStatus::Completed => match self.paid_date {
                None => Err(ScheduleError::CompletedWithoutPaidDate(self.id.clone())),
                Some(paid) if paid > today => {
                    Err(ScheduleError::PaidInFuture(self.id.clone(), paid))
                }
                Some(_) => Ok(()),
            },
            ScheduleStatus::Delayed => {
                if self.paid_date.is_some() {
                    return Err(ScheduleError::DelayedWithPaidDate(self.id.clone()));
                }
                if self.scheduled_date >= today {
                    return Err(ScheduleError::DelayedBeforeDue(
                        self.id.clone(),
                        self.scheduled_date,
                    ));
                }
                Ok(())
            }
            ScheduleStatus::Scheduled => Ok(()),
        }
    }
}

/// The remote API writes unset dates as `""` rather than omitting the key.
/// Accept blank, null, or a `YYYY-MM-DD` string on input and write blank
/// back on output.
mod blank_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => s
                .parse::<NaiveDate>()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
