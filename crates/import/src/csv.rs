use chrono::NaiveDate;
use hensai_core::Yen;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use thiserror::Error;

use crate::decode::DecodeError;

// Header names of the bank statement layout. The deposit and balance
// columns exist in the file but carry nothing we reconcile against.
const COL_DATE: &str = "日付";
const COL_DESCRIPTION: &str = "内容";
const COL_WITHDRAWAL: &str = "出金金額(円)";
const COL_NOTE: &str = "メモ";

/// How to read one bank's statement export.
#[derive(Debug, Clone)]
pub struct BankCsvProfile {
    /// Rows whose description does not match are not repayment transfers.
    pub transfer_marker: Regex,
    /// Tried in order; bank exports are not consistent about separators.
    pub date_formats: Vec<String>,
}

impl Default for BankCsvProfile {
    fn default() -> Self {
        Self {
            transfer_marker: Regex::new("振込").unwrap(),
            date_formats: vec![
                "%Y/%m/%d".to_string(),
                "%Y-%m-%d".to_string(),
                "%Y年%m月%d日".to_string(),
            ],
        }
    }
}

/// One accepted statement row. The withdrawal amount is carried as
/// `credit` — from the loan's point of view a withdrawal from the payer's
/// account is a repayment credit.
#[derive(Debug, Clone, PartialEq)]
pub struct BankTransaction {
    pub paid_date: NaiveDate,
    pub name: String,
    pub credit: Yen,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    NotATransfer,
    InvalidAmount(String),
    InvalidDate(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotATransfer => write!(f, "description does not match the transfer marker"),
            RejectReason::InvalidAmount(s) => write!(f, "amount is not a number: '{s}'"),
            RejectReason::InvalidDate(s) => write!(f, "date is missing or unparsable: '{s}'"),
        }
    }
}

/// A row excluded by the validity pre-filter, reported rather than
/// silently dropped. `line` is the 1-indexed physical line in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub line: usize,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedStatement {
    pub transactions: Vec<BankTransaction>,
    pub rejected: Vec<RejectedRow>,
}

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Parses a decoded statement. Individual bad rows land in `rejected`;
/// only a missing header column or an unreadable stream fails the batch.
pub fn read_statement<R: Read>(
    data: R,
    profile: &BankCsvProfile,
) -> Result<ParsedStatement, StatementError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let column = |name: &str| -> Result<usize, StatementError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| StatementError::MissingColumn(name.to_string()))
    };

    let date_col = column(COL_DATE)?;
    let desc_col = column(COL_DESCRIPTION)?;
    let amount_col = column(COL_WITHDRAWAL)?;
    // The note column is optional in older export layouts.
    let note_col = headers.iter().position(|h| h.trim() == COL_NOTE);

    let mut statement = ParsedStatement::default();

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2; // header occupies line 1
        let record = result?;

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let name = record.get(desc_col).unwrap_or_default().trim().to_string();
        if !profile.transfer_marker.is_match(&name) {
            statement.rejected.push(RejectedRow {
                line,
                reason: RejectReason::NotATransfer,
            });
            continue;
        }

        let raw_amount = record.get(amount_col).unwrap_or_default();
        let credit = match parse_yen(raw_amount) {
            Some(y) => y,
            None => {
                statement.rejected.push(RejectedRow {
                    line,
                    reason: RejectReason::InvalidAmount(raw_amount.to_string()),
                });
                continue;
            }
        };

        let raw_date = record.get(date_col).unwrap_or_default();
        let paid_date = match parse_date(raw_date, &profile.date_formats) {
            Some(d) => d,
            None => {
                statement.rejected.push(RejectedRow {
                    line,
                    reason: RejectReason::InvalidDate(raw_date.to_string()),
                });
                continue;
            }
        };

        let note = note_col
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        statement.transactions.push(BankTransaction {
            paid_date,
            name,
            credit,
            note,
        });
    }

    Ok(statement)
}

fn parse_date(s: &str, formats: &[String]) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Accepts "15,000", "15000円", "¥15,000". Negative or fractional values
/// are not valid withdrawal amounts.
fn parse_yen(s: &str) -> Option<Yen> {
    let cleaned = s.trim().replace([',', '円', '¥', ' '], "");
    if cleaned.is_empty() {
        return None;
    }
    let dec = Decimal::from_str(&cleaned).ok()?;
    if dec.is_sign_negative() || dec != dec.trunc() {
        return None;
    }
    dec.to_i64().map(Yen::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(data: &str) -> ParsedStatement {
        read_statement(data.as_bytes(), &BankCsvProfile::default()).unwrap()
    }

    const HEADER: &str = "日付,内容,出金金額(円),入金金額(円),残高(円),メモ\n";

    // ── parse_yen ────────────────────────────────────────────────────────────

    #[test]
    fn parse_yen_plain_and_grouped() {
        assert_eq!(parse_yen("15000"), Some(Yen::new(15_000)));
        assert_eq!(parse_yen("15,000"), Some(Yen::new(15_000)));
        assert_eq!(parse_yen("¥15,000"), Some(Yen::new(15_000)));
        assert_eq!(parse_yen("15000円"), Some(Yen::new(15_000)));
        assert_eq!(parse_yen("0"), Some(Yen::zero()));
    }

    #[test]
    fn parse_yen_rejects_garbage() {
        assert_eq!(parse_yen(""), None);
        assert_eq!(parse_yen("abc"), None);
        assert_eq!(parse_yen("-500"), None);
        assert_eq!(parse_yen("15000.5"), None);
    }

    // ── parse_date ───────────────────────────────────────────────────────────

    #[test]
    fn parse_date_tries_formats_in_order() {
        let formats = BankCsvProfile::default().date_formats;
        assert_eq!(parse_date("2024/03/25", &formats), Some(date(2024, 3, 25)));
        assert_eq!(parse_date("2024-03-25", &formats), Some(date(2024, 3, 25)));
        assert_eq!(parse_date("2024年3月25日", &formats), Some(date(2024, 3, 25)));
        assert_eq!(parse_date("", &formats), None);
        assert_eq!(parse_date("25.03.2024", &formats), None);
    }

    // ── read_statement ───────────────────────────────────────────────────────

    #[test]
    fn accepts_transfer_rows() {
        let data = format!("{HEADER}2024/03/25,振込 ヤマダ タロウ,15000,,285000,3月分\n");
        let parsed = parse(&data);
        assert!(parsed.rejected.is_empty());
        assert_eq!(
            parsed.transactions,
            vec![BankTransaction {
                paid_date: date(2024, 3, 25),
                name: "振込 ヤマダ タロウ".to_string(),
                credit: Yen::new(15_000),
                note: Some("3月分".to_string()),
            }]
        );
    }

    #[test]
    fn rejects_non_transfer_descriptions() {
        let data = format!("{HEADER}2024/03/25,コンビニ決済,500,,284500,\n");
        let parsed = parse(&data);
        assert!(parsed.transactions.is_empty());
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].line, 2);
        assert_eq!(parsed.rejected[0].reason, RejectReason::NotATransfer);
    }

    #[test]
    fn rejects_non_numeric_amounts_without_failing_the_batch() {
        let data = format!(
            "{HEADER}2024/03/25,振込 A,not-a-number,,0,\n2024/03/26,振込 B,20000,,0,\n"
        );
        let parsed = parse(&data);
        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.transactions[0].credit, Yen::new(20_000));
        assert!(matches!(
            parsed.rejected[0].reason,
            RejectReason::InvalidAmount(_)
        ));
    }

    #[test]
    fn rejects_unparsable_dates() {
        let data = format!("{HEADER},振込 A,15000,,0,\n");
        let parsed = parse(&data);
        assert!(parsed.transactions.is_empty());
        assert!(matches!(
            parsed.rejected[0].reason,
            RejectReason::InvalidDate(_)
        ));
    }

    #[test]
    fn ignores_deposit_and_balance_columns() {
        let data = format!("{HEADER}2024/03/25,振込 A,15000,99999,123456,\n");
        let parsed = parse(&data);
        assert_eq!(parsed.transactions[0].credit, Yen::new(15_000));
    }

    #[test]
    fn blank_lines_are_skipped_silently() {
        let data = format!("{HEADER}2024/03/25,振込 A,15000,,0,\n,,,,,\n");
        let parsed = parse(&data);
        assert_eq!(parsed.transactions.len(), 1);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn missing_required_column_fails_the_parse() {
        let data = "日付,内容\n2024/03/25,振込 A\n";
        let err = read_statement(data.as_bytes(), &BankCsvProfile::default()).unwrap_err();
        assert!(matches!(err, StatementError::MissingColumn(c) if c == COL_WITHDRAWAL));
    }

    #[test]
    fn line_numbers_count_the_header() {
        let data = format!("{HEADER}2024/03/25,振込 A,15000,,0,\nbad,コンビニ,1,,0,\n");
        let parsed = parse(&data);
        assert_eq!(parsed.rejected[0].line, 3);
    }

    // ── end-to-end with Shift-JIS bytes ──────────────────────────────────────

    #[test]
    fn parse_statement_decodes_shift_jis_first() {
        let utf8 = format!("{HEADER}2024/03/25,振込 ヤマダ タロウ,15000,,285000,\n");
        let (sjis, _, had_errors) = encoding_rs::SHIFT_JIS.encode(&utf8);
        assert!(!had_errors);
        let parsed = crate::parse_statement(&sjis, &BankCsvProfile::default()).unwrap();
        assert_eq!(parsed.transactions.len(), 1);
        assert_eq!(parsed.transactions[0].credit, Yen::new(15_000));
    }
}
