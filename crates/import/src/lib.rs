pub mod csv;
pub mod decode;
pub mod reconcile;

pub use csv::{
    read_statement, BankCsvProfile, BankTransaction, ParsedStatement, RejectReason, RejectedRow,
    StatementError,
};
pub use decode::{decode_shift_jis, DecodeError};
pub use reconcile::reconcile;

/// Decode a raw Shift-JIS statement file and parse it in one step.
pub fn parse_statement(
    bytes: &[u8],
    profile: &BankCsvProfile,
) -> Result<ParsedStatement, StatementError> {
    let text = decode_shift_jis(bytes)?;
    read_statement(text.as_bytes(), profile)
}
