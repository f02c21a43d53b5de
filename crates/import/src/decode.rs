use encoding_rs::SHIFT_JIS;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Input is not valid Shift-JIS")]
    InvalidShiftJis,
}

/// Decodes a Shift-JIS byte stream to a Rust string. Bank statement
/// downloads in this domain are Shift-JIS without exception; malformed
/// sequences mean the wrong file was selected, so they fail the decode
/// rather than being replaced.
pub fn decode_shift_jis(bytes: &[u8]) -> Result<String, DecodeError> {
    let (text, _, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        return Err(DecodeError::InvalidShiftJis);
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ascii() {
        assert_eq!(decode_shift_jis(b"2024/03/25,hello").unwrap(), "2024/03/25,hello");
    }

    #[test]
    fn decodes_japanese_text() {
        // "振込" in Shift-JIS.
        let bytes = [0x90, 0x55, 0x8D, 0x9E];
        assert_eq!(decode_shift_jis(&bytes).unwrap(), "振込");
    }

    #[test]
    fn rejects_malformed_sequences() {
        // A lead byte with no valid trail byte.
        let bytes = [0x90, 0x00, 0x41];
        assert!(matches!(
            decode_shift_jis(&bytes),
            Err(DecodeError::InvalidShiftJis)
        ));
    }
}
