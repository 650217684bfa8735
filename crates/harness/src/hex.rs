//! Hex parsing for output reports and seeds.

use crate::error::HarnessError;

/// Parses an output report written as hex bytes.
///
/// Bytes may be separated by whitespace or commas, carry an optional `0x`
/// prefix, or be run together (`"05ff00"`). Every token must have an even
/// number of digits.
pub fn parse_report(input: &str) -> Result<Vec<u8>, HarnessError> {
    let mut bytes = Vec::new();
    for token in input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let digits = strip_hex_prefix(token);
        let chars: Vec<char> = digits.chars().collect();
        if !chars.iter().all(char::is_ascii_hexdigit) {
            return Err(HarnessError::InvalidReport(format!(
                "'{token}' contains non-hex characters"
            )));
        }
        if chars.is_empty() || chars.len() % 2 != 0 {
            return Err(HarnessError::InvalidReport(format!(
                "'{token}' is not a whole number of hex bytes"
            )));
        }
        for pair in chars.chunks(2) {
            let pair: String = pair.iter().collect();
            let byte = u8::from_str_radix(&pair, 16).map_err(|e| {
                HarnessError::InvalidReport(format!("'{pair}' in '{token}': {e}"))
            })?;
            bytes.push(byte);
        }
    }
    if bytes.is_empty() {
        return Err(HarnessError::InvalidReport(
            "report must contain at least the report ID byte".to_string(),
        ));
    }
    Ok(bytes)
}

/// Parses a `u32` in hex, with or without a `0x` prefix.
pub fn parse_hex_u32(input: &str) -> Result<u32, HarnessError> {
    let raw = input.trim();
    u32::from_str_radix(strip_hex_prefix(raw), 16)
        .map_err(|e| HarnessError::InvalidHex(format!("'{raw}': {e}")))
}

fn strip_hex_prefix(token: &str) -> &str {
    token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaced_bytes() -> Result<(), HarnessError> {
        assert_eq!(parse_report("05 ff 04 00")?, vec![0x05, 0xFF, 0x04, 0x00]);
        Ok(())
    }

    #[test]
    fn prefixed_and_comma_separated() -> Result<(), HarnessError> {
        assert_eq!(parse_report("0x05,0xFF, 0X10")?, vec![0x05, 0xFF, 0x10]);
        Ok(())
    }

    #[test]
    fn run_together() -> Result<(), HarnessError> {
        assert_eq!(parse_report("05ff00")?, vec![0x05, 0xFF, 0x00]);
        Ok(())
    }

    #[test]
    fn odd_length_rejected() {
        assert!(matches!(
            parse_report("5ff"),
            Err(HarnessError::InvalidReport(_))
        ));
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(parse_report(""), Err(HarnessError::InvalidReport(_))));
        assert!(matches!(
            parse_report(" , "),
            Err(HarnessError::InvalidReport(_))
        ));
        assert!(matches!(parse_report("0x"), Err(HarnessError::InvalidReport(_))));
    }

    #[test]
    fn non_hex_rejected() {
        assert!(matches!(parse_report("zz"), Err(HarnessError::InvalidReport(_))));
    }

    #[test]
    fn seeds() -> Result<(), HarnessError> {
        assert_eq!(parse_hex_u32("0xFFFFFFFF")?, 0xFFFF_FFFF);
        assert_eq!(parse_hex_u32("deadbeef")?, 0xDEAD_BEEF);
        assert_eq!(parse_hex_u32(" 0 ")?, 0);
        assert!(matches!(
            parse_hex_u32("1_0000_0000"),
            Err(HarnessError::InvalidHex(_))
        ));
        Ok(())
    }
}
