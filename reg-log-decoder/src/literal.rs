//! Integer literal scanning shared by the header parser and log rewriter

/// Parse a complete C integer literal: `0x1F`/`0X1f` (hex) or `42` (decimal).
///
/// Returns `None` for anything else, including suffixed literals (`10UL`)
/// and values that do not fit in 64 bits.
pub(crate) fn parse_int_literal(token: &str) -> Option<u64> {
    if let Some(digits) = strip_hex_prefix(token) {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return u64::from_str_radix(digits, 16).ok();
    }
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Scan a hex literal at the start of `text`, consuming as many hex digits
/// as possible. Returns the value and the byte length of the literal.
pub(crate) fn scan_hex_literal(text: &str) -> Option<(u64, usize)> {
    let digits = strip_hex_prefix(text)?;
    let len = digits
        .bytes()
        .take_while(|b| b.is_ascii_hexdigit())
        .count();
    if len == 0 {
        return None;
    }
    let value = u64::from_str_radix(&digits[..len], 16).ok()?;
    Some((value, 2 + len))
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_literal() {
        assert_eq!(parse_int_literal("0x10"), Some(16));
        assert_eq!(parse_int_literal("0X1f"), Some(31));
        assert_eq!(parse_int_literal("16"), Some(16));
        assert_eq!(parse_int_literal("0"), Some(0));
        assert_eq!(parse_int_literal("0x"), None);
        assert_eq!(parse_int_literal("10UL"), None);
        assert_eq!(parse_int_literal("+5"), None);
        assert_eq!(parse_int_literal("FOO2"), None);
        assert_eq!(parse_int_literal("0x1ffffffffffffffff"), None);
    }

    #[test]
    fn test_scan_hex_literal() {
        assert_eq!(scan_hex_literal("0x100d, val"), Some((0x100d, 6)));
        assert_eq!(scan_hex_literal("0X7)"), Some((7, 3)));
        assert_eq!(scan_hex_literal("0xg"), None);
        assert_eq!(scan_hex_literal("100d"), None);
    }
}
