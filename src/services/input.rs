/// Numeric form guard: accepts the new text only when it is empty or all
/// ASCII digits, otherwise keeps the current buffer.
pub fn guard_numeric_input(current: &str, incoming: &str) -> String {
    if incoming.chars().all(|c| c.is_ascii_digit()) {
        incoming.to_string()
    } else {
        current.to_string()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Invalid,
}

/// Largest accepted value. Keeps daily sums far from `i64` overflow.
pub const MAX_VALUE: i64 = u32::MAX as i64;

/// Strict parse of an integer in `0..=MAX_VALUE`.
pub fn parse_non_negative(raw: &str) -> Result<i64, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    match trimmed.parse::<i64>() {
        Ok(n) if (0..=MAX_VALUE).contains(&n) => Ok(n),
        _ => Err(ParseError::Invalid),
    }
}
