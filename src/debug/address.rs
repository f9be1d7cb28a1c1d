//! Breakpoint address grammar.
//!
//! Parsing happens in two stages:
//! 1. An optional partition qualifier: `R0:$C000`, `B3:$8000`, `3:$8000`
//! 2. A numeric literal for the address itself
//!
//! Numeric literals accept decimal (`49152`), hexadecimal (`$C000`,
//! `0xC000`) and binary (`%1100...`, `0b1100...`), with `_` or `'` as
//! digit separators.

use crate::error::{BreakpointError, BreakpointResult};
use crate::partition::{Partition, PartitionLayout};

/// A parsed, validated breakpoint address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointAddress {
    pub address: u16,
    pub partition: Option<Partition>,
}

/// Parses `[partition:]address` and validates the partition against the
/// machine's layout.
///
/// ```
/// use lib6510::{parse_breakpoint_address, Partition, PartitionLayout};
///
/// let layout = PartitionLayout::new(2, 8);
/// let bp = parse_breakpoint_address("R1:$C000", &layout).unwrap();
/// assert_eq!(bp.address, 0xC000);
/// assert_eq!(bp.partition, Some(Partition::Rom(1)));
///
/// assert!(parse_breakpoint_address("2:$8000", &PartitionLayout::default()).is_err());
/// ```
pub fn parse_breakpoint_address(
    text: &str,
    layout: &PartitionLayout,
) -> BreakpointResult<BreakpointAddress> {
    let (qualifier, literal) = split_partition_qualifier(text);

    let partition = match qualifier {
        Some(label) => Some(layout.parse(label)?),
        None => None,
    };

    let value = parse_numeric_literal(literal)?;
    let address =
        u16::try_from(value).map_err(|_| BreakpointError::AddressOutOfRange(value))?;

    Ok(BreakpointAddress { address, partition })
}

/// Stage 1: splits off the partition qualifier, if there is one.
pub fn split_partition_qualifier(text: &str) -> (Option<&str>, &str) {
    match text.split_once(':') {
        Some((label, rest)) => (Some(label.trim()), rest.trim()),
        None => (None, text.trim()),
    }
}

/// Stage 2: parses a numeric literal.
///
/// ```
/// use lib6510::parse_numeric_literal;
///
/// assert_eq!(parse_numeric_literal("$FF_FF").unwrap(), 0xFFFF);
/// assert_eq!(parse_numeric_literal("%1010'0101").unwrap(), 0xA5);
/// assert_eq!(parse_numeric_literal("1_024").unwrap(), 1024);
/// assert!(parse_numeric_literal("$").is_err());
/// ```
pub fn parse_numeric_literal(text: &str) -> BreakpointResult<i64> {
    let trimmed = text.trim();
    let invalid = || BreakpointError::InvalidLiteral(text.to_string());

    let (radix, body) = if let Some(rest) = trimmed.strip_prefix('$') {
        (16, rest)
    } else if let Some(rest) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        (16, rest)
    } else if let Some(rest) = trimmed.strip_prefix('%') {
        (2, rest)
    } else if let Some(rest) = trimmed
        .strip_prefix("0b")
        .or_else(|| trimmed.strip_prefix("0B"))
    {
        (2, rest)
    } else {
        (10, trimmed)
    };

    // Separators are only allowed between digits
    let is_separator = |c: char| c == '_' || c == '\'';
    if body.starts_with(is_separator) || body.ends_with(is_separator) {
        return Err(invalid());
    }
    let digits: String = body.chars().filter(|c| !is_separator(*c)).collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    i64::from_str_radix(&digits, radix).map_err(|_| invalid())
}
