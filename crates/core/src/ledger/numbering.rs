//! Voucher number formatting.
//!
//! Voucher numbers take the form `PREFIX-YYYY-NNNNN`, monotonically
//! increasing per company, prefix, and year. The atomic increment itself
//! lives in the database layer (a locked sequence row); this module only
//! formats and parses.

use std::fmt;
use std::str::FromStr;

/// A structured voucher number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoucherNumber {
    /// Source prefix, e.g. `JV`, `SI`, `PV`.
    pub prefix: String,
    /// Calendar year of the sequence.
    pub year: i32,
    /// Position within the (prefix, year) sequence, starting at 1.
    pub sequence: i64,
}

impl VoucherNumber {
    /// Creates a voucher number from its parts.
    #[must_use]
    pub fn new(prefix: impl Into<String>, year: i32, sequence: i64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            sequence,
        }
    }
}

impl fmt::Display for VoucherNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}-{:05}", self.prefix, self.year, self.sequence)
    }
}

impl FromStr for VoucherNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let prefix = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| format!("Malformed voucher number: {s}"))?;
        let year = parts
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or_else(|| format!("Malformed voucher number: {s}"))?;
        let sequence = parts
            .next()
            .and_then(|p| p.parse::<i64>().ok())
            .filter(|&n| n > 0)
            .ok_or_else(|| format!("Malformed voucher number: {s}"))?;

        Ok(Self::new(prefix, year, sequence))
    }
}
